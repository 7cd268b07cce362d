//! Parameter type value object
//!
//! Mirrors the Terraform type constraint syntax (`string`, `list(string)`,
//! `map(any)`, ...) so parameter listings read like variable blocks.

use std::fmt;
use std::str::FromStr;

use super::ParamValue;

/// Declared type of a stack parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamType {
    String,
    Bool,
    Number,
    List(Box<ParamType>),
    Map(Box<ParamType>),
    /// Accepts any value
    Any,
}

impl ParamType {
    pub fn list(element: ParamType) -> Self {
        ParamType::List(Box::new(element))
    }

    pub fn map(element: ParamType) -> Self {
        ParamType::Map(Box::new(element))
    }

    /// Check whether a value conforms to this type.
    ///
    /// `Null` never conforms; the binder treats it as "unset" before calling this.
    pub fn accepts(&self, value: &ParamValue) -> bool {
        match (self, value) {
            (ParamType::Any, ParamValue::Null) => false,
            (ParamType::Any, ParamValue::Number(n)) => n.is_finite(),
            (ParamType::Any, _) => true,
            (ParamType::String, ParamValue::String(_)) => true,
            (ParamType::Bool, ParamValue::Bool(_)) => true,
            (ParamType::Number, ParamValue::Number(n)) => n.is_finite(),
            (ParamType::List(element), ParamValue::List(items)) => {
                items.iter().all(|item| element.accepts(item))
            }
            (ParamType::Map(element), ParamValue::Map(entries)) => {
                entries.values().all(|item| element.accepts(item))
            }
            _ => false,
        }
    }

    /// Parse a raw command-line value according to this type.
    ///
    /// Strings are taken verbatim, scalars are parsed, and collections are read
    /// as JSON. `any` falls back to a plain string when the input is not JSON.
    pub fn parse_raw(&self, raw: &str) -> Result<ParamValue, String> {
        match self {
            ParamType::String => Ok(ParamValue::String(raw.to_string())),
            ParamType::Bool => match raw.trim() {
                "true" => Ok(ParamValue::Bool(true)),
                "false" => Ok(ParamValue::Bool(false)),
                other => Err(format!("'{}' is not a bool", other)),
            },
            ParamType::Number => raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .map(ParamValue::Number)
                .ok_or_else(|| format!("'{}' is not a number", raw.trim())),
            ParamType::List(_) | ParamType::Map(_) => {
                serde_json::from_str::<ParamValue>(raw).map_err(|e| e.to_string())
            }
            ParamType::Any => Ok(serde_json::from_str::<ParamValue>(raw)
                .unwrap_or_else(|_| ParamValue::String(raw.to_string()))),
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamType::String => write!(f, "string"),
            ParamType::Bool => write!(f, "bool"),
            ParamType::Number => write!(f, "number"),
            ParamType::List(element) => write!(f, "list({})", element),
            ParamType::Map(element) => write!(f, "map({})", element),
            ParamType::Any => write!(f, "any"),
        }
    }
}

impl FromStr for ParamType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s {
            "string" => return Ok(ParamType::String),
            "bool" => return Ok(ParamType::Bool),
            "number" => return Ok(ParamType::Number),
            "any" => return Ok(ParamType::Any),
            _ => {}
        }

        let inner = |prefix: &str| {
            s.strip_prefix(prefix)
                .and_then(|rest| rest.strip_suffix(')'))
                .map(str::parse::<ParamType>)
        };

        if let Some(element) = inner("list(") {
            return element.map(ParamType::list);
        }
        if let Some(element) = inner("map(") {
            return element.map(ParamType::map);
        }

        Err(format!("unknown type '{}'", s))
    }
}
