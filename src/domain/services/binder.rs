//! Parameter binder
//!
//! Binds supplied inputs to declared parameters once, before composition.
//! Validation is by type only; no cross-field checks are made.

use std::collections::BTreeMap;

use crate::domain::entities::Parameter;
use crate::domain::value_objects::ParamValue;
use crate::error::{StackError, StackResult};

use super::suggest::suggest_closest;

/// Raw inputs by parameter name
pub type Inputs = BTreeMap<String, ParamValue>;

/// Non-fatal binding warning (an input no parameter declares)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindWarning {
    pub name: String,
    pub suggestion: Option<String>,
}

/// Outcome of a successful bind
#[derive(Debug, Clone)]
pub struct Binding {
    pub parameters: BoundParameters,
    pub warnings: Vec<BindWarning>,
}

/// Bind inputs to parameters.
///
/// Fails on the first required parameter (in declaration order) that has no
/// value, or on the first supplied value whose type does not conform.
pub fn bind(parameters: &[Parameter], inputs: &Inputs) -> StackResult<Binding> {
    let mut values = BTreeMap::new();

    for parameter in parameters {
        let supplied = inputs.get(parameter.name()).filter(|v| !v.is_null());

        let bound = match (supplied, parameter.default()) {
            (Some(value), _) => {
                if !parameter.ty().accepts(value) {
                    return Err(StackError::TypeMismatch {
                        name: parameter.name().to_string(),
                        expected: parameter.ty().to_string(),
                        found: value.kind().to_string(),
                    });
                }
                Some(value.clone())
            }
            (None, Some(ParamValue::Null)) => None,
            (None, Some(default)) => Some(default.clone()),
            (None, None) => {
                return Err(StackError::MissingParameter {
                    name: parameter.name().to_string(),
                })
            }
        };

        values.insert(parameter.name().to_string(), bound);
    }

    let warnings = inputs
        .keys()
        .filter(|name| !values.contains_key(name.as_str()))
        .map(|name| BindWarning {
            name: name.clone(),
            suggestion: suggest_closest(name, parameters.iter().map(Parameter::name)),
        })
        .collect();

    tracing::info!(bound = values.len(), "parameters bound");

    Ok(Binding {
        parameters: BoundParameters { values },
        warnings,
    })
}

/// Parameters after binding; `None` marks an optional parameter left unset
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BoundParameters {
    values: BTreeMap<String, Option<ParamValue>>,
}

impl BoundParameters {
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name).and_then(Option::as_ref)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn string(&self, name: &str) -> StackResult<&str> {
        self.optional_string(name)?
            .ok_or_else(|| missing(name))
    }

    pub fn optional_string(&self, name: &str) -> StackResult<Option<&str>> {
        match self.lookup(name)? {
            None => Ok(None),
            Some(ParamValue::String(s)) => Ok(Some(s)),
            Some(other) => Err(mismatch(name, "string", other)),
        }
    }

    pub fn bool(&self, name: &str) -> StackResult<bool> {
        match self.lookup(name)? {
            Some(ParamValue::Bool(b)) => Ok(*b),
            Some(other) => Err(mismatch(name, "bool", other)),
            None => Err(missing(name)),
        }
    }

    pub fn number(&self, name: &str) -> StackResult<f64> {
        match self.lookup(name)? {
            Some(ParamValue::Number(n)) => Ok(*n),
            Some(other) => Err(mismatch(name, "number", other)),
            None => Err(missing(name)),
        }
    }

    pub fn string_list(&self, name: &str) -> StackResult<Vec<&str>> {
        match self.lookup(name)? {
            Some(ParamValue::List(items)) => items
                .iter()
                .map(|item| match item {
                    ParamValue::String(s) => Ok(s.as_str()),
                    other => Err(mismatch(name, "list(string)", other)),
                })
                .collect(),
            Some(other) => Err(mismatch(name, "list(string)", other)),
            None => Err(missing(name)),
        }
    }

    pub fn optional_map(&self, name: &str) -> StackResult<Option<&BTreeMap<String, ParamValue>>> {
        match self.lookup(name)? {
            None => Ok(None),
            Some(ParamValue::Map(entries)) => Ok(Some(entries)),
            Some(other) => Err(mismatch(name, "map", other)),
        }
    }

    /// Declared parameter lookup; undeclared names are a template defect
    fn lookup(&self, name: &str) -> StackResult<Option<&ParamValue>> {
        self.values
            .get(name)
            .map(Option::as_ref)
            .ok_or_else(|| missing(name))
    }
}

fn missing(name: &str) -> StackError {
    StackError::MissingParameter {
        name: name.to_string(),
    }
}

fn mismatch(name: &str, expected: &str, found: &ParamValue) -> StackError {
    StackError::TypeMismatch {
        name: name.to_string(),
        expected: expected.to_string(),
        found: found.kind().to_string(),
    }
}
