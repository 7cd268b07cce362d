//! Declaration entity - one resource the provisioning engine should manage
//!
//! Attribute values are either literals or references to other declarations'
//! future outputs. Nothing here is resolved; the synthesizer only renders.

use std::collections::BTreeMap;

use crate::domain::value_objects::{
    json_number, Address, LogicalId, OutputRef, ParamValue, ResourceKind, Template,
};

/// Placeholder shown instead of secret material
pub const SENSITIVE: &str = "(sensitive)";

/// Attribute value of a declaration
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    List(Vec<Value>),
    /// Nested block or object
    Block(BTreeMap<String, Value>),
    /// Whole-value reference to another declaration's output
    Ref(OutputRef),
    /// String interpolating one or more references
    Template(Template),
    /// Reference whose resolved value is secret material
    Secret(OutputRef),
}

impl Value {
    /// Build a block from `(key, value)` pairs
    pub fn block<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Value::Block(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Collect every reference in this value, depth first
    pub fn collect_references<'a>(&'a self, out: &mut Vec<&'a OutputRef>) {
        match self {
            Value::Ref(r) | Value::Secret(r) => out.push(r),
            Value::Template(t) => out.extend(t.references()),
            Value::List(items) => {
                for item in items {
                    item.collect_references(out);
                }
            }
            Value::Block(entries) => {
                for item in entries.values() {
                    item.collect_references(out);
                }
            }
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {}
        }
    }

    pub fn is_secret(&self) -> bool {
        matches!(self, Value::Secret(_))
    }

    /// Terraform JSON rendering
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Number(n) => json_number(*n),
            Value::String(s) => serde_json::Value::String(escape_plain(s)),
            Value::List(items) => serde_json::Value::Array(items.iter().map(Value::to_json).collect()),
            Value::Block(entries) => serde_json::Value::Object(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
            Value::Ref(r) | Value::Secret(r) => serde_json::Value::String(r.interpolation()),
            Value::Template(t) => serde_json::Value::String(t.render()),
        }
    }

    /// JSON rendering with secrets replaced by `"(sensitive)"`
    pub fn to_masked_json(&self) -> serde_json::Value {
        match self {
            Value::Secret(_) => serde_json::Value::String(SENSITIVE.to_string()),
            Value::List(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_masked_json).collect())
            }
            Value::Block(entries) => serde_json::Value::Object(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_masked_json()))
                    .collect(),
            ),
            other => other.to_json(),
        }
    }

    /// Human-readable rendering; secrets are masked
    pub fn display(&self) -> String {
        match self {
            Value::Secret(_) => SENSITIVE.to_string(),
            Value::List(items) => {
                let inner: Vec<String> = items.iter().map(Value::display).collect();
                format!("[{}]", inner.join(", "))
            }
            Value::Block(entries) => {
                let inner: Vec<String> = entries
                    .iter()
                    .map(|(k, v)| format!("{} = {}", k, v.display()))
                    .collect();
                format!("{{ {} }}", inner.join(", "))
            }
            other => other.to_json().to_string(),
        }
    }
}

/// Plain strings are literal text, so template introducers are escaped.
fn escape_plain(s: &str) -> String {
    crate::domain::value_objects::escape_literal(s)
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::String(s.clone())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<OutputRef> for Value {
    fn from(r: OutputRef) -> Self {
        Value::Ref(r)
    }
}

impl From<Template> for Value {
    fn from(t: Template) -> Self {
        Value::Template(t)
    }
}

impl From<&ParamValue> for Value {
    fn from(value: &ParamValue) -> Self {
        match value {
            ParamValue::Null => Value::Null,
            ParamValue::Bool(b) => Value::Bool(*b),
            ParamValue::Number(n) => Value::Number(*n),
            ParamValue::String(s) => Value::String(s.clone()),
            ParamValue::List(items) => Value::List(items.iter().map(Value::from).collect()),
            ParamValue::Map(entries) => Value::Block(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

/// A resource declaration: address, attributes, explicit dependencies
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    address: Address,
    attributes: BTreeMap<String, Value>,
    depends_on: Vec<Address>,
}

impl Declaration {
    pub fn new(kind: ResourceKind, name: LogicalId) -> Self {
        Self {
            address: Address::new(kind, name),
            attributes: BTreeMap::new(),
            depends_on: Vec::new(),
        }
    }

    /// Set an attribute; `Null` values are dropped
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let value = value.into();
        if value != Value::Null {
            self.attributes.insert(key.into(), value);
        }
        self
    }

    /// Add an explicit dependency edge
    pub fn depends_on(mut self, address: &Address) -> Self {
        if !self.depends_on.contains(address) {
            self.depends_on.push(address.clone());
        }
        self
    }

    pub fn depends_on_all<'a>(self, addresses: impl IntoIterator<Item = &'a Address>) -> Self {
        addresses
            .into_iter()
            .fold(self, |decl, address| decl.depends_on(address))
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn kind(&self) -> ResourceKind {
        self.address.kind()
    }

    pub fn attributes(&self) -> &BTreeMap<String, Value> {
        &self.attributes
    }

    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// Attribute as a plain string, if it is one
    pub fn string_attribute(&self, key: &str) -> Option<&str> {
        match self.attributes.get(key) {
            Some(Value::String(s)) => Some(s),
            _ => None,
        }
    }

    pub fn explicit_dependencies(&self) -> &[Address] {
        &self.depends_on
    }

    /// All references held by the attributes
    pub fn references(&self) -> Vec<&OutputRef> {
        let mut out = Vec::new();
        for value in self.attributes.values() {
            value.collect_references(&mut out);
        }
        out
    }

    /// Explicit and implicit dependencies, deduplicated, explicit first
    pub fn dependencies(&self) -> Vec<&Address> {
        let mut deps: Vec<&Address> = Vec::new();
        let implicit = self.references().into_iter().map(OutputRef::target);
        for address in self.depends_on.iter().chain(implicit) {
            if !deps.contains(&address) {
                deps.push(address);
            }
        }
        deps
    }

    /// Names of attributes holding secret material
    pub fn secret_attributes(&self) -> impl Iterator<Item = &str> {
        self.attributes
            .iter()
            .filter(|(_, v)| v.is_secret())
            .map(|(k, _)| k.as_str())
    }
}
