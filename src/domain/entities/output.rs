//! Composite output - a named value the stack exposes to its caller

use super::Value;

/// Named value exposed by the whole composition
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeOutput {
    name: String,
    value: Value,
    description: Option<String>,
    sensitive: bool,
}

impl CompositeOutput {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        let value = value.into();
        let sensitive = value.is_secret();
        Self {
            name: name.into(),
            value,
            description: None,
            sensitive,
        }
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Outputs fed by secret material are marked sensitive for Terraform
    pub fn is_sensitive(&self) -> bool {
        self.sensitive
    }
}
