//! Parameter entity - a named, typed input of the stack

use serde::Serialize;

use crate::domain::value_objects::{ParamType, ParamValue};

/// Declared stack input
///
/// A parameter without a default is required. A `Null` default means the
/// parameter is optional and binds as absent when not supplied.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    name: String,
    ty: ParamType,
    default: Option<ParamValue>,
    description: Option<String>,
}

impl Parameter {
    /// Parameter that must be supplied
    pub fn required(name: impl Into<String>, ty: ParamType) -> Self {
        Self {
            name: name.into(),
            ty,
            default: None,
            description: None,
        }
    }

    /// Parameter with a default value (`ParamValue::Null` for "unset")
    pub fn with_default(name: impl Into<String>, ty: ParamType, default: ParamValue) -> Self {
        Self {
            name: name.into(),
            ty,
            default: Some(default),
            description: None,
        }
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> &ParamType {
        &self.ty
    }

    pub fn default(&self) -> Option<&ParamValue> {
        self.default.as_ref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }

    /// Serializable summary for `params --json`
    pub fn summary(&self) -> ParameterSummary {
        ParameterSummary {
            name: self.name.clone(),
            ty: self.ty.to_string(),
            required: self.is_required(),
            default: self.default.as_ref().map(ParamValue::to_json),
            description: self.description.clone(),
        }
    }
}

/// JSON view of a parameter
#[derive(Debug, Clone, Serialize)]
pub struct ParameterSummary {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
