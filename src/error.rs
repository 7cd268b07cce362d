//! Error types for funcstack
//!
//! Uses `thiserror` for library errors; the binary wraps them in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for funcstack operations
pub type StackResult<T> = Result<T, StackError>;

/// Main error type for composition, binding and synthesis
#[derive(Error, Debug)]
pub enum StackError {
    /// Required parameter has neither a supplied value nor a default
    #[error("missing required parameter '{name}'")]
    MissingParameter { name: String },

    /// Supplied value does not match the declared parameter type
    #[error("parameter '{name}' expects {expected}, got {found}")]
    TypeMismatch {
        name: String,
        expected: String,
        found: String,
    },

    /// `--var` argument without `name=value` shape
    #[error("invalid variable assignment '{input}' - expected NAME=VALUE")]
    InvalidVarAssignment { input: String },

    /// Vars file could not be parsed
    #[error("invalid vars file {file}: {message}")]
    InvalidVarsFile { file: PathBuf, message: String },

    /// Vars file extension is not one of json, toml, yaml
    #[error("unsupported vars file format: {file} (expected .json, .toml, .yaml or .yml)")]
    UnsupportedVarsFormat { file: PathBuf },

    /// Logical name not usable as a Terraform identifier
    #[error("invalid logical id '{id}'")]
    InvalidLogicalId { id: String },

    /// Two declarations share one address
    #[error("duplicate declaration '{address}'")]
    DuplicateDeclaration { address: String },

    /// A declaration or output points at an address that was never declared
    #[error("'{from}' references undeclared '{to}'")]
    DanglingReference { from: String, to: String },

    /// The dependency graph contains a cycle
    #[error("dependency cycle: {path}")]
    DependencyCycle { path: String },

    /// Configuration file could not be parsed
    #[error("invalid config {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
