//! Shared JSON event types for consistent CLI output.
//!
//! Every `--json` line carries an `event` field and the `command` that
//! produced it.

use serde::Serialize;

/// Event emitted when a command starts.
#[derive(Debug, Clone, Serialize)]
pub struct StartEvent<'a> {
    pub event: &'static str,
    pub command: &'a str,
    pub version: &'static str,
}

impl<'a> StartEvent<'a> {
    pub fn new(command: &'a str) -> Self {
        Self {
            event: "start",
            command,
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

/// Event emitted when a command finishes.
#[derive(Debug, Clone, Serialize)]
pub struct CompleteEvent<'a> {
    pub event: &'static str,
    pub command: &'a str,
    pub success: bool,
}

impl<'a> CompleteEvent<'a> {
    pub fn success(command: &'a str) -> Self {
        Self {
            event: "complete",
            command,
            success: true,
        }
    }
}

/// Event emitted when a command fails.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorEvent<'a> {
    pub event: &'static str,
    pub command: &'a str,
    pub message: String,
}

impl<'a> ErrorEvent<'a> {
    pub fn new(command: &'a str, message: impl Into<String>) -> Self {
        Self {
            event: "error",
            command,
            message: message.into(),
        }
    }
}

/// Non-fatal warning: unknown config key or unknown input
#[derive(Debug, Clone, Serialize)]
pub struct WarningEvent<'a> {
    pub event: &'static str,
    pub command: &'a str,
    pub source: &'static str,
    pub key: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<&'a str>,
}

impl<'a> WarningEvent<'a> {
    pub fn unknown_input(command: &'a str, key: &'a str, suggestion: Option<&'a str>) -> Self {
        Self {
            event: "warning",
            command,
            source: "inputs",
            key,
            suggestion,
        }
    }

    pub fn unknown_config_key(command: &'a str, key: &'a str, suggestion: Option<&'a str>) -> Self {
        Self {
            event: "warning",
            command,
            source: "config",
            key,
            suggestion,
        }
    }
}

/// One declaration of the graph, secrets masked
#[derive(Debug, Clone, Serialize)]
pub struct DeclarationEvent<'a> {
    pub event: &'static str,
    pub command: &'a str,
    pub address: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub name: String,
    pub depends_on: Vec<String>,
    pub attributes: serde_json::Value,
}

/// Artifact written to disk
#[derive(Debug, Clone, Serialize)]
pub struct WrittenEvent<'a> {
    pub event: &'static str,
    pub command: &'a str,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_hash: Option<String>,
}

impl<'a> WrittenEvent<'a> {
    pub fn new(command: &'a str, path: impl Into<String>) -> Self {
        Self {
            event: "written",
            command,
            path: path.into(),
            content_hash: None,
        }
    }

    pub fn with_hash(mut self, hash: impl Into<String>) -> Self {
        self.content_hash = Some(hash.into());
        self
    }
}

/// Outcome of comparing an existing document with a fresh synthesis
#[derive(Debug, Clone, Serialize)]
pub struct DiffEvent<'a> {
    pub event: &'static str,
    pub command: &'a str,
    pub path: String,
    pub changed: bool,
    pub added: usize,
    pub removed: usize,
}
