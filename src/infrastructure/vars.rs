//! Input variable sources
//!
//! Precedence, lowest first: `TF_VAR_*` environment, vars files in order,
//! `--var` assignments in order. Later sources overwrite earlier ones key by
//! key.

use std::path::{Path, PathBuf};

use crate::domain::entities::Parameter;
use crate::domain::services::Inputs;
use crate::domain::value_objects::{ParamType, ParamValue};
use crate::error::{StackError, StackResult};

/// Environment variable prefix for inputs
pub const ENV_PREFIX: &str = "TF_VAR_";

/// Every input source for one run
#[derive(Debug, Clone, Default)]
pub struct InputSources {
    pub env: Vec<(String, String)>,
    pub files: Vec<PathBuf>,
    pub assignments: Vec<String>,
}

impl InputSources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture `TF_VAR_*` from the process environment
    pub fn with_process_env(mut self) -> Self {
        self.env = std::env::vars()
            .filter(|(key, _)| key.starts_with(ENV_PREFIX))
            .collect();
        self
    }

    pub fn with_env(mut self, env: Vec<(String, String)>) -> Self {
        self.env = env;
        self
    }

    pub fn with_files(mut self, files: impl IntoIterator<Item = PathBuf>) -> Self {
        self.files.extend(files);
        self
    }

    pub fn with_assignments(mut self, assignments: impl IntoIterator<Item = String>) -> Self {
        self.assignments.extend(assignments);
        self
    }

    /// Merge all sources into one input map
    pub fn collect(&self, parameters: &[Parameter]) -> StackResult<Inputs> {
        let mut inputs = env_inputs(&self.env, parameters)?;

        for file in &self.files {
            let loaded = load_vars_file(file)?;
            tracing::debug!(file = %file.display(), count = loaded.len(), "vars file loaded");
            inputs.extend(loaded);
        }

        for assignment in &self.assignments {
            let (name, value) = parse_assignment(assignment, parameters)?;
            inputs.insert(name, value);
        }

        Ok(inputs)
    }
}

enum VarsFormat {
    Json,
    Toml,
    Yaml,
}

/// Read a `.json`, `.toml`, `.yaml` or `.yml` vars file
pub fn load_vars_file(path: &Path) -> StackResult<Inputs> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    let format = match extension.as_deref() {
        Some("json") => VarsFormat::Json,
        Some("toml") => VarsFormat::Toml,
        Some("yaml" | "yml") => VarsFormat::Yaml,
        _ => {
            return Err(StackError::UnsupportedVarsFormat {
                file: path.to_path_buf(),
            })
        }
    };

    let content = std::fs::read_to_string(path)?;
    let invalid = |message: String| StackError::InvalidVarsFile {
        file: path.to_path_buf(),
        message,
    };

    match format {
        VarsFormat::Json => serde_json::from_str(&content).map_err(|e| invalid(e.to_string())),
        VarsFormat::Toml => toml::from_str(&content).map_err(|e| invalid(e.to_string())),
        VarsFormat::Yaml => {
            if content.trim().is_empty() {
                return Ok(Inputs::new());
            }
            serde_yaml_ng::from_str(&content).map_err(|e| invalid(e.to_string()))
        }
    }
}

/// Parse one `name=value` assignment using the declared type of `name`.
///
/// Names no parameter declares are kept as strings; binding reports them.
pub fn parse_assignment(input: &str, parameters: &[Parameter]) -> StackResult<(String, ParamValue)> {
    let Some((name, raw)) = input.split_once('=') else {
        return Err(StackError::InvalidVarAssignment {
            input: input.to_string(),
        });
    };

    let name = name.trim();
    if name.is_empty() {
        return Err(StackError::InvalidVarAssignment {
            input: input.to_string(),
        });
    }

    let value = parse_for(name, raw, parameters)?;
    Ok((name.to_string(), value))
}

/// `TF_VAR_<name>` values for declared parameters; others are ignored
fn env_inputs(env: &[(String, String)], parameters: &[Parameter]) -> StackResult<Inputs> {
    let mut inputs = Inputs::new();
    for (key, raw) in env {
        let Some(name) = key.strip_prefix(ENV_PREFIX) else {
            continue;
        };
        if !parameters.iter().any(|p| p.name() == name) {
            continue;
        }
        inputs.insert(name.to_string(), parse_for(name, raw, parameters)?);
    }
    Ok(inputs)
}

fn parse_for(name: &str, raw: &str, parameters: &[Parameter]) -> StackResult<ParamValue> {
    let ty = parameters
        .iter()
        .find(|p| p.name() == name)
        .map(|p| p.ty().clone())
        .unwrap_or(ParamType::String);

    ty.parse_raw(raw).map_err(|_| StackError::TypeMismatch {
        name: name.to_string(),
        expected: ty.to_string(),
        found: format!("'{}'", raw),
    })
}
