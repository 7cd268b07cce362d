//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::services::suggest_closest;
use crate::error::{StackError, StackResult};

use super::types::{Config, Verbosity};

/// Project-level config file name
pub const PROJECT_CONFIG_FILE: &str = "funcstack.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// Resolved configuration plus where it came from
#[derive(Debug, Clone, Default)]
pub struct LoadedConfig {
    pub config: Config,
    pub warnings: Vec<ConfigWarning>,
    /// `None` when built-in defaults were used
    pub source: Option<PathBuf>,
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
///
/// Relative `vars.files` entries are resolved against the file's directory.
pub fn load_with_warnings(path: &Path) -> StackResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let mut config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| StackError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    if let Some(base) = path.parent() {
        for file in &mut config.vars.files {
            if file.is_relative() {
                *file = base.join(&*file);
            }
        }
    }

    let warnings: Vec<ConfigWarning> = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_closest(&key, KNOWN_KEYS.iter().copied()),
            }
        })
        .collect();

    for warning in &warnings {
        tracing::warn!(key = %warning.key, file = %warning.file.display(), "unknown config key");
    }

    Ok((config, warnings))
}

/// Explicit path, then `./funcstack.toml`, then the user config, then defaults.
///
/// An explicit path that does not exist is an error; the other locations are
/// optional.
pub fn resolve(explicit: Option<&Path>, project_root: &Path) -> StackResult<LoadedConfig> {
    let candidates: Vec<PathBuf> = match explicit {
        Some(path) => vec![path.to_path_buf()],
        None => {
            let mut paths = vec![project_root.join(PROJECT_CONFIG_FILE)];
            if let Some(dir) = user_config_dir() {
                paths.push(dir.join("funcstack/config.toml"));
            }
            paths.retain(|p| p.is_file());
            paths
        }
    };

    let Some(path) = candidates.into_iter().next() else {
        tracing::debug!("no config file, using defaults");
        return Ok(LoadedConfig {
            config: with_env_overrides(Config::default(), |key| std::env::var(key).ok()),
            ..LoadedConfig::default()
        });
    };

    let (config, warnings) = load_with_warnings(&path)?;
    tracing::debug!(file = %path.display(), "config loaded");
    Ok(LoadedConfig {
        config: with_env_overrides(config, |key| std::env::var(key).ok()),
        warnings,
        source: Some(path),
    })
}

/// Apply environment variable overrides (FUNCSTACK_* prefix)
pub fn with_env_overrides(mut config: Config, lookup: impl Fn(&str) -> Option<String>) -> Config {
    if let Some(out_dir) = lookup("FUNCSTACK_OUT_DIR") {
        config.stack.out_dir = PathBuf::from(out_dir);
    }

    if let Some(stack) = lookup("FUNCSTACK_STACK") {
        config.stack.name = stack;
    }

    if let Some(owner) = lookup("FUNCSTACK_GITHUB_OWNER") {
        config.repository.owner = owner;
    }

    if let Some(verbosity) = lookup("FUNCSTACK_VERBOSITY") {
        config.output.verbosity = match verbosity.to_lowercase().as_str() {
            "quiet" => Verbosity::Quiet,
            "verbose" => Verbosity::Verbose,
            "debug" => Verbosity::Debug,
            _ => Verbosity::Normal,
        };
    }

    config
}

/// XDG config directory, falling back to the platform default
fn user_config_dir() -> Option<PathBuf> {
    std::env::var_os("XDG_CONFIG_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(dirs::config_dir)
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.contains(needle))
        .map(|i| i + 1)
}

const KNOWN_KEYS: &[&str] = &[
    "stack",
    "name",
    "out_dir",
    "pretty",
    "providers",
    "google",
    "github",
    "source",
    "version",
    "repository",
    "owner",
    "template_owner",
    "template_repository",
    "visibility",
    "include_all_branches",
    "backend",
    "bucket",
    "prefix",
    "vars",
    "files",
    "output",
    "verbosity",
    "color",
];
