//! Configuration type definitions

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::StackResult;
use crate::stack::catalog::{DEFAULT_GITHUB_OWNER, DEFAULT_TEMPLATE_REPOSITORY};
use crate::stack::{RepositorySettings, Visibility};
use crate::synth::{GcsBackend, ProviderRequirement};

use super::loader::{self, ConfigWarning, LoadedConfig};

/// Stack naming and output location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StackConfig {
    #[serde(default = "default_stack_name")]
    pub name: String,

    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,

    #[serde(default = "default_true")]
    pub pretty: bool,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            name: default_stack_name(),
            out_dir: default_out_dir(),
            pretty: true,
        }
    }
}

fn default_stack_name() -> String {
    "gcp-function".to_string()
}

fn default_out_dir() -> PathBuf {
    PathBuf::from("cdktf.out")
}

fn default_true() -> bool {
    true
}

/// One `[providers.*]` table; a missing source falls back to the registry default
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ProviderConfig {
    #[serde(default)]
    pub source: Option<String>,

    #[serde(default)]
    pub version: Option<String>,
}

impl ProviderConfig {
    fn requirement(&self, default_source: &str) -> ProviderRequirement {
        let requirement = ProviderRequirement::new(
            self.source
                .clone()
                .unwrap_or_else(|| default_source.to_string()),
        );
        match &self.version {
            Some(version) => requirement.with_version(version.clone()),
            None => requirement,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub google: ProviderConfig,

    #[serde(default)]
    pub github: ProviderConfig,
}

impl ProvidersConfig {
    pub fn google(&self) -> ProviderRequirement {
        self.google.requirement("hashicorp/google")
    }

    pub fn github(&self) -> ProviderRequirement {
        self.github.requirement("integrations/github")
    }
}

/// GitHub repository settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryConfig {
    /// Organization owning the created repository
    #[serde(default = "default_owner")]
    pub owner: String,

    /// Owner of the template repository; defaults to `owner`
    #[serde(default)]
    pub template_owner: Option<String>,

    #[serde(default = "default_template_repository")]
    pub template_repository: String,

    #[serde(default)]
    pub visibility: Visibility,

    #[serde(default)]
    pub include_all_branches: bool,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            owner: default_owner(),
            template_owner: None,
            template_repository: default_template_repository(),
            visibility: Visibility::default(),
            include_all_branches: false,
        }
    }
}

impl RepositoryConfig {
    pub fn settings(&self) -> RepositorySettings {
        RepositorySettings {
            template_owner: self
                .template_owner
                .clone()
                .unwrap_or_else(|| self.owner.clone()),
            template_repository: self.template_repository.clone(),
            visibility: self.visibility,
            include_all_branches: self.include_all_branches,
        }
    }
}

fn default_owner() -> String {
    DEFAULT_GITHUB_OWNER.to_string()
}

fn default_template_repository() -> String {
    DEFAULT_TEMPLATE_REPOSITORY.to_string()
}

/// Default vars files, applied before `--var-file` flags
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct VarsConfig {
    #[serde(default)]
    pub files: Vec<PathBuf>,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OutputConfig {
    #[serde(default)]
    pub verbosity: Verbosity,

    #[serde(default)]
    pub color: ColorMode,
}

/// Color output mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

/// Verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
    Debug,
}

impl Verbosity {
    /// Tracing filter directive for this level
    pub fn filter_directive(&self) -> &'static str {
        match self {
            Verbosity::Quiet => "error",
            Verbosity::Normal => "warn",
            Verbosity::Verbose => "info",
            Verbosity::Debug => "debug",
        }
    }

    /// Raise the level by `-v` occurrences
    pub fn raised_by(self, count: u8) -> Self {
        match (self, count) {
            (level, 0) => level,
            (Verbosity::Quiet | Verbosity::Normal, 1) => Verbosity::Verbose,
            _ => Verbosity::Debug,
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub stack: StackConfig,

    #[serde(default)]
    pub providers: ProvidersConfig,

    #[serde(default)]
    pub repository: RepositoryConfig,

    #[serde(default)]
    pub backend: Option<GcsBackend>,

    #[serde(default)]
    pub vars: VarsConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> StackResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> StackResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Explicit path, project config, user config, or defaults
    pub fn resolve(explicit: Option<&Path>, project_root: &Path) -> StackResult<LoadedConfig> {
        loader::resolve(explicit, project_root)
    }

    /// Apply environment variable overrides (FUNCSTACK_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self, |key| std::env::var(key).ok())
    }

    /// Path of the stack document inside the output directory
    pub fn stack_file(&self) -> PathBuf {
        self.stack
            .out_dir
            .join(crate::synth::stack_path(&self.stack.name))
    }
}
