//! Configuration module for funcstack
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (FUNCSTACK_*)
//! 3. Explicit `--config` file, or project `funcstack.toml`
//! 4. User config (~/.config/funcstack/config.toml)
//! 5. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::{with_env_overrides, ConfigWarning, LoadedConfig, PROJECT_CONFIG_FILE};
pub use types::{
    ColorMode, Config, OutputConfig, ProviderConfig, ProvidersConfig, RepositoryConfig,
    StackConfig, VarsConfig, Verbosity,
};
