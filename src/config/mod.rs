//! Configuration module for Swatch
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (SWATCH_*)
//! 3. Project config (swatch.toml)
//! 4. User config (<config dir>/swatch/config.toml)
//! 5. Built-in defaults (lowest priority)

mod loader;
#[cfg(test)]
mod tests;
mod types;

pub use crate::domain::value_objects::ConfigWarning;

pub use loader::{discover, load_with_warnings, with_env_overrides, LoadedConfig, CONFIG_FILE};
pub use types::{
    AndroidConfig, Config, DesignConfig, FontsConfig, HotConfig, IosConfig, OutputConfig,
    ProjectConfig, TargetsConfig, ToolchainConfig, WebConfig,
};
