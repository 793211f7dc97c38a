//! Configuration type definitions

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::application::DEFAULT_ACK_TIMEOUT;
use crate::domain::services::EmitSettings;
use crate::domain::value_objects::Target;
use crate::infrastructure::watcher::DEBOUNCE_MS;

/// Project configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Directory asset paths are resolved against, relative to the config file
    #[serde(default = "default_root")]
    pub root: PathBuf,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

/// Design dump input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignConfig {
    /// Design dump JSON file, relative to the project root
    #[serde(default)]
    pub dump: Option<PathBuf>,

    /// Exported assets folder, relative to the project root
    #[serde(default = "default_assets")]
    pub assets: PathBuf,
}

impl Default for DesignConfig {
    fn default() -> Self {
        Self {
            dump: None,
            assets: default_assets(),
        }
    }
}

fn default_assets() -> PathBuf {
    PathBuf::from("assets")
}

/// Target configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TargetsConfig {
    /// Targets to emit; empty means all
    #[serde(default)]
    pub enabled: Vec<Target>,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output root; each target is published to `<dir>/<target>`
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("build")
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IosConfig {
    /// Swift module name
    #[serde(default = "default_module")]
    pub module: String,

    /// Compiler checked before emitting
    #[serde(default)]
    pub toolchain: Option<String>,
}

impl Default for IosConfig {
    fn default() -> Self {
        Self {
            module: default_module(),
            toolchain: None,
        }
    }
}

fn default_module() -> String {
    EmitSettings::default().module
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AndroidConfig {
    /// Kotlin package
    #[serde(default = "default_package")]
    pub package: String,

    #[serde(default)]
    pub toolchain: Option<String>,
}

impl Default for AndroidConfig {
    fn default() -> Self {
        Self {
            package: default_package(),
            toolchain: None,
        }
    }
}

fn default_package() -> String {
    EmitSettings::default().package
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WebConfig {
    #[serde(default)]
    pub toolchain: Option<String>,
}

/// Toolchain probing
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ToolchainConfig {
    /// Emit without checking that compilers are installed
    #[serde(default)]
    pub skip_check: bool,

    /// Search path used instead of `PATH`
    #[serde(default)]
    pub search_path: Option<String>,
}

/// Font lookup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FontsConfig {
    /// Extra font directories, relative to the project root
    #[serde(default)]
    pub paths: Vec<PathBuf>,

    /// Also scan the platform font folders
    #[serde(default = "default_true")]
    pub system: bool,
}

impl Default for FontsConfig {
    fn default() -> Self {
        Self {
            paths: Vec::new(),
            system: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Hot-reload server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotConfig {
    /// TCP listen address
    #[serde(default = "default_hot_addr")]
    pub addr: String,

    #[serde(default = "default_ack_timeout_ms")]
    pub ack_timeout_ms: u64,

    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Publish outputs to disk on every rebuild
    #[serde(default = "default_true")]
    pub publish: bool,
}

impl Default for HotConfig {
    fn default() -> Self {
        Self {
            addr: default_hot_addr(),
            ack_timeout_ms: default_ack_timeout_ms(),
            debounce_ms: default_debounce_ms(),
            publish: true,
        }
    }
}

fn default_hot_addr() -> String {
    "127.0.0.1:7878".to_string()
}

fn default_ack_timeout_ms() -> u64 {
    DEFAULT_ACK_TIMEOUT.as_millis() as u64
}

fn default_debounce_ms() -> u64 {
    DEBOUNCE_MS
}

impl HotConfig {
    pub fn ack_timeout(&self) -> Duration {
        Duration::from_millis(self.ack_timeout_ms)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

/// Contents of `swatch.toml`
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub project: ProjectConfig,

    #[serde(default)]
    pub design: DesignConfig,

    #[serde(default)]
    pub targets: TargetsConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub ios: IosConfig,

    #[serde(default)]
    pub android: AndroidConfig,

    #[serde(default)]
    pub web: WebConfig,

    #[serde(default)]
    pub toolchain: ToolchainConfig,

    #[serde(default)]
    pub fonts: FontsConfig,

    #[serde(default)]
    pub hot: HotConfig,
}

impl Config {
    /// Get enabled targets (all if empty)
    pub fn enabled_targets(&self) -> Vec<Target> {
        if self.targets.enabled.is_empty() {
            Target::ALL.to_vec()
        } else {
            let mut targets = Vec::new();
            for target in &self.targets.enabled {
                if !targets.contains(target) {
                    targets.push(*target);
                }
            }
            targets
        }
    }

    pub fn emit_settings(&self) -> EmitSettings {
        EmitSettings {
            module: self.ios.module.clone(),
            package: self.android.package.clone(),
        }
    }

    /// Toolchain program override for `target`
    pub fn toolchain_program(&self, target: Target) -> Option<&str> {
        match target {
            Target::Ios => self.ios.toolchain.as_deref(),
            Target::Android => self.android.toolchain.as_deref(),
            Target::Web => self.web.toolchain.as_deref(),
        }
    }

    /// Project root, resolved against the directory holding the config
    pub fn project_root(&self, base: &Path) -> PathBuf {
        base.join(&self.project.root)
    }

    pub fn output_dir(&self, base: &Path) -> PathBuf {
        base.join(&self.output.dir)
    }

    pub fn design_dump(&self, base: &Path) -> Option<PathBuf> {
        self.design
            .dump
            .as_ref()
            .map(|dump| self.project_root(base).join(dump))
    }

    pub fn font_paths(&self, base: &Path) -> Vec<PathBuf> {
        let root = self.project_root(base);
        self.fonts.paths.iter().map(|p| root.join(p)).collect()
    }
}
