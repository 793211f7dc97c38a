//! Configuration loading
//!
//! Layers are merged key by key, later layers winning:
//! defaults, user config, project `swatch.toml`, `SWATCH_*` variables.
//! CLI flags are applied by the binary on top.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::value_objects::{ConfigWarning, Target};
use crate::error::{SwatchError, SwatchResult};

use super::types::Config;

/// Project config file name
pub const CONFIG_FILE: &str = "swatch.toml";

/// Configuration with its origin
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    /// Directory relative paths in the config resolve against
    pub base: PathBuf,
    /// Files that contributed, lowest priority first
    pub sources: Vec<PathBuf>,
    pub warnings: Vec<ConfigWarning>,
}

/// Load one file and collect unknown keys as warnings.
pub fn load_with_warnings(path: &Path) -> SwatchResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;
    let (table, warnings) = parse_layer(&content, path)?;
    let config = into_config(table, path)?;
    Ok((config, warnings))
}

/// Resolve the full hierarchy for a project directory.
///
/// `explicit` replaces the project `swatch.toml` lookup and must exist.
pub fn discover(project_dir: &Path, explicit: Option<&Path>) -> SwatchResult<LoadedConfig> {
    let user = dirs::config_dir().map(|dir| dir.join("swatch").join("config.toml"));
    discover_with(project_dir, explicit, user.as_deref(), |key| std::env::var(key).ok())
}

pub(crate) fn discover_with(
    project_dir: &Path,
    explicit: Option<&Path>,
    user_config: Option<&Path>,
    env: impl Fn(&str) -> Option<String>,
) -> SwatchResult<LoadedConfig> {
    let mut merged = toml::Table::new();
    let mut sources = Vec::new();
    let mut warnings = Vec::new();

    if let Some(user) = user_config.filter(|p| p.is_file()) {
        merge_file(user, &mut merged, &mut warnings)?;
        sources.push(user.to_path_buf());
    }

    let (project_file, base) = match explicit {
        Some(path) => {
            if !path.is_file() {
                return Err(SwatchError::InvalidConfig {
                    file: path.to_path_buf(),
                    message: "file not found".to_string(),
                });
            }
            let base = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| project_dir.to_path_buf());
            (Some(path.to_path_buf()), base)
        }
        None => {
            let candidate = project_dir.join(CONFIG_FILE);
            (candidate.is_file().then_some(candidate), project_dir.to_path_buf())
        }
    };
    if let Some(file) = project_file {
        merge_file(&file, &mut merged, &mut warnings)?;
        sources.push(file);
    }

    let label = sources.last().cloned().unwrap_or_else(|| base.join(CONFIG_FILE));
    let config = with_env_overrides(into_config(merged, &label)?, env);
    debug!(sources = sources.len(), warnings = warnings.len(), "configuration loaded");

    Ok(LoadedConfig {
        config,
        base,
        sources,
        warnings,
    })
}

/// Apply `SWATCH_*` overrides
pub fn with_env_overrides(mut config: Config, env: impl Fn(&str) -> Option<String>) -> Config {
    // SWATCH_TARGETS (comma-separated)
    if let Some(targets) = env("SWATCH_TARGETS") {
        let parsed: Vec<Target> = targets.split(',').filter_map(Target::parse_loose).collect();
        if !parsed.is_empty() {
            config.targets.enabled = parsed;
        }
    }

    if let Some(dir) = env("SWATCH_OUTPUT_DIR").filter(|d| !d.is_empty()) {
        config.output.dir = PathBuf::from(dir);
    }

    if let Some(addr) = env("SWATCH_HOT_ADDR").filter(|a| !a.is_empty()) {
        config.hot.addr = addr;
    }

    if let Some(val) = env("SWATCH_SKIP_TOOLCHAIN_CHECK") {
        config.toolchain.skip_check = val.to_lowercase() != "false" && val != "0";
    }

    config
}

fn merge_file(
    path: &Path,
    merged: &mut toml::Table,
    warnings: &mut Vec<ConfigWarning>,
) -> SwatchResult<()> {
    let content = fs::read_to_string(path)?;
    let (table, mut found) = parse_layer(&content, path)?;
    warnings.append(&mut found);
    merge(merged, table);
    Ok(())
}

/// Parse one layer, validating it on its own so errors name the right file
fn parse_layer(content: &str, path: &Path) -> SwatchResult<(toml::Table, Vec<ConfigWarning>)> {
    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(content);

    let _: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| invalid(path, e))?;

    let table: toml::Table = toml::from_str(content).map_err(|e| invalid(path, e))?;

    let warnings = unknown_paths
        .into_iter()
        .map(|key| {
            let leaf = key.split('.').next_back().unwrap_or(key.as_str()).to_string();
            ConfigWarning {
                line: find_line_number(content, &leaf),
                suggestion: suggest_key(&leaf),
                file: path.to_path_buf(),
                key,
            }
        })
        .collect();

    Ok((table, warnings))
}

fn into_config(table: toml::Table, path: &Path) -> SwatchResult<Config> {
    toml::Value::Table(table)
        .try_into()
        .map_err(|e| invalid(path, e))
}

fn invalid(path: &Path, err: impl std::fmt::Display) -> SwatchError {
    SwatchError::InvalidConfig {
        file: path.to_path_buf(),
        message: err.to_string().trim().to_string(),
    }
}

/// Deep merge: tables merge recursively, other values are replaced
fn merge(base: &mut toml::Table, layer: toml::Table) {
    for (key, value) in layer {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(existing)), toml::Value::Table(incoming)) => {
                merge(existing, incoming)
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| {
            let line = line.trim_start();
            line.starts_with(needle) || line.contains(&format!("[{}", needle))
        })
        .map(|i| i + 1)
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "project",
        "root",
        "design",
        "dump",
        "assets",
        "targets",
        "enabled",
        "output",
        "dir",
        "ios",
        "module",
        "android",
        "package",
        "web",
        "toolchain",
        "skip_check",
        "search_path",
        "fonts",
        "paths",
        "system",
        "hot",
        "addr",
        "ack_timeout_ms",
        "debounce_ms",
        "publish",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
