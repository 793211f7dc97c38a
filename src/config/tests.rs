//! Tests for the config module

use super::loader::discover_with;
use super::types::*;
use super::*;
use crate::domain::value_objects::Target;
use crate::error::SwatchError;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tempfile::tempdir;

fn no_env(_: &str) -> Option<String> {
    None
}

#[test]
fn test_config_default() {
    let config = Config::default();

    assert_eq!(config.enabled_targets(), Target::ALL.to_vec());
    assert_eq!(config.output.dir, Path::new("build"));
    assert_eq!(config.ios.module, "SwatchTokens");
    assert_eq!(config.android.package, "com.swatch.tokens");
    assert_eq!(config.hot.addr, "127.0.0.1:7878");
    assert_eq!(config.hot.ack_timeout(), Duration::from_secs(5));
    assert_eq!(config.hot.debounce(), Duration::from_millis(100));
    assert!(config.fonts.system);
    assert!(!config.toolchain.skip_check);
}

#[test]
fn test_config_parse_toml() {
    let toml = r#"
[project]
root = "design"

[design]
dump = "brand.json"

[targets]
enabled = ["web", "ios", "web"]

[ios]
module = "BrandKit"
toolchain = "xcrun"

[android]
package = "com.brand.kit"

[hot]
ack_timeout_ms = 250
"#;

    let config: Config = toml::from_str(toml).unwrap();

    assert_eq!(config.enabled_targets(), vec![Target::Web, Target::Ios]);
    assert_eq!(config.emit_settings().module, "BrandKit");
    assert_eq!(config.emit_settings().package, "com.brand.kit");
    assert_eq!(config.toolchain_program(Target::Ios), Some("xcrun"));
    assert_eq!(config.toolchain_program(Target::Web), None);
    assert_eq!(config.hot.ack_timeout(), Duration::from_millis(250));
    assert_eq!(
        config.design_dump(Path::new("/p")),
        Some(Path::new("/p/design/brand.json").to_path_buf())
    );
}

#[test]
fn test_unknown_keys_become_warnings() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(CONFIG_FILE);
    fs::write(
        &path,
        "[hot]\naddr = \"0.0.0.0:9000\"\nack_timout_ms = 10\n\n[colour]\nmode = 1\n",
    )
    .unwrap();

    let (config, warnings) = load_with_warnings(&path).unwrap();

    assert_eq!(config.hot.addr, "0.0.0.0:9000");
    assert_eq!(warnings.len(), 2);
    assert_eq!(warnings[0].key, "hot.ack_timout_ms");
    assert_eq!(warnings[0].line, Some(3));
    assert_eq!(warnings[0].suggestion.as_deref(), Some("ack_timeout_ms"));
    assert_eq!(warnings[1].key, "colour");
    assert_eq!(warnings[1].line, Some(5));
}

#[test]
fn test_invalid_value_names_the_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(CONFIG_FILE);
    fs::write(&path, "[targets]\nenabled = [\"desktop\"]\n").unwrap();

    let err = load_with_warnings(&path).unwrap_err();
    match err {
        SwatchError::InvalidConfig { file, .. } => assert_eq!(file, path),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_project_config_overrides_user_config() {
    let dir = tempdir().unwrap();
    let user = dir.path().join("user.toml");
    fs::write(
        &user,
        "[android]\npackage = \"com.user\"\n\n[hot]\naddr = \"127.0.0.1:1\"\ndebounce_ms = 50\n",
    )
    .unwrap();
    fs::write(dir.path().join(CONFIG_FILE), "[hot]\naddr = \"127.0.0.1:2\"\n").unwrap();

    let loaded = discover_with(dir.path(), None, Some(&user), no_env).unwrap();

    assert_eq!(loaded.config.android.package, "com.user");
    assert_eq!(loaded.config.hot.addr, "127.0.0.1:2");
    assert_eq!(loaded.config.hot.debounce_ms, 50);
    assert_eq!(loaded.sources, vec![user, dir.path().join(CONFIG_FILE)]);
    assert_eq!(loaded.base, dir.path());
}

#[test]
fn test_defaults_without_files() {
    let dir = tempdir().unwrap();

    let loaded = discover_with(dir.path(), None, None, no_env).unwrap();

    assert!(loaded.sources.is_empty());
    assert!(loaded.warnings.is_empty());
    assert_eq!(loaded.config.output_dir(&loaded.base), dir.path().join("build"));
}

#[test]
fn test_explicit_config_must_exist() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("other.toml");

    let err = discover_with(dir.path(), Some(&missing), None, no_env).unwrap_err();
    assert!(err.to_string().contains("file not found"));
}

#[test]
fn test_explicit_config_sets_base() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("conf")).unwrap();
    let explicit = dir.path().join("conf/app.toml");
    fs::write(&explicit, "[output]\ndir = \"out\"\n").unwrap();

    let loaded = discover_with(dir.path(), Some(&explicit), None, no_env).unwrap();

    assert_eq!(loaded.base, dir.path().join("conf"));
    assert_eq!(loaded.config.output_dir(&loaded.base), dir.path().join("conf/out"));
}

#[test]
fn test_env_overrides() {
    let env = |key: &str| match key {
        "SWATCH_TARGETS" => Some("android, web, desktop".to_string()),
        "SWATCH_OUTPUT_DIR" => Some("dist".to_string()),
        "SWATCH_HOT_ADDR" => Some("0.0.0.0:7000".to_string()),
        "SWATCH_SKIP_TOOLCHAIN_CHECK" => Some("1".to_string()),
        _ => None,
    };

    let config = with_env_overrides(Config::default(), env);

    assert_eq!(config.enabled_targets(), vec![Target::Android, Target::Web]);
    assert_eq!(config.output.dir, Path::new("dist"));
    assert_eq!(config.hot.addr, "0.0.0.0:7000");
    assert!(config.toolchain.skip_check);
}

#[test]
fn test_env_false_values() {
    let env = |key: &str| (key == "SWATCH_SKIP_TOOLCHAIN_CHECK").then(|| "false".to_string());
    let mut config = Config::default();
    config.toolchain.skip_check = true;

    assert!(!with_env_overrides(config, env).toolchain.skip_check);
}
