//! Scenario: Configuration-Driven Project
//!
//! Journey: a team checks in `swatch.toml` so nobody passes flags.
//!
//! Steps:
//! 1. `swatch.toml` names the dump, targets, output folder and package
//! 2. Plain `swatch compile` follows it
//! 3. A personal user config fills in what the project leaves out
//! 4. `SWATCH_*` variables and flags win over both files

use crate::common::*;

const PROJECT_CONFIG: &str = r#"
[design]
dump = "design.json"

[targets]
enabled = ["android"]

[output]
dir = "dist"

[android]
package = "com.poodle.surf"
"#;

#[test]
fn scenario_project_config_drives_compile() {
    let env = TestEnv::with_design();
    env.write_project_file("swatch.toml", PROJECT_CONFIG);

    let result = env.run(&["compile"]);

    assert!(result.is_success(), "{}", result.combined_output());
    let kotlin = env.read_project_file("dist/android/src/main/java/com/poodle/surf/PoodleSurf.kt");
    assert!(kotlin.contains("package com.poodle.surf"));
    assert!(!env.project_path("dist/web").exists());
    assert!(!env.project_path("build").exists());
}

#[test]
fn scenario_flags_and_env_override_files() {
    let env = TestEnv::with_design();
    env.write_project_file("swatch.toml", PROJECT_CONFIG);

    let result = env.run_with_env(&["compile", "--targets", "web"], &[("SWATCH_OUTPUT_DIR", "out")]);

    assert!(result.is_success(), "{}", result.combined_output());
    assert!(env.project_path("out/web/src/PoodleSurf.ts").is_file());
    assert!(!env.project_path("out/android").exists());
}

#[cfg(not(windows))]
#[test]
fn scenario_user_config_fills_gaps() {
    let env = TestEnv::with_design();
    env.write_user_config("[ios]\nmodule = \"SurfKit\"\n\n[output]\ndir = \"from-user\"\n");
    env.write_project_file("swatch.toml", "[design]\ndump = \"design.json\"\n\n[output]\ndir = \"dist\"\n");

    let result = env.run(&["compile", "-t", "ios"]);

    assert!(result.is_success(), "{}", result.combined_output());
    assert!(env
        .project_path("dist/ios/Sources/SurfKit/Components/PoodleSurf.swift")
        .is_file());
    assert!(!env.project_path("from-user").exists());
}

#[test]
fn scenario_unknown_keys_warn_but_compile() {
    let env = TestEnv::with_design();
    env.write_project_file(
        "swatch.toml",
        "[design]\ndump = \"design.json\"\n\n[output]\ndri = \"dist\"\n",
    );

    let result = env.run(&["compile", "-t", "web"]);

    assert!(result.is_success(), "{}", result.combined_output());
    assert!(result.stderr.contains("unknown config key 'output.dri'"), "{}", result.stderr);
    assert!(result.stderr.contains("did you mean 'dir'?"), "{}", result.stderr);
    assert!(env.project_path("build/web").exists());
}

#[test]
fn scenario_invalid_config_names_the_file() {
    let env = TestEnv::with_design();
    env.write_project_file("swatch.toml", "[targets]\nenabled = [\"desktop\"]\n");

    let result = env.run(&["compile", "--dump", "design.json"]);

    assert!(!result.is_success());
    assert!(result.stderr.contains("swatch.toml"), "{}", result.stderr);
}
