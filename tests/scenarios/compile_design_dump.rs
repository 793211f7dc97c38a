//! Scenario: Compile a Design Dump
//!
//! Journey: a designer exports a dump and an engineer compiles it into
//! bindings for every platform.
//!
//! Steps:
//! 1. Project holds `design.json` and the exported slices
//! 2. `swatch compile --dump design.json` publishes all targets
//! 3. Each target folder carries sources, assets and a manifest
//! 4. `--dry-run` writes nothing, `--json` streams events

use serde_json::Value;

use crate::common::*;

#[test]
fn scenario_compile_publishes_every_target() {
    let env = TestEnv::with_design();

    let result = env.run(&["compile", "--dump", "design.json"]);

    assert!(result.is_success(), "compile failed:\n{}", result.combined_output());
    for target in ["ios", "android", "web"] {
        assert!(
            result.stdout.contains(&format!("✓ {}", target)),
            "no summary line for {}:\n{}",
            target,
            result.stdout
        );
    }

    let web = env.read_project_file("build/web/src/PoodleSurf.ts");
    assert!(web.starts_with("// This file was generated by swatch. Do not edit."));
    assert!(web.contains("export class PoodleSurf"));
    assert!(env.project_path("build/web/src/PoodleSurfColors.ts").is_file());
    assert!(env.project_path("build/web/src/File.ts").is_file());

    let swift = env.read_project_file("build/ios/Sources/SwatchTokens/Components/PoodleSurfSlices.swift");
    assert!(swift.contains("public final class PoodleSurfSlices: Decodable"));

    let kotlin = env.read_project_file("build/android/src/main/java/com/swatch/tokens/PoodleSurf.kt");
    assert!(kotlin.contains("package com.swatch.tokens"));
}

#[test]
fn scenario_manifest_lists_artifacts_and_assets() {
    let env = TestEnv::with_design();
    let result = env.run(&["compile", "--dump", "design.json", "--targets", "web"]);
    assert!(result.is_success(), "{}", result.combined_output());

    let manifest: Value =
        serde_json::from_str(&env.read_project_file("build/web/swatch.manifest.json")).unwrap();

    assert_eq!(manifest["target"], "web");
    let artifacts = manifest["artifacts"].as_array().unwrap();
    assert!(artifacts
        .iter()
        .any(|a| a["path"] == "src/PoodleSurf.ts" && a["component"] == "PoodleSurf"));
    assert!(manifest.to_string().contains("pin.png"));

    assert!(!env.project_path("build/ios").exists());
    assert!(!env.project_path("build/android").exists());
}

#[test]
fn scenario_dry_run_writes_nothing() {
    let env = TestEnv::with_design();

    let result = env.run(&["compile", "--dump", "design.json", "--dry-run"]);

    assert!(result.is_success(), "{}", result.combined_output());
    assert!(!env.project_path("build").exists());
}

#[test]
fn scenario_json_streams_events() {
    let env = TestEnv::with_design();

    let result = env.run(&["--json", "compile", "--dump", "design.json", "-t", "ios,web"]);
    assert!(result.is_success(), "{}", result.combined_output());

    let events: Vec<Value> = result
        .stdout
        .lines()
        .map(|line| serde_json::from_str(line).expect("stdout is NDJSON"))
        .collect();
    let names: Vec<&str> = events.iter().filter_map(|e| e["event"].as_str()).collect();

    assert_eq!(names.first(), Some(&"started"));
    assert!(names.contains(&"built"));
    assert!(names.contains(&"completed"));
    assert_eq!(names.iter().filter(|n| **n == "target_published").count(), 2);
    let completed = events.iter().find(|e| e["event"] == "completed").unwrap();
    assert_eq!(completed["succeeded"], 2);
    assert_eq!(completed["failed"], 0);
}

#[test]
fn scenario_missing_slice_fails_every_target() {
    let env = TestEnv::new();
    env.write_project_file("design.json", DESIGN_DUMP);

    let result = env.run(&["compile", "--dump", "design.json"]);

    assert!(!result.is_success());
    assert!(result.stdout.contains("✗ web"), "{}", result.stdout);
    assert!(result.stderr.contains("3 of 3 targets failed"), "{}", result.stderr);
    assert!(!env.project_path("build/web").exists());
}

#[test]
fn scenario_without_dump_explains_what_to_do() {
    let env = TestEnv::new();

    let result = env.run(&["compile"]);

    assert!(!result.is_success());
    assert!(result.stderr.contains("no design dump"), "{}", result.stderr);
}

#[test]
fn scenario_snapshot_prints_wire_json() {
    let env = TestEnv::with_design();

    let result = env.run(&["--json", "snapshot", "--dump", "design.json", "-t", "android"]);
    assert!(result.is_success(), "{}", result.combined_output());

    let snapshot: Value = serde_json::from_str(result.stdout.trim()).unwrap();
    assert_eq!(snapshot["sequence"], 0);
    assert_eq!(snapshot["target"], "android");
    assert_eq!(snapshot["component"], "PoodleSurf");
    assert_eq!(snapshot["state"]["slices"]["pin"]["width"], 29);
    assert!(snapshot["state"]["slices"]["pin"]["file"]["src"]
        .as_str()
        .unwrap()
        .starts_with("res/drawable-mdpi/"));
}
