//! Scenario tests for swatch.
//!
//! Scenarios drive the built binary through complete user workflows.
//!
//! Run with: cargo test --test scenarios

mod common;

#[path = "scenarios/compile_design_dump.rs"]
mod compile_design_dump;

#[path = "scenarios/config_driven.rs"]
mod config_driven;

#[path = "scenarios/hot_reload_session.rs"]
mod hot_reload_session;
