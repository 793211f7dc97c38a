//! Common test utilities for swatch scenario tests.
//!
//! This module provides:
//! - `TestEnv`: isolated project and config home, plus CLI helpers
//! - Fixtures: design dumps and asset bytes

#![allow(dead_code)]

pub mod env;
pub mod fixtures;

pub use env::*;
pub use fixtures::*;
