//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod component_path;
mod config_warning;
mod hash;
mod ignore_patterns;
mod target;

pub use component_path::ComponentPath;
pub use config_warning::ConfigWarning;
pub use hash::ContentHash;
pub use ignore_patterns::{IgnoreError, IgnorePatterns, IGNORE_FILE};
pub use target::Target;
