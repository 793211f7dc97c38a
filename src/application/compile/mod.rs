//! Compile Module
//!
//! Builds the IR once and emits every requested target in parallel.
//!
//! ## Structure
//!
//! - `options` - Configuration types (`CompileOptions`)
//! - `result` - Result types (`CompileReport`, `TargetFailure`)
//! - `use_case` - Core use case logic (`CompileUseCase`)
//!
//! ## Usage
//!
//! ```ignore
//! use swatch::application::compile::{CompileOptions, CompileUseCase};
//!
//! let use_case = CompileUseCase::new(catalog, LocalFs::new(), PathToolchain::new());
//! let report = use_case.execute(&root, &CompileOptions::new(project_root))?;
//! ```

mod options;
mod result;
mod use_case;

pub use options::CompileOptions;
pub use result::{CompileReport, TargetFailure};
pub use use_case::CompileUseCase;
