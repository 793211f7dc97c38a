//! Swatch - design-token component compiler
//!
//! Swatch turns a tree of design components (colors, gradients, typography,
//! images, animations) into native bindings for iOS, Android and the web,
//! and keeps running apps in sync through a hot-reload server.
//!
//! ```ignore
//! use swatch::{BindingRegistry, CompileOptions, CompileUseCase, ComponentDefinition};
//!
//! let root = ComponentDefinition::builder("Header")
//!     .property("icon", AssetRef::image("pin.png"))
//!     .property("spacing", 8)
//!     .build();
//! let catalog = Arc::new(BindingRegistry::with_standard_library().finalize()?);
//! let report = CompileUseCase::new(catalog, LocalFs::new(), SkipToolchainCheck)
//!     .execute(&root, &CompileOptions::new("."))?;
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

// Re-exports for convenience
pub use application::{
    CompileOptions, CompileReport, CompileUseCase, DevSession, HotReloadServer, PublishUseCase,
    Subscription,
};
pub use config::Config;
pub use domain::entities::{
    AssetRef, Binding, Collection, ComponentDefinition, ComponentGraph, PropertyValue, Snapshot,
    TargetOutput,
};
pub use domain::services::{stdlib, BindingCatalog, BindingRegistry, Emitter, IrBuilder};
pub use domain::value_objects::Target;
pub use error::{SwatchError, SwatchResult};
