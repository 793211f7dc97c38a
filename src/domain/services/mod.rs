//! Domain Services
//!
//! Compiler pipeline stages operating on domain entities. File access goes
//! through the `FileSystem` port; nothing here spawns threads.

pub mod asset_pipeline;
pub mod binding_registry;
pub mod differ;
pub mod emitter;
pub mod ir_builder;
pub mod state;
pub mod stdlib;

pub use asset_pipeline::AssetPipeline;
pub use binding_registry::{BindingCatalog, BindingRegistry, Resolution};
pub use differ::{summarize, DiffSummary};
pub use emitter::{EmitSettings, Emitter};
pub use ir_builder::IrBuilder;
pub use state::{snapshot_of, state_of};
