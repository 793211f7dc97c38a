//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod design_source;
pub mod events;
pub mod file_system;
pub mod font_locator;
pub mod toolchain;
pub mod transport;

pub use design_source::DesignSource;
pub use events::{CompileEvent, EventSink, NoopEventSink};
pub use file_system::{FileSystem, FsError, FsResult};
pub use font_locator::{FontLocator, NoFonts};
pub use toolchain::{SkipToolchainCheck, StaticToolchains, ToolchainCheck};
pub use transport::SnapshotTransport;
