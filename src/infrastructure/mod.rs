//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - Local file system
//! - `events/` - NDJSON and tracing event sinks
//! - `watcher/` - Debounced file watcher
//! - `transport/` - TCP snapshot transport
//! - `design_dump` - Design dump importer
//! - `fonts` - System font catalog
//! - `toolchain` - PATH-based toolchain lookup

pub mod design_dump;
pub mod events;
pub mod fonts;
pub mod fs;
pub mod toolchain;
pub mod transport;
pub mod watcher;

// Re-export for convenience
pub use design_dump::{DesignDumpImporter, DumpFileSource};
pub use events::{JsonEventSink, TracingEventSink};
pub use fonts::SystemFontCatalog;
pub use fs::LocalFs;
pub use toolchain::PathToolchain;
pub use transport::{TcpSnapshotListener, TcpTransport};
pub use watcher::FileWatcher;
