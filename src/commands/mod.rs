//! Subcommand implementations

mod compile;
mod serve;
mod snapshot;
mod workspace;

pub use compile::cmd_compile;
pub use serve::cmd_serve;
pub use snapshot::cmd_snapshot;
