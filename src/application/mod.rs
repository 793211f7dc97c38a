//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain compilation rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `CompileUseCase` - Build the IR once, emit every target in parallel
//! - `PublishUseCase` - Write a target output to disk atomically
//! - `HotReloadServer` - Push snapshots to attached runtimes
//! - `DevSession` - Watch, rebuild, publish and push

pub mod compile;
pub mod dev_session;
pub mod hot_reload;
pub mod publish;

pub use compile::{CompileOptions, CompileReport, CompileUseCase, TargetFailure};
pub use dev_session::DevSession;
pub use hot_reload::{
    ChannelTransport, ClientId, ClientStatus, HotReloadServer, Subscription, DEFAULT_ACK_TIMEOUT,
};
pub use publish::{PublishUseCase, PublishedTarget, LOCK_FILE};
