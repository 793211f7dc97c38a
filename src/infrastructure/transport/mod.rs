//! Snapshot transports
//!
//! - `tcp` - newline-delimited JSON over TCP

pub mod tcp;

pub use tcp::{TcpSnapshotListener, TcpTransport};
