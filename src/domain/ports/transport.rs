//! SnapshotTransport port - one hot-reload client connection

use std::io;
use std::time::Duration;

use crate::domain::entities::Snapshot;

/// Delivery channel to one attached runtime.
///
/// Owned by the client's worker thread; calls never overlap.
pub trait SnapshotTransport: Send {
    /// Send `snapshot` and wait up to `timeout` for the client to acknowledge
    /// its sequence. A timeout is reported as `ErrorKind::TimedOut`.
    fn deliver(&mut self, snapshot: &Snapshot, timeout: Duration) -> io::Result<()>;

    /// Best-effort close; called once when the client is dropped.
    fn close(&mut self) {}

    /// Peer description for logs
    fn describe(&self) -> String {
        "client".to_string()
    }
}
