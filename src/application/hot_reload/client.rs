//! One attached runtime: an ordered queue drained by a worker thread

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Weak};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, warn};

use crate::domain::entities::Snapshot;
use crate::domain::ports::{CompileEvent, SnapshotTransport};
use crate::domain::value_objects::Target;

use super::Shared;

pub type ClientId = u64;

/// Connection state of a client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientStatus {
    /// Queued, no snapshot acknowledged yet
    Attached,
    /// At least one snapshot acknowledged
    Streaming,
    Disconnected,
}

impl ClientStatus {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => ClientStatus::Attached,
            1 => ClientStatus::Streaming,
            _ => ClientStatus::Disconnected,
        }
    }

    fn as_u8(self) -> u8 {
        match self {
            ClientStatus::Attached => 0,
            ClientStatus::Streaming => 1,
            ClientStatus::Disconnected => 2,
        }
    }
}

/// Status cell shared between the server and the worker
#[derive(Debug, Default)]
pub(crate) struct StatusCell(AtomicU8);

impl StatusCell {
    pub(crate) fn get(&self) -> ClientStatus {
        ClientStatus::from_u8(self.0.load(Ordering::SeqCst))
    }

    pub(crate) fn set(&self, status: ClientStatus) {
        self.0.store(status.as_u8(), Ordering::SeqCst);
    }
}

/// Server-side handle of a client
pub(crate) struct ClientHandle {
    pub(crate) id: ClientId,
    pub(crate) target: Target,
    pub(crate) queue: Sender<Snapshot>,
    pub(crate) status: Arc<StatusCell>,
    pub(crate) worker: Option<JoinHandle<()>>,
}

impl ClientHandle {
    pub(crate) fn spawn(
        id: ClientId,
        target: Target,
        transport: Box<dyn SnapshotTransport>,
        shared: Weak<Shared>,
        ack_timeout: Duration,
    ) -> Self {
        let (queue, rx) = mpsc::channel();
        let status = Arc::new(StatusCell::default());
        let worker_status = status.clone();
        let worker = thread::Builder::new()
            .name(format!("swatch-client-{}", id))
            .spawn(move || run(id, transport, rx, worker_status, shared, ack_timeout))
            .ok();
        Self {
            id,
            target,
            queue,
            status,
            worker,
        }
    }
}

/// Deliver queued snapshots in order until the queue closes or a delivery fails
fn run(
    id: ClientId,
    mut transport: Box<dyn SnapshotTransport>,
    queue: Receiver<Snapshot>,
    status: Arc<StatusCell>,
    shared: Weak<Shared>,
    ack_timeout: Duration,
) {
    let peer = transport.describe();
    let mut reason = "detached".to_string();

    for snapshot in queue {
        match transport.deliver(&snapshot, ack_timeout) {
            Ok(()) => {
                debug!(client = id, sequence = snapshot.sequence(), %peer, "snapshot acknowledged");
                status.set(ClientStatus::Streaming);
            }
            Err(err) => {
                warn!(client = id, %peer, "dropping client: {}", err);
                reason = err.to_string();
                break;
            }
        }
    }

    status.set(ClientStatus::Disconnected);
    transport.close();
    if let Some(shared) = shared.upgrade() {
        shared.remove(id);
        shared.events.on_event(CompileEvent::ClientDisconnected { client: id, reason });
    }
}
