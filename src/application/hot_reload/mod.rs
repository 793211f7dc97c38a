//! Hot-reload server
//!
//! Keeps the last known-good snapshot per target and pushes new ones to
//! attached clients. Each client owns an ordered queue drained by its own
//! worker thread, so a slow client never blocks a publish. A client that
//! fails to acknowledge within the ack timeout is dropped.
//!
//! Client lifecycle: `Attached` until its first acknowledged snapshot, then
//! `Streaming`, then `Disconnected` once dropped or detached.

mod channel;
mod client;
mod rebuild;


use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tracing::{debug, error};

use crate::domain::entities::Snapshot;
use crate::domain::ports::{CompileEvent, EventSink, NoopEventSink, SnapshotTransport};
use crate::domain::services::summarize;
use crate::domain::value_objects::Target;

pub use channel::{ChannelTransport, Subscription};
pub use client::{ClientId, ClientStatus};
pub use rebuild::{spawn_rebuild_loop, RebuildTrigger};

use client::ClientHandle;

/// Default time a client has to acknowledge a snapshot
pub const DEFAULT_ACK_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Default)]
struct ServerState {
    /// Last known-good snapshot per target, sequenced
    current: HashMap<Target, Snapshot>,
    sequences: HashMap<Target, u64>,
    clients: Vec<ClientHandle>,
    next_client: ClientId,
}

pub(crate) struct Shared {
    state: Mutex<ServerState>,
    events: Arc<dyn EventSink>,
    ack_timeout: Duration,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, ServerState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Forget a client; its worker has already stopped or is stopping
    pub(crate) fn remove(&self, id: ClientId) {
        self.lock().clients.retain(|c| c.id != id);
    }
}

/// Cloneable handle to one hot-reload server
#[derive(Clone)]
pub struct HotReloadServer {
    shared: Arc<Shared>,
}

impl Default for HotReloadServer {
    fn default() -> Self {
        Self::new()
    }
}

impl HotReloadServer {
    pub fn new() -> Self {
        Self::with_options(DEFAULT_ACK_TIMEOUT, Arc::new(NoopEventSink))
    }

    pub fn with_options(ack_timeout: Duration, events: Arc<dyn EventSink>) -> Self {
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(ServerState::default()),
                events,
                ack_timeout,
            }),
        }
    }

    pub fn ack_timeout(&self) -> Duration {
        self.shared.ack_timeout
    }

    /// Attach a client; the current snapshot of `target`, if any, is queued
    /// immediately.
    pub fn attach(&self, target: Target, transport: Box<dyn SnapshotTransport>) -> ClientId {
        self.register(target, |_| (transport, false))
    }

    /// Attach a client built from the current snapshot.
    ///
    /// `connect` runs under the state lock, so no publish can slip in between
    /// it and the registration. It returns the transport and whether it has
    /// already delivered the current snapshot itself.
    pub(crate) fn register(
        &self,
        target: Target,
        connect: impl FnOnce(Option<&Snapshot>) -> (Box<dyn SnapshotTransport>, bool),
    ) -> ClientId {
        let mut state = self.shared.lock();
        let id = state.next_client;
        state.next_client += 1;

        let current = state.current.get(&target).cloned();
        let (transport, delivered) = connect(current.as_ref());
        let handle = ClientHandle::spawn(
            id,
            target,
            transport,
            Arc::downgrade(&self.shared),
            self.shared.ack_timeout,
        );
        match current {
            Some(_) if delivered => handle.status.set(ClientStatus::Streaming),
            Some(current) => {
                let _ = handle.queue.send(current);
            }
            None => {}
        }
        state.clients.push(handle);
        drop(state);

        self.shared
            .events
            .on_event(CompileEvent::ClientAttached { client: id, target });
        id
    }

    /// Stop delivering to `id`; queued snapshots are still drained first.
    pub fn detach(&self, id: ClientId) -> bool {
        let handle = {
            let mut state = self.shared.lock();
            let index = state.clients.iter().position(|c| c.id == id);
            index.map(|i| state.clients.remove(i))
        };
        match handle {
            Some(handle) => {
                finish(handle);
                true
            }
            None => false,
        }
    }

    /// Queue `snapshot` for every client of its target.
    ///
    /// Returns the assigned sequence, or `None` when the snapshot is identical
    /// to the current one.
    pub fn publish(&self, snapshot: Snapshot) -> Option<u64> {
        let target = snapshot.target();
        let mut state = self.shared.lock();

        let previous = state.current.get(&target);
        if previous.map(|p| p.hash()) == Some(snapshot.hash()) {
            debug!(%target, "snapshot unchanged, not re-sent");
            return None;
        }
        let summary = summarize(
            &previous.map(Snapshot::pretty_state).unwrap_or_default(),
            &snapshot.pretty_state(),
        );

        let sequence = {
            let next = state.sequences.entry(target).or_insert(0);
            *next += 1;
            *next
        };
        let snapshot = snapshot.with_sequence(sequence);

        let mut delivered = 0;
        for client in state.clients.iter().filter(|c| c.target == target) {
            if client.queue.send(snapshot.clone()).is_ok() {
                delivered += 1;
            }
        }
        state.current.insert(target, snapshot);
        drop(state);

        self.shared.events.on_event(CompileEvent::SnapshotPublished {
            target,
            sequence,
            clients: delivered,
            summary: summary.to_string(),
        });
        Some(sequence)
    }

    /// A rebuild failed: log it and keep serving the last good snapshots.
    pub fn report_failure(&self, message: impl Into<String>) {
        let message = message.into();
        error!("rebuild failed, clients keep the last good snapshot: {}", message);
        self.shared
            .events
            .on_event(CompileEvent::RebuildFailed { error: message });
    }

    pub fn current(&self, target: Target) -> Option<Snapshot> {
        self.shared.lock().current.get(&target).cloned()
    }

    /// Number of live clients of `target`
    pub fn client_count(&self, target: Target) -> usize {
        self.shared
            .lock()
            .clients
            .iter()
            .filter(|c| c.target == target && c.status.get() != ClientStatus::Disconnected)
            .count()
    }

    pub fn status(&self, id: ClientId) -> ClientStatus {
        self.shared
            .lock()
            .clients
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.status.get())
            .unwrap_or(ClientStatus::Disconnected)
    }

    /// Detach every client and wait for their workers
    pub fn shutdown(&self) {
        let clients = std::mem::take(&mut self.shared.lock().clients);
        for client in clients {
            finish(client);
        }
    }
}

/// Close the queue and wait for the worker to drain it
fn finish(handle: ClientHandle) {
    let ClientHandle {
        queue,
        worker,
        status,
        ..
    } = handle;
    drop(queue);
    if let Some(worker) = worker {
        let _ = worker.join();
    }
    status.set(ClientStatus::Disconnected);
}
