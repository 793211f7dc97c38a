//! In-process clients

use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

use crate::domain::entities::Snapshot;
use crate::domain::ports::SnapshotTransport;
use crate::domain::value_objects::Target;

use super::{ClientId, HotReloadServer};

enum Sink {
    Callback(Box<dyn FnMut(&Snapshot) + Send>),
    Queue(Sender<Snapshot>),
}

/// Transport for a runtime living in the same process.
///
/// Delivery is acknowledged as soon as the snapshot is handed over.
pub struct ChannelTransport {
    sink: Sink,
    name: String,
}

impl ChannelTransport {
    pub fn new(callback: impl FnMut(&Snapshot) + Send + 'static) -> Self {
        Self {
            sink: Sink::Callback(Box::new(callback)),
            name: "in-process".to_string(),
        }
    }

    /// Transport plus the receiving end of its queue
    pub fn pair() -> (Self, Receiver<Snapshot>) {
        let (tx, rx) = mpsc::channel();
        let transport = Self {
            sink: Sink::Queue(tx),
            name: "in-process".to_string(),
        };
        (transport, rx)
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl SnapshotTransport for ChannelTransport {
    fn deliver(&mut self, snapshot: &Snapshot, _timeout: Duration) -> io::Result<()> {
        match &mut self.sink {
            Sink::Callback(callback) => {
                callback(snapshot);
                Ok(())
            }
            Sink::Queue(tx) => tx
                .send(snapshot.clone())
                .map_err(|_| io::Error::new(io::ErrorKind::BrokenPipe, "receiver dropped")),
        }
    }

    fn describe(&self) -> String {
        self.name.clone()
    }
}

/// Callback subscription that detaches when dropped
pub struct Subscription {
    server: HotReloadServer,
    id: ClientId,
}

impl Subscription {
    /// Invoke `callback` once, before returning, with the current snapshot of
    /// `target`, then with every later one until dropped.
    ///
    /// The first call happens under the server lock; the callback must not
    /// call back into the server.
    pub fn attach(
        server: &HotReloadServer,
        target: Target,
        callback: impl FnMut(&Snapshot) + Send + 'static,
    ) -> Self {
        let id = server.register(target, move |current| {
            let mut callback = callback;
            let delivered = match current {
                Some(snapshot) => {
                    callback(snapshot);
                    true
                }
                None => false,
            };
            let transport: Box<dyn SnapshotTransport> = Box::new(ChannelTransport::new(callback));
            (transport, delivered)
        });
        Self {
            server: server.clone(),
            id,
        }
    }

    pub fn id(&self) -> ClientId {
        self.id
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.server.detach(self.id);
    }
}
