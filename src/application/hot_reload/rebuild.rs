//! Rebuild loop
//!
//! Change notifications are coalesced: while a rebuild runs, any number of
//! further triggers collapse into a single pending rebuild.

use std::sync::mpsc::{self, Receiver, SyncSender, TrySendError};
use std::thread::{self, JoinHandle};

use tracing::debug;

/// Cloneable handle that requests a rebuild
#[derive(Clone)]
pub struct RebuildTrigger {
    tx: SyncSender<()>,
}

impl RebuildTrigger {
    /// Request a rebuild. Returns `false` once the loop has stopped.
    pub fn request(&self) -> bool {
        match self.tx.try_send(()) {
            Ok(()) => true,
            Err(TrySendError::Full(())) => {
                debug!("rebuild already pending");
                true
            }
            Err(TrySendError::Disconnected(())) => false,
        }
    }
}

fn channel() -> (RebuildTrigger, Receiver<()>) {
    let (tx, rx) = mpsc::sync_channel(1);
    (RebuildTrigger { tx }, rx)
}

/// Run `rebuild` on a dedicated thread once per coalesced request.
///
/// The loop ends when every trigger has been dropped.
pub fn spawn_rebuild_loop<F>(mut rebuild: F) -> std::io::Result<(RebuildTrigger, JoinHandle<()>)>
where
    F: FnMut() + Send + 'static,
{
    let (trigger, rx) = channel();
    let handle = thread::Builder::new()
        .name("swatch-rebuild".to_string())
        .spawn(move || {
            for () in rx {
                rebuild();
            }
        })?;
    Ok((trigger, handle))
}
