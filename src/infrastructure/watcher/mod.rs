//! File watcher for development sessions
//!
//! - Debouncing (100ms by default)
//! - `.swatchignore` filtering
//! - Content-hash filtering of editor save noise

mod state;

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tracing::{debug, trace};

use crate::domain::value_objects::{ContentHash, IgnorePatterns};
use crate::error::{SwatchError, SwatchResult};

pub(crate) use state::WatcherState;

/// Default quiet period before a batch of changes is released
pub const DEBOUNCE_MS: u64 = 100;

/// Watches design inputs and yields debounced batches of changed paths.
pub struct FileWatcher {
    watcher: RecommendedWatcher,
    rx: Receiver<PathBuf>,
    state: WatcherState,
    ignore: IgnorePatterns,
    hashes: HashMap<PathBuf, ContentHash>,
}

impl FileWatcher {
    pub fn new(ignore: IgnorePatterns, debounce: Duration) -> SwatchResult<Self> {
        let (tx, rx) = channel();
        let watcher = RecommendedWatcher::new(
            move |res: Result<Event, notify::Error>| {
                if let Ok(event) = res {
                    if matches!(event.kind, EventKind::Access(_)) {
                        return;
                    }
                    for path in event.paths {
                        let _ = tx.send(path);
                    }
                }
            },
            Config::default(),
        )
        .map_err(watch_error)?;

        Ok(Self {
            watcher,
            rx,
            state: WatcherState::new(debounce),
            ignore,
            hashes: HashMap::new(),
        })
    }

    /// Watch a file, or a directory recursively
    pub fn watch(&mut self, path: &Path) -> SwatchResult<()> {
        let mode = if path.is_dir() {
            RecursiveMode::Recursive
        } else {
            RecursiveMode::NonRecursive
        };
        self.watcher.watch(path, mode).map_err(watch_error)?;
        if path.is_file() {
            self.remember(path);
        }
        debug!(path = %path.display(), "watching");
        Ok(())
    }

    /// Wait up to `timeout` for events.
    ///
    /// Returns the changed paths once the debounce period has passed without
    /// new events, or `None`.
    pub fn poll(&mut self, timeout: Duration) -> Option<Vec<PathBuf>> {
        let deadline = Instant::now() + timeout;
        loop {
            let wait = deadline.saturating_duration_since(Instant::now());
            match self.rx.recv_timeout(wait.min(Duration::from_millis(20))) {
                Ok(path) => self.observe(path),
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => return None,
            }
            if self.state.should_flush() {
                let changed = self.state.take_changes();
                let changes = self.filter(changed);
                if !changes.is_empty() {
                    return Some(changes);
                }
            }
            if Instant::now() >= deadline {
                return None;
            }
        }
    }

    fn observe(&mut self, path: PathBuf) {
        if self.ignore.is_ignored(&path, path.is_dir()) {
            trace!(path = %path.display(), "ignored change");
            return;
        }
        self.state.add_change(path);
    }

    /// Drops files whose content did not change since last seen
    fn filter(&mut self, mut changes: Vec<PathBuf>) -> Vec<PathBuf> {
        changes.sort();
        changes.retain(|path| {
            if !path.is_file() {
                self.hashes.remove(path);
                return true;
            }
            let Ok(bytes) = std::fs::read(path) else {
                return true;
            };
            let hash = ContentHash::from_bytes(&bytes);
            self.hashes.insert(path.clone(), hash.clone()) != Some(hash)
        });
        changes
    }

    fn remember(&mut self, path: &Path) {
        if let Ok(bytes) = std::fs::read(path) {
            self.hashes
                .insert(path.to_path_buf(), ContentHash::from_bytes(&bytes));
        }
    }
}

fn watch_error(err: notify::Error) -> SwatchError {
    SwatchError::Io(std::io::Error::other(err.to_string()))
}
