//! Development session
//!
//! Rebuilds the design source on change, publishes the outputs and pushes
//! one snapshot per target to the hot-reload server. A failed rebuild keeps
//! the previous outputs and snapshots in place.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::application::compile::{CompileOptions, CompileReport, CompileUseCase};
use crate::application::hot_reload::{spawn_rebuild_loop, HotReloadServer};
use crate::application::publish::PublishUseCase;
use crate::domain::ports::{
    CompileEvent, DesignSource, EventSink, FileSystem, NoopEventSink, ToolchainCheck,
};
use crate::domain::value_objects::{IgnorePatterns, IGNORE_FILE};
use crate::error::{SwatchError, SwatchResult};
use crate::infrastructure::watcher::{FileWatcher, DEBOUNCE_MS};

/// How often the watch loop checks the stop flag
const POLL_INTERVAL: Duration = Duration::from_millis(200);

pub struct DevSession<FS, TP>
where
    FS: FileSystem,
    TP: ToolchainCheck,
{
    source: Arc<dyn DesignSource>,
    compile: CompileUseCase<FS, TP>,
    options: CompileOptions,
    server: HotReloadServer,
    publisher: Option<PublishUseCase<FS>>,
    events: Arc<dyn EventSink>,
    debounce: Duration,
}

impl<FS, TP> DevSession<FS, TP>
where
    FS: FileSystem + 'static,
    TP: ToolchainCheck + 'static,
{
    pub fn new(
        source: Arc<dyn DesignSource>,
        compile: CompileUseCase<FS, TP>,
        options: CompileOptions,
        server: HotReloadServer,
    ) -> Self {
        Self {
            source,
            compile,
            options,
            server,
            publisher: None,
            events: Arc::new(NoopEventSink),
            debounce: Duration::from_millis(DEBOUNCE_MS),
        }
    }

    /// Publish every successful target after each rebuild
    pub fn with_publisher(mut self, publisher: PublishUseCase<FS>) -> Self {
        self.publisher = Some(publisher);
        self
    }

    pub fn with_events(mut self, events: Arc<dyn EventSink>) -> Self {
        self.events = events;
        self
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn server(&self) -> &HotReloadServer {
        &self.server
    }

    /// One compilation pass.
    ///
    /// Structural and source errors are reported to the server and returned;
    /// per-target failures only leave that target's snapshot unchanged.
    pub fn rebuild(&self) -> SwatchResult<CompileReport> {
        let result = self.rebuild_inner();
        if let Err(err) = &result {
            self.server.report_failure(err.to_string());
        }
        result
    }

    fn rebuild_inner(&self) -> SwatchResult<CompileReport> {
        let root = self.source.load()?;
        let graph = self
            .compile
            .build_with_events(&root, &self.options, self.events.as_ref())?;
        let report = self.compile.emit(&graph, &self.options, self.events.as_ref());

        for output in &report.outputs {
            if let Some(publisher) = &self.publisher {
                if let Err(err) = publisher.execute(output) {
                    warn!(target = %output.target, "publish failed: {}", err);
                    self.events.on_event(CompileEvent::TargetFailed {
                        target: output.target,
                        error: err.to_string(),
                    });
                    continue;
                }
            }
            match self.compile.snapshot(&graph, output.target) {
                Ok(snapshot) => {
                    self.server.publish(snapshot);
                }
                Err(err) => warn!(target = %output.target, "snapshot failed: {}", err),
            }
        }
        Ok(report)
    }

    /// Rebuild now, then on every debounced change until `running` clears.
    pub fn watch(self: Arc<Self>, root: &Path, running: Arc<AtomicBool>) -> SwatchResult<()> {
        if let Err(err) = self.rebuild() {
            warn!("initial build failed, waiting for changes: {}", err);
        }

        let ignore = IgnorePatterns::load(root).map_err(|e| SwatchError::InvalidConfig {
            file: root.join(IGNORE_FILE),
            message: e.to_string(),
        })?;
        let mut watcher = FileWatcher::new(ignore, self.debounce)?;
        for path in self.source.watch_paths() {
            if !path.exists() {
                warn!(path = %path.display(), "not watching missing path");
                continue;
            }
            watcher.watch(&path)?;
        }

        let session = self.clone();
        let (trigger, worker) = spawn_rebuild_loop(move || {
            let _ = session.rebuild();
        })?;
        info!("watching for changes");

        while running.load(Ordering::SeqCst) {
            if let Some(paths) = watcher.poll(POLL_INTERVAL) {
                self.events.on_event(CompileEvent::ChangeDetected { paths });
                if !trigger.request() {
                    break;
                }
            }
        }

        drop(trigger);
        let _ = worker.join();
        self.server.shutdown();
        info!("development session stopped");
        Ok(())
    }
}
