//! Tracing Event Sink
//!
//! Routes compile events into the development log.

use tracing::{debug, error, info, warn};

use crate::domain::ports::{CompileEvent, EventSink};

/// Event sink writing through `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn on_event(&self, event: CompileEvent) {
        match event {
            CompileEvent::Started { root, targets } => {
                info!(root = %root, targets = ?targets, "compiling");
            }
            CompileEvent::Built {
                types,
                assets,
                warnings,
            } => {
                info!(types, assets, warnings, "built component graph");
            }
            CompileEvent::ArtifactRendered {
                target,
                component,
                path,
                origin,
            } => {
                debug!(%target, component = %component, path = %path.display(), ?origin, "artifact");
            }
            CompileEvent::Warning { target, message } => match target {
                Some(target) => warn!(%target, "{}", message),
                None => warn!("{}", message),
            },
            CompileEvent::TargetFailed { target, error } => {
                error!(%target, "{}", error);
            }
            CompileEvent::TargetPublished {
                target,
                destination,
                files,
            } => {
                info!(%target, destination = %destination.display(), files, "published");
            }
            CompileEvent::Completed { succeeded, failed } => {
                info!(succeeded, failed, "compilation finished");
            }
            CompileEvent::ChangeDetected { paths } => {
                debug!(changed = paths.len(), "change detected");
            }
            CompileEvent::RebuildFailed { error } => {
                // the server already logged it at error level
                debug!(error = %error, "rebuild failed");
            }
            CompileEvent::SnapshotPublished {
                target,
                sequence,
                clients,
                summary,
            } => {
                info!(%target, sequence, clients, "snapshot {}", summary);
            }
            CompileEvent::ClientAttached { client, target } => {
                info!(client, %target, "client attached");
            }
            CompileEvent::ClientDisconnected { client, reason } => {
                warn!(client, "client disconnected: {}", reason);
            }
        }
    }

    fn wants_detailed_events(&self) -> bool {
        tracing::enabled!(tracing::Level::DEBUG)
    }
}
