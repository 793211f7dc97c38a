//! Compile Event Port
//!
//! Observable interface for compilation and hot-reload progress. Drives the
//! NDJSON stream of `--json` and the development log.

use std::path::PathBuf;

use serde::Serialize;

use crate::domain::entities::BindingOrigin;
use crate::domain::value_objects::Target;

/// Event emitted while compiling or serving
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CompileEvent {
    /// A compilation pass started
    Started { root: String, targets: Vec<Target> },

    /// IR built
    Built {
        types: usize,
        assets: usize,
        warnings: usize,
    },

    /// One artifact rendered
    ArtifactRendered {
        target: Target,
        component: String,
        path: PathBuf,
        origin: BindingOrigin,
    },

    /// Non-fatal degradation (generic binding, missing font)
    Warning {
        #[serde(skip_serializing_if = "Option::is_none")]
        target: Option<Target>,
        message: String,
    },

    /// Emission for a target aborted; other targets continue
    TargetFailed { target: Target, error: String },

    /// Target output published to disk
    TargetPublished {
        target: Target,
        destination: PathBuf,
        files: usize,
    },

    /// Compilation pass finished
    Completed { succeeded: usize, failed: usize },

    /// Watched files changed, rebuild queued
    ChangeDetected { paths: Vec<PathBuf> },

    /// Rebuild failed; clients keep the previous snapshot
    RebuildFailed { error: String },

    /// New snapshot queued for clients
    SnapshotPublished {
        target: Target,
        sequence: u64,
        clients: usize,
        summary: String,
    },

    ClientAttached { client: u64, target: Target },

    ClientDisconnected { client: u64, reason: String },
}

/// Trait for receiving compile events
///
/// Implementations:
/// - `JsonEventSink`: NDJSON event stream for CI
/// - `TracingEventSink`: development log through `tracing`
/// - `NoopEventSink`: silent operation
pub trait EventSink: Send + Sync {
    fn on_event(&self, event: CompileEvent);

    /// Whether per-artifact events are wanted
    fn wants_detailed_events(&self) -> bool {
        true
    }
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl EventSink for NoopEventSink {
    fn on_event(&self, _event: CompileEvent) {}

    fn wants_detailed_events(&self) -> bool {
        false
    }
}
