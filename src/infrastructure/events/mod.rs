//! Event Sink Implementations
//!
//! Provides concrete implementations of EventSink:
//! - JsonEventSink: NDJSON output for CI/automation
//! - TracingEventSink: development log

mod json;
mod tracing_sink;

pub use json::JsonEventSink;
pub use tracing_sink::TracingEventSink;
