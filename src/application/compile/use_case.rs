//! Compile Use Case
//!
//! 1. Build the component graph (structural errors stop here)
//! 2. Per target, in parallel: toolchain check, then emission
//! 3. Collect outputs and per-target failures into a report

use std::sync::Arc;

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::domain::entities::{ComponentDefinition, ComponentGraph, Snapshot, TargetOutput};
use crate::domain::ports::{
    CompileEvent, EventSink, FileSystem, FontLocator, NoFonts, NoopEventSink, ToolchainCheck,
};
use crate::domain::services::{asset_pipeline, snapshot_of, BindingCatalog, Emitter, IrBuilder};
use crate::domain::value_objects::Target;
use crate::error::SwatchResult;

use super::options::CompileOptions;
use super::result::{CompileReport, TargetFailure};

/// Compile use case, parameterized by its ports
pub struct CompileUseCase<FS, TP>
where
    FS: FileSystem,
    TP: ToolchainCheck,
{
    catalog: Arc<BindingCatalog>,
    file_system: FS,
    toolchain: TP,
    fonts: Arc<dyn FontLocator>,
}

impl<FS, TP> CompileUseCase<FS, TP>
where
    FS: FileSystem,
    TP: ToolchainCheck,
{
    pub fn new(catalog: Arc<BindingCatalog>, file_system: FS, toolchain: TP) -> Self {
        Self {
            catalog,
            file_system,
            toolchain,
            fonts: Arc::new(NoFonts),
        }
    }

    pub fn with_fonts(mut self, fonts: Arc<dyn FontLocator>) -> Self {
        self.fonts = fonts;
        self
    }

    pub fn catalog(&self) -> &BindingCatalog {
        &self.catalog
    }

    /// Build the IR for `root`
    pub fn build(&self, root: &ComponentDefinition, options: &CompileOptions) -> SwatchResult<ComponentGraph> {
        IrBuilder::new(&options.project_root)
            .with_fonts(self.fonts.as_ref())
            .build(root)
    }

    /// Execute the compile use case
    pub fn execute(&self, root: &ComponentDefinition, options: &CompileOptions) -> SwatchResult<CompileReport> {
        self.execute_with_events(root, options, Arc::new(NoopEventSink))
    }

    /// Execute with event reporting
    pub fn execute_with_events(
        &self,
        root: &ComponentDefinition,
        options: &CompileOptions,
        events: Arc<dyn EventSink>,
    ) -> SwatchResult<CompileReport> {
        let graph = self.build_with_events(root, options, events.as_ref())?;
        Ok(self.emit(&graph, options, events.as_ref()))
    }

    /// Build the IR, reporting `Started` and `Built`.
    ///
    /// A structural error completes the pass with every target failed.
    pub fn build_with_events(
        &self,
        root: &ComponentDefinition,
        options: &CompileOptions,
        events: &dyn EventSink,
    ) -> SwatchResult<ComponentGraph> {
        events.on_event(CompileEvent::Started {
            root: root.name().to_string(),
            targets: options.targets.clone(),
        });

        let graph = match self.build(root, options) {
            Ok(graph) => graph,
            Err(err) => {
                events.on_event(CompileEvent::Completed {
                    succeeded: 0,
                    failed: options.targets.len(),
                });
                return Err(err);
            }
        };
        events.on_event(CompileEvent::Built {
            types: graph.type_count(),
            assets: graph.assets().len(),
            warnings: graph.diagnostics().len(),
        });
        Ok(graph)
    }

    /// Emit every target of `options` from an already built graph
    pub fn emit(&self, graph: &ComponentGraph, options: &CompileOptions, events: &dyn EventSink) -> CompileReport {
        let results: Vec<(Target, SwatchResult<TargetOutput>)> = options
            .targets
            .par_iter()
            .map(|&target| (target, self.emit_target(graph, target, options)))
            .collect();

        let mut report = CompileReport {
            root: graph.root().to_string(),
            outputs: Vec::new(),
            failures: Vec::new(),
        };
        for (target, result) in results {
            match result {
                Ok(output) => {
                    self.report_output(&output, events);
                    report.outputs.push(output);
                }
                Err(error) => {
                    warn!(%target, "emission failed: {}", error);
                    events.on_event(CompileEvent::TargetFailed {
                        target,
                        error: error.to_string(),
                    });
                    report.failures.push(TargetFailure { target, error });
                }
            }
        }

        events.on_event(CompileEvent::Completed {
            succeeded: report.outputs.len(),
            failed: report.failures.len(),
        });
        report
    }

    /// Snapshot of the graph's root state for `target`
    pub fn snapshot(&self, graph: &ComponentGraph, target: Target) -> SwatchResult<Snapshot> {
        let assets = asset_pipeline::finalize(graph.assets(), target, &self.file_system)?;
        Ok(snapshot_of(graph, &assets))
    }

    fn emit_target(
        &self,
        graph: &ComponentGraph,
        target: Target,
        options: &CompileOptions,
    ) -> SwatchResult<TargetOutput> {
        self.toolchain.check(target)?;
        let output = Emitter::new(&self.catalog, &self.file_system)
            .with_settings(options.settings.clone())
            .emit(graph, target)?;
        debug!(%target, artifacts = output.artifacts.len(), "emitted target");
        Ok(output)
    }

    fn report_output(&self, output: &TargetOutput, events: &dyn EventSink) {
        if events.wants_detailed_events() {
            for artifact in &output.artifacts {
                events.on_event(CompileEvent::ArtifactRendered {
                    target: output.target,
                    component: artifact.component().to_string(),
                    path: artifact.path().to_path_buf(),
                    origin: artifact.origin(),
                });
            }
        }
        for warning in output.warnings() {
            events.on_event(CompileEvent::Warning {
                target: Some(output.target),
                message: warning.to_string(),
            });
        }
    }
}
