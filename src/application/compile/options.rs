//! Compile Options

use std::path::PathBuf;

use crate::domain::services::EmitSettings;
use crate::domain::value_objects::Target;

/// Options for the compile use case
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Directory asset paths are resolved against
    pub project_root: PathBuf,
    /// Targets to emit, in report order
    pub targets: Vec<Target>,
    /// Swift module and Kotlin package names
    pub settings: EmitSettings,
}

impl CompileOptions {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            targets: Target::ALL.to_vec(),
            settings: EmitSettings::default(),
        }
    }

    pub fn with_targets(mut self, targets: Vec<Target>) -> Self {
        self.targets = targets;
        self
    }

    pub fn with_settings(mut self, settings: EmitSettings) -> Self {
        self.settings = settings;
        self
    }
}
