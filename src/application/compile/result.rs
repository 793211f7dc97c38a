//! Compile Result

use crate::domain::entities::{Diagnostic, TargetOutput};
use crate::domain::value_objects::Target;
use crate::error::SwatchError;

/// A target whose emission aborted
#[derive(Debug)]
pub struct TargetFailure {
    pub target: Target,
    pub error: SwatchError,
}

/// Outcome of one compilation pass.
///
/// Structural errors never get here; they fail the whole pass.
#[derive(Debug)]
pub struct CompileReport {
    /// Root component name
    pub root: String,
    /// Successful targets, in requested order
    pub outputs: Vec<TargetOutput>,
    pub failures: Vec<TargetFailure>,
}

impl CompileReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn output(&self, target: Target) -> Option<&TargetOutput> {
        self.outputs.iter().find(|o| o.target == target)
    }

    pub fn failure(&self, target: Target) -> Option<&SwatchError> {
        self.failures
            .iter()
            .find(|f| f.target == target)
            .map(|f| &f.error)
    }

    /// Warnings across every successful target
    pub fn warnings(&self) -> impl Iterator<Item = (Target, &Diagnostic)> {
        self.outputs
            .iter()
            .flat_map(|o| o.warnings().map(move |w| (o.target, w)))
    }
}
