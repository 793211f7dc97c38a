//! ToolchainCheck port - is the toolchain for a target installed?

use crate::domain::value_objects::Target;
use crate::error::{SwatchError, SwatchResult};

/// Checked once per target before emission.
pub trait ToolchainCheck: Send + Sync {
    /// `Err(ToolchainUnavailable)` when the target cannot be built here.
    fn check(&self, target: Target) -> SwatchResult<()>;
}

impl<T: ToolchainCheck + ?Sized> ToolchainCheck for Box<T> {
    fn check(&self, target: Target) -> SwatchResult<()> {
        (**self).check(target)
    }
}

/// Check that accepts every target
#[derive(Debug, Clone, Copy, Default)]
pub struct SkipToolchainCheck;

impl ToolchainCheck for SkipToolchainCheck {
    fn check(&self, _target: Target) -> SwatchResult<()> {
        Ok(())
    }
}

/// Check with a fixed answer per target
#[derive(Debug, Clone, Default)]
pub struct StaticToolchains {
    missing: Vec<Target>,
}

impl StaticToolchains {
    pub fn missing(targets: impl IntoIterator<Item = Target>) -> Self {
        Self {
            missing: targets.into_iter().collect(),
        }
    }
}

impl ToolchainCheck for StaticToolchains {
    fn check(&self, target: Target) -> SwatchResult<()> {
        if self.missing.contains(&target) {
            return Err(SwatchError::ToolchainUnavailable {
                target,
                program: target.default_toolchain().to_string(),
            });
        }
        Ok(())
    }
}
