//! DesignSource port - where a development session reads its root component

use std::path::PathBuf;

use crate::domain::entities::ComponentDefinition;
use crate::error::SwatchResult;

/// Produces the root definition on every rebuild.
pub trait DesignSource: Send + Sync {
    fn load(&self) -> SwatchResult<ComponentDefinition>;

    /// Files and directories whose changes trigger a rebuild
    fn watch_paths(&self) -> Vec<PathBuf> {
        Vec::new()
    }
}

impl<F> DesignSource for F
where
    F: Fn() -> SwatchResult<ComponentDefinition> + Send + Sync,
{
    fn load(&self) -> SwatchResult<ComponentDefinition> {
        self()
    }
}
