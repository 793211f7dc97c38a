//! FontLocator port - lookup against a system font catalog

use std::path::PathBuf;

/// Finds the file backing a font by family and PostScript name.
pub trait FontLocator: Send + Sync {
    /// Path of the font file, or `None` when the catalog has no match.
    fn locate(&self, family: &str, name: &str) -> Option<PathBuf>;
}

/// Locator that never finds anything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFonts;

impl FontLocator for NoFonts {
    fn locate(&self, _family: &str, _name: &str) -> Option<PathBuf> {
        None
    }
}
