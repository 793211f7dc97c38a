//! Asset entity - a deduplicated design file referenced from the IR
//!
//! Identity is the resolved source path: every reference to the same file,
//! wherever it sits in the tree, maps to one `Asset`.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::definition::ScaleVariant;
use super::property_type::AssetKind;
use crate::domain::value_objects::{ComponentPath, Target};

/// Index of an asset inside the pipeline registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct AssetId(usize);

impl AssetId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A registered design asset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    id: AssetId,
    /// Resolved file path (project root joined, lexically normalized)
    source: PathBuf,
    /// Logical path used for output naming
    logical: PathBuf,
    kind: AssetKind,
    /// Explicit variants; empty means discover `@Nx` siblings
    variants: Vec<ScaleVariant>,
    /// Where the asset was first referenced
    first_reference: ComponentPath,
}

impl Asset {
    pub(crate) fn new(
        id: AssetId,
        source: PathBuf,
        logical: PathBuf,
        kind: AssetKind,
        variants: Vec<ScaleVariant>,
        first_reference: ComponentPath,
    ) -> Self {
        Self {
            id,
            source,
            logical,
            kind,
            variants,
            first_reference,
        }
    }

    pub fn id(&self) -> AssetId {
        self.id
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn logical(&self) -> &Path {
        &self.logical
    }

    pub fn kind(&self) -> AssetKind {
        self.kind
    }

    pub fn variants(&self) -> &[ScaleVariant] {
        &self.variants
    }

    pub fn first_reference(&self) -> &ComponentPath {
        &self.first_reference
    }

    /// File name of the logical path
    pub fn file_name(&self) -> String {
        self.logical
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Every asset referenced by one IR, indexed by [`AssetId`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetRegistry {
    assets: Vec<Asset>,
    by_source: HashMap<PathBuf, AssetId>,
}

impl AssetRegistry {
    pub fn get(&self, id: AssetId) -> Option<&Asset> {
        self.assets.get(id.index())
    }

    pub fn lookup(&self, source: &Path) -> Option<&Asset> {
        self.by_source.get(source).and_then(|id| self.get(*id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Asset> {
        self.assets.iter()
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    pub fn fonts(&self) -> impl Iterator<Item = &Asset> {
        self.assets.iter().filter(|asset| asset.kind == AssetKind::Font)
    }

    /// Insert unless the source is already known; returns the asset's id.
    pub(crate) fn insert(
        &mut self,
        source: PathBuf,
        logical: PathBuf,
        kind: AssetKind,
        variants: Vec<ScaleVariant>,
        first_reference: ComponentPath,
    ) -> AssetId {
        if let Some(id) = self.by_source.get(&source) {
            return *id;
        }
        let id = AssetId::new(self.assets.len());
        self.by_source.insert(source.clone(), id);
        self.assets.push(Asset::new(
            id,
            source,
            logical,
            kind,
            variants,
            first_reference,
        ));
        id
    }
}

/// One physical file produced for a target
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetOutput {
    pub asset: AssetId,
    pub kind: AssetKind,
    /// File to copy
    pub source: PathBuf,
    /// Destination relative to the target output root
    pub output: PathBuf,
    pub multiplier: u8,
}

/// Per-target view of the asset registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAssets {
    target: Target,
    files: Vec<AssetOutput>,
    /// 1x output path per asset, in id order
    primary: Vec<String>,
}

impl ResolvedAssets {
    pub(crate) fn new(target: Target, files: Vec<AssetOutput>, primary: Vec<String>) -> Self {
        Self {
            target,
            files,
            primary,
        }
    }

    pub fn target(&self) -> Target {
        self.target
    }

    /// Every physical file, ordered by asset then multiplier
    pub fn files(&self) -> &[AssetOutput] {
        &self.files
    }

    /// Path literal that generated code uses for the asset
    pub fn src(&self, id: AssetId) -> Option<&str> {
        self.primary.get(id.index()).map(String::as_str)
    }

    pub fn files_for(&self, id: AssetId) -> impl Iterator<Item = &AssetOutput> {
        self.files.iter().filter(move |file| file.asset == id)
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
