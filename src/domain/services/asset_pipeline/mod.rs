//! Asset pipeline
//!
//! Registers every asset the IR references, deduplicated by resolved source
//! path, and computes per-target output files.
//!
//! Registration happens during the IR build and never touches the disk
//! (except through the font locator). Existence checks, variant discovery and
//! collision detection happen in [`finalize`], once per target.

pub mod naming;


use std::collections::HashMap;
use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

use tracing::warn;

use crate::domain::entities::{
    AssetId, AssetKind, AssetOutput, AssetRef, AssetRegistry, AssetSource, Diagnostic,
    ResolvedAssets, ScaleVariant,
};
use crate::domain::ports::{FileSystem, FontLocator};
use crate::domain::value_objects::{ComponentPath, Target};
use crate::error::{SwatchError, SwatchResult};

/// Multipliers looked for next to an image without explicit variants
const DISCOVERED_SCALES: [u8; 3] = [2, 3, 4];

pub struct AssetPipeline<'a> {
    root: PathBuf,
    fonts: &'a dyn FontLocator,
    registry: AssetRegistry,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> AssetPipeline<'a> {
    /// `root` is the project root every project asset must stay inside.
    pub fn new(root: impl Into<PathBuf>, fonts: &'a dyn FontLocator) -> Self {
        Self {
            root: normalize(&root.into()),
            fonts,
            registry: AssetRegistry::default(),
            diagnostics: Vec::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Register an asset reference found at `at`.
    ///
    /// Returns the existing id when the resolved source is already known.
    /// Returns `Ok(None)` for a system font the catalog cannot locate; a
    /// warning is recorded and the caller drops the reference.
    pub fn register(&mut self, asset: &AssetRef, at: &ComponentPath) -> SwatchResult<Option<AssetId>> {
        let (source, logical) = match &asset.source {
            AssetSource::Project(path) => {
                let logical = self.confine(path, at)?;
                (self.root.join(&logical), logical)
            }
            AssetSource::SystemFont { family, name } => match self.fonts.locate(family, name) {
                Some(found) => {
                    let logical = found
                        .file_name()
                        .map(PathBuf::from)
                        .unwrap_or_else(|| PathBuf::from(name));
                    (normalize(&found), logical)
                }
                None => {
                    warn!(font = %name, family = %family, path = %at, "unable to locate system font assets");
                    self.diagnostics.push(
                        Diagnostic::warning(format!(
                            "unable to locate system font assets for '{}'",
                            name
                        ))
                        .for_component("Font")
                        .at(at.clone()),
                    );
                    return Ok(None);
                }
            },
        };

        if let Some(existing) = self.registry.lookup(&source) {
            if existing.kind() != asset.kind {
                return Err(SwatchError::AssetKindConflict {
                    source_path: existing.logical().to_path_buf(),
                    first: existing.kind().to_string(),
                    second: asset.kind.to_string(),
                    path: at.clone(),
                });
            }
            return Ok(Some(existing.id()));
        }

        let mut variants = Vec::new();
        for variant in asset.scales.iter().filter(|v| v.multiplier > 1) {
            let relative = self.confine(&variant.path, at)?;
            variants.push(ScaleVariant {
                multiplier: variant.multiplier,
                path: self.root.join(relative),
            });
        }
        variants.sort_by_key(|v| v.multiplier);
        variants.dedup_by_key(|v| v.multiplier);

        Ok(Some(self.registry.insert(
            source,
            logical,
            asset.kind,
            variants,
            at.clone(),
        )))
    }

    pub fn registry(&self) -> &AssetRegistry {
        &self.registry
    }

    /// Font warnings recorded so far
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Resolve the current registry for a target
    pub fn finalize(&self, target: Target, fs: &dyn FileSystem) -> SwatchResult<ResolvedAssets> {
        finalize(&self.registry, target, fs)
    }

    pub fn into_parts(self) -> (AssetRegistry, Vec<Diagnostic>) {
        (self.registry, self.diagnostics)
    }

    /// Relative form of `path` inside the root, or `PathEscape`
    fn confine(&self, path: &Path, at: &ComponentPath) -> SwatchResult<PathBuf> {
        confine(&self.root, path).ok_or_else(|| SwatchError::PathEscape {
            path: path.to_path_buf(),
            root: self.root.clone(),
            at: at.clone(),
        })
    }
}

/// Compute every output file of `registry` for `target`.
///
/// Fails with `MissingAsset` when a source or an explicit variant does not
/// exist, and with `AssetPathCollision` when two assets sanitize to one path
/// (one resource name, on Android).
pub fn finalize(
    registry: &AssetRegistry,
    target: Target,
    fs: &dyn FileSystem,
) -> SwatchResult<ResolvedAssets> {
    let mut files = Vec::new();
    let mut primary = Vec::with_capacity(registry.len());
    let mut claimed: HashMap<PathBuf, AssetId> = HashMap::new();

    for asset in registry.iter() {
        if !fs.is_file(asset.source()) {
            return Err(SwatchError::MissingAsset {
                source_path: asset.logical().to_path_buf(),
                path: asset.first_reference().clone(),
            });
        }

        let mut sources = vec![(1u8, asset.source().to_path_buf())];
        if !asset.variants().is_empty() {
            for variant in asset.variants() {
                if !fs.is_file(&variant.path) {
                    return Err(SwatchError::MissingAsset {
                        source_path: variant.path.clone(),
                        path: asset.first_reference().clone(),
                    });
                }
                sources.push((variant.multiplier, variant.path.clone()));
            }
        } else if asset.kind() == AssetKind::Image {
            for multiplier in DISCOVERED_SCALES {
                let sibling = naming::scaled_sibling(asset.source(), multiplier);
                if fs.is_file(&sibling) {
                    sources.push((multiplier, sibling));
                }
            }
        }

        for (multiplier, source) in sources {
            let output = naming::output_path(target, asset.kind(), asset.logical(), multiplier);
            let key = naming::collision_key(target, &output);
            if let Some(owner) = claimed.get(&key) {
                if *owner != asset.id() {
                    let first = registry
                        .get(*owner)
                        .map(|a| a.logical().to_path_buf())
                        .unwrap_or_default();
                    return Err(SwatchError::AssetPathCollision {
                        target,
                        output,
                        first,
                        second: asset.logical().to_path_buf(),
                    });
                }
                continue;
            }
            claimed.insert(key, asset.id());
            if multiplier == 1 {
                primary.push(naming::to_literal(&output));
            }
            files.push(AssetOutput {
                asset: asset.id(),
                kind: asset.kind(),
                source,
                output,
                multiplier,
            });
        }
    }

    Ok(ResolvedAssets::new(target, files, primary))
}

/// Lexically normalize a path, resolving `.` and `..` without touching the disk.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Path of `path` relative to `root`, if it stays inside it
fn confine(root: &Path, path: &Path) -> Option<PathBuf> {
    let relative = if path.is_absolute() {
        normalize(path).strip_prefix(root).ok()?.to_path_buf()
    } else {
        path.to_path_buf()
    };

    let mut parts: Vec<&OsStr> = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => parts.push(part),
            Component::CurDir => {}
            Component::ParentDir => {
                parts.pop()?;
            }
            Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    if parts.is_empty() {
        return None;
    }
    Some(parts.iter().collect())
}
