//! System font catalog
//!
//! Indexes font files under the platform font folders plus configured search
//! paths and answers [`FontLocator`] queries by PostScript name.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use ignore::WalkBuilder;
use tracing::debug;

use crate::domain::ports::FontLocator;

const FONT_EXTENSIONS: &[&str] = &["ttf", "otf", "ttc", "woff", "woff2"];

/// Lazily built index of installed fonts
#[derive(Debug, Default)]
pub struct SystemFontCatalog {
    roots: Vec<PathBuf>,
    index: OnceLock<HashMap<String, PathBuf>>,
}

impl SystemFontCatalog {
    /// Catalog over the platform font folders followed by `extra` paths
    pub fn new(extra: impl IntoIterator<Item = PathBuf>) -> Self {
        let mut roots = platform_font_dirs();
        roots.extend(extra);
        Self::with_roots(roots)
    }

    /// Catalog over exactly `roots`
    pub fn with_roots(roots: Vec<PathBuf>) -> Self {
        Self {
            roots,
            index: OnceLock::new(),
        }
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    fn index(&self) -> &HashMap<String, PathBuf> {
        self.index.get_or_init(|| {
            let mut index = HashMap::new();
            for root in self.roots.iter().filter(|r| r.is_dir()) {
                scan(root, &mut index);
            }
            debug!(fonts = index.len(), roots = self.roots.len(), "indexed system fonts");
            index
        })
    }
}

impl FontLocator for SystemFontCatalog {
    fn locate(&self, family: &str, name: &str) -> Option<PathBuf> {
        let index = self.index();
        index
            .get(&font_key(name))
            .or_else(|| index.get(&font_key(&format!("{}-Regular", family))))
            .or_else(|| index.get(&font_key(family)))
            .cloned()
    }
}

/// First file wins, so earlier roots shadow later ones
fn scan(root: &Path, index: &mut HashMap<String, PathBuf>) {
    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .follow_links(true)
        .sort_by_file_path(|a, b| a.cmp(b))
        .build();
    for entry in walker.flatten() {
        let path = entry.path();
        let is_font = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| FONT_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
            .unwrap_or(false);
        if !is_font || !path.is_file() {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            index
                .entry(font_key(stem))
                .or_insert_with(|| path.to_path_buf());
        }
    }
}

/// Case, spaces, dashes and underscores do not distinguish font names
fn font_key(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

fn platform_font_dirs() -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    if let Some(user) = dirs::font_dir() {
        dirs.push(user);
    }
    if cfg!(target_os = "macos") {
        dirs.push(PathBuf::from("/Library/Fonts"));
        dirs.push(PathBuf::from("/System/Library/Fonts"));
    } else if cfg!(windows) {
        dirs.push(PathBuf::from(r"C:\Windows\Fonts"));
    } else {
        dirs.push(PathBuf::from("/usr/share/fonts"));
        dirs.push(PathBuf::from("/usr/local/share/fonts"));
    }
    dirs
}
