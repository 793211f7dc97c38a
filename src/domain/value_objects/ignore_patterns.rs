//! Paths the watcher never rebuilds for
//!
//! Editor swap files and OS metadata are always skipped. A `.swatchignore`
//! in the project root adds gitignore-style patterns on top.

use std::fs;
use std::path::{Path, PathBuf};

use ignore::gitignore::{Gitignore, GitignoreBuilder};
use thiserror::Error;

/// Name of the ignore file looked up in the project root
pub const IGNORE_FILE: &str = ".swatchignore";

/// Files design tools and editors write next to the real ones
const BUILTIN: &[&str] = &["*.swp", "*.swx", "*~", ".#*", "*.tmp", ".DS_Store", "Thumbs.db"];

#[derive(Debug)]
pub struct IgnorePatterns {
    root: PathBuf,
    matcher: Gitignore,
    user_patterns: usize,
}

impl Default for IgnorePatterns {
    fn default() -> Self {
        Self::empty()
    }
}

impl IgnorePatterns {
    /// Only the built-in patterns
    pub fn empty() -> Self {
        Self::build(Path::new(""), None, "").unwrap_or_else(|_| Self {
            root: PathBuf::new(),
            matcher: Gitignore::empty(),
            user_patterns: 0,
        })
    }

    /// Built-in patterns plus `<root>/.swatchignore`, if present
    pub fn load(root: &Path) -> Result<Self, IgnoreError> {
        let file = root.join(IGNORE_FILE);
        if !file.is_file() {
            return Self::build(root, None, "");
        }
        let content = fs::read_to_string(&file)?;
        Self::build(root, Some(&file), &content)
    }

    /// Built-in patterns plus `content`, read from `source`
    pub fn from_content(root: &Path, source: &Path, content: &str) -> Result<Self, IgnoreError> {
        Self::build(root, Some(source), content)
    }

    fn build(root: &Path, source: Option<&Path>, content: &str) -> Result<Self, IgnoreError> {
        let mut builder = GitignoreBuilder::new(root);
        for pattern in BUILTIN {
            builder
                .add_line(None, pattern)
                .map_err(|e| IgnoreError::Matcher(e.to_string()))?;
        }

        let mut user_patterns = 0;
        for (index, line) in content.lines().enumerate() {
            let pattern = line.trim();
            if pattern.is_empty() || pattern.starts_with('#') {
                continue;
            }
            builder
                .add_line(source.map(Path::to_path_buf), pattern)
                .map_err(|e| IgnoreError::InvalidPattern {
                    file: source.map(Path::to_path_buf).unwrap_or_default(),
                    line: index + 1,
                    message: e.to_string(),
                })?;
            user_patterns += 1;
        }

        let matcher = builder
            .build()
            .map_err(|e| IgnoreError::Matcher(e.to_string()))?;
        Ok(Self {
            root: root.to_path_buf(),
            matcher,
            user_patterns,
        })
    }

    /// Whether a change to `path` should be dropped.
    ///
    /// Absolute paths outside the root are matched by file name alone.
    pub fn is_ignored(&self, path: &Path, is_dir: bool) -> bool {
        let relative = if path.is_absolute() {
            match path.strip_prefix(&self.root) {
                Ok(relative) if !relative.has_root() => relative,
                _ => match path.file_name() {
                    Some(name) => Path::new(name),
                    None => return false,
                },
            }
        } else {
            path
        };
        self.matcher
            .matched_path_or_any_parents(relative, is_dir)
            .is_ignore()
    }

    /// Patterns read from `.swatchignore`
    pub fn pattern_count(&self) -> usize {
        self.user_patterns
    }

    pub fn is_empty(&self) -> bool {
        self.user_patterns == 0
    }
}

#[derive(Debug, Error)]
pub enum IgnoreError {
    #[error("invalid pattern at {}:{line}: {message}", .file.display())]
    InvalidPattern {
        file: PathBuf,
        line: usize,
        message: String,
    },

    #[error("ignore matcher: {0}")]
    Matcher(String),

    #[error("reading {IGNORE_FILE}: {0}")]
    Io(#[from] std::io::Error),
}
