//! Component path value object
//!
//! The path identity of a value inside a component tree: the sequence of
//! property names walked from the root. Collection items contribute their index.

use std::fmt;

use serde::{Serialize, Serializer};

/// Path of a value relative to the root component
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentPath(Vec<String>);

impl ComponentPath {
    /// The root component itself
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Path of a property (or collection index) below this one
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        Self(segments)
    }

    /// Path of a collection item below this one
    pub fn index(&self, index: usize) -> Self {
        self.child(index.to_string())
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for ComponentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            write!(f, "(root)")
        } else {
            write!(f, "{}", self.0.join("."))
        }
    }
}

impl Serialize for ComponentPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<S: Into<String>> FromIterator<S> for ComponentPath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}
