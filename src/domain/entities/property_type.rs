//! Property type model
//!
//! The closed set of kinds a component property can resolve to, and the
//! compatibility rule used when two definitions of one type are unified.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of a design asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    /// Raster image, may carry density variants
    Image,
    /// Font file located in a project or system catalog
    Font,
    /// Copied verbatim
    Raw,
    /// Embedded animation document (Lottie JSON)
    Animation,
}

impl AssetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetKind::Image => "image",
            AssetKind::Font => "font",
            AssetKind::Raw => "raw",
            AssetKind::Animation => "animation",
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved type of a component property
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropertyType {
    Int,
    Float,
    Bool,
    /// Free text and enum-like string values
    String,
    /// Nested component, by type name
    Component(String),
    /// Ordered homogeneous collection
    List(Box<PropertyType>),
    Asset(AssetKind),
}

impl PropertyType {
    pub fn list_of(element: PropertyType) -> Self {
        PropertyType::List(Box::new(element))
    }

    pub fn component(name: impl Into<String>) -> Self {
        PropertyType::Component(name.into())
    }

    /// Whether a value of type `found` can be stored in a property of this type.
    ///
    /// Identical types are compatible, and integers widen to floats at any
    /// collection depth.
    pub fn accepts(&self, found: &PropertyType) -> bool {
        match (self, found) {
            (PropertyType::Float, PropertyType::Int) => true,
            (PropertyType::List(expected), PropertyType::List(found)) => expected.accepts(found),
            (expected, found) => expected == found,
        }
    }

    /// Component type name referenced by this type, looking through lists.
    pub fn referenced_component(&self) -> Option<&str> {
        match self {
            PropertyType::Component(name) => Some(name),
            PropertyType::List(element) => element.referenced_component(),
            _ => None,
        }
    }

    /// Whether an asset appears in this type, looking through lists.
    pub fn references_asset(&self) -> bool {
        match self {
            PropertyType::Asset(_) => true,
            PropertyType::List(element) => element.references_asset(),
            _ => false,
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, PropertyType::List(_))
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyType::Int => f.write_str("Int"),
            PropertyType::Float => f.write_str("Float"),
            PropertyType::Bool => f.write_str("Bool"),
            PropertyType::String => f.write_str("String"),
            PropertyType::Component(name) => f.write_str(name),
            PropertyType::List(element) => write!(f, "[{}]", element),
            PropertyType::Asset(kind) => write!(f, "Asset<{}>", kind),
        }
    }
}
