//! Component definitions - the authored input of a compilation pass
//!
//! Definitions are declared with a builder instead of being reflected from
//! annotated types:
//!
//! ```
//! use swatch::domain::entities::{AssetRef, ComponentDefinition};
//!
//! let header = ComponentDefinition::builder("Header")
//!     .property("icon", AssetRef::image("pin.png"))
//!     .property("spacing", 8)
//!     .build();
//! assert_eq!(header.len(), 2);
//! ```

use std::path::PathBuf;

use indexmap::IndexMap;

use super::property_type::{AssetKind, PropertyType};

/// Scalar leaf value
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Int(i64),
    Float(f64),
    Bool(bool),
    String(String),
}

impl Primitive {
    pub fn property_type(&self) -> PropertyType {
        match self {
            Primitive::Int(_) => PropertyType::Int,
            Primitive::Float(_) => PropertyType::Float,
            Primitive::Bool(_) => PropertyType::Bool,
            Primitive::String(_) => PropertyType::String,
        }
    }
}

/// Where an asset's bytes come from
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AssetSource {
    /// File inside the project, relative to the project root
    Project(PathBuf),
    /// Font looked up by PostScript or family name in the system catalog
    SystemFont { family: String, name: String },
}

/// Explicit density variant of an image
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScaleVariant {
    pub multiplier: u8,
    pub path: PathBuf,
}

/// Reference to a design asset
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetRef {
    pub source: AssetSource,
    pub kind: AssetKind,
    /// Variants beyond 1x; when empty, `@Nx` siblings are discovered at finalize
    pub scales: Vec<ScaleVariant>,
}

impl AssetRef {
    pub fn new(path: impl Into<PathBuf>, kind: AssetKind) -> Self {
        Self {
            source: AssetSource::Project(path.into()),
            kind,
            scales: Vec::new(),
        }
    }

    pub fn image(path: impl Into<PathBuf>) -> Self {
        Self::new(path, AssetKind::Image)
    }

    pub fn font(path: impl Into<PathBuf>) -> Self {
        Self::new(path, AssetKind::Font)
    }

    pub fn raw(path: impl Into<PathBuf>) -> Self {
        Self::new(path, AssetKind::Raw)
    }

    pub fn animation(path: impl Into<PathBuf>) -> Self {
        Self::new(path, AssetKind::Animation)
    }

    /// Font resolved against the system font catalog during the IR build
    pub fn system_font(family: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            source: AssetSource::SystemFont {
                family: family.into(),
                name: name.into(),
            },
            kind: AssetKind::Font,
            scales: Vec::new(),
        }
    }

    /// Add an explicit density variant
    pub fn with_scale(mut self, multiplier: u8, path: impl Into<PathBuf>) -> Self {
        self.scales.push(ScaleVariant {
            multiplier,
            path: path.into(),
        });
        self
    }
}

/// Ordered collection with an author-declared element type
#[derive(Debug, Clone, PartialEq)]
pub struct Collection {
    pub element_type: PropertyType,
    pub items: Vec<PropertyValue>,
}

impl Collection {
    pub fn new(element_type: PropertyType, items: impl IntoIterator<Item = PropertyValue>) -> Self {
        Self {
            element_type,
            items: items.into_iter().collect(),
        }
    }

    /// Empty collection; still typed
    pub fn empty(element_type: PropertyType) -> Self {
        Self::new(element_type, Vec::new())
    }
}

/// Value of one property in a definition
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Primitive(Primitive),
    /// Nested component owned by its parent
    Reference(ComponentDefinition),
    Collection(Collection),
    AssetRef(AssetRef),
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        PropertyValue::Primitive(Primitive::Int(value))
    }
}

impl From<i32> for PropertyValue {
    fn from(value: i32) -> Self {
        PropertyValue::Primitive(Primitive::Int(i64::from(value)))
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        PropertyValue::Primitive(Primitive::Float(value))
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        PropertyValue::Primitive(Primitive::Bool(value))
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::Primitive(Primitive::String(value.to_string()))
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::Primitive(Primitive::String(value))
    }
}

impl From<ComponentDefinition> for PropertyValue {
    fn from(value: ComponentDefinition) -> Self {
        PropertyValue::Reference(value)
    }
}

impl From<Collection> for PropertyValue {
    fn from(value: Collection) -> Self {
        PropertyValue::Collection(value)
    }
}

impl From<AssetRef> for PropertyValue {
    fn from(value: AssetRef) -> Self {
        PropertyValue::AssetRef(value)
    }
}

/// A property together with its hot-reload flag
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDecl {
    pub value: PropertyValue,
    /// Whether generated runtimes may replace this value from a snapshot
    pub updateable: bool,
}

/// A named component with ordered properties
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentDefinition {
    name: String,
    properties: IndexMap<String, PropertyDecl>,
}

impl ComponentDefinition {
    pub fn builder(name: impl Into<String>) -> DefinitionBuilder {
        DefinitionBuilder {
            name: name.into(),
            properties: IndexMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Properties in declaration order
    pub fn properties(&self) -> impl Iterator<Item = (&str, &PropertyDecl)> {
        self.properties.iter().map(|(name, decl)| (name.as_str(), decl))
    }

    pub fn get(&self, property: &str) -> Option<&PropertyDecl> {
        self.properties.get(property)
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

/// Builder for [`ComponentDefinition`]
#[derive(Debug, Clone)]
pub struct DefinitionBuilder {
    name: String,
    properties: IndexMap<String, PropertyDecl>,
}

impl DefinitionBuilder {
    /// Add an updateable property. Redeclaring a name replaces its value
    /// but keeps its original position.
    pub fn property(self, name: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.declare(name, value, true)
    }

    /// Add a property that hot reload never replaces
    pub fn constant(self, name: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.declare(name, value, false)
    }

    fn declare(
        mut self,
        name: impl Into<String>,
        value: impl Into<PropertyValue>,
        updateable: bool,
    ) -> Self {
        self.properties.insert(
            name.into(),
            PropertyDecl {
                value: value.into(),
                updateable,
            },
        );
        self
    }

    pub fn build(self) -> ComponentDefinition {
        ComponentDefinition {
            name: self.name,
            properties: self.properties,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_preserves_declaration_order() {
        let def = ComponentDefinition::builder("Card")
            .property("title", "Hello")
            .property("radius", 4.0)
            .constant("elevated", true)
            .build();

        let names: Vec<_> = def.properties().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["title", "radius", "elevated"]);
        assert!(!def.get("elevated").unwrap().updateable);
        assert!(def.get("title").unwrap().updateable);
    }

    #[test]
    fn redeclared_property_keeps_position() {
        let def = ComponentDefinition::builder("Card")
            .property("a", 1)
            .property("b", 2)
            .property("a", 3)
            .build();

        let names: Vec<_> = def.properties().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(
            def.get("a").unwrap().value,
            PropertyValue::Primitive(Primitive::Int(3))
        );
    }

    #[test]
    fn asset_ref_scales() {
        let asset = AssetRef::image("pin.png").with_scale(2, "pin@2x.png");
        assert_eq!(asset.kind, AssetKind::Image);
        assert_eq!(asset.scales[0].multiplier, 2);
    }

    #[test]
    fn empty_collection_keeps_element_type() {
        let collection = Collection::empty(PropertyType::component("Color"));
        assert!(collection.items.is_empty());
        assert_eq!(collection.element_type, PropertyType::component("Color"));
    }
}
