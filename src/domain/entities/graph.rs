//! Component IR - the canonical, target-independent result of a build

use std::collections::BTreeSet;

use super::asset::{AssetId, AssetRegistry};
use super::output::Diagnostic;
use super::property_type::PropertyType;
use crate::domain::value_objects::ComponentPath;

/// Literal expression for a default value, computed once at build time so
/// every target renders the same initial state.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueExpr {
    Int(i64),
    Float(f64),
    Bool(bool),
    String(String),
    /// Instantiation of a component type, fields in canonical property order
    Instance {
        component: String,
        fields: Vec<(String, ValueExpr)>,
    },
    List {
        element: PropertyType,
        items: Vec<ValueExpr>,
    },
    Asset(AssetId),
}

impl ValueExpr {
    /// Assets referenced anywhere below this expression, in visit order
    pub fn assets(&self) -> Vec<AssetId> {
        let mut out = Vec::new();
        self.collect_assets(&mut out);
        out
    }

    fn collect_assets(&self, out: &mut Vec<AssetId>) {
        match self {
            ValueExpr::Asset(id) => out.push(*id),
            ValueExpr::Instance { fields, .. } => {
                for (_, value) in fields {
                    value.collect_assets(out);
                }
            }
            ValueExpr::List { items, .. } => {
                for item in items {
                    item.collect_assets(out);
                }
            }
            _ => {}
        }
    }
}

/// One resolved property of a component type
#[derive(Debug, Clone, PartialEq)]
pub struct PropertySpec {
    pub name: String,
    pub ty: PropertyType,
    pub default: ValueExpr,
    pub updateable: bool,
}

/// IR node: a unified component type
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentType {
    name: String,
    properties: Vec<PropertySpec>,
    /// Path of the first definition that introduced the type
    first_seen: ComponentPath,
}

impl ComponentType {
    pub(crate) fn new(
        name: impl Into<String>,
        properties: Vec<PropertySpec>,
        first_seen: ComponentPath,
    ) -> Self {
        Self {
            name: name.into(),
            properties,
            first_seen,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn properties(&self) -> &[PropertySpec] {
        &self.properties
    }

    pub fn property(&self, name: &str) -> Option<&PropertySpec> {
        self.properties.iter().find(|p| p.name == name)
    }

    pub fn first_seen(&self) -> &ComponentPath {
        &self.first_seen
    }

    /// Component types named by this type's properties, sorted and unique
    pub fn dependencies(&self) -> BTreeSet<&str> {
        self.properties
            .iter()
            .filter_map(|p| p.ty.referenced_component())
            .collect()
    }

    pub fn references_assets(&self) -> bool {
        self.properties.iter().any(|p| p.ty.references_asset())
    }

    /// Default instance of this type
    pub fn default_instance(&self) -> ValueExpr {
        ValueExpr::Instance {
            component: self.name.clone(),
            fields: self
                .properties
                .iter()
                .map(|p| (p.name.clone(), p.default.clone()))
                .collect(),
        }
    }
}

/// A component instance in the authored tree, by path identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentNode {
    pub path: ComponentPath,
    pub component: String,
}

/// Fully built IR for one compilation pass
#[derive(Debug, Clone)]
pub struct ComponentGraph {
    root: String,
    /// Root instance exactly as authored
    root_value: ValueExpr,
    /// Dependencies before dependents, ties broken by first appearance
    types: Vec<ComponentType>,
    nodes: Vec<ComponentNode>,
    assets: AssetRegistry,
    diagnostics: Vec<Diagnostic>,
}

impl ComponentGraph {
    pub(crate) fn new(
        root: String,
        root_value: ValueExpr,
        types: Vec<ComponentType>,
        nodes: Vec<ComponentNode>,
        assets: AssetRegistry,
        diagnostics: Vec<Diagnostic>,
    ) -> Self {
        Self {
            root,
            root_value,
            types,
            nodes,
            assets,
            diagnostics,
        }
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn root_value(&self) -> &ValueExpr {
        &self.root_value
    }

    pub fn root_type(&self) -> Option<&ComponentType> {
        self.get(&self.root)
    }

    /// Types in emission order
    pub fn types(&self) -> &[ComponentType] {
        &self.types
    }

    pub fn get(&self, name: &str) -> Option<&ComponentType> {
        self.types.iter().find(|t| t.name == name)
    }

    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    pub fn nodes(&self) -> &[ComponentNode] {
        &self.nodes
    }

    pub fn node_at(&self, path: &ComponentPath) -> Option<&ComponentNode> {
        self.nodes.iter().find(|n| &n.path == path)
    }

    pub fn assets(&self) -> &AssetRegistry {
        &self.assets
    }

    /// Warnings raised while building (unlocated fonts)
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}
