//! IR builder
//!
//! Walks a component definition tree and produces the canonical
//! [`ComponentGraph`]:
//!
//! - every nested reference gets its path identity,
//! - definitions sharing a name are unified into one [`ComponentType`],
//! - default values are computed eagerly as [`ValueExpr`] literals,
//! - asset references are registered with the [`AssetPipeline`].
//!
//! Any error here is structural and aborts the whole pass.

pub mod naming;


use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use indexmap::map::Entry;
use indexmap::IndexMap;
use tracing::debug;

use super::asset_pipeline::AssetPipeline;
use crate::domain::entities::{
    AssetRef, AssetSource, Collection, ComponentDefinition, ComponentGraph, ComponentNode, ComponentType,
    Primitive, PropertySpec, PropertyType, PropertyValue, ValueExpr,
};
use crate::domain::ports::{FontLocator, NoFonts};
use crate::domain::value_objects::ComponentPath;
use crate::error::{SwatchError, SwatchResult};

/// Builds a [`ComponentGraph`] from a root definition.
pub struct IrBuilder<'a> {
    project_root: PathBuf,
    fonts: &'a dyn FontLocator,
}

impl IrBuilder<'static> {
    /// Builder without a font catalog; system fonts never resolve.
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            fonts: &NoFonts,
        }
    }
}

impl<'a> IrBuilder<'a> {
    pub fn with_fonts<'b>(self, fonts: &'b dyn FontLocator) -> IrBuilder<'b> {
        IrBuilder {
            project_root: self.project_root,
            fonts,
        }
    }

    pub fn build(&self, root: &ComponentDefinition) -> SwatchResult<ComponentGraph> {
        let mut state = BuildState {
            pipeline: AssetPipeline::new(&self.project_root, self.fonts),
            types: IndexMap::new(),
            nodes: Vec::new(),
            ancestors: Vec::new(),
        };

        let root_value = state.visit_definition(root, &ComponentPath::root())?;
        state.check_references()?;
        let root_value = state.widen(root_value);

        let order = state.topological_order();
        let BuildState {
            pipeline,
            mut types,
            nodes,
            ..
        } = state;

        let types: Vec<ComponentType> = order
            .into_iter()
            .filter_map(|name| {
                types
                    .shift_remove(&name)
                    .map(|entry| ComponentType::new(name, entry.properties, entry.first_seen))
            })
            .collect();
        let (assets, diagnostics) = pipeline.into_parts();

        debug!(
            root = root.name(),
            types = types.len(),
            assets = assets.len(),
            "built component graph"
        );

        Ok(ComponentGraph::new(
            root.name().to_string(),
            root_value,
            types,
            nodes,
            assets,
            diagnostics,
        ))
    }
}

struct TypeEntry {
    properties: Vec<PropertySpec>,
    first_seen: ComponentPath,
}

struct BuildState<'p> {
    pipeline: AssetPipeline<'p>,
    /// Unified types in first-seen order
    types: IndexMap<String, TypeEntry>,
    nodes: Vec<ComponentNode>,
    /// Definition names on the path from the root to the current node
    ancestors: Vec<String>,
}

/// Property being visited, for error reporting
struct Owner<'n> {
    component: &'n str,
    property: &'n str,
}

impl<'p> BuildState<'p> {
    fn visit_definition(
        &mut self,
        def: &ComponentDefinition,
        path: &ComponentPath,
    ) -> SwatchResult<ValueExpr> {
        let name = def.name();
        if !naming::is_valid_component(name) {
            return Err(SwatchError::InvalidName {
                what: "component",
                name: name.to_string(),
                path: path.clone(),
            });
        }
        if self.ancestors.iter().any(|ancestor| ancestor == name) {
            return Err(SwatchError::CyclicReference {
                component: name.to_string(),
                path: path.clone(),
            });
        }

        self.nodes.push(ComponentNode {
            path: path.clone(),
            component: name.to_string(),
        });
        self.ancestors.push(name.to_string());

        let mut fields = Vec::with_capacity(def.len());
        for (property, decl) in def.properties() {
            if !naming::is_valid_property(property) {
                self.ancestors.pop();
                return Err(SwatchError::InvalidName {
                    what: "property",
                    name: property.to_string(),
                    path: path.clone(),
                });
            }
            let owner = Owner {
                component: name,
                property,
            };
            let visited = self.visit_value(&decl.value, &path.child(property), &owner);
            let (ty, expr) = match visited {
                Ok(resolved) => resolved,
                Err(err) => {
                    self.ancestors.pop();
                    return Err(err);
                }
            };
            fields.push((property.to_string(), ty, expr, decl.updateable));
        }
        self.ancestors.pop();

        self.unify(name, fields, path)
    }

    /// Merge one instance into its named type; returns the instance literal
    /// with fields in canonical order.
    fn unify(
        &mut self,
        name: &str,
        fields: Vec<(String, PropertyType, ValueExpr, bool)>,
        path: &ComponentPath,
    ) -> SwatchResult<ValueExpr> {
        let entry = match self.types.entry(name.to_string()) {
            Entry::Occupied(occupied) => occupied.into_mut(),
            Entry::Vacant(vacant) => {
                let properties: Vec<PropertySpec> = fields
                    .into_iter()
                    .map(|(name, ty, default, updateable)| PropertySpec {
                        name,
                        ty,
                        default,
                        updateable,
                    })
                    .collect();
                let instance = ValueExpr::Instance {
                    component: name.to_string(),
                    fields: properties
                        .iter()
                        .map(|p| (p.name.clone(), p.default.clone()))
                        .collect(),
                };
                vacant.insert(TypeEntry {
                    properties,
                    first_seen: path.clone(),
                });
                return Ok(instance);
            }
        };

        let canonical: HashSet<&str> = entry.properties.iter().map(|p| p.name.as_str()).collect();
        let found: HashSet<&str> = fields.iter().map(|(n, ..)| n.as_str()).collect();
        if canonical != found {
            return Err(SwatchError::NamingCollision {
                component: name.to_string(),
                first: entry.first_seen.clone(),
                path: path.clone(),
            });
        }

        let mut by_name: IndexMap<String, (PropertyType, ValueExpr)> = fields
            .into_iter()
            .map(|(n, ty, expr, _)| (n, (ty, expr)))
            .collect();
        let mut ordered = Vec::with_capacity(entry.properties.len());
        for spec in entry.properties.iter_mut() {
            let Some((ty, expr)) = by_name.shift_remove(&spec.name) else {
                continue;
            };
            if !spec.ty.accepts(&ty) {
                if !ty.accepts(&spec.ty) {
                    return Err(SwatchError::TypeConflict {
                        component: name.to_string(),
                        property: spec.name.clone(),
                        expected: spec.ty.clone(),
                        found: ty,
                        path: path.clone(),
                    });
                }
                // Earlier instances are re-coerced once the walk is done
                debug!(component = name, property = %spec.name, from = %spec.ty, to = %ty, "widened property type");
                spec.default = coerce(spec.default.clone(), &ty);
                spec.ty = ty;
            }
            ordered.push((spec.name.clone(), coerce(expr, &spec.ty)));
        }

        Ok(ValueExpr::Instance {
            component: name.to_string(),
            fields: ordered,
        })
    }

    /// Re-coerce every instance against the final unified types, so values
    /// seen before a property widened to `Float` are `Float` too.
    fn widen(&mut self, root: ValueExpr) -> ValueExpr {
        let types: HashMap<String, Vec<(String, PropertyType)>> = self
            .types
            .iter()
            .map(|(name, entry)| {
                let specs = entry
                    .properties
                    .iter()
                    .map(|p| (p.name.clone(), p.ty.clone()))
                    .collect();
                (name.clone(), specs)
            })
            .collect();

        for entry in self.types.values_mut() {
            for spec in entry.properties.iter_mut() {
                spec.default = widen_expr(spec.default.clone(), &types);
            }
        }
        widen_expr(root, &types)
    }

    fn visit_value(
        &mut self,
        value: &PropertyValue,
        path: &ComponentPath,
        owner: &Owner<'_>,
    ) -> SwatchResult<(PropertyType, ValueExpr)> {
        match value {
            PropertyValue::Primitive(primitive) => visit_primitive(primitive, path),
            PropertyValue::Reference(def) => {
                let expr = self.visit_definition(def, path)?;
                Ok((PropertyType::component(def.name()), expr))
            }
            PropertyValue::Collection(collection) => self.visit_collection(collection, path, owner),
            PropertyValue::AssetRef(asset) => match self.pipeline.register(asset, path)? {
                Some(id) => Ok((PropertyType::Asset(asset.kind), ValueExpr::Asset(id))),
                None => Err(unlocated(asset, path)),
            },
        }
    }

    fn visit_collection(
        &mut self,
        collection: &Collection,
        path: &ComponentPath,
        owner: &Owner<'_>,
    ) -> SwatchResult<(PropertyType, ValueExpr)> {
        let element = &collection.element_type;
        if let Some(component) = element.referenced_component() {
            if !naming::is_identifier(component) {
                return Err(SwatchError::InvalidName {
                    what: "component",
                    name: component.to_string(),
                    path: path.clone(),
                });
            }
        }

        let mut items = Vec::with_capacity(collection.items.len());
        for (index, item) in collection.items.iter().enumerate() {
            let item_path = path.index(index);
            // Unlocated fonts drop out of font lists
            if let PropertyValue::AssetRef(asset) = item {
                match self.pipeline.register(asset, &item_path)? {
                    Some(id) => {
                        let ty = PropertyType::Asset(asset.kind);
                        check_element(element, &ty, owner, &item_path)?;
                        items.push(ValueExpr::Asset(id));
                    }
                    None if element == &PropertyType::Asset(asset.kind) => {}
                    None => return Err(unlocated(asset, &item_path)),
                }
                continue;
            }

            let (ty, expr) = self.visit_value(item, &item_path, owner)?;
            check_element(element, &ty, owner, &item_path)?;
            items.push(coerce(expr, element));
        }

        Ok((
            PropertyType::list_of(element.clone()),
            ValueExpr::List {
                element: element.clone(),
                items,
            },
        ))
    }

    /// Every component named by a property type must exist in the tree.
    fn check_references(&self) -> SwatchResult<()> {
        for entry in self.types.values() {
            for spec in &entry.properties {
                if let Some(component) = spec.ty.referenced_component() {
                    if !self.types.contains_key(component) {
                        return Err(SwatchError::UnknownComponent {
                            component: component.to_string(),
                            path: entry.first_seen.child(&spec.name),
                        });
                    }
                }
            }
        }
        Ok(())
    }

    /// Dependencies first; ties and cycles through collections resolved by
    /// first-seen order.
    fn topological_order(&self) -> Vec<String> {
        fn visit(
            name: &str,
            types: &IndexMap<String, TypeEntry>,
            visiting: &mut HashSet<String>,
            done: &mut HashSet<String>,
            order: &mut Vec<String>,
        ) {
            if done.contains(name) || !visiting.insert(name.to_string()) {
                return;
            }
            if let Some(entry) = types.get(name) {
                let mut deps: Vec<&str> = entry
                    .properties
                    .iter()
                    .filter_map(|p| p.ty.referenced_component())
                    .collect();
                deps.sort_by_key(|dep| types.get_index_of(*dep).unwrap_or(usize::MAX));
                deps.dedup();
                for dep in deps {
                    visit(dep, types, visiting, done, order);
                }
            }
            visiting.remove(name);
            done.insert(name.to_string());
            order.push(name.to_string());
        }

        let mut visiting = HashSet::new();
        let mut done = HashSet::new();
        let mut order = Vec::with_capacity(self.types.len());
        for name in self.types.keys() {
            visit(name, &self.types, &mut visiting, &mut done, &mut order);
        }
        order
    }
}

fn visit_primitive(
    primitive: &Primitive,
    path: &ComponentPath,
) -> SwatchResult<(PropertyType, ValueExpr)> {
    let out_of_range = |value: String| SwatchError::NumberOutOfRange {
        value,
        path: path.clone(),
    };
    let expr = match primitive {
        Primitive::Int(v) if i32::try_from(*v).is_err() => return Err(out_of_range(v.to_string())),
        Primitive::Int(v) => ValueExpr::Int(*v),
        Primitive::Float(v) if !v.is_finite() => {
            return Err(SwatchError::NonFiniteNumber { path: path.clone() })
        }
        Primitive::Float(v) if v.abs() > f64::from(f32::MAX) => {
            return Err(out_of_range(v.to_string()))
        }
        Primitive::Float(v) => ValueExpr::Float(*v),
        Primitive::Bool(v) => ValueExpr::Bool(*v),
        Primitive::String(v) => ValueExpr::String(v.clone()),
    };
    Ok((primitive.property_type(), expr))
}

fn check_element(
    element: &PropertyType,
    found: &PropertyType,
    owner: &Owner<'_>,
    path: &ComponentPath,
) -> SwatchResult<()> {
    if element.accepts(found) {
        return Ok(());
    }
    Err(SwatchError::TypeConflict {
        component: owner.component.to_string(),
        property: owner.property.to_string(),
        expected: element.clone(),
        found: found.clone(),
        path: path.clone(),
    })
}

/// Widen integer literals where the canonical type is a float
fn coerce(expr: ValueExpr, ty: &PropertyType) -> ValueExpr {
    match (expr, ty) {
        (ValueExpr::Int(v), PropertyType::Float) => ValueExpr::Float(v as f64),
        (ValueExpr::List { items, .. }, PropertyType::List(element)) => ValueExpr::List {
            element: (**element).clone(),
            items: items.into_iter().map(|item| coerce(item, element)).collect(),
        },
        (expr, _) => expr,
    }
}

fn widen_expr(expr: ValueExpr, types: &HashMap<String, Vec<(String, PropertyType)>>) -> ValueExpr {
    match expr {
        ValueExpr::Instance { component, fields } => {
            let specs = types.get(&component);
            let fields = fields
                .into_iter()
                .map(|(name, value)| {
                    let value = widen_expr(value, types);
                    let ty = specs.and_then(|specs| specs.iter().find(|(n, _)| *n == name));
                    match ty {
                        Some((_, ty)) => (name, coerce(value, ty)),
                        None => (name, value),
                    }
                })
                .collect();
            ValueExpr::Instance { component, fields }
        }
        ValueExpr::List { element, items } => ValueExpr::List {
            element,
            items: items.into_iter().map(|item| widen_expr(item, types)).collect(),
        },
        other => other,
    }
}

/// A system font outside a font list has nothing to degrade to
fn unlocated(asset: &AssetRef, path: &ComponentPath) -> SwatchError {
    let source_path = match &asset.source {
        AssetSource::SystemFont { name, .. } => PathBuf::from(name),
        AssetSource::Project(path) => path.clone(),
    };
    SwatchError::MissingAsset {
        source_path,
        path: path.clone(),
    }
}
