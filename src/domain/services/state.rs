//! Snapshot state
//!
//! JSON mirror of a default-value tree: objects for instances (fields in
//! canonical order), arrays for lists, `{"src","type"}` for assets. Asset
//! paths depend on the target, so state is always computed against the
//! target's resolved assets.

use serde_json::{Map, Value};

use crate::domain::entities::{ComponentGraph, ResolvedAssets, Snapshot, ValueExpr};

use super::emitter::dialect;

pub fn state_of(expr: &ValueExpr, assets: &ResolvedAssets) -> Value {
    match expr {
        ValueExpr::Int(v) => Value::from(*v),
        ValueExpr::Float(v) => Value::from(*v),
        ValueExpr::Bool(v) => Value::Bool(*v),
        ValueExpr::String(v) => Value::String(v.clone()),
        ValueExpr::Instance { fields, .. } => Value::Object(
            fields
                .iter()
                .map(|(name, value)| (name.clone(), state_of(value, assets)))
                .collect::<Map<String, Value>>(),
        ),
        ValueExpr::List { items, .. } => {
            Value::Array(items.iter().map(|item| state_of(item, assets)).collect())
        }
        ValueExpr::Asset(_) => {
            let (src, kind) = dialect::asset_src(assets, expr);
            let mut object = Map::new();
            object.insert("src".to_string(), Value::String(src));
            object.insert("type".to_string(), Value::String(kind.to_string()));
            Value::Object(object)
        }
    }
}

/// Unsequenced snapshot of the graph's root for the target of `assets`
pub fn snapshot_of(graph: &ComponentGraph, assets: &ResolvedAssets) -> Snapshot {
    Snapshot::new(
        assets.target(),
        graph.root(),
        state_of(graph.root_value(), assets),
    )
}
