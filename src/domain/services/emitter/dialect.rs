//! Per-target vocabulary: native type names, literal syntax, file layout and
//! the pre-rendered class blocks handed to binding templates.

use std::path::PathBuf;

use super::{kotlin::Kotlin, swift::Swift, typescript::TypeScript, EmitSettings};
use crate::domain::entities::{ComponentType, PropertyType, ResolvedAssets, ValueExpr};
use crate::domain::value_objects::Target;

/// Header line of every generated source file
pub const BANNER: &str = "// This file was generated by swatch. Do not edit.";

/// Name of the runtime type assets are wrapped in
pub const FILE_TYPE: &str = "File";

/// Pre-rendered fragments of one class
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Blocks {
    /// Property declarations (Swift fields, Kotlin and TypeScript
    /// constructor parameters)
    pub declarations: String,
    /// `name: Type` pairs, comma separated
    pub parameters: String,
    /// Constructor body assignments
    pub assignments: String,
    /// Default instance expression
    pub instantiation: String,
    /// Class body: declarations where they belong, constructor, factory
    pub members: String,
}

pub trait Dialect: Sync {
    fn target(&self) -> Target;

    fn type_name(&self, ty: &PropertyType) -> String;

    /// Literal for `expr`; nested instances render inline
    fn literal(&self, expr: &ValueExpr, assets: &ResolvedAssets) -> String;

    /// Path of the artifact for `component`, relative to the target root
    fn artifact_path(&self, settings: &EmitSettings, component: &str) -> PathBuf;

    /// Banner, package line and imports
    fn preamble(&self, settings: &EmitSettings, component: &ComponentType, imports: &[String]) -> String;

    fn blocks(&self, component: &ComponentType, public: bool, assets: &ResolvedAssets) -> Blocks;

    /// Class-level modifier prefix
    fn visibility(&self, public: bool) -> &'static str;

    /// Member-level modifier prefix
    fn access(&self, public: bool) -> &'static str;

    /// Class keyword(s)
    fn class_kind(&self, component: &ComponentType) -> &'static str;
}

pub fn dialect(target: Target) -> &'static dyn Dialect {
    match target {
        Target::Ios => &Swift,
        Target::Android => &Kotlin,
        Target::Web => &TypeScript,
    }
}

/// Float literal with at least one fractional digit (`8.0`, not `8`)
pub fn float_literal(value: f64) -> String {
    format!("{:?}", value)
}

/// True when `ty` names a float anywhere inside it
pub fn uses_float(ty: &PropertyType) -> bool {
    match ty {
        PropertyType::Float => true,
        PropertyType::List(element) => uses_float(element),
        _ => false,
    }
}

/// Sorted set of types a class refers to by name, `File` included
pub fn referenced_types(component: &ComponentType) -> Vec<String> {
    let mut names: Vec<String> = component
        .dependencies()
        .into_iter()
        .map(str::to_string)
        .collect();
    if component.references_assets() {
        names.push(FILE_TYPE.to_string());
    }
    names.sort();
    names.dedup();
    names
}

/// [`referenced_types`] plus every type the default literals instantiate,
/// nested instances included
pub fn literal_types(component: &ComponentType) -> Vec<String> {
    fn collect(expr: &ValueExpr, out: &mut Vec<String>) {
        match expr {
            ValueExpr::Instance { component, fields } => {
                out.push(component.clone());
                for (_, value) in fields {
                    collect(value, out);
                }
            }
            ValueExpr::List { items, .. } => items.iter().for_each(|item| collect(item, out)),
            ValueExpr::Asset(_) => out.push(FILE_TYPE.to_string()),
            _ => {}
        }
    }

    let mut names = referenced_types(component);
    for property in component.properties() {
        collect(&property.default, &mut names);
    }
    names.sort();
    names.dedup();
    names
}

/// One item per line at `width` spaces, joined with `separator` and a newline
pub fn block(items: &[String], width: usize, separator: &str) -> String {
    let pad = " ".repeat(width);
    items
        .iter()
        .map(|item| format!("{}{}", pad, item))
        .collect::<Vec<_>>()
        .join(&format!("{}\n", separator))
}

/// Asset `src` for `id`, or empty when unresolved
pub fn asset_src(assets: &ResolvedAssets, expr: &ValueExpr) -> (String, &'static str) {
    match expr {
        ValueExpr::Asset(id) => {
            let src = assets.src(*id).unwrap_or_default().to_string();
            let kind = assets
                .files_for(*id)
                .next()
                .map(|f| f.kind.as_str())
                .unwrap_or("raw");
            (src, kind)
        }
        _ => (String::new(), "raw"),
    }
}
