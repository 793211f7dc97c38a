//! Kotlin vocabulary

use std::path::PathBuf;

use super::dialect::{self, Blocks, Dialect, BANNER, FILE_TYPE};
use super::escaping::kotlin_string;
use super::EmitSettings;
use crate::domain::entities::{ComponentType, PropertyType, ResolvedAssets, ValueExpr};
use crate::domain::value_objects::Target;

pub struct Kotlin;

impl Dialect for Kotlin {
    fn target(&self) -> Target {
        Target::Android
    }

    fn type_name(&self, ty: &PropertyType) -> String {
        match ty {
            PropertyType::Int => "Int".to_string(),
            PropertyType::Float => "Float".to_string(),
            PropertyType::Bool => "Boolean".to_string(),
            PropertyType::String => "String".to_string(),
            PropertyType::Component(name) => name.clone(),
            PropertyType::List(element) => format!("List<{}>", self.type_name(element)),
            PropertyType::Asset(_) => FILE_TYPE.to_string(),
        }
    }

    fn literal(&self, expr: &ValueExpr, assets: &ResolvedAssets) -> String {
        match expr {
            ValueExpr::Int(v) => v.to_string(),
            ValueExpr::Float(v) => format!("{}f", dialect::float_literal(*v)),
            ValueExpr::Bool(v) => v.to_string(),
            ValueExpr::String(v) => kotlin_string(v),
            ValueExpr::Instance { component, fields } => {
                let args: Vec<String> = fields
                    .iter()
                    .map(|(name, value)| format!("{} = {}", name, self.literal(value, assets)))
                    .collect();
                format!("{}({})", component, args.join(", "))
            }
            ValueExpr::List { items, .. } => {
                let items: Vec<String> = items.iter().map(|i| self.literal(i, assets)).collect();
                format!("listOf({})", items.join(", "))
            }
            ValueExpr::Asset(_) => {
                let (src, kind) = dialect::asset_src(assets, expr);
                format!(
                    "{}(src = {}, type = {})",
                    FILE_TYPE,
                    kotlin_string(&src),
                    kotlin_string(kind)
                )
            }
        }
    }

    fn artifact_path(&self, settings: &EmitSettings, component: &str) -> PathBuf {
        let mut path = PathBuf::from("src/main/java");
        for segment in settings.package.split('.').filter(|s| !s.is_empty()) {
            path.push(segment);
        }
        path.join(format!("{}.kt", component))
    }

    fn preamble(&self, settings: &EmitSettings, _component: &ComponentType, imports: &[String]) -> String {
        let mut out = format!("{}\npackage {}\n", BANNER, settings.package);
        if !imports.is_empty() {
            out.push('\n');
            for import in imports {
                out.push_str(&format!("import {}\n", import));
            }
        }
        out
    }

    fn blocks(&self, component: &ComponentType, public: bool, assets: &ResolvedAssets) -> Blocks {
        let properties = component.properties();

        let declarations: Vec<String> = properties
            .iter()
            .map(|p| {
                let keyword = if p.updateable { "var" } else { "val" };
                format!("    {} {}: {}", keyword, p.name, self.type_name(&p.ty))
            })
            .collect();
        let parameters: Vec<String> = properties
            .iter()
            .map(|p| format!("{}: {}", p.name, self.type_name(&p.ty)))
            .collect();
        let arguments: Vec<String> = properties
            .iter()
            .map(|p| format!("{} = {}", p.name, self.literal(&p.default, assets)))
            .collect();

        let construction = if arguments.is_empty() {
            format!("{}()", component.name())
        } else {
            format!(
                "{}(\n{}\n            )",
                component.name(),
                dialect::block(&arguments, 16, ",")
            )
        };
        let members = format!(
            "    companion object {{\n        {}fun makeDefault(): {} = {}\n    }}",
            self.access(public),
            component.name(),
            construction
        );

        Blocks {
            declarations: declarations.join(",\n"),
            parameters: parameters.join(", "),
            // Constructor properties need no assignments
            assignments: String::new(),
            instantiation: self.literal(&component.default_instance(), assets),
            members,
        }
    }

    fn visibility(&self, public: bool) -> &'static str {
        if public {
            ""
        } else {
            "internal "
        }
    }

    fn access(&self, public: bool) -> &'static str {
        self.visibility(public)
    }

    fn class_kind(&self, component: &ComponentType) -> &'static str {
        // Data classes need at least one constructor property
        if component.properties().is_empty() {
            "class"
        } else {
            "data class"
        }
    }
}
