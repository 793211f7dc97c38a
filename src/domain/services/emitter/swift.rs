//! Swift vocabulary

use std::path::PathBuf;

use super::dialect::{self, Blocks, Dialect, BANNER, FILE_TYPE};
use super::escaping::swift_string;
use super::EmitSettings;
use crate::domain::entities::{ComponentType, PropertyType, ResolvedAssets, ValueExpr};
use crate::domain::value_objects::Target;

pub struct Swift;

impl Dialect for Swift {
    fn target(&self) -> Target {
        Target::Ios
    }

    fn type_name(&self, ty: &PropertyType) -> String {
        match ty {
            PropertyType::Int => "Int".to_string(),
            PropertyType::Float => "CGFloat".to_string(),
            PropertyType::Bool => "Bool".to_string(),
            PropertyType::String => "String".to_string(),
            PropertyType::Component(name) => name.clone(),
            PropertyType::List(element) => format!("[{}]", self.type_name(element)),
            PropertyType::Asset(_) => FILE_TYPE.to_string(),
        }
    }

    fn literal(&self, expr: &ValueExpr, assets: &ResolvedAssets) -> String {
        match expr {
            ValueExpr::Int(v) => v.to_string(),
            ValueExpr::Float(v) => dialect::float_literal(*v),
            ValueExpr::Bool(v) => v.to_string(),
            ValueExpr::String(v) => swift_string(v),
            ValueExpr::Instance { component, fields } => {
                let args: Vec<String> = fields
                    .iter()
                    .map(|(name, value)| format!("{}: {}", name, self.literal(value, assets)))
                    .collect();
                format!("{}({})", component, args.join(", "))
            }
            ValueExpr::List { items, .. } => {
                let items: Vec<String> = items.iter().map(|i| self.literal(i, assets)).collect();
                format!("[{}]", items.join(", "))
            }
            ValueExpr::Asset(_) => {
                let (src, kind) = dialect::asset_src(assets, expr);
                format!(
                    "{}(src: {}, type: {})",
                    FILE_TYPE,
                    swift_string(&src),
                    swift_string(kind)
                )
            }
        }
    }

    fn artifact_path(&self, settings: &EmitSettings, component: &str) -> PathBuf {
        PathBuf::from("Sources")
            .join(&settings.module)
            .join("Components")
            .join(format!("{}.swift", component))
    }

    fn preamble(&self, _settings: &EmitSettings, component: &ComponentType, imports: &[String]) -> String {
        let mut modules: Vec<&str> = imports.iter().map(String::as_str).collect();
        if component.properties().iter().any(|p| dialect::uses_float(&p.ty))
            && !modules.contains(&"CoreGraphics")
        {
            modules.push("CoreGraphics");
        }

        let mut out = format!("{}\n\n", BANNER);
        for module in modules {
            out.push_str(&format!("import {}\n", module));
        }
        out
    }

    fn blocks(&self, component: &ComponentType, public: bool, assets: &ResolvedAssets) -> Blocks {
        let access = self.access(public);
        let properties = component.properties();

        let declarations: Vec<String> = properties
            .iter()
            .map(|p| {
                let keyword = match (p.updateable, public) {
                    (true, true) => "internal(set) var",
                    (true, false) => "var",
                    (false, _) => "let",
                };
                format!("    {}{} {}: {}", access, keyword, p.name, self.type_name(&p.ty))
            })
            .collect();
        let parameters: Vec<String> = properties
            .iter()
            .map(|p| format!("{}: {}", p.name, self.type_name(&p.ty)))
            .collect();
        let assignments: Vec<String> = properties
            .iter()
            .map(|p| format!("self.{name} = {name}", name = p.name))
            .collect();
        let arguments: Vec<String> = properties
            .iter()
            .map(|p| format!("{}: {}", p.name, self.literal(&p.default, assets)))
            .collect();

        let init = if properties.is_empty() {
            format!("    {}init() {{}}", access)
        } else {
            format!(
                "    {}init(\n{}\n    ) {{\n{}\n    }}",
                access,
                dialect::block(&parameters, 8, ","),
                dialect::block(&assignments, 8, "")
            )
        };
        let factory = if properties.is_empty() {
            format!(
                "    {}static func makeDefault() -> {name} {{\n        return {name}()\n    }}",
                access,
                name = component.name()
            )
        } else {
            format!(
                "    {}static func makeDefault() -> {name} {{\n        return {name}(\n{args}\n        )\n    }}",
                access,
                name = component.name(),
                args = dialect::block(&arguments, 12, ",")
            )
        };

        let mut members = String::new();
        if !declarations.is_empty() {
            members.push_str(&declarations.join("\n"));
            members.push_str("\n\n");
        }
        members.push_str(&init);
        members.push_str("\n\n");
        members.push_str(&factory);

        Blocks {
            declarations: declarations.join("\n"),
            parameters: parameters.join(", "),
            assignments: assignments.join("\n"),
            instantiation: self.literal(&component.default_instance(), assets),
            members,
        }
    }

    fn visibility(&self, public: bool) -> &'static str {
        if public {
            "public "
        } else {
            ""
        }
    }

    fn access(&self, public: bool) -> &'static str {
        self.visibility(public)
    }

    fn class_kind(&self, _component: &ComponentType) -> &'static str {
        "final class"
    }
}
