//! TypeScript vocabulary

use std::path::PathBuf;

use super::dialect::{self, Blocks, Dialect, BANNER, FILE_TYPE};
use super::escaping::typescript_string;
use super::EmitSettings;
use crate::domain::entities::{ComponentType, PropertyType, ResolvedAssets, ValueExpr};
use crate::domain::value_objects::Target;

pub struct TypeScript;

impl Dialect for TypeScript {
    fn target(&self) -> Target {
        Target::Web
    }

    fn type_name(&self, ty: &PropertyType) -> String {
        match ty {
            PropertyType::Int | PropertyType::Float => "number".to_string(),
            PropertyType::Bool => "boolean".to_string(),
            PropertyType::String => "string".to_string(),
            PropertyType::Component(name) => name.clone(),
            PropertyType::List(element) => format!("{}[]", self.type_name(element)),
            PropertyType::Asset(_) => FILE_TYPE.to_string(),
        }
    }

    fn literal(&self, expr: &ValueExpr, assets: &ResolvedAssets) -> String {
        match expr {
            ValueExpr::Int(v) => v.to_string(),
            ValueExpr::Float(v) => dialect::float_literal(*v),
            ValueExpr::Bool(v) => v.to_string(),
            ValueExpr::String(v) => typescript_string(v),
            // Constructor arguments are positional, in canonical property order
            ValueExpr::Instance { component, fields } => {
                let args: Vec<String> = fields
                    .iter()
                    .map(|(_, value)| self.literal(value, assets))
                    .collect();
                format!("new {}({})", component, args.join(", "))
            }
            ValueExpr::List { items, .. } => {
                let items: Vec<String> = items.iter().map(|i| self.literal(i, assets)).collect();
                format!("[{}]", items.join(", "))
            }
            ValueExpr::Asset(_) => {
                let (src, kind) = dialect::asset_src(assets, expr);
                format!(
                    "new {}({}, {})",
                    FILE_TYPE,
                    typescript_string(&src),
                    typescript_string(kind)
                )
            }
        }
    }

    fn artifact_path(&self, _settings: &EmitSettings, component: &str) -> PathBuf {
        PathBuf::from("src").join(format!("{}.ts", component))
    }

    fn preamble(&self, _settings: &EmitSettings, component: &ComponentType, imports: &[String]) -> String {
        // Nested defaults are constructed inline, so their types need imports too
        let mut lines: Vec<String> = dialect::literal_types(component)
            .into_iter()
            .filter(|name| name != component.name())
            .map(|name| format!("import {{ {name} }} from './{name}';"))
            .collect();
        lines.extend(imports.iter().map(|clause| format!("import {};", clause)));

        let mut out = format!("{}\n", BANNER);
        if !lines.is_empty() {
            out.push('\n');
            out.push_str(&lines.join("\n"));
            out.push('\n');
        }
        out
    }

    fn blocks(&self, component: &ComponentType, _public: bool, assets: &ResolvedAssets) -> Blocks {
        let properties = component.properties();

        let declarations: Vec<String> = properties
            .iter()
            .map(|p| {
                let modifier = if p.updateable { "public" } else { "public readonly" };
                format!("{} {}: {}", modifier, p.name, self.type_name(&p.ty))
            })
            .collect();
        let parameters: Vec<String> = properties
            .iter()
            .map(|p| format!("{}: {}", p.name, self.type_name(&p.ty)))
            .collect();
        let arguments: Vec<String> = properties
            .iter()
            .map(|p| self.literal(&p.default, assets))
            .collect();

        let constructor = if declarations.is_empty() {
            "  constructor() {}".to_string()
        } else {
            format!("  constructor(\n{},\n  ) {{}}", dialect::block(&declarations, 4, ","))
        };
        let construction = if arguments.is_empty() {
            format!("new {}()", component.name())
        } else {
            format!(
                "new {}(\n{},\n    )",
                component.name(),
                dialect::block(&arguments, 6, ",")
            )
        };
        let members = format!(
            "{}\n\n  static makeDefault(): {} {{\n    return {};\n  }}",
            constructor,
            component.name(),
            construction
        );

        Blocks {
            declarations: declarations.join(",\n"),
            parameters: parameters.join(", "),
            // Parameter properties need no assignments
            assignments: String::new(),
            instantiation: self.literal(&component.default_instance(), assets),
            members,
        }
    }

    fn visibility(&self, public: bool) -> &'static str {
        if public {
            "export "
        } else {
            "/** @internal */\nexport "
        }
    }

    fn access(&self, _public: bool) -> &'static str {
        ""
    }

    fn class_kind(&self, _component: &ComponentType) -> &'static str {
        "class"
    }
}
