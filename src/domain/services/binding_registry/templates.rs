//! Handlebars engine setup and the class skeleton shared by generic and
//! standard library bindings.
//!
//! Templates receive pre-rendered blocks (`preamble`, `declarations`,
//! `members`, ...) so that a binding only spells out what differs from the
//! structural class. Output is source code, so HTML escaping is disabled.

use convert_case::{Case, Casing};
use handlebars::{handlebars_helper, no_escape, Handlebars};

use crate::domain::value_objects::Target;

handlebars_helper!(pascal_case: |s: str| s.to_case(Case::Pascal));
handlebars_helper!(camel_case: |s: str| s.to_case(Case::Camel));
handlebars_helper!(snake_case: |s: str| s.to_case(Case::Snake));
handlebars_helper!(indent: |s: str, width: u64| indent_lines(s, width as usize));

/// Engine with the casing helpers registered
pub fn engine() -> Handlebars<'static> {
    let mut handlebars = Handlebars::new();
    handlebars.set_strict_mode(true);
    handlebars.register_escape_fn(no_escape);
    handlebars.register_helper("pascal_case", Box::new(pascal_case));
    handlebars.register_helper("camel_case", Box::new(camel_case));
    handlebars.register_helper("snake_case", Box::new(snake_case));
    handlebars.register_helper("indent", Box::new(indent));
    handlebars
}

const SWIFT_OPEN: &str =
    "{{{preamble}}}\n{{visibility}}{{kind}} {{component}}: Decodable {\n{{{members}}}\n";
const KOTLIN_OPEN: &str =
    "{{{preamble}}}\n{{visibility}}{{kind}} {{component}}(\n{{{declarations}}}\n) {\n{{{members}}}\n";
const TYPESCRIPT_OPEN: &str = "{{{preamble}}}\n{{visibility}}{{kind}} {{component}} {\n{{{members}}}\n";

/// Structural class template for `target` with `extra` spliced in before the
/// closing brace. `extra` is itself handlebars source.
pub fn class_template(target: Target, extra: &str) -> String {
    let open = match target {
        Target::Ios => SWIFT_OPEN,
        Target::Android => KOTLIN_OPEN,
        Target::Web => TYPESCRIPT_OPEN,
    };
    format!("{}{}}}\n", open, extra)
}

/// Prefix every non-blank line with `width` spaces
pub fn indent_lines(text: &str, width: usize) -> String {
    let pad = " ".repeat(width);
    text.lines()
        .map(|line| {
            if line.trim().is_empty() {
                String::new()
            } else {
                format!("{}{}", pad, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
