//! Identifier rules shared by every target
//!
//! Names pass through to Swift, Kotlin and TypeScript unchanged, so a name
//! must be an identifier and must not be a keyword in any of them.

/// Component names the generated runtimes define themselves
pub const RESERVED_COMPONENTS: &[&str] = &["File"];

/// Keywords of at least one target language
const KEYWORDS: &[&str] = &[
    "as", "associatedtype", "break", "case", "catch", "class", "const", "continue", "default",
    "defer", "deinit", "delete", "do", "else", "enum", "export", "extends", "extension", "false",
    "fileprivate", "finally", "for", "fun", "func", "function", "guard", "if", "implements",
    "import", "in", "init", "inout", "instanceof", "interface", "internal", "is", "let", "new",
    "nil", "null", "object", "operator", "package", "private", "protocol", "protected", "public",
    "repeat", "rethrows", "return", "self", "Self", "static", "struct", "subscript", "super",
    "switch", "this", "throw", "throws", "true", "try", "typealias", "typeof", "val", "var",
    "void", "when", "where", "while", "with", "yield",
];

pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

pub fn is_keyword(name: &str) -> bool {
    KEYWORDS.contains(&name)
}

/// Usable as a property name on every target
pub fn is_valid_property(name: &str) -> bool {
    is_identifier(name) && !is_keyword(name)
}

/// Usable as a user component type name
pub fn is_valid_component(name: &str) -> bool {
    is_valid_property(name) && !RESERVED_COMPONENTS.contains(&name)
}
