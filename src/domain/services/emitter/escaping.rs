//! String literal escaping for each target language

/// Escape the characters every target treats specially in a double-quoted
/// literal; remaining control characters go through `unicode`.
fn escape_common(s: &str, unicode: fn(char) -> String, out: &mut String) {
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&unicode(c)),
            other => out.push(other),
        }
    }
}

fn braced_unicode(c: char) -> String {
    format!("\\u{{{:x}}}", c as u32)
}

fn fixed_unicode(c: char) -> String {
    format!("\\u{:04x}", c as u32)
}

/// Swift string literal; `\(` would start an interpolation
pub fn swift_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    escape_common(s, braced_unicode, &mut out);
    out.push('"');
    out
}

/// Kotlin string literal; `$` would start a template
pub fn kotlin_string(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    escape_common(s, fixed_unicode, &mut escaped);
    format!("\"{}\"", escaped.replace('$', "\\$"))
}

/// TypeScript string literal
pub fn typescript_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    escape_common(s, fixed_unicode, &mut out);
    out.push('"');
    out
}
