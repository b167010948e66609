use crate::error::{Error, Result};
use crate::number::format_f64;
use crate::value::Key;

pub fn format_null() -> &'static str {
    "null"
}

pub fn format_bool(b: bool) -> &'static str {
    if b { "true" } else { "false" }
}

pub fn format_int(i: i64) -> String {
    i.to_string()
}

/// Decimal text for a finite float; NaN and the infinities are rejected.
pub fn format_float(f: f64) -> Result<String> {
    format_f64(f).ok_or_else(|| Error::UnsupportedValue(format!("non-finite float {}", f)))
}

fn escape_for(ch: char) -> Option<&'static str> {
    match ch {
        '\\' => Some("\\\\"),
        '/' => Some("\\/"),
        '\n' => Some("\\n"),
        '\t' => Some("\\t"),
        '\r' => Some("\\r"),
        '\u{8}' => Some("\\b"),
        '\u{c}' => Some("\\f"),
        '"' => Some("\\\""),
        '\0' => Some("\\u0000"),
        _ => None,
    }
}

/// Quotes `s`, substituting only the fixed escape table. Every other
/// character, control or not, is copied through.
pub fn escape_and_quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    let mut plain = 0;
    for (i, ch) in s.char_indices() {
        if let Some(esc) = escape_for(ch) {
            out.push_str(&s[plain..i]);
            out.push_str(esc);
            plain = i + ch.len_utf8();
        }
    }
    out.push_str(&s[plain..]);
    out.push('"');
    out
}

/// Keys are coerced to their string form, then quoted like any string.
pub fn format_key(key: &Key) -> String {
    match key {
        Key::Index(i) => escape_and_quote(&format_int(*i)),
        Key::Name(s) => escape_and_quote(s),
    }
}
