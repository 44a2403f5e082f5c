use crate::error::{MadobeError, Result};
use crate::value::FormValue;

/// Escape the four HTML-unsafe characters: `&` `<` `>` `"`.
///
/// The single quote is intentionally left alone: generated widget markup
/// always wraps attribute values in double quotes, and templates rely on
/// `'` passing through unchanged.
///
/// ```rust
/// assert_eq!(madobe::escape("abc"), "abc");
/// assert_eq!(madobe::escape("&<>\"'"), "&amp;&lt;&gt;&quot;'");
/// ```
pub fn escape(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '"' => output.push_str("&quot;"),
            _ => output.push(c),
        }
    }
    output
}

/// Escape a runtime value for HTML output.
///
/// `Null` maps to the empty string by contract, not by accident. Every
/// other non-string category is a type error at the caller's boundary.
pub fn escape_value(value: &FormValue) -> Result<String> {
    match value {
        FormValue::Null => Ok(String::new()),
        FormValue::Str(s) => Ok(escape(s)),
        other => Err(MadobeError::TypeError {
            message: format!("cannot escape {}", other.type_name()),
        }),
    }
}

/// Derive an HTML-safe element id from a field name: underscores become
/// hyphens.
pub fn html_id(name: &str) -> String {
    name.replace('_', "-")
}
