//! Literal and comment encoding

use serde::{Deserialize, Serialize};

/// How values destined for string literals are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LiteralPolicy {
    /// Escape quotes, backslashes and control characters
    #[default]
    Escape,
    /// Refuse values that would need escaping
    Reject,
}

/// Encode `value` as a double-quoted string literal
///
/// # Examples
///
/// ```
/// use authforge::codegen::quote;
///
/// assert_eq!(quote("/sign-up/email"), r#""/sign-up/email""#);
/// assert_eq!(quote(r#"say "hi""#), r#""say \"hi\"""#);
/// ```
#[must_use]
pub fn quote(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

/// Whether `value` would need escaping inside a string literal
#[must_use]
pub fn needs_escaping(value: &str) -> bool {
    value.chars().any(|c| matches!(c, '"' | '\\') || is_line_break(c))
}

/// Fold line terminators so the text stays on a single comment line
#[must_use]
pub fn line_comment_text(text: &str) -> String {
    text.chars()
        .map(|c| if is_line_break(c) { ' ' } else { c })
        .collect::<String>()
        .trim_end()
        .to_string()
}

/// Make text safe inside a `/** ... */` block
#[must_use]
pub fn doc_comment_text(text: &str) -> String {
    text.replace("*/", "*\\/")
}

const fn is_line_break(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}
