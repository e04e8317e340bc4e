/*!
 * Typographic quote normalization for free-text database fields.
 */

use once_cell::sync::Lazy;
use regex::Regex;

static DOUBLE_QUOTED_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r#""(.*?)""#).unwrap());

// A single-quoted span must touch whitespace or a string boundary on both sides
static SINGLE_QUOTED_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\s|^)'(.*?)'(\s|$)").unwrap());

/// Replace straight quotes with typographic ones.
///
/// Double-quoted spans become `“…”`, single-quoted spans bounded by
/// whitespace become `‘…’`, and every remaining `'` becomes `’`.
pub fn make_curly(text: &str) -> String {
    let doubled = DOUBLE_QUOTED_REGEX.replace_all(text, "“${1}”");
    let singled = SINGLE_QUOTED_REGEX.replace_all(&doubled, "${1}‘${2}’${3}");
    singled.replace('\'', "’")
}

/// Normalize an optional field, passing missing or empty values through.
pub fn normalize(text: Option<&str>) -> Option<String> {
    match text {
        Some(s) if !s.is_empty() => Some(make_curly(s)),
        Some(s) => Some(s.to_string()),
        None => None,
    }
}
