//! Column comment hints
//!
//! A column whose storage type is not self-describing carries a hint of the
//! form `(EnumType:<name>)` in its comment. Introspection reads it back to
//! find the registered type name.
//!
//! Inside the hint, `\`, `)` and line breaks in the name are escaped with a
//! backslash, so any registry key survives the trip through a one-line
//! comment.

pub const TYPE_HINT_PREFIX: &str = "(EnumType:";

/// Build the comment hint for a registered type name
pub fn format_type_hint(type_name: &str) -> String {
    let mut hint = String::with_capacity(TYPE_HINT_PREFIX.len() + type_name.len() + 1);
    hint.push_str(TYPE_HINT_PREFIX);
    for c in type_name.chars() {
        match c {
            '\\' => hint.push_str("\\\\"),
            ')' => hint.push_str("\\)"),
            '\n' => hint.push_str("\\n"),
            '\r' => hint.push_str("\\r"),
            c => hint.push(c),
        }
    }
    hint.push(')');
    hint
}

/// Extract the registered type name from a column comment
///
/// The hint may be surrounded by other comment text. Returns `None` when the
/// comment carries no hint, the hint is unterminated, or the name is empty.
pub fn parse_type_hint(comment: &str) -> Option<String> {
    let start = comment.find(TYPE_HINT_PREFIX)? + TYPE_HINT_PREFIX.len();
    let mut name = String::new();
    let mut chars = comment[start..].chars();
    while let Some(c) = chars.next() {
        match c {
            ')' => return (!name.is_empty()).then_some(name),
            '\\' => match chars.next()? {
                'n' => name.push('\n'),
                'r' => name.push('\r'),
                escaped => name.push(escaped),
            },
            c => name.push(c),
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_type_hint() {
        assert_eq!(format_type_hint("gender"), "(EnumType:gender)");
    }

    #[test]
    fn test_parse_type_hint_roundtrip() {
        let hint = format_type_hint("Action");
        assert_eq!(parse_type_hint(&hint).as_deref(), Some("Action"));
    }

    #[test]
    fn test_parse_type_hint_with_surrounding_text() {
        assert_eq!(
            parse_type_hint("user gender (EnumType:gender) required").as_deref(),
            Some("gender")
        );
    }

    #[test]
    fn test_parse_type_hint_missing() {
        assert_eq!(parse_type_hint("plain comment"), None);
        assert_eq!(parse_type_hint("(EnumType:)"), None);
        assert_eq!(parse_type_hint("(EnumType:unterminated"), None);
        assert_eq!(parse_type_hint("(EnumType:dangling\\"), None);
    }

    #[test]
    fn test_awkward_keys_survive() {
        for key in ["gender(v2)", "a)b", "back\\slash", "two\nlines\r", " padded ", "x\\)"] {
            let hint = format_type_hint(key);
            assert!(!hint.contains('\n') && !hint.contains('\r'));
            assert_eq!(parse_type_hint(&hint).as_deref(), Some(key), "key {:?}", key);
        }
    }

    #[test]
    fn test_escaped_paren_in_hint() {
        assert_eq!(format_type_hint("gender(v2)"), "(EnumType:gender(v2\\))");
        assert_eq!(
            parse_type_hint("-- note (EnumType:gender(v2\\)) more").as_deref(),
            Some("gender(v2)")
        );
    }
}
