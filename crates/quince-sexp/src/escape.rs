//! Escaping rules for string and symbol tokens.

/// Renders a string literal: the text wrapped in double quotes, with
/// every `"` and `\` backslash-escaped and nothing else touched.
///
/// The empty string renders as `""`.
pub(crate) fn string_literal(text: &str) -> String {
    if text.is_empty() {
        return "\"\"".to_string();
    }

    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        if c == '"' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

/// Renders a symbol token.
///
/// Reader-significant characters and whitespace are backslash-escaped
/// wherever they occur. A leading digit or leading `.` is also escaped
/// so the token cannot be read back as a number.
pub(crate) fn symbol(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for (i, c) in text.chars().enumerate() {
        if is_reader_significant(c) || (i == 0 && (c.is_ascii_digit() || c == '.')) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn is_reader_significant(c: char) -> bool {
    matches!(c, '#' | '"' | '\'' | '(' | ')' | '[' | ']' | '\\' | '`') || c.is_whitespace()
}
