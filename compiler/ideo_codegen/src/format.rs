//! Literal rendering: turning a parsed literal value into the exact text
//! that belongs in the generated source (§4.9 Determinism — the same
//! literal always renders to the same text, independent of host platform
//! float-printing quirks).

use ideo_ir::{Literal, Span};

/// Render a whole `Literal` node the way it should read in emitted text.
#[must_use]
pub(crate) fn literal_expr(lit: &Literal) -> String {
    match lit {
        Literal::Int(n) => n.to_string(),
        Literal::Float(f) => float_literal(*f),
        Literal::Bool(b) => b.to_string(),
        Literal::Str(s) => string_literal(s),
        Literal::Char(c) => char_literal(*c),
        Literal::Unit => "undefined".to_owned(),
    }
}

/// Render a `Span` as a plain JS object literal, for test metadata
/// (§4.9 Test metadata).
#[must_use]
pub(crate) fn span_expr(span: Span) -> String {
    format!(
        "{{ start: {{ line: {}, column: {} }}, end: {{ line: {}, column: {} }} }}",
        span.start.line, span.start.column, span.end.line, span.end.column
    )
}

/// Render a float the way JavaScript's own number literals read, while
/// guaranteeing a value that round-trips exactly: integral floats still
/// need a trailing `.0`-equivalent marker so `1.0` isn't emitted as the
/// integer-looking `1`. JavaScript has only one number type, so `1` and
/// `1.0` are the same value — emitting `1.0` as `1` would still be
/// correct, but `Number("1")` in generated code reading the literal back
/// wouldn't distinguish the two. We keep the decimal point explicit.
#[must_use]
pub(crate) fn float_literal(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_owned();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity".to_owned() } else { "-Infinity".to_owned() };
    }
    let text = format!("{value}");
    if text.contains('.') || text.contains('e') || text.contains('E') {
        text
    } else {
        format!("{text}.0")
    }
}

/// Escape a string literal's contents for a double-quoted JS string.
#[must_use]
pub(crate) fn string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// A character literal has no dedicated target type; it's emitted as a
/// one-codepoint string.
#[must_use]
pub(crate) fn char_literal(value: char) -> String {
    string_literal(&value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ideo_ir::SourcePoint;

    #[test]
    fn literal_expr_renders_unit_as_undefined() {
        assert_eq!(literal_expr(&Literal::Unit), "undefined");
    }

    #[test]
    fn span_expr_renders_start_and_end() {
        let span = Span::new(SourcePoint::new(1, 1, 0), SourcePoint::new(1, 5, 4));
        assert_eq!(span_expr(span), "{ start: { line: 1, column: 1 }, end: { line: 1, column: 5 } }");
    }

    #[test]
    fn integral_floats_keep_a_decimal_point() {
        assert_eq!(float_literal(4.0), "4.0");
    }

    #[test]
    fn fractional_floats_render_plainly() {
        assert_eq!(float_literal(2.5), "2.5");
    }

    #[test]
    fn strings_escape_quotes_and_backslashes() {
        assert_eq!(string_literal("a\"b\\c"), "\"a\\\"b\\\\c\"");
    }

    #[test]
    fn strings_escape_newlines() {
        assert_eq!(string_literal("a\nb"), "\"a\\nb\"");
    }

    #[test]
    fn char_literal_is_a_one_codepoint_string() {
        assert_eq!(char_literal('x'), "\"x\"");
    }
}
