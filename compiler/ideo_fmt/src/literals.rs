//! Literal rendering back into surface syntax (the inverse of
//! `ideo_lexer::escape::unescape` and the int/float/bool literal grammar).

use ideo_ir::Literal;

#[must_use]
pub(crate) fn fmt_literal(lit: &Literal) -> String {
    match lit {
        Literal::Int(n) => n.to_string(),
        Literal::Float(f) => fmt_float(*f),
        Literal::Bool(true) => "⊤".to_owned(),
        Literal::Bool(false) => "⊥".to_owned(),
        Literal::Str(s) => fmt_string(s),
        Literal::Char(c) => fmt_char(*c),
        Literal::Unit => "()".to_owned(),
    }
}

/// The lexer's float rule is `[0-9]+\.[0-9]+` — an integral value still
/// needs an explicit `.0` or it would re-lex as an int literal instead.
fn fmt_float(value: f64) -> String {
    let text = format!("{value}");
    if text.contains('.') {
        text
    } else {
        format!("{text}.0")
    }
}

fn fmt_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    escape_into(value, &mut out, '"');
    out.push('"');
    out
}

fn fmt_char(value: char) -> String {
    let mut out = String::with_capacity(3);
    out.push('\'');
    escape_into(&value.to_string(), &mut out, '\'');
    out.push('\'');
    out
}

fn escape_into(value: &str, out: &mut String, delimiter: char) {
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == delimiter => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_float_keeps_a_decimal_point() {
        assert_eq!(fmt_float(3.0), "3.0");
    }

    #[test]
    fn booleans_render_as_the_surface_glyphs() {
        assert_eq!(fmt_literal(&Literal::Bool(true)), "⊤");
        assert_eq!(fmt_literal(&Literal::Bool(false)), "⊥");
    }

    #[test]
    fn strings_escape_their_own_delimiter() {
        assert_eq!(fmt_string("a\"b"), "\"a\\\"b\"");
    }

    #[test]
    fn chars_escape_their_own_delimiter() {
        assert_eq!(fmt_char('\''), "'\\''");
    }

    #[test]
    fn unit_renders_as_empty_parens() {
        assert_eq!(fmt_literal(&Literal::Unit), "()");
    }
}
