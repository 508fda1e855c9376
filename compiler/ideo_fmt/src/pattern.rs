//! Pattern rendering, the inverse of `ideo_parse::patterns::parse_pattern`.
//!
//! Unlike expressions, patterns have no operator precedence to protect —
//! every pattern form is already fully delimited by its own brackets or a
//! leading keyword/sigil, so no extra parenthesization is ever needed.

use ideo_ir::{Pattern, PatternKind, StringInterner};

use crate::literals::fmt_literal;

#[must_use]
pub(crate) fn fmt_pattern(interner: &StringInterner, pattern: &Pattern) -> String {
    match &pattern.kind {
        PatternKind::Wildcard => "_".to_owned(),
        PatternKind::Ident(name) => interner.resolve(*name).to_owned(),
        PatternKind::Literal(lit) => fmt_literal(lit),
        PatternKind::Constructor { name, args } => {
            let name = interner.resolve(*name);
            if args.is_empty() {
                name.to_owned()
            } else {
                format!("{name}({})", args.iter().map(|a| fmt_pattern(interner, a)).collect::<Vec<_>>().join(", "))
            }
        }
        PatternKind::ListEmpty => "[]".to_owned(),
        PatternKind::ListCons { head, rest, tail } => {
            let mut parts: Vec<String> = head.iter().map(|p| fmt_pattern(interner, p)).collect();
            if let Some(rest) = rest {
                parts.push(format!("⧺{}", fmt_pattern(interner, rest)));
            }
            parts.extend(tail.iter().map(|p| fmt_pattern(interner, p)));
            format!("[{}]", parts.join(", "))
        }
        PatternKind::Record(fields) => format!(
            "{{{}}}",
            fields
                .iter()
                .map(|(name, p)| format!("{}: {}", interner.resolve(*name), fmt_pattern(interner, p)))
                .collect::<Vec<_>>()
                .join(", ")
        ),
        PatternKind::Tuple(elems) => {
            format!("({})", elems.iter().map(|p| fmt_pattern(interner, p)).collect::<Vec<_>>().join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ideo_ir::Span;

    fn pat(kind: PatternKind) -> Pattern {
        Pattern { kind, span: Span::default() }
    }

    #[test]
    fn wildcard_renders_as_underscore() {
        let interner = StringInterner::new();
        assert_eq!(fmt_pattern(&interner, &pat(PatternKind::Wildcard)), "_");
    }

    #[test]
    fn nullary_constructor_has_no_parens() {
        let mut interner = StringInterner::new();
        let none = interner.intern("None");
        assert_eq!(fmt_pattern(&interner, &pat(PatternKind::Constructor { name: none, args: vec![] })), "None");
    }

    #[test]
    fn list_cons_places_the_rest_marker_between_head_and_tail() {
        let mut interner = StringInterner::new();
        let x = interner.intern("x");
        let rest = interner.intern("rest");
        let y = interner.intern("y");
        let pattern = pat(PatternKind::ListCons {
            head: vec![pat(PatternKind::Ident(x))],
            rest: Some(Box::new(pat(PatternKind::Ident(rest)))),
            tail: vec![pat(PatternKind::Ident(y))],
        });
        assert_eq!(fmt_pattern(&interner, &pattern), "[x, ⧺rest, y]");
    }
}
