//! Pattern lowering: turning one `Pattern` node and the JS expression that
//! holds the value being matched into (a) a boolean test and (b) the
//! `const` bindings its identifiers introduce.
//!
//! This is a structural walk, not a decision-tree compilation — the same
//! simplification `ideo_patterns`' own exhaustiveness checker makes,
//! since there's no redundant-arm analysis or sharing of sub-tests across
//! arms to be had here either. Each arm compiles independently.

use ideo_ir::{Pattern, PatternKind, StringInterner};

use crate::format::literal_expr;

/// Everything one pattern contributes to its enclosing `if`: the
/// conjunction of structural tests it requires, and the bindings it
/// introduces once those tests pass.
#[derive(Default)]
pub(crate) struct Lowered {
    pub(crate) tests: Vec<String>,
    pub(crate) bindings: Vec<(String, String)>,
}

impl Lowered {
    #[must_use]
    pub(crate) fn test_expr(&self) -> String {
        if self.tests.is_empty() {
            "true".to_owned()
        } else {
            self.tests.join(" && ")
        }
    }
}

#[must_use]
pub(crate) fn lower(interner: &StringInterner, pattern: &Pattern, value_expr: &str) -> Lowered {
    let mut out = Lowered::default();
    collect(interner, pattern, value_expr, &mut out);
    out
}

fn collect(interner: &StringInterner, pattern: &Pattern, value_expr: &str, out: &mut Lowered) {
    match &pattern.kind {
        PatternKind::Wildcard => {}
        PatternKind::Ident(name) => {
            out.bindings.push((interner.resolve(*name).to_owned(), value_expr.to_owned()));
        }
        PatternKind::Literal(ideo_ir::Literal::Unit) => {}
        PatternKind::Literal(lit) => {
            out.tests.push(format!("{value_expr} === {}", literal_expr(lit)));
        }
        PatternKind::Constructor { name, args } => {
            let tag = crate::format::string_literal(interner.resolve(*name));
            out.tests.push(format!("{value_expr}.tag === {tag}"));
            for (i, arg) in args.iter().enumerate() {
                collect(interner, arg, &format!("{value_expr}.fields[{i}]"), out);
            }
        }
        PatternKind::ListEmpty => {
            out.tests.push(format!("{value_expr}.length === 0"));
        }
        PatternKind::ListCons { head, rest, tail } => {
            let min_len = head.len() + tail.len();
            if rest.is_some() {
                out.tests.push(format!("{value_expr}.length >= {min_len}"));
            } else {
                out.tests.push(format!("{value_expr}.length === {min_len}"));
            }
            for (i, p) in head.iter().enumerate() {
                collect(interner, p, &format!("{value_expr}[{i}]"), out);
            }
            for (i, p) in tail.iter().enumerate() {
                collect(
                    interner,
                    p,
                    &format!("{value_expr}[{value_expr}.length - {} + {i}]", tail.len()),
                    out,
                );
            }
            if let Some(rest_pattern) = rest {
                collect(
                    interner,
                    rest_pattern,
                    &format!("{value_expr}.slice({}, {value_expr}.length - {})", head.len(), tail.len()),
                    out,
                );
            }
        }
        PatternKind::Record(fields) => {
            for (name, sub) in fields {
                collect(interner, sub, &format!("{value_expr}.{}", interner.resolve(*name)), out);
            }
        }
        PatternKind::Tuple(elems) => {
            for (i, sub) in elems.iter().enumerate() {
                collect(interner, sub, &format!("{value_expr}[{i}]"), out);
            }
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
    fn wildcard_produces_no_tests_or_bindings() {
        let interner = StringInterner::new();
        let lowered = lower(&interner, &pat(PatternKind::Wildcard), "v");
        assert_eq!(lowered.test_expr(), "true");
        assert!(lowered.bindings.is_empty());
    }

    #[test]
    fn ident_binds_the_whole_value() {
        let mut interner = StringInterner::new();
        let x = interner.intern("x");
        let lowered = lower(&interner, &pat(PatternKind::Ident(x)), "v");
        assert_eq!(lowered.bindings, vec![("x".to_owned(), "v".to_owned())]);
    }

    #[test]
    fn literal_pattern_tests_strict_equality() {
        let interner = StringInterner::new();
        let lowered = lower(&interner, &pat(PatternKind::Literal(ideo_ir::Literal::Int(3))), "v");
        assert_eq!(lowered.test_expr(), "v === 3");
    }

    #[test]
    fn constructor_pattern_tests_the_tag_and_destructures_fields() {
        let mut interner = StringInterner::new();
        let some = interner.intern("Some");
        let x = interner.intern("x");
        let pattern = pat(PatternKind::Constructor { name: some, args: vec![pat(PatternKind::Ident(x))] });
        let lowered = lower(&interner, &pattern, "v");
        assert_eq!(lowered.test_expr(), "v.tag === \"Some\"");
        assert_eq!(lowered.bindings, vec![("x".to_owned(), "v.fields[0]".to_owned())]);
    }

    #[test]
    fn list_cons_with_open_rest_binds_head_rest_and_tail() {
        let mut interner = StringInterner::new();
        let x = interner.intern("x");
        let rest = interner.intern("rest");
        let pattern = pat(PatternKind::ListCons {
            head: vec![pat(PatternKind::Ident(x))],
            rest: Some(Box::new(pat(PatternKind::Ident(rest)))),
            tail: vec![],
        });
        let lowered = lower(&interner, &pattern, "v");
        assert_eq!(lowered.test_expr(), "v.length >= 1");
        assert_eq!(
            lowered.bindings,
            vec![("x".to_owned(), "v[0]".to_owned()), ("rest".to_owned(), "v.slice(1, v.length - 0)".to_owned())]
        );
    }

    #[test]
    fn tuple_pattern_destructures_by_index() {
        let mut interner = StringInterner::new();
        let a = interner.intern("a");
        let b = interner.intern("b");
        let pattern = pat(PatternKind::Tuple(vec![pat(PatternKind::Ident(a)), pat(PatternKind::Ident(b))]));
        let lowered = lower(&interner, &pattern, "v");
        assert_eq!(lowered.bindings, vec![("a".to_owned(), "v[0]".to_owned()), ("b".to_owned(), "v[1]".to_owned())]);
    }
}
