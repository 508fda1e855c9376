//! Pattern exhaustiveness checking over the union of a match expression's
//! arms (§4.6.1).
//!
//! This is a structural-induction walk over arm patterns, not a decision-
//! tree compilation: each scrutinee shape has a small, fixed rule for what
//! "covered" means, and the checker accumulates the shapes no arm covers.
//! That's enough for the constructs a match can scrutinize here (lists,
//! tuples, records, sum constructors) — there's no nested-pattern matrix to
//! compile, and no redundant-arm analysis, since neither is asked for.
//!
//! A boolean scrutinee is never checked here: rejecting `𝔹` matches is a
//! canonical-form rule, enforced earlier in the pipeline, not a type error.

use ideo_ir::{Name, Pattern, PatternKind, StringInterner};
use rustc_hash::FxHashSet;

/// What a match's scrutinee type looks like, from the checker's point of
/// view. The caller (the type checker, which owns the type registry) picks
/// the shape; this crate only knows how to judge coverage of it.
#[derive(Clone, Debug)]
pub enum ScrutineeShape {
    /// A type with no enumerable set of values a pattern could exhaust
    /// structurally (`ℤ`, `ℝ`, `𝕊`, `ℂ`): only a catch-all covers it.
    Infinite,
    /// A tuple or record type: binding every position or field in one arm
    /// covers the whole type, no further casework needed.
    Product,
    /// `[T]`: covered once some arm matches `[]` and, for every length a
    /// fixed-arity arm doesn't cover exactly, some arm with an open rest
    /// covers it and everything past it.
    List,
    /// A sum type with a fixed, named set of variants.
    Sum { variants: Vec<Name> },
}

/// The result of checking one match expression.
#[derive(Clone, Debug, Default)]
pub struct ExhaustivenessReport {
    pub exhaustive: bool,
    /// Human-readable shapes no arm covers, in the order discovered.
    pub missing: Vec<String>,
}

fn is_catch_all(pattern: &Pattern) -> bool {
    matches!(pattern.kind, PatternKind::Wildcard | PatternKind::Ident(_))
}

/// Check whether `arms`, in order, cover every value of `shape`.
#[tracing::instrument(skip(arms, interner))]
#[must_use]
pub fn check(shape: &ScrutineeShape, arms: &[Pattern], interner: &StringInterner) -> ExhaustivenessReport {
    if arms.iter().any(is_catch_all) {
        return ExhaustivenessReport { exhaustive: true, missing: Vec::new() };
    }

    let missing = match shape {
        ScrutineeShape::Infinite => vec!["a value not matched by any literal arm".to_owned()],
        ScrutineeShape::Product => {
            let covered = arms.iter().any(|p| matches!(p.kind, PatternKind::Tuple(_) | PatternKind::Record(_)));
            if covered {
                Vec::new()
            } else {
                vec!["a pattern binding every position or field".to_owned()]
            }
        }
        ScrutineeShape::Sum { variants } => missing_variants(variants, arms, interner),
        ScrutineeShape::List => missing_list_shapes(arms),
    };

    ExhaustivenessReport { exhaustive: missing.is_empty(), missing }
}

fn missing_variants(variants: &[Name], arms: &[Pattern], interner: &StringInterner) -> Vec<String> {
    let covered: FxHashSet<Name> = arms
        .iter()
        .filter_map(|p| match &p.kind {
            PatternKind::Constructor { name, .. } => Some(*name),
            _ => None,
        })
        .collect();
    variants
        .iter()
        .filter(|v| !covered.contains(v))
        .map(|v| interner.resolve(*v).to_owned())
        .collect()
}

fn describe_len(len: usize) -> String {
    match len {
        1 => "single-element list".to_owned(),
        n => format!("{n}-element list"),
    }
}

fn missing_list_shapes(arms: &[Pattern]) -> Vec<String> {
    let has_empty = arms.iter().any(|p| matches!(p.kind, PatternKind::ListEmpty));

    // (minimum length this arm requires, whether it leaves a rest open to
    // absorb any further elements).
    let cons_arms: Vec<(usize, bool)> = arms
        .iter()
        .filter_map(|p| match &p.kind {
            PatternKind::ListCons { head, rest, tail } => Some((head.len() + tail.len(), rest.is_some())),
            _ => None,
        })
        .collect();

    let open_threshold = cons_arms.iter().filter(|(_, has_rest)| *has_rest).map(|(min, _)| *min).min();

    let mut missing = Vec::new();
    if !has_empty {
        missing.push("[]".to_owned());
    }

    let scan_bound = open_threshold.unwrap_or_else(|| cons_arms.iter().map(|(min, _)| *min).max().unwrap_or(0) + 1);
    for len in 1..scan_bound {
        let covered =
            cons_arms.iter().any(|(min, has_rest)| if *has_rest { *min <= len } else { *min == len });
        if !covered {
            missing.push(describe_len(len));
        }
    }
    if open_threshold.is_none() {
        missing.push("lists longer than any arm checks for".to_owned());
    }
    missing
}

#[cfg(test)]
mod tests {
    use super::*;
    use ideo_ir::Span;

    fn wildcard() -> Pattern {
        Pattern { kind: PatternKind::Wildcard, span: Span::default() }
    }

    fn list_empty() -> Pattern {
        Pattern { kind: PatternKind::ListEmpty, span: Span::default() }
    }

    fn list_cons(head: usize, tail: usize, has_rest: bool) -> Pattern {
        let mut interner = StringInterner::new();
        let rest = has_rest.then(|| Box::new(Pattern { kind: PatternKind::Ident(interner.intern("rest")), span: Span::default() }));
        Pattern {
            kind: PatternKind::ListCons {
                head: (0..head).map(|_| wildcard()).collect(),
                rest,
                tail: (0..tail).map(|_| wildcard()).collect(),
            },
            span: Span::default(),
        }
    }

    #[test]
    fn catch_all_makes_any_shape_exhaustive() {
        let interner = StringInterner::new();
        let report = check(&ScrutineeShape::Infinite, &[wildcard()], &interner);
        assert!(report.exhaustive);
        assert!(report.missing.is_empty());
    }

    #[test]
    fn list_missing_empty_and_single_element_matches_the_worked_example() {
        // xs { [x, y ⧺ rest] → x + y }
        let interner = StringInterner::new();
        let arms = vec![list_cons(2, 0, true)];
        let report = check(&ScrutineeShape::List, &arms, &interner);
        assert!(!report.exhaustive);
        assert_eq!(report.missing, vec!["[]".to_owned(), "single-element list".to_owned()]);
    }

    #[test]
    fn list_empty_plus_open_rest_is_exhaustive() {
        let interner = StringInterner::new();
        let arms = vec![list_empty(), list_cons(1, 0, true)];
        let report = check(&ScrutineeShape::List, &arms, &interner);
        assert!(report.exhaustive);
    }

    #[test]
    fn sum_reports_uncovered_variant_names() {
        let mut interner = StringInterner::new();
        let some = interner.intern("Some");
        let none = interner.intern("None");
        let covered_arm = Pattern {
            kind: PatternKind::Constructor { name: some, args: vec![wildcard()] },
            span: Span::default(),
        };
        let report = check(&ScrutineeShape::Sum { variants: vec![some, none] }, &[covered_arm], &interner);
        assert!(!report.exhaustive);
        assert_eq!(report.missing, vec!["None".to_owned()]);
    }

    #[test]
    fn product_needs_one_full_pattern() {
        let interner = StringInterner::new();
        let tuple_arm = Pattern { kind: PatternKind::Tuple(vec![wildcard(), wildcard()]), span: Span::default() };
        let report = check(&ScrutineeShape::Product, &[tuple_arm], &interner);
        assert!(report.exhaustive);
    }

    #[test]
    fn infinite_scrutinee_is_never_exhaustive_without_a_catch_all() {
        let interner = StringInterner::new();
        let literal_arm = Pattern { kind: PatternKind::Literal(ideo_ir::Literal::Int(0)), span: Span::default() };
        let report = check(&ScrutineeShape::Infinite, &[literal_arm], &interner);
        assert!(!report.exhaustive);
        assert_eq!(report.missing.len(), 1);
    }
}
