//! Pattern-match discipline (§4.5: boolean scrutinee ban, double-wildcard
//! ban, duplicate-arm ban).
//!
//! `Pattern`, `Expr`, and `Literal` carry no `PartialEq` (an `f64` hides
//! inside `Literal::Float`), so duplicate-arm detection needs its own
//! structural equality rather than reaching for `==`.

use ideo_diagnostic::Diagnostic;
use ideo_ir::{Expr, ExprKind, Literal, Pattern, PatternKind, Program};

use crate::diagnostics;
use crate::walk;

pub(crate) fn check(program: &Program, out: &mut Vec<Diagnostic>) {
    walk::for_each_top_level_expr(program, |expr| {
        walk::for_each_match(expr, &mut |match_expr, arms| {
            check_boolean_scrutinee(match_expr, out);
            check_duplicate_arms(arms, out);
        });
        walk::for_each_pattern(expr, &mut |pattern| {
            check_double_wildcard(pattern, out);
        });
    });
}

fn check_boolean_scrutinee(match_expr: &Expr, out: &mut Vec<Diagnostic>) {
    let ExprKind::Match { scrutinee, arms } = &match_expr.kind else { return };
    let is_boolish = matches!(&scrutinee.kind, ExprKind::Literal(Literal::Bool(_)))
        || arms.iter().any(|arm| matches!(&arm.pattern.kind, PatternKind::Literal(Literal::Bool(_))));
    if is_boolish {
        out.push(diagnostics::match_boolean(match_expr.span));
    }
}

fn check_double_wildcard(pattern: &Pattern, out: &mut Vec<Diagnostic>) {
    let PatternKind::ListCons { head, rest, tail } = &pattern.kind else { return };
    let mut slots: Vec<&Pattern> = Vec::with_capacity(head.len() + tail.len() + 1);
    slots.extend(head.iter());
    if let Some(rest) = rest {
        slots.push(rest.as_ref());
    }
    slots.extend(tail.iter());
    for window in slots.windows(2) {
        if matches!(window[0].kind, PatternKind::Wildcard) && matches!(window[1].kind, PatternKind::Wildcard) {
            out.push(diagnostics::double_wildcard(pattern.span));
            return;
        }
    }
}

fn check_duplicate_arms(arms: &[ideo_ir::MatchArm], out: &mut Vec<Diagnostic>) {
    for i in 0..arms.len() {
        for j in 0..i {
            if pattern_eq(&arms[i].pattern, &arms[j].pattern) && guard_eq(&arms[i].guard, &arms[j].guard) {
                out.push(diagnostics::duplicate_arm(arms[i].span));
                break;
            }
        }
    }
}

fn pattern_eq(a: &Pattern, b: &Pattern) -> bool {
    match (&a.kind, &b.kind) {
        (PatternKind::Literal(x), PatternKind::Literal(y)) => literal_eq(x, y),
        (PatternKind::Ident(x), PatternKind::Ident(y)) => x == y,
        (PatternKind::Wildcard, PatternKind::Wildcard) => true,
        (PatternKind::Constructor { name: n1, args: a1 }, PatternKind::Constructor { name: n2, args: a2 }) => {
            n1 == n2 && a1.len() == a2.len() && a1.iter().zip(a2).all(|(x, y)| pattern_eq(x, y))
        }
        (PatternKind::ListEmpty, PatternKind::ListEmpty) => true,
        (
            PatternKind::ListCons { head: h1, rest: r1, tail: t1 },
            PatternKind::ListCons { head: h2, rest: r2, tail: t2 },
        ) => {
            h1.len() == h2.len()
                && h1.iter().zip(h2).all(|(x, y)| pattern_eq(x, y))
                && t1.len() == t2.len()
                && t1.iter().zip(t2).all(|(x, y)| pattern_eq(x, y))
                && match (r1, r2) {
                    (Some(x), Some(y)) => pattern_eq(x, y),
                    (None, None) => true,
                    _ => false,
                }
        }
        (PatternKind::Record(f1), PatternKind::Record(f2)) => {
            f1.len() == f2.len() && f1.iter().zip(f2).all(|((n1, p1), (n2, p2))| n1 == n2 && pattern_eq(p1, p2))
        }
        (PatternKind::Tuple(t1), PatternKind::Tuple(t2)) => {
            t1.len() == t2.len() && t1.iter().zip(t2).all(|(x, y)| pattern_eq(x, y))
        }
        _ => false,
    }
}

fn literal_eq(a: &Literal, b: &Literal) -> bool {
    match (a, b) {
        (Literal::Int(x), Literal::Int(y)) => x == y,
        (Literal::Float(x), Literal::Float(y)) => x.to_bits() == y.to_bits(),
        (Literal::Bool(x), Literal::Bool(y)) => x == y,
        (Literal::Str(x), Literal::Str(y)) => x == y,
        (Literal::Char(x), Literal::Char(y)) => x == y,
        (Literal::Unit, Literal::Unit) => true,
        _ => false,
    }
}

fn guard_eq(a: &Option<Expr>, b: &Option<Expr>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(x), Some(y)) => expr_eq(x, y),
        _ => false,
    }
}

fn expr_eq(a: &Expr, b: &Expr) -> bool {
    match (&a.kind, &b.kind) {
        (ExprKind::Literal(x), ExprKind::Literal(y)) => literal_eq(x, y),
        (ExprKind::Ident(x), ExprKind::Ident(y)) => x == y,
        (ExprKind::Binary { op: o1, left: l1, right: r1 }, ExprKind::Binary { op: o2, left: l2, right: r2 }) => {
            o1 == o2 && expr_eq(l1, l2) && expr_eq(r1, r2)
        }
        (ExprKind::Unary { op: o1, operand: x1 }, ExprKind::Unary { op: o2, operand: x2 }) => o1 == o2 && expr_eq(x1, x2),
        (ExprKind::Apply { callee: c1, args: a1 }, ExprKind::Apply { callee: c2, args: a2 }) => {
            expr_eq(c1, c2) && a1.len() == a2.len() && a1.iter().zip(a2).all(|(x, y)| expr_eq(x, y))
        }
        (ExprKind::Field { base: b1, name: n1 }, ExprKind::Field { base: b2, name: n2 }) => n1 == n2 && expr_eq(b1, b2),
        (ExprKind::MemberAccess { module: m1, member: x1 }, ExprKind::MemberAccess { module: m2, member: x2 }) => {
            m1 == m2 && x1 == x2
        }
        _ => false,
    }
}
