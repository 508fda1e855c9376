//! Shared traversal helpers. Every canonical-form rule needs to reach every
//! sub-expression (or every pattern, or every match) somewhere in a
//! declaration's body; this is the one place that knows how to descend
//! through an `Expr`, so each rule module only has to say what it's
//! looking for.

use ideo_ir::{Declaration, Expr, ExprKind, MatchArm, Pattern, Program};

/// Call `f` on every declaration's top-level body (a function's body, a
/// const's value, a test's body). Types, imports, and externs have none.
pub(crate) fn for_each_top_level_expr<'a>(program: &'a Program, mut f: impl FnMut(&'a Expr)) {
    for decl in &program.declarations {
        match decl {
            Declaration::Function(d) => f(&d.body),
            Declaration::Const(d) => f(&d.value),
            Declaration::Test(d) => f(&d.body),
            Declaration::Type(_) | Declaration::Import(_) | Declaration::Extern(_) => {}
        }
    }
}

/// Call `f` on every direct child expression of `expr`.
pub(crate) fn for_each_child<'a>(expr: &'a Expr, f: &mut impl FnMut(&'a Expr)) {
    match &expr.kind {
        ExprKind::Literal(_) | ExprKind::Ident(_) | ExprKind::MemberAccess { .. } => {}
        ExprKind::Lambda { body, .. } => f(body),
        ExprKind::Apply { callee, args } => {
            f(callee);
            for arg in args {
                f(arg);
            }
        }
        ExprKind::Binary { left, right, .. } => {
            f(left);
            f(right);
        }
        ExprKind::Unary { operand, .. } => f(operand),
        ExprKind::Match { scrutinee, arms } => {
            f(scrutinee);
            for arm in arms {
                if let Some(guard) = &arm.guard {
                    f(guard);
                }
                f(&arm.body);
            }
        }
        ExprKind::Let { value, body, .. } => {
            f(value);
            f(body);
        }
        ExprKind::If { cond, then_branch, else_branch } => {
            f(cond);
            f(then_branch);
            if let Some(else_branch) = else_branch {
                f(else_branch);
            }
        }
        ExprKind::ListLit(items) | ExprKind::TupleLit(items) => {
            for item in items {
                f(item);
            }
        }
        ExprKind::RecordLit(fields) => {
            for (_, value) in fields {
                f(value);
            }
        }
        ExprKind::Field { base, .. } => f(base),
        ExprKind::Index { base, index } => {
            f(base);
            f(index);
        }
        ExprKind::Pipeline { left, right, .. } => {
            f(left);
            f(right);
        }
        ExprKind::Map { list, func } | ExprKind::Filter { list, pred: func } => {
            f(list);
            f(func);
        }
        ExprKind::Fold { list, func, init } => {
            f(list);
            f(func);
            f(init);
        }
        ExprKind::WithMock { key, replacement, body } => {
            f(key);
            f(replacement);
            f(body);
        }
    }
}

/// Call `f` on every `Match` node reachable from `expr`, innermost included.
pub(crate) fn for_each_match<'a>(expr: &'a Expr, f: &mut impl FnMut(&'a Expr, &'a [MatchArm])) {
    if let ExprKind::Match { arms, .. } = &expr.kind {
        f(expr, arms);
    }
    for_each_child(expr, &mut |child| for_each_match(child, f));
}

/// Call `f` on every pattern a `let` or a `match` arm introduces anywhere
/// under `expr`.
pub(crate) fn for_each_pattern<'a>(expr: &'a Expr, f: &mut impl FnMut(&'a Pattern)) {
    match &expr.kind {
        ExprKind::Let { pattern, .. } => f(pattern),
        ExprKind::Match { arms, .. } => {
            for arm in arms {
                f(&arm.pattern);
            }
        }
        _ => {}
    }
    for_each_child(expr, &mut |child| for_each_pattern(child, f));
}
