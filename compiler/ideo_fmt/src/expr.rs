//! Expression rendering, the inverse of `ideo_parse::expr`.
//!
//! The AST carries no record of which subexpressions were originally
//! parenthesized, so this always reparses unambiguously instead of trying
//! to reproduce the author's own parenthesization: every "loose" form
//! (anything built from the pipeline tier down through unary) is wrapped
//! in parens wherever it appears as a sub-expression, since `(` in primary
//! position always accepts a full expression and hands back the single
//! inner value unless a comma makes it a tuple. Atomic and postfix forms
//! (literals, identifiers, calls, field/index/member access, and the
//! bracket-delimited literals) never need the extra parens.

use ideo_ir::{Expr, ExprKind, MatchArm, StringInterner};

use crate::literals::fmt_literal;
use crate::operators::{binary_op_glyph, pipeline_op_glyph, unary_op_glyph};
use crate::pattern::fmt_pattern;
use crate::types::{fmt_effects, fmt_type};

#[must_use]
pub(crate) fn fmt_expr(interner: &StringInterner, expr: &Expr) -> String {
    fmt_inner(interner, expr)
}

/// Render `expr` the way it must appear as an operand of a looser-binding
/// form, parenthesizing whenever `expr` isn't already self-delimiting.
fn fmt_atom(interner: &StringInterner, expr: &Expr) -> String {
    let text = fmt_expr(interner, expr);
    if needs_parens(expr) {
        format!("({text})")
    } else {
        text
    }
}

fn needs_parens(expr: &Expr) -> bool {
    matches!(
        expr.kind,
        ExprKind::Lambda { .. }
            | ExprKind::Binary { .. }
            | ExprKind::Unary { .. }
            | ExprKind::Match { .. }
            | ExprKind::Let { .. }
            | ExprKind::If { .. }
            | ExprKind::Pipeline { .. }
            | ExprKind::Map { .. }
            | ExprKind::Filter { .. }
            | ExprKind::Fold { .. }
            | ExprKind::WithMock { .. }
    )
}

fn fmt_inner(interner: &StringInterner, expr: &Expr) -> String {
    match &expr.kind {
        ExprKind::Literal(lit) => fmt_literal(lit),
        ExprKind::Ident(name) => interner.resolve(*name).to_owned(),
        ExprKind::Lambda { params, effects, return_type, body } => format!(
            "λ({})→{}{}≡{}",
            fmt_params(interner, params),
            fmt_effects(interner, effects),
            fmt_type(interner, return_type),
            fmt_expr(interner, body)
        ),
        ExprKind::Apply { callee, args } => format!(
            "{}({})",
            fmt_atom(interner, callee),
            args.iter().map(|a| fmt_expr(interner, a)).collect::<Vec<_>>().join(", ")
        ),
        ExprKind::Binary { op, left, right } => {
            format!("{} {} {}", fmt_atom(interner, left), binary_op_glyph(*op), fmt_atom(interner, right))
        }
        ExprKind::Unary { op, operand } => format!("{}{}", unary_op_glyph(*op), fmt_atom(interner, operand)),
        ExprKind::Match { scrutinee, arms } => fmt_match(interner, scrutinee, arms),
        ExprKind::Let { pattern, ty, value, body } => format!(
            "l {}=({} : {}); {}",
            fmt_pattern(interner, pattern),
            fmt_expr(interner, value),
            fmt_type(interner, ty),
            fmt_expr(interner, body)
        ),
        ExprKind::If { cond, then_branch, else_branch } => {
            let head = format!("when {} {{ {} }}", fmt_expr(interner, cond), fmt_expr(interner, then_branch));
            match else_branch {
                Some(else_branch) => format!("{head} | {{ {} }}", fmt_expr(interner, else_branch)),
                None => head,
            }
        }
        ExprKind::ListLit(elems) => {
            format!("[{}]", elems.iter().map(|e| fmt_expr(interner, e)).collect::<Vec<_>>().join(", "))
        }
        ExprKind::RecordLit(fields) => format!(
            "{{{}}}",
            fields
                .iter()
                .map(|(name, value)| format!("{}: {}", interner.resolve(*name), fmt_expr(interner, value)))
                .collect::<Vec<_>>()
                .join(", ")
        ),
        ExprKind::TupleLit(elems) => fmt_tuple(interner, elems),
        ExprKind::Field { base, name } => format!("{}.{}", fmt_atom(interner, base), interner.resolve(*name)),
        ExprKind::Index { base, index } => format!("{}[{}]", fmt_atom(interner, base), fmt_expr(interner, index)),
        ExprKind::Pipeline { op, left, right } => {
            format!("{} {} {}", fmt_atom(interner, left), pipeline_op_glyph(*op), fmt_atom(interner, right))
        }
        ExprKind::Map { list, func } => format!("{} ↦ {}", fmt_atom(interner, list), fmt_atom(interner, func)),
        ExprKind::Filter { list, pred } => format!("{} ⊳ {}", fmt_atom(interner, list), fmt_atom(interner, pred)),
        ExprKind::Fold { list, func, init } => {
            format!("{} ⊕ {} ⊕ {}", fmt_atom(interner, list), fmt_atom(interner, func), fmt_atom(interner, init))
        }
        ExprKind::MemberAccess { module, member } => {
            format!("{}⋅{}", interner.resolve(*module), interner.resolve(*member))
        }
        ExprKind::WithMock { key, replacement, body } => format!(
            "with_mock({}, {}, {})",
            fmt_expr(interner, key),
            fmt_expr(interner, replacement),
            fmt_expr(interner, body)
        ),
    }
}

/// A single-element tuple needs a trailing comma to parse back as a tuple
/// rather than a parenthesized bare expression; `n >= 2` elements don't.
fn fmt_tuple(interner: &StringInterner, elems: &[Expr]) -> String {
    let rendered: Vec<String> = elems.iter().map(|e| fmt_expr(interner, e)).collect();
    if rendered.len() == 1 {
        format!("({},)", rendered[0])
    } else {
        format!("({})", rendered.join(", "))
    }
}

fn fmt_match(interner: &StringInterner, scrutinee: &Expr, arms: &[MatchArm]) -> String {
    let arms_js = arms
        .iter()
        .map(|arm| {
            let guard = match &arm.guard {
                Some(g) => format!(" when {}", fmt_expr(interner, g)),
                None => String::new(),
            };
            format!("{}{} → {}", fmt_pattern(interner, &arm.pattern), guard, fmt_expr(interner, &arm.body))
        })
        .collect::<Vec<_>>()
        .join(" | ");
    format!("{} {{ {} }}", fmt_atom(interner, scrutinee), arms_js)
}

fn fmt_params(interner: &StringInterner, params: &[ideo_ir::Param]) -> String {
    params
        .iter()
        .map(|p| {
            let mutable = if p.mutable { "mut " } else { "" };
            format!("{mutable}{}:{}", interner.resolve(p.name), fmt_type(interner, &p.ty))
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use ideo_ir::{BinaryOp, Literal, Span};

    fn lit(kind: ideo_ir::Literal) -> Expr {
        Expr { kind: ExprKind::Literal(kind), span: Span::default() }
    }

    #[test]
    fn nested_binary_expression_is_fully_parenthesized() {
        let interner = StringInterner::new();
        let inner = Expr {
            kind: ExprKind::Binary {
                op: BinaryOp::Add,
                left: Box::new(lit(Literal::Int(1))),
                right: Box::new(lit(Literal::Int(2))),
            },
            span: Span::default(),
        };
        let outer = Expr {
            kind: ExprKind::Binary { op: BinaryOp::Mul, left: Box::new(inner), right: Box::new(lit(Literal::Int(3))) },
            span: Span::default(),
        };
        assert_eq!(fmt_expr(&interner, &outer), "(1 + 2) * 3");
    }

    #[test]
    fn single_element_tuple_keeps_its_trailing_comma() {
        let interner = StringInterner::new();
        assert_eq!(fmt_tuple(&interner, &[lit(Literal::Int(1))]), "(1,)");
    }

    #[test]
    fn call_on_a_bare_identifier_needs_no_parens() {
        let mut interner = StringInterner::new();
        let f = interner.intern("f");
        let callee = Expr { kind: ExprKind::Ident(f), span: Span::default() };
        let apply =
            Expr { kind: ExprKind::Apply { callee: Box::new(callee), args: vec![lit(Literal::Int(1))] }, span: Span::default() };
        assert_eq!(fmt_expr(&interner, &apply), "f(1)");
    }
}
