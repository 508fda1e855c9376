//! Parameter and effect alphabetisation (§4.5: "parameter/effect
//! alphabetisation").

use ideo_diagnostic::Diagnostic;
use ideo_ir::{Declaration, Expr, ExprKind, Name, Param, Program, StringInterner};

use crate::diagnostics;
use crate::walk;

fn is_sorted_by_name(names: &[Name], interner: &StringInterner) -> bool {
    names.windows(2).all(|w| interner.resolve(w[0]) <= interner.resolve(w[1]))
}

fn is_sorted_params(params: &[Param], interner: &StringInterner) -> bool {
    params.windows(2).all(|w| interner.resolve(w[0].name) <= interner.resolve(w[1].name))
}

pub(crate) fn check(program: &Program, interner: &StringInterner, out: &mut Vec<Diagnostic>) {
    for decl in &program.declarations {
        match decl {
            Declaration::Function(f) => {
                if !is_sorted_params(&f.params, interner) {
                    out.push(diagnostics::unsorted_params(f.span));
                }
                if !is_sorted_by_name(&f.effects, interner) {
                    out.push(diagnostics::unsorted_effects(f.span));
                }
            }
            Declaration::Test(t) => {
                if !is_sorted_by_name(&t.effects, interner) {
                    out.push(diagnostics::unsorted_effects(t.span));
                }
            }
            Declaration::Type(_) | Declaration::Import(_) | Declaration::Extern(_) | Declaration::Const(_) => {}
        }
    }

    walk::for_each_top_level_expr(program, |expr| check_lambdas(expr, interner, out));
}

fn check_lambdas(expr: &Expr, interner: &StringInterner, out: &mut Vec<Diagnostic>) {
    if let ExprKind::Lambda { params, effects, .. } = &expr.kind {
        if !is_sorted_params(params, interner) {
            out.push(diagnostics::unsorted_params(expr.span));
        }
        if !is_sorted_by_name(effects, interner) {
            out.push(diagnostics::unsorted_effects(expr.span));
        }
    }
    walk::for_each_child(expr, &mut |child| check_lambdas(child, interner, out));
}

#[cfg(test)]
mod tests {
    use super::*;
    use ideo_ir::{Expr, ExprKind, FunctionDecl, Literal, Span, Type};

    fn unit() -> Expr {
        Expr { kind: ExprKind::Literal(Literal::Unit), span: Span::default() }
    }

    #[test]
    fn descending_params_are_flagged() {
        let mut interner = StringInterner::new();
        let b = interner.intern("b");
        let a = interner.intern("a");
        let f_name = interner.intern("f");
        let program = Program {
            declarations: vec![Declaration::Function(FunctionDecl {
                name: f_name,
                exported: false,
                mockable: false,
                params: vec![
                    Param { name: b, ty: Type::Int, mutable: false, span: Span::default() },
                    Param { name: a, ty: Type::Int, mutable: false, span: Span::default() },
                ],
                effects: vec![],
                return_type: Type::Unit,
                body: unit(),
                span: Span::default(),
            })],
            span: Span::default(),
        };
        let mut out = Vec::new();
        check(&program, &interner, &mut out);
        assert!(out.iter().any(|d| d.code == ideo_diagnostic::ErrorCode::CanonUnsortedParams));
    }

    #[test]
    fn ascending_params_are_accepted() {
        let mut interner = StringInterner::new();
        let a = interner.intern("a");
        let b = interner.intern("b");
        let f_name = interner.intern("f");
        let program = Program {
            declarations: vec![Declaration::Function(FunctionDecl {
                name: f_name,
                exported: false,
                mockable: false,
                params: vec![
                    Param { name: a, ty: Type::Int, mutable: false, span: Span::default() },
                    Param { name: b, ty: Type::Int, mutable: false, span: Span::default() },
                ],
                effects: vec![],
                return_type: Type::Unit,
                body: unit(),
                span: Span::default(),
            })],
            span: Span::default(),
        };
        let mut out = Vec::new();
        check(&program, &interner, &mut out);
        assert!(out.is_empty());
    }
}
