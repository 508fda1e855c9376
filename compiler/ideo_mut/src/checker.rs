//! Walks a canon-validated, type-checked module looking for the ways a
//! `mut` parameter's discipline can be broken (§4.7).
//!
//! `mut` is the only mutability marker this grammar has, and it only ever
//! appears on a parameter. That narrows the section's four rules to three
//! checkable ones:
//!
//! - a closure that captures a `mut` binding and is itself handed off
//!   somewhere that outlives the current scope (`MUTABILITY-CAPTURE-ESCAPES`);
//! - a call that passes a `mut` binding into a parameter the callee did not
//!   itself mark `mut` (`MUTABILITY-PASS-TO-IMMUTABLE-PARAM`);
//! - a call that passes the same `mut` binding into two of the callee's
//!   `mut` parameters at once (`MUTABILITY-ALIASING`).
//!
//! The section's first rule — mutation sites may only target a `mut`
//! binding — has no expression to attach to: this grammar has no
//! assignment form at all, field/index access is read-only. There is
//! nothing for `MUTABILITY-ASSIGN-IMMUTABLE` to fire on until the language
//! grows one.
//!
//! `Map`/`Filter`/`Fold`'s function argument is called in place and never
//! outlives the expression it's passed to, so a lambda written directly
//! there is not a capture site; a lambda reached any other way (bound by
//! `let`, returned, stored in a literal, passed to a plain call) is.

use ideo_diagnostic::Diagnostic;
use ideo_ir::{Declaration, Expr, ExprKind, Name, Param, Pattern, PatternKind, Program};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::diagnostics;
use crate::env::MutEnv;

struct LocalFunction {
    mutable_params: Vec<bool>,
}

pub struct Checker {
    locals: FxHashMap<Name, LocalFunction>,
    diagnostics: Vec<Diagnostic>,
}

/// Check every function, const, and test body in `program`.
pub fn check_module(program: &Program) -> Vec<Diagnostic> {
    let mut locals = FxHashMap::default();
    for decl in &program.declarations {
        if let Declaration::Function(f) = decl {
            let mutable_params = f.params.iter().map(|p| p.mutable).collect();
            locals.insert(f.name, LocalFunction { mutable_params });
        }
    }
    let mut checker = Checker { locals, diagnostics: Vec::new() };
    checker.check_program(program);
    checker.diagnostics
}

impl Checker {
    fn check_program(&mut self, program: &Program) {
        for decl in &program.declarations {
            match decl {
                Declaration::Function(f) => {
                    let mut env = MutEnv::new();
                    for param in &f.params {
                        env.bind(param.name, param.mutable);
                    }
                    self.walk(&f.body, &env);
                }
                Declaration::Const(c) => self.walk(&c.value, &MutEnv::new()),
                Declaration::Test(t) => self.walk(&t.body, &MutEnv::new()),
                Declaration::Type(_) | Declaration::Import(_) | Declaration::Extern(_) => {}
            }
        }
    }

    fn walk(&mut self, expr: &Expr, env: &MutEnv) {
        match &expr.kind {
            ExprKind::Literal(_) | ExprKind::Ident(_) | ExprKind::MemberAccess { .. } => {}
            ExprKind::Lambda { params, body, .. } => self.check_lambda(params, body, env),
            ExprKind::Apply { callee, args } => {
                self.walk(callee, env);
                for arg in args {
                    self.walk(arg, env);
                }
                self.check_call(callee, args, env);
            }
            ExprKind::Binary { left, right, .. } => {
                self.walk(left, env);
                self.walk(right, env);
            }
            ExprKind::Unary { operand, .. } => self.walk(operand, env),
            ExprKind::Match { scrutinee, arms } => {
                self.walk(scrutinee, env);
                for arm in arms {
                    let mut child = env.child();
                    bind_pattern(&arm.pattern, &mut child);
                    if let Some(guard) = &arm.guard {
                        self.walk(guard, &child);
                    }
                    self.walk(&arm.body, &child);
                }
            }
            ExprKind::Let { pattern, value, body, .. } => {
                self.walk(value, env);
                let mut child = env.child();
                bind_pattern(pattern, &mut child);
                self.walk(body, &child);
            }
            ExprKind::If { cond, then_branch, else_branch } => {
                self.walk(cond, env);
                self.walk(then_branch, env);
                if let Some(else_branch) = else_branch {
                    self.walk(else_branch, env);
                }
            }
            ExprKind::ListLit(items) | ExprKind::TupleLit(items) => {
                for item in items {
                    self.walk(item, env);
                }
            }
            ExprKind::RecordLit(fields) => {
                for (_, value) in fields {
                    self.walk(value, env);
                }
            }
            ExprKind::Field { base, .. } => self.walk(base, env),
            ExprKind::Index { base, index } => {
                self.walk(base, env);
                self.walk(index, env);
            }
            ExprKind::Pipeline { left, right, .. } => {
                self.walk(left, env);
                self.walk(right, env);
            }
            ExprKind::Map { list, func } | ExprKind::Filter { list, pred: func } => {
                self.walk(list, env);
                self.walk_applied_in_place(func, env);
            }
            ExprKind::Fold { list, func, init } => {
                self.walk(list, env);
                self.walk(init, env);
                self.walk_applied_in_place(func, env);
            }
            ExprKind::WithMock { key, replacement, body } => {
                self.walk(key, env);
                self.walk(replacement, env);
                self.walk(body, env);
            }
        }
    }

    /// `func`'s body is checked in its own scope but never screened for
    /// captures: it's called where it stands, not handed off.
    fn walk_applied_in_place(&mut self, func: &Expr, env: &MutEnv) {
        if let ExprKind::Lambda { params, body, .. } = &func.kind {
            let mut child = env.child();
            for param in params {
                child.bind(param.name, param.mutable);
            }
            self.walk(body, &child);
        } else {
            self.walk(func, env);
        }
    }

    fn check_lambda(&mut self, params: &[Param], body: &Expr, env: &MutEnv) {
        let mut own_names = FxHashSet::default();
        own_names.extend(params.iter().map(|p| p.name));
        let mut captures = Vec::new();
        free_mut_refs(body, &own_names, env, &mut captures);
        for span in captures {
            self.diagnostics.push(diagnostics::capture_escapes(span));
        }

        let mut child = env.child();
        for param in params {
            child.bind(param.name, param.mutable);
        }
        self.walk(body, &child);
    }

    fn check_call(&mut self, callee: &Expr, args: &[Expr], env: &MutEnv) {
        let ExprKind::Ident(name) = &callee.kind else { return };
        let mutable_params = match self.locals.get(name) {
            Some(local) => local.mutable_params.clone(),
            None => return,
        };

        for (i, arg) in args.iter().enumerate() {
            let ExprKind::Ident(arg_name) = &arg.kind else { continue };
            if env.lookup(*arg_name) != Some(true) {
                continue;
            }
            if !mutable_params.get(i).copied().unwrap_or(false) {
                self.diagnostics.push(diagnostics::pass_to_immutable_param(arg.span));
            }
        }

        for i in 0..args.len() {
            for j in (i + 1)..args.len() {
                let (ExprKind::Ident(a), ExprKind::Ident(b)) = (&args[i].kind, &args[j].kind) else { continue };
                let both_mut_params =
                    mutable_params.get(i).copied().unwrap_or(false) && mutable_params.get(j).copied().unwrap_or(false);
                if a == b && both_mut_params && env.lookup(*a) == Some(true) {
                    self.diagnostics.push(diagnostics::aliasing(args[j].span));
                }
            }
        }
    }
}

fn bind_pattern(pattern: &Pattern, env: &mut MutEnv) {
    match &pattern.kind {
        PatternKind::Ident(name) => env.bind(*name, false),
        PatternKind::Wildcard | PatternKind::Literal(_) | PatternKind::ListEmpty => {}
        PatternKind::Constructor { args, .. } | PatternKind::Tuple(args) => {
            for arg in args {
                bind_pattern(arg, env);
            }
        }
        PatternKind::ListCons { head, rest, tail } => {
            for pat in head {
                bind_pattern(pat, env);
            }
            if let Some(rest) = rest {
                bind_pattern(rest, env);
            }
            for pat in tail {
                bind_pattern(pat, env);
            }
        }
        PatternKind::Record(fields) => {
            for (_, pat) in fields {
                bind_pattern(pat, env);
            }
        }
    }
}

fn pattern_names(pattern: &Pattern, names: &mut FxHashSet<Name>) {
    match &pattern.kind {
        PatternKind::Ident(name) => {
            names.insert(*name);
        }
        PatternKind::Wildcard | PatternKind::Literal(_) | PatternKind::ListEmpty => {}
        PatternKind::Constructor { args, .. } | PatternKind::Tuple(args) => {
            for arg in args {
                pattern_names(arg, names);
            }
        }
        PatternKind::ListCons { head, rest, tail } => {
            for pat in head {
                pattern_names(pat, names);
            }
            if let Some(rest) = rest {
                pattern_names(rest, names);
            }
            for pat in tail {
                pattern_names(pat, names);
            }
        }
        PatternKind::Record(fields) => {
            for (_, pat) in fields {
                pattern_names(pat, names);
            }
        }
    }
}

/// Free identifiers in `expr` (relative to `bound`) that resolve to a `mut`
/// binding in `outer`. `bound` grows as the scan descends into nested
/// lambdas, lets, and match arms so their own names are never mistaken for
/// a capture of something from further out.
fn free_mut_refs(expr: &Expr, bound: &FxHashSet<Name>, outer: &MutEnv, out: &mut Vec<ideo_ir::Span>) {
    match &expr.kind {
        ExprKind::Literal(_) | ExprKind::MemberAccess { .. } => {}
        ExprKind::Ident(name) => {
            if !bound.contains(name) && outer.lookup(*name) == Some(true) {
                out.push(expr.span);
            }
        }
        ExprKind::Lambda { params, body, .. } => {
            let mut inner = bound.clone();
            inner.extend(params.iter().map(|p| p.name));
            free_mut_refs(body, &inner, outer, out);
        }
        ExprKind::Apply { callee, args } => {
            free_mut_refs(callee, bound, outer, out);
            for arg in args {
                free_mut_refs(arg, bound, outer, out);
            }
        }
        ExprKind::Binary { left, right, .. } => {
            free_mut_refs(left, bound, outer, out);
            free_mut_refs(right, bound, outer, out);
        }
        ExprKind::Unary { operand, .. } => free_mut_refs(operand, bound, outer, out),
        ExprKind::Match { scrutinee, arms } => {
            free_mut_refs(scrutinee, bound, outer, out);
            for arm in arms {
                let mut inner = bound.clone();
                pattern_names(&arm.pattern, &mut inner);
                if let Some(guard) = &arm.guard {
                    free_mut_refs(guard, &inner, outer, out);
                }
                free_mut_refs(&arm.body, &inner, outer, out);
            }
        }
        ExprKind::Let { pattern, value, body, .. } => {
            free_mut_refs(value, bound, outer, out);
            let mut inner = bound.clone();
            pattern_names(pattern, &mut inner);
            free_mut_refs(body, &inner, outer, out);
        }
        ExprKind::If { cond, then_branch, else_branch } => {
            free_mut_refs(cond, bound, outer, out);
            free_mut_refs(then_branch, bound, outer, out);
            if let Some(else_branch) = else_branch {
                free_mut_refs(else_branch, bound, outer, out);
            }
        }
        ExprKind::ListLit(items) | ExprKind::TupleLit(items) => {
            for item in items {
                free_mut_refs(item, bound, outer, out);
            }
        }
        ExprKind::RecordLit(fields) => {
            for (_, value) in fields {
                free_mut_refs(value, bound, outer, out);
            }
        }
        ExprKind::Field { base, .. } => free_mut_refs(base, bound, outer, out),
        ExprKind::Index { base, index } => {
            free_mut_refs(base, bound, outer, out);
            free_mut_refs(index, bound, outer, out);
        }
        ExprKind::Pipeline { left, right, .. } => {
            free_mut_refs(left, bound, outer, out);
            free_mut_refs(right, bound, outer, out);
        }
        ExprKind::Map { list, func } | ExprKind::Filter { list, pred: func } => {
            free_mut_refs(list, bound, outer, out);
            free_mut_refs(func, bound, outer, out);
        }
        ExprKind::Fold { list, func, init } => {
            free_mut_refs(list, bound, outer, out);
            free_mut_refs(func, bound, outer, out);
            free_mut_refs(init, bound, outer, out);
        }
        ExprKind::WithMock { key, replacement, body } => {
            free_mut_refs(key, bound, outer, out);
            free_mut_refs(replacement, bound, outer, out);
            free_mut_refs(body, bound, outer, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ideo_ir::{ConstDecl, FunctionDecl, Literal, Span, StringInterner};

    fn ident(name: Name, span: Span) -> Expr {
        Expr { kind: ExprKind::Ident(name), span }
    }

    fn span_at(n: u32) -> Span {
        Span::new(ideo_ir::SourcePoint::new(1, n + 1, n), ideo_ir::SourcePoint::new(1, n + 2, n + 1))
    }

    #[test]
    fn plain_function_has_no_diagnostics() {
        let mut interner = StringInterner::new();
        let double = interner.intern("double");
        let x = interner.intern("x");
        let program = Program {
            declarations: vec![Declaration::Function(FunctionDecl {
                name: double,
                exported: false,
                mockable: false,
                params: vec![Param { name: x, ty: ideo_ir::Type::Int, mutable: false, span: Span::default() }],
                effects: vec![],
                return_type: ideo_ir::Type::Int,
                body: Expr {
                    kind: ExprKind::Binary {
                        op: ideo_ir::BinaryOp::Add,
                        left: Box::new(ident(x, span_at(0))),
                        right: Box::new(ident(x, span_at(1))),
                    },
                    span: Span::default(),
                },
                span: Span::default(),
            })],
            span: Span::default(),
        };
        assert!(check_module(&program).is_empty());
    }

    #[test]
    fn lambda_returned_directly_captures_a_mut_param() {
        let mut interner = StringInterner::new();
        let make_adder = interner.intern("make_adder");
        let acc = interner.intern("acc");
        let y = interner.intern("y");
        let lambda = Expr {
            kind: ExprKind::Lambda {
                params: vec![Param { name: y, ty: ideo_ir::Type::Int, mutable: false, span: Span::default() }],
                effects: vec![],
                return_type: ideo_ir::Type::Int,
                body: Box::new(Expr {
                    kind: ExprKind::Binary {
                        op: ideo_ir::BinaryOp::Add,
                        left: Box::new(ident(acc, span_at(7))),
                        right: Box::new(ident(y, span_at(8))),
                    },
                    span: Span::default(),
                }),
            },
            span: Span::default(),
        };
        let program = Program {
            declarations: vec![Declaration::Function(FunctionDecl {
                name: make_adder,
                exported: false,
                mockable: false,
                params: vec![Param {
                    name: acc,
                    ty: ideo_ir::Type::Int,
                    mutable: true,
                    span: Span::default(),
                }],
                effects: vec![],
                return_type: ideo_ir::Type::Function {
                    params: vec![ideo_ir::Type::Int],
                    effects: vec![],
                    ret: Box::new(ideo_ir::Type::Int),
                },
                body: lambda,
                span: Span::default(),
            })],
            span: Span::default(),
        };
        let diagnostics = check_module(&program);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, ideo_diagnostic::ErrorCode::MutCaptureEscapes);
    }

    #[test]
    fn mut_lambda_param_applied_by_map_is_not_a_capture() {
        let mut interner = StringInterner::new();
        let f = interner.intern("f");
        let xs = interner.intern("xs");
        let n = interner.intern("n");
        let body = Expr {
            kind: ExprKind::Map {
                list: Box::new(ident(xs, span_at(0))),
                func: Box::new(Expr {
                    kind: ExprKind::Lambda {
                        params: vec![Param { name: n, ty: ideo_ir::Type::Int, mutable: false, span: Span::default() }],
                        effects: vec![],
                        return_type: ideo_ir::Type::Int,
                        body: Box::new(ident(n, span_at(1))),
                    },
                    span: Span::default(),
                }),
            },
            span: Span::default(),
        };
        let program = Program {
            declarations: vec![Declaration::Function(FunctionDecl {
                name: f,
                exported: false,
                mockable: false,
                params: vec![Param {
                    name: xs,
                    ty: ideo_ir::Type::List(Box::new(ideo_ir::Type::Int)),
                    mutable: true,
                    span: Span::default(),
                }],
                effects: vec![],
                return_type: ideo_ir::Type::List(Box::new(ideo_ir::Type::Int)),
                body,
                span: Span::default(),
            })],
            span: Span::default(),
        };
        assert!(check_module(&program).is_empty());
    }

    #[test]
    fn passing_mut_binding_to_non_mut_param_is_reported() {
        let mut interner = StringInterner::new();
        let sink = interner.intern("sink");
        let caller = interner.intern("caller");
        let v = interner.intern("v");
        let p = interner.intern("p");
        let sink_decl = Declaration::Function(FunctionDecl {
            name: sink,
            exported: false,
            mockable: false,
            params: vec![Param { name: p, ty: ideo_ir::Type::Int, mutable: false, span: Span::default() }],
            effects: vec![],
            return_type: ideo_ir::Type::Int,
            body: ident(p, span_at(2)),
            span: Span::default(),
        });
        let caller_decl = Declaration::Function(FunctionDecl {
            name: caller,
            exported: false,
            mockable: false,
            params: vec![Param { name: v, ty: ideo_ir::Type::Int, mutable: true, span: Span::default() }],
            effects: vec![],
            return_type: ideo_ir::Type::Int,
            body: Expr {
                kind: ExprKind::Apply { callee: Box::new(ident(sink, span_at(3))), args: vec![ident(v, span_at(4))] },
                span: Span::default(),
            },
            span: Span::default(),
        });
        let program = Program { declarations: vec![sink_decl, caller_decl], span: Span::default() };
        let diagnostics = check_module(&program);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, ideo_diagnostic::ErrorCode::MutPassToImmutableParam);
    }

    #[test]
    fn same_mut_binding_to_two_mut_params_is_aliasing() {
        let mut interner = StringInterner::new();
        let combine = interner.intern("combine");
        let caller = interner.intern("caller");
        let v = interner.intern("v");
        let a = interner.intern("a");
        let b = interner.intern("b");
        let combine_decl = Declaration::Function(FunctionDecl {
            name: combine,
            exported: false,
            mockable: false,
            params: vec![
                Param { name: a, ty: ideo_ir::Type::Int, mutable: true, span: Span::default() },
                Param { name: b, ty: ideo_ir::Type::Int, mutable: true, span: Span::default() },
            ],
            effects: vec![],
            return_type: ideo_ir::Type::Int,
            body: ident(a, span_at(5)),
            span: Span::default(),
        });
        let caller_decl = Declaration::Function(FunctionDecl {
            name: caller,
            exported: false,
            mockable: false,
            params: vec![Param { name: v, ty: ideo_ir::Type::Int, mutable: true, span: Span::default() }],
            effects: vec![],
            return_type: ideo_ir::Type::Int,
            body: Expr {
                kind: ExprKind::Apply {
                    callee: Box::new(ident(combine, span_at(6))),
                    args: vec![ident(v, span_at(9)), ident(v, span_at(10))],
                },
                span: Span::default(),
            },
            span: Span::default(),
        });
        let program = Program { declarations: vec![combine_decl, caller_decl], span: Span::default() };
        let diagnostics = check_module(&program);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, ideo_diagnostic::ErrorCode::MutAliasing);
    }

    #[test]
    fn const_body_is_checked_too() {
        let mut interner = StringInterner::new();
        let name = interner.intern("zero");
        let program = Program {
            declarations: vec![Declaration::Const(ConstDecl {
                name,
                exported: false,
                ty: ideo_ir::Type::Int,
                value: Expr { kind: ExprKind::Literal(Literal::Int(0)), span: Span::default() },
                span: Span::default(),
            })],
            span: Span::default(),
        };
        assert!(check_module(&program).is_empty());
    }
}
