//! Recursion discipline (§4.5: "no accumulator parameters", "no CPS").
//!
//! A self-recursive function's parameters must either be passed straight
//! through, decomposed toward a base case, or queried — never grown. And a
//! recursive function may never return a function type, since that is
//! continuation-passing style wearing a direct-style hat.

use ideo_ir::{BinaryOp, Declaration, Expr, ExprKind, FunctionDecl, Name, Pattern, PatternKind, Program, StringInterner, Type};
use rustc_hash::FxHashMap;

use crate::diagnostics;
use ideo_diagnostic::Diagnostic;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ArgShape {
    PassThrough,
    Decomposed,
    Grown,
    Other,
}

/// Tracks, for the current function, which bound name refers to which
/// original parameter — so `let (head, rest) = xs in f(rest, ...)` is
/// recognised as decomposing `xs` even though the call site mentions
/// `rest`, not `xs`.
struct AliasTracker<'a> {
    param_names: &'a [Name],
    aliases: FxHashMap<Name, Name>,
}

impl<'a> AliasTracker<'a> {
    fn new(param_names: &'a [Name]) -> Self {
        AliasTracker { param_names, aliases: FxHashMap::default() }
    }

    fn resolve(&self, name: Name) -> Option<Name> {
        if self.param_names.contains(&name) {
            return Some(name);
        }
        self.aliases.get(&name).copied()
    }

    /// `match xs { [] -> ..., h ⧺ rest -> ... }` aliases `rest` (and each
    /// head binder) back to whatever `xs` resolves to.
    fn learn_from_match(&mut self, scrutinee: &Expr, arms: &[ideo_ir::MatchArm]) {
        let ExprKind::Ident(scrutinee_name) = &scrutinee.kind else { return };
        let Some(origin) = self.resolve(*scrutinee_name) else { return };
        for arm in arms {
            self.learn_pattern(&arm.pattern, origin);
        }
    }

    fn learn_pattern(&mut self, pattern: &Pattern, origin: Name) {
        if let PatternKind::ListCons { head: _, rest: Some(rest), tail: _ } = &pattern.kind {
            if let PatternKind::Ident(name) = &rest.kind {
                self.aliases.insert(*name, origin);
            }
        }
    }

    fn learn_from_let(&mut self, pattern: &Pattern, value: &Expr) {
        let ExprKind::Ident(value_name) = &value.kind else { return };
        let Some(origin) = self.resolve(*value_name) else { return };
        if let PatternKind::Ident(bound) = &pattern.kind {
            self.aliases.insert(*bound, origin);
        }
    }
}

fn classify_arg(arg: &Expr, origin: Name, tracker: &AliasTracker<'_>) -> ArgShape {
    match &arg.kind {
        ExprKind::Ident(name) => match tracker.resolve(*name) {
            Some(resolved) if resolved == origin => ArgShape::PassThrough,
            _ => ArgShape::Other,
        },
        ExprKind::Binary { op, left, right } => {
            let mentions_origin = |e: &Expr| matches!(&e.kind, ExprKind::Ident(n) if tracker.resolve(*n) == Some(origin));
            if !mentions_origin(left) && !mentions_origin(right) {
                return ArgShape::Other;
            }
            match op {
                BinaryOp::Sub | BinaryOp::Div | BinaryOp::Mod => ArgShape::Decomposed,
                BinaryOp::Add | BinaryOp::Mul | BinaryOp::Concat => ArgShape::Grown,
                _ => ArgShape::Other,
            }
        }
        _ => ArgShape::Other,
    }
}

/// Walk `expr` looking for self-calls to `function_name`, threading
/// `tracker` through `let`s and `match`es so decomposed bindings are
/// still recognised as derived from the original parameter.
#[allow(clippy::too_many_arguments)]
fn walk(
    expr: &Expr,
    function_name: Name,
    params: &[Name],
    interner: &StringInterner,
    tracker: &mut AliasTracker<'_>,
    out: &mut Vec<Diagnostic>,
) {
    match &expr.kind {
        ExprKind::Apply { callee, args } => {
            if let ExprKind::Ident(name) = &callee.kind {
                if *name == function_name {
                    for (arg, &param) in args.iter().zip(params.iter()) {
                        if classify_arg(arg, param, tracker) == ArgShape::Grown {
                            out.push(diagnostics::recursion_accumulator(arg.span, interner.resolve(param)));
                        }
                    }
                }
            }
            walk(callee, function_name, params, interner, tracker, out);
            for arg in args {
                walk(arg, function_name, params, interner, tracker, out);
            }
        }
        ExprKind::Let { pattern, value, body, .. } => {
            tracker.learn_from_let(pattern, value);
            walk(value, function_name, params, interner, tracker, out);
            walk(body, function_name, params, interner, tracker, out);
        }
        ExprKind::Match { scrutinee, arms } => {
            tracker.learn_from_match(scrutinee, arms);
            walk(scrutinee, function_name, params, interner, tracker, out);
            for arm in arms {
                if let Some(guard) = &arm.guard {
                    walk(guard, function_name, params, interner, tracker, out);
                }
                walk(&arm.body, function_name, params, interner, tracker, out);
            }
        }
        ExprKind::Lambda { body, .. } => walk(body, function_name, params, interner, tracker, out),
        ExprKind::Binary { left, right, .. } => {
            walk(left, function_name, params, interner, tracker, out);
            walk(right, function_name, params, interner, tracker, out);
        }
        ExprKind::Unary { operand, .. } => walk(operand, function_name, params, interner, tracker, out),
        ExprKind::If { cond, then_branch, else_branch } => {
            walk(cond, function_name, params, interner, tracker, out);
            walk(then_branch, function_name, params, interner, tracker, out);
            if let Some(else_branch) = else_branch {
                walk(else_branch, function_name, params, interner, tracker, out);
            }
        }
        ExprKind::ListLit(items) | ExprKind::TupleLit(items) => {
            for item in items {
                walk(item, function_name, params, interner, tracker, out);
            }
        }
        ExprKind::RecordLit(fields) => {
            for (_, value) in fields {
                walk(value, function_name, params, interner, tracker, out);
            }
        }
        ExprKind::Field { base, .. } => walk(base, function_name, params, interner, tracker, out),
        ExprKind::Index { base, index } => {
            walk(base, function_name, params, interner, tracker, out);
            walk(index, function_name, params, interner, tracker, out);
        }
        ExprKind::Pipeline { left, right, .. } => {
            walk(left, function_name, params, interner, tracker, out);
            walk(right, function_name, params, interner, tracker, out);
        }
        ExprKind::Map { list, func } | ExprKind::Filter { list, pred: func } => {
            walk(list, function_name, params, interner, tracker, out);
            walk(func, function_name, params, interner, tracker, out);
        }
        ExprKind::Fold { list, func, init } => {
            walk(list, function_name, params, interner, tracker, out);
            walk(func, function_name, params, interner, tracker, out);
            walk(init, function_name, params, interner, tracker, out);
        }
        ExprKind::WithMock { key, replacement, body } => {
            walk(key, function_name, params, interner, tracker, out);
            walk(replacement, function_name, params, interner, tracker, out);
            walk(body, function_name, params, interner, tracker, out);
        }
        ExprKind::Literal(_) | ExprKind::Ident(_) | ExprKind::MemberAccess { .. } => {}
    }
}

fn check_function(f: &FunctionDecl, interner: &StringInterner, out: &mut Vec<Diagnostic>) {
    if matches!(f.return_type, Type::Function { .. }) && calls_self(&f.body, f.name) {
        out.push(diagnostics::recursion_cps(f.span));
    }
    let param_names: Vec<Name> = f.params.iter().map(|p| p.name).collect();
    let mut tracker = AliasTracker::new(&param_names);
    walk(&f.body, f.name, &param_names, interner, &mut tracker, out);
}

fn calls_self(expr: &Expr, name: Name) -> bool {
    let mut found = false;
    find_self_call(expr, name, &mut found);
    found
}

fn find_self_call(expr: &Expr, name: Name, found: &mut bool) {
    if *found {
        return;
    }
    if let ExprKind::Apply { callee, args } = &expr.kind {
        if matches!(&callee.kind, ExprKind::Ident(n) if *n == name) {
            *found = true;
            return;
        }
        find_self_call(callee, name, found);
        for arg in args {
            find_self_call(arg, name, found);
        }
        return;
    }
    crate::walk::for_each_child(expr, &mut |child| find_self_call(child, name, found));
}

pub(crate) fn check(program: &Program, interner: &StringInterner, out: &mut Vec<Diagnostic>) {
    for decl in &program.declarations {
        if let Declaration::Function(f) = decl {
            check_function(f, interner, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ideo_ir::{Expr, ExprKind, Literal, MatchArm, Param, Span, StringInterner};

    fn ident(name: Name) -> Expr {
        Expr { kind: ExprKind::Ident(name), span: Span::default() }
    }

    fn int(n: i64) -> Expr {
        Expr { kind: ExprKind::Literal(Literal::Int(n)), span: Span::default() }
    }

    fn func(name: Name, params: Vec<Param>, return_type: Type, body: Expr) -> FunctionDecl {
        FunctionDecl { name, exported: false, mockable: false, params, effects: vec![], return_type, body, span: Span::default() }
    }

    #[test]
    fn decremented_parameter_is_not_flagged() {
        let mut interner = StringInterner::new();
        let f = interner.intern("countdown");
        let n = interner.intern("n");
        let body = Expr {
            kind: ExprKind::Apply {
                callee: Box::new(ident(f)),
                args: vec![Expr {
                    kind: ExprKind::Binary { op: BinaryOp::Sub, left: Box::new(ident(n)), right: Box::new(int(1)) },
                    span: Span::default(),
                }],
            },
            span: Span::default(),
        };
        let decl = func(f, vec![Param { name: n, ty: Type::Int, mutable: false, span: Span::default() }], Type::Int, body);
        let mut out = Vec::new();
        check_function(&decl, &interner, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn accumulated_parameter_is_flagged() {
        let mut interner = StringInterner::new();
        let f = interner.intern("sum_to");
        let n = interner.intern("n");
        let acc = interner.intern("acc");
        let body = Expr {
            kind: ExprKind::Apply {
                callee: Box::new(ident(f)),
                args: vec![
                    Expr { kind: ExprKind::Binary { op: BinaryOp::Sub, left: Box::new(ident(n)), right: Box::new(int(1)) }, span: Span::default() },
                    Expr { kind: ExprKind::Binary { op: BinaryOp::Add, left: Box::new(ident(acc)), right: Box::new(ident(n)) }, span: Span::default() },
                ],
            },
            span: Span::default(),
        };
        let decl = func(
            f,
            vec![
                Param { name: n, ty: Type::Int, mutable: false, span: Span::default() },
                Param { name: acc, ty: Type::Int, mutable: false, span: Span::default() },
            ],
            Type::Int,
            body,
        );
        let mut out = Vec::new();
        check_function(&decl, &interner, &mut out);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].code, ideo_diagnostic::ErrorCode::CanonRecursionAccumulator);
    }

    #[test]
    fn recursive_function_returning_a_function_is_cps() {
        let mut interner = StringInterner::new();
        let f = interner.intern("make_adder");
        let n = interner.intern("n");
        let ret_ty = Type::Function { params: vec![Type::Int], effects: vec![], ret: Box::new(Type::Int) };
        let body = Expr { kind: ExprKind::Apply { callee: Box::new(ident(f)), args: vec![ident(n)] }, span: Span::default() };
        let decl = func(f, vec![Param { name: n, ty: Type::Int, mutable: false, span: Span::default() }], ret_ty, body);
        let mut out = Vec::new();
        check_function(&decl, &interner, &mut out);
        assert!(out.iter().any(|d| d.code == ideo_diagnostic::ErrorCode::CanonRecursionCps));
    }

    #[test]
    fn decomposed_via_match_alias_is_not_flagged() {
        let mut interner = StringInterner::new();
        let f = interner.intern("length");
        let xs = interner.intern("xs");
        let h = interner.intern("h");
        let rest = interner.intern("rest");
        let recur = Expr { kind: ExprKind::Apply { callee: Box::new(ident(f)), args: vec![ident(rest)] }, span: Span::default() };
        let arms = vec![
            MatchArm { pattern: Pattern { kind: PatternKind::ListEmpty, span: Span::default() }, guard: None, body: int(0), span: Span::default() },
            MatchArm {
                pattern: Pattern {
                    kind: PatternKind::ListCons {
                        head: vec![Pattern { kind: PatternKind::Ident(h), span: Span::default() }],
                        rest: Some(Box::new(Pattern { kind: PatternKind::Ident(rest), span: Span::default() })),
                        tail: vec![],
                    },
                    span: Span::default(),
                },
                guard: None,
                body: recur,
                span: Span::default(),
            },
        ];
        let body = Expr { kind: ExprKind::Match { scrutinee: Box::new(ident(xs)), arms }, span: Span::default() };
        let decl = func(f, vec![Param { name: xs, ty: Type::List(Box::new(Type::Int)), mutable: false, span: Span::default() }], Type::Int, body);
        let mut out = Vec::new();
        check_function(&decl, &interner, &mut out);
        assert!(out.is_empty());
    }
}
