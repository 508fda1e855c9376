//! The bidirectional checker itself (§4.6): `synth` infers a type from an
//! expression, `check` verifies an expression against a type the caller
//! already expects. Every rule here mirrors one bullet of that section;
//! where the surface language leaves something ambiguous (member access
//! against an unknown name, `with_mock`'s replacement arity) the choice is
//! recorded in the crate's design notes rather than invented silently here.

use ideo_diagnostic::Diagnostic;
use ideo_ir::{
    BinaryOp, Expr, ExprKind, Literal, MatchArm, Name, Pattern, PatternKind, PipelineOp, Program, Span,
    StringInterner, Type, UnaryOp,
};
use ideo_patterns::ScrutineeShape;
use ideo_types::{types_equal, NamespaceRegistry, TypeDefinition, TypeEntry, TypeEnv};
use rustc_hash::FxHashMap;

use crate::diagnostics;
use crate::registration::{self, Imports, LocalSignatures};

/// A type definition resolved to its body, with any type-parameter
/// substitution from `Named[args]`/`Qualified[args]` already applied.
enum Resolved {
    Sum { variants: Vec<(Name, Vec<Type>)> },
    Product { fields: Vec<(Name, Type)> },
    Alias(Type),
}

pub struct Checker<'a> {
    interner: &'a StringInterner,
    registry: &'a NamespaceRegistry,
    module: Name,
    locals: &'a LocalSignatures,
    imports: &'a Imports,
    diagnostics: Vec<Diagnostic>,
}

/// Type-check every function body, const value, and test body of `program`
/// against its own signatures, this module's imports, and the cross-module
/// registry. Returns every diagnostic found; an empty vector means the
/// module type-checks cleanly.
pub fn check_module(
    interner: &mut StringInterner,
    module: Name,
    program: &Program,
    registry: &NamespaceRegistry,
) -> Vec<Diagnostic> {
    let locals = registration::collect(program);
    let imports = registration::collect_imports(interner, program);
    let interner: &StringInterner = interner;
    let mut checker = Checker {
        interner,
        registry,
        module,
        locals: &locals,
        imports: &imports,
        diagnostics: Vec::new(),
    };
    checker.check_program(program);
    checker.diagnostics
}

impl<'a> Checker<'a> {
    fn check_program(&mut self, program: &Program) {
        let module_env = self.module_env();
        for decl in &program.declarations {
            match decl {
                ideo_ir::Declaration::Function(f) => {
                    for p in &f.params {
                        self.check_type_well_formed(f.span, &p.ty);
                    }
                    self.check_type_well_formed(f.span, &f.return_type);
                    let mut env = module_env.child();
                    for p in &f.params {
                        env.bind(p.name, p.ty.clone());
                    }
                    self.check(&env, &f.body, &f.return_type);
                }
                ideo_ir::Declaration::Const(c) => {
                    self.check_type_well_formed(c.span, &c.ty);
                    self.check(&module_env, &c.value, &c.ty);
                }
                ideo_ir::Declaration::Test(t) => {
                    self.synth(&module_env, &t.body);
                }
                ideo_ir::Declaration::Type(_)
                | ideo_ir::Declaration::Import(_)
                | ideo_ir::Declaration::Extern(_) => {}
            }
        }
    }

    /// A `TypeEnv` with every top-level function and const of this module
    /// already bound, so a function body can call a sibling declared later
    /// in the file or recurse into itself.
    fn module_env(&self) -> TypeEnv {
        let mut env = TypeEnv::new();
        for (name, sig) in &self.locals.functions {
            env.bind(
                *name,
                Type::Function {
                    params: sig.params.clone(),
                    effects: sig.effects.clone(),
                    ret: Box::new(sig.return_type.clone()),
                },
            );
        }
        for (name, ty) in &self.locals.consts {
            env.bind(*name, ty.clone());
        }
        for (type_name, local_type) in &self.locals.types {
            if let TypeDefinition::Sum { variants } = &local_type.def {
                let result = Type::Named {
                    name: *type_name,
                    args: local_type.type_params.iter().map(|p| Type::Var(*p)).collect(),
                };
                for (variant_name, fields) in variants {
                    env.bind(
                        *variant_name,
                        Type::Function { params: fields.clone(), effects: Vec::new(), ret: Box::new(result.clone()) },
                    );
                }
            }
        }
        env
    }

    fn push(&mut self, diag: Diagnostic) {
        self.diagnostics.push(diag);
    }

    /// Recursively confirm every `Named`/`Qualified` reference inside a type
    /// annotation resolves to a declared type, local or cross-module.
    fn check_type_well_formed(&mut self, span: Span, ty: &Type) {
        match ty {
            Type::Int | Type::Float | Type::Bool | Type::String | Type::Char | Type::Unit | Type::Var(_) => {}
            Type::List(inner) => self.check_type_well_formed(span, inner),
            Type::Tuple(elems) => {
                for e in elems {
                    self.check_type_well_formed(span, e);
                }
            }
            Type::Map(k, v) => {
                self.check_type_well_formed(span, k);
                self.check_type_well_formed(span, v);
            }
            Type::Function { params, ret, .. } => {
                for p in params {
                    self.check_type_well_formed(span, p);
                }
                self.check_type_well_formed(span, ret);
            }
            Type::Named { name, args } => {
                if self.resolve_named(*name, args).is_none() {
                    let text = self.interner.resolve(*name).to_owned();
                    self.push(diagnostics::unknown_type(span, &text));
                }
                for a in args {
                    self.check_type_well_formed(span, a);
                }
            }
            Type::Qualified { module, name, args } => {
                if self.resolve_qualified(*module, *name, args).is_none() {
                    let text = self.interner.resolve(*name).to_owned();
                    self.push(diagnostics::unknown_type(span, &text));
                }
                for a in args {
                    self.check_type_well_formed(span, a);
                }
            }
        }
    }

    fn expect(&mut self, span: Span, expected: &Type, found: &Type) {
        if ideo_types::is_empty_list_placeholder(found) && matches!(expected, Type::List(_)) {
            return;
        }
        if !types_equal(expected, found) {
            self.push(diagnostics::type_mismatch(span, expected, found, self.interner));
        }
    }

    // -----------------------------------------------------------------
    // Checking mode
    // -----------------------------------------------------------------

    fn check(&mut self, env: &TypeEnv, expr: &Expr, expected: &Type) {
        match &expr.kind {
            ExprKind::ListLit(elems) if elems.is_empty() => {
                if !matches!(expected, Type::List(_)) {
                    self.push(diagnostics::ambiguous_empty_list(expr.span));
                }
            }
            ExprKind::If { cond, then_branch, else_branch } => {
                self.check(env, cond, &Type::Bool);
                match else_branch {
                    Some(else_branch) => {
                        self.check(env, then_branch, expected);
                        self.check(env, else_branch, expected);
                    }
                    None => self.check(env, then_branch, expected),
                }
            }
            ExprKind::Let { pattern, ty, value, body } => {
                self.check(env, value, ty);
                let mut child = env.child();
                self.bind_pattern(&mut child, pattern, ty);
                self.check(&child, body, expected);
            }
            ExprKind::Match { scrutinee, arms } => {
                self.check_match(env, scrutinee, arms, Some(expected));
            }
            _ => {
                let found = self.synth(env, expr);
                self.expect(expr.span, expected, &found);
            }
        }
    }

    // -----------------------------------------------------------------
    // Synthesis mode
    // -----------------------------------------------------------------

    fn synth(&mut self, env: &TypeEnv, expr: &Expr) -> Type {
        match &expr.kind {
            ExprKind::Literal(lit) => literal_type(lit),
            ExprKind::Ident(name) => match env.lookup(*name) {
                Some(ty) => ty.clone(),
                None => {
                    let text = self.interner.resolve(*name).to_owned();
                    self.push(diagnostics::unbound_name(expr.span, &text));
                    Type::Unit
                }
            },
            ExprKind::Lambda { params, effects, return_type, body } => {
                let mut child = env.child();
                for p in params {
                    child.bind(p.name, p.ty.clone());
                }
                self.check(&child, body, return_type);
                Type::Function {
                    params: params.iter().map(|p| p.ty.clone()).collect(),
                    effects: effects.clone(),
                    ret: Box::new(return_type.clone()),
                }
            }
            ExprKind::Apply { callee, args } => self.synth_apply(env, expr, callee, args),
            ExprKind::Binary { op, left, right } => self.synth_binary(env, expr, *op, left, right),
            ExprKind::Unary { op, operand } => self.synth_unary(env, expr, *op, operand),
            ExprKind::Match { scrutinee, arms } => {
                self.check_match(env, scrutinee, arms, None).unwrap_or(Type::Unit)
            }
            ExprKind::Let { pattern, ty, value, body } => {
                self.check(env, value, ty);
                let mut child = env.child();
                self.bind_pattern(&mut child, pattern, ty);
                self.synth(&child, body)
            }
            ExprKind::If { cond, then_branch, else_branch } => {
                self.check(env, cond, &Type::Bool);
                let then_ty = self.synth(env, then_branch);
                match else_branch {
                    Some(else_branch) => {
                        let else_ty = self.synth(env, else_branch);
                        if !types_equal(&then_ty, &else_ty) {
                            self.push(diagnostics::if_branch_mismatch(expr.span, &then_ty, &else_ty, self.interner));
                        }
                        then_ty
                    }
                    None => {
                        if !matches!(then_ty, Type::Unit) {
                            self.push(diagnostics::type_mismatch(expr.span, &Type::Unit, &then_ty, self.interner));
                        }
                        Type::Unit
                    }
                }
            }
            ExprKind::ListLit(elems) => self.synth_list(env, expr, elems),
            ExprKind::TupleLit(elems) => {
                Type::Tuple(elems.iter().map(|e| self.synth(env, e)).collect())
            }
            ExprKind::RecordLit(fields) => Type::Tuple(fields.iter().map(|(_, e)| self.synth(env, e)).collect()),
            ExprKind::Field { base, name } => self.synth_field(env, expr, base, *name),
            ExprKind::Index { base, index } => self.synth_index(env, expr, base, index),
            ExprKind::Pipeline { op, left, right } => self.synth_pipeline(env, expr, *op, left, right),
            ExprKind::Map { list, func } => self.synth_map(env, expr, list, func),
            ExprKind::Filter { list, pred } => self.synth_filter(env, expr, list, pred),
            ExprKind::Fold { list, func, init } => self.synth_fold(env, expr, list, func, init),
            ExprKind::MemberAccess { module, member } => self.synth_member_access(expr, *module, *member),
            ExprKind::WithMock { key, replacement, body } => {
                self.check(env, key, &Type::String);
                self.synth(env, replacement);
                self.synth(env, body)
            }
        }
    }

    fn synth_apply(&mut self, env: &TypeEnv, expr: &Expr, callee: &Expr, args: &[Expr]) -> Type {
        let callee_ty = self.synth(env, callee);
        let Type::Function { params, ret, .. } = callee_ty else {
            self.push(diagnostics::type_mismatch(
                expr.span,
                &Type::Function { params: vec![], effects: vec![], ret: Box::new(Type::Unit) },
                &callee_ty,
                self.interner,
            ));
            return Type::Unit;
        };
        if params.len() != args.len() {
            self.push(diagnostics::arity_mismatch(expr.span, params.len(), args.len()));
        }
        for (param_ty, arg) in params.iter().zip(args) {
            self.check(env, arg, param_ty);
        }
        *ret
    }

    fn synth_binary(&mut self, env: &TypeEnv, expr: &Expr, op: BinaryOp, left: &Expr, right: &Expr) -> Type {
        let left_ty = self.synth(env, left);
        let right_ty = self.synth(env, right);
        match op {
            BinaryOp::Add => {
                if is_string_numeric_coercion(&left_ty, &right_ty) {
                    return Type::String;
                }
                self.require_same_numeric(expr, &left_ty, &right_ty)
            }
            BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => {
                self.require_same_numeric(expr, &left_ty, &right_ty)
            }
            BinaryOp::Eq | BinaryOp::NotEq => {
                if !types_equal(&left_ty, &right_ty) {
                    self.push(diagnostics::type_mismatch(expr.span, &left_ty, &right_ty, self.interner));
                }
                Type::Bool
            }
            BinaryOp::Lt | BinaryOp::LtEq | BinaryOp::Gt | BinaryOp::GtEq => {
                if !is_orderable(&left_ty) || !types_equal(&left_ty, &right_ty) {
                    self.push(diagnostics::type_mismatch(expr.span, &left_ty, &right_ty, self.interner));
                }
                Type::Bool
            }
            BinaryOp::And | BinaryOp::Or => {
                self.expect(left.span, &Type::Bool, &left_ty);
                self.expect(right.span, &Type::Bool, &right_ty);
                Type::Bool
            }
            BinaryOp::Concat => {
                if !types_equal(&left_ty, &right_ty) || !matches!(left_ty, Type::List(_)) {
                    self.push(diagnostics::type_mismatch(expr.span, &left_ty, &right_ty, self.interner));
                }
                left_ty
            }
        }
    }

    fn require_same_numeric(&mut self, expr: &Expr, left: &Type, right: &Type) -> Type {
        if is_numeric(left) && types_equal(left, right) {
            left.clone()
        } else {
            self.push(diagnostics::type_mismatch(expr.span, left, right, self.interner));
            left.clone()
        }
    }

    fn synth_unary(&mut self, env: &TypeEnv, expr: &Expr, op: UnaryOp, operand: &Expr) -> Type {
        match op {
            UnaryOp::Not => {
                self.check(env, operand, &Type::Bool);
                Type::Bool
            }
            UnaryOp::Neg => {
                let ty = self.synth(env, operand);
                if !is_numeric(&ty) {
                    self.push(diagnostics::type_mismatch(expr.span, &Type::Int, &ty, self.interner));
                }
                ty
            }
            UnaryOp::Len => {
                let ty = self.synth(env, operand);
                if !matches!(ty, Type::List(_)) {
                    self.push(diagnostics::type_mismatch(expr.span, &Type::List(Box::new(Type::Int)), &ty, self.interner));
                }
                Type::Int
            }
        }
    }

    fn synth_list(&mut self, env: &TypeEnv, expr: &Expr, elems: &[Expr]) -> Type {
        let Some((first, rest)) = elems.split_first() else {
            self.push(diagnostics::ambiguous_empty_list(expr.span));
            return Type::Unit;
        };
        let elem_ty = self.synth(env, first);
        for e in rest {
            self.check(env, e, &elem_ty);
        }
        Type::List(Box::new(elem_ty))
    }

    fn synth_field(&mut self, env: &TypeEnv, expr: &Expr, base: &Expr, name: Name) -> Type {
        let base_ty = self.synth(env, base);
        let field_text = self.interner.resolve(name).to_owned();
        if let Type::Tuple(elems) = &base_ty {
            if let Ok(index) = field_text.parse::<usize>() {
                if let Some(ty) = elems.get(index) {
                    return ty.clone();
                }
            }
        }
        if let Some(fields) = self.product_fields(&base_ty) {
            if let Some((_, ty)) = fields.into_iter().find(|(n, _)| *n == name) {
                return ty;
            }
        }
        self.push(diagnostics::bad_field_access(expr.span, &field_text, &base_ty, self.interner));
        Type::Unit
    }

    fn synth_index(&mut self, env: &TypeEnv, expr: &Expr, base: &Expr, index: &Expr) -> Type {
        let base_ty = self.synth(env, base);
        match base_ty {
            Type::List(elem) => {
                self.check(env, index, &Type::Int);
                *elem
            }
            Type::Map(key, value) => {
                self.check(env, index, &key);
                *value
            }
            other => {
                self.push(diagnostics::type_mismatch(
                    expr.span,
                    &Type::List(Box::new(Type::Int)),
                    &other,
                    self.interner,
                ));
                Type::Unit
            }
        }
    }

    fn synth_pipeline(&mut self, env: &TypeEnv, expr: &Expr, op: PipelineOp, left: &Expr, right: &Expr) -> Type {
        match op {
            PipelineOp::Forward => {
                let f_ty = self.synth(env, right);
                let Type::Function { params, ret, .. } = f_ty else {
                    self.push(diagnostics::type_mismatch(expr.span, &function_placeholder(), &f_ty, self.interner));
                    return Type::Unit;
                };
                if params.len() != 1 {
                    self.push(diagnostics::arity_mismatch(expr.span, 1, params.len()));
                    return *ret;
                }
                self.check(env, left, &params[0]);
                *ret
            }
            PipelineOp::ComposeForward => {
                let f_ty = self.synth(env, left);
                let g_ty = self.synth(env, right);
                self.compose(expr, &f_ty, &g_ty)
            }
            PipelineOp::ComposeBackward => {
                let f_ty = self.synth(env, left);
                let g_ty = self.synth(env, right);
                // `f << g` applies `g` first, so the same composition shape
                // as `>>` applies with the operands swapped.
                self.compose(expr, &g_ty, &f_ty)
            }
        }
    }

    /// Compose `outer ∘ inner` (value flows `inner` then `outer`) into one
    /// function type, checking that `inner`'s return feeds `outer`'s param.
    fn compose(&mut self, expr: &Expr, inner: &Type, outer: &Type) -> Type {
        let (Type::Function { params: inner_params, ret: inner_ret, .. }, Type::Function { params: outer_params, ret: outer_ret, .. }) =
            (inner, outer)
        else {
            self.push(diagnostics::type_mismatch(expr.span, &function_placeholder(), inner, self.interner));
            return Type::Unit;
        };
        if outer_params.len() != 1 || !types_equal(&outer_params[0], inner_ret) {
            self.push(diagnostics::type_mismatch(expr.span, &outer_params[0].clone(), inner_ret, self.interner));
        }
        Type::Function {
            params: inner_params.clone(),
            effects: Vec::new(),
            ret: outer_ret.clone(),
        }
    }

    fn synth_map(&mut self, env: &TypeEnv, expr: &Expr, list: &Expr, func: &Expr) -> Type {
        let list_ty = self.synth(env, list);
        let Type::List(elem) = list_ty else {
            self.push(diagnostics::type_mismatch(expr.span, &Type::List(Box::new(Type::Int)), &list_ty, self.interner));
            return Type::List(Box::new(Type::Unit));
        };
        let func_ty = self.synth(env, func);
        let Type::Function { params, ret, .. } = func_ty else {
            self.push(diagnostics::type_mismatch(expr.span, &function_placeholder(), &func_ty, self.interner));
            return Type::List(Box::new(Type::Unit));
        };
        if params.len() != 1 || !types_equal(&params[0], &elem) {
            self.push(diagnostics::type_mismatch(expr.span, &elem, &params.first().cloned().unwrap_or(Type::Unit), self.interner));
        }
        Type::List(ret)
    }

    fn synth_filter(&mut self, env: &TypeEnv, expr: &Expr, list: &Expr, pred: &Expr) -> Type {
        let list_ty = self.synth(env, list);
        let Type::List(elem) = &list_ty else {
            self.push(diagnostics::type_mismatch(expr.span, &Type::List(Box::new(Type::Int)), &list_ty, self.interner));
            return list_ty;
        };
        let expected = Type::Function { params: vec![(**elem).clone()], effects: Vec::new(), ret: Box::new(Type::Bool) };
        self.check(env, pred, &expected);
        list_ty
    }

    fn synth_fold(&mut self, env: &TypeEnv, expr: &Expr, list: &Expr, func: &Expr, init: &Expr) -> Type {
        let list_ty = self.synth(env, list);
        let Type::List(elem) = list_ty else {
            self.push(diagnostics::type_mismatch(expr.span, &Type::List(Box::new(Type::Int)), &list_ty, self.interner));
            return self.synth(env, init);
        };
        let acc_ty = self.synth(env, init);
        let expected = Type::Function {
            params: vec![acc_ty.clone(), *elem],
            effects: Vec::new(),
            ret: Box::new(acc_ty.clone()),
        };
        self.check(env, func, &expected);
        acc_ty
    }

    fn synth_member_access(&mut self, expr: &Expr, module: Name, member: Name) -> Type {
        if let Some(members) = self.imports.externs.get(&module) {
            return match members.get(&member) {
                Some(ty) => ty.clone(),
                None => {
                    let module_text = self.interner.resolve(module).to_owned();
                    let member_text = self.interner.resolve(member).to_owned();
                    self.push(diagnostics::not_exported(expr.span, &module_text, &member_text));
                    Type::Unit
                }
            };
        }
        let Some(&canonical) = self.imports.modules.get(&module) else {
            let text = self.interner.resolve(module).to_owned();
            self.push(diagnostics::not_a_namespace(expr.span, &text));
            return Type::Unit;
        };
        if !self.registry.has_module(canonical) {
            let text = self.interner.resolve(canonical).to_owned();
            self.push(diagnostics::unknown_cross_module(expr.span, &text));
            return Type::Unit;
        }
        if let Some(sig) = self.registry.lookup_function(canonical, member) {
            if !sig.exported {
                self.report_not_exported(expr, module, member);
                return Type::Unit;
            }
            return Type::Function {
                params: sig.params.clone(),
                effects: sig.effects.clone(),
                ret: Box::new(sig.return_type.clone()),
            };
        }
        if let Some(c) = self.registry.lookup_const(canonical, member) {
            if !c.exported {
                self.report_not_exported(expr, module, member);
                return Type::Unit;
            }
            return c.ty.clone();
        }
        if let Some((type_name, entry, fields)) = self.registry.find_variant(canonical, member) {
            if !entry.exported {
                self.report_not_exported(expr, module, member);
                return Type::Unit;
            }
            let result = Type::Named { name: type_name, args: entry.type_params.iter().map(|p| Type::Var(*p)).collect() };
            return Type::Function { params: fields.to_vec(), effects: Vec::new(), ret: Box::new(result) };
        }
        self.report_not_exported(expr, module, member);
        Type::Unit
    }

    fn report_not_exported(&mut self, expr: &Expr, module: Name, member: Name) {
        let module_text = self.interner.resolve(module).to_owned();
        let member_text = self.interner.resolve(member).to_owned();
        self.push(diagnostics::not_exported(expr.span, &module_text, &member_text));
    }

    // -----------------------------------------------------------------
    // Match / patterns
    // -----------------------------------------------------------------

    /// Shared by synthesis and checking: the first arm's body establishes
    /// the match's result type in synthesis mode, while checking mode
    /// checks every arm directly against `expected`. Returns `None` only
    /// when synthesising over a match with no arms.
    fn check_match(
        &mut self,
        env: &TypeEnv,
        scrutinee: &Expr,
        arms: &[MatchArm],
        expected: Option<&Type>,
    ) -> Option<Type> {
        let scrutinee_ty = self.synth(env, scrutinee);
        self.check_exhaustive(scrutinee.span, &scrutinee_ty, arms);

        let mut result_ty = expected.cloned();
        for arm in arms {
            let mut child = env.child();
            self.bind_pattern(&mut child, &arm.pattern, &scrutinee_ty);
            if let Some(guard) = &arm.guard {
                self.check(&child, guard, &Type::Bool);
            }
            match &result_ty {
                Some(expected) => self.check(&child, &arm.body, expected),
                None => result_ty = Some(self.synth(&child, &arm.body)),
            }
        }
        result_ty
    }

    fn check_exhaustive(&mut self, span: Span, scrutinee_ty: &Type, arms: &[MatchArm]) {
        if matches!(scrutinee_ty, Type::Unit) {
            let covered = arms
                .iter()
                .any(|a| matches!(a.pattern.kind, PatternKind::Wildcard | PatternKind::Ident(_) | PatternKind::Literal(Literal::Unit)));
            if !covered {
                self.push(diagnostics::nonexhaustive(span, vec!["𝕌".to_owned()]));
            }
            return;
        }
        let Some(shape) = self.scrutinee_shape(scrutinee_ty) else { return };
        let patterns: Vec<Pattern> = arms.iter().map(|a| a.pattern.clone()).collect();
        let report = ideo_patterns::check(&shape, &patterns, self.interner);
        if !report.exhaustive {
            self.push(diagnostics::nonexhaustive(span, report.missing));
        }
    }

    fn scrutinee_shape(&mut self, ty: &Type) -> Option<ScrutineeShape> {
        match ty {
            Type::Int | Type::Float | Type::String | Type::Char | Type::Bool | Type::Map(..) | Type::Function { .. } => {
                Some(ScrutineeShape::Infinite)
            }
            Type::Unit => None,
            Type::List(_) => Some(ScrutineeShape::List),
            Type::Tuple(_) => Some(ScrutineeShape::Product),
            Type::Var(_) => None,
            Type::Named { name, args } => {
                let resolved = self.resolve_named(*name, args)?;
                self.shape_of_resolved(resolved)
            }
            Type::Qualified { module, name, args } => {
                let resolved = self.resolve_qualified(*module, *name, args)?;
                self.shape_of_resolved(resolved)
            }
        }
    }

    fn shape_of_resolved(&mut self, resolved: Resolved) -> Option<ScrutineeShape> {
        match resolved {
            Resolved::Sum { variants } => {
                Some(ScrutineeShape::Sum { variants: variants.into_iter().map(|(n, _)| n).collect() })
            }
            Resolved::Product { .. } => Some(ScrutineeShape::Product),
            Resolved::Alias(inner) => self.scrutinee_shape(&inner),
        }
    }

    // -----------------------------------------------------------------
    // Pattern binding
    // -----------------------------------------------------------------

    fn bind_pattern(&mut self, env: &mut TypeEnv, pattern: &Pattern, ty: &Type) {
        match &pattern.kind {
            PatternKind::Wildcard | PatternKind::Literal(_) => {}
            PatternKind::Ident(name) => env.bind(*name, ty.clone()),
            PatternKind::Tuple(elems) => {
                if let Type::Tuple(types) = ty {
                    for (p, t) in elems.iter().zip(types) {
                        self.bind_pattern(env, p, t);
                    }
                }
            }
            PatternKind::Record(fields) => {
                if let Some(product_fields) = self.product_fields(ty) {
                    for (name, p) in fields {
                        if let Some((_, t)) = product_fields.iter().find(|(n, _)| n == name) {
                            self.bind_pattern(env, p, t);
                        }
                    }
                }
            }
            PatternKind::ListEmpty => {}
            PatternKind::ListCons { head, rest, tail } => {
                if let Type::List(elem) = ty {
                    for p in head.iter().chain(tail) {
                        self.bind_pattern(env, p, elem);
                    }
                    if let Some(rest) = rest {
                        self.bind_pattern(env, rest, &Type::List(elem.clone()));
                    }
                }
            }
            PatternKind::Constructor { name, args } => {
                if let Some(variants) = self.resolve_named_variants(ty) {
                    if let Some((_, field_tys)) = variants.into_iter().find(|(n, _)| n == name) {
                        for (p, t) in args.iter().zip(&field_tys) {
                            self.bind_pattern(env, p, t);
                        }
                    }
                }
            }
        }
    }

    fn resolve_named_variants(&mut self, ty: &Type) -> Option<Vec<(Name, Vec<Type>)>> {
        let resolved = match ty {
            Type::Named { name, args } => self.resolve_named(*name, args)?,
            Type::Qualified { module, name, args } => self.resolve_qualified(*module, *name, args)?,
            _ => return None,
        };
        match resolved {
            Resolved::Sum { variants } => Some(variants),
            Resolved::Product { .. } => None,
            Resolved::Alias(inner) => self.resolve_named_variants(&inner),
        }
    }

    fn product_fields(&mut self, ty: &Type) -> Option<Vec<(Name, Type)>> {
        let resolved = match ty {
            Type::Named { name, args } => self.resolve_named(*name, args)?,
            Type::Qualified { module, name, args } => self.resolve_qualified(*module, *name, args)?,
            _ => return None,
        };
        match resolved {
            Resolved::Product { fields } => Some(fields),
            Resolved::Sum { .. } => None,
            Resolved::Alias(inner) => self.product_fields(&inner),
        }
    }

    fn resolve_named(&mut self, name: Name, args: &[Type]) -> Option<Resolved> {
        if let Some(local) = self.locals.types.get(&name) {
            return Some(instantiate(&local.type_params, &local.def, args));
        }
        let entry = self.registry.lookup_type(self.module, name)?.clone();
        Some(instantiate(&entry.type_params, &entry.def, args))
    }

    fn resolve_qualified(&mut self, module: Name, name: Name, args: &[Type]) -> Option<Resolved> {
        let canonical = *self.imports.modules.get(&module)?;
        let entry: TypeEntry = self.registry.lookup_type(canonical, name)?.clone();
        Some(instantiate(&entry.type_params, &entry.def, args))
    }
}

/// Substitute a type definition's own type parameters with the concrete
/// arguments a `Named[args]`/`Qualified[args]` usage supplied. Not full
/// unification — every parameter is always fully applied here, since this
/// language has no partial type application.
fn instantiate(type_params: &[Name], def: &TypeDefinition, args: &[Type]) -> Resolved {
    let subst: FxHashMap<Name, Type> = type_params.iter().copied().zip(args.iter().cloned()).collect();
    match def {
        TypeDefinition::Sum { variants } => Resolved::Sum {
            variants: variants
                .iter()
                .map(|(name, fields)| (*name, fields.iter().map(|t| substitute(t, &subst)).collect()))
                .collect(),
        },
        TypeDefinition::Product { fields } => Resolved::Product {
            fields: fields.iter().map(|(n, t)| (*n, substitute(t, &subst))).collect(),
        },
        TypeDefinition::Alias(inner) => Resolved::Alias(substitute(inner, &subst)),
    }
}

fn substitute(ty: &Type, subst: &FxHashMap<Name, Type>) -> Type {
    match ty {
        Type::Var(name) => subst.get(name).cloned().unwrap_or_else(|| ty.clone()),
        Type::List(inner) => Type::List(Box::new(substitute(inner, subst))),
        Type::Tuple(elems) => Type::Tuple(elems.iter().map(|t| substitute(t, subst)).collect()),
        Type::Map(k, v) => Type::Map(Box::new(substitute(k, subst)), Box::new(substitute(v, subst))),
        Type::Function { params, effects, ret } => Type::Function {
            params: params.iter().map(|t| substitute(t, subst)).collect(),
            effects: effects.clone(),
            ret: Box::new(substitute(ret, subst)),
        },
        Type::Named { name, args } => Type::Named { name: *name, args: args.iter().map(|t| substitute(t, subst)).collect() },
        Type::Qualified { module, name, args } => Type::Qualified {
            module: *module,
            name: *name,
            args: args.iter().map(|t| substitute(t, subst)).collect(),
        },
        Type::Int | Type::Float | Type::Bool | Type::String | Type::Char | Type::Unit => ty.clone(),
    }
}

fn literal_type(lit: &Literal) -> Type {
    match lit {
        Literal::Int(_) => Type::Int,
        Literal::Float(_) => Type::Float,
        Literal::Bool(_) => Type::Bool,
        Literal::Str(_) => Type::String,
        Literal::Char(_) => Type::Char,
        Literal::Unit => Type::Unit,
    }
}

fn is_numeric(ty: &Type) -> bool {
    matches!(ty, Type::Int | Type::Float)
}

fn is_orderable(ty: &Type) -> bool {
    matches!(ty, Type::Int | Type::Float | Type::String | Type::Char)
}

fn is_string_numeric_coercion(left: &Type, right: &Type) -> bool {
    (matches!(left, Type::String) && is_numeric(right)) || (matches!(right, Type::String) && is_numeric(left))
}

fn function_placeholder() -> Type {
    Type::Function { params: vec![], effects: vec![], ret: Box::new(Type::Unit) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ideo_ir::{ConstDecl, Declaration, FunctionDecl, ImportDecl, Param};

    fn span() -> Span {
        Span::default()
    }

    fn lit(n: i64) -> Expr {
        Expr { kind: ExprKind::Literal(Literal::Int(n)), span: span() }
    }

    #[test]
    fn literal_const_type_checks() {
        let mut interner = StringInterner::new();
        let name = interner.intern("answer");
        let program = Program {
            declarations: vec![Declaration::Const(ConstDecl {
                name,
                exported: false,
                ty: Type::Int,
                value: lit(42),
                span: span(),
            })],
            span: span(),
        };
        let registry = NamespaceRegistry::new();
        let module = interner.intern("m");
        let diags = check_module(&mut interner, module, &program, &registry);
        assert!(diags.is_empty());
    }

    #[test]
    fn mismatched_const_type_is_reported() {
        let mut interner = StringInterner::new();
        let name = interner.intern("answer");
        let program = Program {
            declarations: vec![Declaration::Const(ConstDecl {
                name,
                exported: false,
                ty: Type::String,
                value: lit(42),
                span: span(),
            })],
            span: span(),
        };
        let registry = NamespaceRegistry::new();
        let module = interner.intern("m");
        let diags = check_module(&mut interner, module, &program, &registry);
        assert_eq!(diags.len(), 1);
    }

    #[test]
    fn string_plus_int_coerces_to_string() {
        let mut interner = StringInterner::new();
        let name = interner.intern("greeting");
        let value = Expr {
            kind: ExprKind::Binary {
                op: BinaryOp::Add,
                left: Box::new(Expr { kind: ExprKind::Literal(Literal::Str("n=".into())), span: span() }),
                right: Box::new(lit(1)),
            },
            span: span(),
        };
        let program = Program {
            declarations: vec![Declaration::Const(ConstDecl { name, exported: false, ty: Type::String, value, span: span() })],
            span: span(),
        };
        let registry = NamespaceRegistry::new();
        let module = interner.intern("m");
        let diags = check_module(&mut interner, module, &program, &registry);
        assert!(diags.is_empty());
    }

    #[test]
    fn recursive_function_resolves_against_its_own_signature() {
        let mut interner = StringInterner::new();
        let fact = interner.intern("fact");
        let n = interner.intern("n");
        let body = Expr {
            kind: ExprKind::If {
                cond: Box::new(Expr {
                    kind: ExprKind::Binary {
                        op: BinaryOp::Eq,
                        left: Box::new(Expr { kind: ExprKind::Ident(n), span: span() }),
                        right: Box::new(lit(0)),
                    },
                    span: span(),
                }),
                then_branch: Box::new(lit(1)),
                else_branch: Some(Box::new(Expr {
                    kind: ExprKind::Binary {
                        op: BinaryOp::Mul,
                        left: Box::new(Expr { kind: ExprKind::Ident(n), span: span() }),
                        right: Box::new(Expr {
                            kind: ExprKind::Apply {
                                callee: Box::new(Expr { kind: ExprKind::Ident(fact), span: span() }),
                                args: vec![lit(0)],
                            },
                            span: span(),
                        }),
                    },
                    span: span(),
                })),
            },
            span: span(),
        };
        let program = Program {
            declarations: vec![Declaration::Function(FunctionDecl {
                name: fact,
                exported: false,
                mockable: false,
                params: vec![Param { name: n, ty: Type::Int, mutable: false, span: span() }],
                effects: vec![],
                return_type: Type::Int,
                body,
                span: span(),
            })],
            span: span(),
        };
        let registry = NamespaceRegistry::new();
        let module = interner.intern("m");
        let diags = check_module(&mut interner, module, &program, &registry);
        assert!(diags.is_empty());
    }

    #[test]
    fn unbound_name_is_reported() {
        let mut interner = StringInterner::new();
        let name = interner.intern("oops");
        let missing = interner.intern("nope");
        let program = Program {
            declarations: vec![Declaration::Const(ConstDecl {
                name,
                exported: false,
                ty: Type::Int,
                value: Expr { kind: ExprKind::Ident(missing), span: span() },
                span: span(),
            })],
            span: span(),
        };
        let registry = NamespaceRegistry::new();
        let module = interner.intern("m");
        let diags = check_module(&mut interner, module, &program, &registry);
        assert_eq!(diags.len(), 1);
    }

    #[test]
    fn import_segments_join_into_the_registry_key() {
        let mut interner = StringInterner::new();
        let src = interner.intern("src");
        let util = interner.intern("util");
        let add = interner.intern("add");
        let name = interner.intern("result");

        let mut registry = NamespaceRegistry::new();
        let util_module_id = interner.intern("src/util");
        let util_program = Program {
            declarations: vec![Declaration::Function(FunctionDecl {
                name: add,
                exported: true,
                mockable: false,
                params: vec![],
                effects: vec![],
                return_type: Type::Int,
                body: lit(0),
                span: span(),
            })],
            span: span(),
        };
        registry.register_module(util_module_id, &util_program);

        let access = Expr { kind: ExprKind::MemberAccess { module: util, member: add }, span: span() };
        let program = Program {
            declarations: vec![
                Declaration::Import(ImportDecl { segments: vec![src, util], span: span() }),
                Declaration::Const(ConstDecl { name, exported: false, ty: Type::Int, value: access, span: span() }),
            ],
            span: span(),
        };
        let consumer_module = interner.intern("src/consumer");
        let diags = check_module(&mut interner, consumer_module, &program, &registry);
        assert!(diags.is_empty(), "{diags:?}");
    }
}
