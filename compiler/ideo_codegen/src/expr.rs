//! Expression lowering (§4.9): the core recursive traversal, mirroring the
//! shape of the teacher's own expression-evaluation helpers, but each
//! branch emits source text into a `String` instead of producing a
//! runtime `Value`.
//!
//! # Async boundary
//!
//! Every call site — a direct application, a forward pipeline, a
//! composed pipeline — is awaited (§4.9 Async boundary). A call whose
//! callee is a locally declared `mockable` function, or a cross-module
//! function the registry marks `mockable`, or an extern member, is routed
//! through the mocking preamble's `__ideoCall` so `with_mock` can
//! intercept it; every other call is a direct `await callee(args)`.

use ideo_ir::{Expr, ExprKind, MatchArm, PipelineOp};
use ideo_stack::ensure_sufficient_stack;

use crate::emitter::ModuleEmitter;
use crate::format::literal_expr;
use crate::intrinsics;
use crate::mock_keys::{extern_key, function_key};
use crate::pattern;

pub(crate) fn emit(ctx: &ModuleEmitter<'_>, expr: &Expr) -> String {
    ensure_sufficient_stack(|| emit_inner(ctx, expr))
}

fn emit_inner(ctx: &ModuleEmitter<'_>, expr: &Expr) -> String {
    match &expr.kind {
        ExprKind::Literal(lit) => literal_expr(lit),
        ExprKind::Ident(name) => ctx.resolve(*name).to_owned(),
        ExprKind::Lambda { params, body, .. } => {
            let params_js = params.iter().map(|p| ctx.resolve(p.name).to_owned()).collect::<Vec<_>>().join(", ");
            format!("(async ({params_js}) => ({}))", emit(ctx, body))
        }
        ExprKind::Apply { callee, args } => {
            let arg_texts: Vec<String> = args.iter().map(|a| emit(ctx, a)).collect();
            emit_call(ctx, callee, &arg_texts)
        }
        ExprKind::Binary { op, left, right } => {
            format!("({} {} {})", emit(ctx, left), crate::operators::binary_op_str(*op), emit(ctx, right))
        }
        ExprKind::Unary { op, operand } => emit_unary(ctx, *op, operand),
        ExprKind::Match { scrutinee, arms } => emit_match(ctx, scrutinee, arms),
        ExprKind::Let { pattern, value, body, .. } => emit_let(ctx, pattern, value, body),
        ExprKind::If { cond, then_branch, else_branch } => {
            let cond_js = emit(ctx, cond);
            let then_js = emit(ctx, then_branch);
            match else_branch {
                Some(else_branch) => format!("({cond_js} ? {then_js} : {})", emit(ctx, else_branch)),
                None => format!("({cond_js} ? {then_js} : undefined)"),
            }
        }
        ExprKind::ListLit(elems) => {
            format!("[{}]", elems.iter().map(|e| emit(ctx, e)).collect::<Vec<_>>().join(", "))
        }
        ExprKind::TupleLit(elems) => {
            format!("[{}]", elems.iter().map(|e| emit(ctx, e)).collect::<Vec<_>>().join(", "))
        }
        ExprKind::RecordLit(fields) => {
            let body = fields
                .iter()
                .map(|(name, value)| format!("{}: {}", ctx.resolve(*name), emit(ctx, value)))
                .collect::<Vec<_>>()
                .join(", ");
            format!("{{ {body} }}")
        }
        ExprKind::Field { base, name } => format!("{}.{}", emit(ctx, base), ctx.resolve(*name)),
        ExprKind::Index { base, index } => format!("{}[{}]", emit(ctx, base), emit(ctx, index)),
        ExprKind::Pipeline { op, left, right } => emit_pipeline(ctx, *op, left, right),
        ExprKind::Map { list, func } => format!("(await __ideoMap({}, {}))", emit(ctx, list), emit(ctx, func)),
        ExprKind::Filter { list, pred } => format!("(await __ideoFilter({}, {}))", emit(ctx, list), emit(ctx, pred)),
        ExprKind::Fold { list, func, init } => {
            format!("(await __ideoFold({}, {}, {}))", emit(ctx, list), emit(ctx, func), emit(ctx, init))
        }
        ExprKind::MemberAccess { module, member } => emit_member_value(ctx, *module, *member),
        ExprKind::WithMock { key, replacement, body } => {
            format!(
                "(await __ideoWithMock({}, {}, async () => ({})))",
                emit(ctx, key),
                emit(ctx, replacement),
                emit(ctx, body)
            )
        }
    }
}

fn emit_unary(ctx: &ModuleEmitter<'_>, op: ideo_ir::UnaryOp, operand: &Expr) -> String {
    if op == ideo_ir::UnaryOp::Len {
        format!("({}).length", emit(ctx, operand))
    } else {
        format!("({}{})", crate::operators::unary_op_prefix(op), emit(ctx, operand))
    }
}

/// A bare `module⋅member` reference used as a value, not applied —
/// passing an exported const or a function itself (e.g. as the callback
/// to `map`/`filter`/`fold`) rather than calling it at this syntactic
/// position.
fn emit_member_value(ctx: &ModuleEmitter<'_>, module: ideo_ir::Name, member: ideo_ir::Name) -> String {
    format!("{}.{}", ctx.resolve(module), ctx.resolve(member))
}

/// Emit a call, choosing mock-registry indirection when the callee is a
/// reference this module (or the cross-module registry) knows is
/// mockable (§4.9 Mocking runtime).
pub(crate) fn emit_call(ctx: &ModuleEmitter<'_>, callee: &Expr, arg_texts: &[String]) -> String {
    let args = arg_texts.join(", ");
    match &callee.kind {
        ExprKind::Ident(name) if ctx.is_local_mockable(*name) => {
            let key = function_key(&ctx.module_id_str, ctx.resolve(*name));
            let name_js = ctx.resolve(*name);
            format!("(await __ideoCall({}, {name_js}, [{args}]))", crate::format::string_literal(&key))
        }
        ExprKind::Ident(name) => format!("(await {}({args}))", ctx.resolve(*name)),
        ExprKind::MemberAccess { module, member } => emit_member_call(ctx, *module, *member, &args),
        _ => format!("(await ({})({args}))", emit(ctx, callee)),
    }
}

fn emit_member_call(ctx: &ModuleEmitter<'_>, module: ideo_ir::Name, member: ideo_ir::Name, args: &str) -> String {
    let member_js = format!("{}.{}", ctx.resolve(module), ctx.resolve(member));

    if let Some(path) = ctx.local_extern_path(module) {
        let key = extern_key(path, ctx.resolve(member));
        return format!("(await __ideoCall({}, {member_js}, [{args}]))", crate::format::string_literal(&key));
    }

    let Some(canonical) = ctx.import_target(module) else {
        // Unreachable once upstream type checking has passed: every
        // `module⋅member` callee resolves to either a local extern alias
        // or an imported module, never neither.
        return format!("(await {member_js}({args}))");
    };
    let canonical_str = ctx.resolve(canonical);

    if let Some(intrinsic) = intrinsics::lookup(canonical_str, ctx.resolve(member)) {
        return format!("(await ({intrinsic})({args}))");
    }

    let mockable = ctx.registry.lookup_function(canonical, member).is_some_and(|sig| sig.mockable);
    if mockable {
        let key = function_key(canonical_str, ctx.resolve(member));
        format!("(await __ideoCall({}, {member_js}, [{args}]))", crate::format::string_literal(&key))
    } else {
        format!("(await {member_js}({args}))")
    }
}

fn emit_pipeline(ctx: &ModuleEmitter<'_>, op: PipelineOp, left: &Expr, right: &Expr) -> String {
    match op {
        // `x |> f` == `f(x)`: a direct application, routed through the
        // same mock-aware call emission as any other `Apply`.
        PipelineOp::Forward => {
            let arg = emit(ctx, left);
            emit_call(ctx, right, &[arg])
        }
        // `f >> g` == `λx. g(f(x))`
        PipelineOp::ComposeForward => {
            let inner = emit_call(ctx, left, &["__x".to_owned()]);
            let outer = emit_call(ctx, right, &[inner]);
            format!("(async (__x) => {outer})")
        }
        // `f << g` == `λx. f(g(x))`
        PipelineOp::ComposeBackward => {
            let inner = emit_call(ctx, right, &["__x".to_owned()]);
            let outer = emit_call(ctx, left, &[inner]);
            format!("(async (__x) => {outer})")
        }
    }
}

/// `l pattern = value in body`: every binding this pattern introduces is
/// irrefutable by construction (canon/type-checking only ever admits
/// irrefutable let-patterns), so there's no test to guard, only bindings.
fn emit_let(ctx: &ModuleEmitter<'_>, pat: &ideo_ir::Pattern, value: &Expr, body: &Expr) -> String {
    let value_js = emit(ctx, value);
    let lowered = pattern::lower(ctx.interner, pat, "__let_value");
    let mut stmts = String::new();
    stmts.push_str(&format!("const __let_value = {value_js};"));
    for (name, rhs) in &lowered.bindings {
        stmts.push_str(&format!(" const {name} = {rhs};"));
    }
    format!("(await (async () => {{ {stmts} return {}; }})())", emit(ctx, body))
}

fn emit_match(ctx: &ModuleEmitter<'_>, scrutinee: &Expr, arms: &[MatchArm]) -> String {
    let scrutinee_js = emit(ctx, scrutinee);
    let mut body = format!("const __scrutinee = {scrutinee_js};");
    for arm in arms {
        let lowered = pattern::lower(ctx.interner, &arm.pattern, "__scrutinee");
        let mut block = String::new();
        for (name, rhs) in &lowered.bindings {
            block.push_str(&format!("const {name} = {rhs}; "));
        }
        let arm_body_js = emit(ctx, &arm.body);
        match &arm.guard {
            Some(guard) => {
                block.push_str(&format!("if ({}) {{ return {arm_body_js}; }}", emit(ctx, guard)));
            }
            None => {
                block.push_str(&format!("return {arm_body_js};"));
            }
        }
        body.push_str(&format!(" if ({}) {{ {block} }}", lowered.test_expr()));
    }
    body.push_str(" throw new Error(\"no pattern matched\");");
    format!("(await (async () => {{ {body} }})())")
}
