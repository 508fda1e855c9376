//! Top-level declaration emission (§4.9).
//!
//! Types contribute runtime code only for sum variants, which become
//! callable factory functions (§4.7 Variant construction: even a nullary
//! variant is called as `Variant()`, so it has to exist as a function).
//! Consts and user functions emit directly. Tests emit as an exported
//! nullary async function plus one metadata entry collected for the
//! module's final `__ideoTests` export.

use ideo_ir::{ConstDecl, Declaration, FunctionDecl, Span, SumVariant, TestDecl, TypeDecl, TypeDef};

use crate::emitter::ModuleEmitter;
use crate::expr;
use crate::format::{span_expr, string_literal};

/// One test's metadata, mirroring `ideo_ir::TestDecl` but carrying the
/// emitted function name and, when the body is a plain comparison, the
/// spans either side of the operator (§4.9 Test metadata).
pub(crate) struct TestMeta {
    pub(crate) id: usize,
    pub(crate) description: String,
    pub(crate) js_fn: String,
    pub(crate) location: Span,
    pub(crate) declared_effects: Vec<String>,
    pub(crate) assertion: Option<AssertionMeta>,
}

/// Part of this crate's public surface: a test runner built on top of
/// `emit_module` reads this to render a comparison failure without
/// re-parsing the generated source.
pub struct AssertionMeta {
    pub operator: &'static str,
    pub left_span: Span,
    pub right_span: Span,
}

/// Emit one declaration, appending any generated test metadata to `tests`.
/// Returns `None` for declarations that contribute no runtime code
/// (product/alias types, imports, externs).
pub(crate) fn emit(ctx: &ModuleEmitter<'_>, decl: &Declaration, next_test_id: &mut usize, tests: &mut Vec<TestMeta>) -> Option<String> {
    match decl {
        Declaration::Type(t) => emit_type(ctx, t),
        Declaration::Const(c) => Some(emit_const(ctx, c)),
        Declaration::Function(f) => Some(emit_function(ctx, f)),
        Declaration::Test(t) => Some(emit_test(ctx, t, next_test_id, tests)),
        Declaration::Import(_) | Declaration::Extern(_) => None,
    }
}

fn emit_type(ctx: &ModuleEmitter<'_>, decl: &TypeDecl) -> Option<String> {
    match &decl.def {
        TypeDef::Sum(variants) => {
            let mut out = String::new();
            for (i, variant) in variants.iter().enumerate() {
                if i > 0 {
                    out.push('\n');
                }
                out.push_str(&export_prefix(decl.exported));
                out.push_str(&emit_variant_factory(ctx, variant));
            }
            Some(out)
        }
        // Product types and aliases are erased: every structural value
        // they describe is already a plain JS object or array at runtime,
        // with nothing left for a type declaration itself to emit.
        TypeDef::Product(_) | TypeDef::Alias(_) => None,
    }
}

fn emit_variant_factory(ctx: &ModuleEmitter<'_>, variant: &SumVariant) -> String {
    let name = ctx.resolve(variant.name);
    let params: Vec<String> = (0..variant.fields.len()).map(|i| format!("__f{i}")).collect();
    let params_js = params.join(", ");
    let fields_js = params.join(", ");
    let tag = string_literal(name);
    format!("async function {name}({params_js}) {{ return {{ tag: {tag}, fields: [{fields_js}] }}; }}")
}

/// `"export "` when `exported`, else empty — shared by every declaration
/// form that can cross a module boundary.
fn export_prefix(exported: bool) -> &'static str {
    if exported {
        "export "
    } else {
        ""
    }
}

fn emit_const(ctx: &ModuleEmitter<'_>, decl: &ConstDecl) -> String {
    let name = ctx.resolve(decl.name);
    format!("{}const {name} = {};", export_prefix(decl.exported), expr::emit(ctx, &decl.value))
}

fn emit_function(ctx: &ModuleEmitter<'_>, decl: &FunctionDecl) -> String {
    let name = ctx.resolve(decl.name);
    let params_js = decl.params.iter().map(|p| ctx.resolve(p.name).to_owned()).collect::<Vec<_>>().join(", ");
    // `main` is always exported regardless of its own `exported` flag: the
    // runnable-entry command needs to import and call it from a separately
    // generated runner stub, and a file under tests/ never has to write
    // `export` on its own `main` to make that possible.
    let exported = decl.exported || name == "main";
    format!("{}async function {name}({params_js}) {{ return {}; }}", export_prefix(exported), expr::emit(ctx, &decl.body))
}

fn emit_test(ctx: &ModuleEmitter<'_>, decl: &TestDecl, next_test_id: &mut usize, tests: &mut Vec<TestMeta>) -> String {
    let id = *next_test_id;
    *next_test_id += 1;
    let js_fn = format!("__ideo_test_{id}");

    let assertion = comparison_assertion(decl);

    tests.push(TestMeta {
        id,
        description: decl.description.clone(),
        js_fn: js_fn.clone(),
        location: decl.span,
        declared_effects: decl.effects.iter().map(|e| ctx.resolve(*e).to_owned()).collect(),
        assertion,
    });

    format!("async function {js_fn}() {{ return {}; }}", expr::emit(ctx, &decl.body))
}

/// When a test's whole body is a binary comparison, capture the operator
/// and the spans either side of it so a test runner can render a useful
/// diff on failure without re-parsing the source (§4.9 Test metadata).
fn comparison_assertion(decl: &TestDecl) -> Option<AssertionMeta> {
    let ideo_ir::ExprKind::Binary { op, left, right } = &decl.body.kind else {
        return None;
    };
    let operator = comparison_operator(*op)?;
    Some(AssertionMeta { operator, left_span: left.span, right_span: right.span })
}

fn comparison_operator(op: ideo_ir::BinaryOp) -> Option<&'static str> {
    use ideo_ir::BinaryOp::{Eq, Gt, GtEq, Lt, LtEq, NotEq};
    match op {
        Eq => Some("=="),
        NotEq => Some("!="),
        Lt => Some("<"),
        LtEq => Some("<="),
        Gt => Some(">"),
        GtEq => Some(">="),
        _ => None,
    }
}

/// Render one `TestMeta` as a JS object literal entry for `__ideoTests`.
pub(crate) fn test_meta_expr(meta: &TestMeta) -> String {
    let assertion_js = match &meta.assertion {
        Some(a) => format!(
            "{{ kind: \"comparison\", operator: {}, leftSpan: {}, rightSpan: {} }}",
            string_literal(a.operator),
            span_expr(a.left_span),
            span_expr(a.right_span)
        ),
        None => "null".to_owned(),
    };
    let effects_js =
        meta.declared_effects.iter().map(|e| string_literal(e)).collect::<Vec<_>>().join(", ");
    format!(
        "{{ id: {}, name: {}, fn: {}, location: {}, declaredEffects: [{effects_js}], assertion: {assertion_js} }}",
        meta.id,
        string_literal(&meta.description),
        meta.js_fn,
        span_expr(meta.location)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use ideo_ir::{BinaryOp, Expr, ExprKind, Literal, Program, StringInterner};
    use ideo_types::NamespaceRegistry;

    fn unit_expr() -> Expr {
        Expr { kind: ExprKind::Literal(Literal::Unit), span: Span::default() }
    }

    #[test]
    fn nullary_variant_factory_takes_no_parameters() {
        let mut interner = StringInterner::new();
        let module = interner.intern("src/main");
        let none = interner.intern("None");
        let program = Program { declarations: vec![], span: Span::default() };
        let registry = NamespaceRegistry::new();
        let (ctx, _imports) = ModuleEmitter::new(&mut interner, &registry, module, &program);

        let variant = SumVariant { name: none, fields: vec![], span: Span::default() };
        let js = emit_variant_factory(&ctx, &variant);
        assert_eq!(js, "async function None() { return { tag: \"None\", fields: [] }; }");
    }

    #[test]
    fn comparison_assertion_captures_operator_and_spans() {
        let left = Expr { kind: ExprKind::Literal(Literal::Int(1)), span: Span::default() };
        let right = Expr { kind: ExprKind::Literal(Literal::Int(2)), span: Span::default() };
        let body = Expr {
            kind: ExprKind::Binary { op: BinaryOp::Eq, left: Box::new(left), right: Box::new(right) },
            span: Span::default(),
        };
        let decl = TestDecl { description: "one equals two".to_owned(), effects: vec![], body, span: Span::default() };
        let assertion = comparison_assertion(&decl).expect("binary comparison body should yield an assertion");
        assert_eq!(assertion.operator, "==");
    }

    #[test]
    fn non_comparison_body_has_no_assertion() {
        let decl = TestDecl { description: "trivial".to_owned(), effects: vec![], body: unit_expr(), span: Span::default() };
        assert!(comparison_assertion(&decl).is_none());
    }
}
