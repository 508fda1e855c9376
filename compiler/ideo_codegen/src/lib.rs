//! Lowers one canon-validated, type-checked module to JavaScript-shaped
//! text (§4.9 Code generator).
//!
//! This crate never re-checks anything the earlier phases already
//! guaranteed: exhaustiveness, mutability, and typing are assumed to have
//! already passed. It only needs the raw AST plus the shared
//! [`NamespaceRegistry`] every module is registered into as it is
//! compiled, since no elaborated/typed IR is handed down from
//! `ideo_typeck` (`check_module` returns diagnostics only).
//!
//! Every generated module is an ES module (`.mjs`) with one fixed
//! preamble implementing the mocking runtime, followed by one emitted
//! item per source declaration in source order, followed by an exported
//! `__ideoTests` array describing every test this module declared.

mod decl;
mod emitter;
mod expr;
mod format;
mod imports;
mod intrinsics;
mod mock_keys;
mod operators;
mod pattern;
mod preamble;

use ideo_diagnostic::CompileResult;
use ideo_ir::{Name, Program, Span, StringInterner};
use ideo_types::NamespaceRegistry;
use tracing::debug;

pub use decl::AssertionMeta;

/// Everything generating one module produces: the `.mjs` source text, and
/// the metadata for every test it declared (so a test runner built on top
/// of this crate doesn't have to re-parse the emitted source to find
/// them).
#[derive(Debug)]
pub struct ModuleOutput {
    pub source: String,
    pub tests: Vec<TestMeta>,
}

/// One test's runtime-facing description, re-exported at crate level so
/// callers never need to reach into `decl`.
#[derive(Debug)]
pub struct TestMeta {
    pub id: usize,
    pub name: String,
    pub location: Span,
    pub declared_effects: Vec<String>,
    pub assertion: Option<AssertionMeta>,
}

/// Lower `program` (the module registered under `module_id` in
/// `registry`) to JavaScript-shaped text.
///
/// `interner` is taken mutably for the same reason `ideo_typeck::check_module`
/// takes it mutably: resolving an import's segments into one canonical,
/// `/`-joined module id requires interning that joined string, and
/// `StringInterner` has no read-only way to ask "does this text already
/// have a `Name`".
pub fn emit_module(
    interner: &mut StringInterner,
    module_id: Name,
    program: &Program,
    registry: &NamespaceRegistry,
) -> CompileResult<ModuleOutput> {
    debug!(module = interner.resolve(module_id), "emitting module");

    let (ctx, imports) = emitter::ModuleEmitter::new(interner, registry, module_id, program);

    let mut source = String::new();
    for import in &imports {
        source.push_str(&format!("import * as {} from \"{}\";\n", import.alias, import.specifier));
    }
    if !imports.is_empty() {
        source.push('\n');
    }
    source.push_str(preamble::PREAMBLE);
    source.push('\n');

    let mut next_test_id = 0usize;
    let mut tests = Vec::new();
    for declaration in &program.declarations {
        if let Some(text) = decl::emit(&ctx, declaration, &mut next_test_id, &mut tests) {
            source.push_str(&text);
            source.push_str("\n\n");
        }
    }

    let exported_names: Vec<String> = tests.iter().map(|t| t.js_fn.clone()).collect();
    source.push_str(&format!(
        "export const __ideoTests = [{}];\n",
        tests.iter().map(decl::test_meta_expr).collect::<Vec<_>>().join(", ")
    ));
    if !exported_names.is_empty() {
        source.push_str(&format!("export {{ {} }};\n", exported_names.join(", ")));
    }

    let tests = tests
        .into_iter()
        .map(|t| TestMeta {
            id: t.id,
            name: t.description,
            location: t.location,
            declared_effects: t.declared_effects,
            assertion: t.assertion,
        })
        .collect();

    Ok(ModuleOutput { source, tests })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ideo_ir::{BinaryOp, ConstDecl, Declaration, Expr, ExprKind, Literal, Type};

    fn int(n: i64) -> Expr {
        Expr { kind: ExprKind::Literal(Literal::Int(n)), span: Span::default() }
    }

    #[test]
    fn emits_a_const_and_an_empty_test_array() {
        let mut interner = StringInterner::new();
        let module = interner.intern("src/main");
        let answer = interner.intern("answer");
        let program = Program {
            declarations: vec![Declaration::Const(ConstDecl {
                name: answer,
                exported: true,
                ty: Type::Int,
                value: int(42),
                span: Span::default(),
            })],
            span: Span::default(),
        };
        let registry = NamespaceRegistry::new();
        let output = emit_module(&mut interner, module, &program, &registry).expect("codegen should not fail");
        assert!(output.source.contains("const answer = 42;"));
        assert!(output.source.contains("__ideoTests = []"));
        assert!(output.tests.is_empty());
    }

    #[test]
    fn test_declaration_produces_metadata_and_an_export() {
        use ideo_ir::TestDecl;

        let mut interner = StringInterner::new();
        let module = interner.intern("src/main");
        let left = int(1);
        let right = int(1);
        let body = Expr {
            kind: ExprKind::Binary { op: BinaryOp::Eq, left: Box::new(left), right: Box::new(right) },
            span: Span::default(),
        };
        let program = Program {
            declarations: vec![Declaration::Test(TestDecl {
                description: "one equals one".to_owned(),
                effects: vec![],
                body,
                span: Span::default(),
            })],
            span: Span::default(),
        };
        let registry = NamespaceRegistry::new();
        let output = emit_module(&mut interner, module, &program, &registry).expect("codegen should not fail");
        assert_eq!(output.tests.len(), 1);
        assert_eq!(output.tests[0].name, "one equals one");
        assert!(output.tests[0].assertion.is_some());
        assert!(output.source.contains("async function __ideo_test_0()"));
        assert!(output.source.contains("export { __ideo_test_0 };"));
    }
}
