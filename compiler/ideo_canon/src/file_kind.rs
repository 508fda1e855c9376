//! File-kind rules (§4.5, §6.1/§6.3): whether a file may or must define
//! `main`.
//!
//! The exact executable/library naming convention is left to the
//! implementer by the source material; here, only a file's *directory*
//! matters. A file under the project's `tests/` directory must define a
//! well-formed `main`. Everywhere else, `main` is optional — whichever way
//! that goes decides whether the file is executable or a library, so
//! there's nothing to flag in either direction. If `main` is present at
//! all, it must take no parameters; its return type is whatever value the
//! program produces (the factorial scenario's `main` returns `ℤ`).

use ideo_diagnostic::Diagnostic;
use ideo_ir::{Declaration, FunctionDecl, Program, StringInterner};

use crate::diagnostics;

fn find_main<'a>(program: &'a Program, interner: &StringInterner) -> Option<&'a FunctionDecl> {
    program.declarations.iter().find_map(|decl| match decl {
        Declaration::Function(f) if interner.resolve(f.name) == "main" => Some(f),
        _ => None,
    })
}

fn is_valid_main_signature(f: &FunctionDecl) -> bool {
    f.params.is_empty()
}

pub(crate) fn check(program: &Program, interner: &StringInterner, under_tests_dir: bool, out: &mut Vec<Diagnostic>) {
    match (find_main(program, interner), under_tests_dir) {
        (None, true) => out.push(diagnostics::missing_main(program.span)),
        (None, false) => {}
        (Some(f), _) => {
            if !is_valid_main_signature(f) {
                out.push(diagnostics::bad_main_signature(f.span));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ideo_ir::{Expr, ExprKind, Literal, Param, Span, Type};

    fn unit_body() -> Expr {
        Expr { kind: ExprKind::Literal(Literal::Unit), span: Span::default() }
    }

    fn program_with(decls: Vec<Declaration>) -> Program {
        Program { declarations: decls, span: Span::default() }
    }

    fn main_decl(return_type: Type, params: Vec<Param>, interner: &mut StringInterner) -> Declaration {
        let name = interner.intern("main");
        Declaration::Function(FunctionDecl {
            name,
            exported: false,
            mockable: false,
            params,
            effects: vec![],
            return_type,
            body: unit_body(),
            span: Span::default(),
        })
    }

    #[test]
    fn test_file_without_main_is_flagged() {
        let interner = StringInterner::new();
        let program = program_with(vec![]);
        let mut out = Vec::new();
        check(&program, &interner, true, &mut out);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].code, ideo_diagnostic::ErrorCode::CanonMissingMain);
    }

    #[test]
    fn non_test_file_without_main_is_accepted_as_a_library() {
        let interner = StringInterner::new();
        let program = program_with(vec![]);
        let mut out = Vec::new();
        check(&program, &interner, false, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn non_test_file_with_well_formed_main_is_accepted_as_executable() {
        let mut interner = StringInterner::new();
        let decl = main_decl(Type::Unit, vec![], &mut interner);
        let program = program_with(vec![decl]);
        let mut out = Vec::new();
        check(&program, &interner, false, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn main_with_parameters_is_a_bad_signature() {
        let mut interner = StringInterner::new();
        let n = interner.intern("n");
        let decl = main_decl(Type::Unit, vec![Param { name: n, ty: Type::Int, mutable: false, span: Span::default() }], &mut interner);
        let program = program_with(vec![decl]);
        let mut out = Vec::new();
        check(&program, &interner, false, &mut out);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].code, ideo_diagnostic::ErrorCode::CanonBadMainSignature);
    }

    #[test]
    fn main_returning_a_non_unit_type_is_accepted() {
        let mut interner = StringInterner::new();
        let decl = main_decl(Type::Int, vec![], &mut interner);
        let program = program_with(vec![decl]);
        let mut out = Vec::new();
        check(&program, &interner, true, &mut out);
        assert!(out.is_empty());
    }
}
