//! Declaration ordering and uniqueness (§4.5: "declaration ordering",
//! "uniqueness").

use ideo_diagnostic::Diagnostic;
use ideo_ir::{Declaration, Name, Program, StringInterner};
use rustc_hash::FxHashMap;

use crate::diagnostics;

fn category_rank(decl: &Declaration) -> u8 {
    match decl {
        Declaration::Type(_) => 0,
        Declaration::Extern(_) => 1,
        Declaration::Import(_) => 2,
        Declaration::Const(_) => 3,
        Declaration::Function(_) => 4,
        Declaration::Test(_) => 5,
    }
}

/// `(category, exported-first, name)`. Declarations with no name of their
/// own (imports, externs, tests) sort equal to one another within their
/// category-and-export-status group, since the spec imposes no order on
/// them beyond that grouping.
fn sort_key(decl: &Declaration, interner: &StringInterner) -> (u8, u8, String) {
    let category = category_rank(decl);
    let export_rank = u8::from(!decl.is_exported());
    let name = decl.name().map(|n| interner.resolve(n).to_owned()).unwrap_or_default();
    (category, export_rank, name)
}

fn decl_label(decl: &Declaration, interner: &StringInterner) -> String {
    decl.name().map_or_else(|| "this declaration".to_owned(), |n| interner.resolve(n).to_owned())
}

pub(crate) fn check_order(program: &Program, interner: &StringInterner, out: &mut Vec<Diagnostic>) {
    let decls = &program.declarations;
    for i in 1..decls.len() {
        if sort_key(&decls[i], interner) < sort_key(&decls[i - 1], interner) {
            out.push(diagnostics::order_violation(decls[i].span(), &decl_label(&decls[i], interner)));
        }
    }
}

pub(crate) fn check_uniqueness(program: &Program, interner: &StringInterner, out: &mut Vec<Diagnostic>) {
    let mut types_seen: FxHashMap<Name, ()> = FxHashMap::default();
    let mut consts_seen: FxHashMap<Name, ()> = FxHashMap::default();
    let mut functions_seen: FxHashMap<Name, ()> = FxHashMap::default();
    let mut imports_seen: FxHashMap<String, ()> = FxHashMap::default();

    for decl in &program.declarations {
        match decl {
            Declaration::Type(t) => check_dup(&mut types_seen, t.name, t.span, interner, out),
            Declaration::Const(c) => check_dup(&mut consts_seen, c.name, c.span, interner, out),
            Declaration::Function(f) => check_dup(&mut functions_seen, f.name, f.span, interner, out),
            Declaration::Import(i) => {
                let path = i.segments.iter().map(|s| interner.resolve(*s)).collect::<Vec<_>>().join("⋅");
                if imports_seen.insert(path.clone(), ()).is_some() {
                    out.push(diagnostics::duplicate_import(i.span, &path));
                }
            }
            Declaration::Extern(e) => check_extern_members(e, interner, out),
            Declaration::Test(_) => {}
        }
    }
}

fn check_dup(seen: &mut FxHashMap<Name, ()>, name: Name, span: ideo_ir::Span, interner: &StringInterner, out: &mut Vec<Diagnostic>) {
    if seen.insert(name, ()).is_some() {
        out.push(diagnostics::duplicate_decl(span, interner.resolve(name)));
    }
}

fn check_extern_members(e: &ideo_ir::ExternDecl, interner: &StringInterner, out: &mut Vec<Diagnostic>) {
    let mut seen: FxHashMap<Name, ()> = FxHashMap::default();
    let mut sorted = true;
    for window in e.members.windows(2) {
        if interner.resolve(window[0].name) > interner.resolve(window[1].name) {
            sorted = false;
        }
    }
    if !sorted {
        out.push(diagnostics::unsorted_extern_members(e.span));
    }
    for member in &e.members {
        if seen.insert(member.name, ()).is_some() {
            out.push(diagnostics::duplicate_extern_member(member.span, interner.resolve(member.name)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ideo_ir::{ConstDecl, Expr, ExprKind, Literal, Span, Type};

    fn unit_expr() -> Expr {
        Expr { kind: ExprKind::Literal(Literal::Unit), span: Span::default() }
    }

    #[test]
    fn non_exported_before_exported_in_same_category_is_flagged() {
        let mut interner = StringInterner::new();
        let a = interner.intern("a");
        let b = interner.intern("b");
        let program = Program {
            declarations: vec![
                Declaration::Const(ConstDecl { name: a, exported: false, ty: Type::Int, value: unit_expr(), span: Span::default() }),
                Declaration::Const(ConstDecl { name: b, exported: true, ty: Type::Int, value: unit_expr(), span: Span::default() }),
            ],
            span: Span::default(),
        };
        let mut out = Vec::new();
        check_order(&program, &interner, &mut out);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].code, ideo_diagnostic::ErrorCode::CanonOrderViolation);
    }

    #[test]
    fn alphabetical_within_group_is_accepted() {
        let mut interner = StringInterner::new();
        let a = interner.intern("a");
        let b = interner.intern("b");
        let program = Program {
            declarations: vec![
                Declaration::Const(ConstDecl { name: a, exported: true, ty: Type::Int, value: unit_expr(), span: Span::default() }),
                Declaration::Const(ConstDecl { name: b, exported: true, ty: Type::Int, value: unit_expr(), span: Span::default() }),
            ],
            span: Span::default(),
        };
        let mut out = Vec::new();
        check_order(&program, &interner, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn duplicate_const_name_is_flagged() {
        let mut interner = StringInterner::new();
        let a = interner.intern("a");
        let program = Program {
            declarations: vec![
                Declaration::Const(ConstDecl { name: a, exported: false, ty: Type::Int, value: unit_expr(), span: Span::default() }),
                Declaration::Const(ConstDecl { name: a, exported: false, ty: Type::Int, value: unit_expr(), span: Span::default() }),
            ],
            span: Span::default(),
        };
        let mut out = Vec::new();
        check_uniqueness(&program, &interner, &mut out);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].code, ideo_diagnostic::ErrorCode::CanonDuplicateDecl);
    }
}
