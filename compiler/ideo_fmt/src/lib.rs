//! Canonical-form pretty-printer for the surface language.
//!
//! Renders a parsed [`Program`] back to surface text deterministically: the
//! same program always formats to the same string, and formatting an
//! already-canonical program is a no-op. There is no line-width budget to
//! negotiate (the grammar has no layout choices that depend on one), so
//! unlike a general-purpose formatter this is a single-pass renderer with
//! no measure/render split.

mod decl;
mod expr;
mod literals;
mod operators;
mod pattern;
mod types;

use ideo_ir::{Program, StringInterner};

use decl::fmt_declaration;

/// Render every declaration in `program`, separated by exactly one blank
/// line, with a single trailing newline and no other blank runs — the
/// invariants `ideo_surface::lines` checks on source text.
#[must_use]
pub fn format_program(interner: &StringInterner, program: &Program) -> String {
    let mut out = program
        .declarations
        .iter()
        .map(|decl| fmt_declaration(interner, decl))
        .collect::<Vec<_>>()
        .join("\n\n");
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ideo_ir::{ConstDecl, Declaration, Expr, ExprKind, Literal, Span, Type};

    #[test]
    fn empty_program_is_a_single_newline() {
        let interner = StringInterner::new();
        let program = Program { declarations: vec![], span: Span::default() };
        assert_eq!(format_program(&interner, &program), "\n");
    }

    #[test]
    fn two_declarations_are_separated_by_one_blank_line() {
        let mut interner = StringInterner::new();
        let a = interner.intern("a");
        let b = interner.intern("b");
        let decl = |name| {
            Declaration::Const(ConstDecl {
                name,
                exported: false,
                ty: Type::Int,
                value: Expr { kind: ExprKind::Literal(Literal::Int(1)), span: Span::default() },
                span: Span::default(),
            })
        };
        let program = Program { declarations: vec![decl(a), decl(b)], span: Span::default() };
        let rendered = format_program(&interner, &program);
        assert_eq!(rendered, "c a=(1 : ℤ);\n\nc b=(1 : ℤ);\n");
    }
}
