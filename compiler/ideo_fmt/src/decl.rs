//! Declaration rendering, the inverse of `ideo_parse::decl`.

use ideo_ir::{Declaration, StringInterner, SumVariant, TypeDef};

use crate::expr::fmt_expr;
use crate::literals::fmt_literal;
use crate::types::{fmt_effects, fmt_type};

#[must_use]
pub(crate) fn fmt_declaration(interner: &StringInterner, decl: &Declaration) -> String {
    match decl {
        Declaration::Type(t) => fmt_type_decl(interner, t),
        Declaration::Import(i) => {
            format!("i {};", join_segments(interner, &i.segments))
        }
        Declaration::Extern(e) => fmt_extern_decl(interner, e),
        Declaration::Const(c) => format!(
            "{}c {}=({} : {});",
            export_prefix(c.exported),
            interner.resolve(c.name),
            fmt_expr(interner, &c.value),
            fmt_type(interner, &c.ty)
        ),
        Declaration::Function(f) => fmt_function_decl(interner, f),
        Declaration::Test(t) => format!(
            "test {}{}≡{};",
            fmt_literal(&ideo_ir::Literal::Str(t.description.clone())),
            fmt_effects(interner, &t.effects),
            fmt_expr(interner, &t.body)
        ),
    }
}

fn export_prefix(exported: bool) -> &'static str {
    if exported {
        "export "
    } else {
        ""
    }
}

fn join_segments(interner: &StringInterner, segments: &[ideo_ir::Name]) -> String {
    segments.iter().map(|s| interner.resolve(*s)).collect::<Vec<_>>().join("⋅")
}

fn fmt_extern_decl(interner: &StringInterner, decl: &ideo_ir::ExternDecl) -> String {
    let path = join_segments(interner, &decl.segments);
    if decl.members.is_empty() {
        format!("e {path};")
    } else {
        let members = decl
            .members
            .iter()
            .map(|m| format!("{}: {}", interner.resolve(m.name), fmt_type(interner, &m.ty)))
            .collect::<Vec<_>>()
            .join(", ");
        format!("e {path}{{{members}}};")
    }
}

fn fmt_function_decl(interner: &StringInterner, decl: &ideo_ir::FunctionDecl) -> String {
    let mockable = if decl.mockable { "mockable " } else { "" };
    let params = decl
        .params
        .iter()
        .map(|p| {
            let mutable = if p.mutable { "mut " } else { "" };
            format!("{mutable}{}:{}", interner.resolve(p.name), fmt_type(interner, &p.ty))
        })
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "{}{}λ{}({params})→{}{}≡{};",
        export_prefix(decl.exported),
        mockable,
        interner.resolve(decl.name),
        fmt_effects(interner, &decl.effects),
        fmt_type(interner, &decl.return_type),
        fmt_expr(interner, &decl.body)
    )
}

fn fmt_type_decl(interner: &StringInterner, decl: &ideo_ir::TypeDecl) -> String {
    let type_params = if decl.type_params.is_empty() {
        String::new()
    } else {
        format!("[{}]", decl.type_params.iter().map(|n| interner.resolve(*n)).collect::<Vec<_>>().join(","))
    };
    format!(
        "{}t {}{type_params}≡{};",
        export_prefix(decl.exported),
        interner.resolve(decl.name),
        fmt_type_def(interner, &decl.def)
    )
}

fn fmt_type_def(interner: &StringInterner, def: &TypeDef) -> String {
    match def {
        TypeDef::Sum(variants) => variants.iter().map(|v| fmt_variant(interner, v)).collect::<Vec<_>>().join(" | "),
        TypeDef::Product(fields) => format!(
            "{{{}}}",
            fields
                .iter()
                .map(|f| format!("{}: {}", interner.resolve(f.name), fmt_type(interner, &f.ty)))
                .collect::<Vec<_>>()
                .join(", ")
        ),
        TypeDef::Alias(ty) => fmt_type(interner, ty),
    }
}

fn fmt_variant(interner: &StringInterner, variant: &SumVariant) -> String {
    let name = interner.resolve(variant.name);
    if variant.fields.is_empty() {
        name.to_owned()
    } else {
        format!("{name}({})", variant.fields.iter().map(|t| fmt_type(interner, t)).collect::<Vec<_>>().join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ideo_ir::{ConstDecl, Expr, ExprKind, Literal, Span, Type};

    #[test]
    fn exported_const_carries_its_prefix() {
        let mut interner = StringInterner::new();
        let name = interner.intern("answer");
        let decl = Declaration::Const(ConstDecl {
            name,
            exported: true,
            ty: Type::Int,
            value: Expr { kind: ExprKind::Literal(Literal::Int(42)), span: Span::default() },
            span: Span::default(),
        });
        assert_eq!(fmt_declaration(&interner, &decl), "export c answer=(42 : ℤ);");
    }

    #[test]
    fn sum_type_variants_are_pipe_separated() {
        let mut interner = StringInterner::new();
        let option = interner.intern("Option");
        let some = interner.intern("Some");
        let none = interner.intern("None");
        let decl = Declaration::Type(ideo_ir::TypeDecl {
            name: option,
            exported: false,
            type_params: vec![],
            def: TypeDef::Sum(vec![
                SumVariant { name: some, fields: vec![Type::Int], span: Span::default() },
                SumVariant { name: none, fields: vec![], span: Span::default() },
            ]),
            span: Span::default(),
        });
        assert_eq!(fmt_declaration(&interner, &decl), "t Option≡Some(ℤ) | None;");
    }
}
