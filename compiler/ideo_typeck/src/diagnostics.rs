//! Diagnostic constructors for the type checker (§4.6). Every `Type` that
//! reaches a diagnostic field goes through [`render_type`] first — nobody
//! outside this crate should ever see a `{:?}`-formatted `Type`.

use ideo_diagnostic::{diagnostic, Diagnostic, ErrorCode, Phase};
use ideo_ir::{Span, StringInterner, Type};
use ideo_types::render_type;

pub(crate) fn unbound_name(span: Span, text: &str) -> Diagnostic {
    diagnostic(ErrorCode::TypeUnboundName, Phase::Type, format!("unbound name `{text}`")).at(span)
}

pub(crate) fn type_mismatch(span: Span, expected: &Type, found: &Type, interner: &StringInterner) -> Diagnostic {
    diagnostic(ErrorCode::TypeMismatch, Phase::Type, "type mismatch")
        .at(span)
        .expected(render_type(expected, interner))
        .found(render_type(found, interner))
}

pub(crate) fn arity_mismatch(span: Span, expected: usize, found: usize) -> Diagnostic {
    diagnostic(ErrorCode::TypeArityMismatch, Phase::Type, "wrong number of arguments")
        .at(span)
        .expected(format!("{expected} argument(s)"))
        .found(format!("{found} argument(s)"))
}

pub(crate) fn nonexhaustive(span: Span, missing: Vec<String>) -> Diagnostic {
    let mut diag = diagnostic(ErrorCode::TypeNonExhaustive, Phase::Type, "match is not exhaustive").at(span);
    for shape in missing {
        diag = diag.with_detail(format!("missing: {shape}"));
    }
    diag
}

pub(crate) fn unknown_type(span: Span, text: &str) -> Diagnostic {
    diagnostic(ErrorCode::TypeUnknownType, Phase::Type, format!("unknown type `{text}`")).at(span)
}

pub(crate) fn not_a_namespace(span: Span, text: &str) -> Diagnostic {
    diagnostic(ErrorCode::TypeNotANamespace, Phase::Type, format!("`{text}` is not an imported namespace")).at(span)
}

pub(crate) fn not_exported(span: Span, module: &str, member: &str) -> Diagnostic {
    diagnostic(ErrorCode::TypeNotExported, Phase::Type, format!("`{member}` is not exported by `{module}`")).at(span)
}

pub(crate) fn unknown_cross_module(span: Span, module: &str) -> Diagnostic {
    diagnostic(ErrorCode::TypeUnknownCrossModule, Phase::Type, format!("unknown module `{module}`")).at(span)
}

pub(crate) fn ambiguous_empty_list(span: Span) -> Diagnostic {
    diagnostic(
        ErrorCode::TypeAmbiguousEmptyList,
        Phase::Type,
        "empty list literal's element type cannot be inferred here",
    )
    .at(span)
}

pub(crate) fn if_branch_mismatch(span: Span, then_ty: &Type, else_ty: &Type, interner: &StringInterner) -> Diagnostic {
    diagnostic(ErrorCode::TypeIfBranchMismatch, Phase::Type, "if branches disagree on type")
        .at(span)
        .expected(render_type(then_ty, interner))
        .found(render_type(else_ty, interner))
}

pub(crate) fn bad_field_access(span: Span, field: &str, on: &Type, interner: &StringInterner) -> Diagnostic {
    diagnostic(ErrorCode::TypeBadFieldAccess, Phase::Type, format!("no field `{field}` on {}", render_type(on, interner)))
        .at(span)
}
