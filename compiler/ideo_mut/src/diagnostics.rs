//! Diagnostic constructors for the mutability checker (§4.7).

use ideo_diagnostic::{diagnostic, Diagnostic, ErrorCode, Phase};
use ideo_ir::Span;

pub(crate) fn capture_escapes(span: Span) -> Diagnostic {
    diagnostic(
        ErrorCode::MutCaptureEscapes,
        Phase::Mutability,
        "closure captures a `mut` binding from a scope it can outlive",
    )
    .at(span)
}

pub(crate) fn pass_to_immutable_param(span: Span) -> Diagnostic {
    diagnostic(
        ErrorCode::MutPassToImmutableParam,
        Phase::Mutability,
        "a `mut` binding is passed where the parameter is not declared `mut`",
    )
    .at(span)
}

pub(crate) fn aliasing(span: Span) -> Diagnostic {
    diagnostic(
        ErrorCode::MutAliasing,
        Phase::Mutability,
        "the same `mut` binding reaches two `mut` parameters of this call",
    )
    .at(span)
}
