//! Diagnostic constructors for the canonical-form validator (§4.5).

use ideo_diagnostic::{diagnostic, Diagnostic, ErrorCode, Phase};
use ideo_ir::Span;

pub(crate) fn order_violation(span: Span, name: &str) -> Diagnostic {
    diagnostic(
        ErrorCode::CanonOrderViolation,
        Phase::Canon,
        format!("`{name}` is out of place: declarations must be grouped types/externs/imports/consts/functions/tests, exported before non-exported, then alphabetical"),
    )
    .at(span)
}

pub(crate) fn duplicate_decl(span: Span, name: &str) -> Diagnostic {
    diagnostic(ErrorCode::CanonDuplicateDecl, Phase::Canon, format!("`{name}` is declared more than once")).at(span)
}

pub(crate) fn duplicate_extern_member(span: Span, name: &str) -> Diagnostic {
    diagnostic(
        ErrorCode::CanonDuplicateExternMember,
        Phase::Canon,
        format!("extern member `{name}` is declared more than once"),
    )
    .at(span)
}

pub(crate) fn unsorted_extern_members(span: Span) -> Diagnostic {
    diagnostic(ErrorCode::CanonUnsortedExternMembers, Phase::Canon, "extern members must be alphabetised").at(span)
}

pub(crate) fn duplicate_import(span: Span, path: &str) -> Diagnostic {
    diagnostic(ErrorCode::CanonDuplicateImport, Phase::Canon, format!("`{path}` is imported more than once")).at(span)
}

pub(crate) fn missing_main(span: Span) -> Diagnostic {
    diagnostic(ErrorCode::CanonMissingMain, Phase::Canon, "this file must define `main`")
        .at(span)
        .with_detail("add `λmain()→... ≡ ...` to this file")
}

pub(crate) fn bad_main_signature(span: Span) -> Diagnostic {
    diagnostic(ErrorCode::CanonBadMainSignature, Phase::Canon, "`main` must take no parameters")
        .at(span)
        .with_detail("drop main's parameters; its return type is whatever the program produces")
}

pub(crate) fn recursion_accumulator(span: Span, param: &str) -> Diagnostic {
    diagnostic(
        ErrorCode::CanonRecursionAccumulator,
        Phase::Canon,
        format!("parameter `{param}` is grown across the recursive call, not decomposed or passed through"),
    )
    .at(span)
}

pub(crate) fn recursion_cps(span: Span) -> Diagnostic {
    diagnostic(
        ErrorCode::CanonRecursionCps,
        Phase::Canon,
        "a recursive function may not return a function type",
    )
    .at(span)
}

pub(crate) fn match_boolean(span: Span) -> Diagnostic {
    diagnostic(
        ErrorCode::CanonMatchBoolean,
        Phase::Canon,
        "matching on a boolean scrutinee should be an `if`-style conditional instead",
    )
    .at(span)
}

pub(crate) fn double_wildcard(span: Span) -> Diagnostic {
    diagnostic(
        ErrorCode::CanonDoubleWildcard,
        Phase::Canon,
        "consecutive wildcards in a list pattern are rejected; use a rest-pattern (`⧺`) instead",
    )
    .at(span)
}

pub(crate) fn duplicate_arm(span: Span) -> Diagnostic {
    diagnostic(ErrorCode::CanonDuplicateArm, Phase::Canon, "this arm repeats an earlier arm's pattern and guard").at(span)
}

pub(crate) fn unsorted_params(span: Span) -> Diagnostic {
    diagnostic(ErrorCode::CanonUnsortedParams, Phase::Canon, "parameters must be in ascending order by name").at(span)
}

pub(crate) fn unsorted_effects(span: Span) -> Diagnostic {
    diagnostic(ErrorCode::CanonUnsortedEffects, Phase::Canon, "effect labels must be in ascending order").at(span)
}
