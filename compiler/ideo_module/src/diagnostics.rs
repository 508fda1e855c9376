//! Diagnostic constructors for the module graph loader.

use ideo_diagnostic::{diagnostic, Diagnostic, ErrorCode, Phase};
use ideo_ir::Span;

/// `chain` names every module from the re-entered module to the one whose
/// import closes the cycle back onto it, in import order.
pub(crate) fn import_cycle(span: Span, chain: &[String]) -> Diagnostic {
    let joined = chain.join(" → ");
    diagnostic(ErrorCode::CliImportCycle, Phase::Cli, format!("import cycle detected: {joined}"))
        .at(span)
        .with_detail("a module cannot import itself, directly or transitively")
}

pub(crate) fn unresolved_import(span: Span, path: &str) -> Diagnostic {
    diagnostic(ErrorCode::CliUnresolvedImport, Phase::Cli, format!("cannot resolve import `{path}`")).at(span)
}

pub(crate) fn unreadable_source(span: Span, path: &str, source: &std::io::Error) -> Diagnostic {
    diagnostic(ErrorCode::CliUnresolvedImport, Phase::Cli, format!("cannot read `{path}`: {source}")).at(span)
}

pub(crate) fn project_marker_error(err: &crate::project::ProjectError) -> Diagnostic {
    diagnostic(ErrorCode::CliNoProjectMarker, Phase::Cli, err.to_string())
}
