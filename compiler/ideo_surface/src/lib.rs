//! Surface-form validation: formatting and filename rules enforced before a
//! file is lexed.
//!
//! Everything here runs on raw text or filenames. There is no AST and no
//! token stream yet, so every diagnostic is computed from a direct scan of
//! the source string.

mod filename;
mod lines;
mod test_placement;

pub use filename::check_filename;
pub use test_placement::check_test_placement;

use ideo_diagnostic::Diagnostic;

/// Run every line-level surface check over a source file's full text.
pub fn check_source(source: &str) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    lines::check_tabs_and_cr(source, &mut diagnostics);
    lines::check_trailing_ws_and_blank_runs(source, &mut diagnostics);
    lines::check_final_newline(source, &mut diagnostics);
    diagnostics
}
