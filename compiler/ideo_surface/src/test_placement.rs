//! Test-declaration placement.
//!
//! This rule belongs to the surface validator conceptually — it is a
//! file-placement rule, not a typing or ordering rule — but it can only be
//! checked once a file's declarations are known, so the module driver
//! invokes it after parsing rather than before lexing.

use ideo_diagnostic::{diagnostic, Diagnostic, ErrorCode, Phase};

/// `module_path` is the file's project-relative path, used only for the
/// diagnostic message.
pub fn check_test_placement(
    declares_tests: bool,
    under_tests_dir: bool,
    module_path: &str,
) -> Option<Diagnostic> {
    if declares_tests && !under_tests_dir {
        Some(
            diagnostic(
                ErrorCode::SurfaceTestOutsideTests,
                Phase::Surface,
                format!(
                    "`{module_path}` declares tests but is not under the project's tests directory"
                ),
            )
            .found(module_path.to_owned()),
        )
    } else {
        None
    }
}
