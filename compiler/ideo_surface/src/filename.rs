//! Filename rules: lowercase, hyphen-separated, no underscores or spaces,
//! no doubled or edge hyphens.

use ideo_diagnostic::{diagnostic, Diagnostic, ErrorCode, Phase};

/// Check a file stem (filename without its `.ideo` extension). Returns one
/// diagnostic per distinct violation.
pub fn check_filename(stem: &str) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    if stem.chars().any(char::is_uppercase) {
        diagnostics.push(bad_filename(stem, "filenames must be lowercase"));
    }
    if stem.contains('_') {
        diagnostics.push(bad_filename(stem, "filenames must use hyphens, not underscores"));
    }
    if stem.contains(' ') {
        diagnostics.push(bad_filename(stem, "filenames must not contain spaces"));
    }
    if stem.contains("--") {
        diagnostics.push(bad_filename(stem, "filenames must not contain doubled hyphens"));
    }
    if stem.starts_with('-') || stem.ends_with('-') {
        diagnostics.push(bad_filename(stem, "filenames must not start or end with a hyphen"));
    }
    diagnostics
}

fn bad_filename(stem: &str, why: &str) -> Diagnostic {
    diagnostic(ErrorCode::SurfaceBadFilename, Phase::Surface, why).found(stem.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_clean_stem() {
        assert!(check_filename("factorial-demo").is_empty());
    }

    #[test]
    fn rejects_uppercase() {
        assert!(!check_filename("Factorial").is_empty());
    }

    #[test]
    fn rejects_underscore() {
        assert!(!check_filename("factorial_demo").is_empty());
    }

    #[test]
    fn rejects_edge_hyphen() {
        assert!(!check_filename("-factorial").is_empty());
        assert!(!check_filename("factorial-").is_empty());
    }

    #[test]
    fn rejects_doubled_hyphen() {
        assert!(!check_filename("factorial--demo").is_empty());
    }
}
