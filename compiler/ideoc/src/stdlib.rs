//! Locating the standard library root (§6.3's `stdlib⋅…` import base).
//!
//! The project layout (`ideo_module::ProjectConfig`) only ever names the
//! project's own `src`/`tests`/`out` directories; the standard library lives
//! outside any one project, so its location is an environment-level choice,
//! the same way the teacher's compiler reads `ORI_STDLIB`.

use std::path::{Path, PathBuf};

const ENV_OVERRIDE: &str = "IDEO_STDLIB";
const DEFAULT_DIRNAME: &str = "stdlib";

/// Resolve the standard library root: `$IDEO_STDLIB` if set, otherwise a
/// `stdlib/` directory next to the project root.
#[must_use]
pub fn resolve_stdlib_root(project_root: &Path) -> PathBuf {
    std::env::var_os(ENV_OVERRIDE).map(PathBuf::from).unwrap_or_else(|| project_root.join(DEFAULT_DIRNAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_a_stdlib_directory_next_to_the_project() {
        std::env::remove_var(ENV_OVERRIDE);
        let root = Path::new("/proj");
        assert_eq!(resolve_stdlib_root(root), Path::new("/proj/stdlib"));
    }
}
