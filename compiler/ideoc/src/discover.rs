//! Recursive source-file discovery under a directory (§4.10's "compile all
//! files under the project's tests/ directory"). No directory-walking crate
//! is pulled in for this — a project's `tests/` tree is shallow and a plain
//! recursive `read_dir` is all the command needs.

use std::path::{Path, PathBuf};

use crate::diagnostics::io_error;

/// Every `.ideo` file under `root`, sorted so the command's output is
/// deterministic regardless of the host filesystem's directory-entry order.
pub(crate) fn ideo_files_under(root: &Path) -> ideo_diagnostic::CompileResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    if root.is_dir() {
        walk(root, &mut files)?;
    }
    files.sort();
    Ok(files)
}

fn walk(dir: &Path, files: &mut Vec<PathBuf>) -> ideo_diagnostic::CompileResult<()> {
    let entries = std::fs::read_dir(dir).map_err(|e| io_error(dir, &e))?;
    for entry in entries {
        let entry = entry.map_err(|e| io_error(dir, &e))?;
        let path = entry.path();
        if path.is_dir() {
            walk(&path, files)?;
        } else if path.extension().and_then(|e| e.to_str()) == Some(ideo_module::SOURCE_EXTENSION) {
            files.push(path);
        }
    }
    Ok(())
}
