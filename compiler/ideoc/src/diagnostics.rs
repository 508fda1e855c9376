//! CLI-level diagnostic constructors: failures that happen outside any
//! compiler phase proper. Argument-parsing problems (missing file, unknown
//! command) are reported directly by `main` instead, the same way the
//! teacher's own driver reports them with a plain `eprintln!` rather than
//! routing them through its diagnostic machinery.

use std::path::Path;

use ideo_diagnostic::{diagnostic, CompileError, ErrorCode, Phase};

pub(crate) fn io_error(path: &Path, source: &std::io::Error) -> CompileError {
    CompileError::new(Phase::Cli, diagnostic(ErrorCode::CliIoError, Phase::Cli, format!("cannot write `{}`: {source}", path.display())))
}
