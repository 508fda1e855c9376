//! "Parse one file" (§4.10): lex and parse a single file, reporting a
//! summary and the canonical pretty-printed rendering of what was parsed.

use std::path::Path;

use ideo_diagnostic::{CommandEnvelope, CompileError, CompileResult, Phase};
use ideo_ir::StringInterner;

use crate::diagnostics::io_error;
use crate::payloads::{ParseData, ParseSummary};

pub const COMMAND: &str = "parse";

#[must_use]
pub fn run(file: &Path) -> CommandEnvelope<ParseData> {
    match parse(file) {
        Ok(data) => CommandEnvelope::success(COMMAND, data),
        Err(e) => CommandEnvelope::failure(COMMAND, e.phase, e.diagnostic),
    }
}

fn parse(file: &Path) -> CompileResult<ParseData> {
    let source = std::fs::read_to_string(file).map_err(|e| io_error(file, &e))?;
    let mut interner = StringInterner::new();

    let (tokens, lex_diags) = ideo_lexer::lex(&source, &mut interner);
    if let Some(diag) = lex_diags.into_iter().next() {
        return Err(CompileError::new(Phase::Lex, diag));
    }

    let (program, parse_diags) = ideo_parse::parse(&tokens, &mut interner);
    if let Some(diag) = parse_diags.into_iter().next() {
        return Err(CompileError::new(Phase::Parse, diag));
    }

    let summary = ParseSummary { tokens: tokens.len(), declarations: program.declarations.len() };
    let ast = ideo_fmt::format_program(&interner, &program);
    Ok(ParseData { file: file.to_path_buf(), summary, ast })
}
