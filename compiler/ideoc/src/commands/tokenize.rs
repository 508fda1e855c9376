//! "Tokenise one file" (§4.10): lex a single file and report its tokens.
//! Unlike the compile commands, this never touches a project's module
//! graph — a bare lex is useful on a file that doesn't even parse yet.

use std::path::Path;

use ideo_diagnostic::CommandEnvelope;
use ideo_ir::StringInterner;

use crate::diagnostics::io_error;
use crate::payloads::{TokenRecord, TokenizeData, TokenizeSummary};

pub const COMMAND: &str = "tokenize";

#[must_use]
pub fn run(file: &Path) -> CommandEnvelope<TokenizeData> {
    match tokenize(file) {
        Ok(data) => CommandEnvelope::success(COMMAND, data),
        Err(e) => CommandEnvelope::failure(COMMAND, e.phase, e.diagnostic),
    }
}

fn tokenize(file: &Path) -> ideo_diagnostic::CompileResult<TokenizeData> {
    let source = std::fs::read_to_string(file).map_err(|e| io_error(file, &e))?;
    let mut interner = StringInterner::new();
    let (tokens, diagnostics) = ideo_lexer::lex(&source, &mut interner);
    if let Some(diag) = diagnostics.into_iter().next() {
        return Err(ideo_diagnostic::CompileError::new(ideo_diagnostic::Phase::Lex, diag));
    }
    let records: Vec<TokenRecord> = tokens.iter().map(|t| TokenRecord::from_token(t, &interner)).collect();
    Ok(TokenizeData { file: file.to_path_buf(), summary: TokenizeSummary { tokens: records.len() }, tokens: records })
}
