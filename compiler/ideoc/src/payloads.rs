//! Serialisable payload types carried in each command's `CommandEnvelope`.
//!
//! These are deliberately distinct from the internal `ideo_ir`/`ideo_codegen`
//! types they're built from: a raw `Name` serialises as a meaningless `u32`
//! handle, so every payload here resolves names to their source text before
//! the envelope is handed to `serde_json`.

use std::path::PathBuf;

use ideo_ir::{Span, Token};
use serde::Serialize;

#[derive(Clone, Debug, Serialize)]
pub struct TokenRecord {
    pub kind: String,
    pub text: Option<String>,
    pub span: Span,
}

impl TokenRecord {
    #[must_use]
    pub fn from_token(token: &Token, interner: &ideo_ir::StringInterner) -> Self {
        TokenRecord {
            kind: format!("{:?}", token.kind),
            text: token.text.map(|name| interner.resolve(name).to_owned()),
            span: token.span,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct TokenizeSummary {
    pub tokens: usize,
}

#[derive(Clone, Debug, Serialize)]
pub struct TokenizeData {
    pub file: PathBuf,
    pub summary: TokenizeSummary,
    pub tokens: Vec<TokenRecord>,
}

#[derive(Clone, Debug, Serialize)]
pub struct ParseSummary {
    pub tokens: usize,
    pub declarations: usize,
}

#[derive(Clone, Debug, Serialize)]
pub struct ParseData {
    pub file: PathBuf,
    pub summary: ParseSummary,
    /// The canonical pretty-printed rendering of the parsed tree, not a raw
    /// AST dump — readable the same way a human or a machine consumer
    /// would want to inspect what was parsed.
    pub ast: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct GeneratedModule {
    #[serde(rename = "moduleId")]
    pub module_id: String,
    #[serde(rename = "sourceFile")]
    pub source_file: PathBuf,
    #[serde(rename = "outputFile")]
    pub output_file: PathBuf,
}

#[derive(Clone, Debug, Serialize)]
pub struct CompileOutputs {
    #[serde(rename = "rootTs")]
    pub root_ts: PathBuf,
    #[serde(rename = "allModules")]
    pub all_modules: Vec<GeneratedModule>,
}

#[derive(Clone, Debug, Serialize)]
pub struct TypecheckSummary {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inferred: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct SemanticMap {
    pub path: PathBuf,
    pub generated: bool,
    #[serde(rename = "aiEnhanced")]
    pub ai_enhanced: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct CompileData {
    pub input: PathBuf,
    pub outputs: CompileOutputs,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    pub typecheck: TypecheckSummary,
    #[serde(rename = "semanticMap")]
    pub semantic_map: SemanticMap,
}

#[derive(Clone, Debug, Serialize)]
pub struct RunnableEntryData {
    pub input: PathBuf,
    pub outputs: CompileOutputs,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    pub typecheck: TypecheckSummary,
    #[serde(rename = "semanticMap")]
    pub semantic_map: SemanticMap,
    /// The separately-emitted stub that imports the entry's `main` and
    /// calls it — distinct from any of `outputs.allModules`, which are
    /// only ever the modules the program itself declares.
    #[serde(rename = "runnerFile")]
    pub runner_file: PathBuf,
}

#[derive(Clone, Debug, Serialize)]
pub struct CompileAllData {
    pub project: PathBuf,
    #[serde(rename = "runnableModules")]
    pub runnable_modules: Vec<GeneratedModule>,
    #[serde(rename = "totalTests")]
    pub total_tests: usize,
}
