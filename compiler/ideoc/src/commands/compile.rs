//! "Compile one file" (§4.10): load the entry's project, check the whole
//! module graph, code-generate every module it reaches, and flush them to
//! disk.

use std::path::Path;

use ideo_diagnostic::CommandEnvelope;

use crate::compile::{compile_project, generated_module, write_modules};
use crate::payloads::{CompileData, CompileOutputs, SemanticMap, TypecheckSummary};

pub const COMMAND: &str = "compile";

#[must_use]
pub fn run(file: &Path) -> CommandEnvelope<CompileData> {
    match compile(file) {
        Ok(data) => CommandEnvelope::success(COMMAND, data),
        Err(e) => CommandEnvelope::failure(COMMAND, e.phase, e.diagnostic),
    }
}

fn compile(file: &Path) -> ideo_diagnostic::CompileResult<CompileData> {
    let project = compile_project(file)?;
    write_modules(&project.modules)?;

    let all_modules: Vec<_> = project.modules.iter().map(|m| generated_module(&project.interner, m)).collect();
    let root = project
        .modules
        .iter()
        .find(|m| m.source_file == file)
        .unwrap_or_else(|| project.modules.last().expect("a compiled project always emits at least its entry module"));

    let project_name = if project.config.name.is_empty() { None } else { Some(project.config.name.clone()) };

    Ok(CompileData {
        input: file.to_path_buf(),
        outputs: CompileOutputs { root_ts: root.output_file.clone(), all_modules },
        project: project_name,
        typecheck: TypecheckSummary { ok: true, inferred: None },
        semantic_map: SemanticMap { path: project.project_root.join(&project.config.out_dir), generated: true, ai_enhanced: false },
    })
}
