//! "Compile and arrange a runnable entry" (§4.10): everything "compile one
//! file" does, plus a separately-emitted stub that imports the entry
//! module's `main` and calls it.

use std::path::Path;

use ideo_diagnostic::CommandEnvelope;

use crate::compile::{compile_project, generated_module, runner_stub_path, runner_stub_source, write_modules};
use crate::diagnostics::io_error;
use crate::payloads::{CompileOutputs, RunnableEntryData, SemanticMap, TypecheckSummary};

pub const COMMAND: &str = "run";

#[must_use]
pub fn run(file: &Path) -> CommandEnvelope<RunnableEntryData> {
    match arrange(file) {
        Ok(data) => CommandEnvelope::success(COMMAND, data),
        Err(e) => CommandEnvelope::failure(COMMAND, e.phase, e.diagnostic),
    }
}

fn arrange(file: &Path) -> ideo_diagnostic::CompileResult<RunnableEntryData> {
    let project = compile_project(file)?;
    write_modules(&project.modules)?;

    let all_modules: Vec<_> = project.modules.iter().map(|m| generated_module(&project.interner, m)).collect();
    let root = project
        .modules
        .iter()
        .find(|m| m.source_file == file)
        .unwrap_or_else(|| project.modules.last().expect("a compiled project always emits at least its entry module"));
    let root_module_id = project.interner.resolve(root.module_id).to_owned();

    let runner_file = runner_stub_path(&project.project_root, &project.config);
    std::fs::write(&runner_file, runner_stub_source(&root_module_id)).map_err(|e| io_error(&runner_file, &e))?;

    let project_name = if project.config.name.is_empty() { None } else { Some(project.config.name.clone()) };

    Ok(RunnableEntryData {
        input: file.to_path_buf(),
        outputs: CompileOutputs { root_ts: root.output_file.clone(), all_modules },
        project: project_name,
        typecheck: TypecheckSummary { ok: true, inferred: None },
        semantic_map: SemanticMap { path: project.project_root.join(&project.config.out_dir), generated: true, ai_enhanced: false },
        runner_file,
    })
}
