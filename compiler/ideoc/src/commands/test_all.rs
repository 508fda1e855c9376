//! "Compile all files under the project's tests/ directory" (§4.10,
//! §4.8+): each test file is its own independent entry point with its own
//! module graph, so the files compile in parallel; cross-module checking
//! inside any one file's graph stays sequential (`compile_project` already
//! guarantees that).

use std::path::Path;

use ideo_diagnostic::{CommandEnvelope, CompileResult};
use rayon::prelude::*;

use crate::compile::{compile_project, generated_module, write_modules};
use crate::discover::ideo_files_under;
use crate::payloads::CompileAllData;

pub const COMMAND: &str = "test";

#[must_use]
pub fn run(project_entry: &Path) -> CommandEnvelope<CompileAllData> {
    match compile_all(project_entry) {
        Ok(data) => CommandEnvelope::success(COMMAND, data),
        Err(e) => CommandEnvelope::failure(COMMAND, e.phase, e.diagnostic),
    }
}

fn compile_all(project_entry: &Path) -> CompileResult<CompileAllData> {
    let (project_root, config) = ideo_module::resolve_project(project_entry).map_err(|e| {
        ideo_diagnostic::CompileError::new(
            ideo_diagnostic::Phase::Cli,
            ideo_diagnostic::diagnostic(ideo_diagnostic::ErrorCode::CliNoProjectMarker, ideo_diagnostic::Phase::Cli, e.to_string()),
        )
    })?;
    let tests_dir = project_root.join(&config.tests_dir);
    let files = ideo_files_under(&tests_dir)?;

    let compiled: Vec<CompileResult<_>> = files.par_iter().map(|file| compile_project(file)).collect();

    let mut runnable_modules = Vec::new();
    let mut total_tests = 0usize;
    for project in compiled {
        let project = project?;
        write_modules(&project.modules)?;
        total_tests += project.modules.iter().map(|m| m.tests.len()).sum::<usize>();
        runnable_modules.extend(project.modules.iter().map(|m| generated_module(&project.interner, m)));
    }

    Ok(CompileAllData { project: project_root, runnable_modules, total_tests })
}
