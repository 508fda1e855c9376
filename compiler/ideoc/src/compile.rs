//! Shared machinery behind "compile one file", "compile and arrange a
//! runnable entry", and "compile all files under tests/" (§4.10): load and
//! check the module graph, code-generate every module in topo order, and
//! write the outputs only once every module has generated cleanly.

use std::fs;
use std::path::{Path, PathBuf};

use ideo_diagnostic::{CompileError, CompileResult, Phase};
use ideo_ir::{Name, StringInterner};
use ideo_module::{ModuleGraph, ProjectConfig};
use ideo_types::NamespaceRegistry;

use crate::diagnostics::io_error;
use crate::payloads::GeneratedModule;
use crate::stdlib::resolve_stdlib_root;

pub(crate) const TARGET_EXTENSION: &str = "mjs";

/// One module's generated output, paired with the path it will be written
/// to and the test metadata `ideo_codegen` collected for it.
pub(crate) struct EmittedModule {
    pub module_id: Name,
    pub source_file: PathBuf,
    pub output_file: PathBuf,
    pub source: String,
    pub tests: Vec<ideo_codegen::TestMeta>,
}

pub(crate) struct CompiledProject {
    pub project_root: PathBuf,
    pub config: ProjectConfig,
    pub interner: StringInterner,
    pub graph: ModuleGraph,
    pub registry: NamespaceRegistry,
    pub modules: Vec<EmittedModule>,
}

/// Run the whole pipeline for `entry`: locate its project, load and check
/// the module graph, then code-generate every module the graph reaches.
///
/// Does not write anything to disk; callers decide whether and where to
/// flush the result (`write_modules`).
pub(crate) fn compile_project(entry: &Path) -> CompileResult<CompiledProject> {
    let (project_root, config) = ideo_module::resolve_project(entry).map_err(|e| {
        CompileError::new(
            Phase::Cli,
            ideo_diagnostic::diagnostic(ideo_diagnostic::ErrorCode::CliNoProjectMarker, Phase::Cli, e.to_string()),
        )
    })?;
    let stdlib_root = resolve_stdlib_root(&project_root);

    let mut interner = StringInterner::new();
    let graph = ideo_module::load_graph(entry, &project_root, &config.src_dir, &config.tests_dir, &stdlib_root, &mut interner)?;
    let registry = ideo_module::check_graph(&graph, &mut interner)?;

    let mut modules = Vec::with_capacity(graph.order.len());
    for &id in &graph.order {
        let module = graph.get(id).expect("graph.order only lists ids present in graph.modules");
        let output = ideo_codegen::emit_module(&mut interner, id, &module.program, &registry)?;
        let output_file = output_path_for(&project_root, &config, interner.resolve(id));
        modules.push(EmittedModule {
            module_id: id,
            source_file: module.path.clone(),
            output_file,
            source: output.source,
            tests: output.tests,
        });
    }

    Ok(CompiledProject { project_root, config, interner, graph, registry, modules })
}

/// `<project>/<outDir>/<moduleId>.mjs` (§6.6), e.g. `src/foo/bar` ->
/// `<outDir>/src/foo/bar.mjs`.
fn output_path_for(project_root: &Path, config: &ProjectConfig, module_id: &str) -> PathBuf {
    let mut path = project_root.join(&config.out_dir);
    path.push(module_id);
    path.set_extension(TARGET_EXTENSION);
    path
}

/// Flush every module's generated source to disk. All-or-nothing: called
/// only after every module in the project has already generated without
/// error, so a partial write never leaves a module's output half-written.
pub(crate) fn write_modules(modules: &[EmittedModule]) -> CompileResult<()> {
    for module in modules {
        if let Some(parent) = module.output_file.parent() {
            fs::create_dir_all(parent).map_err(|e| io_error(parent, &e))?;
        }
        fs::write(&module.output_file, &module.source).map_err(|e| io_error(&module.output_file, &e))?;
    }
    Ok(())
}

pub(crate) fn generated_module(interner: &StringInterner, module: &EmittedModule) -> GeneratedModule {
    GeneratedModule {
        module_id: interner.resolve(module.module_id).to_owned(),
        source_file: module.source_file.clone(),
        output_file: module.output_file.clone(),
    }
}

const RUNNER_STEM: &str = "__run__";

/// The runner stub always lives at the output root, one level above every
/// `moduleId`-derived path, so a relative `./<moduleId>.mjs` import from it
/// reaches any module regardless of nesting.
pub(crate) fn runner_stub_path(project_root: &Path, config: &ProjectConfig) -> PathBuf {
    project_root.join(&config.out_dir).join(format!("{RUNNER_STEM}.{TARGET_EXTENSION}"))
}

/// A tiny ES module importing the entry's generated `main` export and
/// awaiting it once at the top level (§4.10: "a separately-emitted runner
/// stub that calls `main`"). `main` is always exported by `ideo_codegen`
/// regardless of its own `exported` flag, precisely so this import resolves.
pub(crate) fn runner_stub_source(entry_module_id: &str) -> String {
    format!("import {{ main }} from \"./{entry_module_id}.mjs\";\n\nawait main();\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_path_mirrors_the_module_id_under_out_dir() {
        let config = ProjectConfig::default();
        let path = output_path_for(Path::new("/proj"), &config, "src/foo/bar");
        assert_eq!(path, Path::new("/proj/.ideo-out/src/foo/bar.mjs"));
    }
}
