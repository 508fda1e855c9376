//! The module graph pipeline (§4.8): project layout, dependency loading,
//! and cross-module checking, threaded together into one entry point that
//! the command surface (out of scope here) drives per command.
//!
//! Loading a file is a strict depth-first search: tokenise, parse,
//! canon-validate, then recurse into each import, short-circuiting on the
//! first diagnostic any step produces, the same discipline
//! [`ideo_parse`] and [`ideo_canon`] already use at file granularity. Type
//! checking and mutability checking then run over the whole graph in
//! dependency order, sharing one [`ideo_types::NamespaceRegistry`] so a
//! module's imports are already registered by the time it is checked.

mod diagnostics;
mod graph;
mod ids;
mod pipeline;
mod project;

pub use graph::{load_graph, LoadedModule, ModuleGraph};
pub use ids::{module_id_for_path, module_id_for_segments, resolve_import_path, SOURCE_EXTENSION};
pub use pipeline::check_graph;
pub use project::{locate_project, ProjectConfig, ProjectError};

use std::path::{Path, PathBuf};

use ideo_diagnostic::{CompileError, CompileResult, Phase};
use ideo_ir::StringInterner;
use ideo_types::NamespaceRegistry;

/// Find `entry`'s project: search its ancestors for `ideo.toml`, falling
/// back to the file's own directory as an ad-hoc project root with the
/// default layout if none is found (§4.8 step 1).
pub fn resolve_project(entry: &Path) -> Result<(PathBuf, ProjectConfig), ProjectError> {
    match locate_project(entry)? {
        Some(found) => Ok(found),
        None => {
            let root = entry.parent().unwrap_or_else(|| Path::new(".")).to_path_buf();
            Ok((root, ProjectConfig::default()))
        }
    }
}

/// Run the whole pipeline for one entry file: locate its project, load the
/// module graph rooted at it, then type-check and mutability-check every
/// module the graph reaches, in dependency order.
///
/// `stdlib_root` is the standard library's install location; it is not
/// part of a project's own layout (§6.3).
#[tracing::instrument(skip(interner))]
pub fn compile_entry(
    entry: &Path,
    stdlib_root: &Path,
    interner: &mut StringInterner,
) -> CompileResult<(ModuleGraph, NamespaceRegistry)> {
    let (project_root, config) =
        resolve_project(entry).map_err(|e| CompileError::new(Phase::Cli, diagnostics::project_marker_error(&e)))?;
    let graph = load_graph(entry, &project_root, &config.src_dir, &config.tests_dir, stdlib_root, interner)?;
    let registry = check_graph(&graph, interner)?;
    Ok((graph, registry))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn scratch_dir(label: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("ideo_module_pipeline_{label}_{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(dir.join("src")).expect("create src dir");
        dir
    }

    #[test]
    fn two_module_graph_loads_without_a_cycle() {
        let dir = scratch_dir("two_module");
        fs::write(
            dir.join("src").join("helper.ideo"),
            "export c answer=(42 : ℤ);\n",
        )
        .expect("write helper.ideo");
        fs::write(
            dir.join("src").join("main.ideo"),
            "i src⋅helper;\nλmain()→𝕌≡();\n",
        )
        .expect("write main.ideo");

        let mut interner = StringInterner::new();
        let stdlib_root = dir.join("stdlib");
        let graph = load_graph(&dir.join("src").join("main.ideo"), &dir, "src", "tests", &stdlib_root, &mut interner);
        assert!(graph.is_ok(), "expected the two-module graph to load cleanly: {:?}", graph.err());
        let graph = graph.expect("checked above");
        assert_eq!(graph.order.len(), 2);

        fs::remove_dir_all(&dir).expect("cleanup temp dir");
    }

    #[test]
    fn self_importing_module_is_a_cycle() {
        let dir = scratch_dir("self_cycle");
        fs::write(
            dir.join("src").join("loopy.ideo"),
            "i src⋅loopy;\nλmain()→𝕌≡();\n",
        )
        .expect("write loopy.ideo");

        let mut interner = StringInterner::new();
        let stdlib_root = dir.join("stdlib");
        let graph = load_graph(&dir.join("src").join("loopy.ideo"), &dir, "src", "tests", &stdlib_root, &mut interner);
        assert!(graph.is_err());
        let err = graph.err().expect("checked above");
        assert_eq!(err.diagnostic.code, ideo_diagnostic::ErrorCode::CliImportCycle);

        fs::remove_dir_all(&dir).expect("cleanup temp dir");
    }

    #[test]
    fn two_distinct_files_importing_each_other_is_a_cycle_naming_both() {
        let dir = scratch_dir("two_file_cycle");
        fs::write(dir.join("src").join("a.ideo"), "i src⋅b;\nλmain()→𝕌≡();\n").expect("write a.ideo");
        fs::write(dir.join("src").join("b.ideo"), "i src⋅a;\n").expect("write b.ideo");

        let mut interner = StringInterner::new();
        let stdlib_root = dir.join("stdlib");
        let graph = load_graph(&dir.join("src").join("a.ideo"), &dir, "src", "tests", &stdlib_root, &mut interner);
        assert!(graph.is_err());
        let err = graph.err().expect("checked above");
        assert_eq!(err.diagnostic.code, ideo_diagnostic::ErrorCode::CliImportCycle);
        assert!(err.diagnostic.message.contains("src/a"), "cycle message should name a.ideo: {}", err.diagnostic.message);
        assert!(err.diagnostic.message.contains("src/b"), "cycle message should name b.ideo: {}", err.diagnostic.message);

        fs::remove_dir_all(&dir).expect("cleanup temp dir");
    }

    #[test]
    fn missing_import_is_reported() {
        let dir = scratch_dir("missing_import");
        fs::write(
            dir.join("src").join("main.ideo"),
            "i src⋅nowhere;\nλmain()→𝕌≡();\n",
        )
        .expect("write main.ideo");

        let mut interner = StringInterner::new();
        let stdlib_root = dir.join("stdlib");
        let graph = load_graph(&dir.join("src").join("main.ideo"), &dir, "src", "tests", &stdlib_root, &mut interner);
        assert!(graph.is_err());
        let err = graph.err().expect("checked above");
        assert_eq!(err.diagnostic.code, ideo_diagnostic::ErrorCode::CliUnresolvedImport);

        fs::remove_dir_all(&dir).expect("cleanup temp dir");
    }
}
