//! The module graph (§4.8): load a file and every file it imports by
//! strict depth-first search, detect import cycles, and hand back the
//! loaded modules in dependency-first (topological) order.

use std::fs;
use std::path::{Path, PathBuf};

use ideo_diagnostic::{CompileError, CompileResult, Phase};
use ideo_ir::{Declaration, Name, Program, StringInterner};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::diagnostics;
use crate::ids::{module_id_for_path, resolve_import_path};

/// One file's parsed, canon-validated tree, located in the graph.
pub struct LoadedModule {
    pub id: Name,
    pub path: PathBuf,
    pub under_tests_dir: bool,
    pub program: Program,
}

/// The full set of modules reachable from an entry file, in an order where
/// every module's imports already precede it.
pub struct ModuleGraph {
    pub modules: FxHashMap<Name, LoadedModule>,
    pub order: Vec<Name>,
}

impl ModuleGraph {
    #[must_use]
    pub fn get(&self, id: Name) -> Option<&LoadedModule> {
        self.modules.get(&id)
    }
}

struct LoadCtx<'a> {
    project_root: &'a Path,
    src_dir: &'a str,
    tests_dir: &'a str,
    stdlib_root: &'a Path,
}

impl LoadCtx<'_> {
    fn under_tests_dir(&self, path: &Path) -> bool {
        path.starts_with(self.project_root.join(self.tests_dir))
    }
}

/// Load the module graph rooted at `entry`.
pub fn load_graph(
    entry: &Path,
    project_root: &Path,
    src_dir: &str,
    tests_dir: &str,
    stdlib_root: &Path,
    interner: &mut StringInterner,
) -> CompileResult<ModuleGraph> {
    let ctx = LoadCtx { project_root, src_dir, tests_dir, stdlib_root };
    let mut modules = FxHashMap::default();
    let mut order = Vec::new();
    let mut visiting = FxHashSet::default();
    let mut visited = FxHashSet::default();
    let mut stack = Vec::new();
    visit(entry, &ctx, interner, &mut modules, &mut order, &mut visiting, &mut visited, &mut stack)?;
    Ok(ModuleGraph { modules, order })
}

#[allow(clippy::too_many_arguments)]
#[tracing::instrument(skip(ctx, interner, modules, order, visiting, visited, stack))]
fn visit(
    path: &Path,
    ctx: &LoadCtx<'_>,
    interner: &mut StringInterner,
    modules: &mut FxHashMap<Name, LoadedModule>,
    order: &mut Vec<Name>,
    visiting: &mut FxHashSet<Name>,
    visited: &mut FxHashSet<Name>,
    stack: &mut Vec<Name>,
) -> CompileResult<Name> {
    let id = module_id_for_path(interner, path, ctx.project_root, ctx.src_dir, ctx.stdlib_root);

    if visited.contains(&id) {
        return Ok(id);
    }
    if !visiting.insert(id) {
        let cycle_start = stack.iter().position(|n| *n == id).unwrap_or(0);
        let mut chain: Vec<String> = stack[cycle_start..].iter().map(|n| interner.resolve(*n).to_owned()).collect();
        chain.push(interner.resolve(id).to_owned());
        return Err(CompileError::new(Phase::Cli, diagnostics::import_cycle(Default::default(), &chain)));
    }
    stack.push(id);

    let under_tests_dir = ctx.under_tests_dir(path);
    let source = fs::read_to_string(path).map_err(|e| {
        CompileError::new(Phase::Cli, diagnostics::unreadable_source(Default::default(), &path.display().to_string(), &e))
    })?;

    first_diagnostic(ideo_surface::check_source(&source), Phase::Surface)?;

    let stem = path.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
    first_diagnostic(ideo_surface::check_filename(&stem), Phase::Surface)?;

    let (tokens, lex_diags) = ideo_lexer::lex(&source, interner);
    first_diagnostic(lex_diags, Phase::Lex)?;

    let (program, parse_diags) = ideo_parse::parse(&tokens, interner);
    first_diagnostic(parse_diags, Phase::Parse)?;

    let declares_tests = program.declarations.iter().any(|d| matches!(d, Declaration::Test(_)));
    let module_path = interner.resolve(id).to_string();
    if let Some(diag) = ideo_surface::check_test_placement(declares_tests, under_tests_dir, &module_path) {
        return Err(CompileError::new(Phase::Surface, diag));
    }

    let canon_diags = ideo_canon::check_module(&program, interner, under_tests_dir);
    first_diagnostic(canon_diags, Phase::Canon)?;

    for decl in &program.declarations {
        let Declaration::Import(import) = decl else { continue };
        let Some(child_path) = resolve_import_path(interner, &import.segments, ctx.project_root, ctx.src_dir, ctx.stdlib_root)
        else {
            let joined = import.segments.iter().map(|s| interner.resolve(*s)).collect::<Vec<_>>().join("⋅");
            return Err(CompileError::new(Phase::Cli, diagnostics::unresolved_import(import.span, &joined)));
        };
        if !child_path.is_file() {
            let joined = import.segments.iter().map(|s| interner.resolve(*s)).collect::<Vec<_>>().join("⋅");
            return Err(CompileError::new(Phase::Cli, diagnostics::unresolved_import(import.span, &joined)));
        }
        visit(&child_path, ctx, interner, modules, order, visiting, visited, stack)?;
    }

    stack.pop();
    visiting.remove(&id);
    visited.insert(id);
    order.push(id);
    modules.insert(id, LoadedModule { id, path: path.to_path_buf(), under_tests_dir, program });
    Ok(id)
}

fn first_diagnostic(diags: Vec<ideo_diagnostic::Diagnostic>, phase: Phase) -> CompileResult<()> {
    match diags.into_iter().next() {
        Some(diag) => Err(CompileError::new(phase, diag)),
        None => Ok(()),
    }
}
