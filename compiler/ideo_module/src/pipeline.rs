//! Cross-module checking (§4.8 steps 5-6): once the whole graph is loaded
//! and ordered, type-check and mutability-check every module in that same
//! order, threading one [`NamespaceRegistry`] forward so each module sees
//! its dependencies' exports by the time it's checked.

use ideo_diagnostic::{CompileError, CompileResult, Phase};
use ideo_ir::StringInterner;
use ideo_types::NamespaceRegistry;

use crate::graph::ModuleGraph;

/// Type-check and mutability-check every module in `graph.order`.
///
/// Returns the fully populated registry on success — codegen (run
/// separately, also in topo order) needs it to resolve cross-module
/// imports to their generated target files.
#[tracing::instrument(skip(graph, interner))]
pub fn check_graph(graph: &ModuleGraph, interner: &mut StringInterner) -> CompileResult<NamespaceRegistry> {
    let mut registry = NamespaceRegistry::new();
    for &id in &graph.order {
        let module = graph.get(id).expect("graph.order only lists ids present in graph.modules");
        let diags = ideo_typeck::check_module(interner, id, &module.program, &registry);
        if let Some(diag) = diags.into_iter().next() {
            return Err(CompileError::new(Phase::Type, diag));
        }
        registry.register_module(id, &module.program);
    }

    for &id in &graph.order {
        let module = graph.get(id).expect("graph.order only lists ids present in graph.modules");
        let diags = ideo_mut::check_module(&module.program);
        if let Some(diag) = diags.into_iter().next() {
            return Err(CompileError::new(Phase::Mutability, diag));
        }
    }

    Ok(registry)
}
