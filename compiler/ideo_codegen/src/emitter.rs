//! Per-module emission context (§4.9): the mock/extern/import bookkeeping
//! every call site needs, collected once up front from the module's own
//! declarations rather than re-derived at every use.

use ideo_ir::{Declaration, Name, Program, StringInterner};
use ideo_types::NamespaceRegistry;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::imports::{extern_specifier, relative_specifier};

/// One `import * as alias from "specifier";` line for the top of the
/// generated module.
pub(crate) struct ImportStmt {
    pub(crate) alias: String,
    pub(crate) specifier: String,
}

pub(crate) struct ModuleEmitter<'a> {
    pub(crate) interner: &'a StringInterner,
    pub(crate) registry: &'a NamespaceRegistry,
    pub(crate) module_id_str: String,
    local_mockable: FxHashSet<Name>,
    local_externs: FxHashMap<Name, String>,
    import_aliases: FxHashMap<Name, Name>,
}

impl<'a> ModuleEmitter<'a> {
    /// Scan `program`'s own `i`/`e` declarations once, interning each
    /// import's canonical module id exactly the way `ideo_typeck` already
    /// did when it type-checked this module (`registration::canonical_module_id`,
    /// §4.6.2) — re-interning the same text yields the same `Name`, so this
    /// never mints an id the registry doesn't already recognize.
    pub(crate) fn new(
        interner: &'a mut StringInterner,
        registry: &'a NamespaceRegistry,
        module_id: Name,
        program: &Program,
    ) -> (Self, Vec<ImportStmt>) {
        let module_id_str = interner.resolve(module_id).to_owned();
        let mut local_mockable = FxHashSet::default();
        let mut local_externs = FxHashMap::default();
        let mut import_aliases = FxHashMap::default();
        let mut imports = Vec::new();

        for decl in &program.declarations {
            match decl {
                Declaration::Function(f) if f.mockable => {
                    local_mockable.insert(f.name);
                }
                Declaration::Import(i) => {
                    if let Some(&alias) = i.segments.last() {
                        let joined =
                            i.segments.iter().map(|s| interner.resolve(*s).to_owned()).collect::<Vec<_>>().join("/");
                        let target = interner.intern(&joined);
                        import_aliases.insert(alias, target);
                        imports.push(ImportStmt {
                            alias: interner.resolve(alias).to_owned(),
                            specifier: relative_specifier(&module_id_str, &joined),
                        });
                    }
                }
                Declaration::Extern(e) => {
                    if let Some(&alias) = e.segments.last() {
                        let joined =
                            e.segments.iter().map(|s| interner.resolve(*s).to_owned()).collect::<Vec<_>>().join("/");
                        local_externs.insert(alias, joined.clone());
                        imports.push(ImportStmt {
                            alias: interner.resolve(alias).to_owned(),
                            specifier: extern_specifier(&joined),
                        });
                    }
                }
                Declaration::Type(_) | Declaration::Const(_) | Declaration::Function(_) | Declaration::Test(_) => {}
            }
        }

        let interner: &StringInterner = interner;
        (ModuleEmitter { interner, registry, module_id_str, local_mockable, local_externs, import_aliases }, imports)
    }

    #[must_use]
    pub(crate) fn resolve(&self, name: Name) -> &str {
        self.interner.resolve(name)
    }

    #[must_use]
    pub(crate) fn is_local_mockable(&self, name: Name) -> bool {
        self.local_mockable.contains(&name)
    }

    #[must_use]
    pub(crate) fn local_extern_path(&self, alias: Name) -> Option<&str> {
        self.local_externs.get(&alias).map(String::as_str)
    }

    #[must_use]
    pub(crate) fn import_target(&self, alias: Name) -> Option<Name> {
        self.import_aliases.get(&alias).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ideo_ir::{FunctionDecl, Expr, ExprKind, ImportDecl, Literal, Span};

    fn unit_expr() -> Expr {
        Expr { kind: ExprKind::Literal(Literal::Unit), span: Span::default() }
    }

    #[test]
    fn collects_local_mockable_functions() {
        let mut interner = StringInterner::new();
        let module = interner.intern("src/main");
        let f = interner.intern("fetchThing");
        let program = Program {
            declarations: vec![Declaration::Function(FunctionDecl {
                name: f,
                exported: false,
                mockable: true,
                params: vec![],
                effects: vec![],
                return_type: ideo_ir::Type::Unit,
                body: unit_expr(),
                span: Span::default(),
            })],
            span: Span::default(),
        };
        let registry = NamespaceRegistry::new();
        let (emitter, imports) = ModuleEmitter::new(&mut interner, &registry, module, &program);
        assert!(emitter.is_local_mockable(f));
        assert!(imports.is_empty());
    }

    #[test]
    fn import_alias_resolves_to_a_relative_specifier() {
        let mut interner = StringInterner::new();
        let module = interner.intern("src/main");
        let src = interner.intern("src");
        let helper = interner.intern("helper");
        let program = Program {
            declarations: vec![Declaration::Import(ImportDecl { segments: vec![src, helper], span: Span::default() })],
            span: Span::default(),
        };
        let registry = NamespaceRegistry::new();
        let (emitter, imports) = ModuleEmitter::new(&mut interner, &registry, module, &program);
        assert_eq!(imports.len(), 1);
        assert_eq!(imports[0].alias, "helper");
        assert_eq!(imports[0].specifier, "./helper.mjs");
        assert!(emitter.import_target(helper).is_some());
    }
}
