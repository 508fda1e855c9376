//! Cross-module namespace registry (§4.6.2, §4.8).
//!
//! Each module registers its declared types, functions, and consts here
//! once, after it has itself type-checked; downstream modules then resolve
//! `mod⋅Name` / `mod⋅member` references against the registry alone,
//! without needing the exporting module's AST in scope. `ideo_module`
//! threads one registry through the whole compilation in topological
//! order, registering a module only after its own dependencies are
//! already in it.

use ideo_ir::{Declaration, Name, Program, Type, TypeDef};
use rustc_hash::{FxHashMap, FxHashSet};

#[derive(Clone, Debug)]
pub enum TypeDefinition {
    Sum { variants: Vec<(Name, Vec<Type>)> },
    Product { fields: Vec<(Name, Type)> },
    Alias(Type),
}

#[derive(Clone, Debug)]
pub struct TypeEntry {
    pub type_params: Vec<Name>,
    pub def: TypeDefinition,
    pub exported: bool,
}

#[derive(Clone, Debug)]
pub struct FunctionSignature {
    pub params: Vec<Type>,
    pub effects: Vec<Name>,
    pub return_type: Type,
    pub exported: bool,
    pub mockable: bool,
}

#[derive(Clone, Debug)]
pub struct ConstSignature {
    pub ty: Type,
    pub exported: bool,
}

#[derive(Default, Debug)]
struct ModuleEntry {
    types: FxHashMap<Name, TypeEntry>,
    functions: FxHashMap<Name, FunctionSignature>,
    consts: FxHashMap<Name, ConstSignature>,
}

/// Every module's exported (and non-exported, for same-module lookups)
/// declarations, keyed by the module's canonical id.
#[derive(Default)]
pub struct NamespaceRegistry {
    modules: FxHashMap<Name, ModuleEntry>,
}

impl NamespaceRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every top-level declaration of `program` under `module`.
    /// Safe to call at most once per module id.
    ///
    /// Every nested type reference that resolves to one of `module`'s own
    /// locally-declared types is rewritten to `Type::Qualified` before it's
    /// stored (§4.6.2): a downstream module resolves fields and variant
    /// payloads against the registry alone, never against this module's AST,
    /// so a bare `Type::Named` surviving into the registry would resolve
    /// against the *importing* module's own local type table instead.
    pub fn register_module(&mut self, module: Name, program: &Program) {
        let local_type_names: FxHashSet<Name> = program
            .declarations
            .iter()
            .filter_map(|d| match d {
                Declaration::Type(t) => Some(t.name),
                _ => None,
            })
            .collect();

        let entry = self.modules.entry(module).or_default();
        for decl in &program.declarations {
            match decl {
                Declaration::Type(t) => {
                    let def = match &t.def {
                        TypeDef::Sum(variants) => TypeDefinition::Sum {
                            variants: variants
                                .iter()
                                .map(|v| {
                                    (
                                        v.name,
                                        v.fields.iter().map(|f| qualify_locals(f, module, &local_type_names)).collect(),
                                    )
                                })
                                .collect(),
                        },
                        TypeDef::Product(fields) => TypeDefinition::Product {
                            fields: fields
                                .iter()
                                .map(|f| (f.name, qualify_locals(&f.ty, module, &local_type_names)))
                                .collect(),
                        },
                        TypeDef::Alias(ty) => TypeDefinition::Alias(qualify_locals(ty, module, &local_type_names)),
                    };
                    entry.types.insert(
                        t.name,
                        TypeEntry { type_params: t.type_params.clone(), def, exported: t.exported },
                    );
                }
                Declaration::Function(f) => {
                    entry.functions.insert(
                        f.name,
                        FunctionSignature {
                            params: f.params.iter().map(|p| qualify_locals(&p.ty, module, &local_type_names)).collect(),
                            effects: f.effects.clone(),
                            return_type: qualify_locals(&f.return_type, module, &local_type_names),
                            exported: f.exported,
                            mockable: f.mockable,
                        },
                    );
                }
                Declaration::Const(c) => {
                    entry.consts.insert(
                        c.name,
                        ConstSignature { ty: qualify_locals(&c.ty, module, &local_type_names), exported: c.exported },
                    );
                }
                Declaration::Import(_) | Declaration::Extern(_) | Declaration::Test(_) => {}
            }
        }
    }

    #[must_use]
    pub fn lookup_type(&self, module: Name, name: Name) -> Option<&TypeEntry> {
        self.modules.get(&module)?.types.get(&name)
    }

    #[must_use]
    pub fn lookup_function(&self, module: Name, name: Name) -> Option<&FunctionSignature> {
        self.modules.get(&module)?.functions.get(&name)
    }

    #[must_use]
    pub fn lookup_const(&self, module: Name, name: Name) -> Option<&ConstSignature> {
        self.modules.get(&module)?.consts.get(&name)
    }

    /// Find the sum type in `module` that declares `variant`, for resolving
    /// a cross-module constructor reached through `mod⋅Variant`.
    #[must_use]
    pub fn find_variant(&self, module: Name, variant: Name) -> Option<(Name, &TypeEntry, &[Type])> {
        let entry = self.modules.get(&module)?;
        entry.types.iter().find_map(|(type_name, t)| match &t.def {
            TypeDefinition::Sum { variants } => variants
                .iter()
                .find(|(n, _)| *n == variant)
                .map(|(_, fields)| (*type_name, t, fields.as_slice())),
            _ => None,
        })
    }

    /// Is `module` registered at all? Used to distinguish "unknown module"
    /// from "known module, unknown member" when diagnosing a bad
    /// `m⋅name` access.
    #[must_use]
    pub fn has_module(&self, module: Name) -> bool {
        self.modules.contains_key(&module)
    }
}

/// Rewrite every `Type::Named` in `ty` whose name is in `locals` to
/// `Type::Qualified { module, .. }`, recursing through every position a
/// type can nest in. A bare lowercase type variable parses as `Type::Var`,
/// never `Type::Named`, so type parameters are never mistaken for a local
/// type here.
fn qualify_locals(ty: &Type, module: Name, locals: &FxHashSet<Name>) -> Type {
    match ty {
        Type::Int | Type::Float | Type::Bool | Type::String | Type::Char | Type::Unit | Type::Var(_) => ty.clone(),
        Type::List(inner) => Type::List(Box::new(qualify_locals(inner, module, locals))),
        Type::Tuple(elems) => Type::Tuple(elems.iter().map(|t| qualify_locals(t, module, locals)).collect()),
        Type::Map(key, value) => {
            Type::Map(Box::new(qualify_locals(key, module, locals)), Box::new(qualify_locals(value, module, locals)))
        }
        Type::Function { params, effects, ret } => Type::Function {
            params: params.iter().map(|t| qualify_locals(t, module, locals)).collect(),
            effects: effects.clone(),
            ret: Box::new(qualify_locals(ret, module, locals)),
        },
        Type::Named { name, args } => {
            let args = args.iter().map(|t| qualify_locals(t, module, locals)).collect();
            if locals.contains(name) {
                Type::Qualified { module, name: *name, args }
            } else {
                Type::Named { name: *name, args }
            }
        }
        Type::Qualified { module: m, name, args } => {
            Type::Qualified { module: *m, name: *name, args: args.iter().map(|t| qualify_locals(t, module, locals)).collect() }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ideo_ir::{FunctionDecl, Literal, Expr, ExprKind, Span, StringInterner};

    fn unit_expr() -> Expr {
        Expr { kind: ExprKind::Literal(Literal::Unit), span: Span::default() }
    }

    #[test]
    fn registers_and_looks_up_an_exported_function() {
        let mut interner = StringInterner::new();
        let module = interner.intern("m");
        let add = interner.intern("add");

        let program = Program {
            declarations: vec![Declaration::Function(FunctionDecl {
                name: add,
                exported: true,
                mockable: false,
                params: vec![],
                effects: vec![],
                return_type: Type::Int,
                body: unit_expr(),
                span: Span::default(),
            })],
            span: Span::default(),
        };

        let mut registry = NamespaceRegistry::new();
        registry.register_module(module, &program);

        let sig = registry.lookup_function(module, add).expect("add should be registered");
        assert!(sig.exported);
        assert!(matches!(sig.return_type, Type::Int));
    }

    #[test]
    fn unregistered_module_has_no_entries() {
        let mut interner = StringInterner::new();
        let module = interner.intern("missing");
        let name = interner.intern("whatever");
        let registry = NamespaceRegistry::new();
        assert!(!registry.has_module(module));
        assert!(registry.lookup_function(module, name).is_none());
    }

    /// A record field (or sum variant payload) that names another type
    /// declared in the same module must be rewritten to a qualified
    /// reference at registration time, so a downstream module can resolve
    /// it against the registry alone, without ever consulting this module's
    /// AST (§4.6.2).
    #[test]
    fn exported_record_field_naming_a_sibling_local_type_is_qualified() {
        use ideo_ir::{ProductField, TypeDecl};

        let mut interner = StringInterner::new();
        let module = interner.intern("m");
        let point = interner.intern("Point");
        let shape = interner.intern("Shape");
        let origin = interner.intern("origin");

        let point_decl = Declaration::Type(TypeDecl {
            name: point,
            exported: true,
            type_params: vec![],
            def: TypeDef::Product(vec![]),
            span: Span::default(),
        });
        let shape_decl = Declaration::Type(TypeDecl {
            name: shape,
            exported: true,
            type_params: vec![],
            def: TypeDef::Product(vec![ProductField {
                name: origin,
                ty: Type::Named { name: point, args: vec![] },
                span: Span::default(),
            }]),
            span: Span::default(),
        });

        let program = Program { declarations: vec![point_decl, shape_decl], span: Span::default() };

        let mut registry = NamespaceRegistry::new();
        registry.register_module(module, &program);

        let shape_entry = registry.lookup_type(module, shape).expect("Shape should be registered");
        let TypeDefinition::Product { fields } = &shape_entry.def else {
            panic!("Shape should register as a product type");
        };
        let (_, origin_ty) = fields.iter().find(|(n, _)| *n == origin).expect("origin field registered");
        assert!(
            matches!(origin_ty, Type::Qualified { module: m, name, .. } if *m == module && *name == point),
            "a field naming a sibling local type should be rewritten to Type::Qualified, got {origin_ty:?}"
        );
    }
}
