//! Pass 1: collect a module's own declared signatures before checking any
//! body, so mutually recursive functions and forward references within the
//! same module resolve without a second pass over the declarations.

use ideo_ir::{Declaration, Name, Program, StringInterner, Type, TypeDef};
use ideo_types::TypeDefinition;
use rustc_hash::FxHashMap;

pub(crate) struct FunctionSig {
    pub params: Vec<Type>,
    pub effects: Vec<Name>,
    pub return_type: Type,
}

pub(crate) struct LocalTypeDef {
    pub type_params: Vec<Name>,
    pub def: TypeDefinition,
}

#[derive(Default)]
pub(crate) struct LocalSignatures {
    pub functions: FxHashMap<Name, FunctionSig>,
    pub consts: FxHashMap<Name, Type>,
    pub types: FxHashMap<Name, LocalTypeDef>,
}

pub(crate) fn collect(program: &Program) -> LocalSignatures {
    let mut signatures = LocalSignatures::default();
    for decl in &program.declarations {
        match decl {
            Declaration::Function(f) => {
                signatures.functions.insert(
                    f.name,
                    FunctionSig {
                        params: f.params.iter().map(|p| p.ty.clone()).collect(),
                        effects: f.effects.clone(),
                        return_type: f.return_type.clone(),
                    },
                );
            }
            Declaration::Const(c) => {
                signatures.consts.insert(c.name, c.ty.clone());
            }
            Declaration::Type(t) => {
                let def = match &t.def {
                    TypeDef::Sum(variants) => TypeDefinition::Sum {
                        variants: variants.iter().map(|v| (v.name, v.fields.clone())).collect(),
                    },
                    TypeDef::Product(fields) => TypeDefinition::Product {
                        fields: fields.iter().map(|f| (f.name, f.ty.clone())).collect(),
                    },
                    TypeDef::Alias(ty) => TypeDefinition::Alias(ty.clone()),
                };
                signatures
                    .types
                    .insert(t.name, LocalTypeDef { type_params: t.type_params.clone(), def });
            }
            Declaration::Import(_) | Declaration::Extern(_) | Declaration::Test(_) => {}
        }
    }
    signatures
}

/// What this module's own `i` and `e` declarations make reachable through
/// `alias⋅member` expressions, keyed by the alias the source actually uses.
#[derive(Default)]
pub(crate) struct Imports {
    /// Local alias (last path segment) -> the other module's canonical id.
    pub modules: FxHashMap<Name, Name>,
    /// Local alias -> member name -> declared type, for `e` namespaces.
    /// These never need the cross-module registry: the extern block spells
    /// out every member's type itself.
    pub externs: FxHashMap<Name, FxHashMap<Name, Type>>,
}

/// Canonical module id for an `i`/`e` path: its segments joined with `/`,
/// matching how `ideo_module` derives a module id from a source file's
/// relative path. Interning happens here because this is the only place
/// `ideo_typeck` ever needs to mint a *new* name rather than look one up.
pub(crate) fn canonical_module_id(interner: &mut StringInterner, segments: &[Name]) -> Name {
    let joined = segments.iter().map(|s| interner.resolve(*s)).collect::<Vec<_>>().join("/");
    interner.intern(&joined)
}

pub(crate) fn collect_imports(interner: &mut StringInterner, program: &Program) -> Imports {
    let mut imports = Imports::default();
    for decl in &program.declarations {
        match decl {
            Declaration::Import(i) => {
                if let Some(&alias) = i.segments.last() {
                    let id = canonical_module_id(interner, &i.segments);
                    imports.modules.insert(alias, id);
                }
            }
            Declaration::Extern(e) => {
                if let Some(&alias) = e.segments.last() {
                    let members = e.members.iter().map(|m| (m.name, m.ty.clone())).collect();
                    imports.externs.insert(alias, members);
                }
            }
            Declaration::Type(_) | Declaration::Const(_) | Declaration::Function(_) | Declaration::Test(_) => {}
        }
    }
    imports
}
