//! Type environment for name resolution and scoping (§9 Design Notes:
//! "a persistent chain of maps is simplest").
//!
//! There's no generalization or instantiation here — every binding carries
//! a single, already-known [`Type`] because annotations are mandatory
//! throughout this language. That means the chain only ever needs to store
//! monomorphic types, unlike a Hindley-Milner environment juggling type
//! schemes.

use std::rc::Rc;

use ideo_ir::{Name, Type};
use rustc_hash::FxHashMap;

#[derive(Clone)]
struct Frame {
    bindings: FxHashMap<Name, Type>,
    parent: Option<Rc<Frame>>,
}

/// A scope chain mapping bound names to their types.
///
/// Cloning a `TypeEnv` is an `Rc` bump, so pushing and popping scopes while
/// checking a function body never re-copies an outer scope's bindings.
#[derive(Clone)]
pub struct TypeEnv(Rc<Frame>);

impl TypeEnv {
    #[must_use]
    pub fn new() -> Self {
        TypeEnv(Rc::new(Frame { bindings: FxHashMap::default(), parent: None }))
    }

    /// Start a child scope. Bindings added to the child never leak back
    /// into `self`; looking a name up in the child falls through to it.
    #[must_use]
    pub fn child(&self) -> Self {
        TypeEnv(Rc::new(Frame { bindings: FxHashMap::default(), parent: Some(self.0.clone()) }))
    }

    /// Bind `name` in the *current* scope, shadowing any outer binding.
    pub fn bind(&mut self, name: Name, ty: Type) {
        Rc::make_mut(&mut self.0).bindings.insert(name, ty);
    }

    #[must_use]
    pub fn lookup(&self, name: Name) -> Option<&Type> {
        let mut frame = &self.0;
        loop {
            if let Some(ty) = frame.bindings.get(&name) {
                return Some(ty);
            }
            frame = frame.parent.as_ref()?;
        }
    }

    #[must_use]
    pub fn is_bound_locally(&self, name: Name) -> bool {
        self.0.bindings.contains_key(&name)
    }
}

impl Default for TypeEnv {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ideo_ir::StringInterner;

    #[test]
    fn new_env_has_no_bindings() {
        let mut interner = StringInterner::new();
        let x = interner.intern("x");
        assert!(TypeEnv::new().lookup(x).is_none());
    }

    #[test]
    fn child_scope_shadows_and_falls_through() {
        let mut interner = StringInterner::new();
        let x = interner.intern("x");
        let y = interner.intern("y");

        let mut parent = TypeEnv::new();
        parent.bind(x, Type::Int);

        let mut child = parent.child();
        child.bind(x, Type::Bool);
        child.bind(y, Type::String);

        assert!(matches!(child.lookup(x), Some(Type::Bool)));
        assert!(matches!(parent.lookup(x), Some(Type::Int)));
        assert!(matches!(child.lookup(y), Some(Type::String)));
        assert!(parent.lookup(y).is_none());
    }

    #[test]
    fn is_bound_locally_ignores_parent_scopes() {
        let mut interner = StringInterner::new();
        let x = interner.intern("x");

        let mut parent = TypeEnv::new();
        parent.bind(x, Type::Int);
        let child = parent.child();

        assert!(parent.is_bound_locally(x));
        assert!(!child.is_bound_locally(x));
    }
}
