//! Scope chain mapping a bound name to whether it was declared `mut`.
//!
//! Only function and lambda parameters ever bind `true` here. `let`
//! patterns always bind `false`: the grammar gives `let` no `mut` marker
//! of its own, so every traceable mutable binding in a module originates
//! at some parameter.

use std::rc::Rc;

use ideo_ir::Name;
use rustc_hash::FxHashMap;

#[derive(Clone)]
struct Frame {
    bindings: FxHashMap<Name, bool>,
    parent: Option<Rc<Frame>>,
}

#[derive(Clone)]
pub(crate) struct MutEnv(Rc<Frame>);

impl MutEnv {
    pub(crate) fn new() -> Self {
        MutEnv(Rc::new(Frame { bindings: FxHashMap::default(), parent: None }))
    }

    /// Start a child scope; bindings added here never leak back to `self`.
    pub(crate) fn child(&self) -> Self {
        MutEnv(Rc::new(Frame { bindings: FxHashMap::default(), parent: Some(self.0.clone()) }))
    }

    pub(crate) fn bind(&mut self, name: Name, mutable: bool) {
        Rc::make_mut(&mut self.0).bindings.insert(name, mutable);
    }

    pub(crate) fn lookup(&self, name: Name) -> Option<bool> {
        let mut frame = &self.0;
        loop {
            if let Some(&mutable) = frame.bindings.get(&name) {
                return Some(mutable);
            }
            frame = frame.parent.as_ref()?;
        }
    }
}

impl Default for MutEnv {
    fn default() -> Self {
        Self::new()
    }
}
