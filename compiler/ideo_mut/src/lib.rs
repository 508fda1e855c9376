//! Mutability checker (§4.7): `mut` parameters are this language's only
//! mutable bindings. This crate walks a type-checked module looking for
//! the ways a `mut` binding's discipline can be broken once it's in scope
//! — captured by an escaping closure, aliased across a call, or handed to
//! a parameter the callee never declared `mut`.
//!
//! It runs after `ideo_typeck` and before codegen, per module, in
//! topological order, the same way the type checker does.

mod checker;
mod diagnostics;
mod env;

pub use checker::check_module;
