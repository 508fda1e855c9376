//! Type representation, scoping, and the cross-module namespace registry
//! (§4.6, §4.6.2, §4.8). There is no unification or inference engine here —
//! every type this crate ever handles was either written by a programmer or
//! synthesised deterministically by the checker in `ideo_typeck`.

mod env;
mod registry;
mod structural;

pub use env::TypeEnv;
pub use registry::{ConstSignature, FunctionSignature, NamespaceRegistry, TypeDefinition, TypeEntry};
pub use structural::{is_empty_list_placeholder, render_type, types_equal};
