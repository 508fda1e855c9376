//! Canonical-form validation (§4.5): a second pass over a parsed module that
//! enforces the single "right" shape for a well-formed file — declaration
//! order, name uniqueness, file-kind/`main` rules, recursion discipline, and
//! pattern-match discipline.
//!
//! This runs after parsing and before type checking, the same way
//! `ideo_surface`'s structural checks do; unlike type checking, none of
//! these rules need a type environment, only the tree and a module's
//! filesystem placement.
//!
//! Three rules named in the canonical-form section are never fired from
//! here:
//! - test-declaration placement is `ideo_surface::check_test_placement`'s
//!   job, since it is purely about where a file sits on disk, checked
//!   immediately post-parse before this crate even runs;
//! - the let/const annotation backstop has nothing to check: `ConstDecl.ty`
//!   and `Let`'s `ty` field are mandatory `Type`, never `Option<Type>`, so a
//!   tree that parsed at all already carries the annotation;
//! - this implementation distinguishes executable from library files by
//!   whether they define `main` at all (outside `tests/`, a file's kind
//!   *is* whichever way that goes), so there is no independent naming
//!   convention a file could violate.
//!
//! `ErrorCode::CanonTestOutsideTests`, `ErrorCode::CanonMissingAnnotation`,
//! `ErrorCode::CanonUnexpectedMain`, and `ErrorCode::CanonBadFilename` stay
//! reserved and unreachable for these reasons.

mod alphabetisation;
mod diagnostics;
mod file_kind;
mod ordering;
mod patterns;
mod recursion;
mod walk;

use ideo_diagnostic::Diagnostic;
use ideo_ir::{Program, StringInterner};

/// Run every canonical-form rule against a parsed module.
///
/// `under_tests_dir` tells the file-kind check whether this module lives
/// under the project's `tests/` directory, where `main` is mandatory.
#[must_use]
pub fn check_module(program: &Program, interner: &StringInterner, under_tests_dir: bool) -> Vec<Diagnostic> {
    let mut out = Vec::new();
    ordering::check_order(program, interner, &mut out);
    ordering::check_uniqueness(program, interner, &mut out);
    file_kind::check(program, interner, under_tests_dir, &mut out);
    recursion::check(program, interner, &mut out);
    patterns::check(program, &mut out);
    alphabetisation::check(program, interner, &mut out);
    out
}
