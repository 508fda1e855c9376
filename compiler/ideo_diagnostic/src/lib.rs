//! Diagnostic system for the ideo compiler (§3.5, §4.1, §6.5).
//!
//! Every phase reports failures as a [`Diagnostic`]: a stable code, a
//! message, an optional span, and optional expected/found/details/fixits.
//! Every top-level command wraps its result in a [`CommandEnvelope`] so the
//! CLI (out of scope here) has one uniform shape to print.

mod diagnostic;
mod envelope;
mod error_code;
mod phase;

pub use diagnostic::{diagnostic, Diagnostic, FixIt};
pub use envelope::{CommandEnvelope, FORMAT_VERSION};
pub use error_code::ErrorCode;
pub use phase::Phase;

/// A distinguished error value that bubbles a single diagnostic through all
/// phases. Most phase functions return `Result<T, CompileError>`.
#[derive(Clone, Debug)]
pub struct CompileError {
    pub phase: Phase,
    pub diagnostic: Diagnostic,
}

impl CompileError {
    #[must_use]
    pub fn new(phase: Phase, diagnostic: Diagnostic) -> Self {
        CompileError { phase, diagnostic }
    }
}

impl std::fmt::Display for CompileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.diagnostic.render_human())
    }
}

impl std::error::Error for CompileError {}

pub type CompileResult<T> = Result<T, CompileError>;
