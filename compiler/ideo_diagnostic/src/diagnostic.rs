//! The [`Diagnostic`] record (§3.5) and fix-hint substitutions.

use crate::ErrorCode;
use ideo_ir::Span;

/// A machine-applicable edit: replace the text at `span` with `replacement`.
#[derive(Clone, Eq, PartialEq, Hash, Debug, serde::Serialize, serde::Deserialize)]
pub struct FixIt {
    pub span: Span,
    pub replacement: String,
    pub message: String,
}

impl FixIt {
    #[must_use]
    pub fn new(span: Span, replacement: impl Into<String>, message: impl Into<String>) -> Self {
        FixIt { span, replacement: replacement.into(), message: message.into() }
    }
}

/// A single structured, categorised error.
///
/// Every phase of the pipeline constructs `Diagnostic`s through the
/// `diagnostic()` constructor rather than building the struct directly, so
/// the code/phase pairing can never drift out of sync.
#[derive(Clone, Eq, PartialEq, Hash, Debug, serde::Serialize, serde::Deserialize)]
#[must_use = "diagnostics should be returned or collected, not silently dropped"]
pub struct Diagnostic {
    pub code: ErrorCode,
    pub message: String,
    pub location: Option<Span>,
    pub found: Option<String>,
    pub expected: Option<String>,
    pub details: Vec<String>,
    pub fixits: Vec<FixIt>,
}

impl Diagnostic {
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Diagnostic {
            code,
            message: message.into(),
            location: None,
            found: None,
            expected: None,
            details: Vec::new(),
            fixits: Vec::new(),
        }
    }

    #[must_use]
    pub fn at(mut self, span: Span) -> Self {
        self.location = Some(span);
        self
    }

    #[must_use]
    pub fn found(mut self, found: impl Into<String>) -> Self {
        self.found = Some(found.into());
        self
    }

    #[must_use]
    pub fn expected(mut self, expected: impl Into<String>) -> Self {
        self.expected = Some(expected.into());
        self
    }

    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.details.push(detail.into());
        self
    }

    #[must_use]
    pub fn with_fixit(mut self, fixit: FixIt) -> Self {
        self.fixits.push(fixit);
        self
    }

    /// Render the diagnostic the way a terminal renderer would: one line
    /// with the code, location, and message, followed by expected/found and
    /// any notes.
    #[must_use]
    pub fn render_human(&self) -> String {
        let mut out = String::new();
        if let Some(loc) = self.location {
            out.push_str(&format!("{loc}: "));
        }
        out.push_str(&format!("error[{}]: {}\n", self.code, self.message));
        if let (Some(expected), Some(found)) = (&self.expected, &self.found) {
            out.push_str(&format!("  expected: {expected}\n  found:    {found}\n"));
        }
        for detail in &self.details {
            out.push_str(&format!("  note: {detail}\n"));
        }
        for fixit in &self.fixits {
            out.push_str(&format!("  fix: {} -> {:?}\n", fixit.message, fixit.replacement));
        }
        out
    }
}

/// Convenience constructor mirroring the core spec's `diagnostic(code,
/// phase, message, extras) -> Diagnostic` contract. `phase` is implied by
/// `code` and is kept only as a debug-assertion that callers pass the right
/// code for the phase they're reporting from.
pub fn diagnostic(code: ErrorCode, phase: crate::Phase, message: impl Into<String>) -> Diagnostic {
    debug_assert_eq!(code.phase(), phase, "diagnostic code used from the wrong phase");
    Diagnostic::new(code, message)
}
