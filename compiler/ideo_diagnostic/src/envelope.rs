//! The command envelope (§3.5, §6.4): the uniform wire record every
//! top-level command returns.

use crate::{Diagnostic, Phase};
use serde::Serialize;

/// `formatVersion: 1` is frozen for the lifetime of this wire format; a
/// breaking change to the envelope shape would bump it.
pub const FORMAT_VERSION: u32 = 1;

#[derive(Clone, Debug, Serialize)]
pub struct CommandEnvelope<T: Serialize> {
    #[serde(rename = "formatVersion")]
    pub format_version: u32,
    pub command: String,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<Phase>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<Diagnostic>,
}

impl<T: Serialize> CommandEnvelope<T> {
    #[must_use]
    pub fn success(command: impl Into<String>, data: T) -> Self {
        CommandEnvelope {
            format_version: FORMAT_VERSION,
            command: command.into(),
            ok: true,
            phase: None,
            data: Some(data),
            error: None,
        }
    }

    #[must_use]
    pub fn failure(command: impl Into<String>, phase: Phase, error: Diagnostic) -> Self {
        CommandEnvelope {
            format_version: FORMAT_VERSION,
            command: command.into(),
            ok: false,
            phase: Some(phase),
            data: None,
            error: Some(error),
        }
    }

    /// Serialise as the single-line machine-readable record (§6.4).
    ///
    /// # Panics
    ///
    /// Panics if `T`'s `Serialize` impl fails, which would indicate a bug in
    /// the payload type, not a runtime condition.
    #[must_use]
    pub fn render_machine(&self) -> String {
        serde_json::to_string(self).expect("envelope payload must be serialisable")
    }

    /// Render the human-readable form. Carries the same information as
    /// `render_machine`, just formatted for a terminal.
    #[must_use]
    pub fn render_human(&self) -> String
    where
        T: std::fmt::Debug,
    {
        if self.ok {
            format!("{}: ok\n{:#?}", self.command, self.data)
        } else {
            let diag = self.error.as_ref().map(Diagnostic::render_human).unwrap_or_default();
            format!("{}: failed in phase {:?}\n{diag}", self.command, self.phase)
        }
    }
}
