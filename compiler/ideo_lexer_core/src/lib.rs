//! Low-level, codepoint-aware scanning primitives for ideo source text.
//!
//! This crate is the "raw" half of the lexer's two-layer architecture
//! (mirroring `rustc_lexer`'s split from `rustc_parse::lexer`):
//!
//! - **`ideo_lexer_core`** (this crate): a [`Cursor`] over codepoints plus
//!   pre-flight encoding checks. No spans, no interning, no diagnostics.
//! - **`ideo_lexer`**: "cooks" cursor output into compiler-ready tokens
//!   with spans, interning, keyword resolution, and diagnostics.

mod cursor;
mod source_buffer;

pub use cursor::{Cursor, EOF_CHAR};
pub use source_buffer::{EncodingIssue, EncodingIssueKind, SourceBuffer};
