//! The compiler phase a diagnostic was raised in.

use std::fmt;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, serde::Serialize, serde::Deserialize)]
pub enum Phase {
    Surface,
    Lex,
    Parse,
    Canon,
    Type,
    Mutability,
    Extern,
    Codegen,
    Runtime,
    Cli,
}

impl Phase {
    #[must_use]
    pub fn prefix(self) -> &'static str {
        match self {
            Phase::Surface => "SURFACE",
            Phase::Lex => "LEX",
            Phase::Parse => "PARSE",
            Phase::Canon => "CANON",
            Phase::Type => "TYPE",
            Phase::Mutability => "MUTABILITY",
            Phase::Extern => "EXTERN",
            Phase::Codegen => "CODEGEN",
            Phase::Runtime => "RUNTIME",
            Phase::Cli => "CLI",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}
