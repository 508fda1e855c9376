//! String interning for identifiers and module ids.
//!
//! Every surface identifier (`factorial`, `src/foo/bar`, `mod⋅Name`) is
//! interned to a [`Name`] so downstream phases compare `u32`s rather than
//! re-hashing strings. There is no global interner: each compilation owns a
//! [`StringInterner`] and threads it through the phases that need to resolve
//! a `Name` back to text (diagnostics, codegen).

use rustc_hash::FxHashMap;
use std::fmt;

/// An interned string.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, serde::Serialize, serde::Deserialize)]
pub struct Name(u32);

impl Name {
    #[must_use]
    pub fn as_u32(self) -> u32 {
        self.0
    }
}

/// Owns the canonical string for every [`Name`] handed out during a
/// compilation. Not thread-shared; each module's lexer/parser gets its own.
#[derive(Default, Debug)]
pub struct StringInterner {
    strings: Vec<Box<str>>,
    lookup: FxHashMap<Box<str>, Name>,
}

impl StringInterner {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intern(&mut self, text: &str) -> Name {
        if let Some(&name) = self.lookup.get(text) {
            return name;
        }
        let name = Name(u32::try_from(self.strings.len()).expect("interner overflow"));
        let boxed: Box<str> = text.into();
        self.strings.push(boxed.clone());
        self.lookup.insert(boxed, name);
        name
    }

    #[must_use]
    pub fn resolve(&self, name: Name) -> &str {
        &self.strings[name.0 as usize]
    }
}

/// Wraps a `Name` with the interner needed to display it.
pub struct NameDisplay<'a> {
    pub name: Name,
    pub interner: &'a StringInterner,
}

impl fmt::Display for NameDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.interner.resolve(self.name))
    }
}
