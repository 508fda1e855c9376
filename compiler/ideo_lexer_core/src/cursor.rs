//! A codepoint-aware cursor over source text.
//!
//! Positions are tracked in `(line, column, byte_offset)` as the codepoints
//! are consumed, so every downstream consumer gets source points for free
//! instead of re-deriving them from byte offsets later.

/// Walks a `&str` one Unicode scalar value at a time.
#[derive(Clone, Debug)]
pub struct Cursor<'a> {
    rest: std::str::Chars<'a>,
    line: u32,
    column: u32,
    byte_offset: u32,
}

/// Sentinel returned by `peek`/`peek2` at end of input. Not a valid source
/// character (per the grammar, NUL may not appear in source), so it can
/// never be confused with real content.
pub const EOF_CHAR: char = '\0';

impl<'a> Cursor<'a> {
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        Cursor { rest: source.chars(), line: 1, column: 1, byte_offset: 0 }
    }

    #[must_use]
    pub fn line(&self) -> u32 {
        self.line
    }

    #[must_use]
    pub fn column(&self) -> u32 {
        self.column
    }

    #[must_use]
    pub fn byte_offset(&self) -> u32 {
        self.byte_offset
    }

    #[must_use]
    pub fn is_eof(&self) -> bool {
        self.rest.as_str().is_empty()
    }

    #[must_use]
    pub fn peek(&self) -> char {
        self.rest.clone().next().unwrap_or(EOF_CHAR)
    }

    #[must_use]
    pub fn peek2(&self) -> char {
        let mut it = self.rest.clone();
        it.next();
        it.next().unwrap_or(EOF_CHAR)
    }

    /// Consume and return the next codepoint, advancing line/column/byte
    /// tracking. Returns `None` at EOF.
    pub fn bump(&mut self) -> Option<char> {
        let ch = self.rest.next()?;
        self.byte_offset += u32::try_from(ch.len_utf8()).unwrap_or(4);
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    /// Consume codepoints while `predicate` holds.
    pub fn eat_while(&mut self, mut predicate: impl FnMut(char) -> bool) {
        while predicate(self.peek()) && !self.is_eof() {
            self.bump();
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'a str {
        self.rest.as_str()
    }
}
