//! Token cursor and shared parser state.
//!
//! One token of lookahead is all the grammar needs; the only place this
//! parser looks further ahead is the bounded scan that tells a type
//! declaration's sum form from its alias form (see `types.rs`), which saves
//! and restores the cursor position rather than adding a second lookahead
//! slot.

use ideo_diagnostic::{diagnostic, Diagnostic, ErrorCode, Phase};
use ideo_ir::{Name, Span, StringInterner, Token, TokenKind};

pub(crate) struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    pub(crate) interner: &'a mut StringInterner,
    pub(crate) diagnostics: Vec<Diagnostic>,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(tokens: &'a [Token], interner: &'a mut StringInterner) -> Self {
        Parser { tokens, pos: 0, interner, diagnostics: Vec::new() }
    }

    pub(crate) fn peek(&self) -> Token {
        self.tokens[self.pos]
    }

    pub(crate) fn peek_kind(&self) -> TokenKind {
        self.tokens[self.pos].kind
    }

    /// Look `offset` tokens ahead without consuming anything. Saturates at
    /// the trailing `Eof` token rather than indexing out of bounds.
    pub(crate) fn peek_kind_at(&self, offset: usize) -> TokenKind {
        self.tokens[(self.pos + offset).min(self.tokens.len() - 1)].kind
    }

    pub(crate) fn span(&self) -> Span {
        self.tokens[self.pos].span
    }

    pub(crate) fn prev_span(&self) -> Span {
        self.tokens[self.pos.saturating_sub(1)].span
    }

    pub(crate) fn at_eof(&self) -> bool {
        self.peek_kind() == TokenKind::Eof
    }

    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    pub(crate) fn set_pos(&mut self, pos: usize) {
        self.pos = pos;
    }

    /// Consume the current token and return it.
    pub(crate) fn bump(&mut self) -> Token {
        let tok = self.tokens[self.pos];
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.peek_kind() == kind
    }

    /// Consume the current token if it matches `kind`.
    pub(crate) fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Consume a token of the expected kind, or record a diagnostic and
    /// return `None` without consuming anything.
    pub(crate) fn expect(&mut self, kind: TokenKind, expected: &str) -> Option<Token> {
        if self.check(kind) {
            Some(self.bump())
        } else {
            self.unexpected(expected);
            None
        }
    }

    pub(crate) fn unexpected(&mut self, expected: &str) {
        let found = self.peek_kind();
        self.diagnostics.push(
            diagnostic(
                ErrorCode::ParseUnexpectedToken,
                Phase::Parse,
                format!("expected {expected}, found {found}"),
            )
            .at(self.span())
            .expected(expected.to_owned())
            .found(found.to_string()),
        );
    }

    /// Consume a lower- or upper-initial identifier token and intern its
    /// text. Both identifier kinds carry text; callers that need exactly one
    /// case check `peek_kind` themselves first.
    pub(crate) fn expect_ident(&mut self, expected: &str) -> Option<Name> {
        match self.peek_kind() {
            TokenKind::LowerIdent | TokenKind::UpperIdent => {
                let tok = self.bump();
                tok.text
            }
            _ => {
                let found = self.peek_kind();
                self.diagnostics.push(
                    diagnostic(
                        ErrorCode::ParseExpectedIdent,
                        Phase::Parse,
                        format!("expected {expected}, found {found}"),
                    )
                    .at(self.span())
                    .expected(expected.to_owned())
                    .found(found.to_string()),
                );
                None
            }
        }
    }

    pub(crate) fn intern(&mut self, text: &str) -> Name {
        self.interner.intern(text)
    }

    /// Skip forward until the current token looks like the start of a new
    /// declaration (or `Eof`). Used to recover after a malformed
    /// declaration so the rest of the file can still be parsed.
    pub(crate) fn synchronize_to_declaration(&mut self) {
        while !self.at_eof() {
            match self.peek_kind() {
                TokenKind::KwType
                | TokenKind::KwImport
                | TokenKind::KwExtern
                | TokenKind::KwConst
                | TokenKind::KwTest
                | TokenKind::KwExport
                | TokenKind::KwMockable
                | TokenKind::Lambda => return,
                _ => {
                    self.bump();
                }
            }
        }
    }
}
