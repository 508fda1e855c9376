//! The closed token alphabet produced by the lexer.

use crate::{Name, Span};
use std::fmt;

/// A single lexical token.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, serde::Serialize, serde::Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    /// Interned text for identifiers and literals; unused for fixed-lexeme
    /// kinds (glyphs, punctuation) where `kind` alone determines the text.
    pub text: Option<Name>,
    pub span: Span,
}

impl Token {
    #[must_use]
    pub fn new(kind: TokenKind, text: Option<Name>, span: Span) -> Self {
        Token { kind, text, span }
    }
}

/// The fixed, closed set of token kinds. Every source byte sequence maps to
/// exactly one of these; there is no extensible "other" bucket.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, serde::Serialize, serde::Deserialize)]
pub enum TokenKind {
    // Literals
    IntLiteral,
    FloatLiteral,
    StringLiteral,
    CharLiteral,
    True,
    False,
    Unit,

    // Identifiers
    LowerIdent,
    UpperIdent,

    // Keyword glyphs
    Lambda,      // λ
    Arrow,       // →
    Equiv,       // ≡
    MapsTo,      // ↦
    FilterOp,    // ⊳
    FoldOp,      // ⊕
    Dot,         // ⋅ (namespace separator)
    And,         // ∧
    Or,          // ∨
    Not,         // ¬
    NotEq,       // ≠
    LtEq,        // ≤
    GtEq,        // ≥
    Concat,      // ⧺
    BoolTrueLit, // ⊤
    BoolFalseLit,// ⊥

    // Short ASCII declaration-head keywords
    KwType,      // t
    KwImport,    // i
    KwExtern,    // e
    KwLet,       // l
    KwConst,     // c
    KwMut,       // mut
    KwMockable,  // mockable
    KwWithMock,  // with_mock
    KwWhen,      // when
    KwTest,      // test
    KwExport,    // export

    // Type glyphs
    TyInt,   // ℤ
    TyReal,  // ℝ
    TyBool,  // 𝔹
    TyStr,   // 𝕊
    TyChar,  // ℂ
    TyUnit,  // 𝕌
    TyEmpty, // ∅

    // Delimiters and punctuation
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Colon,
    Semicolon,
    Comma,
    Dot2, // ..
    Period,
    Pipe,
    Underscore,
    Bang,
    Amp,
    Hash,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Lt,
    Gt,
    Eq,
    PipeGt,  // |>
    ShiftR,  // >>
    ShiftL,  // <<

    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TokenKind::IntLiteral => "integer literal",
            TokenKind::FloatLiteral => "float literal",
            TokenKind::StringLiteral => "string literal",
            TokenKind::CharLiteral => "char literal",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::Unit => "()",
            TokenKind::LowerIdent => "identifier",
            TokenKind::UpperIdent => "type identifier",
            TokenKind::Lambda => "λ",
            TokenKind::Arrow => "→",
            TokenKind::Equiv => "≡",
            TokenKind::MapsTo => "↦",
            TokenKind::FilterOp => "⊳",
            TokenKind::FoldOp => "⊕",
            TokenKind::Dot => "⋅",
            TokenKind::And => "∧",
            TokenKind::Or => "∨",
            TokenKind::Not => "¬",
            TokenKind::NotEq => "≠",
            TokenKind::LtEq => "≤",
            TokenKind::GtEq => "≥",
            TokenKind::Concat => "⧺",
            TokenKind::BoolTrueLit => "⊤",
            TokenKind::BoolFalseLit => "⊥",
            TokenKind::KwType => "t",
            TokenKind::KwImport => "i",
            TokenKind::KwExtern => "e",
            TokenKind::KwLet => "l",
            TokenKind::KwConst => "c",
            TokenKind::KwMut => "mut",
            TokenKind::KwMockable => "mockable",
            TokenKind::KwWithMock => "with_mock",
            TokenKind::KwWhen => "when",
            TokenKind::KwTest => "test",
            TokenKind::KwExport => "export",
            TokenKind::TyInt => "ℤ",
            TokenKind::TyReal => "ℝ",
            TokenKind::TyBool => "𝔹",
            TokenKind::TyStr => "𝕊",
            TokenKind::TyChar => "ℂ",
            TokenKind::TyUnit => "𝕌",
            TokenKind::TyEmpty => "∅",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::Colon => ":",
            TokenKind::Semicolon => ";",
            TokenKind::Comma => ",",
            TokenKind::Dot2 => "..",
            TokenKind::Period => ".",
            TokenKind::Pipe => "|",
            TokenKind::Underscore => "_",
            TokenKind::Bang => "!",
            TokenKind::Amp => "&",
            TokenKind::Hash => "#",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::Lt => "<",
            TokenKind::Gt => ">",
            TokenKind::Eq => "=",
            TokenKind::PipeGt => "|>",
            TokenKind::ShiftR => ">>",
            TokenKind::ShiftL => "<<",
            TokenKind::Eof => "<eof>",
        };
        f.write_str(s)
    }
}
