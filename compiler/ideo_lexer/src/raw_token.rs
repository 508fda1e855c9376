//! `logos`-derived scanning for every token except nested comments and
//! string/char literal bodies, which are not regular and are scanned by
//! hand in `lib.rs`.

use logos::Logos;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")]
pub(crate) enum RawToken {
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident,

    #[regex(r"[0-9]+\.[0-9]+")]
    FloatLiteral,

    #[regex(r"[0-9]+")]
    IntLiteral,

    #[token("λ")]
    Lambda,
    #[token("→")]
    Arrow,
    #[token("≡")]
    Equiv,
    #[token("↦")]
    MapsTo,
    #[token("⊳")]
    FilterOp,
    #[token("⊕")]
    FoldOp,
    #[token("⋅")]
    NsDot,
    #[token("∧")]
    And,
    #[token("∨")]
    Or,
    #[token("¬")]
    Not,
    #[token("≠")]
    NotEq,
    #[token("≤")]
    LtEq,
    #[token("≥")]
    GtEq,
    #[token("⧺")]
    Concat,
    #[token("⊤")]
    BoolTrueLit,
    #[token("⊥")]
    BoolFalseLit,

    #[token("ℤ")]
    TyInt,
    #[token("ℝ")]
    TyReal,
    #[token("𝔹")]
    TyBool,
    #[token("𝕊")]
    TyStr,
    #[token("ℂ")]
    TyChar,
    #[token("𝕌")]
    TyUnit,
    #[token("∅")]
    TyEmpty,

    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(":")]
    Colon,
    #[token(";")]
    Semicolon,
    #[token(",")]
    Comma,
    #[token("..")]
    Dot2,
    #[token(".")]
    Period,
    #[token("|>")]
    PipeGt,
    #[token("|")]
    Pipe,
    #[token("_")]
    Underscore,
    #[token("!")]
    Bang,
    #[token("&")]
    Amp,
    #[token("#")]
    Hash,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token(">>")]
    ShiftR,
    #[token("<<")]
    ShiftL,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("=")]
    Eq,
}
