//! Core IR types shared by every phase of the compiler: source spans,
//! interned names, the lexer's token alphabet, and the parser's abstract
//! tree.
//!
//! # Design
//!
//! - **Intern identifiers**: `Name` is a `u32` handle into a
//!   [`StringInterner`]; phases compare names by equality, not by
//!   re-hashing strings.
//! - **Own the tree**: declarations/expressions/patterns are a plain
//!   `Box`-based recursive tree. There is no incremental recompilation in
//!   this compiler (see the core spec's Non-goals), so the extra
//!   indirection an arena buys a Salsa-style compiler isn't worth its
//!   complexity here.
//! - **Spans nest**: every node carries a [`Span`]; a child's span is
//!   always contained in its parent's.

mod ast;
mod interner;
mod span;
mod token;

pub use ast::{
    BinaryOp, ConstDecl, Declaration, Expr, ExprKind, ExternDecl, ExternMember, FunctionDecl,
    ImportDecl, Literal, MatchArm, Param, Pattern, PatternKind, PipelineOp, ProductField, Program,
    SumVariant, TestDecl, Type, TypeDecl, TypeDef, UnaryOp,
};
pub use interner::{Name, NameDisplay, StringInterner};
pub use span::{SourcePoint, Span};
pub use token::{Token, TokenKind};
