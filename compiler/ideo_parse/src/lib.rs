//! Recursive-descent parser: turns a cooked [`ideo_ir::Token`] stream into
//! an [`ideo_ir::Program`] (§3.2, §4.4).
//!
//! One token of lookahead is sufficient for the whole grammar bar one
//! disambiguation (a type definition's sum-vs-alias shape, see
//! [`decl::parse_type_def`]), which uses a bounded, position-restoring scan
//! instead of adding a second lookahead slot. Declarations are never
//! reordered — the tree comes back in exactly the order the source wrote
//! them, leaving grouping and ordering rules to a later phase.
//!
//! Malformed declarations are recovered from at declaration granularity: a
//! failed declaration records its diagnostic, the cursor skips forward to
//! the next token that looks like the start of a declaration, and parsing
//! continues so one mistake doesn't hide every diagnostic after it.

mod cursor;
mod decl;
mod expr;
mod patterns;
mod types;

use cursor::Parser;
use ideo_diagnostic::Diagnostic;
use ideo_ir::{Program, StringInterner, Token};

#[must_use]
pub fn parse(tokens: &[Token], interner: &mut StringInterner) -> (Program, Vec<Diagnostic>) {
    let mut parser = Parser::new(tokens, interner);
    let program = decl::parse_program(&mut parser);
    (program, parser.diagnostics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ideo_ir::{Declaration, Span, TokenKind};

    fn tok(kind: TokenKind) -> Token {
        Token::new(kind, None, Span::default())
    }

    #[test]
    fn parses_factorial_style_function() {
        // λmain()→ℤ≡1;
        let mut interner = StringInterner::new();
        let main = interner.intern("main");
        let one = interner.intern("1");
        let tokens = vec![
            tok(TokenKind::Lambda),
            Token::new(TokenKind::LowerIdent, Some(main), Span::default()),
            tok(TokenKind::LParen),
            tok(TokenKind::RParen),
            tok(TokenKind::Arrow),
            tok(TokenKind::TyInt),
            tok(TokenKind::Equiv),
            Token::new(TokenKind::IntLiteral, Some(one), Span::default()),
            tok(TokenKind::Semicolon),
            tok(TokenKind::Eof),
        ];
        let (program, diagnostics) = parse(&tokens, &mut interner);
        assert!(diagnostics.is_empty(), "unexpected diagnostics: {diagnostics:?}");
        assert_eq!(program.declarations.len(), 1);
        match &program.declarations[0] {
            Declaration::Function(f) => {
                assert_eq!(f.name, main);
                assert!(f.params.is_empty());
                assert!(!f.exported);
                assert!(!f.mockable);
            }
            other => panic!("expected a function declaration, got {other:?}"),
        }
    }

    #[test]
    fn empty_program_parses_with_no_diagnostics() {
        let mut interner = StringInterner::new();
        let tokens = vec![tok(TokenKind::Eof)];
        let (program, diagnostics) = parse(&tokens, &mut interner);
        assert!(program.declarations.is_empty());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn recovers_after_a_malformed_declaration() {
        // A garbage token, then a valid import.
        let mut interner = StringInterner::new();
        let src = interner.intern("src");
        let m = interner.intern("m");
        let tokens = vec![
            tok(TokenKind::RBrace),
            tok(TokenKind::KwImport),
            Token::new(TokenKind::LowerIdent, Some(src), Span::default()),
            tok(TokenKind::Dot),
            Token::new(TokenKind::LowerIdent, Some(m), Span::default()),
            tok(TokenKind::Semicolon),
            tok(TokenKind::Eof),
        ];
        let (program, diagnostics) = parse(&tokens, &mut interner);
        assert!(!diagnostics.is_empty());
        assert_eq!(program.declarations.len(), 1);
        assert!(matches!(program.declarations[0], Declaration::Import(_)));
    }
}
