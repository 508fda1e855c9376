//! Declaration grammar and the top-level program parser (§3.2/§4.4).
//!
//! The parser never reorders or groups declarations — it hands back
//! exactly the sequence it saw, in source order. Category ordering,
//! uniqueness, and file-kind rules are a canonical-form concern, not this
//! crate's.

use crate::cursor::Parser;
use crate::expr::{parse_expr, parse_param_list};
use crate::types::{parse_effects, parse_type};
use ideo_diagnostic::{diagnostic, ErrorCode, FixIt, Phase};
use ideo_ir::{
    ConstDecl, Declaration, ExternDecl, ExternMember, FunctionDecl, ImportDecl, Name, Program,
    ProductField, Span, SumVariant, TestDecl, TokenKind, TypeDecl, TypeDef,
};

pub(crate) fn parse_program(p: &mut Parser) -> Program {
    let start = p.span();
    let mut declarations = Vec::new();
    while !p.at_eof() {
        match parse_declaration(p) {
            Some(decl) => declarations.push(decl),
            None => p.synchronize_to_declaration(),
        }
    }
    let span = start.to(p.prev_span());
    Program { declarations, span }
}

fn parse_declaration(p: &mut Parser) -> Option<Declaration> {
    let start = p.span();
    let exported = p.eat(TokenKind::KwExport);

    match p.peek_kind() {
        TokenKind::KwType => parse_type_decl(p, exported, start).map(Declaration::Type),
        TokenKind::KwImport => {
            reject_export(p, exported, "import");
            parse_import_decl(p, start).map(Declaration::Import)
        }
        TokenKind::KwExtern => {
            reject_export(p, exported, "extern");
            parse_extern_decl(p, start).map(Declaration::Extern)
        }
        TokenKind::KwConst => parse_const_decl(p, exported, start).map(Declaration::Const),
        TokenKind::KwMockable => {
            p.bump();
            if !p.check(TokenKind::Lambda) {
                p.unexpected("`λ` after `mockable`");
                return None;
            }
            parse_function_decl(p, exported, true, start).map(Declaration::Function)
        }
        TokenKind::Lambda => parse_function_decl(p, exported, false, start).map(Declaration::Function),
        TokenKind::KwTest => {
            reject_export(p, exported, "test");
            parse_test_decl(p, start).map(Declaration::Test)
        }
        found => {
            p.diagnostics.push(
                diagnostic(
                    ErrorCode::ParseUnexpectedToken,
                    Phase::Parse,
                    format!("expected a declaration, found {found}"),
                )
                .at(start)
                .expected("a type, import, extern, const, function, or test declaration")
                .found(found.to_string()),
            );
            None
        }
    }
}

fn reject_export(p: &mut Parser, exported: bool, what: &str) {
    if exported {
        p.diagnostics.push(
            diagnostic(
                ErrorCode::ParseUnexpectedToken,
                Phase::Parse,
                format!("`export` cannot prefix a {what} declaration"),
            )
            .at(p.prev_span()),
        );
    }
}

fn parse_namespace_path(p: &mut Parser) -> Option<Vec<Name>> {
    let mut segments = vec![p.expect_ident("a module path segment")?];
    loop {
        match p.peek_kind() {
            TokenKind::Dot => {
                p.bump();
                segments.push(p.expect_ident("a module path segment")?);
            }
            TokenKind::Period | TokenKind::Slash => {
                let bad_span = p.span();
                p.diagnostics.push(
                    diagnostic(
                        ErrorCode::ParseBadNamespacePath,
                        Phase::Parse,
                        "namespace paths are separated with `⋅`, not `.` or `/`",
                    )
                    .at(bad_span)
                    .with_fixit(FixIt::new(bad_span, "⋅", "replace with `⋅`")),
                );
                p.bump();
                segments.push(p.expect_ident("a module path segment")?);
            }
            _ => break,
        }
    }
    Some(segments)
}

fn parse_import_decl(p: &mut Parser, start: Span) -> Option<ImportDecl> {
    p.bump(); // `i`
    let segments = parse_namespace_path(p)?;
    p.expect(TokenKind::Semicolon, "`;` after an import")?;
    let span = start.to(p.prev_span());
    Some(ImportDecl { segments, span })
}

fn parse_extern_decl(p: &mut Parser, start: Span) -> Option<ExternDecl> {
    p.bump(); // `e`
    let segments = parse_namespace_path(p)?;
    let mut members = Vec::new();
    if p.eat(TokenKind::LBrace) {
        if !p.check(TokenKind::RBrace) {
            loop {
                let member_start = p.span();
                let name = p.expect_ident("an extern member name")?;
                p.expect(TokenKind::Colon, "`:` before an extern member's type")?;
                let ty = parse_type(p)?;
                members.push(ExternMember { name, ty, span: member_start.to(p.prev_span()) });
                if !p.eat(TokenKind::Comma) {
                    break;
                }
            }
        }
        p.expect(TokenKind::RBrace, "`}` closing an extern's member list")?;
    }
    p.expect(TokenKind::Semicolon, "`;` after an extern declaration")?;
    let span = start.to(p.prev_span());
    Some(ExternDecl { segments, members, span })
}

fn parse_const_decl(p: &mut Parser, exported: bool, start: Span) -> Option<ConstDecl> {
    p.bump(); // `c`
    let name = p.expect_ident("a const name")?;
    p.expect(TokenKind::Eq, "`=` in a const binding")?;
    p.expect(TokenKind::LParen, "`(` opening a const binding's typed value")?;
    let value = parse_expr(p)?;
    if !p.eat(TokenKind::Colon) {
        let span = p.span();
        p.diagnostics.push(
            diagnostic(
                ErrorCode::ParseUntypedConst,
                Phase::Parse,
                "const declarations require an explicit type: `c name=(value : T)`",
            )
            .at(span)
            .with_fixit(FixIt::new(Span::new(span.start, span.start), ": T", "add a type annotation")),
        );
        return None;
    }
    let ty = parse_type(p)?;
    p.expect(TokenKind::RParen, "`)` closing a const binding's typed value")?;
    p.expect(TokenKind::Semicolon, "`;` after a const declaration")?;
    let span = start.to(p.prev_span());
    Some(ConstDecl { name, exported, ty, value, span })
}

fn parse_function_decl(p: &mut Parser, exported: bool, mockable: bool, start: Span) -> Option<FunctionDecl> {
    p.bump(); // `λ`
    let name = p.expect_ident("a function name")?;
    p.expect(TokenKind::LParen, "`(` opening a function's parameter list")?;
    let params = parse_param_list(p)?;
    p.expect(TokenKind::RParen, "`)` closing a function's parameter list")?;
    p.expect(TokenKind::Arrow, "`→` before a function's return type")?;
    let effects = parse_effects(p);
    let return_type = parse_type(p)?;
    p.expect(TokenKind::Equiv, "`≡` before a function's body")?;
    let body = parse_expr(p)?;
    p.expect(TokenKind::Semicolon, "`;` after a function declaration")?;
    let span = start.to(p.prev_span());
    Some(FunctionDecl { name, exported, mockable, params, effects, return_type, body, span })
}

fn parse_test_decl(p: &mut Parser, start: Span) -> Option<TestDecl> {
    p.bump(); // `test`
    let desc_tok = p.expect(TokenKind::StringLiteral, "a test description string")?;
    let description = p.interner.resolve(desc_tok.text.expect("string literal carries text")).to_owned();
    let effects = parse_effects(p);
    p.expect(TokenKind::Equiv, "`≡` before a test body")?;
    let body = parse_expr(p)?;
    p.expect(TokenKind::Semicolon, "`;` after a test declaration")?;
    let span = start.to(p.prev_span());
    Some(TestDecl { description, effects, body, span })
}

fn parse_type_decl(p: &mut Parser, exported: bool, start: Span) -> Option<TypeDecl> {
    p.bump(); // `t`
    let name = p.expect_ident("a type name")?;
    let mut type_params = Vec::new();
    if p.eat(TokenKind::LBracket) {
        if !p.check(TokenKind::RBracket) {
            loop {
                type_params.push(p.expect_ident("a type parameter name")?);
                if !p.eat(TokenKind::Comma) {
                    break;
                }
            }
        }
        p.expect(TokenKind::RBracket, "`]` closing a type's parameter list")?;
    }
    p.expect(TokenKind::Equiv, "`≡` before a type definition")?;
    let def = parse_type_def(p)?;
    p.expect(TokenKind::Semicolon, "`;` after a type declaration")?;
    let span = start.to(p.prev_span());
    Some(TypeDecl { name, exported, type_params, def, span })
}

fn parse_type_def(p: &mut Parser) -> Option<TypeDef> {
    if p.check(TokenKind::LBrace) {
        p.bump();
        let mut fields = Vec::new();
        if !p.check(TokenKind::RBrace) {
            loop {
                let field_start = p.span();
                let name = p.expect_ident("a field name")?;
                p.expect(TokenKind::Colon, "`:` before a field's type")?;
                let ty = parse_type(p)?;
                fields.push(ProductField { name, ty, span: field_start.to(p.prev_span()) });
                if !p.eat(TokenKind::Comma) {
                    break;
                }
            }
        }
        p.expect(TokenKind::RBrace, "`}` closing a product type's fields")?;
        return Some(TypeDef::Product(fields));
    }

    if type_def_is_sum(p) {
        let mut variants = Vec::new();
        loop {
            let variant_start = p.span();
            let name = p.expect_ident("a variant name")?;
            let mut fields = Vec::new();
            if p.eat(TokenKind::LParen) {
                if !p.check(TokenKind::RParen) {
                    loop {
                        fields.push(parse_type(p)?);
                        if !p.eat(TokenKind::Comma) {
                            break;
                        }
                    }
                }
                p.expect(TokenKind::RParen, "`)` closing a variant's fields")?;
            }
            variants.push(SumVariant { name, fields, span: variant_start.to(p.prev_span()) });
            if !p.eat(TokenKind::Pipe) {
                break;
            }
        }
        return Some(TypeDef::Sum(variants));
    }

    let ty = parse_type(p)?;
    Some(TypeDef::Alias(ty))
}

/// A type definition is a sum type if its first variant is immediately
/// followed by a parenthesized field list, or if a `|` appears anywhere at
/// the top level before the declaration's terminating `;`. Otherwise it's a
/// type alias — bare named references (`t Meters≡Kilometers;`) are
/// indistinguishable from a one-variant sum without this lookahead.
fn type_def_is_sum(p: &mut Parser) -> bool {
    if p.peek_kind() != TokenKind::UpperIdent {
        return false;
    }
    if p.peek_kind_at(1) == TokenKind::LParen {
        return true;
    }
    let start = p.pos();
    let mut depth = 0i32;
    let mut found_pipe = false;
    loop {
        match p.peek_kind() {
            TokenKind::Semicolon if depth == 0 => break,
            TokenKind::Eof => break,
            TokenKind::Pipe if depth == 0 => {
                found_pipe = true;
                p.bump();
            }
            TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace => {
                depth += 1;
                p.bump();
            }
            TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace => {
                depth -= 1;
                p.bump();
            }
            _ => {
                p.bump();
            }
        }
    }
    p.set_pos(start);
    found_pipe
}

#[cfg(test)]
mod tests {
    use super::*;
    use ideo_ir::{StringInterner, Token};

    fn program_for(tokens: Vec<Token>) -> (Program, Vec<ideo_diagnostic::Diagnostic>) {
        let mut interner = StringInterner::new();
        let mut p = Parser::new(&tokens, &mut interner);
        let program = parse_program(&mut p);
        (program, p.diagnostics)
    }

    fn ident(interner: &mut StringInterner, kind: TokenKind, text: &str) -> Token {
        Token::new(kind, Some(interner.intern(text)), Span::default())
    }

    fn tok(kind: TokenKind) -> Token {
        Token::new(kind, None, Span::default())
    }

    #[test]
    fn parses_import_declaration() {
        let mut interner = StringInterner::new();
        let tokens = vec![
            tok(TokenKind::KwImport),
            ident(&mut interner, TokenKind::LowerIdent, "src"),
            tok(TokenKind::Dot),
            ident(&mut interner, TokenKind::LowerIdent, "m"),
            tok(TokenKind::Semicolon),
            tok(TokenKind::Eof),
        ];
        let mut p = Parser::new(&tokens, &mut interner);
        let program = parse_program(&mut p);
        assert!(p.diagnostics.is_empty());
        assert_eq!(program.declarations.len(), 1);
        assert!(matches!(program.declarations[0], Declaration::Import(_)));
    }

    #[test]
    fn bad_namespace_separator_is_diagnosed_but_recovers() {
        let mut interner = StringInterner::new();
        let tokens = vec![
            tok(TokenKind::KwImport),
            ident(&mut interner, TokenKind::LowerIdent, "src"),
            tok(TokenKind::Period),
            ident(&mut interner, TokenKind::LowerIdent, "m"),
            tok(TokenKind::Semicolon),
            tok(TokenKind::Eof),
        ];
        let (program, diagnostics) = program_for(tokens);
        assert_eq!(program.declarations.len(), 1);
        assert_eq!(diagnostics[0].code, ErrorCode::ParseBadNamespacePath);
    }

    #[test]
    fn untyped_const_is_diagnosed() {
        let mut interner = StringInterner::new();
        let one = interner.intern("1");
        let name = interner.intern("x");
        let tokens = vec![
            tok(TokenKind::KwConst),
            Token::new(TokenKind::LowerIdent, Some(name), Span::default()),
            tok(TokenKind::Eq),
            tok(TokenKind::LParen),
            Token::new(TokenKind::IntLiteral, Some(one), Span::default()),
            tok(TokenKind::RParen),
            tok(TokenKind::Semicolon),
            tok(TokenKind::Eof),
        ];
        let (_, diagnostics) = program_for(tokens);
        assert!(diagnostics.iter().any(|d| d.code == ErrorCode::ParseUntypedConst));
    }
}
