//! Surface type grammar (§3.2/§3.3).
//!
//! `∅` has no dedicated variant in [`ideo_ir::Type`] — it surfaces only as
//! the placeholder element type of an otherwise-unconstrained empty list
//! annotation, so it parses to `List(Var(∅))` and is resolved like any
//! other type variable by the checker's context.

use crate::cursor::Parser;
use ideo_diagnostic::{diagnostic, ErrorCode, Phase};
use ideo_ir::{Name, TokenKind, Type};

pub(crate) fn parse_type(p: &mut Parser) -> Option<Type> {
    match p.peek_kind() {
        TokenKind::TyInt => {
            p.bump();
            Some(Type::Int)
        }
        TokenKind::TyReal => {
            p.bump();
            Some(Type::Float)
        }
        TokenKind::TyBool => {
            p.bump();
            Some(Type::Bool)
        }
        TokenKind::TyStr => {
            p.bump();
            Some(Type::String)
        }
        TokenKind::TyChar => {
            p.bump();
            Some(Type::Char)
        }
        TokenKind::TyUnit => {
            p.bump();
            Some(Type::Unit)
        }
        TokenKind::TyEmpty => {
            p.bump();
            let placeholder = p.intern("∅");
            Some(Type::List(Box::new(Type::Var(placeholder))))
        }
        TokenKind::LBracket => {
            p.bump();
            let elem = parse_type(p)?;
            p.expect(TokenKind::RBracket, "`]` closing a list type")?;
            Some(Type::List(Box::new(elem)))
        }
        TokenKind::LBrace => {
            p.bump();
            let key = parse_type(p)?;
            p.expect(TokenKind::Colon, "`:` between a map type's key and value")?;
            let value = parse_type(p)?;
            p.expect(TokenKind::RBrace, "`}` closing a map type")?;
            Some(Type::Map(Box::new(key), Box::new(value)))
        }
        TokenKind::LParen => {
            p.bump();
            let mut elements = Vec::new();
            if !p.check(TokenKind::RParen) {
                loop {
                    elements.push(parse_type(p)?);
                    if !p.eat(TokenKind::Comma) {
                        break;
                    }
                }
            }
            p.expect(TokenKind::RParen, "`)` closing a tuple type")?;
            Some(Type::Tuple(elements))
        }
        TokenKind::Lambda => {
            p.bump();
            p.expect(TokenKind::LParen, "`(` opening a function type's parameter list")?;
            let mut params = Vec::new();
            if !p.check(TokenKind::RParen) {
                loop {
                    params.push(parse_type(p)?);
                    if !p.eat(TokenKind::Comma) {
                        break;
                    }
                }
            }
            p.expect(TokenKind::RParen, "`)` closing a function type's parameter list")?;
            p.expect(TokenKind::Arrow, "`→` before a function type's return type")?;
            let effects = parse_effects(p);
            let ret = parse_type(p)?;
            Some(Type::Function { params, effects, ret: Box::new(ret) })
        }
        TokenKind::LowerIdent => {
            let name = p.bump().text.expect("lower identifier token always carries text");
            Some(finish_named_or_qualified(p, name, true))
        }
        TokenKind::UpperIdent => {
            let name = p.bump().text.expect("upper identifier token always carries text");
            Some(finish_named_or_qualified(p, name, false))
        }
        found => {
            p.diagnostics.push(
                diagnostic(ErrorCode::ParseExpectedType, Phase::Parse, format!("expected a type, found {found}"))
                    .at(p.span())
                    .expected("a type")
                    .found(found.to_string()),
            );
            None
        }
    }
}

/// `name` was already consumed. If it's immediately followed by `⋅`, the
/// whole thing is a qualified reference `name⋅member[args]`; otherwise a
/// bare lowercase identifier is a type variable and a bare uppercase one is
/// a named (possibly generic) constructor.
fn finish_named_or_qualified(p: &mut Parser, name: Name, lower: bool) -> Type {
    if p.eat(TokenKind::Dot) {
        let member = p.expect_ident("a type name after `⋅`").unwrap_or(name);
        let args = parse_optional_type_args(p);
        Type::Qualified { module: name, name: member, args }
    } else if lower {
        Type::Var(name)
    } else {
        let args = parse_optional_type_args(p);
        Type::Named { name, args }
    }
}

fn parse_optional_type_args(p: &mut Parser) -> Vec<Type> {
    if !p.eat(TokenKind::LBracket) {
        return Vec::new();
    }
    let mut args = Vec::new();
    if !p.check(TokenKind::RBracket) {
        loop {
            match parse_type(p) {
                Some(ty) => args.push(ty),
                None => break,
            }
            if !p.eat(TokenKind::Comma) {
                break;
            }
        }
    }
    p.expect(TokenKind::RBracket, "`]` closing a type argument list");
    args
}

/// Zero or more `!EffectName` labels, as they appear after a function
/// type's `→` and before its return type.
pub(crate) fn parse_effects(p: &mut Parser) -> Vec<Name> {
    let mut effects = Vec::new();
    while p.eat(TokenKind::Bang) {
        match p.expect_ident("an effect name") {
            Some(name) => effects.push(name),
            None => break,
        }
    }
    effects
}

#[cfg(test)]
mod tests {
    use super::*;
    use ideo_ir::StringInterner;

    fn parse(src_tokens: Vec<ideo_ir::Token>, interner: &mut StringInterner) -> Option<Type> {
        let mut p = Parser::new(&src_tokens, interner);
        parse_type(&mut p)
    }

    fn tok(kind: TokenKind) -> ideo_ir::Token {
        ideo_ir::Token::new(kind, None, ideo_ir::Span::default())
    }

    #[test]
    fn parses_primitive() {
        let mut interner = StringInterner::new();
        let tokens = vec![tok(TokenKind::TyInt), tok(TokenKind::Eof)];
        assert!(matches!(parse(tokens, &mut interner), Some(Type::Int)));
    }

    #[test]
    fn parses_list_of_int() {
        let mut interner = StringInterner::new();
        let tokens =
            vec![tok(TokenKind::LBracket), tok(TokenKind::TyInt), tok(TokenKind::RBracket), tok(TokenKind::Eof)];
        match parse(tokens, &mut interner) {
            Some(Type::List(inner)) => assert!(matches!(*inner, Type::Int)),
            other => panic!("expected list type, got {other:?}"),
        }
    }

    #[test]
    fn parses_named_with_args() {
        let mut interner = StringInterner::new();
        let name = interner.intern("Option");
        let mut tokens = vec![
            ideo_ir::Token::new(TokenKind::UpperIdent, Some(name), ideo_ir::Span::default()),
            tok(TokenKind::LBracket),
            tok(TokenKind::TyInt),
            tok(TokenKind::RBracket),
        ];
        tokens.push(tok(TokenKind::Eof));
        match parse(tokens, &mut interner) {
            Some(Type::Named { name: n, args }) => {
                assert_eq!(n, name);
                assert_eq!(args.len(), 1);
            }
            other => panic!("expected named type, got {other:?}"),
        }
    }
}
