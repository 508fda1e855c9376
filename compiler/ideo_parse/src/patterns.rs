//! Pattern grammar (§3.2).
//!
//! List patterns have three parts: a head (patterns matched positionally
//! from the front), an optional canonical rest `⧺name` capturing whatever
//! is left, and a tail (patterns matched positionally from the back, after
//! the rest). `[]` is its own variant rather than an empty head/rest/tail,
//! matching the distinction `ideo_ir::PatternKind` already makes.

use crate::cursor::Parser;
use ideo_diagnostic::{diagnostic, ErrorCode, Phase};
use ideo_ir::{Literal, Pattern, PatternKind, Span, TokenKind};

pub(crate) fn parse_pattern(p: &mut Parser) -> Option<Pattern> {
    let start = p.span();
    match p.peek_kind() {
        TokenKind::Underscore => {
            p.bump();
            Some(Pattern { kind: PatternKind::Wildcard, span: start })
        }
        TokenKind::IntLiteral => {
            let tok = p.bump();
            let text = p.interner.resolve(tok.text.expect("int literal carries text")).to_owned();
            let value: i64 = text.parse().unwrap_or(0);
            Some(Pattern { kind: PatternKind::Literal(Literal::Int(value)), span: start })
        }
        TokenKind::FloatLiteral => {
            let tok = p.bump();
            let text = p.interner.resolve(tok.text.expect("float literal carries text")).to_owned();
            let value: f64 = text.parse().unwrap_or(0.0);
            Some(Pattern { kind: PatternKind::Literal(Literal::Float(value)), span: start })
        }
        TokenKind::StringLiteral => {
            let tok = p.bump();
            let text = p.interner.resolve(tok.text.expect("string literal carries text")).to_owned();
            Some(Pattern { kind: PatternKind::Literal(Literal::Str(text)), span: start })
        }
        TokenKind::CharLiteral => {
            let tok = p.bump();
            let text = p.interner.resolve(tok.text.expect("char literal carries text")).to_owned();
            let value = text.chars().next().unwrap_or('\0');
            Some(Pattern { kind: PatternKind::Literal(Literal::Char(value)), span: start })
        }
        TokenKind::BoolTrueLit => {
            p.bump();
            Some(Pattern { kind: PatternKind::Literal(Literal::Bool(true)), span: start })
        }
        TokenKind::BoolFalseLit => {
            p.bump();
            Some(Pattern { kind: PatternKind::Literal(Literal::Bool(false)), span: start })
        }
        TokenKind::Unit => {
            p.bump();
            Some(Pattern { kind: PatternKind::Literal(Literal::Unit), span: start })
        }
        TokenKind::LowerIdent => {
            let tok = p.bump();
            let name = tok.text.expect("lower identifier carries text");
            Some(Pattern { kind: PatternKind::Ident(name), span: start })
        }
        TokenKind::UpperIdent => {
            let tok = p.bump();
            let name = tok.text.expect("upper identifier carries text");
            let mut args = Vec::new();
            if p.eat(TokenKind::LParen) {
                if !p.check(TokenKind::RParen) {
                    loop {
                        args.push(parse_pattern(p)?);
                        if !p.eat(TokenKind::Comma) {
                            break;
                        }
                    }
                }
                p.expect(TokenKind::RParen, "`)` closing a constructor pattern's arguments")?;
            }
            let end = p.prev_span();
            Some(Pattern { kind: PatternKind::Constructor { name, args }, span: start.to(end) })
        }
        TokenKind::LBracket => parse_list_pattern(p, start),
        TokenKind::LBrace => parse_record_pattern(p, start),
        TokenKind::LParen => parse_tuple_pattern(p, start),
        found => {
            p.diagnostics.push(
                diagnostic(ErrorCode::ParseUnexpectedToken, Phase::Parse, format!("expected a pattern, found {found}"))
                    .at(start)
                    .expected("a pattern")
                    .found(found.to_string()),
            );
            None
        }
    }
}

fn parse_list_pattern(p: &mut Parser, start: Span) -> Option<Pattern> {
    p.bump(); // `[`
    if p.eat(TokenKind::RBracket) {
        let end = p.prev_span();
        return Some(Pattern { kind: PatternKind::ListEmpty, span: start.to(end) });
    }

    let mut head = Vec::new();
    let mut rest = None;
    let mut tail = Vec::new();

    loop {
        if p.eat(TokenKind::Concat) {
            let name_pat = parse_pattern(p)?;
            rest = Some(Box::new(name_pat));
        } else if rest.is_none() {
            head.push(parse_pattern(p)?);
        } else {
            tail.push(parse_pattern(p)?);
        }
        if !p.eat(TokenKind::Comma) {
            break;
        }
    }

    p.expect(TokenKind::RBracket, "`]` closing a list pattern")?;
    let end = p.prev_span();
    Some(Pattern { kind: PatternKind::ListCons { head, rest, tail }, span: start.to(end) })
}

fn parse_record_pattern(p: &mut Parser, start: Span) -> Option<Pattern> {
    p.bump(); // `{`
    let mut fields = Vec::new();
    if !p.check(TokenKind::RBrace) {
        loop {
            let name = p.expect_ident("a field name")?;
            p.expect(TokenKind::Colon, "`:` between a record pattern field and its pattern")?;
            let pattern = parse_pattern(p)?;
            fields.push((name, pattern));
            if !p.eat(TokenKind::Comma) {
                break;
            }
        }
    }
    p.expect(TokenKind::RBrace, "`}` closing a record pattern")?;
    let end = p.prev_span();
    Some(Pattern { kind: PatternKind::Record(fields), span: start.to(end) })
}

fn parse_tuple_pattern(p: &mut Parser, start: Span) -> Option<Pattern> {
    p.bump(); // `(`
    let mut elements = Vec::new();
    if !p.check(TokenKind::RParen) {
        loop {
            elements.push(parse_pattern(p)?);
            if !p.eat(TokenKind::Comma) {
                break;
            }
        }
    }
    p.expect(TokenKind::RParen, "`)` closing a tuple pattern")?;
    let end = p.prev_span();
    Some(Pattern { kind: PatternKind::Tuple(elements), span: start.to(end) })
}
