//! Expression grammar (§3.2/§4.4), parsed by precedence climbing.
//!
//! Tiers from loosest to tightest binding: pipeline, list operations (map
//! /filter/fold), or, and, equality, comparison, list concatenation,
//! additive, multiplicative, unary, postfix, primary. Map/filter/fold sit
//! above general binary operators because their arity doesn't fit the
//! generic two-operand shape (fold takes a function *and* an initial
//! value, separated by a second `⊕`).
//!
//! There is no ASCII `if`/`else` keyword available — the declaration-head
//! keyword set is closed and none of the sixteen keyword glyphs were set
//! aside for conditionals. `when` already means "guarded branch" inside a
//! match arm, so the conditional expression reuses it as a primary-position
//! introducer: `when cond { then } | { else }`. This keeps the closed token
//! alphabet intact instead of inventing a seventeenth glyph.

use crate::cursor::Parser;
use crate::patterns::parse_pattern;
use crate::types::{parse_effects, parse_type};
use ideo_diagnostic::{diagnostic, ErrorCode, Phase};
use ideo_ir::{
    BinaryOp, Expr, ExprKind, Literal, MatchArm, Param, PipelineOp, Span, TokenKind, UnaryOp,
};

pub(crate) fn parse_expr(p: &mut Parser) -> Option<Expr> {
    parse_pipeline(p)
}

fn parse_pipeline(p: &mut Parser) -> Option<Expr> {
    let mut left = parse_list_op(p)?;
    loop {
        let op = match p.peek_kind() {
            TokenKind::PipeGt => PipelineOp::Forward,
            TokenKind::ShiftR => PipelineOp::ComposeForward,
            TokenKind::ShiftL => PipelineOp::ComposeBackward,
            _ => break,
        };
        p.bump();
        let right = parse_list_op(p)?;
        let span = left.span.to(right.span);
        left = Expr { kind: ExprKind::Pipeline { op, left: Box::new(left), right: Box::new(right) }, span };
    }
    Some(left)
}

fn parse_list_op(p: &mut Parser) -> Option<Expr> {
    let mut left = parse_or(p)?;
    loop {
        match p.peek_kind() {
            TokenKind::MapsTo => {
                p.bump();
                let func = parse_or(p)?;
                let span = left.span.to(func.span);
                left = Expr { kind: ExprKind::Map { list: Box::new(left), func: Box::new(func) }, span };
            }
            TokenKind::FilterOp => {
                p.bump();
                let pred = parse_or(p)?;
                let span = left.span.to(pred.span);
                left = Expr { kind: ExprKind::Filter { list: Box::new(left), pred: Box::new(pred) }, span };
            }
            TokenKind::FoldOp => {
                let fold_span = p.span();
                p.bump();
                let func = parse_or(p)?;
                if !p.eat(TokenKind::FoldOp) {
                    p.diagnostics.push(
                        diagnostic(
                            ErrorCode::ParseBadFoldArity,
                            Phase::Parse,
                            "fold requires a function and an initial value, separated by a second `⊕`",
                        )
                        .at(fold_span),
                    );
                    return None;
                }
                let init = parse_or(p)?;
                let span = left.span.to(init.span);
                left = Expr {
                    kind: ExprKind::Fold { list: Box::new(left), func: Box::new(func), init: Box::new(init) },
                    span,
                };
            }
            _ => break,
        }
    }
    Some(left)
}

fn parse_or(p: &mut Parser) -> Option<Expr> {
    let mut left = parse_and(p)?;
    while p.check(TokenKind::Or) {
        p.bump();
        let right = parse_and(p)?;
        left = binary(BinaryOp::Or, left, right);
    }
    Some(left)
}

fn parse_and(p: &mut Parser) -> Option<Expr> {
    let mut left = parse_equality(p)?;
    while p.check(TokenKind::And) {
        p.bump();
        let right = parse_equality(p)?;
        left = binary(BinaryOp::And, left, right);
    }
    Some(left)
}

fn parse_equality(p: &mut Parser) -> Option<Expr> {
    let mut left = parse_comparison(p)?;
    loop {
        let op = match p.peek_kind() {
            TokenKind::Eq => BinaryOp::Eq,
            TokenKind::NotEq => BinaryOp::NotEq,
            _ => break,
        };
        p.bump();
        let right = parse_comparison(p)?;
        left = binary(op, left, right);
    }
    Some(left)
}

fn parse_comparison(p: &mut Parser) -> Option<Expr> {
    let mut left = parse_concat(p)?;
    loop {
        let op = match p.peek_kind() {
            TokenKind::Lt => BinaryOp::Lt,
            TokenKind::LtEq => BinaryOp::LtEq,
            TokenKind::Gt => BinaryOp::Gt,
            TokenKind::GtEq => BinaryOp::GtEq,
            _ => break,
        };
        p.bump();
        let right = parse_concat(p)?;
        left = binary(op, left, right);
    }
    Some(left)
}

fn parse_concat(p: &mut Parser) -> Option<Expr> {
    let mut left = parse_additive(p)?;
    while p.check(TokenKind::Concat) {
        p.bump();
        let right = parse_additive(p)?;
        left = binary(BinaryOp::Concat, left, right);
    }
    Some(left)
}

fn parse_additive(p: &mut Parser) -> Option<Expr> {
    let mut left = parse_multiplicative(p)?;
    loop {
        let op = match p.peek_kind() {
            TokenKind::Plus => BinaryOp::Add,
            TokenKind::Minus => BinaryOp::Sub,
            _ => break,
        };
        p.bump();
        let right = parse_multiplicative(p)?;
        left = binary(op, left, right);
    }
    Some(left)
}

fn parse_multiplicative(p: &mut Parser) -> Option<Expr> {
    let mut left = parse_unary(p)?;
    loop {
        let op = match p.peek_kind() {
            TokenKind::Star => BinaryOp::Mul,
            TokenKind::Slash => BinaryOp::Div,
            TokenKind::Percent => BinaryOp::Mod,
            _ => break,
        };
        p.bump();
        let right = parse_unary(p)?;
        left = binary(op, left, right);
    }
    Some(left)
}

fn binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
    let span = left.span.to(right.span);
    Expr { kind: ExprKind::Binary { op, left: Box::new(left), right: Box::new(right) }, span }
}

fn parse_unary(p: &mut Parser) -> Option<Expr> {
    let op = match p.peek_kind() {
        TokenKind::Not => UnaryOp::Not,
        TokenKind::Minus => UnaryOp::Neg,
        TokenKind::Hash => UnaryOp::Len,
        _ => return parse_postfix(p),
    };
    let start = p.span();
    p.bump();
    let operand = parse_unary(p)?;
    let span = start.to(operand.span);
    Some(Expr { kind: ExprKind::Unary { op, operand: Box::new(operand) }, span })
}

fn parse_postfix(p: &mut Parser) -> Option<Expr> {
    let mut expr = parse_primary(p)?;
    loop {
        match p.peek_kind() {
            TokenKind::LParen => {
                p.bump();
                let mut args = Vec::new();
                if !p.check(TokenKind::RParen) {
                    loop {
                        args.push(parse_expr(p)?);
                        if !p.eat(TokenKind::Comma) {
                            break;
                        }
                    }
                }
                p.expect(TokenKind::RParen, "`)` closing a call's arguments")?;
                let span = expr.span.to(p.prev_span());
                expr = Expr { kind: ExprKind::Apply { callee: Box::new(expr), args }, span };
            }
            TokenKind::Dot if matches!(expr.kind, ExprKind::Ident(_)) => {
                let ExprKind::Ident(module) = expr.kind else { unreachable!() };
                p.bump();
                let member = p.expect_ident("a member name after `⋅`")?;
                let span = expr.span.to(p.prev_span());
                expr = Expr { kind: ExprKind::MemberAccess { module, member }, span };
            }
            TokenKind::Period => {
                p.bump();
                let name = if p.check(TokenKind::IntLiteral) {
                    let tok = p.bump();
                    tok.text.expect("int literal carries text")
                } else {
                    p.expect_ident("a field name after `.`")?
                };
                let span = expr.span.to(p.prev_span());
                expr = Expr { kind: ExprKind::Field { base: Box::new(expr), name }, span };
            }
            TokenKind::LBracket => {
                p.bump();
                let index = parse_expr(p)?;
                p.expect(TokenKind::RBracket, "`]` closing an index expression")?;
                let span = expr.span.to(p.prev_span());
                expr = Expr { kind: ExprKind::Index { base: Box::new(expr), index: Box::new(index) }, span };
            }
            TokenKind::LBrace => {
                expr = parse_match_tail(p, expr)?;
            }
            _ => break,
        }
    }
    Some(expr)
}

fn parse_match_tail(p: &mut Parser, scrutinee: Expr) -> Option<Expr> {
    let start = scrutinee.span;
    p.bump(); // `{`
    let mut arms = Vec::new();
    loop {
        let arm_start = p.span();
        let pattern = parse_pattern(p)?;
        let guard = if p.eat(TokenKind::KwWhen) { Some(parse_expr(p)?) } else { None };
        p.expect(TokenKind::Arrow, "`→` before a match arm's body")?;
        let body = parse_expr(p)?;
        let arm_span = arm_start.to(body.span);
        arms.push(MatchArm { pattern, guard, body, span: arm_span });
        if !p.eat(TokenKind::Pipe) {
            break;
        }
    }
    p.expect(TokenKind::RBrace, "`}` closing a match expression")?;
    let span = start.to(p.prev_span());
    Some(Expr { kind: ExprKind::Match { scrutinee: Box::new(scrutinee), arms }, span })
}

fn parse_primary(p: &mut Parser) -> Option<Expr> {
    let start = p.span();
    match p.peek_kind() {
        TokenKind::IntLiteral => {
            let tok = p.bump();
            let text = p.interner.resolve(tok.text.expect("int literal carries text")).to_owned();
            let value: i64 = text.parse().unwrap_or(0);
            Some(Expr { kind: ExprKind::Literal(Literal::Int(value)), span: start })
        }
        TokenKind::FloatLiteral => {
            let tok = p.bump();
            let text = p.interner.resolve(tok.text.expect("float literal carries text")).to_owned();
            let value: f64 = text.parse().unwrap_or(0.0);
            Some(Expr { kind: ExprKind::Literal(Literal::Float(value)), span: start })
        }
        TokenKind::StringLiteral => {
            let tok = p.bump();
            let text = p.interner.resolve(tok.text.expect("string literal carries text")).to_owned();
            Some(Expr { kind: ExprKind::Literal(Literal::Str(text)), span: start })
        }
        TokenKind::CharLiteral => {
            let tok = p.bump();
            let text = p.interner.resolve(tok.text.expect("char literal carries text")).to_owned();
            let value = text.chars().next().unwrap_or('\0');
            Some(Expr { kind: ExprKind::Literal(Literal::Char(value)), span: start })
        }
        TokenKind::BoolTrueLit => {
            p.bump();
            Some(Expr { kind: ExprKind::Literal(Literal::Bool(true)), span: start })
        }
        TokenKind::BoolFalseLit => {
            p.bump();
            Some(Expr { kind: ExprKind::Literal(Literal::Bool(false)), span: start })
        }
        TokenKind::Unit => {
            p.bump();
            Some(Expr { kind: ExprKind::Literal(Literal::Unit), span: start })
        }
        TokenKind::LowerIdent | TokenKind::UpperIdent => {
            let tok = p.bump();
            let name = tok.text.expect("identifier token always carries text");
            Some(Expr { kind: ExprKind::Ident(name), span: start })
        }
        TokenKind::LParen => {
            p.bump();
            if p.eat(TokenKind::RParen) {
                let span = start.to(p.prev_span());
                return Some(Expr { kind: ExprKind::Literal(Literal::Unit), span });
            }
            let mut elements = vec![parse_expr(p)?];
            let mut is_tuple = false;
            while p.eat(TokenKind::Comma) {
                is_tuple = true;
                if p.check(TokenKind::RParen) {
                    break;
                }
                elements.push(parse_expr(p)?);
            }
            p.expect(TokenKind::RParen, "`)` closing a parenthesized expression")?;
            let span = start.to(p.prev_span());
            if is_tuple {
                Some(Expr { kind: ExprKind::TupleLit(elements), span })
            } else {
                elements.pop()
            }
        }
        TokenKind::LBracket => {
            p.bump();
            let mut elements = Vec::new();
            if !p.check(TokenKind::RBracket) {
                loop {
                    elements.push(parse_expr(p)?);
                    if !p.eat(TokenKind::Comma) {
                        break;
                    }
                }
            }
            p.expect(TokenKind::RBracket, "`]` closing a list literal")?;
            let span = start.to(p.prev_span());
            Some(Expr { kind: ExprKind::ListLit(elements), span })
        }
        TokenKind::LBrace => {
            p.bump();
            let mut fields = Vec::new();
            if !p.check(TokenKind::RBrace) {
                loop {
                    let name = p.expect_ident("a record field name")?;
                    p.expect(TokenKind::Colon, "`:` between a record field and its value")?;
                    let value = parse_expr(p)?;
                    fields.push((name, value));
                    if !p.eat(TokenKind::Comma) {
                        break;
                    }
                }
            }
            p.expect(TokenKind::RBrace, "`}` closing a record literal")?;
            let span = start.to(p.prev_span());
            Some(Expr { kind: ExprKind::RecordLit(fields), span })
        }
        TokenKind::Lambda => parse_lambda(p, start),
        TokenKind::KwLet => parse_let(p, start),
        TokenKind::KwWhen => parse_if(p, start),
        TokenKind::KwWithMock => parse_with_mock(p, start),
        found => {
            p.diagnostics.push(
                diagnostic(ErrorCode::ParseExpectedExpr, Phase::Parse, format!("expected an expression, found {found}"))
                    .at(start)
                    .expected("an expression")
                    .found(found.to_string()),
            );
            None
        }
    }
}

fn parse_lambda(p: &mut Parser, start: Span) -> Option<Expr> {
    p.bump(); // `λ`
    p.expect(TokenKind::LParen, "`(` opening a lambda's parameter list")?;
    let params = parse_param_list(p)?;
    p.expect(TokenKind::RParen, "`)` closing a lambda's parameter list")?;
    p.expect(TokenKind::Arrow, "`→` before a lambda's return type")?;
    let effects = parse_effects(p);
    let return_type = parse_type(p)?;
    p.expect(TokenKind::Equiv, "`≡` before a lambda's body")?;
    let body = parse_expr(p)?;
    let span = start.to(body.span);
    Some(Expr { kind: ExprKind::Lambda { params, effects, return_type, body: Box::new(body) }, span })
}

/// Parses `name:Type` / `mut name:Type` parameters, comma-separated. Shared
/// by lambdas and top-level function declarations.
pub(crate) fn parse_param_list(p: &mut Parser) -> Option<Vec<Param>> {
    let mut params = Vec::new();
    if p.check(TokenKind::RParen) {
        return Some(params);
    }
    loop {
        let start = p.span();
        let mutable = p.eat(TokenKind::KwMut);
        let name = p.expect_ident("a parameter name")?;
        p.expect(TokenKind::Colon, "`:` before a parameter's type")?;
        let ty = parse_type(p)?;
        let span = start.to(p.prev_span());
        params.push(Param { name, ty, mutable, span });
        if !p.eat(TokenKind::Comma) {
            break;
        }
    }
    Some(params)
}

fn parse_let(p: &mut Parser, start: Span) -> Option<Expr> {
    p.bump(); // `l`
    let pattern = parse_pattern(p)?;
    p.expect(TokenKind::Eq, "`=` in a let binding")?;
    p.expect(TokenKind::LParen, "`(` opening a let binding's typed value")?;
    let value = parse_expr(p)?;
    if !p.eat(TokenKind::Colon) {
        p.diagnostics.push(
            diagnostic(
                ErrorCode::ParseUntypedLet,
                Phase::Parse,
                "let bindings require an explicit type: `l name=(value : T); body`",
            )
            .at(p.span())
            .with_fixit(ideo_diagnostic::FixIt::new(
                Span::new(p.span().start, p.span().start),
                ": T",
                "add a type annotation",
            )),
        );
        return None;
    }
    let ty = parse_type(p)?;
    p.expect(TokenKind::RParen, "`)` closing a let binding's typed value")?;
    p.expect(TokenKind::Semicolon, "`;` after a let binding")?;
    let body = parse_expr(p)?;
    let span = start.to(body.span);
    Some(Expr { kind: ExprKind::Let { pattern, ty, value: Box::new(value), body: Box::new(body) }, span })
}

fn parse_if(p: &mut Parser, start: Span) -> Option<Expr> {
    p.bump(); // `when`
    let cond = parse_expr(p)?;
    p.expect(TokenKind::LBrace, "`{` opening a conditional's then-branch")?;
    let then_branch = parse_expr(p)?;
    p.expect(TokenKind::RBrace, "`}` closing a conditional's then-branch")?;
    let else_branch = if p.eat(TokenKind::Pipe) {
        p.expect(TokenKind::LBrace, "`{` opening a conditional's else-branch")?;
        let else_expr = parse_expr(p)?;
        p.expect(TokenKind::RBrace, "`}` closing a conditional's else-branch")?;
        Some(Box::new(else_expr))
    } else {
        None
    };
    let span = start.to(p.prev_span());
    Some(Expr { kind: ExprKind::If { cond: Box::new(cond), then_branch: Box::new(then_branch), else_branch }, span })
}

fn parse_with_mock(p: &mut Parser, start: Span) -> Option<Expr> {
    p.bump(); // `with_mock`
    p.expect(TokenKind::LParen, "`(` opening `with_mock`'s arguments")?;
    let key = parse_expr(p)?;
    p.expect(TokenKind::Comma, "`,` between `with_mock`'s key and replacement")?;
    let replacement = parse_expr(p)?;
    p.expect(TokenKind::Comma, "`,` between `with_mock`'s replacement and body")?;
    let body = parse_expr(p)?;
    p.expect(TokenKind::RParen, "`)` closing `with_mock`'s arguments")?;
    let span = start.to(p.prev_span());
    Some(Expr { kind: ExprKind::WithMock { key: Box::new(key), replacement: Box::new(replacement), body: Box::new(body) }, span })
}
