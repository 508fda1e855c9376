//! Cooking layer: turns raw source text into [`ideo_ir::Token`]s with
//! spans, interning, keyword resolution and diagnostics.
//!
//! [`ideo_lexer_core::SourceBuffer`] flags encoding problems up front; this
//! crate then walks the text producing tokens. Nested comments and
//! string/char literal bodies are not regular, so they are scanned by hand;
//! everything else goes through a `logos`-derived [`raw_token::RawToken`]
//! lexer, re-run on the remaining slice one token at a time.

mod comments;
mod escape;
mod keywords;
mod raw_token;

use escape::UnescapeError;
use ideo_diagnostic::{diagnostic, Diagnostic, ErrorCode, Phase};
use ideo_ir::{SourcePoint, Span, StringInterner, Token, TokenKind};
use ideo_lexer_core::{Cursor, EncodingIssue, EncodingIssueKind, SourceBuffer};
use logos::Logos;
use raw_token::RawToken;

/// Lex an entire source file.
///
/// Never panics: malformed input becomes diagnostics rather than a hard
/// failure, so later phases still get whatever tokens could be recovered.
pub fn lex(source: &str, interner: &mut StringInterner) -> (Vec<Token>, Vec<Diagnostic>) {
    let buffer = SourceBuffer::new(source);
    let mut diagnostics: Vec<Diagnostic> = buffer
        .encoding_issues()
        .iter()
        .map(encoding_diagnostic)
        .collect();

    let mut tokens = Vec::new();
    let mut cursor = Cursor::new(buffer.text());

    loop {
        skip_insignificant(&mut cursor, &mut diagnostics);
        if cursor.is_eof() {
            break;
        }
        let start = point(&cursor);
        match cursor.peek() {
            '"' => lex_string(&mut cursor, start, interner, &mut tokens, &mut diagnostics),
            '\'' => lex_char(&mut cursor, start, interner, &mut tokens, &mut diagnostics),
            _ => lex_raw(&mut cursor, start, interner, &mut tokens, &mut diagnostics),
        }
    }

    let eof = point(&cursor);
    tokens.push(Token::new(TokenKind::Eof, None, Span::new(eof, eof)));
    (tokens, diagnostics)
}

fn point(cursor: &Cursor) -> SourcePoint {
    SourcePoint::new(cursor.line(), cursor.column(), cursor.byte_offset())
}

/// Advance `cursor` by exactly `bytes` bytes. `bytes` must land on a char
/// boundary in the cursor's remaining text, which always holds here since
/// callers only pass lengths measured on the same underlying `&str`.
fn advance_by_bytes(cursor: &mut Cursor, bytes: usize) {
    let target = cursor.byte_offset() + u32::try_from(bytes).unwrap_or(u32::MAX);
    while cursor.byte_offset() < target && !cursor.is_eof() {
        cursor.bump();
    }
}

fn encoding_diagnostic(issue: &EncodingIssue) -> Diagnostic {
    let message = match issue.kind {
        EncodingIssueKind::Utf8Bom => "source starts with a UTF-8 byte order mark",
        EncodingIssueKind::Utf16LeBom => "source looks like UTF-16 (little-endian), not UTF-8",
        EncodingIssueKind::Utf16BeBom => "source looks like UTF-16 (big-endian), not UTF-8",
        EncodingIssueKind::InteriorNul => "source contains a NUL byte",
    };
    let at = SourcePoint::new(1, 1, issue.byte_offset);
    diagnostic(ErrorCode::LexUnknownCodepoint, Phase::Lex, message).at(Span::new(at, at))
}

fn skip_insignificant(cursor: &mut Cursor, diagnostics: &mut Vec<Diagnostic>) {
    loop {
        match cursor.peek() {
            ' ' | '\t' | '\r' | '\n' => {
                cursor.bump();
            }
            '⟦' => {
                let start = point(cursor);
                match comments::scan_nested_comment(cursor.as_str()) {
                    Some(len) => advance_by_bytes(cursor, len),
                    None => {
                        while !cursor.is_eof() {
                            cursor.bump();
                        }
                        let end = point(cursor);
                        diagnostics.push(
                            diagnostic(
                                ErrorCode::LexUnterminatedComment,
                                Phase::Lex,
                                "unterminated comment",
                            )
                            .at(Span::new(start, end)),
                        );
                    }
                }
            }
            _ => break,
        }
    }
}

fn lex_string(
    cursor: &mut Cursor,
    start: SourcePoint,
    interner: &mut StringInterner,
    tokens: &mut Vec<Token>,
    diagnostics: &mut Vec<Diagnostic>,
) {
    cursor.bump();
    let mut raw = String::new();
    loop {
        if cursor.is_eof() || cursor.peek() == '\n' {
            let end = point(cursor);
            diagnostics.push(
                diagnostic(ErrorCode::LexUnterminatedString, Phase::Lex, "unterminated string literal")
                    .at(Span::new(start, end)),
            );
            return;
        }
        let ch = cursor.peek();
        cursor.bump();
        if ch == '"' {
            break;
        }
        raw.push(ch);
        if ch == '\\' {
            if cursor.is_eof() || cursor.peek() == '\n' {
                let end = point(cursor);
                diagnostics.push(
                    diagnostic(
                        ErrorCode::LexUnterminatedString,
                        Phase::Lex,
                        "unterminated string literal",
                    )
                    .at(Span::new(start, end)),
                );
                return;
            }
            raw.push(cursor.peek());
            cursor.bump();
        }
    }
    let end = point(cursor);
    let span = Span::new(start, end);
    match escape::unescape(&raw) {
        Ok(text) => {
            let name = interner.intern(&text);
            tokens.push(Token::new(TokenKind::StringLiteral, Some(name), span));
        }
        Err(err) => diagnostics.push(unescape_diagnostic(err, span)),
    }
}

fn lex_char(
    cursor: &mut Cursor,
    start: SourcePoint,
    interner: &mut StringInterner,
    tokens: &mut Vec<Token>,
    diagnostics: &mut Vec<Diagnostic>,
) {
    cursor.bump();
    let mut raw = String::new();
    loop {
        if cursor.is_eof() || cursor.peek() == '\n' {
            let end = point(cursor);
            diagnostics.push(
                diagnostic(ErrorCode::LexUnterminatedChar, Phase::Lex, "unterminated char literal")
                    .at(Span::new(start, end)),
            );
            return;
        }
        let ch = cursor.peek();
        cursor.bump();
        if ch == '\'' {
            break;
        }
        raw.push(ch);
        if ch == '\\' {
            if cursor.is_eof() {
                let end = point(cursor);
                diagnostics.push(
                    diagnostic(
                        ErrorCode::LexUnterminatedChar,
                        Phase::Lex,
                        "unterminated char literal",
                    )
                    .at(Span::new(start, end)),
                );
                return;
            }
            raw.push(cursor.peek());
            cursor.bump();
        }
    }
    let end = point(cursor);
    let span = Span::new(start, end);
    match escape::unescape(&raw) {
        Ok(text) => {
            let mut chars = text.chars();
            match (chars.next(), chars.next()) {
                (None, _) => diagnostics.push(
                    diagnostic(ErrorCode::LexEmptyChar, Phase::Lex, "empty char literal").at(span),
                ),
                (Some(_), Some(_)) => diagnostics.push(
                    diagnostic(
                        ErrorCode::LexMultiCodepointChar,
                        Phase::Lex,
                        "char literal holds more than one codepoint",
                    )
                    .at(span)
                    .found(text),
                ),
                (Some(c), None) => {
                    let name = interner.intern(&c.to_string());
                    tokens.push(Token::new(TokenKind::CharLiteral, Some(name), span));
                }
            }
        }
        Err(err) => diagnostics.push(unescape_diagnostic(err, span)),
    }
}

fn unescape_diagnostic(err: UnescapeError, span: Span) -> Diagnostic {
    match err {
        UnescapeError::UnknownEscape(c) => diagnostic(
            ErrorCode::LexUnknownEscape,
            Phase::Lex,
            format!("unknown escape sequence `\\{c}`"),
        )
        .at(span),
        UnescapeError::TrailingBackslash => {
            diagnostic(ErrorCode::LexUnknownEscape, Phase::Lex, "trailing backslash in literal").at(span)
        }
    }
}

fn lex_raw(
    cursor: &mut Cursor,
    start: SourcePoint,
    interner: &mut StringInterner,
    tokens: &mut Vec<Token>,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let rest = cursor.as_str();
    let mut lexer = RawToken::lexer(rest);
    match lexer.next() {
        Some(Ok(raw)) => {
            let text = lexer.slice();
            let len = text.len();
            let text = text.to_owned();
            advance_by_bytes(cursor, len);
            let span = Span::new(start, point(cursor));
            push_raw_token(raw, &text, span, interner, tokens);
        }
        Some(Err(())) | None => {
            let ch = cursor.peek();
            cursor.bump();
            let span = Span::new(start, point(cursor));
            diagnostics.push(
                diagnostic(
                    ErrorCode::LexUnknownCodepoint,
                    Phase::Lex,
                    format!("unexpected character {ch:?}"),
                )
                .at(span),
            );
        }
    }
}

#[allow(clippy::too_many_lines)]
fn push_raw_token(
    raw: RawToken,
    text: &str,
    span: Span,
    interner: &mut StringInterner,
    tokens: &mut Vec<Token>,
) {
    use RawToken::{
        Amp, And, Arrow, Bang, BoolFalseLit, BoolTrueLit, Colon, Comma, Concat, Dot2, Equiv, Eq,
        FilterOp, FloatLiteral, FoldOp, Gt, Hash, Ident, IntLiteral, LBrace, LBracket, LParen,
        Lambda, Lt, MapsTo, Minus, NotEq, NsDot, Not, Or, Percent, Period, Pipe, PipeGt, Plus,
        RBrace, RBracket, RParen, Semicolon, ShiftL, ShiftR, Slash, Star, TyBool, TyChar, TyEmpty,
        TyInt, TyReal, TyStr, TyUnit, Underscore, LtEq, GtEq,
    };

    let (kind, carries_text) = match raw {
        Ident => {
            if let Some(kw) = keywords::lookup(text) {
                (kw, false)
            } else if text.starts_with(char::is_uppercase) {
                (TokenKind::UpperIdent, true)
            } else {
                (TokenKind::LowerIdent, true)
            }
        }
        IntLiteral => (TokenKind::IntLiteral, true),
        FloatLiteral => (TokenKind::FloatLiteral, true),
        Lambda => (TokenKind::Lambda, false),
        Arrow => (TokenKind::Arrow, false),
        Equiv => (TokenKind::Equiv, false),
        MapsTo => (TokenKind::MapsTo, false),
        FilterOp => (TokenKind::FilterOp, false),
        FoldOp => (TokenKind::FoldOp, false),
        NsDot => (TokenKind::Dot, false),
        And => (TokenKind::And, false),
        Or => (TokenKind::Or, false),
        Not => (TokenKind::Not, false),
        NotEq => (TokenKind::NotEq, false),
        LtEq => (TokenKind::LtEq, false),
        GtEq => (TokenKind::GtEq, false),
        Concat => (TokenKind::Concat, false),
        BoolTrueLit => (TokenKind::BoolTrueLit, false),
        BoolFalseLit => (TokenKind::BoolFalseLit, false),
        TyInt => (TokenKind::TyInt, false),
        TyReal => (TokenKind::TyReal, false),
        TyBool => (TokenKind::TyBool, false),
        TyStr => (TokenKind::TyStr, false),
        TyChar => (TokenKind::TyChar, false),
        TyUnit => (TokenKind::TyUnit, false),
        TyEmpty => (TokenKind::TyEmpty, false),
        LParen => (TokenKind::LParen, false),
        RParen => (TokenKind::RParen, false),
        LBracket => (TokenKind::LBracket, false),
        RBracket => (TokenKind::RBracket, false),
        LBrace => (TokenKind::LBrace, false),
        RBrace => (TokenKind::RBrace, false),
        Colon => (TokenKind::Colon, false),
        Semicolon => (TokenKind::Semicolon, false),
        Comma => (TokenKind::Comma, false),
        Dot2 => (TokenKind::Dot2, false),
        Period => (TokenKind::Period, false),
        PipeGt => (TokenKind::PipeGt, false),
        Pipe => (TokenKind::Pipe, false),
        Underscore => (TokenKind::Underscore, false),
        Bang => (TokenKind::Bang, false),
        Amp => (TokenKind::Amp, false),
        Hash => (TokenKind::Hash, false),
        Plus => (TokenKind::Plus, false),
        Minus => (TokenKind::Minus, false),
        Star => (TokenKind::Star, false),
        Slash => (TokenKind::Slash, false),
        Percent => (TokenKind::Percent, false),
        ShiftR => (TokenKind::ShiftR, false),
        ShiftL => (TokenKind::ShiftL, false),
        Lt => (TokenKind::Lt, false),
        Gt => (TokenKind::Gt, false),
        Eq => (TokenKind::Eq, false),
    };

    let interned = if carries_text { Some(interner.intern(text)) } else { None };
    tokens.push(Token::new(kind, interned, span));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        let mut interner = StringInterner::new();
        let (tokens, diagnostics) = lex(source, &mut interner);
        assert!(diagnostics.is_empty(), "unexpected diagnostics: {diagnostics:?}");
        tokens.into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn lexes_lambda_header() {
        let k = kinds("λ(n:ℤ)→ℤ");
        assert_eq!(
            k,
            vec![
                TokenKind::Lambda,
                TokenKind::LParen,
                TokenKind::LowerIdent,
                TokenKind::Colon,
                TokenKind::TyInt,
                TokenKind::RParen,
                TokenKind::Arrow,
                TokenKind::TyInt,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn resolves_short_keywords_over_identifiers() {
        let k = kinds("l x ≡ 1");
        assert_eq!(
            k,
            vec![
                TokenKind::KwLet,
                TokenKind::LowerIdent,
                TokenKind::Equiv,
                TokenKind::IntLiteral,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn strips_nested_comments() {
        let k = kinds("⟦ outer ⟦ inner ⟧ outer ⟧ 1");
        assert_eq!(k, vec![TokenKind::IntLiteral, TokenKind::Eof]);
    }

    #[test]
    fn interns_string_literal_body() {
        let mut interner = StringInterner::new();
        let (tokens, diagnostics) = lex(r#""hi\n""#, &mut interner);
        assert!(diagnostics.is_empty());
        assert_eq!(tokens[0].kind, TokenKind::StringLiteral);
        assert_eq!(interner.resolve(tokens[0].text.expect("has text")), "hi\n");
    }

    #[test]
    fn flags_unterminated_string() {
        let mut interner = StringInterner::new();
        let (_, diagnostics) = lex("\"never closed", &mut interner);
        assert_eq!(diagnostics[0].code, ErrorCode::LexUnterminatedString);
    }

    #[test]
    fn flags_empty_char_literal() {
        let mut interner = StringInterner::new();
        let (_, diagnostics) = lex("''", &mut interner);
        assert_eq!(diagnostics[0].code, ErrorCode::LexEmptyChar);
    }

    #[test]
    fn flags_multi_codepoint_char_literal() {
        let mut interner = StringInterner::new();
        let (_, diagnostics) = lex("'ab'", &mut interner);
        assert_eq!(diagnostics[0].code, ErrorCode::LexMultiCodepointChar);
    }

    #[test]
    fn flags_unknown_escape() {
        let mut interner = StringInterner::new();
        let (_, diagnostics) = lex(r#""\q""#, &mut interner);
        assert_eq!(diagnostics[0].code, ErrorCode::LexUnknownEscape);
    }

    #[test]
    fn left_associative_pipeline_glyph_lexes_as_one_token() {
        let k = kinds("x |> f");
        assert_eq!(
            k,
            vec![TokenKind::LowerIdent, TokenKind::PipeGt, TokenKind::LowerIdent, TokenKind::Eof]
        );
    }

    #[test]
    fn shift_glyphs_are_not_split_into_comparisons() {
        let k = kinds("x >> f >> g");
        assert_eq!(
            k,
            vec![
                TokenKind::LowerIdent,
                TokenKind::ShiftR,
                TokenKind::LowerIdent,
                TokenKind::ShiftR,
                TokenKind::LowerIdent,
                TokenKind::Eof,
            ]
        );
    }
}
