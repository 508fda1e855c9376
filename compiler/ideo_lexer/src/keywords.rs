//! Reserved-keyword resolution.
//!
//! Length-bucketed lookup: an identifier's byte length rules out most
//! candidates before a single string comparison happens.

use ideo_ir::TokenKind;

#[must_use]
pub(crate) fn lookup(text: &str) -> Option<TokenKind> {
    match text.len() {
        1 => match text {
            "t" => Some(TokenKind::KwType),
            "i" => Some(TokenKind::KwImport),
            "e" => Some(TokenKind::KwExtern),
            "l" => Some(TokenKind::KwLet),
            "c" => Some(TokenKind::KwConst),
            _ => None,
        },
        3 => match text {
            "mut" => Some(TokenKind::KwMut),
            _ => None,
        },
        4 => match text {
            "when" => Some(TokenKind::KwWhen),
            "test" => Some(TokenKind::KwTest),
            _ => None,
        },
        6 => match text {
            "export" => Some(TokenKind::KwExport),
            _ => None,
        },
        8 => match text {
            "mockable" => Some(TokenKind::KwMockable),
            _ => None,
        },
        9 => match text {
            "with_mock" => Some(TokenKind::KwWithMock),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_every_reserved_word() {
        for (text, kind) in [
            ("t", TokenKind::KwType),
            ("i", TokenKind::KwImport),
            ("e", TokenKind::KwExtern),
            ("l", TokenKind::KwLet),
            ("c", TokenKind::KwConst),
            ("mut", TokenKind::KwMut),
            ("when", TokenKind::KwWhen),
            ("test", TokenKind::KwTest),
            ("export", TokenKind::KwExport),
            ("mockable", TokenKind::KwMockable),
            ("with_mock", TokenKind::KwWithMock),
        ] {
            assert_eq!(lookup(text), Some(kind));
        }
    }

    #[test]
    fn ordinary_identifiers_are_not_keywords() {
        assert_eq!(lookup("total"), None);
        assert_eq!(lookup("ty"), None);
        assert_eq!(lookup("with_mocks"), None);
    }
}
