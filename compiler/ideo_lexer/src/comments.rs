//! Nested comment scanning.
//!
//! Comments are delimited by `⟦` and `⟧` and may nest, so they cannot be
//! recognized by a single regular expression. The lexer tracks bracket depth
//! directly instead.

/// Scan a nested comment starting at `text`, which must begin with `⟦`.
/// Returns the byte length of the whole comment, delimiters included, or
/// `None` if it runs off the end of the source before closing.
pub(crate) fn scan_nested_comment(text: &str) -> Option<usize> {
    let mut chars = text.char_indices();
    let (_, first) = chars.next()?;
    debug_assert_eq!(first, '⟦');
    let mut depth = 1usize;
    for (idx, ch) in chars {
        match ch {
            '⟦' => depth += 1,
            '⟧' => {
                depth -= 1;
                if depth == 0 {
                    return Some(idx + ch.len_utf8());
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scans_flat_comment() {
        let text = "⟦ hello ⟧rest";
        assert_eq!(scan_nested_comment(text), Some("⟦ hello ⟧".len()));
    }

    #[test]
    fn scans_nested_comment() {
        let text = "⟦ outer ⟦ inner ⟧ still outer ⟧rest";
        let len = scan_nested_comment(text).expect("should find a match");
        assert_eq!(&text[..len], "⟦ outer ⟦ inner ⟧ still outer ⟧");
    }

    #[test]
    fn unterminated_returns_none() {
        assert_eq!(scan_nested_comment("⟦ never closed"), None);
    }
}
