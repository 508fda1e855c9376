//! Escape sequence resolution for string and char literal bodies.
//!
//! Recognized escapes: `\n`, `\t`, `\r`, `\\`, `\"`, `\'`.

/// Resolve a single escape character to its replacement. `None` means the
/// escape is not recognized.
#[inline]
fn resolve_escape(c: char) -> Option<char> {
    match c {
        'n' => Some('\n'),
        't' => Some('\t'),
        'r' => Some('\r'),
        '\\' => Some('\\'),
        '"' => Some('"'),
        '\'' => Some('\''),
        _ => None,
    }
}

/// What went wrong while unescaping a literal body.
pub(crate) enum UnescapeError {
    UnknownEscape(char),
    TrailingBackslash,
}

/// Unescape the body of a string or char literal (the text between
/// delimiters, delimiters already stripped).
pub(crate) fn unescape(body: &str) -> Result<String, UnescapeError> {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some(esc) => match resolve_escape(esc) {
                Some(resolved) => out.push(resolved),
                None => return Err(UnescapeError::UnknownEscape(esc)),
            },
            None => return Err(UnescapeError::TrailingBackslash),
        }
    }
    Ok(out)
}
