//! Pre-flight encoding checks over a source string.
//!
//! Run once before lexing proper; the result feeds straight into
//! `ideo_lexer`'s diagnostics so an encoding problem is reported with the
//! same precision as any other lex error.

/// An encoding problem found before tokenizing starts.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct EncodingIssue {
    pub kind: EncodingIssueKind,
    pub byte_offset: u32,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EncodingIssueKind {
    Utf8Bom,
    Utf16LeBom,
    Utf16BeBom,
    InteriorNul,
}

/// Source text wrapper that has already been scanned for encoding issues.
#[derive(Clone, Debug)]
pub struct SourceBuffer<'a> {
    text: &'a str,
    issues: Vec<EncodingIssue>,
}

impl<'a> SourceBuffer<'a> {
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        let mut issues = Vec::new();
        let bytes = text.as_bytes();
        if bytes.starts_with(&[0xEF, 0xBB, 0xBF]) {
            issues.push(EncodingIssue { kind: EncodingIssueKind::Utf8Bom, byte_offset: 0 });
        } else if bytes.starts_with(&[0xFF, 0xFE]) {
            issues.push(EncodingIssue { kind: EncodingIssueKind::Utf16LeBom, byte_offset: 0 });
        } else if bytes.starts_with(&[0xFE, 0xFF]) {
            issues.push(EncodingIssue { kind: EncodingIssueKind::Utf16BeBom, byte_offset: 0 });
        }
        for (offset, byte) in bytes.iter().enumerate() {
            if *byte == 0 {
                issues.push(EncodingIssue {
                    kind: EncodingIssueKind::InteriorNul,
                    byte_offset: u32::try_from(offset).unwrap_or(u32::MAX),
                });
            }
        }
        SourceBuffer { text, issues }
    }

    #[must_use]
    pub fn text(&self) -> &'a str {
        self.text
    }

    #[must_use]
    pub fn encoding_issues(&self) -> &[EncodingIssue] {
        &self.issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_source_has_no_issues() {
        assert!(SourceBuffer::new("λmain()→𝕌=()").encoding_issues().is_empty());
    }

    #[test]
    fn detects_utf8_bom() {
        let with_bom = "\u{feff}λmain()→𝕌=()";
        let issues = SourceBuffer::new(with_bom).encoding_issues();
        assert_eq!(issues[0].kind, EncodingIssueKind::Utf8Bom);
    }
}
