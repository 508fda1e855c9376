//! Line-level surface checks: tabs, carriage returns, trailing whitespace,
//! runs of blank lines, and a missing final newline.
//!
//! All of this runs directly over the raw source string, before lexing —
//! the positions reported here have no token to anchor to yet, so they're
//! computed with a dedicated char-by-char walk rather than reusing the
//! lexer's cursor.

use ideo_diagnostic::{diagnostic, Diagnostic, ErrorCode, FixIt, Phase};
use ideo_ir::{SourcePoint, Span};

pub(crate) fn check_tabs_and_cr(source: &str, diagnostics: &mut Vec<Diagnostic>) {
    let mut line = 1u32;
    let mut column = 1u32;
    let mut byte_offset = 0u32;
    for ch in source.chars() {
        let len = u32::try_from(ch.len_utf8()).unwrap_or(1);
        let start = SourcePoint::new(line, column, byte_offset);
        let end = SourcePoint::new(line, column + 1, byte_offset + len);
        match ch {
            '\t' => diagnostics.push(
                diagnostic(ErrorCode::SurfaceTabCharacter, Phase::Surface, "tab character in source")
                    .at(Span::new(start, end))
                    .with_fixit(FixIt::new(Span::new(start, end), " ", "replace tab with a single space")),
            ),
            '\r' => diagnostics.push(
                diagnostic(ErrorCode::SurfaceCrLineEnding, Phase::Surface, "carriage return in source")
                    .at(Span::new(start, end))
                    .with_fixit(FixIt::new(Span::new(start, end), "", "remove carriage return")),
            ),
            _ => {}
        }
        if ch == '\n' {
            line += 1;
            column = 1;
        } else {
            column += 1;
        }
        byte_offset += len;
    }
}

pub(crate) fn check_trailing_ws_and_blank_runs(source: &str, diagnostics: &mut Vec<Diagnostic>) {
    let mut line_no = 1u32;
    let mut byte_offset = 0u32;
    let mut blank_streak = 0u32;
    for raw_line in source.split_inclusive('\n') {
        let content = raw_line.strip_suffix('\n').unwrap_or(raw_line);
        // CR is reported separately by `check_tabs_and_cr`; strip it here so
        // it isn't also counted as trailing whitespace.
        let content = content.strip_suffix('\r').unwrap_or(content);
        let trimmed = content.trim_end_matches([' ', '\t']);

        if trimmed.len() < content.len() {
            let start_col = u32::try_from(trimmed.chars().count()).unwrap_or(0) + 1;
            let start_byte = byte_offset + u32::try_from(trimmed.len()).unwrap_or(0);
            let end_col = u32::try_from(content.chars().count()).unwrap_or(0) + 1;
            let end_byte = byte_offset + u32::try_from(content.len()).unwrap_or(0);
            let span = Span::new(
                SourcePoint::new(line_no, start_col, start_byte),
                SourcePoint::new(line_no, end_col, end_byte),
            );
            diagnostics.push(
                diagnostic(ErrorCode::SurfaceTrailingWs, Phase::Surface, "trailing whitespace")
                    .at(span)
                    .with_fixit(FixIt::new(span, "", "trim trailing whitespace")),
            );
        }

        if content.trim().is_empty() {
            blank_streak += 1;
            if blank_streak == 2 {
                let at = SourcePoint::new(line_no, 1, byte_offset);
                diagnostics.push(
                    diagnostic(
                        ErrorCode::SurfaceBlankLines,
                        Phase::Surface,
                        "two or more consecutive blank lines",
                    )
                    .at(Span::new(at, at)),
                );
            }
        } else {
            blank_streak = 0;
        }

        byte_offset += u32::try_from(raw_line.len()).unwrap_or(0);
        line_no += 1;
    }
}

pub(crate) fn check_final_newline(source: &str, diagnostics: &mut Vec<Diagnostic>) {
    if source.is_empty() || source.ends_with('\n') {
        return;
    }
    let mut line = 1u32;
    for ch in source.chars() {
        if ch == '\n' {
            line += 1;
        }
    }
    let last_line_len = source.rsplit('\n').next().map_or(0, |s| s.chars().count());
    let column = u32::try_from(last_line_len).unwrap_or(0) + 1;
    let byte_offset = u32::try_from(source.len()).unwrap_or(u32::MAX);
    let at = SourcePoint::new(line, column, byte_offset);
    diagnostics.push(
        diagnostic(ErrorCode::SurfaceNoFinalNewline, Phase::Surface, "file does not end with a newline")
            .at(Span::new(at, at))
            .with_fixit(FixIt::new(Span::new(at, at), "\n", "add a trailing newline")),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(source: &str) -> Vec<ErrorCode> {
        let mut diagnostics = Vec::new();
        check_tabs_and_cr(source, &mut diagnostics);
        check_trailing_ws_and_blank_runs(source, &mut diagnostics);
        check_final_newline(source, &mut diagnostics);
        diagnostics.into_iter().map(|d| d.code).collect()
    }

    #[test]
    fn clean_source_has_no_diagnostics() {
        assert!(codes("l x=(1 : ℤ);\n").is_empty());
    }

    #[test]
    fn flags_tab() {
        assert!(codes("l\tx=1;\n").contains(&ErrorCode::SurfaceTabCharacter));
    }

    #[test]
    fn flags_carriage_return() {
        assert!(codes("l x=1;\r\n").contains(&ErrorCode::SurfaceCrLineEnding));
    }

    #[test]
    fn flags_trailing_whitespace() {
        assert!(codes("l x=1;   \n").contains(&ErrorCode::SurfaceTrailingWs));
    }

    #[test]
    fn flags_two_consecutive_blank_lines() {
        let codes = codes("a\n\n\nb\n");
        assert_eq!(codes.iter().filter(|c| **c == ErrorCode::SurfaceBlankLines).count(), 1);
    }

    #[test]
    fn single_blank_line_is_fine() {
        assert!(!codes("a\n\nb\n").contains(&ErrorCode::SurfaceBlankLines));
    }

    #[test]
    fn flags_missing_final_newline() {
        assert!(codes("l x=1;").contains(&ErrorCode::SurfaceNoFinalNewline));
    }
}
