//! Operator-to-glyph rendering, the inverse of the token tables in
//! `ideo_lexer::raw_token` and the precedence tiers in `ideo_parse::expr`.

use ideo_ir::{BinaryOp, PipelineOp, UnaryOp};

#[must_use]
pub(crate) fn binary_op_glyph(op: BinaryOp) -> &'static str {
    match op {
        BinaryOp::Add => "+",
        BinaryOp::Sub => "-",
        BinaryOp::Mul => "*",
        BinaryOp::Div => "/",
        BinaryOp::Mod => "%",
        BinaryOp::Eq => "=",
        BinaryOp::NotEq => "≠",
        BinaryOp::Lt => "<",
        BinaryOp::LtEq => "≤",
        BinaryOp::Gt => ">",
        BinaryOp::GtEq => "≥",
        BinaryOp::And => "∧",
        BinaryOp::Or => "∨",
        BinaryOp::Concat => "⧺",
    }
}

/// `Not`/`Neg` are prefix glyphs; `Len` instead prefixes with `#`, both
/// written with no space before the operand (matching the lexer's
/// symbol-adjacent tokens).
#[must_use]
pub(crate) fn unary_op_glyph(op: UnaryOp) -> &'static str {
    match op {
        UnaryOp::Not => "¬",
        UnaryOp::Neg => "-",
        UnaryOp::Len => "#",
    }
}

#[must_use]
pub(crate) fn pipeline_op_glyph(op: PipelineOp) -> &'static str {
    match op {
        PipelineOp::Forward => "|>",
        PipelineOp::ComposeForward => ">>",
        PipelineOp::ComposeBackward => "<<",
    }
}
