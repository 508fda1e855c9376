//! `BinaryOp`/`UnaryOp` lowering to the target's own operators.
//!
//! Direct enum-based dispatch, the same shape the teacher's own binary
//! operator evaluator uses, but returning a fixed operator string rather
//! than evaluating anything — codegen never inspects a value's runtime
//! type, only the static operator the parser already fixed.

use ideo_ir::{BinaryOp, UnaryOp};

/// Additive `+` is the one binary operator whose rendering can depend on
/// the kind of coercion the type checker already allowed (`𝕊 + ℤ`/`ℤ + 𝕊`
/// string-numeric coercion, §4.6): that case still lowers to `+`, since
/// JavaScript's own `+` already does the string/number coercion the type
/// checker validated, so no special casing is needed in the emitted text.
#[must_use]
pub(crate) fn binary_op_str(op: BinaryOp) -> &'static str {
    match op {
        BinaryOp::Add => "+",
        BinaryOp::Sub => "-",
        BinaryOp::Mul => "*",
        BinaryOp::Div => "/",
        BinaryOp::Mod => "%",
        BinaryOp::Eq => "===",
        BinaryOp::NotEq => "!==",
        BinaryOp::Lt => "<",
        BinaryOp::LtEq => "<=",
        BinaryOp::Gt => ">",
        BinaryOp::GtEq => ">=",
        BinaryOp::And => "&&",
        BinaryOp::Or => "||",
        BinaryOp::Concat => "+",
    }
}

#[must_use]
pub(crate) fn unary_op_prefix(op: UnaryOp) -> &'static str {
    match op {
        UnaryOp::Not => "!",
        UnaryOp::Neg => "-",
        // `UnaryOp::Len` isn't a prefix operator in the target; `expr.rs`
        // special-cases it into a `.length` access instead of calling this.
        UnaryOp::Len => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comparison_operators_use_strict_equality() {
        assert_eq!(binary_op_str(BinaryOp::Eq), "===");
        assert_eq!(binary_op_str(BinaryOp::NotEq), "!==");
    }

    #[test]
    fn concat_and_add_share_the_plus_operator() {
        assert_eq!(binary_op_str(BinaryOp::Add), "+");
        assert_eq!(binary_op_str(BinaryOp::Concat), "+");
    }
}
