//! Type rendering, the inverse of `ideo_parse::types::parse_type`.

use ideo_ir::{StringInterner, Type};

#[must_use]
pub(crate) fn fmt_type(interner: &StringInterner, ty: &Type) -> String {
    match ty {
        Type::Int => "ℤ".to_owned(),
        Type::Float => "ℝ".to_owned(),
        Type::Bool => "𝔹".to_owned(),
        Type::String => "𝕊".to_owned(),
        Type::Char => "ℂ".to_owned(),
        Type::Unit => "𝕌".to_owned(),
        // The empty-list placeholder `Var(∅)` parses from the single `∅`
        // token and should round-trip back to it rather than `[∅]`.
        Type::List(elem) if is_empty_placeholder(interner, elem) => "∅".to_owned(),
        Type::List(elem) => format!("[{}]", fmt_type(interner, elem)),
        Type::Tuple(elems) => {
            format!("({})", elems.iter().map(|t| fmt_type(interner, t)).collect::<Vec<_>>().join(", "))
        }
        Type::Map(key, value) => format!("{{{}:{}}}", fmt_type(interner, key), fmt_type(interner, value)),
        Type::Function { params, effects, ret } => {
            let params_js = params.iter().map(|t| fmt_type(interner, t)).collect::<Vec<_>>().join(", ");
            format!("λ({params_js})→{}{}", fmt_effects(interner, effects), fmt_type(interner, ret))
        }
        Type::Named { name, args } => format!("{}{}", interner.resolve(*name), fmt_type_args(interner, args)),
        Type::Var(name) => interner.resolve(*name).to_owned(),
        Type::Qualified { module, name, args } => {
            format!("{}⋅{}{}", interner.resolve(*module), interner.resolve(*name), fmt_type_args(interner, args))
        }
    }
}

fn is_empty_placeholder(interner: &StringInterner, elem: &Type) -> bool {
    matches!(elem, Type::Var(name) if interner.resolve(*name) == "∅")
}

fn fmt_type_args(interner: &StringInterner, args: &[Type]) -> String {
    if args.is_empty() {
        String::new()
    } else {
        format!("[{}]", args.iter().map(|t| fmt_type(interner, t)).collect::<Vec<_>>().join(","))
    }
}

/// Zero or more `!EffectName` labels, rendered with no separating space
/// (matching the grammar: `→!io!net ℤ`).
pub(crate) fn fmt_effects(interner: &StringInterner, effects: &[ideo_ir::Name]) -> String {
    effects.iter().map(|e| format!("!{}", interner.resolve(*e))).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitive_types_render_to_their_glyph() {
        let interner = StringInterner::new();
        assert_eq!(fmt_type(&interner, &Type::Int), "ℤ");
        assert_eq!(fmt_type(&interner, &Type::Bool), "𝔹");
    }

    #[test]
    fn empty_list_placeholder_round_trips_to_the_empty_set_glyph() {
        let mut interner = StringInterner::new();
        let placeholder = interner.intern("∅");
        let ty = Type::List(Box::new(Type::Var(placeholder)));
        assert_eq!(fmt_type(&interner, &ty), "∅");
    }

    #[test]
    fn list_of_int_renders_with_brackets() {
        let interner = StringInterner::new();
        assert_eq!(fmt_type(&interner, &Type::List(Box::new(Type::Int))), "[ℤ]");
    }

    #[test]
    fn function_type_renders_effects_before_return_type() {
        let mut interner = StringInterner::new();
        let io = interner.intern("io");
        let ty = Type::Function { params: vec![Type::Int], effects: vec![io], ret: Box::new(Type::Unit) };
        assert_eq!(fmt_type(&interner, &ty), "λ(ℤ)→!io𝕌");
    }
}
