//! Structural equality and human-readable rendering for [`Type`].
//!
//! There's no unification here: two types are equal only if they're built
//! from the same constructors all the way down. The one deliberate
//! exception is the empty-list placeholder (`[∅]`, i.e. `List(Var(∅))`) —
//! callers that need to let an empty list literal take on any element type
//! should check for that shape explicitly before falling back to
//! [`types_equal`], rather than relying on this function to special-case it
//! (a `Var` compares equal only to another `Var` of the same name, same as
//! every other constructor).

use ideo_ir::{Name, StringInterner, Type};

#[must_use]
pub fn types_equal(a: &Type, b: &Type) -> bool {
    match (a, b) {
        (Type::Int, Type::Int)
        | (Type::Float, Type::Float)
        | (Type::Bool, Type::Bool)
        | (Type::String, Type::String)
        | (Type::Char, Type::Char)
        | (Type::Unit, Type::Unit) => true,
        (Type::List(a), Type::List(b)) => types_equal(a, b),
        (Type::Tuple(a), Type::Tuple(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(a, b)| types_equal(a, b))
        }
        (Type::Map(ak, av), Type::Map(bk, bv)) => types_equal(ak, bk) && types_equal(av, bv),
        (
            Type::Function { params: ap, effects: ae, ret: ar },
            Type::Function { params: bp, effects: be, ret: br },
        ) => {
            ap.len() == bp.len()
                && ap.iter().zip(bp).all(|(a, b)| types_equal(a, b))
                && same_names(ae, be)
                && types_equal(ar, br)
        }
        (Type::Named { name: an, args: aa }, Type::Named { name: bn, args: ba }) => {
            an == bn && aa.len() == ba.len() && aa.iter().zip(ba).all(|(a, b)| types_equal(a, b))
        }
        (Type::Var(a), Type::Var(b)) => a == b,
        (
            Type::Qualified { module: am, name: an, args: aa },
            Type::Qualified { module: bm, name: bn, args: ba },
        ) => am == bm && an == bn && aa.len() == ba.len() && aa.iter().zip(ba).all(|(a, b)| types_equal(a, b)),
        _ => false,
    }
}

/// Effect lists are unordered sets in every other phase (canon alphabetises
/// them on the way in); compare them as sets here too.
fn same_names(a: &[Name], b: &[Name]) -> bool {
    a.len() == b.len() && a.iter().all(|n| b.contains(n))
}

/// Is this the placeholder type an empty list literal gets before context
/// resolves its element type (§4.6)?
#[must_use]
pub fn is_empty_list_placeholder(ty: &Type) -> bool {
    matches!(ty, Type::List(inner) if matches!(inner.as_ref(), Type::Var(_)))
}

/// Render a type the way a user wrote it, for `expected`/`found` diagnostic
/// fields — never the internal `Type` debug representation.
#[must_use]
pub fn render_type(ty: &Type, interner: &StringInterner) -> String {
    match ty {
        Type::Int => "ℤ".to_owned(),
        Type::Float => "ℝ".to_owned(),
        Type::Bool => "𝔹".to_owned(),
        Type::String => "𝕊".to_owned(),
        Type::Char => "ℂ".to_owned(),
        Type::Unit => "𝕌".to_owned(),
        Type::List(inner) => format!("[{}]", render_type(inner, interner)),
        Type::Tuple(elems) => {
            format!("({})", elems.iter().map(|t| render_type(t, interner)).collect::<Vec<_>>().join(","))
        }
        Type::Map(k, v) => format!("{{{}:{}}}", render_type(k, interner), render_type(v, interner)),
        Type::Function { params, effects, ret } => {
            let params = params.iter().map(|t| render_type(t, interner)).collect::<Vec<_>>().join(",");
            let effects = effects.iter().map(|e| format!("!{}", interner.resolve(*e))).collect::<String>();
            format!("λ({params}){effects}→{}", render_type(ret, interner))
        }
        Type::Named { name, args } => render_named(interner.resolve(*name), args, interner),
        Type::Var(name) => interner.resolve(*name).to_owned(),
        Type::Qualified { module, name, args } => {
            let qualified = format!("{}⋅{}", interner.resolve(*module), interner.resolve(*name));
            render_named(&qualified, args, interner)
        }
    }
}

fn render_named(head: &str, args: &[Type], interner: &StringInterner) -> String {
    if args.is_empty() {
        head.to_owned()
    } else {
        let args = args.iter().map(|t| render_type(t, interner)).collect::<Vec<_>>().join(",");
        format!("{head}[{args}]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_primitives_are_equal() {
        assert!(types_equal(&Type::Int, &Type::Int));
        assert!(!types_equal(&Type::Int, &Type::Float));
    }

    #[test]
    fn lists_compare_structurally() {
        let a = Type::List(Box::new(Type::Int));
        let b = Type::List(Box::new(Type::Int));
        let c = Type::List(Box::new(Type::String));
        assert!(types_equal(&a, &b));
        assert!(!types_equal(&a, &c));
    }

    #[test]
    fn effect_lists_compare_as_sets() {
        let mut interner = StringInterner::new();
        let io = interner.intern("IO");
        let net = interner.intern("Net");
        let a = Type::Function { params: vec![], effects: vec![io, net], ret: Box::new(Type::Unit) };
        let b = Type::Function { params: vec![], effects: vec![net, io], ret: Box::new(Type::Unit) };
        assert!(types_equal(&a, &b));
    }

    #[test]
    fn empty_list_placeholder_is_detected() {
        let mut interner = StringInterner::new();
        let placeholder = interner.intern("∅");
        let ty = Type::List(Box::new(Type::Var(placeholder)));
        assert!(is_empty_list_placeholder(&ty));
        assert!(!is_empty_list_placeholder(&Type::List(Box::new(Type::Int))));
    }

    #[test]
    fn renders_named_type_with_args() {
        let mut interner = StringInterner::new();
        let name = interner.intern("Pair");
        let ty = Type::Named { name, args: vec![Type::Int, Type::String] };
        assert_eq!(render_type(&ty, &interner), "Pair[ℤ,𝕊]");
    }
}
