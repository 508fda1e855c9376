//! The intrinsics allow-list (§4.9): namespace member calls lowered
//! directly to a target builtin instead of an imported, mockable call,
//! because the substitution is observationally identical.
//!
//! Keeping this list small and explicit matters more than covering every
//! stdlib member — anything not listed here still works, just through the
//! ordinary import-and-call path.

/// `(module id, member name) -> target expression`. The expression is
/// always a one-argument arrow function so call sites can apply it the
/// same way they'd apply any other callee.
const INTRINSICS: &[(&str, &str, &str)] = &[
    ("stdlib/string_ops", "to_upper", "(s) => s.toUpperCase()"),
    ("stdlib/string_ops", "to_lower", "(s) => s.toLowerCase()"),
    ("stdlib/string_ops", "trim", "(s) => s.trim()"),
    ("stdlib/list_ops", "length", "(xs) => xs.length"),
    ("stdlib/list_ops", "reverse", "(xs) => [...xs].reverse()"),
];

#[must_use]
pub(crate) fn lookup(module_id: &str, member: &str) -> Option<&'static str> {
    INTRINSICS.iter().find(|(m, n, _)| *m == module_id && *n == member).map(|(_, _, expr)| *expr)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_intrinsic_resolves_to_a_builtin_expression() {
        assert_eq!(lookup("stdlib/string_ops", "to_upper"), Some("(s) => s.toUpperCase()"));
    }

    #[test]
    fn unknown_member_is_not_an_intrinsic() {
        assert_eq!(lookup("stdlib/string_ops", "reverse"), None);
        assert_eq!(lookup("src/math", "to_upper"), None);
    }
}
