//! Stable mock-key derivation (§4.9 Mocking runtime).
//!
//! A mock key is a plain string so the registry can stay a JS `Map` keyed
//! by string identity — no generated code needs to construct or compare
//! anything richer than that at runtime.

/// `fn:<moduleId>:<name>` for a `mockable` user function, keyed by the
/// module that *declares* it, not the module that calls it.
#[must_use]
pub(crate) fn function_key(module_id: &str, name: &str) -> String {
    format!("fn:{module_id}:{name}")
}

/// `extern:<path>.<member>` for an extern callable, where `path` is the
/// extern's declared segments joined with `/`, the same join convention a
/// module id itself uses.
#[must_use]
pub(crate) fn extern_key(path: &str, member: &str) -> String {
    format!("extern:{path}.{member}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn function_key_names_the_declaring_module() {
        assert_eq!(function_key("src/math", "factorial"), "fn:src/math:factorial");
    }

    #[test]
    fn extern_key_joins_path_and_member_with_a_dot() {
        assert_eq!(extern_key("host/clock", "now"), "extern:host/clock.now");
    }
}
