//! Stack safety utilities for deep recursion.
//!
//! Recursive-descent parsing, recursive type checking, and recursive codegen
//! lowering all walk the same arbitrarily-nested expression trees; this
//! crate grows the stack on demand so a deeply nested `match`/`let` chain
//! fails with a diagnostic instead of overflowing.
//!
//! # Platform support
//!
//! - **Native targets**: uses the `stacker` crate to grow the stack on demand.
//! - **WASM targets**: no-op passthrough (WASM has its own stack management).
//!
//! # Usage
//!
//! Wrap a recursive call that could overflow with [`ensure_sufficient_stack`]:
//!
//! ```text
//! fn lower_expr(&mut self, expr: &Expr) -> String {
//!     ensure_sufficient_stack(|| { /* recursive lowering */ })
//! }
//! ```

/// Minimum stack space to keep available (100KB red zone).
#[cfg(not(target_arch = "wasm32"))]
const RED_ZONE: usize = 100 * 1024;

/// Stack space to allocate when growing (1MB).
#[cfg(not(target_arch = "wasm32"))]
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Ensure sufficient stack space is available before executing `f`.
///
/// If the remaining stack is below the red zone threshold, this allocates
/// additional stack space before calling `f`.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM version - just call directly (WASM manages its own stack).
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shallow_recursion_returns_the_expected_value() {
        fn factorial(n: u64) -> u64 {
            ensure_sufficient_stack(|| if n <= 1 { 1 } else { n * factorial(n - 1) })
        }

        assert_eq!(factorial(10), 3_628_800);
    }

    #[test]
    fn deep_recursion_does_not_overflow() {
        fn deep_recurse(n: u64) -> u64 {
            ensure_sufficient_stack(|| if n == 0 { 0 } else { deep_recurse(n - 1) + 1 })
        }

        assert_eq!(deep_recurse(100_000), 100_000);
    }

    #[test]
    fn returns_the_closures_result() {
        let result = ensure_sufficient_stack(|| 42);
        assert_eq!(result, 42);
    }

    #[test]
    fn works_with_a_result_type() {
        let result: Result<i32, &str> = ensure_sufficient_stack(|| Ok(123));
        assert_eq!(result, Ok(123));
    }
}
