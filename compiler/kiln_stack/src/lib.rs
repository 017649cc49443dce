//! Stack growth for the recursive evaluator.
//!
//! Kiln evaluates programs by plain recursion over the AST: every nested
//! expression and every user function call is one more native frame. A deeply
//! recursive Kiln program would otherwise abort the host process with a stack
//! overflow instead of failing like any other evaluation.
//!
//! [`ensure_sufficient_stack`] checks how much stack is left and, below the
//! red zone, continues the computation on a freshly allocated segment.
//!
//! On `wasm32` the guard is a passthrough.

/// Grow when less than this much stack remains (128KB).
const RED_ZONE: usize = 128 * 1024;

/// Size of every newly allocated stack segment (2MB).
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first growing the stack if fewer than [`RED_ZONE`] bytes remain.
///
/// Wrap each level of a recursive walk:
///
/// ```text
/// fn eval(&mut self, env: &mut Environment, expr: &Expr) -> EvalResult {
///     ensure_sufficient_stack(|| self.eval_inner(env, expr))
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// WASM manages its own stack; call through.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

/// Bytes of stack left on the current segment, if the platform can tell.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn remaining_stack() -> Option<usize> {
    stacker::remaining_stack()
}

/// Unknown on WASM.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn remaining_stack() -> Option<usize> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count_down(n: u64) -> u64 {
        ensure_sufficient_stack(|| if n == 0 { 0 } else { count_down(n - 1) + 1 })
    }

    #[test]
    fn passes_through_the_closure_value() {
        assert_eq!(ensure_sufficient_stack(|| "done"), "done");
        let ok: Result<u8, ()> = ensure_sufficient_stack(|| Ok(7));
        assert_eq!(ok, Ok(7));
    }

    #[test]
    fn shallow_recursion() {
        assert_eq!(count_down(64), 64);
    }

    #[test]
    fn recursion_deeper_than_a_default_thread_stack() {
        assert_eq!(count_down(200_000), 200_000);
    }

    #[test]
    fn reports_remaining_stack_on_native_targets() {
        if cfg!(not(target_arch = "wasm32")) {
            assert!(remaining_stack().is_some_and(|bytes| bytes > 0));
        }
    }
}
