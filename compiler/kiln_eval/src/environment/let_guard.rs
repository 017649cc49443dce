//! RAII scoping for `let` bindings.
//!
//! The guard installs a local binding when created and restores whatever it
//! replaced when dropped, so an early `?` return or a panic unwinding through
//! the body cannot leak the binding.
//!
//! ```text
//! {
//!     let mut scoped = LetGuard::new(env, x, value);
//!     evaluator.eval(&mut scoped, body)?;
//! } // previous `x` (or no `x`) restored here
//! ```

use std::ops::{Deref, DerefMut};

use kiln_ir::Name;
use kiln_patterns::Value;

use super::Environment;

/// Access the environment through this guard; it implements `Deref` and
/// `DerefMut`.
pub struct LetGuard<'env> {
    env: &'env mut Environment,
    name: Name,
    prior: Option<Value>,
}

impl<'env> LetGuard<'env> {
    /// Bind `name` to `value` in the current frame until the guard drops.
    pub fn new(env: &'env mut Environment, name: Name, value: Value) -> Self {
        let prior = env.replace_local(name.clone(), value);
        LetGuard { env, name, prior }
    }
}

impl Drop for LetGuard<'_> {
    fn drop(&mut self) {
        let prior = self.prior.take();
        tracing::trace!(
            name = %self.name,
            restored = prior.is_some(),
            "let binding released"
        );
        self.env.restore_local(&self.name, prior);
    }
}

impl Deref for LetGuard<'_> {
    type Target = Environment;

    fn deref(&self) -> &Self::Target {
        self.env
    }
}

impl DerefMut for LetGuard<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.env
    }
}
