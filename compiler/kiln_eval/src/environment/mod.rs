//! Variable environment.
//!
//! Two maps: `globals`, shared by every environment derived from the same
//! root, and `locals`, private to one call frame. Function calls do not push
//! onto a scope stack; they get a brand-new frame from [`Environment::new_scope_from`]
//! that sees the same globals and nothing of the caller's locals.
//!
//! `let` is the only way to shadow a local. It is scoped by [`LetGuard`],
//! which puts the previous binding back when dropped.

mod let_guard;

use std::cell::RefCell;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use kiln_ir::Name;
use kiln_patterns::errors::{already_defined, undefined_variable};
use kiln_patterns::{EvalError, EvalResult, Value};
use rustc_hash::FxHashMap;

pub use let_guard::LetGuard;

/// A single-threaded, shared, interior-mutable cell.
///
/// Wraps `Rc<RefCell<T>>` so that the globals table is only ever allocated
/// through [`LocalScope::new`]. Not `Send`: an environment and everything
/// derived from it stay on one thread.
#[repr(transparent)]
pub struct LocalScope<T>(Rc<RefCell<T>>);

impl<T> LocalScope<T> {
    #[inline]
    pub fn new(value: T) -> Self {
        LocalScope(Rc::new(RefCell::new(value)))
    }

    #[inline]
    pub fn borrow(&self) -> std::cell::Ref<'_, T> {
        self.0.borrow()
    }

    #[inline]
    pub fn borrow_mut(&self) -> std::cell::RefMut<'_, T> {
        self.0.borrow_mut()
    }

    /// Whether both handles share one cell.
    #[inline]
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }
}

impl<T> Clone for LocalScope<T> {
    #[inline]
    fn clone(&self) -> Self {
        LocalScope(Rc::clone(&self.0))
    }
}

impl<T: fmt::Debug> fmt::Debug for LocalScope<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LocalScope").field(&self.0).finish()
    }
}

impl<T: Default> Default for LocalScope<T> {
    fn default() -> Self {
        LocalScope::new(T::default())
    }
}

impl<T> Deref for LocalScope<T> {
    type Target = RefCell<T>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

type Bindings = FxHashMap<Name, Value>;

/// Globals plus one local frame.
///
/// No `RefCell` borrow of the globals outlives a single method call, so user
/// code evaluated in between can always define new globals.
#[derive(Debug, Default)]
pub struct Environment {
    globals: LocalScope<Bindings>,
    locals: Bindings,
}

impl Environment {
    /// A root environment with empty globals.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh local frame sharing this environment's globals.
    #[must_use]
    pub fn new_scope(&self) -> Self {
        self.new_scope_from(FxHashMap::default())
    }

    /// Local frame pre-populated with `locals`, sharing this environment's
    /// globals.
    #[must_use]
    pub fn new_scope_from(&self, locals: FxHashMap<Name, Value>) -> Self {
        Environment {
            globals: self.globals.clone(),
            locals,
        }
    }

    /// Fails if `name` is already a global.
    pub fn define_global(&mut self, name: Name, value: Value) -> Result<(), EvalError> {
        let mut globals = self.globals.borrow_mut();
        if globals.contains_key(&name) {
            return Err(already_defined(name.as_str()));
        }
        globals.insert(name, value);
        Ok(())
    }

    /// Overwrite an existing global.
    pub fn set_global(&mut self, name: &str, value: Value) -> Result<(), EvalError> {
        match self.globals.borrow_mut().get_mut(name) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(undefined_variable(name)),
        }
    }

    /// Fails if `name` is already bound in the current frame.
    pub fn define_local(&mut self, name: Name, value: Value) -> Result<(), EvalError> {
        if self.locals.contains_key(&name) {
            return Err(already_defined(name.as_str()));
        }
        self.locals.insert(name, value);
        Ok(())
    }

    /// Assign to the nearest existing binding: the local frame, then globals.
    pub fn set(&mut self, name: &str, value: Value) -> Result<(), EvalError> {
        if let Some(slot) = self.locals.get_mut(name) {
            *slot = value;
            return Ok(());
        }
        self.set_global(name, value)
    }

    /// Read a variable: the local frame, then globals.
    pub fn get(&self, name: &str) -> EvalResult {
        self.lookup(name).ok_or_else(|| undefined_variable(name))
    }

    #[inline]
    pub fn lookup(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.locals.get(name) {
            return Some(value.clone());
        }
        self.global(name)
    }

    /// Read a global, ignoring any local of the same name.
    pub fn global(&self, name: &str) -> Option<Value> {
        self.globals.borrow().get(name).cloned()
    }

    pub fn is_global(&self, name: &str) -> bool {
        self.globals.borrow().contains_key(name)
    }

    /// Number of bindings in the current frame.
    pub fn local_len(&self) -> usize {
        self.locals.len()
    }

    /// Whether both environments see the same globals.
    pub fn shares_globals(&self, other: &Environment) -> bool {
        LocalScope::ptr_eq(&self.globals, &other.globals)
    }

    /// Snapshot of the current frame, for lambdas created in it.
    pub fn capture(&self) -> FxHashMap<Name, Value> {
        self.locals.clone()
    }

    /// Run `body` with `name` bound to `value` in the current frame.
    ///
    /// Whatever `name` was bound to before (or its absence) is restored when
    /// `body` returns, fails or unwinds.
    pub fn let_in<R>(
        &mut self,
        name: Name,
        value: Value,
        body: impl FnOnce(&mut Environment) -> R,
    ) -> R {
        let mut guard = LetGuard::new(self, name, value);
        body(&mut *guard)
    }

    /// Install a binding, returning the one it replaced. Only for [`LetGuard`].
    fn replace_local(&mut self, name: Name, value: Value) -> Option<Value> {
        self.locals.insert(name, value)
    }

    /// Undo [`Environment::replace_local`].
    fn restore_local(&mut self, name: &Name, prior: Option<Value>) {
        match prior {
            Some(value) => {
                self.locals.insert(name.clone(), value);
            }
            None => {
                self.locals.remove(name);
            }
        }
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
