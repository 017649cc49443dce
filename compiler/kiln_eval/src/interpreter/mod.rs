//! The evaluator and its embedding facade.
//!
//! [`Evaluator`] is the recursive walk: it holds no bindings of its own and
//! receives the environment explicitly on every call, so call frames are
//! plain `Environment` values created per call. [`Interpreter`] owns a root
//! environment and an evaluator and is what hosts embed.

mod builder;
mod definitions;
mod function_call;

use kiln_ir::Expr;
use kiln_patterns::errors::unknown_expression;
use kiln_patterns::{EvalError, EvalResult, NativeFunction, Value};
use kiln_stack::ensure_sufficient_stack;

use crate::{Environment, SharedPrintHandler};

pub use builder::InterpreterBuilder;

/// Tree-walking evaluator.
///
/// The only state is the current user-call depth and its optional limit.
#[derive(Debug, Default)]
pub struct Evaluator {
    depth: usize,
    max_call_depth: Option<usize>,
}

impl Evaluator {
    /// `None` leaves call depth unlimited; native stack growth still applies.
    pub fn new(max_call_depth: Option<usize>) -> Self {
        Evaluator {
            depth: 0,
            max_call_depth,
        }
    }

    /// Number of user function calls currently executing.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Evaluate one expression in `env`.
    pub fn eval(&mut self, env: &mut Environment, expr: &Expr) -> EvalResult {
        ensure_sufficient_stack(|| self.eval_inner(env, expr))
    }

    fn eval_inner(&mut self, env: &mut Environment, expr: &Expr) -> EvalResult {
        match expr {
            Expr::ClassDef(def) => definitions::define_class(env, def),
            Expr::FunctionDef(def) => definitions::define_function(env, def),
            Expr::Do(statements) => self.eval_do(env, statements),
            Expr::If {
                condition,
                then_branch,
                else_branch,
            } => {
                if self.eval(env, condition)?.is_truthy() {
                    self.eval(env, then_branch)
                } else {
                    self.eval(env, else_branch)
                }
            }
            Expr::Or(args) => self.eval_short_circuit(env, args, true),
            Expr::And(args) => self.eval_short_circuit(env, args, false),
            Expr::Call { callee, args } => {
                let callee = self.eval(env, callee)?;
                let args = self.eval_list(env, args)?;
                self.call_value(env, &callee, &args)
            }
            Expr::NamedCall(call) => self.eval_named_call(env, call),
            Expr::Ident(name) => env.get(name.as_str()),
            Expr::Nil => Ok(Value::Nil),
            Expr::Bool(b) => Ok(Value::Bool(*b)),
            Expr::Int(n) => Ok(Value::int(*n)),
            Expr::Float(f) => Ok(Value::Float(*f)),
            Expr::Str(s) => Ok(Value::string(s.as_str())),
            Expr::Array(elements) => Ok(Value::array(self.eval_list(env, elements)?)),
            Expr::Lambda(lambda) => definitions::make_lambda(env, lambda),
            Expr::Let { name, value, body } => {
                let value = self.eval(env, value)?;
                env.let_in(name.clone(), value, |env| self.eval(env, body))
            }
            Expr::Coroutine(_) => Err(unknown_expression(expr.kind_name())),
        }
    }

    fn eval_do(&mut self, env: &mut Environment, statements: &[Expr]) -> EvalResult {
        let mut last = Value::Nil;
        for statement in statements {
            last = self.eval(env, statement)?;
        }
        Ok(last)
    }

    /// `or` stops at the first truthy value, `and` at the first falsy one.
    /// Without a deciding value the last one is returned.
    fn eval_short_circuit(
        &mut self,
        env: &mut Environment,
        args: &[Expr],
        stop_when: bool,
    ) -> EvalResult {
        let mut last = Value::Nil;
        for arg in args {
            let value = self.eval(env, arg)?;
            if value.is_truthy() == stop_when {
                return Ok(value);
            }
            last = value;
        }
        Ok(last)
    }

    /// Evaluate expressions left to right, stopping at the first failure.
    fn eval_list(&mut self, env: &mut Environment, exprs: &[Expr]) -> Result<Vec<Value>, EvalError> {
        exprs.iter().map(|expr| self.eval(env, expr)).collect()
    }
}

/// An environment plus an evaluator: the unit a host embeds.
pub struct Interpreter {
    env: Environment,
    evaluator: Evaluator,
    print_handler: SharedPrintHandler,
}

impl Interpreter {
    /// Interpreter with the prelude, writing to stdout.
    pub fn new() -> Result<Self, EvalError> {
        InterpreterBuilder::new().build()
    }

    pub fn builder() -> InterpreterBuilder {
        InterpreterBuilder::new()
    }

    /// Evaluate one top-level form.
    pub fn eval(&mut self, expr: &Expr) -> EvalResult {
        self.evaluator.eval(&mut self.env, expr)
    }

    /// Evaluate top-level forms in order and return the last value.
    ///
    /// Stops at the first failing form; definitions made by earlier forms
    /// stay in place.
    pub fn eval_program(&mut self, forms: &[Expr]) -> EvalResult {
        let mut last = Value::Nil;
        for form in forms {
            last = self.eval(form)?;
        }
        Ok(last)
    }

    /// Call the global `name` with already-evaluated arguments.
    pub fn call(&mut self, name: &str, args: &[Value]) -> EvalResult {
        let callee = self.env.get(name)?;
        self.evaluator.call_value(&self.env, &callee, args)
    }

    /// Install a host function as a global under its own name.
    pub fn register_native(&mut self, native: NativeFunction) -> Result<(), EvalError> {
        self.env
            .define_global(native.name().clone(), Value::Native(native))
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn env_mut(&mut self) -> &mut Environment {
        &mut self.env
    }

    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print_handler
    }
}
