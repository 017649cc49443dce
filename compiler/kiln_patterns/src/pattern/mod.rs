//! Argument patterns.
//!
//! A pattern tests a call's argument list and, on success, produces the
//! name→value bindings the implementation body runs with.
//!
//! ```text
//! (x y z)         FullUntyped: at least 3 arguments
//! (& xs)          FullUntyped: anything, all collected in xs
//! (x y & rest)    FullUntyped: at least 2 arguments
//! (x:Array f)     Arguments: VariableTyped, Variable
//! (0) / ("a")     Arguments: Constant
//! ([a b] f)       Arguments: ArrayDestructure, Variable
//! ```
//!
//! Slots are checked left to right and the first failing slot aborts the
//! match with its own error.

use kiln_ir::Name;
use rustc_hash::FxHashMap;

use crate::errors::{
    constant_mismatch, expected_array, missing_arguments, not_enough_arguments, type_mismatch,
};
use crate::value::Value;
use crate::EvalError;

/// Bindings produced by a successful match.
pub type Bindings = FxHashMap<Name, Value>;

/// Top-level pattern of one overload.
#[derive(Clone, Debug)]
pub enum Pattern {
    /// Positional names with no per-slot checks.
    FullUntyped(FullUntyped),
    /// Per-slot argument patterns.
    Arguments(ArgumentsPattern),
}

/// Untyped, arity-flexible pattern used by ordinary function definitions
/// and class constructors.
#[derive(Clone, Debug)]
pub struct FullUntyped {
    pub positional: Vec<Name>,
    /// Collects the arguments after the positionals. Without it, extra
    /// arguments are ignored.
    pub variadic: Option<Name>,
}

/// Ordered list of per-slot argument patterns.
#[derive(Clone, Debug)]
pub struct ArgumentsPattern {
    pub arguments: Vec<Argument>,
    pub variadic: Option<Name>,
}

/// Pattern for a single argument slot.
#[derive(Clone, Debug)]
pub enum Argument {
    /// Matches a value equal to this one under [`Value::constant_equals`].
    Constant(Value),
    /// Matches anything.
    Variable(Name),
    /// Matches values whose [`Value::type_name`] is `type_name`.
    VariableTyped { name: Name, type_name: Name },
    /// Binds the whole value under `name`.
    ///
    /// `binding` describes an inner destructuring of the same value. It is
    /// kept on the pattern but not consulted when matching.
    VariableBinding {
        name: Name,
        binding: ArgumentsPattern,
    },
    /// Matches an array whose elements match the nested pattern.
    ArrayDestructure(ArgumentsPattern),
}

impl Pattern {
    /// `(a b c)`
    pub fn untyped(positional: Vec<Name>) -> Self {
        Pattern::FullUntyped(FullUntyped {
            positional,
            variadic: None,
        })
    }

    /// `(a b & rest)`
    pub fn variadic(positional: Vec<Name>, rest: Name) -> Self {
        Pattern::FullUntyped(FullUntyped {
            positional,
            variadic: Some(rest),
        })
    }

    /// Per-slot pattern without a variadic tail.
    pub fn arguments(arguments: Vec<Argument>) -> Self {
        Pattern::Arguments(ArgumentsPattern::new(arguments))
    }

    /// Match an argument list.
    pub fn matches(&self, args: &[Value]) -> Result<Bindings, EvalError> {
        match self {
            Pattern::FullUntyped(untyped) => untyped.matches(args),
            Pattern::Arguments(arguments) => arguments.matches(args),
        }
    }
}

impl FullUntyped {
    pub fn matches(&self, args: &[Value]) -> Result<Bindings, EvalError> {
        if args.len() < self.positional.len() {
            return Err(missing_arguments(&self.positional[args.len()..]));
        }

        let mut bindings =
            FxHashMap::with_capacity_and_hasher(self.positional.len() + 1, Default::default());
        for (name, value) in self.positional.iter().zip(args) {
            bindings.insert(name.clone(), value.clone());
        }
        if let Some(rest) = &self.variadic {
            bindings.insert(
                rest.clone(),
                Value::array(args[self.positional.len()..].to_vec()),
            );
        }
        Ok(bindings)
    }
}

impl ArgumentsPattern {
    pub fn new(arguments: Vec<Argument>) -> Self {
        ArgumentsPattern {
            arguments,
            variadic: None,
        }
    }

    /// Collect the arguments after the last slot under `rest`.
    #[must_use]
    pub fn with_variadic(mut self, rest: impl Into<Name>) -> Self {
        self.variadic = Some(rest.into());
        self
    }

    pub fn matches(&self, values: &[Value]) -> Result<Bindings, EvalError> {
        let mut bindings = Bindings::default();
        self.match_into(values, &mut bindings)?;
        Ok(bindings)
    }

    /// Match `values`, adding bindings to `bindings`.
    ///
    /// On failure `bindings` may hold the bindings of the slots that matched
    /// before the failing one.
    pub fn match_into(&self, values: &[Value], bindings: &mut Bindings) -> Result<(), EvalError> {
        if values.len() < self.arguments.len() {
            return Err(not_enough_arguments(self.arguments.len(), values.len()));
        }

        for (argument, value) in self.arguments.iter().zip(values) {
            argument.match_value(value, bindings)?;
        }

        if let Some(rest) = &self.variadic {
            bindings.insert(
                rest.clone(),
                Value::array(values[self.arguments.len()..].to_vec()),
            );
        }
        Ok(())
    }
}

impl Argument {
    pub fn constant(value: Value) -> Self {
        Argument::Constant(value)
    }

    pub fn variable(name: impl Into<Name>) -> Self {
        Argument::Variable(name.into())
    }

    pub fn typed(name: impl Into<Name>, type_name: impl Into<Name>) -> Self {
        Argument::VariableTyped {
            name: name.into(),
            type_name: type_name.into(),
        }
    }

    pub fn binding(name: impl Into<Name>, binding: ArgumentsPattern) -> Self {
        Argument::VariableBinding {
            name: name.into(),
            binding,
        }
    }

    pub fn array(elements: Vec<Argument>) -> Self {
        Argument::ArrayDestructure(ArgumentsPattern::new(elements))
    }

    /// Match one argument value.
    pub fn match_value(&self, value: &Value, bindings: &mut Bindings) -> Result<(), EvalError> {
        match self {
            Argument::Constant(expected) => {
                if !expected.constant_equals(value) {
                    return Err(constant_mismatch(expected, value));
                }
            }
            Argument::Variable(name) | Argument::VariableBinding { name, .. } => {
                bindings.insert(name.clone(), value.clone());
            }
            Argument::VariableTyped { name, type_name } => {
                if value.type_name() != type_name.as_str() {
                    return Err(type_mismatch(type_name.as_str(), value.type_name()));
                }
                bindings.insert(name.clone(), value.clone());
            }
            Argument::ArrayDestructure(elements) => {
                let Some(items) = value.as_array() else {
                    return Err(expected_array(value));
                };
                elements.match_into(items, bindings)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
