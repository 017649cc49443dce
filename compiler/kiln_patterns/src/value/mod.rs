//! Runtime values for the Kiln interpreter.
//!
//! [`Value`] is a closed sum type: every consumer matches it exhaustively, so
//! questions like "is this callable?" or "what is its type name?" are total
//! functions over the variant set.
//!
//! Heap-backed variants are constructed through factory methods
//! (`Value::string`, `Value::array`, `FunctionValue::new`, ...); see
//! [`Heap`].
//!
//! # Mutability
//!
//! Values are immutable once built, with two exceptions that are shared by
//! reference: class instance fields ([`ClassInstance::set`]) and the
//! append-only overload list of a [`FunctionValue`].

mod class;
mod function;
mod heap;
mod native;

use std::fmt;

pub use class::{ClassInfo, ClassInstance, SharedClassInfo};
pub use function::{Callable, FunctionValue, Overload, UserFunction};
pub use heap::Heap;
pub use native::{NativeFn, NativeFunction};

/// Runtime value.
#[derive(Clone)]
pub enum Value {
    Nil,
    Bool(bool),
    Int(i64),
    Float(f64),
    /// Owned text.
    Str(Heap<String>),
    /// Ordered sequence of values.
    Array(Heap<Vec<Value>>),
    /// User-visible overload set.
    Function(FunctionValue),
    /// Host-provided callable.
    Native(NativeFunction),
    /// Class instance.
    Instance(ClassInstance),
}

// Factory Methods

impl Value {
    #[inline]
    pub fn int(n: i64) -> Self {
        Value::Int(n)
    }

    /// Create a string value.
    ///
    /// ```text
    /// let s = Value::string("hello");
    /// let s2 = Value::string(format!("{n} items"));
    /// ```
    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(Heap::new(s.into()))
    }

    /// Create an array value.
    #[inline]
    pub fn array(items: Vec<Value>) -> Self {
        Value::Array(Heap::new(items))
    }
}

// Value Methods

impl Value {
    /// Boolean coercion used by `if`, `and` and `or`.
    ///
    /// `nil`, `false`, `0` and `0.0` are falsy. Everything else, including
    /// the empty string and the empty array, is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Nil => false,
            Value::Bool(b) => *b,
            Value::Int(n) => *n != 0,
            Value::Float(f) => *f != 0.0,
            Value::Str(_)
            | Value::Array(_)
            | Value::Function(_)
            | Value::Native(_)
            | Value::Instance(_) => true,
        }
    }

    /// Type name used by typed patterns and error messages.
    ///
    /// Instances report their class name.
    pub fn type_name(&self) -> &str {
        match self {
            Value::Nil => "Nil",
            Value::Bool(_) => "Bool",
            Value::Int(_) => "Int",
            Value::Float(_) => "Float",
            Value::Str(_) => "String",
            Value::Array(_) => "Array",
            Value::Function(_) => "Function",
            Value::Native(_) => "Native Function",
            Value::Instance(instance) => instance.class_name().as_str(),
        }
    }

    /// Display form, as produced by `str` and `print`.
    pub fn display_value(&self) -> String {
        match self {
            Value::Nil => "nil".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Int(n) => n.to_string(),
            Value::Float(f) => f.to_string(),
            Value::Str(s) => s.to_string(),
            Value::Array(items) => {
                let inner: Vec<_> = items.iter().map(Value::display_value).collect();
                format!("[{}]", inner.join(" "))
            }
            Value::Function(_) => "(fun ...)".to_string(),
            Value::Native(_) => ":native code:".to_string(),
            Value::Instance(instance) => instance.display_value(),
        }
    }

    /// Same-variant structural equality, as used by constant patterns.
    ///
    /// There is no numeric coercion: `Int(1)` never equals `Float(1.0)`.
    /// Floats compare exactly, with IEEE semantics (`inf` equals `inf`,
    /// `NaN` equals nothing). Arrays compare element-wise; functions, natives and instances compare
    /// by identity.
    pub fn constant_equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => {
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x.constant_equals(y))
            }
            (Value::Function(a), Value::Function(b)) => a.same_function(b),
            (Value::Native(a), Value::Native(b)) => a.same_function(b),
            (Value::Instance(a), Value::Instance(b)) => a.same_instance(b),
            _ => false,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    pub fn as_instance(&self) -> Option<&ClassInstance> {
        match self {
            Value::Instance(instance) => Some(instance),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.constant_equals(other)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_value())
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "Nil"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Int(n) => write!(f, "Int({n})"),
            Value::Float(x) => write!(f, "Float({x})"),
            Value::Str(s) => write!(f, "Str({:?})", s.as_str()),
            Value::Array(items) => f.debug_tuple("Array").field(&&items[..]).finish(),
            Value::Function(func) => write!(f, "Function({})", func.name()),
            Value::Native(native) => write!(f, "Native({})", native.name()),
            Value::Instance(instance) => write!(f, "Instance({})", instance.display_value()),
        }
    }
}
