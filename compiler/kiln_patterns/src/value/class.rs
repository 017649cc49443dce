//! Classes and their instances.
//!
//! A class is a field layout plus a method table, fixed at definition time.
//! Field names are resolved to slot indices once, in [`ClassInfo::new`];
//! instances store a plain slot vector and share the `ClassInfo`.

use std::fmt;

use kiln_ir::{FunctionDef, Name};
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use super::{Callable, FunctionValue, Heap, NativeFunction, UserFunction, Value};
use crate::errors::{
    arity_mismatch, duplicate_field, field_method_collision, no_such_field, no_such_method,
};
use crate::pattern::Pattern;
use crate::{EvalError, EvalResult};

/// Class metadata shared by every instance.
pub type SharedClassInfo = Heap<ClassInfo>;

/// Immutable class metadata: name, field slots and methods.
#[derive(Debug)]
pub struct ClassInfo {
    name: Name,
    /// Field names in declaration (slot) order.
    field_names: Vec<Name>,
    field_indices: FxHashMap<Name, usize>,
    methods: FxHashMap<Name, FunctionValue>,
}

impl ClassInfo {
    /// Build class metadata.
    ///
    /// Fails on a repeated field name, on a method named like a field, and on
    /// repeated parameter names within a method. Methods sharing a name
    /// become overloads of one method, in declaration order.
    pub fn new(
        name: Name,
        fields: &[Name],
        methods: &[FunctionDef],
    ) -> Result<SharedClassInfo, EvalError> {
        let mut field_indices = FxHashMap::default();
        for (index, field) in fields.iter().enumerate() {
            if field_indices.insert(field.clone(), index).is_some() {
                return Err(duplicate_field(name.as_str(), field.as_str()));
            }
        }

        let mut method_table: FxHashMap<Name, FunctionValue> = FxHashMap::default();
        for def in methods {
            if field_indices.contains_key(&def.name) {
                return Err(field_method_collision(name.as_str(), def.name.as_str()));
            }
            let body = UserFunction::new(def.params.clone(), def.body.clone())?;
            method_table
                .entry(def.name.clone())
                .or_insert_with(|| FunctionValue::new(def.name.clone()))
                .define(
                    Pattern::untyped(def.params.clone()),
                    Callable::User(body),
                );
        }

        Ok(Heap::new(ClassInfo {
            name,
            field_names: fields.to_vec(),
            field_indices,
            methods: method_table,
        }))
    }

    /// Create an instance from field values in declaration order.
    pub fn make_instance(info: &SharedClassInfo, values: Vec<Value>) -> EvalResult {
        if values.len() != info.field_count() {
            return Err(arity_mismatch(
                info.name.as_str(),
                info.field_count(),
                values.len(),
            ));
        }
        Ok(Value::Instance(ClassInstance {
            info: info.clone(),
            fields: Heap::new(RwLock::new(values)),
        }))
    }

    /// The constructor registered under the class name.
    pub fn constructor(info: &SharedClassInfo) -> NativeFunction {
        let class = info.clone();
        NativeFunction::new(info.name.clone(), move |args: &[Value]| {
            ClassInfo::make_instance(&class, args.to_vec())
        })
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn field_count(&self) -> usize {
        self.field_names.len()
    }

    pub fn field_names(&self) -> &[Name] {
        &self.field_names
    }

    pub fn field_index(&self, field: &str) -> Option<usize> {
        self.field_indices.get(field).copied()
    }

    pub fn method(&self, name: &str) -> Option<&FunctionValue> {
        self.methods.get(name)
    }
}

/// A class instance.
///
/// Cloning shares the field storage: a `set` through one handle is seen by
/// all of them.
#[derive(Clone)]
pub struct ClassInstance {
    info: SharedClassInfo,
    fields: Heap<RwLock<Vec<Value>>>,
}

impl ClassInstance {
    pub fn info(&self) -> &SharedClassInfo {
        &self.info
    }

    pub fn class_name(&self) -> &Name {
        &self.info.name
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.info.field_index(field).is_some()
    }

    pub fn get(&self, field: &str) -> EvalResult {
        let index = self.slot(field)?;
        Ok(self.fields.read()[index].clone())
    }

    /// Overwrite a field in place.
    pub fn set(&self, field: &str, value: Value) -> Result<(), EvalError> {
        let index = self.slot(field)?;
        self.fields.write()[index] = value;
        Ok(())
    }

    /// The method's overload set. Callers pass the instance as the first
    /// argument.
    pub fn method(&self, name: &str) -> Result<FunctionValue, EvalError> {
        self.info
            .method(name)
            .cloned()
            .ok_or_else(|| no_such_method(self.info.name.as_str(), name))
    }

    /// Snapshot of the field values in slot order.
    pub fn field_values(&self) -> Vec<Value> {
        self.fields.read().clone()
    }

    /// `(ClassName field1 field2 ...)`
    pub fn display_value(&self) -> String {
        let fields = self.fields.read();
        let mut out = format!("({}", self.info.name);
        for value in fields.iter() {
            out.push(' ');
            out.push_str(&value.display_value());
        }
        out.push(')');
        out
    }

    /// Identity comparison.
    pub fn same_instance(&self, other: &ClassInstance) -> bool {
        Heap::ptr_eq(&self.fields, &other.fields)
    }

    fn slot(&self, field: &str) -> Result<usize, EvalError> {
        self.info
            .field_index(field)
            .ok_or_else(|| no_such_field(self.info.name.as_str(), field))
    }
}

impl fmt::Debug for ClassInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassInstance")
            .field("class", &self.info.name)
            .field("fields", &*self.fields.read())
            .finish()
    }
}
