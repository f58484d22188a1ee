//! Component instances
//!
//! The runtime only ever touches a component through [`ComponentInstance`]:
//! reading a field or invoking a method by the name the compiler resolved.

use indexmap::IndexMap;
use std::collections::HashMap;

use super::value::Value;
use super::RuntimeError;
use crate::metadata::{ComponentMetadata, MemberKind};

pub trait ComponentInstance {
    fn read(&self, field: &str) -> Result<Value, RuntimeError>;
    fn invoke(&mut self, method: &str, args: &[Value]) -> Result<Value, RuntimeError>;
}

/// Method body of a [`DynamicComponent`]: receives the component's fields and
/// the call arguments.
pub type MethodFn = Box<dyn FnMut(&mut IndexMap<String, Value>, &[Value]) -> Value>;

/// A component assembled at runtime from a field map and method closures.
#[derive(Default)]
pub struct DynamicComponent {
    fields: IndexMap<String, Value>,
    methods: HashMap<String, MethodFn>,
}

impl DynamicComponent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fields from the metadata, set to their declared initial value or
    /// `undefined`. Methods still have to be registered.
    pub fn from_metadata(metadata: &ComponentMetadata) -> Self {
        let fields = metadata
            .members
            .iter()
            .filter(|member| member.kind == MemberKind::Field)
            .map(|member| {
                let value = member.initial.as_ref().map(Value::from).unwrap_or_default();
                (member.name.clone(), value)
            })
            .collect();
        DynamicComponent {
            fields,
            methods: HashMap::new(),
        }
    }

    pub fn with_field(mut self, name: &str, value: Value) -> Self {
        self.fields.insert(name.to_string(), value);
        self
    }

    pub fn with_method<F>(mut self, name: &str, body: F) -> Self
    where
        F: FnMut(&mut IndexMap<String, Value>, &[Value]) -> Value + 'static,
    {
        self.methods.insert(name.to_string(), Box::new(body));
        self
    }

    pub fn set_field(&mut self, name: &str, value: Value) {
        self.fields.insert(name.to_string(), value);
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

impl ComponentInstance for DynamicComponent {
    fn read(&self, field: &str) -> Result<Value, RuntimeError> {
        self.fields
            .get(field)
            .cloned()
            .ok_or_else(|| RuntimeError::UnknownField(field.to_string()))
    }

    fn invoke(&mut self, method: &str, args: &[Value]) -> Result<Value, RuntimeError> {
        let body = self
            .methods
            .get_mut(method)
            .ok_or_else(|| RuntimeError::UnknownMethod(method.to_string()))?;
        Ok(body(&mut self.fields, args))
    }
}
