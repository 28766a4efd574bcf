use std::collections::HashMap;

use crate::{error::RuntimeError, interpreter::value::core::Value};

/// The single namespace of a program run.
///
/// Knight has no nested scopes: every assignment anywhere in a program binds
/// the name here. Each run owns its own environment, so independent runs never
/// observe each other's variables.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    variables: HashMap<String, Value>,
}

impl Environment {
    /// Creates an environment with no variables.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value bound to `name`.
    ///
    /// # Errors
    /// Returns `RuntimeError::UndefinedVariable` if `name` was never assigned.
    ///
    /// # Example
    /// ```
    /// use knight::interpreter::{environment::Environment, value::core::Value};
    ///
    /// let mut env = Environment::new();
    /// env.assign("n", Value::Integer(5));
    ///
    /// assert_eq!(env.lookup("n").unwrap(), &Value::Integer(5));
    /// assert!(env.lookup("m").is_err());
    /// ```
    pub fn lookup(&self, name: &str) -> Result<&Value, RuntimeError> {
        self.variables
            .get(name)
            .ok_or_else(|| RuntimeError::UndefinedVariable { name: name.to_string() })
    }

    /// Binds `name` to `value`, replacing any previous binding.
    pub fn assign(&mut self, name: &str, value: Value) {
        if let Some(slot) = self.variables.get_mut(name) {
            *slot = value;
        } else {
            self.variables.insert(name.to_string(), value);
        }
    }

    /// Returns `true` if `name` is bound.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }
}
