//! Flat variable storage for one interpreter session.
//!
//! There is exactly one scope. Assignments overwrite, nothing shadows, and
//! names are case-sensitive. Bindings keep their first-insertion order so
//! listings (debugger variables, traces) are stable.

use indexmap::IndexMap;

use crate::value::Value;

/// Names starting with this prefix are reported as globals by the debugger.
pub const GLOBAL_PREFIX: &str = "__";

/// The single, session-wide variable scope.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Environment {
    bindings: IndexMap<String, Value>,
}

impl Environment {
    /// Create an empty environment.
    pub fn new() -> Self {
        Environment {
            bindings: IndexMap::new(),
        }
    }

    /// Bind `name` to `value`, returning the previous value if any.
    pub fn define(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        self.bindings.insert(name.into(), value)
    }

    /// Look up a variable by name.
    pub fn lookup(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// Remove a binding, keeping the order of the remaining ones.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.bindings.shift_remove(name)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn clear(&mut self) {
        self.bindings.clear();
    }

    /// All bindings in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.bindings.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Bindings whose name does not carry the global prefix.
    pub fn locals(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.iter().filter(|(name, _)| !name.starts_with(GLOBAL_PREFIX))
    }

    /// Bindings whose name carries the global prefix.
    pub fn globals(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.iter().filter(|(name, _)| name.starts_with(GLOBAL_PREFIX))
    }
}

#[cfg(test)]
mod tests;
