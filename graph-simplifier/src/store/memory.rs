//! In-memory preference store
//!
//! Shared between threads behind a `parking_lot::RwLock`. Used by tests and
//! by callers that persist settings elsewhere.

use super::{validate_namespace, PreferenceStore, DEFAULT_NAMESPACE};
use parking_lot::RwLock;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq)]
enum StoredValue {
    Bool(bool),
    Float(f64),
}

/// Thread-safe in-memory store
#[derive(Debug)]
pub struct MemoryStore {
    namespace: String,
    values: RwLock<HashMap<String, StoredValue>>,
}

impl MemoryStore {
    /// Create an empty store in the default namespace
    pub fn new() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            values: RwLock::new(HashMap::new()),
        }
    }

    /// Create an empty store in a custom namespace
    pub fn with_namespace(namespace: &str) -> crate::Result<Self> {
        validate_namespace(namespace)?;
        Ok(Self {
            namespace: namespace.to_string(),
            values: RwLock::new(HashMap::new()),
        })
    }

    /// Number of keys written so far
    pub fn len(&self) -> usize {
        self.values.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.read().is_empty()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PreferenceStore for MemoryStore {
    fn namespace(&self) -> &str {
        &self.namespace
    }

    fn get_bool(&self, key: &str) -> crate::Result<Option<bool>> {
        match self.values.read().get(key) {
            Some(StoredValue::Bool(b)) => Ok(Some(*b)),
            Some(StoredValue::Float(_)) => {
                tracing::warn!(key, namespace = %self.namespace, "Stored value is not a bool, ignoring");
                Ok(None)
            }
            None => Ok(None),
        }
    }

    fn get_float(&self, key: &str) -> crate::Result<Option<f64>> {
        match self.values.read().get(key) {
            Some(StoredValue::Float(f)) => Ok(Some(*f)),
            Some(StoredValue::Bool(_)) => {
                tracing::warn!(key, namespace = %self.namespace, "Stored value is not a float, ignoring");
                Ok(None)
            }
            None => Ok(None),
        }
    }

    fn set_bool(&self, key: &str, value: bool) -> crate::Result<()> {
        self.values
            .write()
            .insert(key.to_string(), StoredValue::Bool(value));
        Ok(())
    }

    fn set_float(&self, key: &str, value: f64) -> crate::Result<()> {
        self.values
            .write()
            .insert(key.to_string(), StoredValue::Float(value));
        Ok(())
    }
}
