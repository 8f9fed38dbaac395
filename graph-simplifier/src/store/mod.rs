//! Preference storage
//!
//! A small namespaced key-value store holding the tolerance preference.
//! Writers are last-write-wins; there is no compare-and-swap.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Namespace the graph settings live under
pub const DEFAULT_NAMESPACE: &str = "GraphSettings";

/// Namespaced bool/float key-value store
pub trait PreferenceStore: Send + Sync {
    /// Namespace this store is scoped to
    fn namespace(&self) -> &str;

    /// Read a bool, `None` if the key has never been written
    fn get_bool(&self, key: &str) -> crate::Result<Option<bool>>;

    /// Read a float, `None` if the key has never been written
    fn get_float(&self, key: &str) -> crate::Result<Option<f64>>;

    fn set_bool(&self, key: &str, value: bool) -> crate::Result<()>;

    fn set_float(&self, key: &str, value: f64) -> crate::Result<()>;
}

/// Reject namespaces that cannot be used as a file stem.
pub(crate) fn validate_namespace(namespace: &str) -> crate::Result<()> {
    if namespace.trim().is_empty() {
        return Err(crate::Error::Store("namespace must not be empty".to_string()));
    }
    if namespace.contains("..")
        || namespace
            .chars()
            .any(|c| c.is_control() || c == '/' || c == '\\')
    {
        return Err(crate::Error::Store(format!(
            "invalid namespace '{}'",
            namespace
        )));
    }
    Ok(())
}
