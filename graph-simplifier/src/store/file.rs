//! TOML-backed preference store
//!
//! Each namespace is one flat TOML table at `<directory>/<namespace>.toml`.
//! Every write re-reads the file, updates one key and rewrites the whole
//! table, so concurrent processes race with last-write-wins semantics.

use super::{validate_namespace, PreferenceStore, DEFAULT_NAMESPACE};
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use toml::{Table, Value};

/// File-backed store, one file per namespace
#[derive(Debug)]
pub struct FileStore {
    namespace: String,
    path: PathBuf,
    /// Serializes read-modify-write cycles inside this process
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Open the default namespace under `directory`
    pub fn new(directory: &Path) -> crate::Result<Self> {
        Self::with_namespace(directory, DEFAULT_NAMESPACE)
    }

    /// Open `namespace` under `directory`. The file is created on first write.
    pub fn with_namespace(directory: &Path, namespace: &str) -> crate::Result<Self> {
        validate_namespace(namespace)?;
        Ok(Self {
            namespace: namespace.to_string(),
            path: directory.join(format!("{}.toml", namespace)),
            write_lock: Mutex::new(()),
        })
    }

    /// Open `namespace` in the default settings directory
    pub fn open_default(namespace: &str) -> crate::Result<Self> {
        Self::with_namespace(&Self::default_directory(), namespace)
    }

    /// Get default settings directory
    pub fn default_directory() -> PathBuf {
        dirs::home_dir()
            .map(|h| h.join(".graph_simplifier"))
            .unwrap_or_else(|| PathBuf::from(".graph_simplifier"))
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_table(&self) -> crate::Result<Table> {
        if !self.path.exists() {
            return Ok(Table::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        content
            .parse::<Table>()
            .map_err(|e| crate::Error::Store(format!("{}: {}", self.path.display(), e)))
    }

    fn write_value(&self, key: &str, value: Value) -> crate::Result<()> {
        let _guard = self.write_lock.lock();

        let mut table = self.read_table()?;
        table.insert(key.to_string(), value);

        let content = toml::to_string_pretty(&table).map_err(|e| crate::Error::Store(e.to_string()))?;

        // Create parent directories
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

impl PreferenceStore for FileStore {
    fn namespace(&self) -> &str {
        &self.namespace
    }

    fn get_bool(&self, key: &str) -> crate::Result<Option<bool>> {
        match self.read_table()?.get(key) {
            Some(Value::Boolean(b)) => Ok(Some(*b)),
            Some(other) => {
                tracing::warn!(key, found = other.type_str(), path = %self.path.display(), "Expected bool, ignoring");
                Ok(None)
            }
            None => Ok(None),
        }
    }

    fn get_float(&self, key: &str) -> crate::Result<Option<f64>> {
        match self.read_table()?.get(key) {
            Some(Value::Float(f)) => Ok(Some(*f)),
            // Hand-edited files may drop the decimal point
            Some(Value::Integer(i)) => Ok(Some(*i as f64)),
            Some(other) => {
                tracing::warn!(key, found = other.type_str(), path = %self.path.display(), "Expected float, ignoring");
                Ok(None)
            }
            None => Ok(None),
        }
    }

    fn set_bool(&self, key: &str, value: bool) -> crate::Result<()> {
        self.write_value(key, Value::Boolean(value))
    }

    fn set_float(&self, key: &str, value: f64) -> crate::Result<()> {
        self.write_value(key, Value::Float(value))
    }
}
