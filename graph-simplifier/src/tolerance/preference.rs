//! Tolerance preference record
//!
//! Two values persisted under the graph settings namespace: whether a human
//! picked the epsilon, and the last epsilon (picked or computed).

use crate::store::PreferenceStore;
use serde::{Deserialize, Serialize};

/// Store key for the manual flag
pub const MANUAL_KEY: &str = "dp_epsilon_manual";

/// Store key for the epsilon value
pub const VALUE_KEY: &str = "dp_epsilon";

/// Value of a preference that has never been set or computed
pub const UNSET_EPSILON: f64 = 0.0;

/// Persisted epsilon preference
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TolerancePreference {
    /// True once a human has explicitly set `value`
    pub manual: bool,
    /// Last epsilon, user-set or machine-computed
    pub value: f64,
}

impl TolerancePreference {
    /// A preference set by hand
    pub fn manual(value: f64) -> Self {
        Self { manual: true, value }
    }

    /// A machine-computed preference
    pub fn computed(value: f64) -> Self {
        Self { manual: false, value }
    }

    /// Set the value by hand. The override stays until cleared.
    pub fn set_manual(&mut self, value: f64) {
        self.manual = true;
        self.value = value;
    }

    /// Drop the manual override, keeping the last value until the next estimate
    pub fn clear_manual(&mut self) {
        self.manual = false;
    }

    /// Whether the manual value wins over estimation
    pub fn is_manual_override(&self) -> bool {
        self.manual && self.value > 0.0
    }

    /// Read the preference, writing defaults for any key not yet present.
    pub fn load(store: &dyn PreferenceStore) -> crate::Result<Self> {
        let manual = store.get_bool(MANUAL_KEY)?;
        let value = store.get_float(VALUE_KEY)?;

        let defaults = Self::default();
        if manual.is_none() {
            store.set_bool(MANUAL_KEY, defaults.manual)?;
        }
        if value.is_none() {
            store.set_float(VALUE_KEY, defaults.value)?;
        }

        Ok(Self {
            manual: manual.unwrap_or(defaults.manual),
            value: value.unwrap_or(defaults.value),
        })
    }

    /// Write both fields back to the store
    pub fn save(&self, store: &dyn PreferenceStore) -> crate::Result<()> {
        store.set_bool(MANUAL_KEY, self.manual)?;
        store.set_float(VALUE_KEY, self.value)?;
        Ok(())
    }
}

impl Default for TolerancePreference {
    fn default() -> Self {
        Self {
            manual: false,
            value: UNSET_EPSILON,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_default_preference() {
        let pref = TolerancePreference::default();
        assert!(!pref.manual);
        assert_eq!(pref.value, UNSET_EPSILON);
        assert!(!pref.is_manual_override());
    }

    #[test]
    fn test_set_and_clear_manual() {
        let mut pref = TolerancePreference::computed(0.3);
        pref.set_manual(2.5);
        assert!(pref.manual);
        assert_eq!(pref.value, 2.5);
        assert!(pref.is_manual_override());

        pref.clear_manual();
        assert!(!pref.manual);
        assert_eq!(pref.value, 2.5);
    }

    #[test]
    fn test_manual_zero_is_not_an_override() {
        assert!(!TolerancePreference::manual(0.0).is_manual_override());
        assert!(!TolerancePreference::manual(-1.0).is_manual_override());
    }

    #[test]
    fn test_load_creates_defaults_lazily() {
        let store = MemoryStore::new();
        let pref = TolerancePreference::load(&store).unwrap();

        assert_eq!(pref, TolerancePreference::default());
        assert_eq!(store.get_bool(MANUAL_KEY).unwrap(), Some(false));
        assert_eq!(store.get_float(VALUE_KEY).unwrap(), Some(UNSET_EPSILON));
    }

    #[test]
    fn test_load_keeps_existing_values() {
        let store = MemoryStore::new();
        store.set_bool(MANUAL_KEY, true).unwrap();
        store.set_float(VALUE_KEY, 1.75).unwrap();

        let pref = TolerancePreference::load(&store).unwrap();
        assert_eq!(pref, TolerancePreference::manual(1.75));
    }

    #[test]
    fn test_load_fills_only_missing_key() {
        let store = MemoryStore::new();
        store.set_float(VALUE_KEY, 0.4).unwrap();

        let pref = TolerancePreference::load(&store).unwrap();
        assert_eq!(pref, TolerancePreference::computed(0.4));
        assert_eq!(store.get_float(VALUE_KEY).unwrap(), Some(0.4));
    }

    #[test]
    fn test_save_roundtrip() {
        let store = MemoryStore::new();
        TolerancePreference::manual(3.0).save(&store).unwrap();

        let loaded = TolerancePreference::load(&store).unwrap();
        assert_eq!(loaded, TolerancePreference::manual(3.0));
    }
}
