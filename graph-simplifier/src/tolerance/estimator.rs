//! Epsilon estimation
//!
//! Picks how aggressive simplification should be for a given series. A
//! human-set value always wins; otherwise the epsilon scales with the mean
//! magnitude of the data so quiet and loud signals reduce alike.

use crate::samples::types::SensorPoint;
use crate::store::PreferenceStore;
use crate::tolerance::preference::TolerancePreference;
use serde::{Deserialize, Serialize};

/// Fraction of the mean magnitude used as the computed epsilon
pub const AUTO_RATIO: f64 = 0.07;

/// Floor for computed epsilons. Flat signals would otherwise keep every sample.
pub const MIN_EPSILON: f64 = 0.1;

/// Epsilon returned when there is too little data to estimate from
pub const FALLBACK_EPSILON: f64 = 1.0;

/// Estimation constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToleranceConfig {
    /// Multiplier applied to the mean magnitude
    pub auto_ratio: f64,
    /// Lower bound of a computed epsilon
    pub min_epsilon: f64,
    /// Epsilon for series with fewer than two samples
    pub fallback_epsilon: f64,
}

impl Default for ToleranceConfig {
    fn default() -> Self {
        Self {
            auto_ratio: AUTO_RATIO,
            min_epsilon: MIN_EPSILON,
            fallback_epsilon: FALLBACK_EPSILON,
        }
    }
}

/// Resolves the epsilon for a series
#[derive(Debug, Clone, Copy, Default)]
pub struct ToleranceEstimator {
    config: ToleranceConfig,
}

impl ToleranceEstimator {
    /// Create an estimator with the default constants
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an estimator with custom constants
    pub fn with_config(config: ToleranceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ToleranceConfig {
        &self.config
    }

    /// Resolve the epsilon for `points`.
    ///
    /// Returns the epsilon and the preference the caller should persist:
    /// 1. a manual preference with a positive value is returned untouched;
    /// 2. fewer than two points yield the fallback epsilon and the unchanged preference;
    /// 3. otherwise `max(mean magnitude × ratio, min)`, stored as a computed preference.
    pub fn resolve_epsilon<P: SensorPoint>(
        &self,
        preference: TolerancePreference,
        points: &[P],
    ) -> (f64, TolerancePreference) {
        if preference.is_manual_override() {
            tracing::debug!(epsilon = preference.value, "Using manual epsilon");
            return (preference.value, preference);
        }

        if points.len() < 2 {
            tracing::debug!(
                samples = points.len(),
                epsilon = self.config.fallback_epsilon,
                "Too few samples to estimate epsilon, using fallback"
            );
            return (self.config.fallback_epsilon, preference);
        }

        let epsilon = self.estimate(points);
        tracing::debug!(samples = points.len(), epsilon, "Computed epsilon");

        (epsilon, TolerancePreference::computed(epsilon))
    }

    /// Data-driven epsilon, ignoring any preference.
    ///
    /// NaN magnitudes poison the mean; `f64::max` then yields the floor.
    pub fn estimate<P: SensorPoint>(&self, points: &[P]) -> f64 {
        (Self::mean_magnitude(points) * self.config.auto_ratio).max(self.config.min_epsilon)
    }

    /// Load the preference from `store`, resolve, and write the result back.
    pub fn resolve_with_store<P: SensorPoint>(
        &self,
        store: &dyn PreferenceStore,
        points: &[P],
    ) -> crate::Result<f64> {
        let preference = TolerancePreference::load(store)?;
        let (epsilon, updated) = self.resolve_epsilon(preference, points);
        if updated != preference {
            updated.save(store)?;
        }
        Ok(epsilon)
    }

    /// Mean vector magnitude, `0.0` for an empty series
    pub fn mean_magnitude<P: SensorPoint>(points: &[P]) -> f64 {
        if points.is_empty() {
            return 0.0;
        }
        let total: f64 = points.iter().map(|p| p.magnitude()).sum();
        total / points.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::samples::types::SensorSample;
    use crate::store::MemoryStore;
    use crate::tolerance::preference::{MANUAL_KEY, VALUE_KEY};

    fn peak_series() -> Vec<SensorSample> {
        vec![
            SensorSample::new(0, 0.0, 0.0, 0.0),
            SensorSample::new(1, 0.0, 0.0, 0.0),
            SensorSample::new(2, 5.0, 0.0, 0.0),
            SensorSample::new(3, 0.0, 0.0, 0.0),
            SensorSample::new(4, 0.0, 0.0, 0.0),
        ]
    }

    fn gravity_series(n: i64) -> Vec<SensorSample> {
        (0..n).map(|i| SensorSample::new(i * 20, 0.0, 0.0, 9.81)).collect()
    }

    #[test]
    fn test_default_config() {
        let config = ToleranceConfig::default();
        assert_eq!(config.auto_ratio, 0.07);
        assert_eq!(config.min_epsilon, 0.1);
        assert_eq!(config.fallback_epsilon, 1.0);
    }

    #[test]
    fn test_computed_epsilon_is_floored() {
        let estimator = ToleranceEstimator::new();
        let pref = TolerancePreference::computed(0.0);

        let (epsilon, updated) = estimator.resolve_epsilon(pref, &peak_series());
        assert!((epsilon - 0.1).abs() < 1e-12);
        assert_eq!(updated, TolerancePreference::computed(epsilon));
    }

    #[test]
    fn test_computed_epsilon_scales_with_magnitude() {
        let estimator = ToleranceEstimator::new();
        let (epsilon, updated) =
            estimator.resolve_epsilon(TolerancePreference::default(), &gravity_series(10));

        assert!((epsilon - 9.81 * 0.07).abs() < 1e-9);
        assert!(!updated.manual);
        assert!((updated.value - epsilon).abs() < 1e-12);
    }

    #[test]
    fn test_manual_preference_wins() {
        let estimator = ToleranceEstimator::new();
        let pref = TolerancePreference::manual(2.5);

        let (epsilon, updated) = estimator.resolve_epsilon(pref, &gravity_series(10));
        assert_eq!(epsilon, 2.5);
        assert_eq!(updated, pref);
    }

    #[test]
    fn test_manual_preference_wins_without_data() {
        let estimator = ToleranceEstimator::new();
        let pref = TolerancePreference::manual(2.5);
        let empty: Vec<SensorSample> = vec![];

        let (epsilon, updated) = estimator.resolve_epsilon(pref, &empty);
        assert_eq!(epsilon, 2.5);
        assert_eq!(updated, pref);
    }

    #[test]
    fn test_manual_zero_falls_through_to_estimate() {
        let estimator = ToleranceEstimator::new();
        let pref = TolerancePreference::manual(0.0);

        let (epsilon, updated) = estimator.resolve_epsilon(pref, &gravity_series(4));
        assert!((epsilon - 9.81 * 0.07).abs() < 1e-9);
        assert!(!updated.manual);
    }

    #[test]
    fn test_too_few_points_uses_fallback() {
        let estimator = ToleranceEstimator::new();
        let pref = TolerancePreference::computed(0.42);

        let empty: Vec<SensorSample> = vec![];
        assert_eq!(estimator.resolve_epsilon(pref, &empty), (1.0, pref));

        let single = gravity_series(1);
        assert_eq!(estimator.resolve_epsilon(pref, &single), (1.0, pref));
    }

    #[test]
    fn test_fallback_keeps_manual_flag() {
        // manual with a non-positive value is not an override, but the flag is left alone
        let estimator = ToleranceEstimator::new();
        let pref = TolerancePreference::manual(0.0);
        let empty: Vec<SensorSample> = vec![];

        let (epsilon, updated) = estimator.resolve_epsilon(pref, &empty);
        assert_eq!(epsilon, 1.0);
        assert!(updated.manual);
    }

    #[test]
    fn test_nan_magnitude_yields_floor() {
        let estimator = ToleranceEstimator::new();
        let points = vec![
            SensorSample::new(0, f64::NAN, 0.0, 0.0),
            SensorSample::new(1, 1.0, 0.0, 0.0),
        ];
        assert_eq!(estimator.estimate(&points), MIN_EPSILON);
    }

    #[test]
    fn test_custom_config() {
        let estimator = ToleranceEstimator::with_config(ToleranceConfig {
            auto_ratio: 0.5,
            min_epsilon: 0.01,
            fallback_epsilon: 3.0,
        });
        let (epsilon, _) = estimator.resolve_epsilon(TolerancePreference::default(), &peak_series());
        assert!((epsilon - 0.5).abs() < 1e-12);

        let empty: Vec<SensorSample> = vec![];
        let (fallback, _) = estimator.resolve_epsilon(TolerancePreference::default(), &empty);
        assert_eq!(fallback, 3.0);
    }

    #[test]
    fn test_mean_magnitude() {
        assert!((ToleranceEstimator::mean_magnitude(&peak_series()) - 1.0).abs() < 1e-12);
        let empty: Vec<SensorSample> = vec![];
        assert_eq!(ToleranceEstimator::mean_magnitude(&empty), 0.0);
    }

    #[test]
    fn test_resolve_with_store_persists_computed_value() {
        let store = MemoryStore::new();
        let estimator = ToleranceEstimator::new();

        let epsilon = estimator.resolve_with_store(&store, &gravity_series(5)).unwrap();
        assert!((epsilon - 9.81 * 0.07).abs() < 1e-9);
        assert_eq!(store.get_bool(MANUAL_KEY).unwrap(), Some(false));
        assert_eq!(store.get_float(VALUE_KEY).unwrap(), Some(epsilon));
    }

    #[test]
    fn test_resolve_with_store_respects_manual() {
        let store = MemoryStore::new();
        TolerancePreference::manual(4.0).save(&store).unwrap();

        let estimator = ToleranceEstimator::new();
        let epsilon = estimator.resolve_with_store(&store, &gravity_series(5)).unwrap();
        assert_eq!(epsilon, 4.0);
        assert_eq!(store.get_float(VALUE_KEY).unwrap(), Some(4.0));
        assert_eq!(store.get_bool(MANUAL_KEY).unwrap(), Some(true));
    }
}
