//! Tolerance (epsilon) resolution
//!
//! The estimator itself is pure: it takes a preference snapshot and returns
//! the epsilon together with the record to persist. Storage access goes
//! through [`crate::store::PreferenceStore`].

pub mod estimator;
pub mod preference;

pub use estimator::{ToleranceConfig, ToleranceEstimator};
pub use preference::TolerancePreference;
