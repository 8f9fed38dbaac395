//! # Graph Simplifier
//!
//! Adaptive curve simplification for dense, time-stamped 3-axis sensor series.
//!
//! ## Overview
//!
//! Charting thousands of accelerometer, gyroscope or magnetometer samples is
//! wasteful when most of them sit on a straight line. This library projects
//! every sample onto a timestamp × magnitude plane and runs a
//! Ramer-Douglas-Peucker reduction over it, keeping only the samples that
//! carry the shape of the series. The tolerance of that reduction is either
//! set by a human or estimated from the data itself.
//!
//! ## Quick Start
//!
//! ```
//! use graph_simplifier::{RdpSimplifier, SensorSample, ToleranceEstimator, TolerancePreference};
//!
//! let samples: Vec<SensorSample> = (0..100)
//!     .map(|i| SensorSample::new(i * 20, 0.0, 0.0, 9.81 + (i % 7) as f64 * 0.01))
//!     .collect();
//!
//! // Resolve epsilon from the stored preference (persist `updated` afterwards)
//! let (epsilon, updated) =
//!     ToleranceEstimator::new().resolve_epsilon(TolerancePreference::default(), &samples);
//! assert!(!updated.manual);
//!
//! // Reduce the series; the result borrows from `samples`
//! let reduced = RdpSimplifier::with_epsilon(epsilon).simplify(&samples);
//! assert!(reduced.len() <= samples.len());
//! ```
//!
//! ## Architecture
//!
//! - [`samples`]: point capability trait, concrete samples, JSON recordings
//! - [`analysis`]: magnitude-projected RDP simplification
//! - [`tolerance`]: epsilon preference and estimation policy
//! - [`store`]: namespaced preference storage (memory and TOML file)
//! - [`app`]: CLI and configuration management
//!
//! ## Data Flow
//!
//! ```text
//! ┌─────────────┐    ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
//! │   Samples   │───▶│  Tolerance  │───▶│     RDP     │───▶│  Renderer   │
//! │  (ordered)  │    │  Estimator  │    │  Simplifier │    │ (external)  │
//! └─────────────┘    └─────────────┘    └─────────────┘    └─────────────┘
//!                           ▲ │
//!                           │ ▼
//!                    ┌─────────────┐
//!                    │ Preference  │
//!                    │    Store    │
//!                    └─────────────┘
//! ```

pub mod samples;
pub mod analysis;
pub mod tolerance;
pub mod store;
pub mod app;

// Re-export commonly used types
pub use analysis::rdp_simplification::{simplify, RdpSimplifier, SimplifiedSeries};
pub use samples::types::{SensorKind, SensorPoint, SensorSample};
pub use samples::recording::SampleRecording;
pub use store::{FileStore, MemoryStore, PreferenceStore};
pub use tolerance::{ToleranceConfig, ToleranceEstimator, TolerancePreference};

/// Result type alias for the graph simplifier
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the graph simplifier
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Preference store error: {0}")]
    Store(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
