//! Sensor samples
//!
//! The point capability consumed by the simplifier, the concrete sample
//! type used by the binary and tests, and the on-disk recording format.

pub mod recording;
pub mod types;

pub use recording::SampleRecording;
pub use types::{SensorKind, SensorPoint, SensorSample};
