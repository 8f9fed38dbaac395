//! Core sample types
//!
//! Any value exposing a millisecond timestamp and a 3-axis vector can be
//! simplified. Acceleration, angular rate and field strength samples all
//! satisfy the same capability.

use serde::{Deserialize, Serialize};

/// Capability required by the simplifier and the tolerance estimator.
pub trait SensorPoint {
    /// Timestamp in milliseconds. Non-decreasing across a sequence.
    fn timestamp_ms(&self) -> i64;
    fn x(&self) -> f64;
    fn y(&self) -> f64;
    fn z(&self) -> f64;

    /// Euclidean norm of the 3-axis vector
    fn magnitude(&self) -> f64 {
        let (x, y, z) = (self.x(), self.y(), self.z());
        (x * x + y * y + z * z).sqrt()
    }
}

impl<P: SensorPoint + ?Sized> SensorPoint for &P {
    fn timestamp_ms(&self) -> i64 {
        (**self).timestamp_ms()
    }

    fn x(&self) -> f64 {
        (**self).x()
    }

    fn y(&self) -> f64 {
        (**self).y()
    }

    fn z(&self) -> f64 {
        (**self).z()
    }
}

/// `(timestamp_ms, x, y, z)`
impl SensorPoint for (i64, f64, f64, f64) {
    fn timestamp_ms(&self) -> i64 {
        self.0
    }

    fn x(&self) -> f64 {
        self.1
    }

    fn y(&self) -> f64 {
        self.2
    }

    fn z(&self) -> f64 {
        self.3
    }
}

/// Which physical sensor produced a sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SensorKind {
    /// Linear acceleration (m/s²)
    #[default]
    Accelerometer,
    /// Angular rate (rad/s)
    Gyroscope,
    /// Magnetic field strength (μT)
    Magnetometer,
}

impl SensorKind {
    /// Unit label used in summaries
    pub fn unit(&self) -> &'static str {
        match self {
            SensorKind::Accelerometer => "m/s²",
            SensorKind::Gyroscope => "rad/s",
            SensorKind::Magnetometer => "μT",
        }
    }
}

impl std::fmt::Display for SensorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SensorKind::Accelerometer => "accelerometer",
            SensorKind::Gyroscope => "gyroscope",
            SensorKind::Magnetometer => "magnetometer",
        };
        f.write_str(name)
    }
}

/// A single 3-axis reading
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorSample {
    /// Milliseconds since the epoch (or any monotonic origin)
    pub timestamp_ms: i64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    /// Source sensor
    #[serde(default)]
    pub kind: SensorKind,
}

impl SensorSample {
    /// Create an accelerometer sample
    pub fn new(timestamp_ms: i64, x: f64, y: f64, z: f64) -> Self {
        Self {
            timestamp_ms,
            x,
            y,
            z,
            kind: SensorKind::Accelerometer,
        }
    }

    /// Create a sample tagged with its source sensor
    pub fn with_kind(kind: SensorKind, timestamp_ms: i64, x: f64, y: f64, z: f64) -> Self {
        Self {
            timestamp_ms,
            x,
            y,
            z,
            kind,
        }
    }
}

impl SensorPoint for SensorSample {
    fn timestamp_ms(&self) -> i64 {
        self.timestamp_ms
    }

    fn x(&self) -> f64 {
        self.x
    }

    fn y(&self) -> f64 {
        self.y
    }

    fn z(&self) -> f64 {
        self.z
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_magnitude() {
        let sample = SensorSample::new(0, 3.0, 4.0, 0.0);
        assert!((sample.magnitude() - 5.0).abs() < 1e-9);

        let sample = SensorSample::new(0, 1.0, 2.0, 2.0);
        assert!((sample.magnitude() - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_magnitude_of_negative_components() {
        let sample = SensorSample::new(0, -3.0, 0.0, -4.0);
        assert!((sample.magnitude() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_tuple_point() {
        let point = (42_i64, 0.0, 3.0, 4.0);
        assert_eq!(point.timestamp_ms(), 42);
        assert!((point.magnitude() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_reference_forwards() {
        let sample = SensorSample::new(7, 1.0, 0.0, 0.0);
        let by_ref = &sample;
        assert_eq!(SensorPoint::timestamp_ms(&by_ref), 7);
        assert!((SensorPoint::magnitude(&by_ref) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_with_kind() {
        let sample = SensorSample::with_kind(SensorKind::Gyroscope, 10, 0.1, 0.2, 0.3);
        assert_eq!(sample.kind, SensorKind::Gyroscope);
        assert_eq!(sample.kind.unit(), "rad/s");
        assert_eq!(sample.kind.to_string(), "gyroscope");
    }

    #[test]
    fn test_sample_serialization() {
        let sample = SensorSample::with_kind(SensorKind::Magnetometer, 1000, 20.0, -5.0, 40.0);
        let json = serde_json::to_string(&sample).unwrap();
        assert!(json.contains("\"magnetometer\""));

        let loaded: SensorSample = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded, sample);
    }

    #[test]
    fn test_sample_kind_defaults_when_missing() {
        let json = r#"{"timestamp_ms": 5, "x": 1.0, "y": 2.0, "z": 3.0}"#;
        let sample: SensorSample = serde_json::from_str(json).unwrap();
        assert_eq!(sample.kind, SensorKind::Accelerometer);
    }
}
