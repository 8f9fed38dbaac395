//! Sample Recording Format
//!
//! A captured series of samples from one sensor, stored as JSON. The
//! binary reads these as input and writes simplified copies back out.

use crate::samples::types::{SensorKind, SensorSample};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use uuid::Uuid;

/// Current recording format version
pub const CURRENT_FORMAT_VERSION: &str = "1.0";

/// Recording metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordingMetadata {
    /// Unique recording ID
    pub id: Uuid,
    /// Recording name
    pub name: String,
    /// Sensor that produced the samples
    pub sensor: SensorKind,
    /// When the recording was written
    pub recorded_at: DateTime<Utc>,
    /// Number of samples
    pub sample_count: usize,
    /// Epsilon used if this recording is a simplified copy
    pub simplified_with: Option<f64>,
    /// Version of the recording format
    pub format_version: String,
}

impl RecordingMetadata {
    /// Create new metadata for a recording
    pub fn new(name: String, sensor: SensorKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            sensor,
            recorded_at: Utc::now(),
            sample_count: 0,
            simplified_with: None,
            format_version: CURRENT_FORMAT_VERSION.to_string(),
        }
    }
}

impl Default for RecordingMetadata {
    fn default() -> Self {
        Self::new(String::new(), SensorKind::default())
    }
}

/// An ordered series of samples from one sensor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleRecording {
    /// Recording metadata
    pub metadata: RecordingMetadata,
    /// Samples in timestamp order
    pub samples: Vec<SensorSample>,
}

impl SampleRecording {
    /// Create a new empty recording
    pub fn new(name: String, sensor: SensorKind) -> Self {
        Self {
            metadata: RecordingMetadata::new(name, sensor),
            samples: Vec::new(),
        }
    }

    /// Create a recording from existing samples
    pub fn from_samples(name: String, sensor: SensorKind, samples: Vec<SensorSample>) -> Self {
        let mut recording = Self::new(name, sensor);
        recording.metadata.sample_count = samples.len();
        recording.samples = samples;
        recording
    }

    /// Append a sample
    pub fn push(&mut self, sample: SensorSample) {
        self.samples.push(sample);
        self.metadata.sample_count = self.samples.len();
    }

    /// Build a simplified copy that keeps only the given samples.
    ///
    /// The copy gets a fresh id and records the epsilon it was reduced with.
    pub fn simplified_copy(&self, samples: Vec<SensorSample>, epsilon: f64) -> Self {
        let mut copy = Self::from_samples(self.metadata.name.clone(), self.metadata.sensor, samples);
        copy.metadata.simplified_with = Some(epsilon);
        copy
    }

    /// Save recording to a file
    pub fn save(&self, path: &Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load recording from a file.
    ///
    /// Logs a warning if the recording was saved with an unknown format version,
    /// but still attempts to deserialize it (forward-compatible via `#[serde(default)]`).
    pub fn load(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut recording: SampleRecording = serde_json::from_str(&content)?;
        if recording.metadata.format_version != CURRENT_FORMAT_VERSION {
            tracing::warn!(
                name = %recording.metadata.name,
                found = %recording.metadata.format_version,
                expected = CURRENT_FORMAT_VERSION,
                "Recording has different format version; some fields may use default values"
            );
        }
        if recording.metadata.sample_count != recording.samples.len() {
            tracing::warn!(
                name = %recording.metadata.name,
                declared = recording.metadata.sample_count,
                actual = recording.samples.len(),
                "Sample count mismatch, using actual count"
            );
            recording.metadata.sample_count = recording.samples.len();
        }
        Ok(recording)
    }

    /// Check that timestamps never go backwards.
    ///
    /// The simplifier does not re-sort; callers can use this before handing
    /// a loaded file to it.
    pub fn is_time_ordered(&self) -> bool {
        self.samples
            .windows(2)
            .all(|w| w[0].timestamp_ms <= w[1].timestamp_ms)
    }

    /// Duration covered by the samples in milliseconds
    pub fn duration_ms(&self) -> i64 {
        match (self.samples.first(), self.samples.last()) {
            (Some(first), Some(last)) => last.timestamp_ms.saturating_sub(first.timestamp_ms),
            _ => 0,
        }
    }

    /// Get the number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check if recording is empty
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

impl Default for SampleRecording {
    fn default() -> Self {
        Self::new("untitled".to_string(), SensorKind::default())
    }
}
