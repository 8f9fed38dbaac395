//! Ramer-Douglas-Peucker Series Simplification
//!
//! Reduces a dense sensor series to the samples that carry its shape. Each
//! sample is projected onto a timestamp × magnitude plane and the classic
//! perpendicular-distance RDP is run over that projection. The result is a
//! subsequence of the input: samples are selected, never copied or moved.

use crate::samples::types::SensorPoint;

/// Default epsilon used when no tolerance has been resolved
pub const DEFAULT_EPSILON: f64 = 1.0;

/// A sample projected onto the timestamp × magnitude plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedPoint {
    /// Timestamp in milliseconds
    pub t: f64,
    /// Vector magnitude
    pub magnitude: f64,
}

impl ProjectedPoint {
    pub fn new(t: f64, magnitude: f64) -> Self {
        Self { t, magnitude }
    }

    pub fn from_sample<P: SensorPoint + ?Sized>(sample: &P) -> Self {
        Self {
            t: sample.timestamp_ms() as f64,
            magnitude: sample.magnitude(),
        }
    }

    /// Calculate Euclidean distance to another point
    pub fn distance_to(&self, other: &ProjectedPoint) -> f64 {
        let dt = self.t - other.t;
        let dm = self.magnitude - other.magnitude;
        (dt * dt + dm * dm).sqrt()
    }

    /// Calculate perpendicular distance to the line through `line_start` and `line_end`.
    ///
    /// When both ends coincide the line is undefined and the distance to
    /// that shared point is returned instead.
    pub fn perpendicular_distance(&self, line_start: &ProjectedPoint, line_end: &ProjectedPoint) -> f64 {
        let dx = line_end.t - line_start.t;
        let dy = line_end.magnitude - line_start.magnitude;

        if dx == 0.0 && dy == 0.0 {
            return self.distance_to(line_start);
        }

        // Cross product over baseline length
        let numerator = ((self.t - line_start.t) * dy - (self.magnitude - line_start.magnitude) * dx).abs();
        numerator / (dx * dx + dy * dy).sqrt()
    }
}

/// RDP series simplification
#[derive(Debug, Clone, Copy)]
pub struct RdpSimplifier {
    /// Maximum distance a dropped sample may have from its baseline
    pub epsilon: f64,
}

impl RdpSimplifier {
    /// Create a new simplifier with default epsilon
    pub fn new() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
        }
    }

    /// Create a new simplifier with custom epsilon.
    ///
    /// Negative and NaN values are treated as zero, which keeps every sample
    /// that is not exactly on its baseline.
    pub fn with_epsilon(epsilon: f64) -> Self {
        Self {
            epsilon: epsilon.max(0.0),
        }
    }

    /// Simplify a series, returning references to the retained samples.
    ///
    /// Series shorter than three samples are returned unchanged. Otherwise the
    /// result always starts with the first sample and ends with the last.
    pub fn simplify<'a, P: SensorPoint>(&self, points: &'a [P]) -> Vec<&'a P> {
        let kept: Vec<&P> = self
            .simplify_indices(points)
            .into_iter()
            .map(|i| &points[i])
            .collect();

        tracing::debug!(
            original = points.len(),
            retained = kept.len(),
            epsilon = self.epsilon,
            "Simplified series"
        );

        kept
    }

    /// Simplify a series, returning the indices of the retained samples in order
    pub fn simplify_indices<P: SensorPoint>(&self, points: &[P]) -> Vec<usize> {
        if points.len() < 3 {
            return (0..points.len()).collect();
        }

        let projected: Vec<ProjectedPoint> = points.iter().map(ProjectedPoint::from_sample).collect();
        let keep = self.mark_retained(&projected);

        keep.iter()
            .enumerate()
            .filter_map(|(i, &kept)| kept.then_some(i))
            .collect()
    }

    /// Mark the samples that survive simplification.
    ///
    /// Segments are processed from an explicit work stack, so adversarial
    /// series that split next to an endpoint cost time but not stack depth.
    fn mark_retained(&self, projected: &[ProjectedPoint]) -> Vec<bool> {
        let last = projected.len() - 1;
        let mut keep = vec![false; projected.len()];
        keep[0] = true;
        keep[last] = true;

        let mut segments = vec![(0, last)];
        while let Some((start, end)) = segments.pop() {
            if end - start < 2 {
                continue;
            }

            let (max_dist, max_index) = Self::find_max_distance(projected, start, end);
            if max_dist > self.epsilon {
                keep[max_index] = true;
                segments.push((max_index, end));
                segments.push((start, max_index));
            }
        }

        keep
    }

    /// Find the interior point farthest from the baseline of `[start, end]`.
    ///
    /// Ties go to the earliest index. NaN distances never win, so a segment
    /// whose interior is all NaN reports `(0.0, start)`.
    pub fn find_max_distance(projected: &[ProjectedPoint], start: usize, end: usize) -> (f64, usize) {
        let first = &projected[start];
        let last = &projected[end];

        let mut max_dist = 0.0;
        let mut max_index = start;

        for (i, point) in projected.iter().enumerate().take(end).skip(start + 1) {
            let dist = point.perpendicular_distance(first, last);
            if dist > max_dist {
                max_dist = dist;
                max_index = i;
            }
        }

        (max_dist, max_index)
    }

    /// Calculate compression ratio
    pub fn compression_ratio(original_len: usize, simplified_len: usize) -> f64 {
        if original_len == 0 {
            return 1.0;
        }
        1.0 - (simplified_len as f64 / original_len as f64)
    }
}

impl Default for RdpSimplifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Simplify `points` with the given epsilon.
///
/// Shorthand for `RdpSimplifier::with_epsilon(epsilon).simplify(points)`.
pub fn simplify<P: SensorPoint>(points: &[P], epsilon: f64) -> Vec<&P> {
    RdpSimplifier::with_epsilon(epsilon).simplify(points)
}

/// Simplified series with metadata
#[derive(Debug, Clone)]
pub struct SimplifiedSeries<P> {
    /// Retained samples, cloned out of the input
    pub points: Vec<P>,
    /// Original sample count
    pub original_count: usize,
    /// Compression ratio (0-1)
    pub compression_ratio: f64,
    /// Epsilon the series was reduced with
    pub epsilon: f64,
    /// First retained timestamp
    pub start_ms: i64,
    /// Last retained timestamp
    pub end_ms: i64,
}

impl<P: SensorPoint + Clone> SimplifiedSeries<P> {
    /// Simplify and keep owned copies of the retained samples
    pub fn from_points(points: &[P], epsilon: f64) -> Self {
        let simplifier = RdpSimplifier::with_epsilon(epsilon);
        let kept: Vec<P> = simplifier.simplify(points).into_iter().cloned().collect();

        Self {
            start_ms: kept.first().map(|p| p.timestamp_ms()).unwrap_or(0),
            end_ms: kept.last().map(|p| p.timestamp_ms()).unwrap_or(0),
            original_count: points.len(),
            compression_ratio: RdpSimplifier::compression_ratio(points.len(), kept.len()),
            epsilon: simplifier.epsilon,
            points: kept,
        }
    }

    /// Number of retained samples
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Peak magnitude among the retained samples
    pub fn peak_magnitude(&self) -> Option<f64> {
        self.points
            .iter()
            .map(|p| p.magnitude())
            .fold(None, |acc, m| match acc {
                Some(best) if best >= m => Some(best),
                _ => Some(m),
            })
    }
}
