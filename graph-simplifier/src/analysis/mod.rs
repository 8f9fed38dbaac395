//! Series analysis
//!
//! Shape-preserving reduction of dense sensor series:
//! - Ramer-Douglas-Peucker over a timestamp × magnitude projection
//! - Summary metadata for the reduced series

pub mod rdp_simplification;

pub use rdp_simplification::{simplify, ProjectedPoint, RdpSimplifier, SimplifiedSeries};
