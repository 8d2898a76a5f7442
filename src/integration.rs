//! Integration module for connecting an upstream detector and a host query
//! pipeline with the tracker and color extractor.
//!
//! This module provides the record adapter that turns detector output into
//! tracker detections, and typed operator contracts for pipeline wiring.

mod builder;
mod detector;
mod operator;

pub use builder::DetectionBuilder;
pub use detector::{DetectionRecord, IntoDetections, detections_from_records};
pub use operator::{GroundTracker, ImageColor, Operator};
