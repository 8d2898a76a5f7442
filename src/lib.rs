//! Track association and dominant color extraction for object-centric video
//! queries.
//!
//! - [`TrackEngine`] turns per-frame detection sets into persistent track
//!   identities and reports `(caller_index, track_id)` pairs for the objects
//!   seen in each frame.
//! - [`ColorExtractor`] and [`ColorLabeler`] reduce an object crop to one
//!   CSS3 named color.

pub mod color;
pub mod error;
pub mod integration;
pub mod tracker;

pub use color::{
    ColorExtractor, ColorExtractorConfig, ColorLabeler, ColorLabelerConfig, ColorSample,
    NamedColor, Rgb, dominant_color,
};
pub use error::{Error, Result};
pub use integration::{
    DetectionBuilder, DetectionRecord, GroundTracker, ImageColor, IntoDetections, Operator,
};
pub use tracker::{
    Detection, DistanceFunction, Matching, Rect, Track, TrackEngine, TrackOutput, TrackState,
    TrackerConfig,
};
