//! Typed operator contracts for a host query pipeline.
//!
//! The host wires operators into its pipeline by the fields they read and
//! write and by how many past frames they need to see.

use image::RgbImage;

use crate::color::{ColorExtractor, ColorLabeler, NamedColor};
use crate::error::Result;
use crate::tracker::{TrackEngine, TrackOutput, TrackerConfig};

use super::detector::{DetectionRecord, detections_from_records};

/// Registration contract of a pipeline operator.
pub trait Operator {
    /// Record fields the operator reads.
    const INPUT_FIELDS: &'static [&'static str];
    /// Record fields the operator produces.
    const OUTPUT_FIELDS: &'static [&'static str];
    /// Number of frames of history the operator needs, current one included.
    const REQUIRED_LENGTH: usize;
}

/// Assigns a `track_id` to every object record of a frame.
///
/// Bundles the record adapter, the [`TrackEngine`] and the output filter.
/// Run one instance per object class or stream.
#[derive(Debug)]
pub struct GroundTracker {
    engine: TrackEngine,
}

impl Operator for GroundTracker {
    const INPUT_FIELDS: &'static [&'static str] = &["tlbr", "score"];
    const OUTPUT_FIELDS: &'static [&'static str] = &["track_id"];
    const REQUIRED_LENGTH: usize = 0;
}

impl GroundTracker {
    pub fn new(config: TrackerConfig) -> Result<Self> {
        Ok(Self {
            engine: TrackEngine::new(config)?,
        })
    }

    /// Track one frame's records; returns `(caller_index, track_id)` pairs
    /// for the records observed in this frame.
    pub fn update<R: DetectionRecord>(
        &mut self,
        frame_index: u64,
        records: &[R],
    ) -> Result<Vec<TrackOutput>> {
        self.engine
            .track_frame(frame_index, detections_from_records(records))
    }

    pub fn engine(&self) -> &TrackEngine {
        &self.engine
    }
}

/// Produces `major_color_rgb` for an object crop.
#[derive(Debug, Clone, Default)]
pub struct ImageColor {
    extractor: ColorExtractor,
    labeler: ColorLabeler,
}

impl Operator for ImageColor {
    const INPUT_FIELDS: &'static [&'static str] = &["image"];
    const OUTPUT_FIELDS: &'static [&'static str] = &["major_color_rgb"];
    const REQUIRED_LENGTH: usize = 1;
}

impl ImageColor {
    pub fn new(extractor: ColorExtractor, labeler: ColorLabeler) -> Self {
        Self { extractor, labeler }
    }

    /// Dominant named color of the crop, `None` when undetermined.
    pub fn major_color(&self, image: Option<&RgbImage>) -> Option<NamedColor> {
        let samples = self.extractor.extract(image);
        self.labeler.label(&samples)
    }
}
