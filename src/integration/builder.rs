//! Fluent construction of [`Detection`]s from whichever box layout a detector emits.

use crate::tracker::{Detection, Rect};

/// Builds a `Detection` for one object record.
///
/// The box defaults to an empty rect at the origin and the score to zero;
/// the caller index should always be set so tracker output can be joined
/// back to the record.
#[derive(Debug, Clone, Default)]
pub struct DetectionBuilder {
    bbox: Rect,
    score: f32,
    caller_index: usize,
}

impl DetectionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Two corner points; their order does not matter.
    pub fn tlbr(self, x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        self.rect(Rect::from_tlbr(x1, y1, x2, y2))
    }

    /// Center point plus size.
    pub fn xywh(self, cx: f32, cy: f32, w: f32, h: f32) -> Self {
        self.rect(Rect::new(cx - w / 2.0, cy - h / 2.0, w, h))
    }

    /// Top-left point plus size.
    pub fn tlwh(self, left: f32, top: f32, w: f32, h: f32) -> Self {
        self.rect(Rect::new(left, top, w, h))
    }

    pub fn rect(mut self, bbox: Rect) -> Self {
        self.bbox = bbox;
        self
    }

    pub fn score(mut self, score: f32) -> Self {
        self.score = score;
        self
    }

    /// Index of the originating record within its frame.
    pub fn index(mut self, caller_index: usize) -> Self {
        self.caller_index = caller_index;
        self
    }

    pub fn build(self) -> Detection {
        Detection::from_rect(self.bbox, self.score, self.caller_index)
    }
}
