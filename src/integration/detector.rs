//! Adapters from upstream detector records to tracker [`Detection`]s.

use crate::tracker::Detection;

/// A per-frame object record produced by an upstream detector.
///
/// Implement this for the host pipeline's object type to feed it to the
/// tracker.
///
/// # Example
///
/// ```
/// use vqtrack::DetectionRecord;
///
/// struct Car {
///     tlbr: [f32; 4],
///     confidence: f32,
///     slot: usize,
/// }
///
/// impl DetectionRecord for Car {
///     fn tlbr(&self) -> [f32; 4] {
///         self.tlbr
///     }
///
///     fn score(&self) -> f32 {
///         self.confidence
///     }
///
///     fn index(&self) -> usize {
///         self.slot
///     }
/// }
/// ```
pub trait DetectionRecord {
    /// Box corners (x1, y1, x2, y2).
    fn tlbr(&self) -> [f32; 4];

    /// Detection confidence.
    fn score(&self) -> f32;

    /// Caller index of the record, unique within its frame.
    fn index(&self) -> usize;

    fn to_detection(&self) -> Detection {
        let [x1, y1, x2, y2] = self.tlbr();
        Detection::new(x1, y1, x2, y2, self.score(), self.index())
    }
}

impl DetectionRecord for Detection {
    fn tlbr(&self) -> [f32; 4] {
        self.bbox.to_tlbr()
    }

    fn score(&self) -> f32 {
        self.score
    }

    fn index(&self) -> usize {
        self.caller_index
    }

    fn to_detection(&self) -> Detection {
        self.clone()
    }
}

/// Helper trait for converting model-specific outputs to `Detection`.
pub trait IntoDetections {
    /// Convert the output into a vector of detections.
    fn into_detections(self) -> Vec<Detection>;
}

impl IntoDetections for Vec<Detection> {
    fn into_detections(self) -> Vec<Detection> {
        self
    }
}

impl<R: DetectionRecord> IntoDetections for &[R] {
    fn into_detections(self) -> Vec<Detection> {
        detections_from_records(self)
    }
}

/// Normalise a frame's records into detections.
pub fn detections_from_records<'a, R, I>(records: I) -> Vec<Detection>
where
    R: DetectionRecord + 'a,
    I: IntoIterator<Item = &'a R>,
{
    records.into_iter().map(|r| r.to_detection()).collect()
}
