//! Single persistent object identity.

use ndarray::{Array1, Array2};

use crate::tracker::kalman_filter::KalmanFilter;
use crate::tracker::matching::Detection;
use crate::tracker::rect::Rect;
use crate::tracker::track_state::TrackState;

fn to_f64(xyah: [f32; 4]) -> [f64; 4] {
    xyah.map(f64::from)
}

/// Single object track.
///
/// Owned by [`TrackEngine`](crate::tracker::TrackEngine); callers only get
/// shared references.
#[derive(Debug, Clone)]
pub struct Track {
    /// Identifier assigned at creation, never reused by the same engine
    pub track_id: u64,
    /// Whether the track was matched in the latest processed frame
    pub state: TrackState,
    /// Frame index when the track was created
    pub start_frame: u64,
    /// Frame index of the most recent successful association
    pub last_matched_frame: u64,
    /// Number of frames the track has been matched in, creation included
    pub hits: u32,
    /// Most recently matched detection
    pub last_detection: Detection,
    mean: Array1<f64>,
    covariance: Array2<f64>,
}

impl Track {
    pub(crate) fn new(
        track_id: u64,
        detection: Detection,
        kalman_filter: &KalmanFilter,
        frame_id: u64,
    ) -> Self {
        let (mean, covariance) = kalman_filter.initiate(to_f64(detection.bbox.to_xyah()));
        Self {
            track_id,
            state: TrackState::Tracked,
            start_frame: frame_id,
            last_matched_frame: frame_id,
            hits: 1,
            last_detection: detection,
            mean,
            covariance,
        }
    }

    /// Current box estimate (predicted if the track was not matched this frame).
    pub fn rect(&self) -> Rect {
        Rect::from_xyah(
            self.mean[0] as f32,
            self.mean[1] as f32,
            self.mean[2] as f32,
            self.mean[3] as f32,
        )
    }

    /// Estimated box center velocity in pixels per frame.
    pub fn velocity(&self) -> (f32, f32) {
        (self.mean[4] as f32, self.mean[5] as f32)
    }

    /// Whether the track was matched in `frame_id`.
    pub fn is_matched_in(&self, frame_id: u64) -> bool {
        self.last_matched_frame == frame_id
    }

    /// Frames elapsed since the last successful association.
    pub fn frames_since_match(&self, frame_id: u64) -> u64 {
        frame_id.saturating_sub(self.last_matched_frame)
    }

    pub(crate) fn predict(&mut self, kalman_filter: &KalmanFilter, period: u64) {
        let (mean, covariance) = kalman_filter.predict(&self.mean, &self.covariance, period);
        self.mean = mean;
        self.covariance = covariance;
    }

    pub(crate) fn update(&mut self, detection: Detection, kalman_filter: &KalmanFilter, frame_id: u64) {
        let measurement = to_f64(detection.bbox.to_xyah());
        let (mean, covariance) = kalman_filter
            .update(&self.mean, &self.covariance, measurement)
            .unwrap_or_else(|| kalman_filter.initiate(measurement));
        self.mean = mean;
        self.covariance = covariance;

        self.state = TrackState::Tracked;
        self.last_matched_frame = frame_id;
        self.hits += 1;
        self.last_detection = detection;
    }

    pub(crate) fn mark_lost(&mut self) {
        self.state = TrackState::Lost;
    }
}
