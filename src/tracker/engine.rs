//! Track association engine.

use std::collections::HashSet;

use log::{debug, trace, warn};

use crate::error::{Error, Result};
use crate::tracker::distance::DistanceFunction;
use crate::tracker::kalman_filter::KalmanFilter;
use crate::tracker::matching::{self, AssignmentResult, Detection, Matching};
use crate::tracker::output::{TrackOutput, current_frame_outputs};
use crate::tracker::rect::Rect;
use crate::tracker::track::Track;

/// Configuration for the [`TrackEngine`].
///
/// New tracks are reported in the frame they are created in; there is no
/// initialization delay to configure.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Cost between a predicted track box and a detection box.
    pub distance_function: DistanceFunction,
    /// Pairs with a cost above this value are never matched.
    pub distance_threshold: f32,
    /// Frames a track may go unmatched before it is destroyed.
    pub retention_horizon: u64,
    /// Assignment strategy.
    pub matching: Matching,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            distance_function: DistanceFunction::Iou,
            distance_threshold: 0.7,
            retention_horizon: 15,
            matching: Matching::Greedy,
        }
    }
}

impl TrackerConfig {
    /// Default configuration with a distance function selected by name.
    pub fn from_distance_name(name: &str, distance_threshold: f32) -> Result<Self> {
        Ok(Self {
            distance_function: name.parse()?,
            distance_threshold,
            ..Self::default()
        })
    }

    fn validate(&self) -> Result<()> {
        if self.distance_threshold.is_nan() || self.distance_threshold <= 0.0 {
            return Err(Error::config(
                "distance_threshold",
                format!("must be positive, got {}", self.distance_threshold),
            ));
        }
        Ok(())
    }
}

/// Associates per-frame detections with persistent track identities.
///
/// One engine follows one frame sequence; `update` takes `&mut self`, so
/// sharing an engine across threads requires external locking.
#[derive(Debug)]
pub struct TrackEngine {
    tracks: Vec<Track>,
    previous_frame: Option<u64>,
    next_track_id: u64,
    config: TrackerConfig,
    kalman_filter: KalmanFilter,
}

impl TrackEngine {
    pub fn new(config: TrackerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            tracks: Vec::new(),
            previous_frame: None,
            next_track_id: 1,
            config,
            kalman_filter: KalmanFilter::default(),
        })
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// All live tracks in ascending id order, including ones not matched in
    /// the latest frame.
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Frame index of the latest successful `update`.
    pub fn frame_index(&self) -> Option<u64> {
        self.previous_frame
    }

    /// Number of tracks created over the engine's lifetime.
    pub fn total_track_count(&self) -> u64 {
        self.next_track_id - 1
    }

    /// Process one frame and return the tracks matched by this call.
    ///
    /// `frame_index` may skip values but must not decrease; a decreasing
    /// index fails with [`Error::NonMonotonicFrame`] and leaves the engine
    /// untouched. Calling again with the same index only offers the
    /// detections to tracks not yet matched in that frame.
    pub fn update(&mut self, frame_index: u64, detections: Vec<Detection>) -> Result<Vec<&Track>> {
        let period = match self.previous_frame {
            Some(previous) if frame_index < previous => {
                warn!(target: "tracker", "rejecting frame {frame_index}, already processed frame {previous}");
                return Err(Error::NonMonotonicFrame {
                    previous,
                    current: frame_index,
                });
            }
            Some(previous) => (frame_index - previous).max(1),
            None => 1,
        };

        for track in &mut self.tracks {
            track.predict(&self.kalman_filter, period);
        }

        // a repeated frame index must not match a track a second time
        let candidates: Vec<usize> = (0..self.tracks.len())
            .filter(|&i| !self.tracks[i].is_matched_in(frame_index))
            .collect();

        let track_rects: Vec<Rect> = candidates.iter().map(|&i| self.tracks[i].rect()).collect();
        let det_rects: Vec<Rect> = detections.iter().map(|d| d.bbox).collect();
        let dists = self.config.distance_function.cost_matrix(&track_rects, &det_rects);

        let AssignmentResult {
            matches,
            unmatched_tracks,
            unmatched_detections,
        } = matching::assign(&dists, self.config.distance_threshold, self.config.matching);

        trace!(
            target: "tracker",
            "frame {frame_index} (period {period}): {} matched, {} new, {} unmatched tracks",
            matches.len(),
            unmatched_detections.len(),
            unmatched_tracks.len()
        );

        let mut slots: Vec<Option<Detection>> = detections.into_iter().map(Some).collect();
        let mut observed = HashSet::new();

        for (itrack, idet) in matches {
            if let Some(det) = slots[idet].take() {
                let track = &mut self.tracks[candidates[itrack]];
                track.update(det, &self.kalman_filter, frame_index);
                observed.insert(track.track_id);
            }
        }

        for itrack in unmatched_tracks {
            self.tracks[candidates[itrack]].mark_lost();
        }

        let horizon = self.config.retention_horizon;
        self.tracks.retain(|track| {
            let keep = track.frames_since_match(frame_index) <= horizon;
            if !keep {
                debug!(
                    target: "tracker",
                    "track {} destroyed after {} unmatched frames",
                    track.track_id,
                    track.frames_since_match(frame_index)
                );
            }
            keep
        });

        for idet in unmatched_detections {
            if let Some(det) = slots[idet].take() {
                let track_id = self.next_track_id;
                self.next_track_id += 1;
                debug!(
                    target: "tracker",
                    "track {track_id} created at frame {frame_index} from detection {}",
                    det.caller_index
                );
                self.tracks
                    .push(Track::new(track_id, det, &self.kalman_filter, frame_index));
                observed.insert(track_id);
            }
        }

        self.previous_frame = Some(frame_index);

        Ok(self
            .tracks
            .iter()
            .filter(|t| observed.contains(&t.track_id))
            .collect())
    }

    /// Process one frame and return `(caller_index, track_id)` pairs for the
    /// objects observed in it.
    pub fn track_frame(
        &mut self,
        frame_index: u64,
        detections: Vec<Detection>,
    ) -> Result<Vec<TrackOutput>> {
        let observed = self.update(frame_index, detections)?;
        Ok(current_frame_outputs(observed, frame_index))
    }
}
