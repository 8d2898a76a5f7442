//! Reconciliation of engine tracks with the caller's per-frame records.

use crate::tracker::track::Track;

/// A track observed in the current frame, keyed by the caller's detection index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TrackOutput {
    pub caller_index: usize,
    pub track_id: u64,
}

/// Pair every track matched in `frame_index` with the caller index of the
/// detection it was matched to.
///
/// Tracks the engine still remembers but did not observe in this frame are
/// skipped: their last caller index belongs to an earlier frame.
pub fn current_frame_outputs<'a, I>(tracks: I, frame_index: u64) -> Vec<TrackOutput>
where
    I: IntoIterator<Item = &'a Track>,
{
    tracks
        .into_iter()
        .filter(|track| track.is_matched_in(frame_index))
        .map(|track| TrackOutput {
            caller_index: track.last_detection.caller_index,
            track_id: track.track_id,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::kalman_filter::KalmanFilter;
    use crate::tracker::matching::Detection;

    #[test]
    fn test_skips_tracks_not_seen_this_frame() {
        let kf = KalmanFilter::new();
        let seen = Track::new(1, Detection::new(0.0, 0.0, 10.0, 10.0, 0.9, 3), &kf, 5);
        let remembered = Track::new(2, Detection::new(50.0, 0.0, 60.0, 10.0, 0.9, 0), &kf, 4);

        let out = current_frame_outputs([&seen, &remembered], 5);
        assert_eq!(
            out,
            vec![TrackOutput {
                caller_index: 3,
                track_id: 1
            }]
        );
        assert!(current_frame_outputs(&[seen, remembered], 6).is_empty());
    }
}
