use std::collections::HashSet;

use vqtrack::{Detection, Error, TrackEngine, TrackOutput, TrackerConfig};

fn square(x: f32, y: f32, index: usize) -> Detection {
    Detection::new(x, y, x + 100.0, y + 100.0, 0.9, index)
}

fn engine() -> TrackEngine {
    TrackEngine::new(TrackerConfig::default()).unwrap()
}

#[test]
fn test_basic_tracking() {
    let mut tracker = engine();

    // Frame 1: one detection, reported immediately
    let tracks1 = tracker.update(1, vec![square(100.0, 100.0, 0)]).unwrap();
    assert_eq!(tracks1.len(), 1);
    let id1 = tracks1[0].track_id;

    // Frame 2: same object moved slightly
    let tracks2 = tracker.update(2, vec![square(105.0, 105.0, 0)]).unwrap();
    assert_eq!(tracks2.len(), 1);
    assert_eq!(tracks2[0].track_id, id1);

    // Frame 3: object disappears, still remembered
    let tracks3 = tracker.update(3, vec![]).unwrap();
    assert!(tracks3.is_empty());
    assert_eq!(tracker.tracks().len(), 1);

    // Frame 4: object reappears within the retention horizon
    let tracks4 = tracker.update(4, vec![square(115.0, 115.0, 0)]).unwrap();
    assert_eq!(tracks4.len(), 1);
    assert_eq!(tracks4[0].track_id, id1);
}

#[test]
fn test_identity_is_stable_for_smooth_motion() {
    let mut tracker = engine();
    let mut ids = HashSet::new();

    for frame in 0..30u64 {
        let x = 50.0 + 4.0 * frame as f32;
        let out = tracker.track_frame(frame, vec![square(x, 80.0, 0)]).unwrap();
        assert_eq!(out.len(), 1);
        ids.insert(out[0].track_id);
    }

    assert_eq!(ids.len(), 1);
    assert_eq!(tracker.total_track_count(), 1);
}

#[test]
fn test_two_objects_keep_their_ids() {
    let mut tracker = engine();
    let first = tracker
        .track_frame(0, vec![square(0.0, 0.0, 0), square(400.0, 0.0, 1)])
        .unwrap();
    assert_eq!(first.len(), 2);

    // caller indices are per frame; swap them to make sure ids follow the boxes
    let second = tracker
        .track_frame(1, vec![square(403.0, 2.0, 0), square(3.0, 2.0, 1)])
        .unwrap();

    let mut pairs: Vec<(usize, u64)> = second.iter().map(|o| (o.caller_index, o.track_id)).collect();
    pairs.sort();
    assert_eq!(pairs, vec![(0, 2), (1, 1)]);
}

#[test]
fn test_ids_are_never_reused() {
    let config = TrackerConfig {
        retention_horizon: 1,
        ..TrackerConfig::default()
    };
    let mut tracker = TrackEngine::new(config).unwrap();
    let mut seen = Vec::new();

    for round in 0..5u64 {
        let frame = round * 10;
        // far apart boxes so nothing matches an older track
        let x = round as f32 * 1000.0;
        let out = tracker.track_frame(frame, vec![square(x, 0.0, 0)]).unwrap();
        seen.extend(out.iter().map(|o| o.track_id));
        // let the track expire
        tracker.update(frame + 5, vec![]).unwrap();
        assert!(tracker.tracks().is_empty());
    }

    assert_eq!(seen, vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_output_only_contains_tracks_seen_this_frame() {
    let mut tracker = engine();
    tracker
        .track_frame(10, vec![square(0.0, 0.0, 0), square(500.0, 0.0, 1)])
        .unwrap();

    let out = tracker.track_frame(11, vec![square(2.0, 0.0, 4)]).unwrap();
    assert_eq!(
        out,
        vec![TrackOutput {
            caller_index: 4,
            track_id: 1
        }]
    );
    // the second object is still remembered
    assert_eq!(tracker.tracks().len(), 2);
    assert!(tracker.tracks().iter().any(|t| t.track_id == 2 && !t.is_matched_in(11)));
}

#[test]
fn test_gap_tolerance_matches_dense_stream() {
    let mut dense = engine();
    let mut gappy = engine();

    // slow object: 2px per frame
    dense.update(1, vec![square(100.0, 100.0, 0)]).unwrap();
    dense.update(2, vec![square(102.0, 100.0, 0)]).unwrap();
    let dense_out = dense.track_frame(3, vec![square(104.0, 100.0, 0)]).unwrap();

    gappy.update(1, vec![square(100.0, 100.0, 0)]).unwrap();
    let gappy_out = gappy.track_frame(3, vec![square(104.0, 100.0, 0)]).unwrap();

    assert_eq!(dense_out, gappy_out);
    assert_eq!(dense.tracks().len(), gappy.tracks().len());
    assert_eq!(gappy.total_track_count(), 1);
}

#[test]
fn test_immediate_visibility() {
    let mut tracker = engine();
    let out = tracker.track_frame(0, vec![square(10.0, 10.0, 42)]).unwrap();
    assert_eq!(
        out,
        vec![TrackOutput {
            caller_index: 42,
            track_id: 1
        }]
    );
}

#[test]
fn test_non_monotonic_frame_is_rejected() {
    let mut tracker = engine();
    tracker.update(5, vec![square(10.0, 10.0, 0)]).unwrap();
    let before: Vec<_> = tracker
        .tracks()
        .iter()
        .map(|t| (t.track_id, t.rect(), t.last_matched_frame))
        .collect();

    let err = tracker.update(3, vec![square(300.0, 300.0, 0)]).unwrap_err();
    assert_eq!(
        err,
        Error::NonMonotonicFrame {
            previous: 5,
            current: 3
        }
    );

    let after: Vec<_> = tracker
        .tracks()
        .iter()
        .map(|t| (t.track_id, t.rect(), t.last_matched_frame))
        .collect();
    assert_eq!(before, after);
    assert_eq!(tracker.frame_index(), Some(5));
    assert_eq!(tracker.total_track_count(), 1);

    // the engine keeps working afterwards
    assert_eq!(tracker.update(6, vec![square(11.0, 10.0, 0)]).unwrap().len(), 1);
}

#[test]
fn test_distant_detection_starts_new_track() {
    let mut tracker = engine();
    tracker.update(0, vec![square(0.0, 0.0, 0)]).unwrap();
    let out = tracker.track_frame(1, vec![square(90.0, 90.0, 0)]).unwrap();

    // IoU of the two boxes is tiny, well past the 0.7 distance threshold
    assert_eq!(out[0].track_id, 2);
    assert_eq!(tracker.tracks().len(), 2);
}
