/// Track state enumeration for object tracking lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackState {
    /// Matched to a detection in the most recently processed frame
    #[default]
    Tracked,
    /// Remembered by the engine but not matched in the most recent frame
    Lost,
}
