mod distance;
mod engine;
mod kalman_filter;
mod matching;
mod output;
mod rect;
mod track;
mod track_state;

pub use distance::DistanceFunction;
pub use engine::{TrackEngine, TrackerConfig};
pub use matching::{AssignmentResult, Detection, Matching, greedy_assignment, linear_assignment};
pub use output::{TrackOutput, current_frame_outputs};
pub use rect::Rect;
pub use track::Track;
pub use track_state::TrackState;
