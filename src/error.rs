//! Error types shared by the tracker and color modules.

use thiserror::Error;

/// Errors reported by the tracking engine and the color extractor.
///
/// Degenerate inputs (an empty detection set, a missing image region, an
/// empty cluster list) are not errors and never produce one of these.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// `update` was called with a frame index lower than the previous one.
    #[error("frame index {current} is lower than the previously processed frame {previous}")]
    NonMonotonicFrame { previous: u64, current: u64 },

    /// A construction-time parameter is out of range.
    #[error("invalid configuration for `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    /// The distance selector name did not match any built-in distance.
    #[error("unknown distance function `{0}`")]
    UnknownDistance(String),
}

impl Error {
    pub(crate) fn config(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
