//! Distance functions between a predicted track box and a detection box.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use ndarray::Array2;

use crate::error::Error;
use crate::tracker::rect::Rect;

type CustomDistance = Arc<dyn Fn(&Rect, &Rect) -> f32 + Send + Sync>;

/// Selects how the cost between a track and a detection is computed.
///
/// Point-based distances treat a box as its two corner points.
#[derive(Clone, Default)]
pub enum DistanceFunction {
    /// `1 - IoU`, bounded in `[0, 1]`.
    #[default]
    Iou,
    /// Mean of the euclidean distances between matching corners.
    MeanEuclidean,
    /// Mean of the manhattan distances between matching corners.
    MeanManhattan,
    /// Sum of the manhattan distances between matching corners.
    Manhattan,
    /// Frobenius norm of the corner difference matrix.
    Frobenius,
    /// Caller supplied distance.
    Custom(CustomDistance),
}

impl DistanceFunction {
    /// Wrap a closure as a distance function.
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&Rect, &Rect) -> f32 + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(f))
    }

    pub fn distance(&self, predicted: &Rect, detected: &Rect) -> f32 {
        let [[ax1, ay1], [ax2, ay2]] = predicted.corners();
        let [[bx1, by1], [bx2, by2]] = detected.corners();
        let diffs = [ax1 - bx1, ay1 - by1, ax2 - bx2, ay2 - by2];

        match self {
            Self::Iou => 1.0 - predicted.iou(detected),
            Self::MeanEuclidean => {
                let top_left = diffs[0].hypot(diffs[1]);
                let bottom_right = diffs[2].hypot(diffs[3]);
                (top_left + bottom_right) / 2.0
            }
            Self::MeanManhattan => diffs.iter().map(|d| d.abs()).sum::<f32>() / 2.0,
            Self::Manhattan => diffs.iter().map(|d| d.abs()).sum(),
            Self::Frobenius => diffs.iter().map(|d| d * d).sum::<f32>().sqrt(),
            Self::Custom(f) => f(predicted, detected),
        }
    }

    /// Compute the `(tracks, detections)` cost matrix.
    pub fn cost_matrix(&self, track_boxes: &[Rect], det_boxes: &[Rect]) -> Array2<f32> {
        let mut dists = Array2::zeros((track_boxes.len(), det_boxes.len()));
        for (i, t) in track_boxes.iter().enumerate() {
            for (j, d) in det_boxes.iter().enumerate() {
                dists[[i, j]] = self.distance(t, d);
            }
        }
        dists
    }
}

impl fmt::Debug for DistanceFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Iou => "iou",
            Self::MeanEuclidean => "mean_euclidean",
            Self::MeanManhattan => "mean_manhattan",
            Self::Manhattan => "manhattan",
            Self::Frobenius => "frobenius",
            Self::Custom(_) => "custom",
        };
        f.write_str(name)
    }
}

impl FromStr for DistanceFunction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "iou" | "iou_opt" => Ok(Self::Iou),
            "mean_euclidean" | "euclidean" => Ok(Self::MeanEuclidean),
            "mean_manhattan" => Ok(Self::MeanManhattan),
            "manhattan" => Ok(Self::Manhattan),
            "frobenius" => Ok(Self::Frobenius),
            other => Err(Error::UnknownDistance(other.to_string())),
        }
    }
}
