//! Matching utilities for multi-object tracking.

use crate::tracker::rect::Rect;
use ndarray::Array2;

/// Detection input for the tracker.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    /// Bounding box, built from two corner points (x1, y1, x2, y2)
    pub bbox: Rect,
    /// Detection confidence score
    pub score: f32,
    /// Caller supplied index of the originating object record, unique within a frame
    pub caller_index: usize,
}

impl Detection {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32, score: f32, caller_index: usize) -> Self {
        Self {
            bbox: Rect::from_tlbr(x1, y1, x2, y2),
            score,
            caller_index,
        }
    }

    pub fn from_rect(bbox: Rect, score: f32, caller_index: usize) -> Self {
        Self {
            bbox,
            score,
            caller_index,
        }
    }
}

/// How the cost matrix is turned into track/detection pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Matching {
    /// Repeatedly take the cheapest admissible pair. Ties go to the lower
    /// track row, then the lower detection column.
    #[default]
    Greedy,
    /// Minimum total cost assignment (Jonker-Volgenant).
    Optimal,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssignmentResult {
    pub matches: Vec<(usize, usize)>,
    pub unmatched_tracks: Vec<usize>,
    pub unmatched_detections: Vec<usize>,
}

impl AssignmentResult {
    fn from_matches(matches: Vec<(usize, usize)>, num_rows: usize, num_cols: usize) -> Self {
        let mut row_used = vec![false; num_rows];
        let mut col_used = vec![false; num_cols];
        for &(r, c) in &matches {
            row_used[r] = true;
            col_used[c] = true;
        }
        Self {
            matches,
            unmatched_tracks: (0..num_rows).filter(|&r| !row_used[r]).collect(),
            unmatched_detections: (0..num_cols).filter(|&c| !col_used[c]).collect(),
        }
    }
}

#[inline]
fn admissible(cost: f32, thresh: f32) -> bool {
    !cost.is_nan() && cost <= thresh
}

/// Solve the assignment with the selected strategy.
pub fn assign(cost_matrix: &Array2<f32>, thresh: f32, matching: Matching) -> AssignmentResult {
    match matching {
        Matching::Greedy => greedy_assignment(cost_matrix, thresh),
        Matching::Optimal => linear_assignment(cost_matrix, thresh),
    }
}

/// Greedy matching by ascending cost.
///
/// Rows are expected in ascending track id order so that row order is the
/// id tie-break.
pub fn greedy_assignment(cost_matrix: &Array2<f32>, thresh: f32) -> AssignmentResult {
    let (num_rows, num_cols) = cost_matrix.dim();

    let mut candidates: Vec<(f32, usize, usize)> = cost_matrix
        .indexed_iter()
        .filter(|&(_, &cost)| admissible(cost, thresh))
        .map(|((r, c), &cost)| (cost, r, c))
        .collect();
    candidates.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)).then(a.2.cmp(&b.2)));

    let mut row_used = vec![false; num_rows];
    let mut col_used = vec![false; num_cols];
    let mut matches = Vec::new();
    for (_, r, c) in candidates {
        if row_used[r] || col_used[c] {
            continue;
        }
        row_used[r] = true;
        col_used[c] = true;
        matches.push((r, c));
    }

    AssignmentResult::from_matches(matches, num_rows, num_cols)
}

/// Optimal matching; inadmissible pairs are padded with a prohibitive cost
/// and dropped from the solution.
pub fn linear_assignment(cost_matrix: &Array2<f32>, thresh: f32) -> AssignmentResult {
    let (num_rows, num_cols) = cost_matrix.dim();

    if num_rows == 0 || num_cols == 0 {
        return AssignmentResult::from_matches(vec![], num_rows, num_cols);
    }

    const INADMISSIBLE: f64 = 1e6;
    let size = num_rows.max(num_cols);
    let mut padded = Array2::<f64>::from_elem((size, size), INADMISSIBLE);

    for i in 0..num_rows {
        for j in 0..num_cols {
            let cost = cost_matrix[[i, j]];
            if admissible(cost, thresh) {
                padded[[i, j]] = cost as f64;
            }
        }
    }

    let mut matches = vec![];
    match lapjv::lapjv(&padded) {
        Ok((row_to_col, _)) => {
            for (row_idx, &col_idx) in row_to_col.iter().enumerate().take(num_rows) {
                if col_idx < num_cols && admissible(cost_matrix[[row_idx, col_idx]], thresh) {
                    matches.push((row_idx, col_idx));
                }
            }
        }
        Err(err) => {
            log::warn!(target: "tracker", "linear assignment failed, falling back to greedy: {err:?}");
            return greedy_assignment(cost_matrix, thresh);
        }
    }

    AssignmentResult::from_matches(matches, num_rows, num_cols)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_greedy_picks_cheapest_first() {
        let costs = array![[0.1, 0.2], [0.05, 0.9]];
        let result = greedy_assignment(&costs, 0.7);
        assert_eq!(result.matches, vec![(1, 0), (0, 1)]);
        assert!(result.unmatched_tracks.is_empty());
        assert!(result.unmatched_detections.is_empty());
    }

    #[test]
    fn test_greedy_threshold_is_inclusive() {
        let costs = array![[0.7, 0.71]];
        let result = greedy_assignment(&costs, 0.7);
        assert_eq!(result.matches, vec![(0, 0)]);
        assert_eq!(result.unmatched_detections, vec![1]);
    }

    #[test]
    fn test_greedy_tie_goes_to_lower_row() {
        let costs = array![[0.3], [0.3]];
        let result = greedy_assignment(&costs, 0.7);
        assert_eq!(result.matches, vec![(0, 0)]);
        assert_eq!(result.unmatched_tracks, vec![1]);
    }

    #[test]
    fn test_nan_is_inadmissible() {
        let costs = array![[f32::NAN]];
        assert!(greedy_assignment(&costs, 0.7).matches.is_empty());
        assert!(linear_assignment(&costs, 0.7).matches.is_empty());
    }

    #[test]
    fn test_linear_minimises_total_cost() {
        // greedy would take (0, 0) then be forced into (1, 1) at 0.6
        let costs = array![[0.1, 0.2], [0.15, 0.6]];
        let result = linear_assignment(&costs, 0.7);
        let mut matches = result.matches.clone();
        matches.sort();
        assert_eq!(matches, vec![(0, 1), (1, 0)]);
    }

    #[test]
    fn test_linear_empty_inputs() {
        let costs = Array2::<f32>::zeros((0, 3));
        let result = linear_assignment(&costs, 0.7);
        assert!(result.matches.is_empty());
        assert_eq!(result.unmatched_detections, vec![0, 1, 2]);
    }

    #[test]
    fn test_linear_rejects_above_threshold() {
        let costs = array![[0.9, 0.95], [0.8, 0.1]];
        let result = linear_assignment(&costs, 0.7);
        assert_eq!(result.matches, vec![(1, 1)]);
        assert_eq!(result.unmatched_tracks, vec![0]);
        assert_eq!(result.unmatched_detections, vec![0]);
    }
}
