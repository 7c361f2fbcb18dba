//! Matching utilities: center distances and size-gated nearest-neighbour assignment.

use nalgebra::Point2;
use ndarray::Array2;

/// Compute the Euclidean center distance matrix between tracks (rows) and detections (columns).
pub fn center_distance(track_centers: &[Point2<f32>], det_centers: &[Point2<f32>]) -> Array2<f32> {
    let mut dists = Array2::zeros((track_centers.len(), det_centers.len()));
    for (i, t) in track_centers.iter().enumerate() {
        for (j, d) in det_centers.iter().enumerate() {
            dists[[i, j]] = nalgebra::distance(t, d);
        }
    }
    dists
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssignmentResult {
    /// `(track_row, detection_col)` pairs, in detection order
    pub matches: Vec<(usize, usize)>,
    pub unmatched_tracks: Vec<usize>,
    pub unmatched_detections: Vec<usize>,
}

/// Assign detections to tracks greedily, one detection at a time in column order.
///
/// Each detection takes the nearest track not already claimed this frame,
/// provided the distance is strictly below that detection's gate. On an
/// exact distance tie the lower row (the older track) wins.
pub fn gated_nearest_assignment(cost_matrix: &Array2<f32>, gates: &[f32]) -> AssignmentResult {
    let (num_rows, num_cols) = cost_matrix.dim();
    debug_assert_eq!(gates.len(), num_cols);

    let mut claimed = vec![false; num_rows];
    let mut matches = Vec::new();
    let mut unmatched_detections = Vec::new();

    for (col, &gate) in gates.iter().enumerate().take(num_cols) {
        let mut best: Option<(usize, f32)> = None;
        for row in 0..num_rows {
            if claimed[row] {
                continue;
            }
            let d = cost_matrix[[row, col]];
            if d < gate && best.is_none_or(|(_, best_d)| d < best_d) {
                best = Some((row, d));
            }
        }

        match best {
            Some((row, _)) => {
                claimed[row] = true;
                matches.push((row, col));
            }
            None => unmatched_detections.push(col),
        }
    }

    let unmatched_tracks = claimed
        .iter()
        .enumerate()
        .filter_map(|(i, &c)| if c { None } else { Some(i) })
        .collect();

    AssignmentResult {
        matches,
        unmatched_tracks,
        unmatched_detections,
    }
}
