//! Deterministic k-means over RGB pixels.

use ndarray::{Array1, Array2, ArrayView1, Axis};

use crate::color::{ColorSample, Rgb};

/// Result of clustering `n` pixels into at most `k` groups.
#[derive(Debug, Clone)]
pub struct Clustering {
    /// Cluster index for every pixel, in pixel order.
    pub labels: Vec<usize>,
    /// `(clusters, 3)` centroid colors.
    pub centroids: Array2<f32>,
    /// Lloyd iterations actually run.
    pub iterations: usize,
}

fn squared_distance(a: ArrayView1<f32>, b: ArrayView1<f32>) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y) * (x - y)).sum()
}

/// Index of the closest centroid, lowest index on ties.
fn nearest(pixel: ArrayView1<f32>, centroids: &Array2<f32>) -> usize {
    let mut best = 0;
    let mut best_dist = f32::INFINITY;
    for (i, centroid) in centroids.outer_iter().enumerate() {
        let dist = squared_distance(pixel, centroid);
        if dist < best_dist {
            best = i;
            best_dist = dist;
        }
    }
    best
}

/// Max-min seeding: start from the pixel closest to the mean color, then keep
/// adding the pixel farthest from every chosen seed. Stops early once every
/// pixel coincides with a seed.
fn seed(pixels: &Array2<f32>, k: usize) -> Array2<f32> {
    let Some(mean) = pixels.mean_axis(Axis(0)) else {
        return Array2::zeros((0, 3));
    };

    let first = pixels
        .outer_iter()
        .enumerate()
        .fold((0, f32::INFINITY), |best, (i, p)| {
            let dist = squared_distance(p, mean.view());
            if dist < best.1 { (i, dist) } else { best }
        })
        .0;

    let mut chosen = vec![first];
    let mut min_dist: Array1<f32> = pixels
        .outer_iter()
        .map(|p| squared_distance(p, pixels.row(first)))
        .collect();

    while chosen.len() < k {
        let (far, far_dist) = min_dist
            .iter()
            .enumerate()
            .fold((0, 0.0f32), |best, (i, &d)| if d > best.1 { (i, d) } else { best });
        if far_dist <= 0.0 {
            break;
        }
        chosen.push(far);
        for (d, p) in min_dist.iter_mut().zip(pixels.outer_iter()) {
            *d = d.min(squared_distance(p, pixels.row(far)));
        }
    }

    pixels.select(Axis(0), &chosen)
}

/// Cluster `(n, 3)` pixels into at most `k` colors with Lloyd's algorithm.
///
/// Iterates until no centroid moves by more than `tolerance` (squared
/// distance) or `max_iterations` is reached. A cluster that loses all its
/// pixels keeps its previous centroid.
pub fn kmeans(pixels: &Array2<f32>, k: usize, max_iterations: usize, tolerance: f32) -> Clustering {
    let mut centroids = seed(pixels, k);
    let clusters = centroids.nrows();
    let mut labels = vec![0; pixels.nrows()];
    let mut iterations = 0;

    if clusters == 0 {
        return Clustering {
            labels,
            centroids,
            iterations,
        };
    }

    while iterations < max_iterations {
        iterations += 1;

        for (label, pixel) in labels.iter_mut().zip(pixels.outer_iter()) {
            *label = nearest(pixel, &centroids);
        }

        let mut sums = Array2::<f32>::zeros((clusters, 3));
        let mut counts = vec![0usize; clusters];
        for (&label, pixel) in labels.iter().zip(pixels.outer_iter()) {
            let mut row = sums.row_mut(label);
            row += &pixel;
            counts[label] += 1;
        }

        let mut shift = 0.0f32;
        for (i, &count) in counts.iter().enumerate() {
            if count == 0 {
                continue;
            }
            let updated = sums.row(i).mapv(|s| s / count as f32);
            shift = shift.max(squared_distance(updated.view(), centroids.row(i)));
            centroids.row_mut(i).assign(&updated);
        }

        if shift <= tolerance {
            break;
        }
    }

    log::trace!(target: "color", "k-means settled on {clusters} clusters after {iterations} iterations");

    Clustering {
        labels,
        centroids,
        iterations,
    }
}

fn to_rgb(centroid: ArrayView1<f32>) -> Rgb {
    let channel = |c: f32| c.round().clamp(0.0, 255.0) as u8;
    [channel(centroid[0]), channel(centroid[1]), channel(centroid[2])]
}

/// Turn a cluster assignment into colors weighted by their share of pixels.
///
/// Clusters without pixels are dropped. The result is sorted ascending by
/// `(proportion, rgb)`, so the largest cluster comes last.
pub fn summarize_clusters(labels: &[usize], centroids: &Array2<f32>) -> Vec<ColorSample> {
    if labels.is_empty() {
        return Vec::new();
    }

    let mut counts = vec![0usize; centroids.nrows()];
    for &label in labels {
        if let Some(count) = counts.get_mut(label) {
            *count += 1;
        }
    }
    let total: usize = counts.iter().sum();
    if total == 0 {
        return Vec::new();
    }

    let mut samples: Vec<ColorSample> = counts
        .iter()
        .zip(centroids.outer_iter())
        .filter(|&(&count, _)| count > 0)
        .map(|(&count, centroid)| ColorSample {
            rgb: to_rgb(centroid),
            proportion: count as f64 / total as f64,
        })
        .collect();

    samples.sort_by(|a, b| a.proportion.total_cmp(&b.proportion).then(a.rgb.cmp(&b.rgb)));
    samples
}
