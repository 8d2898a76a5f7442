//! Dominant color clustering over an object crop.

use image::RgbImage;
use image::imageops::{self, FilterType};
use ndarray::Array2;

use crate::color::ColorSample;
use crate::color::kmeans::{kmeans, summarize_clusters};
use crate::error::{Error, Result};

/// Configuration for the [`ColorExtractor`].
#[derive(Debug, Clone, PartialEq)]
pub struct ColorExtractorConfig {
    /// Upper bound on the number of colors returned.
    pub cluster_count: usize,
    /// Crops with a side longer than this are shrunk so that the longer side
    /// matches it.
    pub downsample_target: u32,
    /// Lloyd iteration cap.
    pub max_iterations: usize,
    /// Squared centroid shift below which clustering is considered settled.
    pub tolerance: f32,
}

impl Default for ColorExtractorConfig {
    fn default() -> Self {
        Self {
            cluster_count: 5,
            downsample_target: 32,
            max_iterations: 300,
            tolerance: 1e-4,
        }
    }
}

impl ColorExtractorConfig {
    fn validate(&self) -> Result<()> {
        if self.cluster_count == 0 {
            return Err(Error::config("cluster_count", "must be at least 1"));
        }
        if self.downsample_target == 0 {
            return Err(Error::config("downsample_target", "must be at least 1"));
        }
        if self.max_iterations == 0 {
            return Err(Error::config("max_iterations", "must be at least 1"));
        }
        if self.tolerance.is_nan() || self.tolerance < 0.0 {
            return Err(Error::config(
                "tolerance",
                format!("must be non-negative, got {}", self.tolerance),
            ));
        }
        Ok(())
    }
}

/// Reduces an image region to a handful of weighted colors.
///
/// Holds no mutable state; one extractor can serve many threads.
#[derive(Debug, Clone, Default)]
pub struct ColorExtractor {
    config: ColorExtractorConfig,
}

impl ColorExtractor {
    pub fn new(config: ColorExtractorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ColorExtractorConfig {
        &self.config
    }

    /// Cluster the region's colors.
    ///
    /// Returns an empty list for a missing or zero-sized region. Otherwise the
    /// samples are sorted ascending by `(proportion, rgb)` and their
    /// proportions sum to one.
    pub fn extract(&self, image: Option<&RgbImage>) -> Vec<ColorSample> {
        let Some(image) = image else {
            return Vec::new();
        };
        if image.width() == 0 || image.height() == 0 {
            return Vec::new();
        }

        let resized = downsample(image, self.config.downsample_target);
        let region = resized.as_ref().unwrap_or(image);
        let pixels = pixel_matrix(region);

        let clustering = kmeans(
            &pixels,
            self.config.cluster_count,
            self.config.max_iterations,
            self.config.tolerance,
        );
        summarize_clusters(&clustering.labels, &clustering.centroids)
    }
}

/// Shrink `image` isotropically so its longer side equals `target`, using
/// linear interpolation. Returns `None` when no side exceeds `target`.
pub fn downsample(image: &RgbImage, target: u32) -> Option<RgbImage> {
    let (width, height) = image.dimensions();
    let longer = width.max(height);
    if longer <= target {
        return None;
    }

    let scale = f64::from(target) / f64::from(longer);
    let scaled = |side: u32| ((f64::from(side) * scale).round() as u32).clamp(1, target);
    let (new_width, new_height) = (scaled(width), scaled(height));

    log::trace!(target: "color", "downsampling {width}x{height} to {new_width}x{new_height}");
    Some(imageops::resize(image, new_width, new_height, FilterType::Triangle))
}

fn pixel_matrix(image: &RgbImage) -> Array2<f32> {
    let raw = image.as_raw();
    let count = (image.width() * image.height()) as usize;
    Array2::from_shape_fn((count, 3), |(i, c)| f32::from(raw[i * 3 + c]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_rejects_zero_clusters() {
        let config = ColorExtractorConfig {
            cluster_count: 0,
            ..ColorExtractorConfig::default()
        };
        assert!(matches!(
            ColorExtractor::new(config),
            Err(Error::InvalidConfig { field: "cluster_count", .. })
        ));
    }

    #[test]
    fn test_absent_and_empty_regions() {
        let extractor = ColorExtractor::default();
        assert!(extractor.extract(None).is_empty());
        assert!(extractor.extract(Some(&RgbImage::new(0, 10))).is_empty());
    }

    #[test]
    fn test_downsample_keeps_aspect_ratio() {
        let image = RgbImage::new(128, 64);
        let small = downsample(&image, 32).unwrap();
        assert_eq!(small.dimensions(), (32, 16));

        let tall = downsample(&RgbImage::new(10, 100), 32).unwrap();
        assert_eq!(tall.dimensions(), (3, 32));

        assert!(downsample(&RgbImage::new(32, 20), 32).is_none());
    }

    #[test]
    fn test_downsample_never_collapses_a_side() {
        let sliver = downsample(&RgbImage::new(1000, 1), 32).unwrap();
        assert_eq!(sliver.dimensions(), (32, 1));
    }

    #[test]
    fn test_single_color_region() {
        let image = RgbImage::from_pixel(40, 40, Rgb([12, 200, 40]));
        let samples = ColorExtractor::default().extract(Some(&image));
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].rgb, [12, 200, 40]);
        assert!((samples[0].proportion - 1.0).abs() < 1e-9);
    }
}
