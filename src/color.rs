//! Appearance summarisation: reduce an object crop to one named color.
//!
//! [`ColorExtractor`] clusters the crop's pixels into weighted colors and
//! [`ColorLabeler`] maps those to a CSS3 color name, penalising neutral
//! tones. Neither keeps state between calls.

mod extract;
mod kmeans;
mod label;
mod palette;

pub use extract::{ColorExtractor, ColorExtractorConfig, downsample};
pub use kmeans::{Clustering, kmeans, summarize_clusters};
pub use label::{ColorLabeler, ColorLabelerConfig};
pub use palette::{CSS3_COLORS, NamedColor, channel_range, name_to_rgb, nearest_named_color};

use image::RgbImage;

/// An 8-bit RGB triple.
pub type Rgb = [u8; 3];

/// One clustered color and the fraction of sampled pixels assigned to it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorSample {
    pub rgb: Rgb,
    pub proportion: f64,
}

/// Dominant named color of `image` with default settings, `None` when
/// undetermined.
pub fn dominant_color(image: Option<&RgbImage>) -> Option<NamedColor> {
    let samples = ColorExtractor::default().extract(image);
    ColorLabeler::default().label(&samples)
}
