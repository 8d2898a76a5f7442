//! Picks one named color out of clustered color samples.

use crate::color::ColorSample;
use crate::color::palette::{NamedColor, nearest_named_color};
use crate::error::{Error, Result};

/// Configuration for the [`ColorLabeler`].
#[derive(Debug, Clone, PartialEq)]
pub struct ColorLabelerConfig {
    /// Named colors whose channel range is at most this are treated as neutral.
    pub gray_range_threshold: u8,
    /// Divisor applied to a neutral color's proportion.
    pub gray_penalty: f64,
}

impl Default for ColorLabelerConfig {
    fn default() -> Self {
        Self {
            gray_range_threshold: 15,
            gray_penalty: 5.0,
        }
    }
}

/// Maps color samples to the best scoring CSS3 color name.
///
/// Grays, near-whites and near-blacks usually come from background or
/// lighting, so their share is divided by `gray_penalty` before comparison.
#[derive(Debug, Clone, Default)]
pub struct ColorLabeler {
    config: ColorLabelerConfig,
}

impl ColorLabeler {
    pub fn new(config: ColorLabelerConfig) -> Result<Self> {
        if config.gray_penalty.is_nan() || config.gray_penalty <= 0.0 {
            return Err(Error::config(
                "gray_penalty",
                format!("must be positive, got {}", config.gray_penalty),
            ));
        }
        Ok(Self { config })
    }

    /// Effective score of `sample` once mapped to `named`.
    pub fn score(&self, named: &NamedColor, sample: &ColorSample) -> f64 {
        if named.channel_range() <= self.config.gray_range_threshold {
            sample.proportion / self.config.gray_penalty
        } else {
            sample.proportion
        }
    }

    /// Best named color, or `None` when there is nothing to choose from.
    ///
    /// Samples are scanned in order keeping a running maximum; a later sample
    /// replaces the current best only with a strictly higher score.
    pub fn label(&self, samples: &[ColorSample]) -> Option<NamedColor> {
        let mut best: Option<(NamedColor, f64)> = None;
        for sample in samples {
            let named = nearest_named_color(sample.rgb);
            let score = self.score(&named, sample);
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((named, score));
            }
        }
        best.map(|(named, _)| named)
    }
}
