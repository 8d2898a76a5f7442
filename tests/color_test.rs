use image::{Rgb, RgbImage};
use vqtrack::{ColorExtractor, ColorExtractorConfig, ColorLabeler, ColorSample, dominant_color};

fn striped(width: u32, height: u32, stripes: &[(u32, [u8; 3])]) -> RgbImage {
    RgbImage::from_fn(width, height, |x, _| {
        let mut start = 0;
        for &(cols, rgb) in stripes {
            if x < start + cols {
                return Rgb(rgb);
            }
            start += cols;
        }
        Rgb([0, 0, 0])
    })
}

fn proportion_sum(samples: &[ColorSample]) -> f64 {
    samples.iter().map(|s| s.proportion).sum()
}

#[test]
fn test_proportions_sum_to_one() {
    let gradient = RgbImage::from_fn(97, 61, |x, y| {
        Rgb([(x * 2) as u8, (y * 4) as u8, ((x + y) % 256) as u8])
    });
    let samples = ColorExtractor::default().extract(Some(&gradient));

    assert!(!samples.is_empty());
    assert!(samples.len() <= 5);
    assert!((proportion_sum(&samples) - 1.0).abs() < 1e-6);
}

#[test]
fn test_samples_sorted_ascending() {
    let image = striped(20, 10, &[(12, [130, 130, 132]), (4, [200, 30, 30]), (4, [10, 10, 10])]);
    let samples = ColorExtractor::default().extract(Some(&image));

    assert_eq!(samples.len(), 3);
    for pair in samples.windows(2) {
        assert!((pair[0].proportion, pair[0].rgb) <= (pair[1].proportion, pair[1].rgb));
    }
    let last = samples.last().unwrap();
    assert_eq!(last.rgb, [130, 130, 132]);
    assert!((last.proportion - 0.6).abs() < 1e-9);
}

#[test]
fn test_gray_background_does_not_win() {
    let image = striped(20, 10, &[(12, [130, 130, 132]), (4, [200, 30, 30]), (4, [10, 10, 10])]);
    let color = dominant_color(Some(&image)).unwrap();
    assert_eq!(color.name, "firebrick");
    assert_eq!(color.rgb, [178, 34, 34]);
}

#[test]
fn test_large_crop_is_downsampled() {
    let image = striped(400, 100, &[(200, [20, 40, 220]), (200, [240, 240, 240])]);
    let samples = ColorExtractor::default().extract(Some(&image));

    assert!((proportion_sum(&samples) - 1.0).abs() < 1e-6);
    let color = ColorLabeler::default().label(&samples).unwrap();
    assert_eq!(color.name, "mediumblue");
}

#[test]
fn test_cluster_count_bounds_output() {
    let extractor = ColorExtractor::new(ColorExtractorConfig {
        cluster_count: 2,
        ..ColorExtractorConfig::default()
    })
    .unwrap();
    let image = striped(30, 5, &[(10, [255, 0, 0]), (10, [0, 255, 0]), (10, [0, 0, 255])]);
    let samples = extractor.extract(Some(&image));

    assert_eq!(samples.len(), 2);
    assert!((proportion_sum(&samples) - 1.0).abs() < 1e-6);
}

#[test]
fn test_absent_image_is_undetermined() {
    assert!(ColorExtractor::default().extract(None).is_empty());
    assert_eq!(dominant_color(None), None);
}
