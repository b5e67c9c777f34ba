use super::*;
use crate::types::{RegionBounds, RegionSpec};
use image::{Rgb, RgbImage};

fn solid(width: u32, height: u32, rgb: [u8; 3]) -> RgbImage {
    RgbImage::from_pixel(width, height, Rgb(rgb))
}

fn region(name: &str, x: i64, y: i64, w: i64, h: i64) -> RegionSpec {
    RegionSpec {
        name: name.to_string(),
        role: None,
        text: None,
        bounds: RegionBounds { x, y, w, h },
    }
}

// -- RMS --------------------------------------------------------------------

#[test]
fn rms_identical_images_score_exactly_100() {
    let img = solid(100, 100, [255, 0, 0]);
    assert_eq!(calculate_similarity(&img, &img), 100.0);
}

#[test]
fn rms_black_vs_white_scores_zero() {
    let a = solid(50, 50, [0, 0, 0]);
    let b = solid(50, 50, [255, 255, 255]);
    assert_eq!(calculate_similarity(&a, &b), 0.0);
}

#[test]
fn rms_is_symmetric() {
    let a = solid(40, 40, [10, 20, 30]);
    let b = solid(40, 40, [90, 80, 70]);
    assert_eq!(calculate_similarity(&a, &b), calculate_similarity(&b, &a));
}

#[test]
fn rms_resizes_mismatched_inputs_instead_of_failing() {
    let a = solid(40, 20, [0, 128, 255]);
    let b = solid(20, 40, [0, 128, 255]);
    // Same color everywhere, so the upscaled comparison stays perfect.
    assert_eq!(calculate_similarity(&a, &b), 100.0);
}

#[test]
fn rms_partial_difference_lands_between_bounds() {
    let a = solid(40, 40, [0, 0, 0]);
    let mut b = solid(40, 40, [0, 0, 0]);
    for y in 0..40 {
        for x in 0..20 {
            b.put_pixel(x, y, Rgb([255, 255, 255]));
        }
    }
    let score = calculate_similarity(&a, &b);
    assert!(score > 0.0 && score < 100.0, "got {score}");
}

// -- SSIM -------------------------------------------------------------------

#[test]
fn ssim_identical_images_score_100() {
    let img = solid(100, 100, [255, 0, 0]);
    assert_eq!(calculate_ssim(&img, &img), 100.0);
}

#[test]
fn ssim_is_symmetric() {
    let mut a = solid(64, 64, [30, 30, 30]);
    for y in 20..40 {
        for x in 20..40 {
            a.put_pixel(x, y, Rgb([220, 220, 220]));
        }
    }
    let b = solid(64, 64, [30, 30, 30]);
    assert_eq!(calculate_ssim(&a, &b), calculate_ssim(&b, &a));
}

#[test]
fn ssim_structural_change_scores_below_identical() {
    let a = solid(64, 64, [128, 128, 128]);
    let mut b = solid(64, 64, [128, 128, 128]);
    for y in 0..64 {
        for x in 0..32 {
            b.put_pixel(x, y, Rgb([0, 0, 0]));
        }
    }
    let score = calculate_ssim(&a, &b);
    assert!(score < 100.0, "structural change must lower the score: {score}");
}

#[test]
fn ssim_returns_zero_when_no_window_fits() {
    let a = solid(8, 8, [10, 10, 10]);
    let b = solid(8, 8, [10, 10, 10]);
    assert_eq!(calculate_ssim(&a, &b), 0.0);
}

// -- diff image -------------------------------------------------------------

#[test]
fn diff_image_is_black_for_identical_inputs() {
    let img = solid(30, 30, [200, 100, 50]);
    let diff = create_diff_image(&img, &img);
    assert!(diff.pixels().all(|p| p.0 == [0, 0, 0]));
}

#[test]
fn diff_image_enhances_small_differences() {
    let a = solid(30, 30, [100, 100, 100]);
    let b = solid(30, 30, [110, 100, 100]);
    let diff = create_diff_image(&a, &b);
    // |100 - 110| * 3 = 30 on the red channel.
    assert_eq!(diff.get_pixel(0, 0).0, [30, 0, 0]);
}

#[test]
fn diff_image_clamps_at_channel_max() {
    let a = solid(30, 30, [0, 0, 0]);
    let b = solid(30, 30, [200, 0, 0]);
    let diff = create_diff_image(&a, &b);
    assert_eq!(diff.get_pixel(0, 0).0, [255, 0, 0]);
}

// -- band analysis ----------------------------------------------------------

#[test]
fn band_analysis_reports_zero_for_identical_images() {
    let img = solid(100, 100, [255, 0, 0]);
    match analyze_differences(&img, &img) {
        RegionAnalysis::Bands { top, middle, bottom } => {
            assert_eq!(top, 0.0);
            assert_eq!(middle, 0.0);
            assert_eq!(bottom, 0.0);
        }
        other => panic!("expected band percentages, got {other:?}"),
    }
}

#[test]
fn band_analysis_localizes_differences() {
    let a = solid(60, 90, [255, 255, 255]);
    let mut b = a.clone();
    // Corrupt only the top third.
    for y in 0..30 {
        for x in 0..60 {
            b.put_pixel(x, y, Rgb([0, 0, 0]));
        }
    }
    match analyze_differences(&a, &b) {
        RegionAnalysis::Bands { top, middle, bottom } => {
            assert_eq!(top, 100.0);
            assert_eq!(middle, 0.0);
            assert_eq!(bottom, 0.0);
        }
        other => panic!("expected band percentages, got {other:?}"),
    }
}

#[test]
fn band_analysis_short_circuits_on_size_mismatch() {
    let a = solid(100, 50, [0, 0, 0]);
    let b = solid(80, 50, [0, 0, 0]);
    match analyze_differences(&a, &b) {
        RegionAnalysis::SizeMismatch {
            sizes_different,
            original,
            current,
            recommendation,
        } => {
            assert!(sizes_different);
            assert_eq!((original.width, original.height), (100, 50));
            assert_eq!((current.width, current.height), (80, 50));
            assert!(recommendation.contains("--auto-viewport"));
            assert!(recommendation.contains("100x50"));
        }
        other => panic!("expected size mismatch, got {other:?}"),
    }
}

// -- font-size suggestions --------------------------------------------------

#[test]
fn font_suggestions_empty_for_identical_images() {
    let img = solid(200, 200, [128, 128, 128]);
    assert!(suggest_font_sizes(&img, &img).is_empty());
}

#[test]
fn font_suggestions_flag_high_difference_bands() {
    let a = solid(200, 200, [255, 255, 255]);
    let mut b = a.clone();
    // Band 0 spans rows 0..10; blacken it completely.
    for y in 0..10 {
        for x in 0..200 {
            b.put_pixel(x, y, Rgb([0, 0, 0]));
        }
    }
    let suggestions = suggest_font_sizes(&a, &b);
    assert_eq!(suggestions.len(), 1);
    let s = &suggestions[0];
    assert_eq!(s.band_index, 0);
    assert_eq!(s.y_range, [0, 10]);
    // band height 10 * 0.6 = 6 -> floored to 10 -> nearest standard is 12.
    assert_eq!(s.suggested_font_size, "12px");
    assert_eq!(s.confidence, Confidence::High);
}

#[test]
fn font_suggestion_confidence_scales_with_difference() {
    let a = solid(200, 200, [100, 100, 100]);
    let mut b = a.clone();
    // A moderate shift: mean diff in band 0 is ~20 (threshold 15, high 30).
    for y in 0..10 {
        for x in 0..200 {
            b.put_pixel(x, y, Rgb([120, 120, 120]));
        }
    }
    let suggestions = suggest_font_sizes(&a, &b);
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].confidence, Confidence::Medium);
}

// -- per-region SSIM --------------------------------------------------------

#[test]
fn region_ssim_skips_undersized_regions() {
    let a = solid(100, 100, [0, 0, 0]);
    let b = solid(100, 100, [0, 0, 0]);
    let regions = vec![
        region("narrow", 0, 0, 10, 50),
        region("short", 0, 0, 50, 10),
        region("ok", 0, 0, 50, 50),
    ];
    let results = calculate_region_ssim(&a, &b, &regions);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].name, "ok");
}

#[test]
fn region_ssim_skips_regions_that_collapse_after_clamping() {
    let a = solid(100, 100, [0, 0, 0]);
    let b = solid(100, 100, [0, 0, 0]);
    // 40px wide on paper, but only 5px remain inside the image.
    let regions = vec![region("clipped", 95, 0, 40, 40)];
    assert!(calculate_region_ssim(&a, &b, &regions).is_empty());
}

#[test]
fn region_ssim_sorts_worst_first_and_flags_failures() {
    let a = solid(100, 100, [255, 255, 255]);
    let mut b = a.clone();
    // Corrupt the left half only.
    for y in 0..100 {
        for x in 0..50 {
            b.put_pixel(x, y, Rgb([0, 0, 0]));
        }
    }
    let regions = vec![
        region("right", 50, 0, 50, 100),
        region("left", 0, 0, 50, 100),
    ];
    let results = calculate_region_ssim(&a, &b, &regions);
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].name, "left");
    assert!(!results[0].passed);
    assert_eq!(results[1].name, "right");
    assert!(results[1].passed);
    assert_eq!(results[1].ssim, 100.0);
}
