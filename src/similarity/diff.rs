//! Difference visualization and band-level analysis.

use image::RgbImage;
use serde::{Deserialize, Serialize};

use crate::color::round2;
use crate::image_io::resize_to_common;
use crate::types::Dimensions;

/// Difference enhancement multiplier for diff image visualization. 3x makes
/// subtle differences visible in the output.
const DIFF_ENHANCE_FACTOR: u32 = 3;

/// Number of horizontal bands analyzed for font-size suggestions.
const FONT_SEARCH_BANDS: u32 = 20;

/// Mean grayscale difference required to flag a band.
const FONT_SEARCH_DIFF_THRESHOLD: f64 = 15.0;

/// Mean difference above which a suggestion is high-confidence.
const FONT_SEARCH_HIGH_CONFIDENCE: f64 = 30.0;

/// Standard font sizes offered as suggestions.
const FONT_SEARCH_SIZES: &[u32] = &[12, 14, 16, 18, 20, 24, 30, 36, 48];

/// Build a visual diff image highlighting differences.
///
/// Pixel-wise absolute difference with each channel multiplied by the
/// enhancement factor, clamped at 255.
pub fn create_diff_image(img1: &RgbImage, img2: &RgbImage) -> RgbImage {
    let (a, b) = resize_to_common(img1, img2);

    let mut out = RgbImage::new(a.width(), a.height());
    for ((pa, pb), po) in a.pixels().zip(b.pixels()).zip(out.pixels_mut()) {
        for c in 0..3 {
            let diff = (pa.0[c] as i32 - pb.0[c] as i32).unsigned_abs();
            po.0[c] = (diff * DIFF_ENHANCE_FACTOR).min(255) as u8;
        }
    }
    out
}

/// Band-level analysis of where differences concentrate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RegionAnalysis {
    /// Inputs disagree on pixel dimensions; misaligned band comparison would
    /// be meaningless, so only the mismatch itself is reported.
    #[serde(rename_all = "camelCase")]
    SizeMismatch {
        sizes_different: bool,
        original: Dimensions,
        current: Dimensions,
        recommendation: String,
    },
    /// Percentage of non-zero difference samples per vertical third.
    Bands { top: f64, middle: f64, bottom: f64 },
}

/// Analyze what share of each vertical third of the image differs.
///
/// Identical images report 0% in every band. A size mismatch short-circuits
/// into a structured report instead of a failure, since RMS/SSIM scoring can
/// still proceed via resize.
pub fn analyze_differences(img1: &RgbImage, img2: &RgbImage) -> RegionAnalysis {
    if img1.dimensions() != img2.dimensions() {
        return RegionAnalysis::SizeMismatch {
            sizes_different: true,
            original: Dimensions {
                width: img1.width(),
                height: img1.height(),
            },
            current: Dimensions {
                width: img2.width(),
                height: img2.height(),
            },
            recommendation: format!(
                "Size mismatch detected. Use --auto-viewport to match original dimensions ({}x{}).",
                img1.width(),
                img1.height()
            ),
        };
    }

    let height = img1.height();
    let band = |y_start: u32, y_end: u32| -> f64 {
        let mut non_zero = 0u64;
        let mut total = 0u64;
        for y in y_start..y_end {
            for x in 0..img1.width() {
                let pa = img1.get_pixel(x, y).0;
                let pb = img2.get_pixel(x, y).0;
                for c in 0..3 {
                    if pa[c] != pb[c] {
                        non_zero += 1;
                    }
                    total += 1;
                }
            }
        }
        if total == 0 {
            0.0
        } else {
            round2(non_zero as f64 / total as f64 * 100.0)
        }
    };

    RegionAnalysis::Bands {
        top: band(0, height / 3),
        middle: band(height / 3, 2 * height / 3),
        bottom: band(2 * height / 3, height),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
}

/// A suspected font-size mismatch inferred from a difference band.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontSizeSuggestion {
    pub band_index: u32,
    pub y_range: [u32; 2],
    pub mean_difference: f64,
    pub suggested_font_size: String,
    pub confidence: Confidence,
}

/// Suggest font size adjustments by analyzing horizontal bands of the
/// difference image.
///
/// Bands with a mean grayscale difference above the threshold typically
/// indicate a font-size mismatch; the band height approximates a text line,
/// so the likely size is `band_height * 0.6` snapped to the nearest
/// standard size.
pub fn suggest_font_sizes(img1: &RgbImage, img2: &RgbImage) -> Vec<FontSizeSuggestion> {
    let (a, b) = resize_to_common(img1, img2);

    let width = a.width();
    let height = a.height();
    let band_height = height / FONT_SEARCH_BANDS;
    let mut suggestions = Vec::new();

    for i in 0..FONT_SEARCH_BANDS {
        let y_start = i * band_height;
        let y_end = if i < FONT_SEARCH_BANDS - 1 {
            y_start + band_height
        } else {
            height
        };
        if y_end <= y_start {
            continue;
        }

        let mut sum = 0u64;
        let mut count = 0u64;
        for y in y_start..y_end {
            for x in 0..width {
                let pa = a.get_pixel(x, y).0;
                let pb = b.get_pixel(x, y).0;
                let dr = (pa[0] as i32 - pb[0] as i32).unsigned_abs();
                let dg = (pa[1] as i32 - pb[1] as i32).unsigned_abs();
                let db = (pa[2] as i32 - pb[2] as i32).unsigned_abs();
                sum += ((299 * dr + 587 * dg + 114 * db) / 1000) as u64;
                count += 1;
            }
        }
        if count == 0 {
            continue;
        }

        let mean_diff = sum as f64 / count as f64;
        if mean_diff <= FONT_SEARCH_DIFF_THRESHOLD {
            continue;
        }

        let band_h = y_end - y_start;
        let estimated_size = ((band_h as f64 * 0.6).round() as u32).max(10);
        let closest = FONT_SEARCH_SIZES
            .iter()
            .copied()
            .min_by_key(|s| (*s as i64 - estimated_size as i64).abs())
            .unwrap_or(16);

        suggestions.push(FontSizeSuggestion {
            band_index: i,
            y_range: [y_start, y_end],
            mean_difference: round2(mean_diff),
            suggested_font_size: format!("{}px", closest),
            confidence: if mean_diff > FONT_SEARCH_HIGH_CONFIDENCE {
                Confidence::High
            } else {
                Confidence::Medium
            },
        });
    }

    suggestions
}
