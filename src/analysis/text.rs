//! Pixel-level text metric estimation: height, font size, weight, color.

use image::RgbImage;
use serde::{Deserialize, Serialize};

use crate::color::{self, round3};

/// Max brightness difference from the background level for a pixel to still
/// count as background.
const BG_THRESHOLD: i32 = 30;

/// Fraction of a row that must be text pixels for the row to count as text.
const TEXT_ROW_RATIO: f64 = 0.05;

/// Minimum number of text rows for a height measurement to be conclusive.
const MIN_TEXT_ROWS: usize = 3;

/// text height ~= font-size * 0.72 (cap height ratio)
const CAP_HEIGHT_RATIO: f64 = 0.72;

/// CSS line-height multiplier assumed for the no-image fallback.
const LINE_HEIGHT_RATIO: f64 = 1.5;

/// Standard font sizes used in UI design (px).
pub const STANDARD_FONT_SIZES: &[u32] = &[12, 14, 16, 18, 20, 24, 30, 36, 48, 60, 72];

/// Maximum relative deviation for snapping to a standard size.
const FONT_SNAP_THRESHOLD: f64 = 0.25;

/// Representative text foreground color extracted from interior pixels.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextColor {
    pub hex: String,
    pub rgb: String,
    pub luminance: f64,
}

/// Grayscale value with broadcast luma weights, matching the palette
/// luminance scale.
fn luma(px: &image::Rgb<u8>) -> u8 {
    let [r, g, b] = px.0;
    ((299 * r as u32 + 587 * g as u32 + 114 * b as u32) / 1000) as u8
}

fn gray_pixels(region: &RgbImage) -> Vec<u8> {
    region.pixels().map(luma).collect()
}

/// Background brightness estimated as the median of the top and bottom 5%
/// rows of the region.
fn edge_row_background(gray: &[u8], width: usize, height: usize) -> i32 {
    let margin = (height / 20).max(1);
    let mut samples = Vec::with_capacity(2 * margin * width);
    for y in (0..margin).chain(height.saturating_sub(margin)..height) {
        samples.extend_from_slice(&gray[y * width..(y + 1) * width]);
    }
    samples.sort_unstable();
    samples[samples.len() / 2] as i32
}

/// Measure the pixel height occupied by text in a cropped region.
///
/// Rows are classified as text when more than 5% of their pixels differ from
/// the background by more than the threshold; the result spans the first to
/// the last such row. Returns `None` when the region is too small or fewer
/// than three text rows are found.
pub fn measure_text_height(region: &RgbImage) -> Option<u32> {
    let (width, height) = (region.width() as usize, region.height() as usize);
    if width < 4 || height < 4 {
        return None;
    }

    let gray = gray_pixels(region);
    let bg_level = edge_row_background(&gray, width, height);

    let mut text_rows = Vec::new();
    for y in 0..height {
        let row = &gray[y * width..(y + 1) * width];
        let text_pixels = row
            .iter()
            .filter(|&&p| (p as i32 - bg_level).abs() > BG_THRESHOLD)
            .count();
        if text_pixels as f64 / width as f64 > TEXT_ROW_RATIO {
            text_rows.push(y);
        }
    }

    if text_rows.len() < MIN_TEXT_ROWS {
        return None;
    }

    Some((text_rows[text_rows.len() - 1] - text_rows[0] + 1) as u32)
}

/// Snap a raw size onto the standard ladder.
///
/// The ladder is scanned in fixed ascending order and the first entry within
/// tolerance wins, so a raw value between two qualifying entries resolves to
/// the lower one.
fn snap_to_standard(raw_size: f64) -> u32 {
    for &std_size in STANDARD_FONT_SIZES {
        if (raw_size - std_size as f64).abs() / std_size as f64 <= FONT_SNAP_THRESHOLD {
            return std_size;
        }
    }
    raw_size.round().max(10.0) as u32
}

/// Estimate font size from a region's bounding height, preferring pixel
/// measurement of the cropped image when available.
pub fn estimate_font_size(region_height: u32, cropped: Option<&RgbImage>) -> u32 {
    if let Some(image) = cropped {
        if let Some(measured) = measure_text_height(image) {
            return snap_to_standard(measured as f64 / CAP_HEIGHT_RATIO);
        }
    }

    // Fallback: tiered padding allowance by region height bucket.
    let padding = if region_height < 40 {
        8.0
    } else if region_height < 50 {
        12.0
    } else {
        16.0
    };

    snap_to_standard((region_height as f64 - padding) / LINE_HEIGHT_RATIO)
}

/// Estimate font weight from the median stroke width of text runs.
///
/// The background level comes from the 4 corner pixels; horizontal runs of
/// text pixels shorter than 2px are discarded as noise. Returns a CSS weight
/// in the 200-800 range, or `None` when no strokes are found.
pub fn estimate_font_weight(region: &RgbImage, estimated_font_size: u32) -> Option<u16> {
    let (width, height) = (region.width() as usize, region.height() as usize);
    if width < 4 || height < 4 {
        return None;
    }

    let gray = gray_pixels(region);

    let mut corners = [
        gray[0],
        gray[width - 1],
        gray[(height - 1) * width],
        gray[(height - 1) * width + width - 1],
    ];
    corners.sort_unstable();
    let bg_level = corners[corners.len() / 2] as i32;

    let mut stroke_widths = Vec::new();
    for y in 0..height {
        let mut run_length = 0usize;
        for x in 0..width {
            let is_text = (gray[y * width + x] as i32 - bg_level).abs() > BG_THRESHOLD;
            if is_text {
                run_length += 1;
            } else {
                if run_length >= 2 {
                    stroke_widths.push(run_length);
                }
                run_length = 0;
            }
        }
        if run_length >= 2 {
            stroke_widths.push(run_length);
        }
    }

    if stroke_widths.is_empty() {
        return None;
    }

    stroke_widths.sort_unstable();
    let median_stroke = stroke_widths[stroke_widths.len() / 2];

    let ratio = median_stroke as f64 / estimated_font_size.max(1) as f64;

    Some(if ratio < 0.04 {
        200
    } else if ratio < 0.06 {
        300
    } else if ratio < 0.09 {
        400
    } else if ratio < 0.11 {
        500
    } else if ratio < 0.14 {
        600
    } else if ratio < 0.18 {
        700
    } else {
        800
    })
}

/// Extract the text foreground color by sampling interior pixels only.
///
/// A pixel counts as interior when it and all 4 direct neighbors each differ
/// from the background by more than the threshold; this excludes
/// anti-aliased edge pixels that would bias the color toward the background.
/// The representative sample is the brightness-sorted median. Returns `None`
/// with fewer than 5 interior samples.
pub fn extract_text_color(region: &RgbImage) -> Option<TextColor> {
    let (width, height) = (region.width() as usize, region.height() as usize);
    if width < 6 || height < 6 {
        return None;
    }

    let gray = gray_pixels(region);
    let bg_level = edge_row_background(&gray, width, height);

    let is_text = |idx: usize| (gray[idx] as i32 - bg_level).abs() > BG_THRESHOLD;

    let mut interior_colors: Vec<[u8; 3]> = Vec::new();
    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let idx = y * width + x;
            if !is_text(idx) {
                continue;
            }

            let neighbors = [idx - width, idx + width, idx - 1, idx + 1];
            if neighbors.iter().all(|&n| is_text(n)) {
                interior_colors.push(region.get_pixel(x as u32, y as u32).0);
            }
        }
    }

    if interior_colors.len() < 5 {
        return None;
    }

    interior_colors.sort_by_key(|c| c[0] as u32 + c[1] as u32 + c[2] as u32);
    let rgb = interior_colors[interior_colors.len() / 2];

    Some(TextColor {
        hex: color::triple_to_hex(rgb),
        rgb: color::format_rgb(rgb),
        luminance: round3(color::luminance(rgb)),
    })
}
