//! Dominant-color extraction via median-cut quantization.
//!
//! The image is quantized to a fixed number of representative colors, each
//! surviving color is weighted by pixel coverage, and the result is
//! classified into UI roles (background/text/accent) by luminance band and
//! saturation.

use image::RgbImage;
use serde::{Deserialize, Serialize};

use crate::color::{self, round2, round3, Rgb};

/// Number of colors after quantization. 16 covers most UI color palettes
/// without excessive detail.
pub const QUANTIZE_COLORS: usize = 16;

/// Minimum pixel percentage for a color to be considered significant.
/// Filters noise and anti-aliasing artifacts at component edges.
pub const MIN_COLOR_PERCENTAGE: f64 = 0.5;

/// Number of dominant colors to extract by default.
pub const DEFAULT_PALETTE_SIZE: usize = 10;

/// UI role assigned to a palette color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorCategory {
    BackgroundDark,
    Background,
    Neutral,
    Text,
    TextLight,
    TextWhite,
    Accent,
}

impl ColorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorCategory::BackgroundDark => "background-dark",
            ColorCategory::Background => "background",
            ColorCategory::Neutral => "neutral",
            ColorCategory::Text => "text",
            ColorCategory::TextLight => "text-light",
            ColorCategory::TextWhite => "text-white",
            ColorCategory::Accent => "accent",
        }
    }

    pub fn is_background(&self) -> bool {
        matches!(self, ColorCategory::BackgroundDark | ColorCategory::Background)
    }

    pub fn is_text(&self) -> bool {
        matches!(
            self,
            ColorCategory::Text | ColorCategory::TextLight | ColorCategory::TextWhite
        )
    }
}

impl std::fmt::Display for ColorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A dominant color with its coverage and classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorSample {
    pub hex: String,
    pub rgb: String,
    pub percentage: f64,
    pub luminance: f64,
    pub category: ColorCategory,
}

/// Classify a color by luminance band and saturation. High saturation marks
/// an accent color regardless of luminance.
pub fn classify_color(luminance: f64, rgb: Rgb) -> ColorCategory {
    if color::saturation(rgb) > 0.5 {
        return ColorCategory::Accent;
    }

    if luminance < 0.15 {
        ColorCategory::BackgroundDark
    } else if luminance < 0.4 {
        ColorCategory::Background
    } else if luminance > 0.95 {
        ColorCategory::TextWhite
    } else if luminance > 0.85 {
        ColorCategory::TextLight
    } else if luminance > 0.6 {
        ColorCategory::Text
    } else {
        ColorCategory::Neutral
    }
}

/// Extract dominant colors sorted by descending pixel coverage.
///
/// Colors covering less than [`MIN_COLOR_PERCENTAGE`] of the image are
/// dropped. The quantization is fully deterministic for identical input.
pub fn extract_color_palette(image: &RgbImage, max_colors: usize) -> Vec<ColorSample> {
    let total_pixels = (image.width() as u64 * image.height() as u64) as f64;
    if total_pixels == 0.0 {
        return Vec::new();
    }

    let pixels: Vec<Rgb> = image.pixels().map(|p| [p.0[0], p.0[1], p.0[2]]).collect();
    let mut counts = quantize(&pixels, QUANTIZE_COLORS);

    counts.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    let mut colors = Vec::new();
    for (rgb, count) in counts.into_iter().take(max_colors) {
        let percentage = count as f64 / total_pixels * 100.0;
        if percentage < MIN_COLOR_PERCENTAGE {
            continue;
        }

        let luminance = color::luminance(rgb);
        colors.push(ColorSample {
            hex: color::triple_to_hex(rgb),
            rgb: color::format_rgb(rgb),
            percentage: round2(percentage),
            luminance: round3(luminance),
            category: classify_color(luminance, rgb),
        });
    }

    colors
}

/// Median-cut quantization: repeatedly split the bucket with the widest
/// channel range at its median until the target bucket count is reached.
/// Returns representative colors with their pixel counts.
fn quantize(pixels: &[Rgb], colors: usize) -> Vec<(Rgb, usize)> {
    if pixels.is_empty() {
        return Vec::new();
    }

    let mut buckets: Vec<Vec<Rgb>> = vec![pixels.to_vec()];

    while buckets.len() < colors {
        let mut widest: Option<(usize, usize, u8)> = None;
        for (idx, bucket) in buckets.iter().enumerate() {
            if bucket.len() < 2 {
                continue;
            }
            for channel in 0..3 {
                let min = bucket.iter().map(|p| p[channel]).min().unwrap_or(0);
                let max = bucket.iter().map(|p| p[channel]).max().unwrap_or(0);
                let range = max - min;
                if range == 0 {
                    continue;
                }
                let better = match widest {
                    Some((_, _, best)) => range > best,
                    None => true,
                };
                if better {
                    widest = Some((idx, channel, range));
                }
            }
        }

        let Some((idx, channel, _)) = widest else {
            break;
        };

        let mut bucket = buckets.swap_remove(idx);
        // Full-pixel tie-break keeps the split order-independent of the
        // original pixel layout.
        bucket.sort_by_key(|p| (p[channel], *p));
        let upper = bucket.split_off(bucket.len() / 2);
        buckets.push(bucket);
        buckets.push(upper);
    }

    let mut reps: Vec<(Rgb, usize)> = Vec::with_capacity(buckets.len());
    for bucket in &buckets {
        if bucket.is_empty() {
            continue;
        }
        let n = bucket.len() as u64;
        let mut sum = [0u64; 3];
        for p in bucket {
            sum[0] += p[0] as u64;
            sum[1] += p[1] as u64;
            sum[2] += p[2] as u64;
        }
        let rep = [(sum[0] / n) as u8, (sum[1] / n) as u8, (sum[2] / n) as u8];
        match reps.iter_mut().find(|(existing, _)| *existing == rep) {
            Some((_, count)) => *count += bucket.len(),
            None => reps.push((rep, bucket.len())),
        }
    }

    reps
}
