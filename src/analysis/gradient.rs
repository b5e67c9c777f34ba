//! Directional background gradient detection.

use image::RgbImage;
use serde::{Deserialize, Serialize};

use crate::color;

/// Number of strips sampled along the gradient axis.
const NUM_SAMPLES: u32 = 10;

/// Minimum total RGB change between the first and last strip.
const MIN_CHANGE: i32 = 15;

/// Per-step luminance tolerance when checking monotonicity, to absorb
/// dithering/compression noise.
const MONOTONIC_TOLERANCE: f64 = 3.0;

/// Axis along which strips are sampled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradientAxis {
    Vertical,
    Horizontal,
}

/// A detected directional gradient with its endpoint colors.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gradient {
    pub has_gradient: bool,
    pub direction: String,
    pub start_color: String,
    pub end_color: String,
    pub tailwind_class: String,
}

/// Detect a directional color gradient in a region.
///
/// Strips are averaged over the central 60% of the perpendicular axis to
/// avoid edge artifacts. A gradient requires both a total endpoint change of
/// at least [`MIN_CHANGE`] and a monotonic luminance progression.
pub fn detect_gradient(region: &RgbImage, axis: GradientAxis) -> Option<Gradient> {
    let (width, height) = region.dimensions();
    if width < 4 || height < 4 {
        return None;
    }

    let mut samples: Vec<[i32; 3]> = Vec::with_capacity(NUM_SAMPLES as usize);

    match axis {
        GradientAxis::Vertical => {
            let x_start = width / 5;
            let x_end = (width * 4 / 5).max(x_start + 1);
            for i in 0..NUM_SAMPLES {
                let y = i * (height - 1) / (NUM_SAMPLES - 1);
                if let Some(avg) = average_strip(region, x_start..x_end, y..y + 1) {
                    samples.push(avg);
                }
            }
        }
        GradientAxis::Horizontal => {
            let y_start = height / 5;
            let y_end = (height * 4 / 5).max(y_start + 1);
            for i in 0..NUM_SAMPLES {
                let x = i * (width - 1) / (NUM_SAMPLES - 1);
                if let Some(avg) = average_strip(region, x..x + 1, y_start..y_end) {
                    samples.push(avg);
                }
            }
        }
    }

    if samples.len() < 2 {
        return None;
    }

    let first = samples[0];
    let last = samples[samples.len() - 1];
    let total_change: i32 = (0..3).map(|c| (first[c] - last[c]).abs()).sum();
    if total_change < MIN_CHANGE {
        return None;
    }

    let luminances: Vec<f64> = samples
        .iter()
        .map(|s| 0.299 * s[0] as f64 + 0.587 * s[1] as f64 + 0.114 * s[2] as f64)
        .collect();
    let increasing = luminances
        .windows(2)
        .all(|w| w[0] <= w[1] + MONOTONIC_TOLERANCE);
    let decreasing = luminances
        .windows(2)
        .all(|w| w[0] >= w[1] - MONOTONIC_TOLERANCE);

    if !(increasing || decreasing) {
        return None;
    }

    let start_hex = color::triple_to_hex([first[0] as u8, first[1] as u8, first[2] as u8]);
    let end_hex = color::triple_to_hex([last[0] as u8, last[1] as u8, last[2] as u8]);

    let direction = match (axis, increasing) {
        (GradientAxis::Vertical, true) => "to-b",
        (GradientAxis::Vertical, false) => "to-t",
        (GradientAxis::Horizontal, true) => "to-r",
        (GradientAxis::Horizontal, false) => "to-l",
    };

    // from = gradient start in the direction of increase
    let (from_color, to_color) = if matches!(direction, "to-b" | "to-r") {
        (start_hex.clone(), end_hex.clone())
    } else {
        (end_hex.clone(), start_hex.clone())
    };

    Some(Gradient {
        has_gradient: true,
        direction: direction.to_string(),
        start_color: start_hex,
        end_color: end_hex,
        tailwind_class: format!("bg-gradient-{} from-[{}] to-[{}]", direction, from_color, to_color),
    })
}

/// Integer-averaged RGB over a pixel strip.
fn average_strip(
    region: &RgbImage,
    xs: std::ops::Range<u32>,
    ys: std::ops::Range<u32>,
) -> Option<[i32; 3]> {
    let mut sum = [0u64; 3];
    let mut count = 0u64;
    for y in ys {
        for x in xs.clone() {
            let px = region.get_pixel(x, y).0;
            sum[0] += px[0] as u64;
            sum[1] += px[1] as u64;
            sum[2] += px[2] as u64;
            count += 1;
        }
    }
    if count == 0 {
        return None;
    }
    Some([
        (sum[0] / count) as i32,
        (sum[1] / count) as i32,
        (sum[2] / count) as i32,
    ])
}
