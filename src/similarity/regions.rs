//! Per-region SSIM scoring.

use image::{imageops, RgbImage};
use serde::{Deserialize, Serialize};

use crate::types::RegionSpec;

use super::ssim::{calculate_ssim, SSIM_WINDOW_SIZE};

/// Regions scoring below this SSIM percentage are flagged as failing.
pub const REGION_SSIM_PASS_THRESHOLD: f64 = 90.0;

/// SSIM score for a single named region.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionSsim {
    pub name: String,
    pub ssim: f64,
    pub passed: bool,
}

/// Calculate per-region SSIM to identify which components differ most.
///
/// Regions must be at least one SSIM window (11px) in each dimension, both
/// as specified and after clamping against the extents of both images;
/// anything smaller is excluded. Results are sorted ascending by score so
/// the worst regions come first.
pub fn calculate_region_ssim(
    img1: &RgbImage,
    img2: &RgbImage,
    regions: &[RegionSpec],
) -> Vec<RegionSsim> {
    let min_side = SSIM_WINDOW_SIZE as i64;
    let mut results = Vec::new();

    for region in regions {
        let b = region.bounds;
        if b.w < min_side || b.h < min_side {
            continue;
        }

        let x = b.x.max(0);
        let y = b.y.max(0);
        let x2 = (b.x + b.w).min(img1.width() as i64).min(img2.width() as i64);
        let y2 = (b.y + b.h)
            .min(img1.height() as i64)
            .min(img2.height() as i64);
        if x2 - x < min_side || y2 - y < min_side {
            continue;
        }

        let (x, y) = (x as u32, y as u32);
        let (w, h) = ((x2 - x as i64) as u32, (y2 - y as i64) as u32);

        let crop1 = imageops::crop_imm(img1, x, y, w, h).to_image();
        let crop2 = imageops::crop_imm(img2, x, y, w, h).to_image();

        let ssim = calculate_ssim(&crop1, &crop2);
        results.push(RegionSsim {
            name: region.name.clone(),
            ssim,
            passed: ssim >= REGION_SSIM_PASS_THRESHOLD,
        });
    }

    results.sort_by(|a, b| a.ssim.partial_cmp(&b.ssim).unwrap_or(std::cmp::Ordering::Equal));
    results
}
