//! Structural similarity (SSIM) over sliding grayscale windows.

use image::{DynamicImage, GrayImage, RgbImage};

use crate::color::round2;
use crate::image_io::resize_to_common;

/// Side length of the square comparison window.
pub const SSIM_WINDOW_SIZE: usize = 11;

// Stabilization constants for the SSIM formula.
const K1: f64 = 0.01;
const K2: f64 = 0.03;

/// Dynamic range of 8-bit grayscale.
const DYNAMIC_RANGE: f64 = 255.0;

/// Calculate the Structural Similarity Index between two images on a 0-100
/// scale.
///
/// Both images are converted to grayscale and compared window by window with
/// a step of half the window size (subsampled for performance, not full
/// coverage; trailing rows/columns that do not fit a whole window are left
/// out). Returns 0.0 when no window fits.
pub fn calculate_ssim(img1: &RgbImage, img2: &RgbImage) -> f64 {
    let (a, b) = resize_to_common(img1, img2);

    let g1 = DynamicImage::ImageRgb8(a).to_luma8();
    let g2 = DynamicImage::ImageRgb8(b).to_luma8();

    let width = g1.width() as usize;
    let height = g1.height() as usize;

    let c1 = (K1 * DYNAMIC_RANGE).powi(2);
    let c2 = (K2 * DYNAMIC_RANGE).powi(2);

    let step = (SSIM_WINDOW_SIZE / 2).max(1);
    let mut ssim_sum = 0.0f64;
    let mut windows = 0usize;

    if width >= SSIM_WINDOW_SIZE && height >= SSIM_WINDOW_SIZE {
        let mut y = 0;
        while y <= height - SSIM_WINDOW_SIZE {
            let mut x = 0;
            while x <= width - SSIM_WINDOW_SIZE {
                ssim_sum += window_ssim(&g1, &g2, x, y, c1, c2);
                windows += 1;
                x += step;
            }
            y += step;
        }
    }

    if windows == 0 {
        return 0.0;
    }

    let mean_ssim = ssim_sum / windows as f64;
    // Map from [-1, 1] to a 0-100 percentage, clamped at 0.
    round2((mean_ssim * 100.0).max(0.0))
}

fn window_ssim(g1: &GrayImage, g2: &GrayImage, x: usize, y: usize, c1: f64, c2: f64) -> f64 {
    let width = g1.width() as usize;
    let p1 = g1.as_raw();
    let p2 = g2.as_raw();

    let n = (SSIM_WINDOW_SIZE * SSIM_WINDOW_SIZE) as f64;
    let mut sum1 = 0.0f64;
    let mut sum2 = 0.0f64;

    for wy in 0..SSIM_WINDOW_SIZE {
        let offset = (y + wy) * width + x;
        for wx in 0..SSIM_WINDOW_SIZE {
            sum1 += p1[offset + wx] as f64;
            sum2 += p2[offset + wx] as f64;
        }
    }

    let mu1 = sum1 / n;
    let mu2 = sum2 / n;

    let mut sigma1_sq = 0.0f64;
    let mut sigma2_sq = 0.0f64;
    let mut sigma12 = 0.0f64;

    for wy in 0..SSIM_WINDOW_SIZE {
        let offset = (y + wy) * width + x;
        for wx in 0..SSIM_WINDOW_SIZE {
            let d1 = p1[offset + wx] as f64 - mu1;
            let d2 = p2[offset + wx] as f64 - mu2;
            sigma1_sq += d1 * d1;
            sigma2_sq += d2 * d2;
            sigma12 += d1 * d2;
        }
    }

    sigma1_sq /= n;
    sigma2_sq /= n;
    sigma12 /= n;

    let numerator = (2.0 * mu1 * mu2 + c1) * (2.0 * sigma12 + c2);
    let denominator = (mu1 * mu1 + mu2 * mu2 + c1) * (sigma1_sq + sigma2_sq + c2);

    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}
