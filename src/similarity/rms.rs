//! RMS pixel-difference similarity.

use image::RgbImage;

use crate::color::round2;
use crate::image_io::resize_to_common;

/// Calculate visual similarity between two images on a 0-100 scale using the
/// root-mean-square difference of per-channel pixel values.
///
/// Differing dimensions are reconciled by scaling both images up to the
/// elementwise maximum (never cropping). RMS 0 maps to 100% similarity, RMS
/// 255 to 0%.
pub fn calculate_similarity(img1: &RgbImage, img2: &RgbImage) -> f64 {
    let (a, b) = resize_to_common(img1, img2);

    let mut sum_squares = 0u64;
    for (pa, pb) in a.pixels().zip(b.pixels()) {
        for c in 0..3 {
            let diff = (pa.0[c] as i64 - pb.0[c] as i64).unsigned_abs();
            sum_squares += diff * diff;
        }
    }

    let num_samples = (a.width() as u64 * a.height() as u64 * 3) as f64;
    if num_samples == 0.0 {
        return 100.0;
    }

    let rms = (sum_squares as f64 / num_samples).sqrt();
    round2((100.0 - rms / 255.0 * 100.0).max(0.0))
}
