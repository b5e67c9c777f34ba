//! Whole-image and per-region similarity scoring.
//!
//! Two metrics are available, selectable independently:
//! - rms: root-mean-square difference of per-channel pixel values
//! - ssim: structural similarity over sliding grayscale windows
//!
//! plus difference visualization, band-level analysis, font-size
//! suggestions, and per-region SSIM. All scores are percentages on a 0-100
//! scale, rounded to two decimals; a score of 100 means the inputs are
//! indistinguishable under the metric.

mod diff;
mod regions;
mod rms;
mod ssim;

#[cfg(test)]
mod tests;

pub use diff::{
    analyze_differences, create_diff_image, suggest_font_sizes, Confidence, FontSizeSuggestion,
    RegionAnalysis,
};
pub use regions::{calculate_region_ssim, RegionSsim, REGION_SSIM_PASS_THRESHOLD};
pub use rms::calculate_similarity;
pub use ssim::{calculate_ssim, SSIM_WINDOW_SIZE};
