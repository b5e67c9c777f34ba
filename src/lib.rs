//! Design Style Extractor (DSX) Library
//!
//! A library for extracting visual style attributes from design references
//! (images or live pages), comparing them against an in-progress
//! implementation, and mapping computed styles onto a utility-CSS class
//! vocabulary.
//!
//! # Module Overview
//!
//! - [`palette`] - dominant-color quantization and classification
//! - [`analysis`] - per-region font/gradient/gap inference
//! - [`similarity`] - SSIM and RMS scoring, diff images, band analysis
//! - [`tailwind`] - style-to-utility-class conversion
//! - [`color`] / [`spacing`] - parsing and snapping primitives
//! - [`browser`] - headless URL capture (Playwright over Node)
//! - [`output`] - JSON output schemas
//!
//! # Example
//!
//! ```no_run
//! use dsx_lib::{calculate_similarity, calculate_ssim, load_rgb_image};
//! use std::path::Path;
//!
//! # fn example() -> dsx_lib::Result<()> {
//! let original = load_rgb_image(Path::new("design.png"))?;
//! let current = load_rgb_image(Path::new("screenshot.png"))?;
//! println!("rms:  {}", calculate_similarity(&original, &current));
//! println!("ssim: {}", calculate_ssim(&original, &current));
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod browser;
pub mod color;
pub mod config;
pub mod error;
pub mod image_io;
pub mod output;
pub mod palette;
pub mod similarity;
pub mod spacing;
pub mod tailwind;
pub mod types;
pub mod viewport;

pub use analysis::{
    build_elements, detect_gradient, estimate_font_size, estimate_font_weight,
    extract_region_styles, extract_text_color, measure_element_gaps, measure_text_height,
    GapAnalysis, GapAxis, Gradient, GradientAxis, RegionStyle, TextColor, STANDARD_FONT_SIZES,
};
pub use browser::{
    BrowserManager, BrowserOptions, CaptureResult, DEFAULT_NAVIGATION_TIMEOUT,
    DEFAULT_PROCESS_TIMEOUT, DEFAULT_WAIT,
};
pub use config::Config;
pub use error::{DsxError, ErrorPayload, Result};
pub use image_io::{load_rgb_image, resize_to_common, save_png};
pub use output::{
    CompareReport, ConfigExtensions, ConvertDocument, ConvertStatus, ConvertedElement,
    ExtractDocument, ExtractStatus, ImagePaths, MetricKind, MetricValues, OriginalStyles,
};
pub use palette::{
    classify_color, extract_color_palette, ColorCategory, ColorSample, DEFAULT_PALETTE_SIZE,
};
pub use similarity::{
    analyze_differences, calculate_region_ssim, calculate_similarity, calculate_ssim,
    create_diff_image, suggest_font_sizes, Confidence, FontSizeSuggestion, RegionAnalysis,
    RegionSsim, REGION_SSIM_PASS_THRESHOLD, SSIM_WINDOW_SIZE,
};
pub use tailwind::convert_element_styles;
pub use types::{
    BoundingBox, ClampedBounds, Dimensions, Element, ElementStates, ElementStyles, RegionBounds,
    RegionSpec,
};
pub use viewport::Viewport;
