//! JSON output schemas for the extract, compare, and convert commands.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::palette::ColorSample;
use crate::similarity::{FontSizeSuggestion, RegionAnalysis, RegionSsim};
use crate::types::{Dimensions, Element};

/// Similarity metric selection for the compare command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKind {
    Ssim,
    Rms,
    Both,
}

impl std::fmt::Display for MetricKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            MetricKind::Ssim => "ssim",
            MetricKind::Rms => "rms",
            MetricKind::Both => "both",
        })
    }
}

/// Individual metric scores computed during a comparison.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricValues {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssim: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rms: Option<f64>,
}

/// Paths to the images written by a comparison run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagePaths {
    pub original: PathBuf,
    pub current: PathBuf,
    pub diff: PathBuf,
}

/// Full result of a design-vs-implementation comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareReport {
    pub success: bool,
    pub similarity: f64,
    pub metric: MetricKind,
    pub metrics: MetricValues,
    pub threshold: f64,
    pub passed: bool,
    pub region_analysis: RegionAnalysis,
    pub images: ImagePaths,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_search_suggestions: Option<Vec<FontSizeSuggestion>>,
    #[serde(rename = "regionSSIM", skip_serializing_if = "Option::is_none")]
    pub region_ssim: Option<Vec<RegionSsim>>,
    #[serde(rename = "regionSSIMError", skip_serializing_if = "Option::is_none")]
    pub region_ssim_error: Option<String>,
}

/// Extraction document written to the output file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractDocument {
    pub source: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub dimensions: Dimensions,
    pub color_palette: BTreeMap<String, Vec<String>>,
    pub dominant_colors: Vec<ColorSample>,
    pub elements_count: usize,
    pub elements: Vec<Element>,
}

/// Status JSON printed after a successful extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractStatus {
    pub success: bool,
    pub dimensions: String,
    pub colors_extracted: usize,
    pub regions_analyzed: usize,
    pub elements_count: usize,
    pub output: PathBuf,
}

/// A converted element with its utility classes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertedElement {
    pub selector: String,
    pub tag: String,
    pub role: String,
    pub text: String,
    pub tailwind_classes: String,
    pub original_styles: OriginalStyles,
}

/// The subset of source styles echoed next to each conversion.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OriginalStyles {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<String>,
}

/// Extra theme colors discovered during conversion.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigExtensions {
    pub colors: BTreeMap<String, String>,
}

/// Conversion document written to the output file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub elements_converted: usize,
    pub elements: Vec<ConvertedElement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_extensions: Option<ConfigExtensions>,
}

/// Status JSON printed after a successful conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertStatus {
    pub success: bool,
    pub elements_converted: usize,
    pub custom_colors: usize,
    pub output: PathBuf,
}
