//! Per-region style assembly and extraction-document element building.

use std::collections::BTreeMap;

use image::{imageops, RgbImage};
use serde::{Deserialize, Serialize};

use crate::palette::{extract_color_palette, ColorSample};
use crate::types::{BoundingBox, ClampedBounds, Element, ElementStates, ElementStyles, RegionSpec};

use super::gaps::{measure_element_gaps, GapAnalysis, GapAxis};
use super::gradient::{detect_gradient, Gradient, GradientAxis};
use super::text::{estimate_font_size, estimate_font_weight, extract_text_color};

/// Palette size used for per-region crops.
const REGION_PALETTE_SIZE: usize = 5;

/// Styles inferred for a single named region.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionStyle {
    pub name: String,
    pub role: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounds: Option<ClampedBounds>,
    pub styles: ElementStyles,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extracted_colors: Vec<ColorSample>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gradient: Option<Gradient>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gap_analysis: Option<GapAnalysis>,
}

/// Clamp raw region bounds against the image extents. Returns `None` when
/// the clamped rectangle collapses to zero area.
fn clamp_bounds(spec: &RegionSpec, img_width: u32, img_height: u32) -> Option<ClampedBounds> {
    let x = spec.bounds.x.max(0);
    let y = spec.bounds.y.max(0);
    let x2 = (spec.bounds.x + spec.bounds.w).min(img_width as i64);
    let y2 = (spec.bounds.y + spec.bounds.h).min(img_height as i64);

    if x2 <= x || y2 <= y {
        return None;
    }

    Some(ClampedBounds {
        x: x as u32,
        y: y as u32,
        w: (x2 - x) as u32,
        h: (y2 - y) as u32,
    })
}

/// Extract styles from specific image regions.
///
/// Combines the dominant-color extraction with gradient detection, interior
/// text color sampling, and font size/weight estimation. Regions whose
/// bounds collapse after clamping are skipped. Regions sharing a name prefix
/// (split on the last `-`) are grouped; families of two or more get a
/// synthetic `{prefix}-gap-info` entry carrying the gap measurement.
pub fn extract_region_styles(image: &RgbImage, regions: &[RegionSpec]) -> Vec<RegionStyle> {
    let (img_width, img_height) = image.dimensions();
    let mut results = Vec::new();

    for region in regions {
        let Some(bounds) = clamp_bounds(region, img_width, img_height) else {
            continue;
        };

        let cropped = imageops::crop_imm(image, bounds.x, bounds.y, bounds.w, bounds.h).to_image();
        let colors = extract_color_palette(&cropped, REGION_PALETTE_SIZE);
        let bg_color = colors.first();

        let gradient = detect_gradient(&cropped, GradientAxis::Vertical)
            .or_else(|| detect_gradient(&cropped, GradientAxis::Horizontal));

        // Fallback text color: highest luminance contrast to the background.
        let mut text_color = None;
        if let Some(bg) = bg_color {
            let mut best_contrast = 0.0;
            for candidate in colors.iter().skip(1) {
                let contrast = (candidate.luminance - bg.luminance).abs();
                if contrast > best_contrast {
                    best_contrast = contrast;
                    text_color = Some(candidate.rgb.clone());
                }
            }
        }

        // Interior-pixel extraction wins over the palette fallback.
        if let Some(precise) = extract_text_color(&cropped) {
            text_color = Some(precise.rgb);
        }

        let estimated_size = estimate_font_size(bounds.h, Some(&cropped));
        let estimated_weight = estimate_font_weight(&cropped, estimated_size);

        let styles = ElementStyles {
            background_color: bg_color.map(|c| c.rgb.clone()),
            background_gradient: gradient.as_ref().map(|g| g.tailwind_class.clone()),
            color: text_color,
            width: Some(format!("{}px", bounds.w)),
            height: Some(format!("{}px", bounds.h)),
            estimated_font_size: Some(format!("{}px", estimated_size)),
            estimated_font_weight: estimated_weight.map(|w| w.to_string()),
            ..Default::default()
        };

        results.push(RegionStyle {
            name: region.name.clone(),
            role: region.role.clone().unwrap_or_else(|| "region".to_string()),
            text: region.text.clone().unwrap_or_default(),
            bounds: Some(bounds),
            styles,
            extracted_colors: colors,
            gradient,
            gap_analysis: None,
        });
    }

    // Detect repeated element groups ("bar-attack" -> "bar") and measure
    // the gap between family members.
    let mut groups: BTreeMap<String, Vec<ClampedBounds>> = BTreeMap::new();
    for result in &results {
        if let Some((prefix, _)) = result.name.rsplit_once('-') {
            if !prefix.is_empty() {
                if let Some(bounds) = result.bounds {
                    groups.entry(prefix.to_string()).or_default().push(bounds);
                }
            }
        }
    }

    for (group_name, bounds_list) in groups {
        if bounds_list.len() < 2 {
            continue;
        }
        let gap_info = measure_element_gaps(&bounds_list, GapAxis::Horizontal)
            .or_else(|| measure_element_gaps(&bounds_list, GapAxis::Vertical));
        if let Some(gap_info) = gap_info {
            results.push(RegionStyle {
                name: format!("{}-gap-info", group_name),
                role: "gap-measurement".to_string(),
                text: String::new(),
                bounds: None,
                styles: ElementStyles {
                    gap: Some(format!("{}px", gap_info.median_gap)),
                    ..Default::default()
                },
                extracted_colors: Vec::new(),
                gradient: None,
                gap_analysis: Some(gap_info),
            });
        }
    }

    results
}

/// Build the elements array of an extraction document.
///
/// A synthetic root container carries the dominant background/text colors
/// and any gap measured between region families; region entries follow with
/// their estimated font metrics promoted to the standard property names.
pub fn build_elements(
    img_width: u32,
    img_height: u32,
    palette: &[ColorSample],
    regions: &[RegionStyle],
) -> Vec<Element> {
    let root_bg = palette
        .iter()
        .find(|c| c.category.is_background())
        .or_else(|| palette.first());
    let root_text = palette.iter().find(|c| c.category.is_text());

    let root_gap = regions
        .iter()
        .filter(|r| r.role == "gap-measurement")
        .find_map(|r| r.styles.gap.clone());

    let mut elements = vec![Element {
        selector: "root-container".to_string(),
        tag: "div".to_string(),
        role: "container".to_string(),
        text: String::new(),
        bounding_box: BoundingBox {
            x: 0,
            y: 0,
            width: img_width,
            height: img_height,
        },
        styles: ElementStyles {
            background_color: root_bg.map(|c| c.rgb.clone()),
            color: root_text.map(|c| c.rgb.clone()),
            width: Some(format!("{}px", img_width)),
            height: Some(format!("{}px", img_height)),
            display: Some("flex".to_string()),
            flex_direction: Some("column".to_string()),
            gap: root_gap,
            ..Default::default()
        },
        extracted_colors: None,
        states: ElementStates::default(),
    }];

    for region in regions {
        if region.role == "gap-measurement" {
            continue;
        }
        let Some(bounds) = region.bounds else {
            continue;
        };

        let mut styles = region.styles.clone();
        // Promote estimated values for pipeline compatibility.
        if let Some(size) = styles.estimated_font_size.take() {
            styles.font_size = Some(size);
        }
        if let Some(weight) = styles.estimated_font_weight.take() {
            styles.font_weight = Some(weight);
        }

        elements.push(Element {
            selector: region.name.clone(),
            tag: "div".to_string(),
            role: region.role.clone(),
            text: region.text.clone(),
            bounding_box: BoundingBox {
                x: bounds.x,
                y: bounds.y,
                width: bounds.w,
                height: bounds.h,
            },
            styles,
            extracted_colors: if region.extracted_colors.is_empty() {
                None
            } else {
                Some(region.extracted_colors.clone())
            },
            states: ElementStates::default(),
        });
    }

    elements
}
