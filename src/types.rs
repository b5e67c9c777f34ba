//! Core data types shared across extraction, comparison, and conversion.

use serde::{Deserialize, Serialize};

/// A named rectangular sub-area of an image, as supplied by an external
/// vision/analysis step. Coordinates may exceed the image and are clamped
/// before any pixel work.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionSpec {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub bounds: RegionBounds,
}

/// Raw region bounds as read from a region JSON file.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionBounds {
    #[serde(default)]
    pub x: i64,
    #[serde(default)]
    pub y: i64,
    #[serde(default)]
    pub w: i64,
    #[serde(default)]
    pub h: i64,
}

/// Region bounds after clamping to image extents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClampedBounds {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

/// Width/height pair in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Pixel-space rectangle attached to an output element.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// A CSS-like style attribute set. Every field is optional; unknown input
/// keys are ignored on deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ElementStyles {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_gradient: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_font_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_font_weight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_top: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_right: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_bottom: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_left: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub box_shadow: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flex_direction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align_items: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub justify_content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gap: Option<String>,
}

/// Optional interaction-state style variants captured alongside the base
/// styles (materialized by the external capture step).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ElementStates {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hover: Option<ElementStyles>,
}

impl ElementStates {
    pub fn is_empty(&self) -> bool {
        self.hover.is_none()
    }
}

/// A styled element in an extraction document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub selector: String,
    pub tag: String,
    pub role: String,
    pub text: String,
    pub bounding_box: BoundingBox,
    pub styles: ElementStyles,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extracted_colors: Option<Vec<crate::palette::ColorSample>>,
    #[serde(default, skip_serializing_if = "ElementStates::is_empty")]
    pub states: ElementStates,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_spec_deserializes_with_missing_fields() {
        let spec: RegionSpec =
            serde_json::from_str(r#"{"name": "hero", "bounds": {"x": 5, "w": 100, "h": 40}}"#)
                .expect("partial region spec should parse");
        assert_eq!(spec.name, "hero");
        assert_eq!(spec.bounds.x, 5);
        assert_eq!(spec.bounds.y, 0);
        assert_eq!(spec.bounds.w, 100);
        assert!(spec.role.is_none());
    }

    #[test]
    fn element_styles_ignore_unknown_keys() {
        let styles: ElementStyles = serde_json::from_str(
            r#"{"backgroundColor": "rgb(1, 2, 3)", "textTransform": "uppercase"}"#,
        )
        .expect("unknown keys should be ignored");
        assert_eq!(styles.background_color.as_deref(), Some("rgb(1, 2, 3)"));
    }

    #[test]
    fn element_styles_serialize_camel_case_and_skip_none() {
        let styles = ElementStyles {
            background_color: Some("rgb(0, 0, 0)".to_string()),
            font_size: Some("16px".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_string(&styles).expect("serialize styles");
        assert!(json.contains("\"backgroundColor\""));
        assert!(json.contains("\"fontSize\""));
        assert!(!json.contains("paddingTop"));
    }

    #[test]
    fn empty_states_are_skipped_in_output() {
        let element = Element {
            selector: "hero".to_string(),
            tag: "div".to_string(),
            role: "region".to_string(),
            text: String::new(),
            bounding_box: BoundingBox {
                x: 0,
                y: 0,
                width: 10,
                height: 10,
            },
            styles: ElementStyles::default(),
            extracted_colors: None,
            states: ElementStates::default(),
        };
        let json = serde_json::to_string(&element).expect("serialize element");
        assert!(!json.contains("states"));
        assert!(!json.contains("extractedColors"));
    }
}
