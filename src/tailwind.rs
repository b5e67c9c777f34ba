//! Style-to-utility-class conversion.
//!
//! Pure table-driven mapping from computed CSS-like values onto the utility
//! class vocabulary, with tolerance-based snapping. Values with no table
//! entry within tolerance emit arbitrary-value classes (`bg-[#123456]`,
//! `text-[13px]`); unknown enumeration values are silently omitted.

use crate::color::rgb_to_hex;
use crate::spacing::{parse_px, spacing_to_class};
use crate::types::ElementStyles;

/// Font sizes: px -> utility class.
const FONT_SIZE_SCALE: &[(i64, &str)] = &[
    (12, "text-xs"),
    (14, "text-sm"),
    (16, "text-base"),
    (18, "text-lg"),
    (20, "text-xl"),
    (24, "text-2xl"),
    (30, "text-3xl"),
    (36, "text-4xl"),
    (48, "text-5xl"),
    (60, "text-6xl"),
    (72, "text-7xl"),
    (96, "text-8xl"),
];

/// Allowed px deviation when snapping font sizes.
const FONT_SIZE_TOLERANCE: i64 = 1;

/// Border radius: px -> utility class.
const RADIUS_SCALE: &[(i64, &str)] = &[
    (0, "rounded-none"),
    (2, "rounded-sm"),
    (4, "rounded"),
    (6, "rounded-md"),
    (8, "rounded-lg"),
    (12, "rounded-xl"),
    (16, "rounded-2xl"),
    (24, "rounded-3xl"),
];

/// Allowed px deviation when snapping radii.
const RADIUS_TOLERANCE: i64 = 2;

/// Font weight: CSS value -> utility class (exact match only).
const WEIGHT_SCALE: &[(&str, &str)] = &[
    ("100", "font-thin"),
    ("200", "font-extralight"),
    ("300", "font-light"),
    ("400", "font-normal"),
    ("500", "font-medium"),
    ("600", "font-semibold"),
    ("700", "font-bold"),
    ("800", "font-extrabold"),
    ("900", "font-black"),
];

/// Curated common colors mapped to named classes.
const COMMON_COLORS: &[(&str, &str)] = &[
    ("#000000", "black"),
    ("#ffffff", "white"),
    ("#f8fafc", "slate-50"),
    ("#f1f5f9", "slate-100"),
    ("#e2e8f0", "slate-200"),
    ("#cbd5e1", "slate-300"),
    ("#94a3b8", "slate-400"),
    ("#64748b", "slate-500"),
    ("#475569", "slate-600"),
    ("#334155", "slate-700"),
    ("#1e293b", "slate-800"),
    ("#0f172a", "slate-900"),
    ("#020617", "slate-950"),
];

/// Look up a hex color in the curated common-color table.
pub fn common_color_name(hex: &str) -> Option<&'static str> {
    let lower = hex.to_ascii_lowercase();
    COMMON_COLORS
        .iter()
        .find(|(value, _)| *value == lower)
        .map(|(_, name)| *name)
}

/// Convert a color value (rgb/rgba/hex) to a utility class with the given
/// prefix (`bg`, `text`, `border`, ...).
pub fn color_to_class(value: &str, prefix: &str) -> Option<String> {
    let hex = rgb_to_hex(value)?;
    if let Some(name) = common_color_name(&hex) {
        return Some(format!("{}-{}", prefix, name));
    }
    Some(format!("{}-[{}]", prefix, hex))
}

/// Convert a font-size value to a utility class.
pub fn font_size_to_class(value: &str) -> Option<String> {
    let px = parse_px(value)?.round() as i64;

    if let Some((_, class)) = FONT_SIZE_SCALE.iter().find(|(size, _)| *size == px) {
        return Some((*class).to_string());
    }

    let (closest, class) = FONT_SIZE_SCALE
        .iter()
        .min_by_key(|(size, _)| (size - px).abs())
        .copied()?;
    if (closest - px).abs() <= FONT_SIZE_TOLERANCE {
        return Some(class.to_string());
    }

    Some(format!("text-[{}px]", px))
}

/// Convert a border-radius value to a utility class. Radii of 999px or more
/// are treated as fully rounded.
pub fn radius_to_class(value: &str) -> Option<String> {
    let px = parse_px(value)?.round() as i64;

    if px >= 999 {
        return Some("rounded-full".to_string());
    }

    if let Some((_, class)) = RADIUS_SCALE.iter().find(|(radius, _)| *radius == px) {
        return Some((*class).to_string());
    }

    let (closest, class) = RADIUS_SCALE
        .iter()
        .min_by_key(|(radius, _)| (radius - px).abs())
        .copied()?;
    if (closest - px).abs() <= RADIUS_TOLERANCE {
        return Some(class.to_string());
    }

    Some(format!("rounded-[{}px]", px))
}

/// Convert a font-weight value to a utility class (exact table match only).
pub fn weight_to_class(value: &str) -> Option<String> {
    let trimmed = value.trim();
    WEIGHT_SCALE
        .iter()
        .find(|(weight, _)| *weight == trimmed)
        .map(|(_, class)| (*class).to_string())
}

/// Convert a box-shadow value to a utility class, bucketing by blur radius.
pub fn shadow_to_class(value: &str) -> Option<String> {
    if value.is_empty() || value == "none" {
        return None;
    }

    let lower = value.to_ascii_lowercase();
    if lower.contains("inset") {
        return Some("shadow-inner".to_string());
    }

    // Third px length in the shorthand is the blur radius.
    let lengths: Vec<f64> = lower
        .split_whitespace()
        .filter_map(|token| token.strip_suffix("px").and_then(|n| n.parse().ok()))
        .collect();
    if let Some(blur) = lengths.get(2) {
        let class = if *blur <= 2.0 {
            "shadow-sm"
        } else if *blur <= 4.0 {
            "shadow"
        } else if *blur <= 8.0 {
            "shadow-md"
        } else if *blur <= 15.0 {
            "shadow-lg"
        } else if *blur <= 25.0 {
            "shadow-xl"
        } else {
            "shadow-2xl"
        };
        return Some(class.to_string());
    }

    Some("shadow".to_string())
}

/// Convert an element's styles (plus an optional hover variant) to a
/// space-separated utility class string.
pub fn convert_element_styles(styles: &ElementStyles, hover: Option<&ElementStyles>) -> String {
    let mut classes: Vec<String> = Vec::new();

    let bg = styles
        .background_color
        .as_deref()
        .and_then(|v| color_to_class(v, "bg"));
    if let Some(bg) = &bg {
        classes.push(bg.clone());
    }

    let text_color = styles.color.as_deref().and_then(|v| color_to_class(v, "text"));
    if let Some(text_color) = &text_color {
        classes.push(text_color.clone());
    }

    if let Some(class) = styles.font_size.as_deref().and_then(font_size_to_class) {
        classes.push(class);
    }

    if let Some(class) = styles.font_weight.as_deref().and_then(weight_to_class) {
        classes.push(class);
    }

    push_padding_classes(styles, &mut classes);

    if let Some(class) = styles.border_radius.as_deref().and_then(radius_to_class) {
        classes.push(class);
    }

    if let Some(width) = styles.border_width.as_deref().and_then(parse_px) {
        if width > 0.0 {
            if width == 1.0 {
                classes.push("border".to_string());
            } else {
                classes.push(format!("border-{}", width as i64));
            }
            if let Some(class) = styles
                .border_color
                .as_deref()
                .and_then(|v| color_to_class(v, "border"))
            {
                classes.push(class);
            }
        }
    }

    if let Some(class) = styles.box_shadow.as_deref().and_then(shadow_to_class) {
        classes.push(class);
    }

    push_flex_classes(styles, &mut classes);

    if let Some(gap) = styles.gap.as_deref().and_then(parse_px) {
        if gap > 0.0 {
            if let Some(class) = spacing_to_class(gap, "gap") {
                classes.push(class);
            }
        }
    }

    if let Some(hover) = hover {
        let hover_bg = hover
            .background_color
            .as_deref()
            .and_then(|v| color_to_class(v, "hover:bg"))
            .filter(|h| Some(h.trim_start_matches("hover:")) != bg.as_deref());
        let hover_text = hover
            .color
            .as_deref()
            .and_then(|v| color_to_class(v, "hover:text"))
            .filter(|h| Some(h.trim_start_matches("hover:")) != text_color.as_deref());

        let has_hover = hover_bg.is_some() || hover_text.is_some();
        if let Some(class) = hover_bg {
            classes.push(class);
        }
        if let Some(class) = hover_text {
            classes.push(class);
        }
        if has_hover {
            classes.push("transition-all".to_string());
            classes.push("duration-200".to_string());
        }
    }

    classes.join(" ")
}

/// Padding collapses to symmetric shorthands where sides agree: a single
/// `p-*` for uniform values, `py-*`/`px-*` for matching axes, otherwise one
/// class per side.
fn push_padding_classes(styles: &ElementStyles, classes: &mut Vec<String>) {
    let pt = styles.padding_top.as_deref().and_then(parse_px);
    let pr = styles.padding_right.as_deref().and_then(parse_px);
    let pb = styles.padding_bottom.as_deref().and_then(parse_px);
    let pl = styles.padding_left.as_deref().and_then(parse_px);

    if pt.is_some() && pt == pr && pr == pb && pb == pl {
        if let Some(class) = spacing_to_class(pt.unwrap_or(0.0), "p") {
            classes.push(class);
        }
        return;
    }

    if pt.is_some() && pt == pb {
        if let Some(class) = spacing_to_class(pt.unwrap_or(0.0), "py") {
            classes.push(class);
        }
    } else {
        if let Some(top) = pt.filter(|v| *v > 0.0) {
            if let Some(class) = spacing_to_class(top, "pt") {
                classes.push(class);
            }
        }
        if let Some(bottom) = pb.filter(|v| *v > 0.0) {
            if let Some(class) = spacing_to_class(bottom, "pb") {
                classes.push(class);
            }
        }
    }

    if pr.is_some() && pr == pl {
        if let Some(class) = spacing_to_class(pr.unwrap_or(0.0), "px") {
            classes.push(class);
        }
    } else {
        if let Some(right) = pr.filter(|v| *v > 0.0) {
            if let Some(class) = spacing_to_class(right, "pr") {
                classes.push(class);
            }
        }
        if let Some(left) = pl.filter(|v| *v > 0.0) {
            if let Some(class) = spacing_to_class(left, "pl") {
                classes.push(class);
            }
        }
    }
}

/// Flex layout, alignment, and justification map through fixed enumeration
/// tables; unknown values emit nothing.
fn push_flex_classes(styles: &ElementStyles, classes: &mut Vec<String>) {
    let display = styles.display.as_deref().unwrap_or("");
    if !display.contains("flex") {
        return;
    }
    classes.push("flex".to_string());

    if styles.flex_direction.as_deref() == Some("column") {
        classes.push("flex-col".to_string());
    }

    if let Some(align) = styles.align_items.as_deref() {
        let class = match align {
            "center" => Some("items-center"),
            "flex-start" => Some("items-start"),
            "flex-end" => Some("items-end"),
            "stretch" => Some("items-stretch"),
            _ => None,
        };
        if let Some(class) = class {
            classes.push(class.to_string());
        }
    }

    if let Some(justify) = styles.justify_content.as_deref() {
        let class = match justify {
            "center" => Some("justify-center"),
            "flex-start" => Some("justify-start"),
            "flex-end" => Some("justify-end"),
            "space-between" => Some("justify-between"),
            "space-around" => Some("justify-around"),
            _ => None,
        };
        if let Some(class) = class {
            classes.push(class.to_string());
        }
    }
}
