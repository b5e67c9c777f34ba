//! CSS length parsing and spacing-scale snapping.

/// Spacing scale: px value -> scale suffix.
const SPACING_SCALE: &[(i64, &str)] = &[
    (0, "0"),
    (1, "px"),
    (2, "0.5"),
    (4, "1"),
    (6, "1.5"),
    (8, "2"),
    (10, "2.5"),
    (12, "3"),
    (14, "3.5"),
    (16, "4"),
    (20, "5"),
    (24, "6"),
    (28, "7"),
    (32, "8"),
    (36, "9"),
    (40, "10"),
    (44, "11"),
    (48, "12"),
    (56, "14"),
    (64, "16"),
    (80, "20"),
    (96, "24"),
    (112, "28"),
    (128, "32"),
    (144, "36"),
    (160, "40"),
    (176, "44"),
    (192, "48"),
    (208, "52"),
    (224, "56"),
    (240, "60"),
    (256, "64"),
    (288, "72"),
    (320, "80"),
    (384, "96"),
];

/// Allowed deviation when rounding onto the spacing scale.
const SPACING_TOLERANCE: i64 = 2;

/// Parse a pixel value from a CSS length string.
///
/// Accepts `px`, `rem`, and `em` units (16px base) and bare numbers.
pub fn parse_px(value: &str) -> Option<f64> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    let start = value.find(|c: char| c.is_ascii_digit() || c == '.')?;
    let mut end = start;
    for (i, c) in value[start..].char_indices() {
        if c.is_ascii_digit() || c == '.' {
            end = start + i + c.len_utf8();
        } else {
            break;
        }
    }

    let number: f64 = value[start..end].parse().ok()?;
    let rest = value[end..].trim_start().to_ascii_lowercase();

    if rest.starts_with("px") {
        Some(number)
    } else if rest.starts_with("rem") || rest.starts_with("em") {
        Some(number * 16.0)
    } else if rest.is_empty() && start == 0 {
        Some(number)
    } else {
        None
    }
}

/// Convert a pixel spacing value to a utility class.
///
/// Exact scale entries map directly; values within the 2px tolerance snap to
/// the nearest entry; anything else emits an arbitrary-value class like
/// `p-[13px]`.
pub fn spacing_to_class(px: f64, prefix: &str) -> Option<String> {
    if !px.is_finite() || px < 0.0 {
        return None;
    }

    let px = px.round() as i64;

    if let Some((_, suffix)) = SPACING_SCALE.iter().find(|(value, _)| *value == px) {
        return Some(format!("{}-{}", prefix, suffix));
    }

    let (closest, suffix) = SPACING_SCALE
        .iter()
        .min_by_key(|(value, _)| (value - px).abs())
        .copied()?;
    if (closest - px).abs() <= SPACING_TOLERANCE {
        return Some(format!("{}-{}", prefix, suffix));
    }

    Some(format!("{}-[{}px]", prefix, px))
}

/// Expanded four-side spacing values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpacingShorthand {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

/// Expand a CSS spacing shorthand (`10px`, `10px 20px`, ...) into per-side
/// values following the standard 1/2/3/4-value rules.
pub fn parse_spacing_shorthand(value: &str) -> Option<SpacingShorthand> {
    let values: Vec<f64> = value
        .split_whitespace()
        .filter_map(|token| {
            token
                .to_ascii_lowercase()
                .strip_suffix("px")
                .and_then(|n| n.parse().ok())
        })
        .collect();

    match values.as_slice() {
        [all] => Some(SpacingShorthand {
            top: *all,
            right: *all,
            bottom: *all,
            left: *all,
        }),
        [vertical, horizontal] => Some(SpacingShorthand {
            top: *vertical,
            right: *horizontal,
            bottom: *vertical,
            left: *horizontal,
        }),
        [top, horizontal, bottom] => Some(SpacingShorthand {
            top: *top,
            right: *horizontal,
            bottom: *bottom,
            left: *horizontal,
        }),
        [top, right, bottom, left, ..] => Some(SpacingShorthand {
            top: *top,
            right: *right,
            bottom: *bottom,
            left: *left,
        }),
        [] => None,
    }
}

/// Generate the smallest set of spacing classes for four side values,
/// collapsing symmetric pairs (`p-4`, `py-2 px-4`) where possible.
pub fn optimize_spacing_classes(
    top: f64,
    right: f64,
    bottom: f64,
    left: f64,
    prefix: &str,
) -> Vec<String> {
    let mut classes = Vec::new();

    if top == right && right == bottom && bottom == left {
        if let Some(cls) = spacing_to_class(top, prefix) {
            classes.push(cls);
        }
        return classes;
    }

    if top == bottom && right == left {
        if let Some(py) = spacing_to_class(top, &format!("{}y", prefix)) {
            classes.push(py);
        }
        if let Some(px) = spacing_to_class(right, &format!("{}x", prefix)) {
            classes.push(px);
        }
        return classes;
    }

    for (value, side) in [(top, "t"), (right, "r"), (bottom, "b"), (left, "l")] {
        if value != 0.0 {
            if let Some(cls) = spacing_to_class(value, &format!("{}{}", prefix, side)) {
                classes.push(cls);
            }
        }
    }

    classes
}
