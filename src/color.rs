//! Color parsing, conversion, and perceptual helpers.
//!
//! All conversions operate on 8-bit RGB channels. CSS inputs are accepted as
//! `rgb(...)`/`rgba(...)` strings or hex codes (3- or 6-digit).

/// An 8-bit RGB triple.
pub type Rgb = [u8; 3];

// Weighted RGB distance (human eye is more sensitive to green).
// CIE76 approximation weights.
const R_WEIGHT: f64 = 0.30;
const G_WEIGHT: f64 = 0.59;
const B_WEIGHT: f64 = 0.11;

/// Parse an `rgb(...)`/`rgba(...)` CSS string into a triple. The alpha
/// component, when present, is ignored; transparency is handled by
/// [`rgb_to_hex`].
pub fn parse_rgb(value: &str) -> Option<Rgb> {
    let start = value.find("rgb")?;
    let rest = &value[start..];
    let open = rest.find('(')?;
    let close = rest.find(')')?;
    if close <= open {
        return None;
    }

    let inner = &rest[open + 1..close];
    let mut channels = inner.split(',').map(str::trim);

    let r: u8 = channels.next()?.parse().ok()?;
    let g: u8 = channels.next()?.parse().ok()?;
    let b: u8 = channels.next()?.parse().ok()?;
    Some([r, g, b])
}

/// Convert a CSS color string to a lowercase `#rrggbb` hex code.
///
/// Fully transparent values (`transparent`, `rgba(0, 0, 0, 0)`) yield `None`
/// since they carry no paintable color.
pub fn rgb_to_hex(value: &str) -> Option<String> {
    if value.is_empty() {
        return None;
    }
    if let Some(stripped) = value.strip_prefix('#') {
        return Some(format!("#{}", stripped.to_ascii_lowercase()));
    }
    if value == "transparent" || value.contains("rgba(0, 0, 0, 0)") {
        return None;
    }
    parse_rgb(value).map(triple_to_hex)
}

/// Format a triple as a lowercase `#rrggbb` hex code.
pub fn triple_to_hex(rgb: Rgb) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb[0], rgb[1], rgb[2])
}

/// Format a triple as a CSS `rgb(r, g, b)` string.
pub fn format_rgb(rgb: Rgb) -> String {
    format!("rgb({}, {}, {})", rgb[0], rgb[1], rgb[2])
}

/// Parse a hex color string (`#ff8000`, `ff8000`, or shorthand `#f80`).
pub fn hex_to_rgb(value: &str) -> Option<Rgb> {
    if value.is_empty() {
        return None;
    }
    let hex = value.trim_start_matches('#');

    let expanded: String = if hex.len() == 3 {
        hex.chars().flat_map(|c| [c, c]).collect()
    } else {
        hex.to_string()
    };

    if expanded.len() != 6 {
        return None;
    }

    let r = u8::from_str_radix(&expanded[0..2], 16).ok()?;
    let g = u8::from_str_radix(&expanded[2..4], 16).ok()?;
    let b = u8::from_str_radix(&expanded[4..6], 16).ok()?;
    Some([r, g, b])
}

fn parse_any(value: &str) -> Option<Rgb> {
    hex_to_rgb(value).or_else(|| parse_rgb(value))
}

/// Perceptual distance between two colors on a 0-100 scale (lower is more
/// similar). Invalid inputs map to the maximum distance.
pub fn color_distance(color1: &str, color2: &str) -> f64 {
    let (Some(a), Some(b)) = (parse_any(color1), parse_any(color2)) else {
        return 100.0;
    };

    let dr = a[0] as f64 - b[0] as f64;
    let dg = a[1] as f64 - b[1] as f64;
    let db = a[2] as f64 - b[2] as f64;

    let distance = (R_WEIGHT * dr * dr + G_WEIGHT * dg * dg + B_WEIGHT * db * db).sqrt();
    let max_distance =
        (R_WEIGHT * 255.0_f64.powi(2) + G_WEIGHT * 255.0_f64.powi(2) + B_WEIGHT * 255.0_f64.powi(2))
            .sqrt();

    round2(distance / max_distance * 100.0)
}

/// Lighten a hex color by a percentage (0-100), moving each channel toward
/// white. Invalid inputs are returned unchanged.
pub fn lighten(hex_color: &str, percent: f64) -> String {
    let Some(rgb) = hex_to_rgb(hex_color) else {
        return hex_color.to_string();
    };

    let factor = percent / 100.0;
    let shift = |c: u8| (c as f64 + (255.0 - c as f64) * factor) as u8;
    triple_to_hex([shift(rgb[0]), shift(rgb[1]), shift(rgb[2])])
}

/// Darken a hex color by a percentage (0-100), scaling each channel toward
/// black. Invalid inputs are returned unchanged.
pub fn darken(hex_color: &str, percent: f64) -> String {
    let Some(rgb) = hex_to_rgb(hex_color) else {
        return hex_color.to_string();
    };

    let factor = 1.0 - percent / 100.0;
    let shift = |c: u8| (c as f64 * factor) as u8;
    triple_to_hex([shift(rgb[0]), shift(rgb[1]), shift(rgb[2])])
}

/// Broadcast luma on a 0-1 scale.
pub fn luminance(rgb: Rgb) -> f64 {
    (0.299 * rgb[0] as f64 + 0.587 * rgb[1] as f64 + 0.114 * rgb[2] as f64) / 255.0
}

/// HSV-style saturation: (max - min) / max, 0 for black.
pub fn saturation(rgb: Rgb) -> f64 {
    let max_c = rgb.iter().copied().max().unwrap_or(0) as f64;
    let min_c = rgb.iter().copied().min().unwrap_or(0) as f64;
    if max_c > 0.0 {
        (max_c - min_c) / max_c
    } else {
        0.0
    }
}

pub(crate) fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

pub(crate) fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_rgb_accepts_rgb_and_rgba() {
        assert_eq!(parse_rgb("rgb(255, 128, 0)"), Some([255, 128, 0]));
        assert_eq!(parse_rgb("rgba(12, 34, 56, 0.5)"), Some([12, 34, 56]));
        assert_eq!(parse_rgb("rgb(0,0,0)"), Some([0, 0, 0]));
    }

    #[test]
    fn parse_rgb_rejects_garbage() {
        assert_eq!(parse_rgb(""), None);
        assert_eq!(parse_rgb("red"), None);
        assert_eq!(parse_rgb("rgb(300, 0, 0)"), None);
        assert_eq!(parse_rgb("rgb(1, 2)"), None);
    }

    #[test]
    fn rgb_to_hex_handles_strings_and_transparency() {
        assert_eq!(rgb_to_hex("rgb(255, 128, 0)"), Some("#ff8000".to_string()));
        assert_eq!(rgb_to_hex("#FF8000"), Some("#ff8000".to_string()));
        assert_eq!(rgb_to_hex("transparent"), None);
        assert_eq!(rgb_to_hex("rgba(0, 0, 0, 0)"), None);
    }

    #[test]
    fn hex_to_rgb_handles_shorthand() {
        assert_eq!(hex_to_rgb("#f80"), Some([0xff, 0x88, 0x00]));
        assert_eq!(hex_to_rgb("ff8000"), Some([255, 128, 0]));
        assert_eq!(hex_to_rgb("#ff80"), None);
        assert_eq!(hex_to_rgb("#zzzzzz"), None);
    }

    #[test]
    fn hex_round_trips_through_rgb() {
        for rgb in [[0u8, 0, 0], [255, 255, 255], [17, 34, 51], [200, 1, 99]] {
            assert_eq!(hex_to_rgb(&triple_to_hex(rgb)), Some(rgb));
        }
    }

    #[test]
    fn distance_is_zero_for_identical_and_max_for_invalid() {
        assert_eq!(color_distance("#123456", "#123456"), 0.0);
        assert_eq!(color_distance("nonsense", "#123456"), 100.0);
    }

    #[test]
    fn distance_black_to_white_is_full_scale() {
        assert_eq!(color_distance("#000000", "#ffffff"), 100.0);
    }

    #[test]
    fn distance_accepts_rgb_strings() {
        let d = color_distance("rgb(10, 20, 30)", "rgb(10, 20, 40)");
        assert!(d > 0.0 && d < 5.0, "small shift should be small: {d}");
    }

    #[test]
    fn lighten_and_darken_move_toward_extremes() {
        assert_eq!(lighten("#000000", 100.0), "#ffffff");
        assert_eq!(darken("#ffffff", 100.0), "#000000");
        assert_eq!(lighten("#808080", 0.0), "#808080");
        // Invalid input passes through.
        assert_eq!(lighten("not-a-color", 50.0), "not-a-color");
    }

    #[test]
    fn luminance_matches_broadcast_weights() {
        assert_eq!(luminance([0, 0, 0]), 0.0);
        assert_eq!(luminance([255, 255, 255]), 1.0);
        let red = luminance([255, 0, 0]);
        assert!((red - 0.299).abs() < 1e-9);
    }

    #[test]
    fn saturation_extremes() {
        assert_eq!(saturation([0, 0, 0]), 0.0);
        assert_eq!(saturation([128, 128, 128]), 0.0);
        assert_eq!(saturation([255, 0, 0]), 1.0);
    }
}
