//! Gap inference between repeated sibling elements.

use serde::{Deserialize, Serialize};

use crate::spacing::spacing_to_class;
use crate::types::ClampedBounds;

/// Axis along which sibling gaps are measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GapAxis {
    Horizontal,
    Vertical,
}

/// Measured gaps between a family of sibling elements.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GapAnalysis {
    pub gaps: Vec<i64>,
    pub mean_gap: f64,
    pub median_gap: i64,
    pub tailwind_gap: String,
}

/// Measure gaps between repeated elements along an axis.
///
/// Elements are sorted along the axis and only strictly positive gaps count
/// (overlapping or touching elements contribute nothing). Returns `None`
/// with fewer than two elements or no positive gaps.
pub fn measure_element_gaps(elements: &[ClampedBounds], axis: GapAxis) -> Option<GapAnalysis> {
    if elements.len() < 2 {
        return None;
    }

    let mut sorted: Vec<ClampedBounds> = elements.to_vec();
    match axis {
        GapAxis::Horizontal => sorted.sort_by_key(|e| e.x),
        GapAxis::Vertical => sorted.sort_by_key(|e| e.y),
    }

    let mut gaps: Vec<i64> = Vec::new();
    for pair in sorted.windows(2) {
        let gap = match axis {
            GapAxis::Horizontal => {
                pair[1].x as i64 - (pair[0].x as i64 + pair[0].w as i64)
            }
            GapAxis::Vertical => pair[1].y as i64 - (pair[0].y as i64 + pair[0].h as i64),
        };
        if gap > 0 {
            gaps.push(gap);
        }
    }

    if gaps.is_empty() {
        return None;
    }

    gaps.sort_unstable();
    let mean_gap = gaps.iter().sum::<i64>() as f64 / gaps.len() as f64;
    let median_gap = gaps[gaps.len() / 2];
    let tailwind_gap = spacing_to_class(median_gap as f64, "gap")?;

    Some(GapAnalysis {
        gaps,
        mean_gap: (mean_gap * 10.0).round() / 10.0,
        median_gap,
        tailwind_gap,
    })
}
