// Bar corner rounding
//
// Radii are ordered [top-left, top-right, bottom-right, bottom-left].
use crate::domain::dashboard::BarLayout;
use serde::Serialize;

pub const BAR_RADIUS: f32 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Rounding {
    Rounded,
    Square,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentShape {
    pub key: String,
    pub rounding: Rounding,
    pub radius: [f32; 4],
}

const SQUARE: [f32; 4] = [0.0; 4];
const TOP: [f32; 4] = [BAR_RADIUS, BAR_RADIUS, 0.0, 0.0];
const RIGHT: [f32; 4] = [0.0, BAR_RADIUS, BAR_RADIUS, 0.0];
const LEFT: [f32; 4] = [BAR_RADIUS, 0.0, 0.0, BAR_RADIUS];
const ALL: [f32; 4] = [BAR_RADIUS; 4];

/// Corner shapes for one category's segments, in series order.
///
/// Unstacked bars are each rounded on their outward side. A stack reads as
/// one shape: horizontally the first nonzero segment is rounded on the left
/// and the last nonzero one on the right; vertically only the last nonzero
/// segment is rounded, on top. Zero-valued segments are always square.
pub fn segment_shapes(
    keys: &[String],
    values: &[f64],
    layout: BarLayout,
    stacked: bool,
) -> Vec<SegmentShape> {
    let outward = match layout {
        BarLayout::Horizontal => RIGHT,
        BarLayout::Vertical => TOP,
    };

    let first = values.iter().position(|v| *v != 0.0);
    let last = values.iter().rposition(|v| *v != 0.0);

    keys.iter()
        .enumerate()
        .map(|(i, key)| {
            let radius = if !stacked {
                outward
            } else {
                let is_first = first == Some(i);
                let is_last = last == Some(i);
                match (layout, is_first, is_last) {
                    (BarLayout::Horizontal, true, true) => ALL,
                    (BarLayout::Horizontal, true, false) => LEFT,
                    (BarLayout::Horizontal, false, true) => RIGHT,
                    (BarLayout::Vertical, _, true) => TOP,
                    _ => SQUARE,
                }
            };
            let rounding = if radius == SQUARE {
                Rounding::Square
            } else {
                Rounding::Rounded
            };
            SegmentShape {
                key: key.clone(),
                rounding,
                radius,
            }
        })
        .collect()
}
