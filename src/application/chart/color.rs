// Series color assignment
use std::collections::BTreeMap;

pub const PALETTE: [&str; 8] = [
    "#3b82f6", "#10b981", "#f59e0b", "#ef4444", "#8b5cf6", "#06b6d4", "#ec4899", "#84cc16",
];

/// Fill alpha derived for area traces.
pub const AREA_FILL_ALPHA: f32 = 0.3;

/// Color for the series or segment `name` at position `index`.
///
/// Precedence: the entry's own color, then the panel override for `name`,
/// then the palette by position.
pub fn color_for(
    name: &str,
    index: usize,
    entry_color: Option<&str>,
    overrides: Option<&BTreeMap<String, String>>,
) -> String {
    entry_color
        .filter(|c| !c.trim().is_empty())
        .or_else(|| overrides.and_then(|o| o.get(name)).map(String::as_str))
        .unwrap_or(PALETTE[index % PALETTE.len()])
        .to_string()
}

/// Fill for an area trace: an explicit `<name>Fill` override, else the stroke
/// at [`AREA_FILL_ALPHA`].
pub fn area_fill(name: &str, stroke: &str, overrides: Option<&BTreeMap<String, String>>) -> String {
    overrides
        .and_then(|o| o.get(&format!("{name}Fill")))
        .cloned()
        .unwrap_or_else(|| translucent(stroke, AREA_FILL_ALPHA))
}

/// `#rgb` / `#rrggbb` -> `rgba(r, g, b, alpha)`. Colors that don't parse are
/// returned unchanged.
pub fn translucent(color: &str, alpha: f32) -> String {
    match parse_hex(color) {
        Some((r, g, b)) => format!("rgba({r}, {g}, {b}, {alpha})"),
        None => color.to_string(),
    }
}

fn parse_hex(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.trim().strip_prefix('#').filter(|h| h.is_ascii())?;
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        6 => Some((channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?)),
        3 => {
            let expand = |i: usize| channel(&hex[i..i + 1].repeat(2));
            Some((expand(0)?, expand(1)?, expand(2)?))
        }
        _ => None,
    }
}
