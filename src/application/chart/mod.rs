// Chart renderer - turns a panel and its series into chart directives
//
// The output is a description for an external charting backend (axes,
// traces, colors, corner radii). No pixels are produced here.
pub mod color;
pub mod inference;
pub mod stacking;

use self::color::{area_fill, color_for};
use self::inference::{bar_keys, consolidate, derive_label_key, trace_keys};
use self::stacking::{segment_shapes, SegmentShape};
use crate::domain::dashboard::{BarLayout, CenterText, Panel, PanelKind};
use crate::domain::filter::{is_selected, normalize_label};
use crate::domain::series::{as_number, as_text, Record, Series};
use serde::Serialize;

const DONUT_INNER_RADIUS: u32 = 60;
const PIE_OUTER_RADIUS: u32 = 100;

/// What the renderer has to draw from.
#[derive(Debug, Clone, Copy)]
pub enum SeriesState<'a> {
    /// The fetch for this panel has not resolved yet.
    Loading,
    Ready(&'a [Record]),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelView {
    pub id: String,
    pub title: String,
    pub filters: Vec<FilterChip>,
    pub body: PanelBody,
}

/// A selectable filter. `value` is the key to store in the filter state
/// when the chip is picked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterChip {
    pub label: String,
    pub value: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PanelBody {
    Loading,
    Empty,
    Unsupported {
        #[serde(rename = "chartType")]
        chart_type: String,
    },
    Pie(PieChart),
    Donut(PieChart),
    Line(CartesianChart),
    Area(CartesianChart),
    Bar(BarChart),
    Activity(ActivityFeed),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PieChart {
    pub inner_radius: u32,
    pub outer_radius: u32,
    pub segments: Vec<PieSegment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub center: Option<CenterText>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSegment {
    pub name: String,
    pub value: f64,
    pub color: String,
    pub legend: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartesianChart {
    pub x_key: String,
    pub traces: Vec<Trace>,
    pub data: Series,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    pub key: String,
    pub stroke: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Margin {
    pub top: u32,
    pub right: u32,
    pub left: u32,
    pub bottom: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BarChart {
    pub layout: BarLayout,
    pub category_key: String,
    pub category_axis: Axis,
    pub bar_size: u32,
    pub margin: Margin,
    pub stacked: bool,
    pub series: Vec<BarSeries>,
    pub shapes: Vec<CategoryShapes>,
    pub data: Series,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BarSeries {
    pub key: String,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShapes {
    pub category: String,
    pub segments: Vec<SegmentShape>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityFeed {
    pub items: Vec<ActivityEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityEntry {
    pub title: String,
    pub description: String,
    pub time: String,
}

/// Render one panel. Hidden panels render nothing at all.
pub fn render(panel: &Panel, state: SeriesState<'_>, active_filter: &str) -> Option<PanelView> {
    if !panel.visible {
        return None;
    }

    let body = match state {
        SeriesState::Loading => PanelBody::Loading,
        SeriesState::Ready(data) => render_body(panel, data),
    };

    Some(PanelView {
        id: panel.id.clone(),
        title: panel.title.clone(),
        filters: filter_chips(panel, active_filter),
        body,
    })
}

fn render_body(panel: &Panel, data: &[Record]) -> PanelBody {
    match &panel.kind {
        PanelKind::Unsupported(tag) => {
            tracing::debug!("Panel {} has unsupported type {}", panel.id, tag);
            PanelBody::Unsupported {
                chart_type: tag.clone(),
            }
        }
        _ if data.is_empty() => PanelBody::Empty,
        PanelKind::Pie => PanelBody::Pie(pie(panel, data, 0, None)),
        PanelKind::Donut => PanelBody::Donut(pie(
            panel,
            data,
            DONUT_INNER_RADIUS,
            panel.center_text.clone(),
        )),
        PanelKind::Line => PanelBody::Line(cartesian(panel, data, false)),
        PanelKind::Area => PanelBody::Area(cartesian(panel, data, true)),
        PanelKind::Bar => PanelBody::Bar(bar(panel, data)),
        PanelKind::Activity => PanelBody::Activity(activity(data)),
    }
}

fn filter_chips(panel: &Panel, active_filter: &str) -> Vec<FilterChip> {
    panel
        .filters
        .iter()
        .flatten()
        .map(|label| FilterChip {
            label: label.clone(),
            value: normalize_label(label),
            selected: is_selected(label, active_filter),
        })
        .collect()
}

fn pie(panel: &Panel, data: &[Record], inner_radius: u32, center: Option<CenterText>) -> PieChart {
    let label_key = derive_label_key(data).unwrap_or("name");
    let segments = data
        .iter()
        .enumerate()
        .map(|(i, r)| {
            let name = r.get(label_key).map(as_text).unwrap_or_default();
            let value = r.get("value").and_then(as_number).unwrap_or(0.0);
            let legend = match r.get("percentage").and_then(as_number) {
                Some(pct) => format!("{name} ({}%)", format_value(pct)),
                None => format!("{name} ({})", format_value(value)),
            };
            let entry_color = r.get("color").and_then(|c| c.as_str());
            PieSegment {
                color: color_for(&name, i, entry_color, panel.colors.as_ref()),
                name,
                value,
                legend,
            }
        })
        .collect();

    PieChart {
        inner_radius,
        outer_radius: PIE_OUTER_RADIUS,
        segments,
        center,
    }
}

fn cartesian(panel: &Panel, data: &[Record], filled: bool) -> CartesianChart {
    let x_key = derive_label_key(data).unwrap_or("name").to_string();
    let traces = trace_keys(data, &x_key)
        .into_iter()
        .enumerate()
        .map(|(i, key)| {
            let stroke = color_for(&key, i, None, panel.colors.as_ref());
            let fill = filled.then(|| area_fill(&key, &stroke, panel.colors.as_ref()));
            Trace { key, stroke, fill }
        })
        .collect();

    CartesianChart {
        x_key,
        traces,
        data: data.to_vec(),
    }
}

fn bar(panel: &Panel, data: &[Record]) -> BarChart {
    let data = consolidate(data);
    let layout = panel.layout.unwrap_or_default();
    let (category, keys) = match bar_keys(&data) {
        Some(keys) => (keys.category, keys.series),
        None => ("name".to_string(), Vec::new()),
    };

    let series = keys
        .iter()
        .enumerate()
        .map(|(i, key)| BarSeries {
            key: key.clone(),
            color: color_for(key, i, None, panel.colors.as_ref()),
            stack_id: panel.stacked.then(|| "stack".to_string()),
        })
        .collect();

    let shapes = data
        .iter()
        .map(|r| {
            let values: Vec<f64> = keys
                .iter()
                .map(|k| r.get(k).and_then(as_number).unwrap_or(0.0))
                .collect();
            CategoryShapes {
                category: r.get(&category).map(as_text).unwrap_or_default(),
                segments: segment_shapes(&keys, &values, layout, panel.stacked),
            }
        })
        .collect();

    let (category_axis, bar_size, margin) = match layout {
        BarLayout::Horizontal => (
            Axis::Y,
            20,
            Margin { top: 5, right: 30, left: 100, bottom: 5 },
        ),
        BarLayout::Vertical => (
            Axis::X,
            32,
            Margin { top: 20, right: 30, left: 20, bottom: 5 },
        ),
    };

    BarChart {
        layout,
        category_key: category,
        category_axis,
        bar_size,
        margin,
        stacked: panel.stacked,
        series,
        shapes,
        data,
    }
}

fn activity(data: &[Record]) -> ActivityFeed {
    let text = |r: &Record, key: &str| r.get(key).map(as_text).unwrap_or_default();
    ActivityFeed {
        items: data
            .iter()
            .map(|r| ActivityEntry {
                title: text(r, "name"),
                description: text(r, "description"),
                time: text(r, "time"),
            })
            .collect(),
    }
}

/// Whole numbers without a fractional part, everything else as is.
fn format_value(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{v}")
    }
}

#[cfg(test)]
mod tests {
    use super::stacking::Rounding;
    use super::*;
    use crate::domain::series::record;
    use serde_json::json;
    use std::collections::BTreeMap;

    fn panel(kind: PanelKind, data: Series) -> Panel {
        let mut panel = Panel::new("p", "Panel", kind);
        panel.data = data;
        panel
    }

    fn body(panel: &Panel) -> PanelBody {
        render(panel, SeriesState::Ready(&panel.data), "12months")
            .expect("visible panel")
            .body
    }

    #[test]
    fn test_hidden_panel_renders_nothing() {
        let mut p = panel(PanelKind::Line, vec![record([("month", json!("Jan"))])]);
        p.visible = false;
        assert!(render(&p, SeriesState::Ready(&p.data), "12months").is_none());
        assert!(render(&p, SeriesState::Loading, "12months").is_none());
    }

    #[test]
    fn test_empty_and_loading_states() {
        let p = panel(PanelKind::Bar, vec![]);
        assert_eq!(body(&p), PanelBody::Empty);
        let view = render(&p, SeriesState::Loading, "12months").unwrap();
        assert_eq!(view.body, PanelBody::Loading);
    }

    #[test]
    fn test_unsupported_type_marker() {
        let p = panel(PanelKind::Unsupported("radar".into()), vec![]);
        assert_eq!(
            body(&p),
            PanelBody::Unsupported {
                chart_type: "radar".into()
            }
        );
    }

    #[test]
    fn test_donut_with_center_text() {
        let mut p = panel(
            PanelKind::Donut,
            vec![
                record([("name", json!("Active")), ("value", json!(70))]),
                record([("name", json!("Pending")), ("value", json!(30))]),
            ],
        );
        p.center_text = Some(CenterText {
            value: "100".into(),
            label: "Total".into(),
        });

        let PanelBody::Donut(chart) = body(&p) else {
            panic!("expected donut");
        };
        assert_eq!(chart.segments.len(), 2);
        assert_eq!(chart.inner_radius, DONUT_INNER_RADIUS);
        assert_ne!(chart.segments[0].color, chart.segments[1].color);
        assert_eq!(chart.segments[0].legend, "Active (70)");
        let center = chart.center.unwrap();
        assert_eq!((center.value.as_str(), center.label.as_str()), ("100", "Total"));
    }

    #[test]
    fn test_pie_legend_prefers_percentage() {
        let p = panel(
            PanelKind::Pie,
            vec![record([
                ("name", json!("Draft")),
                ("value", json!(3)),
                ("percentage", json!(37.5)),
                ("color", json!("#111111")),
            ])],
        );
        let PanelBody::Pie(chart) = body(&p) else {
            panic!("expected pie");
        };
        assert_eq!(chart.inner_radius, 0);
        assert_eq!(chart.segments[0].legend, "Draft (37.5%)");
        assert_eq!(chart.segments[0].color, "#111111");
    }

    #[test]
    fn test_legend_for_very_large_values() {
        let p = panel(
            PanelKind::Pie,
            vec![
                record([("name", json!("Big")), ("value", json!(1e20))]),
                record([("name", json!("Small")), ("value", json!(12.0))]),
            ],
        );
        let PanelBody::Pie(chart) = body(&p) else {
            panic!("expected pie");
        };
        assert_eq!(chart.segments[0].legend, format!("Big ({})", 1e20));
        assert_eq!(chart.segments[1].legend, "Small (12)");
    }

    #[test]
    fn test_line_traces_from_first_record() {
        let p = panel(
            PanelKind::Line,
            vec![
                record([("Contracts", json!(1)), ("month", json!("Jan")), ("Projects", json!(2))]),
                record([("month", json!("Feb")), ("Extra", json!(9))]),
            ],
        );
        let PanelBody::Line(chart) = body(&p) else {
            panic!("expected line");
        };
        assert_eq!(chart.x_key, "month");
        let keys: Vec<&str> = chart.traces.iter().map(|t| t.key.as_str()).collect();
        assert_eq!(keys, vec!["Contracts", "Projects"]);
        assert!(chart.traces.iter().all(|t| t.fill.is_none()));
    }

    #[test]
    fn test_area_fill_derived_from_stroke() {
        let mut p = panel(
            PanelKind::Area,
            vec![record([("date", json!("Mar 01")), ("Revenue", json!(5))])],
        );
        let mut colors = BTreeMap::new();
        colors.insert("Revenue".to_string(), "#000000".to_string());
        p.colors = Some(colors);

        let PanelBody::Area(chart) = body(&p) else {
            panic!("expected area");
        };
        assert_eq!(chart.traces[0].stroke, "#000000");
        assert_eq!(chart.traces[0].fill.as_deref(), Some("rgba(0, 0, 0, 0.3)"));
    }

    #[test]
    fn test_bar_consolidates_single_key_records() {
        let p = panel(
            PanelKind::Bar,
            vec![
                record([("A", json!(10))]),
                record([("B", json!(20))]),
                record([("C", json!(5))]),
            ],
        );
        let PanelBody::Bar(chart) = body(&p) else {
            panic!("expected bar");
        };
        assert_eq!(
            chart.data,
            vec![record([
                ("name", json!("Module Usage")),
                ("A", json!(10)),
                ("B", json!(20)),
                ("C", json!(5)),
            ])]
        );
        let keys: Vec<&str> = chart.series.iter().map(|s| s.key.as_str()).collect();
        assert_eq!(keys, vec!["A", "B", "C"]);
        assert_eq!(chart.category_axis, Axis::X);
        assert_eq!(chart.shapes[0].category, "Module Usage");
    }

    #[test]
    fn test_stacked_horizontal_bar_shapes() {
        let mut p = panel(
            PanelKind::Bar,
            vec![
                record([("category", json!("Delivery")), ("A", json!(1)), ("B", json!(2)), ("C", json!(3))]),
                record([("category", json!("Support")), ("A", json!(0)), ("B", json!(2)), ("C", json!(3))]),
            ],
        );
        p.stacked = true;
        p.layout = Some(BarLayout::Horizontal);

        let PanelBody::Bar(chart) = body(&p) else {
            panic!("expected bar");
        };
        assert_eq!(chart.category_axis, Axis::Y);
        assert_eq!(chart.margin.left, 100);
        assert!(chart.series.iter().all(|s| s.stack_id.as_deref() == Some("stack")));

        let first: Vec<Rounding> = chart.shapes[0].segments.iter().map(|s| s.rounding).collect();
        assert_eq!(first, vec![Rounding::Rounded, Rounding::Square, Rounding::Rounded]);
        let second: Vec<Rounding> = chart.shapes[1].segments.iter().map(|s| s.rounding).collect();
        assert_eq!(second, vec![Rounding::Square, Rounding::Rounded, Rounding::Rounded]);
    }

    #[test]
    fn test_filter_chips_whitespace_insensitive() {
        let mut p = panel(PanelKind::Line, vec![]);
        p.filters = Some(vec!["12 months".into(), "Last 7 Days".into()]);

        let view = render(&p, SeriesState::Ready(&p.data), "Last7Days").unwrap();
        let selected: Vec<bool> = view.filters.iter().map(|f| f.selected).collect();
        assert_eq!(selected, vec![false, true]);
        assert_eq!(view.filters[1].value, "Last7Days");
    }

    #[test]
    fn test_activity_feed() {
        let p = panel(
            PanelKind::Activity,
            vec![record([
                ("name", json!("Contract signed")),
                ("description", json!("ACME")),
                ("time", json!("2024-05-01 09:30")),
            ])],
        );
        let PanelBody::Activity(feed) = body(&p) else {
            panic!("expected activity");
        };
        assert_eq!(feed.items[0].title, "Contract signed");
        assert_eq!(feed.items[0].description, "ACME");
    }

    #[test]
    fn test_wrong_typed_values_degrade() {
        let p = panel(
            PanelKind::Pie,
            vec![record([("name", json!("Odd")), ("value", json!({"x": 1}))])],
        );
        let PanelBody::Pie(chart) = body(&p) else {
            panic!("expected pie");
        };
        assert_eq!(chart.segments[0].value, 0.0);
    }
}
