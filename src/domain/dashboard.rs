// Dashboard configuration tree
use super::series::Series;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardConfiguration {
    #[serde(default)]
    pub stats: Vec<StatDescriptor>,
    #[serde(default)]
    pub rows: Vec<Row>,
}

impl DashboardConfiguration {
    pub fn panels(&self) -> impl Iterator<Item = &Panel> {
        self.rows.iter().flat_map(|row| row.properties.iter())
    }

    pub fn find_panel(&self, panel_id: &str) -> Option<&Panel> {
        self.panels().find(|p| p.id == panel_id)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowKind {
    #[default]
    Chart,
    Activity,
    Mixed,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Row {
    #[serde(rename = "type", default)]
    pub kind: RowKind,
    #[serde(default)]
    pub properties: Vec<Panel>,
}

/// Chart kind. Unknown tags are kept verbatim so they can be reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PanelKind {
    Pie,
    Donut,
    Line,
    Area,
    Bar,
    Activity,
    Unsupported(String),
}

impl From<String> for PanelKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "pie" => PanelKind::Pie,
            "donut" => PanelKind::Donut,
            "line" => PanelKind::Line,
            "area" => PanelKind::Area,
            "bar" => PanelKind::Bar,
            "activity" => PanelKind::Activity,
            _ => PanelKind::Unsupported(tag),
        }
    }
}

impl From<PanelKind> for String {
    fn from(kind: PanelKind) -> Self {
        kind.as_str().to_string()
    }
}

impl PanelKind {
    pub fn as_str(&self) -> &str {
        match self {
            PanelKind::Pie => "pie",
            PanelKind::Donut => "donut",
            PanelKind::Line => "line",
            PanelKind::Area => "area",
            PanelKind::Bar => "bar",
            PanelKind::Activity => "activity",
            PanelKind::Unsupported(tag) => tag,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BarLayout {
    Horizontal,
    #[default]
    Vertical,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CenterText {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Panel {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "type")]
    pub kind: PanelKind,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<BarLayout>,
    #[serde(default)]
    pub data: Series,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<Vec<String>>,
    #[serde(default)]
    pub stacked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center_text: Option<CenterText>,
}

fn default_visible() -> bool {
    true
}

#[cfg(test)]
impl Panel {
    pub fn new(id: impl Into<String>, title: impl Into<String>, kind: PanelKind) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            kind,
            visible: true,
            layout: None,
            data: Vec::new(),
            filters: None,
            stacked: false,
            colors: None,
            center_text: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatDescriptor {
    pub title: String,
    pub value: String,
    pub icon: String,
    pub color: String,
    pub bg_color: String,
}

impl StatDescriptor {
    pub fn new(
        title: impl Into<String>,
        value: impl Into<String>,
        icon: impl Into<String>,
        color: impl Into<String>,
        bg_color: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            value: value.into(),
            icon: icon.into(),
            color: color.into(),
            bg_color: bg_color.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panel_kind_from_tag() {
        assert_eq!(PanelKind::from("donut".to_string()), PanelKind::Donut);
        assert_eq!(
            PanelKind::from("radar".to_string()),
            PanelKind::Unsupported("radar".to_string())
        );
        assert_eq!(String::from(PanelKind::Unsupported("radar".into())), "radar");
    }

    #[test]
    fn test_panel_deserialize_defaults() {
        let panel: Panel = serde_json::from_str(r#"{"id":"p1","type":"bar"}"#).unwrap();
        assert!(panel.visible);
        assert!(!panel.stacked);
        assert!(panel.data.is_empty());
        assert_eq!(panel.kind, PanelKind::Bar);
    }

    #[test]
    fn test_find_panel_across_rows() {
        let config = DashboardConfiguration {
            stats: vec![],
            rows: vec![
                Row { kind: RowKind::Chart, properties: vec![Panel::new("a", "A", PanelKind::Pie)] },
                Row { kind: RowKind::Mixed, properties: vec![Panel::new("b", "B", PanelKind::Line)] },
            ],
        };
        assert_eq!(config.find_panel("b").map(|p| p.kind.clone()), Some(PanelKind::Line));
        assert!(config.find_panel("zzz").is_none());
    }
}
