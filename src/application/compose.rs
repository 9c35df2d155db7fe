// Dashboard config composer - merges a static layout with transformed data
use crate::application::transform::{transform, Transformed};
use crate::domain::dashboard::{DashboardConfiguration, Panel, Row, StatDescriptor};
use crate::domain::payload::{Metric, RawPayloads};
use crate::domain::role::Role;

/// A panel id joined to the metric that feeds it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    pub panel_id: &'static str,
    pub metric: Metric,
}

const fn bind(panel_id: &'static str, metric: Metric) -> Binding {
    Binding { panel_id, metric }
}

/// Per-role lookup table entry.
#[derive(Debug, Clone, Copy)]
pub struct RoleBindings {
    pub stats: Metric,
    pub panels: &'static [Binding],
}

impl RoleBindings {
    pub fn metric_for(&self, panel_id: &str) -> Option<Metric> {
        self.panels
            .iter()
            .find(|b| b.panel_id == panel_id)
            .map(|b| b.metric)
    }
}

const SUPER_ADMIN: RoleBindings = RoleBindings {
    stats: Metric::AdminStats,
    panels: &[
        bind("company-growth", Metric::CompanyGrowth),
        bind("module-usage", Metric::ModuleUsage),
        bind("contract-status", Metric::ContractStatus),
        bind("recent-activity", Metric::RecentActivity),
    ],
};

const COMPANY_ADMIN: RoleBindings = RoleBindings {
    stats: Metric::CompanyStats,
    panels: &[
        bind("vendors-distribution", Metric::VendorsDistribution),
        bind("contract-status", Metric::ContractStatus),
        bind("monthly-activity", Metric::MonthlyActivity),
        bind("evaluation-scores", Metric::EvaluationScores),
        bind("recent-activity", Metric::RecentActivity),
    ],
};

const VENDOR: RoleBindings = RoleBindings {
    stats: Metric::VendorStats,
    panels: &[
        bind("revenue-trend", Metric::RevenueTrend),
        bind("contract-status", Metric::ContractStatus),
        bind("evaluation-scores", Metric::EvaluationScores),
    ],
};

pub fn bindings_for(role: &Role) -> Option<RoleBindings> {
    match role {
        Role::SuperAdmin => Some(SUPER_ADMIN),
        Role::CompanyAdmin => Some(COMPANY_ADMIN),
        Role::Vendor => Some(VENDOR),
        Role::Other(_) => None,
    }
}

/// Build the configuration tree for `role`. Roles without bindings get the
/// static layout back unchanged. Row and panel order is preserved.
pub fn compose(
    layout: &DashboardConfiguration,
    role: &Role,
    raw: &RawPayloads,
) -> DashboardConfiguration {
    let Some(bindings) = bindings_for(role) else {
        tracing::debug!("No bindings for role {}, using static layout", role);
        return layout.clone();
    };

    DashboardConfiguration {
        stats: compose_stats(&bindings, raw).unwrap_or_else(|| layout.stats.clone()),
        rows: layout
            .rows
            .iter()
            .map(|row| Row {
                kind: row.kind,
                properties: row
                    .properties
                    .iter()
                    .map(|panel| compose_panel(panel, &bindings, raw))
                    .collect(),
            })
            .collect(),
    }
}

pub fn compose_stats(bindings: &RoleBindings, raw: &RawPayloads) -> Option<Vec<StatDescriptor>> {
    let metric = bindings.stats;
    match transform(&metric.decode(raw.get(metric.key()))) {
        Transformed::Stats(stats) => Some(stats),
        Transformed::Series { .. } => None,
    }
}

/// Replace a bound panel's data (and center text, when the transformer
/// supplies one). Unbound panels pass through.
pub fn compose_panel(panel: &Panel, bindings: &RoleBindings, raw: &RawPayloads) -> Panel {
    let Some(metric) = bindings.metric_for(&panel.id) else {
        return panel.clone();
    };

    let mut composed = panel.clone();
    match transform(&metric.decode(raw.get(metric.key()))) {
        Transformed::Series { data, center_text } => {
            composed.data = data;
            if center_text.is_some() {
                composed.center_text = center_text;
            }
        }
        Transformed::Stats(_) => {
            tracing::warn!("Metric {} produces stats, not panel data", metric.key());
        }
    }
    composed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dashboard::{PanelKind, RowKind};
    use crate::domain::series::record;
    use serde_json::json;

    fn layout() -> DashboardConfiguration {
        let mut static_panel = Panel::new("help", "Help", PanelKind::Activity);
        static_panel.data = vec![record([("name", json!("Read the guide"))])];

        DashboardConfiguration {
            stats: vec![StatDescriptor::new("Placeholder", "-", "users", "#000", "#fff")],
            rows: vec![
                Row {
                    kind: RowKind::Chart,
                    properties: vec![
                        Panel::new("vendors-distribution", "Vendors", PanelKind::Donut),
                        Panel::new("contract-status", "Contracts", PanelKind::Pie),
                    ],
                },
                Row {
                    kind: RowKind::Activity,
                    properties: vec![static_panel],
                },
            ],
        }
    }

    fn payloads() -> RawPayloads {
        let mut raw = RawPayloads::new();
        raw.insert(
            "vendors_distribution".to_string(),
            json!({"total": 42, "active": 40, "pending": 2}),
        );
        raw.insert("company_stats".to_string(), json!({"totalVendors": 42}));
        raw
    }

    #[test]
    fn test_company_admin_vendors_distribution() {
        let composed = compose(&layout(), &Role::CompanyAdmin, &payloads());
        let panel = composed.find_panel("vendors-distribution").unwrap();

        assert_eq!(panel.center_text.as_ref().unwrap().value, "42");
        let expected = crate::application::transform::vendors_distribution(
            &crate::domain::payload::VendorsDistributionPayload {
                total: Some(42.0),
                active: Some(40.0),
                pending: Some(2.0),
                ..Default::default()
            },
        )
        .0;
        assert_eq!(panel.data, expected);
        assert_eq!(composed.stats[0].value, "42");
    }

    #[test]
    fn test_unknown_role_returns_layout_unchanged() {
        let layout = layout();
        let composed = compose(&layout, &Role::Other("auditor".into()), &payloads());
        assert_eq!(composed, layout);
    }

    #[test]
    fn test_order_and_unbound_panels_preserved() {
        let layout = layout();
        let composed = compose(&layout, &Role::CompanyAdmin, &payloads());

        let ids: Vec<&str> = composed.panels().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["vendors-distribution", "contract-status", "help"]);
        assert_eq!(composed.rows[1].kind, RowKind::Activity);
        assert_eq!(composed.find_panel("help"), layout.find_panel("help"));
    }

    #[test]
    fn test_missing_payload_degrades_to_empty() {
        let composed = compose(&layout(), &Role::CompanyAdmin, &RawPayloads::new());
        assert!(composed.find_panel("contract-status").unwrap().data.is_empty());
        assert!(composed.stats.iter().all(|s| s.value == "0"));
    }

    #[test]
    fn test_compose_does_not_touch_input() {
        let layout = layout();
        let before = layout.clone();
        let _ = compose(&layout, &Role::CompanyAdmin, &payloads());
        assert_eq!(layout, before);
    }

    #[test]
    fn test_metric_for_is_role_specific() {
        assert_eq!(
            bindings_for(&Role::SuperAdmin).unwrap().metric_for("module-usage"),
            Some(Metric::ModuleUsage)
        );
        assert_eq!(bindings_for(&Role::Vendor).unwrap().metric_for("module-usage"), None);
        assert!(bindings_for(&Role::Other("x".into())).is_none());
    }
}
