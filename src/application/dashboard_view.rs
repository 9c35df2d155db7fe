// Render tree for a whole dashboard
use crate::application::chart::{render, PanelView, SeriesState};
use crate::application::stat_card::{render_stat, StatCardView};
use crate::domain::dashboard::{DashboardConfiguration, RowKind};
use crate::domain::filter::PanelFilterState;
use crate::domain::role::Role;
use serde::Serialize;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub role: String,
    pub stats: Vec<StatCardView>,
    pub rows: Vec<RowView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowView {
    #[serde(rename = "type")]
    pub kind: RowKind,
    pub panels: Vec<PanelView>,
}

/// Progressive dashboard messages, sent in this order: one skeleton, any
/// number of updates, one completion.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum StreamMessage {
    Skeleton { dashboard: DashboardView },
    StatsUpdate { stats: Vec<StatCardView> },
    PanelUpdate { panel: PanelView },
    #[serde(rename_all = "camelCase")]
    Complete { panels: usize, duration_ms: u64 },
}

/// Render every panel of `config`. Panels listed in `pending` render their
/// loading state; hidden panels are dropped.
pub fn render_view(
    role: &Role,
    config: &DashboardConfiguration,
    filters: &PanelFilterState,
    pending: &HashSet<&str>,
) -> DashboardView {
    DashboardView {
        role: role.to_string(),
        stats: config.stats.iter().map(render_stat).collect(),
        rows: config
            .rows
            .iter()
            .map(|row| RowView {
                kind: row.kind,
                panels: row
                    .properties
                    .iter()
                    .filter_map(|panel| {
                        let state = if pending.contains(panel.id.as_str()) {
                            SeriesState::Loading
                        } else {
                            SeriesState::Ready(&panel.data)
                        };
                        render(panel, state, filters.get(&panel.id))
                    })
                    .collect(),
            })
            .collect(),
    }
}
