// Dashboard service - fetch, compose and render dashboards per role
use crate::application::chart::{render, PanelView, SeriesState};
use crate::application::compose::{bindings_for, compose, compose_panel, compose_stats, RoleBindings};
use crate::application::dashboard_view::{render_view, DashboardView, StreamMessage};
use crate::application::metrics_source::{MetricRequest, MetricsSource};
use crate::application::stat_card::render_stat;
use crate::domain::dashboard::{DashboardConfiguration, Panel};
use crate::domain::filter::PanelFilterState;
use crate::domain::payload::{Metric, RawPayloads};
use crate::domain::role::Role;
use futures::future::join_all;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;

#[derive(Clone)]
pub struct DashboardService {
    source: Arc<dyn MetricsSource>,
    layouts: Arc<HashMap<String, DashboardConfiguration>>,
}

impl DashboardService {
    pub fn new(
        source: Arc<dyn MetricsSource>,
        layouts: HashMap<String, DashboardConfiguration>,
    ) -> Self {
        Self {
            source,
            layouts: Arc::new(layouts),
        }
    }

    /// Static layout for a role; roles without one get an empty dashboard.
    pub fn layout_for(&self, role: &Role) -> DashboardConfiguration {
        self.layouts.get(role.as_str()).cloned().unwrap_or_default()
    }

    /// Render from an already fetched payload bag. Nothing is fetched.
    pub fn render_payloads(
        &self,
        role: &Role,
        raw: &RawPayloads,
        filters: &PanelFilterState,
    ) -> DashboardView {
        let composed = compose(&self.layout_for(role), role, raw);
        render_view(role, &composed, filters, &HashSet::new())
    }

    /// Fetch every bound metric for the role, then compose and render.
    pub async fn render_dashboard(&self, role: &Role, filters: &PanelFilterState) -> DashboardView {
        let layout = self.layout_for(role);
        let Some(bindings) = bindings_for(role) else {
            return render_view(role, &layout, filters, &HashSet::new());
        };

        let mut requests = vec![MetricRequest::stats(role, bindings.stats)];
        requests.extend(
            bound_panels(&layout, &bindings)
                .into_iter()
                .map(|(panel, metric)| MetricRequest::panel(role, &panel.id, metric, filters.get(&panel.id))),
        );

        let results = join_all(requests.iter().map(|request| self.fetch_one(request))).await;
        let raw: RawPayloads = requests
            .iter()
            .zip(results)
            .filter_map(|(request, value)| Some((request.metric.key().to_string(), value?)))
            .collect();

        tracing::debug!(
            "Fetched {} of {} payloads for role {}",
            raw.len(),
            requests.len(),
            role
        );

        let composed = compose(&layout, role, &raw);
        render_view(role, &composed, filters, &HashSet::new())
    }

    /// Fetch and render a single panel. Sibling panels are neither fetched
    /// nor rendered. `None` when the panel is unknown or hidden.
    pub async fn render_panel(&self, role: &Role, panel_id: &str, filter: &str) -> Option<PanelView> {
        let layout = self.layout_for(role);
        let panel = layout.find_panel(panel_id)?;
        let filters = PanelFilterState::new().set(panel_id, filter);

        let composed = match bindings_for(role) {
            Some(bindings) if panel.visible => {
                self.fetch_panel(role, panel, &bindings, filters.get(panel_id))
                    .await
            }
            _ => panel.clone(),
        };

        render(&composed, SeriesState::Ready(&composed.data), filters.get(panel_id))
    }

    /// Progressive rendering: a skeleton with every bound panel loading,
    /// then one update per fetch as it resolves, then a completion event.
    pub async fn stream_dashboard(
        &self,
        role: Role,
        filters: PanelFilterState,
    ) -> mpsc::Receiver<StreamMessage> {
        let (tx, rx) = mpsc::channel(64);
        let start_time = Instant::now();
        let layout = self.layout_for(&role);

        let Some(bindings) = bindings_for(&role) else {
            let dashboard = render_view(&role, &layout, &filters, &HashSet::new());
            let _ = tx.send(StreamMessage::Skeleton { dashboard }).await;
            let _ = tx
                .send(StreamMessage::Complete {
                    panels: 0,
                    duration_ms: start_time.elapsed().as_millis() as u64,
                })
                .await;
            return rx;
        };

        let bound: Vec<(Panel, Metric)> = bound_panels(&layout, &bindings)
            .into_iter()
            .map(|(panel, metric)| (panel.clone(), metric))
            .collect();
        let pending: HashSet<&str> = bound.iter().map(|(panel, _)| panel.id.as_str()).collect();

        let skeleton = render_view(&role, &layout, &filters, &pending);
        let _ = tx.send(StreamMessage::Skeleton { dashboard: skeleton }).await;

        let mut handles = Vec::with_capacity(bound.len() + 1);

        {
            let service = self.clone();
            let tx = tx.clone();
            let request = MetricRequest::stats(&role, bindings.stats);
            handles.push(tokio::spawn(async move {
                let raw = payload_bag(request.metric, service.fetch_one(&request).await);
                if let Some(stats) = compose_stats(&bindings, &raw) {
                    let stats = stats.iter().map(render_stat).collect();
                    let _ = tx.send(StreamMessage::StatsUpdate { stats }).await;
                }
            }));
        }

        let total_panels = bound.len();
        for (panel, _) in bound {
            let service = self.clone();
            let tx = tx.clone();
            let role = role.clone();
            let filter = filters.get(&panel.id).to_string();

            handles.push(tokio::spawn(async move {
                let composed = service.fetch_panel(&role, &panel, &bindings, &filter).await;
                if let Some(view) = render(&composed, SeriesState::Ready(&composed.data), &filter) {
                    let _ = tx.send(StreamMessage::PanelUpdate { panel: view }).await;
                }
            }));
        }

        tokio::spawn(async move {
            for result in join_all(handles).await {
                if let Err(e) = result {
                    tracing::error!("Dashboard stream task failed: {}", e);
                }
            }
            let complete = StreamMessage::Complete {
                panels: total_panels,
                duration_ms: start_time.elapsed().as_millis() as u64,
            };
            let _ = tx.send(complete).await;
        });

        rx
    }

    async fn fetch_panel(
        &self,
        role: &Role,
        panel: &Panel,
        bindings: &RoleBindings,
        filter: &str,
    ) -> Panel {
        let Some(metric) = bindings.metric_for(&panel.id) else {
            return panel.clone();
        };
        let request = MetricRequest::panel(role, &panel.id, metric, filter);
        let raw = payload_bag(metric, self.fetch_one(&request).await);
        compose_panel(panel, bindings, &raw)
    }

    /// Fetch failures degrade to a missing payload.
    async fn fetch_one(&self, request: &MetricRequest) -> Option<Value> {
        match self.source.fetch(request).await {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(
                    "Error fetching {} for panel {:?} ({}): {}",
                    request.metric.key(),
                    request.panel_id,
                    request.filter,
                    e
                );
                None
            }
        }
    }
}

/// Visible panels of the layout that have a binding for this role.
fn bound_panels<'a>(
    layout: &'a DashboardConfiguration,
    bindings: &RoleBindings,
) -> Vec<(&'a Panel, Metric)> {
    layout
        .panels()
        .filter(|panel| panel.visible)
        .filter_map(|panel| bindings.metric_for(&panel.id).map(|metric| (panel, metric)))
        .collect()
}

fn payload_bag(metric: Metric, value: Option<Value>) -> RawPayloads {
    value
        .map(|v| (metric.key().to_string(), v))
        .into_iter()
        .collect()
}
