// HTTP request handlers
use crate::domain::filter::{PanelFilterState, DEFAULT_FILTER};
use crate::domain::payload::RawPayloads;
use crate::domain::role::Role;
use crate::infrastructure::ndjson_stream::stream_from_receiver;
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Deserialize)]
pub struct PanelQuery {
    pub filter: Option<String>,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Full dashboard for a role. Filters come as `filter[<panel-id>]=<label>`.
pub async fn get_dashboard(
    Path(role): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let role = Role::parse(&role);
    let filters = PanelFilterState::from_query(&query);
    Json(state.dashboard_service.render_dashboard(&role, &filters).await)
}

/// A single panel, fetched with its own filter only
pub async fn get_panel(
    Path((role, panel_id)): Path<(String, String)>,
    Query(query): Query<PanelQuery>,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let role = Role::parse(&role);
    let filter = query.filter.unwrap_or_else(|| DEFAULT_FILTER.to_string());

    match state
        .dashboard_service
        .render_panel(&role, &panel_id, &filter)
        .await
    {
        Some(panel) => Json(panel).into_response(),
        None => (StatusCode::NOT_FOUND, "panel not found").into_response(),
    }
}

/// Render from a payload bag supplied by the caller. Any body that is not a
/// JSON object is treated as an empty bag.
pub async fn render_payloads(
    Path(role): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    let role = Role::parse(&role);
    let filters = PanelFilterState::from_query(&query);
    let raw: RawPayloads = match body {
        Value::Object(map) => map.into_iter().collect(),
        _ => RawPayloads::new(),
    };
    Json(state.dashboard_service.render_payloads(&role, &raw, &filters))
}

/// Progressive dashboard: skeleton first, then panel updates as they load
pub async fn stream_dashboard(
    Path(role): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let role = Role::parse(&role);
    let filters = PanelFilterState::from_query(&query);

    let rx = state.dashboard_service.stream_dashboard(role, filters).await;
    stream_from_receiver(rx)
}
