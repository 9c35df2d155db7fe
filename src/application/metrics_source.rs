// Metrics source trait - where raw payloads come from
use crate::domain::filter::DEFAULT_FILTER;
use crate::domain::payload::Metric;
use crate::domain::role::Role;
use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// One fetch, keyed by panel and active filter label.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MetricRequest {
    pub role: Role,
    /// `None` for the stat strip.
    pub panel_id: Option<String>,
    pub metric: Metric,
    pub filter: String,
}

impl MetricRequest {
    pub fn stats(role: &Role, metric: Metric) -> Self {
        Self {
            role: role.clone(),
            panel_id: None,
            metric,
            filter: DEFAULT_FILTER.to_string(),
        }
    }

    pub fn panel(role: &Role, panel_id: &str, metric: Metric, filter: &str) -> Self {
        Self {
            role: role.clone(),
            panel_id: Some(panel_id.to_string()),
            metric,
            filter: filter.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("request to metrics backend failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("metrics backend returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode metrics payload: {0}")]
    Decode(#[from] serde_json::Error),
}

#[async_trait]
pub trait MetricsSource: Send + Sync {
    /// Fetch the raw payload for one metric. `Ok(None)` means the backend has
    /// nothing for this request.
    async fn fetch(&self, request: &MetricRequest) -> Result<Option<Value>, SourceError>;
}
