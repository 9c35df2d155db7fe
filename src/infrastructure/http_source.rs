// HTTP metrics source - reads raw payloads from the business API
use crate::application::metrics_source::{MetricRequest, MetricsSource, SourceError};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HttpMetricsSource {
    base_url: String,
    token: Option<String>,
    client: reqwest::Client,
}

impl HttpMetricsSource {
    pub fn new(base_url: String, token: Option<String>, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.is_empty()),
            client,
        })
    }

    fn build_url(&self, request: &MetricRequest) -> String {
        let mut url = format!(
            "{}/metrics/{}/{}?filter={}",
            self.base_url,
            urlencoding::encode(request.role.as_str()),
            request.metric.key(),
            urlencoding::encode(&request.filter)
        );
        if let Some(panel_id) = &request.panel_id {
            url.push_str("&panel=");
            url.push_str(&urlencoding::encode(panel_id));
        }
        url
    }
}

#[async_trait]
impl MetricsSource for HttpMetricsSource {
    async fn fetch(&self, request: &MetricRequest) -> Result<Option<Value>, SourceError> {
        let url = self.build_url(request);
        tracing::debug!("Fetching metric payload: {}", url);

        let mut builder = self.client.get(&url).header("Accept", "application/json");
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        let response = builder.send().await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND || status == StatusCode::NO_CONTENT {
            return Ok(None);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(None);
        }
        match serde_json::from_str::<Value>(&body)? {
            Value::Null => Ok(None),
            value => Ok(Some(value)),
        }
    }
}
