use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::time::Duration;

use crate::query::{get_json, QueryOutcome};

/// Thin client for the Prometheus HTTP API. Each call is a single attempt.
pub struct PrometheusClient {
    client: reqwest::Client,
    base_url: String,
}

impl PrometheusClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create Prometheus HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Instant query.
    pub async fn query(&self, query: &str) -> QueryOutcome {
        let url = format!("{}/api/v1/query", self.base_url);
        let result = get_json(&self.client, &url, &[("query", query.to_string())]).await;
        QueryOutcome::from_result_logged("Prometheus", result)
    }

    /// Range query with unix-second bounds.
    pub async fn query_range(
        &self,
        query: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        step: &str,
    ) -> QueryOutcome {
        let url = format!("{}/api/v1/query_range", self.base_url);
        let params = [
            ("query", query.to_string()),
            ("start", start.timestamp().to_string()),
            ("end", end.timestamp().to_string()),
            ("step", step.to_string()),
        ];
        let result = get_json(&self.client, &url, &params).await;
        QueryOutcome::from_result_logged("Prometheus range", result)
    }

    pub async fn alerts(&self) -> QueryOutcome {
        let url = format!("{}/api/v1/alerts", self.base_url);
        let result = get_json(&self.client, &url, &[]).await;
        QueryOutcome::from_result_logged("Prometheus alerts", result)
    }
}
