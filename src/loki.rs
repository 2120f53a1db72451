use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::time::Duration;

use crate::parsing::to_unix_nanos;
use crate::query::{get_json, QueryOutcome};

/// Client for the Loki log query API.
pub struct LokiClient {
    client: reqwest::Client,
    base_url: String,
}

impl LokiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create Loki HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Range query; Loki wants nanosecond epoch bounds.
    pub async fn query_range(
        &self,
        query: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        limit: u32,
    ) -> QueryOutcome {
        let url = format!("{}/loki/api/v1/query_range", self.base_url);
        let params = [
            ("query", query.to_string()),
            ("start", to_unix_nanos(start).to_string()),
            ("end", to_unix_nanos(end).to_string()),
            ("limit", limit.to_string()),
        ];
        let result = get_json(&self.client, &url, &params).await;
        QueryOutcome::from_result(result)
    }
}
