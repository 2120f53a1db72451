use anyhow::{Context, Result};
use std::time::Duration;

pub const HEALTHZ_TIMEOUT_SECS: u64 = 5;

/// Outcome of probing the API server's `/healthz` endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiServerHealth {
    Healthy,
    Failed { status: u16 },
    Unreachable { error: String },
}

impl ApiServerHealth {
    /// Issue to record, if any.
    pub fn issue_message(&self) -> Option<String> {
        match self {
            ApiServerHealth::Healthy => None,
            ApiServerHealth::Failed { status } => {
                Some(format!("API server health check failed: {}", status))
            }
            ApiServerHealth::Unreachable { error } => {
                Some(format!("Cannot reach Kubernetes API: {}", error))
            }
        }
    }
}

/// The home cluster's API server uses a self-signed certificate, so the
/// health check does not verify TLS.
pub fn healthz_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .danger_accept_invalid_certs(true)
        .timeout(Duration::from_secs(HEALTHZ_TIMEOUT_SECS))
        .build()
        .context("Failed to create Kubernetes API HTTP client")
}

pub async fn check_api_server(client: &reqwest::Client, api_url: &str) -> ApiServerHealth {
    let url = format!("{}/healthz", api_url.trim_end_matches('/'));
    let res = match client.get(&url).send().await {
        Ok(res) => res,
        Err(e) => return ApiServerHealth::Unreachable { error: e.to_string() },
    };

    let status = res.status();
    let body = match res.text().await {
        Ok(body) => body,
        Err(e) => return ApiServerHealth::Unreachable { error: e.to_string() },
    };

    if status.as_u16() == 200 && body.trim() == "ok" {
        ApiServerHealth::Healthy
    } else {
        ApiServerHealth::Failed { status: status.as_u16() }
    }
}
