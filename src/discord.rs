use anyhow::{anyhow, Context, Result};
use std::time::Duration;
use tracing::{error, info};
use crate::types::DiscordPayload;

/// Discord rejects messages over 2000 characters; leave room for the fence.
pub const MAX_CONTENT_CHARS: usize = 1990;
pub const TRUNCATION_SUFFIX: &str = "\n... (truncated)";
pub const WEBHOOK_TIMEOUT_SECS: u64 = 10;

/// Cut `report` to the first `MAX_CONTENT_CHARS` characters once it
/// reaches that length.
pub fn truncate_content(report: &str) -> String {
    if report.chars().count() < MAX_CONTENT_CHARS {
        return report.to_string();
    }
    let mut content: String = report.chars().take(MAX_CONTENT_CHARS).collect();
    content.push_str(TRUNCATION_SUFFIX);
    content
}

pub fn build_discord_payload(report: &str) -> DiscordPayload {
    DiscordPayload {
        content: format!("```\n{}\n```", truncate_content(report)),
    }
}

async fn post_payload(webhook_url: &str, payload: &DiscordPayload) -> Result<()> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(WEBHOOK_TIMEOUT_SECS))
        .build()
        .context("Failed to create webhook HTTP client")?;
    let res = client
        .post(webhook_url)
        .json(payload)
        .send()
        .await
        .context("Failed to send Discord request")?;
    if !res.status().is_success() {
        let status = res.status();
        let body = res.text().await.unwrap_or_default();
        return Err(anyhow!("Discord webhook returned {}: {}", status, body));
    }
    Ok(())
}

/// Best-effort delivery: an empty URL skips the send, and failures are
/// logged rather than returned. Returns whether the report was delivered.
pub async fn send_to_discord(webhook_url: &str, report: &str) -> bool {
    if webhook_url.trim().is_empty() {
        info!("Discord webhook not configured, skipping notification");
        return false;
    }

    let payload = build_discord_payload(report);
    match post_payload(webhook_url, &payload).await {
        Ok(()) => {
            info!("Report sent to Discord successfully");
            true
        }
        Err(e) => {
            error!("Error sending to Discord: {:#}", e);
            false
        }
    }
}
