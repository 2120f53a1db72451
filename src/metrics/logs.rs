use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use crate::loki::LokiClient;
use crate::parsing::count_log_entries;
use crate::query::QueryOutcome;

pub const CRITICAL_LOG_PATTERNS: [&str; 5] = [
    "kubelet.*failed",
    "apiserver.*error",
    "etcd.*error",
    "scheduler.*failed",
    "controller.*error",
];

pub const LOG_WINDOW_MINUTES: i64 = 15;
pub const LOG_QUERY_LIMIT: u32 = 10;

/// Critical log lines matching one pattern inside the scan window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogHit {
    pub pattern: String,
    pub count: usize,
}

impl LogHit {
    pub fn warning_message(&self) -> String {
        format!("Found {} critical log entries for pattern: {}", self.count, self.pattern)
    }
}

pub fn log_query(pattern: &str) -> String {
    format!(r#"{{job="node_exporter"}} |~ "{}""#, pattern)
}

pub fn scan_window(now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    (now - Duration::minutes(LOG_WINDOW_MINUTES), now)
}

/// Query every critical pattern over the window ending at `now`. Patterns
/// whose query fails are skipped.
pub async fn scan_critical_logs(client: &LokiClient, now: DateTime<Utc>) -> Vec<LogHit> {
    let (start, end) = scan_window(now);
    let mut hits = Vec::new();

    for pattern in CRITICAL_LOG_PATTERNS {
        match client.query_range(&log_query(pattern), start, end, LOG_QUERY_LIMIT).await {
            QueryOutcome::Data(response) => {
                let count = count_log_entries(&response);
                if count > 0 {
                    hits.push(LogHit { pattern: pattern.to_string(), count });
                }
            }
            QueryOutcome::Unavailable { reason, .. } => {
                debug!("Skipping log pattern {}: {}", pattern, reason);
            }
        }
    }

    hits
}
