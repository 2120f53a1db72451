use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::types::MetricSample;

/// `data.result` of a query response, or an empty slice when absent.
pub fn result_rows(response: &Value) -> &[Value] {
    response
        .get("data")
        .and_then(|d| d.get("result"))
        .and_then(|r| r.as_array())
        .map(|v| v.as_slice())
        .unwrap_or(&[])
}

/// Numeric part of a `[timestamp, "value"]` pair.
pub fn parse_sample_value(row: &Value) -> Option<f64> {
    let raw = row.get("value")?.get(1)?;
    match raw {
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Number(n) => n.as_f64(),
        _ => None,
    }
}

pub fn instance_label(row: &Value) -> String {
    row.get("metric")
        .and_then(|m| m.get("instance"))
        .and_then(|i| i.as_str())
        .unwrap_or("unknown")
        .to_string()
}

/// Rows with an unparseable value are skipped.
pub fn parse_instant_samples(response: &Value) -> Vec<MetricSample> {
    result_rows(response)
        .iter()
        .filter_map(|row| {
            parse_sample_value(row).map(|value| MetricSample {
                node: instance_label(row),
                value,
            })
        })
        .collect()
}

/// First row of a `count(...)` style query; anything missing counts as zero.
pub fn parse_scalar_count(response: &Value) -> u64 {
    result_rows(response)
        .first()
        .and_then(parse_sample_value)
        .filter(|v| v.is_finite() && *v > 0.0)
        .map(|v| v as u64)
        .unwrap_or(0)
}

/// Total number of log lines across all streams of a Loki response.
pub fn count_log_entries(response: &Value) -> usize {
    result_rows(response)
        .iter()
        .map(|stream| {
            stream
                .get("values")
                .and_then(|v| v.as_array())
                .map(|v| v.len())
                .unwrap_or(0)
        })
        .sum()
}

pub fn to_unix_nanos(t: DateTime<Utc>) -> i64 {
    t.timestamp_nanos_opt()
        .unwrap_or_else(|| t.timestamp().saturating_mul(1_000_000_000))
}
