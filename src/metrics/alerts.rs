use serde_json::Value;

use crate::prometheus::PrometheusClient;
use crate::types::{Alert, AlertSeverity};

fn str_at<'a>(value: &'a Value, section: &str, key: &str) -> Option<&'a str> {
    value.get(section).and_then(|s| s.get(key)).and_then(|v| v.as_str())
}

/// Firing alerts from an `/api/v1/alerts` response; pending and resolved
/// entries are dropped.
pub fn firing_alerts(response: &Value) -> Vec<Alert> {
    let alerts = response
        .get("data")
        .and_then(|d| d.get("alerts"))
        .and_then(|a| a.as_array())
        .map(|a| a.as_slice())
        .unwrap_or(&[]);

    alerts
        .iter()
        .filter(|a| a.get("state").and_then(|s| s.as_str()) == Some("firing"))
        .map(|a| Alert {
            name: str_at(a, "labels", "alertname").unwrap_or("Unknown").to_string(),
            severity: AlertSeverity::from_label(str_at(a, "labels", "severity")),
            summary: str_at(a, "annotations", "summary").unwrap_or_default().to_string(),
            active_since: a.get("activeAt").and_then(|v| v.as_str()).unwrap_or_default().to_string(),
        })
        .collect()
}

pub async fn analyze_alerts(client: &PrometheusClient) -> Vec<Alert> {
    client
        .alerts()
        .await
        .data()
        .map(firing_alerts)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_only_firing_alerts_are_kept() {
        let response = json!({
            "status": "success",
            "data": {
                "alerts": [
                    {
                        "state": "firing",
                        "labels": {"alertname": "NodeDown", "severity": "critical"},
                        "annotations": {"summary": "kube503 is down"},
                        "activeAt": "2024-05-01T10:00:00Z"
                    },
                    {
                        "state": "resolved",
                        "labels": {"alertname": "OldNews", "severity": "warning"},
                        "annotations": {"summary": "gone"}
                    },
                    {
                        "state": "pending",
                        "labels": {"alertname": "Soon", "severity": "warning"},
                        "annotations": {"summary": "maybe"}
                    },
                    {"state": "firing"}
                ]
            }
        });

        let alerts = firing_alerts(&response);
        assert_eq!(alerts.len(), 2);

        assert_eq!(alerts[0].name, "NodeDown");
        assert_eq!(alerts[0].severity, AlertSeverity::Critical);
        assert_eq!(alerts[0].summary, "kube503 is down");
        assert_eq!(alerts[0].active_since, "2024-05-01T10:00:00Z");

        assert_eq!(alerts[1].name, "Unknown");
        assert_eq!(alerts[1].severity, AlertSeverity::Info);
        assert_eq!(alerts[1].summary, "");
        assert_eq!(alerts[1].active_since, "");
    }

    #[test]
    fn test_malformed_response_has_no_alerts() {
        assert!(firing_alerts(&json!({})).is_empty());
        assert!(firing_alerts(&json!({"data": {"alerts": {}}})).is_empty());
    }
}
