//! Text rendering of reports. Everything here is pure; timestamps come in
//! as arguments and are printed as given, so callers pass local wall-clock
//! time.

use chrono::{Duration, NaiveDateTime};

use crate::metrics::UsageTier;
use crate::report::HealthReport;
use crate::types::{AlertSeverity, ClusterFacts};

fn rule() -> String {
    "=".repeat(60)
}

fn severity_marker(severity: AlertSeverity) -> &'static str {
    match severity {
        AlertSeverity::Critical => "🔴",
        AlertSeverity::Warning => "🟡",
        AlertSeverity::Info => "🔵",
        AlertSeverity::Unknown => "⚪",
    }
}

pub fn render_daily(facts: &ClusterFacts, generated_at: NaiveDateTime) -> String {
    let mut lines: Vec<String> = Vec::new();
    lines.push(rule());
    lines.push("Kubernetes Cluster Health Report - Daily".to_string());
    lines.push(format!("Generated: {}", generated_at.format("%Y-%m-%d %H:%M:%S")));
    lines.push(rule());
    lines.push(String::new());

    lines.push("## Node Status".to_string());
    for n in &facts.nodes {
        let (marker, status) = if n.up { ("✅", "UP") } else { ("❌", "DOWN") };
        lines.push(format!("  {} {}: {}", marker, n.node, status));
    }
    lines.push(String::new());

    lines.push("## Resource Usage".to_string());
    for (kind, readings) in &facts.usage {
        lines.push(format!("### {}", kind.label().to_uppercase()));
        for r in readings {
            let marker = UsageTier::for_percent(r.percent).marker();
            lines.push(format!("  {} {}: {:.1}%", marker, r.node, r.percent));
        }
        lines.push(String::new());
    }

    lines.push("## Pod Status".to_string());
    lines.push(format!("  Total: {}", facts.pods.total));
    lines.push(format!("  Running: {}", facts.pods.running));
    lines.push(format!("  Pending: {}", facts.pods.pending));
    lines.push(format!("  Failed: {}", facts.pods.failed));
    lines.push(String::new());

    lines.push("## Active Alerts".to_string());
    if facts.alerts.is_empty() {
        lines.push("  ✅ No active alerts".to_string());
    } else {
        for a in &facts.alerts {
            lines.push(format!("  {} {}: {}", severity_marker(a.severity), a.name, a.summary));
        }
    }
    lines.push(String::new());

    lines.push(rule());
    lines.join("\n")
}

/// Weekly report: the daily report framed by the seven-day period. Trend
/// data lives in Grafana, so the summary section is static.
pub fn render_weekly(facts: &ClusterFacts, generated_at: NaiveDateTime) -> String {
    let start = generated_at - Duration::days(7);
    let lines = vec![
        rule(),
        "Kubernetes Cluster Health Report - Weekly".to_string(),
        format!(
            "Period: {} to {}",
            start.format("%Y-%m-%d"),
            generated_at.format("%Y-%m-%d")
        ),
        rule(),
        String::new(),
        render_daily(facts, generated_at),
        String::new(),
        "## Weekly Summary".to_string(),
        "  - Average uptime: Check Prometheus for detailed metrics".to_string(),
        "  - Resource trends: See Grafana dashboards".to_string(),
        "  - Incident summary: Review alert history".to_string(),
        String::new(),
        rule(),
    ];
    lines.join("\n")
}

/// Console summary printed at the end of a health check.
pub fn render_check_summary(report: &HealthReport) -> String {
    let mut lines = vec![rule(), format!("🎯 Overall Status: {}", report.overall_status)];

    let sections = [
        ("❌ CRITICAL ISSUES:", &report.issues),
        ("⚠️  WARNINGS:", &report.warnings),
        ("🔧 ACTIONS TAKEN:", &report.actions_taken),
    ];
    for (title, items) in sections {
        if items.is_empty() {
            continue;
        }
        lines.push(String::new());
        lines.push(title.to_string());
        for item in items {
            lines.push(format!("   • {}", item));
        }
    }

    lines.join("\n")
}
