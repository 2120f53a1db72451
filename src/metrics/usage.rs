use crate::parsing::parse_instant_samples;
use crate::prometheus::PrometheusClient;
use crate::types::{MetricKind, MetricSample, UsageReading};

const CHECK_CPU_QUERY: &str =
    r#"(1 - avg(rate(node_cpu_seconds_total{mode="idle"}[5m])) by (instance)) * 100"#;
const REPORT_CPU_QUERY: &str =
    r#"100 - (avg by (instance) (irate(node_cpu_seconds_total{mode="idle"}[5m])) * 100)"#;
const MEMORY_QUERY: &str =
    "(1 - (node_memory_MemAvailable_bytes / node_memory_MemTotal_bytes)) * 100";
const DISK_QUERY: &str =
    r#"(1 - (node_filesystem_avail_bytes{fstype!="tmpfs"} / node_filesystem_size_bytes{fstype!="tmpfs"})) * 100"#;

/// Sections of the report's resource usage block, in render order.
pub const REPORT_METRICS: [MetricKind; 3] = [MetricKind::Cpu, MetricKind::Memory, MetricKind::Disk];

/// Metrics the health check evaluates, in check order.
pub const CHECK_METRICS: [MetricKind; 2] = [MetricKind::Cpu, MetricKind::Memory];

pub fn report_query(kind: MetricKind) -> &'static str {
    match kind {
        MetricKind::Cpu => REPORT_CPU_QUERY,
        MetricKind::Memory => MEMORY_QUERY,
        MetricKind::Disk => DISK_QUERY,
    }
}

pub fn check_query(kind: MetricKind) -> Option<&'static str> {
    match kind {
        MetricKind::Cpu => Some(CHECK_CPU_QUERY),
        MetricKind::Memory => Some(MEMORY_QUERY),
        MetricKind::Disk => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UsageThresholds {
    pub issue: f64,
    pub warning: f64,
}

/// Health check thresholds. Disk is not part of the health check.
pub fn check_thresholds(kind: MetricKind) -> Option<UsageThresholds> {
    match kind {
        MetricKind::Cpu => Some(UsageThresholds { issue: 90.0, warning: 75.0 }),
        MetricKind::Memory => Some(UsageThresholds { issue: 90.0, warning: 80.0 }),
        MetricKind::Disk => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageVerdict {
    Ok,
    Warning,
    Issue,
}

/// Health check classification; both thresholds are exclusive.
pub fn classify_check(kind: MetricKind, percent: f64) -> UsageVerdict {
    match check_thresholds(kind) {
        Some(t) if percent > t.issue => UsageVerdict::Issue,
        Some(t) if percent > t.warning => UsageVerdict::Warning,
        _ => UsageVerdict::Ok,
    }
}

/// Message recorded for a non-OK verdict.
pub fn check_message(reading: &UsageReading, verdict: UsageVerdict) -> Option<String> {
    let prefix = match verdict {
        UsageVerdict::Issue => "High",
        UsageVerdict::Warning => "Elevated",
        UsageVerdict::Ok => return None,
    };
    Some(format!(
        "{} {} usage on {}: {:.1}%",
        prefix,
        reading.kind.label(),
        reading.node,
        reading.percent
    ))
}

/// Three-tier marker used by the rendered report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageTier {
    Green,
    Yellow,
    Red,
}

impl UsageTier {
    pub fn for_percent(percent: f64) -> Self {
        if percent < 70.0 {
            UsageTier::Green
        } else if percent < 85.0 {
            UsageTier::Yellow
        } else {
            UsageTier::Red
        }
    }

    pub fn marker(&self) -> &'static str {
        match self {
            UsageTier::Green => "🟢",
            UsageTier::Yellow => "🟡",
            UsageTier::Red => "🔴",
        }
    }
}

pub fn usage_readings(kind: MetricKind, samples: &[MetricSample]) -> Vec<UsageReading> {
    samples
        .iter()
        .map(|s| UsageReading {
            node: s.node.clone(),
            kind,
            percent: s.value,
        })
        .collect()
}

/// Per-node readings for every report metric. A failed query leaves its
/// section empty.
pub async fn analyze_resource_usage(client: &PrometheusClient) -> Vec<(MetricKind, Vec<UsageReading>)> {
    let mut usage = Vec::with_capacity(REPORT_METRICS.len());
    for kind in REPORT_METRICS {
        let readings = client
            .query(report_query(kind))
            .await
            .data()
            .map(|response| usage_readings(kind, &parse_instant_samples(response)))
            .unwrap_or_default();
        usage.push((kind, readings));
    }
    usage
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cpu_check_boundaries() {
        assert_eq!(classify_check(MetricKind::Cpu, 89.999), UsageVerdict::Warning);
        assert_eq!(classify_check(MetricKind::Cpu, 90.0), UsageVerdict::Warning);
        assert_eq!(classify_check(MetricKind::Cpu, 90.001), UsageVerdict::Issue);

        assert_eq!(classify_check(MetricKind::Cpu, 74.999), UsageVerdict::Ok);
        assert_eq!(classify_check(MetricKind::Cpu, 75.0), UsageVerdict::Ok);
        assert_eq!(classify_check(MetricKind::Cpu, 75.001), UsageVerdict::Warning);
    }

    #[test]
    fn test_memory_check_boundaries() {
        assert_eq!(classify_check(MetricKind::Memory, 80.0), UsageVerdict::Ok);
        assert_eq!(classify_check(MetricKind::Memory, 80.001), UsageVerdict::Warning);
        assert_eq!(classify_check(MetricKind::Memory, 90.0), UsageVerdict::Warning);
        assert_eq!(classify_check(MetricKind::Memory, 90.001), UsageVerdict::Issue);
    }

    #[test]
    fn test_disk_is_not_checked() {
        assert_eq!(classify_check(MetricKind::Disk, 99.0), UsageVerdict::Ok);
        assert!(check_query(MetricKind::Disk).is_none());
    }

    #[test]
    fn test_report_tier_boundaries() {
        assert_eq!(UsageTier::for_percent(0.0), UsageTier::Green);
        assert_eq!(UsageTier::for_percent(69.999), UsageTier::Green);
        assert_eq!(UsageTier::for_percent(70.0), UsageTier::Yellow);
        assert_eq!(UsageTier::for_percent(84.999), UsageTier::Yellow);
        assert_eq!(UsageTier::for_percent(85.0), UsageTier::Red);
        assert_eq!(UsageTier::for_percent(100.0), UsageTier::Red);
    }

    #[test]
    fn test_check_messages() {
        let reading = UsageReading {
            node: "kube501.home".to_string(),
            kind: MetricKind::Cpu,
            percent: 93.46,
        };
        assert_eq!(
            check_message(&reading, UsageVerdict::Issue).unwrap(),
            "High CPU usage on kube501.home: 93.5%"
        );

        let reading = UsageReading {
            node: "kube502.home".to_string(),
            kind: MetricKind::Memory,
            percent: 81.0,
        };
        assert_eq!(
            check_message(&reading, UsageVerdict::Warning).unwrap(),
            "Elevated memory usage on kube502.home: 81.0%"
        );
        assert!(check_message(&reading, UsageVerdict::Ok).is_none());
    }
}
