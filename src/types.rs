use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone)]
pub struct CheckConfig {
    pub prometheus_url: String,
    pub loki_url: String,
    pub k8s_api_url: String,
    pub cluster_nodes: Vec<String>,
    pub query_timeout_secs: u64,
}

/// One row of an instant query result.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSample {
    pub node: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeStatus {
    pub node: String,
    pub up: bool,
}

/// Availability of a node the health check expects to see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeAvailability {
    Up,
    Down,
    NoMetrics,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricKind {
    Cpu,
    Memory,
    Disk,
}

impl MetricKind {
    pub fn label(&self) -> &'static str {
        match self {
            MetricKind::Cpu => "CPU",
            MetricKind::Memory => "memory",
            MetricKind::Disk => "disk",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UsageReading {
    pub node: String,
    pub kind: MetricKind,
    pub percent: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PodPhaseCounts {
    pub running: u64,
    pub pending: u64,
    pub failed: u64,
    pub total: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertSeverity {
    Critical,
    Warning,
    Info,
    Unknown,
}

impl AlertSeverity {
    /// Missing label means `info`; anything unrecognised is `Unknown`.
    pub fn from_label(label: Option<&str>) -> Self {
        match label {
            None | Some("info") => AlertSeverity::Info,
            Some("critical") => AlertSeverity::Critical,
            Some("warning") => AlertSeverity::Warning,
            Some(_) => AlertSeverity::Unknown,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub name: String,
    pub severity: AlertSeverity,
    pub summary: String,
    pub active_since: String,
}

/// Overall verdict of a health check run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HealthStatus {
    Healthy,
    Warning,
    Unhealthy,
}

impl HealthStatus {
    /// Process exit code. Warning deliberately maps above Unhealthy.
    pub fn exit_code(&self) -> i32 {
        match self {
            HealthStatus::Healthy => 0,
            HealthStatus::Unhealthy => 1,
            HealthStatus::Warning => 2,
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HealthStatus::Healthy => "HEALTHY",
            HealthStatus::Warning => "WARNING",
            HealthStatus::Unhealthy => "UNHEALTHY",
        };
        f.write_str(s)
    }
}

/// Everything the report generator gathers in one run.
#[derive(Debug, Clone, Default)]
pub struct ClusterFacts {
    pub nodes: Vec<NodeStatus>,
    pub usage: Vec<(MetricKind, Vec<UsageReading>)>,
    pub pods: PodPhaseCounts,
    pub alerts: Vec<Alert>,
}

#[derive(Serialize)]
pub struct DiscordPayload {
    pub content: String,
}
