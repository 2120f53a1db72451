use serde::Serialize;
use tracing::{error, info, warn};

use crate::types::HealthStatus;

pub mod render;

pub use render::{render_check_summary, render_daily, render_weekly};

/// Accumulated result of one health check run.
///
/// `overall_status` only ever gets worse: an issue makes the run
/// `Unhealthy`, a warning makes a still-`Healthy` run `Warning`, and
/// actions leave it untouched.
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub timestamp: String,
    pub overall_status: HealthStatus,
    pub issues: Vec<String>,
    pub warnings: Vec<String>,
    pub actions_taken: Vec<String>,
}

impl HealthReport {
    pub fn new(timestamp: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp.into(),
            overall_status: HealthStatus::Healthy,
            issues: Vec::new(),
            warnings: Vec::new(),
            actions_taken: Vec::new(),
        }
    }

    pub fn record_issue(&mut self, message: impl Into<String>) {
        let message = message.into();
        error!("ISSUE: {}", message);
        self.issues.push(message);
        self.overall_status = HealthStatus::Unhealthy;
    }

    pub fn record_warning(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!("WARNING: {}", message);
        self.warnings.push(message);
        if self.overall_status == HealthStatus::Healthy {
            self.overall_status = HealthStatus::Warning;
        }
    }

    pub fn record_action(&mut self, message: impl Into<String>) {
        let message = message.into();
        info!("ACTION: {}", message);
        self.actions_taken.push(message);
    }

    pub fn summary(&self) -> ReportSummary {
        ReportSummary {
            issue_count: self.issues.len(),
            warning_count: self.warnings.len(),
            action_count: self.actions_taken.len(),
        }
    }
}

pub struct ReportSummary {
    pub issue_count: usize,
    pub warning_count: usize,
    pub action_count: usize,
}

impl ReportSummary {
    pub fn total_findings(&self) -> usize {
        self.issue_count + self.warning_count
    }

    pub fn has_findings(&self) -> bool {
        self.total_findings() > 0
    }
}
