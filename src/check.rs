use anyhow::Result;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::time::Duration;
use tracing::info;

use crate::kubernetes::{check_api_server, healthz_client, ApiServerHealth};
use crate::loki::LokiClient;
use crate::metrics::usage::{check_query, usage_readings, CHECK_METRICS};
use crate::metrics::{self, classify_check, classify_expected_nodes, Exporter};
use crate::parsing::parse_instant_samples;
use crate::prometheus::PrometheusClient;
use crate::query::{FailureCause, QueryOutcome};
use crate::report::HealthReport;
use crate::types::{CheckConfig, NodeAvailability};

/// Runs the health check pipeline against one cluster and accumulates the
/// findings into a [`HealthReport`].
pub struct HealthChecker {
    config: CheckConfig,
    prometheus: PrometheusClient,
    loki: LokiClient,
    api_client: reqwest::Client,
    started_at: DateTime<Utc>,
    report: HealthReport,
}

impl HealthChecker {
    pub fn new(config: CheckConfig, started_at: DateTime<Utc>) -> Result<Self> {
        let timeout = Duration::from_secs(config.query_timeout_secs);
        let prometheus = PrometheusClient::new(&config.prometheus_url, timeout)?;
        let loki = LokiClient::new(&config.loki_url, timeout)?;
        let api_client = healthz_client()?;
        Ok(Self {
            config,
            prometheus,
            loki,
            api_client,
            started_at,
            report: HealthReport::new(started_at.to_rfc3339()),
        })
    }

    pub fn report(&self) -> &HealthReport {
        &self.report
    }

    /// An unreachable Prometheus is itself a finding in this flow. A backend
    /// that answers with an error status only skips the dependent check.
    async fn query_or_record(&mut self, query: &str) -> Option<Value> {
        match self.prometheus.query(query).await {
            QueryOutcome::Data(v) => Some(v),
            QueryOutcome::Unavailable { reason, cause: FailureCause::Unreachable } => {
                self.report.record_issue(format!("Prometheus query failed: {}", reason));
                None
            }
            QueryOutcome::Unavailable { .. } => None,
        }
    }

    /// Up/down verdict for every configured node. Returns false if any node
    /// is down, missing, or the query failed.
    async fn check_exporter(&mut self, exporter: Exporter) -> Option<bool> {
        let response = self.query_or_record(exporter.up_query()).await?;
        let samples = parse_instant_samples(&response);

        let mut all_healthy = true;
        for (node, availability) in classify_expected_nodes(&self.config.cluster_nodes, &samples) {
            match availability {
                NodeAvailability::Up => info!("{} {} - UP", node, exporter.display_name()),
                NodeAvailability::Down => {
                    self.report.record_issue(exporter.down_message(&node));
                    all_healthy = false;
                }
                NodeAvailability::NoMetrics => {
                    self.report.record_warning(exporter.missing_message(&node));
                    all_healthy = false;
                }
            }
        }
        Some(all_healthy)
    }

    /// Node exporter availability followed by node resource usage. Resource
    /// checks are skipped when the availability query itself failed.
    pub async fn check_node_health(&mut self) -> bool {
        info!("Checking node health");
        match self.check_exporter(Exporter::NodeExporter).await {
            Some(all_healthy) => {
                self.check_node_resources().await;
                all_healthy
            }
            None => false,
        }
    }

    /// CPU and memory usage for the configured nodes only.
    pub async fn check_node_resources(&mut self) {
        info!("Checking node resources");
        for kind in CHECK_METRICS {
            let Some(query) = check_query(kind) else { continue };
            let Some(response) = self.query_or_record(query).await else { continue };

            for reading in usage_readings(kind, &parse_instant_samples(&response)) {
                if !self.config.cluster_nodes.contains(&reading.node) {
                    continue;
                }
                let verdict = classify_check(kind, reading.percent);
                if let Some(message) = metrics::check_message(&reading, verdict) {
                    match verdict {
                        metrics::UsageVerdict::Issue => self.report.record_issue(message),
                        _ => self.report.record_warning(message),
                    }
                }
                info!("{} {}: {:.1}%", reading.node, kind.label(), reading.percent);
            }
        }
    }

    pub async fn check_kubernetes_api(&mut self) -> bool {
        info!("Checking Kubernetes API health");
        let health = check_api_server(&self.api_client, &self.config.k8s_api_url).await;
        if health == ApiServerHealth::Healthy {
            info!("API server - HEALTHY");
        }
        match health.issue_message() {
            Some(message) => {
                self.report.record_issue(message);
                false
            }
            None => true,
        }
    }

    pub async fn check_container_metrics(&mut self) -> bool {
        info!("Checking container metrics");
        self.check_exporter(Exporter::Cadvisor).await.unwrap_or(false)
    }

    /// Critical log hits are only ever warnings.
    pub async fn check_critical_logs(&mut self) {
        info!("Checking critical logs");
        for hit in metrics::scan_critical_logs(&self.loki, self.started_at).await {
            self.report.record_warning(hit.warning_message());
        }
    }

    /// Run every check in order and hand back the final report.
    pub async fn run(mut self) -> HealthReport {
        info!("Kubernetes health check starting");
        let node_health = self.check_node_health().await;
        let api_health = self.check_kubernetes_api().await;
        let container_health = self.check_container_metrics().await;
        self.check_critical_logs().await;

        info!(
            node_health,
            api_health,
            container_health,
            status = %self.report.overall_status,
            "Health check finished"
        );
        self.report
    }
}
