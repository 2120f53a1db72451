use anyhow::Result;
use chrono::Utc;
use tracing::info;

use cluster_health_reporter::{init_tracing, load_check_config, render_check_summary, HealthChecker};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cfg = load_check_config()?;
    info!("nodes = {:?}", cfg.cluster_nodes);

    let checker = HealthChecker::new(cfg, Utc::now())?;
    let report = checker.run().await;

    let summary = report.summary();
    if summary.has_findings() {
        info!(
            "Health check summary: {} findings ({} issues, {} warnings)",
            summary.total_findings(),
            summary.issue_count,
            summary.warning_count
        );
    } else {
        info!("Health check summary: no issues or warnings");
    }
    println!("{}", render_check_summary(&report));

    std::process::exit(report.overall_status.exit_code());
}
