use anyhow::Result;
use chrono::Local;
use clap::Parser;
use std::time::Duration;
use tracing::info;

use cluster_health_reporter::{
    init_tracing, render_daily, render_weekly, save_report, send_to_discord, MetricsCollector,
    PrometheusClient, ReportArgs, ReportType,
};

const REPORT_QUERY_TIMEOUT_SECS: u64 = 30;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let args = ReportArgs::parse();
    info!("report type = {:?}, prometheus = {}", args.report_type, args.prometheus_url);

    let client = PrometheusClient::new(
        &args.prometheus_url,
        Duration::from_secs(REPORT_QUERY_TIMEOUT_SECS),
    )?;
    let facts = MetricsCollector::new(&client).collect_facts().await;

    let generated_at = Local::now().naive_local();
    let report = match args.report_type {
        ReportType::Daily => render_daily(&facts, generated_at),
        ReportType::Weekly => render_weekly(&facts, generated_at),
    };

    save_report(&report, &args.output)?;
    send_to_discord(&args.discord_webhook, &report).await;

    Ok(())
}
