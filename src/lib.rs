// Public modules
pub mod types;
pub mod config;
pub mod error;
pub mod query;
pub mod parsing;
pub mod prometheus;
pub mod loki;
pub mod kubernetes;
pub mod metrics;
pub mod collector;
pub mod check;
pub mod report;
pub mod discord;
pub mod output;

// Re-export commonly used items
pub use types::*;
pub use config::{load_check_config, load_check_config_with_env, EnvironmentProvider, SystemEnvironment, MockEnvironment, ReportArgs, ReportType};
pub use error::QueryError;
pub use query::{FailureCause, QueryOutcome};
pub use prometheus::PrometheusClient;
pub use loki::LokiClient;
pub use collector::MetricsCollector;
pub use check::HealthChecker;
pub use report::{HealthReport, ReportSummary, render_daily, render_weekly, render_check_summary};
pub use discord::{build_discord_payload, send_to_discord};
pub use output::save_report;

/// Install the fmt subscriber used by both binaries.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .try_init();
}
