use anyhow::{anyhow, Context, Result};
use clap::{Parser, ValueEnum};
use std::collections::HashMap;
use std::path::PathBuf;
use crate::types::CheckConfig;

pub const DEFAULT_PROMETHEUS_URL: &str = "http://prometheus.home";
pub const DEFAULT_LOKI_URL: &str = "http://192.168.1.143:3100";
pub const DEFAULT_K8S_API_URL: &str = "https://192.168.1.99:6443";
pub const DEFAULT_CLUSTER_NODES: &str = "kube501.home,kube502.home,kube503.home,kube511.home";

/// Trait for abstracting environment variable access
pub trait EnvironmentProvider {
    fn get_var(&self, key: &str) -> Option<String>;
}

/// Production implementation using std::env
pub struct SystemEnvironment;

impl EnvironmentProvider for SystemEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Mock implementation for testing
#[derive(Debug, Default)]
pub struct MockEnvironment {
    vars: HashMap<String, String>,
}

impl MockEnvironment {
    pub fn new() -> Self {
        Self {
            vars: HashMap::new(),
        }
    }

    pub fn set_var<K, V>(&mut self, key: K, value: V) -> &mut Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.vars.insert(key.into(), value.into());
        self
    }

    pub fn with_var<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.set_var(key, value);
        self
    }
}

impl EnvironmentProvider for MockEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

pub fn load_check_config() -> Result<CheckConfig> {
    load_check_config_with_env(&SystemEnvironment)
}

pub fn load_check_config_with_env<E: EnvironmentProvider>(env: &E) -> Result<CheckConfig> {
    let prometheus_url = env.get_var("PROMETHEUS_URL")
        .unwrap_or_else(|| DEFAULT_PROMETHEUS_URL.to_string());
    let loki_url = env.get_var("LOKI_URL")
        .unwrap_or_else(|| DEFAULT_LOKI_URL.to_string());
    let k8s_api_url = env.get_var("K8S_API_URL")
        .unwrap_or_else(|| DEFAULT_K8S_API_URL.to_string());

    let cluster_nodes: Vec<String> = env.get_var("CLUSTER_NODES")
        .unwrap_or_else(|| DEFAULT_CLUSTER_NODES.to_string())
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    if cluster_nodes.is_empty() {
        return Err(anyhow!("CLUSTER_NODES must list at least one node (comma-separated)"));
    }

    let query_timeout_secs: u64 = env.get_var("QUERY_TIMEOUT_SECS")
        .unwrap_or_else(|| "10".to_string())
        .parse()
        .context("Invalid QUERY_TIMEOUT_SECS")?;

    Ok(CheckConfig {
        prometheus_url,
        loki_url,
        k8s_api_url,
        cluster_nodes,
        query_timeout_secs,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportType {
    Daily,
    Weekly,
}

impl ReportType {
    /// Step used for range queries over the report period.
    pub fn step(&self) -> &'static str {
        match self {
            ReportType::Daily => "1h",
            ReportType::Weekly => "1d",
        }
    }
}

/// Generate Kubernetes cluster health report
#[derive(Debug, Parser)]
#[command(name = "cluster-health-report")]
#[command(version, about = "Generate Kubernetes cluster health report", long_about = None)]
pub struct ReportArgs {
    /// Report type (daily or weekly)
    #[arg(long = "type", value_enum, default_value = "daily")]
    pub report_type: ReportType,

    /// Prometheus server URL
    #[arg(long)]
    pub prometheus_url: String,

    /// Output file path
    #[arg(long)]
    pub output: PathBuf,

    /// Discord webhook URL for notifications
    #[arg(long, default_value = "")]
    pub discord_webhook: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_config_defaults() {
        let config = load_check_config_with_env(&MockEnvironment::new()).unwrap();

        assert_eq!(config.prometheus_url, DEFAULT_PROMETHEUS_URL);
        assert_eq!(config.loki_url, DEFAULT_LOKI_URL);
        assert_eq!(config.k8s_api_url, DEFAULT_K8S_API_URL);
        assert_eq!(
            config.cluster_nodes,
            vec!["kube501.home", "kube502.home", "kube503.home", "kube511.home"]
        );
        assert_eq!(config.query_timeout_secs, 10);
    }

    #[test]
    fn test_check_config_overrides() {
        let env = MockEnvironment::new()
            .with_var("PROMETHEUS_URL", "http://prom:9090")
            .with_var("LOKI_URL", "http://loki:3100")
            .with_var("K8S_API_URL", "https://api:6443")
            .with_var("CLUSTER_NODES", " a , b ,, c ")
            .with_var("QUERY_TIMEOUT_SECS", "3");

        let config = load_check_config_with_env(&env).unwrap();

        assert_eq!(config.prometheus_url, "http://prom:9090");
        assert_eq!(config.loki_url, "http://loki:3100");
        assert_eq!(config.k8s_api_url, "https://api:6443");
        assert_eq!(config.cluster_nodes, vec!["a", "b", "c"]);
        assert_eq!(config.query_timeout_secs, 3);
    }

    #[test]
    fn test_check_config_rejects_empty_node_list() {
        let env = MockEnvironment::new().with_var("CLUSTER_NODES", " , ,");

        let result = load_check_config_with_env(&env);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("CLUSTER_NODES"));
    }

    #[test]
    fn test_check_config_invalid_timeout() {
        let env = MockEnvironment::new().with_var("QUERY_TIMEOUT_SECS", "soon");

        let result = load_check_config_with_env(&env);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("QUERY_TIMEOUT_SECS"));
    }

    #[test]
    fn test_report_args_parsing() {
        let args = ReportArgs::try_parse_from([
            "cluster-health-report",
            "--prometheus-url", "http://prom:9090",
            "--output", "/tmp/report.txt",
        ]).unwrap();

        assert_eq!(args.report_type, ReportType::Daily);
        assert_eq!(args.prometheus_url, "http://prom:9090");
        assert_eq!(args.output, PathBuf::from("/tmp/report.txt"));
        assert_eq!(args.discord_webhook, "");

        let args = ReportArgs::try_parse_from([
            "cluster-health-report",
            "--type", "weekly",
            "--prometheus-url", "http://prom:9090",
            "--output", "out.txt",
            "--discord-webhook", "https://discord.example/hook",
        ]).unwrap();

        assert_eq!(args.report_type, ReportType::Weekly);
        assert_eq!(args.report_type.step(), "1d");
        assert_eq!(args.discord_webhook, "https://discord.example/hook");
    }

    #[test]
    fn test_report_args_missing_required() {
        assert!(ReportArgs::try_parse_from(["cluster-health-report", "--output", "x"]).is_err());
        assert!(ReportArgs::try_parse_from(["cluster-health-report", "--prometheus-url", "x"]).is_err());
        assert!(ReportArgs::try_parse_from([
            "cluster-health-report",
            "--type", "monthly",
            "--prometheus-url", "x",
            "--output", "y",
        ]).is_err());
    }
}
