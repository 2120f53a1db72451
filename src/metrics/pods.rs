use crate::parsing::parse_scalar_count;
use crate::prometheus::PrometheusClient;
use crate::types::PodPhaseCounts;

pub const RUNNING_QUERY: &str = r#"count(kube_pod_status_phase{phase="Running"})"#;
pub const PENDING_QUERY: &str = r#"count(kube_pod_status_phase{phase="Pending"})"#;
pub const FAILED_QUERY: &str = r#"count(kube_pod_status_phase{phase="Failed"})"#;
pub const TOTAL_QUERY: &str = "count(kube_pod_info)";

async fn phase_count(client: &PrometheusClient, query: &str) -> u64 {
    client
        .query(query)
        .await
        .data()
        .map(parse_scalar_count)
        .unwrap_or(0)
}

/// Pod counts per phase. Each phase is queried on its own and defaults to
/// zero, so `total` need not equal the sum of the others.
pub async fn analyze_pod_phases(client: &PrometheusClient) -> PodPhaseCounts {
    PodPhaseCounts {
        running: phase_count(client, RUNNING_QUERY).await,
        pending: phase_count(client, PENDING_QUERY).await,
        failed: phase_count(client, FAILED_QUERY).await,
        total: phase_count(client, TOTAL_QUERY).await,
    }
}
