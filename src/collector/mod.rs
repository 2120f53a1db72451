use tracing::info;

use crate::metrics;
use crate::prometheus::PrometheusClient;
use crate::types::ClusterFacts;

/// Gathers the facts behind the daily/weekly report, one query at a time.
pub struct MetricsCollector<'a> {
    client: &'a PrometheusClient,
}

impl<'a> MetricsCollector<'a> {
    pub fn new(client: &'a PrometheusClient) -> Self {
        Self { client }
    }

    /// Every section degrades to empty/zero when its query fails, so this
    /// always produces a renderable fact set.
    pub async fn collect_facts(&self) -> ClusterFacts {
        info!("Collecting node status");
        let nodes = metrics::analyze_node_status(self.client).await;

        info!("Collecting resource usage");
        let usage = metrics::analyze_resource_usage(self.client).await;

        info!("Collecting pod phases");
        let pods = metrics::analyze_pod_phases(self.client).await;

        info!("Collecting active alerts");
        let alerts = metrics::analyze_alerts(self.client).await;

        ClusterFacts {
            nodes,
            usage,
            pods,
            alerts,
        }
    }
}
