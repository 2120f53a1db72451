use std::collections::HashMap;

use crate::parsing::parse_instant_samples;
use crate::prometheus::PrometheusClient;
use crate::types::{MetricSample, NodeAvailability, NodeStatus};

/// Node exporter target as scraped for the report generator.
pub const REPORT_NODE_UP_QUERY: &str = r#"up{job="node-exporter"}"#;

/// Scrape targets whose `up` series the health check inspects per node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exporter {
    NodeExporter,
    Cadvisor,
}

impl Exporter {
    pub fn up_query(&self) -> &'static str {
        match self {
            Exporter::NodeExporter => "up{job='node_exporter'}",
            Exporter::Cadvisor => "up{job='cadvisor'}",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Exporter::NodeExporter => "node exporter",
            Exporter::Cadvisor => "cAdvisor",
        }
    }

    pub fn down_message(&self, node: &str) -> String {
        match self {
            Exporter::NodeExporter => format!("Node exporter down on {}", node),
            Exporter::Cadvisor => format!("cAdvisor down on {}", node),
        }
    }

    pub fn missing_message(&self, node: &str) -> String {
        match self {
            Exporter::NodeExporter => format!("No metrics found for {}", node),
            Exporter::Cadvisor => format!("cAdvisor not reporting from {}", node),
        }
    }
}

pub fn is_up(value: f64) -> bool {
    value == 1.0
}

pub fn node_statuses(samples: &[MetricSample]) -> Vec<NodeStatus> {
    samples
        .iter()
        .map(|s| NodeStatus {
            node: s.node.clone(),
            up: is_up(s.value),
        })
        .collect()
}

/// Availability of each expected node, in the order of `expected`.
/// A node missing from `samples` is `NoMetrics`; with duplicate rows the
/// last one wins.
pub fn classify_expected_nodes(
    expected: &[String],
    samples: &[MetricSample],
) -> Vec<(String, NodeAvailability)> {
    let by_node: HashMap<&str, bool> = samples
        .iter()
        .map(|s| (s.node.as_str(), is_up(s.value)))
        .collect();

    expected
        .iter()
        .map(|node| {
            let availability = match by_node.get(node.as_str()) {
                Some(true) => NodeAvailability::Up,
                Some(false) => NodeAvailability::Down,
                None => NodeAvailability::NoMetrics,
            };
            (node.clone(), availability)
        })
        .collect()
}

/// Up/down status of every node exporter target Prometheus knows about.
pub async fn analyze_node_status(client: &PrometheusClient) -> Vec<NodeStatus> {
    client
        .query(REPORT_NODE_UP_QUERY)
        .await
        .data()
        .map(|response| node_statuses(&parse_instant_samples(response)))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(node: &str, value: f64) -> MetricSample {
        MetricSample { node: node.to_string(), value }
    }

    #[test]
    fn test_is_up() {
        assert!(is_up(1.0));
        assert!(!is_up(0.0));
        assert!(!is_up(2.0));
        assert!(!is_up(0.999));
    }

    #[test]
    fn test_classify_expected_nodes() {
        let expected = vec![
            "kube501.home".to_string(),
            "kube502.home".to_string(),
            "kube503.home".to_string(),
        ];
        let samples = vec![
            sample("kube502.home", 0.0),
            sample("kube501.home", 1.0),
            sample("stray.home", 1.0),
        ];

        let verdicts = classify_expected_nodes(&expected, &samples);
        assert_eq!(
            verdicts,
            vec![
                ("kube501.home".to_string(), NodeAvailability::Up),
                ("kube502.home".to_string(), NodeAvailability::Down),
                ("kube503.home".to_string(), NodeAvailability::NoMetrics),
            ]
        );
    }

    #[test]
    fn test_classify_with_no_samples_marks_everything_missing() {
        let expected = vec!["a".to_string(), "b".to_string()];
        let verdicts = classify_expected_nodes(&expected, &[]);
        assert!(verdicts.iter().all(|(_, a)| *a == NodeAvailability::NoMetrics));
    }

    #[test]
    fn test_node_statuses_keep_result_order() {
        let statuses = node_statuses(&[sample("b", 1.0), sample("a", 0.0)]);
        assert_eq!(statuses[0], NodeStatus { node: "b".to_string(), up: true });
        assert_eq!(statuses[1], NodeStatus { node: "a".to_string(), up: false });
    }

    #[test]
    fn test_exporter_messages() {
        assert_eq!(Exporter::NodeExporter.down_message("n1"), "Node exporter down on n1");
        assert_eq!(Exporter::NodeExporter.missing_message("n1"), "No metrics found for n1");
        assert_eq!(Exporter::Cadvisor.down_message("n1"), "cAdvisor down on n1");
        assert_eq!(Exporter::Cadvisor.missing_message("n1"), "cAdvisor not reporting from n1");
    }
}
