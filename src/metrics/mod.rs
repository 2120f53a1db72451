// Query-result evaluators
pub mod nodes;
pub mod usage;
pub mod pods;
pub mod alerts;
pub mod logs;

// Re-export commonly used items
pub use nodes::{analyze_node_status, classify_expected_nodes, node_statuses, Exporter};
pub use usage::{analyze_resource_usage, check_message, classify_check, UsageTier, UsageVerdict};
pub use pods::analyze_pod_phases;
pub use alerts::{analyze_alerts, firing_alerts};
pub use logs::{scan_critical_logs, LogHit, CRITICAL_LOG_PATTERNS};
