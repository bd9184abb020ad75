pub mod metrics;
pub mod collector;
pub mod monitor;

pub use metrics::BlockMetrics;
pub use collector::{MetricsCollector, MetricsSnapshot};
pub use monitor::PipelineMonitor;
