use super::BlockMetrics;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub block_id: String,
    pub processed: u64,
    pub swallowed: u64,
    pub errors_count: u64,
    pub avg_latency_us: u64,
}

/// Metrics of every stage, kept in pipeline order
#[derive(Clone, Default)]
pub struct MetricsCollector {
    metrics: Vec<Arc<BlockMetrics>>,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, metrics: Arc<BlockMetrics>) {
        self.metrics.push(metrics);
    }

    pub fn snapshot(&self) -> Vec<MetricsSnapshot> {
        self.metrics
            .iter()
            .map(|metrics| MetricsSnapshot {
                block_id: metrics.block_id().to_string(),
                processed: metrics.processed(),
                swallowed: metrics.swallowed(),
                errors_count: metrics.errors_count(),
                avg_latency_us: metrics.avg_latency_us(),
            })
            .collect()
    }

    pub fn get_block_metrics(&self, block_id: &str) -> Option<Arc<BlockMetrics>> {
        self.metrics
            .iter()
            .find(|m| m.block_id() == block_id)
            .cloned()
    }
}
