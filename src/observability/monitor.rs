use super::MetricsCollector;

pub struct PipelineMonitor {
    collector: MetricsCollector,
}

impl PipelineMonitor {
    pub fn new(collector: MetricsCollector) -> Self {
        Self { collector }
    }

    pub fn generate_report(&self) -> String {
        let snapshot = self.collector.snapshot();

        if snapshot.is_empty() {
            return "No blocks registered".to_string();
        }

        let mut report = String::from("=== Pipeline Metrics ===\n");

        for metrics in &snapshot {
            report.push_str(&format!(
                "\n[{}]\n  Processed: {}\n  Swallowed: {}\n  Errors: {}\n  Avg Latency: {}μs\n",
                metrics.block_id,
                metrics.processed,
                metrics.swallowed,
                metrics.errors_count,
                metrics.avg_latency_us
            ));
        }

        let total_errors: u64 = snapshot.iter().map(|m| m.errors_count).sum();
        report.push_str(&format!("\nStages: {}, total errors: {}\n", snapshot.len(), total_errors));

        report
    }

    pub fn collector(&self) -> &MetricsCollector {
        &self.collector
    }
}
