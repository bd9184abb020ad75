use super::ErrorPolicy;
use crate::core::{BlockOutput, BuildingBlock, Container};
use crate::observability::BlockMetrics;
use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tracing::warn;

/// Outcome of a guarded invocation
#[derive(Debug)]
pub enum Invocation {
    /// The block ran normally
    Completed(BlockOutput),

    /// The block failed and the error policy supplied the output
    Recovered {
        output: BlockOutput,
        error: anyhow::Error,
    },
}

impl Invocation {
    pub fn output(&self) -> Option<&Container> {
        match self {
            Self::Completed(output) | Self::Recovered { output, .. } => output.as_ref(),
        }
    }

    pub fn into_output(self) -> BlockOutput {
        match self {
            Self::Completed(output) | Self::Recovered { output, .. } => output,
        }
    }
}

/// Wraps a block with metrics and failure isolation
pub struct ResilientBlock {
    id: String,
    inner: Box<dyn BuildingBlock>,
    metrics: Arc<BlockMetrics>,
    error_policy: ErrorPolicy,
}

impl ResilientBlock {
    pub fn new(
        id: impl Into<String>,
        inner: Box<dyn BuildingBlock>,
        metrics: Arc<BlockMetrics>,
        error_policy: ErrorPolicy,
    ) -> Self {
        Self {
            id: id.into(),
            inner,
            metrics,
            error_policy,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn metrics(&self) -> &Arc<BlockMetrics> {
        &self.metrics
    }

    pub fn error_policy(&self) -> &ErrorPolicy {
        &self.error_policy
    }

    /// Run the inner block once.
    ///
    /// Returns `Err` only under `ErrorPolicy::Propagate`.
    pub async fn invoke(&mut self, input: Container) -> Result<Invocation> {
        let start = self.metrics.start_processing();

        // The input is kept so a failed invocation can fall back to it
        let result = self.inner.process(input.clone()).await;

        match result {
            Ok(output) => {
                self.metrics.finish_processing(start);
                self.metrics.record_processed();
                if output.is_none() {
                    self.metrics.record_swallowed();
                }
                Ok(Invocation::Completed(output))
            }
            Err(error) => {
                self.metrics.record_error();
                let message = format!("{error:#}");
                warn!(block = %self.id, error = %message, "block failed");

                let output = match &self.error_policy {
                    ErrorPolicy::Propagate => {
                        return Err(error.context(format!("block '{}' failed", self.id)))
                    }
                    ErrorPolicy::SkipBlock => Some(input),
                    ErrorPolicy::Swallow => None,
                    ErrorPolicy::UseDefault(default) => Some(default.clone()),
                };

                Ok(Invocation::Recovered { output, error })
            }
        }
    }
}

#[async_trait]
impl BuildingBlock for ResilientBlock {
    async fn on_create(&mut self, config: Value) -> Result<()> {
        self.inner.on_create(config).await
    }

    async fn process(&mut self, input: Container) -> Result<BlockOutput> {
        Ok(self.invoke(input).await?.into_output())
    }
}
