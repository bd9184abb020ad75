use crate::config::PipelineConfig;
use crate::core::{BuildingBlock, Container};
use crate::error::ConfigError;
use crate::observability::{BlockMetrics, MetricsCollector, PipelineMonitor};
use crate::registry::BlockRegistry;
use crate::resilience::{ErrorPolicy, Invocation, ResilientBlock};
use anyhow::Result;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

/// How a single event left the pipeline
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// Every stage ran; this is the last stage's output
    Emitted(Container),
    /// The named stage swallowed the event
    Swallowed { stage: String },
}

/// A block failure absorbed by the error policy during a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageFailure {
    pub stage: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub outcome: RunOutcome,
    pub failures: Vec<StageFailure>,
}

impl RunReport {
    pub fn emitted(&self) -> Option<&Container> {
        match &self.outcome {
            RunOutcome::Emitted(container) => Some(container),
            RunOutcome::Swallowed { .. } => None,
        }
    }

    pub fn is_swallowed(&self) -> bool {
        matches!(self.outcome, RunOutcome::Swallowed { .. })
    }
}

/// Ordered chain of building blocks driven one event at a time
pub struct Pipeline {
    stages: Vec<ResilientBlock>,
    collector: MetricsCollector,
}

impl Pipeline {
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::default()
    }

    /// Build a pipeline from config using the block registry
    pub async fn from_config(config: &PipelineConfig) -> Result<Self, ConfigError> {
        Self::from_config_with(&BlockRegistry::collect(), config).await
    }

    pub async fn from_config_with(
        registry: &BlockRegistry,
        config: &PipelineConfig,
    ) -> Result<Self, ConfigError> {
        let mut builder = Self::builder().error_policy(config.error_policy.clone());

        for (index, block_config) in config.blocks.iter().enumerate() {
            let id = block_config
                .id
                .clone()
                .unwrap_or_else(|| format!("{}_{}", block_config.block_type, index));

            let block = registry
                .create(&block_config.block_type, block_config.config.clone())
                .await
                .map_err(|e| match e {
                    ConfigError::InvalidBlock { message, .. } => ConfigError::InvalidBlock {
                        id: id.clone(),
                        message,
                    },
                    other => other,
                })?;

            builder = builder.boxed_block(id, block);
        }

        let pipeline = builder.build();
        info!(stages = ?pipeline.stage_ids(), "pipeline built");
        Ok(pipeline)
    }

    pub async fn from_json(config: Value) -> Result<Self> {
        let config = PipelineConfig::from_json(config)?;
        Ok(Self::from_config(&config).await?)
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn stage_ids(&self) -> Vec<&str> {
        self.stages.iter().map(ResilientBlock::id).collect()
    }

    /// Drive one event through every stage.
    ///
    /// Stops at the first swallow. A failing stage is handled by its error
    /// policy; with the default policy the next stage receives the failing
    /// stage's input. `Err` is returned only under `ErrorPolicy::Propagate`.
    pub async fn push(&mut self, input: Container) -> Result<RunReport> {
        let mut current = input;
        let mut failures = Vec::new();

        for stage in &mut self.stages {
            let invocation = stage.invoke(current).await?;

            if let Invocation::Recovered { error, .. } = &invocation {
                failures.push(StageFailure {
                    stage: stage.id().to_string(),
                    message: format!("{error:#}"),
                });
            }

            match invocation.into_output() {
                Some(next) => current = next,
                None => {
                    debug!(stage = %stage.id(), "event swallowed");
                    return Ok(RunReport {
                        outcome: RunOutcome::Swallowed {
                            stage: stage.id().to_string(),
                        },
                        failures,
                    });
                }
            }
        }

        Ok(RunReport {
            outcome: RunOutcome::Emitted(current),
            failures,
        })
    }

    pub fn get_monitor(&self) -> PipelineMonitor {
        PipelineMonitor::new(self.collector.clone())
    }

    pub fn metrics(&self) -> &MetricsCollector {
        &self.collector
    }
}

#[derive(Default)]
pub struct PipelineBuilder {
    blocks: Vec<(String, Box<dyn BuildingBlock>)>,
    error_policy: ErrorPolicy,
}

impl PipelineBuilder {
    pub fn error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.error_policy = policy;
        self
    }

    /// Append a block; its id is derived from the type name and position
    pub fn block<B: BuildingBlock + 'static>(self, block: B) -> Self {
        let type_name = std::any::type_name::<B>()
            .rsplit("::")
            .next()
            .unwrap_or("block")
            .to_lowercase();
        let id = format!("{}_{}", type_name, self.blocks.len());
        self.boxed_block(id, Box::new(block))
    }

    pub fn named_block<B: BuildingBlock + 'static>(self, id: impl Into<String>, block: B) -> Self {
        self.boxed_block(id, Box::new(block))
    }

    pub fn boxed_block(mut self, id: impl Into<String>, block: Box<dyn BuildingBlock>) -> Self {
        self.blocks.push((id.into(), block));
        self
    }

    pub fn build(self) -> Pipeline {
        let Self { blocks, error_policy } = self;
        let mut collector = MetricsCollector::new();
        let stages = blocks
            .into_iter()
            .map(|(id, block)| {
                let metrics = Arc::new(BlockMetrics::new(id.clone()));
                collector.register(metrics.clone());
                ResilientBlock::new(id, block, metrics, error_policy.clone())
            })
            .collect();

        Pipeline { stages, collector }
    }
}
