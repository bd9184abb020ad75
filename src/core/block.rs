use super::Container;
use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Result of a single block invocation; `None` is a swallow
pub type BlockOutput = Option<Container>;

/// Base trait for every stage in a pipeline
#[async_trait]
pub trait BuildingBlock: Send + Sync {
    /// Called once when the block is instantiated with its JSON parameters
    async fn on_create(&mut self, _config: Value) -> Result<()> {
        Ok(())
    }

    /// Consume one container and produce a container or a swallow.
    ///
    /// Returning `Ok(None)` ends processing of the current event. Errors are
    /// handled by the executor according to its error policy.
    async fn process(&mut self, input: Container) -> Result<BlockOutput>;
}
