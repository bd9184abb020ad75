mod metadata;

pub use metadata::{
    BlockFactory, BlockMetadata, BlockMetadataFactory, BlockMetadataFactoryWrapper,
    ParameterSchema,
};

use crate::core::BuildingBlock;
use crate::error::ConfigError;
use serde_json::Value;
use std::collections::BTreeMap;

/// Lookup table of every block type registered through `#[derive(StreamBlock)]`
pub struct BlockRegistry {
    blocks: BTreeMap<String, BlockMetadata>,
}

impl BlockRegistry {
    /// Collect all registered block types
    pub fn collect() -> Self {
        let mut blocks = BTreeMap::new();
        for wrapper in inventory::iter::<BlockMetadataFactoryWrapper> {
            let meta = (wrapper.0)();
            blocks.insert(meta.id.clone(), meta);
        }

        Self { blocks }
    }

    pub fn get(&self, block_type: &str) -> Option<&BlockMetadata> {
        self.blocks.get(block_type)
    }

    /// Registered type ids in sorted order
    pub fn list(&self) -> Vec<&str> {
        self.blocks.keys().map(String::as_str).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BlockMetadata> {
        self.blocks.values()
    }

    /// Instantiate a block and run its `on_create` hook
    pub async fn create(
        &self,
        block_type: &str,
        config: Value,
    ) -> Result<Box<dyn BuildingBlock>, ConfigError> {
        let meta = self
            .get(block_type)
            .ok_or_else(|| ConfigError::UnknownBlock(block_type.to_string()))?;

        let mut block = meta.create_instance();
        block
            .on_create(config)
            .await
            .map_err(|e| ConfigError::InvalidBlock {
                id: block_type.to_string(),
                message: format!("{e:#}"),
            })?;

        Ok(block)
    }
}

impl Default for BlockRegistry {
    fn default() -> Self {
        Self::collect()
    }
}
