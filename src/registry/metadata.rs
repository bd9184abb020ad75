use crate::core::BuildingBlock;
use serde::{Deserialize, Serialize};

/// Schema for a configurable parameter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterSchema {
    pub name: String,
    #[serde(rename = "type")]
    pub param_type: String,
    pub default: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

/// Factory function type for creating block instances
pub type BlockFactory = fn() -> Box<dyn BuildingBlock>;

/// Complete metadata for a block type
#[derive(Clone)]
pub struct BlockMetadata {
    /// Key used by the `type` field of pipeline configs
    pub id: String,
    pub name: String,
    pub category: String,
    pub parameters: Vec<ParameterSchema>,
    pub factory: BlockFactory,
}

impl BlockMetadata {
    /// Create a new, unconfigured instance of this block type
    pub fn create_instance(&self) -> Box<dyn BuildingBlock> {
        (self.factory)()
    }

    pub fn parameter(&self, name: &str) -> Option<&ParameterSchema> {
        self.parameters.iter().find(|p| p.name == name)
    }
}

impl std::fmt::Debug for BlockMetadata {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockMetadata")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("category", &self.category)
            .field("parameters", &self.parameters)
            .finish()
    }
}

// Factory type for creating block metadata at runtime
pub type BlockMetadataFactory = fn() -> BlockMetadata;

// Wrapper for inventory collection
pub struct BlockMetadataFactoryWrapper(pub BlockMetadataFactory);

inventory::collect!(BlockMetadataFactoryWrapper);
