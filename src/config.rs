use crate::error::ConfigError;
use crate::resilience::ErrorPolicy;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::path::Path;

/// One stage of a pipeline config
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockConfig {
    /// Stage id used in logs and metrics; defaults to `<type>_<index>`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Registry key of the block type (`filter`, `window`, ...)
    #[serde(rename = "type")]
    pub block_type: String,

    /// Parameters handed to the block's `on_create`
    #[serde(default)]
    pub config: Value,
}

impl BlockConfig {
    pub fn new(block_type: impl Into<String>, config: Value) -> Self {
        Self {
            id: None,
            block_type: block_type.into(),
            config,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// Ordered list of stages plus the failure handling for the whole pipeline
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub error_policy: ErrorPolicy,

    #[serde(default)]
    pub blocks: Vec<BlockConfig>,
}

impl PipelineConfig {
    /// Positive values, summed in pairs, median over every three sums, printed
    pub fn standard() -> Self {
        Self {
            error_policy: ErrorPolicy::SkipBlock,
            blocks: vec![
                BlockConfig::new("filter", json!({"predicate": {"gt": 0.0}, "policy": "all"})),
                BlockConfig::new("window", json!({"size": 2})),
                BlockConfig::new("sum", Value::Null),
                BlockConfig::new("window", json!({"size": 3})),
                BlockConfig::new("median", Value::Null),
                BlockConfig::new("print", Value::Null),
            ],
        }
    }

    pub fn from_json(value: Value) -> Result<Self, ConfigError> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load a `.json` or `.toml` pipeline file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&content),
            Some("toml") => Self::from_toml_str(&content),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}
