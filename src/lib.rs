pub mod blocks;
pub mod config;
pub mod core;
pub mod engine;
pub mod error;
pub mod io;
pub mod observability;
pub mod registry;
pub mod resilience;

pub use crate::core::{BlockOutput, BuildingBlock, Container};
pub use config::{BlockConfig, PipelineConfig};
pub use engine::{Pipeline, RunOutcome, RunReport};
pub use error::{ConfigError, SourceError};
