use crate::core::{BlockOutput, BuildingBlock, Container};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use streamblocks_macros::StreamBlock;
use tracing::debug;

/// How per-item predicate results are combined inside a batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CombinePolicy {
    /// Every item must pass; an empty batch passes
    #[default]
    All,
    /// At least one item must pass; an empty batch fails
    Any,
}

/// Numeric predicate evaluated against each scalar leaf
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Predicate {
    Gt(f64),
    Ge(f64),
    Lt(f64),
    Le(f64),
    Eq(f64),
    Ne(f64),
    /// Inclusive range
    Between(f64, f64),
    #[serde(skip)]
    Custom(fn(f64) -> bool),
}

impl Predicate {
    pub fn test(&self, v: f64) -> bool {
        match *self {
            Self::Gt(t) => v > t,
            Self::Ge(t) => v >= t,
            Self::Lt(t) => v < t,
            Self::Le(t) => v <= t,
            Self::Eq(t) => v == t,
            Self::Ne(t) => v != t,
            Self::Between(lo, hi) => lo <= v && v <= hi,
            Self::Custom(f) => f(v),
        }
    }
}

impl Default for Predicate {
    fn default() -> Self {
        Self::Gt(0.0)
    }
}

/// Gates a whole container on a numeric predicate.
///
/// The container is either passed through untouched or swallowed; nested
/// batches are evaluated recursively with the same policy at every level.
#[derive(StreamBlock, Debug, Clone, Default)]
#[block_meta(name = "Filter", category = "Transforms")]
pub struct Filter {
    #[param(default = "{\"gt\": 0.0}")]
    pub predicate: Predicate,

    #[param(default = "\"all\"", kind = "string")]
    pub policy: CombinePolicy,
}

impl Filter {
    pub fn new(predicate: Predicate) -> Self {
        Self {
            predicate,
            policy: CombinePolicy::All,
        }
    }

    pub fn with_policy(mut self, policy: CombinePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Recursive evaluation of the predicate over a container
    pub fn accepts(&self, container: &Container) -> bool {
        match container {
            Container::Scalar(v) => self.predicate.test(*v),
            Container::Batch(items) => match self.policy {
                CombinePolicy::All => items.iter().all(|item| self.accepts(item)),
                CombinePolicy::Any => items.iter().any(|item| self.accepts(item)),
            },
        }
    }
}

#[async_trait]
impl BuildingBlock for Filter {
    async fn on_create(&mut self, config: Value) -> Result<()> {
        if let Some(predicate) = config.get("predicate") {
            self.predicate = serde_json::from_value(predicate.clone())
                .context("invalid filter predicate")?;
        }
        if let Some(policy) = config.get("policy") {
            self.policy =
                serde_json::from_value(policy.clone()).context("invalid filter policy")?;
        }
        Ok(())
    }

    async fn process(&mut self, input: Container) -> Result<BlockOutput> {
        if self.accepts(&input) {
            Ok(Some(input))
        } else {
            debug!(value = %input, "filter rejected container");
            Ok(None)
        }
    }
}
