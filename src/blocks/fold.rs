use crate::core::{BlockOutput, BuildingBlock, Container};
use anyhow::{bail, Result};
use async_trait::async_trait;
use streamblocks_macros::StreamBlock;

/// Collapses a container of any depth into the sum of its leaves
#[derive(StreamBlock, Debug, Clone, Copy, Default)]
#[block_meta(name = "Sum", category = "Folds")]
pub struct Sum;

impl Sum {
    pub fn new() -> Self {
        Self
    }

    pub fn fold(&self, input: &Container) -> Container {
        match input {
            Container::Scalar(_) => input.clone(),
            Container::Batch(_) => Container::Scalar(input.sum()),
        }
    }
}

#[async_trait]
impl BuildingBlock for Sum {
    async fn process(&mut self, input: Container) -> Result<BlockOutput> {
        Ok(Some(self.fold(&input)))
    }
}

/// Collapses a container into the median of its flattened leaves
#[derive(StreamBlock, Debug, Clone, Copy, Default)]
#[block_meta(name = "Median", category = "Folds")]
pub struct Median;

impl Median {
    pub fn new() -> Self {
        Self
    }
}

/// Median under a total order; `None` for an empty slice
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

#[async_trait]
impl BuildingBlock for Median {
    async fn process(&mut self, input: Container) -> Result<BlockOutput> {
        if input.is_scalar() {
            return Ok(Some(input));
        }

        match median(&input.flatten()) {
            Some(m) => Ok(Some(Container::Scalar(m))),
            None => bail!("median of an empty batch is undefined"),
        }
    }
}
