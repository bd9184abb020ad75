use crate::core::{BlockOutput, BuildingBlock, Container};
use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use streamblocks_macros::StreamBlock;

/// Upper bound on the buffer capacity reserved up front
const MAX_PREALLOCATED: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WindowState {
    /// Buffer holds fewer than `size` containers
    Accumulating,
    /// Buffer is full and was emitted; the next input resets it
    Ready,
}

/// Fixed-size tumbling window.
///
/// Buffers incoming containers and emits them as one batch once `size` have
/// arrived. Windows never share members.
#[derive(StreamBlock, Debug, Clone)]
#[block_meta(id = "window", name = "Tumbling Window", category = "Stateful")]
pub struct TumblingWindow {
    #[param(default = "1", min = 1.0)]
    size: usize,

    buffer: Vec<Container>,
}

impl Default for TumblingWindow {
    fn default() -> Self {
        Self {
            size: 1,
            buffer: Vec::with_capacity(1),
        }
    }
}

impl TumblingWindow {
    pub fn new(size: usize) -> Result<Self> {
        if size == 0 {
            bail!("window size must be positive");
        }
        Ok(Self {
            size,
            buffer: Vec::with_capacity(size.min(MAX_PREALLOCATED)),
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of containers currently held
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    pub fn state(&self) -> WindowState {
        if self.buffer.len() == self.size {
            WindowState::Ready
        } else {
            WindowState::Accumulating
        }
    }

    /// Add one container; returns the closed window when it fills up
    pub fn push(&mut self, container: Container) -> Option<Container> {
        if self.state() == WindowState::Ready {
            self.buffer.clear();
        }

        self.buffer.push(container);

        if self.buffer.len() == self.size {
            Some(Container::Batch(self.buffer.clone()))
        } else {
            None
        }
    }
}

#[async_trait]
impl BuildingBlock for TumblingWindow {
    async fn on_create(&mut self, config: Value) -> Result<()> {
        if let Some(size) = config.get("size") {
            let size = size
                .as_u64()
                .ok_or_else(|| anyhow!("window size must be a positive integer, got {}", size))?;
            let size = usize::try_from(size)
                .map_err(|_| anyhow!("window size {} does not fit this platform", size))?;
            *self = Self::new(size)?;
        }
        Ok(())
    }

    async fn process(&mut self, input: Container) -> Result<BlockOutput> {
        Ok(self.push(input))
    }
}
