#![allow(dead_code)]

use anyhow::{bail, Result};
use async_trait::async_trait;
use std::io::Write;
use std::sync::{Arc, Mutex};
use streamblocks::{BlockOutput, BuildingBlock, Container};

pub fn scalars(values: &[f64]) -> Vec<Container> {
    values.iter().copied().map(Container::scalar).collect()
}

pub fn batch_of(values: &[f64]) -> Container {
    Container::batch(scalars(values))
}

/// Writer that keeps everything written to it for later inspection
#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Block that fails on every invocation
pub struct FailingBlock;

#[async_trait]
impl BuildingBlock for FailingBlock {
    async fn process(&mut self, _input: Container) -> Result<BlockOutput> {
        bail!("boom")
    }
}

/// Block that fails only for the listed scalar inputs
pub struct FailOn(pub Vec<f64>);

#[async_trait]
impl BuildingBlock for FailOn {
    async fn process(&mut self, input: Container) -> Result<BlockOutput> {
        if let Some(v) = input.as_scalar() {
            if self.0.contains(&v) {
                bail!("refusing {}", v);
            }
        }
        Ok(Some(input))
    }
}

/// Pass-through block recording every container it sees
#[derive(Clone, Default)]
pub struct Recorder(pub Arc<Mutex<Vec<Container>>>);

impl Recorder {
    pub fn seen(&self) -> Vec<Container> {
        self.0.lock().unwrap().clone()
    }
}

#[async_trait]
impl BuildingBlock for Recorder {
    async fn process(&mut self, input: Container) -> Result<BlockOutput> {
        self.0.lock().unwrap().push(input.clone());
        Ok(Some(input))
    }
}
