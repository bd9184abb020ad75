use crate::core::{BlockOutput, BuildingBlock, Container};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::io::Write;
use streamblocks_macros::StreamBlock;

/// Sink block: writes the rendered container and passes it on unchanged
#[derive(StreamBlock)]
#[block_meta(name = "Print", category = "Sinks")]
pub struct Print {
    #[param(default = "null", kind = "string")]
    label: Option<String>,

    writer: Box<dyn Write + Send + Sync>,
}

impl Default for Print {
    fn default() -> Self {
        Self::new()
    }
}

impl Print {
    pub fn new() -> Self {
        Self {
            label: None,
            writer: Box::new(std::io::stdout()),
        }
    }

    pub fn with_writer(writer: impl Write + Send + Sync + 'static) -> Self {
        Self {
            label: None,
            writer: Box::new(writer),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn render(&self, container: &Container) -> String {
        match &self.label {
            Some(label) => format!("[{}] {}", label, container),
            None => container.to_string(),
        }
    }
}

#[async_trait]
impl BuildingBlock for Print {
    async fn on_create(&mut self, config: Value) -> Result<()> {
        if let Some(label) = config["label"].as_str() {
            self.label = Some(label.to_string());
        }
        Ok(())
    }

    async fn process(&mut self, input: Container) -> Result<BlockOutput> {
        let line = self.render(&input);
        writeln!(self.writer, "{}", line).context("sink write failed")?;
        self.writer.flush().context("sink flush failed")?;
        Ok(Some(input))
    }
}
