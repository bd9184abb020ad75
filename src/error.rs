use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("bad JSON config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("bad TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("unsupported config extension: {0}")]
    UnsupportedFormat(String),

    #[error("unknown block type: {0}")]
    UnknownBlock(String),

    #[error("block {id}: {message}")]
    InvalidBlock { id: String, message: String },
}

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("line {line}: '{input}' is not a number")]
    Malformed { line: usize, input: String },

    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),
}
