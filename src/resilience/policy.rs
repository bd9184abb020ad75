use crate::core::Container;
use serde::{Deserialize, Serialize};

/// What the executor does when a block invocation fails
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorPolicy {
    /// Abort the run and return the error to the caller
    Propagate,

    /// Discard the failed output and continue with the block's input
    #[default]
    SkipBlock,

    /// Treat the failure as a swallow
    Swallow,

    /// Continue with a fixed replacement container
    UseDefault(Container),
}
