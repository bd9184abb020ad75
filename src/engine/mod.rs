pub mod pipeline;
pub mod runner;

pub use pipeline::{Pipeline, PipelineBuilder, RunOutcome, RunReport, StageFailure};
pub use runner::{drain, DrainSummary};
