use super::{Pipeline, RunOutcome};
use crate::error::SourceError;
use crate::io::LineSource;
use tokio::io::AsyncBufRead;
use tracing::error;

/// Counters for one drained source
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrainSummary {
    /// Events that entered the pipeline
    pub events: usize,
    pub emitted: usize,
    pub swallowed: usize,
    /// Runs aborted by a propagated block failure
    pub aborted: usize,
    /// Input lines rejected before reaching the pipeline
    pub rejected: usize,
}

/// Feed every event of `source` through `pipeline` until end of input.
///
/// Block failures never stop the loop; an aborted run is logged and the next
/// event is processed normally. Only a failing reader ends the drain early.
pub async fn drain<R>(
    pipeline: &mut Pipeline,
    source: &mut LineSource<R>,
) -> Result<DrainSummary, SourceError>
where
    R: AsyncBufRead + Unpin,
{
    let mut summary = DrainSummary::default();

    while let Some(event) = source.next_event().await {
        let container = match event {
            Ok(container) => container,
            // already reported by the source
            Err(SourceError::Malformed { .. }) => {
                summary.rejected += 1;
                continue;
            }
            Err(e) => return Err(e),
        };

        summary.events += 1;
        match pipeline.push(container).await {
            Ok(report) => match report.outcome {
                RunOutcome::Emitted(_) => summary.emitted += 1,
                RunOutcome::Swallowed { .. } => summary.swallowed += 1,
            },
            Err(e) => {
                summary.aborted += 1;
                let message = format!("{e:#}");
                error!(error = %message, "run aborted");
            }
        }
    }

    Ok(summary)
}
