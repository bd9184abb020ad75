use crate::core::Container;
use crate::error::SourceError;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tracing::warn;

/// Parse one raw input unit into a scalar container
pub fn parse_event(line: usize, raw: &str) -> Result<Container, SourceError> {
    let trimmed = raw.trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Container::Scalar(value)),
        _ => Err(SourceError::Malformed {
            line,
            input: trimmed.to_string(),
        }),
    }
}

/// Reads numeric events, one per line.
///
/// Blank lines are skipped. Malformed lines are reported and never reach the
/// pipeline.
pub struct LineSource<R> {
    lines: Lines<R>,
    line_no: usize,
    rejected: usize,
}

impl<R: AsyncBufRead + Unpin> LineSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
            rejected: 0,
        }
    }

    /// Next event; `None` at end of input
    pub async fn next_event(&mut self) -> Option<Result<Container, SourceError>> {
        loop {
            let line = match self.lines.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => return None,
                Err(e) => return Some(Err(SourceError::Io(e))),
            };
            self.line_no += 1;

            if line.trim().is_empty() {
                continue;
            }

            let event = parse_event(self.line_no, &line);
            if let Err(e) = &event {
                self.rejected += 1;
                warn!(error = %e, "rejected input");
            }
            return Some(event);
        }
    }

    /// Lines read so far, blank ones included
    pub fn lines_read(&self) -> usize {
        self.line_no
    }

    pub fn rejected(&self) -> usize {
        self.rejected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_event() {
        assert_eq!(parse_event(1, " 4.5 ").unwrap(), Container::scalar(4.5));
        assert_eq!(parse_event(1, "-3").unwrap(), Container::scalar(-3.0));
        assert!(matches!(
            parse_event(7, "abc"),
            Err(SourceError::Malformed { line: 7, .. })
        ));
        assert!(parse_event(1, "NaN").is_err());
        assert!(parse_event(1, "inf").is_err());
    }

    #[tokio::test]
    async fn test_reads_through_mock_reader() {
        let reader = tokio_test::io::Builder::new()
            .read(b"1\n\nabc\n")
            .read(b"2.5\n")
            .build();
        let mut source = LineSource::new(tokio::io::BufReader::new(reader));

        assert_eq!(source.next_event().await.unwrap().unwrap(), Container::scalar(1.0));
        assert!(source.next_event().await.unwrap().is_err());
        assert_eq!(source.next_event().await.unwrap().unwrap(), Container::scalar(2.5));
        assert!(source.next_event().await.is_none());

        assert_eq!(source.lines_read(), 4);
        assert_eq!(source.rejected(), 1);
    }
}
