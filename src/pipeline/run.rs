use futures_util::StreamExt;
use std::future::Future;
use std::io::{Read, Write};

use super::{Header, PipelineError, Row, RowPipeline};
use crate::translation::{Backend, CellTranslator};

/// Totals reported at the end of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Data rows written, header excluded.
    pub rows: usize,
    pub backend_calls: usize,
    pub cache_hits: usize,
    pub failures: usize,
}

/// Drives a [`RowPipeline`] from a CSV reader into a CSV writer.
pub struct CsvRun<'a, B> {
    translator: &'a CellTranslator<B>,
    rows_in_flight: usize,
    on_row: Option<Box<dyn Fn(usize) + 'a>>,
}

impl<'a, B: Backend> CsvRun<'a, B> {
    pub fn new(translator: &'a CellTranslator<B>) -> Self {
        Self {
            translator,
            rows_in_flight: 1,
            on_row: None,
        }
    }

    #[must_use]
    pub fn with_rows_in_flight(mut self, rows: usize) -> Self {
        self.rows_in_flight = rows.max(1);
        self
    }

    /// Registers a callback invoked with the row number after each row is written.
    #[must_use]
    pub fn on_row(mut self, callback: impl Fn(usize) + 'a) -> Self {
        self.on_row = Some(Box::new(callback));
        self
    }

    /// Translates `input` into `output`.
    ///
    /// Stops at the first structural error. When `shutdown` resolves, no
    /// further rows are started; rows already written are flushed and
    /// [`PipelineError::Interrupted`] is returned.
    pub async fn execute<R, W, F>(
        &self,
        input: R,
        output: W,
        shutdown: F,
    ) -> Result<RunSummary, PipelineError>
    where
        R: Read,
        W: Write,
        F: Future<Output = ()>,
    {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(input);
        let names = reader
            .headers()
            .map_err(|e| PipelineError::Header(e.to_string()))?
            .iter()
            .map(str::to_string)
            .collect();
        let header = Header::new(names)?;

        // Output always uses `\n` and quotes only where needed, whatever the
        // input used.
        let mut writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(output);
        writer
            .write_record(header.names())
            .map_err(|source| PipelineError::Write { row: 0, source })?;

        let rows = reader.into_records().enumerate().map(|(index, record)| {
            record
                .map(|r| r.iter().map(str::to_string).collect::<Row>())
                .map_err(|source| PipelineError::Read {
                    row: index + 1,
                    source,
                })
        });

        let pipeline =
            RowPipeline::new(self.translator, &header).with_rows_in_flight(self.rows_in_flight);
        let mut translated = std::pin::pin!(pipeline.process(rows));
        let mut shutdown = std::pin::pin!(shutdown);
        let mut written = 0;

        let outcome = loop {
            tokio::select! {
                biased;
                () = &mut shutdown => {
                    tracing::info!(rows_written = written, "interrupted");
                    break Err(PipelineError::Interrupted { rows_written: written });
                }
                next = translated.next() => match next {
                    Some(Ok(row)) => {
                        writer
                            .write_record(&row)
                            .map_err(|source| PipelineError::Write { row: written + 1, source })?;
                        written += 1;
                        if let Some(callback) = &self.on_row {
                            callback(written);
                        }
                    }
                    Some(Err(e)) => break Err(e),
                    None => break Ok(()),
                },
            }
        };

        writer.flush()?;
        outcome?;

        let stats = self.translator.stats();
        Ok(RunSummary {
            rows: written,
            backend_calls: stats.backend_calls,
            cache_hits: stats.cache_hits,
            failures: stats.failures,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::translation::{BackendError, ColumnPolicy};
    use async_trait::async_trait;
    use std::cell::RefCell;
    use std::time::Duration;

    struct Uppercase;

    #[async_trait]
    impl Backend for Uppercase {
        async fn translate(&self, text: &str, _target: &str) -> Result<Vec<String>, BackendError> {
            Ok(vec![text.to_uppercase()])
        }
    }

    struct Stalled;

    #[async_trait]
    impl Backend for Stalled {
        async fn translate(&self, text: &str, _target: &str) -> Result<Vec<String>, BackendError> {
            if text == "stall" {
                tokio::time::sleep(Duration::from_secs(60)).await;
            }
            Ok(vec![text.to_uppercase()])
        }
    }

    async fn run_to_string<B: Backend>(
        translator: &CellTranslator<B>,
        input: &str,
    ) -> (Result<RunSummary, PipelineError>, String) {
        let mut output = Vec::new();
        let result = CsvRun::new(translator)
            .execute(input.as_bytes(), &mut output, std::future::pending())
            .await;
        (result, String::from_utf8(output).unwrap())
    }

    #[tokio::test]
    async fn test_execute_round_trip() {
        let translator = CellTranslator::new(Uppercase, ColumnPolicy::parse("id"), "en");

        let (result, output) = run_to_string(&translator, "id,city\n1,Paris\n2,Paris\n3,\n").await;
        let summary = result.unwrap();

        assert_eq!(output, "id,city\n1,PARIS\n2,PARIS\n3,\n");
        assert_eq!(summary.rows, 3);
        assert_eq!(summary.backend_calls, 1);
        assert_eq!(summary.cache_hits, 1);
    }

    #[tokio::test]
    async fn test_execute_keeps_quoted_fields() {
        let translator = CellTranslator::new(Uppercase, ColumnPolicy::default(), "en");

        let (result, output) =
            run_to_string(&translator, "note\n\"a, b\"\n\"line one\nline two\"\n").await;

        assert_eq!(result.unwrap().rows, 2);
        assert_eq!(output, "note\n\"A, B\"\n\"LINE ONE\nLINE TWO\"\n");
    }

    #[tokio::test]
    async fn test_execute_normalises_line_endings_and_quoting() {
        let translator = CellTranslator::new(Uppercase, ColumnPolicy::parse("id,city"), "en");

        let (result, output) =
            run_to_string(&translator, "id,city\r\n1,\"Paris\"\r\n2,\"a, b\"\r\n").await;

        assert_eq!(result.unwrap().rows, 2);
        assert_eq!(output, "id,city\n1,Paris\n2,\"a, b\"\n");
    }

    #[tokio::test]
    async fn test_execute_header_only() {
        let translator = CellTranslator::new(Uppercase, ColumnPolicy::default(), "en");

        let (result, output) = run_to_string(&translator, "id,city\n").await;

        assert_eq!(result.unwrap().rows, 0);
        assert_eq!(output, "id,city\n");
    }

    #[tokio::test]
    async fn test_execute_empty_input_is_malformed_header() {
        let translator = CellTranslator::new(Uppercase, ColumnPolicy::default(), "en");

        let (result, _) = run_to_string(&translator, "").await;

        assert!(matches!(result, Err(PipelineError::Header(_))));
    }

    #[tokio::test]
    async fn test_execute_stops_before_malformed_row() {
        let translator = CellTranslator::new(Uppercase, ColumnPolicy::default(), "en");

        let (result, output) =
            run_to_string(&translator, "a,b\nx,y\nonly\np,q\n").await;

        let err = result.unwrap_err();
        assert_eq!(err.row(), Some(2));
        assert_eq!(output, "a,b\nX,Y\n");
    }

    #[tokio::test]
    async fn test_execute_reports_progress() {
        let translator = CellTranslator::new(Uppercase, ColumnPolicy::default(), "en");
        let seen = RefCell::new(Vec::new());
        let mut output = Vec::new();

        CsvRun::new(&translator)
            .on_row(|n| seen.borrow_mut().push(n))
            .execute("w\na\nb\nc\n".as_bytes(), &mut output, std::future::pending())
            .await
            .unwrap();

        assert_eq!(seen.into_inner(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_shutdown_flushes_written_rows() {
        let translator = CellTranslator::new(Stalled, ColumnPolicy::default(), "en");
        let mut output = Vec::new();

        let result = CsvRun::new(&translator)
            .execute(
                "w\nfirst\nstall\nlast\n".as_bytes(),
                &mut output,
                tokio::time::sleep(Duration::from_millis(50)),
            )
            .await;

        assert!(matches!(
            result,
            Err(PipelineError::Interrupted { rows_written: 1 })
        ));
        assert_eq!(String::from_utf8(output).unwrap(), "w\nFIRST\n");
    }
}
