use futures_util::future::join_all;
use futures_util::stream::{self, Stream, StreamExt};
use tracing::Instrument;

use super::PipelineError;
use crate::translation::{Backend, CellOutcome, CellTranslator};

pub type Row = Vec<String>;

/// Column names, fixed for the whole run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    names: Vec<String>,
}

impl Header {
    pub fn new(names: Vec<String>) -> Result<Self, PipelineError> {
        if names.is_empty() {
            return Err(PipelineError::Header("input has no header row".to_string()));
        }
        Ok(Self { names })
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

pub struct RowPipeline<'a, B> {
    translator: &'a CellTranslator<B>,
    header: &'a Header,
    rows_in_flight: usize,
}

impl<'a, B: Backend> RowPipeline<'a, B> {
    pub const fn new(translator: &'a CellTranslator<B>, header: &'a Header) -> Self {
        Self {
            translator,
            header,
            rows_in_flight: 1,
        }
    }

    /// Lets up to `rows` rows be translated at once. Output order is unaffected.
    #[must_use]
    pub fn with_rows_in_flight(mut self, rows: usize) -> Self {
        self.rows_in_flight = rows.max(1);
        self
    }

    /// Translates one row. `number` is the 1-based data row number.
    pub async fn translate_row(&self, number: usize, row: Row) -> Result<Row, PipelineError> {
        let row = self.check_shape(number, row)?;
        let cells = row
            .iter()
            .zip(self.header.names())
            .map(|(text, column)| self.translator.translate(text, column));

        Ok(join_all(cells)
            .await
            .into_iter()
            .map(CellOutcome::into_text)
            .collect())
    }

    fn check_shape(&self, number: usize, row: Row) -> Result<Row, PipelineError> {
        if row.len() == self.header.len() {
            Ok(row)
        } else {
            Err(PipelineError::RowShape {
                row: number,
                expected: self.header.len(),
                found: row.len(),
            })
        }
    }

    /// Lazily maps input rows to output rows, preserving order.
    ///
    /// Rows are checked against the header before they are started, and the
    /// stream ends with the first error it meets. Rows after a malformed row
    /// are never read or translated.
    pub fn process<I>(&self, rows: I) -> impl Stream<Item = Result<Row, PipelineError>>
    where
        I: IntoIterator<Item = Result<Row, PipelineError>>,
    {
        let mut failed = false;
        let checked = rows.into_iter().enumerate().map_while(move |(index, row)| {
            if failed {
                return None;
            }
            let number = index + 1;
            let row = row.and_then(|row| self.check_shape(number, row));
            failed = row.is_err();
            Some((number, row))
        });

        stream::iter(checked)
            .map(move |(number, row)| {
                // WARN level so per-cell failure warnings carry the row number
                // under the default filter.
                async move { self.translate_row(number, row?).await }
                    .instrument(tracing::warn_span!("row", number))
            })
            .buffered(self.rows_in_flight)
    }
}
