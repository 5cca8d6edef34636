//! Streaming row transformation over a fixed header.
//!
//! Rows are pulled one at a time from the input, every cell goes through the
//! [`CellTranslator`](crate::translation::CellTranslator), and output rows are
//! emitted in input order. Memory use is bounded by the rows in flight plus
//! the translation cache.

mod rows;
mod run;

use thiserror::Error;

pub use rows::{Header, Row, RowPipeline};
pub use run::{CsvRun, RunSummary};

/// Structural failures that abort a run.
///
/// Backend failures are not here: they are recovered per cell.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("malformed header: {0}")]
    Header(String),

    #[error("failed to read row {row}: {source}")]
    Read {
        row: usize,
        #[source]
        source: csv::Error,
    },

    #[error("row {row} has {found} fields, expected {expected}")]
    RowShape {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("failed to write row {row}: {source}")]
    Write {
        row: usize,
        #[source]
        source: csv::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("interrupted after writing {rows_written} rows")]
    Interrupted { rows_written: usize },
}

impl PipelineError {
    /// The 1-based data row the error refers to, if any.
    pub const fn row(&self) -> Option<usize> {
        match self {
            Self::Read { row, .. } | Self::RowShape { row, .. } | Self::Write { row, .. } => {
                Some(*row)
            }
            Self::Header(_) | Self::Io(_) | Self::Interrupted { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_shape_message_names_row() {
        let err = PipelineError::RowShape {
            row: 7,
            expected: 3,
            found: 2,
        };
        assert_eq!(err.to_string(), "row 7 has 2 fields, expected 3");
        assert_eq!(err.row(), Some(7));
    }

    #[test]
    fn test_interrupted_has_no_row() {
        let err = PipelineError::Interrupted { rows_written: 12 };
        assert!(err.row().is_none());
        assert!(err.to_string().contains("12 rows"));
    }
}
