//! Command-line interface definitions and handlers.

/// CLI argument parsing with clap.
pub mod args;

/// Subcommand implementations.
pub mod commands;

pub use args::{Args, Command};

use crate::pipeline::PipelineError;

/// Exit status for a run stopped by Ctrl-C (128 + SIGINT).
pub const EXIT_INTERRUPTED: i32 = 130;

/// Maps a failed run to a process exit code.
///
/// Structural input problems are data errors, file problems are I/O errors,
/// and anything raised before the input is touched is a configuration error.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<PipelineError>() {
        Some(PipelineError::Interrupted { .. }) => EXIT_INTERRUPTED,
        Some(PipelineError::Io(_) | PipelineError::Write { .. }) => exitcode::IOERR,
        Some(_) => exitcode::DATAERR,
        None if err.downcast_ref::<std::io::Error>().is_some() => exitcode::IOERR,
        None => exitcode::CONFIG,
    }
}
