//! Subcommand implementations.

/// CSV translation command handler.
pub mod translate;
