//! # csvtl - CSV Translation CLI
//!
//! `csvtl` translates the text cells of a CSV file into a target language
//! using Google Cloud Translation, leaving chosen columns untouched, and writes
//! a file with the same header, row count and row order.
//!
//! ## Features
//!
//! - **Column exclusion**: keep ids, phone numbers or codes verbatim
//! - **Caching**: each distinct text is sent to the service once per run
//! - **Streaming**: rows are read, translated and written one at a time
//! - **Failure tolerance**: a failed cell keeps its original text and is logged
//!
//! ## Quick Start
//!
//! ```bash
//! export GOOGLE_CLOUD_PROJECT=my-project
//! export GOOGLE_OAUTH_ACCESS_TOKEN="$(gcloud auth print-access-token)"
//!
//! # Writes shops_translated.csv, leaving the id and tel columns alone
//! csvtl shops.csv id,tel
//!
//! # Translate to Japanese with more requests in flight
//! csvtl --to ja -j 8 shops.csv id
//! ```
//!
//! ## Configuration
//!
//! Settings are read from `~/.config/csvtl/config.toml`:
//!
//! ```toml
//! [csvtl]
//! to = "en"
//! concurrency = 4
//! timeout_secs = 30
//!
//! [google]
//! project = "my-project"
//! location = "global"
//! access_token_env = "GOOGLE_OAUTH_ACCESS_TOKEN"
//! ```

/// Command-line interface definitions and handlers.
pub mod cli;

/// Configuration file management and run settings.
pub mod config;

/// Input/output file helpers.
pub mod fs;

/// Global output configuration (quiet mode, colors, logging).
pub mod output;

/// XDG-style path utilities for configuration.
pub mod paths;

/// Row pipeline and CSV run driver.
pub mod pipeline;

/// Backend contract, cache, column policy and cell translator.
pub mod translation;

/// Terminal UI components (progress, colors).
pub mod ui;
