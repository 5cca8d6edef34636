//! Global output configuration and utilities.
//!
//! ## Design Principles
//!
//! - Translated data goes to the output file, never to the terminal
//! - Status messages, progress, and diagnostics go to stderr
//! - Quiet mode suppresses status and progress, not warnings
//! - Colors can be disabled via flag or NO_COLOR environment variable

use std::sync::OnceLock;
use tracing_subscriber::EnvFilter;

/// Global output configuration.
static OUTPUT_CONFIG: OnceLock<OutputConfig> = OnceLock::new();

/// Output configuration settings.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Suppress non-essential output.
    pub quiet: bool,
    /// Disable colored output.
    pub no_color: bool,
    /// Log informational diagnostics, not just warnings.
    pub verbose: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            quiet: false,
            // Check NO_COLOR environment variable (https://no-color.org/)
            no_color: std::env::var("NO_COLOR").is_ok(),
            verbose: false,
        }
    }
}

/// Initialize the global output configuration and the tracing subscriber.
///
/// This should be called once at startup with the CLI flags.
/// If called multiple times, subsequent calls are ignored.
pub fn init(config: OutputConfig) {
    let level = if config.verbose { "info" } else { "warn" };
    let ansi = !config.no_color;

    if OUTPUT_CONFIG.set(config).is_err() {
        return;
    }

    // RUST_LOG wins over the verbosity flag when set.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("csvtl_cli={level}")));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(ansi)
        .with_target(false)
        .try_init();
}

/// Get the current output configuration.
pub fn config() -> &'static OutputConfig {
    OUTPUT_CONFIG.get_or_init(OutputConfig::default)
}

/// Check if quiet mode is enabled.
pub fn is_quiet() -> bool {
    config().quiet
}

/// Check if colors are disabled.
pub fn is_no_color() -> bool {
    config().no_color
}

/// Print a status message to stderr (respects quiet mode).
///
/// Use this for progress indicators, informational messages, etc.
#[macro_export]
macro_rules! status {
    ($($arg:tt)*) => {
        if !$crate::output::is_quiet() {
            eprintln!($($arg)*);
        }
    };
}
