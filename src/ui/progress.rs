use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

use crate::output;

/// A terminal spinner showing which row is being processed.
///
/// Hidden in quiet mode. Automatically clears itself when dropped.
pub struct RowProgress {
    progress_bar: ProgressBar,
}

impl RowProgress {
    #[allow(clippy::unwrap_used)]
    pub fn new() -> Self {
        let progress_bar = ProgressBar::new_spinner();
        if output::is_quiet() {
            progress_bar.set_draw_target(ProgressDrawTarget::hidden());
        }
        // unwrap is safe: template string is a compile-time constant
        progress_bar.set_style(
            ProgressStyle::default_spinner()
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
                .template("{spinner} {msg} [{elapsed}]")
                .unwrap(),
        );
        progress_bar.set_message("Reading header...");
        progress_bar.enable_steady_tick(Duration::from_millis(80));

        Self { progress_bar }
    }

    /// Records that `row` has been written.
    pub fn row_done(&self, row: usize) {
        self.progress_bar.set_message(format!("Translated row {row}"));
    }

    /// Stops the spinner and clears it from the terminal.
    pub fn stop(&self) {
        self.progress_bar.finish_and_clear();
    }
}

impl Default for RowProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for RowProgress {
    fn drop(&mut self) {
        self.progress_bar.finish_and_clear();
    }
}
