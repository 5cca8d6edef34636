use anyhow::{Context, Result, bail};
use std::path::PathBuf;

use crate::config::{ConfigManager, ResolveOptions, resolve_config};
use crate::fs::{create_output, derive_output_path, open_input};
use crate::pipeline::{CsvRun, PipelineError};
use crate::status;
use crate::translation::{CellTranslator, ColumnPolicy, GoogleTranslateClient};
use crate::ui::{RowProgress, Style};

pub struct TranslateOptions {
    pub file: PathBuf,
    pub exclude: Option<String>,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub resolve: ResolveOptions,
}

pub async fn run_translate(options: TranslateOptions) -> Result<()> {
    let manager = match &options.config {
        Some(path) => ConfigManager::at(path),
        None => ConfigManager::new()?,
    };
    let config_file = manager.load_or_default()?;

    // Everything that can fail on configuration fails here, before any file is touched.
    let config = resolve_config(&options.resolve, &config_file)?;

    let input_path = options.file;
    let output_path = options
        .output
        .unwrap_or_else(|| derive_output_path(&input_path));
    if output_path == input_path {
        bail!(
            "Output path is the same as the input: {}",
            input_path.display()
        );
    }

    let policy = ColumnPolicy::parse(options.exclude.as_deref().unwrap_or_default());
    tracing::info!(
        target_language = %config.target_language,
        excluded_columns = policy.len(),
        concurrency = config.concurrency,
        "starting translation"
    );

    let input = open_input(&input_path)?;
    let output = create_output(&output_path)?;

    let client = GoogleTranslateClient::new(
        config.endpoint,
        config.project,
        config.location,
        config.access_token,
    );
    let translator = CellTranslator::new(client, policy, config.target_language)
        .with_concurrency(config.concurrency)
        .with_timeout(config.timeout);

    let progress = RowProgress::new();
    let result = CsvRun::new(&translator)
        .with_rows_in_flight(config.concurrency)
        .on_row(|row| progress.row_done(row))
        .execute(input, output, interrupted())
        .await;
    progress.stop();

    let summary = match result {
        Ok(summary) => summary,
        Err(e) => {
            if matches!(e, PipelineError::Interrupted { .. }) {
                status!(
                    "{} {}",
                    Style::warning("Partial output written to"),
                    Style::path(output_path.display())
                );
            }
            return Err(e).with_context(|| format!("Failed to translate {}", input_path.display()));
        }
    };

    status!(
        "{} {}",
        Style::success("Translated CSV written to"),
        Style::path(output_path.display())
    );
    status!(
        "{}",
        Style::secondary(format!(
            "{} rows, {} requests, {} cache hits, {} failed cells",
            summary.rows, summary.backend_calls, summary.cache_hits, summary.failures
        ))
    );
    if summary.failures > 0 {
        status!(
            "{} {} cells kept their original text, see the warnings above",
            Style::warning("Warning:"),
            summary.failures
        );
    }

    Ok(())
}

/// Resolves on Ctrl-C. Never resolves if the signal handler cannot be installed.
async fn interrupted() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}
