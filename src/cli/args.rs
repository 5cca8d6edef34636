use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "csvtl")]
#[command(about = "Translate the text cells of a CSV file, leaving chosen columns untouched")]
#[command(version)]
pub struct Args {
    /// CSV file to translate (output goes to <name>_translated.<ext>)
    pub file: Option<PathBuf>,

    /// Comma-separated column names to leave untranslated (e.g. "id,tel,postal")
    pub exclude: Option<String>,

    /// Target language code (e.g., en, ja, zh-TW)
    #[arg(short = 't', long = "to")]
    pub to: Option<String>,

    /// Write to this path instead of the derived one
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Maximum translation requests in flight
    #[arg(short = 'j', long)]
    pub concurrency: Option<usize>,

    /// Per-request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Google Cloud project id (overrides GOOGLE_CLOUD_PROJECT)
    #[arg(long)]
    pub project: Option<String>,

    /// Google Cloud location
    #[arg(long)]
    pub location: Option<String>,

    /// Config file to use instead of ~/.config/csvtl/config.toml
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Suppress progress and status output
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Log informational diagnostics
    #[arg(short = 'v', long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List supported target language codes
    Languages,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_file_and_exclude() {
        let args = Args::try_parse_from(["csvtl", "input.csv", "id,tel,postal"]).unwrap();
        assert_eq!(args.file, Some(PathBuf::from("input.csv")));
        assert_eq!(args.exclude.as_deref(), Some("id,tel,postal"));
        assert!(args.command.is_none());
    }

    #[test]
    fn test_parse_options() {
        let args = Args::try_parse_from([
            "csvtl", "-t", "ja", "-j", "8", "--timeout", "5", "-o", "out.csv", "in.csv",
        ])
        .unwrap();
        assert_eq!(args.to.as_deref(), Some("ja"));
        assert_eq!(args.concurrency, Some(8));
        assert_eq!(args.timeout, Some(5));
        assert_eq!(args.output, Some(PathBuf::from("out.csv")));
        assert!(args.exclude.is_none());
    }

    #[test]
    fn test_parse_languages_subcommand() {
        let args = Args::try_parse_from(["csvtl", "languages"]).unwrap();
        assert!(matches!(args.command, Some(Command::Languages)));
    }
}
