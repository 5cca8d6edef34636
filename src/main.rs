use anyhow::Result;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};

use csvtl_cli::cli::commands::translate;
use csvtl_cli::cli::{Args, Command, exit_code};
use csvtl_cli::config::ResolveOptions;
use csvtl_cli::output::{self, OutputConfig};
use csvtl_cli::translation::{print_languages, validate_language};
use csvtl_cli::ui::Style;

#[tokio::main]
async fn main() {
    let args = Args::parse();

    output::init(OutputConfig {
        quiet: args.quiet,
        no_color: args.no_color || std::env::var("NO_COLOR").is_ok(),
        verbose: args.verbose,
    });

    if let Err(err) = run(args).await {
        eprintln!("{} {err:#}", Style::error("Error:"));
        std::process::exit(exit_code(&err));
    }
}

async fn run(args: Args) -> Result<()> {
    match args.command {
        Some(Command::Languages) => {
            print_languages();
        }
        None => {
            let Some(file) = args.file else {
                Args::command()
                    .error(
                        ErrorKind::MissingRequiredArgument,
                        "the input CSV file is required",
                    )
                    .exit();
            };

            if let Some(ref lang) = args.to {
                validate_language(lang)?;
            }

            let options = translate::TranslateOptions {
                file,
                exclude: args.exclude,
                output: args.output,
                config: args.config,
                resolve: ResolveOptions {
                    to: args.to,
                    project: args.project,
                    location: args.location,
                    concurrency: args.concurrency,
                    timeout_secs: args.timeout,
                },
            };
            translate::run_translate(options).await?;
        }
    }

    Ok(())
}
