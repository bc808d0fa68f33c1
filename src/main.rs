use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::error;

use note_summary::cli::{self, OutputFormat, ProcessOptions};
use note_summary::config::AppConfig;
use note_summary::logging::{init_logging, log_system_info, LogSink};
use note_summary::summarizer::SummaryLength;

#[derive(Parser)]
#[command(name = "notesum")]
#[command(author, version, about = "Extract text from PDFs and images, then draft a summary and improvement suggestions")]
struct Cli {
    /// Configuration file (defaults to ./notesum.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level: trace, debug, info, warn or error
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive terminal interface (the default)
    Tui {
        /// File to select on startup
        file: Option<PathBuf>,

        /// Summary length: short, medium or long
        #[arg(short, long)]
        length: Option<SummaryLength>,
    },
    /// Extract, summarize and suggest for one file, then exit
    Process {
        /// PDF or image file
        file: PathBuf,

        /// Summary length: short, medium or long
        #[arg(short, long)]
        length: Option<SummaryLength>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Seed for sentence selection, for repeatable summaries
        #[arg(long)]
        seed: Option<u64>,

        /// Skip the summary
        #[arg(long)]
        no_summary: bool,

        /// Skip the suggestions
        #[arg(long)]
        no_suggestions: bool,
    },
    /// Show which extraction backends are available
    Status,
    /// Write the default configuration file
    InitConfig {
        /// Where to write it
        #[arg(default_value = "notesum.toml")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    let mut config = AppConfig::load(args.config.as_deref())?;
    if let Some(level) = args.log_level {
        config.logging.level = level;
    }

    let command = args.command.unwrap_or(Commands::Tui {
        file: None,
        length: None,
    });

    let sink = match command {
        Commands::Tui { .. } => LogSink::File,
        _ => LogSink::Stderr,
    };
    let _guard = init_logging(&config.logging, sink)?;
    log_system_info();

    let result = match command {
        Commands::Tui { file, length } => cli::tui_command(config, file, length).await,
        Commands::Process {
            file,
            length,
            format,
            seed,
            no_summary,
            no_suggestions,
        } => {
            let options = ProcessOptions {
                length,
                format,
                seed,
                summary: !no_summary,
                suggestions: !no_suggestions,
            };
            cli::process_command(config, file, options).await
        }
        Commands::Status => cli::status_command(config).await,
        Commands::InitConfig { path, force } => cli::init_config_command(path, force),
    };

    if let Err(e) = &result {
        error!("Command failed: {:#}", e);
    }
    result
}
