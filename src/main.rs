// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;

use storyboard::app_config::{self, Config};
use storyboard::app_controller::Controller;
use storyboard::document::DocumentFormat;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

/// CLI Wrapper for DocumentFormat to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliFormat {
    Html,
    Json,
    Text,
}

impl From<CliFormat> for DocumentFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Html => DocumentFormat::Html,
            CliFormat::Json => DocumentFormat::Json,
            CliFormat::Text => DocumentFormat::Text,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate shell completions for storyboard
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Storyboard - visual answerline formatter
///
/// Reads a quiz-tournament answerline database and writes a styled visual
/// answerlines document, optionally merging placeholder questions into
/// written packets.
#[derive(Parser, Debug)]
#[command(name = "storyboard")]
#[command(version)]
#[command(about = "Format visual quiz answerlines and hybrid packets")]
#[command(long_about = "Storyboard formats the answerlines of a visual quiz set and, for hybrid sets, appends
placeholder questions to the written packets.

EXAMPLES:
    storyboard                                  # Run with storyboard.json
    storyboard -d set/Database.csv -n \"Film Set\" # Override database and set name
    storyboard --hybrid --source-dir packets/    # Build hybrid packets too
    storyboard --split-docs --format json       # One JSON document per packet
    storyboard completions zsh > _storyboard     # Generate zsh completions

CONFIGURATION:
    Configuration is stored in storyboard.json by default. You can specify a
    different file with --config-path. If the file doesn't exist, a default one
    is created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Answerline database CSV
    #[arg(short, long, value_name = "CSV")]
    database: Option<PathBuf>,

    /// Name of the set
    #[arg(short = 'n', long)]
    set_name: Option<String>,

    /// Directory for the answers document(s)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output document format
    #[arg(long, value_enum)]
    format: Option<CliFormat>,

    /// Write one answers document per packet
    #[arg(long)]
    split_docs: bool,

    /// Open the combined answers document when done
    #[arg(long)]
    open: bool,

    /// Build hybrid packets from the written packets
    #[arg(long)]
    hybrid: bool,

    /// Directory holding the written packets
    #[arg(long)]
    source_dir: Option<PathBuf>,

    /// Directory for the hybrid packets
    #[arg(long)]
    dest_dir: Option<PathBuf>,

    /// TMDB API key; enables director lookup
    #[arg(long, env = "TMDB_API_KEY", hide_env_values = true)]
    tmdb_api_key: Option<String>,

    /// Print every answerline as it is formatted
    #[arg(short, long)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "storyboard.json")]
    config_path: PathBuf,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger { level: LevelFilter::Trace }))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color code for level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let _ = writeln!(
                std::io::stderr(),
                "\x1B[{}m{} {:<5} {}\x1B[0m",
                Self::color_for_level(record.level()),
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Info until the config is read; the level is updated below
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Some(Commands::Completions { shell }) = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "storyboard", &mut std::io::stdout());
        return Ok(());
    }

    let verbose = cli.verbose;
    let config = load_config(cli)?;
    log::set_max_level((&config.log_level).into());

    let controller = Controller::with_config(config)?.verbose(verbose);
    controller.run().await?;
    Ok(())
}

/// Read the config file and apply command line overrides
fn load_config(cli: CommandLineOptions) -> Result<Config> {
    let mut config = Config::load_or_create(&cli.config_path)?;

    if let Some(database) = cli.database {
        config.database_path = database;
    }
    if let Some(set_name) = cli.set_name {
        config.set_name = set_name;
    }
    if let Some(output_dir) = cli.output_dir {
        config.output_dir = output_dir;
    }
    if let Some(format) = cli.format {
        config.output_format = format.into();
    }
    if cli.split_docs {
        config.split_docs = true;
    }
    if cli.open {
        config.try_open = true;
    }
    if cli.hybrid {
        config.hybrid.enabled = true;
    }
    if let Some(source_dir) = cli.source_dir {
        config.hybrid.source_dir = Some(source_dir);
    }
    if let Some(dest_dir) = cli.dest_dir {
        config.hybrid.dest_dir = Some(dest_dir);
    }
    if let Some(key) = cli.tmdb_api_key {
        config.metadata.api_key = key;
        config.metadata.enabled = true;
    }
    if let Some(log_level) = cli.log_level {
        config.log_level = log_level.into();
    }

    config.validate().context("Configuration validation failed")?;
    Ok(config)
}
