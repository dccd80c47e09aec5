use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{Level, debug};
use tracing_subscriber::{EnvFilter, filter::LevelFilter};

use lectern_cli::{
    CommandContext, ConfigCommands, ContentCommands, CourseCommands, DataCommands, EnrollCommands,
    OutputFormat, SegmentCommands, commands, config_manager::ConfigManager,
};

#[derive(Parser)]
#[command(
    name = "lectern",
    about = "Manage an online course catalog stored in plain text files",
    version,
    author,
    long_about = "A command-line tool for maintaining courses with video, quiz and generic segments, student enrollments and a library of course content. Everything is kept in line-oriented text files."
)]
struct Cli {
    /// Set the logging level (RUST_LOG takes precedence when set)
    #[arg(short, long, value_enum, default_value = "warn")]
    log_level: LogLevel,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "LECTERN_CONFIG")]
    config: Option<PathBuf>,

    /// Directory holding the data files, overriding the configured one
    #[arg(short, long, global = true, env = "LECTERN_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Output format
    #[arg(short = 'o', long, value_enum, global = true, default_value = "text")]
    format: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create, show and list courses
    #[command(subcommand)]
    Course(CourseCommands),

    /// Add segments to courses
    #[command(subcommand)]
    Segment(SegmentCommands),

    /// Manage student enrollments
    #[command(subcommand)]
    Enroll(EnrollCommands),

    /// Manage the content library
    #[command(subcommand)]
    Content(ContentCommands),

    /// Inspect the data files
    #[command(subcommand)]
    Data(DataCommands),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing; logs go to stderr so JSON output stays clean
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::default().add_directive(LevelFilter::from_level(cli.log_level.into()).into())
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mut config_manager = ConfigManager::new(cli.config)?;
    debug!("Using configuration {}", config_manager.config_path().display());

    let config = config_manager.config();
    let ctx = CommandContext::new(
        cli.format,
        config.defaults.color_output && !cli.no_color,
        config.data_paths(cli.data_dir.as_deref()),
    );

    // Handle commands
    match cli.command {
        Commands::Course(cmd) => commands::course::handle(cmd, &ctx)?,
        Commands::Segment(cmd) => commands::segment::handle(cmd, &ctx)?,
        Commands::Enroll(cmd) => commands::enroll::handle(cmd, &ctx)?,
        Commands::Content(cmd) => commands::content::handle(cmd, &ctx)?,
        Commands::Data(cmd) => commands::data::handle(cmd, &ctx)?,
        Commands::Config(cmd) => commands::config::handle(cmd, &mut config_manager, &ctx)?,
    }

    Ok(())
}
