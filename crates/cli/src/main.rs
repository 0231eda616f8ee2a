//! Citelog CLI
//!
//! Command-line host for citation assembly: assembles records from raw
//! generator output and replays scripted chat sessions.

mod commands;

use clap::{Parser, Subcommand};
use commands::{AssembleCommand, ModesCommand, SessionCommand};
use citelog_core::{config::AppConfig, logging, AppResult};
use std::path::PathBuf;

/// Citelog - citation records and conversation logs for RAG answers
#[derive(Parser, Debug)]
#[command(name = "citelog")]
#[command(about = "Citation records and conversation logs for RAG answers", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to workspace directory (default: current directory)
    #[arg(short, long, global = true, env = "CITELOG_WORKSPACE")]
    workspace: Option<PathBuf>,

    /// Path to config file
    #[arg(short, long, global = true, env = "CITELOG_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output (NO_COLOR accepts any non-false value)
    #[arg(
        long,
        global = true,
        env = "NO_COLOR",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    no_color: bool,

    /// Response mode (search, inquiry)
    #[arg(short, long, global = true, env = "CITELOG_MODE")]
    mode: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Assemble one raw generator result into a content record
    Assemble(AssembleCommand),

    /// Run a chat session against a scripted collaborator
    Session(SessionCommand),

    /// List the available response modes
    Modes(ModesCommand),
}

fn main() -> AppResult<()> {
    // Parse command-line arguments first (needed for logging config)
    let cli = Cli::parse();

    let config = AppConfig::load_from(cli.workspace, cli.config)?.with_overrides(
        cli.mode,
        cli.log_level,
        cli.verbose,
        cli.no_color,
    );

    logging::init_logging(config.log_level.as_deref(), config.no_color)?;

    tracing::info!("Citelog starting");
    tracing::debug!("Workspace: {:?}", config.workspace);
    tracing::debug!("Mode: {}", config.mode);

    config.validate()?;

    let command_name = match &cli.command {
        Commands::Assemble(_) => "assemble",
        Commands::Session(_) => "session",
        Commands::Modes(_) => "modes",
    };
    let _span = tracing::info_span!("command", name = command_name).entered();

    let result = match cli.command {
        Commands::Assemble(cmd) => cmd.execute(&config),
        Commands::Session(cmd) => cmd.execute(&config),
        Commands::Modes(cmd) => cmd.execute(),
    };

    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    result
}
