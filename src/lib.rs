//! surveydb library root.
//! Exposes the database gateway and statement executor, the CLI parser,
//! and the high-level run() function.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;
use tracing_subscriber::EnvFilter;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli, cfg),
        Commands::Exec { .. } | Commands::Update { .. } => {
            cli::commands::exec::handle(&cli.command, cfg)
        }
        Commands::Query { .. } => cli::commands::query::handle(&cli.command, cfg),
        Commands::Promoters { .. } => cli::commands::promoters::handle(&cli.command, cfg),
        Commands::Start { .. } => cli::commands::start::handle(&cli.command, cfg),
        Commands::Config { .. } => cli::commands::config::handle(cli, cfg),
        Commands::Db { .. } => cli::commands::db::handle(&cli.command, cfg),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),
    }
}

/// Diagnostics go to stderr; RUST_LOG wins over -v.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "surveydb=info",
        _ => "surveydb=debug",
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let mut cfg = Config::load_from(&cli.config_path())?;

    if let Some(dir) = &cli.db_dir {
        cfg.database_dir = dir.clone();
    }

    tracing::debug!(database_dir = %cfg.database_dir, "configuration loaded");

    dispatch(&cli, &cfg)
}
