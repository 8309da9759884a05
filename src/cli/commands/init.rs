use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::gateway::connect;
use crate::db::initialize::init_db;
use crate::db::log;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};

/// Handle the `init` command
///
/// This initializes:
///  - the configuration file (skipped in test mode)
///  - the database directory and file
///  - all pending DB migrations
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let config_path = cli.config_path();
    if !cli.test {
        cfg.save_to(&config_path)?;
    }

    let db_path = cfg.database_file()?;

    println!("⚙️  Initializing surveydb…");
    println!("📄 Config file : {}", config_path.display());
    println!("🗄️  Database   : {}", db_path.display());

    let session = connect(cfg)?;
    let applied = init_db(&session)?;

    if applied.is_empty() {
        success("Schema already up to date.");
    }

    let logged = log::ttlog(
        &session,
        "init",
        "database",
        &format!("Database initialized at {}", db_path.display()),
    )
    .and_then(|_| session.commit());
    if let Err(e) = logged {
        warning(format!("Failed to write internal log: {e}"));
    }

    session.close()?;

    success(format!("Database initialized at {}", db_path.display()));
    Ok(())
}
