use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::gateway::connect;
use crate::db::stats;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, RED, RESET};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Db { info, check } = cmd {
        let session = connect(cfg)?;

        if *info {
            stats::print_db_info(&session, &cfg.database_file()?)?;
        }

        if *check {
            println!("{}▶ Running integrity check…{}", CYAN, RESET);

            let integrity = stats::integrity_check(&session)?;
            if integrity == "ok" {
                println!("{}✔ Integrity check passed.{}\n", GREEN, RESET);
            } else {
                println!("{}✘ Integrity check failed:{} {}\n", RED, RESET, integrity);
            }
        }

        session.close()?;
    }

    Ok(())
}
