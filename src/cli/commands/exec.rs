use crate::cli::commands::{audit, sql_summary};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::executor::{run_statement, run_update};
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

/// Handle `exec` and `update`: one statement, committed in its own session.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    match cmd {
        Commands::Exec { sql } => {
            let produced_rows = run_statement(cfg, sql)?;
            if produced_rows {
                info("Statement returned rows; use `query` to display them.");
            } else {
                success("Statement executed.");
            }
            audit(cfg, "exec", &sql_summary(sql), "Statement executed");
        }
        Commands::Update { sql } => {
            let changed = run_update(cfg, sql)?;
            success(format!("{changed} row(s) affected."));
            audit(
                cfg,
                "update",
                &sql_summary(sql),
                &format!("{changed} row(s) affected"),
            );
        }
        _ => {}
    }

    Ok(())
}
