use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::executor::run_query;
use crate::errors::AppResult;
use crate::export;
use crate::utils::path::expand_tilde;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Query { sql, format, file } = cmd {
        let rows = run_query(cfg, sql)?;

        match file {
            Some(path) => export::write_to(&rows, *format, &expand_tilde(path))?,
            None => print!("{}", export::render(&rows, *format)?),
        }
    }

    Ok(())
}
