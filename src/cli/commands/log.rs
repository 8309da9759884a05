use crate::cli::commands::open_ready;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::log::LogLogic;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if matches!(cmd, Commands::Log { print: true }) {
        let session = open_ready(cfg)?;
        LogLogic::print_log(&session)?;
        session.close()?;
    }

    Ok(())
}
