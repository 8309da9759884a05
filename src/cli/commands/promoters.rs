use crate::cli::commands::open_ready;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::promoters::PromoterLogic;
use crate::errors::AppResult;
use crate::export::{self, OutputFormat};
use crate::db::gateway::Session;
use crate::ui::messages::{success, warning};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Promoters {
        add,
        email,
        del,
        format,
    } = cmd
    {
        let session = open_ready(cfg)?;

        if let Some(name) = add {
            let id = PromoterLogic::add(&session, name, email.as_deref().unwrap_or_default())?;
            success(format!("Promoter '{}' added with id {id}.", name.trim()));
        } else if let Some(id) = del {
            if PromoterLogic::remove(&session, *id)? {
                success(format!("Promoter {id} deleted."));
            } else {
                warning(format!("No promoter with id {id}."));
            }
        } else {
            print_promoters(&session, *format)?;
        }

        session.close()?;
    }

    Ok(())
}

pub(crate) fn print_promoters(session: &Session, format: OutputFormat) -> AppResult<()> {
    let rows = PromoterLogic::list_rows(session)?;
    if rows.is_empty() && format == OutputFormat::Table {
        println!("No promoters yet. Add one with `surveydb promoters --add <NAME>`.");
        return Ok(());
    }
    print!("{}", export::render(&rows, format)?);
    Ok(())
}
