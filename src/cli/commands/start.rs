use crate::cli::commands::open_ready;
use crate::cli::commands::promoters::print_promoters;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::export::OutputFormat;
use crate::ui::messages::{header, info};
use crate::ui::panel::{PanelManager, StartPanel};

/// Shows the screens requested by the start panel on the terminal.
struct TerminalPanelManager<'a> {
    cfg: &'a Config,
}

impl PanelManager for TerminalPanelManager<'_> {
    fn show_promoter_list(&mut self) -> AppResult<()> {
        header("Promoters");
        let session = open_ready(self.cfg)?;
        print_promoters(&session, OutputFormat::Table)?;
        session.close()
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Start { press } = cmd {
        let panel = StartPanel::new();

        header("surveydb");
        println!("{panel}\n");

        match press {
            Some(label) => {
                let mut manager = TerminalPanelManager { cfg };
                panel.press(label, &mut manager)?;
            }
            None => info("Press a button with `surveydb start --press <LABEL>`."),
        }
    }

    Ok(())
}
