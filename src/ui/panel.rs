//! The start panel: a list of labelled buttons, each wired to a callback on
//! a [`PanelManager`]. Only the model lives here; drawing is up to the
//! front-end.

use crate::errors::{AppError, AppResult};
use std::fmt;

/// Screens a panel can ask the front-end to show.
pub trait PanelManager {
    fn show_promoter_list(&mut self) -> AppResult<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelAction {
    ShowPromoters,
}

impl PanelAction {
    fn dispatch(self, manager: &mut dyn PanelManager) -> AppResult<()> {
        match self {
            PanelAction::ShowPromoters => manager.show_promoter_list(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Button {
    pub label: &'static str,
    pub action: PanelAction,
}

pub struct StartPanel {
    buttons: Vec<Button>,
}

impl Default for StartPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl StartPanel {
    pub fn new() -> Self {
        Self {
            buttons: vec![Button {
                label: "Promoters",
                action: PanelAction::ShowPromoters,
            }],
        }
    }

    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    /// Press the button labelled `label` (case-insensitive).
    pub fn press(&self, label: &str, manager: &mut dyn PanelManager) -> AppResult<()> {
        let button = self
            .buttons
            .iter()
            .find(|b| b.label.eq_ignore_ascii_case(label.trim()))
            .ok_or_else(|| AppError::UnknownAction(label.to_string()))?;

        tracing::debug!(button = button.label, "panel button pressed");
        button.action.dispatch(manager)
    }
}

impl fmt::Display for StartPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<String> = self.buttons.iter().map(|b| format!("[ {} ]", b.label)).collect();
        write!(f, "{}", labels.join("  "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        promoter_list_shown: usize,
    }

    impl PanelManager for Recorder {
        fn show_promoter_list(&mut self) -> AppResult<()> {
            self.promoter_list_shown += 1;
            Ok(())
        }
    }

    #[test]
    fn promoters_button_invokes_callback() {
        let panel = StartPanel::new();
        let mut rec = Recorder::default();

        panel.press("Promoters", &mut rec).unwrap();
        panel.press("promoters", &mut rec).unwrap();

        assert_eq!(rec.promoter_list_shown, 2);
    }

    #[test]
    fn unknown_button_is_an_error() {
        let panel = StartPanel::new();
        let mut rec = Recorder::default();

        let err = panel.press("Surveys", &mut rec).unwrap_err();
        assert!(matches!(err, AppError::UnknownAction(ref l) if l == "Surveys"));
        assert_eq!(rec.promoter_list_shown, 0);
    }

    #[test]
    fn renders_button_row() {
        assert_eq!(StartPanel::new().to_string(), "[ Promoters ]");
    }
}
