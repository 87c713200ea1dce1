//! User interface components for the render graph viewer
//!
//! This crate provides the egui shell around the views: header with the
//! artifact selector, footer tabs, error banners and the theme.

pub mod shell;
pub mod theme;

use std::time::Instant;

pub use shell::{footer_tabs, header, header_title, show_error_messages, show_welcome_screen, HeaderAction};
pub use theme::{apply_theme, Theme};

/// UI state that persists across frames
#[derive(Default)]
pub struct UiState {
    /// Selected footer tab
    pub footer_tab: FooterTab,

    /// Error messages to display
    pub error_messages: Vec<ErrorMessage>,
}

impl UiState {
    /// Queue an error banner
    pub fn push_error(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.error_messages.push(ErrorMessage {
            title: title.into(),
            message: message.into(),
            timestamp: Instant::now(),
        });
    }
}

/// Error message to display
pub struct ErrorMessage {
    pub title: String,
    pub message: String,
    pub timestamp: Instant,
}

/// Footer tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FooterTab {
    #[default]
    Output,
    Nodes,
    Resources,
}

impl FooterTab {
    pub const ALL: [FooterTab; 3] = [FooterTab::Output, FooterTab::Nodes, FooterTab::Resources];

    pub fn label(&self) -> &'static str {
        match self {
            FooterTab::Output => "Output Log",
            FooterTab::Nodes => "Nodes",
            FooterTab::Resources => "Generated Resources",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_footer_defaults_to_output_log() {
        let state = UiState::default();
        assert_eq!(state.footer_tab, FooterTab::Output);
        assert_eq!(state.footer_tab.label(), "Output Log");
    }

    #[test]
    fn test_push_error() {
        let mut state = UiState::default();
        state.push_error("Rejected artifact", "bad.json: expected value");
        assert_eq!(state.error_messages.len(), 1);
        assert_eq!(state.error_messages[0].title, "Rejected artifact");
    }
}
