use serde::{Deserialize, Serialize};

use crate::config::UiConfig;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Chrome-level preferences. Purely local, no I/O.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiState {
    pub credits: i64,
    pub theme: Theme,
    pub sidebar_collapsed: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self::from_config(&UiConfig::default())
    }
}

impl UiState {
    pub fn from_config(config: &UiConfig) -> Self {
        Self {
            credits: config.credits,
            theme: config.theme,
            sidebar_collapsed: config.sidebar_collapsed,
        }
    }

    pub fn set_credits(&mut self, credits: i64) {
        self.credits = credits;
    }

    pub fn adjust_credits(&mut self, delta: i64) {
        self.credits = self.credits.saturating_add(delta);
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_collapsed = !self.sidebar_collapsed;
    }

    pub fn set_sidebar_collapsed(&mut self, collapsed: bool) {
        self.sidebar_collapsed = collapsed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_config() {
        let state = UiState::default();
        assert_eq!(state.credits, 1250);
        assert_eq!(state.theme, Theme::Light);
        assert!(!state.sidebar_collapsed);
    }

    #[test]
    fn credits_adjust_relative_to_current() {
        let mut state = UiState::default();
        state.adjust_credits(-250);
        assert_eq!(state.credits, 1000);
        state.set_credits(10);
        state.adjust_credits(5);
        assert_eq!(state.credits, 15);
    }

    #[test]
    fn theme_and_sidebar_toggle() {
        let mut state = UiState::default();
        state.toggle_theme();
        assert_eq!(state.theme, Theme::Dark);
        state.set_theme(Theme::Light);
        assert_eq!(state.theme, Theme::Light);

        state.toggle_sidebar();
        assert!(state.sidebar_collapsed);
        state.set_sidebar_collapsed(false);
        assert!(!state.sidebar_collapsed);
    }
}
