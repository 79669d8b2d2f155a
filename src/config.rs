use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::store::ui::Theme;

pub const DEFAULT_CONFIG_PATH: &str = "config/client.json";
pub const DEFAULT_SESSION_PATH: &str = "data/session.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where the auth token survives restarts. `None` keeps sessions in memory.
    pub session_file: Option<String>,
    /// Capacity of the store <-> worker channels.
    pub channel_capacity: usize,
    pub latency: LatencyConfig,
    pub ui: UiConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            session_file: Some(DEFAULT_SESSION_PATH.to_string()),
            channel_capacity: 100,
            latency: LatencyConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

/// Simulated round-trip time of each mocked service call, in milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LatencyConfig {
    pub login_ms: u64,
    pub signup_ms: u64,
    pub verify_token_ms: u64,
    pub conversations_ms: u64,
    pub messages_ms: u64,
    pub send_message_ms: u64,
    pub create_conversation_ms: u64,
    pub notifications_ms: u64,
    pub mark_read_ms: u64,
    pub mark_all_read_ms: u64,
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            login_ms: 1000,
            signup_ms: 1000,
            verify_token_ms: 500,
            conversations_ms: 500,
            messages_ms: 300,
            send_message_ms: 200,
            create_conversation_ms: 300,
            notifications_ms: 300,
            mark_read_ms: 200,
            mark_all_read_ms: 300,
        }
    }
}

impl LatencyConfig {
    /// Every call settles immediately. Used by tests and `--no-latency`.
    pub fn instant() -> Self {
        Self {
            login_ms: 0,
            signup_ms: 0,
            verify_token_ms: 0,
            conversations_ms: 0,
            messages_ms: 0,
            send_message_ms: 0,
            create_conversation_ms: 0,
            notifications_ms: 0,
            mark_read_ms: 0,
            mark_all_read_ms: 0,
        }
    }
}

pub(crate) fn millis(ms: u64) -> Duration {
    Duration::from_millis(ms)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub credits: i64,
    pub theme: Theme,
    pub sidebar_collapsed: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            credits: 1250,
            theme: Theme::Light,
            sidebar_collapsed: false,
        }
    }
}

pub fn load_config(path: &str) -> AppConfig {
    let path = Path::new(path);
    match fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str::<AppConfig>(&content) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("Failed to parse config file {}: {err}", path.display());
                AppConfig::default()
            }
        },
        Err(err) => {
            log::info!(
                "Config file {} not found ({err}); using defaults",
                path.display()
            );
            AppConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> String {
        std::env::temp_dir()
            .join(format!("chat-client-{}-{name}", uuid::Uuid::new_v4()))
            .to_string_lossy()
            .into_owned()
    }

    #[test]
    fn missing_file_yields_defaults() {
        let config = load_config(&scratch_path("missing.json"));
        assert_eq!(config.channel_capacity, 100);
        assert_eq!(config.ui.credits, 1250);
        assert_eq!(config.latency.login_ms, 1000);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let path = scratch_path("partial.json");
        fs::write(&path, r#"{"latency":{"login_ms":5},"ui":{"theme":"dark"}}"#).unwrap();

        let config = load_config(&path);
        assert_eq!(config.latency.login_ms, 5);
        assert_eq!(config.latency.messages_ms, 300);
        assert_eq!(config.ui.theme, Theme::Dark);
        assert_eq!(config.ui.credits, 1250);

        fs::remove_file(&path).ok();
    }

    #[test]
    fn invalid_file_yields_defaults() {
        let path = scratch_path("invalid.json");
        fs::write(&path, "not json").unwrap();
        let config = load_config(&path);
        assert_eq!(config.session_file.as_deref(), Some(DEFAULT_SESSION_PATH));
        fs::remove_file(&path).ok();
    }

    #[test]
    fn serialized_config_loads_back() {
        let path = scratch_path("written.json");
        let mut config = AppConfig::default();
        config.session_file = None;
        config.channel_capacity = 8;
        fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();

        let loaded = load_config(&path);
        assert_eq!(loaded.session_file, None);
        assert_eq!(loaded.channel_capacity, 8);

        fs::remove_file(&path).ok();
    }
}
