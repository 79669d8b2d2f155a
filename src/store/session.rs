use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
struct PersistedSession {
    token: String,
}

/// Keeps the auth token across restarts so the client can verify it instead
/// of asking for credentials again.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    path: Option<PathBuf>,
}

impl SessionStore {
    pub fn new(path: Option<impl Into<PathBuf>>) -> Self {
        Self {
            path: path.map(Into::into),
        }
    }

    /// Nothing is written anywhere.
    pub fn in_memory() -> Self {
        Self { path: None }
    }

    pub fn load(&self) -> Option<String> {
        let path = self.path.as_ref()?;
        match fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str::<PersistedSession>(&content) {
                Ok(session) => Some(session.token),
                Err(err) => {
                    log::warn!("Ignoring unreadable session file {}: {err}", path.display());
                    None
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
            Err(err) => {
                log::warn!("Failed to read session file {}: {err}", path.display());
                None
            }
        }
    }

    pub fn save(&self, token: &str) -> std::io::Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(&PersistedSession {
            token: token.to_string(),
        })?;
        fs::write(path, json)
    }

    pub fn clear(&self) -> std::io::Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        match fs::remove_file(path) {
            Err(err) if err.kind() != std::io::ErrorKind::NotFound => Err(err),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch() -> SessionStore {
        let path = std::env::temp_dir()
            .join(format!("chat-client-session-{}", uuid::Uuid::new_v4()))
            .join("session.json");
        SessionStore::new(Some(path))
    }

    #[test]
    fn save_load_clear() {
        let store = scratch();
        assert_eq!(store.load(), None);

        store.save("mock-jwt-token-42").unwrap();
        assert_eq!(store.load().as_deref(), Some("mock-jwt-token-42"));

        store.clear().unwrap();
        assert_eq!(store.load(), None);
        store.clear().unwrap();
    }

    #[test]
    fn in_memory_never_persists() {
        let store = SessionStore::in_memory();
        store.save("token").unwrap();
        assert_eq!(store.load(), None);
    }
}
