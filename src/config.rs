use serde::{Deserialize, Serialize};
use std::path::PathBuf;

fn default_backend_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_user_id() -> String {
    "local-user".to_string()
}

fn default_timezone() -> String {
    "UTC".to_string()
}

fn default_browser_command() -> String {
    "xdg-open".to_string()
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("~/.local/share"))
        .join("zero")
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ZeroConfig {
    /// Base URL of the local purchase-scheduling backend.
    #[serde(default = "default_backend_url")]
    pub backend_url: String,
    #[serde(default = "default_user_id")]
    pub user_id: String,
    /// IANA zone name sent along with scheduled purchases.
    #[serde(default = "default_timezone")]
    pub timezone: String,
    #[serde(default = "default_browser_command")]
    pub browser_command: String,
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default)]
    pub debug_logging: bool,
}

impl Default for ZeroConfig {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            user_id: default_user_id(),
            timezone: default_timezone(),
            browser_command: default_browser_command(),
            data_dir: default_data_dir(),
            debug_logging: false,
        }
    }
}

impl ZeroConfig {
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("zero")
            .join("config.json")
    }

    /// Triaged cards kept between runs.
    pub fn cards_path(&self) -> PathBuf {
        self.data_dir.join("cards.json")
    }

    pub fn load() -> Self {
        match std::fs::read_to_string(Self::config_path()) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    pub fn save(&self) {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                log::error!("Failed to create config directory: {}", e);
                return;
            }
        }
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&path, json) {
                    log::error!("Failed to save config: {}", e);
                }
            }
            Err(e) => log::error!("Failed to serialize config: {}", e),
        }
    }

    /// Ensure the data directory and card cache exist.
    pub fn ensure_files(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.data_dir)?;
        let cards = self.cards_path();
        if !cards.exists() {
            std::fs::write(&cards, "[]\n")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_fields() {
        let config: ZeroConfig = serde_json::from_str(r#"{"user_id": "amara"}"#).unwrap();
        assert_eq!(config.user_id, "amara");
        assert_eq!(config.backend_url, "http://localhost:3000");
        assert_eq!(config.timezone, "UTC");
        assert!(!config.debug_logging);
    }

    #[test]
    fn cards_path_lives_under_data_dir() {
        let config = ZeroConfig {
            data_dir: PathBuf::from("/tmp/zero-test"),
            ..ZeroConfig::default()
        };
        assert_eq!(config.cards_path(), PathBuf::from("/tmp/zero-test/cards.json"));
    }
}
