//! Client-side configuration.
//!
//! Reads/writes `~/.echo/config.toml`.

use std::path::{Path, PathBuf};

use echo_inbox::FeedConfig;
use serde::{Deserialize, Serialize};

pub const DEFAULT_SERVER: &str = "http://localhost:8000";

/// Environment variable that overrides the configured server URL.
pub const SERVER_ENV: &str = "ECHO_SERVER";

/// Client configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Backend URL (e.g. "http://localhost:8000").
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub server: String,

    /// Bearer token sent with every request.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub token: String,

    #[serde(default)]
    pub feed: FeedConfig,
}

impl ClientConfig {
    /// Default config file path: ~/.echo/config.toml.
    pub fn default_path() -> PathBuf {
        dirs_path().join("config.toml")
    }

    /// Load config from disk, or return default if file doesn't exist.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: ClientConfig = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("invalid config {}: {}", path.display(), e))?;
        Ok(config)
    }

    /// Save config to disk.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Server URL: `env_override` (from `ECHO_SERVER`) first, then the
    /// file, then the default.
    pub fn server_url(&self, env_override: Option<String>) -> String {
        env_override
            .filter(|s| !s.trim().is_empty())
            .or_else(|| Some(self.server.clone()).filter(|s| !s.is_empty()))
            .unwrap_or_else(|| DEFAULT_SERVER.to_string())
    }
}

/// Return the Echo config directory (~/.echo).
fn dirs_path() -> PathBuf {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".echo")
}

#[cfg(test)]
mod tests {
    use super::*;
    use echo_inbox::Streams;

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = ClientConfig::load(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.feed.copied_reset_ms, 2000);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = ClientConfig::default();
        config.server = "https://echo.example.com".to_string();
        config.token = "secret".to_string();
        config.feed.streams = Streams::Messages;
        config.feed.suggestion_capacity = Some(20);
        config.save(&path).unwrap();

        let back = ClientConfig::load(&path).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_partial_feed_section() {
        let config: ClientConfig = toml::from_str(
            r#"
            server = "http://10.0.0.2:8000"

            [feed]
            streams = "comments"
            "#,
        )
        .unwrap();
        assert_eq!(config.feed.streams, Streams::Comments);
        assert_eq!(config.feed.suggestion_capacity, None);
        assert_eq!(config.feed.copied_reset_ms, 2000);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "server = [").unwrap();
        assert!(ClientConfig::load(&path).is_err());
    }

    #[test]
    fn test_server_resolution_order() {
        let mut config = ClientConfig::default();
        assert_eq!(config.server_url(None), DEFAULT_SERVER);

        config.server = "http://file:8000".to_string();
        assert_eq!(config.server_url(None), "http://file:8000");
        assert_eq!(config.server_url(Some("http://env:9000".into())), "http://env:9000");
        assert_eq!(config.server_url(Some("  ".into())), "http://file:8000");
    }
}
