//! Configuration file parser for ~/.config/wallabag-tui/config.toml.
//!
//! The `[server]` section is required: without credentials there is nothing
//! to show. `[ui]` is optional and every key in it has a default.
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use url::Url;

use crate::api::DEFAULT_LIST_LIMIT;
use crate::content::MIN_RENDER_WIDTH;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config file too large: {0}")]
    TooLarge(String),

    #[error("No config file found at {}", .0.display())]
    NotFound(PathBuf),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Top-level application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Connection and OAuth2 credentials for the Wallabag server.
///
/// Debug output masks `client_secret` and `password`.
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server root, e.g. `https://wallabag.example.com`.
    pub url: String,
    pub client_id: String,
    pub client_secret: String,
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mask = |s: &str| if s.is_empty() { "" } else { "[REDACTED]" };
        f.debug_struct("ServerConfig")
            .field("url", &self.url)
            .field("client_id", &self.client_id)
            .field("client_secret", &mask(&self.client_secret))
            .field("username", &self.username)
            .field("password", &mask(&self.password))
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Number of items fetched at startup.
    pub list_limit: u32,

    /// Column width article bodies are wrapped at (capped by the terminal).
    pub content_width: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            list_limit: DEFAULT_LIST_LIMIT,
            content_width: 80,
        }
    }
}

impl Config {
    /// Maximum config file size (1 MB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    const MAX_LIST_LIMIT: u32 = 500;

    /// `$XDG_CONFIG_HOME/wallabag-tui/config.toml`, falling back to
    /// `$HOME/.config/wallabag-tui/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("wallabag-tui").join("config.toml"))
    }

    /// Load and validate configuration from a TOML file.
    ///
    /// - Missing file → `Err(ConfigError::NotFound)`
    /// - Invalid TOML or missing `[server]` → `Err(ConfigError::Parse)`
    /// - Unknown keys → accepted, logged as warning
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > Self::MAX_FILE_SIZE => {
                return Err(ConfigError::TooLarge(format!(
                    "Config file is {} bytes (max {} bytes)",
                    meta.len(),
                    Self::MAX_FILE_SIZE
                )));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Err(e) => return Err(ConfigError::Io(e)),
            Ok(_) => {}
        }

        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Err(e) => return Err(ConfigError::Io(e)),
        };

        if let Ok(raw) = content.parse::<toml::Table>() {
            warn_unknown_keys(&raw);
        }

        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        tracing::info!(
            path = %path.display(),
            server = %config.server.url,
            list_limit = config.ui.list_limit,
            "Loaded configuration"
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.server.url).map_err(|e| {
            ConfigError::Invalid(format!("server.url '{}': {}", self.server.url, e))
        })?;
        match url.scheme() {
            "https" => {}
            "http" => {
                let local = matches!(url.host_str(), Some("localhost" | "127.0.0.1" | "[::1]"));
                if !local {
                    tracing::warn!(url = %url, "Server URL uses plain http, credentials are sent unencrypted");
                }
            }
            other => {
                return Err(ConfigError::Invalid(format!(
                    "server.url must be http or https, got '{other}'"
                )));
            }
        }

        let required = [
            ("client_id", &self.server.client_id),
            ("client_secret", &self.server.client_secret),
            ("username", &self.server.username),
            ("password", &self.server.password),
        ];
        for (key, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("server.{key} must not be empty")));
            }
        }

        if !(1..=Self::MAX_LIST_LIMIT).contains(&self.ui.list_limit) {
            return Err(ConfigError::Invalid(format!(
                "ui.list_limit must be between 1 and {}, got {}",
                Self::MAX_LIST_LIMIT,
                self.ui.list_limit
            )));
        }
        if self.ui.content_width < MIN_RENDER_WIDTH {
            return Err(ConfigError::Invalid(format!(
                "ui.content_width must be at least {}, got {}",
                MIN_RENDER_WIDTH, self.ui.content_width
            )));
        }
        Ok(())
    }
}

fn warn_unknown_keys(raw: &toml::Table) {
    const SECTIONS: [(&str, &[&str]); 2] = [
        (
            "server",
            &["url", "client_id", "client_secret", "username", "password"],
        ),
        ("ui", &["list_limit", "content_width"]),
    ];

    for (key, value) in raw {
        let Some((_, known)) = SECTIONS.iter().find(|(name, _)| name == key) else {
            tracing::warn!(key = %key, "Unknown key in config file, ignoring");
            continue;
        };
        if let Some(table) = value.as_table() {
            for inner in table.keys().filter(|k| !known.contains(&k.as_str())) {
                tracing::warn!(key = %format!("{key}.{inner}"), "Unknown key in config file, ignoring");
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"
[server]
url = "https://wallabag.example.com"
client_id = "1_abc"
client_secret = "s3cret"
username = "reader"
password = "hunter2"
"#;

    fn write_config(name: &str, content: &str) -> (PathBuf, PathBuf) {
        let dir = std::env::temp_dir().join(format!("wallabag_tui_config_test_{name}"));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn test_default_ui_config() {
        let ui = UiConfig::default();
        assert_eq!(ui.list_limit, 100);
        assert_eq!(ui.content_width, 80);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let path = Path::new("/tmp/wallabag_tui_test_nonexistent_config.toml");
        let err = Config::load(path).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
        assert!(err.to_string().contains("wallabag_tui_test_nonexistent_config.toml"));
    }

    #[test]
    fn test_minimal_config_uses_ui_defaults() {
        let (dir, path) = write_config("minimal", VALID);

        let config = Config::load(&path).unwrap();
        assert_eq!(config.server.url, "https://wallabag.example.com");
        assert_eq!(config.server.username, "reader");
        assert_eq!(config.ui.list_limit, 100);
        assert_eq!(config.ui.content_width, 80);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_full_config() {
        let content = format!("{VALID}\n[ui]\nlist_limit = 250\ncontent_width = 100\n");
        let (dir, path) = write_config("full", &content);

        let config = Config::load(&path).unwrap();
        assert_eq!(config.ui.list_limit, 250);
        assert_eq!(config.ui.content_width, 100);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_empty_file_is_a_parse_error() {
        let (dir, path) = write_config("empty", "");

        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_invalid_toml_returns_error() {
        let (dir, path) = write_config("invalid", "this is not [valid toml");

        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().contains("Invalid TOML"));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_unknown_keys_accepted() {
        let content = format!("{VALID}\nproxy = \"socks5://x\"\n[ui]\ntheme = \"dark\"\n");
        let (dir, path) = write_config("unknown", &content);

        assert!(Config::load(&path).is_ok());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_rejects_non_http_scheme() {
        let content = VALID.replace("https://wallabag.example.com", "ftp://wallabag.example.com");
        let (dir, path) = write_config("scheme", &content);

        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("http or https"));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_accepts_plain_http() {
        let content = VALID.replace("https://wallabag.example.com", "http://localhost:8080");
        let (dir, path) = write_config("http", &content);

        assert!(Config::load(&path).is_ok());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_rejects_empty_credentials() {
        let content = VALID.replace("password = \"hunter2\"", "password = \"\"");
        let (dir, path) = write_config("empty_password", &content);

        let err = Config::load(&path).unwrap_err();
        assert!(err.to_string().contains("server.password"));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_rejects_out_of_range_ui_values() {
        let (dir, path) = write_config("limit", &format!("{VALID}\n[ui]\nlist_limit = 0\n"));
        assert!(matches!(
            Config::load(&path).unwrap_err(),
            ConfigError::Invalid(_)
        ));
        std::fs::remove_dir_all(&dir).ok();

        let (dir, path) = write_config("width", &format!("{VALID}\n[ui]\ncontent_width = 10\n"));
        let err = Config::load(&path).unwrap_err();
        assert!(err.to_string().contains("content_width"));
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_too_large_file_rejected() {
        let (dir, path) = write_config("too_large", &"a".repeat(1_048_577));

        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::TooLarge(_)));
        assert!(err.to_string().contains("too large"));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_debug_masks_secrets() {
        let config: Config = toml::from_str(VALID).unwrap();

        let debug_output = format!("{:?}", config);
        assert!(!debug_output.contains("s3cret"));
        assert!(!debug_output.contains("hunter2"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(debug_output.contains("reader"));
    }
}
