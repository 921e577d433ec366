//! Blog configuration (_config.yml + environment)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use super::{PostDefaults, PropertyMap};

/// Main blog configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BlogConfig {
    pub notion: NotionConfig,
    pub render: RenderConfig,
    pub server: ServerConfig,
    pub properties: PropertyMap,
    pub defaults: PostDefaults,
}

impl BlogConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: BlogConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load from a file if it exists, then apply environment overrides
    pub fn from_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            tracing::debug!("Loading config from {:?}", path);
            Self::load(path)?
        } else {
            Self::default()
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Override settings from environment-style lookups
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(secret) = non_empty("NOTION_SECRET").or_else(|| non_empty("NEXT_NOTION_SECRET"))
        {
            self.notion.secret = Some(secret);
        }
        if let Some(database_id) = non_empty("NOTION_DATABASE_ID") {
            self.notion.database_id = Some(database_id);
        }
        if let Some(api_url) = non_empty("NOTION_API_URL") {
            self.notion.api_url = api_url;
        }
    }
}

/// Notion API connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotionConfig {
    pub api_url: String,
    pub api_version: String,
    pub secret: Option<String>,
    pub database_id: Option<String>,
    pub timeout_secs: u64,
    /// Retry once when the API reports a transient failure
    pub retry_transient: bool,
    /// Probe the API with a cheap request before each operation
    pub verify_connection: bool,
    /// Property used for the server-side descending sort
    pub sort_property: String,
    pub page_size: u32,
}

impl NotionConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

impl Default for NotionConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.notion.com/v1".to_string(),
            api_version: "2022-06-28".to_string(),
            secret: None,
            database_id: None,
            timeout_secs: 10,
            retry_transient: true,
            verify_connection: true,
            sort_property: "Created".to_string(),
            page_size: 100,
        }
    }
}

/// Content rendering settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub highlight_theme: String,
    pub line_numbers: bool,
    pub empty_placeholder: String,
    pub failed_placeholder: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            highlight_theme: "base16-ocean.dark".to_string(),
            line_numbers: false,
            empty_placeholder: "<p>This page has no content.</p>".to_string(),
            failed_placeholder: "<p>Content could not be rendered.</p>".to_string(),
        }
    }
}

/// API server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub ip: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            ip: "localhost".to_string(),
            port: 3000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = BlogConfig::default();
        assert_eq!(config.notion.api_url, "https://api.notion.com/v1");
        assert_eq!(config.notion.sort_property, "Created");
        assert_eq!(config.server.port, 3000);
        assert!(config.notion.secret.is_none());
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
notion:
  database_id: abc123
  timeout_secs: 3
render:
  line_numbers: true
properties:
  title: [Headline]
"#;
        let config: BlogConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.notion.database_id.as_deref(), Some("abc123"));
        assert_eq!(config.notion.timeout(), Duration::from_secs(3));
        assert_eq!(config.notion.api_version, "2022-06-28");
        assert!(config.render.line_numbers);
        assert_eq!(config.properties.title, vec!["Headline".to_string()]);
        assert_eq!(config.properties.author.len(), 3);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("_config.yml");
        fs::write(&path, "server:\n  port: 8080\n").unwrap();

        let config = BlogConfig::load(&path).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.ip, "localhost");
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("NEXT_NOTION_SECRET", "secret_legacy"),
            ("NOTION_DATABASE_ID", "db-1"),
            ("NOTION_API_URL", "  "),
        ]
        .into_iter()
        .collect();

        let mut config = BlogConfig::default();
        config.apply_env(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.notion.secret.as_deref(), Some("secret_legacy"));
        assert_eq!(config.notion.database_id.as_deref(), Some("db-1"));
        assert_eq!(config.notion.api_url, "https://api.notion.com/v1");
    }

    #[test]
    fn test_primary_secret_wins() {
        let mut config = BlogConfig::default();
        config.apply_env(|key| match key {
            "NOTION_SECRET" => Some("secret_new".to_string()),
            "NEXT_NOTION_SECRET" => Some("secret_legacy".to_string()),
            _ => None,
        });
        assert_eq!(config.notion.secret.as_deref(), Some("secret_new"));
    }
}
