//! Configuration file support for boardpress.
//!
//! Loads settings from `~/.boardpress/config.toml` with the following
//! precedence: CLI arguments > Environment variables > Config file
//!
//! ## Configuration File Format
//!
//! ```toml
//! # ~/.boardpress/config.toml
//!
//! [site]
//! # Root of the site checkout used by the file backend
//! root = "/srv/boardpress-site"
//!
//! [table]
//! # Hosted table endpoint and service key for the table backend
//! url = "https://example.supabase.co"
//! service_key = "your-service-key"
//! name = "articles"
//!
//! [serve]
//! # Bind address for the HTTP transport
//! http = "127.0.0.1:8787"
//! ```

use anyhow::Result;
use serde::Deserialize;
use std::path::PathBuf;

/// Top-level configuration structure.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// File-backend site checkout settings.
    #[serde(default)]
    pub site: SiteSection,
    /// Table-backend connection settings.
    #[serde(default)]
    pub table: TableSection,
    /// Serve command configuration.
    #[serde(default)]
    pub serve: ServeSection,
}

/// Settings for the file backend.
#[derive(Debug, Default, Deserialize)]
pub struct SiteSection {
    /// Root of the site checkout.
    pub root: Option<String>,
}

/// Settings for the table backend.
#[derive(Debug, Default, Deserialize)]
pub struct TableSection {
    /// Hosted table endpoint (project root URL).
    pub url: Option<String>,
    /// Service key sent as `apikey` and bearer token.
    pub service_key: Option<String>,
    /// Table name (defaults to `articles`).
    pub name: Option<String>,
}

/// Settings for the serve command.
#[derive(Debug, Default, Deserialize)]
pub struct ServeSection {
    /// Bind address for the HTTP transport.
    pub http: Option<String>,
}

/// Returns the path to the config file (~/.boardpress/config.toml).
fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".boardpress").join("config.toml"))
}

/// Loads the configuration file if it exists.
///
/// Returns `Ok(None)` if the file doesn't exist.
/// Returns `Ok(Some(config))` if the file exists and parses successfully.
/// Returns `Err` if the file exists but fails to parse.
pub fn load_config() -> Result<Option<Config>> {
    let Some(path) = config_path() else {
        return Ok(None);
    };

    if !path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(&path)?;
    let config: Config = toml::from_str(&content)?;

    tracing::debug!(
        target: "boardpress::config",
        path = %path.display(),
        "Loaded configuration file"
    );

    Ok(Some(config))
}

/// Applies configuration file settings to environment variables.
///
/// Only sets environment variables that are not already set, preserving
/// the precedence: CLI > ENV > config file. Called once at startup before
/// parsing CLI arguments; the resulting configuration is immutable for the
/// process lifetime.
pub fn apply_config_to_env() {
    if let Ok(Some(config)) = load_config() {
        apply_to_env(&config);
    }
}

fn apply_to_env(config: &Config) {
    // Helper to set env var only if not already set
    fn set_if_absent(key: &str, value: &str) {
        if std::env::var(key).is_err() {
            std::env::set_var(key, value);
            tracing::trace!(
                target: "boardpress::config",
                key,
                "Set environment variable from config file"
            );
        }
    }

    if let Some(ref root) = config.site.root {
        set_if_absent("BOARDPRESS_SITE_ROOT", root);
    }
    if let Some(ref url) = config.table.url {
        set_if_absent("BOARDPRESS_TABLE_URL", url);
    }
    if let Some(ref key) = config.table.service_key {
        set_if_absent("BOARDPRESS_TABLE_KEY", key);
    }
    if let Some(ref name) = config.table.name {
        set_if_absent("BOARDPRESS_TABLE_NAME", name);
    }
    if let Some(ref http) = config.serve.http {
        set_if_absent("BOARDPRESS_HTTP", http);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_path_returns_expected_location() {
        let path = config_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.ends_with(".boardpress/config.toml"));
    }

    #[test]
    fn parse_minimal_config() {
        let toml = r#"
            [site]
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert!(config.site.root.is_none());
        assert!(config.table.url.is_none());
    }

    #[test]
    fn parse_full_config() {
        let toml = r#"
            [site]
            root = "/srv/boardpress-site"

            [table]
            url = "https://example.supabase.co"
            service_key = "secret"
            name = "articles"

            [serve]
            http = "127.0.0.1:8787"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.site.root.as_deref(), Some("/srv/boardpress-site"));
        assert_eq!(
            config.table.url.as_deref(),
            Some("https://example.supabase.co")
        );
        assert_eq!(config.table.service_key.as_deref(), Some("secret"));
        assert_eq!(config.table.name.as_deref(), Some("articles"));
        assert_eq!(config.serve.http.as_deref(), Some("127.0.0.1:8787"));
    }

    #[test]
    fn apply_config_respects_existing_env_vars() {
        let original = std::env::var("BOARDPRESS_TABLE_NAME").ok();

        std::env::set_var("BOARDPRESS_TABLE_NAME", "env-table");

        let config = Config {
            table: TableSection {
                name: Some("config-table".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        apply_to_env(&config);

        assert_eq!(
            std::env::var("BOARDPRESS_TABLE_NAME").unwrap(),
            "env-table",
            "Config should not override existing env var"
        );

        if let Some(orig) = original {
            std::env::set_var("BOARDPRESS_TABLE_NAME", orig);
        } else {
            std::env::remove_var("BOARDPRESS_TABLE_NAME");
        }
    }
}
