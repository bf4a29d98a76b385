//
//  stash-client
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! Loading, saving and applying the `stash` configuration file.
//!
//! ## Configuration File Location
//!
//! - **Linux**: `~/.config/stash/config.toml`
//! - **macOS**: `~/Library/Application Support/stash/config.toml`
//! - **Windows**: `C:\Users\<User>\AppData\Roaming\stash\config.toml`
//!
//! ## Example Configuration File
//!
//! ```toml
//! [server]
//! url = "https://stash.example.com"
//! username = "alice"
//! password = "secret"
//!
//! [transport]
//! timeout_secs = 30
//! connect_timeout_secs = 10
//! accept_invalid_certs = true
//! pool_max_idle_per_host = 8
//!
//! [retry]
//! max_attempts = 3
//! base_delay_ms = 250
//! max_delay_ms = 5000
//! retry_all_errors = false
//! ```
//!
//! Every section and key is optional. Command-line flags and the
//! `STASH_URL`, `STASH_USERNAME` and `STASH_PASSWORD` environment variables
//! take precedence over the file.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use stash_client::config::{Config, ServerConfig};
//!
//! let config = Config::load()?;
//! let client = config.client_builder(&ServerConfig::default())?.build()?;
//! println!("talking to {}", client.base_url());
//! # Ok::<(), anyhow::Error>(())
//! ```

mod file;

pub use file::*;

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::api::{RetryPolicy, StashClient, StashClientBuilder, TransportOptions};

/// Placeholder shown instead of a stored password.
pub const REDACTED: &str = "********";

/// Keys accepted by [`Config::get`] and [`Config::set`].
pub const VALID_KEYS: &[&str] = &[
    "server.url",
    "server.username",
    "server.password",
    "transport.timeout_secs",
    "transport.connect_timeout_secs",
    "transport.accept_invalid_certs",
    "transport.pool_max_idle_per_host",
    "retry.max_attempts",
    "retry.base_delay_ms",
    "retry.max_delay_ms",
    "retry.retry_all_errors",
];

/// Global configuration for the `stash` CLI.
///
/// # Examples
///
/// ```rust
/// use stash_client::config::Config;
///
/// let config: Config = toml::from_str("[server]\nurl = \"https://stash.example.com\"\n").unwrap();
/// assert_eq!(config.server.url.as_deref(), Some("https://stash.example.com"));
/// assert_eq!(config.retry.max_attempts, 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server location and credentials.
    pub server: ServerConfig,

    /// HTTP transport settings.
    pub transport: TransportConfig,

    /// Retry settings.
    pub retry: RetryConfig,
}

/// Server location and Basic auth credentials.
///
/// Also used to carry command-line overrides; a `Some` field replaces the
/// corresponding value from the file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Base URL, optionally with a context path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl ServerConfig {
    /// Returns a copy of `self` with every field set in `overrides` replaced.
    pub fn merged(&self, overrides: &ServerConfig) -> ServerConfig {
        ServerConfig {
            url: overrides.url.clone().or_else(|| self.url.clone()),
            username: overrides.username.clone().or_else(|| self.username.clone()),
            password: overrides.password.clone().or_else(|| self.password.clone()),
        }
    }
}

/// HTTP transport settings, mapped onto [`TransportOptions`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,

    /// Skip TLS certificate verification.
    pub accept_invalid_certs: bool,

    pub pool_max_idle_per_host: usize,
}

impl Default for TransportConfig {
    fn default() -> Self {
        let options = TransportOptions::default();
        Self {
            timeout_secs: options.timeout.as_secs(),
            connect_timeout_secs: options.connect_timeout.as_secs(),
            accept_invalid_certs: options.accept_invalid_certs,
            pool_max_idle_per_host: options.pool_max_idle_per_host,
        }
    }
}

impl TransportConfig {
    /// Converts the settings into transport options.
    pub fn options(&self) -> TransportOptions {
        TransportOptions {
            timeout: Duration::from_secs(self.timeout_secs),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            accept_invalid_certs: self.accept_invalid_certs,
            pool_max_idle_per_host: self.pool_max_idle_per_host,
            ..TransportOptions::default()
        }
    }
}

/// Retry settings, mapped onto [`RetryPolicy`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Total attempts per request, including the first.
    pub max_attempts: u32,

    pub base_delay_ms: u64,
    pub max_delay_ms: u64,

    /// Retry client errors (4xx) as well as transport failures and 5xx.
    pub retry_all_errors: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        let policy = RetryPolicy::default();
        Self {
            max_attempts: policy.max_attempts,
            base_delay_ms: policy.base_delay.as_millis() as u64,
            max_delay_ms: policy.max_delay.as_millis() as u64,
            retry_all_errors: false,
        }
    }
}

impl RetryConfig {
    /// Converts the settings into a retry policy.
    pub fn policy(&self) -> RetryPolicy {
        let mut policy = RetryPolicy::default().with_delays(
            Duration::from_millis(self.base_delay_ms),
            Duration::from_millis(self.max_delay_ms),
        );
        policy.max_attempts = self.max_attempts;
        if self.retry_all_errors {
            policy = policy.retry_all_errors();
        }
        policy
    }
}

impl Config {
    /// Loads the configuration from the default location.
    ///
    /// A missing file is not an error; defaults are returned.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Loads the configuration from `path`, or defaults if it does not exist.
    ///
    /// # Errors
    ///
    /// Fails if the file exists but cannot be read or is not valid TOML.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !config_exists(path) {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = read_config_file(path)?;
        toml::from_str(&content).with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Saves the configuration to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Saves the configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        write_config_file(path, &content)
    }

    /// Path of the configuration file. The file may not exist.
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", crate::APP_NAME)
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Returns a copy with the password replaced by [`REDACTED`].
    pub fn redacted(&self) -> Self {
        let mut config = self.clone();
        if config.server.password.is_some() {
            config.server.password = Some(REDACTED.to_string());
        }
        config
    }

    /// Maps the configuration onto a client builder.
    ///
    /// Fields set in `overrides` win over the file. Missing credentials make an
    /// anonymous client, which only works for endpoints that allow anonymous
    /// access to public repositories.
    ///
    /// # Errors
    ///
    /// Fails if no server URL is configured.
    pub fn client_builder(&self, overrides: &ServerConfig) -> Result<StashClientBuilder> {
        let server = self.server.merged(overrides);
        let Some(url) = server.url.filter(|url| !url.trim().is_empty()) else {
            bail!("No Stash server configured. Use --url, set STASH_URL, or run 'stash config init'.");
        };

        let mut builder = StashClient::builder(&url)
            .transport(self.transport.options())
            .retry(self.retry.policy());
        if let (Some(username), Some(password)) = (server.username, server.password) {
            builder = builder.credentials(username, password);
        }
        Ok(builder)
    }

    /// Gets a value by dotted key, e.g. `server.url`.
    ///
    /// The password is never returned in clear text.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "server.url" => self.server.url.clone(),
            "server.username" => self.server.username.clone(),
            "server.password" => self.server.password.as_ref().map(|_| REDACTED.to_string()),
            "transport.timeout_secs" => Some(self.transport.timeout_secs.to_string()),
            "transport.connect_timeout_secs" => Some(self.transport.connect_timeout_secs.to_string()),
            "transport.accept_invalid_certs" => Some(self.transport.accept_invalid_certs.to_string()),
            "transport.pool_max_idle_per_host" => Some(self.transport.pool_max_idle_per_host.to_string()),
            "retry.max_attempts" => Some(self.retry.max_attempts.to_string()),
            "retry.base_delay_ms" => Some(self.retry.base_delay_ms.to_string()),
            "retry.max_delay_ms" => Some(self.retry.max_delay_ms.to_string()),
            "retry.retry_all_errors" => Some(self.retry.retry_all_errors.to_string()),
            _ => None,
        }
    }

    /// Sets a value by dotted key.
    ///
    /// # Errors
    ///
    /// Fails for unknown keys and for values that do not parse as the key's type.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        fn parse<T: std::str::FromStr>(key: &str, value: &str) -> Result<T>
        where
            T::Err: std::error::Error + Send + Sync + 'static,
        {
            value
                .parse()
                .with_context(|| format!("Invalid value '{}' for {}", value, key))
        }

        match key {
            "server.url" => self.server.url = Some(value.to_string()),
            "server.username" => self.server.username = Some(value.to_string()),
            "server.password" => self.server.password = Some(value.to_string()),
            "transport.timeout_secs" => self.transport.timeout_secs = parse(key, value)?,
            "transport.connect_timeout_secs" => self.transport.connect_timeout_secs = parse(key, value)?,
            "transport.accept_invalid_certs" => self.transport.accept_invalid_certs = parse(key, value)?,
            "transport.pool_max_idle_per_host" => self.transport.pool_max_idle_per_host = parse(key, value)?,
            "retry.max_attempts" => self.retry.max_attempts = parse(key, value)?,
            "retry.base_delay_ms" => self.retry.base_delay_ms = parse(key, value)?,
            "retry.max_delay_ms" => self.retry.max_delay_ms = parse(key, value)?,
            "retry.retry_all_errors" => self.retry.retry_all_errors = parse(key, value)?,
            _ => bail!(
                "Unknown configuration key '{}'. Valid keys: {}",
                key,
                VALID_KEYS.join(", ")
            ),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_library_defaults() {
        let config = Config::default();
        assert_eq!(config.transport.timeout_secs, 30);
        assert_eq!(config.transport.connect_timeout_secs, 10);
        assert!(config.transport.accept_invalid_certs);
        assert_eq!(config.retry.max_attempts, 3);
        assert_eq!(config.retry.base_delay_ms, 250);
        assert_eq!(config.retry.max_delay_ms, 5000);
        assert!(!config.retry.retry_all_errors);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [server]
            url = "https://stash.example.com/stash"

            [retry]
            max_attempts = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.server.url.as_deref(), Some("https://stash.example.com/stash"));
        assert!(config.server.username.is_none());
        assert_eq!(config.retry.max_attempts, 5);
        assert_eq!(config.retry.base_delay_ms, 250);
        assert_eq!(config.transport, TransportConfig::default());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stash").join("config.toml");

        let mut config = Config::default();
        config.set("server.url", "https://stash.example.com").unwrap();
        config.set("server.username", "alice").unwrap();
        config.set("transport.accept_invalid_certs", "false").unwrap();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_invalid_toml_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server\nurl = ").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Invalid config file"));
    }

    #[test]
    fn test_overrides_win_over_file() {
        let file = ServerConfig {
            url: Some("https://file.example.com".to_string()),
            username: Some("file-user".to_string()),
            password: Some("file-pass".to_string()),
        };
        let overrides = ServerConfig {
            url: None,
            username: Some("flag-user".to_string()),
            password: None,
        };

        let merged = file.merged(&overrides);
        assert_eq!(merged.url.as_deref(), Some("https://file.example.com"));
        assert_eq!(merged.username.as_deref(), Some("flag-user"));
        assert_eq!(merged.password.as_deref(), Some("file-pass"));
    }

    #[test]
    fn test_client_builder_applies_config() {
        let mut config = Config::default();
        config.server.url = Some("https://stash.example.com/stash".to_string());
        config.server.username = Some("alice".to_string());
        config.server.password = Some("secret".to_string());
        config.retry.max_attempts = 5;

        let client = config.client_builder(&ServerConfig::default()).unwrap().build().unwrap();
        assert_eq!(client.base_url().path(), "/stash");
        assert_eq!(client.credentials().username(), "alice");
        assert_eq!(client.retry_policy().max_attempts, 5);
    }

    #[test]
    fn test_client_builder_without_url_fails() {
        let err = Config::default().client_builder(&ServerConfig::default()).unwrap_err();
        assert!(err.to_string().contains("No Stash server configured"));
    }

    #[test]
    fn test_client_builder_without_password_is_anonymous() {
        let overrides = ServerConfig {
            url: Some("https://stash.example.com".to_string()),
            username: Some("alice".to_string()),
            password: None,
        };
        let client = Config::default().client_builder(&overrides).unwrap().build().unwrap();
        assert!(!client.credentials().is_complete());
    }

    #[test]
    fn test_retry_config_to_policy() {
        let retry = RetryConfig {
            max_attempts: 4,
            base_delay_ms: 100,
            max_delay_ms: 300,
            retry_all_errors: false,
        };
        let policy = retry.policy();
        assert_eq!(policy.max_attempts, 4);
        assert_eq!(policy.backoff(0), Duration::from_millis(100));
        assert_eq!(policy.backoff(5), Duration::from_millis(300));
    }

    #[test]
    fn test_get_and_set() {
        let mut config = Config::default();
        config.set("retry.max_delay_ms", "1000").unwrap();
        config.set("server.password", "secret").unwrap();

        assert_eq!(config.get("retry.max_delay_ms").as_deref(), Some("1000"));
        assert_eq!(config.get("server.password").as_deref(), Some(REDACTED));
        assert_eq!(config.get("server.url"), None);
        assert_eq!(config.get("core.editor"), None);
    }

    #[test]
    fn test_set_rejects_bad_input() {
        let mut config = Config::default();
        assert!(config.set("core.editor", "vim").is_err());
        assert!(config.set("retry.max_attempts", "many").is_err());
        assert!(config.set("transport.accept_invalid_certs", "maybe").is_err());
    }

    #[test]
    fn test_redacted_hides_password() {
        let mut config = Config::default();
        config.server.password = Some("secret".to_string());

        let shown = toml::to_string_pretty(&config.redacted()).unwrap();
        assert!(!shown.contains("secret"));
        assert!(shown.contains(REDACTED));
        assert!(Config::default().redacted().server.password.is_none());
    }
}
