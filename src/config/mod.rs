//
//  apim-client
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/16.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! This module loads, validates, and saves the client configuration. A
//! configuration describes *where* the platform lives, *who* the client
//! authenticates as, and *how* requests are retried.
//!
//! ## Configuration File Location
//!
//! Configuration files are stored in platform-specific directories:
//!
//! - **Linux**: `~/.config/apim/config.toml`
//! - **macOS**: `~/Library/Application Support/apim/config.toml`
//! - **Windows**: `C:\Users\<User>\AppData\Roaming\apim\config.toml`
//!
//! ## Example Configuration File
//!
//! ```toml
//! [platform]
//! host = "https://apim.example.com:9443"
//! username = "admin"
//! password = "admin"
//!
//! [http]
//! insecure = true
//! timeout_secs = 30
//! min_backoff_ms = 1000
//! max_backoff_ms = 60000
//! max_retries = 3
//! retry_server_errors = true
//! ```
//!
//! ## Environment Overrides
//!
//! `APIM_HOST`, `APIM_USERNAME` and `APIM_PASSWORD` override the file.
//!
//! ## Submodules
//!
//! - [`file`]: Low-level configuration file I/O operations
//! - [`endpoints`]: Endpoint registry computed from the platform section

mod endpoints;
mod file;

pub use endpoints::*;
pub use file::*;

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::api::ApiError;

/// Environment variable overriding [`PlatformConfig::host`].
pub const ENV_HOST: &str = "APIM_HOST";
/// Environment variable overriding [`PlatformConfig::username`].
pub const ENV_USERNAME: &str = "APIM_USERNAME";
/// Environment variable overriding [`PlatformConfig::password`].
pub const ENV_PASSWORD: &str = "APIM_PASSWORD";

/// Keys accepted by [`Config::set`].
pub const CONFIG_KEYS: &[&str] = &[
    "platform.host",
    "platform.username",
    "platform.password",
    "platform.token_context",
    "platform.registration_context",
    "platform.publisher_api_context",
    "platform.store_application_context",
    "platform.store_key_manager_context",
    "platform.store_subscription_context",
    "platform.store_multiple_subscription_context",
    "platform.dashboard_context",
    "http.insecure",
    "http.timeout_secs",
    "http.min_backoff_ms",
    "http.max_backoff_ms",
    "http.max_retries",
    "http.retry_server_errors",
];

/// Complete client configuration.
///
/// # Examples
///
/// ```rust
/// use apim_client::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.http.max_retries, 3);
/// assert!(config.validate().is_err()); // no host yet
/// ```
///
/// # Notes
///
/// - All fields use `#[serde(default)]` so partial files load cleanly
/// - [`Config::validate`] must pass before a client is built from it
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Where the platform lives and who the client authenticates as.
    #[serde(default)]
    pub platform: PlatformConfig,

    /// Request timeout and retry policy.
    #[serde(default)]
    pub http: HttpConfig,
}

/// Platform location, credentials, and per-resource path contexts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformConfig {
    /// Base URL of the platform, e.g. `https://apim.example.com:9443`.
    #[serde(default)]
    pub host: String,

    /// User that owns the dynamically registered client.
    #[serde(default)]
    pub username: String,

    /// Password for [`username`](Self::username).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub password: String,

    #[serde(default = "default_token_context")]
    pub token_context: String,

    #[serde(default = "default_registration_context")]
    pub registration_context: String,

    #[serde(default = "default_publisher_api_context")]
    pub publisher_api_context: String,

    #[serde(default = "default_store_application_context")]
    pub store_application_context: String,

    #[serde(default = "default_store_key_manager_context")]
    pub store_key_manager_context: String,

    #[serde(default = "default_store_subscription_context")]
    pub store_subscription_context: String,

    #[serde(default = "default_store_multiple_subscription_context")]
    pub store_multiple_subscription_context: String,

    #[serde(default = "default_dashboard_context")]
    pub dashboard_context: String,
}

fn default_token_context() -> String {
    "/oauth2/token".to_string()
}

fn default_registration_context() -> String {
    "/client-registration/v0.17/register".to_string()
}

fn default_publisher_api_context() -> String {
    "/api/am/publisher/v1/apis".to_string()
}

fn default_store_application_context() -> String {
    "/api/am/store/v1/applications".to_string()
}

fn default_store_key_manager_context() -> String {
    "/api/am/store/v1/key-managers".to_string()
}

fn default_store_subscription_context() -> String {
    "/api/am/store/v1/subscriptions".to_string()
}

fn default_store_multiple_subscription_context() -> String {
    "/api/am/store/v1/subscriptions/multiple".to_string()
}

fn default_dashboard_context() -> String {
    "/devportal/applications".to_string()
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            username: String::new(),
            password: String::new(),
            token_context: default_token_context(),
            registration_context: default_registration_context(),
            publisher_api_context: default_publisher_api_context(),
            store_application_context: default_store_application_context(),
            store_key_manager_context: default_store_key_manager_context(),
            store_subscription_context: default_store_subscription_context(),
            store_multiple_subscription_context: default_store_multiple_subscription_context(),
            dashboard_context: default_dashboard_context(),
        }
    }
}

/// Transport settings and the retry envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Accept invalid TLS certificates. Platforms are commonly deployed with
    /// self-signed certificates, so this defaults to `true`.
    #[serde(default = "default_insecure")]
    pub insecure: bool,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Lower bound of the delay between attempts, in milliseconds.
    #[serde(default = "default_min_backoff_ms")]
    pub min_backoff_ms: u64,

    /// Upper bound of the delay between attempts, in milliseconds.
    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,

    /// Number of retries after the first attempt.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Whether 5xx responses are retried like network failures.
    #[serde(default = "default_retry_server_errors")]
    pub retry_server_errors: bool,
}

fn default_insecure() -> bool {
    true
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_min_backoff_ms() -> u64 {
    1_000
}

fn default_max_backoff_ms() -> u64 {
    60_000
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_server_errors() -> bool {
    true
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            insecure: default_insecure(),
            timeout_secs: default_timeout_secs(),
            min_backoff_ms: default_min_backoff_ms(),
            max_backoff_ms: default_max_backoff_ms(),
            max_retries: default_max_retries(),
            retry_server_errors: default_retry_server_errors(),
        }
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn min_backoff(&self) -> Duration {
        Duration::from_millis(self.min_backoff_ms)
    }

    pub fn max_backoff(&self) -> Duration {
        Duration::from_millis(self.max_backoff_ms)
    }
}

impl Config {
    /// Loads configuration from `path`, or from the default location when
    /// `path` is `None`, then applies environment overrides.
    ///
    /// A missing file is not an error; defaults are used and the result is
    /// expected to be completed by the environment or command-line flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = Self::load_file(path)?;
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Like [`load`](Self::load) but without environment overrides, so the
    /// result can be edited and saved back.
    pub fn load_file(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::config_path()?,
        };

        if !config_exists(&path) {
            return Ok(Self::default());
        }
        let content = read_config_file(&path)?;
        toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Sets one value by its dotted key, e.g. `platform.host` or
    /// `http.max_retries`.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown key or a value of the wrong type.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        fn parse<T: std::str::FromStr>(key: &str, value: &str) -> Result<T>
        where
            T::Err: std::fmt::Display,
        {
            value
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid value '{}' for {}: {}", value, key, e))
        }

        let platform = &mut self.platform;
        let http = &mut self.http;
        match key {
            "platform.host" => platform.host = value.to_string(),
            "platform.username" => platform.username = value.to_string(),
            "platform.password" => platform.password = value.to_string(),
            "platform.token_context" => platform.token_context = value.to_string(),
            "platform.registration_context" => platform.registration_context = value.to_string(),
            "platform.publisher_api_context" => {
                platform.publisher_api_context = value.to_string()
            }
            "platform.store_application_context" => {
                platform.store_application_context = value.to_string()
            }
            "platform.store_key_manager_context" => {
                platform.store_key_manager_context = value.to_string()
            }
            "platform.store_subscription_context" => {
                platform.store_subscription_context = value.to_string()
            }
            "platform.store_multiple_subscription_context" => {
                platform.store_multiple_subscription_context = value.to_string()
            }
            "platform.dashboard_context" => platform.dashboard_context = value.to_string(),
            "http.insecure" => http.insecure = parse(key, value)?,
            "http.timeout_secs" => http.timeout_secs = parse(key, value)?,
            "http.min_backoff_ms" => http.min_backoff_ms = parse(key, value)?,
            "http.max_backoff_ms" => http.max_backoff_ms = parse(key, value)?,
            "http.max_retries" => http.max_retries = parse(key, value)?,
            "http.retry_server_errors" => http.retry_server_errors = parse(key, value)?,
            _ => anyhow::bail!(
                "Unknown configuration key '{}'. Valid keys: {}",
                key,
                CONFIG_KEYS.join(", ")
            ),
        }
        Ok(())
    }

    /// Writes this configuration to `path`, or the default location.
    pub fn save(&self, path: Option<&Path>) -> Result<()> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::config_path()?,
        };
        let content = toml::to_string_pretty(self)?;
        write_config_file(&path, &content)
    }

    /// Returns the default configuration file path.
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", "apim")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Overrides host and credentials from the environment.
    ///
    /// `lookup` is injected so tests do not have to mutate the process
    /// environment. Empty values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(host) = get(ENV_HOST) {
            self.platform.host = host;
        }
        if let Some(username) = get(ENV_USERNAME) {
            self.platform.username = username;
        }
        if let Some(password) = get(ENV_PASSWORD) {
            self.platform.password = password;
        }
    }

    /// Checks that a client can be built from this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] describing the first problem found:
    /// missing host or credentials, a host that is not an http(s) URL, a zero
    /// timeout, or a minimum backoff above the maximum.
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.platform.host.trim().is_empty() {
            return Err(ApiError::Config(format!(
                "missing platform host; set it in the config file or via {}",
                ENV_HOST
            )));
        }
        if self.platform.username.is_empty() {
            return Err(ApiError::Config(format!(
                "missing username; set it in the config file or via {}",
                ENV_USERNAME
            )));
        }
        if self.platform.password.is_empty() {
            return Err(ApiError::Config(format!(
                "missing password; set it in the config file or via {}",
                ENV_PASSWORD
            )));
        }
        if self.http.timeout_secs == 0 {
            return Err(ApiError::Config("timeout_secs must be greater than zero".into()));
        }
        if self.http.min_backoff_ms > self.http.max_backoff_ms {
            return Err(ApiError::Config(format!(
                "min_backoff_ms ({}) is greater than max_backoff_ms ({})",
                self.http.min_backoff_ms, self.http.max_backoff_ms
            )));
        }

        EndpointSet::from_config(&self.platform).map(|_| ())
    }

    /// Returns a copy safe to print, with the password masked.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if !copy.platform.password.is_empty() {
            copy.platform.password = "********".to_string();
        }
        copy
    }
}
