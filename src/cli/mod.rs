//
//  apim-client
//  cli/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/16.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI command definitions using clap derive macros

mod api;
mod app;
mod config;
mod key_manager;
mod keys;
mod subscription;

pub use api::ApiCommand;
pub use app::AppCommand;
pub use config::ConfigCommand;
pub use key_manager::KeyManagerCommand;
pub use keys::KeysCommand;
pub use subscription::SubscriptionCommand;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;

use crate::api::ApimClient;
use crate::config::Config;
use crate::output::{OutputFormat, OutputWriter};

/// apim - Manage APIs, applications and subscriptions on an API manager
#[derive(Parser, Debug)]
#[command(
    name = "apim",
    version,
    about = "Manage APIs, applications and subscriptions on an API manager",
    long_about = "apim drives the publisher and devportal REST APIs of an API manager.\n\n\
                  It registers an OAuth client on first use, keeps its token fresh, and \
                  retries transient failures.",
    propagate_version = true,
    after_help = "Use 'apim <command> --help' for more information about a command."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOptions,
}

/// Global options available to all commands
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Configuration file (defaults to the platform config directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Platform base URL, e.g. https://apim.example.com:9443
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// User the client registers and authenticates as
    #[arg(long, short = 'u', global = true)]
    pub username: Option<String>,

    /// Password for --username
    #[arg(long, global = true)]
    pub password: Option<String>,

    /// Output format
    #[arg(long, short = 'o', global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

impl GlobalOptions {
    /// Loads the configuration file and environment, then applies flags.
    ///
    /// Precedence is flags over environment over file.
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load(self.config.as_deref())?;
        if let Some(host) = &self.host {
            config.platform.host = host.clone();
        }
        if let Some(username) = &self.username {
            config.platform.username = username.clone();
        }
        if let Some(password) = &self.password {
            config.platform.password = password.clone();
        }
        Ok(config)
    }

    /// Builds a client and performs client registration.
    pub async fn connect(&self) -> Result<ApimClient> {
        let config = self.load_config()?;
        Ok(ApimClient::connect(&config).await?)
    }

    pub fn writer(&self) -> OutputWriter {
        OutputWriter::new(self.format)
    }
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage APIs on the publisher
    Api(ApiCommand),

    /// Manage devportal applications
    #[command(visible_alias = "application")]
    App(AppCommand),

    /// Manage subscriptions
    #[command(name = "sub", visible_alias = "subscription")]
    Sub(SubscriptionCommand),

    /// Manage application keys
    Keys(KeysCommand),

    /// Look up key managers
    #[command(name = "key-manager", visible_alias = "km")]
    KeyManager(KeyManagerCommand),

    /// Inspect CLI configuration
    Config(ConfigCommand),

    /// Print version information
    Version,
}

/// Reads a request body from a JSON or YAML file.
///
/// Files ending in `.yaml` or `.yml` are parsed as YAML, anything else as
/// JSON.
pub fn read_request<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
        .unwrap_or(false);

    if is_yaml {
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse YAML in {}", path.display()))
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON in {}", path.display()))
    }
}
