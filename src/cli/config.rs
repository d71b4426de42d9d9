//
//  apim-client
//  cli/config.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/16.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI configuration commands
//!
//! `config show` prints the effective configuration after environment
//! variables and flags are applied, with the password masked. `config set`
//! edits the file only; environment and flags are never written back.

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::config::Config;
use crate::output::{write_json, write_yaml, OutputFormat};

use super::GlobalOptions;

/// Inspect and edit CLI configuration
#[derive(Args, Debug)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
    /// Show configuration file path
    Path,

    /// Show the effective configuration
    #[command(visible_alias = "list")]
    Show,

    /// Set a value in the configuration file
    Set(SetArgs),
}

#[derive(Args, Debug)]
pub struct SetArgs {
    /// Dotted key, e.g. platform.host or http.max_retries
    pub key: String,

    /// New value
    pub value: String,
}

impl ConfigCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            ConfigSubcommand::Path => self.path(global),
            ConfigSubcommand::Show => self.show(global),
            ConfigSubcommand::Set(args) => self.set(args, global),
        }
    }

    fn path(&self, global: &GlobalOptions) -> Result<()> {
        let path = match &global.config {
            Some(path) => path.clone(),
            None => Config::config_path()?,
        };
        global.writer().write_value("path", &path.display().to_string())
    }

    fn set(&self, args: &SetArgs, global: &GlobalOptions) -> Result<()> {
        let path = global.config.as_deref();
        let mut config = Config::load_file(path)?;
        config.set(&args.key, &args.value)?;
        config.save(path)?;
        global
            .writer()
            .write_success(&format!("Set {}", args.key));
        Ok(())
    }

    fn show(&self, global: &GlobalOptions) -> Result<()> {
        let config = global.load_config()?.redacted();
        match global.format {
            OutputFormat::Json => write_json(&config),
            OutputFormat::Yaml => write_yaml(&config),
            OutputFormat::Table => {
                print!("{}", toml::to_string_pretty(&config)?);
                Ok(())
            }
        }
    }
}
