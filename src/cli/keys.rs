//
//  apim-client
//  cli/keys.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/16.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Application key commands
//!
//! ## Examples
//!
//! ```bash
//! # Production keys from the resident key manager
//! apim keys generate <APP_ID> --grant-type client_credentials --grant-type password
//!
//! # Sandbox keys from a request file
//! apim keys generate <APP_ID> --file sandbox-keys.yaml
//!
//! # Rotate the consumer secret
//! apim keys regenerate <APP_ID> <KEY_MAPPING_ID>
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::api::store::{KeyGenerateRequest, KEY_TYPE_PRODUCTION, KEY_TYPE_SANDBOX};

use super::{read_request, GlobalOptions};

/// Manage application keys
#[derive(Args, Debug)]
pub struct KeysCommand {
    #[command(subcommand)]
    pub command: KeysSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum KeysSubcommand {
    /// Generate keys for an application
    Generate(GenerateArgs),

    /// Show a key mapping
    #[command(visible_alias = "view")]
    Get(MappingArgs),

    /// Update a key mapping from a file
    Update(UpdateArgs),

    /// Issue a new consumer secret
    Regenerate(MappingArgs),

    /// Remove a key mapping left behind by a failed generation
    #[command(name = "clean-up")]
    CleanUp(MappingArgs),
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Application id
    pub app_id: String,

    /// Request file (.json, .yaml or .yml); overrides the other flags
    #[arg(long, short = 'f')]
    pub file: Option<PathBuf>,

    /// Key type
    #[arg(long, default_value = KEY_TYPE_PRODUCTION, value_parser = [KEY_TYPE_PRODUCTION, KEY_TYPE_SANDBOX])]
    pub key_type: String,

    /// Key manager name
    #[arg(long)]
    pub key_manager: Option<String>,

    /// Grant type to enable (repeatable)
    #[arg(long = "grant-type", default_value = "client_credentials")]
    pub grant_types: Vec<String>,

    /// Access token validity in seconds
    #[arg(long, default_value_t = 3600)]
    pub validity: i64,
}

#[derive(Args, Debug)]
pub struct MappingArgs {
    /// Application id
    pub app_id: String,

    /// Key mapping id
    pub key_mapping_id: String,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Application id
    pub app_id: String,

    /// Key mapping id
    pub key_mapping_id: String,

    /// Request file (.json, .yaml or .yml)
    #[arg(long, short = 'f')]
    pub file: PathBuf,
}

impl GenerateArgs {
    fn request(&self) -> Result<KeyGenerateRequest> {
        if let Some(file) = &self.file {
            return read_request(file);
        }
        Ok(KeyGenerateRequest {
            key_manager: self.key_manager.clone(),
            key_type: self.key_type.clone(),
            validity_time: self.validity,
            grant_types_to_be_supported: self.grant_types.clone(),
            ..Default::default()
        })
    }
}

impl KeysCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            KeysSubcommand::Generate(args) => self.generate(args, global).await,
            KeysSubcommand::Get(args) => self.get(args, global).await,
            KeysSubcommand::Update(args) => self.update(args, global).await,
            KeysSubcommand::Regenerate(args) => self.regenerate(args, global).await,
            KeysSubcommand::CleanUp(args) => self.clean_up(args, global).await,
        }
    }

    async fn generate(&self, args: &GenerateArgs, global: &GlobalOptions) -> Result<()> {
        let request = args.request()?;
        let client = global.connect().await?;
        let keys = client.generate_keys(&args.app_id, &request).await?;
        global.writer().write(&keys)
    }

    async fn get(&self, args: &MappingArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.connect().await?;
        let keys = client
            .get_application_keys(&args.app_id, &args.key_mapping_id)
            .await?;
        global.writer().write(&keys)
    }

    async fn update(&self, args: &UpdateArgs, global: &GlobalOptions) -> Result<()> {
        let request: KeyGenerateRequest = read_request(&args.file)?;
        let client = global.connect().await?;
        let keys = client
            .update_application_keys(&args.app_id, &args.key_mapping_id, &request)
            .await?;
        global.writer().write(&keys)
    }

    async fn regenerate(&self, args: &MappingArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.connect().await?;
        let secret = client
            .regenerate_secret(&args.app_id, &args.key_mapping_id)
            .await?;
        global.writer().write(&secret)
    }

    async fn clean_up(&self, args: &MappingArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.connect().await?;
        client.cleanup_keys(&args.app_id, &args.key_mapping_id).await?;
        global
            .writer()
            .write_success(&format!("Cleaned up key mapping {}", args.key_mapping_id));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::cli::{Cli, Commands};

    fn generate_args(argv: &[&str]) -> GenerateArgs {
        match Cli::try_parse_from(argv).unwrap().command {
            Commands::Keys(KeysCommand {
                command: KeysSubcommand::Generate(args),
            }) => args,
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_generate_defaults() {
        let request = generate_args(&["apim", "keys", "generate", "app-1"])
            .request()
            .unwrap();
        assert_eq!(request.key_type, KEY_TYPE_PRODUCTION);
        assert_eq!(request.grant_types_to_be_supported, vec!["client_credentials"]);
        assert_eq!(request.validity_time, 3600);
        assert!(request.key_manager.is_none());
    }

    #[test]
    fn test_generate_flags() {
        let request = generate_args(&[
            "apim",
            "keys",
            "generate",
            "app-1",
            "--key-type",
            "SANDBOX",
            "--key-manager",
            "Resident Key Manager",
            "--grant-type",
            "password",
            "--grant-type",
            "refresh_token",
        ])
        .request()
        .unwrap();
        assert_eq!(request.key_type, KEY_TYPE_SANDBOX);
        assert_eq!(request.key_manager.as_deref(), Some("Resident Key Manager"));
        assert_eq!(request.grant_types_to_be_supported, vec!["password", "refresh_token"]);
    }

    #[test]
    fn test_unknown_key_type_rejected() {
        assert!(
            Cli::try_parse_from(["apim", "keys", "generate", "app-1", "--key-type", "TEST"])
                .is_err()
        );
    }
}
