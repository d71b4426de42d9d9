//
//  apim-client
//  cli/api.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/16.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Publisher API commands
//!
//! ## Examples
//!
//! ```bash
//! # Create an API from a definition file
//! apim api create --file pizza-shack.yaml
//!
//! # Resolve an API id by name and version
//! apim api search --name PizzaShackAPI --version 1.0.0
//!
//! # Publish it
//! apim api lifecycle 7a2298c4-c905-403f-8fac-38c73301631f --action Publish
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::api::publisher::{lifecycle, ApiRequest};

use super::{read_request, GlobalOptions};

/// Manage APIs on the publisher
#[derive(Args, Debug)]
pub struct ApiCommand {
    #[command(subcommand)]
    pub command: ApiSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ApiSubcommand {
    /// Create an API from a JSON or YAML file
    Create(FileArgs),

    /// Show an API
    #[command(visible_alias = "view")]
    Get(IdArgs),

    /// Replace an API with the contents of a file
    Update(UpdateArgs),

    /// Delete an API
    Delete(IdArgs),

    /// List APIs matching a search query
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Find the id of the API with the given name and version
    Search(SearchArgs),

    /// Apply a lifecycle action such as Publish or Retire
    Lifecycle(LifecycleArgs),
}

#[derive(Args, Debug)]
pub struct FileArgs {
    /// Request file (.json, .yaml or .yml)
    #[arg(long, short = 'f')]
    pub file: PathBuf,
}

#[derive(Args, Debug)]
pub struct IdArgs {
    /// API id
    pub id: String,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// API id
    pub id: String,

    /// Request file (.json, .yaml or .yml)
    #[arg(long, short = 'f')]
    pub file: PathBuf,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Publisher search query, e.g. "name:Pizza" or "tag:food"
    #[arg(long, short = 'q', default_value = "")]
    pub query: String,
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// API name
    #[arg(long, short = 'n')]
    pub name: String,

    /// API version
    #[arg(long, short = 'v')]
    pub version: String,
}

#[derive(Args, Debug)]
pub struct LifecycleArgs {
    /// API id
    pub id: String,

    /// Lifecycle action
    #[arg(
        long,
        short = 'a',
        value_parser = [
            lifecycle::PUBLISH,
            lifecycle::DEPLOY_AS_PROTOTYPE,
            lifecycle::DEMOTE_TO_CREATED,
            lifecycle::BLOCK,
            lifecycle::DEPRECATE,
            lifecycle::REPUBLISH,
            lifecycle::RETIRE,
        ]
    )]
    pub action: String,
}

impl ApiCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            ApiSubcommand::Create(args) => self.create(args, global).await,
            ApiSubcommand::Get(args) => self.get(args, global).await,
            ApiSubcommand::Update(args) => self.update(args, global).await,
            ApiSubcommand::Delete(args) => self.delete(args, global).await,
            ApiSubcommand::List(args) => self.list(args, global).await,
            ApiSubcommand::Search(args) => self.search(args, global).await,
            ApiSubcommand::Lifecycle(args) => self.lifecycle(args, global).await,
        }
    }

    async fn create(&self, args: &FileArgs, global: &GlobalOptions) -> Result<()> {
        let request: ApiRequest = read_request(&args.file)?;
        let client = global.connect().await?;
        let api = client.create_api(&request).await?;
        global.writer().write(&api)
    }

    async fn get(&self, args: &IdArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.connect().await?;
        let api = client.get_api(&args.id).await?;
        global.writer().write(&api)
    }

    async fn update(&self, args: &UpdateArgs, global: &GlobalOptions) -> Result<()> {
        let request: ApiRequest = read_request(&args.file)?;
        let client = global.connect().await?;
        let api = client.update_api(&args.id, &request).await?;
        global.writer().write(&api)
    }

    async fn delete(&self, args: &IdArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.connect().await?;
        client.delete_api(&args.id).await?;
        global
            .writer()
            .write_success(&format!("Deleted API {}", args.id));
        Ok(())
    }

    async fn list(&self, args: &ListArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.connect().await?;
        let result = client.list_apis(&args.query).await?;
        global.writer().write_list(&result.list)
    }

    async fn search(&self, args: &SearchArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.connect().await?;
        let id = client.search_api(&args.name, &args.version).await?;
        global.writer().write_value("id", &id)
    }

    async fn lifecycle(&self, args: &LifecycleArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.connect().await?;
        let change = client.change_api_lifecycle(&args.id, &args.action).await?;
        global.writer().write(&change)
    }
}
