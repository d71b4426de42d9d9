//
//  apim-client
//  cli/app.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/16.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Devportal application commands
//!
//! ## Examples
//!
//! ```bash
//! apim app create --file pizza-app.json
//! apim app search --name PizzaApp
//! apim app dashboard-url 9b3a1f0e-5c2d-4d8e-a1b2-3c4d5e6f7a8b
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::api::store::ApplicationRequest;
use crate::api::ApimClient;

use super::{read_request, GlobalOptions};

/// Manage devportal applications
#[derive(Args, Debug)]
pub struct AppCommand {
    #[command(subcommand)]
    pub command: AppSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AppSubcommand {
    /// Create an application from a JSON or YAML file
    Create(FileArgs),

    /// Show an application
    #[command(visible_alias = "view")]
    Get(IdArgs),

    /// Replace an application with the contents of a file
    Update(UpdateArgs),

    /// Delete an application
    Delete(IdArgs),

    /// List applications whose name matches a query
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Find the id of the application with the given name
    Search(SearchArgs),

    /// Print the devportal overview URL of an application
    #[command(name = "dashboard-url")]
    DashboardUrl(IdArgs),
}

#[derive(Args, Debug)]
pub struct FileArgs {
    /// Request file (.json, .yaml or .yml)
    #[arg(long, short = 'f')]
    pub file: PathBuf,
}

#[derive(Args, Debug)]
pub struct IdArgs {
    /// Application id
    pub id: String,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Application id
    pub id: String,

    /// Request file (.json, .yaml or .yml)
    #[arg(long, short = 'f')]
    pub file: PathBuf,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Name filter; empty lists every application
    #[arg(long, short = 'q', default_value = "")]
    pub query: String,
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Application name
    #[arg(long, short = 'n')]
    pub name: String,
}

impl AppCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            AppSubcommand::Create(args) => self.create(args, global).await,
            AppSubcommand::Get(args) => self.get(args, global).await,
            AppSubcommand::Update(args) => self.update(args, global).await,
            AppSubcommand::Delete(args) => self.delete(args, global).await,
            AppSubcommand::List(args) => self.list(args, global).await,
            AppSubcommand::Search(args) => self.search(args, global).await,
            AppSubcommand::DashboardUrl(args) => self.dashboard_url(args, global),
        }
    }

    async fn create(&self, args: &FileArgs, global: &GlobalOptions) -> Result<()> {
        let request: ApplicationRequest = read_request(&args.file)?;
        let client = global.connect().await?;
        let app = client.create_application(&request).await?;
        global.writer().write(&app)
    }

    async fn get(&self, args: &IdArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.connect().await?;
        let app = client.get_application(&args.id).await?;
        global.writer().write(&app)
    }

    async fn update(&self, args: &UpdateArgs, global: &GlobalOptions) -> Result<()> {
        let request: ApplicationRequest = read_request(&args.file)?;
        let client = global.connect().await?;
        let app = client.update_application(&args.id, &request).await?;
        global.writer().write(&app)
    }

    async fn delete(&self, args: &IdArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.connect().await?;
        client.delete_application(&args.id).await?;
        global
            .writer()
            .write_success(&format!("Deleted application {}", args.id));
        Ok(())
    }

    async fn list(&self, args: &ListArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.connect().await?;
        let result = client.list_applications(&args.query).await?;
        global.writer().write_list(&result.list)
    }

    async fn search(&self, args: &SearchArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.connect().await?;
        let id = client.search_application(&args.name).await?;
        global.writer().write_value("id", &id)
    }

    /// Needs a valid configuration but no connection.
    fn dashboard_url(&self, args: &IdArgs, global: &GlobalOptions) -> Result<()> {
        let client = ApimClient::new(&global.load_config()?)?;
        let url = client.application_dashboard_url(&args.id)?;
        global.writer().write_value("url", url.as_str())
    }
}
