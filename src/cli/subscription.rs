//
//  apim-client
//  cli/subscription.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/16.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Subscription commands
//!
//! `create-many` takes a file holding an array of subscription requests and
//! sends them in a single call.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::api::store::SubscriptionRequest;

use super::{read_request, GlobalOptions};

/// Manage subscriptions
#[derive(Args, Debug)]
pub struct SubscriptionCommand {
    #[command(subcommand)]
    pub command: SubscriptionSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum SubscriptionSubcommand {
    /// Subscribe an application to an API
    Create(CreateArgs),

    /// Create several subscriptions from a file holding an array
    #[command(name = "create-many")]
    CreateMany(FileArgs),

    /// Show a subscription
    #[command(visible_alias = "view")]
    Get(IdArgs),

    /// Replace a subscription with the contents of a file
    Update(UpdateArgs),

    /// Remove a subscription
    #[command(visible_alias = "unsubscribe")]
    Delete(IdArgs),
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Request file (.json, .yaml or .yml)
    #[arg(long, short = 'f', conflicts_with_all = ["app", "api", "policy"])]
    pub file: Option<PathBuf>,

    /// Application id
    #[arg(long, requires_all = ["api", "policy"])]
    pub app: Option<String>,

    /// API id
    #[arg(long)]
    pub api: Option<String>,

    /// Subscription throttling policy, e.g. Unlimited
    #[arg(long)]
    pub policy: Option<String>,
}

#[derive(Args, Debug)]
pub struct FileArgs {
    /// Request file (.json, .yaml or .yml)
    #[arg(long, short = 'f')]
    pub file: PathBuf,
}

#[derive(Args, Debug)]
pub struct IdArgs {
    /// Subscription id
    pub id: String,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Subscription id
    pub id: String,

    /// Request file (.json, .yaml or .yml)
    #[arg(long, short = 'f')]
    pub file: PathBuf,
}

impl CreateArgs {
    fn request(&self) -> Result<SubscriptionRequest> {
        match (&self.file, &self.app, &self.api, &self.policy) {
            (Some(file), _, _, _) => read_request(file),
            (None, Some(app), Some(api), Some(policy)) => {
                Ok(SubscriptionRequest::new(app.as_str(), api.as_str(), policy.as_str()))
            }
            _ => anyhow::bail!("Provide --file, or --app, --api and --policy"),
        }
    }
}

impl SubscriptionCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            SubscriptionSubcommand::Create(args) => self.create(args, global).await,
            SubscriptionSubcommand::CreateMany(args) => self.create_many(args, global).await,
            SubscriptionSubcommand::Get(args) => self.get(args, global).await,
            SubscriptionSubcommand::Update(args) => self.update(args, global).await,
            SubscriptionSubcommand::Delete(args) => self.delete(args, global).await,
        }
    }

    async fn create(&self, args: &CreateArgs, global: &GlobalOptions) -> Result<()> {
        let request = args.request()?;
        let client = global.connect().await?;
        let subscription = client.create_subscription(&request).await?;
        global.writer().write(&subscription)
    }

    async fn create_many(&self, args: &FileArgs, global: &GlobalOptions) -> Result<()> {
        let requests: Vec<SubscriptionRequest> = read_request(&args.file)?;
        let client = global.connect().await?;
        let subscriptions = client.create_subscriptions(&requests).await?;
        global.writer().write_list(&subscriptions)
    }

    async fn get(&self, args: &IdArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.connect().await?;
        let subscription = client.get_subscription(&args.id).await?;
        global.writer().write(&subscription)
    }

    async fn update(&self, args: &UpdateArgs, global: &GlobalOptions) -> Result<()> {
        let request: SubscriptionRequest = read_request(&args.file)?;
        let client = global.connect().await?;
        let subscription = client.update_subscription(&args.id, &request).await?;
        global.writer().write(&subscription)
    }

    async fn delete(&self, args: &IdArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.connect().await?;
        client.unsubscribe(&args.id).await?;
        global
            .writer()
            .write_success(&format!("Removed subscription {}", args.id));
        Ok(())
    }
}
