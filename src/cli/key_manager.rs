//
//  apim-client
//  cli/key_manager.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/16.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Key manager lookup

use anyhow::Result;
use clap::{ArgGroup, Args, Subcommand};

use super::GlobalOptions;

/// Look up key managers
#[derive(Args, Debug)]
pub struct KeyManagerCommand {
    #[command(subcommand)]
    pub command: KeyManagerSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum KeyManagerSubcommand {
    /// Show a key manager by id or name
    #[command(visible_alias = "view")]
    Get(GetArgs),
}

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("lookup").required(true).args(["id", "name"])))]
pub struct GetArgs {
    /// Key manager id
    #[arg(long)]
    pub id: Option<String>,

    /// Key manager name, e.g. "Resident Key Manager"
    #[arg(long, short = 'n')]
    pub name: Option<String>,
}

impl KeyManagerCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            KeyManagerSubcommand::Get(args) => self.get(args, global).await,
        }
    }

    async fn get(&self, args: &GetArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.connect().await?;
        let key_manager = match (&args.id, &args.name) {
            (Some(id), _) => client.get_key_manager(id).await?,
            (None, Some(name)) => client.find_key_manager(name).await?,
            (None, None) => anyhow::bail!("Provide --id or --name"),
        };
        global.writer().write(&key_manager)
    }
}
