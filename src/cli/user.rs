//
//  storedesk
//  cli/user.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Member account commands

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::api::resources::User;
use crate::output::{format_status, or_dash, TableRow};
use crate::util::format_timestamp;

use super::{GlobalOptions, PageArgs};

/// Manage member accounts
#[derive(Args, Debug)]
pub struct UserCommand {
    #[command(subcommand)]
    pub command: UserSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum UserSubcommand {
    /// List member accounts
    #[command(visible_alias = "ls")]
    List(PageArgs),

    /// Allow an account to sign in again
    Enable(ToggleArgs),

    /// Block an account from signing in
    Disable(ToggleArgs),
}

#[derive(Args, Debug)]
pub struct ToggleArgs {
    /// User ID
    pub id: u64,
}

impl TableRow for User {
    fn headers() -> &'static [&'static str] {
        &["ID", "USERNAME", "NICKNAME", "PHONE", "POINTS", "STATUS", "JOINED"]
    }

    fn row(&self, color: bool) -> Vec<String> {
        let status = if self.enabled { "enabled" } else { "disabled" };
        vec![
            self.id.to_string(),
            self.username.clone(),
            or_dash(self.nickname.as_deref()),
            or_dash(self.phone.as_deref()),
            self.points.to_string(),
            format_status(status, color),
            or_dash(self.create_time.as_deref().map(format_timestamp).as_deref()),
        ]
    }
}

impl UserCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            UserSubcommand::List(page) => {
                let client = global.client(&page.location("/users"))?;
                let users = client.list_users(&page.query()).await?;
                global.writer().write_list(&users.records, "No users found.")
            }
            UserSubcommand::Enable(args) => set_enabled(args.id, true, global).await,
            UserSubcommand::Disable(args) => set_enabled(args.id, false, global).await,
        }
    }
}

async fn set_enabled(id: u64, enabled: bool, global: &GlobalOptions) -> Result<()> {
    let client = global.client("/users")?;
    client.set_user_enabled(id, enabled).await?;

    let verb = if enabled { "Enabled" } else { "Disabled" };
    global
        .writer()
        .write_success(&format!("{} user #{}", verb, id));
    Ok(())
}
