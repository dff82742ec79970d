//
//  storedesk
//  cli/auth.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Authentication commands.
//!
//! Signing in stores the bearer token and the staff profile in the configured
//! session store; every other command reads them from there.

use std::io::BufRead;

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use console::style;
use serde::Serialize;
use serde_json::Value;

use crate::config::Config;
use crate::interactive::{can_prompt, prompt_confirm, prompt_input, prompt_password};
use crate::output::{print_field, TableOutput};

use super::GlobalOptions;

/// Location reported to the auth guard while signing in.
const LOGIN_LOCATION: &str = "/login";

/// Sign in to the backend and manage the session.
#[derive(Args, Debug)]
pub struct AuthCommand {
    #[command(subcommand)]
    pub command: AuthSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AuthSubcommand {
    /// Sign in with a username and password
    Login(LoginArgs),

    /// Sign out and forget the stored session
    Logout,

    /// View authentication status
    Status(StatusArgs),
}

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Staff username (prompted when omitted)
    #[arg(long, short = 'u')]
    pub username: Option<String>,

    /// Read the password from standard input
    #[arg(long, conflicts_with = "with_token")]
    pub password_stdin: bool,

    /// Store a token read from standard input instead of signing in
    #[arg(long)]
    pub with_token: bool,
}

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Show the session token (masked)
    #[arg(long, short = 't')]
    pub show_token: bool,
}

impl AuthCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            AuthSubcommand::Login(args) => login(args, global).await,
            AuthSubcommand::Logout => logout(global).await,
            AuthSubcommand::Status(args) => status(args, global),
        }
    }
}

async fn login(args: &LoginArgs, global: &GlobalOptions) -> Result<()> {
    let client = global.client(LOGIN_LOCATION)?;
    let writer = global.writer();

    let existing = client.current_session();
    if existing.is_authenticated() && can_prompt() && !global.json {
        let who = existing
            .display_name()
            .unwrap_or_else(|| "an unnamed account".to_string());
        println!("Already signed in to {} as {}", client.base_url(), who);
        if !prompt_confirm("Sign in again?")? {
            return Ok(());
        }
    }

    if args.with_token {
        let token = read_line_from_stdin().context("Failed to read token")?;
        client.establish_session(&token, None)?;
        writer.write_success(&format!("Token stored for {}", client.base_url()));
        return Ok(());
    }

    let username = match &args.username {
        Some(username) => username.clone(),
        None => prompt_input("Username")?,
    };
    if username.is_empty() {
        bail!("Username cannot be empty");
    }

    let password = if args.password_stdin {
        read_line_from_stdin().context("Failed to read password")?
    } else {
        prompt_password("Password")?
    };

    let session = client.login(&username, &password).await?;

    if global.json {
        writer.write_raw(&serde_json::json!({
            "base_url": client.base_url(),
            "user": session.user_profile,
        }))?;
    } else {
        let who = session.display_name().unwrap_or(username);
        writer.write_success(&format!(
            "Signed in to {} as {}",
            client.base_url(),
            style(who).bold()
        ));
    }

    Ok(())
}

async fn logout(global: &GlobalOptions) -> Result<()> {
    let client = global.client(LOGIN_LOCATION)?;
    let writer = global.writer();

    if !client.current_session().is_authenticated() {
        writer.write_info("Not signed in");
        return Ok(());
    }

    client.logout().await;
    writer.write_success(&format!("Signed out of {}", client.base_url()));
    Ok(())
}

#[derive(Debug, Serialize)]
struct AuthStatus {
    base_url: String,
    session_backend: String,
    signed_in: bool,
    user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    profile: Option<Value>,
}

impl TableOutput for AuthStatus {
    fn print_table(&self, color: bool) {
        println!("{}", self.base_url);
        if !self.signed_in {
            println!("  Not signed in");
            println!();
            println!("Run 'sd auth login' to sign in");
            return;
        }

        let user = self.user.as_deref().unwrap_or("-");
        print_field("Signed in as", user, 12, color);
        print_field("Session", &self.session_backend, 12, color);
        if let Some(token) = &self.token {
            print_field("Token", token, 12, color);
        }
    }
}

fn status(args: &StatusArgs, global: &GlobalOptions) -> Result<()> {
    let config = Config::load()?;
    let client = global.client("/")?;
    let session = client.current_session();

    let backend = if global.ephemeral {
        "memory (ephemeral)".to_string()
    } else {
        config.session.backend.to_string()
    };

    let report = AuthStatus {
        base_url: client.base_url().to_string(),
        session_backend: backend,
        signed_in: session.is_authenticated(),
        user: session.display_name(),
        token: args
            .show_token
            .then(|| session.masked_token())
            .flatten(),
        profile: if global.json {
            session.user_profile.clone()
        } else {
            None
        },
    };

    global.writer().write(&report)
}

/// Reads one trimmed, non-empty line from stdin.
fn read_line_from_stdin() -> Result<String> {
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    let line = line.trim().to_string();
    if line.is_empty() {
        bail!("Nothing was read from standard input");
    }
    Ok(line)
}
