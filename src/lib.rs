//
//  storedesk
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # storedesk
//!
//! Backend access layer for the store admin console, and the `sd` command
//! line tool built on it.
//!
//! ## Overview
//!
//! Staff manage products, orders, coupons, points, messages and users on a
//! remote HTTP backend. Every call goes through one client that builds the
//! request, attaches the bearer token, normalizes the backend's response
//! envelope and classifies failures.
//!
//! ## Module Structure
//!
//! - [`api`]: The unified client, request builder, envelope and error types
//! - [`auth`]: Session storage and the auth guard
//! - [`config`]: Configuration file management
//! - [`cli`]: Command-line interface definitions using clap
//! - [`output`]: Output formatting (Table, JSON)
//! - [`interactive`]: Interactive prompts
//! - [`util`]: Utility functions
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use storedesk::api::AdminClient;
//! use storedesk::api::common::ListQuery;
//! use storedesk::auth::{KeyringSessionStore, TerminalNavigator};
//! use storedesk::Config;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = AdminClient::from_config(
//!     &Config::load()?,
//!     Arc::new(KeyringSessionStore::new()),
//!     Arc::new(TerminalNavigator::new("/orders")),
//! )?;
//!
//! let orders = client.list_orders(&ListQuery::default(), None).await?;
//! println!("{} orders", orders.total);
//! # Ok(())
//! # }
//! ```

/// Command-line interface definitions.
///
/// Contains all CLI commands, arguments, and subcommands defined using the
/// clap derive API.
pub mod cli;

/// The backend API client.
///
/// Request building, the transport seam, response normalization, error
/// classification and the per-resource wrappers.
pub mod api;

/// Session persistence and the per-request auth policy.
pub mod auth;

/// Configuration file management.
///
/// Stored in platform-specific locations:
/// - Linux: `~/.config/storedesk/config.toml`
/// - macOS: `~/Library/Application Support/storedesk/config.toml`
/// - Windows: `%APPDATA%\storedesk\config.toml`
pub mod config;

/// Output formatting for tables and JSON.
pub mod output;

/// Interactive terminal prompts.
pub mod interactive;

/// Utility functions and helpers.
pub mod util;

/// Re-export of the main CLI struct for convenient access.
pub use cli::Cli;

/// Re-export of the configuration struct.
pub use config::Config;

/// Application name constant.
///
/// The name of the CLI binary, used for display purposes.
pub const APP_NAME: &str = "sd";

/// Application version constant, taken from Cargo.toml at compile time.
///
/// # Example
///
/// ```rust
/// use storedesk::VERSION;
///
/// println!("sd version {}", VERSION);
/// ```
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit codes for the CLI.
///
/// Standardized exit codes allowing scripts to detect the outcome of a
/// command.
///
/// # Exit Code Ranges
///
/// - `0`: Success
/// - `1-3`: General errors and usage issues
/// - `4-7`: Authentication-related issues
/// - `8-15`: Resource-related issues
/// - `16-31`: Operation-related issues
/// - `32+`: Backend and connectivity issues
///
/// # Example
///
/// ```rust,no_run
/// use storedesk::exit_codes;
/// use std::process;
///
/// process::exit(exit_codes::AUTH_ERROR);
/// ```
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;

    /// General error. Check stderr for details.
    pub const ERROR: i32 = 1;

    /// Invalid usage or arguments.
    pub const USAGE: i32 = 2;

    /// Authentication required or expired.
    ///
    /// Run `sd auth login` to sign in again.
    pub const AUTH_ERROR: i32 = 4;

    /// Permission denied for the signed-in account.
    pub const PERMISSION_DENIED: i32 = 5;

    /// Resource not found.
    pub const NOT_FOUND: i32 = 8;

    /// Operation cancelled by the user, e.g. a declined confirmation.
    pub const CANCELLED: i32 = 16;

    /// The backend rejected the operation (envelope reported failure).
    pub const BUSINESS_ERROR: i32 = 17;

    /// The backend could not be reached or answered with something unusable.
    pub const NETWORK_ERROR: i32 = 32;
}
