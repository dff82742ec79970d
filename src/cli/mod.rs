//
//  storedesk
//  cli/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI command definitions using clap derive macros

mod api;
mod auth;
mod completion;
mod config;
mod order;
mod product;
mod stats;
mod user;

pub use api::ApiCommand;
pub use auth::AuthCommand;
pub use completion::CompletionCommand;
pub use config::ConfigCommand;
pub use order::OrderCommand;
pub use product::ProductCommand;
pub use stats::StatsCommand;
pub use user::UserCommand;

use std::sync::Arc;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing::debug;

use crate::api::common::{ListQuery, DEFAULT_PAGE_SIZE};
use crate::api::AdminClient;
use crate::auth::{open_session_store, MemorySessionStore, SessionStore, TerminalNavigator};
use crate::config::{normalize_base_url, Config};
use crate::output::{OutputFormat, OutputWriter};

/// storedesk - Run the store back office from the command line
#[derive(Parser, Debug)]
#[command(
    name = "sd",
    version,
    about = "Run the store back office from the command line",
    long_about = "sd talks to the store admin backend.\n\n\
                  It lists and edits products, ships orders, manages members and \
                  gives raw API access for everything else.",
    propagate_version = true,
    after_help = "Use 'sd <command> --help' for more information about a command."
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
    /// Backend base URL, overriding the config file and STOREDESK_API_BASE
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Output format as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Keep the session in memory only; nothing is read from or written to
    /// the session store
    #[arg(long, global = true)]
    pub ephemeral: bool,
}

impl GlobalOptions {
    /// Output writer for the selected format.
    pub fn writer(&self) -> OutputWriter {
        OutputWriter::new(OutputFormat::from_json_flag(self.json))
    }

    /// The session store these options select.
    pub fn session_store(&self, config: &Config) -> Result<Arc<dyn SessionStore>> {
        if self.ephemeral {
            debug!("using ephemeral session store");
            return Ok(Arc::new(MemorySessionStore::new()));
        }
        open_session_store(config.session.backend)
    }

    /// Builds the API client for a command running at `location`.
    ///
    /// `location` is the console view the command corresponds to; it is what
    /// a login redirect brings the user back to.
    pub fn client(&self, location: &str) -> Result<AdminClient> {
        let config = Config::load()?;
        let store = self.session_store(&config)?;
        let navigator = Arc::new(TerminalNavigator::new(location));

        let mut client = AdminClient::from_config(&config, store, navigator)?;
        if let Some(base_url) = &self.base_url {
            client = client.with_base_url(normalize_base_url(base_url)?);
        }
        debug!(base_url = client.base_url(), location, "client ready");
        Ok(client)
    }
}

/// Paging and search flags shared by list commands
#[derive(Args, Debug, Clone)]
pub struct PageArgs {
    /// Page number (1-based)
    #[arg(long, default_value = "1")]
    pub page: u32,

    /// Items per page
    #[arg(long, short = 'L', default_value_t = DEFAULT_PAGE_SIZE)]
    pub limit: u32,

    /// Free-text search
    #[arg(long, short = 'S')]
    pub search: Option<String>,
}

impl PageArgs {
    /// The list query these flags describe. An empty search is dropped.
    pub fn query(&self) -> ListQuery {
        let query = ListQuery::page(self.page, self.limit);
        match self.search.as_deref().map(str::trim) {
            Some(search) if !search.is_empty() => query.keyword(search),
            _ => query,
        }
    }

    /// The console location for a list view at `path`, including paging.
    pub fn location(&self, path: &str) -> String {
        if self.page > 1 {
            format!("{}?page={}", path, self.page)
        } else {
            path.to_string()
        }
    }
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in to the backend and manage the session
    #[command(visible_alias = "login")]
    Auth(AuthCommand),

    /// Manage products
    #[command(visible_alias = "p")]
    Product(ProductCommand),

    /// Manage orders
    #[command(visible_alias = "o")]
    Order(OrderCommand),

    /// Manage member accounts
    User(UserCommand),

    /// Show dashboard statistics
    Stats(StatsCommand),

    /// Make API requests
    Api(ApiCommand),

    /// Manage CLI configuration
    Config(ConfigCommand),

    /// Generate shell completion scripts
    Completion(CompletionCommand),

    /// Print version information
    Version,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_page_args_query() {
        let args = PageArgs {
            page: 0,
            limit: 20,
            search: Some("  ".into()),
        };
        let query = args.query();
        assert_eq!(query.page, 1);
        assert_eq!(query.size, 20);
        assert!(query.keyword.is_none());
    }

    #[test]
    fn test_page_args_location() {
        let mut args = PageArgs {
            page: 1,
            limit: 10,
            search: None,
        };
        assert_eq!(args.location("/orders"), "/orders");
        args.page = 3;
        assert_eq!(args.location("/orders"), "/orders?page=3");
    }

    #[test]
    fn test_global_flags_anywhere() {
        let cli = Cli::try_parse_from(["sd", "order", "list", "--json", "--ephemeral"]).unwrap();
        assert!(cli.global.json);
        assert!(cli.global.ephemeral);
    }
}
