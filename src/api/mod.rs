//
//  storedesk
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! Everything that talks to the store backend goes through one client.
//!
//! ## Architecture
//!
//! - [`request`]: Request descriptors and the URL/header/query builder
//! - [`transport`]: The network exchange behind a trait
//! - [`envelope`]: The canonical response envelope and its normalizer
//! - [`common`]: Error classification and pagination types
//! - [`client`]: [`AdminClient`], which ties the pieces together with the
//!   [auth guard](crate::auth::AuthGuard)
//! - [`resources`]: Thin per-resource wrappers (products, orders, ...)
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use storedesk::api::{AdminClient, RequestDescriptor};
//! use storedesk::auth::{KeyringSessionStore, TerminalNavigator};
//! use storedesk::config::Config;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = AdminClient::from_config(
//!     &Config::load()?,
//!     Arc::new(KeyringSessionStore::new()),
//!     Arc::new(TerminalNavigator::new("/orders")),
//! )?;
//!
//! let envelope = client
//!     .request(RequestDescriptor::get("/order/list").query("status", 1))
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Every failure is one [`ApiError`] variant; [`ErrorKind`] names them:
//!
//! - `AuthRequired`: no token for a protected path (no request is sent)
//! - `AuthExpired`: 401 Unauthorized
//! - `PermissionDenied`: 403 Forbidden
//! - `NotFound`: 404 Not Found
//! - `HttpStatus`: any other non-2xx status
//! - `Network`: the backend could not be reached
//! - `Parse`: the body was not JSON
//! - `Business`: the envelope reported failure

pub mod client;
pub mod common;
pub mod envelope;
pub mod request;
pub mod resources;
pub mod transport;

/// Re-export of the main API client.
pub use client::AdminClient;

pub use common::{ApiError, ErrorKind};
pub use envelope::Envelope;
pub use request::RequestDescriptor;
pub use transport::Transport;
