//
//  storedesk
//  api/resources/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Per-resource endpoint wrappers.
//!
//! Each wrapper is a fixed path and verb composed with
//! [`AdminClient`](super::AdminClient). Field renames a single endpoint needs
//! live in that endpoint's module and nowhere else.
//!
//! - [`products`] - Catalog management and image upload
//! - [`orders`] - Order listing, detail and shipping
//! - [`coupons`] - Coupon templates
//! - [`points`] - Member points ledger
//! - [`messages`] - Staff-to-member messages
//! - [`users`] - Member accounts
//! - [`stats`] - Dashboard statistics

pub mod coupons;
pub mod messages;
pub mod orders;
pub mod points;
pub mod products;
pub mod stats;
pub mod users;

pub use coupons::*;
pub use messages::*;
pub use orders::*;
pub use points::*;
pub use products::*;
pub use stats::*;
pub use users::*;
