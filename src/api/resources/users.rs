//
//  storedesk
//  api/resources/users.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Customer accounts.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::api::common::{ApiError, ListQuery, Page};
use crate::api::envelope::Envelope;
use crate::api::request::RequestDescriptor;
use crate::api::AdminClient;

/// A customer account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Account identifier.
    pub id: u64,
    /// Sign-in name.
    pub username: String,
    /// Display name.
    #[serde(default)]
    pub nickname: Option<String>,
    /// Contact phone number.
    #[serde(default)]
    pub phone: Option<String>,
    /// Current points balance.
    #[serde(default)]
    pub points: i64,
    /// Disabled accounts cannot sign in to the storefront.
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    /// Registration timestamp as sent by the backend.
    #[serde(default)]
    pub create_time: Option<String>,
}

fn enabled_by_default() -> bool {
    true
}

impl AdminClient {
    /// Lists customer accounts, optionally filtered by keyword.
    pub async fn list_users(&self, query: &ListQuery) -> Result<Page<User>, ApiError> {
        self.fetch(
            RequestDescriptor::get("/user/list")
                .page(query.page, query.size)
                .query_opt("keyword", query.keyword.clone()),
        )
        .await
    }

    /// Enables or disables a customer account.
    pub async fn set_user_enabled(&self, id: u64, enabled: bool) -> Result<Envelope, ApiError> {
        self.request(
            RequestDescriptor::put(format!("/user/{}/status", id))
                .json(json!({ "enabled": enabled })),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_enabled_defaults_to_true() {
        let user: User = serde_json::from_str(r#"{"id": 3, "username": "amy"}"#).unwrap();
        assert!(user.enabled);
        assert_eq!(user.points, 0);
    }
}
