//
//  storedesk
//  api/resources/points.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Loyalty points ledger.

use serde::{Deserialize, Serialize};

use crate::api::common::{ApiError, ListQuery, Page};
use crate::api::envelope::Envelope;
use crate::api::request::RequestDescriptor;
use crate::api::AdminClient;

/// One change to a user's points balance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointsRecord {
    /// Ledger entry identifier.
    pub id: u64,
    /// Account the change applies to.
    pub user_id: u64,
    /// Signed change; negative for redemptions.
    #[serde(default)]
    pub change: i64,
    /// Why the balance changed.
    #[serde(default)]
    pub reason: Option<String>,
    /// Timestamp as sent by the backend.
    #[serde(default)]
    pub create_time: Option<String>,
}

/// A manual correction to a user's balance.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PointsAdjustment {
    /// Account to adjust.
    pub user_id: u64,
    /// Signed amount to add.
    pub change: i64,
    /// Shown to the customer in their ledger.
    pub reason: String,
}

impl AdminClient {
    /// Lists ledger entries, optionally for one user only.
    pub async fn list_points_records(
        &self,
        query: &ListQuery,
        user_id: Option<u64>,
    ) -> Result<Page<PointsRecord>, ApiError> {
        self.fetch(
            RequestDescriptor::get("/points/records")
                .page(query.page, query.size)
                .query_opt("userId", user_id),
        )
        .await
    }

    /// Applies a manual balance correction.
    pub async fn adjust_points(&self, adjustment: &PointsAdjustment) -> Result<Envelope, ApiError> {
        self.post("/points/adjust", adjustment).await
    }
}
