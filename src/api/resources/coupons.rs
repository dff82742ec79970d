//
//  storedesk
//  api/resources/coupons.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Coupon endpoints.

use serde::{Deserialize, Serialize};

use crate::api::common::{ApiError, ListQuery, Page};
use crate::api::envelope::Envelope;
use crate::api::request::RequestDescriptor;
use crate::api::AdminClient;

/// A coupon template.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    /// Coupon identifier.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Amount taken off the order.
    #[serde(default)]
    pub discount: f64,
    /// Minimum order amount for the coupon to apply.
    #[serde(default)]
    pub threshold: f64,
    /// Number of coupons issued.
    #[serde(default)]
    pub total_count: u64,
    /// Number already claimed by customers.
    #[serde(default)]
    pub received_count: u64,
    /// Start of the validity window.
    #[serde(default)]
    pub start_time: Option<String>,
    /// End of the validity window.
    #[serde(default)]
    pub end_time: Option<String>,
}

/// Fields sent when creating a coupon.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponDraft {
    /// Display name.
    pub name: String,
    /// Amount taken off the order.
    pub discount: f64,
    /// Minimum order amount for the coupon to apply.
    pub threshold: f64,
    /// Number of coupons to issue.
    pub total_count: u64,
    /// Start of the validity window.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    /// End of the validity window.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
}

impl AdminClient {
    /// Lists coupon templates, optionally filtered by keyword.
    pub async fn list_coupons(&self, query: &ListQuery) -> Result<Page<Coupon>, ApiError> {
        self.fetch(
            RequestDescriptor::get("/coupon/list")
                .page(query.page, query.size)
                .query_opt("keyword", query.keyword.clone()),
        )
        .await
    }

    /// Creates a coupon template.
    pub async fn create_coupon(&self, draft: &CouponDraft) -> Result<Envelope, ApiError> {
        self.post("/coupon", draft).await
    }

    /// Deletes a coupon template.
    pub async fn delete_coupon(&self, id: u64) -> Result<Envelope, ApiError> {
        self.delete(&format!("/coupon/{}", id)).await
    }
}
