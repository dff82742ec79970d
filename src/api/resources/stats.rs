//
//  storedesk
//  api/resources/stats.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Dashboard statistics.
//!
//! Unlike every other wrapper, [`AdminClient::dashboard_stats`] never fails:
//! backends that have not implemented the endpoint yet answer with an error,
//! and the dashboard should then show zeros instead of nothing.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::api::AdminClient;

/// Path of the dashboard summary endpoint.
pub const DASHBOARD_ENDPOINT: &str = "/stats/dashboard";

/// Headline numbers for the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DashboardStats {
    /// Registered customer accounts.
    pub user_count: u64,
    /// Products in the catalog.
    pub product_count: u64,
    /// Orders placed, all time.
    pub order_count: u64,
    /// Orders placed today.
    pub today_order_count: u64,
    /// Sales amount today.
    pub today_sales: f64,
    /// Sales amount, all time.
    pub total_sales: f64,
}

impl AdminClient {
    /// Fetches the dashboard summary, or all zeros if that fails for any
    /// reason.
    pub async fn dashboard_stats(&self) -> DashboardStats {
        match self.get::<DashboardStats>(DASHBOARD_ENDPOINT).await {
            Ok(stats) => stats,
            Err(e) => {
                warn!(kind = %e.kind(), "dashboard stats unavailable, showing zeros: {}", e);
                DashboardStats::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_payload_fills_zeros() {
        let stats: DashboardStats = serde_json::from_str(r#"{"orderCount": 4}"#).unwrap();
        assert_eq!(stats.order_count, 4);
        assert_eq!(stats.user_count, 0);
        assert_eq!(stats.total_sales, 0.0);
    }
}
