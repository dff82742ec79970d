//
//  storedesk
//  api/resources/orders.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Order endpoints.
//!
//! The backend reports order status as a small integer. [`OrderStatus`] maps
//! it to a label here, local to the orders wrapper.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::api::common::{ApiError, ListQuery, Page};
use crate::api::envelope::Envelope;
use crate::api::request::RequestDescriptor;
use crate::api::AdminClient;

/// Lifecycle state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum OrderStatus {
    /// Placed, awaiting payment.
    Unpaid,
    /// Paid, awaiting shipment.
    Paid,
    /// Handed to the carrier.
    Shipped,
    /// Received by the customer.
    Completed,
    /// Cancelled before completion.
    Cancelled,
    /// Refunded after payment.
    Refunded,
    /// A code this client does not know.
    Other(i64),
}

impl From<i64> for OrderStatus {
    fn from(code: i64) -> Self {
        match code {
            0 => Self::Unpaid,
            1 => Self::Paid,
            2 => Self::Shipped,
            3 => Self::Completed,
            4 => Self::Cancelled,
            5 => Self::Refunded,
            other => Self::Other(other),
        }
    }
}

impl From<OrderStatus> for i64 {
    fn from(status: OrderStatus) -> Self {
        match status {
            OrderStatus::Unpaid => 0,
            OrderStatus::Paid => 1,
            OrderStatus::Shipped => 2,
            OrderStatus::Completed => 3,
            OrderStatus::Cancelled => 4,
            OrderStatus::Refunded => 5,
            OrderStatus::Other(code) => code,
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unpaid => write!(f, "unpaid"),
            Self::Paid => write!(f, "paid"),
            Self::Shipped => write!(f, "shipped"),
            Self::Completed => write!(f, "completed"),
            Self::Cancelled => write!(f, "cancelled"),
            Self::Refunded => write!(f, "refunded"),
            Self::Other(code) => write!(f, "status {}", code),
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "unpaid" => Ok(Self::Unpaid),
            "paid" => Ok(Self::Paid),
            "shipped" => Ok(Self::Shipped),
            "completed" => Ok(Self::Completed),
            "cancelled" | "canceled" => Ok(Self::Cancelled),
            "refunded" => Ok(Self::Refunded),
            other => other
                .parse::<i64>()
                .map(Self::from)
                .map_err(|_| format!("unknown order status: {}", s)),
        }
    }
}

/// An order as listed in the console.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Order identifier.
    pub id: u64,

    /// Human-facing order number.
    #[serde(default)]
    pub order_no: String,

    /// Buyer account id.
    #[serde(default)]
    pub user_id: Option<u64>,

    /// Amount charged.
    #[serde(default, alias = "payAmount")]
    pub total_amount: f64,

    /// Current status.
    pub status: OrderStatus,

    /// Carrier tracking number once shipped.
    #[serde(default)]
    pub tracking_no: Option<String>,

    /// Creation timestamp as sent by the backend.
    #[serde(default)]
    pub create_time: Option<String>,
}

/// Shipment details for [`AdminClient::ship_order`].
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Shipment {
    /// Carrier name.
    pub carrier: String,
    /// Tracking number.
    pub tracking_no: String,
}

impl AdminClient {
    /// Lists orders, optionally filtered by status and keyword.
    pub async fn list_orders(
        &self,
        query: &ListQuery,
        status: Option<OrderStatus>,
    ) -> Result<Page<Order>, ApiError> {
        self.fetch(
            RequestDescriptor::get("/order/list")
                .page(query.page, query.size)
                .query_opt("keyword", query.keyword.clone())
                .query_opt("status", status.map(i64::from)),
        )
        .await
    }

    /// Fetches one order.
    pub async fn get_order(&self, id: u64) -> Result<Order, ApiError> {
        self.get(&format!("/order/{}", id)).await
    }

    /// Marks an order as shipped.
    pub async fn ship_order(&self, id: u64, shipment: &Shipment) -> Result<Envelope, ApiError> {
        self.put(&format!("/order/{}/ship", id), shipment).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let order: Order =
            serde_json::from_str(r#"{"id": 1, "orderNo": "A1", "status": 2, "payAmount": 12.5}"#)
                .unwrap();
        assert_eq!(order.status, OrderStatus::Shipped);
        assert_eq!(order.total_amount, 12.5);
        assert_eq!(order.status.to_string(), "shipped");

        let unknown: OrderStatus = serde_json::from_str("9").unwrap();
        assert_eq!(unknown, OrderStatus::Other(9));
        assert_eq!(serde_json::to_string(&unknown).unwrap(), "9");
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!("Paid".parse::<OrderStatus>().unwrap(), OrderStatus::Paid);
        assert_eq!("canceled".parse::<OrderStatus>().unwrap(), OrderStatus::Cancelled);
        assert_eq!("7".parse::<OrderStatus>().unwrap(), OrderStatus::Other(7));
        assert!("lost".parse::<OrderStatus>().is_err());
    }
}
