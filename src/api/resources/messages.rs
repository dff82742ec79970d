//
//  storedesk
//  api/resources/messages.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Site messages sent from the console to customers.

use serde::{Deserialize, Serialize};

use crate::api::common::{ApiError, ListQuery, Page};
use crate::api::envelope::Envelope;
use crate::api::request::RequestDescriptor;
use crate::api::AdminClient;

/// A message already sent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Message identifier.
    pub id: u64,
    /// Subject line.
    #[serde(default)]
    pub title: String,
    /// Body text.
    #[serde(default)]
    pub content: String,
    /// Recipient; absent for broadcasts.
    #[serde(default)]
    pub user_id: Option<u64>,
    /// Whether the recipient has opened it.
    #[serde(default)]
    pub read: bool,
    /// Send timestamp as sent by the backend.
    #[serde(default)]
    pub create_time: Option<String>,
}

/// An outgoing message. Leaving `user_id` empty broadcasts it.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutgoingMessage {
    /// Subject line.
    pub title: String,
    /// Body text.
    pub content: String,
    /// Recipient, or `None` for everyone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
}

impl AdminClient {
    /// Lists sent messages, optionally filtered by keyword.
    pub async fn list_messages(&self, query: &ListQuery) -> Result<Page<Message>, ApiError> {
        self.fetch(
            RequestDescriptor::get("/message/list")
                .page(query.page, query.size)
                .query_opt("keyword", query.keyword.clone()),
        )
        .await
    }

    /// Sends a message to one customer or to everyone.
    pub async fn send_message(&self, message: &OutgoingMessage) -> Result<Envelope, ApiError> {
        self.post("/message/send", message).await
    }
}
