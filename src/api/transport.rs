//
//  storedesk
//  api/transport.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Transport
//!
//! The [`Transport`] trait is the seam between the client and the network.
//! [`ReqwestTransport`] is the production implementation; tests swap in a
//! scripted one to count calls and feed canned responses.
//!
//! A transport only reports whether the server could be reached. Status codes
//! and bodies come back untouched in a [`RawResponse`]; decoding happens in
//! [`decode_body`] so that a bad body is a parse error, never a network error.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use super::common::ApiError;
use super::request::{BuiltRequest, RequestBody};

/// Default request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// A response as it came off the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body as text.
    pub body: String,
}

impl RawResponse {
    /// Creates a response from a status and body.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Failure to complete an exchange with the server.
#[derive(Error, Debug)]
pub enum TransportError {
    /// The request did not finish within the configured timeout.
    #[error("request timed out")]
    Timeout,

    /// The server could not be reached (DNS, refused connection, TLS, ...).
    #[error("could not reach server: {0}")]
    Unreachable(String),

    /// The connection dropped while reading the body.
    #[error("failed to read response body: {0}")]
    Body(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_body() || err.is_decode() {
            Self::Body(err.to_string())
        } else {
            Self::Unreachable(err.to_string())
        }
    }
}

impl From<TransportError> for ApiError {
    fn from(err: TransportError) -> Self {
        ApiError::network(err.to_string())
    }
}

/// Executes built requests against the network.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Performs one exchange and returns the raw status and body text.
    async fn execute(&self, request: &BuiltRequest) -> Result<RawResponse, TransportError>;
}

/// [`Transport`] backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: Client,
}

impl ReqwestTransport {
    /// Creates a transport with the given per-request timeout.
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        Ok(Self {
            http: Client::builder()
                .user_agent(format!("sd/{}", crate::VERSION))
                .timeout(timeout)
                .build()?,
        })
    }

    /// Wraps an existing client.
    pub fn from_client(http: Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: &BuiltRequest) -> Result<RawResponse, TransportError> {
        debug!(method = %request.method, url = %request.url, "sending request");

        let mut builder = self
            .http
            .request(request.method.clone(), &request.url)
            .headers(header_map(request));

        builder = match &request.body {
            Some(RequestBody::Json(value)) => builder.body(value.to_string()),
            Some(RequestBody::File(file)) => {
                let part = Part::bytes(file.bytes.clone()).file_name(file.file_name.clone());
                let part = match part.mime_str(&file.mime) {
                    Ok(part) => part,
                    Err(e) => {
                        warn!(mime = %file.mime, "ignoring invalid upload mime type: {}", e);
                        Part::bytes(file.bytes.clone()).file_name(file.file_name.clone())
                    }
                };
                let form = file
                    .fields
                    .iter()
                    .fold(Form::new(), |form, (k, v)| form.text(k.clone(), v.clone()))
                    .part(file.field.clone(), part);
                builder.multipart(form)
            }
            None => builder,
        };

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        debug!(status, bytes = body.len(), "received response");
        Ok(RawResponse { status, body })
    }
}

/// Converts the built header set, skipping entries that are not valid HTTP.
fn header_map(request: &BuiltRequest) -> HeaderMap {
    let mut headers = HeaderMap::new();
    for (name, value) in &request.headers {
        match (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            (Ok(name), Ok(value)) => {
                headers.insert(name, value);
            }
            _ => warn!(header = %name, "skipping invalid header"),
        }
    }
    headers
}

/// Decodes a response body as JSON.
///
/// An empty or whitespace-only body decodes to an empty object. A non-empty
/// body that is not JSON is a parse error.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use storedesk::api::transport::decode_body;
///
/// assert_eq!(decode_body("").unwrap(), json!({}));
/// assert_eq!(decode_body(r#"{"code": 200}"#).unwrap(), json!({"code": 200}));
/// assert!(decode_body("<html>").is_err());
/// ```
pub fn decode_body(body: &str) -> Result<Value, ApiError> {
    if body.trim().is_empty() {
        return Ok(Value::Object(serde_json::Map::new()));
    }
    serde_json::from_str(body).map_err(|e| ApiError::parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::common::ErrorKind;
    use serde_json::json;

    #[test]
    fn test_empty_body_is_empty_object() {
        assert_eq!(decode_body("").unwrap(), json!({}));
        assert_eq!(decode_body("  \n").unwrap(), json!({}));
    }

    #[test]
    fn test_malformed_body_is_parse_error() {
        let err = decode_body("{not json").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[test]
    fn test_transport_error_maps_to_network() {
        let err: ApiError = TransportError::Timeout.into();
        assert_eq!(err.kind(), ErrorKind::Network);
        assert_eq!(err.to_string(), "Network error, please check your connection");
    }

    #[test]
    fn test_raw_response_success_range() {
        assert!(RawResponse::new(204, "").is_success());
        assert!(!RawResponse::new(302, "").is_success());
    }

    #[tokio::test]
    async fn test_unreachable_server_is_network_error() {
        let transport = ReqwestTransport::new(Duration::from_secs(2)).unwrap();
        let request = crate::api::RequestDescriptor::post("/ping").build("http://127.0.0.1:1");
        let err = transport.execute(&request).await.unwrap_err();
        assert!(matches!(
            err,
            TransportError::Unreachable(_) | TransportError::Timeout
        ));
    }
}
