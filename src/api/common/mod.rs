//
//  storedesk
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Common API Types
//!
//! Shared error taxonomy and pagination types used by the core client and the
//! per-resource wrappers.
//!
//! # Overview
//!
//! - [`ApiError`] - One variant per failure kind, each with a display-ready message
//! - [`ErrorKind`] - Fieldless tag for matching on the kind alone
//! - Pagination types (re-exported from [`pagination`] submodule)
//!
//! # Example
//!
//! ```rust
//! use storedesk::api::common::{ApiError, ErrorKind};
//!
//! fn describe(result: Result<(), ApiError>) -> &'static str {
//!     match result {
//!         Ok(()) => "ok",
//!         Err(e) if e.kind() == ErrorKind::AuthExpired => "log in again",
//!         Err(_) => "failed",
//!     }
//! }
//! ```

use std::fmt;

use thiserror::Error;

mod pagination;

pub use pagination::*;

/// Fallback message for business failures without a backend message.
pub const OPERATION_FAILED: &str = "Operation failed";

/// The kind of an [`ApiError`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// No token present for a path that needs one.
    AuthRequired,
    /// The backend answered HTTP 401.
    AuthExpired,
    /// The backend answered HTTP 403.
    PermissionDenied,
    /// The backend answered HTTP 404.
    NotFound,
    /// Any other non-2xx status.
    HttpStatus,
    /// The server could not be reached.
    Network,
    /// The body could not be decoded.
    Parse,
    /// The envelope reported `success = false`.
    Business,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::AuthRequired => "authentication-required",
            Self::AuthExpired => "authentication-expired",
            Self::PermissionDenied => "permission-denied",
            Self::NotFound => "not-found",
            Self::HttpStatus => "http-status",
            Self::Network => "network",
            Self::Parse => "parse",
            Self::Business => "business-failure",
        };
        f.write_str(name)
    }
}

/// Unified error type for every request issued through the client.
///
/// Each variant's `Display` is a message fit to show to staff as-is. Where the
/// failure came from an HTTP response, the status and the backend's own message
/// are kept alongside.
///
/// | Variant | Trigger |
/// |---------|---------|
/// | `AuthRequired` | no token and the path is not public |
/// | `AuthExpired` | HTTP 401 |
/// | `PermissionDenied` | HTTP 403 |
/// | `NotFound` | HTTP 404 |
/// | `HttpStatus` | any other non-2xx |
/// | `Network` | transport could not reach the server |
/// | `Parse` | body was not valid JSON, or `data` did not fit the expected type |
/// | `Business` | envelope reported failure |
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Authentication is required but no session token exists.
    #[error("{message}")]
    AuthRequired {
        /// Display message.
        message: String,
    },

    /// The backend rejected the session token (HTTP 401).
    #[error("{message}")]
    AuthExpired {
        /// Display message.
        message: String,
        /// Message sent by the backend, if any.
        backend_message: Option<String>,
    },

    /// The session is valid but lacks permission (HTTP 403).
    #[error("{message}")]
    PermissionDenied {
        /// Display message.
        message: String,
        /// Message sent by the backend, if any.
        backend_message: Option<String>,
    },

    /// The resource does not exist (HTTP 404).
    #[error("{message}")]
    NotFound {
        /// Display message.
        message: String,
        /// Message sent by the backend, if any.
        backend_message: Option<String>,
    },

    /// Any other non-success HTTP status.
    #[error("{message}")]
    HttpStatus {
        /// Numeric HTTP status.
        status: u16,
        /// Canonical reason phrase for the status.
        status_text: String,
        /// Display message.
        message: String,
        /// Message sent by the backend, if any.
        backend_message: Option<String>,
    },

    /// The server could not be reached at all.
    #[error("{message}")]
    Network {
        /// Display message.
        message: String,
        /// Underlying transport error text.
        detail: String,
    },

    /// The response body could not be decoded.
    #[error("{message}")]
    Parse {
        /// Display message.
        message: String,
        /// Underlying decoder error text.
        detail: String,
    },

    /// The request completed but the backend reported failure.
    #[error("{message}")]
    Business {
        /// Business code from the envelope.
        code: Option<i64>,
        /// Backend message, or [`OPERATION_FAILED`].
        message: String,
    },
}

impl ApiError {
    /// Client-side failure for a protected path with no token.
    pub fn auth_required() -> Self {
        Self::AuthRequired {
            message: "Authentication required, please log in".to_string(),
        }
    }

    /// Classifies a non-2xx HTTP status.
    ///
    /// `backend_message` is whatever message the error body carried.
    pub fn from_status(status: u16, backend_message: Option<String>) -> Self {
        let status_text = reqwest::StatusCode::from_u16(status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("Unknown Status")
            .to_string();

        match status {
            401 => Self::AuthExpired {
                message: "Session expired, please log in again".to_string(),
                backend_message,
            },
            403 => Self::PermissionDenied {
                message: backend_message
                    .clone()
                    .unwrap_or_else(|| "You do not have permission to do that".to_string()),
                backend_message,
            },
            404 => Self::NotFound {
                message: "The requested resource was not found".to_string(),
                backend_message,
            },
            _ => Self::HttpStatus {
                message: format!("Request failed: HTTP {} {}", status, status_text),
                status,
                status_text,
                backend_message,
            },
        }
    }

    /// Transport-level failure.
    pub fn network(detail: impl Into<String>) -> Self {
        Self::Network {
            message: "Network error, please check your connection".to_string(),
            detail: detail.into(),
        }
    }

    /// Body decoding failure.
    pub fn parse(detail: impl Into<String>) -> Self {
        Self::Parse {
            message: "Unexpected response format from server".to_string(),
            detail: detail.into(),
        }
    }

    /// Business failure reported in the envelope.
    pub fn business(code: Option<i64>, message: Option<String>) -> Self {
        Self::Business {
            code,
            message: message.unwrap_or_else(|| OPERATION_FAILED.to_string()),
        }
    }

    /// The kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::AuthRequired { .. } => ErrorKind::AuthRequired,
            Self::AuthExpired { .. } => ErrorKind::AuthExpired,
            Self::PermissionDenied { .. } => ErrorKind::PermissionDenied,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::HttpStatus { .. } => ErrorKind::HttpStatus,
            Self::Network { .. } => ErrorKind::Network,
            Self::Parse { .. } => ErrorKind::Parse,
            Self::Business { .. } => ErrorKind::Business,
        }
    }

    /// The HTTP status this error came from, when there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::AuthExpired { .. } => Some(401),
            Self::PermissionDenied { .. } => Some(403),
            Self::NotFound { .. } => Some(404),
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The backend's own message, when it sent one.
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            Self::AuthExpired {
                backend_message, ..
            }
            | Self::PermissionDenied {
                backend_message, ..
            }
            | Self::NotFound {
                backend_message, ..
            }
            | Self::HttpStatus {
                backend_message, ..
            } => backend_message.as_deref(),
            Self::Business { message, .. } => Some(message.as_str()),
            _ => None,
        }
    }

    /// Whether this error invalidates the current session.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self.kind(), ErrorKind::AuthRequired | ErrorKind::AuthExpired)
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        use crate::exit_codes;

        match self.kind() {
            ErrorKind::AuthRequired | ErrorKind::AuthExpired => exit_codes::AUTH_ERROR,
            ErrorKind::PermissionDenied => exit_codes::PERMISSION_DENIED,
            ErrorKind::NotFound => exit_codes::NOT_FOUND,
            ErrorKind::Business => exit_codes::BUSINESS_ERROR,
            ErrorKind::Network | ErrorKind::Parse => exit_codes::NETWORK_ERROR,
            ErrorKind::HttpStatus => exit_codes::ERROR,
        }
    }

    /// Logs this error and hands it back, ready to be returned.
    pub fn logged(self) -> Self {
        match &self {
            Self::Network { detail, .. } | Self::Parse { detail, .. } => {
                tracing::error!(kind = %self.kind(), detail = %detail, "{}", self);
            }
            Self::HttpStatus { status, .. } => {
                tracing::error!(kind = %self.kind(), status, "{}", self);
            }
            _ => {
                tracing::warn!(
                    kind = %self.kind(),
                    backend_message = self.backend_message().unwrap_or(""),
                    "{}",
                    self
                );
            }
        }
        self
    }
}

/// Pulls a human-readable message out of an error response body.
///
/// Looks for the envelope message fields first, then a bare `error` string.
/// Returns `None` for empty or non-JSON bodies.
pub fn extract_error_message(body: &str) -> Option<String> {
    let json = serde_json::from_str::<serde_json::Value>(body).ok()?;

    super::envelope::MESSAGE_FIELDS
        .iter()
        .chain(std::iter::once(&"error"))
        .filter_map(|field| json.get(*field).and_then(|m| m.as_str()))
        .find(|m| !m.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert_eq!(ApiError::from_status(401, None).kind(), ErrorKind::AuthExpired);
        assert_eq!(
            ApiError::from_status(403, None).kind(),
            ErrorKind::PermissionDenied
        );
        assert_eq!(ApiError::from_status(404, None).kind(), ErrorKind::NotFound);
        assert_eq!(ApiError::from_status(500, None).kind(), ErrorKind::HttpStatus);
        assert_eq!(ApiError::from_status(418, None).kind(), ErrorKind::HttpStatus);
    }

    #[test]
    fn test_http_status_carries_code_and_text() {
        match ApiError::from_status(503, Some("down".into())) {
            ApiError::HttpStatus {
                status,
                status_text,
                message,
                backend_message,
            } => {
                assert_eq!(status, 503);
                assert_eq!(status_text, "Service Unavailable");
                assert_eq!(message, "Request failed: HTTP 503 Service Unavailable");
                assert_eq!(backend_message.as_deref(), Some("down"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_permission_denied_prefers_backend_message() {
        let err = ApiError::from_status(403, Some("Admins only".into()));
        assert_eq!(err.to_string(), "Admins only");
        assert_eq!(err.status(), Some(403));
    }

    #[test]
    fn test_business_fallback_message() {
        assert_eq!(ApiError::business(Some(500), None).to_string(), OPERATION_FAILED);
        assert_eq!(
            ApiError::business(Some(500), Some("m".into())).to_string(),
            "m"
        );
    }

    #[test]
    fn test_network_and_parse_messages_differ() {
        let network = ApiError::network("connection refused");
        let parse = ApiError::parse("expected value");
        assert_ne!(network.to_string(), parse.to_string());
        assert_eq!(network.exit_code(), crate::exit_codes::NETWORK_ERROR);
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(ErrorKind::Business.to_string(), "business-failure");
        assert_eq!(ErrorKind::AuthRequired.to_string(), "authentication-required");
    }

    #[test]
    fn test_extract_error_message() {
        assert_eq!(
            extract_error_message(r#"{"msg": "bad token"}"#).as_deref(),
            Some("bad token")
        );
        assert_eq!(
            extract_error_message(r#"{"message": "", "error": "Forbidden"}"#).as_deref(),
            Some("Forbidden")
        );
        assert_eq!(extract_error_message("<html>"), None);
        assert_eq!(extract_error_message(""), None);
    }
}
