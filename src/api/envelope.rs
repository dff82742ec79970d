//
//  storedesk
//  api/envelope.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Response Envelope
//!
//! The backend does not answer every endpoint with the same shape. Some
//! endpoints send an explicit `success` boolean, others only a numeric `code`;
//! some name the message `message`, others `msg`. [`normalize`] folds all of
//! them into one [`Envelope`].
//!
//! ## Compatibility Shim
//!
//! Field names are probed in a fixed priority order:
//!
//! | Envelope field | Candidates |
//! |----------------|------------|
//! | `success` | [`SUCCESS_FIELDS`], else `code == 200` |
//! | `message` | [`MESSAGE_FIELDS`] |
//! | `code` | `code` |
//! | `data` | `data` |
//!
//! The `code == 200` fallback assumes the backend reuses HTTP status numbers
//! as business codes. A backend that uses other success codes will be
//! misclassified.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::common::ApiError;

/// Candidate names for the explicit success flag, in priority order.
pub const SUCCESS_FIELDS: &[&str] = &["success"];

/// Candidate names for the message, in priority order.
pub const MESSAGE_FIELDS: &[&str] = &["message", "msg"];

/// Name of the business code field.
pub const CODE_FIELD: &str = "code";

/// Name of the payload field.
pub const DATA_FIELD: &str = "data";

/// Business code that counts as success when no explicit flag is sent.
pub const SUCCESS_CODE: i64 = 200;

/// The canonical response shape every backend answer is normalized into.
///
/// Missing fields are `None`, never JSON `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T = Value> {
    /// Whether the backend considers the operation successful.
    pub success: bool,

    /// Business code, passed through.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<i64>,

    /// Backend message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// Whether the envelope must be raised as a business failure.
    pub fn is_failure(&self) -> bool {
        !self.success && self.code != Some(SUCCESS_CODE)
    }

    /// Returns the payload, or a parse error when the backend sent none.
    pub fn into_data(self) -> Result<T, ApiError> {
        self.data
            .ok_or_else(|| ApiError::parse("response has no data field").logged())
    }
}

impl Envelope<Value> {
    /// Decodes the payload into `T`.
    ///
    /// A payload that does not fit `T` is a parse error.
    pub fn into_typed<T: DeserializeOwned>(self) -> Result<Envelope<T>, ApiError> {
        let data = match self.data {
            Some(value) => Some(
                serde_json::from_value(value)
                    .map_err(|e| ApiError::parse(e.to_string()).logged())?,
            ),
            None => None,
        };

        Ok(Envelope {
            success: self.success,
            code: self.code,
            message: self.message,
            data,
        })
    }
}

/// Normalizes a decoded response body into an [`Envelope`].
///
/// Anything other than a JSON object yields an unsuccessful envelope with
/// every optional field absent.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use storedesk::api::envelope::normalize;
///
/// let envelope = normalize(json!({"code": 200, "msg": "ok", "data": [1]}));
/// assert!(envelope.success);
/// assert_eq!(envelope.message.as_deref(), Some("ok"));
/// assert_eq!(envelope.data, Some(json!([1])));
/// ```
pub fn normalize(raw: Value) -> Envelope<Value> {
    let Value::Object(mut fields) = raw else {
        return Envelope {
            success: false,
            code: None,
            message: None,
            data: None,
        };
    };

    let code = fields.get(CODE_FIELD).and_then(Value::as_i64);

    let explicit = SUCCESS_FIELDS
        .iter()
        .find_map(|name| fields.get(*name).and_then(Value::as_bool));
    let success = explicit.unwrap_or(code == Some(SUCCESS_CODE));

    let message = MESSAGE_FIELDS
        .iter()
        .filter_map(|name| fields.get(*name).and_then(Value::as_str))
        .find(|m| !m.is_empty())
        .map(str::to_string);

    let data = match fields.remove(DATA_FIELD) {
        Some(Value::Null) | None => None,
        Some(value) => Some(value),
    };

    Envelope {
        success,
        code,
        message,
        data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_code_200_without_flag_is_success() {
        let env = normalize(json!({"code": 200, "data": {"id": 1}}));
        assert!(env.success);
        assert_eq!(env.code, Some(200));
        assert_eq!(env.message, None);
        assert_eq!(env.data, Some(json!({"id": 1})));
        assert!(!env.is_failure());
    }

    #[test]
    fn test_explicit_flag_wins_over_code() {
        let env = normalize(json!({"success": true, "code": 0}));
        assert!(env.success);

        let env = normalize(json!({"success": false, "code": 500, "message": "m"}));
        assert!(!env.success);
        assert!(env.is_failure());
        assert_eq!(env.message.as_deref(), Some("m"));
    }

    #[test]
    fn test_explicit_false_with_code_200_is_not_raised() {
        let env = normalize(json!({"success": false, "code": 200}));
        assert!(!env.success);
        assert!(!env.is_failure());
    }

    #[test]
    fn test_message_prefers_message_over_msg() {
        let env = normalize(json!({"message": "a", "msg": "b"}));
        assert_eq!(env.message.as_deref(), Some("a"));

        let env = normalize(json!({"msg": "b"}));
        assert_eq!(env.message.as_deref(), Some("b"));

        let env = normalize(json!({"message": "", "msg": "b"}));
        assert_eq!(env.message.as_deref(), Some("b"));
    }

    #[test]
    fn test_null_data_is_absent() {
        let env = normalize(json!({"code": 200, "data": null}));
        assert_eq!(env.data, None);
    }

    #[test]
    fn test_non_object_body() {
        let env = normalize(json!([1, 2]));
        assert!(!env.success);
        assert_eq!(env.code, None);
        assert_eq!(env.data, None);
        assert!(env.is_failure());
    }

    #[test]
    fn test_empty_object_fails_without_code() {
        let env = normalize(json!({}));
        assert!(env.is_failure());
    }

    #[test]
    fn test_into_typed() {
        #[derive(Debug, Deserialize, PartialEq)]
        struct Item {
            id: u32,
        }

        let env = normalize(json!({"code": 200, "data": {"id": 9}}));
        let typed: Envelope<Item> = env.into_typed().unwrap();
        assert_eq!(typed.data, Some(Item { id: 9 }));

        let env = normalize(json!({"code": 200, "data": "nope"}));
        let err = env.into_typed::<Item>().unwrap_err();
        assert_eq!(err.kind(), crate::api::common::ErrorKind::Parse);
    }

    #[test]
    fn test_serialized_envelope_omits_absent_fields() {
        let env = normalize(json!({"success": true}));
        assert_eq!(serde_json::to_value(&env).unwrap(), json!({"success": true}));
    }
}
