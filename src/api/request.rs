//
//  storedesk
//  api/request.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Request Descriptors
//!
//! Every call into the backend starts life as a [`RequestDescriptor`]: a
//! logical endpoint path, an HTTP verb, optional query parameters, an optional
//! body and optional extra headers. [`RequestDescriptor::build`] turns it into
//! a [`BuiltRequest`] that carries an absolute URL and the final header set.
//!
//! ## Normalization Rules
//!
//! - The path always starts with exactly one `/` and runs of `/` collapse to one
//! - Query entries whose value is `null` or an empty string are dropped, so
//!   optional filters can be passed through without special-casing
//! - `GET` requests carry one `_t` cache-busting parameter; other verbs never do
//! - The base URL and path meet at exactly one `/`
//! - Default headers declare JSON and disable caching; caller headers win
//!
//! Building never fails.
//!
//! ## Example
//!
//! ```rust
//! use storedesk::api::RequestDescriptor;
//!
//! let built = RequestDescriptor::get("//products//list")
//!     .query("page", 1)
//!     .query("keyword", "")
//!     .build("http://localhost:8080/api/");
//!
//! assert!(built.url.starts_with("http://localhost:8080/api/products/list?page=1&_t="));
//! ```

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};

use reqwest::Method;
use serde_json::Value;

/// Name of the cache-busting query parameter appended to `GET` requests.
pub const CACHE_BUST_PARAM: &str = "_t";

/// Headers sent with every request unless the caller overrides them.
///
/// Names are lowercase; header names are compared case-insensitively.
pub const DEFAULT_HEADERS: &[(&str, &str)] = &[
    ("content-type", "application/json"),
    ("cache-control", "no-cache, no-store, must-revalidate"),
    ("pragma", "no-cache"),
];

static LAST_CACHE_STAMP: AtomicI64 = AtomicI64::new(0);

/// A file attached to a request as a multipart upload.
#[derive(Debug, Clone, PartialEq)]
pub struct FilePart {
    /// Form field the file is sent under.
    pub field: String,
    /// File name reported to the server.
    pub file_name: String,
    /// MIME type, e.g. `image/png`.
    pub mime: String,
    /// Raw file contents.
    pub bytes: Vec<u8>,
    /// Extra plain-text form fields sent alongside the file.
    pub fields: Vec<(String, String)>,
}

/// Payload carried by a request.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// A JSON document.
    Json(Value),
    /// A multipart file upload.
    File(FilePart),
}

/// A request as the caller describes it, before normalization.
///
/// Descriptors are cheap to create and are built once per call.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    path: String,
    method: Method,
    query: Vec<(String, Value)>,
    body: Option<RequestBody>,
    headers: Vec<(String, String)>,
}

/// A fully normalized request ready for the transport.
#[derive(Debug, Clone)]
pub struct BuiltRequest {
    /// HTTP verb.
    pub method: Method,
    /// Normalized logical path (leading `/`, no repeated slashes, no base URL).
    pub path: String,
    /// Absolute URL including the query string.
    pub url: String,
    /// Final header set keyed by lowercase header name.
    pub headers: BTreeMap<String, String>,
    /// Optional payload.
    pub body: Option<RequestBody>,
}

impl RequestDescriptor {
    /// Creates a descriptor for `path` with the given verb.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method,
            query: Vec::new(),
            body: None,
            headers: Vec::new(),
        }
    }

    /// Shorthand for a `GET` descriptor.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// Shorthand for a `POST` descriptor.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// Shorthand for a `PUT` descriptor.
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    /// Shorthand for a `DELETE` descriptor.
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Adds a query parameter.
    ///
    /// `null` and empty-string values are accepted here and dropped at build time.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Adds a query parameter only when `value` is `Some`.
    pub fn query_opt<V: Into<Value>>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.query(key, value),
            None => self.query(key, Value::Null),
        }
    }

    /// Adds the conventional 1-based `page` and `size` pagination parameters.
    pub fn page(self, page: u32, size: u32) -> Self {
        self.query("page", page).query("size", size)
    }

    /// Sets a JSON body.
    pub fn json(mut self, body: impl Into<Value>) -> Self {
        self.body = Some(RequestBody::Json(body.into()));
        self
    }

    /// Sets a multipart file body.
    pub fn file(mut self, part: FilePart) -> Self {
        self.body = Some(RequestBody::File(part));
        self
    }

    /// Adds a header that overrides any default of the same name.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// The HTTP verb of this descriptor.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The logical path as given by the caller.
    pub fn raw_path(&self) -> &str {
        &self.path
    }

    /// Normalizes the descriptor against `base_url`.
    pub fn build(self, base_url: &str) -> BuiltRequest {
        let path = normalize_path(&self.path);

        let mut pairs: Vec<(String, String)> = self
            .query
            .into_iter()
            .filter_map(|(key, value)| query_value(&value).map(|v| (key, v)))
            .collect();

        if self.method == Method::GET {
            pairs.push((CACHE_BUST_PARAM.to_string(), cache_stamp().to_string()));
        }

        let mut url = join_url(base_url, &path);
        if !pairs.is_empty() {
            let mut serializer = url::form_urlencoded::Serializer::new(String::new());
            for (key, value) in &pairs {
                serializer.append_pair(key, value);
            }
            url.push(if url.contains('?') { '&' } else { '?' });
            url.push_str(&serializer.finish());
        }

        let mut headers: BTreeMap<String, String> = DEFAULT_HEADERS
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();

        // The transport writes its own multipart content type with the boundary.
        if matches!(self.body, Some(RequestBody::File(_))) {
            headers.remove("content-type");
        }

        for (name, value) in self.headers {
            headers.insert(name.to_ascii_lowercase(), value);
        }

        BuiltRequest {
            method: self.method,
            path,
            url,
            headers,
            body: self.body,
        }
    }
}

impl BuiltRequest {
    /// Returns a header value by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Returns the query pairs of the built URL, in order.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        match self.url.split_once('?') {
            Some((_, query)) => url::form_urlencoded::parse(query.as_bytes())
                .into_owned()
                .collect(),
            None => Vec::new(),
        }
    }
}

/// Ensures a single leading `/` and collapses repeated slashes.
///
/// # Example
///
/// ```rust
/// use storedesk::api::request::normalize_path;
///
/// assert_eq!(normalize_path("orders//42"), "/orders/42");
/// assert_eq!(normalize_path("///orders"), "/orders");
/// assert_eq!(normalize_path(""), "/");
/// ```
pub fn normalize_path(path: &str) -> String {
    let mut normalized = String::with_capacity(path.len() + 1);
    normalized.push('/');
    for c in path.chars() {
        if c == '/' && normalized.ends_with('/') {
            continue;
        }
        normalized.push(c);
    }
    normalized
}

/// Joins a base URL and a normalized path with exactly one `/` at the seam.
///
/// # Example
///
/// ```rust
/// use storedesk::api::request::join_url;
///
/// assert_eq!(join_url("http://host/api/", "/users"), "http://host/api/users");
/// assert_eq!(join_url("http://host/api", "users"), "http://host/api/users");
/// ```
pub fn join_url(base_url: &str, path: &str) -> String {
    let base = base_url.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    format!("{}/{}", base, path)
}

/// Renders a query value, or `None` when the entry must be omitted.
fn query_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}

/// Current time in milliseconds, forced to increase on every call.
fn cache_stamp() -> i64 {
    let now = chrono::Utc::now().timestamp_millis();
    let previous = LAST_CACHE_STAMP
        .fetch_update(Ordering::AcqRel, Ordering::Acquire, |last| {
            Some(now.max(last + 1))
        })
        .unwrap_or(now);
    now.max(previous + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_path_collapses_slashes() {
        assert_eq!(normalize_path("a//b///c"), "/a/b/c");
        assert_eq!(normalize_path("/a"), "/a");
        assert_eq!(normalize_path("////a"), "/a");
        assert_eq!(normalize_path("a/"), "/a/");
    }

    #[test]
    fn test_join_url_single_seam() {
        for base in ["http://h/api", "http://h/api/", "http://h/api//"] {
            for path in ["/x", "x"] {
                assert_eq!(join_url(base, path), "http://h/api/x");
            }
        }
    }

    #[test]
    fn test_empty_query_values_are_dropped() {
        let built = RequestDescriptor::post("/orders")
            .query("status", "")
            .query("keyword", Value::Null)
            .query_opt::<&str>("owner", None)
            .query("page", 2)
            .query("paid", true)
            .query("name", "a b&c")
            .build("http://h");

        assert_eq!(
            built.query_pairs(),
            vec![
                ("page".to_string(), "2".to_string()),
                ("paid".to_string(), "true".to_string()),
                ("name".to_string(), "a b&c".to_string()),
            ]
        );
    }

    #[test]
    fn test_get_gets_exactly_one_cache_buster() {
        let built = RequestDescriptor::get("/products").build("http://h");
        let stamps: Vec<_> = built
            .query_pairs()
            .into_iter()
            .filter(|(k, _)| k == CACHE_BUST_PARAM)
            .collect();
        assert_eq!(stamps.len(), 1);
    }

    #[test]
    fn test_non_get_has_no_cache_buster() {
        for method in [Method::POST, Method::PUT, Method::DELETE, Method::PATCH] {
            let built = RequestDescriptor::new(method, "/products").build("http://h");
            assert_eq!(built.url, "http://h/products");
        }
    }

    #[test]
    fn test_cache_buster_changes_between_calls() {
        let stamp = |b: &BuiltRequest| {
            b.query_pairs()
                .into_iter()
                .find(|(k, _)| k == CACHE_BUST_PARAM)
                .map(|(_, v)| v.parse::<i64>().unwrap())
                .unwrap()
        };
        let first = RequestDescriptor::get("/a").build("http://h");
        let second = RequestDescriptor::get("/a").build("http://h");
        assert!(stamp(&second) > stamp(&first));
    }

    #[test]
    fn test_default_headers_and_caller_override() {
        let built = RequestDescriptor::post("/a")
            .header("Content-Type", "text/plain")
            .header("X-Trace", "1")
            .json(json!({"a": 1}))
            .build("http://h");

        assert_eq!(built.header("content-type"), Some("text/plain"));
        assert_eq!(built.header("X-TRACE"), Some("1"));
        assert_eq!(
            built.header("cache-control"),
            Some("no-cache, no-store, must-revalidate")
        );
        assert_eq!(built.header("pragma"), Some("no-cache"));
    }

    #[test]
    fn test_file_body_drops_json_content_type() {
        let built = RequestDescriptor::post("/upload")
            .file(FilePart {
                field: "file".into(),
                file_name: "a.png".into(),
                mime: "image/png".into(),
                bytes: vec![1, 2, 3],
                fields: Vec::new(),
            })
            .build("http://h");
        assert_eq!(built.header("content-type"), None);
        assert!(built.header("cache-control").is_some());
    }

    #[test]
    fn test_path_with_existing_query_is_extended() {
        let built = RequestDescriptor::delete("/coupons?force=1")
            .query("id", 3)
            .build("http://h/");
        assert_eq!(built.url, "http://h/coupons?force=1&id=3");
    }
}
