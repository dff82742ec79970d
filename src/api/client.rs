//
//  storedesk
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Admin API Client
//!
//! [`AdminClient::request`] is the single path every feature takes to the
//! backend:
//!
//! 1. the [`RequestDescriptor`] is built against the base URL;
//! 2. the [`AuthGuard`] checks the allow-list and attaches the bearer token,
//!    failing protected calls without a token before any network traffic;
//! 3. the [`Transport`] performs the exchange;
//! 4. non-2xx statuses are classified (401 and token-less 403 end the session);
//! 5. the body is decoded and [normalized](super::envelope::normalize);
//! 6. an envelope reporting failure becomes a business error.
//!
//! Every error is logged before it is returned.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::common::{extract_error_message, ApiError};
use super::envelope::{normalize, Envelope};
use super::request::RequestDescriptor;
use super::transport::{decode_body, ReqwestTransport, Transport};
use crate::auth::{AuthGuard, Navigator, Session, SessionStore};
use crate::config::Config;

/// Path of the login endpoint.
pub const LOGIN_ENDPOINT: &str = "/auth/login";

/// Path of the logout endpoint.
pub const LOGOUT_ENDPOINT: &str = "/auth/logout";

/// The main HTTP client for the store backend.
///
/// Cheap to share behind an `Arc`; concurrent calls are independent.
///
/// # Example
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use storedesk::api::{AdminClient, RequestDescriptor};
/// use storedesk::auth::{MemorySessionStore, TerminalNavigator};
/// use storedesk::config::Config;
///
/// # async fn example() -> anyhow::Result<()> {
/// let client = AdminClient::from_config(
///     &Config::default(),
///     Arc::new(MemorySessionStore::with_token("token")),
///     Arc::new(TerminalNavigator::new("/products")),
/// )?;
///
/// let envelope = client
///     .request(RequestDescriptor::get("/products").page(1, 20))
///     .await?;
/// println!("{:?}", envelope.data);
/// # Ok(())
/// # }
/// ```
pub struct AdminClient {
    base_url: String,
    transport: Arc<dyn Transport>,
    guard: AuthGuard,
}

impl AdminClient {
    /// Creates a client from its parts.
    pub fn new(
        base_url: impl Into<String>,
        transport: Arc<dyn Transport>,
        store: Arc<dyn SessionStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            transport,
            guard: AuthGuard::new(store, navigator),
        }
    }

    /// Creates a client using the configured base URL, timeout, allow-list
    /// and login path, talking to the network through `reqwest`.
    pub fn from_config(
        config: &Config,
        store: Arc<dyn SessionStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self> {
        let transport = ReqwestTransport::new(Duration::from_secs(config.api.timeout_secs))?;
        let guard = AuthGuard::new(store, navigator)
            .with_public_paths(config.api.public_paths.clone())
            .with_login_path(config.api.login_path.clone());

        Ok(Self {
            base_url: config.base_url(),
            transport: Arc::new(transport),
            guard,
        })
    }

    /// Replaces the auth guard, e.g. to change the allow-list.
    pub fn with_guard(mut self, guard: AuthGuard) -> Self {
        self.guard = guard;
        self
    }

    /// Replaces the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// The base URL requests are resolved against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The auth guard in use.
    pub fn guard(&self) -> &AuthGuard {
        &self.guard
    }

    /// The current session.
    pub fn current_session(&self) -> Session {
        self.guard.session()
    }

    /// Issues a request and returns the normalized envelope.
    ///
    /// # Errors
    ///
    /// Returns one [`ApiError`] per failure kind; see the module docs for the
    /// order in which they are checked.
    pub async fn request(&self, descriptor: RequestDescriptor) -> Result<Envelope, ApiError> {
        let mut request = descriptor.build(&self.base_url);
        let session = self.guard.session();
        let has_token = session.is_authenticated();

        if !has_token && self.guard.requires_auth(&request.path) {
            warn!(path = %request.path, "no session for protected endpoint");
            self.guard.handle_auth_failure();
            return Err(ApiError::auth_required().logged());
        }

        let sent_token = session.token.filter(|_| has_token);
        if let Some(token) = sent_token.as_deref() {
            request
                .headers
                .entry("authorization".to_string())
                .or_insert_with(|| format!("Bearer {}", token));
        }

        let response = self
            .transport
            .execute(&request)
            .await
            .map_err(|e| ApiError::from(e).logged())?;

        if !response.is_success() {
            let backend_message = extract_error_message(&response.body);
            let error = ApiError::from_status(response.status, backend_message);
            match (response.status, sent_token.as_deref()) {
                (401, Some(token)) => {
                    self.guard.handle_rejected_token(token);
                }
                (401, None) | (403, None) => {
                    self.guard.handle_auth_failure();
                }
                _ => {}
            }
            return Err(error.logged());
        }

        let raw = decode_body(&response.body).map_err(ApiError::logged)?;
        let envelope = normalize(raw);

        if envelope.is_failure() {
            return Err(ApiError::business(envelope.code, envelope.message).logged());
        }

        debug!(
            path = %request.path,
            status = response.status,
            success = envelope.success,
            "request completed"
        );
        Ok(envelope)
    }

    /// Issues a request and decodes the envelope's payload into `T`.
    pub async fn send<T: DeserializeOwned>(
        &self,
        descriptor: RequestDescriptor,
    ) -> Result<Envelope<T>, ApiError> {
        self.request(descriptor).await?.into_typed()
    }

    /// Issues a request and returns only the payload, which must be present.
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        descriptor: RequestDescriptor,
    ) -> Result<T, ApiError> {
        self.send(descriptor).await?.into_data()
    }

    /// `GET` a path and decode the payload.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.fetch(RequestDescriptor::get(path)).await
    }

    /// `POST` a JSON body and return the envelope.
    pub async fn post<B: Serialize>(&self, path: &str, body: &B) -> Result<Envelope, ApiError> {
        self.request(RequestDescriptor::post(path).json(to_json(body)?))
            .await
    }

    /// `PUT` a JSON body and return the envelope.
    pub async fn put<B: Serialize>(&self, path: &str, body: &B) -> Result<Envelope, ApiError> {
        self.request(RequestDescriptor::put(path).json(to_json(body)?))
            .await
    }

    /// `DELETE` a path and return the envelope.
    pub async fn delete(&self, path: &str) -> Result<Envelope, ApiError> {
        self.request(RequestDescriptor::delete(path)).await
    }

    /// Logs in with a username and password and stores the issued session.
    ///
    /// The login payload must carry a `token`; the remaining fields (or a
    /// nested `userInfo` object when present) are cached as the profile.
    ///
    /// # Errors
    ///
    /// API failures come back as an [`ApiError`] inside the `anyhow::Error`;
    /// failing to persist the session is reported with context.
    pub async fn login(&self, username: &str, password: &str) -> Result<Session> {
        let payload: Value = self
            .fetch(RequestDescriptor::post(LOGIN_ENDPOINT).json(serde_json::json!({
                "username": username,
                "password": password,
            })))
            .await?;

        let token = payload
            .get("token")
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ApiError::parse("login response carries no token").logged())?
            .to_string();

        let profile = match payload.get("userInfo") {
            Some(info) if !info.is_null() => info.clone(),
            _ => {
                let mut rest = payload.clone();
                if let Some(fields) = rest.as_object_mut() {
                    fields.remove("token");
                }
                rest
            }
        };

        self.establish_session(&token, Some(&profile))
            .context("Failed to store the new session")?;

        Ok(self.current_session())
    }

    /// Stores a session obtained elsewhere, e.g. a pasted token.
    pub fn establish_session(&self, token: &str, profile: Option<&Value>) -> Result<()> {
        self.guard.establish(token, profile)
    }

    /// Logs out: tells the backend, then always clears the local session.
    ///
    /// A failing logout call is logged and otherwise ignored.
    pub async fn logout(&self) {
        if self.current_session().is_authenticated() {
            if let Err(e) = self.request(RequestDescriptor::post(LOGOUT_ENDPOINT)).await {
                warn!("logout request failed: {}", e);
            }
        }
        self.guard.end();
    }
}

fn to_json<B: Serialize>(body: &B) -> Result<Value, ApiError> {
    serde_json::to_value(body).map_err(|e| ApiError::parse(e.to_string()).logged())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::common::ErrorKind;
    use crate::api::request::BuiltRequest;
    use crate::api::transport::{RawResponse, TransportError};
    use crate::auth::{MemorySessionStore, RecordingNavigator};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use tokio::sync::Barrier;

    /// Replays one canned response and records every request it sees.
    struct Scripted {
        reply: Mutex<Option<Result<RawResponse, TransportError>>>,
        seen: Mutex<Vec<BuiltRequest>>,
    }

    impl Scripted {
        fn replying(status: u16, body: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Mutex::new(Some(Ok(RawResponse::new(status, body)))),
                seen: Mutex::new(Vec::new()),
            })
        }

        fn failing(err: TransportError) -> Arc<Self> {
            Arc::new(Self {
                reply: Mutex::new(Some(Err(err))),
                seen: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> usize {
            self.seen.lock().unwrap().len()
        }

        fn last(&self) -> BuiltRequest {
            self.seen.lock().unwrap().last().cloned().unwrap()
        }
    }

    #[async_trait]
    impl Transport for Scripted {
        async fn execute(&self, request: &BuiltRequest) -> Result<RawResponse, TransportError> {
            self.seen.lock().unwrap().push(request.clone());
            match self.reply.lock().unwrap().as_ref().unwrap() {
                Ok(response) => Ok(response.clone()),
                Err(TransportError::Timeout) => Err(TransportError::Timeout),
                Err(e) => Err(TransportError::Unreachable(e.to_string())),
            }
        }
    }

    fn scripted_client(
        transport: Arc<dyn Transport>,
        store: Arc<MemorySessionStore>,
    ) -> (AdminClient, Arc<RecordingNavigator>) {
        let navigator = Arc::new(RecordingNavigator::at("/orders"));
        let client = AdminClient::new("http://h/api/", transport, store, navigator.clone());
        (client, navigator)
    }

    #[tokio::test]
    async fn test_missing_token_fails_before_network() {
        let transport = Scripted::replying(200, r#"{"code":200}"#);
        let (client, navigator) =
            scripted_client(transport.clone(), Arc::new(MemorySessionStore::new()));

        let err = client.request(RequestDescriptor::get("/orders")).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::AuthRequired);
        assert_eq!(transport.calls(), 0);
        assert_eq!(navigator.visited(), vec!["/login?redirect=%2Forders"]);
    }

    #[tokio::test]
    async fn test_public_path_without_token() {
        let transport = Scripted::replying(200, r#"{"code":200,"data":"pong"}"#);
        let (client, _) = scripted_client(transport.clone(), Arc::new(MemorySessionStore::new()));

        let env = client
            .request(RequestDescriptor::get("public//ping"))
            .await
            .unwrap();

        assert!(env.success);
        assert_eq!(env.data, Some(json!("pong")));
        assert_eq!(transport.last().header("authorization"), None);
    }

    #[tokio::test]
    async fn test_bearer_attached_and_url_built() {
        let transport = Scripted::replying(200, r#"{"success":true,"data":[]}"#);
        let store = Arc::new(MemorySessionStore::with_token("abc"));
        let (client, _) = scripted_client(transport.clone(), store);

        client
            .request(RequestDescriptor::post("//coupons").json(json!({"name": "x"})))
            .await
            .unwrap();

        let sent = transport.last();
        assert_eq!(sent.header("authorization"), Some("Bearer abc"));
        assert_eq!(sent.url, "http://h/api/coupons");
    }

    #[tokio::test]
    async fn test_caller_authorization_header_wins() {
        let transport = Scripted::replying(200, r#"{"code":200}"#);
        let store = Arc::new(MemorySessionStore::with_token("abc"));
        let (client, _) = scripted_client(transport.clone(), store);

        client
            .request(RequestDescriptor::delete("/x").header("Authorization", "Bearer other"))
            .await
            .unwrap();
        assert_eq!(transport.last().header("authorization"), Some("Bearer other"));
    }

    #[tokio::test]
    async fn test_401_clears_session_and_redirects() {
        let transport = Scripted::replying(401, r#"{"msg":"token expired"}"#);
        let store = Arc::new(MemorySessionStore::with_token("abc"));
        let (client, navigator) = scripted_client(transport, store.clone());

        let err = client.request(RequestDescriptor::get("/orders")).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::AuthExpired);
        assert_eq!(err.backend_message(), Some("token expired"));
        assert!(!store.get().is_authenticated());
        assert_eq!(navigator.visited().len(), 1);
    }

    #[tokio::test]
    async fn test_403_with_token_keeps_session() {
        let transport = Scripted::replying(403, "");
        let store = Arc::new(MemorySessionStore::with_token("abc"));
        let (client, navigator) = scripted_client(transport, store.clone());

        let err = client.request(RequestDescriptor::get("/users")).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::PermissionDenied);
        assert!(store.get().is_authenticated());
        assert!(navigator.visited().is_empty());
    }

    #[tokio::test]
    async fn test_403_without_token_on_public_path_redirects() {
        let transport = Scripted::replying(403, "");
        let (client, navigator) = scripted_client(transport, Arc::new(MemorySessionStore::new()));

        let err = client
            .request(RequestDescriptor::get("/public/stats"))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::PermissionDenied);
        assert_eq!(navigator.visited().len(), 1);
    }

    #[tokio::test]
    async fn test_status_classification() {
        let store = Arc::new(MemorySessionStore::with_token("abc"));
        for (status, kind) in [
            (404, ErrorKind::NotFound),
            (500, ErrorKind::HttpStatus),
            (502, ErrorKind::HttpStatus),
        ] {
            let (client, _) = scripted_client(Scripted::replying(status, "oops"), store.clone());
            let err = client.request(RequestDescriptor::get("/a")).await.unwrap_err();
            assert_eq!(err.kind(), kind);
            assert_eq!(err.status(), Some(status));
        }
    }

    #[tokio::test]
    async fn test_transport_failure_is_network() {
        let store = Arc::new(MemorySessionStore::with_token("abc"));
        let (client, _) = scripted_client(Scripted::failing(TransportError::Timeout), store);
        let err = client.request(RequestDescriptor::get("/a")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Network);
    }

    #[tokio::test]
    async fn test_malformed_body_is_parse() {
        let store = Arc::new(MemorySessionStore::with_token("abc"));
        let (client, _) = scripted_client(Scripted::replying(200, "<html>oops</html>"), store);
        let err = client.request(RequestDescriptor::get("/a")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[tokio::test]
    async fn test_business_failure_uses_backend_message() {
        let store = Arc::new(MemorySessionStore::with_token("abc"));
        let body = r#"{"success":false,"code":500,"message":"m"}"#;
        let (client, _) = scripted_client(Scripted::replying(200, body), store.clone());
        let err = client.request(RequestDescriptor::get("/a")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Business);
        assert_eq!(err.to_string(), "m");

        let (client, _) = scripted_client(Scripted::replying(200, r#"{"code":1}"#), store);
        let err = client.request(RequestDescriptor::get("/a")).await.unwrap_err();
        assert_eq!(err.to_string(), "Operation failed");
    }

    #[tokio::test]
    async fn test_fetch_typed_payload() {
        #[derive(serde::Deserialize)]
        struct Count {
            total: u32,
        }
        let store = Arc::new(MemorySessionStore::with_token("abc"));
        let (client, _) = scripted_client(
            Scripted::replying(200, r#"{"code":200,"data":{"total":3}}"#),
            store,
        );
        let count: Count = client.get("/count").await.unwrap();
        assert_eq!(count.total, 3);
    }

    /// Answers 401 only once `parties` requests are in flight together.
    struct Gated {
        barrier: Barrier,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Transport for Gated {
        async fn execute(&self, _request: &BuiltRequest) -> Result<RawResponse, TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.barrier.wait().await;
            Ok(RawResponse::new(401, ""))
        }
    }

    #[tokio::test]
    async fn test_concurrent_401s_redirect_once() {
        let transport = Arc::new(Gated {
            barrier: Barrier::new(2),
            calls: AtomicUsize::new(0),
        });
        let store = Arc::new(MemorySessionStore::with_token("abc"));
        let (client, navigator) = scripted_client(transport.clone(), store.clone());
        let client = Arc::new(client);

        let a = tokio::spawn({
            let client = client.clone();
            async move { client.request(RequestDescriptor::get("/a")).await }
        });
        let b = tokio::spawn({
            let client = client.clone();
            async move { client.request(RequestDescriptor::get("/b")).await }
        });

        let (a, b) = (a.await.unwrap(), b.await.unwrap());
        assert_eq!(a.unwrap_err().kind(), ErrorKind::AuthExpired);
        assert_eq!(b.unwrap_err().kind(), ErrorKind::AuthExpired);
        assert_eq!(transport.calls.load(Ordering::SeqCst), 2);
        assert!(!store.get().is_authenticated());
        assert_eq!(navigator.visited().len(), 1);
    }

    /// Simulates a new login landing while the request is in flight.
    struct ReloginDuringRequest {
        store: Arc<MemorySessionStore>,
    }

    #[async_trait]
    impl Transport for ReloginDuringRequest {
        async fn execute(&self, _request: &BuiltRequest) -> Result<RawResponse, TransportError> {
            self.store
                .set("t2", None)
                .map_err(|e| TransportError::Unreachable(e.to_string()))?;
            Ok(RawResponse::new(401, ""))
        }
    }

    #[tokio::test]
    async fn test_late_401_for_old_token_keeps_new_session() {
        let store = Arc::new(MemorySessionStore::with_token("t1"));
        let transport = Arc::new(ReloginDuringRequest {
            store: store.clone(),
        });
        let (client, navigator) = scripted_client(transport, store.clone());

        let err = client.request(RequestDescriptor::get("/a")).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::AuthExpired);
        assert_eq!(store.get().token.as_deref(), Some("t2"));
        assert!(navigator.visited().is_empty());
    }

    #[tokio::test]
    async fn test_401_after_redirect_still_clears_session() {
        let transport = Scripted::replying(401, "");
        let store = Arc::new(MemorySessionStore::with_token("abc"));
        let (client, navigator) = scripted_client(transport, store.clone());

        client.request(RequestDescriptor::get("/a")).await.unwrap_err();
        store.set("second", None).unwrap();
        let err = client.request(RequestDescriptor::get("/a")).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::AuthExpired);
        assert!(store.get().token.is_none());
        assert_eq!(navigator.visited().len(), 1);
    }

    #[tokio::test]
    async fn test_login_stores_session_and_rearms_latch() {
        let body = r#"{"code":200,"data":{"token":"new","userInfo":{"username":"ops"}}}"#;
        let store = Arc::new(MemorySessionStore::new());
        let (client, _) = scripted_client(Scripted::replying(200, body), store.clone());

        client.guard().handle_auth_failure();
        let session = client.login("ops", "secret").await.unwrap();

        assert_eq!(session.token.as_deref(), Some("new"));
        assert_eq!(session.user_profile, Some(json!({"username": "ops"})));
        assert!(!client.guard().redirect_issued());
    }

    #[tokio::test]
    async fn test_login_without_token_is_parse_error() {
        let store = Arc::new(MemorySessionStore::new());
        let transport = Scripted::replying(200, r#"{"code":200,"data":{}}"#);
        let (client, _) = scripted_client(transport, store);
        let err = client.login("ops", "secret").await.unwrap_err();
        let err = err.downcast_ref::<ApiError>().unwrap();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[tokio::test]
    async fn test_logout_clears_even_when_backend_fails() {
        let store = Arc::new(MemorySessionStore::with_token("abc"));
        let (client, _) = scripted_client(Scripted::replying(500, ""), store.clone());
        client.logout().await;
        assert!(!store.get().is_authenticated());
    }
}
