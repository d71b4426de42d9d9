//
//  apim-client
//  auth/manager.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/16.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Token Manager
//!
//! [`TokenManager`] owns the registered client and the current
//! [`Credential`]. Resource calls ask it for a token immediately before
//! sending; it hands back the cached token while that is comfortably valid
//! and otherwise performs exactly one grant no matter how many tasks are
//! waiting.
//!
//! ## Lifecycle
//!
//! ```text
//! Uninitialized --password grant--> Valid --time passes--> Expired
//!                                     ^                       |
//!                                     +----- Refreshing <-----+
//! ```
//!
//! A failed refresh discards the cached credential, so the next call starts
//! again with a password grant.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::Duration;
use reqwest::Client;
use tokio::sync::{Mutex, OnceCell, RwLock};
use tracing::{debug, info, warn};
use url::Url;

use super::{register_client, request_token, ClientRegistration, Credential, Grant};
use crate::api::{ApiError, TokenSource};

/// Seconds before expiry at which a token is treated as stale.
pub const EXPIRY_MARGIN_SECS: i64 = 60;

/// Observable state of the cached credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenState {
    /// No token has been issued yet, or the last refresh failed.
    Uninitialized,
    /// A token is cached and outside the expiry margin.
    Valid,
    /// A token is cached but inside the expiry margin.
    Expired,
    /// A grant is in flight.
    Refreshing,
}

impl fmt::Display for TokenState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Uninitialized => "uninitialized",
            Self::Valid => "valid",
            Self::Expired => "expired",
            Self::Refreshing => "refreshing",
        };
        write!(f, "{}", s)
    }
}

struct Registered {
    client: ClientRegistration,
    scopes: Vec<String>,
}

/// Outcome of the most recent grant, handed to callers that queued behind it.
/// Errors keep only the message so they can be cloned.
type GrantOutcome = Option<Result<String, String>>;

/// Issues bearer tokens for resource calls.
///
/// Safe to share between tasks: wrap the owning client in an `Arc` and call
/// [`token`](Self::token) from anywhere.
///
/// # Example
///
/// ```rust,no_run
/// use apim_client::auth::{TokenManager, DEFAULT_SCOPES};
/// use reqwest::Client;
/// use url::Url;
///
/// # async fn example() -> Result<(), apim_client::api::ApiError> {
/// let manager = TokenManager::new(
///     Client::new(),
///     Url::parse("https://apim.local:9443/oauth2/token").unwrap(),
///     Url::parse("https://apim.local:9443/client-registration/v0.17/register").unwrap(),
///     "admin",
///     "admin",
/// );
/// manager.initialize(DEFAULT_SCOPES).await?;
/// let token = manager.token().await?;
/// # Ok(())
/// # }
/// ```
pub struct TokenManager {
    http: Client,
    token_endpoint: Url,
    registration_endpoint: Url,
    username: String,
    password: String,
    margin: Duration,
    registration: OnceCell<Registered>,
    credential: RwLock<Option<Credential>>,
    refresh_lock: Mutex<GrantOutcome>,
    grants: AtomicU64,
}

impl TokenManager {
    pub fn new(
        http: Client,
        token_endpoint: Url,
        registration_endpoint: Url,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            http,
            token_endpoint,
            registration_endpoint,
            username: username.into(),
            password: password.into(),
            margin: Duration::seconds(EXPIRY_MARGIN_SECS),
            registration: OnceCell::new(),
            credential: RwLock::new(None),
            refresh_lock: Mutex::new(None),
            grants: AtomicU64::new(0),
        }
    }

    /// Registers the OAuth client and records the scopes to request.
    ///
    /// Registration happens at most once. Concurrent callers wait for the
    /// same registration; later calls return immediately and keep the scopes
    /// from the first successful call. A failed registration leaves the
    /// manager uninitialized so it can be retried.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Auth`] if the registration endpoint rejects the
    /// request.
    pub async fn initialize(&self, scopes: &[&str]) -> Result<(), ApiError> {
        self.registration
            .get_or_try_init(|| async {
                let client = register_client(
                    &self.http,
                    &self.registration_endpoint,
                    &self.username,
                    &self.password,
                )
                .await?;
                info!(client_id = %client.client_id, "Registered OAuth client");
                Ok::<_, ApiError>(Registered {
                    client,
                    scopes: scopes.iter().map(|s| s.to_string()).collect(),
                })
            })
            .await?;
        Ok(())
    }

    /// Returns `true` once [`initialize`](Self::initialize) has succeeded.
    pub fn is_initialized(&self) -> bool {
        self.registration.initialized()
    }

    /// Returns a token valid for at least the expiry margin.
    ///
    /// When the cached token is stale, one caller performs the grant while the
    /// others wait and then reuse its result, whether that is a token or an
    /// error. A refresh-token grant is used
    /// when the stale credential carries a refresh token; otherwise a
    /// password grant.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Auth`] if the manager is not initialized.
    /// - [`ApiError::Auth`] if the grant fails. When a refresh grant fails the
    ///   cached credential is discarded.
    pub async fn token(&self) -> Result<String, ApiError> {
        let registered = self.registration.get().ok_or_else(|| {
            ApiError::Auth("token manager used before initialize".to_string())
        })?;

        let seen = self.grants.load(Ordering::Acquire);
        if let Some(token) = self.cached_token().await {
            return Ok(token);
        }

        let mut last = self.refresh_lock.lock().await;

        // A grant finished while we waited: its outcome is ours too.
        if self.grants.load(Ordering::Acquire) != seen {
            if let Some(outcome) = last.as_ref() {
                debug!("Reusing outcome of concurrent grant");
                return outcome.clone().map_err(ApiError::Auth);
            }
        }
        if let Some(token) = self.cached_token().await {
            return Ok(token);
        }

        let stale = self.credential.read().await.clone();
        let grant = match stale.as_ref().and_then(|c| c.refresh_token.as_deref()) {
            Some(refresh_token) => Grant::RefreshToken(refresh_token),
            None => Grant::Password {
                username: &self.username,
                password: &self.password,
            },
        };

        debug!(grant = grant.grant_type(), "Access token is stale, renewing");

        let result = match request_token(
            &self.http,
            &self.token_endpoint,
            &registered.client,
            grant,
            &registered.scopes,
        )
        .await
        {
            Ok(credential) => {
                let token = credential.access_token.clone();
                debug!(expires_at = %credential.expires_at, "Access token renewed");
                *self.credential.write().await = Some(credential);
                Ok(token)
            }
            Err(e) => {
                if matches!(grant, Grant::RefreshToken(_)) {
                    warn!("Refresh grant failed, discarding cached credential: {}", e);
                    *self.credential.write().await = None;
                }
                Err(e)
            }
        };

        *last = Some(match &result {
            Ok(token) => Ok(token.clone()),
            Err(ApiError::Auth(message)) => Err(message.clone()),
            Err(other) => Err(other.to_string()),
        });
        self.grants.fetch_add(1, Ordering::Release);
        result
    }

    /// Reports the current [`TokenState`].
    pub async fn state(&self) -> TokenState {
        if self.refresh_lock.try_lock().is_err() {
            return TokenState::Refreshing;
        }
        match self.credential.read().await.as_ref() {
            None => TokenState::Uninitialized,
            Some(c) if c.expires_within(self.margin) => TokenState::Expired,
            Some(_) => TokenState::Valid,
        }
    }

    async fn cached_token(&self) -> Option<String> {
        self.credential
            .read()
            .await
            .as_ref()
            .filter(|c| !c.expires_within(self.margin))
            .map(|c| c.access_token.clone())
    }
}

#[async_trait]
impl TokenSource for TokenManager {
    async fn bearer_token(&self) -> Result<String, ApiError> {
        self.token().await
    }
}

impl fmt::Debug for TokenManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenManager")
            .field("token_endpoint", &self.token_endpoint.as_str())
            .field("username", &self.username)
            .field("initialized", &self.is_initialized())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use mockito::{Matcher, Mock, ServerGuard};

    use super::*;

    const REGISTRATION_BODY: &str = r#"{"clientId":"cid","clientSecret":"cs"}"#;

    fn manager(server: &ServerGuard) -> TokenManager {
        TokenManager::new(
            Client::new(),
            Url::parse(&format!("{}/oauth2/token", server.url())).unwrap(),
            Url::parse(&format!("{}/register", server.url())).unwrap(),
            "admin",
            "pw",
        )
    }

    async fn mock_registration(server: &mut ServerGuard, hits: usize) -> Mock {
        server
            .mock("POST", "/register")
            .with_status(200)
            .with_body(REGISTRATION_BODY)
            .expect(hits)
            .create_async()
            .await
    }

    fn token_body(access: &str, refresh: Option<&str>, expires_in: i64) -> String {
        serde_json::json!({
            "access_token": access,
            "refresh_token": refresh,
            "token_type": "Bearer",
            "expires_in": expires_in,
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_token_before_initialize_is_auth_error() {
        let server = mockito::Server::new_async().await;
        let manager = manager(&server);
        assert!(matches!(manager.token().await, Err(ApiError::Auth(_))));
        assert_eq!(manager.state().await, TokenState::Uninitialized);
    }

    #[tokio::test]
    async fn test_cached_token_is_reused() {
        let mut server = mockito::Server::new_async().await;
        let _reg = mock_registration(&mut server, 1).await;
        let grant = server
            .mock("POST", "/oauth2/token")
            .match_body(Matcher::UrlEncoded("grant_type".into(), "password".into()))
            .with_status(200)
            .with_body(token_body("at-1", Some("rt-1"), 3600))
            .expect(1)
            .create_async()
            .await;

        let manager = manager(&server);
        manager.initialize(&["apim:api_view"]).await.unwrap();
        manager.initialize(&["ignored"]).await.unwrap();

        assert_eq!(manager.token().await.unwrap(), "at-1");
        assert_eq!(manager.token().await.unwrap(), "at-1");
        assert_eq!(manager.state().await, TokenState::Valid);
        grant.assert_async().await;
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_initialize_registers_once() {
        let mut server = mockito::Server::new_async().await;
        let registration = mock_registration(&mut server, 1).await;
        let manager = Arc::new(manager(&server));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let manager = Arc::clone(&manager);
                tokio::spawn(async move { manager.initialize(&["apim:api_view"]).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        registration.assert_async().await;
        assert!(manager.is_initialized());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_refresh_is_single_flight() {
        let mut server = mockito::Server::new_async().await;
        let _reg = mock_registration(&mut server, 1).await;
        // Issued already inside the safety margin, so the next call refreshes.
        let password = server
            .mock("POST", "/oauth2/token")
            .match_body(Matcher::UrlEncoded("grant_type".into(), "password".into()))
            .with_status(200)
            .with_body(token_body("at-old", Some("rt-old"), 0))
            .expect(1)
            .create_async()
            .await;
        let refresh = server
            .mock("POST", "/oauth2/token")
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("grant_type".into(), "refresh_token".into()),
                Matcher::UrlEncoded("refresh_token".into(), "rt-old".into()),
            ]))
            .with_status(200)
            .with_body(token_body("at-new", Some("rt-new"), 3600))
            .expect(1)
            .create_async()
            .await;

        let manager = Arc::new(manager(&server));
        manager.initialize(&["apim:api_view"]).await.unwrap();
        assert_eq!(manager.token().await.unwrap(), "at-old");
        assert_eq!(manager.state().await, TokenState::Expired);

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let manager = Arc::clone(&manager);
                tokio::spawn(async move { manager.token().await })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.await.unwrap().unwrap(), "at-new");
        }

        password.assert_async().await;
        refresh.assert_async().await;
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_failed_grant_is_shared() {
        let mut server = mockito::Server::new_async().await;
        let _reg = mock_registration(&mut server, 1).await;
        // Held open long enough for every caller to queue behind the grant.
        let grant = server
            .mock("POST", "/oauth2/token")
            .with_status(500)
            .with_body_from_request(|_| {
                std::thread::sleep(std::time::Duration::from_millis(300));
                br#"{"error":"server_error"}"#.to_vec()
            })
            .expect(1)
            .create_async()
            .await;

        let manager = Arc::new(manager(&server));
        manager.initialize(&["apim:api_view"]).await.unwrap();

        let barrier = Arc::new(tokio::sync::Barrier::new(8));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let manager = Arc::clone(&manager);
                let barrier = Arc::clone(&barrier);
                tokio::spawn(async move {
                    barrier.wait().await;
                    manager.token().await
                })
            })
            .collect();
        for handle in handles {
            let err = handle.await.unwrap().unwrap_err();
            assert!(matches!(err, ApiError::Auth(_)));
            assert!(err.to_string().contains("500"));
        }

        grant.assert_async().await;
        assert_eq!(manager.state().await, TokenState::Uninitialized);
    }

    #[tokio::test]
    async fn test_failed_refresh_discards_credential() {
        let mut server = mockito::Server::new_async().await;
        let _reg = mock_registration(&mut server, 1).await;
        let password = server
            .mock("POST", "/oauth2/token")
            .match_body(Matcher::UrlEncoded("grant_type".into(), "password".into()))
            .with_status(200)
            .with_body(token_body("at-old", Some("rt-old"), 0))
            .expect(2)
            .create_async()
            .await;
        let _refresh = server
            .mock("POST", "/oauth2/token")
            .match_body(Matcher::UrlEncoded("grant_type".into(), "refresh_token".into()))
            .with_status(400)
            .with_body(r#"{"error":"invalid_grant"}"#)
            .create_async()
            .await;

        let manager = manager(&server);
        manager.initialize(&["apim:api_view"]).await.unwrap();
        manager.token().await.unwrap();

        let err = manager.token().await.unwrap_err();
        assert!(matches!(err, ApiError::Auth(_)));
        assert_eq!(manager.state().await, TokenState::Uninitialized);

        // The next call starts over with the password grant.
        assert_eq!(manager.token().await.unwrap(), "at-old");
        password.assert_async().await;
    }

    #[tokio::test]
    async fn test_failed_registration_can_be_retried() {
        let mut server = mockito::Server::new_async().await;
        let failing = server
            .mock("POST", "/register")
            .with_status(500)
            .create_async()
            .await;

        let manager = manager(&server);
        assert!(manager.initialize(&[]).await.is_err());
        assert!(!manager.is_initialized());

        failing.remove_async().await;
        let _ok = mock_registration(&mut server, 1).await;
        manager.initialize(&[]).await.unwrap();
        assert!(manager.is_initialized());
    }
}
