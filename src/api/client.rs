//
//  apim-client
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/16.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Manager Client
//!
//! [`ApimClient`] is the context object every operation runs against. It
//! bundles the three pieces a call needs:
//!
//! - the [`EndpointSet`] computed from configuration,
//! - the [`TokenManager`] that issues bearer tokens,
//! - the [`HttpInvoker`] that sends requests with retry.
//!
//! Resource operations are implemented as methods on [`ApimClient`] in the
//! `publisher` and `store` modules.
//!
//! ## Features
//!
//! - One client per platform; share it across tasks with `Arc`
//! - Lazy token acquisition on the first resource call
//! - Self-signed certificates accepted when `http.insecure` is set
//! - Custom User-Agent header

use std::sync::Arc;

use reqwest::{Client, Method};
use url::Url;

use super::{
    build_http_client, ApiError, HttpInvoker, HttpRequest, ReqwestTransport, RetryPolicy,
    Transport,
};
use crate::auth::{TokenManager, DEFAULT_SCOPES};
use crate::config::{Config, EndpointSet};

/// Client for the publisher and devportal REST APIs.
///
/// # Creating a Client
///
/// ```rust,no_run
/// use apim_client::api::ApimClient;
/// use apim_client::config::Config;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::load(None)?;
///
/// // Validate, register the OAuth client and request the default scopes.
/// let client = ApimClient::connect(&config).await?;
///
/// let app_id = client.search_application("PizzaApp").await?;
/// println!("{}", client.application_dashboard_url(&app_id)?);
/// # Ok(())
/// # }
/// ```
pub struct ApimClient {
    invoker: HttpInvoker,
    tokens: Arc<TokenManager>,
    endpoints: EndpointSet,
}

impl ApimClient {
    /// Creates a client from configuration without contacting the platform.
    ///
    /// Call [`initialize`](Self::initialize) before any resource operation,
    /// or use [`connect`](Self::connect) to do both.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] if the configuration is incomplete or
    /// the HTTP client cannot be built.
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        config.validate()?;
        let http = build_http_client(&config.http)?;
        let transport = Arc::new(ReqwestTransport::new(http.clone()));
        Self::with_transport(config, http, transport)
    }

    /// Creates a client whose resource calls go through `transport`.
    ///
    /// Token and registration calls always use `http` directly.
    pub fn with_transport(
        config: &Config,
        http: Client,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, ApiError> {
        config.validate()?;
        let endpoints = EndpointSet::from_config(&config.platform)?;
        let tokens = Arc::new(TokenManager::new(
            http,
            endpoints.token.clone(),
            endpoints.registration.clone(),
            &config.platform.username,
            &config.platform.password,
        ));
        let invoker = HttpInvoker::new(transport, RetryPolicy::from_config(&config.http))
            .with_tokens(tokens.clone());

        Ok(Self {
            invoker,
            tokens,
            endpoints,
        })
    }

    /// Builds a client and initializes it with [`DEFAULT_SCOPES`].
    pub async fn connect(config: &Config) -> Result<Self, ApiError> {
        let client = Self::new(config)?;
        client.initialize(DEFAULT_SCOPES).await?;
        Ok(client)
    }

    /// Registers the OAuth client and fixes the scopes tokens are requested
    /// with. Idempotent; see [`TokenManager::initialize`].
    pub async fn initialize(&self, scopes: &[&str]) -> Result<(), ApiError> {
        self.tokens.initialize(scopes).await
    }

    pub fn endpoints(&self) -> &EndpointSet {
        &self.endpoints
    }

    pub fn tokens(&self) -> &TokenManager {
        self.tokens.as_ref()
    }

    pub(crate) fn invoker(&self) -> &HttpInvoker {
        &self.invoker
    }

    /// Fetches a current token and starts a request to `url` with it.
    /// Retries of the request fetch their own token.
    pub(crate) async fn authorized(&self, method: Method, url: Url) -> Result<HttpRequest, ApiError> {
        let token = self.tokens.token().await?;
        Ok(HttpRequest::new(method, url, token))
    }
}

impl std::fmt::Debug for ApimClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApimClient")
            .field("endpoints", &self.endpoints)
            .field("tokens", &self.tokens)
            .field("retry", self.invoker.policy())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::{mock_auth, test_config};

    #[test]
    fn test_new_rejects_missing_host() {
        let mut config = test_config("https://apim.local");
        config.platform.host = String::new();
        assert!(matches!(ApimClient::new(&config), Err(ApiError::Config(_))));
    }

    #[test]
    fn test_new_rejects_missing_password() {
        let mut config = test_config("https://apim.local");
        config.platform.password = String::new();
        assert!(matches!(ApimClient::new(&config), Err(ApiError::Config(_))));
    }

    #[tokio::test]
    async fn test_resource_call_before_initialize_is_auth_error() {
        let client = ApimClient::new(&test_config("https://apim.local")).unwrap();
        let url = client.endpoints().api.clone();
        let err = client.authorized(Method::GET, url).await.unwrap_err();
        assert!(matches!(err, ApiError::Auth(_)));
    }

    #[tokio::test]
    async fn test_connect_registers_and_tokens_lazily() {
        let mut server = mockito::Server::new_async().await;
        let _auth = mock_auth(&mut server).await;

        let client = ApimClient::connect(&test_config(&server.url())).await.unwrap();
        assert!(client.tokens().is_initialized());

        let request = client
            .authorized(Method::GET, client.endpoints().api.clone())
            .await
            .unwrap();
        assert_eq!(request.bearer_token(), "test-token");
    }

    #[test]
    fn test_debug_hides_password() {
        let mut config = test_config("https://apim.local");
        config.platform.password = "Xk9-unlikely-secret".to_string();
        let client = ApimClient::new(&config).unwrap();
        let printed = format!("{:?}", client);
        assert!(printed.contains("apim.local"));
        assert!(!printed.contains("Xk9-unlikely-secret"));
    }
}
