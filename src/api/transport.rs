//
//  apim-client
//  api/transport.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/16.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Transport Layer
//!
//! A [`Transport`] delivers one [`HttpRequest`] and hands back the raw status
//! and body. It knows nothing about retries, expected statuses, or decoding;
//! those live in [`HttpInvoker`](super::HttpInvoker).
//!
//! The production implementation is [`ReqwestTransport`]. Tests substitute
//! their own implementation to count calls or script failures.

use std::fmt;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, StatusCode};
use serde::Serialize;
use thiserror::Error;
use url::Url;

use crate::api::ApiError;
use crate::config::HttpConfig;

/// An outbound request to the platform.
///
/// The body is held as owned bytes so it can be re-sent unchanged on every
/// retry attempt.
///
/// # Example
///
/// ```rust
/// use apim_client::api::HttpRequest;
/// use reqwest::Method;
/// use url::Url;
///
/// let url = Url::parse("https://apim.local/api/am/publisher/v1/apis").unwrap();
/// let request = HttpRequest::new(Method::GET, url, "token")
///     .with_query(&[("query", "name:Pizza version:1.0")]);
///
/// assert!(request.url().as_str().contains("query=name%3APizza"));
/// assert!(!format!("{:?}", request).contains("token\""));
/// ```
#[derive(Clone)]
pub struct HttpRequest {
    method: Method,
    url: Url,
    token: String,
    body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// Creates a request authenticated with the given bearer token.
    pub fn new(method: Method, url: Url, token: impl Into<String>) -> Self {
        Self {
            method,
            url,
            token: token.into(),
            body: None,
        }
    }

    /// Attaches a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] if the value cannot be serialized.
    pub fn with_json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ApiError> {
        let bytes = serde_json::to_vec(body)
            .map_err(|e| ApiError::Validation(format!("cannot encode request body: {}", e)))?;
        self.body = Some(bytes);
        Ok(self)
    }

    /// Appends query parameters, URL-encoding each value.
    pub fn with_query(mut self, pairs: &[(&str, &str)]) -> Self {
        self.url.query_pairs_mut().extend_pairs(pairs);
        self
    }

    /// Replaces the bearer token, keeping method, URL and body.
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.token = token.into();
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    pub fn bearer_token(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for HttpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpRequest")
            .field("method", &self.method)
            .field("url", &self.url.as_str())
            .field("token", &"<redacted>")
            .field("body_len", &self.body.as_ref().map(Vec::len))
            .finish()
    }
}

/// Status and body of a delivered request.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

/// A network-level failure: the request never produced a response.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Delivers a single request. Implementations must not retry.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &HttpRequest) -> Result<RawResponse, TransportError>;
}

/// Supplies a current bearer token before each retry attempt.
#[async_trait]
pub trait TokenSource: Send + Sync {
    async fn bearer_token(&self) -> Result<String, ApiError>;
}

/// Builds the shared `reqwest` client from the transport settings.
///
/// # Errors
///
/// Returns [`ApiError::Config`] if the TLS backend cannot be initialised.
pub fn build_http_client(config: &HttpConfig) -> Result<Client, ApiError> {
    Client::builder()
        .user_agent(format!("apim/{}", crate::VERSION))
        .timeout(config.timeout())
        .danger_accept_invalid_certs(config.insecure)
        .build()
        .map_err(|e| ApiError::Config(format!("cannot build HTTP client: {}", e)))
}

/// [`Transport`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: Client,
}

impl ReqwestTransport {
    pub fn new(http: Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &HttpRequest) -> Result<RawResponse, TransportError> {
        let mut builder = self
            .http
            .request(request.method.clone(), request.url.clone())
            .bearer_auth(&request.token)
            .header(ACCEPT, "application/json");

        if let Some(body) = &request.body {
            builder = builder
                .header(CONTENT_TYPE, "application/json")
                .body(body.clone());
        }

        let response = builder
            .send()
            .await
            .map_err(|e| TransportError(e.to_string()))?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError(format!("failed to read response body: {}", e)))?;

        Ok(RawResponse {
            status,
            body: body.to_vec(),
        })
    }
}
