//
//  apim-client
//  api/invoker.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/16.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # HTTP Invoker
//!
//! Every resource call goes through [`HttpInvoker`]. It sends the request,
//! retries transient failures according to a [`RetryPolicy`], checks the
//! status against the one the operation expects, and decodes the body.
//!
//! ## Outcomes
//!
//! | Response | Result |
//! |----------|--------|
//! | Expected status | Body decoded into `T` (or discarded) |
//! | Network failure | Retried, then [`ApiError::Transport`] |
//! | 5xx | Retried if enabled, then [`ApiError::Status`] |
//! | 404 | [`ApiError::NotFound`], never retried |
//! | Any other status | [`ApiError::Status`], never retried |
//!
//! When the invoker has a [`TokenSource`], every retry asks it for a token
//! first, so a long backoff never resends a bearer that has since expired.

use std::sync::Arc;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tokio::time::sleep;
use tracing::{debug, warn};

use super::{
    format_api_error, ApiError, HttpRequest, RawResponse, RetryPolicy, TokenSource, Transport,
};

/// Sends requests with retry, status checking, and JSON decoding.
pub struct HttpInvoker {
    transport: Arc<dyn Transport>,
    policy: RetryPolicy,
    tokens: Option<Arc<dyn TokenSource>>,
}

impl HttpInvoker {
    pub fn new(transport: Arc<dyn Transport>, policy: RetryPolicy) -> Self {
        Self {
            transport,
            policy,
            tokens: None,
        }
    }

    /// Re-reads the bearer token from `tokens` before every retry.
    pub fn with_tokens(mut self, tokens: Arc<dyn TokenSource>) -> Self {
        self.tokens = Some(tokens);
        self
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Sends `request` and decodes a response carrying `expected` status.
    ///
    /// # Parameters
    ///
    /// - `context`: Label of the logical operation, e.g. `"create API"`.
    ///   Prefixed to every error.
    /// - `request`: The request to send. Re-sent on retry with only the
    ///   bearer token renewed.
    /// - `expected`: The single status that counts as success.
    ///
    /// # Errors
    ///
    /// See the module documentation for the mapping from responses to errors.
    /// A body that does not decode into `T` yields [`ApiError::Decode`].
    pub async fn invoke<T: DeserializeOwned>(
        &self,
        context: &str,
        request: &HttpRequest,
        expected: StatusCode,
    ) -> Result<T, ApiError> {
        let body = self.execute(context, request, expected).await?;
        serde_json::from_slice(&body).map_err(|source| ApiError::Decode {
            context: context.to_string(),
            source,
        })
    }

    /// Like [`invoke`](Self::invoke) but ignores the response body, which
    /// may be empty.
    pub async fn invoke_discard(
        &self,
        context: &str,
        request: &HttpRequest,
        expected: StatusCode,
    ) -> Result<(), ApiError> {
        self.execute(context, request, expected).await.map(|_| ())
    }

    async fn execute(
        &self,
        context: &str,
        request: &HttpRequest,
        expected: StatusCode,
    ) -> Result<Vec<u8>, ApiError> {
        let mut attempt: u32 = 0;
        let mut renewed: Option<HttpRequest> = None;

        loop {
            let current = renewed.as_ref().unwrap_or(request);
            debug!(
                context,
                method = %current.method(),
                url = %current.url(),
                attempt = attempt + 1,
                "Sending request"
            );

            let failure = match self.transport.send(current).await {
                Ok(response) if response.status == expected => return Ok(response.body),
                Ok(response) => {
                    if !self.policy.is_retryable_status(response.status)
                        || attempt >= self.policy.max_retries
                    {
                        return Err(status_error(context, current, &response));
                    }
                    format!("status {}", response.status)
                }
                Err(e) => {
                    if attempt >= self.policy.max_retries {
                        return Err(ApiError::Transport {
                            context: context.to_string(),
                            attempts: attempt + 1,
                            message: e.to_string(),
                        });
                    }
                    e.to_string()
                }
            };

            let delay = self.policy.backoff(attempt);
            warn!(
                context,
                attempt = attempt + 1,
                max_attempts = self.policy.max_retries + 1,
                delay_ms = delay.as_millis() as u64,
                "Request failed ({}), retrying",
                failure
            );
            sleep(delay).await;
            attempt += 1;

            if let Some(tokens) = &self.tokens {
                let token = tokens.bearer_token().await?;
                if token != current.bearer_token() {
                    debug!(context, "Bearer token renewed before retry");
                    let next = current.clone().with_bearer_token(token);
                    renewed = Some(next);
                }
            }
        }
    }
}

fn status_error(context: &str, request: &HttpRequest, response: &RawResponse) -> ApiError {
    let body = String::from_utf8_lossy(&response.body);
    if response.status == StatusCode::NOT_FOUND {
        return ApiError::NotFound {
            context: context.to_string(),
            what: request.url().path().to_string(),
        };
    }
    ApiError::Status {
        context: context.to_string(),
        status: response.status,
        message: format_api_error(response.status, &body),
    }
}
