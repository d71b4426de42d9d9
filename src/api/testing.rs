//
//  apim-client
//  api/testing.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/16.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Shared fixtures for unit tests: a scripted [`Transport`] and helpers that
//! stand up a connected [`ApimClient`] against a mockito server.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use mockito::{Mock, ServerGuard};
use reqwest::StatusCode;

use super::{ApimClient, HttpRequest, RawResponse, Transport, TransportError};
use crate::auth::DEFAULT_SCOPES;
use crate::config::Config;

type Outcome = Result<(StatusCode, String), String>;

/// Replays a fixed list of outcomes, repeating the last one forever, and
/// counts how often it was called.
pub(crate) struct ScriptedTransport {
    script: Mutex<VecDeque<Outcome>>,
    calls: AtomicUsize,
    tokens: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    pub(crate) fn sequence(outcomes: Vec<Outcome>) -> Self {
        assert!(!outcomes.is_empty(), "script needs at least one outcome");
        Self {
            script: Mutex::new(outcomes.into()),
            calls: AtomicUsize::new(0),
            tokens: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn failing() -> Self {
        Self::sequence(vec![Err("connection refused".to_string())])
    }

    pub(crate) fn responding(status: StatusCode, body: &str) -> Self {
        Self::sequence(vec![Ok((status, body.to_string()))])
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Bearer tokens of every request sent, in order.
    pub(crate) fn seen_tokens(&self) -> Vec<String> {
        self.tokens.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: &HttpRequest) -> Result<RawResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.tokens
            .lock()
            .unwrap()
            .push(request.bearer_token().to_string());
        let outcome = {
            let mut script = self.script.lock().unwrap();
            if script.len() > 1 {
                script.pop_front().unwrap()
            } else {
                script.front().cloned().unwrap()
            }
        };
        outcome
            .map(|(status, body)| RawResponse {
                status,
                body: body.into_bytes(),
            })
            .map_err(TransportError)
    }
}

/// A valid configuration pointing at `host`, with millisecond backoffs.
pub(crate) fn test_config(host: &str) -> Config {
    let mut config = Config::default();
    config.platform.host = host.to_string();
    config.platform.username = "admin".to_string();
    config.platform.password = "admin".to_string();
    config.http.min_backoff_ms = 1;
    config.http.max_backoff_ms = 5;
    config.http.max_retries = 2;
    config
}

/// Mocks client registration and the password grant. Keep the returned
/// mocks alive for as long as the client is used.
pub(crate) async fn mock_auth(server: &mut ServerGuard) -> Vec<Mock> {
    let registration = server
        .mock("POST", "/client-registration/v0.17/register")
        .with_status(200)
        .with_body(r#"{"clientId":"cid","clientSecret":"cs"}"#)
        .create_async()
        .await;
    let token = server
        .mock("POST", "/oauth2/token")
        .with_status(200)
        .with_body(
            r#"{"access_token":"test-token","refresh_token":"rt","token_type":"Bearer","expires_in":3600}"#,
        )
        .create_async()
        .await;
    vec![registration, token]
}

/// Builds and initializes a client against `server` with auth mocked.
pub(crate) async fn connected_client(server: &mut ServerGuard) -> (ApimClient, Vec<Mock>) {
    let auth = mock_auth(server).await;
    let client = ApimClient::new(&test_config(&server.url())).unwrap();
    client.initialize(DEFAULT_SCOPES).await.unwrap();
    (client, auth)
}
