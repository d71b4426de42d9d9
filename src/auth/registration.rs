//
//  apim-client
//  auth/registration.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/16.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Dynamic client registration.
//!
//! Before any token can be issued the platform requires an OAuth client. The
//! registration endpoint creates (or returns the existing) client owned by
//! the platform user and answers with its id and secret.

use std::fmt;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::api::{format_api_error, ApiError};

/// Name under which the OAuth client is registered.
pub const CLIENT_NAME: &str = "apim_client_rest_api";

/// Callback URL recorded on the registered client. Never visited.
pub const CALLBACK_URL: &str = "https://localhost/callback";

/// Grant types the registered client is allowed to use.
pub const REGISTERED_GRANT_TYPES: &str = "password refresh_token";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RegistrationRequest<'a> {
    callback_url: &'a str,
    client_name: &'a str,
    owner: &'a str,
    grant_type: &'a str,
    saas_app: bool,
}

/// Credentials of the registered OAuth client.
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientRegistration {
    pub client_id: String,
    pub client_secret: String,
}

impl fmt::Debug for ClientRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientRegistration")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// Registers (or re-fetches) the OAuth client for `username`.
///
/// The request is authenticated with the platform user's own credentials
/// over HTTP Basic auth.
///
/// # Errors
///
/// Returns [`ApiError::Auth`] if the endpoint is unreachable, rejects the
/// credentials, or answers with something other than a client id and secret.
pub async fn register_client(
    http: &Client,
    endpoint: &Url,
    username: &str,
    password: &str,
) -> Result<ClientRegistration, ApiError> {
    let body = RegistrationRequest {
        callback_url: CALLBACK_URL,
        client_name: CLIENT_NAME,
        owner: username,
        grant_type: REGISTERED_GRANT_TYPES,
        saas_app: true,
    };

    debug!(endpoint = %endpoint, owner = username, "Registering OAuth client");

    let response = http
        .post(endpoint.clone())
        .basic_auth(username, Some(password))
        .json(&body)
        .send()
        .await
        .map_err(|e| ApiError::Auth(format!("client registration failed: {}", e)))?;

    let status = response.status();
    let text = response.text().await.unwrap_or_default();

    if !status.is_success() {
        return Err(ApiError::Auth(format!(
            "client registration rejected ({}): {}",
            status,
            format_api_error(status, &text)
        )));
    }

    let registration: ClientRegistration = serde_json::from_str(&text)
        .map_err(|e| ApiError::Auth(format!("cannot parse registration response: {}", e)))?;

    if registration.client_id.is_empty() || registration.client_secret.is_empty() {
        return Err(ApiError::Auth(
            "client registration returned an empty client id or secret".to_string(),
        ));
    }

    Ok(registration)
}
