//
//  apim-client
//  auth/oauth.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/16.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # OAuth 2.0 Token Grants
//!
//! This module exchanges credentials at the platform's token endpoint for a
//! bearer [`Credential`]. Two grants are supported:
//!
//! - **Password**: the platform user's own username and password. Used for
//!   the first token and whenever no refresh token is held.
//! - **Refresh token**: renews an expiring credential without resending the
//!   user's password.
//!
//! Both grants authenticate the *registered client* with HTTP Basic auth
//! (`client_id:client_secret`) and post a form body.
//!
//! Token requests are never retried here. A failed grant is reported to the
//! [`TokenManager`](super::TokenManager), which decides what to discard.

use chrono::{Duration, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use super::{ClientRegistration, Credential};
use crate::api::{format_api_error, ApiError};

/// Lifetime assumed when the token endpoint omits `expires_in`.
pub const DEFAULT_TOKEN_LIFETIME_SECS: i64 = 3600;

/// Which OAuth grant to perform.
///
/// # Example
///
/// ```rust
/// use apim_client::auth::Grant;
///
/// let grant = Grant::Password { username: "admin", password: "admin" };
/// assert_eq!(grant.grant_type(), "password");
/// assert_eq!(Grant::RefreshToken("r").grant_type(), "refresh_token");
/// ```
#[derive(Clone, Copy)]
pub enum Grant<'a> {
    /// Resource owner password credentials.
    Password {
        /// Platform username.
        username: &'a str,
        /// Platform password.
        password: &'a str,
    },
    /// Renewal with a previously issued refresh token.
    RefreshToken(&'a str),
}

impl Grant<'_> {
    /// The `grant_type` form value.
    pub fn grant_type(&self) -> &'static str {
        match self {
            Self::Password { .. } => "password",
            Self::RefreshToken(_) => "refresh_token",
        }
    }
}

/// Internal struct for deserializing token responses.
#[derive(Deserialize)]
struct TokenResponseRaw {
    access_token: String,
    refresh_token: Option<String>,
    #[serde(default)]
    token_type: Option<String>,
    expires_in: Option<i64>,
    scope: Option<String>,
}

impl TryFrom<TokenResponseRaw> for Credential {
    type Error = ApiError;

    fn try_from(raw: TokenResponseRaw) -> Result<Self, Self::Error> {
        let lifetime = raw.expires_in.unwrap_or(DEFAULT_TOKEN_LIFETIME_SECS).max(0);
        let expires_at = Duration::try_seconds(lifetime)
            .and_then(|d| Utc::now().checked_add_signed(d))
            .ok_or_else(|| {
                ApiError::Auth(format!(
                    "cannot parse token response: expires_in {} out of range",
                    lifetime
                ))
            })?;
        let scopes = raw
            .scope
            .map(|s| s.split_whitespace().map(String::from).collect())
            .unwrap_or_default();

        Ok(Self {
            access_token: raw.access_token,
            refresh_token: raw.refresh_token.filter(|t| !t.is_empty()),
            token_type: raw.token_type.unwrap_or_else(|| "Bearer".to_string()),
            expires_at,
            scopes,
        })
    }
}

/// Performs a grant at the token endpoint and returns the issued credential.
///
/// # Parameters
///
/// - `http`: Shared HTTP client.
/// - `endpoint`: The token endpoint, e.g. `https://host/oauth2/token`.
/// - `client`: The registered OAuth client.
/// - `grant`: Password or refresh-token grant.
/// - `scopes`: Scopes to request, sent space-separated.
///
/// # Errors
///
/// Returns [`ApiError::Auth`] if the request cannot be sent, the endpoint
/// answers with a non-200 status, or the body is not a token response.
pub async fn request_token(
    http: &Client,
    endpoint: &Url,
    client: &ClientRegistration,
    grant: Grant<'_>,
    scopes: &[String],
) -> Result<Credential, ApiError> {
    let scope = scopes.join(" ");
    let mut params = vec![("grant_type", grant.grant_type())];
    match grant {
        Grant::Password { username, password } => {
            params.push(("username", username));
            params.push(("password", password));
        }
        Grant::RefreshToken(token) => params.push(("refresh_token", token)),
    }
    params.push(("scope", &scope));

    debug!(grant = grant.grant_type(), endpoint = %endpoint, "Requesting access token");

    let response = http
        .post(endpoint.clone())
        .basic_auth(&client.client_id, Some(&client.client_secret))
        .form(&params)
        .send()
        .await
        .map_err(|e| ApiError::Auth(format!("{} grant failed: {}", grant.grant_type(), e)))?;

    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    if !status.is_success() {
        return Err(ApiError::Auth(format!(
            "{} grant rejected ({}): {}",
            grant.grant_type(),
            status,
            format_api_error(status, &body)
        )));
    }

    let raw: TokenResponseRaw = serde_json::from_str(&body).map_err(|e| {
        ApiError::Auth(format!("cannot parse token response: {}", e))
    })?;

    Credential::try_from(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn registration() -> ClientRegistration {
        ClientRegistration {
            client_id: "cid".to_string(),
            client_secret: "csecret".to_string(),
        }
    }

    #[tokio::test]
    async fn test_password_grant() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/oauth2/token")
            // base64("cid:csecret")
            .match_header("authorization", "Basic Y2lkOmNzZWNyZXQ=")
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("grant_type".into(), "password".into()),
                Matcher::UrlEncoded("username".into(), "admin".into()),
                Matcher::UrlEncoded("password".into(), "pw".into()),
                Matcher::UrlEncoded("scope".into(), "apim:api_view apim:subscribe".into()),
            ]))
            .with_status(200)
            .with_body(
                r#"{"access_token":"at","refresh_token":"rt","scope":"apim:api_view","token_type":"Bearer","expires_in":3600}"#,
            )
            .create_async()
            .await;

        let endpoint = Url::parse(&format!("{}/oauth2/token", server.url())).unwrap();
        let scopes = vec!["apim:api_view".to_string(), "apim:subscribe".to_string()];
        let credential = request_token(
            &Client::new(),
            &endpoint,
            &registration(),
            Grant::Password { username: "admin", password: "pw" },
            &scopes,
        )
        .await
        .unwrap();

        mock.assert_async().await;
        assert_eq!(credential.access_token, "at");
        assert_eq!(credential.refresh_token.as_deref(), Some("rt"));
        assert_eq!(credential.scopes, vec!["apim:api_view"]);
        assert!(!credential.is_expired());
    }

    #[tokio::test]
    async fn test_refresh_grant_rejected_is_auth_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/oauth2/token")
            .match_body(Matcher::UrlEncoded("grant_type".into(), "refresh_token".into()))
            .with_status(400)
            .with_body(r#"{"error":"invalid_grant","error_description":"Persisted access token data not found"}"#)
            .create_async()
            .await;

        let endpoint = Url::parse(&format!("{}/oauth2/token", server.url())).unwrap();
        let err = request_token(
            &Client::new(),
            &endpoint,
            &registration(),
            Grant::RefreshToken("stale"),
            &[],
        )
        .await
        .unwrap_err();

        assert!(matches!(err, ApiError::Auth(_)));
        assert!(err.to_string().contains("Persisted access token data not found"));
    }

    #[test]
    fn test_missing_expiry_uses_default_lifetime() {
        let raw: TokenResponseRaw =
            serde_json::from_str(r#"{"access_token":"at"}"#).unwrap();
        let credential = Credential::try_from(raw).unwrap();
        let remaining = credential.expires_at - Utc::now();
        assert!(remaining > Duration::seconds(DEFAULT_TOKEN_LIFETIME_SECS - 5));
        assert!(credential.refresh_token.is_none());
        assert_eq!(credential.token_type, "Bearer");
    }

    #[tokio::test]
    async fn test_huge_expiry_is_auth_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/oauth2/token")
            .with_status(200)
            .with_body(r#"{"access_token":"at","expires_in":9223372036854775807}"#)
            .create_async()
            .await;

        let endpoint = Url::parse(&format!("{}/oauth2/token", server.url())).unwrap();
        let err = request_token(
            &Client::new(),
            &endpoint,
            &registration(),
            Grant::Password { username: "admin", password: "pw" },
            &[],
        )
        .await
        .unwrap_err();

        assert!(matches!(err, ApiError::Auth(_)));
        assert!(err.to_string().contains("cannot parse token response"));
    }
}
