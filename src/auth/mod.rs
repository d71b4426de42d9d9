//
//  apim-client
//  auth/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/16.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Authentication Module
//!
//! This module obtains and maintains the bearer token every resource call
//! carries. The platform uses a two-step flow:
//!
//! 1. **Client registration**: the platform user registers an OAuth client
//!    and receives a client id and secret.
//! 2. **Token grant**: the registered client exchanges the user's password
//!    (or a refresh token) for an access token.
//!
//! ## Module Structure
//!
//! - [`registration`](register_client): Dynamic client registration
//! - [`oauth`](request_token): Password and refresh-token grants
//! - [`TokenManager`]: Caches the credential and refreshes it exactly once
//!   when many tasks need a token at the same moment
//!
//! ## Example
//!
//! ```rust
//! use apim_client::auth::Credential;
//! use chrono::{Duration, Utc};
//!
//! let credential = Credential {
//!     access_token: "eyJ4NXQiOiJN...".to_string(),
//!     refresh_token: Some("b4f1...".to_string()),
//!     token_type: "Bearer".to_string(),
//!     expires_at: Utc::now() + Duration::seconds(30),
//!     scopes: vec!["apim:api_view".to_string()],
//! };
//!
//! // Still valid, but inside the default 60 second safety margin.
//! assert!(!credential.is_expired());
//! assert!(credential.expires_within(Duration::seconds(60)));
//! ```

mod manager;
mod oauth;
mod registration;

pub use manager::*;
pub use oauth::*;
pub use registration::*;

use std::fmt;

use chrono::{DateTime, Duration, Utc};

/// View APIs in the publisher.
pub const SCOPE_API_VIEW: &str = "apim:api_view";
/// Create and update APIs.
pub const SCOPE_API_CREATE: &str = "apim:api_create";
/// Change API lifecycle state.
pub const SCOPE_API_PUBLISH: &str = "apim:api_publish";
/// Delete APIs.
pub const SCOPE_API_DELETE: &str = "apim:api_delete";
/// Manage subscriptions.
pub const SCOPE_SUBSCRIBE: &str = "apim:subscribe";
/// Manage applications and their keys.
pub const SCOPE_APP_MANAGE: &str = "apim:app_manage";

/// Scopes requested when the caller does not supply its own.
pub const DEFAULT_SCOPES: &[&str] = &[
    SCOPE_API_VIEW,
    SCOPE_API_CREATE,
    SCOPE_API_PUBLISH,
    SCOPE_API_DELETE,
    SCOPE_SUBSCRIBE,
    SCOPE_APP_MANAGE,
];

/// An access token issued by the platform.
///
/// # Notes
///
/// - `Debug` output never includes the token values.
/// - A credential is considered stale before `expires_at`; see
///   [`TokenManager`] for the safety margin applied.
#[derive(Clone)]
pub struct Credential {
    /// The bearer token sent on resource calls.
    pub access_token: String,
    /// Token for the refresh grant, if the platform issued one.
    pub refresh_token: Option<String>,
    /// Usually `"Bearer"`.
    pub token_type: String,
    /// Absolute expiry time.
    pub expires_at: DateTime<Utc>,
    /// Scopes actually granted.
    pub scopes: Vec<String>,
}

impl Credential {
    /// Returns `true` once `expires_at` has passed.
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }

    /// Returns `true` if the token expires within `margin` from now.
    pub fn expires_within(&self, margin: Duration) -> bool {
        self.expires_at - margin <= Utc::now()
    }

    /// Returns `true` if a refresh grant can be attempted.
    pub fn can_refresh(&self) -> bool {
        self.refresh_token.is_some()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "<redacted>"))
            .field("token_type", &self.token_type)
            .field("expires_at", &self.expires_at)
            .field("scopes", &self.scopes)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credential(expires_in: i64) -> Credential {
        Credential {
            access_token: "at".to_string(),
            refresh_token: None,
            token_type: "Bearer".to_string(),
            expires_at: Utc::now() + Duration::seconds(expires_in),
            scopes: Vec::new(),
        }
    }

    #[test]
    fn test_expiry_checks() {
        assert!(credential(-1).is_expired());
        assert!(!credential(3600).is_expired());
        assert!(credential(30).expires_within(Duration::seconds(60)));
        assert!(!credential(3600).expires_within(Duration::seconds(60)));
    }

    #[test]
    fn test_debug_hides_tokens() {
        let mut cred = credential(10);
        cred.refresh_token = Some("rt-value".to_string());
        let printed = format!("{:?}", cred);
        assert!(!printed.contains("rt-value"));
        assert!(!printed.contains("\"at\""));
        assert!(cred.can_refresh());
    }
}
