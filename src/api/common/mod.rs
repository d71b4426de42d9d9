//
//  apim-client
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/16.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Common API Types for the Publisher and Devportal APIs
//!
//! This module provides the shared error type and the paginated search
//! envelope used by every resource kind.
//!
//! # Overview
//!
//! - [`ApiError`] - Unified error type for all client operations
//! - [`format_api_error`] - Condenses a platform error body into a message
//! - Search envelopes (re-exported from [`pagination`] submodule)
//!
//! # Example
//!
//! ```rust
//! use apim_client::api::common::ApiError;
//!
//! fn handle_result<T>(result: Result<T, ApiError>) {
//!     match result {
//!         Ok(_) => println!("Success!"),
//!         Err(e) if e.is_not_found() => println!("Remote resource is gone"),
//!         Err(ApiError::Ambiguous { what, count, .. }) => {
//!             println!("{} matched {} resources", what, count)
//!         }
//!         Err(e) => println!("Error: {}", e),
//!     }
//! }
//! ```

use reqwest::StatusCode;
use thiserror::Error;

mod pagination;

pub use pagination::*;

/// Unified error type for all API-management client operations.
///
/// Every fallible operation in the client returns `ApiError`. The variants
/// are deliberately coarse so callers can branch on the *kind* of failure
/// (e.g. drop local state on [`ApiError::NotFound`]) without parsing
/// messages.
///
/// # Variants
///
/// | Variant | Raised when | Retried |
/// |---------|-------------|---------|
/// | `Config` | Endpoint construction or credentials are invalid | No |
/// | `Auth` | Client registration or a token grant failed | No |
/// | `Transport` | Network failure after the retry budget is spent | Yes |
/// | `Status` | The platform answered with an unexpected status | 5xx only |
/// | `NotFound` | 404, or a lookup matched nothing | No |
/// | `Ambiguous` | A lookup matched more than one resource | No |
/// | `Validation` | A required identifier was empty | Never sent |
/// | `Decode` | The response body did not match the expected shape | No |
///
/// # Notes
///
/// - Messages carry the operation label (e.g. `"create API"`) but never the
///   bearer token.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Configuration could not be turned into a working client.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Dynamic client registration or token acquisition failed.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// The request could not be delivered, even after retrying.
    #[error("{context}: request failed after {attempts} attempt(s): {message}")]
    Transport {
        /// Label of the logical operation that failed.
        context: String,
        /// Total number of attempts made.
        attempts: u32,
        /// Description of the last transport failure.
        message: String,
    },

    /// The platform answered with a status other than the expected one.
    #[error("{context}: unexpected status {status}: {message}")]
    Status {
        /// Label of the logical operation that failed.
        context: String,
        /// The status code returned by the platform.
        status: StatusCode,
        /// Message extracted from the error body.
        message: String,
    },

    /// The requested resource does not exist remotely.
    #[error("{context}: {what} not found")]
    NotFound {
        /// Label of the logical operation that failed.
        context: String,
        /// Description of the missing resource.
        what: String,
    },

    /// A lookup that must match exactly one resource matched several.
    #[error("{context}: {what} matched {count} resources, expected exactly one")]
    Ambiguous {
        /// Label of the logical operation that failed.
        context: String,
        /// Description of what was searched for.
        what: String,
        /// Number of matches reported by the platform.
        count: u64,
    },

    /// A required local input was missing. No request was sent.
    #[error("Invalid request: {0}")]
    Validation(String),

    /// The response body could not be decoded into the expected type.
    #[error("{context}: cannot decode response: {source}")]
    Decode {
        /// Label of the logical operation that failed.
        context: String,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    /// Returns `true` when the remote resource is absent.
    ///
    /// Callers reconciling local state use this to treat their record as
    /// stale rather than as a hard failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns `true` for failures that may succeed if the whole operation
    /// is attempted again later.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport { .. } => true,
            Self::Status { status, .. } => status.is_server_error(),
            _ => false,
        }
    }

    pub(crate) fn not_found(context: &str, what: impl Into<String>) -> Self {
        Self::NotFound {
            context: context.to_string(),
            what: what.into(),
        }
    }

    pub(crate) fn ambiguous(context: &str, what: impl Into<String>, count: u64) -> Self {
        Self::Ambiguous {
            context: context.to_string(),
            what: what.into(),
            count,
        }
    }
}

/// Returns a validation error when `value` is empty.
///
/// Every operation calls this for each identifier it needs before acquiring
/// a token or touching the network.
pub fn require_id(value: &str, what: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::Validation(format!("{} is empty", what)));
    }
    Ok(())
}

/// Extracts a readable message from a platform error body.
///
/// The publisher and devportal APIs return errors in the format:
/// ```json
/// {"code": 404, "message": "Not Found", "description": "Requested API with id 'x' not found"}
/// ```
///
/// The description is preferred because it names the offending resource; the
/// message is used when no description is present. Anything else falls back
/// to the raw body, or to the canonical reason phrase when the body is empty.
pub fn format_api_error(status: StatusCode, body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
        let description = json.get("description").and_then(|d| d.as_str());
        let message = json.get("message").and_then(|m| m.as_str());

        match (message, description) {
            (Some(m), Some(d)) if !d.is_empty() && d != m => return format!("{}: {}", m, d),
            (Some(m), _) => return m.to_string(),
            (None, Some(d)) => return d.to_string(),
            (None, None) => {}
        }

        // OAuth error format: {"error": "invalid_grant", "error_description": "..."}
        if let Some(error) = json.get("error").and_then(|e| e.as_str()) {
            return match json.get("error_description").and_then(|d| d.as_str()) {
                Some(d) => format!("{}: {}", error, d),
                None => error.to_string(),
            };
        }
    }

    let body = body.trim();
    if body.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("no response body")
            .to_string()
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_api_error_prefers_description() {
        let body = r#"{"code":404,"message":"Not Found","description":"Requested API with Id 'x' not found"}"#;
        assert_eq!(
            format_api_error(StatusCode::NOT_FOUND, body),
            "Not Found: Requested API with Id 'x' not found"
        );
    }

    #[test]
    fn test_format_api_error_oauth_body() {
        let body = r#"{"error":"invalid_grant","error_description":"Provided Authorization Grant is invalid"}"#;
        assert_eq!(
            format_api_error(StatusCode::BAD_REQUEST, body),
            "invalid_grant: Provided Authorization Grant is invalid"
        );
    }

    #[test]
    fn test_format_api_error_fallbacks() {
        assert_eq!(format_api_error(StatusCode::BAD_GATEWAY, ""), "Bad Gateway");
        assert_eq!(format_api_error(StatusCode::CONFLICT, "boom"), "boom");
    }

    #[test]
    fn test_require_id() {
        assert!(require_id("abc", "API id").is_ok());
        let err = require_id("  ", "application id").unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
        assert_eq!(err.to_string(), "Invalid request: application id is empty");
    }

    #[test]
    fn test_error_kinds() {
        assert!(ApiError::not_found("get API", "API abc").is_not_found());
        assert!(!ApiError::ambiguous("search API", "API foo", 2).is_not_found());

        let server = ApiError::Status {
            context: "create API".into(),
            status: StatusCode::SERVICE_UNAVAILABLE,
            message: "down".into(),
        };
        assert!(server.is_transient());

        let client = ApiError::Status {
            context: "create API".into(),
            status: StatusCode::BAD_REQUEST,
            message: "bad".into(),
        };
        assert!(!client.is_transient());
    }
}
