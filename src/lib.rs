//
//  apim-client
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/16.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Manager Client Library
//!
//! A typed client for the publisher and devportal REST APIs of an API
//! manager, plus the `apim` command-line tool built on it.
//!
//! ## Overview
//!
//! The client maps resource definitions (APIs, applications, subscriptions
//! and application keys) onto the platform's REST surface. It:
//!
//! - registers an OAuth client on first use and keeps a bearer token fresh
//! - retries network failures and server errors with jittered backoff
//! - exposes create/read/update/delete/search per resource kind
//!
//! ## Module Structure
//!
//! - [`api`]: The [`ApimClient`] context, HTTP invoker and resource operations
//! - [`auth`]: Client registration and token management
//! - [`config`]: Configuration file, environment overrides and endpoints
//! - [`cli`]: Command-line interface definitions using clap
//! - [`output`]: Output formatting (Table, JSON, YAML)
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use apim_client::api::store::ApplicationRequest;
//! use apim_client::{ApimClient, Config};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = Config::load(None)?;
//! let client = ApimClient::connect(&config).await?;
//!
//! let app = client
//!     .create_application(&ApplicationRequest::new("PizzaApp", "Unlimited"))
//!     .await?;
//! let id = client.search_application("PizzaApp").await?;
//! assert_eq!(app.application_id, id);
//! # Ok(())
//! # }
//! ```

/// Command-line interface definitions.
pub mod cli;

/// The client context and resource operations.
///
/// Every operation returns [`api::ApiError`] on failure. Operations never
/// panic and never exit the process.
pub mod api;

/// OAuth client registration and bearer token management.
pub mod auth;

/// Configuration file management.
///
/// Manages the configuration stored in platform-specific locations:
/// - Linux: `~/.config/apim/config.toml`
/// - macOS: `~/Library/Application Support/apim/config.toml`
/// - Windows: `%APPDATA%\apim\config.toml`
pub mod config;

/// Output formatting for the `apim` binary.
pub mod output;

pub use api::{ApiError, ApimClient};
pub use cli::Cli;
pub use config::Config;

/// Application version, derived from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit codes for the CLI.
///
/// # Example
///
/// ```rust,no_run
/// use apim_client::exit_codes;
/// use std::process;
///
/// process::exit(exit_codes::CONFIG_ERROR);
/// ```
pub mod exit_codes {
    use crate::api::ApiError;

    /// Successful execution.
    pub const SUCCESS: i32 = 0;

    /// General error. Check stderr for details.
    pub const ERROR: i32 = 1;

    /// Missing or invalid configuration, e.g. no platform host.
    pub const CONFIG_ERROR: i32 = 3;

    /// Client registration or token grant failed.
    pub const AUTH_ERROR: i32 = 4;

    /// The requested resource does not exist.
    pub const NOT_FOUND: i32 = 8;

    /// A search matched more than one resource.
    pub const AMBIGUOUS: i32 = 9;

    /// Maps a client error to the exit code the CLI reports.
    pub fn for_error(err: &ApiError) -> i32 {
        match err {
            ApiError::Config(_) => CONFIG_ERROR,
            ApiError::Auth(_) => AUTH_ERROR,
            ApiError::NotFound { .. } => NOT_FOUND,
            ApiError::Ambiguous { .. } => AMBIGUOUS,
            _ => ERROR,
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_for_error() {
            assert_eq!(for_error(&ApiError::Config("no host".into())), CONFIG_ERROR);
            assert_eq!(for_error(&ApiError::Auth("denied".into())), AUTH_ERROR);
            assert_eq!(for_error(&ApiError::not_found("get API", "/apis/x")), NOT_FOUND);
            assert_eq!(for_error(&ApiError::ambiguous("search API", "API x", 2)), AMBIGUOUS);
            assert_eq!(for_error(&ApiError::Validation("API id is empty".into())), ERROR);
        }
    }
}
