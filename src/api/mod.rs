//
//  apim-client
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/16.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! This module provides the typed client for an API Manager's REST APIs.
//!
//! ## Supported Resources
//!
//! - **Publisher**: APIs and their lifecycle
//! - **Devportal (store)**: applications, subscriptions, application keys,
//!   and key managers
//!
//! ## Architecture
//!
//! - [`client`]: The [`ApimClient`] context (endpoints, tokens, invoker)
//! - [`invoker`](HttpInvoker): Retry, status checking, and decoding
//! - [`transport`](Transport): The raw HTTP seam
//! - [`publisher`]: API operations
//! - [`store`]: Application, subscription, key and key manager operations
//! - [`common`]: Shared types (errors, search results)
//!
//! ## Usage
//!
//! ```rust,no_run
//! use apim_client::api::{ApimClient, publisher::ApiRequest};
//! use apim_client::config::Config;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = ApimClient::connect(&Config::load(None)?).await?;
//!
//! let api = client
//!     .create_api(&ApiRequest {
//!         name: "PizzaShackAPI".into(),
//!         context: "/pizzashack".into(),
//!         version: "1.0.0".into(),
//!         ..Default::default()
//!     })
//!     .await?;
//! client.change_api_lifecycle(&api.id, "Publish").await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Every operation returns [`ApiError`]. The variants most callers branch on:
//!
//! - `NotFound`: 404 from the platform, or a search with no match
//! - `Ambiguous`: a search matched more than one resource
//! - `Validation`: an empty identifier, rejected before any request
//! - `Transport` / 5xx `Status`: transient, already retried

/// The [`ApimClient`] context object.
pub mod client;

/// Shared types used across resource kinds.
pub mod common;

/// Publisher API operations: create, read, update, delete, search, and
/// lifecycle changes.
pub mod publisher;

/// Devportal operations: applications, subscriptions, keys, key managers.
pub mod store;

mod invoker;
mod retry;
mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use client::ApimClient;
pub use common::*;
pub use invoker::HttpInvoker;
pub use retry::RetryPolicy;
pub use transport::*;
