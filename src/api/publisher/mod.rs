//
//  apim-client
//  api/publisher/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/16.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Publisher REST API (`/api/am/publisher/v1`).
//!
//! The publisher side owns API definitions: their metadata, operations,
//! backend endpoints, and lifecycle state.
//!
//! # Module Organization
//!
//! - [`apis`] - API models and the create, read, update, delete, search and
//!   lifecycle operations on [`ApimClient`](super::ApimClient)
//!
//! # Notes
//!
//! - Identifiers are platform-assigned UUIDs
//! - `lifeCycleStatus` is read-only on the API resource; change it with
//!   [`change_api_lifecycle`](super::ApimClient::change_api_lifecycle)

pub mod apis;

pub use apis::*;
