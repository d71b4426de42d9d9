//
//  apim-client
//  api/store/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/16.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Devportal REST API (`/api/am/store/v1`).
//!
//! # Module Organization
//!
//! - [`applications`] - Consumer applications
//! - [`subscriptions`] - Application-to-API subscriptions, single and batch
//! - [`keys`] - OAuth keys generated for an application
//! - [`key_managers`] - Key managers available for key generation
//!
//! # Resource Hierarchy
//!
//! ```text
//! Application
//! ├── Subscriptions (one per API)
//! └── Keys (one mapping per key type and key manager)
//! ```

pub mod applications;
pub mod key_managers;
pub mod keys;
pub mod subscriptions;

pub use applications::*;
pub use key_managers::*;
pub use keys::*;
pub use subscriptions::*;
