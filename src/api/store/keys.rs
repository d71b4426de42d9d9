//
//  apim-client
//  api/store/keys.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/16.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Application key types and operations.
//!
//! Generating keys for an application creates an OAuth client in a key
//! manager and records a *key mapping* (`keyMappingId`) linking the two.
//! Every later operation addresses the mapping under its application:
//!
//! ```text
//! {applications}/{appId}/generate-keys
//! {applications}/{appId}/oauth-keys/{keyMappingId}
//! {applications}/{appId}/oauth-keys/{keyMappingId}/regenerate-secret
//! {applications}/{appId}/oauth-keys/{keyMappingId}/clean-up
//! ```
//!
//! # Notes
//!
//! - `PRODUCTION` and `SANDBOX` keys are separate mappings.
//! - Clean-up removes a mapping left half-created by a failed generation.

use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::api::{require_id, ApiError, ApimClient};
use crate::config::join_segments;

const GENERATE_KEYS: &str = "Generate application keys";
const GET_KEYS: &str = "search application keys";
const UPDATE_KEYS: &str = "update application keys";
const REGENERATE_SECRET: &str = "Regenerate application keys";
const CLEANUP_KEYS: &str = "cleanup application keys";

/// Production key type.
pub const KEY_TYPE_PRODUCTION: &str = "PRODUCTION";
/// Sandbox key type.
pub const KEY_TYPE_SANDBOX: &str = "SANDBOX";

/// Parameters for generating or updating application keys.
///
/// # Fields
///
/// * `key_type` - [`KEY_TYPE_PRODUCTION`] or [`KEY_TYPE_SANDBOX`]
/// * `validity_time` - Access token lifetime in seconds
/// * `grant_types_to_be_supported` - e.g. `["client_credentials", "password"]`
/// * `client_id` / `client_secret` - Only when mapping an existing OAuth app
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyGenerateRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_manager: Option<String>,

    pub key_type: String,

    #[serde(default)]
    pub validity_time: i64,

    #[serde(default)]
    pub grant_types_to_be_supported: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,

    #[serde(default)]
    pub scopes: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<serde_json::Value>,
}

/// Access token issued together with generated keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationToken {
    #[serde(default)]
    pub access_token: String,
    #[serde(default)]
    pub token_scopes: Vec<String>,
    #[serde(default)]
    pub validity_time: i64,
}

/// A key mapping as returned by the devportal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationKeys {
    #[serde(default)]
    pub key_mapping_id: String,

    #[serde(default)]
    pub key_manager: Option<String>,

    #[serde(default)]
    pub consumer_key: String,

    #[serde(default)]
    pub consumer_secret: String,

    #[serde(default)]
    pub supported_grant_types: Vec<String>,

    #[serde(default)]
    pub callback_url: Option<String>,

    /// `COMPLETED`, `CREATED` (pending approval), ...
    #[serde(default)]
    pub key_state: Option<String>,

    #[serde(default)]
    pub key_type: String,

    #[serde(default)]
    pub group_id: Option<String>,

    #[serde(default)]
    pub token: Option<ApplicationToken>,

    #[serde(default)]
    pub additional_properties: Option<serde_json::Value>,
}

/// Response of a secret regeneration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegeneratedSecret {
    #[serde(default)]
    pub consumer_key: String,
    #[serde(default)]
    pub consumer_secret: String,
}

fn key_mapping_url(
    applications: &Url,
    app_id: &str,
    key_mapping_id: &str,
    action: Option<&str>,
) -> Result<Url, ApiError> {
    require_id(app_id, "application id")?;
    require_id(key_mapping_id, "key mapping id")?;
    let mut segments = vec![app_id, "oauth-keys", key_mapping_id];
    segments.extend(action);
    join_segments(applications, &segments)
}

impl ApimClient {
    /// Generates keys for an application in a key manager.
    pub async fn generate_keys(
        &self,
        app_id: &str,
        keys: &KeyGenerateRequest,
    ) -> Result<ApplicationKeys, ApiError> {
        require_id(app_id, "application id")?;
        let url = join_segments(&self.endpoints().application, &[app_id, "generate-keys"])?;
        let request = self.authorized(Method::POST, url).await?.with_json(keys)?;
        self.invoker()
            .invoke(GENERATE_KEYS, &request, StatusCode::OK)
            .await
    }

    pub async fn get_application_keys(
        &self,
        app_id: &str,
        key_mapping_id: &str,
    ) -> Result<ApplicationKeys, ApiError> {
        let url = key_mapping_url(&self.endpoints().application, app_id, key_mapping_id, None)?;
        let request = self.authorized(Method::GET, url).await?;
        self.invoker().invoke(GET_KEYS, &request, StatusCode::OK).await
    }

    pub async fn update_application_keys(
        &self,
        app_id: &str,
        key_mapping_id: &str,
        keys: &KeyGenerateRequest,
    ) -> Result<ApplicationKeys, ApiError> {
        let url = key_mapping_url(&self.endpoints().application, app_id, key_mapping_id, None)?;
        let request = self.authorized(Method::PUT, url).await?.with_json(keys)?;
        self.invoker()
            .invoke(UPDATE_KEYS, &request, StatusCode::OK)
            .await
    }

    /// Issues a new consumer secret for a key mapping.
    pub async fn regenerate_secret(
        &self,
        app_id: &str,
        key_mapping_id: &str,
    ) -> Result<RegeneratedSecret, ApiError> {
        let url = key_mapping_url(
            &self.endpoints().application,
            app_id,
            key_mapping_id,
            Some("regenerate-secret"),
        )?;
        let request = self.authorized(Method::POST, url).await?;
        self.invoker()
            .invoke(REGENERATE_SECRET, &request, StatusCode::OK)
            .await
    }

    /// Removes a key mapping left behind by a failed generation.
    pub async fn cleanup_keys(&self, app_id: &str, key_mapping_id: &str) -> Result<(), ApiError> {
        let url = key_mapping_url(
            &self.endpoints().application,
            app_id,
            key_mapping_id,
            Some("clean-up"),
        )?;
        let request = self.authorized(Method::POST, url).await?;
        self.invoker()
            .invoke_discard(CLEANUP_KEYS, &request, StatusCode::OK)
            .await
    }
}
