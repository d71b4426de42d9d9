//
//  apim-client
//  api/store/key_managers.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/16.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Key managers available to the devportal.
//!
//! The devportal only exposes the full list, so lookups by id or name fetch
//! the list and filter it locally.

use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};

use crate::api::{require_id, ApiError, ApimClient, SearchResult};

const SEARCH_KEY_MANAGER: &str = "search key manager";

/// A key manager as listed by the devportal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyManager {
    pub id: String,

    pub name: String,

    /// `default`, `Okta`, `KeyCloak`, ...
    #[serde(rename = "type", default)]
    pub manager_type: Option<String>,

    #[serde(default)]
    pub display_name: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub enabled: bool,

    #[serde(default)]
    pub available_grant_types: Vec<String>,

    #[serde(default)]
    pub token_endpoint: Option<String>,

    #[serde(default)]
    pub revoke_endpoint: Option<String>,

    #[serde(default)]
    pub enable_token_generation: bool,

    #[serde(default)]
    pub enable_token_encryption: bool,

    #[serde(default)]
    pub enable_token_hashing: bool,

    #[serde(rename = "enableOAuthAppCreation", default)]
    pub enable_oauth_app_creation: bool,

    #[serde(rename = "enableMapOAuthConsumerApps", default)]
    pub enable_map_oauth_consumer_apps: bool,
}

impl ApimClient {
    /// Lists every key manager visible to the user.
    pub async fn list_key_managers(&self) -> Result<SearchResult<KeyManager>, ApiError> {
        let request = self
            .authorized(Method::GET, self.endpoints().key_manager.clone())
            .await?;
        self.invoker()
            .invoke(SEARCH_KEY_MANAGER, &request, StatusCode::OK)
            .await
    }

    /// Finds a key manager by id.
    pub async fn get_key_manager(&self, id: &str) -> Result<KeyManager, ApiError> {
        require_id(id, "key manager id")?;
        self.list_key_managers()
            .await?
            .list
            .into_iter()
            .find(|km| km.id == id)
            .ok_or_else(|| ApiError::not_found(SEARCH_KEY_MANAGER, format!("key manager {}", id)))
    }

    /// Finds a key manager by name, e.g. `Resident Key Manager`.
    pub async fn find_key_manager(&self, name: &str) -> Result<KeyManager, ApiError> {
        require_id(name, "key manager name")?;
        self.list_key_managers()
            .await?
            .list
            .into_iter()
            .find(|km| km.name == name)
            .ok_or_else(|| {
                ApiError::not_found(SEARCH_KEY_MANAGER, format!("key manager {}", name))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::connected_client;

    const KEY_MANAGERS: &str = "/api/am/store/v1/key-managers";

    fn list_body() -> String {
        serde_json::json!({
            "count": 2,
            "list": [
                {
                    "id": "km-resident",
                    "name": "Resident Key Manager",
                    "type": "default",
                    "displayName": "Resident Key Manager",
                    "enabled": true,
                    "availableGrantTypes": ["client_credentials", "password", "refresh_token"],
                    "tokenEndpoint": "https://localhost:8243/token",
                    "enableTokenGeneration": true,
                    "enableOAuthAppCreation": true,
                    "enableMapOAuthConsumerApps": false
                },
                {"id": "km-okta", "name": "Okta", "type": "Okta", "enabled": false}
            ]
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_find_and_get_filter_locally() {
        let mut server = mockito::Server::new_async().await;
        let (client, _auth) = connected_client(&mut server).await;
        let mock = server
            .mock("GET", KEY_MANAGERS)
            .with_status(200)
            .with_body(list_body())
            .expect(3)
            .create_async()
            .await;

        let resident = client.find_key_manager("Resident Key Manager").await.unwrap();
        assert_eq!(resident.id, "km-resident");
        assert!(resident.enable_oauth_app_creation);
        assert_eq!(resident.manager_type.as_deref(), Some("default"));

        let okta = client.get_key_manager("km-okta").await.unwrap();
        assert_eq!(okta.name, "Okta");
        assert!(!okta.enabled);

        let err = client.find_key_manager("WSO2-IS").await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "search key manager: key manager WSO2-IS not found");

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_empty_name_rejected() {
        let mut server = mockito::Server::new_async().await;
        let (client, _auth) = connected_client(&mut server).await;
        assert!(matches!(
            client.find_key_manager("").await,
            Err(ApiError::Validation(_))
        ));
    }
}
