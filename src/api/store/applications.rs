//
//  apim-client
//  api/store/applications.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/16.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Devportal application types and operations.
//!
//! An application is the consumer side of a subscription: it subscribes to
//! APIs and owns the OAuth keys used to call them.
//!
//! # Example
//!
//! ```rust,no_run
//! use apim_client::api::ApimClient;
//! use apim_client::api::store::ApplicationRequest;
//!
//! # async fn example(client: &ApimClient) -> Result<(), apim_client::api::ApiError> {
//! let app = client
//!     .create_application(&ApplicationRequest::new("PizzaApp", "Unlimited"))
//!     .await?;
//! println!("{} -> {}", app.application_id, client.application_dashboard_url(&app.application_id)?);
//! # Ok(())
//! # }
//! ```

use std::collections::BTreeMap;

use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::api::{require_id, ApiError, ApimClient, SearchResult};
use crate::config::join_segments;

const CREATE_APPLICATION: &str = "create Application";
const GET_APPLICATION: &str = "get Application";
const UPDATE_APPLICATION: &str = "update Application";
const DELETE_APPLICATION: &str = "delete Application";
const SEARCH_APPLICATION: &str = "search Application";

/// Fields a caller may set when creating or updating an application.
///
/// # Fields
///
/// * `name` - Unique per owner
/// * `throttling_policy` - Application tier, e.g. `Unlimited` or `10PerMin`
/// * `token_type` - `JWT` or `OAUTH`
/// * `attributes` - Free-form key/value pairs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRequest {
    pub name: String,

    pub throttling_policy: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
}

impl ApplicationRequest {
    pub fn new(name: impl Into<String>, throttling_policy: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            throttling_policy: throttling_policy.into(),
            ..Default::default()
        }
    }
}

/// An application as returned by the devportal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub application_id: String,

    pub name: String,

    #[serde(default)]
    pub throttling_policy: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub token_type: Option<String>,

    /// `APPROVED`, `CREATED` (pending workflow) or `REJECTED`.
    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub subscription_count: u64,

    #[serde(default)]
    pub attributes: BTreeMap<String, String>,

    #[serde(default)]
    pub owner: Option<String>,

    #[serde(default)]
    pub groups: Vec<String>,
}

impl ApimClient {
    pub async fn create_application(
        &self,
        application: &ApplicationRequest,
    ) -> Result<Application, ApiError> {
        let request = self
            .authorized(Method::POST, self.endpoints().application.clone())
            .await?
            .with_json(application)?;
        self.invoker()
            .invoke(CREATE_APPLICATION, &request, StatusCode::CREATED)
            .await
    }

    pub async fn get_application(&self, id: &str) -> Result<Application, ApiError> {
        require_id(id, "application id")?;
        let url = join_segments(&self.endpoints().application, &[id])?;
        let request = self.authorized(Method::GET, url).await?;
        self.invoker()
            .invoke(GET_APPLICATION, &request, StatusCode::OK)
            .await
    }

    pub async fn update_application(
        &self,
        id: &str,
        application: &ApplicationRequest,
    ) -> Result<Application, ApiError> {
        require_id(id, "application id")?;
        let url = join_segments(&self.endpoints().application, &[id])?;
        let request = self
            .authorized(Method::PUT, url)
            .await?
            .with_json(application)?;
        self.invoker()
            .invoke(UPDATE_APPLICATION, &request, StatusCode::OK)
            .await
    }

    pub async fn delete_application(&self, id: &str) -> Result<(), ApiError> {
        require_id(id, "application id")?;
        let url = join_segments(&self.endpoints().application, &[id])?;
        let request = self.authorized(Method::DELETE, url).await?;
        self.invoker()
            .invoke_discard(DELETE_APPLICATION, &request, StatusCode::OK)
            .await
    }

    /// Lists applications whose name matches `query`.
    pub async fn list_applications(
        &self,
        query: &str,
    ) -> Result<SearchResult<Application>, ApiError> {
        let request = self
            .authorized(Method::GET, self.endpoints().application.clone())
            .await?
            .with_query(&[("query", query)]);
        self.invoker()
            .invoke(SEARCH_APPLICATION, &request, StatusCode::OK)
            .await
    }

    /// Resolves the id of the single application named `name`.
    ///
    /// # Errors
    ///
    /// [`ApiError::NotFound`] for no match, [`ApiError::Ambiguous`] for
    /// several.
    pub async fn search_application(&self, name: &str) -> Result<String, ApiError> {
        require_id(name, "application name")?;
        let what = format!("application {}", name);
        let app = self
            .list_applications(name)
            .await?
            .into_single(SEARCH_APPLICATION, &what)?;
        Ok(app.application_id)
    }

    /// Devportal overview page of an application. No request is made.
    pub fn application_dashboard_url(&self, app_id: &str) -> Result<Url, ApiError> {
        self.endpoints().application_dashboard_url(app_id)
    }
}

#[cfg(test)]
mod tests {
    use mockito::Matcher;

    use super::*;
    use crate::api::testing::connected_client;

    const APPS: &str = "/api/am/store/v1/applications";

    fn app_body(id: &str) -> String {
        serde_json::json!({
            "applicationId": id,
            "name": "PizzaApp",
            "throttlingPolicy": "Unlimited",
            "description": "orders pizza",
            "tokenType": "JWT",
            "status": "APPROVED",
            "groups": [],
            "subscriptionCount": 0,
            "attributes": {"team": "food"},
            "owner": "admin"
        })
        .to_string()
    }

    #[test]
    fn test_request_serialization() {
        let mut request = ApplicationRequest::new("PizzaApp", "Unlimited");
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body, serde_json::json!({"name": "PizzaApp", "throttlingPolicy": "Unlimited"}));

        request.attributes.insert("team".into(), "food".into());
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["attributes"]["team"], "food");
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let mut server = mockito::Server::new_async().await;
        let (client, _auth) = connected_client(&mut server).await;
        let create = server
            .mock("POST", APPS)
            .match_body(Matcher::PartialJsonString(
                r#"{"name":"PizzaApp","throttlingPolicy":"Unlimited"}"#.into(),
            ))
            .with_status(201)
            .with_body(app_body("app-1"))
            .create_async()
            .await;
        let _mock = server
            .mock("GET", format!("{}/app-1", APPS).as_str())
            .with_status(200)
            .with_body(app_body("app-1"))
            .create_async()
            .await;

        let mut request = ApplicationRequest::new("PizzaApp", "Unlimited");
        request.description = Some("orders pizza".into());
        let created = client.create_application(&request).await.unwrap();
        let fetched = client.get_application(&created.application_id).await.unwrap();

        create.assert_async().await;
        assert_eq!(created, fetched);
        assert_eq!(fetched.attributes.get("team").map(String::as_str), Some("food"));
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let mut server = mockito::Server::new_async().await;
        let (client, _auth) = connected_client(&mut server).await;
        let update = server
            .mock("PUT", format!("{}/app-1", APPS).as_str())
            .with_status(200)
            .with_body(app_body("app-1"))
            .create_async()
            .await;
        let delete = server
            .mock("DELETE", format!("{}/app-1", APPS).as_str())
            .with_status(200)
            .create_async()
            .await;

        client
            .update_application("app-1", &ApplicationRequest::new("PizzaApp", "10PerMin"))
            .await
            .unwrap();
        client.delete_application("app-1").await.unwrap();
        update.assert_async().await;
        delete.assert_async().await;
    }

    #[tokio::test]
    async fn test_search_application() {
        let mut server = mockito::Server::new_async().await;
        let (client, _auth) = connected_client(&mut server).await;
        let _mock = server
            .mock("GET", APPS)
            .match_query(Matcher::UrlEncoded("query".into(), "PizzaApp".into()))
            .with_status(200)
            .with_body(format!(r#"{{"count":1,"list":[{}]}}"#, app_body("app-1")))
            .create_async()
            .await;
        let _mock = server
            .mock("GET", APPS)
            .match_query(Matcher::UrlEncoded("query".into(), "Missing".into()))
            .with_status(200)
            .with_body(r#"{"count":0,"list":[]}"#)
            .create_async()
            .await;

        assert_eq!(client.search_application("PizzaApp").await.unwrap(), "app-1");
        let err = client.search_application("Missing").await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "search Application: application Missing not found");
    }

    #[tokio::test]
    async fn test_dashboard_url() {
        let mut server = mockito::Server::new_async().await;
        let (client, _auth) = connected_client(&mut server).await;
        let url = client.application_dashboard_url("app-1").unwrap();
        assert_eq!(
            url.as_str(),
            format!("{}/devportal/applications/app-1/overview", server.url())
        );
    }
}
