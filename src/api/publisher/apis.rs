//
//  apim-client
//  api/publisher/apis.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/16.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Publisher API types and operations.
//!
//! # Overview
//!
//! An *API* is a proxy definition published on the gateway: a context path,
//! a version, a set of operations (verb + target), and the backend endpoints
//! requests are forwarded to.
//!
//! # Lifecycle
//!
//! ```text
//! CREATED ──Publish──> PUBLISHED ──Deprecate──> DEPRECATED ──Retire──> RETIRED
//!    │                    │
//!    └─Deploy as a ───> PROTOTYPED        Block / Re-Publish
//!      Prototype
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use apim_client::api::ApimClient;
//! use apim_client::api::publisher::{lifecycle, ApiOperation, ApiRequest, EndpointConfig};
//!
//! # async fn example(client: &ApimClient) -> Result<(), apim_client::api::ApiError> {
//! let request = ApiRequest {
//!     name: "PizzaShackAPI".into(),
//!     context: "/pizzashack".into(),
//!     version: "1.0.0".into(),
//!     operations: vec![ApiOperation::new("GET", "/menu")],
//!     endpoint_config: Some(EndpointConfig::http("https://localhost:9443/am/sample/pizzashack/v1/api/")),
//!     ..Default::default()
//! };
//!
//! let api = client.create_api(&request).await?;
//! assert_eq!(api.life_cycle_status, "CREATED");
//!
//! let change = client.change_api_lifecycle(&api.id, lifecycle::PUBLISH).await?;
//! println!("now {}", change.lifecycle_state.state);
//! # Ok(())
//! # }
//! ```

use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};

use crate::api::{require_id, ApiError, ApimClient, SearchResult};
use crate::config::join_segments;

const CREATE_API: &str = "create API";
const GET_API: &str = "get API";
const UPDATE_API: &str = "update API";
const DELETE_API: &str = "delete API";
const SEARCH_API: &str = "search API";
const CHANGE_LIFECYCLE: &str = "change API lifecycle";

/// Lifecycle actions accepted by
/// [`change_api_lifecycle`](ApimClient::change_api_lifecycle).
pub mod lifecycle {
    pub const PUBLISH: &str = "Publish";
    pub const DEPLOY_AS_PROTOTYPE: &str = "Deploy as a Prototype";
    pub const DEMOTE_TO_CREATED: &str = "Demote to Created";
    pub const BLOCK: &str = "Block";
    pub const DEPRECATE: &str = "Deprecate";
    pub const REPUBLISH: &str = "Re-Publish";
    pub const RETIRE: &str = "Retire";
}

/// One resource operation of an API.
///
/// # Fields
///
/// * `id` - Platform-assigned, absent on create
/// * `target` - URI template, e.g. `/order/{orderId}`
/// * `verb` - HTTP method, e.g. `POST`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiOperation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default)]
    pub target: String,

    #[serde(default)]
    pub verb: String,

    /// Auth requirement, e.g. `"Application & Application User"` or `"None"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_type: Option<String>,

    /// Operation-level throttling tier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub throttling_policy: Option<String>,
}

impl ApiOperation {
    pub fn new(verb: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            verb: verb.into(),
            target: target.into(),
            ..Default::default()
        }
    }
}

/// A single backend URL.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EndpointUrl {
    pub url: String,
}

/// Backend endpoints requests are forwarded to.
///
/// Unlike the rest of the API resource this object uses snake_case keys on
/// the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// Usually `"http"`.
    pub endpoint_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sandbox_endpoints: Option<EndpointUrl>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub production_endpoints: Option<EndpointUrl>,
}

impl EndpointConfig {
    /// An HTTP endpoint serving both production and sandbox traffic.
    pub fn http(url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            endpoint_type: "http".to_string(),
            sandbox_endpoints: Some(EndpointUrl { url: url.clone() }),
            production_endpoints: Some(EndpointUrl { url }),
        }
    }
}

/// Contact details shown in the devportal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessInformation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_owner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_owner_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technical_owner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technical_owner_email: Option<String>,
}

/// Gateway CORS settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorsConfiguration {
    #[serde(default)]
    pub cors_configuration_enabled: bool,
    #[serde(default)]
    pub access_control_allow_origins: Vec<String>,
    #[serde(default)]
    pub access_control_allow_credentials: bool,
    #[serde(default)]
    pub access_control_allow_headers: Vec<String>,
    #[serde(default)]
    pub access_control_allow_methods: Vec<String>,
}

/// Fields a caller may set when creating or updating an API.
///
/// Server-computed fields (`id`, `lifeCycleStatus`, `hasThumbnail`) are not
/// part of the request.
///
/// # Fields
///
/// * `name` - Display name, unique together with `version`
/// * `context` - Gateway base path, e.g. `/pizzashack`
/// * `version` - Version string, e.g. `1.0.0`
/// * `policies` - Subscription tiers offered, e.g. `["Unlimited"]`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiRequest {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub context: String,

    pub version: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,

    /// `HTTP`, `WS`, `SOAPTOREST`, etc.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub api_type: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transport: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub policies: Vec<String>,

    /// `PUBLIC`, `PRIVATE` or `RESTRICTED`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub operations: Vec<ApiOperation>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint_config: Option<EndpointConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_information: Option<BusinessInformation>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cors_configuration: Option<CorsConfiguration>,
}

/// An API as returned by the publisher.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Api {
    pub id: String,

    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    pub context: String,

    pub version: String,

    #[serde(default)]
    pub provider: Option<String>,

    #[serde(rename = "type", default)]
    pub api_type: Option<String>,

    /// Current lifecycle state, e.g. `CREATED` or `PUBLISHED`.
    #[serde(default)]
    pub life_cycle_status: String,

    #[serde(default)]
    pub has_thumbnail: bool,

    #[serde(default)]
    pub transport: Vec<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub policies: Vec<String>,

    #[serde(default)]
    pub visibility: Option<String>,

    #[serde(default)]
    pub operations: Vec<ApiOperation>,

    #[serde(default)]
    pub endpoint_config: Option<EndpointConfig>,

    #[serde(default)]
    pub business_information: Option<BusinessInformation>,

    #[serde(default)]
    pub cors_configuration: Option<CorsConfiguration>,
}

/// An entry in an API search result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSummary {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub context: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub life_cycle_status: Option<String>,
}

/// State reached after a lifecycle action.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LifecycleState {
    #[serde(default)]
    pub state: String,
}

/// Result of [`change_api_lifecycle`](ApimClient::change_api_lifecycle).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LifecycleChange {
    /// `APPROVED` when applied immediately, `CREATED` when a workflow holds
    /// the change for approval.
    #[serde(default)]
    pub workflow_status: Option<String>,

    #[serde(default)]
    pub lifecycle_state: LifecycleState,
}

impl ApimClient {
    /// Creates an API. The platform answers `201 Created` with the new
    /// resource, including its assigned `id`.
    pub async fn create_api(&self, api: &ApiRequest) -> Result<Api, ApiError> {
        let request = self
            .authorized(Method::POST, self.endpoints().api.clone())
            .await?
            .with_json(api)?;
        self.invoker()
            .invoke(CREATE_API, &request, StatusCode::CREATED)
            .await
    }

    /// Fetches an API by id.
    pub async fn get_api(&self, id: &str) -> Result<Api, ApiError> {
        require_id(id, "API id")?;
        let url = join_segments(&self.endpoints().api, &[id])?;
        let request = self.authorized(Method::GET, url).await?;
        self.invoker().invoke(GET_API, &request, StatusCode::OK).await
    }

    /// Replaces an API's definition.
    pub async fn update_api(&self, id: &str, api: &ApiRequest) -> Result<Api, ApiError> {
        require_id(id, "API id")?;
        let url = join_segments(&self.endpoints().api, &[id])?;
        let request = self.authorized(Method::PUT, url).await?.with_json(api)?;
        self.invoker().invoke(UPDATE_API, &request, StatusCode::OK).await
    }

    /// Deletes an API. An unknown id surfaces as [`ApiError::NotFound`].
    pub async fn delete_api(&self, id: &str) -> Result<(), ApiError> {
        require_id(id, "API id")?;
        let url = join_segments(&self.endpoints().api, &[id])?;
        let request = self.authorized(Method::DELETE, url).await?;
        self.invoker()
            .invoke_discard(DELETE_API, &request, StatusCode::OK)
            .await
    }

    /// Lists APIs matching a publisher search query such as `name:Pizza`.
    pub async fn list_apis(&self, query: &str) -> Result<SearchResult<ApiSummary>, ApiError> {
        let request = self
            .authorized(Method::GET, self.endpoints().api.clone())
            .await?
            .with_query(&[("query", query)]);
        self.invoker().invoke(SEARCH_API, &request, StatusCode::OK).await
    }

    /// Resolves the id of the single API with this name and version.
    ///
    /// # Errors
    ///
    /// - [`ApiError::NotFound`] if nothing matches
    /// - [`ApiError::Ambiguous`] if more than one API matches
    pub async fn search_api(&self, name: &str, version: &str) -> Result<String, ApiError> {
        require_id(name, "API name")?;
        require_id(version, "API version")?;
        let query = format!("name:{} version:{}", name, version);
        let what = format!("API {} {}", name, version);
        let api = self.list_apis(&query).await?.into_single(SEARCH_API, &what)?;
        Ok(api.id)
    }

    /// Applies a lifecycle action (see [`lifecycle`]) to an API.
    pub async fn change_api_lifecycle(
        &self,
        id: &str,
        action: &str,
    ) -> Result<LifecycleChange, ApiError> {
        require_id(id, "API id")?;
        require_id(action, "lifecycle action")?;
        let url = join_segments(&self.endpoints().api, &["change-lifecycle"])?;
        let request = self
            .authorized(Method::POST, url)
            .await?
            .with_query(&[("apiId", id), ("action", action)]);
        self.invoker()
            .invoke(CHANGE_LIFECYCLE, &request, StatusCode::OK)
            .await
    }
}

#[cfg(test)]
mod tests {
    use mockito::Matcher;

    use super::*;
    use crate::api::testing::connected_client;

    const APIS: &str = "/api/am/publisher/v1/apis";

    fn pizza() -> ApiRequest {
        ApiRequest {
            name: "PizzaShackAPI".into(),
            description: Some("Pizza ordering".into()),
            context: "/pizzashack".into(),
            version: "1.0.0".into(),
            policies: vec!["Unlimited".into()],
            operations: vec![ApiOperation::new("GET", "/menu")],
            endpoint_config: Some(EndpointConfig::http("https://backend/pizza")),
            ..Default::default()
        }
    }

    fn pizza_response(id: &str) -> String {
        serde_json::json!({
            "id": id,
            "name": "PizzaShackAPI",
            "description": "Pizza ordering",
            "context": "/pizzashack",
            "version": "1.0.0",
            "provider": "admin",
            "type": "HTTP",
            "lifeCycleStatus": "CREATED",
            "hasThumbnail": false,
            "policies": ["Unlimited"],
            "operations": [{"id": "", "target": "/menu", "verb": "GET", "authType": "Application & Application User"}],
            "endpointConfig": {
                "endpoint_type": "http",
                "sandbox_endpoints": {"url": "https://backend/pizza"},
                "production_endpoints": {"url": "https://backend/pizza"}
            }
        })
        .to_string()
    }

    #[test]
    fn test_request_omits_server_fields() {
        let body = serde_json::to_value(pizza()).unwrap();
        assert!(body.get("id").is_none());
        assert!(body.get("lifeCycleStatus").is_none());
        assert!(body.get("provider").is_none());
        assert_eq!(body["endpointConfig"]["endpoint_type"], "http");
        assert_eq!(
            body["endpointConfig"]["production_endpoints"]["url"],
            "https://backend/pizza"
        );
    }

    #[tokio::test]
    async fn test_create_api() {
        let mut server = mockito::Server::new_async().await;
        let (client, _auth) = connected_client(&mut server).await;
        let mock = server
            .mock("POST", APIS)
            .match_header("authorization", "Bearer test-token")
            .match_body(Matcher::PartialJsonString(
                r#"{"name":"PizzaShackAPI","context":"/pizzashack","version":"1.0.0"}"#.into(),
            ))
            .with_status(201)
            .with_body(pizza_response("abc-123"))
            .create_async()
            .await;

        let api = client.create_api(&pizza()).await.unwrap();
        mock.assert_async().await;
        assert_eq!(api.id, "abc-123");
        assert_eq!(api.life_cycle_status, "CREATED");
        assert_eq!(api.api_type.as_deref(), Some("HTTP"));
    }

    #[tokio::test]
    async fn test_create_then_get_returns_same_api() {
        let mut server = mockito::Server::new_async().await;
        let (client, _auth) = connected_client(&mut server).await;
        let _mock = server
            .mock("POST", APIS)
            .with_status(201)
            .with_body(pizza_response("abc-123"))
            .create_async()
            .await;
        let _mock = server
            .mock("GET", format!("{}/abc-123", APIS).as_str())
            .with_status(200)
            .with_body(pizza_response("abc-123"))
            .create_async()
            .await;

        let created = client.create_api(&pizza()).await.unwrap();
        let fetched = client.get_api(&created.id).await.unwrap();
        assert_eq!(created, fetched);
        assert_eq!(fetched.operations[0].target, "/menu");
    }

    #[tokio::test]
    async fn test_create_expects_201() {
        let mut server = mockito::Server::new_async().await;
        let (client, _auth) = connected_client(&mut server).await;
        let _mock = server
            .mock("POST", APIS)
            .with_status(409)
            .with_body(r#"{"code":409,"message":"Conflict","description":"API PizzaShackAPI-1.0.0 already exists"}"#)
            .create_async()
            .await;

        let err = client.create_api(&pizza()).await.unwrap_err();
        assert!(matches!(err, ApiError::Status { status: StatusCode::CONFLICT, .. }));
        assert!(err.to_string().starts_with("create API:"));
        assert!(err.to_string().contains("already exists"));
    }

    #[tokio::test]
    async fn test_update_api() {
        let mut server = mockito::Server::new_async().await;
        let (client, _auth) = connected_client(&mut server).await;
        let mock = server
            .mock("PUT", format!("{}/abc-123", APIS).as_str())
            .match_body(Matcher::PartialJsonString(r#"{"description":"v2"}"#.into()))
            .with_status(200)
            .with_body(pizza_response("abc-123"))
            .create_async()
            .await;

        let mut update = pizza();
        update.description = Some("v2".into());
        client.update_api("abc-123", &update).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_delete_unknown_api_is_not_found() {
        let mut server = mockito::Server::new_async().await;
        let (client, _auth) = connected_client(&mut server).await;
        let _mock = server
            .mock("DELETE", format!("{}/gone", APIS).as_str())
            .with_status(404)
            .with_body(r#"{"code":404,"message":"Not Found"}"#)
            .create_async()
            .await;

        let err = client.delete_api("gone").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_empty_id_rejected_before_request() {
        let mut server = mockito::Server::new_async().await;
        let (client, _auth) = connected_client(&mut server).await;
        assert!(matches!(client.get_api("").await, Err(ApiError::Validation(_))));
        assert!(matches!(client.delete_api(" ").await, Err(ApiError::Validation(_))));
        assert!(matches!(
            client.change_api_lifecycle("", lifecycle::PUBLISH).await,
            Err(ApiError::Validation(_))
        ));
    }

    async fn search_with(count: u64, list: serde_json::Value) -> Result<String, ApiError> {
        let mut server = mockito::Server::new_async().await;
        let (client, _auth) = connected_client(&mut server).await;
        let _mock = server
            .mock("GET", APIS)
            .match_query(Matcher::UrlEncoded(
                "query".into(),
                "name:PizzaShackAPI version:1.0.0".into(),
            ))
            .with_status(200)
            .with_body(serde_json::json!({"count": count, "list": list}).to_string())
            .create_async()
            .await;
        client.search_api("PizzaShackAPI", "1.0.0").await
    }

    #[tokio::test]
    async fn test_search_api_single_match() {
        let id = search_with(1, serde_json::json!([{"id": "abc-123", "name": "PizzaShackAPI"}]))
            .await
            .unwrap();
        assert_eq!(id, "abc-123");
    }

    #[tokio::test]
    async fn test_search_api_no_match() {
        let err = search_with(0, serde_json::json!([])).await.unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().starts_with("search API:"));
    }

    #[tokio::test]
    async fn test_search_api_ambiguous() {
        let err = search_with(
            2,
            serde_json::json!([{"id": "a"}, {"id": "b"}]),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ApiError::Ambiguous { count: 2, .. }));
    }

    #[tokio::test]
    async fn test_change_lifecycle_sends_query() {
        let mut server = mockito::Server::new_async().await;
        let (client, _auth) = connected_client(&mut server).await;
        let mock = server
            .mock("POST", format!("{}/change-lifecycle", APIS).as_str())
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("apiId".into(), "abc-123".into()),
                Matcher::UrlEncoded("action".into(), "Publish".into()),
            ]))
            .with_status(200)
            .with_body(r#"{"workflowStatus":"APPROVED","lifecycleState":{"state":"Published"}}"#)
            .create_async()
            .await;

        let change = client
            .change_api_lifecycle("abc-123", lifecycle::PUBLISH)
            .await
            .unwrap();
        mock.assert_async().await;
        assert_eq!(change.workflow_status.as_deref(), Some("APPROVED"));
        assert_eq!(change.lifecycle_state.state, "Published");
    }
}
