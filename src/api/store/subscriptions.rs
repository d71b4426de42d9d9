//
//  apim-client
//  api/store/subscriptions.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/16.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Devportal subscription types and operations.
//!
//! A subscription binds one application to one API under a throttling tier.
//! Several subscriptions can be created in one round trip with
//! [`create_subscriptions`](ApimClient::create_subscriptions).

use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};

use crate::api::{require_id, ApiError, ApimClient};
use crate::config::join_segments;

const CREATE_SUBSCRIPTION: &str = "create subscription";
const GET_SUBSCRIPTION: &str = "get subscription";
const UPDATE_SUBSCRIPTION: &str = "update subscription";
const UNSUBSCRIBE: &str = "unsubscribe api";
const CREATE_SUBSCRIPTIONS: &str = "create multiple subscriptions";

/// Fields a caller may set when creating or updating a subscription.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionRequest {
    pub application_id: String,

    pub api_id: String,

    /// Subscription tier, e.g. `Unlimited` or `Gold`.
    pub throttling_policy: String,

    /// Tier requested on update while a tier-change workflow is pending.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requested_throttling_policy: Option<String>,
}

impl SubscriptionRequest {
    pub fn new(
        application_id: impl Into<String>,
        api_id: impl Into<String>,
        throttling_policy: impl Into<String>,
    ) -> Self {
        Self {
            application_id: application_id.into(),
            api_id: api_id.into(),
            throttling_policy: throttling_policy.into(),
            requested_throttling_policy: None,
        }
    }
}

/// Summary of the subscribed API embedded in a subscription.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscribedApiInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub context: Option<String>,
}

/// A subscription as returned by the devportal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub subscription_id: String,

    pub application_id: String,

    #[serde(default)]
    pub api_id: String,

    #[serde(default)]
    pub api_info: Option<SubscribedApiInfo>,

    #[serde(default)]
    pub throttling_policy: String,

    #[serde(default)]
    pub requested_throttling_policy: Option<String>,

    /// `UNBLOCKED`, `BLOCKED`, `ON_HOLD`, `TIER_UPDATE_PENDING`, ...
    #[serde(default)]
    pub status: Option<String>,
}

impl ApimClient {
    pub async fn create_subscription(
        &self,
        subscription: &SubscriptionRequest,
    ) -> Result<Subscription, ApiError> {
        require_id(&subscription.application_id, "application id")?;
        require_id(&subscription.api_id, "API id")?;
        let request = self
            .authorized(Method::POST, self.endpoints().subscription.clone())
            .await?
            .with_json(subscription)?;
        self.invoker()
            .invoke(CREATE_SUBSCRIPTION, &request, StatusCode::CREATED)
            .await
    }

    pub async fn get_subscription(&self, id: &str) -> Result<Subscription, ApiError> {
        require_id(id, "subscription id")?;
        let url = join_segments(&self.endpoints().subscription, &[id])?;
        let request = self.authorized(Method::GET, url).await?;
        self.invoker()
            .invoke(GET_SUBSCRIPTION, &request, StatusCode::OK)
            .await
    }

    pub async fn update_subscription(
        &self,
        id: &str,
        subscription: &SubscriptionRequest,
    ) -> Result<Subscription, ApiError> {
        require_id(id, "subscription id")?;
        let url = join_segments(&self.endpoints().subscription, &[id])?;
        let request = self
            .authorized(Method::PUT, url)
            .await?
            .with_json(subscription)?;
        self.invoker()
            .invoke(UPDATE_SUBSCRIPTION, &request, StatusCode::OK)
            .await
    }

    /// Removes a subscription. The response body, usually empty, is ignored.
    pub async fn unsubscribe(&self, id: &str) -> Result<(), ApiError> {
        require_id(id, "subscription id")?;
        let url = join_segments(&self.endpoints().subscription, &[id])?;
        let request = self.authorized(Method::DELETE, url).await?;
        self.invoker()
            .invoke_discard(UNSUBSCRIBE, &request, StatusCode::OK)
            .await
    }

    /// Creates several subscriptions in one request.
    ///
    /// The platform answers `200 OK` (not `201`) with the created
    /// subscriptions in request order. An empty slice is rejected locally.
    pub async fn create_subscriptions(
        &self,
        subscriptions: &[SubscriptionRequest],
    ) -> Result<Vec<Subscription>, ApiError> {
        if subscriptions.is_empty() {
            return Err(ApiError::Validation("subscription list is empty".to_string()));
        }
        for subscription in subscriptions {
            require_id(&subscription.application_id, "application id")?;
            require_id(&subscription.api_id, "API id")?;
        }
        let request = self
            .authorized(Method::POST, self.endpoints().multi_subscription.clone())
            .await?
            .with_json(subscriptions)?;
        self.invoker()
            .invoke(CREATE_SUBSCRIPTIONS, &request, StatusCode::OK)
            .await
    }
}
