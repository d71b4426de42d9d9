//
//  apim-client
//  output/resources.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/16.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! [`TableOutput`] for the resource types returned by the client.

use super::{format_bool, format_status, print_field, print_header, truncate, TableBuilder, TableOutput};
use crate::api::publisher::{Api, ApiSummary, LifecycleChange};
use crate::api::store::{Application, ApplicationKeys, KeyManager, RegeneratedSecret, Subscription};

fn or_dash(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or("-")
}

impl TableOutput for Api {
    fn print_table(&self, color: bool) {
        print_header(&format!("{} {}", self.name, self.version));
        print_field("ID", &self.id, color);
        print_field("Context", &self.context, color);
        print_field("Lifecycle", &format_status(&self.life_cycle_status, color), color);
        print_field("Provider", or_dash(self.provider.as_deref()), color);
        print_field("Type", or_dash(self.api_type.as_deref()), color);
        print_field("Visibility", or_dash(self.visibility.as_deref()), color);
        if !self.transport.is_empty() {
            print_field("Transport", &self.transport.join(", "), color);
        }
        if !self.policies.is_empty() {
            print_field("Policies", &self.policies.join(", "), color);
        }
        if !self.tags.is_empty() {
            print_field("Tags", &self.tags.join(", "), color);
        }
        if let Some(desc) = &self.description {
            print_field("Description", desc, color);
        }
        if let Some(production) = self
            .endpoint_config
            .as_ref()
            .and_then(|e| e.production_endpoints.as_ref())
        {
            print_field("Production", &production.url, color);
        }

        if !self.operations.is_empty() {
            println!();
            TableBuilder::new()
                .color(color)
                .headers(["Verb", "Target", "Auth", "Policy"])
                .rows(self.operations.iter().map(|op| {
                    [
                        op.verb.clone(),
                        op.target.clone(),
                        or_dash(op.auth_type.as_deref()).to_string(),
                        or_dash(op.throttling_policy.as_deref()).to_string(),
                    ]
                }))
                .print();
        }
        println!();
    }
}

impl TableOutput for ApiSummary {
    fn print_table(&self, color: bool) {
        let status = self.life_cycle_status.as_deref().unwrap_or("-");
        println!(
            "{:<38} {:<30} {:<10} {}",
            self.id,
            truncate(&self.name, 30),
            self.version,
            format_status(status, color)
        );
    }
}

impl TableOutput for LifecycleChange {
    fn print_table(&self, color: bool) {
        print_field(
            "State",
            &format_status(&self.lifecycle_state.state, color),
            color,
        );
        print_field(
            "Workflow",
            &format_status(or_dash(self.workflow_status.as_deref()), color),
            color,
        );
    }
}

impl TableOutput for Application {
    fn print_table(&self, color: bool) {
        print_header(&self.name);
        print_field("ID", &self.application_id, color);
        print_field("Policy", &self.throttling_policy, color);
        print_field(
            "Status",
            &format_status(or_dash(self.status.as_deref()), color),
            color,
        );
        print_field("Token Type", or_dash(self.token_type.as_deref()), color);
        print_field("Owner", or_dash(self.owner.as_deref()), color);
        print_field("Subscriptions", &self.subscription_count.to_string(), color);
        if let Some(desc) = &self.description {
            print_field("Description", desc, color);
        }
        for (key, value) in &self.attributes {
            print_field(&format!("  {}", key), value, color);
        }
        println!();
    }
}

impl TableOutput for Subscription {
    fn print_table(&self, color: bool) {
        print_header(&self.subscription_id);
        print_field("Application", &self.application_id, color);
        match &self.api_info {
            Some(info) => print_field(
                "API",
                &format!("{} {} ({})", info.name, info.version, self.api_id),
                color,
            ),
            None => print_field("API", &self.api_id, color),
        }
        print_field("Policy", &self.throttling_policy, color);
        if let Some(requested) = &self.requested_throttling_policy {
            print_field("Requested Policy", requested, color);
        }
        print_field(
            "Status",
            &format_status(or_dash(self.status.as_deref()), color),
            color,
        );
        println!();
    }
}

impl TableOutput for ApplicationKeys {
    fn print_table(&self, color: bool) {
        print_header(&format!("{} keys", self.key_type));
        print_field("Mapping ID", &self.key_mapping_id, color);
        print_field("Key Manager", or_dash(self.key_manager.as_deref()), color);
        print_field("Consumer Key", &self.consumer_key, color);
        print_field("Consumer Secret", &self.consumer_secret, color);
        print_field("Grant Types", &self.supported_grant_types.join(", "), color);
        print_field("Callback URL", or_dash(self.callback_url.as_deref()), color);
        print_field(
            "State",
            &format_status(or_dash(self.key_state.as_deref()), color),
            color,
        );
        if let Some(token) = &self.token {
            print_field("Access Token", &token.access_token, color);
            print_field("Token Validity", &format!("{}s", token.validity_time), color);
        }
        println!();
    }
}

impl TableOutput for RegeneratedSecret {
    fn print_table(&self, color: bool) {
        print_field("Consumer Key", &self.consumer_key, color);
        print_field("Consumer Secret", &self.consumer_secret, color);
    }
}

impl TableOutput for KeyManager {
    fn print_table(&self, color: bool) {
        print_header(self.display_name.as_deref().unwrap_or(&self.name));
        print_field("ID", &self.id, color);
        print_field("Name", &self.name, color);
        print_field("Type", or_dash(self.manager_type.as_deref()), color);
        print_field("Enabled", &format_bool(self.enabled, color), color);
        print_field("Grant Types", &self.available_grant_types.join(", "), color);
        print_field("Token Endpoint", or_dash(self.token_endpoint.as_deref()), color);
        print_field(
            "OAuth App Creation",
            &format_bool(self.enable_oauth_app_creation, color),
            color,
        );
        print_field(
            "Map Consumer Apps",
            &format_bool(self.enable_map_oauth_consumer_apps, color),
            color,
        );
        println!();
    }
}
