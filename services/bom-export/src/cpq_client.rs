//! CPQ API Client
//!
//! Client-credentials token plus the two read endpoints a BOM export needs.

use async_trait::async_trait;
use cpq_models::ProjectSegmentItem;
use cpq_utils::{log_debug, ConsoleError, ConsoleResult, CpqConfig};
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::source::{AccessToken, ConfigurationSource};

pub struct CpqClient {
    client: Client,
    config: CpqConfig,
}

#[derive(Serialize)]
struct TokenRequest<'a> {
    grant_type: &'static str,
    client_name: &'a str,
    client_id: &'a str,
    client_secret: &'a str,
    audience: &'a str,
    domain: &'a str,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

impl CpqClient {
    pub fn new(config: CpqConfig) -> ConsoleResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self { client, config })
    }

    /// Manufacturer-scoped endpoint URL. Every segment is percent-encoded as a
    /// single path segment, so ids cannot escape their resource.
    fn manufacturer_url(&self, resource: &str, id: &str) -> ConsoleResult<Url> {
        if matches!(id, "" | "." | "..") {
            return Err(ConsoleError::validation("id", format!("'{}' is not a valid {} id", id, resource)));
        }

        let mut url = Url::parse(&self.config.api_base_url)
            .map_err(|e| ConsoleError::configuration(format!("invalid cpq.api_base_url: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| ConsoleError::configuration("cpq.api_base_url cannot carry a path"))?
            .pop_if_empty()
            .extend(["manufacturers", self.config.manufacturer_id.as_str(), resource, id]);

        Ok(url)
    }
}

#[async_trait]
impl ConfigurationSource for CpqClient {
    async fn authorize(&self) -> ConsoleResult<AccessToken> {
        if !self.config.has_credentials() {
            return Err(ConsoleError::configuration(
                "cpq.manufacturer_id, cpq.client_id and cpq.client_secret must be set",
            ));
        }

        let payload = TokenRequest {
            grant_type: "client_credentials",
            client_name: &self.config.client_name,
            client_id: &self.config.client_id,
            client_secret: &self.config.client_secret,
            audience: &self.config.audience,
            domain: &self.config.auth_domain,
        };

        let response = self
            .client
            .post(&self.config.token_url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| ConsoleError::authentication(format!("token request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ConsoleError::authentication(format!("token endpoint returned {}: {}", status, body)));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| ConsoleError::authentication(format!("unreadable token response: {}", e)))?;

        log_debug!("Obtained CPQ access token");
        Ok(AccessToken::new(token.access_token))
    }

    async fn segment_item(&self, token: &AccessToken, segment_item_id: &str) -> ConsoleResult<ProjectSegmentItem> {
        let url = self.manufacturer_url("projectSegmentItems", segment_item_id)?;
        log_debug!("Fetching project segment item from {}", url);

        let item = self
            .client
            .get(url)
            .bearer_auth(token.as_str())
            .send()
            .await?
            .error_for_status()?
            .json::<ProjectSegmentItem>()
            .await?;

        Ok(item)
    }

    async fn configuration(&self, token: &AccessToken, configuration_id: &str) -> ConsoleResult<serde_json::Value> {
        let url = self.manufacturer_url("configurations", configuration_id)?;
        log_debug!("Fetching configuration BOM from {}", url);

        let document = self
            .client
            .get(url)
            .query(&[("outputMode", "BOM_ONLY"), ("language", self.config.language.as_str())])
            .bearer_auth(token.as_str())
            .send()
            .await?
            .error_for_status()?
            .json::<serde_json::Value>()
            .await?;

        Ok(document)
    }
}
