//! Configuration Source
//!
//! The fetch side of an export: authorizes once per export operation, resolves
//! segment items, and downloads configuration documents.

use async_trait::async_trait;
use cpq_models::ProjectSegmentItem;
use cpq_utils::ConsoleResult;
use std::fmt;

/// Bearer token for one export operation.
#[derive(Clone)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

#[async_trait]
pub trait ConfigurationSource: Send + Sync {
    async fn authorize(&self) -> ConsoleResult<AccessToken>;

    async fn segment_item(&self, token: &AccessToken, segment_item_id: &str) -> ConsoleResult<ProjectSegmentItem>;

    /// Raw BOM-only configuration document.
    async fn configuration(&self, token: &AccessToken, configuration_id: &str) -> ConsoleResult<serde_json::Value>;
}
