//! BOM Export Service
//!
//! Fetches configuration documents through a `ConfigurationSource` and turns
//! them into report rows. A single export fails as a whole; a batch export
//! fails as a whole only when authorization fails or no configuration could
//! be exported.

use cpq_models::{FlatRow, SegmentTag};
use cpq_utils::bom::{flatten_batch, flatten_document, BatchEntry, BatchReport};
use cpq_utils::{ConsoleError, ConsoleResult};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{info, instrument};

use crate::source::{AccessToken, ConfigurationSource};

/// Rows of one exported segment item.
#[derive(Debug, Clone)]
pub struct SingleExport {
    pub segment_item_id: String,
    pub segment_item_name: String,
    pub rows: Vec<FlatRow>,
}

pub struct ExportService {
    source: Arc<dyn ConfigurationSource>,
    fetch_limit: Arc<Semaphore>,
}

impl ExportService {
    pub fn new(source: Arc<dyn ConfigurationSource>, max_concurrent_fetches: usize) -> Self {
        Self {
            source,
            fetch_limit: Arc::new(Semaphore::new(max_concurrent_fetches.max(1))),
        }
    }

    #[instrument(skip(self))]
    pub async fn export_single(&self, segment_item_id: &str) -> ConsoleResult<SingleExport> {
        let token = self.source.authorize().await?;

        let item = self.source.segment_item(&token, segment_item_id).await?;
        let configuration_id = item.configuration_id().ok_or_else(|| {
            ConsoleError::not_found(format!("configuration of segment item {}", segment_item_id))
        })?;
        let document = self.source.configuration(&token, configuration_id).await?;
        let rows = flatten_document(document)?;

        info!(segment_item_id, rows = rows.len(), "Exported BOM");
        Ok(SingleExport {
            segment_item_id: segment_item_id.to_string(),
            segment_item_name: item.name,
            rows,
        })
    }

    /// Fetches every configuration concurrently and assembles the report in
    /// request order.
    #[instrument(skip(self, segment_item_ids), fields(count = segment_item_ids.len()))]
    pub async fn export_batch(&self, segment_item_ids: &[String]) -> ConsoleResult<BatchReport> {
        if segment_item_ids.is_empty() {
            return Err(ConsoleError::validation("segmentItemIds", "at least one segment item id is required"));
        }

        let token = self.source.authorize().await?;

        let handles: Vec<_> = segment_item_ids
            .iter()
            .map(|id| {
                let source = Arc::clone(&self.source);
                let limit = Arc::clone(&self.fetch_limit);
                let token = token.clone();
                let id = id.clone();
                tokio::spawn(async move {
                    let _permit = limit.acquire_owned().await;
                    fetch_entry(source.as_ref(), &token, id).await
                })
            })
            .collect();

        let mut entries = Vec::with_capacity(handles.len());
        for (handle, id) in handles.into_iter().zip(segment_item_ids) {
            let entry = handle.await.unwrap_or_else(|e| {
                BatchEntry::failed(
                    SegmentTag { id: id.clone(), name: String::new() },
                    ConsoleError::internal(format!("fetch task aborted: {}", e)),
                )
            });
            entries.push(entry);
        }

        let report = flatten_batch(entries);
        if report.all_failed() {
            return Err(ConsoleError::export(format!(
                "none of the {} requested configurations could be exported",
                report.configurations()
            )));
        }

        info!(
            rows = report.rows.len(),
            succeeded = report.succeeded,
            failed = report.failed,
            "Exported BOM batch"
        );
        Ok(report)
    }
}

async fn fetch_entry(source: &dyn ConfigurationSource, token: &AccessToken, segment_item_id: String) -> BatchEntry {
    let item = match source.segment_item(token, &segment_item_id).await {
        Ok(item) => item,
        Err(error) => {
            return BatchEntry::failed(SegmentTag { id: segment_item_id, name: String::new() }, error);
        }
    };

    let tag = SegmentTag { id: segment_item_id, name: item.name.clone() };
    let Some(configuration_id) = item.configuration_id() else {
        let error = ConsoleError::not_found(format!("configuration of segment item {}", tag.id));
        return BatchEntry::failed(tag, error);
    };

    match source.configuration(token, configuration_id).await {
        Ok(document) => BatchEntry::fetched(tag, document),
        Err(error) => BatchEntry::failed(tag, error),
    }
}
