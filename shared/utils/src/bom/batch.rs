//! Multi-configuration BOM reports.
//!
//! Each configuration contributes its own tagged row block, in request order.
//! A configuration that could not be fetched or parsed contributes a single
//! error row and the batch carries on.

use cpq_models::{BatchRow, ConfigurationTree, FlatRow, SegmentTag};
use serde::Serialize;
use tracing::debug;

use super::flatten::flatten;
use crate::error::{ConsoleError, ConsoleResult};

/// One configuration of a batch as delivered by the fetch step.
#[derive(Debug)]
pub struct BatchEntry {
    pub tag: SegmentTag,
    pub document: ConsoleResult<serde_json::Value>,
}

impl BatchEntry {
    pub fn fetched(tag: SegmentTag, document: serde_json::Value) -> Self {
        Self { tag, document: Ok(document) }
    }

    pub fn failed(tag: SegmentTag, error: ConsoleError) -> Self {
        Self { tag, document: Err(error) }
    }
}

/// Assembled batch rows plus per-configuration outcome counts.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    pub rows: Vec<BatchRow>,
    pub succeeded: usize,
    pub failed: usize,
}

impl BatchReport {
    pub fn configurations(&self) -> usize {
        self.succeeded + self.failed
    }

    pub fn all_failed(&self) -> bool {
        self.succeeded == 0 && self.failed > 0
    }
}

/// Parses an upstream configuration document into a tree with a project code.
pub fn parse_configuration(document: serde_json::Value) -> ConsoleResult<ConfigurationTree> {
    if !document.is_object() {
        return Err(ConsoleError::malformed_document("configuration document is not a JSON object"));
    }
    let tree: ConfigurationTree = serde_json::from_value(document)?;
    if tree.project_code().is_none() {
        return Err(ConsoleError::malformed_document("configuredProduct.code is missing"));
    }
    Ok(tree)
}

/// Parses and flattens one configuration document.
pub fn flatten_document(document: serde_json::Value) -> ConsoleResult<Vec<FlatRow>> {
    let tree = parse_configuration(document)?;
    let project_code = tree.project_code().unwrap_or_default().to_string();
    Ok(flatten(&tree, &project_code))
}

/// Concatenates the tagged row blocks of every entry, in entry order.
pub fn flatten_batch(entries: Vec<BatchEntry>) -> BatchReport {
    let mut report = BatchReport::default();

    for entry in entries {
        match entry.document.and_then(flatten_document) {
            Ok(rows) => {
                debug!(segment_item_id = %entry.tag.id, rows = rows.len(), "Flattened configuration");
                report.succeeded += 1;
                report.rows.extend(rows.into_iter().map(|row| BatchRow::Data {
                    tag: entry.tag.clone(),
                    row,
                }));
            }
            Err(error) => {
                crate::log_warn!("Configuration of segment item {} skipped: {}", entry.tag.id, error);
                report.failed += 1;
                report.rows.push(BatchRow::Error {
                    tag: entry.tag,
                    reason: error.to_string(),
                });
            }
        }
    }

    report
}
