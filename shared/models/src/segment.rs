//! Project segment items: the upstream handle an export request names.
//!
//! A segment item is one configured line of a project. Its `configuration.id`
//! points at the configuration tree that gets flattened.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::configuration::null_as_default;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSegmentItem {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub configuration: Option<ConfigurationRef>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ConfigurationRef {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
}

impl ProjectSegmentItem {
    pub fn configuration_id(&self) -> Option<&str> {
        self.configuration
            .as_ref()
            .map(|c| c.id.as_str())
            .filter(|id| !id.is_empty())
    }
}

/// Body of a multi-configuration export request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BatchExportRequest {
    #[validate(length(min = 1, max = 500, message = "Between 1 and 500 segment item ids are required"))]
    pub segment_item_ids: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_configuration_id() {
        let item: ProjectSegmentItem = serde_json::from_value(json!({
            "id": "SI-1",
            "name": "Kitchen left",
            "configuration": { "id": "CFG-1" }
        }))
        .unwrap();
        assert_eq!(item.configuration_id(), Some("CFG-1"));

        let unlinked: ProjectSegmentItem = serde_json::from_value(json!({ "id": "SI-2" })).unwrap();
        assert_eq!(unlinked.configuration_id(), None);
    }

    #[test]
    fn test_null_fields_take_defaults() {
        let item: ProjectSegmentItem = serde_json::from_value(json!({
            "id": "SI-3",
            "name": null,
            "configuration": { "id": null }
        }))
        .unwrap();
        assert_eq!(item.id, "SI-3");
        assert_eq!(item.name, "");
        assert_eq!(item.configuration_id(), None);
    }

    #[test]
    fn test_batch_request_validation() {
        let empty = BatchExportRequest { segment_item_ids: Vec::new() };
        assert!(empty.validate().is_err());

        let request: BatchExportRequest =
            serde_json::from_value(json!({ "segmentItemIds": ["SI-1", "SI-2"] })).unwrap();
        assert!(request.validate().is_ok());
    }
}
