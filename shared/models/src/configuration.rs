//! Configuration tree models for the CPQ console.
//!
//! These mirror the nested product-structure document the CPQ platform returns
//! for one configured product (`outputMode=BOM_ONLY`). Every field the platform
//! may omit has a serde default so that a sparse document still deserializes.

use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Root document of a configured product.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationTree {
    #[serde(default)]
    pub configured_product: Option<ConfiguredProduct>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub configuration_code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub nodes: Vec<ConfigurationNode>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConfiguredProduct {
    #[serde(default, deserialize_with = "null_as_default")]
    pub code: String,
}

/// Tag distinguishing material lines from grouping wrappers.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum NodeType {
    #[serde(rename = "BOM_ITEM")]
    BomItem,
    /// Any other tag the platform uses for structural grouping.
    #[default]
    #[serde(other)]
    Wrapper,
}

/// One node of the configuration tree.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationNode {
    #[serde(rename = "type", default)]
    pub node_type: NodeType,
    #[serde(default, deserialize_with = "null_as_default")]
    pub nodes: Vec<ConfigurationNode>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub component_code: String,
    #[serde(default)]
    pub quantity: Option<RawQuantity>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub unit: String,
    #[serde(default)]
    pub price: Option<Price>,
}

/// Quantity as sent upstream: normally a number, occasionally a string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RawQuantity {
    Number(Number),
    Text(String),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Price {
    #[serde(default)]
    pub list_price: Option<f64>,
    #[serde(default)]
    pub purchase_price: Option<f64>,
}

impl ConfigurationTree {
    /// Project code of the configured product, if the document carries one.
    pub fn project_code(&self) -> Option<&str> {
        self.configured_product
            .as_ref()
            .map(|p| p.code.as_str())
            .filter(|code| !code.is_empty())
    }

    /// Text shown in the `Project` column of the level-0 row.
    pub fn project_display(&self, project_code: &str) -> String {
        if self.configuration_code.is_empty() {
            project_code.to_string()
        } else {
            format!("{} : {}", project_code, self.configuration_code)
        }
    }
}

impl ConfigurationNode {
    pub fn is_bom_item(&self) -> bool {
        self.node_type == NodeType::BomItem
    }

    /// Shorthand used by fixtures and tests.
    pub fn bom_item(component_code: impl Into<String>) -> Self {
        Self {
            node_type: NodeType::BomItem,
            component_code: component_code.into(),
            ..Self::default()
        }
    }

    pub fn wrapper(nodes: Vec<ConfigurationNode>) -> Self {
        Self {
            node_type: NodeType::Wrapper,
            nodes,
            ..Self::default()
        }
    }

    pub fn with_children(mut self, nodes: Vec<ConfigurationNode>) -> Self {
        self.nodes = nodes;
        self
    }

    pub fn with_quantity(mut self, quantity: f64, unit: impl Into<String>) -> Self {
        self.quantity = Number::from_f64(quantity).map(RawQuantity::Number);
        self.unit = unit.into();
        self
    }
}

/// Reads an explicit `null` as the field's default.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sparse_node_deserializes_with_defaults() {
        let node: ConfigurationNode = serde_json::from_value(json!({ "type": "GROUP" })).unwrap();

        assert_eq!(node.node_type, NodeType::Wrapper);
        assert!(node.nodes.is_empty());
        assert_eq!(node.component_code, "");
        assert_eq!(node.quantity, None);
        assert_eq!(node.price, None);
    }

    #[test]
    fn test_missing_type_is_wrapper() {
        let node: ConfigurationNode = serde_json::from_value(json!({ "nodes": null })).unwrap();
        assert!(!node.is_bom_item());
    }

    #[test]
    fn test_bom_item_with_null_prices() {
        let node: ConfigurationNode = serde_json::from_value(json!({
            "type": "BOM_ITEM",
            "componentCode": "C1",
            "quantity": 2.0,
            "unit": "PCS",
            "price": { "listPrice": null, "purchasePrice": 4.25 }
        }))
        .unwrap();

        assert!(node.is_bom_item());
        let price = node.price.unwrap();
        assert_eq!(price.list_price, None);
        assert_eq!(price.purchase_price, Some(4.25));
    }

    #[test]
    fn test_project_display() {
        let tree: ConfigurationTree = serde_json::from_value(json!({
            "configuredProduct": { "code": "P1" },
            "configurationCode": "CFG-9",
            "nodes": []
        }))
        .unwrap();

        assert_eq!(tree.project_code(), Some("P1"));
        assert_eq!(tree.project_display("P1"), "P1 : CFG-9");

        let bare = ConfigurationTree::default();
        assert_eq!(bare.project_code(), None);
        assert_eq!(bare.project_display("P1"), "P1");
    }
}
