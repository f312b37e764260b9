//! # CPQ Console Domain Models
//!
//! Data shapes shared by the BOM engine and the export service.
//!
//! ## Key Models
//!
//! - **ConfigurationTree / ConfigurationNode**: the nested product-structure document
//!   returned by the CPQ platform for one configured product
//! - **ProjectSegmentItem**: the upstream handle that links a project line to its configuration
//! - **FlatRow**: one leveled row of a flattened BOM report
//! - **BatchRow**: a `FlatRow` tagged with its segment item, or an inline error row
//!
//! Upstream documents are deserialized permissively: absent or `null` fields
//! take their defaults instead of failing the whole document.

pub mod configuration;
pub mod row;
pub mod segment;

pub use configuration::*;
pub use row::*;
pub use segment::*;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nested_tree_deserialization() {
        let tree: ConfigurationTree = serde_json::from_value(json!({
            "configuredProduct": { "code": "P1" },
            "nodes": [{
                "type": "GROUP",
                "nodes": [{
                    "type": "BOM_ITEM",
                    "componentCode": "C1",
                    "nodes": [{ "type": "BOM_ITEM", "componentCode": "C2", "quantity": 2.0, "unit": "PCS" }]
                }]
            }]
        }))
        .unwrap();

        let group = &tree.nodes[0];
        assert!(!group.is_bom_item());
        let c1 = &group.nodes[0];
        assert_eq!(c1.component_code, "C1");
        assert_eq!(c1.nodes[0].unit, "PCS");
    }

    #[test]
    fn test_fixture_builders() {
        let node = ConfigurationNode::bom_item("C1")
            .with_children(vec![ConfigurationNode::bom_item("C2").with_quantity(1.5, "M")]);
        assert!(node.is_bom_item());
        assert_eq!(node.nodes[0].unit, "M");
    }
}
