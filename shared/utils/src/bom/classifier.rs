//! BOM Tree Classifier
//!
//! Decides whether a `BOM_ITEM` is a structural sub-assembly or a terminal component.

use cpq_models::{ConfigurationNode, ItemType};

pub use cpq_models::label_for_level;

/// True iff any node strictly below `node` is a `BOM_ITEM`, at any depth.
pub fn has_bom_item_descendant(node: &ConfigurationNode) -> bool {
    node.nodes
        .iter()
        .any(|child| child.is_bom_item() || has_bom_item_descendant(child))
}

/// Row category of a `BOM_ITEM` found at the given 1-based structural level.
///
/// Leaves are always `Component`, even at level 1.
pub fn classify(node: &ConfigurationNode, level: u32) -> ItemType {
    if has_bom_item_descendant(node) {
        ItemType::Bom(level)
    } else {
        ItemType::Component
    }
}
