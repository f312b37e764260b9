//! BOM Flattening Traversal
//!
//! Walks a configuration tree depth-first and produces the leveled rows of a BOM
//! report. Wrapper nodes are transparent: they never emit a row and do not
//! advance the level or change the parent.

use cpq_models::{ConfigurationNode, ConfigurationTree, FlatRow, Price, Quantity, RawQuantity};

use super::classifier::classify;

/// Flattens `tree` into report rows headed by the synthetic level-0 row.
///
/// Rows come out in pre-order: every `BOM_ITEM` row is immediately followed by
/// the rows of its own subtree, in the tree's child order.
pub fn flatten(tree: &ConfigurationTree, project_code: &str) -> Vec<FlatRow> {
    let mut rows = vec![FlatRow::project_root(tree.project_display(project_code))];
    for node in &tree.nodes {
        rows.extend(flatten_children(node, project_code, 1));
    }
    rows
}

/// Rows for the children of `node`, each `BOM_ITEM` child placed at `level`
/// under `parent`.
pub fn flatten_children(node: &ConfigurationNode, parent: &str, level: u32) -> Vec<FlatRow> {
    node.nodes
        .iter()
        .flat_map(|child| {
            if child.is_bom_item() {
                let mut rows = vec![bom_item_row(child, parent, level)];
                rows.extend(flatten_children(child, &child.component_code, level + 1));
                rows
            } else {
                flatten_children(child, parent, level)
            }
        })
        .collect()
}

fn bom_item_row(node: &ConfigurationNode, parent: &str, level: u32) -> FlatRow {
    let (list_price, purchase_price) = format_prices(node.price.as_ref());
    FlatRow {
        level,
        parent: parent.to_string(),
        project: String::new(),
        component: node.component_code.clone(),
        item_type: Some(classify(node, level)),
        quantity: normalize_quantity(node.quantity.as_ref()),
        unit: node.unit.clone(),
        list_price,
        purchase_price,
    }
}

/// Display form of an upstream quantity: whole floats lose their `.0`,
/// everything else passes through, absent becomes empty.
pub fn normalize_quantity(quantity: Option<&RawQuantity>) -> Quantity {
    match quantity {
        None => Quantity::Empty,
        Some(RawQuantity::Text(text)) => Quantity::Text(text.clone()),
        Some(RawQuantity::Number(number)) => match number.as_f64() {
            Some(value) if number.is_f64() && value.fract() == 0.0 => Quantity::Whole(value),
            _ => Quantity::Number(number.clone()),
        },
    }
}

/// Formats a price as decimal-comma text with two fraction digits.
///
/// The result is display text for spreadsheet readers, not a computable amount.
pub fn format_price(value: Option<f64>) -> String {
    format!("{:.2}", value.unwrap_or(0.0)).replace('.', ",")
}

/// Both formatted prices of a node, defaulting a missing price block to zero.
pub fn format_prices(price: Option<&Price>) -> (String, String) {
    let price = price.cloned().unwrap_or_default();
    (format_price(price.list_price), format_price(price.purchase_price))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cpq_models::ItemType;
    use serde_json::json;

    fn tree(value: serde_json::Value) -> ConfigurationTree {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(None), "0,00");
        assert_eq!(format_price(Some(12.5)), "12,50");
        assert_eq!(format_price(Some(0.0)), "0,00");
        assert_eq!(format_price(Some(1234.567)), "1234,57");
        assert_eq!(format_price(Some(7.0)), "7,00");
    }

    #[test]
    fn test_format_prices_defaults_missing_block() {
        assert_eq!(format_prices(None), ("0,00".to_string(), "0,00".to_string()));
        let price = Price { list_price: Some(3.1), purchase_price: None };
        assert_eq!(format_prices(Some(&price)), ("3,10".to_string(), "0,00".to_string()));
    }

    #[test]
    fn test_normalize_quantity() {
        let whole = RawQuantity::Number(serde_json::Number::from_f64(3.0).unwrap());
        let fractional = RawQuantity::Number(serde_json::Number::from_f64(3.5).unwrap());
        let integer = RawQuantity::Number(serde_json::Number::from(4));

        assert_eq!(normalize_quantity(Some(&whole)).to_string(), "3");
        assert_eq!(normalize_quantity(Some(&whole)), Quantity::Whole(3.0));
        assert_eq!(normalize_quantity(Some(&fractional)).to_string(), "3.5");
        assert_eq!(normalize_quantity(Some(&integer)).to_string(), "4");
        assert_eq!(normalize_quantity(None), Quantity::Empty);
        assert_eq!(normalize_quantity(None).to_string(), "");
    }

    #[test]
    fn test_normalize_quantity_keeps_every_digit_of_large_whole_floats() {
        let huge = RawQuantity::Number(serde_json::Number::from_f64(1e20).unwrap());
        let beyond_i64 = RawQuantity::Number(serde_json::Number::from_f64(9.3e18).unwrap());

        assert_eq!(normalize_quantity(Some(&huge)).to_string(), "100000000000000000000");
        assert_eq!(normalize_quantity(Some(&beyond_i64)).to_string(), "9300000000000000000");
    }

    #[test]
    fn test_group_wrapped_assembly_scenario() {
        let tree = tree(json!({
            "nodes": [{
                "type": "GROUP",
                "nodes": [{
                    "type": "BOM_ITEM",
                    "componentCode": "C1",
                    "nodes": [{ "type": "BOM_ITEM", "componentCode": "C2", "quantity": 2.0, "unit": "PCS" }]
                }]
            }]
        }));

        let rows = flatten(&tree, "P1");
        assert_eq!(rows.len(), 3);

        assert_eq!(rows[0], FlatRow::project_root("P1"));

        assert_eq!(rows[1].level, 1);
        assert_eq!(rows[1].parent, "P1");
        assert_eq!(rows[1].component, "C1");
        assert_eq!(rows[1].item_type, Some(ItemType::Bom(1)));
        assert_eq!(rows[1].project, "");

        assert_eq!(rows[2].level, 2);
        assert_eq!(rows[2].parent, "C1");
        assert_eq!(rows[2].component, "C2");
        assert_eq!(rows[2].item_type, Some(ItemType::Component));
        assert_eq!(rows[2].quantity.to_string(), "2");
        assert_eq!(rows[2].unit, "PCS");
        assert_eq!(rows[2].list_price, "0,00");
        assert_eq!(rows[2].purchase_price, "0,00");
    }

    #[test]
    fn test_root_row_shows_configuration_code() {
        let tree = tree(json!({
            "configuredProduct": { "code": "P1" },
            "configurationCode": "K-17",
            "nodes": []
        }));
        let rows = flatten(&tree, "P1");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].project, "P1 : K-17");
        assert_eq!(rows[0].parent, "");
        assert_eq!(rows[0].list_price, "");
    }

    #[test]
    fn test_wrappers_do_not_advance_level_or_parent() {
        let tree = tree(json!({
            "nodes": [{
                "type": "ROOT",
                "nodes": [{
                    "type": "BOM_ITEM",
                    "componentCode": "A",
                    "nodes": [{
                        "type": "SECTION",
                        "nodes": [{ "type": "OPTION", "nodes": [{ "type": "BOM_ITEM", "componentCode": "B" }] }]
                    }]
                }]
            }]
        }));

        let rows = flatten(&tree, "P");
        let b = &rows[2];
        assert_eq!(b.component, "B");
        assert_eq!(b.level, 2);
        assert_eq!(b.parent, "A");
        assert_eq!(rows[1].item_type.map(|t| t.label()), Some("BOM".to_string()));
    }

    #[test]
    fn test_preorder_sibling_order() {
        let tree = tree(json!({
            "nodes": [{
                "type": "ROOT",
                "nodes": [
                    { "type": "BOM_ITEM", "componentCode": "A", "nodes": [
                        { "type": "BOM_ITEM", "componentCode": "A1" },
                        { "type": "BOM_ITEM", "componentCode": "A2" }
                    ]},
                    { "type": "BOM_ITEM", "componentCode": "B" }
                ]
            }]
        }));

        let rows = flatten(&tree, "P");
        let order: Vec<&str> = rows
            .iter()
            .skip(1)
            .map(|r| r.component.as_str())
            .collect();
        assert_eq!(order, vec!["A", "A1", "A2", "B"]);
    }

    #[test]
    fn test_missing_fields_are_permissive() {
        let tree = tree(json!({
            "nodes": [{ "type": "ROOT", "nodes": [{ "type": "BOM_ITEM", "price": null }] }]
        }));
        let rows = flatten(&tree, "P");
        let row = &rows[1];
        assert_eq!(row.component, "");
        assert_eq!(row.unit, "");
        assert_eq!(row.quantity, Quantity::Empty);
        assert_eq!(row.list_price, "0,00");
        assert_eq!(row.purchase_price, "0,00");
    }

    #[test]
    fn test_deep_structure_labels() {
        let mut node = ConfigurationNode::bom_item("L5");
        for code in ["L4", "L3", "L2", "L1"] {
            node = ConfigurationNode::bom_item(code).with_children(vec![node]);
        }
        let tree = ConfigurationTree {
            nodes: vec![ConfigurationNode::wrapper(vec![node])],
            ..ConfigurationTree::default()
        };

        let labels: Vec<String> = flatten(&tree, "P")
            .iter()
            .skip(1)
            .map(|r| r.item_type.map(|t| t.label()).unwrap_or_default())
            .collect();
        assert_eq!(labels, vec!["BOM", "SUB_BOM", "SUB_SUB_BOM", "SUB_SUB_BOM", "Component"]);
    }
}
