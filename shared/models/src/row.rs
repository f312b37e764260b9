//! Output rows of a flattened BOM report.
//!
//! A report is an ordered `Vec` of rows; the hierarchy is recoverable from row
//! order plus the `Level`/`Parent` columns alone.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Column order of a single-configuration report.
pub const SINGLE_COLUMNS: [&str; 9] = [
    "Level",
    "Parent",
    "Project",
    "Component",
    "ItemType",
    "Aantal",
    "Unit",
    "ListPrice",
    "PurchasePrice",
];

/// Columns prepended to every row of a batch report.
pub const BATCH_PREFIX_COLUMNS: [&str; 2] = ["ProjectSegmentItemId", "ProjectSegmentItemName"];

/// Trailing column of a batch report, filled only on error rows.
pub const BATCH_ERROR_COLUMN: &str = "Error";

/// Classification of a `BOM_ITEM` row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemType {
    /// A sub-assembly at the given 1-based structural level.
    Bom(u32),
    /// A terminal purchasable part.
    Component,
}

impl ItemType {
    pub fn label(&self) -> String {
        match self {
            Self::Bom(level) => label_for_level(*level),
            Self::Component => "Component".to_string(),
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl Serialize for ItemType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.label())
    }
}

/// Label of a sub-assembly row at `level`: `BOM`, `SUB_BOM`, `SUB_SUB_BOM`, ...
pub fn label_for_level(level: u32) -> String {
    match level {
        0 | 1 => "BOM".to_string(),
        2 => "SUB_BOM".to_string(),
        3 => "SUB_SUB_BOM".to_string(),
        n => format!("{}BOM", "SUB_".repeat((n - 2) as usize)),
    }
}

/// Largest magnitude below which every integral `f64` is exact as an `i64`.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Display form of the `Aantal` column.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Quantity {
    #[default]
    Empty,
    /// An integral float, printed without a fraction.
    Whole(f64),
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Whole(n) => write!(f, "{:.0}", n),
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl Serialize for Quantity {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Empty => serializer.serialize_str(""),
            Self::Whole(n) if n.abs() < MAX_SAFE_INTEGER => serializer.serialize_i64(*n as i64),
            Self::Whole(n) => serializer.serialize_f64(*n),
            Self::Number(n) => n.serialize(serializer),
            Self::Text(s) => serializer.serialize_str(s),
        }
    }
}

/// One row of a single-configuration report.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FlatRow {
    #[serde(rename = "Level")]
    pub level: u32,
    #[serde(rename = "Parent")]
    pub parent: String,
    #[serde(rename = "Project")]
    pub project: String,
    #[serde(rename = "Component")]
    pub component: String,
    #[serde(rename = "ItemType", serialize_with = "serialize_item_type")]
    pub item_type: Option<ItemType>,
    #[serde(rename = "Aantal")]
    pub quantity: Quantity,
    #[serde(rename = "Unit")]
    pub unit: String,
    #[serde(rename = "ListPrice")]
    pub list_price: String,
    #[serde(rename = "PurchasePrice")]
    pub purchase_price: String,
}

impl FlatRow {
    /// The synthetic level-0 row heading a report.
    pub fn project_root(project_display: impl Into<String>) -> Self {
        Self {
            project: project_display.into(),
            ..Self::default()
        }
    }

    pub fn is_root(&self) -> bool {
        self.level == 0
    }

    /// Cell values in `SINGLE_COLUMNS` order.
    pub fn cells(&self) -> Vec<String> {
        vec![
            self.level.to_string(),
            self.parent.clone(),
            self.project.clone(),
            self.component.clone(),
            self.item_type.map(|t| t.label()).unwrap_or_default(),
            self.quantity.to_string(),
            self.unit.clone(),
            self.list_price.clone(),
            self.purchase_price.clone(),
        ]
    }
}

fn serialize_item_type<S: serde::Serializer>(
    item_type: &Option<ItemType>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match item_type {
        Some(t) => t.serialize(serializer),
        None => serializer.serialize_str(""),
    }
}

/// External identity of one configuration inside a batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SegmentTag {
    #[serde(rename = "ProjectSegmentItemId")]
    pub id: String,
    #[serde(rename = "ProjectSegmentItemName")]
    pub name: String,
}

/// One row of a batch report.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BatchRow {
    Data {
        #[serde(flatten)]
        tag: SegmentTag,
        #[serde(flatten)]
        row: FlatRow,
    },
    Error {
        #[serde(flatten)]
        tag: SegmentTag,
        #[serde(rename = "Error")]
        reason: String,
    },
}

impl BatchRow {
    pub fn tag(&self) -> &SegmentTag {
        match self {
            Self::Data { tag, .. } | Self::Error { tag, .. } => tag,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    /// Cell values in prefix + `SINGLE_COLUMNS` + error column order.
    pub fn cells(&self) -> Vec<String> {
        let tag = self.tag();
        let mut cells = vec![tag.id.clone(), tag.name.clone()];
        match self {
            Self::Data { row, .. } => {
                cells.extend(row.cells());
                cells.push(String::new());
            }
            Self::Error { reason, .. } => {
                cells.extend(std::iter::repeat(String::new()).take(SINGLE_COLUMNS.len()));
                cells.push(reason.clone());
            }
        }
        cells
    }
}

pub fn batch_columns() -> Vec<&'static str> {
    BATCH_PREFIX_COLUMNS
        .iter()
        .chain(SINGLE_COLUMNS.iter())
        .copied()
        .chain(std::iter::once(BATCH_ERROR_COLUMN))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_labels() {
        assert_eq!(label_for_level(1), "BOM");
        assert_eq!(label_for_level(2), "SUB_BOM");
        assert_eq!(label_for_level(3), "SUB_SUB_BOM");
        assert_eq!(label_for_level(4), "SUB_SUB_BOM");
        assert_eq!(label_for_level(5), "SUB_SUB_SUB_BOM");
        assert_eq!(label_for_level(6), "SUB_SUB_SUB_SUB_BOM");
    }

    #[test]
    fn test_quantity_display() {
        assert_eq!(Quantity::Whole(3.0).to_string(), "3");
        assert_eq!(Quantity::Whole(1e20).to_string(), "100000000000000000000");
        assert_eq!(
            Quantity::Number(serde_json::Number::from_f64(3.5).unwrap()).to_string(),
            "3.5"
        );
        assert_eq!(Quantity::Empty.to_string(), "");
    }

    #[test]
    fn test_root_row_cells() {
        let row = FlatRow::project_root("P1");
        assert_eq!(row.cells(), vec!["0", "", "P1", "", "", "", "", "", ""]);
    }

    #[test]
    fn test_batch_error_row_cells() {
        let row = BatchRow::Error {
            tag: SegmentTag { id: "SI-2".into(), name: String::new() },
            reason: "not found".into(),
        };
        let cells = row.cells();
        assert_eq!(cells.len(), batch_columns().len());
        assert_eq!(cells[0], "SI-2");
        assert_eq!(cells.last().map(String::as_str), Some("not found"));
    }

    #[test]
    fn test_row_json_uses_column_names() {
        let row = FlatRow {
            level: 2,
            parent: "C1".into(),
            component: "C2".into(),
            item_type: Some(ItemType::Component),
            quantity: Quantity::Whole(2.0),
            unit: "PCS".into(),
            list_price: "0,00".into(),
            purchase_price: "0,00".into(),
            ..FlatRow::default()
        };
        let value = serde_json::to_value(&row).unwrap();
        assert_eq!(value["ItemType"], "Component");
        assert_eq!(value["Aantal"], 2);
        assert_eq!(value["Parent"], "C1");
    }
}
