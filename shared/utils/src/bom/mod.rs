//! BOM (Bill of Materials) Flattening Module
//!
//! Converts the nested configuration tree of a configured product into the
//! flat, leveled rows of a BOM report, for one configuration or a batch.

pub mod batch;
pub mod classifier;
pub mod flatten;
pub mod writer;


pub use batch::{flatten_batch, flatten_document, parse_configuration, BatchEntry, BatchReport};
pub use classifier::{classify, has_bom_item_descendant, label_for_level};
pub use flatten::{flatten, flatten_children, format_price, format_prices, normalize_quantity};
pub use writer::BomWriter;
