//! Counting of PNG variations per letter and digit directory.

mod table;

pub use table::{DEFAULT_BASE_DIR, DEFAULT_TABLE_NAME, ScanError, VariationTable, variation_keys};
