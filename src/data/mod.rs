//! Dataset loading and feature extraction
//!
//! polars handles the CSV/column boundary; everything past
//! [`ClassificationTable::extract`] works in ndarray matrices.

mod loader;
mod table;

pub use loader::DataLoader;
pub use table::ClassificationTable;
