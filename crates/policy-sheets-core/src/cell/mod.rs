//! Cell-related types
//!
//! - [`CellValue`] - The value stored in a cell
//! - [`CellAddress`] - A cell's location (e.g., "A1")
//! - [`CellRange`] - A range of cells (e.g., "A1:H1")
//! - [`CellData`] - Value plus style index

mod address;
mod storage;
mod value;

pub use address::{CellAddress, CellRange};
pub use storage::{CellData, CellStorage, RowCells, DEFAULT_COLUMN_WIDTH};
pub use value::{CellValue, SharedString};
