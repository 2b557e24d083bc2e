//! # policy-sheets-core
//!
//! In-memory worksheet model used to lay out policy reports before they are
//! serialized to XLSX.
//!
//! - [`CellValue`] - Text and numeric cell contents
//! - [`CellAddress`] and [`CellRange`] - A1 addressing and merge ranges
//! - [`Style`] - Cell formatting
//! - [`Workbook`], [`Worksheet`] - The document structures
//!
//! ## Example
//!
//! ```rust
//! use policy_sheets_core::{CellValue, Style, Workbook};
//!
//! let mut workbook = Workbook::with_sheet("Policy_Definitions").unwrap();
//! let sheet = workbook.worksheet_mut(0).unwrap();
//!
//! sheet.set_cell_value_at(0, 0, "Index").unwrap();
//! sheet.set_cell_style_at(0, 0, &Style::new().bold(true)).unwrap();
//! sheet.set_cell_value_at(1, 0, CellValue::Number(1.0)).unwrap();
//! sheet.set_column_width(0, 9.0);
//! ```

pub mod cell;
pub mod error;
pub mod style;
pub mod workbook;
pub mod worksheet;

pub use cell::{CellAddress, CellData, CellRange, CellValue};
pub use error::{Error, Result};
pub use workbook::Workbook;
pub use worksheet::Worksheet;

pub use style::{BorderStyle, Color, FontStyle, HorizontalAlignment, Style, StylePool};

/// Maximum number of rows in a worksheet (Excel limit)
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a worksheet (Excel limit)
pub const MAX_COLS: u16 = 16_384;

/// Maximum length of a sheet name
pub const MAX_SHEET_NAME_LEN: usize = 31;

/// Maximum column width, in characters
pub const MAX_COLUMN_WIDTH: f64 = 255.0;

/// Maximum length of a cell's text, in UTF-16 code units (Excel limit)
pub const MAX_CELL_TEXT_LEN: usize = 32_767;
