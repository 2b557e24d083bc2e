//! # policy-sheets-xlsx
//!
//! XLSX (Office Open XML) writer for policy-sheets.
//!
//! Packages are written deterministically: the same [`Workbook`] always
//! produces the same bytes, so reports can be compared and cached.
//!
//! [`Workbook`]: policy_sheets_core::Workbook

pub mod error;
pub mod writer;

mod styles;

pub use error::{XlsxError, XlsxResult};
pub use writer::XlsxWriter;

/// MIME type of an XLSX package
pub const XLSX_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
