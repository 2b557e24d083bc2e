//! Package-level tests for policy-sheets-xlsx.
//!
//! Each test builds a workbook in memory, writes it with `XlsxWriter`, then
//! opens the resulting ZIP and inspects the XML parts directly.

mod determinism;

pub use common::*;
