//! # policy-sheets
//!
//! Turns an exported collection of cloud policy definitions (JSON) into a
//! flat report table and a styled, single-sheet XLSX document.
//!
//! Pipeline: [`parse_records`] → [`TableBuilder`] → [`ReportRenderer`].
//! [`convert`] runs all three with a [`ReportConfig`]; [`from_records`] runs
//! the last two on records parsed elsewhere.
//!
//! ## Example
//!
//! ```rust
//! use policy_sheets::{convert, Column, ReportConfig};
//!
//! let upload = br#"[
//!     {"id": "/providers/Microsoft.Authorization/policyDefinitions/abc-123",
//!      "displayName": "Allowed locations",
//!      "policyRule": {"then": {"effect": "deny"}},
//!      "versions": ["1.0.0", "1.1.0"]}
//! ]"#;
//!
//! let report = convert(upload, &ReportConfig::default()).unwrap();
//! let row = &report.table.rows()[0];
//!
//! assert_eq!(row.get(Column::PolicyId), Some("abc-123"));
//! assert_eq!(row.get(Column::Versions), Some("1.0.0, 1.1.0"));
//! assert_eq!(report.artifact.file_name(), "Azure_Policy_Definitions.xlsx");
//! ```

pub mod config;
pub mod error;
pub mod flatten;
pub mod ingest;
pub mod lookup;
pub mod record;
pub mod region;
pub mod render;
pub mod schema;
pub mod table;

pub use config::ReportConfig;
pub use error::{ReportError, ReportResult};
pub use flatten::{flatten, FlatRow};
pub use ingest::parse_records;
pub use lookup::Lookup;
pub use record::{PolicyRecord, RecordFields};
pub use region::format_location;
pub use render::{ColumnWidth, ReportRenderer, ReportStyle, SpreadsheetArtifact};
pub use schema::{Column, ColumnSchema, SchemaPreset};
pub use table::{RecordErrorPolicy, ReportTable, TableBuilder};

pub use policy_sheets_xlsx::XLSX_MIME_TYPE;

/// The outputs of one conversion
#[derive(Debug, Clone)]
pub struct Report {
    /// Table shown in previews
    pub table: ReportTable,
    /// Downloadable document
    pub artifact: SpreadsheetArtifact,
}

/// Parse, flatten and render one upload
pub fn convert(payload: &[u8], config: &ReportConfig) -> ReportResult<Report> {
    let records = parse_records(payload)?;
    from_records(&records, config)
}

/// Flatten and render records that were already parsed
pub fn from_records(records: &[serde_json::Value], config: &ReportConfig) -> ReportResult<Report> {
    let table = config.table_builder().build(records)?;
    let artifact = config.renderer().render(&table)?;

    tracing::info!(
        rows = table.len(),
        skipped = table.skipped().len(),
        bytes = artifact.len(),
        file = artifact.file_name(),
        "converted policy definitions"
    );

    Ok(Report { table, artifact })
}
