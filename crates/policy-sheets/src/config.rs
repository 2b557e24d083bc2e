//! Report configuration

use serde::Deserialize;

use crate::error::ReportResult;
use crate::render::{ReportRenderer, ReportStyle};
use crate::schema::{Column, ColumnSchema, SchemaPreset};
use crate::table::{RecordErrorPolicy, TableBuilder};

/// Everything that shapes one report
///
/// Every field has a default, so a config file only needs the settings it
/// changes. The defaults reproduce the "Azure Policy Definitions" report.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    /// Download file stem; `.xlsx` is appended when missing
    pub report_name: String,
    pub sheet_name: String,
    /// Column preset, used when `columns` is not set
    pub schema: SchemaPreset,
    /// Explicit column list, overriding `schema`
    pub columns: Option<Vec<Column>>,
    /// Prepend a 1-based index column
    pub include_index: bool,
    pub on_invalid_record: RecordErrorPolicy,
    pub style: ReportStyle,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            report_name: "Azure_Policy_Definitions".to_string(),
            sheet_name: "Policy_Definitions".to_string(),
            schema: SchemaPreset::default(),
            columns: None,
            include_index: true,
            on_invalid_record: RecordErrorPolicy::default(),
            style: ReportStyle::default(),
        }
    }
}

impl ReportConfig {
    /// Parse a JSON config document
    pub fn from_json_str(json: &str) -> ReportResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Download file name
    pub fn file_name(&self) -> String {
        if self.report_name.to_ascii_lowercase().ends_with(".xlsx") {
            self.report_name.clone()
        } else {
            format!("{}.xlsx", self.report_name)
        }
    }

    /// The column schema this config selects
    pub fn column_schema(&self) -> ColumnSchema {
        let schema = match &self.columns {
            Some(columns) => ColumnSchema::new(columns.iter().copied()),
            None => ColumnSchema::preset(self.schema),
        };
        schema.with_index(self.include_index)
    }

    pub fn table_builder(&self) -> TableBuilder {
        TableBuilder::new(self.column_schema()).on_invalid_record(self.on_invalid_record)
    }

    pub fn renderer(&self) -> ReportRenderer {
        ReportRenderer::new(self.style.clone())
            .sheet_name(self.sheet_name.clone())
            .file_name(self.file_name())
    }
}
