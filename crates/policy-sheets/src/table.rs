//! Table builder: flattened records → ordered report table

use serde::Deserialize;
use serde_json::Value;

use crate::error::{ReportError, ReportResult};
use crate::flatten::{flatten, FlatRow};
use crate::record::PolicyRecord;
use crate::schema::{Column, ColumnSchema};

/// What to do with an element that is not a JSON object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordErrorPolicy {
    /// Fail the whole batch, naming the first bad element
    #[default]
    Abort,
    /// Drop the element, log a warning and count it on the table
    Skip,
}

/// Ordered rows under a fixed column set
#[derive(Debug, Clone, PartialEq)]
pub struct ReportTable {
    columns: Vec<Column>,
    rows: Vec<FlatRow>,
    skipped: Vec<usize>,
}

impl ReportTable {
    /// Columns in display order
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Header texts in display order
    pub fn headers(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.columns.iter().map(Column::header)
    }

    /// Rows in input order
    pub fn rows(&self) -> &[FlatRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 0-based input positions of elements dropped under [`RecordErrorPolicy::Skip`]
    pub fn skipped(&self) -> &[usize] {
        &self.skipped
    }
}

/// Builds a [`ReportTable`] from parsed upload elements
#[derive(Debug, Clone, Default)]
pub struct TableBuilder {
    schema: ColumnSchema,
    on_invalid_record: RecordErrorPolicy,
}

impl TableBuilder {
    /// Create a builder for a fixed schema
    pub fn new(schema: ColumnSchema) -> Self {
        Self {
            schema,
            on_invalid_record: RecordErrorPolicy::default(),
        }
    }

    /// Set the policy for elements that are not objects
    pub fn on_invalid_record(mut self, policy: RecordErrorPolicy) -> Self {
        self.on_invalid_record = policy;
        self
    }

    pub fn schema(&self) -> &ColumnSchema {
        &self.schema
    }

    /// Flatten every element, in input order
    pub fn build(&self, records: &[Value]) -> ReportResult<ReportTable> {
        let data_columns = self.schema.data_columns();
        let mut rows = Vec::with_capacity(records.len());
        let mut skipped = Vec::new();

        for (index, value) in records.iter().enumerate() {
            let Some(record) = PolicyRecord::detect(value) else {
                let found = json_type_name(value);
                match self.on_invalid_record {
                    RecordErrorPolicy::Abort => {
                        return Err(ReportError::InvalidRecord { index, found });
                    }
                    RecordErrorPolicy::Skip => {
                        tracing::warn!(index, found, "skipping record that is not an object");
                        skipped.push(index);
                        continue;
                    }
                }
            };

            tracing::trace!(index, shape = record.shape(), "flattening record");
            let mut row = flatten(&record, data_columns);
            if self.schema.includes_index() {
                row.prepend_index(rows.len() + 1);
            }
            rows.push(row);
        }

        tracing::debug!(
            rows = rows.len(),
            skipped = skipped.len(),
            columns = self.schema.len(),
            "built report table"
        );

        Ok(ReportTable {
            columns: self.schema.columns(),
            rows,
            skipped,
        })
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
