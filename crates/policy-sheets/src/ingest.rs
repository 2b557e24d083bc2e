//! Upload decoding

use serde_json::Value;

use crate::error::{ReportError, ReportResult};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Decode an upload into its top-level array elements
///
/// Only a JSON array is accepted. Elements are not inspected here; the
/// table builder decides what to do with elements that are not objects.
pub fn parse_records(payload: &[u8]) -> ReportResult<Vec<Value>> {
    let payload = payload.strip_prefix(UTF8_BOM).unwrap_or(payload);

    let value: Value = serde_json::from_slice(payload)
        .map_err(|e| ReportError::MalformedInput(format!("not valid JSON ({})", e)))?;

    match value {
        Value::Array(items) => {
            tracing::debug!(records = items.len(), "decoded upload");
            Ok(items)
        }
        Value::Object(_) => Err(ReportError::MalformedInput(
            "expected a JSON array of policy definitions, found an object".into(),
        )),
        other => Err(ReportError::MalformedInput(format!(
            "expected a JSON array of policy definitions, found {}",
            match other {
                Value::Null => "null",
                Value::Bool(_) => "a boolean",
                Value::Number(_) => "a number",
                _ => "a string",
            }
        ))),
    }
}
