//! Record flattener: one nested policy record → one flat row
//!
//! Flattening is total. Absent or oddly-typed fields become their display
//! default, so every requested column is present in every row.

use serde_json::Value;

use crate::lookup::Lookup;
use crate::record::{PolicyRecord, RecordFields};
use crate::region::format_location;
use crate::schema::Column;

/// Displayed when a rule has no `then.effect`
pub const NO_EFFECT: &str = "None";

/// Displayed for an absent rule block
const EMPTY_BLOCK: &str = "{}";

/// One table row: column → display string, in column order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatRow {
    cells: Vec<(Column, String)>,
}

impl FlatRow {
    /// Display string for a column, if the row has it
    pub fn get(&self, column: Column) -> Option<&str> {
        self.cells
            .iter()
            .find(|(c, _)| *c == column)
            .map(|(_, v)| v.as_str())
    }

    /// Columns of this row, in order
    pub fn columns(&self) -> impl Iterator<Item = Column> + '_ {
        self.cells.iter().map(|(c, _)| *c)
    }

    /// Display strings, in column order
    pub fn values(&self) -> impl Iterator<Item = &str> + '_ {
        self.cells.iter().map(|(_, v)| v.as_str())
    }

    /// Column and display string pairs, in order
    pub fn iter(&self) -> impl Iterator<Item = (Column, &str)> + '_ {
        self.cells.iter().map(|(c, v)| (*c, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub(crate) fn prepend_index(&mut self, position: usize) {
        self.cells.insert(0, (Column::Index, position.to_string()));
    }
}

/// Flatten one record into the requested columns
///
/// [`Column::Index`] depends on table position, not on the record, and is
/// left empty here.
pub fn flatten(record: &PolicyRecord<'_>, columns: &[Column]) -> FlatRow {
    let fields = record.fields();
    FlatRow {
        cells: columns
            .iter()
            .map(|&column| (column, column_value(&fields, column)))
            .collect(),
    }
}

fn column_value(fields: &RecordFields<'_>, column: Column) -> String {
    match column {
        Column::Index => String::new(),
        Column::Name => fields.name.text(),
        Column::PolicyId => extract_policy_id(&fields.id.text()),
        Column::Type => fields.resource_type.text(),
        Column::DisplayName => fields.display_name.text(),
        Column::Description => fields.description.text(),
        Column::Category => fields.category.text(),
        Column::PolicyType => fields.policy_type.text(),
        Column::Mode => fields.mode.text(),
        Column::Location => format_location(&fields.location.text()),
        Column::Condition => pretty_json(fields.condition),
        Column::Effect => effect_text(fields.effect),
        Column::Action => pretty_json(fields.action),
        Column::Parameters => format_parameters(fields.parameters),
        Column::Versions => join_versions(fields.versions),
    }
}

/// The rule's effect, or `None` when absent
///
/// An object or array effect (a parameter expression spelled out as JSON)
/// is written as compact JSON.
pub fn effect_text(effect: Lookup<'_>) -> String {
    match effect.value() {
        Some(value @ (Value::Object(_) | Value::Array(_))) => value.to_string(),
        _ => effect.text_or(NO_EFFECT),
    }
}

/// Final segment of a slash-delimited resource id
///
/// ```
/// use policy_sheets::flatten::extract_policy_id;
///
/// assert_eq!(
///     extract_policy_id("/subscriptions/x/providers/Microsoft.Authorization/policyDefinitions/abc-123"),
///     "abc-123"
/// );
/// assert_eq!(extract_policy_id(""), "");
/// ```
pub fn extract_policy_id(id: &str) -> String {
    id.rsplit('/').next().unwrap_or_default().to_string()
}

/// Join a version list with `", "`; absent or empty reads as `""`
pub fn join_versions(versions: Lookup<'_>) -> String {
    versions
        .array()
        .iter()
        .map(scalar_text)
        .collect::<Vec<_>>()
        .join(", ")
}

/// One `name: type - description` line per parameter
///
/// The description comes from `metadata.description`, falling back to a
/// top-level `description`.
pub fn format_parameters(parameters: Lookup<'_>) -> String {
    let Some(entries) = parameters.object() else {
        return String::new();
    };

    entries
        .iter()
        .map(|(name, definition)| {
            let definition = Lookup::new(definition);
            let kind = definition.get("type").text();
            let description = definition
                .path(&["metadata", "description"])
                .or(definition.get("description"))
                .text();
            format!("{}: {} - {}", name, kind, description)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Pretty-print a JSON block with 2-space indentation; absent reads as `{}`
pub fn pretty_json(block: Lookup<'_>) -> String {
    block
        .value()
        .and_then(|v| serde_json::to_string_pretty(v).ok())
        .unwrap_or_else(|| EMPTY_BLOCK.to_string())
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
