//! Report columns and schema presets

use std::fmt;

use serde::Deserialize;

/// A report column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    /// 1-based position in the table
    Index,
    /// Resource name (wrapped records)
    Name,
    /// Last segment of the definition id
    PolicyId,
    /// Resource type (wrapped records)
    Type,
    DisplayName,
    Description,
    Category,
    PolicyType,
    Mode,
    /// Region display name
    Location,
    /// `policyRule.if`, pretty-printed
    Condition,
    /// `policyRule.then.effect`
    Effect,
    /// `policyRule.then`, pretty-printed
    Action,
    /// One `name: type - description` line per parameter
    Parameters,
    Versions,
}

impl Column {
    /// Header text shown in the preview and the worksheet
    pub fn header(&self) -> &'static str {
        match self {
            Column::Index => "Index",
            Column::Name => "Name",
            Column::PolicyId => "Policy ID",
            Column::Type => "Type",
            Column::DisplayName => "Display Name",
            Column::Description => "Description",
            Column::Category => "Category",
            Column::PolicyType => "Policy Type",
            Column::Mode => "Mode",
            Column::Location => "Location",
            Column::Condition => "Condition",
            Column::Effect => "Effect",
            Column::Action => "Action",
            Column::Parameters => "Parameters",
            Column::Versions => "Versions",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

/// Named column sets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaPreset {
    /// Index, Policy ID, Display Name, Description, Category, Policy Type,
    /// Effect, Versions
    #[default]
    Definitions,
    /// Every column, including the rule blocks and parameters
    Detailed,
}

const DEFINITIONS: &[Column] = &[
    Column::PolicyId,
    Column::DisplayName,
    Column::Description,
    Column::Category,
    Column::PolicyType,
    Column::Effect,
    Column::Versions,
];

const DETAILED: &[Column] = &[
    Column::Name,
    Column::PolicyId,
    Column::Type,
    Column::DisplayName,
    Column::Description,
    Column::Category,
    Column::PolicyType,
    Column::Mode,
    Column::Location,
    Column::Condition,
    Column::Effect,
    Column::Action,
    Column::Parameters,
    Column::Versions,
];

/// The fixed column set of one report
///
/// Data columns never contain [`Column::Index`]; the index column is a
/// separate flag and is always placed first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSchema {
    include_index: bool,
    columns: Vec<Column>,
}

impl ColumnSchema {
    /// Build a schema from an explicit column list
    ///
    /// An [`Column::Index`] anywhere in the list turns the index column on;
    /// repeated columns are kept once, at their first position.
    pub fn new<I: IntoIterator<Item = Column>>(columns: I) -> Self {
        let mut include_index = false;
        let mut data: Vec<Column> = Vec::new();
        for column in columns {
            if column == Column::Index {
                include_index = true;
            } else if !data.contains(&column) {
                data.push(column);
            }
        }
        Self {
            include_index,
            columns: data,
        }
    }

    /// Schema for a preset, with the index column
    pub fn preset(preset: SchemaPreset) -> Self {
        let columns = match preset {
            SchemaPreset::Definitions => DEFINITIONS,
            SchemaPreset::Detailed => DETAILED,
        };
        Self {
            include_index: true,
            columns: columns.to_vec(),
        }
    }

    /// The original report layout
    pub fn definitions() -> Self {
        Self::preset(SchemaPreset::Definitions)
    }

    /// Every column
    pub fn detailed() -> Self {
        Self::preset(SchemaPreset::Detailed)
    }

    /// Turn the leading index column on or off
    pub fn with_index(mut self, include_index: bool) -> Self {
        self.include_index = include_index;
        self
    }

    pub fn includes_index(&self) -> bool {
        self.include_index
    }

    /// Data columns, in order, without the index column
    pub fn data_columns(&self) -> &[Column] {
        &self.columns
    }

    /// All columns in table order
    pub fn columns(&self) -> Vec<Column> {
        let index = self.include_index.then_some(Column::Index);
        index.into_iter().chain(self.columns.iter().copied()).collect()
    }

    /// Total number of columns, including the index column
    pub fn len(&self) -> usize {
        self.columns.len() + usize::from(self.include_index)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ColumnSchema {
    fn default() -> Self {
        Self::definitions()
    }
}
