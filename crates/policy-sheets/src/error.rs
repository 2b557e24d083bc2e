//! Report error types

use thiserror::Error;

use policy_sheets_xlsx::XlsxError;

/// Result type for report operations
pub type ReportResult<T> = std::result::Result<T, ReportError>;

/// Errors raised while turning an upload into a report
///
/// Field extraction never fails; absent fields fall back to defaults.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The payload is not valid JSON, or not a top-level array
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// An array element is not a JSON object (`index` is 0-based)
    #[error("Record {} is not a policy definition object (found {found})", .index + 1)]
    InvalidRecord { index: usize, found: &'static str },

    /// A style setting cannot be applied
    #[error("Invalid report style: {0}")]
    InvalidStyle(String),

    /// The report configuration could not be read
    #[error("Invalid report configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// Laying out the worksheet failed
    #[error("Failed to lay out worksheet: {0}")]
    Layout(#[from] policy_sheets_core::Error),

    /// Serializing the spreadsheet failed
    #[error("Failed to write spreadsheet: {0}")]
    Render(#[from] XlsxError),
}

impl ReportError {
    /// Whether this error happened while building the spreadsheet itself
    pub fn is_render_failure(&self) -> bool {
        matches!(
            self,
            ReportError::InvalidStyle(_) | ReportError::Layout(_) | ReportError::Render(_)
        )
    }
}
