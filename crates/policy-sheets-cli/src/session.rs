//! Upload session state machine

use policy_sheets::{from_records, parse_records, Report, ReportConfig, ReportTable, SpreadsheetArtifact};

/// Where the session stands after the latest upload
#[derive(Debug, Clone, Default)]
pub enum SessionState {
    /// Nothing uploaded yet
    #[default]
    Idle,
    /// Upload decoded, table not built yet
    ///
    /// Transient: [`Session::handle_upload`] always moves on to `Rendered`
    /// or `Failed` before returning, so callers never observe it.
    Parsed { records: usize },
    /// Table and spreadsheet ready
    Rendered(Report),
    /// The latest upload could not be converted
    Failed { message: String },
}

impl SessionState {
    pub fn name(&self) -> &'static str {
        match self {
            SessionState::Idle => "idle",
            SessionState::Parsed { .. } => "parsed",
            SessionState::Rendered(_) => "rendered",
            SessionState::Failed { .. } => "failed",
        }
    }
}

/// One user's conversion session
///
/// Each upload replaces the previous outcome. A failed upload clears the
/// previous table and artifact, and the next upload starts over.
#[derive(Debug, Clone, Default)]
pub struct Session {
    config: ReportConfig,
    state: SessionState,
}

impl Session {
    pub fn new(config: ReportConfig) -> Self {
        Self {
            config,
            state: SessionState::Idle,
        }
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Run one upload through the pipeline
    pub fn handle_upload(&mut self, payload: &[u8]) -> &SessionState {
        let records = match parse_records(payload) {
            Ok(records) => records,
            Err(e) => return self.fail(e.to_string()),
        };

        self.state = SessionState::Parsed {
            records: records.len(),
        };
        tracing::debug!(records = records.len(), "upload parsed");

        match from_records(&records, &self.config) {
            Ok(report) => {
                tracing::info!(
                    rows = report.table.len(),
                    skipped = report.table.skipped().len(),
                    "upload converted"
                );
                self.state = SessionState::Rendered(report);
                &self.state
            }
            Err(e) => self.fail(e.to_string()),
        }
    }

    fn fail(&mut self, message: String) -> &SessionState {
        tracing::warn!(error = %message, "upload rejected");
        self.state = SessionState::Failed { message };
        &self.state
    }

    /// Preview table of the latest successful upload
    pub fn table(&self) -> Option<&ReportTable> {
        match &self.state {
            SessionState::Rendered(report) => Some(&report.table),
            _ => None,
        }
    }

    /// Downloadable spreadsheet of the latest successful upload
    ///
    /// Stays available until the next upload, so it can be downloaded
    /// more than once.
    pub fn artifact(&self) -> Option<&SpreadsheetArtifact> {
        match &self.state {
            SessionState::Rendered(report) => Some(&report.artifact),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.state {
            SessionState::Failed { message } => Some(message),
            _ => None,
        }
    }
}
