//! Spreadsheet renderer: report table → XLSX artifact

use std::borrow::Cow;
use std::io::Cursor;

use serde::Deserialize;

use policy_sheets_core::{
    BorderStyle, CellRange, CellValue, Color, HorizontalAlignment, Style, Workbook, Worksheet,
    MAX_CELL_TEXT_LEN, MAX_COLUMN_WIDTH,
};
use policy_sheets_xlsx::{XlsxWriter, XLSX_MIME_TYPE};

use crate::error::{ReportError, ReportResult};
use crate::schema::Column;
use crate::table::ReportTable;

/// Appended to cell text cut at [`MAX_CELL_TEXT_LEN`]
pub const TRUNCATION_MARKER: &str = "...[truncated]";

/// How columns are sized
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ColumnWidth {
    /// Every column gets the same width, in characters
    Fixed { width: f64 },
    /// Longest line of any non-empty header or data cell, plus padding
    FitToContent { padding: f64 },
}

impl Default for ColumnWidth {
    fn default() -> Self {
        ColumnWidth::FitToContent { padding: 3.0 }
    }
}

/// Worksheet styling, fixed for one render
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ReportStyle {
    /// Title written to row 1, merged across every column
    pub title_text: Option<String>,
    /// Leave a blank row between the title and the header
    pub title_spacer: bool,
    /// Title font size in points
    pub title_font_size: f64,
    pub header_bold: bool,
    /// Header background, as RGB hex (`"D9E1F2"` or `"#D9E1F2"`)
    pub header_fill_color: Option<String>,
    /// Thin border on every non-empty cell
    pub cell_border: bool,
    pub column_width: ColumnWidth,
}

impl Default for ReportStyle {
    fn default() -> Self {
        Self {
            title_text: Some("Azure Policy Definitions".to_string()),
            title_spacer: true,
            title_font_size: 14.0,
            header_bold: true,
            header_fill_color: Some("D9E1F2".to_string()),
            cell_border: true,
            column_width: ColumnWidth::default(),
        }
    }
}

impl ReportStyle {
    /// A style with no title, no fill, no borders and fixed widths
    pub fn plain() -> Self {
        Self {
            title_text: None,
            title_spacer: false,
            title_font_size: 14.0,
            header_bold: false,
            header_fill_color: None,
            cell_border: false,
            column_width: ColumnWidth::Fixed { width: 8.43 },
        }
    }

    fn header_fill(&self) -> ReportResult<Option<Color>> {
        match self.header_fill_color.as_deref() {
            None => Ok(None),
            Some(hex) => Color::from_hex(hex).map(Some).ok_or_else(|| {
                ReportError::InvalidStyle(format!("header fill color '{}' is not RGB hex", hex))
            }),
        }
    }

    fn validate(&self) -> ReportResult<()> {
        match self.column_width {
            ColumnWidth::Fixed { width } if !(width.is_finite() && width >= 0.0) => Err(
                ReportError::InvalidStyle(format!("column width {} is not a valid width", width)),
            ),
            ColumnWidth::FitToContent { padding } if !(padding.is_finite() && padding >= 0.0) => {
                Err(ReportError::InvalidStyle(format!(
                    "column padding {} is not a valid width",
                    padding
                )))
            }
            _ if !(self.title_font_size.is_finite() && self.title_font_size > 0.0) => {
                Err(ReportError::InvalidStyle(format!(
                    "title font size {} must be positive",
                    self.title_font_size
                )))
            }
            _ => Ok(()),
        }
    }
}

/// A rendered XLSX document, held in memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpreadsheetArtifact {
    bytes: Vec<u8>,
    file_name: String,
}

impl SpreadsheetArtifact {
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Download file name, e.g. `Azure_Policy_Definitions.xlsx`
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn mime_type(&self) -> &'static str {
        XLSX_MIME_TYPE
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// A reader over the document, positioned at its start
    pub fn reader(&self) -> Cursor<&[u8]> {
        Cursor::new(self.bytes.as_slice())
    }
}

/// Renders report tables into single-sheet XLSX documents
#[derive(Debug, Clone)]
pub struct ReportRenderer {
    style: ReportStyle,
    sheet_name: String,
    file_name: String,
}

impl Default for ReportRenderer {
    fn default() -> Self {
        Self::new(ReportStyle::default())
    }
}

impl ReportRenderer {
    pub fn new(style: ReportStyle) -> Self {
        Self {
            style,
            sheet_name: "Policy_Definitions".to_string(),
            file_name: "Azure_Policy_Definitions.xlsx".to_string(),
        }
    }

    /// Set the worksheet name
    pub fn sheet_name<S: Into<String>>(mut self, name: S) -> Self {
        self.sheet_name = name.into();
        self
    }

    /// Set the download file name
    pub fn file_name<S: Into<String>>(mut self, name: S) -> Self {
        self.file_name = name.into();
        self
    }

    pub fn style(&self) -> &ReportStyle {
        &self.style
    }

    /// Lay out the table in a workbook without serializing it
    pub fn layout(&self, table: &ReportTable) -> ReportResult<Workbook> {
        self.style.validate()?;
        let header_fill = self.style.header_fill()?;

        let mut workbook = Workbook::with_sheet(&self.sheet_name)?;
        let sheet = workbook
            .worksheet_mut(0)
            .ok_or_else(|| ReportError::InvalidStyle("worksheet was not created".into()))?;

        let column_count = table.columns().len();
        let last_col = col_index(column_count.saturating_sub(1))?;
        let border = if self.style.cell_border {
            BorderStyle::thin()
        } else {
            BorderStyle::default()
        };

        let mut row: u32 = 0;

        if let Some(title) = &self.style.title_text {
            sheet.set_cell_value_at(row, 0, CellValue::string(fit_cell_text(title)))?;
            let mut title_style = Style::new()
                .bold(true)
                .font_size(self.style.title_font_size)
                .horizontal_alignment(HorizontalAlignment::Center);
            if !title.is_empty() {
                title_style = title_style.border(border);
            }
            sheet.set_cell_style_at(row, 0, &title_style)?;
            if last_col > 0 {
                sheet.merge_cells(&CellRange::from_indices(row, 0, row, last_col))?;
            }
            row += if self.style.title_spacer { 2 } else { 1 };
        }

        let mut header_style = Style::new().bold(self.style.header_bold).border(border);
        if let Some(color) = header_fill {
            header_style = header_style.fill_color(color);
        }
        for (col, header) in table.headers().enumerate() {
            let col = col_index(col)?;
            sheet.set_cell_value_at(row, col, header)?;
            sheet.set_cell_style_at(row, col, &header_style)?;
        }
        let header_row = row;
        row += 1;

        let data_style = Style::new().border(border);
        for (position, flat_row) in table.rows().iter().enumerate() {
            // A row of blank values still occupies its line
            sheet.reserve_row(row)?;
            for (col, (column, text)) in flat_row.iter().enumerate() {
                let col = col_index(col)?;
                let value = match column {
                    Column::Index => CellValue::from(position + 1),
                    _ => {
                        let fitted = fit_cell_text(text);
                        if let Cow::Owned(_) = fitted {
                            tracing::warn!(
                                record = position + 1,
                                column = column.header(),
                                chars = text.chars().count(),
                                "cell text exceeds the spreadsheet limit, truncated"
                            );
                        }
                        CellValue::string(fitted)
                    }
                };
                if value.is_blank() {
                    continue;
                }
                sheet.set_cell_value_at(row, col, value)?;
                if self.style.cell_border {
                    sheet.set_cell_style_at(row, col, &data_style)?;
                }
            }
            row += 1;
        }

        self.apply_column_widths(sheet, header_row, column_count)?;

        tracing::debug!(
            sheet = %self.sheet_name,
            rows = table.len(),
            columns = column_count,
            "laid out worksheet"
        );
        Ok(workbook)
    }

    /// Render the table into an XLSX artifact
    pub fn render(&self, table: &ReportTable) -> ReportResult<SpreadsheetArtifact> {
        let workbook = self.layout(table)?;
        let bytes = XlsxWriter::write_to_vec(&workbook)?;
        tracing::debug!(bytes = bytes.len(), file = %self.file_name, "rendered spreadsheet");
        Ok(SpreadsheetArtifact {
            bytes,
            file_name: self.file_name.clone(),
        })
    }

    fn apply_column_widths(
        &self,
        sheet: &mut Worksheet,
        header_row: u32,
        column_count: usize,
    ) -> ReportResult<()> {
        for col in 0..column_count {
            let col = col_index(col)?;
            let width = match self.style.column_width {
                ColumnWidth::Fixed { width } => width,
                ColumnWidth::FitToContent { padding } => {
                    // Rows above the header hold the merged title
                    let longest = sheet
                        .iter_column(col)
                        .filter(|(row, cell)| *row >= header_row && !cell.value.is_blank())
                        .map(|(_, cell)| cell.value.display_width())
                        .max()
                        .unwrap_or(0);
                    (longest as f64 + padding).min(MAX_COLUMN_WIDTH)
                }
            };
            sheet.set_column_width(col, width);
        }
        Ok(())
    }
}

/// Cut text longer than a cell can hold, ending it with [`TRUNCATION_MARKER`]
fn fit_cell_text(text: &str) -> Cow<'_, str> {
    // UTF-8 length bounds the UTF-16 length from above
    if text.len() <= MAX_CELL_TEXT_LEN || text.encode_utf16().count() <= MAX_CELL_TEXT_LEN {
        return Cow::Borrowed(text);
    }
    let budget = MAX_CELL_TEXT_LEN - TRUNCATION_MARKER.len();
    let mut used = 0;
    let mut end = 0;
    for (i, c) in text.char_indices() {
        used += c.len_utf16();
        if used > budget {
            break;
        }
        end = i + c.len_utf8();
    }
    Cow::Owned(format!("{}{}", &text[..end], TRUNCATION_MARKER))
}

fn col_index(col: usize) -> ReportResult<u16> {
    u16::try_from(col).map_err(|_| {
        ReportError::Layout(policy_sheets_core::Error::ColumnOutOfBounds(
            u16::MAX,
            policy_sheets_core::MAX_COLS - 1,
        ))
    })
}
