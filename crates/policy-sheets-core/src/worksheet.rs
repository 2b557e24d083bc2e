//! A single named sheet

use std::collections::BTreeMap;

use crate::cell::{CellData, CellRange, CellStorage, CellValue, RowCells};
use crate::error::{Error, Result};
use crate::style::Style;
use crate::{MAX_COLS, MAX_COLUMN_WIDTH, MAX_ROWS};

#[derive(Debug)]
pub struct Worksheet {
    name: String,
    cells: CellStorage,
}

impl Worksheet {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            cells: CellStorage::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    // === Cells ===

    pub fn cell_at(&self, row: u32, col: u16) -> Option<&CellData> {
        self.cells.get(row, col)
    }

    /// Value at a position; unset cells read as [`CellValue::Empty`]
    pub fn get_value_at(&self, row: u32, col: u16) -> CellValue {
        self.cells
            .get(row, col)
            .map(|cell| cell.value.clone())
            .unwrap_or_default()
    }

    pub fn set_cell_value_at<V: Into<CellValue>>(
        &mut self,
        row: u32,
        col: u16,
        value: V,
    ) -> Result<()> {
        check_position(row, col)?;
        self.cells.set_value(row, col, value.into());
        Ok(())
    }

    pub fn set_cell_style_at(&mut self, row: u32, col: u16, style: &Style) -> Result<()> {
        check_position(row, col)?;
        let index = self.cells.style_pool_mut().get_or_insert(style.clone());
        self.cells.set_style(row, col, index);
        Ok(())
    }

    /// Style by sheet-local index
    pub fn style_by_index(&self, index: u32) -> Option<&Style> {
        self.cells.style_pool().get(index)
    }

    /// Non-default style of a cell
    pub fn cell_style_at(&self, row: u32, col: u16) -> Option<&Style> {
        match self.cells.get(row, col)?.style_index {
            0 => None,
            index => self.style_by_index(index),
        }
    }

    // === Rows ===

    /// Keep `row` in the sheet even if all of its cells stay blank
    pub fn reserve_row(&mut self, row: u32) -> Result<()> {
        check_position(row, 0)?;
        self.cells.reserve_row(row);
        Ok(())
    }

    /// Rows in order, including reserved rows without cells
    pub fn rows(&self) -> impl Iterator<Item = (u32, &RowCells)> {
        self.cells.rows()
    }

    /// Span from the first to the last row and column in use
    pub fn used_range(&self) -> Option<CellRange> {
        self.cells
            .used_bounds()
            .map(|(r0, c0, r1, c1)| CellRange::from_indices(r0, c0, r1, c1))
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// All cells, row-major
    pub fn iter_cells(&self) -> impl Iterator<Item = (u32, u16, &CellData)> {
        self.cells.iter()
    }

    pub fn iter_column(&self, col: u16) -> impl Iterator<Item = (u32, &CellData)> {
        self.cells.iter_column(col)
    }

    // === Columns and merges ===

    pub fn column_width(&self, col: u16) -> f64 {
        self.cells.column_width(col)
    }

    /// Set a width in characters, clamped to `0..=MAX_COLUMN_WIDTH`
    pub fn set_column_width(&mut self, col: u16, width: f64) {
        self.cells
            .set_column_width(col, width.clamp(0.0, MAX_COLUMN_WIDTH));
    }

    pub fn custom_column_widths(&self) -> &BTreeMap<u16, f64> {
        self.cells.custom_column_widths()
    }

    pub fn merged_regions(&self) -> &[CellRange] {
        self.cells.merged_regions()
    }

    /// Merge a range; ranges may not overlap an existing merge
    pub fn merge_cells(&mut self, range: &CellRange) -> Result<()> {
        if self
            .cells
            .merged_regions()
            .iter()
            .any(|existing| range.overlaps(existing))
        {
            return Err(Error::MergedCellConflict(range.to_string()));
        }
        self.cells.add_merged_region(*range);
        Ok(())
    }
}

fn check_position(row: u32, col: u16) -> Result<()> {
    if row >= MAX_ROWS {
        return Err(Error::RowOutOfBounds(row, MAX_ROWS - 1));
    }
    if col >= MAX_COLS {
        return Err(Error::ColumnOutOfBounds(col, MAX_COLS - 1));
    }
    Ok(())
}
