//! Sparse worksheet storage
//!
//! Rows live in a `BTreeMap` keyed by row index, so every walk over the
//! sheet is row-major. A row can exist without cells: the writer still emits
//! it, which keeps blank table rows in the package.

use std::collections::BTreeMap;

use super::{CellRange, CellValue};
use crate::style::StylePool;

/// Column width Excel assumes when none is written
pub const DEFAULT_COLUMN_WIDTH: f64 = 8.43;

/// A stored cell: value plus an index into the sheet's [`StylePool`]
#[derive(Debug, Clone, Default)]
pub struct CellData {
    pub value: CellValue,
    /// 0 is the default style
    pub style_index: u32,
}

impl CellData {
    fn is_unused(&self) -> bool {
        self.value.is_empty() && self.style_index == 0
    }
}

/// Cells of one row, keyed by column
pub type RowCells = BTreeMap<u16, CellData>;

#[derive(Debug, Default)]
pub struct CellStorage {
    rows: BTreeMap<u32, RowCells>,
    style_pool: StylePool,
    column_widths: BTreeMap<u16, f64>,
    merged_regions: Vec<CellRange>,
}

impl CellStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, row: u32, col: u16) -> Option<&CellData> {
        self.rows.get(&row)?.get(&col)
    }

    /// Replace a cell's value, keeping its style
    pub fn set_value(&mut self, row: u32, col: u16, value: CellValue) {
        self.update(row, col, |cell| cell.value = value);
    }

    /// Replace a cell's style, keeping its value
    pub fn set_style(&mut self, row: u32, col: u16, style_index: u32) {
        self.update(row, col, |cell| cell.style_index = style_index);
    }

    fn update(&mut self, row: u32, col: u16, f: impl FnOnce(&mut CellData)) {
        let mut cell = self.get(row, col).cloned().unwrap_or_default();
        f(&mut cell);
        if cell.is_unused() {
            if let Some(cells) = self.rows.get_mut(&row) {
                cells.remove(&col);
            }
        } else {
            self.rows.entry(row).or_default().insert(col, cell);
        }
    }

    /// Make sure `row` is written even if it never gets a cell
    pub fn reserve_row(&mut self, row: u32) {
        self.rows.entry(row).or_default();
    }

    /// Whether there are no cells and no reserved rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// `(first_row, first_col, last_row, last_col)` over rows and cells
    ///
    /// Rows without cells count towards the row span only.
    pub fn used_bounds(&self) -> Option<(u32, u16, u32, u16)> {
        let first_row = *self.rows.keys().next()?;
        let last_row = *self.rows.keys().next_back()?;

        let cols = self
            .rows
            .values()
            .filter_map(|cells| Some((*cells.keys().next()?, *cells.keys().next_back()?)))
            .fold(None, |span: Option<(u16, u16)>, (lo, hi)| match span {
                Some((a, b)) => Some((a.min(lo), b.max(hi))),
                None => Some((lo, hi)),
            });
        let (first_col, last_col) = cols.unwrap_or((0, 0));

        Some((first_row, first_col, last_row, last_col))
    }

    /// Every row in order, with its cells left to right
    pub fn rows(&self) -> impl Iterator<Item = (u32, &RowCells)> {
        self.rows.iter().map(|(&row, cells)| (row, cells))
    }

    /// Every cell in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (u32, u16, &CellData)> {
        self.rows
            .iter()
            .flat_map(|(&row, cells)| cells.iter().map(move |(&col, cell)| (row, col, cell)))
    }

    /// Cells of one column, top to bottom
    pub fn iter_column(&self, col: u16) -> impl Iterator<Item = (u32, &CellData)> {
        self.rows
            .iter()
            .filter_map(move |(&row, cells)| cells.get(&col).map(|cell| (row, cell)))
    }

    pub fn column_width(&self, col: u16) -> f64 {
        self.column_widths
            .get(&col)
            .copied()
            .unwrap_or(DEFAULT_COLUMN_WIDTH)
    }

    /// Store a width; the default width clears any custom entry
    pub fn set_column_width(&mut self, col: u16, width: f64) {
        if (width - DEFAULT_COLUMN_WIDTH).abs() < 0.001 {
            self.column_widths.remove(&col);
        } else {
            self.column_widths.insert(col, width);
        }
    }

    pub fn custom_column_widths(&self) -> &BTreeMap<u16, f64> {
        &self.column_widths
    }

    pub fn merged_regions(&self) -> &[CellRange] {
        &self.merged_regions
    }

    pub fn add_merged_region(&mut self, range: CellRange) {
        self.merged_regions.push(range);
    }

    pub fn style_pool(&self) -> &StylePool {
        &self.style_pool
    }

    pub fn style_pool_mut(&mut self) -> &mut StylePool {
        &mut self.style_pool
    }
}
