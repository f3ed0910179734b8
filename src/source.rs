//! Collaborator interface for format-specific spreadsheet decoders.

use crate::workbook::cell::{CellType, CellValue};
use crate::workbook::sheet::SheetCells;
use anyhow::Result;
use std::collections::HashMap;

/// A format-specific decoder feeding cells into the access layer.
///
/// Implementations decode one concrete format (XML or binary Excel, ODS,
/// CSV, ...) and surface its contents through two calls: an ordered sheet
/// listing and a per-sheet bulk read into the sparse store. The workbook
/// invokes `read_cells` at most once per sheet and memoizes the result, so
/// implementations need not guard against repeat reads themselves.
pub trait CellSource {
    /// Sheet names in document order. Order is significant.
    fn list_sheets(&mut self) -> Result<Vec<String>>;

    /// Populates `cells` with every populated cell of `sheet`.
    fn read_cells(&mut self, sheet: &str, cells: &mut SheetCells) -> Result<()>;
}

/// An in-memory source with sheets assembled programmatically.
///
/// Useful for callers that already hold decoded data, and as the fixture
/// factory for tests.
#[derive(Debug, Default)]
pub struct MemorySource {
    names: Vec<String>,
    sheets: HashMap<String, Vec<(u32, u32, CellValue, CellType)>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a sheet from explicit (row, col, value, type) entries.
    pub fn sheet(mut self, name: &str, cells: Vec<(u32, u32, CellValue, CellType)>) -> Self {
        self.names.push(name.to_owned());
        self.sheets.insert(name.to_owned(), cells);
        self
    }

    /// Adds a sheet from a dense value grid anchored at A1, inferring type
    /// tags from the value variants. Empty values produce no entry.
    pub fn sheet_from_rows(mut self, name: &str, rows: Vec<Vec<CellValue>>) -> Self {
        let mut cells = Vec::new();
        for (row_index, row) in rows.into_iter().enumerate() {
            for (col_index, value) in row.into_iter().enumerate() {
                if !value.is_empty() {
                    let celltype = value.infer_type();
                    cells.push((row_index as u32 + 1, col_index as u32 + 1, value, celltype));
                }
            }
        }
        self.sheet(name, cells)
    }
}

impl CellSource for MemorySource {
    fn list_sheets(&mut self) -> Result<Vec<String>> {
        Ok(self.names.clone())
    }

    fn read_cells(&mut self, sheet: &str, cells: &mut SheetCells) -> Result<()> {
        let entries = self
            .sheets
            .get(sheet)
            .ok_or_else(|| anyhow::anyhow!("unknown sheet '{sheet}'"))?;
        for (row, col, value, celltype) in entries {
            cells.set(*row, *col, value.clone(), *celltype);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_entries_skip_empty_values() {
        let mut source = MemorySource::new().sheet_from_rows(
            "Sheet1",
            vec![
                vec![CellValue::Float(1.0), CellValue::Empty],
                vec![CellValue::Empty, CellValue::Bool(true)],
            ],
        );
        let mut cells = SheetCells::default();
        source.read_cells("Sheet1", &mut cells).unwrap();
        assert_eq!(cells.len(), 2);
        assert_eq!(cells.value(1, 1), CellValue::Float(1.0));
        assert_eq!(cells.value(2, 2), CellValue::Bool(true));
        assert_eq!(cells.value(1, 2), CellValue::Empty);
    }

    #[test]
    fn unknown_sheet_is_a_source_error() {
        let mut source = MemorySource::new();
        let mut cells = SheetCells::default();
        assert!(source.read_cells("missing", &mut cells).is_err());
    }
}
