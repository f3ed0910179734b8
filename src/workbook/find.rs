//! Row lookup by index and by equality conditions against header-resolved
//! columns.

use crate::error::SheetViewError;
use crate::source::CellSource;
use crate::workbook::cell::CellValue;
use crate::workbook::header::{self, HeaderLayout, HeaderSpec};
use crate::workbook::records::Record;
use crate::workbook::sheet::Bounds;
use crate::workbook::Workbook;

impl<S: CellSource> Workbook<S> {
    /// Looks up one row by index, offset by the remembered header line so
    /// that index 1 addresses the first data row after a resolved header,
    /// or absolute row 1 when no header has been resolved. Trailing empty
    /// cells are trimmed to the row's populated extent.
    pub fn find_row(&mut self, index: u32) -> Result<Vec<CellValue>, SheetViewError> {
        let base = self.header_line.map(|line| line + 1).unwrap_or(1);
        let row = index + base - 1;
        let mut cells = self.row(row, None)?;
        while cells.last().map(CellValue::is_empty).unwrap_or(false) {
            cells.pop();
        }
        Ok(cells)
    }

    /// Rows whose header-resolved columns equal every expected value,
    /// projected as header-keyed records. The header map comes from the
    /// sheet's first occupied row.
    pub fn find_all(
        &mut self,
        conditions: &[(&str, CellValue)],
    ) -> Result<Vec<Record>, SheetViewError> {
        let Some((layout, _, rows)) = self.matching_rows(conditions)? else {
            return Ok(Vec::new());
        };
        let index = self.resolve_sheet(None)?;
        let cells = &self.sheets[index].cells;
        Ok(rows
            .into_iter()
            .map(|row| {
                layout
                    .columns
                    .iter()
                    .map(|(key, col)| (key.clone(), cells.value(row, *col)))
                    .collect()
            })
            .collect())
    }

    /// Like `find_all`, but projects the matching rows as plain arrays over
    /// the full column range.
    pub fn find_all_rows(
        &mut self,
        conditions: &[(&str, CellValue)],
    ) -> Result<Vec<Vec<CellValue>>, SheetViewError> {
        let Some((_, bounds, rows)) = self.matching_rows(conditions)? else {
            return Ok(Vec::new());
        };
        let index = self.resolve_sheet(None)?;
        let cells = &self.sheets[index].cells;
        Ok(rows
            .into_iter()
            .map(|row| {
                (bounds.first_column..=bounds.last_column)
                    .map(|col| cells.value(row, col))
                    .collect()
            })
            .collect())
    }

    /// Scans first_row..=last_row and keeps rows satisfying every
    /// condition. `None` means the sheet has no cells at all.
    fn matching_rows(
        &mut self,
        conditions: &[(&str, CellValue)],
    ) -> Result<Option<(HeaderLayout, Bounds, Vec<u32>)>, SheetViewError> {
        let state = self.loaded_sheet(None)?;
        let Some(bounds) = state.bounds() else {
            return Ok(None);
        };
        let layout = header::resolve(state, &HeaderSpec::FirstRow)?;
        let mut resolved = Vec::with_capacity(conditions.len());
        for (key, expected) in conditions {
            let col = layout.column_of(key).ok_or_else(|| {
                SheetViewError::HeaderNotFound(format!(
                    "'{key}' is not present in the header row"
                ))
            })?;
            resolved.push((col, expected.clone()));
        }
        let rows = (bounds.first_row..=bounds.last_row)
            .filter(|row| {
                resolved
                    .iter()
                    .all(|(col, expected)| state.cells.value(*row, *col) == *expected)
            })
            .collect();
        Ok(Some((layout, bounds, rows)))
    }
}
