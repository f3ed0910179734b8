//! Dense-matrix export of one sheet.

use crate::error::SheetViewError;
use crate::source::CellSource;
use crate::workbook::cell::CellValue;
use crate::workbook::sheet::Bounds;
use crate::workbook::Workbook;

impl<S: CellSource> Workbook<S> {
    /// Materializes the sheet as a row-major matrix of raw values over the
    /// bounding box, or over an explicit sub-range. An empty sheet yields a
    /// 0×0 matrix.
    pub fn to_matrix(
        &mut self,
        range: Option<Bounds>,
        sheet: Option<&str>,
    ) -> Result<Vec<Vec<CellValue>>, SheetViewError> {
        let state = self.loaded_sheet(sheet)?;
        let range = match range {
            Some(range) => range,
            None => match state.bounds() {
                Some(bounds) => bounds,
                None => return Ok(Vec::new()),
            },
        };
        Ok((range.first_row..=range.last_row)
            .map(|row| {
                (range.first_column..=range.last_column)
                    .map(|col| state.cells.value(row, col))
                    .collect()
            })
            .collect())
    }
}
