//! YAML-like text dump of one sheet's populated cells.

use crate::error::SheetViewError;
use crate::export::format::seconds_to_time_string;
use crate::source::CellSource;
use crate::workbook::cell::CellValue;
use crate::workbook::sheet::Bounds;
use crate::workbook::Workbook;

impl<S: CellSource> Workbook<S> {
    /// Dumps populated cells as flat `cell_<row>_<col>` blocks.
    ///
    /// Each block carries the caller-supplied prefix pairs followed by row,
    /// col, celltype and value lines; time values are rendered as HH:MM:SS.
    /// `range` restricts the dump to a sub-rectangle of the bounding box.
    pub fn to_yaml(
        &mut self,
        prefix: &[(&str, &str)],
        range: Option<Bounds>,
        sheet: Option<&str>,
    ) -> Result<String, SheetViewError> {
        let state = self.loaded_sheet(sheet)?;
        let range = match range {
            Some(range) => range,
            None => match state.bounds() {
                Some(bounds) => bounds,
                None => return Ok(String::new()),
            },
        };
        let mut result = String::new();
        for row in range.first_row..=range.last_row {
            for col in range.first_column..=range.last_column {
                let Some(cell) = state.cells.get(row, col) else {
                    continue;
                };
                if cell.value.is_empty() {
                    continue;
                }
                result.push_str(&format!("cell_{row}_{col}:\n"));
                for (key, value) in prefix {
                    result.push_str(&format!("  {key}: {value}\n"));
                }
                result.push_str(&format!("  row: {row}\n"));
                result.push_str(&format!("  col: {col}\n"));
                result.push_str(&format!("  celltype: {}\n", cell.celltype.as_str()));
                let value = match &cell.value {
                    CellValue::Time(seconds) => seconds_to_time_string(*seconds),
                    other => other.to_string(),
                };
                result.push_str(&format!("  value: {value}\n"));
            }
        }
        Ok(result)
    }
}
