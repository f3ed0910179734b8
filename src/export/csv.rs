//! CSV export of one sheet through the type-aware cell formatter.

use crate::error::SheetViewError;
use crate::export::format::format_cell;
use crate::source::CellSource;
use crate::workbook::reference::cell_reference;
use crate::workbook::Workbook;
use std::io::Write;

impl<S: CellSource> Workbook<S> {
    /// Writes the sheet as separator-joined, newline-terminated lines
    /// covering rows 1..=last_row and columns 1..=last_column. A sheet
    /// without cells writes nothing.
    pub fn to_csv<W: Write>(
        &mut self,
        out: &mut W,
        separator: char,
        sheet: Option<&str>,
    ) -> Result<(), SheetViewError> {
        let state = self.loaded_sheet(sheet)?;
        let Some(bounds) = state.bounds() else {
            return Ok(());
        };
        let mut line = String::new();
        for row in 1..=bounds.last_row {
            line.clear();
            for col in 1..=bounds.last_column {
                if col > 1 {
                    line.push(separator);
                }
                if let Some(cell) = state.cells.get(row, col) {
                    line.push_str(&format_cell(
                        &cell.value,
                        cell.celltype,
                        &cell_reference(row, col),
                    )?);
                }
            }
            line.push('\n');
            out.write_all(line.as_bytes())?;
        }
        Ok(())
    }

    /// `to_csv` into an in-memory string.
    pub fn to_csv_string(
        &mut self,
        separator: char,
        sheet: Option<&str>,
    ) -> Result<String, SheetViewError> {
        let mut buffer = Vec::new();
        self.to_csv(&mut buffer, separator, sheet)?;
        Ok(String::from_utf8(buffer).expect("CSV output is UTF-8"))
    }
}

#[cfg(test)]
mod tests {
    use crate::source::MemorySource;
    use crate::workbook::cell::{CellType, CellValue};
    use crate::workbook::Workbook;

    #[test]
    fn renders_every_cell_through_the_formatter() {
        let source = MemorySource::new().sheet_from_rows(
            "People",
            vec![
                vec![
                    CellValue::String("id".to_owned()),
                    CellValue::String("name".to_owned()),
                ],
                vec![CellValue::Float(1.0), CellValue::String("Alice".to_owned())],
                vec![CellValue::Float(2.0), CellValue::String("Bob".to_owned())],
            ],
        );
        let mut workbook = Workbook::open(source).unwrap();
        assert_eq!(
            workbook.to_csv_string(',', None).unwrap(),
            "\"id\",\"name\"\n1,\"Alice\"\n2,\"Bob\"\n"
        );
    }

    #[test]
    fn covers_leading_empty_rows_and_columns() {
        // single cell at C2: rows 1..=2, columns 1..=3 are emitted
        let source = MemorySource::new().sheet(
            "Offset",
            vec![(2, 3, CellValue::Float(9.0), CellType::Float)],
        );
        let mut workbook = Workbook::open(source).unwrap();
        assert_eq!(workbook.to_csv_string(',', None).unwrap(), ",,\n,,9\n");
    }

    #[test]
    fn honors_the_separator_and_quoting_rules() {
        let source = MemorySource::new().sheet_from_rows(
            "Quotes",
            vec![vec![
                CellValue::String("He said \"hi\"".to_owned()),
                CellValue::Bool(true),
            ]],
        );
        let mut workbook = Workbook::open(source).unwrap();
        assert_eq!(
            workbook.to_csv_string(';', None).unwrap(),
            "\"He said \"\"hi\"\"\";\"true\"\n"
        );
    }

    #[test]
    fn empty_sheet_writes_nothing() {
        let source = MemorySource::new().sheet("Empty", Vec::new());
        let mut workbook = Workbook::open(source).unwrap();
        assert_eq!(workbook.to_csv_string(',', None).unwrap(), "");
    }

    #[test]
    fn unhandled_formula_result_aborts_the_export() {
        let source = MemorySource::new().sheet(
            "Bad",
            vec![(1, 1, CellValue::Bool(true), CellType::Formula)],
        );
        let mut workbook = Workbook::open(source).unwrap();
        assert!(workbook.to_csv_string(',', None).is_err());
    }
}
