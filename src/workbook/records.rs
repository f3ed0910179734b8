//! Row iteration and header-keyed record projection.

use crate::error::SheetViewError;
use crate::source::CellSource;
use crate::workbook::cell::CellValue;
use crate::workbook::header::{self, ParseOptions};
use crate::workbook::sheet::{Bounds, SheetCells};
use crate::workbook::Workbook;
use std::collections::HashMap;

/// A header-keyed record: field name to cell value.
pub type Record = HashMap<String, CellValue>;

/// Lazy iterator over row arrays for rows 1..=last_row.
///
/// The iterator is finite and restartable: requesting it again restarts from
/// row 1, it is not resumable across requests.
pub struct Rows<'a> {
    cells: &'a SheetCells,
    bounds: Option<Bounds>,
    next_row: u32,
}

impl Iterator for Rows<'_> {
    type Item = Vec<CellValue>;

    fn next(&mut self) -> Option<Self::Item> {
        let bounds = self.bounds?;
        if self.next_row > bounds.last_row {
            return None;
        }
        let row = self.next_row;
        self.next_row += 1;
        Some(
            (bounds.first_column..=bounds.last_column)
                .map(|col| self.cells.value(row, col))
                .collect(),
        )
    }
}

/// Lazy iterator over header-keyed records for the rows after the header.
pub struct Records<'a> {
    cells: &'a SheetCells,
    headers: Vec<(String, u32)>,
    next_row: u32,
    last_row: u32,
}

impl Iterator for Records<'_> {
    type Item = Record;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_row > self.last_row {
            return None;
        }
        let row = self.next_row;
        self.next_row += 1;
        Some(
            self.headers
                .iter()
                .map(|(key, col)| (key.clone(), self.cells.value(row, *col)))
                .collect(),
        )
    }
}

impl<S: CellSource> Workbook<S> {
    /// Iterates the current sheet's rows as plain arrays, rows 1..=last_row
    /// over the occupied column range. An empty sheet yields no rows.
    pub fn rows(&mut self) -> Result<Rows<'_>, SheetViewError> {
        let state = self.loaded_sheet(None)?;
        let bounds = state.bounds();
        Ok(Rows {
            cells: &state.cells,
            bounds,
            next_row: 1,
        })
    }

    /// Iterates the current sheet as header-keyed records under the given
    /// options.
    ///
    /// Resolving the header map fixes the iteration start to the row after
    /// the header; the resolved header row is remembered for index-based
    /// `find`. With `clean` set, every string cell of the sheet is first
    /// stripped of non-ASCII characters and surrounding whitespace, in
    /// place and at most once per sheet.
    pub fn records(&mut self, options: &ParseOptions) -> Result<Records<'_>, SheetViewError> {
        let index = self.resolve_sheet(None)?;
        self.ensure_loaded(index)?;
        if options.clean {
            self.clean_sheet(index);
        }
        let (layout, last_row) = {
            let state = &mut self.sheets[index];
            let layout = header::resolve(state, &options.headers)?;
            let last_row = state
                .bounds()
                .map(|bounds| bounds.last_row)
                .unwrap_or(layout.row);
            (layout, last_row)
        };
        self.header_line = Some(layout.row);
        Ok(Records {
            cells: &self.sheets[index].cells,
            headers: layout.columns,
            next_row: layout.row + 1,
            last_row,
        })
    }

    /// `records` collected eagerly into an ordered sequence.
    pub fn parse(&mut self, options: &ParseOptions) -> Result<Vec<Record>, SheetViewError> {
        Ok(self.records(options)?.collect())
    }

    /// `records` collected eagerly, invoking `callback` for each record as
    /// it is collected.
    pub fn parse_with<F>(
        &mut self,
        options: &ParseOptions,
        mut callback: F,
    ) -> Result<Vec<Record>, SheetViewError>
    where
        F: FnMut(&Record),
    {
        let mut collected = Vec::new();
        for record in self.records(options)? {
            callback(&record);
            collected.push(record);
        }
        Ok(collected)
    }

    /// Strips non-ASCII characters and surrounding whitespace from every
    /// string cell of the sheet. Runs at most once per sheet.
    fn clean_sheet(&mut self, index: usize) {
        let state = &mut self.sheets[index];
        if state.cleaned {
            return;
        }
        for cell in state.cells.cells_mut() {
            if let CellValue::String(value) = &mut cell.value {
                let sanitized: String = value.chars().filter(|c| c.is_ascii()).collect();
                *value = sanitized.trim().to_owned();
            }
        }
        state.cleaned = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemorySource;
    use crate::workbook::cell::CellType;

    fn people_workbook() -> Workbook<MemorySource> {
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
        Workbook::open(source).unwrap()
    }

    #[test]
    fn rows_cover_the_full_extent_and_restart() {
        let mut workbook = people_workbook();
        let rows: Vec<_> = workbook.rows().unwrap().collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(
            rows[0],
            vec![
                CellValue::String("id".to_owned()),
                CellValue::String("name".to_owned())
            ]
        );
        // a second request restarts from row 1
        assert_eq!(workbook.rows().unwrap().count(), 3);
    }

    #[test]
    fn parse_with_first_row_headers() {
        let mut workbook = people_workbook();
        let records = workbook
            .parse(&ParseOptions::new().first_row_headers())
            .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["id"], CellValue::Float(1.0));
        assert_eq!(records[0]["name"], CellValue::String("Alice".to_owned()));
        assert_eq!(records[1]["name"], CellValue::String("Bob".to_owned()));
    }

    #[test]
    fn parse_with_explicit_labels() {
        let mut workbook = people_workbook();
        let records = workbook
            .parse(&ParseOptions::new().headers(vec![("key", "id"), ("who", "name")]))
            .unwrap();
        assert_eq!(records[1]["key"], CellValue::Float(2.0));
        assert_eq!(records[1]["who"], CellValue::String("Bob".to_owned()));
    }

    #[test]
    fn records_with_header_search_start_below_the_header() {
        let source = MemorySource::new().sheet(
            "Report",
            vec![
                (1, 1, CellValue::String("Quarterly report".to_owned()), CellType::String),
                (3, 1, CellValue::String("SKU".to_owned()), CellType::String),
                (3, 2, CellValue::String("Count".to_owned()), CellType::String),
                (4, 1, CellValue::String("A-1".to_owned()), CellType::String),
                (4, 2, CellValue::Float(12.0), CellType::Float),
            ],
        );
        let mut workbook = Workbook::open(source).unwrap();
        let records = workbook
            .parse(&ParseOptions::new().header_search(vec!["sku", "count"]))
            .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["SKU"], CellValue::String("A-1".to_owned()));
        assert_eq!(records[0]["Count"], CellValue::Float(12.0));
    }

    #[test]
    fn parse_with_invokes_the_callback_per_record() {
        let mut workbook = people_workbook();
        let mut seen = Vec::new();
        let records = workbook
            .parse_with(&ParseOptions::new().first_row_headers(), |record| {
                seen.push(record["name"].clone());
            })
            .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(
            seen,
            vec![
                CellValue::String("Alice".to_owned()),
                CellValue::String("Bob".to_owned())
            ]
        );
    }

    #[test]
    fn cleaning_is_in_place_and_idempotent() {
        let source = MemorySource::new().sheet(
            "Dirty",
            vec![
                (1, 1, CellValue::String("héader\u{a0}".to_owned()), CellType::String),
                (2, 1, CellValue::String("  value\t".to_owned()), CellType::String),
                (3, 1, CellValue::Float(1.5), CellType::Float),
            ],
        );
        let mut workbook = Workbook::open(source).unwrap();
        let options = ParseOptions::new().first_row_headers().clean();
        workbook.parse(&options).unwrap();
        assert_eq!(
            workbook.cell(1, 1, None).unwrap(),
            CellValue::String("hader".to_owned())
        );
        assert_eq!(
            workbook.cell(2, 1, None).unwrap(),
            CellValue::String("value".to_owned())
        );
        // non-string cells are untouched, and a second pass changes nothing
        workbook.parse(&options).unwrap();
        assert_eq!(workbook.cell(3, 1, None).unwrap(), CellValue::Float(1.5));
        assert_eq!(
            workbook.cell(2, 1, None).unwrap(),
            CellValue::String("value".to_owned())
        );
    }
}
