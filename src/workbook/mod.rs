//! # Workbook Access Layer
//!
//! The document-level surface of the crate: an ordered sheet registry with a
//! mutable current-sheet pointer, coordinate-addressed cell access, dimension
//! queries over cached bounding boxes, and row/column materialization. Cells
//! arrive lazily from the [`CellSource`](crate::source::CellSource)
//! collaborator, exactly once per sheet.

pub(crate) mod cell;
pub(crate) mod find;
pub(crate) mod header;
pub(crate) mod records;
pub(crate) mod reference;
pub(crate) mod sheet;

use crate::error::SheetViewError;
use crate::source::CellSource;
use crate::workbook::cell::{CellType, CellValue};
use crate::workbook::reference::CoordArg;
use crate::workbook::sheet::{Bounds, SheetState};

/// A multi-sheet document bound to one decoding source.
///
/// The current-sheet pointer is the only document-wide mutable default:
/// every operation that omits an explicit sheet argument reads it. Internal
/// multi-sheet scans (`info`, `to_xml`) switch it temporarily and restore it
/// on every exit path.
pub struct Workbook<S: CellSource> {
    source: S,
    pub(crate) sheets: Vec<SheetState>,
    pub(crate) current: usize,
    /// Header row remembered from the last header-resolving iteration,
    /// consumed by index-based `find`. `None` until a header is resolved.
    pub(crate) header_line: Option<u32>,
}

impl<S: CellSource> Workbook<S> {
    /// Opens a document: discovers its sheets and selects the first one.
    pub fn open(mut source: S) -> Result<Self, SheetViewError> {
        let names = source.list_sheets()?;
        let sheets = names.iter().map(|name| SheetState::new(name)).collect();
        Ok(Workbook {
            source,
            sheets,
            current: 0,
            header_line: None,
        })
    }

    /// Names of all sheets, in document order.
    pub fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|sheet| sheet.name.clone()).collect()
    }

    /// Name of the current sheet.
    pub fn current_sheet(&self) -> Result<&str, SheetViewError> {
        self.sheets
            .get(self.current)
            .map(|sheet| sheet.name.as_str())
            .ok_or_else(|| SheetViewError::SheetNotFound(self.current.to_string()))
    }

    /// Switches the current sheet by name.
    ///
    /// Selecting a sheet forces its bounding box to be recomputed on the
    /// next dimension query; bounds of the previously current sheet are
    /// left untouched.
    pub fn select_sheet(&mut self, name: &str) -> Result<(), SheetViewError> {
        let index = self.index_of(name)?;
        self.select_sheet_at(index)
    }

    /// Switches the current sheet by 0-based position.
    pub fn select_sheet_at(&mut self, index: usize) -> Result<(), SheetViewError> {
        if index >= self.sheets.len() {
            return Err(SheetViewError::SheetNotFound(index.to_string()));
        }
        self.current = index;
        self.sheets[index].invalidate_bounds();
        Ok(())
    }

    fn index_of(&self, name: &str) -> Result<usize, SheetViewError> {
        self.sheets
            .iter()
            .position(|sheet| sheet.name == name)
            .ok_or_else(|| SheetViewError::SheetNotFound(name.to_owned()))
    }

    /// Resolves an optional sheet argument, defaulting to the current sheet.
    pub(crate) fn resolve_sheet(&self, sheet: Option<&str>) -> Result<usize, SheetViewError> {
        match sheet {
            Some(name) => self.index_of(name),
            None if self.current < self.sheets.len() => Ok(self.current),
            None => Err(SheetViewError::SheetNotFound(self.current.to_string())),
        }
    }

    /// Loads a sheet's cells from the source; idempotent per sheet.
    pub(crate) fn ensure_loaded(&mut self, index: usize) -> Result<(), SheetViewError> {
        let Self { source, sheets, .. } = self;
        let state = &mut sheets[index];
        if !state.loaded {
            source.read_cells(&state.name, &mut state.cells)?;
            state.loaded = true;
            state.invalidate_bounds();
            log::debug!(
                "loaded {} cells from sheet '{}'",
                state.cells.len(),
                state.name
            );
        }
        Ok(())
    }

    pub(crate) fn loaded_sheet(
        &mut self,
        sheet: Option<&str>,
    ) -> Result<&mut SheetState, SheetViewError> {
        let index = self.resolve_sheet(sheet)?;
        self.ensure_loaded(index)?;
        Ok(&mut self.sheets[index])
    }

    /// Value at a coordinate. Arguments accept numbers or column letters in
    /// either order: `cell(5, "B", None)` and `cell("B", 5, None)` both
    /// address cell B5.
    pub fn cell(
        &mut self,
        row: impl Into<CoordArg>,
        col: impl Into<CoordArg>,
        sheet: Option<&str>,
    ) -> Result<CellValue, SheetViewError> {
        let (row, col) = reference::normalize(row.into(), col.into())?;
        Ok(self.loaded_sheet(sheet)?.cells.value(row, col))
    }

    /// Type tag at a coordinate.
    pub fn cell_type(
        &mut self,
        row: impl Into<CoordArg>,
        col: impl Into<CoordArg>,
        sheet: Option<&str>,
    ) -> Result<CellType, SheetViewError> {
        let (row, col) = reference::normalize(row.into(), col.into())?;
        Ok(self.loaded_sheet(sheet)?.cells.celltype(row, col))
    }

    /// True when the coordinate holds no value.
    pub fn empty(
        &mut self,
        row: impl Into<CoordArg>,
        col: impl Into<CoordArg>,
        sheet: Option<&str>,
    ) -> Result<bool, SheetViewError> {
        Ok(self.cell(row, col, sheet)?.is_empty())
    }

    /// Value addressed spreadsheet-style: `"B5"`, or `"B5@Data"` to name a
    /// sheet explicitly.
    pub fn cell_named(&mut self, name: &str) -> Result<CellValue, SheetViewError> {
        let (row, col, sheet) = reference::parse_cell_name(name)?;
        Ok(self.loaded_sheet(sheet.as_deref())?.cells.value(row, col))
    }

    /// Type tag addressed spreadsheet-style.
    pub fn cell_type_named(&mut self, name: &str) -> Result<CellType, SheetViewError> {
        let (row, col, sheet) = reference::parse_cell_name(name)?;
        Ok(self.loaded_sheet(sheet.as_deref())?.cells.celltype(row, col))
    }

    /// Writes a value, inferring its type tag from the value variant.
    pub fn set(
        &mut self,
        row: impl Into<CoordArg>,
        col: impl Into<CoordArg>,
        value: CellValue,
        sheet: Option<&str>,
    ) -> Result<(), SheetViewError> {
        let (row, col) = reference::normalize(row.into(), col.into())?;
        let celltype = value.infer_type();
        self.loaded_sheet(sheet)?.set(row, col, value, celltype);
        Ok(())
    }

    /// Minimal rectangle enclosing all populated cells, `None` for a sheet
    /// without any.
    pub fn bounds(&mut self, sheet: Option<&str>) -> Result<Option<Bounds>, SheetViewError> {
        Ok(self.loaded_sheet(sheet)?.bounds())
    }

    pub fn first_row(&mut self, sheet: Option<&str>) -> Result<Option<u32>, SheetViewError> {
        Ok(self.bounds(sheet)?.map(|bounds| bounds.first_row))
    }

    pub fn last_row(&mut self, sheet: Option<&str>) -> Result<Option<u32>, SheetViewError> {
        Ok(self.bounds(sheet)?.map(|bounds| bounds.last_row))
    }

    pub fn first_column(&mut self, sheet: Option<&str>) -> Result<Option<u32>, SheetViewError> {
        Ok(self.bounds(sheet)?.map(|bounds| bounds.first_column))
    }

    pub fn last_column(&mut self, sheet: Option<&str>) -> Result<Option<u32>, SheetViewError> {
        Ok(self.bounds(sheet)?.map(|bounds| bounds.last_column))
    }

    pub fn first_column_as_letter(
        &mut self,
        sheet: Option<&str>,
    ) -> Result<Option<String>, SheetViewError> {
        self.first_column(sheet)?
            .map(reference::number_to_letter)
            .transpose()
    }

    pub fn last_column_as_letter(
        &mut self,
        sheet: Option<&str>,
    ) -> Result<Option<String>, SheetViewError> {
        self.last_column(sheet)?
            .map(reference::number_to_letter)
            .transpose()
    }

    /// Materializes row `n` across the sheet's column range, substituting
    /// absence with the empty sentinel. An empty sheet yields an empty
    /// sequence.
    pub fn row(&mut self, n: u32, sheet: Option<&str>) -> Result<Vec<CellValue>, SheetViewError> {
        let state = self.loaded_sheet(sheet)?;
        let Some(bounds) = state.bounds() else {
            return Ok(Vec::new());
        };
        Ok((bounds.first_column..=bounds.last_column)
            .map(|col| state.cells.value(n, col))
            .collect())
    }

    /// Materializes a column across the sheet's row range. Accepts a numeric
    /// index or a column letter.
    pub fn column(
        &mut self,
        col: impl Into<CoordArg>,
        sheet: Option<&str>,
    ) -> Result<Vec<CellValue>, SheetViewError> {
        let col = match col.into() {
            CoordArg::Index(col) if col >= 1 => col,
            CoordArg::Index(col) => {
                return Err(SheetViewError::InvalidCoordinate(col.to_string()));
            }
            CoordArg::Letters(letters) => reference::letter_to_number(&letters)?,
        };
        let state = self.loaded_sheet(sheet)?;
        let Some(bounds) = state.bounds() else {
            return Ok(Vec::new());
        };
        Ok((bounds.first_row..=bounds.last_row)
            .map(|row| state.cells.value(row, col))
            .collect())
    }

    /// Human-readable summary: sheet count, names, and each sheet's occupied
    /// dimensions. Visits every sheet through the current-sheet pointer and
    /// restores it afterwards, also when a sheet fails to load.
    pub fn info(&mut self) -> Result<String, SheetViewError> {
        let names = self.sheet_names();
        let mut result = format!(
            "Number of sheets: {}\nSheets: {}\n",
            names.len(),
            names.join(", ")
        );
        let saved = self.current;
        let outcome: Result<(), SheetViewError> = (|| {
            for (number, name) in names.iter().enumerate() {
                self.select_sheet(name)?;
                result.push_str(&format!("\nSheet {}:\n", number + 1));
                match self.bounds(None)? {
                    Some(bounds) => {
                        result.push_str(&format!("  First row: {}\n", bounds.first_row));
                        result.push_str(&format!("  Last row: {}\n", bounds.last_row));
                        result.push_str(&format!(
                            "  First column: {}\n",
                            reference::number_to_letter(bounds.first_column)?
                        ));
                        result.push_str(&format!(
                            "  Last column: {}\n",
                            reference::number_to_letter(bounds.last_column)?
                        ));
                    }
                    None => result.push_str("  Sheet is empty\n"),
                }
            }
            Ok(())
        })();
        self.current = saved;
        outcome?;
        Ok(result)
    }
}
