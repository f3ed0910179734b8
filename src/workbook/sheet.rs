//! Sparse per-sheet cell storage and the lazily cached sheet state.

use crate::workbook::cell::{CellType, CellValue};
use std::collections::HashMap;

/// Minimal rectangle enclosing all populated cells of a sheet, 1-based and
/// inclusive on both axes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Bounds {
    pub first_row: u32,
    pub last_row: u32,
    pub first_column: u32,
    pub last_column: u32,
}

/// One populated cell: its value together with the declared type tag.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Cell {
    pub(crate) value: CellValue,
    pub(crate) celltype: CellType,
}

/// Sparse coordinate-indexed storage for one sheet.
///
/// Only populated coordinates hold entries. Querying an absent coordinate
/// yields the empty sentinel, never an error.
#[derive(Debug, Default)]
pub struct SheetCells {
    cells: HashMap<(u32, u32), Cell>,
}

impl SheetCells {
    /// Stores a value and its type tag, replacing any previous entry at the
    /// coordinate. Other coordinates are never disturbed.
    pub fn set(&mut self, row: u32, col: u32, value: CellValue, celltype: CellType) {
        self.cells.insert((row, col), Cell { value, celltype });
    }

    /// Value at (row, col), or the empty sentinel.
    pub fn value(&self, row: u32, col: u32) -> CellValue {
        self.cells
            .get(&(row, col))
            .map(|cell| cell.value.clone())
            .unwrap_or(CellValue::Empty)
    }

    /// Type tag at (row, col), or the empty tag.
    pub fn celltype(&self, row: u32, col: u32) -> CellType {
        self.cells
            .get(&(row, col))
            .map(|cell| cell.celltype)
            .unwrap_or(CellType::Empty)
    }

    pub(crate) fn get(&self, row: u32, col: u32) -> Option<&Cell> {
        self.cells.get(&(row, col))
    }

    pub(crate) fn cells_mut(&mut self) -> impl Iterator<Item = &mut Cell> + '_ {
        self.cells.values_mut()
    }

    /// Populated coordinates, in no particular order.
    pub fn coordinates(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.cells.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Scans all populated coordinates once, tracking row and column
    /// extremes independently. No cells means no bounds.
    pub(crate) fn compute_bounds(&self) -> Option<Bounds> {
        let mut result = None::<Bounds>;
        for (row, col) in self.coordinates() {
            result = Some(match result {
                None => Bounds {
                    first_row: row,
                    last_row: row,
                    first_column: col,
                    last_column: col,
                },
                Some(bounds) => Bounds {
                    first_row: bounds.first_row.min(row),
                    last_row: bounds.last_row.max(row),
                    first_column: bounds.first_column.min(col),
                    last_column: bounds.last_column.max(col),
                },
            });
        }
        result
    }
}

/// Cached bounding-box state for a sheet.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
enum BoundsCache {
    #[default]
    Stale,
    Computed(Option<Bounds>),
}

/// Per-sheet state: the sparse store plus its lazy caches.
///
/// Transitions: `loaded` flips once (unloaded to loaded), `cleaned` flips
/// once, and the bounds cache moves stale → computed, restaled by any write
/// and by selecting the sheet as current.
#[derive(Debug)]
pub(crate) struct SheetState {
    pub(crate) name: String,
    pub(crate) cells: SheetCells,
    bounds: BoundsCache,
    pub(crate) loaded: bool,
    pub(crate) cleaned: bool,
}

impl SheetState {
    pub(crate) fn new(name: &str) -> Self {
        SheetState {
            name: name.to_owned(),
            cells: SheetCells::default(),
            bounds: BoundsCache::Stale,
            loaded: false,
            cleaned: false,
        }
    }

    /// Bounding box, recomputed on the first query after any invalidating
    /// event and cached until the next one.
    pub(crate) fn bounds(&mut self) -> Option<Bounds> {
        if let BoundsCache::Computed(bounds) = self.bounds {
            return bounds;
        }
        let bounds = self.cells.compute_bounds();
        self.bounds = BoundsCache::Computed(bounds);
        bounds
    }

    pub(crate) fn invalidate_bounds(&mut self) {
        self.bounds = BoundsCache::Stale;
    }

    /// Writes through to the store; any mutation restales the bounds.
    pub(crate) fn set(&mut self, row: u32, col: u32, value: CellValue, celltype: CellType) {
        self.cells.set(row, col, value, celltype);
        self.invalidate_bounds();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn push(state: &mut SheetState, row: u32, col: u32) {
        state.set(
            row,
            col,
            CellValue::String(String::new()),
            CellType::String,
        );
    }

    #[test]
    fn store_replaces_value_and_type_together() {
        let mut cells = SheetCells::default();
        cells.set(1, 1, CellValue::Float(1.0), CellType::Float);
        cells.set(1, 1, CellValue::String("x".to_owned()), CellType::String);
        assert_eq!(cells.value(1, 1), CellValue::String("x".to_owned()));
        assert_eq!(cells.celltype(1, 1), CellType::String);
        assert_eq!(cells.len(), 1);
    }

    #[test]
    fn absent_coordinates_read_as_empty() {
        let cells = SheetCells::default();
        assert_eq!(cells.value(100, 100), CellValue::Empty);
        assert_eq!(cells.celltype(100, 100), CellType::Empty);
    }

    #[test]
    fn bounds_track_axes_independently() {
        let mut state = SheetState::new("");
        push(&mut state, 3, 1);
        push(&mut state, 1, 3);
        let bounds = state.bounds().unwrap();
        assert_eq!(bounds.first_row, 1);
        assert_eq!(bounds.last_row, 3);
        assert_eq!(bounds.first_column, 1);
        assert_eq!(bounds.last_column, 3);
    }

    #[test]
    fn empty_sheet_has_no_bounds() {
        let mut state = SheetState::new("");
        assert_eq!(state.bounds(), None);
    }

    #[test]
    fn write_restales_cached_bounds() {
        let mut state = SheetState::new("");
        push(&mut state, 2, 2);
        assert_eq!(state.bounds().unwrap().last_row, 2);
        push(&mut state, 5, 7);
        let bounds = state.bounds().unwrap();
        assert_eq!(bounds.last_row, 5);
        assert_eq!(bounds.last_column, 7);
    }
}
