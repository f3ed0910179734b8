//! # Sheetview
//!
//! A uniform, coordinate-addressed view over multi-sheet spreadsheet
//! documents. Format-specific decoders feed cells through the [`CellSource`]
//! trait; this crate provides everything above that seam.
//!
//! ## Features
//!
//! - **Sparse cell storage**: only populated coordinates are held; absence is
//!   the empty sentinel, never an error
//! - **Lazy loading**: each sheet is decoded exactly once, on first access
//! - **Dimension queries**: bounding-box discovery with cached, invalidated
//!   recomputation
//! - **Header handling**: first-row headers, explicit labels, or fuzzy
//!   wildcard search across the first hundred rows
//! - **Row projection**: iterate rows as arrays or as header-keyed records
//! - **Queries**: row lookup by index or by equality conditions against
//!   header-resolved columns
//! - **Export**: CSV, XML, YAML-like text and dense matrices through one
//!   type-aware cell formatter
//!
//! ## Example
//!
//! ```
//! use sheetview::{CellValue, MemorySource, ParseOptions, Workbook};
//!
//! let source = MemorySource::new().sheet_from_rows("Sheet1", vec![
//!     vec![CellValue::String("id".into()), CellValue::String("name".into())],
//!     vec![CellValue::Float(1.0), CellValue::String("Alice".into())],
//! ]);
//! let mut workbook = Workbook::open(source).unwrap();
//! let records = workbook.parse(&ParseOptions::new().first_row_headers()).unwrap();
//! assert_eq!(records[0]["name"], CellValue::String("Alice".into()));
//! ```

mod error;
mod export;
mod source;
mod workbook;

pub use crate::error::SheetViewError;
pub use crate::source::{CellSource, MemorySource};
pub use crate::workbook::cell::{CellType, CellValue};
pub use crate::workbook::header::{HeaderSpec, ParseOptions};
pub use crate::workbook::records::{Record, Records, Rows};
pub use crate::workbook::reference::{letter_to_number, number_to_letter, CoordArg};
pub use crate::workbook::sheet::{Bounds, SheetCells};
pub use crate::workbook::Workbook;
