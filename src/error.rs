use thiserror::Error;

/// Error type for the cell-access layer.
///
/// Domain failures carry enough context to locate the offending coordinate or
/// query; failures inside the decoding collaborator are funneled through
/// [`SheetViewError::SourceError`].
#[derive(Error, Debug)]
pub enum SheetViewError {
    /// Malformed row/column input, or an ambiguous coordinate pair
    #[error("Invalid cell coordinate '{0}'")]
    InvalidCoordinate(String),

    /// Unknown sheet name or out-of-range sheet index
    #[error("Sheet not found: '{0}'")]
    SheetNotFound(String),

    /// Pattern search exhausted its scan window, or a label is absent from
    /// the header row
    #[error("Header not found: {0}")]
    HeaderNotFound(String),

    /// Export encountered a cell type it does not know how to render
    #[error("Unhandled cell type '{celltype}' at {position}")]
    UnhandledCellType { celltype: String, position: String },

    /// The decoding collaborator failed to deliver sheet data
    #[error("Spreadsheet source unavailable: {0}")]
    SourceError(#[from] anyhow::Error),

    // Standard library errors
    #[error("{0}")]
    IoError(#[from] std::io::Error),

    // Third-party library errors
    #[error("{0}")]
    PatternError(#[from] regex::Error),
}
