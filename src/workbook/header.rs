//! Header-row discovery and header-keyed column mapping.
//!
//! Three mutually exclusive modes drive record iteration: the sheet's first
//! occupied row, explicit (key, header text) labels located by pattern
//! search, or a bare wildcard search whose matched texts become the keys.
//! Patterns split on `*` into ordered alternatives; each alternative is
//! matched case-insensitively as a regular expression against cell text, and
//! an earlier alternative beats a later one even when both would match.

use crate::error::SheetViewError;
use crate::source::CellSource;
use crate::workbook::sheet::SheetState;
use crate::workbook::Workbook;
use regex::{Regex, RegexBuilder};

/// How many rows the pattern search inspects before giving up.
const SEARCH_ROW_LIMIT: u32 = 100;

/// Header configuration for record iteration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum HeaderSpec {
    /// No header handling; use plain row iteration instead.
    #[default]
    None,
    /// The sheet's first occupied row holds the field names.
    FirstRow,
    /// Explicit (logical key, header text) pairs; header texts may carry
    /// `*`-separated alternatives.
    Labels(Vec<(String, String)>),
    /// Locate the header row by wildcard patterns; record keys are the
    /// matched header texts.
    Search(Vec<String>),
}

/// Options accepted by record iteration and parsing.
#[derive(Clone, Debug, Default)]
pub struct ParseOptions {
    pub(crate) headers: HeaderSpec,
    pub(crate) clean: bool,
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Treats the sheet's first occupied row as the header row.
    pub fn first_row_headers(mut self) -> Self {
        self.headers = HeaderSpec::FirstRow;
        self
    }

    /// Maps logical keys to header texts located by pattern search.
    pub fn headers<K, V>(mut self, labels: Vec<(K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.headers = HeaderSpec::Labels(
            labels
                .into_iter()
                .map(|(key, text)| (key.into(), text.into()))
                .collect(),
        );
        self
    }

    /// Locates the header row by wildcard patterns.
    pub fn header_search<P: Into<String>>(mut self, patterns: Vec<P>) -> Self {
        self.headers = HeaderSpec::Search(patterns.into_iter().map(Into::into).collect());
        self
    }

    /// Strips non-ASCII characters and surrounding whitespace from every
    /// string cell of the sheet before iterating.
    pub fn clean(mut self) -> Self {
        self.clean = true;
        self
    }
}

/// A resolved header row: its row number plus the key → column mapping in
/// insertion order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct HeaderLayout {
    pub(crate) row: u32,
    pub(crate) columns: Vec<(String, u32)>,
}

impl HeaderLayout {
    /// Duplicate keys collapse to one entry: the first insertion keeps its
    /// position, the last written column wins.
    fn insert(&mut self, key: String, col: u32) {
        if let Some(entry) = self.columns.iter_mut().find(|(existing, _)| *existing == key) {
            entry.1 = col;
        } else {
            self.columns.push((key, col));
        }
    }

    pub(crate) fn column_of(&self, key: &str) -> Option<u32> {
        self.columns
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, col)| *col)
    }
}

/// One query pattern: ordered alternatives split on `*`.
struct Query {
    alternatives: Vec<Regex>,
}

impl Query {
    fn compile(pattern: &str) -> Result<Self, SheetViewError> {
        let mut alternatives = Vec::new();
        for alternative in pattern.split('*').filter(|part| !part.is_empty()) {
            let regex = RegexBuilder::new(alternative)
                .case_insensitive(true)
                .build()?;
            alternatives.push(regex);
        }
        Ok(Query { alternatives })
    }

    /// The first alternative that matches any cell wins; within one
    /// alternative cells are scanned left to right.
    fn find_match<'a>(&self, row: &'a [(u32, String)]) -> Option<(&'a str, u32)> {
        for alternative in &self.alternatives {
            for (col, text) in row {
                if alternative.is_match(text) {
                    return Some((text.as_str(), *col));
                }
            }
        }
        None
    }
}

/// Populated cells of one row as (column, text), left to right.
fn row_texts(state: &mut SheetState, row: u32) -> Vec<(u32, String)> {
    let Some(bounds) = state.bounds() else {
        return Vec::new();
    };
    (bounds.first_column..=bounds.last_column)
        .filter_map(|col| {
            state
                .cells
                .get(row, col)
                .map(|cell| (col, cell.value.to_string()))
        })
        .collect()
}

/// Scans rows 1 up to the search limit for the first row on which every
/// query resolves to some cell. Returns the row number and the matched
/// (text, column) per query, in query order.
fn search_row(
    state: &mut SheetState,
    queries: &[Query],
) -> Result<(u32, Vec<(String, u32)>), SheetViewError> {
    let last = state
        .bounds()
        .map(|bounds| bounds.last_row.min(SEARCH_ROW_LIMIT))
        .unwrap_or(0);
    for row in 1..=last {
        let texts = row_texts(state, row);
        let mut matched = Vec::with_capacity(queries.len());
        for query in queries {
            match query.find_match(&texts) {
                Some((text, col)) => matched.push((text.to_owned(), col)),
                None => break,
            }
        }
        if matched.len() == queries.len() {
            return Ok((row, matched));
        }
    }
    log::warn!("header search gave up after row {last}");
    Err(SheetViewError::HeaderNotFound(format!(
        "no row within the first {SEARCH_ROW_LIMIT} rows satisfies every header query"
    )))
}

/// Column number of `label` in the header row, scanning cell text from the
/// first column.
pub(crate) fn header_index(
    state: &mut SheetState,
    header_row: u32,
    label: &str,
) -> Result<u32, SheetViewError> {
    let bounds = state.bounds().ok_or_else(|| {
        SheetViewError::HeaderNotFound(format!("'{label}' is not present in the header row"))
    })?;
    (bounds.first_column..=bounds.last_column)
        .find(|col| state.cells.value(header_row, *col).to_string() == label)
        .ok_or_else(|| {
            SheetViewError::HeaderNotFound(format!("'{label}' is not present in the header row"))
        })
}

fn first_row_layout(state: &mut SheetState) -> Result<HeaderLayout, SheetViewError> {
    let Some(bounds) = state.bounds() else {
        return Err(SheetViewError::HeaderNotFound(
            "sheet has no occupied header row".to_owned(),
        ));
    };
    let mut layout = HeaderLayout {
        row: bounds.first_row,
        columns: Vec::new(),
    };
    for col in bounds.first_column..=bounds.last_column {
        let text = state.cells.value(bounds.first_row, col).to_string();
        layout.insert(text, col);
    }
    Ok(layout)
}

fn labels_layout(
    state: &mut SheetState,
    labels: &[(String, String)],
) -> Result<HeaderLayout, SheetViewError> {
    let queries = labels
        .iter()
        .map(|(_, text)| Query::compile(text))
        .collect::<Result<Vec<_>, _>>()?;
    let (row, matched) = search_row(state, &queries)?;
    let mut layout = HeaderLayout {
        row,
        columns: Vec::new(),
    };
    for ((key, _), (text, _)) in labels.iter().zip(&matched) {
        let col = header_index(state, row, text)?;
        layout.insert(key.clone(), col);
    }
    Ok(layout)
}

fn search_layout(state: &mut SheetState, patterns: &[String]) -> Result<HeaderLayout, SheetViewError> {
    let queries = patterns
        .iter()
        .map(|pattern| Query::compile(pattern))
        .collect::<Result<Vec<_>, _>>()?;
    let (row, matched) = search_row(state, &queries)?;
    let mut layout = HeaderLayout {
        row,
        columns: Vec::new(),
    };
    for (text, col) in matched {
        layout.insert(text, col);
    }
    Ok(layout)
}

/// Resolves the header layout for a sheet under the given mode.
pub(crate) fn resolve(
    state: &mut SheetState,
    mode: &HeaderSpec,
) -> Result<HeaderLayout, SheetViewError> {
    match mode {
        HeaderSpec::None => Err(SheetViewError::HeaderNotFound(
            "no header configuration given".to_owned(),
        )),
        HeaderSpec::FirstRow => first_row_layout(state),
        HeaderSpec::Labels(labels) => labels_layout(state, labels),
        HeaderSpec::Search(patterns) => search_layout(state, patterns),
    }
}

impl<S: CellSource> Workbook<S> {
    /// Column number of `label` in the header row: the remembered header
    /// line when one has been resolved, otherwise the sheet's first
    /// occupied row.
    pub fn header_index(&mut self, label: &str) -> Result<u32, SheetViewError> {
        let line = self.header_line;
        let state = self.loaded_sheet(None)?;
        let row = match line {
            Some(row) => row,
            None => state.bounds().map(|bounds| bounds.first_row).ok_or_else(|| {
                SheetViewError::HeaderNotFound(format!(
                    "'{label}' is not present in the header row"
                ))
            })?,
        };
        header_index(state, row, label)
    }

    /// Finds the first row satisfying every wildcard pattern and returns its
    /// row number. At most the first hundred rows are inspected.
    pub fn header_row(&mut self, patterns: &[&str]) -> Result<u32, SheetViewError> {
        let queries = patterns
            .iter()
            .map(|pattern| Query::compile(pattern))
            .collect::<Result<Vec<_>, _>>()?;
        let state = self.loaded_sheet(None)?;
        let (row, _) = search_row(state, &queries)?;
        Ok(row)
    }
}
