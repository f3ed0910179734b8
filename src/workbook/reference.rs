//! Conversions between spreadsheet column letters and 1-based numbers, and
//! normalization of the mixed argument forms callers pass for coordinates.

use crate::error::SheetViewError;
use regex::Regex;

/// A row or column argument: a 1-based number or a column-letter string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CoordArg {
    Index(u32),
    Letters(String),
}

impl From<u32> for CoordArg {
    fn from(value: u32) -> Self {
        Self::Index(value)
    }
}

impl From<&str> for CoordArg {
    fn from(value: &str) -> Self {
        Self::Letters(value.to_owned())
    }
}

impl From<String> for CoordArg {
    fn from(value: String) -> Self {
        Self::Letters(value)
    }
}

/// Interprets a base-26 alphabetic numeral as a 1-based column number
/// (A=1, Z=26, AA=27). Case-insensitive.
pub fn letter_to_number(letters: &str) -> Result<u32, SheetViewError> {
    if letters.is_empty() {
        return Err(SheetViewError::InvalidCoordinate(letters.to_owned()));
    }
    let mut number = 0u32;
    for character in letters.chars() {
        if !character.is_ascii_alphabetic() {
            return Err(SheetViewError::InvalidCoordinate(letters.to_owned()));
        }
        number = number * 26 + (character.to_ascii_uppercase() as u32 - 'A' as u32 + 1);
    }
    Ok(number)
}

/// Converts a 1-based column number to its canonical letter name.
pub fn number_to_letter(number: u32) -> Result<String, SheetViewError> {
    if number < 1 {
        return Err(SheetViewError::InvalidCoordinate(number.to_string()));
    }
    let mut number = number;
    let mut letters = String::new();
    while number > 0 {
        number -= 1;
        let digit = char::from(b'A' + (number % 26) as u8);
        letters.insert(0, digit);
        number /= 26;
    }
    Ok(letters)
}

/// Excel-style reference for a 1-based (row, column) pair, used in error
/// positions ("B5").
pub(crate) fn cell_reference(row: u32, col: u32) -> String {
    let mut col = col;
    let mut reference = String::new();
    while col > 0 {
        col -= 1;
        let digit = char::from(b'A' + (col % 26) as u8);
        reference.insert(0, digit);
        col /= 26;
    }
    reference.push_str(&row.to_string());
    reference
}

/// Normalizes a mixed (row, column) argument pair to numeric coordinates.
///
/// Spreadsheet notation allows the letter first ("B", 5 addresses column B,
/// row 5), so a letter row with a numeric column is swapped. Two letter
/// arguments are ambiguous and rejected, as are zero indexes.
pub(crate) fn normalize(row: CoordArg, col: CoordArg) -> Result<(u32, u32), SheetViewError> {
    let (row, col) = match (row, col) {
        (CoordArg::Index(row), CoordArg::Index(col)) => (row, col),
        (CoordArg::Index(row), CoordArg::Letters(letters)) => (row, letter_to_number(&letters)?),
        (CoordArg::Letters(letters), CoordArg::Index(row)) => (row, letter_to_number(&letters)?),
        (CoordArg::Letters(row), CoordArg::Letters(col)) => {
            return Err(SheetViewError::InvalidCoordinate(format!("{row}, {col}")));
        }
    };
    if row < 1 || col < 1 {
        return Err(SheetViewError::InvalidCoordinate(format!("{row}, {col}")));
    }
    Ok((row, col))
}

/// Parses an A1-style cell name with an optional sheet suffix
/// ("B5", "B5@Data") into (row, column, sheet).
pub(crate) fn parse_cell_name(name: &str) -> Result<(u32, u32, Option<String>), SheetViewError> {
    let pattern = Regex::new(r"^([A-Za-z]+)(\d+)(?:@(.+))?$").expect("Hardcode regex pattern");
    let captures = pattern
        .captures(name)
        .ok_or_else(|| SheetViewError::InvalidCoordinate(name.to_owned()))?;
    let col = letter_to_number(&captures[1])?;
    let row = captures[2]
        .parse::<u32>()
        .map_err(|_| SheetViewError::InvalidCoordinate(name.to_owned()))?;
    if row < 1 {
        return Err(SheetViewError::InvalidCoordinate(name.to_owned()));
    }
    let sheet = captures.get(3).map(|sheet| sheet.as_str().to_owned());
    Ok((row, col, sheet))
}
