//! Type-aware rendering of cell values for textual export.

use crate::error::SheetViewError;
use crate::workbook::cell::{format_float, CellType, CellValue};

/// Double-quotes text, doubling any embedded quotes.
fn quote(text: &str) -> String {
    format!("\"{}\"", text.replace('"', "\"\""))
}

/// Empty strings stay empty, anything else is quoted.
fn quote_nonempty(text: &str) -> String {
    if text.is_empty() {
        String::new()
    } else {
        quote(text)
    }
}

/// Elapsed seconds rendered as HH:MM:SS, by floor division.
pub(crate) fn seconds_to_time_string(total: i64) -> String {
    let hours = total / 3600;
    let minutes = total / 60 % 60;
    let seconds = total % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

/// Renders one cell according to its declared type tag.
///
/// Formula cells dispatch on the runtime type of their evaluated result and
/// only accept string, float and date results there; anything else aborts
/// the export rather than producing partial output.
pub(crate) fn format_cell(
    value: &CellValue,
    celltype: CellType,
    position: &str,
) -> Result<String, SheetViewError> {
    if value.is_empty() {
        return Ok(String::new());
    }
    let text = match celltype {
        CellType::Empty => String::new(),
        CellType::String => quote_nonempty(&value.to_string()),
        CellType::Boolean => quote(&value.to_string()),
        CellType::Float | CellType::Percentage => match value {
            CellValue::Float(number) => format_float(*number),
            other => other.to_string(),
        },
        CellType::Formula => match value {
            CellValue::String(text) => quote_nonempty(text),
            CellValue::Float(number) => format_float(*number),
            CellValue::Date(date) => date.to_string(),
            other => {
                return Err(SheetViewError::UnhandledCellType {
                    celltype: format!("formula:{}", other.infer_type().as_str()),
                    position: position.to_owned(),
                });
            }
        },
        CellType::Date | CellType::DateTime => value.to_string(),
        CellType::Time => match value {
            CellValue::Time(seconds) => seconds_to_time_string(*seconds),
            other => other.to_string(),
        },
        CellType::Link => match value {
            CellValue::Link { url, .. } => quote(url),
            other => quote(&other.to_string()),
        },
    };
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn render(value: CellValue, celltype: CellType) -> String {
        format_cell(&value, celltype, "A1").unwrap()
    }

    #[test]
    fn integral_floats_collapse_to_integer_text() {
        assert_eq!(render(CellValue::Float(5.0), CellType::Float), "5");
        assert_eq!(render(CellValue::Float(5.25), CellType::Float), "5.25");
        assert_eq!(render(CellValue::Float(0.5), CellType::Percentage), "0.5");
        assert_eq!(render(CellValue::Float(-3.0), CellType::Float), "-3");
    }

    #[test]
    fn strings_are_quoted_with_doubled_quotes() {
        assert_eq!(
            render(
                CellValue::String("He said \"hi\"".to_owned()),
                CellType::String
            ),
            "\"He said \"\"hi\"\"\""
        );
        assert_eq!(
            render(CellValue::String("plain".to_owned()), CellType::String),
            "\"plain\""
        );
        assert_eq!(
            render(CellValue::String(String::new()), CellType::String),
            ""
        );
    }

    #[test]
    fn booleans_render_lowercase_and_quoted() {
        assert_eq!(render(CellValue::Bool(true), CellType::Boolean), "\"true\"");
        assert_eq!(
            render(CellValue::Bool(false), CellType::Boolean),
            "\"false\""
        );
    }

    #[test]
    fn seconds_render_as_clock_text() {
        assert_eq!(seconds_to_time_string(7506), "02:05:06");
        assert_eq!(seconds_to_time_string(0), "00:00:00");
        assert_eq!(seconds_to_time_string(86399), "23:59:59");
        assert_eq!(render(CellValue::Time(7506), CellType::Time), "02:05:06");
    }

    #[test]
    fn dates_use_their_default_text() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(render(CellValue::Date(date), CellType::Date), "2024-03-05");
        let datetime = date.and_hms_opt(10, 30, 0).unwrap();
        assert_eq!(
            render(CellValue::DateTime(datetime), CellType::DateTime),
            "2024-03-05 10:30:00"
        );
    }

    #[test]
    fn links_render_their_target_url() {
        assert_eq!(
            render(
                CellValue::Link {
                    url: "https://example.com".to_owned(),
                    text: "Example".to_owned()
                },
                CellType::Link
            ),
            "\"https://example.com\""
        );
    }

    #[test]
    fn formulas_dispatch_on_their_evaluated_result() {
        assert_eq!(render(CellValue::Float(8.0), CellType::Formula), "8");
        assert_eq!(
            render(CellValue::String("total".to_owned()), CellType::Formula),
            "\"total\""
        );
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(
            render(CellValue::Date(date), CellType::Formula),
            "2024-01-01"
        );
    }

    #[test]
    fn formula_with_unsupported_result_is_fatal() {
        let result = format_cell(&CellValue::Bool(true), CellType::Formula, "C3");
        assert!(matches!(
            result,
            Err(SheetViewError::UnhandledCellType { .. })
        ));
    }

    #[test]
    fn empty_cells_render_as_empty_text() {
        assert_eq!(render(CellValue::Empty, CellType::Float), "");
        assert_eq!(render(CellValue::Empty, CellType::Formula), "");
    }
}
