//! XML export of the whole document via quick-xml's event writer.

use crate::error::SheetViewError;
use crate::source::CellSource;
use crate::workbook::Workbook;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

impl<S: CellSource> Workbook<S> {
    /// Serializes every sheet as nested document → sheet → cell elements.
    ///
    /// Cell elements carry row, column and type tag as attributes and the
    /// raw value as content; a sheet without populated cells emits an empty
    /// element. Sheets are visited through the current-sheet pointer, which
    /// is restored on every exit path, also when a sheet fails to load.
    pub fn to_xml(&mut self) -> Result<String, SheetViewError> {
        let mut writer = Writer::new(Vec::new());
        let saved = self.current;
        let outcome: Result<(), SheetViewError> = (|| {
            writer.write_event(Event::Start(BytesStart::new("spreadsheet")))?;
            for index in 0..self.sheets.len() {
                self.select_sheet_at(index)?;
                self.write_sheet_xml(&mut writer, index)?;
            }
            writer.write_event(Event::End(BytesEnd::new("spreadsheet")))?;
            Ok(())
        })();
        self.current = saved;
        outcome?;
        Ok(String::from_utf8(writer.into_inner()).expect("XML output is UTF-8"))
    }

    fn write_sheet_xml(
        &mut self,
        writer: &mut Writer<Vec<u8>>,
        index: usize,
    ) -> Result<(), SheetViewError> {
        self.ensure_loaded(index)?;
        let state = &mut self.sheets[index];
        let bounds = state.bounds();
        let mut element = BytesStart::new("sheet");
        element.push_attribute(("name", state.name.as_str()));
        let Some(bounds) = bounds else {
            writer.write_event(Event::Empty(element))?;
            return Ok(());
        };
        writer.write_event(Event::Start(element))?;
        for row in bounds.first_row..=bounds.last_row {
            for col in bounds.first_column..=bounds.last_column {
                let Some(cell) = state.cells.get(row, col) else {
                    continue;
                };
                if cell.value.is_empty() {
                    continue;
                }
                let mut start = BytesStart::new("cell");
                start.push_attribute(("row", row.to_string().as_str()));
                start.push_attribute(("column", col.to_string().as_str()));
                start.push_attribute(("type", cell.celltype.as_str()));
                writer.write_event(Event::Start(start))?;
                writer.write_event(Event::Text(BytesText::new(&cell.value.to_string())))?;
                writer.write_event(Event::End(BytesEnd::new("cell")))?;
            }
        }
        writer.write_event(Event::End(BytesEnd::new("sheet")))?;
        Ok(())
    }
}
