// The xlsx backend of the district reports.

use std::path::Path;

use rust_xlsxwriter::{Workbook, XlsxError};
use voter_history::report::ReportSink;

/// A worksheet of string cells, saved as a single-sheet workbook.
///
/// The worksheet runs in constant memory mode: each row is flushed to a temporary
/// file once a later row is started, so rows must be written in increasing order.
/// The report file is only created by `save`: dropping the sheet discards it.
pub struct XlsxSheet {
    workbook: Workbook,
}

impl XlsxSheet {
    pub fn new(name: &str) -> Result<XlsxSheet, XlsxError> {
        let mut workbook = Workbook::new();
        workbook.add_worksheet_with_constant_memory().set_name(name)?;
        Ok(XlsxSheet { workbook })
    }

    pub fn save(mut self, path: &Path) -> Result<(), XlsxError> {
        self.workbook.save(path)
    }
}

impl ReportSink for XlsxSheet {
    type Error = XlsxError;

    fn write_cell(&mut self, row: u32, column: usize, value: &str) -> Result<(), XlsxError> {
        let col = u16::try_from(column).map_err(|_| XlsxError::RowColumnLimitError)?;
        self.workbook
            .worksheet_from_index(0)?
            .write_string(row, col, value)?;
        Ok(())
    }
}
