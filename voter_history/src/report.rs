// ********* Report rows and sheets **********

use log::debug;
use std::collections::BTreeMap;
use std::convert::Infallible;

/// A row of the report, as a sparse mapping from column to cell value.
///
/// Columns without a value are not written at all, which makes the rows of
/// voters that missed some elections shorter than the header.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct OutputRow {
    cells: BTreeMap<usize, String>,
}

impl OutputRow {
    pub fn new() -> OutputRow {
        OutputRow::default()
    }

    /// Sets the cell at this column, replacing any previous value.
    pub fn set(&mut self, column: usize, value: impl Into<String>) {
        self.cells.insert(column, value.into());
    }

    pub fn get(&self, column: usize) -> Option<&str> {
        self.cells.get(&column).map(|s| s.as_str())
    }

    /// One past the last written column.
    pub fn width(&self) -> usize {
        self.cells.keys().next_back().map(|c| c + 1).unwrap_or(0)
    }

    /// The number of written cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The written cells, by increasing column.
    pub fn cells(&self) -> impl Iterator<Item = (usize, &str)> {
        self.cells.iter().map(|(c, v)| (*c, v.as_str()))
    }
}

/// A sheet that cells can be written to.
///
/// This is the only thing the pipeline needs from a spreadsheet backend.
pub trait ReportSink {
    type Error;

    fn write_cell(&mut self, row: u32, column: usize, value: &str) -> Result<(), Self::Error>;
}

/// Writes the rows of one district report, one after the other.
pub struct ReportWriter<S: ReportSink> {
    sink: S,
    next_row: u32,
}

impl<S: ReportSink> ReportWriter<S> {
    pub fn new(sink: S) -> ReportWriter<S> {
        ReportWriter { sink, next_row: 0 }
    }

    /// Writes the row at the next row index of the sheet.
    pub fn append(&mut self, row: &OutputRow) -> Result<(), S::Error> {
        for (column, value) in row.cells() {
            self.sink.write_cell(self.next_row, column, value)?;
        }
        self.next_row += 1;
        Ok(())
    }

    /// The rows written, without the header.
    pub fn data_rows(&self) -> u32 {
        self.next_row.saturating_sub(1)
    }

    /// Returns the sink, for persisting it.
    pub fn finish(self) -> (S, u32) {
        debug!("finish: {} rows written", self.next_row);
        let data_rows = self.data_rows();
        (self.sink, data_rows)
    }
}

/// A sheet kept in memory.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct MemorySheet {
    pub rows: BTreeMap<u32, OutputRow>,
}

impl MemorySheet {
    pub fn new() -> MemorySheet {
        MemorySheet::default()
    }

    pub fn row(&self, row: u32) -> Option<&OutputRow> {
        self.rows.get(&row)
    }
}

impl ReportSink for MemorySheet {
    type Error = Infallible;

    fn write_cell(&mut self, row: u32, column: usize, value: &str) -> Result<(), Infallible> {
        self.rows.entry(row).or_default().set(column, value);
        Ok(())
    }
}
