// Comparison of generated reports with reference reports.

use calamine::{open_workbook, DataType, Reader, Xlsx};
use log::{debug, info};
use snafu::prelude::*;
use std::path::Path;
use text_diff::print_diff;

use crate::transform::*;

fn cell_text(cell: &DataType) -> String {
    match cell {
        DataType::String(s) => s.clone(),
        DataType::Empty => "".to_string(),
        _ => format!("{:?}", cell),
    }
}

/// Renders the first sheet of a workbook, one line per row.
///
/// Cells are separated by tabs. Trailing empty cells are dropped, so that a
/// ragged row and the same row padded with blanks render identically.
pub fn read_report_lines(path: &Path) -> TransformResult<Vec<String>> {
    let path_s = path.display().to_string();
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path: &path_s })?;
    let range = workbook
        .worksheet_range_at(0)
        .context(EmptyExcelSnafu { path: &path_s })?
        .context(OpeningExcelSnafu { path: &path_s })?;
    let lines: Vec<String> = range
        .rows()
        .map(|row| {
            let mut cells: Vec<String> = row.iter().map(cell_text).collect();
            while cells.last().map(|c| c.is_empty()).unwrap_or(false) {
                cells.pop();
            }
            cells.join("\t")
        })
        .collect();
    debug!("read_report_lines: {} rows in {}", lines.len(), path_s);
    Ok(lines)
}

/// Checks a generated report against a reference report.
///
/// Differences are printed as a diff. Returns whether both have the same content.
pub fn check_against_reference(generated: &Path, reference: &Path) -> TransformResult<bool> {
    info!(
        "Comparing {} with reference {}",
        generated.display(),
        reference.display()
    );
    let generated_txt = read_report_lines(generated)?.join("\n");
    let reference_txt = read_report_lines(reference)?.join("\n");
    if generated_txt != reference_txt {
        print_diff(reference_txt.as_str(), generated_txt.as_str(), "\n");
        return Ok(false);
    }
    Ok(true)
}
