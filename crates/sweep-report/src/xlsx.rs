//! Spreadsheet export: a Summary sheet with the count table, then OK and NG
//! sheets holding the retained samples in native units.

use std::path::Path;
use tracing::debug;

use rust_xlsxwriter::{Workbook, Worksheet, XlsxError};
use sweep_engine::SweepOutcome;
use sweep_types::{Interval, SweepError, SweepResult, TrialOutcome};

use crate::format::format_g;
use crate::json::CountRow;
use crate::summary::RunSummary;

/// Write the workbook for `outcome` to `path`. Columns are headed by
/// parameter key; values are not display-scaled.
pub fn write_xlsx(
    path: impl AsRef<Path>,
    outcome: &SweepOutcome,
    interval: Interval,
    keys: &[String],
) -> SweepResult<()> {
    let path = path.as_ref();
    let mut workbook = build_workbook(outcome, interval, keys)?;
    workbook.save(path).map_err(export_error)?;
    debug!(path = %path.display(), "xlsx written");
    Ok(())
}

/// Build the workbook in memory.
pub fn build_workbook(
    outcome: &SweepOutcome,
    interval: Interval,
    keys: &[String],
) -> SweepResult<Workbook> {
    if keys.len() + 1 >= usize::from(u16::MAX) {
        return Err(SweepError::Export(format!(
            "{} parameters do not fit in a worksheet",
            keys.len()
        )));
    }

    let mut workbook = Workbook::new();
    let summary = RunSummary::new(outcome, interval);

    summary_sheet(workbook.add_worksheet(), &CountRow::table(&summary)).map_err(export_error)?;
    sample_sheet(workbook.add_worksheet(), "OK", keys, outcome.results.ok())
        .map_err(export_error)?;
    sample_sheet(workbook.add_worksheet(), "NG", keys, outcome.results.ng())
        .map_err(export_error)?;

    Ok(workbook)
}

fn export_error(e: XlsxError) -> SweepError {
    SweepError::Export(e.to_string())
}

fn summary_sheet(sheet: &mut Worksheet, counts: &[CountRow]) -> Result<(), XlsxError> {
    sheet.set_name("Summary")?;
    sheet.write_string(0, 0, "Type")?;
    sheet.write_string(0, 1, "Count")?;
    sheet.write_string(0, 2, "Ratio")?;
    for (row, count) in (1u32..).zip(counts) {
        sheet.write_string(row, 0, count.kind)?;
        sheet.write_number(row, 1, count.count as f64)?;
        write_value(sheet, row, 2, count.ratio)?;
    }
    Ok(())
}

fn sample_sheet(
    sheet: &mut Worksheet,
    name: &str,
    keys: &[String],
    rows: &[TrialOutcome],
) -> Result<(), XlsxError> {
    sheet.set_name(name)?;

    // Bounded by the check in `build_workbook`.
    let y_col = keys.len() as u16 + 1;
    sheet.write_string(0, 0, "No")?;
    for (col, key) in (1u16..).zip(keys) {
        sheet.write_string(0, col, key.as_str())?;
    }
    sheet.write_string(0, y_col, "y")?;

    for (row, outcome) in (1u32..).zip(rows) {
        sheet.write_number(row, 0, f64::from(row))?;
        for (col, key) in (1u16..).zip(keys) {
            let value = outcome.assignment.value_of(key).unwrap_or(f64::NAN);
            write_value(sheet, row, col, value)?;
        }
        write_value(sheet, row, y_col, outcome.output)?;
    }
    Ok(())
}

/// Spreadsheets have no NaN or infinity, so those are written as text.
fn write_value(sheet: &mut Worksheet, row: u32, col: u16, value: f64) -> Result<(), XlsxError> {
    if value.is_finite() {
        sheet.write_number(row, col, value)?;
    } else {
        sheet.write_string(row, col, format_g(value, 4))?;
    }
    Ok(())
}
