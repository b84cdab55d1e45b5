//! Tab-separated export of a sample list in display units.

use std::io;
use std::path::Path;
use tracing::debug;

use sweep_types::{SweepResult, TrialOutcome};

use crate::columns::DisplayColumn;
use crate::format::format_g;

/// Write `rows` to `path` as TSV: a header of column labels plus `y`, then
/// one line per outcome with display-scaled values at 10 significant digits.
pub fn write_tsv(
    path: impl AsRef<Path>,
    columns: &[DisplayColumn],
    rows: &[TrialOutcome],
) -> SweepResult<()> {
    let path = path.as_ref();
    let file = std::fs::File::create(path)?;
    write_tsv_to(io::BufWriter::new(file), columns, rows)?;
    debug!(path = %path.display(), rows = rows.len(), "tsv written");
    Ok(())
}

/// Same as [`write_tsv`] but into any writer.
pub fn write_tsv_to<W: io::Write>(
    writer: W,
    columns: &[DisplayColumn],
    rows: &[TrialOutcome],
) -> SweepResult<()> {
    let mut w = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_writer(writer);

    let mut header: Vec<&str> = columns.iter().map(|c| c.label.as_str()).collect();
    header.push("y");
    w.write_record(&header).map_err(io::Error::from)?;

    for outcome in rows {
        let mut record: Vec<String> = columns
            .iter()
            .map(|c| format_g(c.display_value(&outcome.assignment), 10))
            .collect();
        record.push(format_g(outcome.output, 10));
        w.write_record(&record).map_err(io::Error::from)?;
    }

    w.flush()?;
    Ok(())
}
