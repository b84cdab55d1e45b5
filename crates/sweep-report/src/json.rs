//! JSON export of a whole run in native units.

use serde::Serialize;
use std::io;
use std::path::Path;
use tracing::debug;

use sweep_engine::SweepOutcome;
use sweep_types::{Interval, SweepResult, TrialOutcome};

use crate::summary::RunSummary;

/// One row of the count table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountRow {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub count: u64,
    pub ratio: f64,
}

/// Serialisable view of a finished run: summary, count table, and the
/// retained OK/NG samples keyed by parameter key.
#[derive(Debug, Clone, Serialize)]
pub struct JsonReport<'a> {
    pub summary: RunSummary,
    pub counts: Vec<CountRow>,
    pub parameters: Vec<&'a str>,
    pub ok: &'a [TrialOutcome],
    pub ng: &'a [TrialOutcome],
}

impl CountRow {
    /// OK, NG and ALL rows for `summary`.
    pub fn table(summary: &RunSummary) -> Vec<CountRow> {
        vec![
            CountRow {
                kind: "OK",
                count: summary.ok_hits,
                ratio: summary.ok_ratio,
            },
            CountRow {
                kind: "NG",
                count: summary.ng_hits,
                ratio: summary.ng_ratio,
            },
            CountRow {
                kind: "ALL",
                count: summary.iters,
                ratio: 1.0,
            },
        ]
    }
}

impl<'a> JsonReport<'a> {
    pub fn new(outcome: &'a SweepOutcome, interval: Interval, keys: &'a [String]) -> Self {
        let summary = RunSummary::new(outcome, interval);
        Self {
            counts: CountRow::table(&summary),
            summary,
            parameters: keys.iter().map(String::as_str).collect(),
            ok: outcome.results.ok(),
            ng: outcome.results.ng(),
        }
    }
}

/// Write `report` to `path` as pretty-printed JSON.
pub fn write_json(path: impl AsRef<Path>, report: &JsonReport<'_>) -> SweepResult<()> {
    let path = path.as_ref();
    let file = std::fs::File::create(path)?;
    let mut writer = io::BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, report)?;
    io::Write::flush(&mut writer)?;
    debug!(path = %path.display(), "json report written");
    Ok(())
}
