//! Run-level summary.

use serde::Serialize;
use std::fmt;
use uuid::Uuid;

use sweep_engine::{SweepOutcome, Termination};
use sweep_types::Interval;

use crate::format::format_cell;

/// Counts and ratios for a finished run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub run_id: Uuid,
    pub seed: u64,
    pub interval: Interval,
    pub termination: Termination,
    pub iters: u64,
    pub ok_hits: u64,
    pub ng_hits: u64,
    pub ok_ratio: f64,
    pub ng_ratio: f64,
}

impl RunSummary {
    pub fn new(outcome: &SweepOutcome, interval: Interval) -> Self {
        let r = &outcome.results;
        Self {
            run_id: outcome.run_id,
            seed: outcome.seed,
            interval,
            termination: outcome.termination,
            iters: r.iters(),
            ok_hits: r.ok_hits(),
            ng_hits: r.ng_hits(),
            ok_ratio: r.ok_ratio(),
            ng_ratio: r.ng_ratio(),
        }
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "seed={}", self.seed)?;
        writeln!(
            f,
            "interval=[{}, {}]",
            format_cell(self.interval.min),
            format_cell(self.interval.max)
        )?;
        writeln!(
            f,
            "iters={}  OK_hits={}  NG_hits={}",
            self.iters, self.ok_hits, self.ng_hits
        )?;
        write!(
            f,
            "OK_ratio={}  NG_ratio={}",
            format_cell(self.ok_ratio),
            format_cell(self.ng_ratio)
        )?;
        if self.termination == Termination::Cancelled {
            write!(f, "\n(interrupted; counts cover the trials run before cancellation)")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sweep_engine::{from_fn, Interval, ParameterSpec, SweepConfig, SweepEngine};

    fn outcome(trials: u64) -> SweepOutcome {
        let config = SweepConfig::new(
            vec![ParameterSpec::linear("x", 0.0, 1.0)],
            Interval::new(0.5, 1.0),
        )
        .with_max_trials(trials)
        .with_progress_every(0)
        .with_seed(9);
        SweepEngine::new(config, Box::new(from_fn(|x| x.get("x"))))
            .unwrap()
            .run()
            .unwrap()
    }

    #[test]
    fn summary_counts_match_results() {
        let outcome = outcome(400);
        let summary = RunSummary::new(&outcome, Interval::new(0.5, 1.0));
        assert_eq!(summary.iters, 400);
        assert_eq!(summary.ok_hits + summary.ng_hits, 400);
        assert!((summary.ok_ratio + summary.ng_ratio - 1.0).abs() < 1e-12);
    }

    #[test]
    fn summary_text() {
        let outcome = outcome(0);
        let text = RunSummary::new(&outcome, Interval::new(0.35, 0.5)).to_string();
        assert!(text.starts_with("seed=9\n"));
        assert!(text.contains("interval=[      0.35,        0.5]"));
        assert!(text.contains("iters=0  OK_hits=0  NG_hits=0"));
        assert!(text.contains("OK_ratio=         0  NG_ratio=         0"));
        assert!(!text.contains("interrupted"));
    }
}
