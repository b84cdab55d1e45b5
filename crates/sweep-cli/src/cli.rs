use clap::Parser;
use std::path::PathBuf;
use tracing::Level;

/// Monte Carlo parameter sweep with OK/NG classification.
///
/// Samples every parameter of the run file, evaluates the chosen built-in
/// evaluator and classifies each trial by whether its output falls inside
/// the acceptance interval. Press Ctrl-C to stop early; results gathered so
/// far are still reported.
#[derive(Debug, Clone, Parser)]
#[command(name = "mcsweep", version, about)]
pub struct Args {
    /// Run file (JSON). The built-in WPT example is used when omitted.
    #[arg(short, long, env = "MCSWEEP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Random seed; reuse the printed seed to reproduce a run.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of trials to run.
    #[arg(long)]
    pub max_trials: Option<u64>,

    /// Number of OK samples to keep.
    #[arg(long)]
    pub max_ok_save: Option<usize>,

    /// Number of NG samples to keep.
    #[arg(long)]
    pub max_ng_save: Option<usize>,

    /// Rows printed per table (0 = all). Exports are never truncated.
    #[arg(long)]
    pub max_print: Option<usize>,

    /// Progress update interval in trials (0 = off).
    #[arg(long)]
    pub print_every: Option<u64>,

    /// Built-in evaluator name.
    #[arg(long)]
    pub evaluator: Option<String>,

    /// Write retained OK samples as TSV.
    #[arg(long)]
    pub ok_tsv: Option<PathBuf>,

    /// Write retained NG samples as TSV.
    #[arg(long)]
    pub ng_tsv: Option<PathBuf>,

    /// Write a workbook (Summary, OK and NG sheets) in native units.
    #[arg(long)]
    pub xlsx: Option<PathBuf>,

    /// Write the whole run as JSON.
    #[arg(long)]
    pub json: Option<PathBuf>,

    /// Print the effective run file and exit.
    #[arg(long)]
    pub dump_config: bool,

    /// List built-in evaluators and exit.
    #[arg(long)]
    pub list_evaluators: bool,

    /// Log level when RUST_LOG is unset.
    #[arg(long, default_value = "warn", env = "MCSWEEP_LOG")]
    pub log_level: Level,

    /// Emit logs as JSON lines.
    #[arg(long)]
    pub log_json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn parses_overrides() {
        let args = Args::try_parse_from([
            "mcsweep",
            "--seed",
            "42",
            "--max-trials",
            "1000",
            "--ok-tsv",
            "ok.tsv",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(args.seed, Some(42));
        assert_eq!(args.max_trials, Some(1000));
        assert_eq!(args.ok_tsv, Some(PathBuf::from("ok.tsv")));
        assert_eq!(args.log_level, Level::DEBUG);
        assert!(!args.dump_config);
    }
}
