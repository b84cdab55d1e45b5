//! # sweep-cli
//!
//! The `mcsweep` binary: loads a run file, runs the sweep on a blocking
//! thread while Ctrl-C is watched on the async runtime, then prints the
//! summary and sample tables and writes the requested exports.

pub mod cli;
pub mod config;
pub mod console;
pub mod evaluators;
pub mod telemetry;

use anyhow::{bail, Context};
use std::fmt::Write as _;
use tracing::{info, warn};

use sweep_engine::{CancellationToken, ProgressSink, SweepEngine, SweepOutcome};
use sweep_report::{write_json, write_tsv, write_xlsx, JsonReport, RunSummary, SampleTable};

use crate::cli::Args;
use crate::config::RunFile;
use crate::console::ConsoleProgress;

pub async fn run(args: Args) -> anyhow::Result<()> {
    if args.list_evaluators {
        for (name, about) in evaluators::EVALUATORS {
            println!("{name:<20} {about}");
        }
        return Ok(());
    }

    let file = RunFile::resolve(&args)?;
    if args.dump_config {
        println!("{}", serde_json::to_string_pretty(&file)?);
        return Ok(());
    }

    let cancel = CancellationToken::new();
    let watcher = tokio::spawn(cancel_on_interrupt(cancel.clone()));

    let progress: Box<dyn ProgressSink> = Box::new(ConsoleProgress::stderr());
    let result = execute(&file, cancel, progress).await;
    watcher.abort();
    let outcome = result?;

    if file.print_every > 0 {
        eprintln!();
    }
    print!("{}", render(&file, &outcome));

    let failures = export(&file, &outcome);
    if failures > 0 {
        bail!("{failures} export(s) failed");
    }
    Ok(())
}

/// Run the sweep described by `file` to completion or cancellation.
///
/// The trial loop is synchronous, so it runs under `spawn_blocking` and
/// stays responsive to `cancel` at every trial boundary.
pub async fn execute(
    file: &RunFile,
    cancel: CancellationToken,
    progress: Box<dyn ProgressSink>,
) -> anyhow::Result<SweepOutcome> {
    let evaluator = evaluators::lookup(&file.evaluator)?;
    let engine = SweepEngine::new(file.sweep_config(), evaluator)?
        .with_progress(progress)
        .with_cancellation(cancel);

    info!(seed = engine.seed(), run_id = %engine.run_id(), "starting sweep");

    let outcome = tokio::task::spawn_blocking(move || engine.run())
        .await
        .context("sweep task panicked")??;
    Ok(outcome)
}

async fn cancel_on_interrupt(cancel: CancellationToken) {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            eprintln!("\n[Ctrl-C] interrupt received. stopping...");
            cancel.cancel();
        }
        Err(e) => warn!(error = %e, "unable to listen for Ctrl-C"),
    }
}

/// Summary followed by the OK and NG tables, as printed to stdout.
pub fn render(file: &RunFile, outcome: &SweepOutcome) -> String {
    let columns = file.columns();
    let mut out = String::new();

    let _ = writeln!(out, "\n{}\n", RunSummary::new(outcome, file.interval));
    let _ = write!(
        out,
        "{}",
        SampleTable::new("=== OK (saved) ===", &columns, outcome.results.ok())
            .with_max_print(file.max_print)
    );
    let _ = writeln!(out);
    let _ = write!(
        out,
        "{}",
        SampleTable::new("=== NG (saved) ===", &columns, outcome.results.ng())
            .with_max_print(file.max_print)
    );
    out
}

/// Write every export named in `file`. Each failure is reported and the
/// remaining exports are still attempted; returns the number that failed.
pub fn export(file: &RunFile, outcome: &SweepOutcome) -> usize {
    let columns = file.columns();
    let mut failures = 0;

    let tsv_jobs = [
        ("OK", &file.ok_tsv, outcome.results.ok()),
        ("NG", &file.ng_tsv, outcome.results.ng()),
    ];
    for (kind, path, rows) in tsv_jobs {
        let Some(path) = path else { continue };
        match write_tsv(path, &columns, rows) {
            Ok(()) => println!("tsv saved ({kind}): {}", path.display()),
            Err(e) => {
                failures += 1;
                eprintln!("tsv save error ({kind}): {e}");
            }
        }
    }

    let keys = file.sweep_config().keys();
    if let Some(path) = &file.xlsx {
        match write_xlsx(path, outcome, file.interval, &keys) {
            Ok(()) => println!("xlsx saved: {}", path.display()),
            Err(e) => {
                failures += 1;
                eprintln!("xlsx save error: {e}");
            }
        }
    }

    if let Some(path) = &file.json {
        match write_json(path, &JsonReport::new(outcome, file.interval, &keys)) {
            Ok(()) => println!("json saved: {}", path.display()),
            Err(e) => {
                failures += 1;
                eprintln!("json save error: {e}");
            }
        }
    }
    failures
}

#[cfg(test)]
mod tests {
    use super::*;
    use sweep_engine::{Interval, NullProgress, ParameterSpec, Progress, Termination};

    use crate::config::ParameterEntry;

    fn small_run(trials: u64) -> RunFile {
        RunFile {
            parameters: vec![
                ParameterEntry::new(ParameterSpec::linear("x", 0.0, 1.0)),
                ParameterEntry::new(ParameterSpec::log("f", 1e3, 1e5)).shown_as("f [kHz]", 1e-3),
            ],
            interval: Interval::new(0.25, 0.75),
            max_trials: trials,
            max_ok_save: 4,
            max_ng_save: 4,
            max_print: 2,
            print_every: 0,
            seed: Some(11),
            evaluator: "identity".to_string(),
            ..RunFile::default()
        }
    }

    #[tokio::test]
    async fn completed_run_renders_and_exports() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = small_run(1_000);
        file.ok_tsv = Some(dir.path().join("ok.tsv"));
        file.json = Some(dir.path().join("run.json"));
        file.xlsx = Some(dir.path().join("result.xlsx"));

        let outcome = execute(&file, CancellationToken::new(), Box::new(NullProgress))
            .await
            .unwrap();
        assert_eq!(outcome.termination, Termination::Completed);
        assert_eq!(outcome.seed, 11);
        assert_eq!(outcome.results.iters(), 1_000);
        assert_eq!(outcome.results.ok().len(), 4);

        let text = render(&file, &outcome);
        assert!(text.contains("seed=11"));
        assert!(text.contains("| No | x "));
        assert!(text.contains("f [kHz]"));
        assert!(text.contains("(printed 2 of 4; truncated for console)"));
        assert!(!text.contains("interrupted"));

        assert_eq!(export(&file, &outcome), 0);
        let tsv = std::fs::read_to_string(dir.path().join("ok.tsv")).unwrap();
        assert_eq!(tsv.lines().count(), 5);
        assert!(tsv.starts_with("x\tf [kHz]\ty\n"));
        assert!(dir.path().join("run.json").exists());
        assert!(dir.path().join("result.xlsx").exists());
        assert!(!dir.path().join("ng.tsv").exists());
    }

    #[tokio::test]
    async fn same_seed_same_samples() {
        let file = small_run(200);
        let a = execute(&file, CancellationToken::new(), Box::new(NullProgress))
            .await
            .unwrap();
        let b = execute(&file, CancellationToken::new(), Box::new(NullProgress))
            .await
            .unwrap();
        assert_eq!(a.results, b.results);
    }

    #[tokio::test]
    async fn cancelled_run_still_reports() {
        let file = small_run(1_000_000);
        let cancel = CancellationToken::new();
        cancel.cancel();

        let outcome = execute(&file, cancel, Box::new(NullProgress)).await.unwrap();
        assert_eq!(outcome.termination, Termination::Cancelled);
        assert_eq!(outcome.results.iters(), 0);

        let text = render(&file, &outcome);
        assert!(text.contains("interrupted"));
        assert!(text.contains("=== OK (saved) ===\n(none)"));
    }

    #[tokio::test]
    async fn cancel_from_progress_stops_the_loop() {
        let mut file = small_run(1_000_000);
        file.print_every = 100;
        let cancel = CancellationToken::new();
        let (tx, rx) = crossbeam_channel::unbounded();

        let trigger = cancel.clone();
        let sink = move |p: &Progress| {
            let _ = tx.send(*p);
            if p.iters >= 300 {
                trigger.cancel();
            }
        };
        let outcome = execute(&file, cancel, Box::new(sink)).await.unwrap();

        assert!(outcome.was_cancelled());
        assert_eq!(outcome.results.iters(), 300);
        let seen: Vec<u64> = rx.try_iter().map(|p| p.iters).collect();
        assert_eq!(seen, [100, 200, 300]);
    }

    #[tokio::test]
    async fn unknown_evaluator_is_fatal() {
        let mut file = small_run(10);
        file.evaluator = "nope".to_string();
        let err = execute(&file, CancellationToken::new(), Box::new(NullProgress))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("nope"));
    }

    #[tokio::test]
    async fn missing_parameter_is_reported_before_the_loop() {
        let mut file = small_run(10);
        file.evaluator = "wpt_ss_efficiency".to_string();
        let err = execute(&file, CancellationToken::new(), Box::new(NullProgress))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("reads key k,"));
    }

    #[test]
    fn failed_export_is_counted() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = small_run(10);
        file.ng_tsv = Some(dir.path().join("missing").join("ng.tsv"));
        let cancel = CancellationToken::new();
        let outcome = SweepEngine::new(file.sweep_config(), evaluators::lookup("identity").unwrap())
            .unwrap()
            .with_cancellation(cancel)
            .run()
            .unwrap();
        assert_eq!(export(&file, &outcome), 1);
    }
}
