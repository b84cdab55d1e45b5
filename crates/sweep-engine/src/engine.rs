//! The trial loop.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error, info};
use uuid::Uuid;

use sweep_types::{Assignment, DomainError, SweepError, SweepResult, TrialOutcome};

use crate::cancel::CancellationToken;
use crate::classifier::classify;
use crate::config::SweepConfig;
use crate::evaluator::Evaluator;
use crate::progress::{NullProgress, Progress, ProgressSink};
use crate::results::ResultSet;
use crate::sampler::{sample, seeded_rng, SweepRng};

/// How a finished run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Termination {
    /// `max_trials` trials were run.
    Completed,
    /// The cancellation token was raised.
    Cancelled,
}

impl std::fmt::Display for Termination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Completed => write!(f, "completed"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Lifecycle state of a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SweepState {
    Running,
    Completed,
    Cancelled,
    /// A fatal error stopped the run; its results are not meaningful.
    Aborted,
}

/// Final product of a run, handed to reporting and export.
#[derive(Debug, Clone, Serialize)]
pub struct SweepOutcome {
    pub run_id: Uuid,
    pub seed: u64,
    pub termination: Termination,
    pub results: ResultSet,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl SweepOutcome {
    pub fn was_cancelled(&self) -> bool {
        self.termination == Termination::Cancelled
    }
}

/// Exclusively owns the random stream and the result set for one run.
///
/// Drive it with [`SweepEngine::run`], or trial by trial with
/// [`SweepEngine::step`].
pub struct SweepEngine {
    config: SweepConfig,
    keys: Arc<[String]>,
    evaluator: Box<dyn Evaluator>,
    progress: Box<dyn ProgressSink>,
    cancel: CancellationToken,
    rng: SweepRng,
    seed: u64,
    results: ResultSet,
    state: SweepState,
    run_id: Uuid,
    started_at: DateTime<Utc>,
}

impl SweepEngine {
    /// Validate `config` against `evaluator` and prepare a run.
    ///
    /// Configuration defects (duplicate or empty keys, bad domains, keys the
    /// evaluator reads but nobody configured) are reported here, before any
    /// trial runs.
    pub fn new(config: SweepConfig, evaluator: Box<dyn Evaluator>) -> SweepResult<Self> {
        config.validate()?;
        config.check_keys(evaluator.declared_keys())?;

        let seed = config.seed.unwrap_or_else(clock_seed);
        let keys: Arc<[String]> = config.keys().into();
        let results = ResultSet::new(config.ok_capacity, config.ng_capacity);
        let run_id = Uuid::new_v4();

        info!(
            %run_id,
            seed,
            evaluator = evaluator.name(),
            parameters = keys.len(),
            max_trials = config.max_trials,
            "sweep initialised"
        );
        for spec in &config.parameters {
            debug!(key = %spec.key, min = spec.min, max = spec.max, method = %spec.method, "parameter");
        }

        Ok(Self {
            rng: seeded_rng(seed),
            config,
            keys,
            evaluator,
            progress: Box::new(NullProgress),
            cancel: CancellationToken::new(),
            seed,
            results,
            state: SweepState::Running,
            run_id,
            started_at: Utc::now(),
        })
    }

    pub fn with_progress(mut self, sink: Box<dyn ProgressSink>) -> Self {
        self.progress = sink;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// A handle that cancels this run when raised.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// The seed actually in use (resolved from the clock if none was set).
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn state(&self) -> SweepState {
        self.state
    }

    pub fn config(&self) -> &SweepConfig {
        &self.config
    }

    pub fn results(&self) -> &ResultSet {
        &self.results
    }

    /// Current counters as a progress snapshot.
    pub fn progress(&self) -> Progress {
        Progress::new(
            self.results.iters(),
            self.config.max_trials,
            self.results.ok_hits(),
            self.results.ng_hits(),
        )
    }

    /// Run one trial, or detect termination.
    ///
    /// Returns `Ok(Some(_))` once the run has stopped (repeatable), `Ok(None)`
    /// after a trial. The trial limit is checked before cancellation.
    pub fn step(&mut self) -> SweepResult<Option<Termination>> {
        match self.state {
            SweepState::Running => {}
            SweepState::Completed => return Ok(Some(Termination::Completed)),
            SweepState::Cancelled => return Ok(Some(Termination::Cancelled)),
            SweepState::Aborted => {
                return Err(SweepError::Aborted {
                    run_id: self.run_id,
                });
            }
        }

        if self.results.iters() >= self.config.max_trials {
            return Ok(Some(self.finish(Termination::Completed)));
        }
        if self.cancel.is_cancelled() {
            return Ok(Some(self.finish(Termination::Cancelled)));
        }

        let assignment = match self.draw_assignment() {
            Ok(assignment) => assignment,
            Err(e) => return Err(self.abort(e.into())),
        };
        let output = match self.evaluator.evaluate(&assignment) {
            Ok(y) => y,
            Err(e) => return Err(self.abort(e.into())),
        };
        let classification = classify(output, &self.config.interval);

        let trial_number = self.results.iters() + 1;
        self.results.record(TrialOutcome::new(
            trial_number,
            assignment,
            output,
            classification,
        ));

        let every = self.config.progress_every;
        if every > 0 && self.results.iters() % every == 0 {
            let snapshot = self.progress();
            self.progress.report(&snapshot);
        }

        Ok(None)
    }

    /// Run until completion or cancellation.
    pub fn run(mut self) -> SweepResult<SweepOutcome> {
        loop {
            if let Some(termination) = self.step()? {
                return Ok(self.into_outcome(termination));
            }
        }
    }

    /// Package the results of a stopped run. Returns the engine back while it
    /// is still running or was aborted.
    pub fn into_outcome_checked(self) -> Result<SweepOutcome, Self> {
        match self.state {
            SweepState::Completed => Ok(self.into_outcome(Termination::Completed)),
            SweepState::Cancelled => Ok(self.into_outcome(Termination::Cancelled)),
            SweepState::Running | SweepState::Aborted => Err(self),
        }
    }

    fn into_outcome(self, termination: Termination) -> SweepOutcome {
        SweepOutcome {
            run_id: self.run_id,
            seed: self.seed,
            termination,
            results: self.results,
            started_at: self.started_at,
            finished_at: Utc::now(),
        }
    }

    /// Sample every parameter in configured order.
    fn draw_assignment(&mut self) -> Result<Assignment, DomainError> {
        let mut assignment = Assignment::with_keys(Arc::clone(&self.keys));
        for spec in &self.config.parameters {
            assignment.push(sample(spec, &mut self.rng)?);
        }
        Ok(assignment)
    }

    fn finish(&mut self, termination: Termination) -> Termination {
        self.state = match termination {
            Termination::Completed => SweepState::Completed,
            Termination::Cancelled => SweepState::Cancelled,
        };
        info!(
            run_id = %self.run_id,
            %termination,
            iters = self.results.iters(),
            ok_hits = self.results.ok_hits(),
            ng_hits = self.results.ng_hits(),
            "sweep finished"
        );
        termination
    }

    fn abort(&mut self, err: SweepError) -> SweepError {
        self.state = SweepState::Aborted;
        error!(
            run_id = %self.run_id,
            trial = self.results.iters() + 1,
            error = %err,
            "sweep aborted"
        );
        err
    }
}

impl std::fmt::Debug for SweepEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SweepEngine")
            .field("run_id", &self.run_id)
            .field("seed", &self.seed)
            .field("state", &self.state)
            .field("evaluator", &self.evaluator.name())
            .field("iters", &self.results.iters())
            .finish_non_exhaustive()
    }
}

fn clock_seed() -> u64 {
    let now = Utc::now();
    now.timestamp_nanos_opt()
        .map(|n| n as u64)
        .unwrap_or_else(|| now.timestamp_micros() as u64)
}
