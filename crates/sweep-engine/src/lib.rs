//! # sweep-engine
//!
//! Bounded Monte Carlo parameter sweep with OK/NG classification.
//!
//! Provides per-parameter sampling (linear and log-uniform), the evaluator
//! seam, interval classification, bounded retention of observed trials, and
//! the trial loop with cooperative cancellation and progress reporting.

mod cancel;
mod classifier;
mod config;
mod engine;
mod evaluator;
mod progress;
mod results;
mod sampler;

pub use cancel::CancellationToken;
pub use classifier::classify;
pub use config::SweepConfig;
pub use engine::{SweepEngine, SweepOutcome, SweepState, Termination};
pub use evaluator::{from_fn, Evaluator, FnEvaluator};
pub use progress::{ChannelProgress, NullProgress, Progress, ProgressSink, TracingProgress};
pub use results::ResultSet;
pub use sampler::{sample, seeded_rng, SweepRng};

pub use sweep_types::{
    Assignment, Classification, ConfigError, DomainError, EvaluatorError, Interval,
    ParameterSpec, SamplingMethod, SweepError, SweepResult, TrialOutcome,
};
