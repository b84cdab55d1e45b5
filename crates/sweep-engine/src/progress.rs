//! Progress reporting side channel.
//!
//! Sinks receive a [`Progress`] snapshot every `progress_every` trials. They
//! never influence control flow.

use crossbeam_channel::Sender;
use serde::Serialize;
use tracing::info;

/// Counters at a reporting point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Progress {
    pub iters: u64,
    pub max_trials: u64,
    /// `iters / max_trials * 100`, or 0 when `max_trials` is 0.
    pub percent: f64,
    pub ok_hits: u64,
    pub ng_hits: u64,
}

impl Progress {
    pub fn new(iters: u64, max_trials: u64, ok_hits: u64, ng_hits: u64) -> Self {
        let percent = if max_trials > 0 {
            iters as f64 / max_trials as f64 * 100.0
        } else {
            0.0
        };
        Self {
            iters,
            max_trials,
            percent,
            ok_hits,
            ng_hits,
        }
    }
}

/// Receiver of progress snapshots.
pub trait ProgressSink: Send {
    fn report(&mut self, progress: &Progress);
}

impl<F> ProgressSink for F
where
    F: FnMut(&Progress) + Send,
{
    fn report(&mut self, progress: &Progress) {
        self(progress)
    }
}

/// Discards all progress.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullProgress;

impl ProgressSink for NullProgress {
    fn report(&mut self, _progress: &Progress) {}
}

/// Logs progress through `tracing` at info level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingProgress;

impl ProgressSink for TracingProgress {
    fn report(&mut self, p: &Progress) {
        info!(
            iters = p.iters,
            percent = format_args!("{:.2}", p.percent),
            ok_hits = p.ok_hits,
            ng_hits = p.ng_hits,
            "sweep progress"
        );
    }
}

/// Forwards progress over a channel.
#[derive(Debug, Clone)]
pub struct ChannelProgress {
    tx: Sender<Progress>,
}

impl ChannelProgress {
    pub fn new(tx: Sender<Progress>) -> Self {
        Self { tx }
    }
}

impl ProgressSink for ChannelProgress {
    fn report(&mut self, progress: &Progress) {
        // Best-effort send; a full or dropped receiver must not stall the loop.
        let _ = self.tx.try_send(*progress);
    }
}
