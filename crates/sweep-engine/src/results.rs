//! Bounded retention of observed trials plus running counters.

use serde::Serialize;

use sweep_types::{Classification, TrialOutcome};

/// OK/NG samples kept for inspection, and hit counters over the whole run.
///
/// Counters always advance; a list only grows while it is below capacity.
/// `iters == ok_hits + ng_hits` holds at every point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultSet {
    ok: Vec<TrialOutcome>,
    ng: Vec<TrialOutcome>,
    ok_capacity: usize,
    ng_capacity: usize,
    iters: u64,
    ok_hits: u64,
    ng_hits: u64,
}

impl ResultSet {
    pub fn new(ok_capacity: usize, ng_capacity: usize) -> Self {
        Self {
            ok: Vec::with_capacity(ok_capacity),
            ng: Vec::with_capacity(ng_capacity),
            ok_capacity,
            ng_capacity,
            iters: 0,
            ok_hits: 0,
            ng_hits: 0,
        }
    }

    /// Count `outcome` and retain it if its list has room.
    ///
    /// Returns whether the outcome was retained.
    pub fn record(&mut self, outcome: TrialOutcome) -> bool {
        let (list, capacity, hits) = match outcome.classification {
            Classification::Ok => (&mut self.ok, self.ok_capacity, &mut self.ok_hits),
            Classification::Ng => (&mut self.ng, self.ng_capacity, &mut self.ng_hits),
        };
        *hits += 1;
        self.iters += 1;

        if list.len() < capacity {
            list.push(outcome);
            true
        } else {
            false
        }
    }

    pub fn ok(&self) -> &[TrialOutcome] {
        &self.ok
    }

    pub fn ng(&self) -> &[TrialOutcome] {
        &self.ng
    }

    pub fn ok_capacity(&self) -> usize {
        self.ok_capacity
    }

    pub fn ng_capacity(&self) -> usize {
        self.ng_capacity
    }

    pub fn iters(&self) -> u64 {
        self.iters
    }

    pub fn ok_hits(&self) -> u64 {
        self.ok_hits
    }

    pub fn ng_hits(&self) -> u64 {
        self.ng_hits
    }

    pub fn ok_ratio(&self) -> f64 {
        ratio(self.ok_hits, self.iters)
    }

    pub fn ng_ratio(&self) -> f64 {
        ratio(self.ng_hits, self.iters)
    }

    pub fn is_full(&self) -> bool {
        self.ok.len() >= self.ok_capacity && self.ng.len() >= self.ng_capacity
    }
}

fn ratio(hits: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        hits as f64 / total as f64
    }
}
