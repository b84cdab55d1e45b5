//! Run configuration and pre-flight validation.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, warn};

use sweep_types::{ConfigError, Interval, ParameterSpec, SweepResult};

/// Everything the trial loop needs except the evaluator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Parameters in sampling order. Keys must be unique and non-empty.
    pub parameters: Vec<ParameterSpec>,

    /// Acceptance band for the evaluator output.
    pub interval: Interval,

    /// Number of trials after which the run completes.
    pub max_trials: u64,

    /// Maximum number of OK outcomes retained.
    pub ok_capacity: usize,

    /// Maximum number of NG outcomes retained.
    pub ng_capacity: usize,

    /// Report progress every N trials; 0 disables reporting.
    pub progress_every: u64,

    /// Seed for the random stream. `None` derives one from the clock.
    pub seed: Option<u64>,
}

impl SweepConfig {
    pub fn new(parameters: Vec<ParameterSpec>, interval: Interval) -> Self {
        Self {
            parameters,
            interval,
            max_trials: 10_000_000,
            ok_capacity: 10,
            ng_capacity: 10,
            progress_every: 200_000,
            seed: None,
        }
    }

    pub fn with_max_trials(mut self, n: u64) -> Self {
        self.max_trials = n;
        self
    }

    pub fn with_capacities(mut self, ok: usize, ng: usize) -> Self {
        self.ok_capacity = ok;
        self.ng_capacity = ng;
        self
    }

    pub fn with_progress_every(mut self, n: u64) -> Self {
        self.progress_every = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Parameter keys in configured order.
    pub fn keys(&self) -> Vec<String> {
        self.parameters.iter().map(|p| p.key.clone()).collect()
    }

    /// Check every configuration invariant. Fatal problems are returned as
    /// errors; suspicious but runnable settings are logged.
    pub fn validate(&self) -> SweepResult<()> {
        if self.parameters.is_empty() {
            return Err(ConfigError::NoParameters.into());
        }

        let mut seen = HashSet::with_capacity(self.parameters.len());
        for (index, param) in self.parameters.iter().enumerate() {
            if param.key.is_empty() {
                return Err(ConfigError::EmptyKey { index }.into());
            }
            if !seen.insert(param.key.as_str()) {
                return Err(ConfigError::DuplicateKey {
                    key: param.key.clone(),
                }
                .into());
            }
            param.check_bounds()?;
            param.check_domain()?;
        }

        if self.interval.is_empty() {
            warn!(
                min = self.interval.min,
                max = self.interval.max,
                "acceptance interval is empty; every trial will be NG"
            );
        }
        if self.max_trials == 0 {
            warn!("max_trials is 0; the sweep will complete without running a trial");
        }
        if self.ok_capacity == 0 || self.ng_capacity == 0 {
            debug!(
                ok_capacity = self.ok_capacity,
                ng_capacity = self.ng_capacity,
                "zero retention capacity; only counts are kept for that class"
            );
        }

        Ok(())
    }

    /// Check that every key an evaluator reads is configured.
    pub fn check_keys(&self, declared: &[&str]) -> SweepResult<()> {
        for key in declared {
            if !self.parameters.iter().any(|p| p.key == *key) {
                return Err(ConfigError::MissingKey {
                    key: (*key).to_string(),
                }
                .into());
            }
        }
        Ok(())
    }
}
