//! Parameter domains and the acceptance interval.

use serde::{Deserialize, Serialize};

use crate::errors::{ConfigError, DomainError};

/// How a parameter is sampled over its domain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SamplingMethod {
    /// Uniform over `[min, max]`.
    #[default]
    Linear,
    /// Log-uniform: equal density per decade. Both bounds must be positive.
    #[serde(alias = "logarithmic")]
    Log,
}

impl std::fmt::Display for SamplingMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Linear => write!(f, "linear"),
            Self::Log => write!(f, "log"),
        }
    }
}

/// A single input variable of the sweep.
///
/// `min == max` is allowed and pins the parameter to a constant while the
/// others are swept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSpec {
    /// Lookup key used by evaluators (e.g. "f").
    pub key: String,
    /// Lower bound of the domain, in native units.
    pub min: f64,
    /// Upper bound of the domain, in native units.
    pub max: f64,
    #[serde(default, rename = "scale")]
    pub method: SamplingMethod,
}

impl ParameterSpec {
    pub fn new(key: impl Into<String>, min: f64, max: f64, method: SamplingMethod) -> Self {
        Self {
            key: key.into(),
            min,
            max,
            method,
        }
    }

    pub fn linear(key: impl Into<String>, min: f64, max: f64) -> Self {
        Self::new(key, min, max, SamplingMethod::Linear)
    }

    pub fn log(key: impl Into<String>, min: f64, max: f64) -> Self {
        Self::new(key, min, max, SamplingMethod::Log)
    }

    /// A parameter fixed at `value`.
    pub fn fixed(key: impl Into<String>, value: f64) -> Self {
        Self::linear(key, value, value)
    }

    pub fn is_fixed(&self) -> bool {
        self.min == self.max
    }

    /// Check the sampling domain. This is the same check the sampler applies
    /// on every draw.
    pub fn check_domain(&self) -> Result<(), DomainError> {
        if self.max < self.min {
            return Err(DomainError::InvertedBounds {
                key: self.key.clone(),
                min: self.min,
                max: self.max,
            });
        }
        if self.method == SamplingMethod::Log && (self.min <= 0.0 || self.max <= 0.0) {
            return Err(DomainError::NonPositiveLogBound {
                key: self.key.clone(),
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }

    /// Static checks that do not depend on other parameters.
    pub fn check_bounds(&self) -> Result<(), ConfigError> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(ConfigError::InvalidBounds {
                key: self.key.clone(),
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// Closed acceptance band for the evaluator output: `min <= y <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub min: f64,
    pub max: f64,
}

impl Interval {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, y: f64) -> bool {
        self.min <= y && y <= self.max
    }

    /// An interval with `min > max` (or a NaN bound) accepts nothing.
    pub fn is_empty(&self) -> bool {
        !(self.min <= self.max)
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}
