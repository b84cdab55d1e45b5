//! Built-in evaluators selectable by name from a run file.

use std::f64::consts::PI;

use sweep_engine::{Assignment, Evaluator, EvaluatorError};
use sweep_types::{ConfigError, SweepResult};

/// Power-transfer figure of a two-coil series–series resonant link.
///
/// Keys: coupling `k`, frequency `f` [Hz], winding resistances `R1`/`R2`
/// [Ω], inductances `L1`/`L2` [H], resonance capacitors `C1`/`C2` [F].
/// Returns NaN when the denominator vanishes.
#[derive(Debug, Default, Clone, Copy)]
pub struct WptSsEfficiency;

impl Evaluator for WptSsEfficiency {
    fn evaluate(&self, x: &Assignment) -> Result<f64, EvaluatorError> {
        let k = x.get("k")?;
        let f_hz = x.get("f")?;
        let r1 = x.get("R1")?;
        let r2 = x.get("R2")?;
        let l1 = x.get("L1")?;
        let l2 = x.get("L2")?;
        let c1 = x.get("C1")?;
        let c2 = x.get("C2")?;

        let w = 2.0 * PI * f_hz;

        let t1 = w * l1 - 1.0 / (w * c1);
        let t2 = w * l2 - 1.0 / (w * c2);

        let a = r1 * r2 + t1 * t2 - w * w * k * k * l1 * l2;
        let b = r1 * t2 - r2 * t1;

        let num = 4.0 * k * k * r1 * r2 * l1 * l2 * w * w;
        let den = a * a + b * b + num;

        if den == 0.0 {
            return Ok(f64::NAN);
        }
        Ok(num / den)
    }

    fn declared_keys(&self) -> &[&str] {
        &["k", "f", "R1", "R2", "L1", "L2", "C1", "C2"]
    }

    fn name(&self) -> &str {
        "wpt_ss_efficiency"
    }
}

/// Returns parameter `x` unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct Identity;

impl Evaluator for Identity {
    fn evaluate(&self, x: &Assignment) -> Result<f64, EvaluatorError> {
        x.get("x")
    }

    fn declared_keys(&self) -> &[&str] {
        &["x"]
    }

    fn name(&self) -> &str {
        "identity"
    }
}

/// Sum of every parameter value.
#[derive(Debug, Default, Clone, Copy)]
pub struct Sum;

impl Evaluator for Sum {
    fn evaluate(&self, x: &Assignment) -> Result<f64, EvaluatorError> {
        Ok(x.values().iter().sum())
    }

    fn name(&self) -> &str {
        "sum"
    }
}

/// Names accepted by [`lookup`].
pub const EVALUATORS: &[(&str, &str)] = &[
    (
        "wpt_ss_efficiency",
        "series-series WPT link figure over k, f, R1, R2, L1, L2, C1, C2",
    ),
    ("identity", "returns parameter x"),
    ("sum", "sum of all parameters"),
];

pub fn lookup(name: &str) -> SweepResult<Box<dyn Evaluator>> {
    match name {
        "wpt_ss_efficiency" => Ok(Box::new(WptSsEfficiency)),
        "identity" => Ok(Box::new(Identity)),
        "sum" => Ok(Box::new(Sum)),
        _ => Err(ConfigError::UnknownEvaluator {
            name: name.to_string(),
        }
        .into()),
    }
}
