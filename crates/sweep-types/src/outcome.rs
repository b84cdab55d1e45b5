//! Per-trial results.

use serde::{Serialize, Serializer};

use crate::assignment::Assignment;

/// Whether a trial's output fell inside the acceptance interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Classification {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "NG")]
    Ng,
}

impl Classification {
    pub fn is_ok(self) -> bool {
        matches!(self, Self::Ok)
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ok => write!(f, "OK"),
            Self::Ng => write!(f, "NG"),
        }
    }
}

/// A single evaluated trial. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrialOutcome {
    /// 1-based position of the trial in the run.
    pub trial_number: u64,
    pub assignment: Assignment,
    /// Evaluator output; may be NaN or infinite. Non-finite values
    /// serialize as the strings `"NaN"`, `"+Inf"` and `"-Inf"`.
    #[serde(serialize_with = "serialize_output")]
    pub output: f64,
    pub classification: Classification,
}

impl TrialOutcome {
    pub fn new(
        trial_number: u64,
        assignment: Assignment,
        output: f64,
        classification: Classification,
    ) -> Self {
        Self {
            trial_number,
            assignment,
            output,
            classification,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.classification.is_ok()
    }
}

fn serialize_output<S: Serializer>(y: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if y.is_nan() {
        serializer.serialize_str("NaN")
    } else if *y == f64::INFINITY {
        serializer.serialize_str("+Inf")
    } else if *y == f64::NEG_INFINITY {
        serializer.serialize_str("-Inf")
    } else {
        serializer.serialize_f64(*y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_labels() {
        assert_eq!(Classification::Ok.to_string(), "OK");
        assert_eq!(Classification::Ng.to_string(), "NG");
        assert!(Classification::Ok.is_ok());
        assert!(!Classification::Ng.is_ok());
    }

    fn outcome(y: f64) -> TrialOutcome {
        TrialOutcome::new(3, Assignment::from_pairs([("x", 1.0)]), y, Classification::Ng)
    }

    #[test]
    fn non_finite_outputs_serialize_distinctly() {
        let value = serde_json::to_value(outcome(f64::NAN)).unwrap();
        assert_eq!(value["output"], "NaN");
        assert_eq!(value["classification"], "NG");
        assert_eq!(value["assignment"]["x"], 1.0);

        let pos = serde_json::to_value(outcome(f64::INFINITY)).unwrap();
        let neg = serde_json::to_value(outcome(f64::NEG_INFINITY)).unwrap();
        assert_eq!(pos["output"], "+Inf");
        assert_eq!(neg["output"], "-Inf");
    }

    #[test]
    fn finite_output_stays_numeric() {
        let value = serde_json::to_value(outcome(0.42)).unwrap();
        assert_eq!(value["output"].as_f64(), Some(0.42));
    }
}
