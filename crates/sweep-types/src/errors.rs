use thiserror::Error;
use uuid::Uuid;

/// Main error type for a parameter sweep
#[derive(Error, Debug)]
pub enum SweepError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Evaluator error: {0}")]
    Evaluator(#[from] EvaluatorError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Sweep {run_id} was aborted by an earlier error")]
    Aborted { run_id: Uuid },
}

impl SweepError {
    /// Whether this error indicates a defect in the run configuration (as
    /// opposed to an I/O failure while exporting results).
    pub fn is_configuration_defect(&self) -> bool {
        matches!(
            self,
            SweepError::Config(_) | SweepError::Domain(_) | SweepError::Evaluator(_)
        )
    }
}

/// Errors detected while validating a sweep before the loop starts
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("No parameters configured")]
    NoParameters,

    #[error("Parameter #{index} has an empty key")]
    EmptyKey { index: usize },

    #[error("Duplicate parameter key: {key}")]
    DuplicateKey { key: String },

    #[error("Parameter {key}: bounds must be finite (got min={min}, max={max})")]
    InvalidBounds { key: String, min: f64, max: f64 },

    #[error("Evaluator reads key {key}, which is not a configured parameter")]
    MissingKey { key: String },

    #[error("Unknown evaluator: {name}")]
    UnknownEvaluator { name: String },

    #[error("{0}")]
    Invalid(String),
}

/// Sampling-domain violations. Always fatal for the run.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Parameter {key}: max < min (got min={min}, max={max})")]
    InvertedBounds { key: String, min: f64, max: f64 },

    #[error("Parameter {key}: log sampling requires min>0 and max>0 (got min={min}, max={max})")]
    NonPositiveLogBound { key: String, min: f64, max: f64 },
}

/// Errors raised by a user-supplied evaluator
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvaluatorError {
    #[error("Evaluator read undeclared key: {key}")]
    UndeclaredKey { key: String },

    #[error("Evaluation failed: {message}")]
    Failed { message: String },
}

/// Result type alias for sweep operations
pub type SweepResult<T> = Result<T, SweepError>;

/// Macro for creating free-form configuration errors
#[macro_export]
macro_rules! config_error {
    ($($arg:tt)*) => {
        $crate::SweepError::Config($crate::ConfigError::Invalid(format!($($arg)*)))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_carries_context() {
        let error = DomainError::NonPositiveLogBound {
            key: "C1".to_string(),
            min: 0.0,
            max: 47e-9,
        };

        let msg = error.to_string();
        assert!(msg.contains("C1"));
        assert!(msg.contains("min=0"));
        assert!(msg.contains("max=0.000000047"));
    }

    #[test]
    fn test_error_conversion() {
        let domain_error = DomainError::InvertedBounds {
            key: "f".to_string(),
            min: 2.0,
            max: 1.0,
        };
        let err: SweepError = domain_error.into();

        match err {
            SweepError::Domain(_) => (),
            _ => panic!("Expected Domain error"),
        }
        assert!(err.is_configuration_defect());
    }

    #[test]
    fn test_io_is_not_configuration_defect() {
        let err: SweepError = std::io::Error::other("disk full").into();
        assert!(!err.is_configuration_defect());
    }

    #[test]
    fn test_aborted_is_not_configuration_defect() {
        let run_id = Uuid::new_v4();
        let err = SweepError::Aborted { run_id };
        assert!(!err.is_configuration_defect());
        assert!(err.to_string().contains(&run_id.to_string()));
    }

    #[test]
    fn test_macros() {
        let err = config_error!("max_trials must be set: {}", 0);
        assert!(matches!(err, SweepError::Config(ConfigError::Invalid(_))));
        assert!(err.to_string().contains("max_trials must be set: 0"));
    }
}
