//! The user-supplied function under study.

use sweep_types::{Assignment, EvaluatorError};

/// Maps a complete parameter assignment to one output scalar.
///
/// Implementations should be pure. NaN or infinite results are legitimate
/// (they classify as NG); returning `Err` aborts the run.
pub trait Evaluator: Send + Sync {
    fn evaluate(&self, assignment: &Assignment) -> Result<f64, EvaluatorError>;

    /// Keys this evaluator reads. When non-empty, the engine checks them
    /// against the configured parameters before the first trial.
    fn declared_keys(&self) -> &[&str] {
        &[]
    }

    /// Human-readable evaluator name.
    fn name(&self) -> &str {
        "custom"
    }
}

/// Evaluator backed by a closure.
pub struct FnEvaluator<F> {
    name: String,
    keys: Vec<&'static str>,
    f: F,
}

/// Wrap a closure as an [`Evaluator`].
pub fn from_fn<F>(f: F) -> FnEvaluator<F>
where
    F: Fn(&Assignment) -> Result<f64, EvaluatorError> + Send + Sync,
{
    FnEvaluator {
        name: "custom".to_string(),
        keys: Vec::new(),
        f,
    }
}

impl<F> FnEvaluator<F> {
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_keys(mut self, keys: &[&'static str]) -> Self {
        self.keys = keys.to_vec();
        self
    }
}

impl<F> std::fmt::Debug for FnEvaluator<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnEvaluator")
            .field("name", &self.name)
            .field("keys", &self.keys)
            .finish_non_exhaustive()
    }
}

impl<F> Evaluator for FnEvaluator<F>
where
    F: Fn(&Assignment) -> Result<f64, EvaluatorError> + Send + Sync,
{
    fn evaluate(&self, assignment: &Assignment) -> Result<f64, EvaluatorError> {
        (self.f)(assignment)
    }

    fn declared_keys(&self) -> &[&str] {
        &self.keys
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closure_evaluator_reads_assignment() {
        let eval = from_fn(|x| Ok(x.get("a")? * x.get("b")?))
            .named("product")
            .with_keys(&["a", "b"]);

        let a = Assignment::from_pairs([("a", 3.0), ("b", 4.0)]);
        assert_eq!(eval.evaluate(&a).unwrap(), 12.0);
        assert_eq!(eval.name(), "product");
        assert_eq!(eval.declared_keys(), &["a", "b"]);
    }

    #[test]
    fn misspelt_key_propagates() {
        let eval = from_fn(|x| x.get("freq"));
        let a = Assignment::from_pairs([("f", 1.0)]);
        assert_eq!(
            eval.evaluate(&a).unwrap_err(),
            EvaluatorError::UndeclaredKey {
                key: "freq".to_string()
            }
        );
    }
}
