//! One trial's parameter values.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::sync::Arc;

use crate::errors::EvaluatorError;

/// Mapping from parameter key to the value sampled for one trial.
///
/// Keys are shared between all assignments of a run and kept in configured
/// order; values are stored in native units.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    keys: Arc<[String]>,
    values: Vec<f64>,
}

impl Assignment {
    /// Start an empty assignment over `keys`. Values are pushed in key order.
    pub fn with_keys(keys: Arc<[String]>) -> Self {
        let values = Vec::with_capacity(keys.len());
        Self { keys, values }
    }

    /// Build a complete assignment from `(key, value)` pairs.
    pub fn from_pairs<K: Into<String>>(pairs: impl IntoIterator<Item = (K, f64)>) -> Self {
        let (keys, values): (Vec<String>, Vec<f64>) =
            pairs.into_iter().map(|(k, v)| (k.into(), v)).unzip();
        Self {
            keys: keys.into(),
            values,
        }
    }

    /// Append the value for the next key in order.
    pub fn push(&mut self, value: f64) {
        debug_assert!(self.values.len() < self.keys.len());
        self.values.push(value);
    }

    pub fn is_complete(&self) -> bool {
        self.values.len() == self.keys.len()
    }

    /// Value for `key`.
    ///
    /// Fails immediately when `key` is not a configured parameter: a misspelt
    /// key must surface at the first trial rather than read as a default.
    pub fn get(&self, key: &str) -> Result<f64, EvaluatorError> {
        self.value_of(key).ok_or_else(|| EvaluatorError::UndeclaredKey {
            key: key.to_string(),
        })
    }

    /// Non-failing lookup for reporting code.
    pub fn value_of(&self, key: &str) -> Option<f64> {
        self.keys
            .iter()
            .position(|k| k == key)
            .and_then(|i| self.values.get(i).copied())
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.keys
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }
}

impl Serialize for Assignment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, &value)?;
        }
        map.end()
    }
}
