//! Display metadata for parameter columns.

use serde::{Deserialize, Serialize};

use sweep_types::Assignment;

/// How one parameter is shown to the user.
///
/// `scale` converts native units to display units (Hz shown as kHz uses
/// `1e-3`, H shown as µH uses `1e6`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayColumn {
    pub key: String,
    pub label: String,
    pub scale: f64,
}

impl DisplayColumn {
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            label: key.clone(),
            key,
            scale: 1.0,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Value of this column in display units, or NaN if the assignment
    /// lacks the key.
    pub fn display_value(&self, assignment: &Assignment) -> f64 {
        assignment
            .value_of(&self.key)
            .map_or(f64::NAN, |v| v * self.scale)
    }

    /// Unlabelled, unscaled columns for `keys`.
    pub fn plain<S: AsRef<str>>(keys: &[S]) -> Vec<Self> {
        keys.iter().map(|k| Self::new(k.as_ref())).collect()
    }
}
