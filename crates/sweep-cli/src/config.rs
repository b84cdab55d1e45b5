//! Run file: what to sweep, how to show it and where to export it.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use sweep_engine::{Interval, ParameterSpec, SweepConfig};
use sweep_report::DisplayColumn;

use crate::cli::Args;

fn default_display_scale() -> f64 {
    1.0
}

/// One swept parameter plus how it is shown in tables and TSV files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterEntry {
    #[serde(flatten)]
    pub spec: ParameterSpec,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default = "default_display_scale")]
    pub display_scale: f64,
}

impl ParameterEntry {
    pub fn new(spec: ParameterSpec) -> Self {
        Self {
            spec,
            label: None,
            display_scale: 1.0,
        }
    }

    pub fn shown_as(mut self, label: &str, display_scale: f64) -> Self {
        self.label = Some(label.to_string());
        self.display_scale = display_scale;
        self
    }

    pub fn column(&self) -> DisplayColumn {
        let col = DisplayColumn::new(self.spec.key.as_str()).with_scale(self.display_scale);
        match &self.label {
            Some(label) => col.with_label(label.as_str()),
            None => col,
        }
    }
}

/// Contents of a JSON run file. Every field is optional; missing fields
/// take the values of the built-in wireless-power-transfer example.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunFile {
    pub parameters: Vec<ParameterEntry>,
    pub interval: Interval,
    pub max_trials: u64,
    pub max_ok_save: usize,
    pub max_ng_save: usize,
    /// Rows printed per table; 0 prints all.
    pub max_print: usize,
    pub print_every: u64,
    pub seed: Option<u64>,
    pub evaluator: String,
    pub ok_tsv: Option<PathBuf>,
    pub ng_tsv: Option<PathBuf>,
    pub xlsx: Option<PathBuf>,
    pub json: Option<PathBuf>,
}

impl Default for RunFile {
    fn default() -> Self {
        Self {
            parameters: vec![
                ParameterEntry::new(ParameterSpec::fixed("k", 0.01)),
                ParameterEntry::new(ParameterSpec::log("f", 10_000.0, 100_000.0))
                    .shown_as("f [kHz]", 1e-3),
                ParameterEntry::new(ParameterSpec::log("R1", 1.0, 1.0)).shown_as("R1 [Ω]", 1.0),
                ParameterEntry::new(ParameterSpec::log("R2", 10.0, 10.0)).shown_as("R2 [Ω]", 1.0),
                ParameterEntry::new(ParameterSpec::log("L1", 100e-6, 200e-6))
                    .shown_as("L1 [µH]", 1e6),
                ParameterEntry::new(ParameterSpec::log("L2", 100e-6, 200e-6))
                    .shown_as("L2 [µH]", 1e6),
                ParameterEntry::new(ParameterSpec::log("C1", 1e-9, 47e-9))
                    .shown_as("C1 [nF]", 1e9),
                ParameterEntry::new(ParameterSpec::log("C2", 1e-9, 47e-9))
                    .shown_as("C2 [nF]", 1e9),
            ],
            interval: Interval::new(0.35, 0.5),
            max_trials: 10_000_000,
            max_ok_save: 10,
            max_ng_save: 10,
            max_print: 10,
            print_every: 200_000,
            seed: None,
            evaluator: "wpt_ss_efficiency".to_string(),
            ok_tsv: None,
            ng_tsv: None,
            xlsx: None,
            json: None,
        }
    }
}

impl RunFile {
    /// Read a run file from disk.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading run file {}", path.display()))?;
        let file: Self = serde_json::from_str(&text)
            .with_context(|| format!("parsing run file {}", path.display()))?;
        Ok(file.normalised())
    }

    /// The run file named by `args` (or the built-in one) with command-line
    /// overrides applied.
    pub fn resolve(args: &Args) -> anyhow::Result<Self> {
        let file = match &args.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        Ok(file.with_overrides(args))
    }

    pub fn with_overrides(mut self, args: &Args) -> Self {
        if let Some(seed) = args.seed {
            self.seed = Some(seed);
        }
        if let Some(n) = args.max_trials {
            self.max_trials = n;
        }
        if let Some(n) = args.max_ok_save {
            self.max_ok_save = n;
        }
        if let Some(n) = args.max_ng_save {
            self.max_ng_save = n;
        }
        if let Some(n) = args.max_print {
            self.max_print = n;
        }
        if let Some(n) = args.print_every {
            self.print_every = n;
        }
        if let Some(name) = &args.evaluator {
            self.evaluator = name.clone();
        }
        if let Some(path) = &args.ok_tsv {
            self.ok_tsv = Some(path.clone());
        }
        if let Some(path) = &args.ng_tsv {
            self.ng_tsv = Some(path.clone());
        }
        if let Some(path) = &args.xlsx {
            self.xlsx = Some(path.clone());
        }
        if let Some(path) = &args.json {
            self.json = Some(path.clone());
        }
        self.normalised()
    }

    /// An empty output path means "do not export".
    fn normalised(mut self) -> Self {
        for path in [
            &mut self.ok_tsv,
            &mut self.ng_tsv,
            &mut self.xlsx,
            &mut self.json,
        ] {
            if path.as_ref().is_some_and(|p| p.as_os_str().is_empty()) {
                *path = None;
            }
        }
        self
    }

    pub fn sweep_config(&self) -> SweepConfig {
        let config = SweepConfig::new(
            self.parameters.iter().map(|p| p.spec.clone()).collect(),
            self.interval,
        )
        .with_max_trials(self.max_trials)
        .with_capacities(self.max_ok_save, self.max_ng_save)
        .with_progress_every(self.print_every);
        match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }

    pub fn columns(&self) -> Vec<DisplayColumn> {
        self.parameters.iter().map(ParameterEntry::column).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;
    use sweep_engine::SamplingMethod;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["mcsweep"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn default_is_the_wpt_example() {
        let file = RunFile::default();
        let keys: Vec<&str> = file.parameters.iter().map(|p| p.spec.key.as_str()).collect();
        assert_eq!(keys, ["k", "f", "R1", "R2", "L1", "L2", "C1", "C2"]);
        assert_eq!(file.interval, Interval::new(0.35, 0.5));
        assert_eq!(file.evaluator, "wpt_ss_efficiency");
        assert!(file.sweep_config().validate().is_ok());
    }

    #[test]
    fn columns_carry_labels_and_scales() {
        let cols = RunFile::default().columns();
        assert_eq!(cols[0].label, "k");
        assert_eq!(cols[1].label, "f [kHz]");
        assert_eq!(cols[1].scale, 1e-3);
        assert_eq!(cols[6].scale, 1e9);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        write!(
            tmp,
            r#"{{
                "parameters": [
                    {{"key": "x", "min": 0.0, "max": 1.0}},
                    {{"key": "y", "min": 1.0, "max": 100.0, "scale": "log", "label": "y [%]"}}
                ],
                "interval": {{"min": 0.2, "max": 0.8}},
                "evaluator": "sum",
                "ok_tsv": "",
                "xlsx": ""
            }}"#
        )
        .unwrap();

        let file = RunFile::load(tmp.path()).unwrap();
        assert_eq!(file.parameters.len(), 2);
        assert_eq!(file.parameters[0].spec.method, SamplingMethod::Linear);
        assert_eq!(file.parameters[1].spec.method, SamplingMethod::Log);
        assert_eq!(file.parameters[1].display_scale, 1.0);
        assert_eq!(file.parameters[1].label.as_deref(), Some("y [%]"));
        assert_eq!(file.max_trials, 10_000_000);
        assert_eq!(file.ok_tsv, None);
        assert_eq!(file.xlsx, None);
        assert_eq!(file.seed, None);
    }

    #[test]
    fn malformed_file_names_the_path() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        write!(tmp, "{{ not json").unwrap();
        let err = RunFile::load(tmp.path()).unwrap_err();
        assert!(format!("{err:#}").contains("parsing run file"));
    }

    #[test]
    fn command_line_overrides_win() {
        let file = RunFile::default().with_overrides(&args(&[
            "--seed",
            "7",
            "--max-trials",
            "500",
            "--max-ok-save",
            "3",
            "--print-every",
            "0",
            "--json",
            "out.json",
            "--xlsx",
            "result.xlsx",
        ]));
        assert_eq!(file.seed, Some(7));
        assert_eq!(file.max_trials, 500);
        assert_eq!(file.max_ok_save, 3);
        assert_eq!(file.max_ng_save, 10);
        assert_eq!(file.print_every, 0);
        assert_eq!(file.json, Some(PathBuf::from("out.json")));
        assert_eq!(file.xlsx, Some(PathBuf::from("result.xlsx")));
        assert_eq!(file.ng_tsv, None);
        assert_eq!(file.evaluator, "wpt_ss_efficiency");

        let config = file.sweep_config();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.max_trials, 500);
        assert_eq!(config.ok_capacity, 3);
    }

    #[test]
    fn dump_round_trips() {
        let file = RunFile::default();
        let text = serde_json::to_string_pretty(&file).unwrap();
        assert!(text.contains("\"scale\": \"log\""));
        let back: RunFile = serde_json::from_str(&text).unwrap();
        assert_eq!(back, file);
    }
}
