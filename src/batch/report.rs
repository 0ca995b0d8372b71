use crate::stats::SampleStatistics;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum InputOutcome {
    Read { samples: usize },
    Missing,
    OutputExists { output: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct InputRecord {
    pub path: String,
    #[serde(flatten)]
    pub outcome: InputOutcome,
}

#[derive(Debug, Clone, Serialize)]
pub struct OutputRecord {
    pub path: String,
    pub samples_written: usize,
    pub unit: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statistics: Option<SampleStatistics>,
}

/// What a run did, input by input and output by output.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub mode: &'static str,
    pub inputs: Vec<InputRecord>,
    pub outputs: Vec<OutputRecord>,
    pub warnings: Vec<String>,
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(skip)]
    start_time: Instant,
}

impl BatchReport {
    pub fn new(mode: &'static str) -> Self {
        Self {
            mode,
            inputs: Vec::new(),
            outputs: Vec::new(),
            warnings: Vec::new(),
            completed_at: None,
            start_time: Instant::now(),
        }
    }

    pub fn record_input(&mut self, path: &Path, outcome: InputOutcome) {
        self.inputs.push(InputRecord {
            path: path.display().to_string(),
            outcome,
        });
    }

    pub fn record_output(&mut self, output: OutputRecord) {
        self.outputs.push(output);
    }

    pub fn add_warning<S: Into<String>>(&mut self, warning: S) {
        self.warnings.push(warning.into());
    }

    pub fn finish(&mut self) {
        self.completed_at = Some(Utc::now());
    }

    pub fn files_read(&self) -> usize {
        self.inputs
            .iter()
            .filter(|i| matches!(i.outcome, InputOutcome::Read { .. }))
            .count()
    }

    pub fn files_skipped(&self) -> usize {
        self.inputs.len() - self.files_read()
    }

    pub fn samples_found(&self) -> usize {
        self.inputs
            .iter()
            .map(|i| match i.outcome {
                InputOutcome::Read { samples } => samples,
                _ => 0,
            })
            .sum()
    }

    pub fn samples_written(&self) -> usize {
        self.outputs.iter().map(|o| o.samples_written).sum()
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_counters() {
        let mut report = BatchReport::new("per-file");
        report.record_input(Path::new("a.log"), InputOutcome::Read { samples: 3 });
        report.record_input(Path::new("b.log"), InputOutcome::Missing);
        report.record_input(
            Path::new("c.log"),
            InputOutcome::OutputExists {
                output: "delays_c.txt".to_string(),
            },
        );
        report.record_output(OutputRecord {
            path: "delays_a.txt".to_string(),
            samples_written: 3,
            unit: "ns",
            statistics: None,
        });

        assert_eq!(report.files_read(), 1);
        assert_eq!(report.files_skipped(), 2);
        assert_eq!(report.samples_found(), 3);
        assert_eq!(report.samples_written(), 3);
    }

    #[test]
    fn test_report_serialization() {
        let mut report = BatchReport::new("combined");
        report.record_input(Path::new("a.log"), InputOutcome::Read { samples: 2 });
        report.record_input(Path::new("b.log"), InputOutcome::Missing);
        report.add_warning("b.log not found, skipping");
        report.finish();

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["mode"], "combined");
        assert_eq!(json["inputs"][0]["status"], "read");
        assert_eq!(json["inputs"][0]["samples"], 2);
        assert_eq!(json["inputs"][1]["status"], "missing");
        assert!(json["completed_at"].is_string());
        assert!(json.get("start_time").is_none());
    }
}
