//! Descriptive statistics over delay samples, and a loader for the output format.

use crate::error::{DelayError, Result};
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleStatistics {
    pub count: usize,
    pub mean: f64,
    /// Population standard deviation (divides by `count`).
    pub std: f64,
    pub min: f64,
    pub max: f64,
}

impl SampleStatistics {
    /// `None` for an empty batch.
    pub fn compute(samples: &[f64]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }

        let n = samples.len() as f64;
        let mean = samples.iter().sum::<f64>() / n;
        let variance = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;

        let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
        let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Some(Self {
            count: samples.len(),
            mean,
            std: variance.sqrt(),
            min,
            max,
        })
    }

    pub fn display_summary(&self, unit: &str) -> String {
        format!(
            "n={} mean={:.4} {unit} std={:.4} {unit} min={:.4} {unit} max={:.4} {unit}",
            self.count, self.mean, self.std, self.min, self.max
        )
    }

    /// Count, mean and spread only, as used in comparison rows.
    pub fn display_brief(&self, unit: &str) -> String {
        format!(
            "n={} mean={:.4} {unit} std={:.4} {unit}",
            self.count, self.mean, self.std
        )
    }
}

/// Reads a delays file back as a flat array. Tokens may be split by any whitespace.
pub fn load_samples(path: &Path) -> Result<Vec<f64>> {
    let content = std::fs::read_to_string(path).map_err(|e| DelayError::read(path, e))?;
    parse_samples(&content).map_err(|token| DelayError::InvalidSample {
        path: path.display().to_string(),
        token,
    })
}

fn parse_samples(content: &str) -> std::result::Result<Vec<f64>, String> {
    content
        .split_whitespace()
        .map(|token| token.parse::<f64>().map_err(|_| token.to_string()))
        .collect()
}
