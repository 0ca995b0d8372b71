//! Side-by-side statistics over existing delays files, grouped by
//! configuration (bandwidth, scheme, ...).

use crate::error::{DelayError, Result};
use crate::stats::{load_samples, SampleStatistics};
use clap::ValueEnum;
use serde::Serialize;
use std::path::{Path, PathBuf};

const NS_PER_MS: f64 = 1_000_000.0;

/// Unit of the values stored in the compared files. Rows are always in ms.
#[derive(Debug, Clone, Copy, PartialEq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SampleUnit {
    /// Raw nanoseconds, as written without --to-ms
    Ns,
    /// Already converted with --to-ms
    Ms,
}

impl SampleUnit {
    fn to_ms(self, value: f64) -> f64 {
        match self {
            SampleUnit::Ns => value / NS_PER_MS,
            SampleUnit::Ms => value,
        }
    }
}

/// One file to compare, written on the command line as `[GROUP:]LABEL=PATH`
/// or as a bare `PATH` labelled by its file stem.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonEntry {
    pub group: Option<String>,
    pub label: String,
    pub path: PathBuf,
}

impl ComparisonEntry {
    pub fn parse(spec: &str) -> Result<Self> {
        let invalid = || DelayError::InvalidEntry {
            entry: spec.to_string(),
        };

        let Some((head, path)) = spec.split_once('=') else {
            let path = PathBuf::from(spec);
            let label = path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .ok_or_else(invalid)?;
            return Ok(Self {
                group: None,
                label,
                path,
            });
        };

        let (group, label) = match head.split_once(':') {
            Some((group, label)) if !group.is_empty() => (Some(group.to_string()), label),
            Some(_) => return Err(invalid()),
            None => (None, head),
        };

        if label.is_empty() || path.is_empty() {
            return Err(invalid());
        }

        Ok(Self {
            group,
            label: label.to_string(),
            path: PathBuf::from(path),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub label: String,
    pub path: String,
    /// `None` when the file is missing, unreadable or holds no values.
    pub statistics: Option<SampleStatistics>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonGroup {
    pub name: Option<String>,
    pub rows: Vec<ComparisonRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComparisonReport {
    pub source_unit: SampleUnit,
    pub unit: &'static str,
    pub groups: Vec<ComparisonGroup>,
}

/// Groups keep the order in which they first appear; rows keep argument order.
pub fn compare(entries: &[ComparisonEntry], source_unit: SampleUnit) -> ComparisonReport {
    let mut groups: Vec<ComparisonGroup> = Vec::new();

    for entry in entries {
        let row = ComparisonRow {
            label: entry.label.clone(),
            path: entry.path.display().to_string(),
            statistics: load_statistics(&entry.path, source_unit),
        };

        match groups.iter_mut().find(|g| g.name == entry.group) {
            Some(group) => group.rows.push(row),
            None => groups.push(ComparisonGroup {
                name: entry.group.clone(),
                rows: vec![row],
            }),
        }
    }

    ComparisonReport {
        source_unit,
        unit: "ms",
        groups,
    }
}

/// Parses every command-line entry, then compares them.
pub fn compare_inputs(inputs: &[PathBuf], source_unit: SampleUnit) -> Result<ComparisonReport> {
    let entries = inputs
        .iter()
        .map(|input| ComparisonEntry::parse(&input.to_string_lossy()))
        .collect::<Result<Vec<_>>>()?;

    tracing::info!(entries = entries.len(), unit = ?source_unit, "Comparing delays files");
    Ok(compare(&entries, source_unit))
}

fn load_statistics(path: &Path, source_unit: SampleUnit) -> Option<SampleStatistics> {
    match load_samples(path) {
        Ok(samples) => {
            let converted: Vec<f64> = samples.into_iter().map(|v| source_unit.to_ms(v)).collect();
            SampleStatistics::compute(&converted)
        }
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "Comparison input unavailable");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_parse_grouped_entry() {
        let entry = ComparisonEntry::parse("20MHz:Sym-OFDMA=metricas/delays_sym_20MHz.txt").unwrap();
        assert_eq!(entry.group.as_deref(), Some("20MHz"));
        assert_eq!(entry.label, "Sym-OFDMA");
        assert_eq!(entry.path, PathBuf::from("metricas/delays_sym_20MHz.txt"));
    }

    #[test]
    fn test_parse_labelled_and_bare_entries() {
        let labelled = ComparisonEntry::parse("RB=delays_rb.txt").unwrap();
        assert_eq!(labelled.group, None);
        assert_eq!(labelled.label, "RB");

        let bare = ComparisonEntry::parse("out/delays_rb_10MHz.txt").unwrap();
        assert_eq!(bare.group, None);
        assert_eq!(bare.label, "delays_rb_10MHz");
        assert_eq!(bare.path, PathBuf::from("out/delays_rb_10MHz.txt"));
    }

    #[test]
    fn test_parse_rejects_incomplete_entries() {
        for spec in ["=x.txt", "RB=", ":RB=x.txt", "10MHz:=x.txt", ".."] {
            assert!(
                matches!(ComparisonEntry::parse(spec), Err(DelayError::InvalidEntry { .. })),
                "{spec} should be rejected"
            );
        }
    }

    #[test]
    fn test_compare_converts_and_groups() {
        let temp_dir = TempDir::new().unwrap();
        let sym = temp_dir.path().join("delays_sym.txt");
        let rb = temp_dir.path().join("delays_rb.txt");
        let tdma = temp_dir.path().join("delays_tdma.txt");
        fs::write(&sym, "1000000\n3000000\n").unwrap();
        fs::write(&rb, "2000000\n").unwrap();
        fs::write(&tdma, "4000000\n").unwrap();

        let entries = vec![
            ComparisonEntry { group: Some("10MHz".into()), label: "Sym".into(), path: sym },
            ComparisonEntry { group: Some("20MHz".into()), label: "TDMA".into(), path: tdma },
            ComparisonEntry { group: Some("10MHz".into()), label: "RB".into(), path: rb },
        ];
        let report = compare(&entries, SampleUnit::Ns);

        assert_eq!(report.unit, "ms");
        assert_eq!(report.groups.len(), 2);
        assert_eq!(report.groups[0].name.as_deref(), Some("10MHz"));

        let labels: Vec<&str> = report.groups[0].rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["Sym", "RB"]);

        let sym_stats = report.groups[0].rows[0].statistics.as_ref().unwrap();
        assert_eq!(sym_stats.count, 2);
        assert_eq!(sym_stats.mean, 2.0);
        assert_eq!(sym_stats.std, 1.0);
        assert_eq!(report.groups[1].rows[0].statistics.as_ref().unwrap().mean, 4.0);
    }

    #[test]
    fn test_millisecond_files_are_not_rescaled() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("delays_ms.txt");
        fs::write(&path, "1.500000\n2.500000\n").unwrap();

        let entry = ComparisonEntry { group: None, label: "ms".into(), path };
        let report = compare(&[entry], SampleUnit::Ms);

        assert_eq!(report.groups[0].rows[0].statistics.as_ref().unwrap().mean, 2.0);
    }

    #[test]
    fn test_unavailable_files_become_empty_rows() {
        let temp_dir = TempDir::new().unwrap();
        let empty = temp_dir.path().join("delays_empty.txt");
        let garbage = temp_dir.path().join("delays_bad.txt");
        fs::write(&empty, "").unwrap();
        fs::write(&garbage, "12\nnot-a-number\n").unwrap();

        let entries = vec![
            ComparisonEntry { group: None, label: "missing".into(), path: temp_dir.path().join("nope.txt") },
            ComparisonEntry { group: None, label: "empty".into(), path: empty },
            ComparisonEntry { group: None, label: "bad".into(), path: garbage },
        ];
        let report = compare(&entries, SampleUnit::Ns);

        assert_eq!(report.groups.len(), 1);
        assert!(report.groups[0].rows.iter().all(|row| row.statistics.is_none()));
    }

    #[test]
    fn test_compare_inputs_propagates_bad_entry() {
        let inputs = vec![PathBuf::from("RB=delays_rb.txt"), PathBuf::from("=oops")];
        assert!(matches!(
            compare_inputs(&inputs, SampleUnit::Ns),
            Err(DelayError::InvalidEntry { .. })
        ));
    }
}
