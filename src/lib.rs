pub mod batch;
pub mod cli;
pub mod compare;
pub mod config;
pub mod error;
pub mod extractor;
pub mod logging;
pub mod stats;
pub mod ui;

// Public API re-exports
pub use batch::{BatchReport, InputOutcome, OutputRecord, RunMode};
pub use cli::{Cli, OutputFormat};
pub use compare::{compare_inputs, ComparisonEntry, ComparisonReport, SampleUnit};
pub use config::{CliOverrides, Config, ExtractionConfig, OutputConfig};
pub use error::{DelayError, Result, UserFriendlyError};
pub use extractor::{format_sample, write_samples, SampleExtractor};
pub use stats::{load_samples, SampleStatistics};
pub use ui::{OutputFormatter, OutputMode, ProgressManager};

use std::path::{Path, PathBuf};

/// Main library interface: runs one batch of logs through the extractor.
pub struct SampleExtraction {
    config: Config,
    extractor: SampleExtractor,
    output_formatter: OutputFormatter,
    progress_manager: ProgressManager,
    force: bool,
}

impl SampleExtraction {
    pub fn new(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Result<Self> {
        config.validate()?;
        let extractor = SampleExtractor::with_marker(config.extraction.marker.clone())?;
        tracing::debug!(marker = extractor.marker(), "Extractor ready");
        let output_formatter = OutputFormatter::new(output_mode, verbose, quiet);
        let progress_manager = ProgressManager::new(!quiet && output_mode == OutputMode::Human);

        Ok(Self {
            config,
            extractor,
            output_formatter,
            progress_manager,
            force: false,
        })
    }

    pub fn from_cli(cli_args: &Cli) -> Result<Self> {
        let config = cli_args.load_config()?;

        Ok(Self::new(config, cli_args.output_mode(), cli_args.verbose, cli_args.quiet)?
            .with_force_overwrite(cli_args.force))
    }

    pub fn with_force_overwrite(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Runs every input through the extractor according to `mode`.
    ///
    /// Missing inputs and, in per-file mode, existing outputs are warnings.
    /// A combined target that already exists fails before any input is opened.
    pub fn run(&self, inputs: &[PathBuf], mode: &RunMode) -> Result<BatchReport> {
        tracing::info!(mode = mode.name(), inputs = inputs.len(), force = self.force, "Starting extraction");

        let mut report = BatchReport::new(mode.name());
        match mode {
            RunMode::Combined { target } => self.run_combined(inputs, target, &mut report)?,
            RunMode::PerFile => self.run_per_file(inputs, &mut report)?,
        }

        report.finish();
        Ok(report)
    }

    fn run_combined(&self, inputs: &[PathBuf], target: &Path, report: &mut BatchReport) -> Result<()> {
        if target.exists() && !self.force {
            return Err(DelayError::OutputExists {
                path: target.display().to_string(),
            });
        }

        let progress = self.progress_manager.create_file_progress(inputs.len() as u64);
        let mut all_samples = Vec::new();

        for (index, input) in inputs.iter().enumerate() {
            ui::progress::update_file_progress(&progress, index, input);
            self.notify(|f| f.info(&format!("Reading {}...", input.display())));

            if !input.exists() {
                self.warn_missing(report, input);
                continue;
            }

            let samples = self.extractor.extract_from_file(input)?;
            self.notify(|f| {
                f.info(&format!("  found {} values in {}", samples.len(), input.display()))
            });
            report.record_input(input, InputOutcome::Read { samples: samples.len() });
            all_samples.extend(samples);
        }

        self.write_output(report, target, &all_samples)?;
        ui::progress::finish_progress_with_summary(
            &progress,
            &format!("Wrote {} values", all_samples.len()),
            report.elapsed(),
        );

        Ok(())
    }

    fn run_per_file(&self, inputs: &[PathBuf], report: &mut BatchReport) -> Result<()> {
        let progress = self.progress_manager.create_file_progress(inputs.len() as u64);
        let extraction = &self.config.extraction;

        for (index, input) in inputs.iter().enumerate() {
            ui::progress::update_file_progress(&progress, index, input);

            if !input.exists() {
                self.warn_missing(report, input);
                continue;
            }

            let output = batch::derived_output_path(
                input,
                &extraction.output_prefix,
                &extraction.output_extension,
            )?;
            self.notify(|f| f.debug(&format!("{} -> {}", input.display(), output.display())));

            if output.exists() && !self.force {
                let message = format!(
                    "{} already exists. Use --force to overwrite or pass --out",
                    output.display()
                );
                self.notify(|f| f.warning(&message));
                tracing::warn!(input = %input.display(), output = %output.display(), "Skipping input, output exists");
                report.add_warning(message);
                report.record_input(
                    input,
                    InputOutcome::OutputExists {
                        output: output.display().to_string(),
                    },
                );
                continue;
            }

            self.notify(|f| f.info(&format!("Reading {}...", input.display())));
            let samples = self.extractor.extract_from_file(input)?;
            self.notify(|f| {
                f.info(&format!("  found {} values in {}", samples.len(), input.display()))
            });
            report.record_input(input, InputOutcome::Read { samples: samples.len() });

            self.write_output(report, &output, &samples)?;
        }

        ui::progress::finish_progress_with_summary(
            &progress,
            &format!("Processed {} logs", report.files_read()),
            report.elapsed(),
        );

        Ok(())
    }

    fn write_output(&self, report: &mut BatchReport, path: &Path, samples: &[f64]) -> Result<()> {
        let to_ms = self.config.output.to_ms;
        let written = write_samples(path, samples, to_ms)?;
        self.notify(|f| f.success(&format!("Wrote {} values to {}", written, path.display())));

        let unit = if to_ms { "ms" } else { "ns" };
        let statistics = if self.config.output.summary {
            // Read back what consumers will see, after formatting and unit conversion.
            let stats = SampleStatistics::compute(&load_samples(path)?);
            let label = path.display().to_string();
            self.notify(|f| f.print_statistics(&label, stats.as_ref(), unit));
            stats
        } else {
            None
        };

        report.record_output(OutputRecord {
            path: path.display().to_string(),
            samples_written: written,
            unit,
            statistics,
        });
        Ok(())
    }

    fn warn_missing(&self, report: &mut BatchReport, input: &Path) {
        let message = format!("{} not found, skipping", input.display());
        self.notify(|f| f.warning(&message));
        tracing::warn!(input = %input.display(), "Input not found");
        report.add_warning(message);
        report.record_input(input, InputOutcome::Missing);
    }

    fn notify<F>(&self, f: F)
    where
        F: FnOnce(&OutputFormatter),
    {
        self.progress_manager.suspend(|| f(&self.output_formatter));
    }

    /// Generate sample configuration file
    pub fn generate_sample_config<P: AsRef<Path>>(output_path: P) -> Result<()> {
        Config::default().save_to_file(output_path)
    }

    pub fn output_formatter(&self) -> &OutputFormatter {
        &self.output_formatter
    }

    /// Handle error with user-friendly output
    pub fn handle_error(&self, error: &DelayError) {
        self.output_formatter.print_user_friendly_error(error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn quiet_extraction(config: Config) -> SampleExtraction {
        SampleExtraction::new(config, OutputMode::Plain, 0, true).unwrap()
    }

    fn write_log(dir: &Path, name: &str, lines: &[&str]) -> PathBuf {
        let path = dir.join(name);
        let mut content = lines.join("\n");
        content.push('\n');
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_rejects_invalid_config() {
        let mut config = Config::default();
        config.extraction.marker.clear();
        assert!(SampleExtraction::new(config, OutputMode::Plain, 0, true).is_err());
    }

    #[test]
    fn test_per_file_scenario() {
        let temp_dir = TempDir::new().unwrap();
        let input = write_log(
            temp_dir.path(),
            "sym.log",
            &[
                "foo",
                "Packet PDCP delay = 12345 ns",
                "Packet PDCP delay = 6789.5 ns",
                "bar 42",
            ],
        );

        let report = quiet_extraction(Config::default())
            .run(&[input], &RunMode::PerFile)
            .unwrap();

        let output = temp_dir.path().join("delays_sym.txt");
        assert_eq!(fs::read_to_string(&output).unwrap(), "12345\n6789.5\n");
        assert_eq!(report.samples_written(), 2);
        assert!(report.completed_at.is_some());
    }

    #[test]
    fn test_combined_concatenates_in_input_order() {
        let temp_dir = TempDir::new().unwrap();
        let first = write_log(
            temp_dir.path(),
            "a.log",
            &["Packet PDCP delay 10", "Packet PDCP delay 20"],
        );
        let second = write_log(temp_dir.path(), "b.log", &["Packet PDCP delay 30"]);
        let target = temp_dir.path().join("all.txt");

        let mode = RunMode::from_target(Some(target.clone()));
        let report = quiet_extraction(Config::default())
            .run(&[first, second], &mode)
            .unwrap();

        assert_eq!(fs::read_to_string(&target).unwrap(), "10\n20\n30\n");
        assert_eq!(report.outputs.len(), 1);
        assert_eq!(report.mode, "combined");
    }

    #[test]
    fn test_combined_skips_missing_inputs() {
        let temp_dir = TempDir::new().unwrap();
        let present = write_log(temp_dir.path(), "a.log", &["Packet PDCP delay 5"]);
        let missing = temp_dir.path().join("missing.log");
        let target = temp_dir.path().join("all.txt");

        let mode = RunMode::from_target(Some(target.clone()));
        let report = quiet_extraction(Config::default())
            .run(&[missing, present], &mode)
            .unwrap();

        assert_eq!(fs::read_to_string(&target).unwrap(), "5\n");
        assert_eq!(report.inputs[0].outcome, InputOutcome::Missing);
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn test_combined_existing_target_fails_fast() {
        let temp_dir = TempDir::new().unwrap();
        let input = write_log(temp_dir.path(), "a.log", &["Packet PDCP delay 5"]);
        let target = temp_dir.path().join("all.txt");
        fs::write(&target, "keep\n").unwrap();

        let mode = RunMode::from_target(Some(target.clone()));
        let result = quiet_extraction(Config::default()).run(&[input], &mode);

        assert!(matches!(result, Err(DelayError::OutputExists { .. })));
        assert_eq!(fs::read_to_string(&target).unwrap(), "keep\n");
    }

    #[test]
    fn test_combined_force_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let input = write_log(temp_dir.path(), "a.log", &["Packet PDCP delay 5"]);
        let target = temp_dir.path().join("all.txt");
        fs::write(&target, "old\n").unwrap();

        let mode = RunMode::from_target(Some(target.clone()));
        quiet_extraction(Config::default())
            .with_force_overwrite(true)
            .run(&[input], &mode)
            .unwrap();

        assert_eq!(fs::read_to_string(&target).unwrap(), "5\n");
    }

    #[test]
    fn test_per_file_existing_output_skips_only_that_input() {
        let temp_dir = TempDir::new().unwrap();
        let first = write_log(temp_dir.path(), "a.log", &["Packet PDCP delay 1"]);
        let second = write_log(temp_dir.path(), "b.log", &["Packet PDCP delay 2"]);
        let existing = temp_dir.path().join("delays_a.txt");
        fs::write(&existing, "previous\n").unwrap();

        let report = quiet_extraction(Config::default())
            .run(&[first, second], &RunMode::PerFile)
            .unwrap();

        assert_eq!(fs::read_to_string(&existing).unwrap(), "previous\n");
        assert_eq!(
            fs::read_to_string(temp_dir.path().join("delays_b.txt")).unwrap(),
            "2\n"
        );
        assert!(matches!(
            report.inputs[0].outcome,
            InputOutcome::OutputExists { .. }
        ));
    }

    #[test]
    fn test_summary_reports_written_unit() {
        let temp_dir = TempDir::new().unwrap();
        let input = write_log(
            temp_dir.path(),
            "rb.log",
            &["Packet PDCP delay 1000000", "Packet PDCP delay 3000000"],
        );

        let mut config = Config::default();
        config.output.to_ms = true;
        config.output.summary = true;

        let report = quiet_extraction(config)
            .run(&[input], &RunMode::PerFile)
            .unwrap();

        let output = &report.outputs[0];
        assert_eq!(output.unit, "ms");
        let stats = output.statistics.as_ref().unwrap();
        assert_eq!(stats.count, 2);
        assert_eq!(stats.mean, 2.0);
        assert_eq!(stats.std, 1.0);
    }

    #[test]
    fn test_sample_config_generation() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("sample.toml");

        SampleExtraction::generate_sample_config(&config_path).unwrap();

        let content = fs::read_to_string(&config_path).unwrap();
        assert!(content.contains("[extraction]"));
        assert!(content.contains("[output]"));
    }
}
