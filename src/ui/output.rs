use crate::batch::BatchReport;
use crate::compare::{ComparisonReport, ComparisonRow};
use crate::error::{DelayError, UserFriendlyError};
use crate::stats::SampleStatistics;
use crate::ui::progress::format_duration;
use console::{style, Emoji, Term};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputMode {
    Human,
    Json,
    Plain,
}

// Emojis with text fallbacks
static CHECKMARK: Emoji = Emoji("✅ ", "✓ ");
static CROSS: Emoji = Emoji("❌ ", "✗ ");
static INFO: Emoji = Emoji("ℹ️  ", "i ");
static WARNING: Emoji = Emoji("⚠️  ", "! ");
static CHART: Emoji = Emoji("📊 ", "# ");

pub struct OutputFormatter {
    mode: OutputMode,
    use_colors: bool,
    verbose_level: u8,
    quiet: bool,
}

impl OutputFormatter {
    pub fn new(mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let use_colors = match mode {
            OutputMode::Human => Term::stdout().features().colors_supported() && !quiet,
            _ => false,
        };

        Self {
            mode,
            use_colors,
            verbose_level: if quiet { 0 } else { verbose },
            quiet,
        }
    }

    pub fn is_verbose(&self) -> bool {
        self.should_show_message(1)
    }

    pub fn success(&self, message: &str) {
        if self.should_show_message(1) {
            match self.mode {
                OutputMode::Human => self.print_human_message(MessageType::Success, message),
                OutputMode::Json => self.print_json_message("success", message),
                OutputMode::Plain => println!("SUCCESS: {}", message),
            }
        }
    }

    pub fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Human => self.print_human_message(MessageType::Error, message),
            OutputMode::Json => self.print_json_message("error", message),
            OutputMode::Plain => eprintln!("ERROR: {}", message),
        }
    }

    /// Skipped inputs and outputs. Shown at every verbosity except quiet.
    pub fn warning(&self, message: &str) {
        if self.should_show_message(0) {
            match self.mode {
                OutputMode::Human => self.print_human_message(MessageType::Warning, message),
                OutputMode::Json => self.print_json_message("warning", message),
                OutputMode::Plain => println!("WARNING: {}", message),
            }
        }
    }

    pub fn info(&self, message: &str) {
        if self.should_show_message(1) {
            match self.mode {
                OutputMode::Human => self.print_human_message(MessageType::Info, message),
                OutputMode::Json => self.print_json_message("info", message),
                OutputMode::Plain => println!("INFO: {}", message),
            }
        }
    }

    pub fn debug(&self, message: &str) {
        if self.should_show_message(2) {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        println!("  {}", style(message).dim());
                    } else {
                        println!("  DEBUG: {}", message);
                    }
                }
                OutputMode::Json => self.print_json_message("debug", message),
                OutputMode::Plain => println!("DEBUG: {}", message),
            }
        }
    }

    pub fn print_user_friendly_error(&self, error: &DelayError) {
        self.error(&error.user_message());

        if let Some(suggestion) = error.suggestion() {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        eprintln!("{}{}", INFO, style(format!("Suggestion: {}", suggestion)).cyan());
                    } else {
                        eprintln!("Suggestion: {}", suggestion);
                    }
                }
                OutputMode::Json => {
                    self.print_json_object(&serde_json::json!({
                        "type": "suggestion",
                        "message": suggestion
                    }));
                }
                OutputMode::Plain => eprintln!("SUGGESTION: {}", suggestion),
            }
        }
    }

    /// One statistics line for a written output. `None` means nothing was written.
    pub fn print_statistics(&self, label: &str, stats: Option<&SampleStatistics>, unit: &str) {
        if self.quiet {
            return;
        }

        match self.mode {
            OutputMode::Human => {
                let body = match stats {
                    Some(stats) => stats.display_summary(unit),
                    None => "no samples".to_string(),
                };
                if self.use_colors {
                    println!("{}{}: {}", CHART, style(label).bold(), style(body).cyan());
                } else {
                    println!("{}: {}", label, body);
                }
            }
            OutputMode::Json => {
                self.print_json_object(&serde_json::json!({
                    "type": "statistics",
                    "output": label,
                    "unit": unit,
                    "statistics": stats,
                }));
            }
            OutputMode::Plain => match stats {
                Some(stats) => println!("STATS: {} {}", label, stats.display_summary(unit)),
                None => println!("STATS: {} no samples", label),
            },
        }
    }

    /// Comparison rows are the command's result, so quiet does not hide them.
    pub fn print_comparison(&self, report: &ComparisonReport) {
        if self.mode == OutputMode::Json {
            let json_output =
                serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string());
            println!("{}", json_output);
            return;
        }

        for group in &report.groups {
            if let Some(name) = &group.name {
                let header = format!("--- {} ---", name);
                if self.use_colors {
                    println!("{}{}", CHART, style(header).bold());
                } else {
                    println!("{}", header);
                }
            }

            for row in &group.rows {
                self.print_comparison_row(row, report.unit);
            }
        }
    }

    fn print_comparison_row(&self, row: &ComparisonRow, unit: &str) {
        let body = match &row.statistics {
            Some(stats) => stats.display_brief(unit),
            None => "(not found or empty)".to_string(),
        };

        if self.use_colors {
            let body = match row.statistics {
                Some(_) => style(body).cyan(),
                None => style(body).yellow(),
            };
            println!("{}: {}", style(&row.label).bold(), body);
        } else {
            println!("{}: {}", row.label, body);
        }
    }

    /// Closing summary. JSON mode always emits the full report; the other
    /// modes only summarize when verbose.
    pub fn print_batch_report(&self, report: &BatchReport) {
        if self.quiet {
            return;
        }

        match self.mode {
            OutputMode::Json => {
                let json_output =
                    serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string());
                println!("{}", json_output);
            }
            OutputMode::Human if self.is_verbose() => self.print_human_report(report),
            OutputMode::Plain if self.is_verbose() => self.print_plain_report(report),
            _ => {}
        }
    }

    pub fn print_separator(&self) {
        if self.quiet {
            return;
        }

        match self.mode {
            OutputMode::Human => {
                if self.use_colors {
                    println!("{}", style("─".repeat(60)).dim());
                } else {
                    println!("{}", "-".repeat(60));
                }
            }
            OutputMode::Plain => println!("{}", "-".repeat(60)),
            OutputMode::Json => {}
        }
    }

    fn should_show_message(&self, min_verbose_level: u8) -> bool {
        !self.quiet && self.verbose_level >= min_verbose_level
    }

    fn print_human_message(&self, msg_type: MessageType, message: &str) {
        if self.use_colors {
            let (emoji, styled) = match msg_type {
                MessageType::Success => (CHECKMARK, style(message).green().bold()),
                MessageType::Error => (CROSS, style(message).red().bold()),
                MessageType::Warning => (WARNING, style(message).yellow().bold()),
                MessageType::Info => (INFO, style(message).cyan()),
            };

            match msg_type {
                MessageType::Error => eprintln!("{}{}", emoji, styled),
                _ => println!("{}{}", emoji, styled),
            }
        } else {
            let prefix = match msg_type {
                MessageType::Success => "✓",
                MessageType::Error => "✗",
                MessageType::Warning => "!",
                MessageType::Info => "i",
            };

            match msg_type {
                MessageType::Error => eprintln!("{} {}", prefix, message),
                _ => println!("{} {}", prefix, message),
            }
        }
    }

    fn print_json_message(&self, level: &str, message: &str) {
        self.print_json_object(&serde_json::json!({
            "type": "message",
            "level": level,
            "message": message,
            "timestamp": chrono::Utc::now().to_rfc3339()
        }));
    }

    fn print_json_object(&self, obj: &serde_json::Value) {
        println!(
            "{}",
            serde_json::to_string(obj).unwrap_or_else(|_| "{}".to_string())
        );
    }

    fn print_human_report(&self, report: &BatchReport) {
        self.print_separator();

        let headline = format!("Extraction completed ({} mode)", report.mode);
        if self.use_colors {
            println!("{}{}", CHECKMARK, style(headline).green().bold());
        } else {
            println!("✓ {}", headline);
        }

        println!("  Logs read:       {}", report.files_read());
        println!("  Logs skipped:    {}", report.files_skipped());
        println!("  Samples found:   {}", report.samples_found());
        println!("  Samples written: {}", report.samples_written());
        println!("  Time taken:      {}", format_duration(report.elapsed()));

        for output in &report.outputs {
            println!("  -> {} ({} values)", output.path, output.samples_written);
        }

        self.print_separator();
    }

    fn print_plain_report(&self, report: &BatchReport) {
        println!("COMPLETED: {} extraction", report.mode);
        println!("Logs read: {}", report.files_read());
        println!("Logs skipped: {}", report.files_skipped());
        println!("Samples written: {}", report.samples_written());
        println!("Duration: {:?}", report.elapsed());
    }
}

#[derive(Debug, Clone, Copy)]
enum MessageType {
    Success,
    Error,
    Warning,
    Info,
}
