use crate::batch::RunMode;
use crate::compare::SampleUnit;
use crate::config::{CliOverrides, Config};
use crate::error::Result;
use crate::ui::OutputMode;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pdcp-delays")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Extract Packet PDCP delay samples from simulation logs")]
#[command(
    long_about = "Scans simulation logs for lines containing \"Packet PDCP delay\" and writes \
                  the first number on each such line to a plain text file, one value per line."
)]
#[command(after_help = "EXAMPLES:\n  \
    pdcp-delays sym_20MHz.log rb_20MHz.log\n  \
    pdcp-delays run1.log run2.log --out all_delays.txt --to-ms\n  \
    pdcp-delays sym.log --force --summary -v\n  \
    pdcp-delays --compare 20MHz:RB-OFDMA=delays_rb_20MHz.txt 20MHz:Sym-OFDMA=delays_sym_20MHz.txt\n  \
    pdcp-delays --generate-config --config pdcp-delays.toml")]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Input log files (with --compare: delays files as [GROUP:]LABEL=PATH)
    #[arg(required_unless_present = "generate_config", num_args = 1..)]
    pub inputs: Vec<PathBuf>,

    /// Combined output file (otherwise each input gets delays_<name>.txt)
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Convert values from nanoseconds to milliseconds
    #[arg(long)]
    pub to_ms: bool,

    /// Allow overwriting existing output files
    #[arg(long)]
    pub force: bool,

    /// Print statistics for each written output
    #[arg(long)]
    pub summary: bool,

    /// Print mean/std in ms for existing delays files instead of extracting
    #[arg(long, conflicts_with_all = ["out", "to_ms", "force", "summary"])]
    pub compare: bool,

    /// Unit of the values in compared files
    #[arg(long, value_enum, default_value_t = SampleUnit::Ns, requires = "compare")]
    pub unit: SampleUnit,

    /// Verbose output level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress warnings and progress)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output format for messages
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Configuration file path
    #[arg(short, long, help = "Path to TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Generate sample configuration file
    #[arg(long, help = "Generate a sample configuration file and exit")]
    pub generate_config: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON formatted output
    Json,
    /// Plain text output
    Plain,
}

impl Cli {
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_with_defaults(self.config.as_ref())?;

        let overrides = self.create_cli_overrides();
        config.merge_with_cli_args(&overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        CliOverrides::new()
            .with_to_ms(self.to_ms)
            .with_summary(self.summary)
    }

    pub fn output_mode(&self) -> OutputMode {
        match self.output_format {
            OutputFormat::Human => OutputMode::Human,
            OutputFormat::Json => OutputMode::Json,
            OutputFormat::Plain => OutputMode::Plain,
        }
    }

    pub fn run_mode(&self) -> RunMode {
        RunMode::from_target(self.out.clone())
    }

    pub fn config_output_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(|| PathBuf::from("pdcp-delays.toml"))
    }
}
