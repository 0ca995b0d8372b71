use crate::error::{DelayError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Substring that selects delay lines in simulator logs.
pub const DEFAULT_MARKER: &str = "Packet PDCP delay";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub extraction: ExtractionConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ExtractionConfig {
    pub marker: String,
    pub output_prefix: String,
    pub output_extension: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    pub to_ms: bool,
    pub summary: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            marker: DEFAULT_MARKER.to_string(),
            output_prefix: "delays_".to_string(),
            output_extension: "txt".to_string(),
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(DelayError::Config {
                message: format!("Configuration file not found: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| DelayError::Config {
                message: format!("Failed to read config file {}: {}", path.display(), e),
            })?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| DelayError::Config {
                message: format!("Failed to parse config file {}: {}", path.display(), e),
            })?;

        tracing::debug!(path = %path.display(), "Loaded configuration file");
        Ok(config)
    }

    pub fn load_with_defaults<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => {
                let default_paths = ["pdcp-delays.toml", ".pdcp-delays.toml"];

                for default_path in &default_paths {
                    if Path::new(default_path).exists() {
                        return Self::load_from_file(default_path);
                    }
                }

                Ok(Self::default())
            }
        }
    }

    /// Flags only ever switch options on; absent flags keep the file's value.
    pub fn merge_with_cli_args(&mut self, cli_args: &CliOverrides) {
        if cli_args.to_ms {
            self.output.to_ms = true;
        }

        if cli_args.summary {
            self.output.summary = true;
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)
            .map_err(|e| DelayError::Config {
                message: format!("Failed to serialize config: {}", e),
            })?;

        std::fs::write(path, content)
            .map_err(|e| DelayError::Config {
                message: format!("Failed to write config file {}: {}", path.display(), e),
            })?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.extraction.marker.is_empty() {
            return Err(DelayError::Config {
                message: "The line marker must not be empty".to_string(),
            });
        }

        // An empty prefix derives `x.txt` from `x.txt`, i.e. the input itself.
        if self.extraction.output_prefix.is_empty() {
            return Err(DelayError::Config {
                message: "The output prefix must not be empty".to_string(),
            });
        }

        if self.extraction.output_extension.is_empty() {
            return Err(DelayError::Config {
                message: "The output extension must not be empty".to_string(),
            });
        }

        if self
            .extraction
            .output_prefix
            .contains(|c| c == '/' || c == '\\')
        {
            return Err(DelayError::Config {
                message: format!(
                    "Output prefix must not contain path separators: {}",
                    self.extraction.output_prefix
                ),
            });
        }

        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub to_ms: bool,
    pub summary: bool,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_to_ms(mut self, to_ms: bool) -> Self {
        self.to_ms = to_ms;
        self
    }

    pub fn with_summary(mut self, summary: bool) -> Self {
        self.summary = summary;
        self
    }
}
