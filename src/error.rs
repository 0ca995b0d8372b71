use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DelayError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Output file already exists: {path}")]
    OutputExists { path: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Path validation failed: {path}")]
    InvalidPath { path: String },

    #[error("Invalid sample '{token}' in {path}")]
    InvalidSample { path: String, token: String },

    #[error("Invalid comparison entry: {entry}")]
    InvalidEntry { entry: String },
}

impl DelayError {
    pub fn read(path: &Path, source: std::io::Error) -> Self {
        DelayError::Read {
            path: path.display().to_string(),
            source,
        }
    }

    pub fn write(path: &Path, source: std::io::Error) -> Self {
        DelayError::Write {
            path: path.display().to_string(),
            source,
        }
    }

    /// Process exit status for this error. Usage-class failures share clap's code.
    pub fn exit_code(&self) -> i32 {
        match self {
            DelayError::OutputExists { .. } | DelayError::InvalidEntry { .. } => 2,
            _ => 1,
        }
    }
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for DelayError {
    fn user_message(&self) -> String {
        match self {
            DelayError::Read { path, source } => {
                format!("Could not read input {}: {}", path, source)
            }
            DelayError::Write { path, source } => {
                format!("Could not write output {}: {}", path, source)
            }
            DelayError::OutputExists { path } => {
                format!("Output file {} already exists", path)
            }
            DelayError::Config { message } => {
                format!("Configuration error: {}", message)
            }
            DelayError::InvalidPath { path } => {
                format!("Invalid file path: {}", path)
            }
            DelayError::InvalidSample { path, token } => {
                format!("{} contains a non-numeric value: {}", path, token)
            }
            DelayError::InvalidEntry { entry } => {
                format!("Cannot read comparison entry '{}'", entry)
            }
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            DelayError::OutputExists { .. } => Some(
                "Use --force to overwrite it or choose another path with --out.".to_string()
            ),
            DelayError::Config { .. } => Some(
                "Check your configuration file syntax, or regenerate one with --generate-config.".to_string()
            ),
            DelayError::Write { .. } => Some(
                "Ensure the destination directory exists and is writable.".to_string()
            ),
            DelayError::InvalidEntry { .. } => Some(
                "Write entries as [GROUP:]LABEL=PATH, e.g. 20MHz:Sym-OFDMA=delays_sym_20MHz.txt.".to_string()
            ),
            DelayError::InvalidPath { .. } => Some(
                "Pass a path to a log file, or name the output explicitly with --out.".to_string()
            ),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, DelayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_friendly_messages() {
        let error = DelayError::OutputExists {
            path: "all.txt".to_string(),
        };
        assert!(error.user_message().contains("all.txt"));
        assert!(error.suggestion().unwrap().contains("--force"));
    }

    #[test]
    fn test_exit_codes() {
        let exists = DelayError::OutputExists {
            path: "out.txt".to_string(),
        };
        assert_eq!(exists.exit_code(), 2);

        let entry = DelayError::InvalidEntry {
            entry: "=x.txt".to_string(),
        };
        assert_eq!(entry.exit_code(), 2);
        assert!(entry.suggestion().unwrap().contains("LABEL=PATH"));

        let io = DelayError::write(
            Path::new("out.txt"),
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(io.exit_code(), 1);
        assert!(io.user_message().contains("out.txt"));
    }
}
