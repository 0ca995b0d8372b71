use crate::error::{DelayError, Result};
use std::path::{Path, PathBuf};

/// How a run maps inputs to outputs. Chosen once, from whether `--out` was given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunMode {
    /// Every input's samples, concatenated in input order, go to one file.
    /// An existing target aborts the run before any input is read.
    Combined { target: PathBuf },
    /// Each input gets its own derived output next to it.
    /// An existing derived output skips that input only.
    PerFile,
}

impl RunMode {
    pub fn from_target(target: Option<PathBuf>) -> Self {
        match target {
            Some(target) => RunMode::Combined { target },
            None => RunMode::PerFile,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            RunMode::Combined { .. } => "combined",
            RunMode::PerFile => "per-file",
        }
    }
}

/// `<parent>/<prefix><stem>.<extension>` for an input log.
pub fn derived_output_path(input: &Path, prefix: &str, extension: &str) -> Result<PathBuf> {
    let stem = input
        .file_stem()
        .ok_or_else(|| DelayError::InvalidPath {
            path: format!("Cannot derive an output name from {}", input.display()),
        })?;

    let mut file_name = std::ffi::OsString::from(prefix);
    file_name.push(stem);
    file_name.push(".");
    file_name.push(extension);

    let parent = input.parent().unwrap_or_else(|| Path::new(""));
    Ok(parent.join(file_name))
}
