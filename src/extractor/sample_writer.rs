use crate::error::{DelayError, Result};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

const NANOS_PER_MILLI: f64 = 1_000_000.0;
const INTEGER_TOLERANCE: f64 = 1e-9;

/// Renders one sample the way it appears in an output file.
///
/// Converted values always carry six fractional digits. Unconverted values
/// close enough to an integer drop the decimal point entirely; everything
/// else uses the shortest decimal that reads back to the same `f64`.
pub fn format_sample(value: f64, convert_to_milli: bool) -> String {
    if convert_to_milli {
        return format!("{:.6}", value / NANOS_PER_MILLI);
    }

    if !value.is_finite() {
        return value.to_string();
    }

    let nearest = value.round();
    if (value - nearest).abs() < INTEGER_TOLERANCE {
        if nearest == 0.0 {
            // avoid "-0"
            "0".to_string()
        } else {
            format!("{:.0}", nearest)
        }
    } else {
        value.to_string()
    }
}

/// Writes one value per line to `writer`, returning the number of lines.
pub fn write_samples_to<W: Write>(
    mut writer: W,
    samples: &[f64],
    convert_to_milli: bool,
) -> std::io::Result<usize> {
    for &value in samples {
        writeln!(writer, "{}", format_sample(value, convert_to_milli))?;
    }
    writer.flush()?;
    Ok(samples.len())
}

/// Creates or truncates `path` and fills it with the formatted samples.
pub fn write_samples(path: &Path, samples: &[f64], convert_to_milli: bool) -> Result<usize> {
    let file = fs::File::create(path).map_err(|e| DelayError::write(path, e))?;
    let written = write_samples_to(BufWriter::new(file), samples, convert_to_milli)
        .map_err(|e| DelayError::write(path, e))?;

    tracing::debug!(path = %path.display(), written, convert_to_milli, "Wrote samples");
    Ok(written)
}
