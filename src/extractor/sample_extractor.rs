use crate::config::DEFAULT_MARKER;
use crate::error::{DelayError, Result};
use regex::Regex;
use std::borrow::Cow;
use std::fs;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Optionally signed integer or decimal, with an optional exponent.
/// `\d` is any Unicode decimal digit, not just ASCII.
const NUMBER_PATTERN: &str = r"-?\d+(?:\.\d+)?(?:[eE][-+]?\d+)?";

const DIGIT_PATTERN: &str = r"^\d$";

/// Unicode decimal digits come in contiguous 0..9 runs; no run of runs is longer.
const MAX_DIGIT_RUN: u32 = 64;

const READ_BUFFER_SIZE: usize = 64 * 1024;

/// Pulls one numeric sample out of every log line that carries the marker.
#[derive(Debug, Clone)]
pub struct SampleExtractor {
    marker: String,
    number: Regex,
    digit: Regex,
}

impl SampleExtractor {
    pub fn new() -> Result<Self> {
        Self::with_marker(DEFAULT_MARKER)
    }

    pub fn with_marker<S: Into<String>>(marker: S) -> Result<Self> {
        let compile = |pattern: &str| {
            Regex::new(pattern).map_err(|e| DelayError::Config {
                message: format!("Invalid number pattern: {}", e),
            })
        };

        Ok(Self {
            marker: marker.into(),
            number: compile(NUMBER_PATTERN)?,
            digit: compile(DIGIT_PATTERN)?,
        })
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Sample carried by a single line, if any.
    ///
    /// The marker test is a plain substring match. The first number anywhere
    /// on the line wins, even one that precedes the marker text.
    pub fn extract_line(&self, line: &str) -> Option<f64> {
        if !line.contains(self.marker.as_str()) {
            return None;
        }

        let token = self.number.find(line)?.as_str();
        match self.ascii_digits(token).parse::<f64>() {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::trace!(token, error = %e, "Dropping unparsable sample");
                None
            }
        }
    }

    /// `f64` parsing only knows ASCII digits, so other decimal digits are
    /// mapped onto `0..9` first.
    fn ascii_digits<'a>(&self, token: &'a str) -> Cow<'a, str> {
        if token.is_ascii() {
            return Cow::Borrowed(token);
        }

        token
            .chars()
            .map(|c| match self.digit_value(c) {
                Some(value) if !c.is_ascii() => char::from(b'0' + value),
                _ => c,
            })
            .collect::<String>()
            .into()
    }

    fn digit_value(&self, c: char) -> Option<u8> {
        if !self.is_digit(c) {
            return None;
        }

        let code = c as u32;
        let mut zero = code;
        while code - zero < MAX_DIGIT_RUN {
            match zero.checked_sub(1).and_then(char::from_u32) {
                Some(prev) if self.is_digit(prev) => zero -= 1,
                _ => break,
            }
        }

        Some(((code - zero) % 10) as u8)
    }

    fn is_digit(&self, c: char) -> bool {
        let mut buf = [0u8; 4];
        self.digit.is_match(c.encode_utf8(&mut buf))
    }

    /// Samples in line order, at most one per line.
    pub fn extract_samples<I, S>(&self, lines: I) -> Vec<f64>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        lines
            .into_iter()
            .filter_map(|line| self.extract_line(line.as_ref()))
            .collect()
    }

    /// Scans a byte stream line by line. `\n`, `\r\n` and a bare `\r` all end a
    /// line. Invalid UTF-8 is replaced, never fatal.
    pub fn extract_from_reader<R: BufRead>(&self, mut reader: R) -> std::io::Result<Vec<f64>> {
        let mut samples = Vec::new();
        let mut buffer = Vec::new();

        loop {
            buffer.clear();
            let bytes_read = reader.read_until(b'\n', &mut buffer)?;
            if bytes_read == 0 {
                break;
            }

            let chunk = buffer.strip_suffix(b"\n").unwrap_or(&buffer);
            // The empty piece after a CRLF's `\r` carries no sample.
            for raw_line in chunk.split(|&b| b == b'\r') {
                let line = String::from_utf8_lossy(raw_line);
                if let Some(value) = self.extract_line(&line) {
                    samples.push(value);
                }
            }
        }

        Ok(samples)
    }

    pub fn extract_from_file(&self, path: &Path) -> Result<Vec<f64>> {
        let file = fs::File::open(path).map_err(|e| DelayError::read(path, e))?;
        let reader = BufReader::with_capacity(READ_BUFFER_SIZE, file);

        let samples = self
            .extract_from_reader(reader)
            .map_err(|e| DelayError::read(path, e))?;

        tracing::debug!(path = %path.display(), samples = samples.len(), "Scanned input");
        Ok(samples)
    }
}
