// Diagnostic logging on stderr. User-facing messages go through
// `ui::OutputFormatter` on stdout; this channel is for debugging only.
//
// Priority: RUST_LOG env var > -vv on the CLI > default "error". User-facing
// warnings are printed by the formatter, not by tracing.

use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_LEVEL: &str = "error";

/// Verbosity at which the CLI switches tracing to debug.
const DEBUG_VERBOSITY: u8 = 2;

pub fn filter_for(verbose: u8) -> EnvFilter {
    if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(default_directive(verbose))
    }
}

/// Directive used when RUST_LOG is unset.
fn default_directive(verbose: u8) -> &'static str {
    if verbose >= DEBUG_VERBOSITY {
        "debug"
    } else {
        DEFAULT_LOG_LEVEL
    }
}

/// Initialise the logging subsystem. Safe to call once per process.
pub fn init(verbose: u8) {
    let result = tracing_subscriber::fmt()
        .with_env_filter(filter_for(verbose))
        .with_writer(std::io::stderr)
        .with_target(true)
        .compact()
        .try_init();

    if result.is_ok() {
        tracing::debug!(version = env!("CARGO_PKG_VERSION"), "Logging initialised");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive(0), "error");
        assert_eq!(default_directive(1), "error");
        assert_eq!(default_directive(2), "debug");
        assert_eq!(default_directive(3), "debug");
    }
}
