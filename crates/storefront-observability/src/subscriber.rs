//! `tracing` subscriber setup.

use tracing_subscriber::{fmt, EnvFilter};

use crate::{LogFormat, LogLevel};

/// How library diagnostics are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TracingOptions {
    /// Default filter when `RUST_LOG` is unset.
    pub level: LogLevel,
    pub format: LogFormat,
}

impl Default for TracingOptions {
    fn default() -> Self {
        Self {
            level: LogLevel::Warn,
            format: LogFormat::Human,
        }
    }
}

fn directive(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Trace => "trace",
        LogLevel::Debug => "debug",
        LogLevel::Info => "info",
        LogLevel::Warn => "warn",
        LogLevel::Error => "error",
    }
}

/// Install a global subscriber writing to stderr.
///
/// `RUST_LOG` takes precedence over `options.level`. Returns `false` if a
/// subscriber was already installed.
pub fn init_tracing(options: TracingOptions) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directive(options.level)));

    let builder = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let result = match options.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Human => builder.compact().try_init(),
    };
    result.is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_rejected() {
        let first = init_tracing(TracingOptions::default());
        let second = init_tracing(TracingOptions {
            level: LogLevel::Debug,
            format: LogFormat::Json,
        });
        assert!(first);
        assert!(!second);
    }
}
