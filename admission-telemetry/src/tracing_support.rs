//! Structured tracing helpers.

use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

/// Stream the subscriber writes log lines to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogOutput {
    /// Standard error, leaving standard output to the program's own output.
    #[default]
    Stderr,
    /// Standard output.
    Stdout,
}

impl LogOutput {
    fn make_writer(self) -> BoxMakeWriter {
        match self {
            Self::Stderr => BoxMakeWriter::new(std::io::stderr),
            Self::Stdout => BoxMakeWriter::new(std::io::stdout),
        }
    }
}

/// Settings for the process-wide `fmt` subscriber.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TelemetryConfig {
    /// Filter directives used when `RUST_LOG` is not set, e.g. `info` or
    /// `admission_policy=debug`.
    pub filter: String,
    /// Include the event target (module path) in each line.
    pub with_target: bool,
    /// Emit ANSI colour codes.
    pub ansi: bool,
    /// Where log lines go.
    pub output: LogOutput,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            filter: "info".into(),
            with_target: false,
            ansi: true,
            output: LogOutput::Stderr,
        }
    }
}

impl TelemetryConfig {
    /// Builds the filter, preferring `RUST_LOG` over the configured directives.
    ///
    /// # Errors
    ///
    /// Fails when the configured directives cannot be parsed.
    pub fn env_filter(&self) -> anyhow::Result<EnvFilter> {
        if let Ok(filter) = EnvFilter::try_from_default_env() {
            return Ok(filter);
        }
        EnvFilter::try_new(&self.filter)
            .map_err(|err| anyhow!("invalid log filter `{}`: {err}", self.filter))
    }
}

/// Installs a `fmt` subscriber as the global default.
///
/// # Errors
///
/// Fails when the filter is invalid or a global subscriber is already set.
pub fn init(config: &TelemetryConfig) -> anyhow::Result<()> {
    let filter = config.env_filter()?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.with_target)
        .with_ansi(config.ansi)
        .with_writer(config.output.make_writer())
        .try_init()
        .map_err(|err| anyhow!("failed to install tracing subscriber: {err}"))?;
    debug!(filter = %config.filter, "tracing initialised");
    Ok(())
}
