//! Tracing subscriber setup for processes that embed the bridge.
//!
//! Bridge events carry `tether_bridge::*` targets, so a filter of
//! `tether_bridge=debug` shows every per-language registration and every
//! document a selector turned away.

use std::io::{self, IsTerminal};

use once_cell::sync::OnceCell;
use tether_config::{Config, LogFormat};
use tracing::Subscriber;
use tracing::subscriber::SetGlobalDefaultError;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::{self, MakeWriter};

static INSTALLED: OnceCell<TelemetryHandle> = OnceCell::new();

/// Type-erased subscriber returned by [`subscriber`].
pub type BoxedSubscriber = Box<dyn Subscriber + Send + Sync>;

/// Describes the subscriber installed by [`initialise`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TelemetryHandle {
    format: LogFormat,
}

impl TelemetryHandle {
    /// Format the installed subscriber writes.
    #[must_use]
    pub const fn format(self) -> LogFormat {
        self.format
    }
}

/// Errors encountered while configuring telemetry.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// The configured filter expression did not parse.
    #[error("invalid log filter '{filter}': {reason}")]
    Filter {
        /// Expression taken from [`Config::log_filter`].
        filter: String,
        /// Parser message.
        reason: String,
    },
    /// Another global subscriber was installed first.
    #[error("failed to install telemetry subscriber: {0}")]
    Install(#[source] SetGlobalDefaultError),
}

/// Builds a subscriber for `config` writing to `writer`, without installing
/// it.
///
/// Use with [`tracing::subscriber::with_default`] to scope bridge events to
/// a caller-owned sink. Output never carries ANSI colour.
///
/// # Errors
///
/// Returns [`TelemetryError::Filter`] when the filter expression is invalid.
pub fn subscriber<W>(config: &Config, writer: W) -> Result<BoxedSubscriber, TelemetryError>
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    build(config, writer, false)
}

/// Installs the global subscriber on first use, writing to stderr.
///
/// Later calls return the first handle and ignore their `config`.
///
/// # Errors
///
/// Returns [`TelemetryError::Filter`] for an unparsable filter and
/// [`TelemetryError::Install`] when a global subscriber already exists.
pub fn initialise(config: &Config) -> Result<TelemetryHandle, TelemetryError> {
    INSTALLED
        .get_or_try_init(|| {
            let installed = build(config, io::stderr, io::stderr().is_terminal())?;
            tracing::subscriber::set_global_default(installed).map_err(TelemetryError::Install)?;
            Ok(TelemetryHandle {
                format: config.log_format(),
            })
        })
        .copied()
}

fn build<W>(config: &Config, writer: W, ansi: bool) -> Result<BoxedSubscriber, TelemetryError>
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let filter = EnvFilter::try_new(config.log_filter()).map_err(|error| {
        TelemetryError::Filter {
            filter: config.log_filter().to_owned(),
            reason: error.to_string(),
        }
    })?;

    let builder = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_target(true)
        .with_timer(fmt::time::UtcTime::rfc_3339());

    Ok(if config.log_format().is_structured() {
        Box::new(
            builder
                .with_ansi(false)
                .json()
                .flatten_event(true)
                .with_current_span(false)
                .finish(),
        )
    } else {
        Box::new(builder.with_ansi(ansi).compact().finish())
    })
}
