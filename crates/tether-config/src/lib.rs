//! Shared configuration for the tether provider bridge.
//!
//! [`Config`] is layered by `ortho_config`: defaults, then a TOML file named
//! by `--config-path` or `TETHER_CONFIG_PATH`, then `TETHER_*` environment
//! variables, then command-line flags. The loaded value is handed to the
//! bridge and to telemetry initialisation.

mod capability;
mod defaults;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

pub use capability::{
    CapabilityDirective, CapabilityDirectiveParseError, CapabilityMatrix, CapabilityOverride,
    LanguageCapabilities, deduplicate_directives,
};
pub use defaults::{
    DEFAULT_GLOB_CACHE_CAPACITY, DEFAULT_LOG_FILTER, default_glob_cache_capacity,
    default_log_filter_string, default_log_format,
};

/// Shape of the events written by the telemetry subscriber.
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LogFormat {
    /// One JSON object per event, fields flattened into the object.
    #[default]
    Json,
    /// Single-line text for terminals.
    Compact,
}

impl LogFormat {
    /// Whether events are emitted as machine-readable records.
    #[must_use]
    pub const fn is_structured(self) -> bool {
        matches!(self, Self::Json)
    }
}

/// Bridge configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq, OrthoConfig)]
#[ortho_config(prefix = "TETHER")]
pub struct Config {
    /// `tracing` filter expression, e.g. `info` or `tether_bridge=debug`.
    #[serde(default = "default_log_filter_string")]
    #[ortho_config(default = default_log_filter_string())]
    pub log_filter: String,
    /// Output format for the telemetry subscriber.
    #[serde(default = "default_log_format")]
    #[ortho_config(default = default_log_format())]
    pub log_format: LogFormat,
    /// Number of compiled glob patterns kept by the selector matcher; `0`
    /// disables caching.
    #[serde(default = "default_glob_cache_capacity")]
    #[ortho_config(default = DEFAULT_GLOB_CACHE_CAPACITY)]
    pub glob_cache_capacity: usize,
    /// Directives of the form `language:capability=allow|deny` applied
    /// during registration fan-out.
    #[serde(default)]
    #[ortho_config(merge_strategy = "append")]
    pub capability_overrides: Vec<CapabilityDirective>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
            glob_cache_capacity: DEFAULT_GLOB_CACHE_CAPACITY,
            capability_overrides: Vec::new(),
        }
    }
}

impl Config {
    /// Filter expression used by telemetry.
    #[must_use]
    pub const fn log_filter(&self) -> &str {
        self.log_filter.as_str()
    }

    /// Output format used by telemetry.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Resolves [`Config::capability_overrides`] into a lookup matrix.
    ///
    /// Directives naming the same language and capability collapse to the
    /// last one given, so a command-line flag beats a file entry.
    #[must_use]
    pub fn capability_matrix(&self) -> CapabilityMatrix {
        let mut directives = self.capability_overrides.clone();
        deduplicate_directives(&mut directives);
        CapabilityMatrix::from_directives(&directives)
    }
}
