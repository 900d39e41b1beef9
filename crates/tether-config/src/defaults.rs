/// Default log filter expression used when none is configured.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Default number of compiled glob patterns retained by the selector matcher.
pub const DEFAULT_GLOB_CACHE_CAPACITY: usize = 64;

/// Owned log filter value used where allocation is required (e.g. serde).
#[must_use]
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format.
#[must_use]
pub const fn default_log_format() -> crate::LogFormat {
    crate::LogFormat::Json
}

/// Default glob cache capacity, for serde.
#[must_use]
pub const fn default_glob_cache_capacity() -> usize {
    DEFAULT_GLOB_CACHE_CAPACITY
}
