//! Error types surfaced by the bridge.

use thiserror::Error;

/// Declares an opaque error holding a display message and an optional boxed
/// source. Implementations behind the trait seams build these.
macro_rules! message_error {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, thiserror::Error)]
        #[error("{message}")]
        pub struct $name {
            message: String,
            #[source]
            source: Option<Box<dyn std::error::Error + Send + Sync>>,
        }

        impl $name {
            /// Builds an error without an underlying source.
            #[must_use]
            pub fn new(message: impl Into<String>) -> Self {
                Self {
                    message: message.into(),
                    source: None,
                }
            }

            /// Builds an error that wraps an underlying source.
            #[must_use]
            pub fn with_source(
                message: impl Into<String>,
                source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
            ) -> Self {
                Self {
                    message: message.into(),
                    source: Some(source.into()),
                }
            }

            /// Human-friendly description without the optional source.
            #[must_use]
            pub const fn message(&self) -> &str {
                self.message.as_str()
            }
        }
    };
}

pub(crate) use message_error;

use crate::capability::CapabilityKind;
use crate::convert::ConversionError;
use crate::host::HostError;
use crate::provider::ProviderError;

/// Errors raised while evaluating a selector.
#[derive(Debug, Error)]
pub enum SelectorError {
    /// The selector is not a language id, filter, or sequence of those.
    #[error("malformed document selector: {reason}")]
    Malformed {
        /// What was wrong with the selector.
        reason: String,
    },

    /// A filter pattern could not be compiled into a glob.
    #[error("invalid glob pattern '{pattern}': {source}")]
    InvalidPattern {
        /// Pattern as written in the filter.
        pattern: String,
        /// Compilation failure reported by the glob engine.
        #[source]
        source: globset::Error,
    },
}

impl SelectorError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::Malformed {
            reason: reason.into(),
        }
    }
}

/// Errors raised while deriving a model identifier.
#[derive(Debug, Error)]
pub enum IdentifierError {
    /// The document URI is not an absolute URI.
    #[error("invalid document uri '{uri}': {source}")]
    InvalidUri {
        /// URI text supplied by the caller.
        uri: String,
        /// Parser failure.
        #[source]
        source: url::ParseError,
    },
}

/// Errors returned by [`crate::ProviderBridge`] and the handlers it builds.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// The wrapped provider failed; the error is passed through untouched.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// The conversion layer rejected its input.
    #[error("conversion failed: {0}")]
    Conversion(#[from] ConversionError),

    /// The selector could not be evaluated.
    #[error("selector evaluation failed: {0}")]
    Selector(#[from] SelectorError),

    /// A document identifier could not be interpreted.
    #[error(transparent)]
    Identifier(#[from] IdentifierError),

    /// The host refused to register a handler.
    #[error("failed to register {capability} provider for '{language}': {source}")]
    Registration {
        /// Language id being registered when the host failed.
        language: String,
        /// Capability being registered.
        capability: CapabilityKind,
        /// Failure reported by the host.
        #[source]
        source: HostError,
    },
}

impl BridgeError {
    pub(crate) fn registration(
        language: impl Into<String>,
        capability: CapabilityKind,
        source: HostError,
    ) -> Self {
        Self::Registration {
            language: language.into(),
            capability,
            source,
        }
    }
}
