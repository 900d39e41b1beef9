//! Registration handles and their aggregate.

use std::fmt;

use thiserror::Error;
use tracing::warn;

use crate::capability::CapabilityKind;
use crate::host::HostError;

const DISPOSE_TARGET: &str = "tether_bridge::disposable";

/// Host handle that undoes one registration.
pub trait Disposable: Send {
    /// Removes the registration from the host.
    ///
    /// # Errors
    ///
    /// Returns [`HostError`] when the host could not remove the entry.
    fn dispose(&mut self) -> Result<(), HostError>;
}

/// A handle that failed to dispose.
#[derive(Debug, Error)]
#[error("language '{language}': {source}")]
pub struct HandleDisposeFailure {
    /// Language id the handle was registered for.
    pub language: String,
    /// Failure reported by the host.
    #[source]
    pub source: HostError,
}

/// Errors collected by [`DisposableAggregate::dispose_all`].
#[derive(Debug, Error)]
#[error("failed to dispose {} of {attempted} {capability} registrations", .failures.len())]
pub struct DisposeError {
    /// Capability the aggregate was registered for.
    pub capability: CapabilityKind,
    /// Number of handles disposal was attempted on.
    pub attempted: usize,
    /// Every handle that failed, in registration order.
    pub failures: Vec<HandleDisposeFailure>,
}

struct RegisteredHandle {
    language: String,
    handle: Box<dyn Disposable>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AggregateState {
    Active,
    Disposed,
}

/// Snapshot of the per-language registrations made by one `register_*` call.
///
/// Languages the host learns about after the call are not covered; compare
/// [`Self::languages`] against the host to decide whether to register again.
/// Dropping the aggregate does not dispose it.
pub struct DisposableAggregate {
    capability: CapabilityKind,
    handles: Vec<RegisteredHandle>,
    state: AggregateState,
}

impl DisposableAggregate {
    pub(crate) const fn new(capability: CapabilityKind) -> Self {
        Self {
            capability,
            handles: Vec::new(),
            state: AggregateState::Active,
        }
    }

    pub(crate) fn push(&mut self, language: impl Into<String>, handle: Box<dyn Disposable>) {
        self.handles.push(RegisteredHandle {
            language: language.into(),
            handle,
        });
    }

    /// Capability the aggregate was registered for.
    #[must_use]
    pub const fn capability(&self) -> CapabilityKind {
        self.capability
    }

    /// Language ids with a live registration, in registration order.
    ///
    /// Empty once [`Self::dispose_all`] has run.
    pub fn languages(&self) -> impl Iterator<Item = &str> + '_ {
        self.handles.iter().map(|entry| entry.language.as_str())
    }

    /// Number of live per-language handles.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.handles.len()
    }

    /// Whether no live handles are held.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Whether [`Self::dispose_all`] has run.
    #[must_use]
    pub const fn is_disposed(&self) -> bool {
        matches!(self.state, AggregateState::Disposed)
    }

    /// Disposes every handle, continuing past failures.
    ///
    /// The aggregate is disposed afterwards whatever the outcome; calling
    /// this again is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`DisposeError`] listing every handle that failed.
    pub fn dispose_all(&mut self) -> Result<(), DisposeError> {
        if self.is_disposed() {
            return Ok(());
        }
        self.state = AggregateState::Disposed;

        let attempted = self.handles.len();
        let mut failures = Vec::new();
        for RegisteredHandle {
            language,
            mut handle,
        } in self.handles.drain(..)
        {
            if let Err(source) = handle.dispose() {
                warn!(
                    target: DISPOSE_TARGET,
                    capability = %self.capability,
                    %language,
                    error = %source,
                    "failed to dispose provider registration"
                );
                failures.push(HandleDisposeFailure { language, source });
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(DisposeError {
                capability: self.capability,
                attempted,
                failures,
            })
        }
    }
}

impl fmt::Debug for DisposableAggregate {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("DisposableAggregate")
            .field("capability", &self.capability)
            .field("languages", &self.languages().collect::<Vec<_>>())
            .field("state", &self.state)
            .finish()
    }
}
