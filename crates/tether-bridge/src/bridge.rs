//! Registration bridge: builds handlers and fans them out across the host's
//! languages.

use std::sync::Arc;

use tether_config::{CapabilityMatrix, Config};
use tracing::{debug, info, warn};

use crate::capability::CapabilityKind;
use crate::convert::Converter;
use crate::disposable::{Disposable, DisposableAggregate};
use crate::errors::BridgeError;
use crate::handler::{
    CompletionHandler, DefinitionHandler, DocumentHighlightHandler, HandlerCore, HoverHandler,
    ReferenceHandler, SignatureHelpHandler,
};
use crate::host::{HostError, HostRegistry, HostTypes};
use crate::identifier::{DocumentIdentifier, ModelIdentifier};
use crate::matcher::SelectorMatcher;
use crate::provider::{
    CompletionProvider, DefinitionProvider, DocumentHighlightProvider, HoverProvider,
    ReferenceProvider, SignatureHelpProvider,
};
use crate::selector::Selector;

const BRIDGE_TARGET: &str = "tether_bridge::bridge";

/// Registers protocol providers with a host.
///
/// Each `register_*` call builds one handler and registers it once per
/// language the host reports at that moment. The returned
/// [`DisposableAggregate`] removes every one of those registrations.
/// Languages the host learns about later are not covered.
pub struct ProviderBridge<H: HostTypes> {
    registry: Arc<dyn HostRegistry<H>>,
    converter: Arc<dyn Converter<H>>,
    matcher: Arc<SelectorMatcher>,
    overrides: CapabilityMatrix,
}

impl<H: HostTypes> ProviderBridge<H> {
    /// Builds a bridge using the glob cache size and capability overrides
    /// from `config`.
    #[must_use]
    pub fn new(
        registry: Arc<dyn HostRegistry<H>>,
        converter: Arc<dyn Converter<H>>,
        config: &Config,
    ) -> Self {
        Self {
            registry,
            converter,
            matcher: Arc::new(SelectorMatcher::with_capacity(config.glob_cache_capacity)),
            overrides: config.capability_matrix(),
        }
    }

    /// Decides whether a protocol-side document falls under `selector`.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Identifier`] when the document URI does not
    /// parse and [`BridgeError::Selector`] when a pattern does not compile.
    pub fn matches(
        &self,
        selector: &Selector,
        document: &DocumentIdentifier,
    ) -> Result<bool, BridgeError> {
        let model = ModelIdentifier::try_from(document)?;
        Ok(self.matcher.matches(selector, &model)?)
    }

    /// Creates a diagnostic collection through the host.
    #[must_use]
    pub fn create_diagnostic_collection(&self, name: Option<&str>) -> H::DiagnosticCollection {
        self.registry.create_diagnostic_collection(name)
    }

    /// Registers a completion provider. Item resolution is offered to the
    /// host only when the provider exposes a resolver.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Registration`] when the host rejects a
    /// registration; registrations already made by this call are undone.
    pub fn register_completion_provider(
        &self,
        selector: Selector,
        provider: Arc<dyn CompletionProvider>,
        trigger_characters: &[&str],
    ) -> Result<DisposableAggregate, BridgeError> {
        let handler = Arc::new(CompletionHandler::new(
            self.core(CapabilityKind::Completion, selector),
            provider,
            owned(trigger_characters),
        ));
        self.fan_out(CapabilityKind::Completion, |registry, language| {
            registry.register_completion_provider(language, Arc::clone(&handler))
        })
    }

    /// Registers a hover provider.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Registration`] when the host rejects a
    /// registration; registrations already made by this call are undone.
    pub fn register_hover_provider(
        &self,
        selector: Selector,
        provider: Arc<dyn HoverProvider>,
    ) -> Result<DisposableAggregate, BridgeError> {
        let handler = Arc::new(HoverHandler::new(
            self.core(CapabilityKind::Hover, selector),
            provider,
        ));
        self.fan_out(CapabilityKind::Hover, |registry, language| {
            registry.register_hover_provider(language, Arc::clone(&handler))
        })
    }

    /// Registers a signature help provider.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Registration`] when the host rejects a
    /// registration; registrations already made by this call are undone.
    pub fn register_signature_help_provider(
        &self,
        selector: Selector,
        provider: Arc<dyn SignatureHelpProvider>,
        trigger_characters: &[&str],
    ) -> Result<DisposableAggregate, BridgeError> {
        let handler = Arc::new(SignatureHelpHandler::new(
            self.core(CapabilityKind::SignatureHelp, selector),
            provider,
            owned(trigger_characters),
        ));
        self.fan_out(CapabilityKind::SignatureHelp, |registry, language| {
            registry.register_signature_help_provider(language, Arc::clone(&handler))
        })
    }

    /// Registers a definition provider.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Registration`] when the host rejects a
    /// registration; registrations already made by this call are undone.
    pub fn register_definition_provider(
        &self,
        selector: Selector,
        provider: Arc<dyn DefinitionProvider>,
    ) -> Result<DisposableAggregate, BridgeError> {
        let handler = Arc::new(DefinitionHandler::new(
            self.core(CapabilityKind::Definition, selector),
            provider,
        ));
        self.fan_out(CapabilityKind::Definition, |registry, language| {
            registry.register_definition_provider(language, Arc::clone(&handler))
        })
    }

    /// Registers a references provider.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Registration`] when the host rejects a
    /// registration; registrations already made by this call are undone.
    pub fn register_reference_provider(
        &self,
        selector: Selector,
        provider: Arc<dyn ReferenceProvider>,
    ) -> Result<DisposableAggregate, BridgeError> {
        let handler = Arc::new(ReferenceHandler::new(
            self.core(CapabilityKind::References, selector),
            provider,
        ));
        self.fan_out(CapabilityKind::References, |registry, language| {
            registry.register_reference_provider(language, Arc::clone(&handler))
        })
    }

    /// Registers a document highlight provider.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Registration`] when the host rejects a
    /// registration; registrations already made by this call are undone.
    pub fn register_document_highlight_provider(
        &self,
        selector: Selector,
        provider: Arc<dyn DocumentHighlightProvider>,
    ) -> Result<DisposableAggregate, BridgeError> {
        let handler = Arc::new(DocumentHighlightHandler::new(
            self.core(CapabilityKind::DocumentHighlight, selector),
            provider,
        ));
        self.fan_out(CapabilityKind::DocumentHighlight, |registry, language| {
            registry.register_document_highlight_provider(language, Arc::clone(&handler))
        })
    }

    fn core(&self, capability: CapabilityKind, selector: Selector) -> HandlerCore<H> {
        HandlerCore::new(
            capability,
            Arc::new(selector),
            Arc::clone(&self.matcher),
            Arc::clone(&self.converter),
        )
    }

    fn fan_out<F>(
        &self,
        capability: CapabilityKind,
        mut register: F,
    ) -> Result<DisposableAggregate, BridgeError>
    where
        F: FnMut(&dyn HostRegistry<H>, &str) -> Result<Box<dyn Disposable>, HostError>,
    {
        let mut aggregate = DisposableAggregate::new(capability);
        for language in self.registry.language_ids() {
            if !capability.is_enabled_for(&language, &self.overrides) {
                debug!(
                    target: BRIDGE_TARGET,
                    %capability,
                    %language,
                    "capability denied by override; skipping language"
                );
                continue;
            }

            match register(self.registry.as_ref(), &language) {
                Ok(handle) => {
                    debug!(target: BRIDGE_TARGET, %capability, %language, "registered provider");
                    aggregate.push(language, handle);
                }
                Err(source) => {
                    if let Err(rollback) = aggregate.dispose_all() {
                        warn!(
                            target: BRIDGE_TARGET,
                            %capability,
                            error = %rollback,
                            "rollback after failed registration was incomplete"
                        );
                    }
                    return Err(BridgeError::registration(language, capability, source));
                }
            }
        }

        info!(
            target: BRIDGE_TARGET,
            %capability,
            languages = aggregate.len(),
            "provider registration snapshot complete"
        );
        Ok(aggregate)
    }
}

fn owned(characters: &[&str]) -> Vec<String> {
    characters.iter().map(|&character| character.to_owned()).collect()
}
