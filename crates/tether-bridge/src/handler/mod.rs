//! Host-shaped handlers built around protocol providers.
//!
//! Every handler runs the same pipeline: derive a [`ModelIdentifier`] from
//! the live model, ask the selector matcher whether the provider applies,
//! and only then convert parameters, await the provider, and convert the
//! result. A rejected document yields the capability's empty result without
//! touching the provider or the conversion layer.

mod completion;
mod information;
mod navigation;

use std::fmt;
use std::sync::Arc;

use lsp_types::TextDocumentPositionParams;
use tracing::debug;

use crate::capability::CapabilityKind;
use crate::convert::{ConversionError, Converter};
use crate::errors::SelectorError;
use crate::host::HostTypes;
use crate::identifier::ModelIdentifier;
use crate::matcher::SelectorMatcher;
use crate::selector::Selector;

pub use completion::{CompletionHandler, CompletionItemResolveHandler};
pub use information::{HoverHandler, SignatureHelpHandler};
pub use navigation::{DefinitionHandler, DocumentHighlightHandler, ReferenceHandler};

const HANDLER_TARGET: &str = "tether_bridge::handler";

/// Plumbing shared by every handler: the selector gate and the converter.
pub(crate) struct HandlerCore<H: HostTypes> {
    capability: CapabilityKind,
    selector: Arc<Selector>,
    matcher: Arc<SelectorMatcher>,
    converter: Arc<dyn Converter<H>>,
}

impl<H: HostTypes> HandlerCore<H> {
    pub(crate) const fn new(
        capability: CapabilityKind,
        selector: Arc<Selector>,
        matcher: Arc<SelectorMatcher>,
        converter: Arc<dyn Converter<H>>,
    ) -> Self {
        Self {
            capability,
            selector,
            matcher,
            converter,
        }
    }

    fn admits(&self, model: &H::Model) -> Result<bool, SelectorError> {
        let identifier = ModelIdentifier::from_model(model);
        let admitted = self.matcher.matches(&self.selector, &identifier)?;
        if !admitted {
            debug!(
                target: HANDLER_TARGET,
                capability = %self.capability,
                uri = %identifier.uri(),
                language = identifier.language_id(),
                "selector rejected document; provider not invoked"
            );
        }
        Ok(admitted)
    }

    fn position_params(
        &self,
        model: &H::Model,
        position: &H::Position,
    ) -> Result<TextDocumentPositionParams, ConversionError> {
        self.converter.to_position_params(model, position)
    }

    fn converter(&self) -> &dyn Converter<H> {
        self.converter.as_ref()
    }

    fn selector(&self) -> &Selector {
        &self.selector
    }
}

impl<H: HostTypes> fmt::Debug for HandlerCore<H> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("HandlerCore")
            .field("capability", &self.capability)
            .field("selector", &self.selector)
            .finish_non_exhaustive()
    }
}

