use std::sync::Arc;

use lsp_types::{CompletionParams, PartialResultParams, WorkDoneProgressParams};
use tokio_util::sync::CancellationToken;

use super::HandlerCore;
use crate::convert::Converter;
use crate::errors::BridgeError;
use crate::host::HostTypes;
use crate::provider::{CompletionItemResolver, CompletionProvider};
use crate::selector::Selector;

/// Host-facing completion handler.
pub struct CompletionHandler<H: HostTypes> {
    core: HandlerCore<H>,
    provider: Arc<dyn CompletionProvider>,
    trigger_characters: Vec<String>,
}

impl<H: HostTypes> CompletionHandler<H> {
    pub(crate) const fn new(
        core: HandlerCore<H>,
        provider: Arc<dyn CompletionProvider>,
        trigger_characters: Vec<String>,
    ) -> Self {
        Self {
            core,
            provider,
            trigger_characters,
        }
    }

    /// Characters that should trigger completion, as supplied at registration.
    #[must_use]
    pub const fn trigger_characters(&self) -> &[String] {
        self.trigger_characters.as_slice()
    }

    /// Selector gating this handler.
    #[must_use]
    pub fn selector(&self) -> &Selector {
        self.core.selector()
    }

    /// Computes completion items for the model at `position`.
    ///
    /// # Errors
    ///
    /// Propagates selector, conversion, and provider failures.
    pub async fn provide_completion_items(
        &self,
        model: &H::Model,
        position: &H::Position,
        context: &H::CompletionContext,
        token: CancellationToken,
    ) -> Result<H::CompletionList, BridgeError> {
        if !self.core.admits(model)? {
            return Ok(H::CompletionList::default());
        }
        let params = CompletionParams {
            text_document_position: self.core.position_params(model, position)?,
            work_done_progress_params: WorkDoneProgressParams::default(),
            partial_result_params: PartialResultParams::default(),
            context: self.core.converter().to_completion_context(context)?,
        };
        let response = self.provider.provide_completion_items(params, token).await?;
        Ok(self.core.converter().to_host_completion_list(response)?)
    }

    /// Item resolution, present only when the wrapped provider resolves
    /// items. Hosts must not offer resolution when this is `None`.
    #[must_use]
    pub fn resolver(&self) -> Option<CompletionItemResolveHandler<'_, H>> {
        self.provider
            .resolver()
            .map(|resolver| CompletionItemResolveHandler {
                resolver,
                converter: self.core.converter(),
            })
    }
}

/// Host-facing completion item resolver borrowed from a [`CompletionHandler`].
pub struct CompletionItemResolveHandler<'a, H: HostTypes> {
    resolver: &'a dyn CompletionItemResolver,
    converter: &'a dyn Converter<H>,
}

impl<H: HostTypes> CompletionItemResolveHandler<'_, H> {
    /// Resolves a host completion item through the wrapped provider.
    ///
    /// # Errors
    ///
    /// Propagates conversion and provider failures.
    pub async fn resolve_completion_item(
        &self,
        item: &H::CompletionItem,
        token: CancellationToken,
    ) -> Result<H::CompletionItem, BridgeError> {
        let unresolved = self.converter.to_completion_item(item)?;
        let resolved = self
            .resolver
            .resolve_completion_item(unresolved, token)
            .await?;
        Ok(self.converter.to_host_completion_item(resolved)?)
    }
}
