use std::sync::Arc;

use lsp_types::{
    DocumentHighlightParams, GotoDefinitionParams, PartialResultParams, ReferenceParams,
    WorkDoneProgressParams,
};
use tokio_util::sync::CancellationToken;

use super::HandlerCore;
use crate::errors::BridgeError;
use crate::host::HostTypes;
use crate::provider::{DefinitionProvider, DocumentHighlightProvider, ReferenceProvider};
use crate::selector::Selector;

/// Host-facing definition handler.
pub struct DefinitionHandler<H: HostTypes> {
    core: HandlerCore<H>,
    provider: Arc<dyn DefinitionProvider>,
}

impl<H: HostTypes> DefinitionHandler<H> {
    pub(crate) const fn new(core: HandlerCore<H>, provider: Arc<dyn DefinitionProvider>) -> Self {
        Self { core, provider }
    }

    /// Selector gating this handler.
    #[must_use]
    pub fn selector(&self) -> &Selector {
        self.core.selector()
    }

    /// Locates the definition at `position`; `None` when the selector
    /// rejects the model.
    ///
    /// # Errors
    ///
    /// Propagates selector, conversion, and provider failures.
    pub async fn provide_definition(
        &self,
        model: &H::Model,
        position: &H::Position,
        token: CancellationToken,
    ) -> Result<Option<H::Definition>, BridgeError> {
        if !self.core.admits(model)? {
            return Ok(None);
        }
        let params = GotoDefinitionParams {
            text_document_position_params: self.core.position_params(model, position)?,
            work_done_progress_params: WorkDoneProgressParams::default(),
            partial_result_params: PartialResultParams::default(),
        };
        let definition = self.provider.provide_definition(params, token).await?;
        Ok(self.core.converter().to_host_definition(definition)?)
    }
}

/// Host-facing references handler.
pub struct ReferenceHandler<H: HostTypes> {
    core: HandlerCore<H>,
    provider: Arc<dyn ReferenceProvider>,
}

impl<H: HostTypes> ReferenceHandler<H> {
    pub(crate) const fn new(core: HandlerCore<H>, provider: Arc<dyn ReferenceProvider>) -> Self {
        Self { core, provider }
    }

    /// Selector gating this handler.
    #[must_use]
    pub fn selector(&self) -> &Selector {
        self.core.selector()
    }

    /// Finds references to the symbol at `position`; empty when the selector
    /// rejects the model.
    ///
    /// # Errors
    ///
    /// Propagates selector, conversion, and provider failures.
    pub async fn provide_references(
        &self,
        model: &H::Model,
        position: &H::Position,
        context: &H::ReferenceContext,
        token: CancellationToken,
    ) -> Result<Vec<H::Location>, BridgeError> {
        if !self.core.admits(model)? {
            return Ok(Vec::new());
        }
        let params = ReferenceParams {
            text_document_position: self.core.position_params(model, position)?,
            work_done_progress_params: WorkDoneProgressParams::default(),
            partial_result_params: PartialResultParams::default(),
            context: self.core.converter().to_reference_context(context)?,
        };
        let locations = self.provider.provide_references(params, token).await?;
        Ok(self.core.converter().to_host_locations(locations)?)
    }
}

/// Host-facing document highlight handler.
pub struct DocumentHighlightHandler<H: HostTypes> {
    core: HandlerCore<H>,
    provider: Arc<dyn DocumentHighlightProvider>,
}

impl<H: HostTypes> DocumentHighlightHandler<H> {
    pub(crate) const fn new(
        core: HandlerCore<H>,
        provider: Arc<dyn DocumentHighlightProvider>,
    ) -> Self {
        Self { core, provider }
    }

    /// Selector gating this handler.
    #[must_use]
    pub fn selector(&self) -> &Selector {
        self.core.selector()
    }

    /// Computes highlights for the symbol at `position`; empty when the
    /// selector rejects the model.
    ///
    /// # Errors
    ///
    /// Propagates selector, conversion, and provider failures.
    pub async fn provide_document_highlights(
        &self,
        model: &H::Model,
        position: &H::Position,
        token: CancellationToken,
    ) -> Result<Vec<H::DocumentHighlight>, BridgeError> {
        if !self.core.admits(model)? {
            return Ok(Vec::new());
        }
        let params = DocumentHighlightParams {
            text_document_position_params: self.core.position_params(model, position)?,
            work_done_progress_params: WorkDoneProgressParams::default(),
            partial_result_params: PartialResultParams::default(),
        };
        let highlights = self
            .provider
            .provide_document_highlights(params, token)
            .await?;
        Ok(self.core.converter().to_host_document_highlights(highlights)?)
    }
}
