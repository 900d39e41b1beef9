use std::sync::Arc;

use lsp_types::{HoverParams, SignatureHelpParams, WorkDoneProgressParams};
use tokio_util::sync::CancellationToken;

use super::HandlerCore;
use crate::errors::BridgeError;
use crate::host::HostTypes;
use crate::provider::{HoverProvider, SignatureHelpProvider};
use crate::selector::Selector;

/// Host-facing hover handler.
pub struct HoverHandler<H: HostTypes> {
    core: HandlerCore<H>,
    provider: Arc<dyn HoverProvider>,
}

impl<H: HostTypes> HoverHandler<H> {
    pub(crate) const fn new(core: HandlerCore<H>, provider: Arc<dyn HoverProvider>) -> Self {
        Self { core, provider }
    }

    /// Selector gating this handler.
    #[must_use]
    pub fn selector(&self) -> &Selector {
        self.core.selector()
    }

    /// Computes hover information for the model at `position`; `None` when
    /// the selector rejects the model.
    ///
    /// # Errors
    ///
    /// Propagates selector, conversion, and provider failures.
    pub async fn provide_hover(
        &self,
        model: &H::Model,
        position: &H::Position,
        token: CancellationToken,
    ) -> Result<Option<H::Hover>, BridgeError> {
        if !self.core.admits(model)? {
            return Ok(None);
        }
        let params = HoverParams {
            text_document_position_params: self.core.position_params(model, position)?,
            work_done_progress_params: WorkDoneProgressParams::default(),
        };
        let hover = self.provider.provide_hover(params, token).await?;
        Ok(self.core.converter().to_host_hover(hover)?)
    }
}

/// Host-facing signature help handler.
pub struct SignatureHelpHandler<H: HostTypes> {
    core: HandlerCore<H>,
    provider: Arc<dyn SignatureHelpProvider>,
    trigger_characters: Vec<String>,
}

impl<H: HostTypes> SignatureHelpHandler<H> {
    pub(crate) const fn new(
        core: HandlerCore<H>,
        provider: Arc<dyn SignatureHelpProvider>,
        trigger_characters: Vec<String>,
    ) -> Self {
        Self {
            core,
            provider,
            trigger_characters,
        }
    }

    /// Characters that should trigger signature help.
    #[must_use]
    pub const fn trigger_characters(&self) -> &[String] {
        self.trigger_characters.as_slice()
    }

    /// Selector gating this handler.
    #[must_use]
    pub fn selector(&self) -> &Selector {
        self.core.selector()
    }

    /// Computes signature help for the model at `position`; `None` when the
    /// selector rejects the model.
    ///
    /// # Errors
    ///
    /// Propagates selector, conversion, and provider failures.
    pub async fn provide_signature_help(
        &self,
        model: &H::Model,
        position: &H::Position,
        context: &H::SignatureHelpContext,
        token: CancellationToken,
    ) -> Result<Option<H::SignatureHelp>, BridgeError> {
        if !self.core.admits(model)? {
            return Ok(None);
        }
        let params = SignatureHelpParams {
            context: self.core.converter().to_signature_help_context(context)?,
            text_document_position_params: self.core.position_params(model, position)?,
            work_done_progress_params: WorkDoneProgressParams::default(),
        };
        let help = self.provider.provide_signature_help(params, token).await?;
        Ok(self.core.converter().to_host_signature_help(help)?)
    }
}
