//! Protocol-shaped provider traits wrapped by the bridge.
//!
//! Each trait mirrors one language-protocol request. Implementations receive
//! the protocol parameters and the host's cancellation token unchanged, and
//! whatever they return (including errors) reaches the host after conversion.

use async_trait::async_trait;
use lsp_types::{
    CompletionItem, CompletionParams, CompletionResponse, DocumentHighlight,
    DocumentHighlightParams, GotoDefinitionParams, GotoDefinitionResponse, Hover, HoverParams,
    Location, ReferenceParams, SignatureHelp, SignatureHelpParams,
};
use tokio_util::sync::CancellationToken;

crate::errors::message_error! {
    /// Errors reported by provider implementations.
    ProviderError
}

/// Supplies `textDocument/completion` results.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Computes completion items at a position.
    async fn provide_completion_items(
        &self,
        params: CompletionParams,
        token: CancellationToken,
    ) -> Result<Option<CompletionResponse>, ProviderError>;

    /// Returns the item resolver when this provider supports
    /// `completionItem/resolve`.
    ///
    /// Providers that resolve items implement [`CompletionItemResolver`] and
    /// return `Some(self)`. When `None`, the host never sees a resolver.
    fn resolver(&self) -> Option<&dyn CompletionItemResolver> {
        None
    }
}

/// Supplies `completionItem/resolve` results.
#[async_trait]
pub trait CompletionItemResolver: Send + Sync {
    /// Fills in the lazily computed parts of a completion item.
    async fn resolve_completion_item(
        &self,
        item: CompletionItem,
        token: CancellationToken,
    ) -> Result<CompletionItem, ProviderError>;
}

/// Supplies `textDocument/hover` results.
#[async_trait]
pub trait HoverProvider: Send + Sync {
    /// Computes hover information at a position.
    async fn provide_hover(
        &self,
        params: HoverParams,
        token: CancellationToken,
    ) -> Result<Option<Hover>, ProviderError>;
}

/// Supplies `textDocument/signatureHelp` results.
#[async_trait]
pub trait SignatureHelpProvider: Send + Sync {
    /// Computes signature help at a position.
    async fn provide_signature_help(
        &self,
        params: SignatureHelpParams,
        token: CancellationToken,
    ) -> Result<Option<SignatureHelp>, ProviderError>;
}

/// Supplies `textDocument/definition` results.
#[async_trait]
pub trait DefinitionProvider: Send + Sync {
    /// Locates the definition of the symbol at a position.
    async fn provide_definition(
        &self,
        params: GotoDefinitionParams,
        token: CancellationToken,
    ) -> Result<Option<GotoDefinitionResponse>, ProviderError>;
}

/// Supplies `textDocument/references` results.
#[async_trait]
pub trait ReferenceProvider: Send + Sync {
    /// Finds references to the symbol at a position.
    async fn provide_references(
        &self,
        params: ReferenceParams,
        token: CancellationToken,
    ) -> Result<Option<Vec<Location>>, ProviderError>;
}

/// Supplies `textDocument/documentHighlight` results.
#[async_trait]
pub trait DocumentHighlightProvider: Send + Sync {
    /// Computes the highlights for the symbol at a position.
    async fn provide_document_highlights(
        &self,
        params: DocumentHighlightParams,
        token: CancellationToken,
    ) -> Result<Option<Vec<DocumentHighlight>>, ProviderError>;
}
