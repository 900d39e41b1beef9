//! Seams onto the host editing environment.
//!
//! The bridge never inspects host values. [`HostTypes`] names them,
//! [`HostRegistry`] accepts built handlers, and the conversion layer
//! ([`crate::Converter`]) translates between host and protocol shapes.

use std::sync::Arc;

use url::Url;

use crate::disposable::Disposable;
use crate::handler::{
    CompletionHandler, DefinitionHandler, DocumentHighlightHandler, HoverHandler,
    ReferenceHandler, SignatureHelpHandler,
};

/// Live host model as seen by the selector matcher.
pub trait HostModel {
    /// URI of the document backing the model.
    fn uri(&self) -> &Url;

    /// Language mode currently assigned to the model.
    fn language_id(&self) -> &str;
}

/// Host-side data model.
///
/// List-shaped results use `Vec`, so their no-match value is empty.
/// Single-value results are wrapped in `Option`, so their no-match value is
/// `None`. Completion lists are host-defined and use their `Default` value.
pub trait HostTypes: Send + Sync + 'static {
    /// Live editor model passed to every handler invocation.
    type Model: HostModel + Send + Sync;
    /// Cursor position within a model.
    type Position: Send + Sync;
    /// Context describing how completion was triggered.
    type CompletionContext: Send + Sync;
    /// Single completion item.
    type CompletionItem: Send + Sync;
    /// Completion result; `Default` is the empty list.
    type CompletionList: Default + Send;
    /// Hover result.
    type Hover: Send;
    /// Context describing how signature help was triggered.
    type SignatureHelpContext: Send + Sync;
    /// Signature help result.
    type SignatureHelp: Send;
    /// Definition result.
    type Definition: Send;
    /// Options for a reference search.
    type ReferenceContext: Send + Sync;
    /// Single location in a reference result.
    type Location: Send;
    /// Single document highlight.
    type DocumentHighlight: Send;
    /// Collection handed out by [`HostRegistry::create_diagnostic_collection`].
    type DiagnosticCollection;
}

crate::errors::message_error! {
    /// Errors reported by the host while registering or disposing handlers.
    HostError
}

/// Result of one per-language registration.
pub type HostRegistration = Result<Box<dyn Disposable>, HostError>;

/// Host provider tables, keyed by language id.
///
/// Every `register_*` method adds one entry for one language and returns
/// the handle that removes it again.
pub trait HostRegistry<H: HostTypes>: Send + Sync {
    /// Language ids the host knows about right now.
    fn language_ids(&self) -> Vec<String>;

    /// Registers a completion handler. The host must consult
    /// [`CompletionHandler::resolver`] to decide whether item resolution is
    /// available.
    fn register_completion_provider(
        &self,
        language_id: &str,
        handler: Arc<CompletionHandler<H>>,
    ) -> HostRegistration;

    /// Registers a hover handler.
    fn register_hover_provider(
        &self,
        language_id: &str,
        handler: Arc<HoverHandler<H>>,
    ) -> HostRegistration;

    /// Registers a signature help handler.
    fn register_signature_help_provider(
        &self,
        language_id: &str,
        handler: Arc<SignatureHelpHandler<H>>,
    ) -> HostRegistration;

    /// Registers a definition handler.
    fn register_definition_provider(
        &self,
        language_id: &str,
        handler: Arc<DefinitionHandler<H>>,
    ) -> HostRegistration;

    /// Registers a references handler.
    fn register_reference_provider(
        &self,
        language_id: &str,
        handler: Arc<ReferenceHandler<H>>,
    ) -> HostRegistration;

    /// Registers a document highlight handler.
    fn register_document_highlight_provider(
        &self,
        language_id: &str,
        handler: Arc<DocumentHighlightHandler<H>>,
    ) -> HostRegistration;

    /// Creates a diagnostic collection owned by the host.
    fn create_diagnostic_collection(&self, name: Option<&str>) -> H::DiagnosticCollection;
}
