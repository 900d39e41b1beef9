//! Conversion layer between host-shaped and protocol-shaped values.

use lsp_types::{
    CompletionContext, CompletionItem, CompletionResponse, DocumentHighlight,
    GotoDefinitionResponse, Hover, Location, ReferenceContext, SignatureHelp,
    SignatureHelpContext, TextDocumentPositionParams,
};

use crate::host::HostTypes;

crate::errors::message_error! {
    /// Errors raised by a [`Converter`] given input it cannot translate.
    ConversionError
}

/// Pure translations between the host data model `H` and `lsp-types`.
///
/// `to_*` methods ending in a protocol type run before the provider call;
/// `to_host_*` methods run on its result. The bridge performs no validation
/// of its own, so implementations report bad input through
/// [`ConversionError`].
pub trait Converter<H: HostTypes>: Send + Sync {
    /// Builds the document/position pair for a request.
    fn to_position_params(
        &self,
        model: &H::Model,
        position: &H::Position,
    ) -> Result<TextDocumentPositionParams, ConversionError>;

    /// Translates the completion trigger context.
    fn to_completion_context(
        &self,
        context: &H::CompletionContext,
    ) -> Result<Option<CompletionContext>, ConversionError>;

    /// Translates a completion result.
    fn to_host_completion_list(
        &self,
        response: Option<CompletionResponse>,
    ) -> Result<H::CompletionList, ConversionError>;

    /// Translates a host completion item before resolution.
    fn to_completion_item(
        &self,
        item: &H::CompletionItem,
    ) -> Result<CompletionItem, ConversionError>;

    /// Translates a resolved completion item.
    fn to_host_completion_item(
        &self,
        item: CompletionItem,
    ) -> Result<H::CompletionItem, ConversionError>;

    /// Translates a hover result.
    fn to_host_hover(&self, hover: Option<Hover>) -> Result<Option<H::Hover>, ConversionError>;

    /// Translates the signature help trigger context.
    fn to_signature_help_context(
        &self,
        context: &H::SignatureHelpContext,
    ) -> Result<Option<SignatureHelpContext>, ConversionError>;

    /// Translates a signature help result.
    fn to_host_signature_help(
        &self,
        help: Option<SignatureHelp>,
    ) -> Result<Option<H::SignatureHelp>, ConversionError>;

    /// Translates a definition result.
    fn to_host_definition(
        &self,
        definition: Option<GotoDefinitionResponse>,
    ) -> Result<Option<H::Definition>, ConversionError>;

    /// Translates reference search options.
    fn to_reference_context(
        &self,
        context: &H::ReferenceContext,
    ) -> Result<ReferenceContext, ConversionError>;

    /// Translates a references result.
    fn to_host_locations(
        &self,
        locations: Option<Vec<Location>>,
    ) -> Result<Vec<H::Location>, ConversionError>;

    /// Translates a document highlight result.
    fn to_host_document_highlights(
        &self,
        highlights: Option<Vec<DocumentHighlight>>,
    ) -> Result<Vec<H::DocumentHighlight>, ConversionError>;
}
