//! Bridge between language-protocol providers and a host editor's provider
//! API.
//!
//! Providers are written against `lsp-types` shapes (completion, hover,
//! signature help, definition, references, document highlights). The host
//! has its own provider tables keyed by language id and its own data model.
//! [`ProviderBridge`] builds a host-shaped handler per registration, gates
//! every invocation on a document [`Selector`], converts values through a
//! [`Converter`], and registers the handler once per language the host knows
//! about, returning a single [`DisposableAggregate`] for the whole snapshot.
//!
//! The host is reached only through [`HostRegistry`], [`HostTypes`], and
//! [`Converter`], so tests and embedders can supply lightweight
//! implementations.

mod bridge;
mod capability;
mod convert;
mod disposable;
mod errors;
mod handler;
mod host;
mod identifier;
mod matcher;
mod provider;
mod selector;
pub mod telemetry;


pub use bridge::ProviderBridge;
pub use capability::CapabilityKind;
pub use convert::{ConversionError, Converter};
pub use disposable::{Disposable, DisposableAggregate, DisposeError, HandleDisposeFailure};
pub use errors::{BridgeError, IdentifierError, SelectorError};
pub use handler::{
    CompletionHandler, CompletionItemResolveHandler, DefinitionHandler, DocumentHighlightHandler,
    HoverHandler, ReferenceHandler, SignatureHelpHandler,
};
pub use host::{HostError, HostModel, HostRegistration, HostRegistry, HostTypes};
pub use identifier::{DocumentIdentifier, ModelIdentifier};
pub use matcher::{SelectorMatcher, compile_pattern, match_document};
pub use provider::{
    CompletionItemResolver, CompletionProvider, DefinitionProvider, DocumentHighlightProvider,
    HoverProvider, ProviderError, ReferenceProvider, SignatureHelpProvider,
};
pub use selector::{DocumentFilter, Selector, SelectorEntry};
