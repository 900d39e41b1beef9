//! In-memory host registry that records registrations and dispatches
//! requests the way an editor would.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use tokio_util::sync::CancellationToken;

use super::{TestHost, TestModel, TestPosition};
use crate::capability::CapabilityKind;
use crate::disposable::Disposable;
use crate::errors::BridgeError;
use crate::handler::{
    CompletionHandler, DefinitionHandler, DocumentHighlightHandler, HoverHandler,
    ReferenceHandler, SignatureHelpHandler,
};
use crate::host::{HostError, HostModel, HostRegistration, HostRegistry};

struct Entry<T> {
    id: u64,
    language: String,
    handler: Arc<T>,
}

struct Table<T> {
    entries: Vec<Entry<T>>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> Table<T> {
    fn insert(&mut self, id: u64, language: &str, handler: Arc<T>) {
        self.entries.push(Entry {
            id,
            language: language.to_owned(),
            handler,
        });
    }

    fn remove(&mut self, id: u64) {
        self.entries.retain(|entry| entry.id != id);
    }

    fn for_language(&self, language: &str) -> Vec<Arc<T>> {
        self.entries
            .iter()
            .filter(|entry| entry.language == language)
            .map(|entry| Arc::clone(&entry.handler))
            .collect()
    }

    fn languages(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|entry| entry.language.clone())
            .collect()
    }
}

#[derive(Default)]
struct HostState {
    languages: Vec<String>,
    next_id: u64,
    rejected_language: Option<String>,
    failing_disposals: HashSet<String>,
    resolvable_completions: Vec<(String, bool)>,
    collections: Vec<Option<String>>,
    completion: Table<CompletionHandler<TestHost>>,
    hover: Table<HoverHandler<TestHost>>,
    signature_help: Table<SignatureHelpHandler<TestHost>>,
    definition: Table<DefinitionHandler<TestHost>>,
    references: Table<ReferenceHandler<TestHost>>,
    highlights: Table<DocumentHighlightHandler<TestHost>>,
}

impl HostState {
    fn remove(&mut self, capability: CapabilityKind, id: u64) {
        match capability {
            CapabilityKind::Completion => self.completion.remove(id),
            CapabilityKind::Hover => self.hover.remove(id),
            CapabilityKind::SignatureHelp => self.signature_help.remove(id),
            CapabilityKind::Definition => self.definition.remove(id),
            CapabilityKind::References => self.references.remove(id),
            CapabilityKind::DocumentHighlight => self.highlights.remove(id),
        }
    }

    fn registered(&self, capability: CapabilityKind) -> Vec<String> {
        match capability {
            CapabilityKind::Completion => self.completion.languages(),
            CapabilityKind::Hover => self.hover.languages(),
            CapabilityKind::SignatureHelp => self.signature_help.languages(),
            CapabilityKind::Definition => self.definition.languages(),
            CapabilityKind::References => self.references.languages(),
            CapabilityKind::DocumentHighlight => self.highlights.languages(),
        }
    }
}

/// Registration handle that removes its own table entry.
struct TableHandle {
    shared: Arc<Mutex<HostState>>,
    capability: CapabilityKind,
    id: u64,
    language: String,
}

impl Disposable for TableHandle {
    fn dispose(&mut self) -> Result<(), HostError> {
        let mut state = self.shared.lock().unwrap_or_else(PoisonError::into_inner);
        if state.failing_disposals.contains(&self.language) {
            return Err(HostError::new(format!(
                "{} registration for {} is pinned",
                self.capability, self.language
            )));
        }
        state.remove(self.capability, self.id);
        Ok(())
    }
}

/// Host double with provider tables keyed by language id.
#[derive(Clone)]
pub struct RecordingHost {
    shared: Arc<Mutex<HostState>>,
}

impl RecordingHost {
    /// Creates a host that knows `languages`.
    pub fn new(languages: &[&str]) -> Self {
        let state = HostState {
            languages: languages.iter().map(|&language| language.to_owned()).collect(),
            ..HostState::default()
        };
        Self {
            shared: Arc::new(Mutex::new(state)),
        }
    }

    fn with_state<R>(&self, action: impl FnOnce(&mut HostState) -> R) -> R {
        let mut state = self.shared.lock().unwrap_or_else(PoisonError::into_inner);
        action(&mut state)
    }

    /// Teaches the host a language after registrations were made.
    pub fn add_language(&self, language: &str) {
        self.with_state(|state| state.languages.push(language.to_owned()));
    }

    /// Makes every registration for `language` fail.
    pub fn reject_registrations_for(&self, language: &str) {
        self.with_state(|state| state.rejected_language = Some(language.to_owned()));
    }

    /// Makes disposal of handles for `language` fail.
    pub fn fail_disposal_for(&self, language: &str) {
        self.with_state(|state| {
            state.failing_disposals.insert(language.to_owned());
        });
    }

    /// Languages holding a live registration for `capability`.
    pub fn registered(&self, capability: CapabilityKind) -> Vec<String> {
        self.with_state(|state| state.registered(capability))
    }

    /// Whether completion resolution was offered, per registered language.
    pub fn resolvable_completions(&self) -> Vec<(String, bool)> {
        self.with_state(|state| state.resolvable_completions.clone())
    }

    /// Names passed to `create_diagnostic_collection`.
    pub fn collections(&self) -> Vec<Option<String>> {
        self.with_state(|state| state.collections.clone())
    }

    /// Completion handlers registered for the model's language.
    pub fn completion_handlers(&self, model: &TestModel) -> Vec<Arc<CompletionHandler<TestHost>>> {
        self.with_state(|state| state.completion.for_language(model.language_id()))
    }

    /// Signature help handlers registered for the model's language.
    pub fn signature_help_handlers(
        &self,
        model: &TestModel,
    ) -> Vec<Arc<SignatureHelpHandler<TestHost>>> {
        self.with_state(|state| state.signature_help.for_language(model.language_id()))
    }

    /// Hover handlers registered for the model's language.
    pub fn hover_handlers(&self, model: &TestModel) -> Vec<Arc<HoverHandler<TestHost>>> {
        self.with_state(|state| state.hover.for_language(model.language_id()))
    }

    /// Definition handlers registered for the model's language.
    pub fn definition_handlers(&self, model: &TestModel) -> Vec<Arc<DefinitionHandler<TestHost>>> {
        self.with_state(|state| state.definition.for_language(model.language_id()))
    }

    /// Reference handlers registered for the model's language.
    pub fn reference_handlers(&self, model: &TestModel) -> Vec<Arc<ReferenceHandler<TestHost>>> {
        self.with_state(|state| state.references.for_language(model.language_id()))
    }

    /// Highlight handlers registered for the model's language.
    pub fn highlight_handlers(
        &self,
        model: &TestModel,
    ) -> Vec<Arc<DocumentHighlightHandler<TestHost>>> {
        self.with_state(|state| state.highlights.for_language(model.language_id()))
    }

    /// Asks every hover handler for the model's language, in registration
    /// order.
    pub async fn trigger_hover(
        &self,
        model: &TestModel,
        position: TestPosition,
    ) -> Vec<Result<Option<String>, BridgeError>> {
        let mut results = Vec::new();
        for handler in self.hover_handlers(model) {
            results.push(
                handler
                    .provide_hover(model, &position, CancellationToken::new())
                    .await,
            );
        }
        results
    }

    /// Asks every reference handler for the model's language.
    pub async fn trigger_references(
        &self,
        model: &TestModel,
        position: TestPosition,
        include_declaration: bool,
    ) -> Vec<Result<Vec<String>, BridgeError>> {
        let mut results = Vec::new();
        for handler in self.reference_handlers(model) {
            results.push(
                handler
                    .provide_references(
                        model,
                        &position,
                        &include_declaration,
                        CancellationToken::new(),
                    )
                    .await,
            );
        }
        results
    }

    /// Asks every definition handler for the model's language.
    pub async fn trigger_definition(
        &self,
        model: &TestModel,
        position: TestPosition,
        token: &CancellationToken,
    ) -> Vec<Result<Option<Vec<String>>, BridgeError>> {
        let mut results = Vec::new();
        for handler in self.definition_handlers(model) {
            results.push(
                handler
                    .provide_definition(model, &position, token.clone())
                    .await,
            );
        }
        results
    }

    fn register<T>(
        &self,
        capability: CapabilityKind,
        language: &str,
        table: impl FnOnce(&mut HostState) -> &mut Table<T>,
        handler: Arc<T>,
    ) -> HostRegistration {
        self.with_state(|state| {
            if state.rejected_language.as_deref() == Some(language) {
                return Err(HostError::new(format!(
                    "host refused {capability} registration for {language}"
                )));
            }
            state.next_id += 1;
            let id = state.next_id;
            table(state).insert(id, language, handler);
            let handle: Box<dyn Disposable> = Box::new(TableHandle {
                shared: Arc::clone(&self.shared),
                capability,
                id,
                language: language.to_owned(),
            });
            Ok(handle)
        })
    }
}

impl HostRegistry<TestHost> for RecordingHost {
    fn language_ids(&self) -> Vec<String> {
        self.with_state(|state| state.languages.clone())
    }

    fn register_completion_provider(
        &self,
        language_id: &str,
        handler: Arc<CompletionHandler<TestHost>>,
    ) -> HostRegistration {
        let resolvable = handler.resolver().is_some();
        let handle = self.register(
            CapabilityKind::Completion,
            language_id,
            |state| &mut state.completion,
            handler,
        )?;
        self.with_state(|state| {
            state
                .resolvable_completions
                .push((language_id.to_owned(), resolvable));
        });
        Ok(handle)
    }

    fn register_hover_provider(
        &self,
        language_id: &str,
        handler: Arc<HoverHandler<TestHost>>,
    ) -> HostRegistration {
        self.register(
            CapabilityKind::Hover,
            language_id,
            |state| &mut state.hover,
            handler,
        )
    }

    fn register_signature_help_provider(
        &self,
        language_id: &str,
        handler: Arc<SignatureHelpHandler<TestHost>>,
    ) -> HostRegistration {
        self.register(
            CapabilityKind::SignatureHelp,
            language_id,
            |state| &mut state.signature_help,
            handler,
        )
    }

    fn register_definition_provider(
        &self,
        language_id: &str,
        handler: Arc<DefinitionHandler<TestHost>>,
    ) -> HostRegistration {
        self.register(
            CapabilityKind::Definition,
            language_id,
            |state| &mut state.definition,
            handler,
        )
    }

    fn register_reference_provider(
        &self,
        language_id: &str,
        handler: Arc<ReferenceHandler<TestHost>>,
    ) -> HostRegistration {
        self.register(
            CapabilityKind::References,
            language_id,
            |state| &mut state.references,
            handler,
        )
    }

    fn register_document_highlight_provider(
        &self,
        language_id: &str,
        handler: Arc<DocumentHighlightHandler<TestHost>>,
    ) -> HostRegistration {
        self.register(
            CapabilityKind::DocumentHighlight,
            language_id,
            |state| &mut state.highlights,
            handler,
        )
    }

    fn create_diagnostic_collection(&self, name: Option<&str>) -> String {
        self.with_state(|state| state.collections.push(name.map(str::to_owned)));
        name.unwrap_or("default").to_owned()
    }
}
