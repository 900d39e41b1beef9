//! Converter between the string-based test host and `lsp-types`.

use std::str::FromStr;

use lsp_types::{
    CompletionContext, CompletionItem, CompletionResponse, CompletionTriggerKind,
    DocumentHighlight, GotoDefinitionResponse, Hover, HoverContents, Location, MarkedString,
    Position, ReferenceContext, SignatureHelp, SignatureHelpContext, SignatureHelpTriggerKind,
    TextDocumentIdentifier, TextDocumentPositionParams, Uri,
};

use super::{TestHost, TestModel, TestPosition};
use crate::convert::{ConversionError, Converter};
use crate::host::HostModel;

/// Translates one-based positions and flattens results to strings.
pub struct TestConverter;

impl Converter<TestHost> for TestConverter {
    fn to_position_params(
        &self,
        model: &TestModel,
        position: &TestPosition,
    ) -> Result<TextDocumentPositionParams, ConversionError> {
        if position.line == 0 || position.column == 0 {
            return Err(ConversionError::new(format!(
                "positions are one-based, got {}:{}",
                position.line, position.column
            )));
        }
        let uri = Uri::from_str(model.uri().as_str())
            .map_err(|error| ConversionError::new(format!("unrepresentable uri: {error}")))?;
        Ok(TextDocumentPositionParams {
            text_document: TextDocumentIdentifier { uri },
            position: Position::new(position.line - 1, position.column - 1),
        })
    }

    fn to_completion_context(
        &self,
        context: &Option<String>,
    ) -> Result<Option<CompletionContext>, ConversionError> {
        let trigger_kind = if context.is_some() {
            CompletionTriggerKind::TRIGGER_CHARACTER
        } else {
            CompletionTriggerKind::INVOKED
        };
        Ok(Some(CompletionContext {
            trigger_kind,
            trigger_character: context.clone(),
        }))
    }

    fn to_host_completion_list(
        &self,
        response: Option<CompletionResponse>,
    ) -> Result<Vec<String>, ConversionError> {
        let items = match response {
            None => Vec::new(),
            Some(CompletionResponse::Array(items)) => items,
            Some(CompletionResponse::List(list)) => list.items,
        };
        Ok(items.into_iter().map(|item| item.label).collect())
    }

    fn to_completion_item(&self, item: &String) -> Result<CompletionItem, ConversionError> {
        Ok(CompletionItem {
            label: item.clone(),
            ..CompletionItem::default()
        })
    }

    fn to_host_completion_item(&self, item: CompletionItem) -> Result<String, ConversionError> {
        Ok(match item.detail {
            Some(detail) => format!("{} ({detail})", item.label),
            None => item.label,
        })
    }

    fn to_host_hover(&self, hover: Option<Hover>) -> Result<Option<String>, ConversionError> {
        Ok(hover.map(|found| match found.contents {
            HoverContents::Scalar(marked) => marked_text(marked),
            HoverContents::Array(parts) => parts
                .into_iter()
                .map(marked_text)
                .collect::<Vec<_>>()
                .join("\n"),
            HoverContents::Markup(markup) => markup.value,
        }))
    }

    fn to_signature_help_context(
        &self,
        context: &Option<String>,
    ) -> Result<Option<SignatureHelpContext>, ConversionError> {
        let trigger_kind = if context.is_some() {
            SignatureHelpTriggerKind::TRIGGER_CHARACTER
        } else {
            SignatureHelpTriggerKind::INVOKED
        };
        Ok(Some(SignatureHelpContext {
            trigger_kind,
            trigger_character: context.clone(),
            is_retrigger: false,
            active_signature_help: None,
        }))
    }

    fn to_host_signature_help(
        &self,
        help: Option<SignatureHelp>,
    ) -> Result<Option<Vec<String>>, ConversionError> {
        Ok(help.map(|found| {
            found
                .signatures
                .into_iter()
                .map(|signature| signature.label)
                .collect()
        }))
    }

    fn to_host_definition(
        &self,
        definition: Option<GotoDefinitionResponse>,
    ) -> Result<Option<Vec<String>>, ConversionError> {
        Ok(definition.map(|found| match found {
            GotoDefinitionResponse::Scalar(location) => vec![location_text(&location)],
            GotoDefinitionResponse::Array(locations) => {
                locations.iter().map(location_text).collect()
            }
            GotoDefinitionResponse::Link(links) => links
                .iter()
                .map(|link| {
                    format!(
                        "{}:{}",
                        link.target_uri.as_str(),
                        link.target_range.start.line
                    )
                })
                .collect(),
        }))
    }

    fn to_reference_context(&self, context: &bool) -> Result<ReferenceContext, ConversionError> {
        Ok(ReferenceContext {
            include_declaration: *context,
        })
    }

    fn to_host_locations(
        &self,
        locations: Option<Vec<Location>>,
    ) -> Result<Vec<String>, ConversionError> {
        Ok(locations
            .unwrap_or_default()
            .iter()
            .map(location_text)
            .collect())
    }

    fn to_host_document_highlights(
        &self,
        highlights: Option<Vec<DocumentHighlight>>,
    ) -> Result<Vec<String>, ConversionError> {
        Ok(highlights
            .unwrap_or_default()
            .into_iter()
            .map(|highlight| {
                format!(
                    "{}:{}",
                    highlight.range.start.line, highlight.range.start.character
                )
            })
            .collect())
    }
}

fn marked_text(marked: MarkedString) -> String {
    match marked {
        MarkedString::String(text) => text,
        MarkedString::LanguageString(code) => code.value,
    }
}

fn location_text(location: &Location) -> String {
    format!("{}:{}", location.uri.as_str(), location.range.start.line)
}
