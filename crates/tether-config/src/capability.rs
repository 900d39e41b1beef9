use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use thiserror::Error;

/// Directive applied to a capability when the bridge fans registrations out.
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum CapabilityOverride {
    /// Register the capability for the language (default behaviour).
    #[default]
    Allow,
    /// Skip the language when registering the capability.
    Deny,
}

/// Errors produced when parsing [`CapabilityDirective`] values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CapabilityDirectiveParseError {
    /// Language separator (`:`) was missing from the directive.
    #[error("directive '{0}' is missing the language separator ':'")]
    MissingLanguage(String),
    /// Capability override assignment (`=`) was missing from the directive.
    #[error("directive '{0}' is missing the override assignment '='")]
    MissingDirective(String),
    /// The override directive could not be parsed.
    #[error("unsupported capability directive '{0}'")]
    InvalidDirective(String),
}

/// Declarative override for a capability, written as `language:capability=directive`.
///
/// Serialised in the same textual form so configuration files list
/// directives as plain strings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(try_from = "String", into = "String")]
pub struct CapabilityDirective {
    /// Host language identifier such as `typescript` or `plaintext`.
    pub language: String,
    /// Capability key such as `hover` or `signature-help`.
    pub capability: String,
    /// Override applied to the capability.
    pub directive: CapabilityOverride,
}

impl CapabilityDirective {
    /// Creates a new directive.
    #[must_use]
    pub fn new(
        language: impl Into<String>,
        capability: impl Into<String>,
        directive: CapabilityOverride,
    ) -> Self {
        Self {
            language: language.into(),
            capability: capability.into(),
            directive,
        }
    }
}

impl fmt::Display for CapabilityDirective {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "{}:{}={}",
            self.language, self.capability, self.directive
        )
    }
}

impl FromStr for CapabilityDirective {
    type Err = CapabilityDirectiveParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let (language, rest) = input
            .split_once(':')
            .ok_or_else(|| CapabilityDirectiveParseError::MissingLanguage(input.to_owned()))?;
        let (capability, directive) = rest
            .split_once('=')
            .ok_or_else(|| CapabilityDirectiveParseError::MissingDirective(input.to_owned()))?;
        let parsed = CapabilityOverride::from_str(directive.trim())
            .map_err(|_| CapabilityDirectiveParseError::InvalidDirective(directive.to_owned()))?;
        Ok(Self::new(language, capability, parsed))
    }
}

impl TryFrom<String> for CapabilityDirective {
    type Error = CapabilityDirectiveParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_str(&value)
    }
}

impl From<CapabilityDirective> for String {
    fn from(directive: CapabilityDirective) -> Self {
        directive.to_string()
    }
}

/// Set of directives grouped by language and capability.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct CapabilityMatrix {
    /// Mapping of language identifiers to their overrides.
    #[serde(default)]
    pub languages: BTreeMap<String, LanguageCapabilities>,
}

impl CapabilityMatrix {
    /// Builds a matrix from an iterator of directives.
    #[must_use]
    pub fn from_directives<'a, I>(directives: I) -> Self
    where
        I: IntoIterator<Item = &'a CapabilityDirective>,
    {
        let mut matrix = Self::default();
        for directive in directives {
            matrix.set_override(
                directive.language.clone(),
                directive.capability.clone(),
                directive.directive,
            );
        }
        matrix
    }

    /// Stores or updates an override for a capability.
    pub fn set_override(
        &mut self,
        language: impl Into<String>,
        capability: impl Into<String>,
        directive: CapabilityOverride,
    ) {
        let entry = self
            .languages
            .entry(normalise_key(&language.into()))
            .or_default();
        entry
            .overrides
            .insert(normalise_key(&capability.into()), directive);
    }

    /// Retrieves an override for a capability, when present.
    #[must_use]
    pub fn override_for(&self, language: &str, capability: &str) -> Option<CapabilityOverride> {
        let capability_key = normalise_key(capability);
        self.languages
            .get(&normalise_key(language))
            .and_then(|caps| caps.overrides.get(&capability_key).copied())
    }

    /// Whether registration of `capability` must skip `language`.
    #[must_use]
    pub fn is_denied(&self, language: &str, capability: &str) -> bool {
        self.override_for(language, capability) == Some(CapabilityOverride::Deny)
    }
}

/// Capability overrides scoped to a single language.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct LanguageCapabilities {
    /// Overrides keyed by capability key.
    #[serde(default)]
    pub overrides: BTreeMap<String, CapabilityOverride>,
}

/// Deduplicates capability directives in-place, keeping the last directive per key.
pub fn deduplicate_directives(directives: &mut Vec<CapabilityDirective>) {
    let mut merged: BTreeMap<(String, String), CapabilityDirective> = BTreeMap::new();
    for mut directive in directives.drain(..) {
        let language = normalise_key(&directive.language);
        let capability = normalise_key(&directive.capability);
        directive.language = language.clone();
        directive.capability = capability.clone();
        merged.insert((language, capability), directive);
    }
    *directives = merged.into_values().collect();
}

fn normalise_key(key: &str) -> String {
    key.trim().to_lowercase()
}
