//! Minimal document references used for selector matching.

use std::borrow::Cow;

use percent_encoding::percent_decode_str;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::errors::IdentifierError;
use crate::host::HostModel;

/// Protocol-side document reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentIdentifier {
    /// Document URI as sent over the protocol.
    pub uri: String,
    /// Language id of the document.
    pub language_id: String,
}

impl DocumentIdentifier {
    /// Creates a document identifier.
    #[must_use]
    pub fn new(uri: impl Into<String>, language_id: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            language_id: language_id.into(),
        }
    }
}

/// Host-side document reference derived from a [`DocumentIdentifier`] or a
/// live host model.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModelIdentifier {
    uri: Url,
    language_id: String,
}

impl ModelIdentifier {
    /// Creates an identifier from a parsed URI and language id.
    #[must_use]
    pub fn new(uri: Url, language_id: impl Into<String>) -> Self {
        Self {
            uri,
            language_id: language_id.into(),
        }
    }

    /// Reads the URI and language mode of a live host model.
    #[must_use]
    pub fn from_model<M: HostModel + ?Sized>(model: &M) -> Self {
        Self::new(model.uri().clone(), model.language_id())
    }

    /// The document URI.
    #[must_use]
    pub const fn uri(&self) -> &Url {
        &self.uri
    }

    /// The document language id.
    #[must_use]
    pub const fn language_id(&self) -> &str {
        self.language_id.as_str()
    }

    /// The URI scheme, e.g. `file`.
    #[must_use]
    pub fn scheme(&self) -> &str {
        self.uri.scheme()
    }

    /// The percent-decoded URI path. Query and fragment are excluded.
    #[must_use]
    pub fn path(&self) -> Cow<'_, str> {
        percent_decode_str(self.uri.path()).decode_utf8_lossy()
    }
}

impl TryFrom<&DocumentIdentifier> for ModelIdentifier {
    type Error = IdentifierError;

    fn try_from(document: &DocumentIdentifier) -> Result<Self, Self::Error> {
        let uri = Url::parse(&document.uri).map_err(|source| IdentifierError::InvalidUri {
            uri: document.uri.clone(),
            source,
        })?;
        Ok(Self::new(uri, document.language_id.clone()))
    }
}
