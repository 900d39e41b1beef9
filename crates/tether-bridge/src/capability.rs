//! Capabilities bridged from protocol providers to the host.

use std::fmt;

use tether_config::CapabilityMatrix;

/// Provider capability the bridge can register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CapabilityKind {
    /// `textDocument/completion` and `completionItem/resolve`.
    Completion,
    /// `textDocument/hover`.
    Hover,
    /// `textDocument/signatureHelp`.
    SignatureHelp,
    /// `textDocument/definition`.
    Definition,
    /// `textDocument/references`.
    References,
    /// `textDocument/documentHighlight`.
    DocumentHighlight,
}

impl CapabilityKind {
    /// Every capability, in registration-API order.
    pub const ALL: [Self; 6] = [
        Self::Completion,
        Self::Hover,
        Self::SignatureHelp,
        Self::Definition,
        Self::References,
        Self::DocumentHighlight,
    ];

    /// Returns the capability key used for configuration overrides.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Completion => "completion",
            Self::Hover => "hover",
            Self::SignatureHelp => "signature-help",
            Self::Definition => "definition",
            Self::References => "references",
            Self::DocumentHighlight => "document-highlight",
        }
    }

    /// Whether the capability should be registered for `language`.
    #[must_use]
    pub fn is_enabled_for(self, language: &str, overrides: &CapabilityMatrix) -> bool {
        !overrides.is_denied(language, self.key())
    }
}

impl fmt::Display for CapabilityKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.key())
    }
}
