//! Origin trust policy for the relay receiver.
//!
//! The message carrier reports where each message came from; the receiver
//! accepts a message only when that reported origin is either the exact panel
//! origin or carries a trusted scheme prefix (the whole privileged-context
//! family, e.g. `extension://…`).  Everything else is dropped without any
//! observable effect, so a probing sender cannot distinguish "untrusted" from
//! "no keyboard present".

use serde::{Deserialize, Serialize};

/// A carrier-reported message origin, e.g. `"https://keyboard.example"` or
/// `"extension://abcdef"`.
///
/// Plain newtype: the policy lives in [`TrustedOrigins`], not here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Origin(String);

impl Origin {
    pub fn new(origin: impl Into<String>) -> Self {
        Self(origin.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Origin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Origin {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// The receiver's allow-list: one exact panel origin plus any number of
/// trusted scheme prefixes.
#[derive(Debug, Clone)]
pub struct TrustedOrigins {
    panel_origin: String,
    scheme_prefixes: Vec<String>,
}

impl TrustedOrigins {
    /// Default trusted scheme prefix for the privileged panel context.
    pub const EXTENSION_SCHEME: &'static str = "extension://";

    /// Builds the policy around the configured panel origin, trusting
    /// [`Self::EXTENSION_SCHEME`] origins as well.
    pub fn new(panel_origin: impl Into<String>) -> Self {
        Self {
            panel_origin: panel_origin.into(),
            scheme_prefixes: vec![Self::EXTENSION_SCHEME.to_string()],
        }
    }

    /// Adds another trusted scheme prefix.
    pub fn with_scheme_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.scheme_prefixes.push(prefix.into());
        self
    }

    /// Returns `true` when `origin` may deliver key presses.
    pub fn is_trusted(&self, origin: &Origin) -> bool {
        origin.as_str() == self.panel_origin
            || self
                .scheme_prefixes
                .iter()
                .any(|prefix| origin.as_str().starts_with(prefix.as_str()))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
