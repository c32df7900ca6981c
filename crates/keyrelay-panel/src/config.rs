//! TOML-based panel configuration.
//!
//! Every field carries a serde default, so an empty file (or no file at all)
//! yields a working panel.  Example:
//!
//! ```toml
//! language = "hi"
//! shift_release_ms = 100
//!
//! [relay]
//! panel_origin = "https://keyboard.example"
//! trusted_scheme_prefixes = ["extension://"]
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use keyrelay_core::resolver::ModifierState;
use keyrelay_core::TrustedOrigins;

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A file system I/O error occurred.
    #[error("I/O error reading config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level panel configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PanelConfig {
    /// Initial language layout code.
    #[serde(default = "default_language")]
    pub language: String,

    /// Shift auto-release delay in milliseconds.
    #[serde(default = "default_shift_release_ms")]
    pub shift_release_ms: u64,

    #[serde(default)]
    pub relay: RelayConfig,
}

/// Relay-boundary settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RelayConfig {
    /// The panel's own origin; the receiving side trusts it exactly.
    #[serde(default = "default_panel_origin")]
    pub panel_origin: String,

    /// Scheme prefixes trusted in addition to the exact panel origin.
    #[serde(default = "default_scheme_prefixes")]
    pub trusted_scheme_prefixes: Vec<String>,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            shift_release_ms: default_shift_release_ms(),
            relay: RelayConfig::default(),
        }
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            panel_origin: default_panel_origin(),
            trusted_scheme_prefixes: default_scheme_prefixes(),
        }
    }
}

impl PanelConfig {
    /// Loads the configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.  A
    /// missing file is an I/O error here; callers that want "no file means
    /// defaults" check existence first.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&text)?)
    }

    /// A fresh [`ModifierState`] honoring the configured shift release delay.
    pub fn modifier_state(&self) -> ModifierState {
        ModifierState::with_release_delay(Duration::from_millis(self.shift_release_ms))
    }

    /// The receiver-side trust policy this configuration describes.
    pub fn trusted_origins(&self) -> TrustedOrigins {
        let mut trusted = TrustedOrigins::new(self.relay.panel_origin.clone());
        for prefix in &self.relay.trusted_scheme_prefixes {
            // The default prefix is already part of TrustedOrigins::new.
            if prefix != TrustedOrigins::EXTENSION_SCHEME {
                trusted = trusted.with_scheme_prefix(prefix.clone());
            }
        }
        trusted
    }
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_language() -> String {
    "en".to_string()
}
fn default_shift_release_ms() -> u64 {
    100
}
fn default_panel_origin() -> String {
    "https://keyboard.example".to_string()
}
fn default_scheme_prefixes() -> Vec<String> {
    vec![TrustedOrigins::EXTENSION_SCHEME.to_string()]
}

// ── Tests ─────────────────────────────────────────────────────────────────────
