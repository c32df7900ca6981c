//! JSON message types for the panel ↔ host-document relay.
//!
//! Both directions are small: the panel announces itself once and then streams
//! key presses; the host can ask the panel to toggle its visibility.  Every
//! payload is a JSON object whose `"type"` (or `"action"` for host commands)
//! field identifies the variant, handled by serde's `tag` attribute:
//!
//! ```json
//! {"type":"init"}
//! {"type":"keyPress","key":"अ"}
//! {"type":"keyPress","key":"Backspace"}
//! {"action":"toggleKeyboard"}
//! ```
//!
//! The `key` field carries either a literal string to insert or one of the
//! named editing keys (`"Backspace"`, `"Enter"`, `"Tab"`).  Modifier
//! resolution happens on the panel side before transmission, so shifted
//! characters arrive already shifted and the wire never carries modifier
//! state.
//!
//! Note the payload deliberately has no origin field: the sender's origin is
//! reported by the message carrier and attached by the transport envelope,
//! because a self-declared origin inside the payload would be trivially
//! forgeable.

use serde::{Deserialize, Serialize};

use crate::resolver::KeyAction;

/// Spaces inserted in place of a literal tab character.
pub const TAB_SUBSTITUTE: &str = "  ";

// ── Panel → Host messages ─────────────────────────────────────────────────────

/// All messages the keyboard panel sends across the relay boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum RelayMessage {
    /// Panel announces it is up.  Lifecycle signal only; carries no payload
    /// and triggers no mutation on the receiving side.
    Init,

    /// One resolved key press.
    #[serde(rename_all = "camelCase")]
    KeyPress {
        /// Literal string to insert, or `"Backspace"` / `"Enter"` / `"Tab"`.
        key: String,
    },
}

impl RelayMessage {
    /// Encodes a resolved [`KeyAction`] as a key-press message.
    pub fn key_press(action: &KeyAction) -> Self {
        Self::KeyPress {
            key: wire_key(action),
        }
    }
}

/// The wire `key` string for a resolved action.
///
/// Selection deletion travels as `"Backspace"`: the receiving side applies
/// backspace against the selection it finds at time of receipt, which
/// collapses to the same edit.
pub fn wire_key(action: &KeyAction) -> String {
    match action {
        KeyAction::InsertChars(text) => text.clone(),
        KeyAction::DeleteBackward | KeyAction::DeleteSelection => "Backspace".to_string(),
        KeyAction::InsertNewline => "Enter".to_string(),
        KeyAction::InsertTab => "Tab".to_string(),
    }
}

/// Decodes a wire `key` string back into the action to apply.
///
/// Anything that is not a named editing key is a literal insertion, so this
/// conversion is total: an unexpected string inserts itself rather than
/// erroring.
pub fn action_for_key(key: &str) -> KeyAction {
    match key {
        "Backspace" => KeyAction::DeleteBackward,
        "Enter" => KeyAction::InsertNewline,
        "Tab" => KeyAction::InsertTab,
        literal => KeyAction::InsertChars(literal.to_string()),
    }
}

// ── Host → Panel commands ─────────────────────────────────────────────────────

/// Commands the host document sends to the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum HostCommand {
    /// Show the panel if hidden, hide it if shown.
    ToggleKeyboard,
}

/// Acknowledgement returned for a [`HostCommand`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandResponse {
    pub success: bool,
}

impl CommandResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
