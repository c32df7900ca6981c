//! Language layout domain entities.
//!
//! A layout is a static grid of key descriptors for one language.  The table
//! is pure data: shift/caps handling lives entirely in the resolver, so the
//! display strings stored here are invariant for the lifetime of the process.

mod builtin;

use serde::{Deserialize, Serialize};

/// Classifies what pressing a key does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyKind {
    /// Produces the key's display character (or shifted character).
    Normal,
    /// Produces a fixed editing action (Backspace, Enter, Tab, Space).
    Special,
    /// Toggles modifier state (Shift, CapsLock); never produces an action.
    Modifier,
}

/// One key on the virtual keyboard.
///
/// Immutable once constructed; part of a [`LanguageLayout`].  `display` is the
/// character the key produces and shows (for non-Latin layouts this is the
/// script character, not the Latin key name), while `logical_key` is the
/// stable identifier used for special/modifier dispatch and pressed-key
/// tracking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyDescriptor {
    /// Stable key identifier, e.g. `"q"`, `"Backspace"`, `"Shift"`.
    pub logical_key: String,
    /// The string this key produces and displays when unshifted.
    pub display: String,
    /// The string produced while shift or caps-lock is active, when defined.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shift_display: Option<String>,
    /// Physical-event code carried by synthesized key events (e.g. `"Enter"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_code: Option<String>,
    /// What pressing this key does.
    pub kind: KeyKind,
    /// Horizontal size multiplier for rendering (1.0 = one key unit).
    pub width_units: f32,
}

impl KeyDescriptor {
    /// Creates a character key whose display doubles as its logical name.
    pub fn normal(display: &str) -> Self {
        Self {
            logical_key: display.to_string(),
            display: display.to_string(),
            shift_display: None,
            action_code: None,
            kind: KeyKind::Normal,
            width_units: 1.0,
        }
    }

    /// Creates a character key with a distinct logical name.
    ///
    /// Non-Latin layouts use this so the logical key stays the Latin position
    /// name (`"q"`) while the display carries the script character.
    pub fn keyed(logical_key: &str, display: &str) -> Self {
        Self {
            logical_key: logical_key.to_string(),
            display: display.to_string(),
            shift_display: None,
            action_code: None,
            kind: KeyKind::Normal,
            width_units: 1.0,
        }
    }

    /// Creates a special (action) key.
    pub fn special(logical_key: &str, display: &str) -> Self {
        Self {
            logical_key: logical_key.to_string(),
            display: display.to_string(),
            shift_display: None,
            action_code: Some(logical_key.to_string()),
            kind: KeyKind::Special,
            width_units: 1.0,
        }
    }

    /// Creates a modifier key.
    pub fn modifier(logical_key: &str, display: &str) -> Self {
        Self {
            logical_key: logical_key.to_string(),
            display: display.to_string(),
            shift_display: None,
            action_code: None,
            kind: KeyKind::Modifier,
            width_units: 1.0,
        }
    }

    /// Sets the shifted display string.
    pub fn with_shift(mut self, shift_display: &str) -> Self {
        self.shift_display = Some(shift_display.to_string());
        self
    }

    /// Sets the rendering width multiplier.
    pub fn with_width(mut self, width_units: f32) -> Self {
        self.width_units = width_units;
        self
    }
}

/// A complete keyboard layout for one language.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageLayout {
    /// Language code used for lookup, e.g. `"en"`, `"hi"`.
    pub code: String,
    /// Human-readable name shown in the language selector.
    pub name: String,
    /// Key rows, top row first.
    pub rows: Vec<Vec<KeyDescriptor>>,
}

impl LanguageLayout {
    /// Iterates over every key descriptor in row order.
    pub fn keys(&self) -> impl Iterator<Item = &KeyDescriptor> {
        self.rows.iter().flat_map(|row| row.iter())
    }
}

/// Lookup table of all supported language layouts.
///
/// Read-only after construction; there is no mutation interface.  Unknown
/// language codes resolve to `None` rather than an error — the panel simply
/// keeps its current layout.
pub struct LayoutTable {
    layouts: Vec<LanguageLayout>,
}

impl LayoutTable {
    /// Builds the table of built-in layouts.
    pub fn builtin() -> Self {
        Self {
            layouts: builtin::all(),
        }
    }

    /// Looks up a layout by language code.
    pub fn get(&self, code: &str) -> Option<&LanguageLayout> {
        self.layouts.iter().find(|l| l.code == code)
    }

    /// Returns all layouts in registration order (for the language selector).
    pub fn layouts(&self) -> &[LanguageLayout] {
        &self.layouts
    }
}

impl Default for LayoutTable {
    fn default() -> Self {
        Self::builtin()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
