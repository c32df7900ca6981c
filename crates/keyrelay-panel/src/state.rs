//! Mutable panel state: language, modifiers, pressed keys.
//!
//! The pressed-key set exists for rendering (highlighting held keys); it has
//! no effect on resolution.  Modifier effects all live in the resolver.

use std::collections::HashSet;

use keyrelay_core::resolver::{resolve, KeyAction, ModifierState};
use keyrelay_core::KeyDescriptor;

/// Per-panel mutable state.
#[derive(Debug)]
pub struct PanelState {
    language: String,
    modifiers: ModifierState,
    pressed: HashSet<String>,
}

impl PanelState {
    pub fn new(language: impl Into<String>, modifiers: ModifierState) -> Self {
        Self {
            language: language.into(),
            modifiers,
            pressed: HashSet::new(),
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn set_language(&mut self, language: impl Into<String>) {
        self.language = language.into();
    }

    pub fn modifiers(&self) -> &ModifierState {
        &self.modifiers
    }

    /// `true` while the key with this logical name is held.
    pub fn is_pressed(&self, logical_key: &str) -> bool {
        self.pressed.contains(logical_key)
    }

    /// Registers a key press and resolves it against the modifier state.
    pub fn key_down(&mut self, descriptor: &KeyDescriptor) -> Option<KeyAction> {
        self.pressed.insert(descriptor.logical_key.clone());
        resolve(descriptor, &mut self.modifiers)
    }

    /// Registers a key release.
    pub fn key_up(&mut self, descriptor: &KeyDescriptor) {
        self.pressed.remove(&descriptor.logical_key);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> PanelState {
        PanelState::new("en", ModifierState::new())
    }

    #[test]
    fn test_key_down_marks_the_key_pressed() {
        let mut state = state();
        let desc = KeyDescriptor::normal("a");

        state.key_down(&desc);

        assert!(state.is_pressed("a"));
    }

    #[test]
    fn test_key_up_clears_the_pressed_mark() {
        let mut state = state();
        let desc = KeyDescriptor::normal("a");

        state.key_down(&desc);
        state.key_up(&desc);

        assert!(!state.is_pressed("a"));
    }

    #[test]
    fn test_key_down_resolves_through_the_modifier_state() {
        let mut state = state();
        let shift = KeyDescriptor::modifier("Shift", "Shift");
        let a = KeyDescriptor::normal("a").with_shift("A");

        assert_eq!(state.key_down(&shift), None);
        assert_eq!(
            state.key_down(&a),
            Some(KeyAction::InsertChars("A".to_string()))
        );
    }

    #[test]
    fn test_pressed_keys_do_not_affect_resolution() {
        let mut state = state();
        let a = KeyDescriptor::normal("a");

        // Hold one key while pressing another.
        state.key_down(&KeyDescriptor::normal("z"));
        let action = state.key_down(&a);

        assert_eq!(action, Some(KeyAction::InsertChars("a".to_string())));
    }

    #[test]
    fn test_set_language_changes_only_the_code() {
        let mut state = state();
        state.key_down(&KeyDescriptor::modifier("CapsLock", "Caps"));

        state.set_language("hi");

        assert_eq!(state.language(), "hi");
        assert!(state.modifiers().caps_lock_active());
    }
}
