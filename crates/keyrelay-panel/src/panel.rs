//! The keyboard panel and its key sink seam.
//!
//! [`KeyboardPanel`] turns logical key presses into resolved actions and
//! pushes them into a [`KeySink`].  The sink is the only difference between
//! same-context and cross-context operation: [`DirectSink`] injects into a
//! document it owns, while [`RelaySender`](crate::sender::RelaySender)
//! encodes actions onto the relay channel.
//!
//! Every resolved action is also returned to the caller, whether or not the
//! sink found anywhere to put it; the UI renders from that return value.

use keyrelay_core::resolver::KeyAction;
use keyrelay_core::{CommandResponse, HostCommand, KeyDescriptor, LanguageLayout, LayoutTable};
use keyrelay_host::{apply, locate, PageDocument};

use crate::config::PanelConfig;
use crate::state::PanelState;

/// Where resolved key actions go.
pub trait KeySink {
    /// Delivers one resolved action.
    fn deliver(&mut self, action: &KeyAction);

    /// Announces the panel (called when it becomes visible).  Only relayed
    /// sinks have anything to announce.
    fn announce(&mut self) {}
}

/// Same-context sink: injects straight into an owned document.
#[derive(Debug, Default)]
pub struct DirectSink {
    pub document: PageDocument,
}

impl DirectSink {
    pub fn new(document: PageDocument) -> Self {
        Self { document }
    }
}

impl KeySink for DirectSink {
    fn deliver(&mut self, action: &KeyAction) {
        match locate(&mut self.document) {
            Some(target) => apply(target, action),
            None => tracing::debug!(?action, "no editable element focused; action dropped"),
        }
    }
}

/// The on-screen keyboard.
///
/// Holds the layout table, the mutable panel state, and the sink.  Hidden by
/// default; a hidden panel still resolves and delivers key presses (callers
/// decide whether to forward input while hidden — the panel itself only
/// tracks visibility for the host toggle command).
pub struct KeyboardPanel<S: KeySink> {
    layouts: LayoutTable,
    layout: LanguageLayout,
    state: PanelState,
    sink: S,
    visible: bool,
}

impl<S: KeySink> KeyboardPanel<S> {
    /// Builds a panel from configuration.
    ///
    /// An unknown configured language falls back to English rather than
    /// failing: a keyboard that cannot come up helps nobody.
    pub fn new(config: &PanelConfig, sink: S) -> Self {
        let layouts = LayoutTable::builtin();
        let layout = match layouts.get(&config.language) {
            Some(layout) => layout.clone(),
            None => {
                tracing::warn!(
                    language = %config.language,
                    "unknown language in config; falling back to en"
                );
                layouts
                    .layouts()
                    .first()
                    .cloned()
                    .unwrap_or_else(|| LanguageLayout {
                        code: "en".to_string(),
                        name: "English".to_string(),
                        rows: Vec::new(),
                    })
            }
        };
        let state = PanelState::new(layout.code.clone(), config.modifier_state());
        Self {
            layouts,
            layout,
            state,
            sink,
            visible: false,
        }
    }

    /// The currently selected layout.
    pub fn layout(&self) -> &LanguageLayout {
        &self.layout
    }

    pub fn state(&self) -> &PanelState {
        &self.state
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Switches the layout.  Unknown codes leave the current layout alone
    /// and return `false`.
    pub fn set_language(&mut self, code: &str) -> bool {
        match self.layouts.get(code) {
            Some(layout) => {
                self.layout = layout.clone();
                self.state.set_language(code);
                true
            }
            None => {
                tracing::debug!(code, "unknown language code ignored");
                false
            }
        }
    }

    /// Presses the key with this logical name on the current layout.
    ///
    /// Resolves against the modifier state, delivers any produced action to
    /// the sink, and returns the action for the caller's own rendering.
    /// Unknown keys resolve to nothing.
    pub fn press(&mut self, logical_key: &str) -> Option<KeyAction> {
        let descriptor = match self.find_key(logical_key) {
            Some(descriptor) => descriptor,
            None => {
                tracing::debug!(logical_key, "press of a key absent from the layout");
                return None;
            }
        };
        let action = self.state.key_down(&descriptor);
        if let Some(action) = &action {
            self.sink.deliver(action);
        }
        action
    }

    /// Releases the key with this logical name.
    pub fn release(&mut self, logical_key: &str) {
        if let Some(descriptor) = self.find_key(logical_key) {
            self.state.key_up(&descriptor);
        }
    }

    fn find_key(&self, logical_key: &str) -> Option<KeyDescriptor> {
        self.layout
            .keys()
            .find(|key| key.logical_key == logical_key)
            .cloned()
    }

    /// Makes the panel visible, announcing it to the sink on the transition.
    pub fn show(&mut self) {
        if !self.visible {
            self.visible = true;
            self.sink.announce();
        }
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Handles a command from the host document.
    pub fn handle_command(&mut self, command: HostCommand) -> CommandResponse {
        match command {
            HostCommand::ToggleKeyboard => {
                if self.visible {
                    self.hide();
                } else {
                    self.show();
                }
                tracing::debug!(visible = self.visible, "keyboard toggled by host");
                CommandResponse::ok()
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use keyrelay_host::{BufferField, PageElement, TextField};

    // ── Recording sink ────────────────────────────────────────────────────────

    #[derive(Default)]
    struct RecordingSink {
        delivered: Vec<KeyAction>,
        announcements: usize,
    }

    impl KeySink for RecordingSink {
        fn deliver(&mut self, action: &KeyAction) {
            self.delivered.push(action.clone());
        }

        fn announce(&mut self) {
            self.announcements += 1;
        }
    }

    fn panel() -> KeyboardPanel<RecordingSink> {
        KeyboardPanel::new(&PanelConfig::default(), RecordingSink::default())
    }

    #[test]
    fn test_press_delivers_the_resolved_action_and_returns_it() {
        let mut panel = panel();

        let action = panel.press("a");

        assert_eq!(action, Some(KeyAction::InsertChars("a".to_string())));
        assert_eq!(panel.sink().delivered, vec![KeyAction::InsertChars("a".to_string())]);
    }

    #[test]
    fn test_shift_then_letter_delivers_the_shifted_character() {
        let mut panel = panel();

        assert_eq!(panel.press("Shift"), None);
        let action = panel.press("a");

        assert_eq!(action, Some(KeyAction::InsertChars("A".to_string())));
    }

    #[test]
    fn test_modifier_press_delivers_nothing_to_the_sink() {
        let mut panel = panel();

        panel.press("Shift");
        panel.press("CapsLock");

        assert!(panel.sink().delivered.is_empty());
    }

    #[test]
    fn test_press_of_unknown_key_is_a_no_op() {
        let mut panel = panel();
        assert_eq!(panel.press("NoSuchKey"), None);
        assert!(panel.sink().delivered.is_empty());
    }

    #[test]
    fn test_language_switch_changes_the_produced_characters() {
        let mut panel = panel();

        assert!(panel.set_language("ru"));
        let action = panel.press("q");

        assert_eq!(action, Some(KeyAction::InsertChars("й".to_string())));
    }

    #[test]
    fn test_unknown_language_switch_keeps_the_current_layout() {
        let mut panel = panel();

        assert!(!panel.set_language("tlh"));

        assert_eq!(panel.layout().code, "en");
    }

    #[test]
    fn test_unknown_configured_language_falls_back_to_english() {
        let config = PanelConfig {
            language: "tlh".to_string(),
            ..PanelConfig::default()
        };
        let panel = KeyboardPanel::new(&config, RecordingSink::default());
        assert_eq!(panel.layout().code, "en");
    }

    #[test]
    fn test_panel_starts_hidden() {
        assert!(!panel().visible());
    }

    #[test]
    fn test_show_announces_exactly_once_per_transition() {
        let mut panel = panel();

        panel.show();
        panel.show(); // already visible; no second announcement

        assert_eq!(panel.sink().announcements, 1);
    }

    #[test]
    fn test_toggle_command_flips_visibility_and_reports_success() {
        let mut panel = panel();

        let response = panel.handle_command(HostCommand::ToggleKeyboard);
        assert!(response.success);
        assert!(panel.visible());

        let response = panel.handle_command(HostCommand::ToggleKeyboard);
        assert!(response.success);
        assert!(!panel.visible());
    }

    #[test]
    fn test_toggle_to_visible_announces() {
        let mut panel = panel();
        panel.handle_command(HostCommand::ToggleKeyboard);
        assert_eq!(panel.sink().announcements, 1);
    }

    // ── DirectSink ────────────────────────────────────────────────────────────

    #[test]
    fn test_direct_sink_types_into_the_focused_field() {
        let mut document = PageDocument::new();
        let idx = document.add(PageElement::Field(BufferField::new()));
        document.focus(idx);
        let mut panel =
            KeyboardPanel::new(&PanelConfig::default(), DirectSink::new(document));

        panel.press("h");
        panel.press("i");

        assert_eq!(panel.sink().document.field(idx).unwrap().value(), "hi");
    }

    #[test]
    fn test_direct_sink_without_focus_still_returns_the_action() {
        let document = PageDocument::new();
        let mut panel =
            KeyboardPanel::new(&PanelConfig::default(), DirectSink::new(document));

        // Nothing focused: the sink drops it, the caller still sees it.
        let action = panel.press("a");

        assert_eq!(action, Some(KeyAction::InsertChars("a".to_string())));
    }
}
