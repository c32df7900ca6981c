//! In-memory plain text field.
//!
//! [`BufferField`] backs the integration tests and the demo binary.  Besides
//! implementing [`TextField`], it records every notification and synthesized
//! key event it receives in arrival order, so callers can assert on the
//! complete observable side-effect sequence of a mutation.

use crate::target::{FieldNotification, SyntheticKey, TextField};

/// One recorded side effect, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEvent {
    Notification(FieldNotification),
    Key(SyntheticKey),
}

/// A plain value+selection text buffer.
///
/// Selection bounds are char indices.  A field built with
/// [`BufferField::without_selection_api`] models elements that hold text but
/// expose no selection interface; edits on such a field degrade to a
/// collapsed caret at the start of the value.
#[derive(Debug, Default)]
pub struct BufferField {
    value: String,
    selection: (usize, usize),
    has_selection_api: bool,
    events: Vec<FieldEvent>,
}

impl BufferField {
    /// An empty field with the caret at position 0.
    pub fn new() -> Self {
        Self {
            has_selection_api: true,
            ..Self::default()
        }
    }

    /// A field holding `value` with the caret at the end.
    pub fn with_value(value: &str) -> Self {
        let end = value.chars().count();
        Self {
            value: value.to_string(),
            selection: (end, end),
            has_selection_api: true,
            events: Vec::new(),
        }
    }

    /// A field holding `value` but exposing no selection interface.
    pub fn without_selection_api(value: &str) -> Self {
        Self {
            value: value.to_string(),
            selection: (0, 0),
            has_selection_api: false,
            events: Vec::new(),
        }
    }

    /// Sets the selection range (builder form for tests).
    pub fn with_selection(mut self, start: usize, end: usize) -> Self {
        self.set_selection(start, end);
        self
    }

    /// Drains the recorded side effects.
    pub fn take_events(&mut self) -> Vec<FieldEvent> {
        std::mem::take(&mut self.events)
    }

    fn char_len(&self) -> usize {
        self.value.chars().count()
    }
}

impl TextField for BufferField {
    fn value(&self) -> &str {
        &self.value
    }

    fn selection(&self) -> Option<(usize, usize)> {
        self.has_selection_api.then_some(self.selection)
    }

    fn set_value(&mut self, value: String) {
        self.value = value;
        // Keep the stored selection within bounds of the new value.
        let len = self.char_len();
        self.selection = (self.selection.0.min(len), self.selection.1.min(len));
    }

    fn set_selection(&mut self, start: usize, end: usize) {
        if !self.has_selection_api {
            return;
        }
        let len = self.char_len();
        let start = start.min(len);
        let end = end.min(len).max(start);
        self.selection = (start, end);
    }

    fn notify(&mut self, notification: FieldNotification) {
        self.events.push(FieldEvent::Notification(notification));
    }

    fn dispatch_key(&mut self, event: SyntheticKey) {
        self.events.push(FieldEvent::Key(event));
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
