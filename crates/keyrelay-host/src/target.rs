//! Input-target location and the editing interfaces behind it.
//!
//! Injection never asks a document *what* the focused element is; it asks
//! what the element *can do*.  An element that exposes the plain
//! value+selection interface is a [`InputTarget::PlainField`]; one that
//! exposes the range-based rich-content interface is a
//! [`InputTarget::RichText`]; one that exposes neither is not a target at
//! all.  This keeps the mutator independent of any concrete document model
//! and makes the classification purely behavioral.
//!
//! All positions are Unicode scalar (char) indices, never byte offsets: a
//! Devanagari or Cyrillic character counts as one position.

use keyrelay_core::KeyDescriptor;

// ── Observable side effects ───────────────────────────────────────────────────

/// Change notifications a target emits after a mutation, so host-side
/// listeners (validation, autosave) observe programmatic edits the same way
/// they observe typed ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldNotification {
    /// The value changed (or a mutation was attempted); fired per edit.
    ValueChanged,
    /// The edit is committed; plain fields fire this after every
    /// `ValueChanged`, rich regions never do.
    ChangeCommitted,
}

/// Phase of a synthesized key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPhase {
    KeyDown,
    KeyPress,
    KeyUp,
}

/// One synthesized key event, dispatched so listeners keyed on physical
/// events (e.g. submit-on-Enter) fire for virtual presses too.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntheticKey {
    pub phase: KeyPhase,
    /// Logical key name, e.g. `"Enter"`.
    pub key: String,
    /// Physical-event code, e.g. `"Enter"`, `"Tab"`.
    pub code: String,
}

impl SyntheticKey {
    /// The full down/press/up triple for one named key.
    pub fn triple(key: &str, code: &str) -> [Self; 3] {
        let make = |phase| Self {
            phase,
            key: key.to_string(),
            code: code.to_string(),
        };
        [
            make(KeyPhase::KeyDown),
            make(KeyPhase::KeyPress),
            make(KeyPhase::KeyUp),
        ]
    }

    /// The triple for a special key descriptor, using its action code.
    pub fn triple_for(descriptor: &KeyDescriptor) -> [Self; 3] {
        let code = descriptor
            .action_code
            .as_deref()
            .unwrap_or(&descriptor.logical_key);
        Self::triple(&descriptor.logical_key, code)
    }
}

// ── Editing interfaces ────────────────────────────────────────────────────────

/// The plain value+selection editing interface (single-line and multi-line
/// text fields).
pub trait TextField {
    /// Current value.
    fn value(&self) -> &str;

    /// Selection as `(start, end)` char indices with `start <= end`, or
    /// `None` when the element does not expose a selection API (edits then
    /// degrade to a collapsed caret at the start of the value).
    fn selection(&self) -> Option<(usize, usize)>;

    /// Replaces the whole value.
    fn set_value(&mut self, value: String);

    /// Moves the selection.  No-op when the selection API is unsupported.
    fn set_selection(&mut self, start: usize, end: usize);

    fn notify(&mut self, notification: FieldNotification);

    fn dispatch_key(&mut self, event: SyntheticKey);
}

/// The range-based rich-content editing interface.
///
/// The region keeps an internal edit range (selection or collapsed caret);
/// the mutator drives it with these primitives rather than reading positions
/// out, because rich content has no single linear index space.
pub trait RichTextRegion {
    /// `true` when the edit range is non-collapsed.
    fn has_selection(&self) -> bool;

    /// Deletes the edit range's content and collapses the range to its start.
    fn delete_range(&mut self);

    /// Extends a collapsed range one character backwards within its current
    /// text run.  Returns `false` (and leaves the range alone) at offset 0.
    fn extend_start_back(&mut self) -> bool;

    /// Inserts text at the collapsed range and places the caret after it.
    fn insert_text(&mut self, text: &str);

    fn notify(&mut self, notification: FieldNotification);

    fn dispatch_key(&mut self, event: SyntheticKey);
}

// ── Capability probe ──────────────────────────────────────────────────────────

/// The focused editable element, classified by capability.
pub enum InputTarget<'a> {
    PlainField(&'a mut dyn TextField),
    RichText(&'a mut dyn RichTextRegion),
}

/// Probe seam implemented by a document's elements.
pub trait Editable {
    /// Returns the editing interface this element exposes, if any.
    ///
    /// Elements offering both interfaces classify as a plain field; elements
    /// offering neither return `None` and are skipped by injection.
    fn probe_target(&mut self) -> Option<InputTarget<'_>>;
}

/// A document that can report its focused element.
pub trait HostDocument {
    /// The element holding focus right now, or `None`.
    fn active_element(&mut self) -> Option<&mut dyn Editable>;
}

/// Locates the current input target: the focused element, classified.
///
/// Returns `None` when nothing editable is focused; callers treat that as
/// "drop the action", not as an error.
pub fn locate(document: &mut dyn HostDocument) -> Option<InputTarget<'_>> {
    document
        .active_element()
        .and_then(|element| element.probe_target())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
