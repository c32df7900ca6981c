//! Key-event resolution: (descriptor, modifier state) → [`KeyAction`].
//!
//! The resolver is the only place shift/caps state is applied; the layout
//! table never changes, and everything downstream (mutator, relay) operates on
//! already-resolved actions.  Nothing in this module signals an error: an
//! unrecognized key is a no-op producing `None`.

use std::time::{Duration, Instant};

use crate::layout::{KeyDescriptor, KeyKind};

/// How long shift stays active after the next produced key action.
///
/// Shift on a virtual keyboard is a deliberate timed reset, not a
/// toggle-until-pressed-again: press Shift, press one key, and shortly after
/// that key the shift flag drops on its own.
pub const SHIFT_AUTO_RELEASE: Duration = Duration::from_millis(100);

/// The normalized, context-independent unit of "what to do to the text".
///
/// This is what crosses the relay boundary and what the text mutator consumes.
/// Which physical or virtual key produced it is already forgotten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// Insert a run of characters (possibly multi-code-point).
    InsertChars(String),
    /// Remove one character before the cursor (or the selection, if any).
    DeleteBackward,
    /// Remove the current selection.
    DeleteSelection,
    /// Insert a line break.
    InsertNewline,
    /// Insert the tab substitute (two spaces — never a literal tab).
    InsertTab,
}

/// Shift and caps-lock flags, owned by the panel and passed by reference into
/// the resolver.
///
/// `caps_lock_active` is a plain toggle.  `shift_active` toggles on modifier
/// press but additionally auto-releases [`SHIFT_AUTO_RELEASE`] after the next
/// produced key action; re-pressing Shift before the deadline cancels the
/// pending release (last write wins).
#[derive(Debug, Clone, Default)]
pub struct ModifierState {
    shift_active: bool,
    caps_lock_active: bool,
    shift_release_at: Option<Instant>,
    release_delay: Option<Duration>,
}

impl ModifierState {
    /// Creates a cleared modifier state with the default auto-release delay.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the shift auto-release delay (configuration hook).
    pub fn with_release_delay(delay: Duration) -> Self {
        Self {
            release_delay: Some(delay),
            ..Self::default()
        }
    }

    /// Returns `true` while shift is active as of `now`.
    pub fn shift_active(&self) -> bool {
        self.shift_active
    }

    /// Returns `true` while caps-lock is active.
    pub fn caps_lock_active(&self) -> bool {
        self.caps_lock_active
    }

    fn delay(&self) -> Duration {
        self.release_delay.unwrap_or(SHIFT_AUTO_RELEASE)
    }

    /// Drops shift if a scheduled auto-release deadline has passed.
    fn expire(&mut self, now: Instant) {
        if let Some(deadline) = self.shift_release_at {
            if now >= deadline {
                self.shift_active = false;
                self.shift_release_at = None;
            }
        }
    }

    fn toggle_shift(&mut self) {
        self.shift_active = !self.shift_active;
        // A fresh press (either direction) supersedes any pending release.
        self.shift_release_at = None;
    }

    fn toggle_caps_lock(&mut self) {
        self.caps_lock_active = !self.caps_lock_active;
    }

    /// Schedules the debounced shift release after a produced action.
    fn arm_release(&mut self, now: Instant) {
        if self.shift_active {
            self.shift_release_at = Some(now + self.delay());
        }
    }
}

/// Resolves a key press against the current modifier state.
///
/// Modifier keys mutate `modifiers` and return `None`; Special and Normal
/// keys return the action to perform.  See [`resolve_at`] for the
/// deterministic variant used in tests.
pub fn resolve(descriptor: &KeyDescriptor, modifiers: &mut ModifierState) -> Option<KeyAction> {
    resolve_at(descriptor, modifiers, Instant::now())
}

/// [`resolve`] with an explicit clock, so the shift auto-release is testable
/// without sleeping.
pub fn resolve_at(
    descriptor: &KeyDescriptor,
    modifiers: &mut ModifierState,
    now: Instant,
) -> Option<KeyAction> {
    modifiers.expire(now);

    let action = match descriptor.kind {
        KeyKind::Modifier => {
            match descriptor.logical_key.as_str() {
                "Shift" => modifiers.toggle_shift(),
                "CapsLock" => modifiers.toggle_caps_lock(),
                // Ctrl/Alt and friends are tracked visually but have no
                // effect on produced text.
                other => tracing::debug!(key = other, "modifier with no effect"),
            }
            return None;
        }
        KeyKind::Special => match descriptor.logical_key.as_str() {
            "Backspace" => Some(KeyAction::DeleteBackward),
            "Enter" => Some(KeyAction::InsertNewline),
            "Tab" => Some(KeyAction::InsertTab),
            " " => Some(KeyAction::InsertChars(" ".to_string())),
            other => {
                tracing::debug!(key = other, "unrecognized special key ignored");
                None
            }
        },
        KeyKind::Normal => {
            let uppercase = modifiers.shift_active() || modifiers.caps_lock_active();
            let text = match (&descriptor.shift_display, uppercase) {
                (Some(shifted), true) => shifted.clone(),
                _ => descriptor.display.clone(),
            };
            Some(KeyAction::InsertChars(text))
        }
    };

    if action.is_some() {
        modifiers.arm_release(now);
    }
    action
}

// ── Tests ─────────────────────────────────────────────────────────────────────
