//! The trusted end of the relay.
//!
//! The receiver sits in the host-document context and handles everything the
//! carrier delivers: it checks the carrier-reported origin against the
//! allow-list, decodes the JSON payload, and dispatches valid key presses to
//! the focused element at time of receipt.  Rejections are silent by design
//! (logged at debug level, nothing else): a probing sender must not be able
//! to tell "untrusted" apart from "no keyboard here".
//!
//! The [`Delivery`] result exists for the receiver's own side (logging,
//! tests); it is never transmitted back.

use keyrelay_core::relay::messages::action_for_key;
use keyrelay_core::{Origin, RelayMessage, RelayState, TrustedOrigins};

use crate::mutator::apply;
use crate::target::{locate, HostDocument};

/// A message as the carrier hands it over: payload plus the origin the
/// carrier itself attests.  The origin is never read out of the payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub origin: Origin,
    pub message: RelayMessage,
}

impl Envelope {
    pub fn new(origin: impl Into<Origin>, message: RelayMessage) -> Self {
        Self {
            origin: origin.into(),
            message,
        }
    }
}

/// What became of one delivered message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// A key press reached a target and was applied.
    Applied,
    /// An `init` was accepted; lifecycle only, nothing mutated.
    Lifecycle,
    /// A trusted key press arrived but nothing editable was focused.
    NoTarget,
    /// The origin failed the allow-list; payload not even parsed.
    Untrusted,
    /// The payload was not valid relay JSON.
    Malformed,
}

impl Delivery {
    pub fn is_applied(self) -> bool {
        self == Self::Applied
    }
}

/// Origin-validating relay receiver.
///
/// Owns the trust policy and the informational [`RelayState`]; borrows the
/// host document per call, since the focused element must be re-located at
/// time of receipt for every message.
#[derive(Debug)]
pub struct RelayReceiver {
    trusted: TrustedOrigins,
    state: RelayState,
}

impl RelayReceiver {
    pub fn new(trusted: TrustedOrigins) -> Self {
        Self {
            trusted,
            state: RelayState::default(),
        }
    }

    /// Where the relay session informally stands.  Never gates delivery.
    pub fn state(&self) -> RelayState {
        self.state
    }

    /// Handles one already-decoded envelope.
    pub fn handle(&mut self, envelope: &Envelope, document: &mut dyn HostDocument) -> Delivery {
        if !self.trusted.is_trusted(&envelope.origin) {
            tracing::debug!(origin = %envelope.origin, "dropping message from untrusted origin");
            return Delivery::Untrusted;
        }

        match &envelope.message {
            RelayMessage::Init => {
                self.state = self.state.on_init();
                tracing::debug!(state = ?self.state, "panel announced itself");
                Delivery::Lifecycle
            }
            RelayMessage::KeyPress { key } => {
                self.state = self.state.on_key_press();
                let action = action_for_key(key);
                match locate(document) {
                    Some(target) => {
                        apply(target, &action);
                        Delivery::Applied
                    }
                    None => {
                        tracing::debug!(key = %key, "key press with no editable element focused");
                        Delivery::NoTarget
                    }
                }
            }
        }
    }

    /// Handles one raw JSON payload as delivered by the carrier.
    pub fn handle_raw(
        &mut self,
        origin: &Origin,
        payload: &str,
        document: &mut dyn HostDocument,
    ) -> Delivery {
        // Trust is checked before parsing so untrusted senders cannot even
        // probe the decoder.
        if !self.trusted.is_trusted(origin) {
            tracing::debug!(origin = %origin, "dropping payload from untrusted origin");
            return Delivery::Untrusted;
        }
        let message: RelayMessage = match serde_json::from_str(payload) {
            Ok(message) => message,
            Err(error) => {
                tracing::debug!(%error, "dropping malformed relay payload");
                return Delivery::Malformed;
            }
        };
        self.handle(
            &Envelope {
                origin: origin.clone(),
                message,
            },
            document,
        )
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::BufferField;
    use crate::page::{PageDocument, PageElement};
    use crate::target::TextField;

    const PANEL: &str = "https://keyboard.example";

    fn receiver() -> RelayReceiver {
        RelayReceiver::new(TrustedOrigins::new(PANEL))
    }

    fn document_with_focused_field(value: &str) -> (PageDocument, usize) {
        let mut doc = PageDocument::new();
        let idx = doc.add(PageElement::Field(BufferField::with_value(value)));
        doc.focus(idx);
        (doc, idx)
    }

    fn key_press(origin: &str, key: &str) -> Envelope {
        Envelope::new(
            Origin::new(origin),
            RelayMessage::KeyPress {
                key: key.to_string(),
            },
        )
    }

    #[test]
    fn test_trusted_key_press_is_applied_to_the_focused_field() {
        let mut receiver = receiver();
        let (mut doc, idx) = document_with_focused_field("ab");

        let delivery = receiver.handle(&key_press(PANEL, "c"), &mut doc);

        assert!(delivery.is_applied());
        assert_eq!(doc.field(idx).unwrap().value(), "abc");
    }

    #[test]
    fn test_untrusted_key_press_is_dropped_without_mutation() {
        let mut receiver = receiver();
        let (mut doc, idx) = document_with_focused_field("ab");

        let delivery = receiver.handle(&key_press("https://evil.example", "c"), &mut doc);

        assert_eq!(delivery, Delivery::Untrusted);
        assert_eq!(doc.field(idx).unwrap().value(), "ab");
        // No notifications either: the drop must be unobservable.
        assert!(doc.field_mut(idx).unwrap().take_events().is_empty());
    }

    #[test]
    fn test_named_editing_key_is_decoded_not_inserted_literally() {
        let mut receiver = receiver();
        let (mut doc, idx) = document_with_focused_field("ab");

        receiver.handle(&key_press(PANEL, "Backspace"), &mut doc);

        assert_eq!(doc.field(idx).unwrap().value(), "a");
    }

    #[test]
    fn test_key_press_without_focus_reports_no_target() {
        let mut receiver = receiver();
        let mut doc = PageDocument::new();
        doc.add(PageElement::Field(BufferField::new()));

        let delivery = receiver.handle(&key_press(PANEL, "x"), &mut doc);

        assert_eq!(delivery, Delivery::NoTarget);
    }

    #[test]
    fn test_init_is_lifecycle_only() {
        let mut receiver = receiver();
        let (mut doc, idx) = document_with_focused_field("ab");

        let delivery = receiver.handle(&Envelope::new(Origin::new(PANEL), RelayMessage::Init), &mut doc);

        assert_eq!(delivery, Delivery::Lifecycle);
        assert_eq!(doc.field(idx).unwrap().value(), "ab");
        assert_eq!(receiver.state(), RelayState::AwaitingInit);
    }

    #[test]
    fn test_state_becomes_active_after_a_delivered_key_press() {
        let mut receiver = receiver();
        let (mut doc, _) = document_with_focused_field("");

        receiver.handle(&Envelope::new(Origin::new(PANEL), RelayMessage::Init), &mut doc);
        receiver.handle(&key_press(PANEL, "a"), &mut doc);

        assert!(receiver.state().is_active());
    }

    // ── handle_raw ────────────────────────────────────────────────────────────

    #[test]
    fn test_handle_raw_parses_and_applies_wire_json() {
        let mut receiver = receiver();
        let (mut doc, idx) = document_with_focused_field("");

        let delivery = receiver.handle_raw(
            &Origin::new(PANEL),
            r#"{"type":"keyPress","key":"अ"}"#,
            &mut doc,
        );

        assert!(delivery.is_applied());
        assert_eq!(doc.field(idx).unwrap().value(), "अ");
    }

    #[test]
    fn test_handle_raw_drops_malformed_json() {
        let mut receiver = receiver();
        let (mut doc, idx) = document_with_focused_field("ab");

        let delivery = receiver.handle_raw(&Origin::new(PANEL), "{not json", &mut doc);

        assert_eq!(delivery, Delivery::Malformed);
        assert_eq!(doc.field(idx).unwrap().value(), "ab");
    }

    #[test]
    fn test_handle_raw_checks_trust_before_parsing() {
        let mut receiver = receiver();
        let (mut doc, _) = document_with_focused_field("");

        // Malformed AND untrusted: trust must win.
        let delivery =
            receiver.handle_raw(&Origin::new("https://evil.example"), "{not json", &mut doc);

        assert_eq!(delivery, Delivery::Untrusted);
    }

    #[test]
    fn test_extension_scheme_origin_may_deliver() {
        let mut receiver = receiver();
        let (mut doc, idx) = document_with_focused_field("");

        let delivery = receiver.handle(&key_press("extension://abcdef", "z"), &mut doc);

        assert!(delivery.is_applied());
        assert_eq!(doc.field(idx).unwrap().value(), "z");
    }
}
