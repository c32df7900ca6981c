//! The panel end of the relay.
//!
//! [`RelaySender`] encodes resolved key actions as wire messages and pushes
//! them onto an unbounded channel standing in for the carrier.  Sends are
//! fire-and-forget: the sender never blocks, never waits for a reply, and
//! keeps its messages in order relative to each other.  The carrier is
//! trusted to attach the sender's origin to each envelope — payloads never
//! carry an origin themselves.

use tokio::sync::mpsc;

use keyrelay_core::resolver::KeyAction;
use keyrelay_core::{Origin, RelayMessage, RelayState};
use keyrelay_host::Envelope;

use crate::panel::KeySink;

/// Fire-and-forget sender for the panel side of the relay.
#[derive(Debug)]
pub struct RelaySender {
    origin: Origin,
    tx: mpsc::UnboundedSender<Envelope>,
    state: RelayState,
}

impl RelaySender {
    /// Wraps an existing carrier handle.
    pub fn new(origin: Origin, tx: mpsc::UnboundedSender<Envelope>) -> Self {
        Self {
            origin,
            tx,
            state: RelayState::default(),
        }
    }

    /// Creates a sender together with the receiving end of its carrier.
    pub fn channel(origin: Origin) -> (Self, mpsc::UnboundedReceiver<Envelope>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(origin, tx), rx)
    }

    /// Where the relay session informally stands, as seen from this side.
    pub fn state(&self) -> RelayState {
        self.state
    }

    /// Sends the lifecycle `init` announcement.
    pub fn send_init(&mut self) {
        self.state = self.state.on_init();
        self.send(RelayMessage::Init);
    }

    /// Sends one resolved key action.
    pub fn send_action(&mut self, action: &KeyAction) {
        self.state = self.state.on_key_press();
        self.send(RelayMessage::key_press(action));
    }

    fn send(&mut self, message: RelayMessage) {
        let envelope = Envelope {
            origin: self.origin.clone(),
            message,
        };
        // A gone carrier is not an error for a fire-and-forget sender.
        if self.tx.send(envelope).is_err() {
            tracing::debug!("relay carrier is gone; message dropped");
        }
    }
}

impl KeySink for RelaySender {
    fn deliver(&mut self, action: &KeyAction) {
        self.send_action(action);
    }

    fn announce(&mut self) {
        self.send_init();
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
