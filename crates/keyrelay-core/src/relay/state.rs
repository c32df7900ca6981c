//! Informational relay lifecycle state.
//!
//! The relay has no handshake: delivery never waits on this state, and no
//! transition gates a message.  The state exists so both sides can log and
//! report where the session stands (`Idle` before anything happened,
//! `AwaitingInit` once the panel has announced itself, `Active` once key
//! presses flow).

/// Where the relay session currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RelayState {
    /// No relay traffic yet.
    #[default]
    Idle,
    /// `init` has been sent or seen; no key press yet.
    AwaitingInit,
    /// At least one key press has crossed the boundary.
    Active,
}

impl RelayState {
    /// Transition for an `init` message (sent or received).
    ///
    /// An `init` never regresses an already-active session.
    pub fn on_init(self) -> Self {
        match self {
            Self::Idle | Self::AwaitingInit => Self::AwaitingInit,
            Self::Active => Self::Active,
        }
    }

    /// Transition for a key-press message (sent or received).
    pub fn on_key_press(self) -> Self {
        Self::Active
    }

    pub fn is_active(self) -> bool {
        self == Self::Active
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
