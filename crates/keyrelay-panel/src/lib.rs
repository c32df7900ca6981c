//! # keyrelay-panel
//!
//! The keyboard-panel side of the keyrelay virtual keyboard: panel state
//! (language, modifiers, pressed keys), the panel itself with its pluggable
//! key sink, the relay sender for cross-context operation, and the TOML
//! configuration layer.
//!
//! The panel knows nothing about host documents.  Every resolved key action
//! goes to a [`KeySink`]; in same-context mode that sink injects directly, in
//! cross-context mode it hands the action to a [`RelaySender`] which encodes
//! it onto the relay channel.

pub mod config;
pub mod panel;
pub mod sender;
pub mod state;

pub use config::{ConfigError, PanelConfig};
pub use panel::{DirectSink, KeySink, KeyboardPanel};
pub use sender::RelaySender;
pub use state::PanelState;
