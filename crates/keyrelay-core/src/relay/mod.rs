//! Cross-context relay protocol.
//!
//! When the keyboard panel and the host document live in isolated execution
//! contexts, key actions cross the boundary as JSON text messages.  This
//! module defines the wire format ([`messages`]), the origin trust policy the
//! receiving side enforces ([`origin`]), and the informational lifecycle state
//! machine ([`state`]).
//!
//! The relay is strictly fire-and-forget: no acknowledgements, no retries, no
//! backpressure.  An untrusted or malformed message is dropped silently.

pub mod messages;
pub mod origin;
pub mod state;
