//! # keyrelay-core
//!
//! Shared library for the keyrelay virtual keyboard containing the language
//! layout table, the key-event resolver, and the cross-context relay wire
//! protocol with its origin trust policy.
//!
//! This crate is used by both the keyboard-panel side and the host-document
//! side.  It has zero dependencies on I/O, async runtimes, or any concrete
//! host-document model.
//!
//! # Architecture overview
//!
//! keyrelay renders an on-screen, multi-language keyboard and injects the
//! resulting characters into whatever text field currently has focus in a host
//! document.  The panel and the document may live in the same execution
//! context (direct injection) or in two isolated contexts separated by a
//! message boundary (relayed injection).
//!
//! This crate (`keyrelay-core`) is the shared foundation.  It defines:
//!
//! - **`layout`** – Static per-language key grids.  A [`KeyDescriptor`] says
//!   what a key displays and what it produces; a [`LanguageLayout`] arranges
//!   descriptors into rows; the [`LayoutTable`] looks layouts up by language
//!   code.  Pure data, no behavior beyond lookup.
//!
//! - **`resolver`** – The stateless mapping from (key descriptor, modifier
//!   state) to a [`KeyAction`]: the normalized, context-independent unit of
//!   "what to do to the text".
//!
//! - **`relay`** – The JSON wire protocol carried across the isolation
//!   boundary, the origin allow-list that guards the receiving side, and the
//!   informational relay lifecycle state machine.

pub mod layout;
pub mod relay;
pub mod resolver;

// Re-export the most-used types at the crate root so callers can write
// `keyrelay_core::KeyAction` instead of `keyrelay_core::resolver::KeyAction`.
pub use layout::{KeyDescriptor, KeyKind, LanguageLayout, LayoutTable};
pub use relay::messages::{CommandResponse, HostCommand, RelayMessage};
pub use relay::origin::{Origin, TrustedOrigins};
pub use relay::state::RelayState;
pub use resolver::{resolve, resolve_at, KeyAction, ModifierState};
