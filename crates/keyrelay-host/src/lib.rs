//! # keyrelay-host
//!
//! The host-document side of the keyrelay virtual keyboard: finding the
//! focused editable element, applying resolved key actions to its text, and
//! receiving relayed key presses from an isolated panel context.
//!
//! # Layering
//!
//! - **`target`** – The seams between injection logic and any concrete
//!   document model: the [`TextField`] and [`RichTextRegion`] editing
//!   interfaces, the [`Editable`] capability probe, and [`locate`], which
//!   classifies the focused element into an [`InputTarget`].
//!
//! - **`mutator`** – [`apply`]: the single entry point that performs a
//!   [`KeyAction`](keyrelay_core::KeyAction) against a located target, with
//!   the notification and synthesized-key-event discipline each target kind
//!   requires.
//!
//! - **`field` / `rich` / `page`** – In-memory implementations of the target
//!   seams: a plain value+selection buffer, a run-structured rich-text region,
//!   and a document holding focusable elements.  These back both the
//!   integration tests and the demo binary.
//!
//! - **`receiver`** – The trusted end of the relay: origin validation, JSON
//!   decoding, and dispatch of valid key presses through `locate` + `apply`.

pub mod field;
pub mod mutator;
pub mod page;
pub mod receiver;
pub mod rich;
pub mod target;

pub use field::BufferField;
pub use mutator::apply;
pub use page::{PageDocument, PageElement};
pub use receiver::{Delivery, Envelope, RelayReceiver};
pub use rich::RunRegion;
pub use target::{
    locate, Editable, FieldNotification, HostDocument, InputTarget, KeyPhase, RichTextRegion,
    SyntheticKey, TextField,
};
