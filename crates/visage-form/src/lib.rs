//! Visage form layer - edit/save state machines for profile fields.
//!
//! Each editable unit (name field, avatar, a whole modal form) runs an
//! independent machine:
//!
//! ```text
//! Idle -> Editing -> Saving -> { Saved | Error } -> Idle
//! ```
//!
//! The persisted value is untouched until a save completes. `Saved` is
//! a transient banner that auto-reverts to `Idle` after a fixed delay;
//! `Error` keeps the draft and the inline message so the user can fix
//! and resubmit. There is no automatic retry anywhere.

pub mod controller;
pub mod machine;

pub use controller::FieldController;
pub use machine::{CombinedForm, FieldMachine, FieldState, TransitionError};

/// How long the `Saved` banner stays up before reverting to `Idle`.
pub const SAVED_BANNER_MS: u64 = 2000;
