//! Visage core library - profile domain types and validation.
//!
//! This crate defines:
//! - The `Profile` record and its identifiers
//! - Display-name parsing with the length rules enforced at the boundary
//! - Avatar upload constraints (allowed types, size cap, canonical path)
//! - The error taxonomy shared by the gateway and the form layer

pub mod avatar;
pub mod error;
pub mod profile;

pub use avatar::{avatar_path, file_extension, validate_upload, ImageKind, MAX_AVATAR_BYTES};
pub use error::{ActionError, ActionResult, ValidationError};
pub use profile::{DisplayName, Profile, UserId, MAX_NAME_CHARS};

/// Core crate version
pub const CORE_VERSION: &str = env!("CARGO_PKG_VERSION");
