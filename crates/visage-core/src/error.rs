//! Error taxonomy shared across Visage.

use thiserror::Error;

/// Input rejected before any external call is made.
///
/// The display strings are the exact inline messages shown to the user.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Name is required")]
    NameRequired,

    #[error("Name is too long (max 100 characters)")]
    NameTooLong,

    #[error("No file selected")]
    FileEmpty,

    #[error("Only JPG, PNG, GIF, and WebP files are allowed")]
    UnsupportedFileType,

    #[error("File must be under 5MB")]
    FileTooLarge,
}

/// Failure of a gateway action, rendered as an inline message.
///
/// Persistence failures are deliberately generic: the underlying
/// database or storage error is logged, never shown.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ActionError {
    #[error("Not authenticated")]
    Unauthenticated,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Failed to upload avatar")]
    UploadFailed,

    #[error("Failed to update profile")]
    UpdateFailed,

    /// Authenticated user without a profile row. The account trigger
    /// creates rows, so this is a terminal support case, not a retry.
    #[error("Profile not found. Please contact support.")]
    ProfileMissing,
}

/// Result type for gateway actions.
pub type ActionResult<T> = Result<T, ActionError>;
