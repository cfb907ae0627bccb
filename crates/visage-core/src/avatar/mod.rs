//! Avatar upload constraints and the canonical storage path.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::profile::UserId;

/// Maximum accepted upload size: 5 MiB.
pub const MAX_AVATAR_BYTES: usize = 5 * 1024 * 1024;

/// Accepted image formats for avatar uploads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageKind {
    Jpeg,
    Png,
    Gif,
    Webp,
}

impl ImageKind {
    /// Match a declared MIME type against the allow-list.
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime {
            "image/jpeg" => Some(Self::Jpeg),
            "image/png" => Some(Self::Png),
            "image/gif" => Some(Self::Gif),
            "image/webp" => Some(Self::Webp),
            _ => None,
        }
    }

    /// The canonical MIME type for this format.
    pub fn mime(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Gif => "image/gif",
            Self::Webp => "image/webp",
        }
    }
}

/// Validate a candidate upload before any network call.
///
/// Checks run in the order the user sees them: empty file, then
/// declared type, then size.
pub fn validate_upload(content_type: &str, len: usize) -> Result<ImageKind, ValidationError> {
    if len == 0 {
        return Err(ValidationError::FileEmpty);
    }
    let kind = ImageKind::from_mime(content_type).ok_or(ValidationError::UnsupportedFileType)?;
    if len > MAX_AVATAR_BYTES {
        return Err(ValidationError::FileTooLarge);
    }
    Ok(kind)
}

/// Extension of an uploaded filename, defaulting to `jpg`.
pub fn file_extension(filename: &str) -> &str {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty())
        .unwrap_or("jpg")
}

/// Canonical per-user storage path: `{user_id}/avatar.{ext}`.
///
/// Every re-upload targets the same path, so objects are overwritten
/// in place rather than accumulated.
pub fn avatar_path(user: UserId, extension: &str) -> String {
    format!("{user}/avatar.{extension}")
}
