//! Profile domain types.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// Maximum display-name length after trimming, in characters.
pub const MAX_NAME_CHARS: usize = 100;

/// Opaque user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Generate a fresh random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an id from its string form.
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for UserId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl From<UserId> for Uuid {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A validated display name: trimmed, non-empty, at most
/// [`MAX_NAME_CHARS`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DisplayName(String);

impl DisplayName {
    /// Parse raw form input into a display name.
    ///
    /// The length cap applies to the trimmed value.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::NameRequired);
        }
        if trimmed.chars().count() > MAX_NAME_CHARS {
            return Err(ValidationError::NameTooLong);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for DisplayName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The persisted user-visible record.
///
/// Created by an external trigger when an account is created; mutated
/// only through the gateway actions; never deleted here. The email is
/// immutable once set - no operation in this codebase writes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: UserId,
    pub full_name: Option<String>,
    pub email: String,
    pub avatar_url: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Build a profile record the way the external account trigger
    /// would: name and avatar unset.
    pub fn new(id: UserId, email: impl Into<String>) -> Self {
        Self {
            id,
            full_name: None,
            email: email.into(),
            avatar_url: None,
            updated_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parse_trims_surrounding_whitespace() {
        let name = DisplayName::parse("  Sarah Johnson  ").unwrap();
        assert_eq!(name.as_str(), "Sarah Johnson");
    }

    #[test]
    fn empty_name_is_rejected() {
        assert_eq!(DisplayName::parse(""), Err(ValidationError::NameRequired));
        assert_eq!(DisplayName::parse("   "), Err(ValidationError::NameRequired));
    }

    #[test]
    fn name_at_cap_is_accepted() {
        let raw = "a".repeat(MAX_NAME_CHARS);
        assert!(DisplayName::parse(&raw).is_ok());
    }

    #[test]
    fn name_over_cap_is_rejected() {
        let raw = "a".repeat(MAX_NAME_CHARS + 1);
        assert_eq!(DisplayName::parse(&raw), Err(ValidationError::NameTooLong));
    }

    #[test]
    fn cap_counts_characters_not_bytes() {
        // 100 two-byte characters is still within the cap.
        let raw = "é".repeat(MAX_NAME_CHARS);
        assert!(DisplayName::parse(&raw).is_ok());
    }

    #[test]
    fn user_id_round_trips_through_string() {
        let id = UserId::new();
        assert_eq!(UserId::parse(&id.to_string()).unwrap(), id);
    }

    #[test]
    fn ids_and_names_serialize_transparently() {
        let id = UserId::new();
        assert_eq!(
            serde_json::to_value(id).unwrap(),
            serde_json::Value::String(id.to_string())
        );

        let name = DisplayName::parse("Sarah Johnson").unwrap();
        assert_eq!(
            serde_json::to_value(&name).unwrap(),
            serde_json::Value::String("Sarah Johnson".to_string())
        );
    }

    proptest! {
        #[test]
        fn any_trimmed_name_within_cap_parses_to_its_trimmed_form(
            raw in "\\PC{1,100}",
        ) {
            let trimmed = raw.trim();
            prop_assume!(!trimmed.is_empty());
            prop_assume!(trimmed.chars().count() <= MAX_NAME_CHARS);
            let parsed = DisplayName::parse(&raw).unwrap();
            prop_assert_eq!(parsed.as_str(), trimmed);
        }
    }
}
