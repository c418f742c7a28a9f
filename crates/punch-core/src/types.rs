//! Core type definitions with validation.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for core types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// The provided value was empty.
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// The progress value was out of range.
    #[error("progress must be between 0.0 and 1.0, got {value}")]
    ProgressOutOfRange { value: f32 },
}

/// Generates a validated string ID newtype with common trait implementations.
macro_rules! define_string_id {
    (
        $(#[$meta:meta])*
        $name:ident, $field_name:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a new ID after validation.
            pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
                let id = id.into();
                if id.is_empty() {
                    return Err(ValidationError::Empty { field: $field_name });
                }
                Ok(Self(id))
            }

            /// Returns the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_string_id!(
    /// A validated time-entry identifier.
    ///
    /// Entry IDs are minted by the backend; the client never generates them.
    /// They must be non-empty strings.
    EntryId, "entry ID"
);

define_string_id!(
    /// A validated break identifier.
    BreakId, "break ID"
);

define_string_id!(
    /// A validated user identifier.
    UserId, "user ID"
);

define_string_id!(
    /// A validated organization identifier.
    OrgId, "organization ID"
);

define_string_id!(
    /// A validated permission slug naming a single grantable capability
    /// (e.g. `approvals.approve_time`).
    PermissionSlug, "permission slug"
);

/// A progress ratio in the range \[0.0, 1.0\].
///
/// Used for the daily-target indicator. Values are clamped during
/// deserialization to ensure they stay within bounds.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Progress(f32);

impl Progress {
    /// The maximum progress value (1.0).
    pub const MAX: Self = Self(1.0);

    /// The minimum progress value (0.0).
    pub const MIN: Self = Self(0.0);

    /// Creates a new progress value after validation.
    ///
    /// Returns an error if the value is outside \[0.0, 1.0\] or is NaN.
    pub fn new(value: f32) -> Result<Self, ValidationError> {
        if value.is_nan() || !(0.0..=1.0).contains(&value) {
            return Err(ValidationError::ProgressOutOfRange { value });
        }
        Ok(Self(value))
    }

    /// Creates a progress value, clamping to \[0.0, 1.0\].
    ///
    /// NaN values become 0.0. Values outside the range are clamped.
    #[must_use]
    pub const fn clamped(value: f32) -> Self {
        if value.is_nan() || value < 0.0 {
            Self(0.0)
        } else if value > 1.0 {
            Self(1.0)
        } else {
            Self(value)
        }
    }

    /// Returns the inner f32 value.
    #[must_use]
    pub const fn value(self) -> f32 {
        self.0
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::MIN
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0}%", self.0 * 100.0)
    }
}

impl TryFrom<f32> for Progress {
    type Error = ValidationError;

    fn try_from(value: f32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Progress> for f32 {
    fn from(p: Progress) -> Self {
        p.0
    }
}

impl Serialize for Progress {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Progress {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = f32::deserialize(deserializer)?;
        // Clamp on deserialization to be lenient with external data
        Ok(Self::clamped(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_id_rejects_empty() {
        assert!(EntryId::new("").is_err());
        assert!(EntryId::new("entry-1").is_ok());
    }

    #[test]
    fn break_id_rejects_empty() {
        assert!(BreakId::new("").is_err());
        assert!(BreakId::new("break-1").is_ok());
    }

    #[test]
    fn entry_id_serde_roundtrip() {
        let id = EntryId::new("entry-123").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"entry-123\"");
        let parsed: EntryId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn entry_id_serde_rejects_empty() {
        let result: Result<EntryId, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());
    }

    #[test]
    fn permission_slug_as_ref() {
        let slug = PermissionSlug::new("approvals.approve_time").unwrap();
        let s: &str = slug.as_ref();
        assert_eq!(s, "approvals.approve_time");
    }

    #[test]
    fn progress_validates_range() {
        assert!(Progress::new(0.0).is_ok());
        assert!(Progress::new(0.5).is_ok());
        assert!(Progress::new(1.0).is_ok());
        assert!(Progress::new(-0.1).is_err());
        assert!(Progress::new(1.1).is_err());
        assert!(Progress::new(f32::NAN).is_err());
    }

    #[test]
    #[expect(
        clippy::float_cmp,
        reason = "exact equality intended for boundary tests"
    )]
    fn progress_clamped_handles_edge_cases() {
        assert_eq!(Progress::clamped(-1.0).value(), 0.0);
        assert_eq!(Progress::clamped(1.25).value(), 1.0);
        assert_eq!(Progress::clamped(f32::NAN).value(), 0.0);
        assert_eq!(Progress::clamped(0.5).value(), 0.5);
    }

    #[test]
    #[expect(
        clippy::float_cmp,
        reason = "exact equality intended for boundary tests"
    )]
    fn progress_serde_clamps_out_of_range() {
        let parsed: Progress = serde_json::from_str("1.5").unwrap();
        assert_eq!(parsed.value(), 1.0);

        let parsed: Progress = serde_json::from_str("-0.5").unwrap();
        assert_eq!(parsed.value(), 0.0);
    }

    #[test]
    fn progress_displays_as_percentage() {
        assert_eq!(Progress::clamped(0.5).to_string(), "50%");
        assert_eq!(Progress::MAX.to_string(), "100%");
    }
}
