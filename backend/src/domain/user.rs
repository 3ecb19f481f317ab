//! User data model.

use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Validation errors raised by the user input constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyName,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "name must not be empty"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Persisted user record.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Per-user notification preference, stored 1:1 with the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserPreference {
    pub receive_email: bool,
}

/// User together with its preference record.
///
/// ## Invariants
/// - The preference is created atomically with the user, so `preference` is
///   only `None` when the row has been removed out of band.
#[derive(Debug, Clone, PartialEq)]
pub struct UserWithPreference {
    pub user: User,
    pub preference: Option<UserPreference>,
}

/// Validated input for creating a user and its preference atomically.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    name: String,
    email: Option<String>,
    receive_email: bool,
}

impl NewUser {
    /// Validate and construct the create input.
    ///
    /// A missing preference flag defaults to not receiving email.
    pub fn try_new(
        name: impl Into<String>,
        email: Option<String>,
        receive_email: bool,
    ) -> Result<Self, UserValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(UserValidationError::EmptyName);
        }
        Ok(Self {
            name,
            email,
            receive_email,
        })
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn receive_email(&self) -> bool {
        self.receive_email
    }
}

/// Validated partial update for a user; absent fields are left unchanged.
///
/// A present `receive_email` is forwarded to the preference record as a
/// nested update, which fails with a not-found error when the preference
/// row is absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserPatch {
    name: Option<String>,
    email: Option<String>,
    receive_email: Option<bool>,
}

impl UserPatch {
    /// Validate and construct the patch; present fields obey the same rules
    /// as on create.
    pub fn try_new(
        name: Option<String>,
        email: Option<String>,
        receive_email: Option<bool>,
    ) -> Result<Self, UserValidationError> {
        if let Some(name) = &name
            && name.trim().is_empty()
        {
            return Err(UserValidationError::EmptyName);
        }
        Ok(Self {
            name,
            email,
            receive_email,
        })
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn receive_email(&self) -> Option<bool> {
        self.receive_email
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn new_user_rejects_blank_name(#[case] name: &str) {
        let err = NewUser::try_new(name, None, false).expect_err("blank name");
        assert_eq!(err, UserValidationError::EmptyName);
    }

    #[test]
    fn new_user_defaults_are_preserved() {
        let input = NewUser::try_new("Ada", Some("ada@example.com".into()), true)
            .expect("valid input");

        assert_eq!(input.name(), "Ada");
        assert_eq!(input.email(), Some("ada@example.com"));
        assert!(input.receive_email());
    }

    #[test]
    fn patch_accepts_all_fields_absent() {
        let patch = UserPatch::try_new(None, None, None).expect("empty patch");
        assert_eq!(patch, UserPatch::default());
    }

    #[test]
    fn patch_rejects_blank_name() {
        let err = UserPatch::try_new(Some(" ".into()), None, None).expect_err("blank name");
        assert_eq!(err, UserValidationError::EmptyName);
    }
}
