//! User data model.
//!
//! A user is an integer identifier, a validated name and an optional age.
//! Inputs arriving from adapters are converted into [`NewUser`] or
//! [`UserChanges`] once, so stores only ever see validated data.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Minimum allowed length, in UTF-16 code units, for a user name.
pub const USER_NAME_MIN: usize = 3;

/// Validation errors returned when building a [`UserName`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// No name was supplied.
    #[error("name is required")]
    MissingName,
    /// The name is shorter than [`USER_NAME_MIN`] characters.
    #[error("name must be at least {min} characters")]
    NameTooShort {
        /// Minimum accepted length.
        min: usize,
    },
}

/// Integer user identifier assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Parse a base-10 identifier from a path segment.
    ///
    /// Leading whitespace is skipped, an optional sign is honoured and the
    /// longest run of ASCII digits that follows is read; anything after it is
    /// ignored. Returns `None` when no digit follows or the value overflows
    /// `i64`; callers treat that the same as an identifier with no matching
    /// record.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::UserId;
    ///
    /// assert_eq!(UserId::parse("42"), Some(UserId::new(42)));
    /// assert_eq!(UserId::parse("1.0"), Some(UserId::new(1)));
    /// assert_eq!(UserId::parse("abc"), None);
    /// ```
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim_start();
        let unsigned = trimmed.trim_start_matches(['+', '-']);
        let sign_len = trimmed.len() - unsigned.len();
        if sign_len > 1 {
            return None;
        }
        let digits_len = unsigned
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(unsigned.len());
        if digits_len == 0 {
            return None;
        }
        trimmed
            .get(..sign_len + digits_len)
            .and_then(|prefix| prefix.parse::<i64>().ok())
            .map(Self)
    }

    /// Identifier following this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Raw integer value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for UserId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Validated user name.
///
/// ## Invariants
/// - At least [`USER_NAME_MIN`] characters long, counted in UTF-16 code units
///   so a character outside the Basic Multilingual Plane counts twice. No
///   maximum, no trimming and no character restrictions apply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserName(String);

impl UserName {
    /// Validate and construct a [`UserName`].
    ///
    /// # Errors
    /// Returns [`UserValidationError::NameTooShort`] when the name has fewer
    /// than [`USER_NAME_MIN`] characters.
    pub fn new(name: impl Into<String>) -> Result<Self, UserValidationError> {
        let name = name.into();
        if name.encode_utf16().count() < USER_NAME_MIN {
            return Err(UserValidationError::NameTooShort {
                min: USER_NAME_MIN,
            });
        }
        Ok(Self(name))
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserName> for String {
    fn from(value: UserName) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserName {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Application user.
///
/// Serialises as `{"id": 1, "name": "Alice", "age": 12}`; `age` is emitted
/// as `null` when unknown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct User {
    id: UserId,
    name: UserName,
    age: Option<i64>,
}

impl User {
    /// Build a user from validated components.
    #[must_use]
    pub fn new(id: UserId, name: UserName, age: Option<i64>) -> Self {
        Self { id, name, age }
    }

    /// Materialise a validated draft under the given identifier.
    #[must_use]
    pub fn from_draft(id: UserId, draft: NewUser) -> Self {
        let NewUser { name, age } = draft;
        Self { id, name, age }
    }

    /// Stable identifier.
    #[must_use]
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Current name.
    #[must_use]
    pub fn name(&self) -> &UserName {
        &self.name
    }

    /// Current age, if known.
    #[must_use]
    pub fn age(&self) -> Option<i64> {
        self.age
    }

    /// Apply an update in place. The identifier never changes.
    pub fn apply(&mut self, changes: UserChanges) {
        let UserChanges { name, age } = changes;
        self.name = name;
        if let AgeChange::Set(age) = age {
            self.age = age;
        }
    }
}

/// Validated input for creating a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Validated name.
    pub name: UserName,
    /// Age, `None` when unknown.
    pub age: Option<i64>,
}

/// How an update treats the stored age.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AgeChange {
    /// The request did not mention the age; keep the stored value.
    #[default]
    Keep,
    /// The request supplied an age, possibly `null`.
    Set(Option<i64>),
}

/// Validated input for updating a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserChanges {
    /// Replacement name.
    pub name: UserName,
    /// Treatment of the stored age.
    pub age: AgeChange,
}
