//! This file defines a user of the application and its supporting types.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::Error;

/// A newtype wrapper for integer user IDs.
/// This helps disambiguate user IDs from other types of IDs, leading to better compile time
/// errors, and more flexible generics that can have distinct implementations for multiple ID types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserID(i64);

impl UserID {
    /// Wrap a raw integer ID.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// The raw integer value of the ID.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl Display for UserID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// The display name of a user.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserName(String);

impl UserName {
    /// Create a user name.
    ///
    /// # Errors
    /// This function will return [Error::EmptyUserName] if `name` is an empty
    /// string.
    pub fn new(name: &str) -> Result<Self, Error> {
        if name.is_empty() {
            Err(Error::EmptyUserName)
        } else {
            Ok(Self(name.to_string()))
        }
    }

    /// Create a user name without validation.
    ///
    /// The caller should ensure that the string is not empty.
    ///
    /// This function has `_unchecked` in the name but is not `unsafe`, because
    /// if the non-empty invariant is violated it will cause incorrect
    /// behaviour but not affect memory safety.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for UserName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A user of the application.
///
/// Users are created through [UserStore::create](crate::stores::UserStore::create),
/// which assigns the ID.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    id: UserID,
    name: UserName,
}

impl User {
    /// Create a user from its parts.
    ///
    /// Most callers should go through a [UserStore](crate::stores::UserStore)
    /// instead, which assigns the ID.
    pub fn new(id: UserID, name: UserName) -> Self {
        Self { id, name }
    }

    /// The user's ID.
    pub fn id(&self) -> UserID {
        self.id
    }

    /// The user's display name.
    pub fn name(&self) -> &UserName {
        &self.name
    }
}

#[cfg(test)]
mod user_name_tests {
    use crate::{Error, models::UserName};

    #[test]
    fn new_fails_on_empty_string() {
        let user_name = UserName::new("");

        assert_eq!(user_name, Err(Error::EmptyUserName));
    }

    #[test]
    fn new_succeeds_on_non_empty_string() {
        let user_name = UserName::new("alice");

        assert!(user_name.is_ok())
    }
}
