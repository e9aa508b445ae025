//! Defines the user store trait.

use crate::{
    Error,
    models::{User, UserID, UserName},
};

/// Handles the creation and retrieval of users.
pub trait UserStore {
    /// Create a new user in the store, assigning the next free ID.
    ///
    /// User names are unique: implementers must reject a name that is
    /// already taken with [Error::DuplicateUserName].
    fn create(&mut self, name: UserName) -> Result<User, Error>;

    /// Retrieve the user with `id`, or [Error::NotFound].
    fn get(&self, id: UserID) -> Result<User, Error>;

    /// Retrieve the user whose display name is exactly `name`, or
    /// [Error::NotFound].
    fn get_by_name(&self, name: &str) -> Result<User, Error>;

    /// Retrieve every user in the store, in insertion order.
    fn get_all(&self) -> Result<Vec<User>, Error>;
}
