//! Implements a flat-file backed user store.

use std::path::PathBuf;

use crate::{
    Error,
    models::{DatabaseID, User, UserID, UserName},
    stores::UserStore,
};

use super::record::{FileRecord, load_all, next_id, replace_all};

/// Stores users in a delimited flat file, one row per user.
///
/// The file is created lazily by the first write; a missing file reads as
/// zero users.
#[derive(Clone, Debug)]
pub struct FlatFileUserStore {
    path: PathBuf,
}

impl FlatFileUserStore {
    /// Create a store backed by the file at `path`.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl FileRecord for User {
    const HEADER: &'static [&'static str] = &["user_id", "name"];

    fn record_id(&self) -> DatabaseID {
        self.id().as_i64()
    }

    fn encode(&self) -> Vec<String> {
        vec![self.id().as_i64().to_string(), self.name().to_string()]
    }

    fn decode(row: &csv::StringRecord) -> Result<Self, String> {
        let raw_id = row.get(0).ok_or("missing field 'user_id'")?;
        let id = raw_id
            .parse::<i64>()
            .map_err(|_| format!("could not parse \"{raw_id}\" as a user ID"))?;

        let name = row.get(1).ok_or("missing field 'name'")?;
        let name = UserName::new(name).map_err(|error| error.to_string())?;

        Ok(User::new(UserID::new(id), name))
    }
}

impl UserStore for FlatFileUserStore {
    /// Create a new user in the backing file.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::DuplicateUserName] if `name` is already taken,
    /// - [Error::CorruptRecord] if the backing file could not be parsed,
    /// - or [Error::Io] if the file could not be read or rewritten.
    fn create(&mut self, name: UserName) -> Result<User, Error> {
        let mut users: Vec<User> = load_all(&self.path)?;

        if users.iter().any(|user| user.name() == &name) {
            return Err(Error::DuplicateUserName(name.to_string()));
        }

        let user = User::new(UserID::new(next_id(&users)), name);
        users.push(user.clone());
        replace_all(&self.path, &users)?;

        Ok(user)
    }

    fn get(&self, id: UserID) -> Result<User, Error> {
        load_all::<User>(&self.path)?
            .into_iter()
            .find(|user| user.id() == id)
            .ok_or(Error::NotFound)
    }

    fn get_by_name(&self, name: &str) -> Result<User, Error> {
        load_all::<User>(&self.path)?
            .into_iter()
            .find(|user| user.name().as_ref() == name)
            .ok_or(Error::NotFound)
    }

    fn get_all(&self) -> Result<Vec<User>, Error> {
        load_all(&self.path)
    }
}

#[cfg(test)]
mod flat_file_user_store_tests {
    use tempfile::TempDir;

    use crate::{
        Error,
        models::{UserID, UserName},
        stores::UserStore,
    };

    use super::FlatFileUserStore;

    fn get_store(temp_dir: &TempDir) -> FlatFileUserStore {
        FlatFileUserStore::new(temp_dir.path().join("users.csv"))
    }

    #[test]
    fn create_assigns_sequential_ids() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = get_store(&temp_dir);

        let alice = store.create(UserName::new_unchecked("alice")).unwrap();
        let bob = store.create(UserName::new_unchecked("bob")).unwrap();

        assert_eq!(alice.id(), UserID::new(1));
        assert_eq!(bob.id(), UserID::new(2));
    }

    #[test]
    fn create_fails_on_duplicate_name() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = get_store(&temp_dir);

        store.create(UserName::new_unchecked("alice")).unwrap();
        let duplicate = store.create(UserName::new_unchecked("alice"));

        assert_eq!(
            duplicate,
            Err(Error::DuplicateUserName("alice".to_owned()))
        );
    }

    #[test]
    fn get_returns_created_user() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = get_store(&temp_dir);

        let want = store.create(UserName::new_unchecked("alice")).unwrap();
        let got = store.get(want.id()).unwrap();

        assert_eq!(got, want);
    }

    #[test]
    fn get_fails_on_unknown_id() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = get_store(&temp_dir);

        store.create(UserName::new_unchecked("alice")).unwrap();

        assert_eq!(store.get(UserID::new(42)), Err(Error::NotFound));
    }

    #[test]
    fn get_by_name_matches_exactly() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = get_store(&temp_dir);

        let want = store.create(UserName::new_unchecked("alice")).unwrap();

        assert_eq!(store.get_by_name("alice"), Ok(want));
        assert_eq!(store.get_by_name("Alice"), Err(Error::NotFound));
    }

    #[test]
    fn get_all_is_empty_before_first_write() {
        let temp_dir = TempDir::new().unwrap();
        let store = get_store(&temp_dir);

        assert_eq!(store.get_all(), Ok(Vec::new()));
    }

    #[test]
    fn names_round_trip_through_the_file() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = get_store(&temp_dir);

        let want = store
            .create(UserName::new_unchecked("Zoë, the \"thrifty\" one"))
            .unwrap();
        let got = store.get(want.id()).unwrap();

        assert_eq!(got, want);
    }
}
