//! Configuration for where the tracker keeps its backing files.

use std::path::{Path, PathBuf};

const USERS_FILE: &str = "users.csv";
const EXPENSES_FILE: &str = "expenses.csv";

/// Names the directory the backing files live in.
///
/// The directory is injected explicitly rather than read from ambient
/// process state, so a test can point the stores at a temporary directory
/// and a deployment can point them anywhere it likes.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    data_directory: PathBuf,
}

impl Config {
    /// Create a config that keeps the backing files under `data_directory`.
    pub fn new(data_directory: impl Into<PathBuf>) -> Self {
        Self {
            data_directory: data_directory.into(),
        }
    }

    /// The directory holding the backing files.
    pub fn data_directory(&self) -> &Path {
        &self.data_directory
    }

    /// The path of the user records file.
    pub fn users_path(&self) -> PathBuf {
        self.data_directory.join(USERS_FILE)
    }

    /// The path of the expense records file.
    pub fn expenses_path(&self) -> PathBuf {
        self.data_directory.join(EXPENSES_FILE)
    }
}

#[cfg(test)]
mod config_tests {
    use std::path::Path;

    use super::Config;

    #[test]
    fn paths_are_derived_from_the_data_directory() {
        let config = Config::new("/tmp/expenses");

        assert_eq!(config.data_directory(), Path::new("/tmp/expenses"));
        assert_eq!(config.users_path(), Path::new("/tmp/expenses/users.csv"));
        assert_eq!(
            config.expenses_path(),
            Path::new("/tmp/expenses/expenses.csv")
        );
    }
}
