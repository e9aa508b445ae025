//! Contains the flat-file backend for the store traits, plus a convenience
//! type alias and constructor for an [AppState] that uses it.

mod expense;
mod record;
mod user;

pub use expense::FlatFileExpenseStore;
pub use user::FlatFileUserStore;

pub(crate) use record::write_csv;

use crate::{AppState, Config};

/// An alias for an [AppState] that keeps its records in flat files.
pub type FlatFileAppState = AppState<FlatFileExpenseStore, FlatFileUserStore>;

/// Creates an [AppState] whose backing files live in the data directory
/// named by `config`.
///
/// The files themselves are created lazily by the first write, so this does
/// not touch the filesystem.
pub fn create_app_state(config: &Config) -> FlatFileAppState {
    AppState::new(
        FlatFileExpenseStore::new(config.expenses_path()),
        FlatFileUserStore::new(config.users_path()),
    )
}
