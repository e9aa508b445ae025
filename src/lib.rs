//! Expenseur is a flat-file expense tracker for one or more users.
//!
//! This library is the data management core: the user and expense models,
//! the flat-file record stores that persist them, and the query and
//! aggregation operations over the stored records. Presentation shells (a
//! web UI, the bundled command line) call in through [AppState] and are
//! responsible for all user-facing messaging.
//!
//! Records live in one delimited UTF-8 file per entity type, created lazily
//! in an explicitly configured data directory. Every mutation rewrites the
//! backing file through an atomic replace, so readers never observe a torn
//! file and a crash mid-write cannot corrupt existing records.

#![warn(missing_docs)]

mod config;
mod error;
pub mod models;
mod state;
pub mod stores;
pub mod summary;

pub use config::Config;
pub use error::Error;
pub use state::AppState;
