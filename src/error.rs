//! Defines the crate level error type and its conversions.

use crate::models::UserID;

/// The errors that may occur in the expense tracking core.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The text given for an amount could not be parsed as a decimal number.
    ///
    /// Carries the offending text so the caller can report exactly what was
    /// rejected. Amounts are parsed exactly and are never coerced to zero.
    #[error("could not parse \"{0}\" as a decimal amount")]
    InvalidAmount(String),

    /// The text given for a date could not be parsed as a calendar date.
    ///
    /// Dates must be in `YYYY-MM-DD` form.
    #[error("could not parse \"{0}\" as a calendar date (expected YYYY-MM-DD)")]
    InvalidDate(String),

    /// An empty string was used to create a user name.
    #[error("user name cannot be empty")]
    EmptyUserName,

    /// An empty string was used to create a category.
    #[error("category cannot be empty")]
    EmptyCategory,

    /// The name used to create a user already belongs to another user.
    #[error("the user \"{0}\" already exists")]
    DuplicateUserName(String),

    /// The user ID used to create an expense did not match a known user.
    ///
    /// Expenses always reference the user that owns them, so a dangling
    /// reference is rejected before anything is written.
    #[error("the user ID {0} does not refer to a known user")]
    InvalidUser(UserID),

    /// The requested record could not be found.
    ///
    /// Callers should check that the ID is correct and that the record has
    /// not already been deleted.
    #[error("the requested record could not be found")]
    NotFound,

    /// A backing file contains a row that could not be decoded.
    ///
    /// The whole load is aborted rather than skipping the row, since a
    /// silently dropped row would corrupt every aggregate computed from the
    /// file. `line` is 1-based and includes the header row.
    #[error("corrupt record in {path} on line {line}: {reason}")]
    CorruptRecord {
        /// The backing file containing the bad row.
        path: String,
        /// The 1-based line number of the bad row.
        line: u64,
        /// Why the row could not be decoded.
        reason: String,
    },

    /// An unexpected filesystem error.
    ///
    /// The original error is kept as a string so this enum stays `PartialEq`
    /// for test assertions; the full error is logged at the conversion point.
    #[error("an unexpected I/O error occurred: {0}")]
    Io(String),
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        tracing::error!("an unhandled I/O error occurred: {}", value);
        Error::Io(value.to_string())
    }
}

impl From<csv::Error> for Error {
    fn from(value: csv::Error) -> Self {
        tracing::error!("an unhandled CSV error occurred: {}", value);
        Error::Io(value.to_string())
    }
}
