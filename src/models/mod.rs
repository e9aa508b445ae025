//! Defines the domain models: users, expenses, and their supporting types.

mod category;
mod expense;
mod user;

pub use category::CategoryName;
pub use expense::{Expense, ExpenseBuilder, ExpenseUpdate, parse_amount, parse_date};
pub use user::{User, UserID, UserName};

/// Alias for the integer type used for record IDs in the backing files.
pub type DatabaseID = i64;
