//! Implements the application facade that the presentation shell calls into.

use std::{collections::HashMap, io::Write};

use rust_decimal::Decimal;

use crate::{
    Error,
    models::{
        CategoryName, DatabaseID, Expense, ExpenseUpdate, User, UserID, UserName, parse_amount,
        parse_date,
    },
    stores::{ExpenseQuery, ExpenseStore, UserStore, flat_file::write_csv},
    summary::{self, GroupKey, Summary, summarise},
};

/// The state of the application: the stores for users and expenses, and the
/// function surface the presentation shell calls.
///
/// `amount` and `date` arguments arrive as text, the way a form or command
/// line produces them, and are strictly parsed before anything is written,
/// so a validation failure never leaves a partial mutation behind.
#[derive(Clone, Debug)]
pub struct AppState<E, U>
where
    E: ExpenseStore,
    U: UserStore,
{
    /// The store for managing [expenses](crate::models::Expense).
    pub expense_store: E,
    /// The store for managing [users](crate::models::User).
    pub user_store: U,
}

impl<E, U> AppState<E, U>
where
    E: ExpenseStore,
    U: UserStore,
{
    /// Create a new [AppState].
    pub fn new(expense_store: E, user_store: U) -> Self {
        Self {
            expense_store,
            user_store,
        }
    }

    /// Register a new user with the display name `name`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::EmptyUserName] if `name` is empty,
    /// - or [Error::DuplicateUserName] if the name is already taken.
    pub fn add_user(&mut self, name: &str) -> Result<User, Error> {
        let name = UserName::new(name)?;

        self.user_store.create(name)
    }

    /// Look up a user by exact display name.
    ///
    /// # Errors
    /// This function will return [Error::NotFound] if no user has that name.
    pub fn get_user_by_name(&self, name: &str) -> Result<User, Error> {
        self.user_store.get_by_name(name)
    }

    /// Record a new expense for `user_id`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::InvalidAmount] if `amount` is not a valid decimal,
    /// - [Error::InvalidDate] if `date` is not a valid `YYYY-MM-DD` date,
    /// - [Error::EmptyCategory] if `category` is empty,
    /// - or [Error::InvalidUser] if `user_id` does not refer to a known user.
    pub fn add_expense(
        &mut self,
        user_id: UserID,
        amount: &str,
        category: &str,
        date: &str,
        description: &str,
    ) -> Result<Expense, Error> {
        let amount = parse_amount(amount)?;
        let date = parse_date(date)?;
        let category = CategoryName::new(category)?;

        // Reject dangling user references before anything is written.
        self.user_store.get(user_id).map_err(|error| match error {
            Error::NotFound => Error::InvalidUser(user_id),
            error => error,
        })?;

        let builder = Expense::build(amount, user_id)
            .date(date)
            .category(category)
            .description(description);

        self.expense_store.create(builder)
    }

    /// Retrieve the expenses matching `query`, in insertion order unless the
    /// query asks for a date sort.
    pub fn list_expenses(&self, query: &ExpenseQuery) -> Result<Vec<Expense>, Error> {
        self.expense_store.get_query(query)
    }

    /// Apply `update` to the expense with `id` and return the changed
    /// expense.
    ///
    /// # Errors
    /// This function will return [Error::NotFound] if `id` does not refer to
    /// a stored expense.
    pub fn update_expense(&mut self, id: DatabaseID, update: ExpenseUpdate) -> Result<Expense, Error> {
        self.expense_store.update(id, update)
    }

    /// Delete the expense with `id`, reporting whether a record was actually
    /// removed.
    pub fn delete_expense(&mut self, id: DatabaseID) -> Result<bool, Error> {
        self.expense_store.delete(id)
    }

    /// Sum of `amount` over the expenses matching `query`.
    ///
    /// A query matching nothing sums to exact zero, never an error.
    pub fn total(&self, query: &ExpenseQuery) -> Result<Decimal, Error> {
        let expenses = self.expense_store.get_query(query)?;

        Ok(summary::total(&expenses))
    }

    /// Sum of `amount` per distinct `key` among the expenses matching
    /// `query`. The map is sparse: keys that matched nothing are absent.
    pub fn group_totals(
        &self,
        key: GroupKey,
        query: &ExpenseQuery,
    ) -> Result<HashMap<String, Decimal>, Error> {
        let expenses = self.expense_store.get_query(query)?;

        Ok(summary::group_totals(&expenses, key))
    }

    /// Compute the [Summary] of the expenses matching `query`: the overall
    /// total plus category and month breakdowns.
    ///
    /// A query matching nothing produces a summary with an exact-zero total
    /// and empty breakdowns, never an error.
    pub fn summary(&self, query: &ExpenseQuery) -> Result<Summary, Error> {
        let expenses = self.expense_store.get_query(query)?;

        Ok(summarise(&expenses))
    }

    /// Write the expenses matching `query` to `writer` in the backing-file
    /// encoding, header row first. Returns how many expenses were written.
    pub fn export_expenses<W: Write>(
        &self,
        query: &ExpenseQuery,
        writer: W,
    ) -> Result<usize, Error> {
        let expenses = self.expense_store.get_query(query)?;
        write_csv(writer, &expenses)?;

        Ok(expenses.len())
    }
}
