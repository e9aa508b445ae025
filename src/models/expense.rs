//! This file defines the type `Expense`, the core type of the expense
//! tracking part of the application, and the builder and patch types used to
//! create and modify expenses.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime, format_description::BorrowedFormatItem, macros::format_description};

use crate::{
    Error,
    models::{CategoryName, DatabaseID, UserID},
};

/// The on-disk and API date format, `YYYY-MM-DD`.
pub(crate) const DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

/// Parse `text` as an exact decimal amount.
///
/// Amounts are parsed without any intermediate binary floating-point
/// conversion so that the decimal string written to disk is the decimal
/// string read back. Signed values are accepted, refunds and corrections are
/// recorded as negative amounts.
///
/// # Errors
/// This function will return [Error::InvalidAmount] with the offending text
/// if `text` is not a valid decimal number.
pub fn parse_amount(text: &str) -> Result<Decimal, Error> {
    Decimal::from_str_exact(text.trim()).map_err(|_| Error::InvalidAmount(text.to_owned()))
}

/// Parse `text` as a calendar date in `YYYY-MM-DD` form.
///
/// # Errors
/// This function will return [Error::InvalidDate] with the offending text if
/// `text` is not a valid calendar date.
pub fn parse_date(text: &str) -> Result<Date, Error> {
    Date::parse(text.trim(), DATE_FORMAT).map_err(|_| Error::InvalidDate(text.to_owned()))
}

/// An event where money was spent or received.
///
/// To create a new `Expense`, use [Expense::build] and pass the builder to
/// [ExpenseStore::create](crate::stores::ExpenseStore::create), which assigns
/// the ID. Expenses are value objects: stores hand out owned copies, never
/// references into their own buffers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    id: DatabaseID,
    user_id: UserID,
    amount: Decimal,
    date: Date,
    category: CategoryName,
    description: String,
}

impl Expense {
    /// Create a new expense.
    ///
    /// Shortcut for [ExpenseBuilder::new] for discoverability.
    pub fn build(amount: Decimal, user_id: UserID) -> ExpenseBuilder {
        ExpenseBuilder::new(amount, user_id)
    }

    /// The ID of the expense.
    pub fn id(&self) -> DatabaseID {
        self.id
    }

    /// The ID of the user that owns this expense.
    pub fn user_id(&self) -> UserID {
        self.user_id
    }

    /// The amount of money spent (negative for refunds and corrections).
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// When the expense happened.
    pub fn date(&self) -> &Date {
        &self.date
    }

    /// The category label of the expense.
    pub fn category(&self) -> &CategoryName {
        &self.category
    }

    /// A text description of what the expense was for.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Apply `update` to this expense, leaving fields the update does not
    /// name untouched.
    pub(crate) fn apply(&mut self, update: ExpenseUpdate) {
        if let Some(amount) = update.amount {
            self.amount = amount;
        }

        if let Some(date) = update.date {
            self.date = date;
        }

        if let Some(category) = update.category {
            self.category = category;
        }

        if let Some(description) = update.description {
            self.description = description;
        }
    }
}

/// Builder for creating a new [Expense].
///
/// The builder is finalized by the store that assigns the ID, see
/// [ExpenseStore::create](crate::stores::ExpenseStore::create).
#[derive(Clone, Debug, PartialEq)]
pub struct ExpenseBuilder {
    pub(crate) amount: Decimal,
    pub(crate) user_id: UserID,
    pub(crate) date: Date,
    pub(crate) category: CategoryName,
    pub(crate) description: String,
}

impl ExpenseBuilder {
    /// Create a builder for an expense of `amount` owned by `user_id`.
    ///
    /// The date defaults to today and the category to 'Other'.
    pub fn new(amount: Decimal, user_id: UserID) -> Self {
        Self {
            amount,
            user_id,
            date: OffsetDateTime::now_utc().date(),
            category: CategoryName::new_unchecked("Other"),
            description: String::new(),
        }
    }

    /// Set the date for the expense.
    pub fn date(mut self, date: Date) -> Self {
        self.date = date;
        self
    }

    /// Set the category for the expense.
    pub fn category(mut self, category: CategoryName) -> Self {
        self.category = category;
        self
    }

    /// Set the description for the expense.
    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// Finalize the builder into an [Expense] with the given ID.
    pub fn finalise(self, id: DatabaseID) -> Expense {
        Expense {
            id,
            user_id: self.user_id,
            amount: self.amount,
            date: self.date,
            category: self.category,
            description: self.description,
        }
    }
}

/// A patch applied to an existing [Expense] by
/// [ExpenseStore::update](crate::stores::ExpenseStore::update).
///
/// Fields left as `None` are not modified.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExpenseUpdate {
    /// Replace the amount.
    pub amount: Option<Decimal>,
    /// Replace the date.
    pub date: Option<Date>,
    /// Replace the category.
    pub category: Option<CategoryName>,
    /// Replace the description.
    pub description: Option<String>,
}
