//! Implements a flat-file backed expense store.

use std::path::PathBuf;

use crate::{
    Error,
    models::{
        CategoryName, DatabaseID, Expense, ExpenseBuilder, ExpenseUpdate, UserID, parse_amount,
        parse_date,
    },
    stores::{ExpenseQuery, ExpenseStore, SortOrder},
};

use super::record::{FileRecord, load_all, next_id, replace_all};

/// Stores expenses in a delimited flat file, one row per expense.
///
/// Every mutation rewrites the whole file through an atomic replace, so a
/// crash mid-write never leaves a parseable-but-wrong file behind. The file
/// is created lazily by the first write; a missing file reads as zero
/// expenses.
#[derive(Clone, Debug)]
pub struct FlatFileExpenseStore {
    path: PathBuf,
}

impl FlatFileExpenseStore {
    /// Create a store backed by the file at `path`.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl FileRecord for Expense {
    const HEADER: &'static [&'static str] = &[
        "expense_id",
        "user_id",
        "amount",
        "date",
        "category",
        "description",
    ];

    fn record_id(&self) -> DatabaseID {
        self.id()
    }

    fn encode(&self) -> Vec<String> {
        vec![
            self.id().to_string(),
            self.user_id().as_i64().to_string(),
            self.amount().to_string(),
            self.date().to_string(),
            self.category().to_string(),
            self.description().to_string(),
        ]
    }

    fn decode(row: &csv::StringRecord) -> Result<Self, String> {
        let raw_id = row.get(0).ok_or("missing field 'expense_id'")?;
        let id = raw_id
            .parse::<i64>()
            .map_err(|_| format!("could not parse \"{raw_id}\" as an expense ID"))?;

        let raw_user_id = row.get(1).ok_or("missing field 'user_id'")?;
        let user_id = raw_user_id
            .parse::<i64>()
            .map_err(|_| format!("could not parse \"{raw_user_id}\" as a user ID"))?;

        let amount = parse_amount(row.get(2).ok_or("missing field 'amount'")?)
            .map_err(|error| error.to_string())?;

        let date = parse_date(row.get(3).ok_or("missing field 'date'")?)
            .map_err(|error| error.to_string())?;

        let category = CategoryName::new(row.get(4).ok_or("missing field 'category'")?)
            .map_err(|error| error.to_string())?;

        let description = row.get(5).ok_or("missing field 'description'")?;

        Ok(Expense::build(amount, UserID::new(user_id))
            .date(date)
            .category(category)
            .description(description)
            .finalise(id))
    }
}

impl ExpenseStore for FlatFileExpenseStore {
    /// Create a new expense in the backing file.
    ///
    /// The new expense gets the next free ID: one greater than the largest
    /// stored ID, or 1 for an empty store.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::CorruptRecord] if the backing file could not be parsed,
    /// - or [Error::Io] if the file could not be read or rewritten.
    fn create(&mut self, builder: ExpenseBuilder) -> Result<Expense, Error> {
        let mut expenses: Vec<Expense> = load_all(&self.path)?;

        let expense = builder.finalise(next_id(&expenses));
        expenses.push(expense.clone());
        replace_all(&self.path, &expenses)?;

        Ok(expense)
    }

    fn get(&self, id: DatabaseID) -> Result<Expense, Error> {
        load_all::<Expense>(&self.path)?
            .into_iter()
            .find(|expense| expense.id() == id)
            .ok_or(Error::NotFound)
    }

    /// Query for expenses in the backing file.
    ///
    /// Results come back in the order they are stored unless the query asks
    /// for a date sort; the sort is stable, so expenses on the same date stay
    /// in insertion order.
    fn get_query(&self, query: &ExpenseQuery) -> Result<Vec<Expense>, Error> {
        let mut expenses: Vec<Expense> = load_all(&self.path)?;
        expenses.retain(|expense| query.matches(expense));

        match query.sort_date {
            Some(SortOrder::Ascending) => expenses.sort_by(|a, b| a.date().cmp(b.date())),
            Some(SortOrder::Descending) => expenses.sort_by(|a, b| b.date().cmp(a.date())),
            None => {}
        }

        Ok(expenses)
    }

    fn update(&mut self, id: DatabaseID, update: ExpenseUpdate) -> Result<Expense, Error> {
        let mut expenses: Vec<Expense> = load_all(&self.path)?;

        let expense = expenses
            .iter_mut()
            .find(|expense| expense.id() == id)
            .ok_or(Error::NotFound)?;

        expense.apply(update);
        let updated = expense.clone();
        replace_all(&self.path, &expenses)?;

        Ok(updated)
    }

    fn delete(&mut self, id: DatabaseID) -> Result<bool, Error> {
        let mut expenses: Vec<Expense> = load_all(&self.path)?;

        let count_before = expenses.len();
        expenses.retain(|expense| expense.id() != id);

        if expenses.len() == count_before {
            return Ok(false);
        }

        replace_all(&self.path, &expenses)?;

        Ok(true)
    }

    fn count(&self) -> Result<usize, Error> {
        Ok(load_all::<Expense>(&self.path)?.len())
    }
}
