//! Defines the expense store trait and the query type used to select
//! expenses from it.

use time::Date;

use crate::{
    Error,
    models::{CategoryName, DatabaseID, Expense, ExpenseBuilder, ExpenseUpdate, UserID},
};

/// Handles the creation, retrieval, and mutation of expenses.
pub trait ExpenseStore {
    /// Create a new expense in the store, assigning the next free ID
    /// (one greater than the largest existing ID, starting at 1).
    fn create(&mut self, builder: ExpenseBuilder) -> Result<Expense, Error>;

    /// Retrieve an expense from the store, or [Error::NotFound].
    fn get(&self, id: DatabaseID) -> Result<Expense, Error>;

    /// Retrieve expenses from the store in the way defined by `query`.
    fn get_query(&self, query: &ExpenseQuery) -> Result<Vec<Expense>, Error>;

    /// Apply `update` to the expense with `id` and return the changed
    /// expense, or [Error::NotFound]. Fields the update does not name are
    /// left untouched.
    fn update(&mut self, id: DatabaseID, update: ExpenseUpdate) -> Result<Expense, Error>;

    /// Remove the expense with `id`, reporting whether a record was actually
    /// removed. The relative order of the remaining records is preserved.
    fn delete(&mut self, id: DatabaseID) -> Result<bool, Error>;

    /// The total number of expenses in the store.
    fn count(&self) -> Result<usize, Error>;
}

/// Defines how expenses should be fetched from [ExpenseStore::get_query].
///
/// Every constraint is optional; the constraints that are present are ANDed
/// together, and an empty query matches everything.
#[derive(Clone, Debug, Default)]
pub struct ExpenseQuery {
    /// Include only expenses owned by this user.
    pub user_id: Option<UserID>,
    /// Include only expenses on or after this date (inclusive).
    pub date_from: Option<Date>,
    /// Include only expenses on or before this date (inclusive).
    pub date_to: Option<Date>,
    /// Include only expenses whose category matches.
    pub category: Option<CategoryMatch>,
    /// Orders expenses by date in the order `sort_date`. None returns
    /// expenses in the order they are stored.
    pub sort_date: Option<SortOrder>,
}

impl ExpenseQuery {
    /// Whether `expense` satisfies every constraint present in this query.
    pub fn matches(&self, expense: &Expense) -> bool {
        if self.user_id.is_some_and(|user_id| expense.user_id() != user_id) {
            return false;
        }

        if self.date_from.is_some_and(|from| *expense.date() < from) {
            return false;
        }

        if self.date_to.is_some_and(|to| *expense.date() > to) {
            return false;
        }

        if let Some(category) = &self.category {
            if !category.matches(expense.category()) {
                return false;
            }
        }

        true
    }
}

/// How a category constraint in an [ExpenseQuery] is matched.
#[derive(Clone, Debug, PartialEq)]
pub enum CategoryMatch {
    /// The category equals this label exactly.
    Exact(CategoryName),
    /// The category contains this text, compared case-insensitively.
    Contains(String),
}

impl CategoryMatch {
    /// Whether `category` satisfies this constraint.
    pub fn matches(&self, category: &CategoryName) -> bool {
        match self {
            CategoryMatch::Exact(name) => category == name,
            CategoryMatch::Contains(pattern) => category
                .as_ref()
                .to_lowercase()
                .contains(&pattern.to_lowercase()),
        }
    }
}

/// The order to sort expenses in an [ExpenseQuery].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SortOrder {
    /// Sort in order of increasing value.
    Ascending,
    /// Sort in order of decreasing value.
    Descending,
}

#[cfg(test)]
mod expense_query_tests {
    use time::macros::date;

    use crate::models::{CategoryName, Expense, UserID, parse_amount};

    use super::{CategoryMatch, ExpenseQuery};

    fn expense(user_id: i64, date: time::Date, category: &str) -> Expense {
        Expense::build(parse_amount("1.00").unwrap(), UserID::new(user_id))
            .date(date)
            .category(CategoryName::new_unchecked(category))
            .finalise(1)
    }

    #[test]
    fn empty_query_matches_everything() {
        let query = ExpenseQuery::default();

        assert!(query.matches(&expense(1, date!(2024 - 01 - 01), "Food")));
    }

    #[test]
    fn user_id_must_match_exactly() {
        let query = ExpenseQuery {
            user_id: Some(UserID::new(2)),
            ..Default::default()
        };

        assert!(!query.matches(&expense(1, date!(2024 - 01 - 01), "Food")));
        assert!(query.matches(&expense(2, date!(2024 - 01 - 01), "Food")));
    }

    #[test]
    fn date_bounds_are_inclusive() {
        let query = ExpenseQuery {
            date_from: Some(date!(2024 - 01 - 10)),
            date_to: Some(date!(2024 - 01 - 20)),
            ..Default::default()
        };

        assert!(!query.matches(&expense(1, date!(2024 - 01 - 09), "Food")));
        assert!(query.matches(&expense(1, date!(2024 - 01 - 10), "Food")));
        assert!(query.matches(&expense(1, date!(2024 - 01 - 20), "Food")));
        assert!(!query.matches(&expense(1, date!(2024 - 01 - 21), "Food")));
    }

    #[test]
    fn date_bounds_work_independently() {
        let from_only = ExpenseQuery {
            date_from: Some(date!(2024 - 01 - 10)),
            ..Default::default()
        };
        let to_only = ExpenseQuery {
            date_to: Some(date!(2024 - 01 - 10)),
            ..Default::default()
        };

        assert!(from_only.matches(&expense(1, date!(2030 - 01 - 01), "Food")));
        assert!(to_only.matches(&expense(1, date!(2000 - 01 - 01), "Food")));
    }

    #[test]
    fn category_exact_is_case_sensitive() {
        let query = ExpenseQuery {
            category: Some(CategoryMatch::Exact(CategoryName::new_unchecked("Food"))),
            ..Default::default()
        };

        assert!(query.matches(&expense(1, date!(2024 - 01 - 01), "Food")));
        assert!(!query.matches(&expense(1, date!(2024 - 01 - 01), "food")));
    }

    #[test]
    fn category_contains_is_case_insensitive() {
        let query = ExpenseQuery {
            category: Some(CategoryMatch::Contains("eat".to_owned())),
            ..Default::default()
        };

        assert!(query.matches(&expense(1, date!(2024 - 01 - 01), "Eating Out")));
        assert!(!query.matches(&expense(1, date!(2024 - 01 - 01), "Food")));
    }

    #[test]
    fn all_constraints_are_anded() {
        let query = ExpenseQuery {
            user_id: Some(UserID::new(1)),
            category: Some(CategoryMatch::Exact(CategoryName::new_unchecked("Food"))),
            ..Default::default()
        };

        assert!(query.matches(&expense(1, date!(2024 - 01 - 01), "Food")));
        assert!(!query.matches(&expense(1, date!(2024 - 01 - 01), "Rent")));
        assert!(!query.matches(&expense(2, date!(2024 - 01 - 01), "Food")));
    }
}
