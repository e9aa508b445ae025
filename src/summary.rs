//! Read-only aggregation over expenses: totals plus category and month
//! breakdowns.
//!
//! These functions operate on slices the caller has already fetched from a
//! store (usually through [AppState::list_expenses](crate::AppState::list_expenses)
//! or [AppState::summary](crate::AppState::summary)) and never mutate
//! anything.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Serialize;
use time::Date;

use crate::models::Expense;

/// The key expenses are grouped by in [group_totals].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GroupKey {
    /// Group by the expense's category label.
    Category,
    /// Group by the `YYYY-MM` month the expense's date falls into.
    Month,
}

/// Totals over a set of expenses.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Summary {
    /// Sum of `amount` over every expense in the set.
    pub total: Decimal,
    /// Sum of `amount` per category. Sparse: a category with no expenses in
    /// the set has no entry.
    pub by_category: HashMap<String, Decimal>,
    /// Sum of `amount` per `YYYY-MM` month. Sparse, like `by_category`.
    pub by_month: HashMap<String, Decimal>,
}

/// Sum of `amount` over `expenses`.
///
/// The sum is exact decimal arithmetic, so refunds and corrections recorded
/// as negative amounts offset spending without any rounding drift. An empty
/// slice sums to exact zero.
pub fn total(expenses: &[Expense]) -> Decimal {
    expenses
        .iter()
        .fold(Decimal::ZERO, |sum, expense| sum + expense.amount())
}

/// Sum of `amount` per distinct `key` observed among `expenses`.
///
/// The map is sparse: only keys that appear in `expenses` are present, a key
/// that matched nothing is absent rather than mapped to zero.
pub fn group_totals(expenses: &[Expense], key: GroupKey) -> HashMap<String, Decimal> {
    let mut totals: HashMap<String, Decimal> = HashMap::new();

    for expense in expenses {
        let label = match key {
            GroupKey::Category => expense.category().to_string(),
            GroupKey::Month => month_key(expense.date()),
        };

        *totals.entry(label).or_insert(Decimal::ZERO) += expense.amount();
    }

    totals
}

/// Compute the [Summary] of `expenses`.
pub fn summarise(expenses: &[Expense]) -> Summary {
    Summary {
        total: total(expenses),
        by_category: group_totals(expenses, GroupKey::Category),
        by_month: group_totals(expenses, GroupKey::Month),
    }
}

fn month_key(date: &Date) -> String {
    format!("{:04}-{:02}", date.year(), u8::from(date.month()))
}

#[cfg(test)]
mod summary_tests {
    use rust_decimal::Decimal;
    use time::macros::date;

    use crate::models::{CategoryName, Expense, UserID, parse_amount};

    use super::{GroupKey, group_totals, summarise, total};

    fn expense(id: i64, amount: &str, date: time::Date, category: &str) -> Expense {
        Expense::build(parse_amount(amount).unwrap(), UserID::new(1))
            .date(date)
            .category(CategoryName::new_unchecked(category))
            .finalise(id)
    }

    #[test]
    fn total_of_nothing_is_exact_zero() {
        assert_eq!(total(&[]), Decimal::ZERO);
    }

    #[test]
    fn total_sums_negative_amounts_without_coercion() {
        let expenses = [
            expense(1, "-12.50", date!(2024 - 03 - 01), "refund"),
            expense(2, "40.00", date!(2024 - 03 - 15), "food"),
        ];

        assert_eq!(total(&expenses), parse_amount("27.50").unwrap());
    }

    #[test]
    fn total_equals_arithmetic_sum_of_amounts() {
        let expenses = [
            expense(1, "0.10", date!(2024 - 01 - 01), "Food"),
            expense(2, "0.20", date!(2024 - 01 - 02), "Food"),
            expense(3, "0.30", date!(2024 - 01 - 03), "Food"),
        ];

        // 0.1 + 0.2 == 0.3 exactly, which binary floats get wrong.
        assert_eq!(
            total(&expenses[..2]),
            expenses[2].amount(),
            "decimal sums must not drift"
        );
        assert_eq!(total(&expenses), parse_amount("0.60").unwrap());
    }

    #[test]
    fn group_by_category_is_sparse() {
        let expenses = [
            expense(1, "5.00", date!(2024 - 01 - 01), "Food"),
            expense(2, "7.00", date!(2024 - 01 - 02), "Food"),
            expense(3, "100.00", date!(2024 - 01 - 03), "Rent"),
        ];

        let got = group_totals(&expenses, GroupKey::Category);

        assert_eq!(got.len(), 2);
        assert_eq!(got.get("Food"), Some(&parse_amount("12.00").unwrap()));
        assert_eq!(got.get("Rent"), Some(&parse_amount("100.00").unwrap()));
        assert_eq!(got.get("Transport"), None, "zero-match keys are omitted");
    }

    #[test]
    fn group_by_month_buckets_dates() {
        let expenses = [
            expense(1, "5.00", date!(2024 - 03 - 01), "Food"),
            expense(2, "7.00", date!(2024 - 03 - 31), "Food"),
            expense(3, "9.00", date!(2024 - 04 - 01), "Food"),
        ];

        let got = group_totals(&expenses, GroupKey::Month);

        assert_eq!(got.len(), 2);
        assert_eq!(got.get("2024-03"), Some(&parse_amount("12.00").unwrap()));
        assert_eq!(got.get("2024-04"), Some(&parse_amount("9.00").unwrap()));
    }

    #[test]
    fn summarise_combines_all_three_views() {
        let expenses = [
            expense(1, "-12.50", date!(2024 - 03 - 01), "refund"),
            expense(2, "40.00", date!(2024 - 03 - 15), "food"),
        ];

        let got = summarise(&expenses);

        assert_eq!(got.total, parse_amount("27.50").unwrap());
        assert_eq!(
            got.by_category.get("refund"),
            Some(&parse_amount("-12.50").unwrap())
        );
        assert_eq!(
            got.by_category.get("food"),
            Some(&parse_amount("40.00").unwrap())
        );
        assert_eq!(
            got.by_month.get("2024-03"),
            Some(&parse_amount("27.50").unwrap())
        );
    }

    #[test]
    fn summarise_of_nothing_is_empty() {
        let got = summarise(&[]);

        assert_eq!(got.total, Decimal::ZERO);
        assert!(got.by_category.is_empty());
        assert!(got.by_month.is_empty());
    }
}
