use std::collections::BTreeMap;

use super::{Category, Expense};

/// Per-category amount totals, ordered by category.
pub type CategoryTotals = BTreeMap<Category, f64>;

/// Sums amounts per category. Categories without any records are absent
/// from the result rather than zero-filled.
pub fn summarize<'a, I>(expenses: I) -> CategoryTotals
where
    I: IntoIterator<Item = &'a Expense>,
{
    let mut totals = CategoryTotals::new();
    for expense in expenses {
        *totals.entry(expense.category).or_insert(0.0) += expense.amount;
    }
    totals
}
