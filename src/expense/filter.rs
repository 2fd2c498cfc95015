use chrono::NaiveDate;

use super::{Category, Expense};

/// Predicate set applied to the in-memory sequence. Absent fields leave the
/// matching unbounded on that side.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseFilter {
    pub category: Option<Category>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl ExpenseFilter {
    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.start_date.is_none() && self.end_date.is_none()
    }

    /// True when the expense satisfies every supplied predicate. The date
    /// window is inclusive at both ends.
    pub fn matches(&self, expense: &Expense) -> bool {
        if let Some(category) = self.category {
            if expense.category != category {
                return false;
            }
        }
        if let Some(start) = self.start_date {
            if expense.date < start {
                return false;
            }
        }
        if let Some(end) = self.end_date {
            if expense.date > end {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expense_on(day: u32) -> Expense {
        let date = NaiveDate::from_ymd_opt(2025, 6, day).unwrap();
        Expense::new(5.0, Category::Food, date, "").unwrap()
    }

    #[test]
    fn empty_filter_matches_everything() {
        assert!(ExpenseFilter::default().matches(&expense_on(15)));
    }

    #[test]
    fn date_bounds_are_inclusive() {
        let filter = ExpenseFilter {
            start_date: NaiveDate::from_ymd_opt(2025, 6, 10),
            end_date: NaiveDate::from_ymd_opt(2025, 6, 20),
            ..ExpenseFilter::default()
        };
        assert!(filter.matches(&expense_on(10)));
        assert!(filter.matches(&expense_on(20)));
        assert!(!filter.matches(&expense_on(9)));
        assert!(!filter.matches(&expense_on(21)));
    }

    #[test]
    fn category_predicate_requires_equality() {
        let filter = ExpenseFilter {
            category: Some(Category::Transport),
            ..ExpenseFilter::default()
        };
        assert!(!filter.matches(&expense_on(15)));
    }

    #[test]
    fn predicates_combine() {
        let filter = ExpenseFilter {
            category: Some(Category::Food),
            start_date: NaiveDate::from_ymd_opt(2025, 6, 12),
            end_date: None,
        };
        assert!(filter.matches(&expense_on(15)));
        assert!(!filter.matches(&expense_on(11)));
    }
}
