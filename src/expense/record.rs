use chrono::NaiveDate;
use uuid::Uuid;

use super::category::Category;
use crate::errors::ExpenseError;

/// One recorded expense. The id is generated per session and is never part
/// of the persisted layout.
#[derive(Debug, Clone, PartialEq)]
pub struct Expense {
    pub id: Uuid,
    pub amount: f64,
    pub category: Category,
    pub date: NaiveDate,
    pub note: String,
}

impl Expense {
    /// Validated constructor. The amount must be finite and positive.
    pub fn new(
        amount: f64,
        category: Category,
        date: NaiveDate,
        note: impl Into<String>,
    ) -> Result<Self, ExpenseError> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(ExpenseError::InvalidAmount);
        }
        Ok(Self {
            id: Uuid::new_v4(),
            amount,
            category,
            date,
            note: note.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
    }

    #[test]
    fn new_assigns_a_fresh_id() {
        let first = Expense::new(9.99, Category::Food, sample_date(), "lunch").unwrap();
        let second = Expense::new(9.99, Category::Food, sample_date(), "lunch").unwrap();
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn new_rejects_non_positive_amounts() {
        for amount in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                Expense::new(amount, Category::Other, sample_date(), ""),
                Err(ExpenseError::InvalidAmount)
            ));
        }
    }

    #[test]
    fn note_may_be_empty() {
        let expense = Expense::new(1.0, Category::Utilities, sample_date(), "").unwrap();
        assert!(expense.note.is_empty());
    }
}
