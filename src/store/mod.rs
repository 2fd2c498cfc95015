//! In-memory expense sequence mirrored to a CSV backing file.
//!
//! The file and the sequence are kept in step after every successful
//! mutation: `add` appends a single row, `edit` and `remove` rewrite the
//! full file atomically. A failed lookup performs no write at all.

pub mod csv_file;

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::{ExpenseError, Result};
use crate::expense::{summarize, Category, CategoryTotals, Expense, ExpenseFilter};

pub struct ExpenseStore {
    path: PathBuf,
    expenses: Vec<Expense>,
}

impl ExpenseStore {
    /// Opens the store against `path`, creating a header-only file when
    /// absent and loading every row. Malformed content degrades to an
    /// empty sequence with a logged warning.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        csv_file::ensure_initialized(&path)?;
        let expenses = load(&path);
        Ok(Self { path, expenses })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The full in-memory sequence, in storage order.
    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    pub fn get(&self, id: Uuid) -> Option<&Expense> {
        self.expenses.iter().find(|expense| expense.id == id)
    }

    /// Appends one expense to the file, then to memory. O(1) in the number
    /// of existing rows.
    pub fn add(&mut self, expense: Expense) -> Result<Uuid> {
        csv_file::append(&self.path, &expense)?;
        let id = expense.id;
        info!(%id, amount = expense.amount, category = %expense.category, "expense added");
        self.expenses.push(expense);
        Ok(id)
    }

    /// Replaces the fields of the expense with `id`, keeping the id, and
    /// rewrites the backing file.
    pub fn edit(
        &mut self,
        id: Uuid,
        amount: f64,
        category: Category,
        date: NaiveDate,
        note: impl Into<String>,
    ) -> Result<()> {
        let position = self.position_of(id).ok_or(ExpenseError::NotFound(id))?;
        let mut updated = Expense::new(amount, category, date, note)?;
        updated.id = id;
        self.expenses[position] = updated;
        csv_file::write_all(&self.path, &self.expenses)?;
        info!(%id, "expense updated");
        Ok(())
    }

    /// Removes the expense with `id`, preserving the order of the rest, and
    /// rewrites the backing file.
    pub fn remove(&mut self, id: Uuid) -> Result<Expense> {
        let position = self.position_of(id).ok_or(ExpenseError::NotFound(id))?;
        let removed = self.expenses.remove(position);
        csv_file::write_all(&self.path, &self.expenses)?;
        info!(%id, "expense removed");
        Ok(removed)
    }

    /// Returns the matching subsequence in storage order. Pure.
    pub fn filter(&self, filter: &ExpenseFilter) -> Vec<&Expense> {
        self.expenses
            .iter()
            .filter(|expense| filter.matches(expense))
            .collect()
    }

    /// Per-category totals over the full sequence. Pure.
    pub fn summary(&self) -> CategoryTotals {
        summarize(&self.expenses)
    }

    fn position_of(&self, id: Uuid) -> Option<usize> {
        self.expenses.iter().position(|expense| expense.id == id)
    }
}

fn load(path: &Path) -> Vec<Expense> {
    let empty = fs::metadata(path).map(|meta| meta.len() == 0).unwrap_or(true);
    if empty {
        info!(
            "backing file `{}` is missing or empty; starting with an empty list",
            path.display()
        );
        return Vec::new();
    }
    match csv_file::read_all(path) {
        Ok(expenses) => expenses,
        Err(err) => {
            warn!("discarding contents of `{}`: {}", path.display(), err);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, day).unwrap()
    }

    #[test]
    fn open_creates_the_backing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("expenses.csv");
        let store = ExpenseStore::open(path.clone()).unwrap();
        assert!(path.exists());
        assert!(store.is_empty());
    }

    #[test]
    fn filter_without_predicates_returns_the_full_sequence_in_order() {
        let dir = tempdir().unwrap();
        let mut store = ExpenseStore::open(dir.path().join("expenses.csv")).unwrap();
        for day in [3, 1, 2] {
            store
                .add(Expense::new(1.0, Category::Other, date(day), day.to_string()).unwrap())
                .unwrap();
        }
        let all = store.filter(&ExpenseFilter::default());
        let notes: Vec<&str> = all.iter().map(|expense| expense.note.as_str()).collect();
        assert_eq!(notes, ["3", "1", "2"]);
    }

    #[test]
    fn remove_reports_unknown_ids() {
        let dir = tempdir().unwrap();
        let mut store = ExpenseStore::open(dir.path().join("expenses.csv")).unwrap();
        let missing = Uuid::new_v4();
        assert!(matches!(
            store.remove(missing),
            Err(ExpenseError::NotFound(id)) if id == missing
        ));
    }
}
