//! Row codec and file primitives for the CSV backing file.

use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use csv::{ReaderBuilder, WriterBuilder};
use serde::{Deserialize, Serialize};

use crate::errors::{ExpenseError, Result};
use crate::expense::{Category, Expense};

pub const HEADER: [&str; 4] = ["amount", "category", "date", "note"];

const TMP_SUFFIX: &str = "tmp";

/// Persisted row shape. Ids never reach the file.
#[derive(Debug, Serialize, Deserialize)]
struct Row {
    amount: f64,
    category: Category,
    date: NaiveDate,
    #[serde(default)]
    note: String,
}

impl From<&Expense> for Row {
    fn from(expense: &Expense) -> Self {
        Self {
            amount: expense.amount,
            category: expense.category,
            date: expense.date,
            note: expense.note.clone(),
        }
    }
}

impl Row {
    fn into_expense(self) -> Result<Expense> {
        Expense::new(self.amount, self.category, self.date, self.note)
    }
}

/// Creates the file with a header row and no data rows when absent. Idempotent.
pub fn ensure_initialized(path: &Path) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut writer = WriterBuilder::new().from_path(path)?;
    writer.write_record(HEADER)?;
    writer.flush()?;
    Ok(())
}

/// Reads every row. A missing `date` column or any unparseable row is an
/// error; the caller decides how to degrade.
pub fn read_all(path: &Path) -> Result<Vec<Expense>> {
    let file = File::open(path)?;
    let mut reader = ReaderBuilder::new().from_reader(BufReader::new(file));
    let headers = reader.headers()?;
    if !headers.iter().any(|column| column == "date") {
        return Err(ExpenseError::Storage(format!(
            "backing file `{}` is missing the `date` column",
            path.display()
        )));
    }
    let mut expenses = Vec::new();
    for row in reader.deserialize::<Row>() {
        expenses.push(row?.into_expense()?);
    }
    Ok(expenses)
}

/// Appends one row, writing the header first when the file is new or empty.
/// Existing rows are never rewritten.
pub fn append(path: &Path, expense: &Expense) -> Result<()> {
    let write_header = fs::metadata(path).map(|meta| meta.len() == 0).unwrap_or(true);
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_writer(BufWriter::new(file));
    if write_header {
        writer.write_record(HEADER)?;
    }
    writer.serialize(Row::from(expense))?;
    writer.flush()?;
    Ok(())
}

/// Rewrites the full sequence atomically by staging to a temporary file.
pub fn write_all(path: &Path, expenses: &[Expense]) -> Result<()> {
    let tmp = tmp_path(path);
    write_to(&tmp, expenses)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Writes a header plus the given expenses to an arbitrary path. Backs both
/// full rewrites and derived exports of a filtered view.
pub fn write_to<'a, I>(path: &Path, expenses: I) -> Result<()>
where
    I: IntoIterator<Item = &'a Expense>,
{
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_writer(BufWriter::new(file));
    writer.write_record(HEADER)?;
    for expense in expenses {
        writer.serialize(Row::from(expense))?;
    }
    writer.flush()?;
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}
