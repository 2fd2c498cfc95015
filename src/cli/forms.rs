//! Interactive add/edit forms built on dialoguer prompts.

use chrono::{Local, NaiveDate};
use dialoguer::{theme::ColorfulTheme, Input, Select};

use crate::errors::ExpenseError;
use crate::expense::Category;

use super::CliError;

/// Values collected for one expense, before store-side validation.
#[derive(Debug, Clone)]
pub struct ExpenseFormData {
    pub amount: f64,
    pub category: Category,
    pub date: NaiveDate,
    pub note: String,
}

/// Runs the add form, defaulting the date to today.
pub fn add_form(theme: &ColorfulTheme) -> Result<ExpenseFormData, CliError> {
    prompt(theme, None)
}

/// Runs the edit form, prefilled with the current values.
pub fn edit_form(
    theme: &ColorfulTheme,
    current: &ExpenseFormData,
) -> Result<ExpenseFormData, CliError> {
    prompt(theme, Some(current))
}

fn prompt(
    theme: &ColorfulTheme,
    current: Option<&ExpenseFormData>,
) -> Result<ExpenseFormData, CliError> {
    let mut amount_input = Input::<String>::with_theme(theme)
        .with_prompt("Amount")
        .validate_with(|input: &String| {
            parse_amount(input).map(|_| ()).map_err(|err| err.to_string())
        });
    if let Some(current) = current {
        amount_input = amount_input.default(current.amount.to_string());
    }
    let amount = parse_amount(&amount_input.interact_text()?)?;

    let preselected = current
        .and_then(|c| Category::ALL.iter().position(|k| *k == c.category))
        .unwrap_or(0);
    let index = Select::with_theme(theme)
        .with_prompt("Category")
        .items(&Category::ALL)
        .default(preselected)
        .interact()?;
    let category = Category::ALL[index];

    let date_default = current
        .map(|c| c.date)
        .unwrap_or_else(|| Local::now().date_naive());
    let date_text = Input::<String>::with_theme(theme)
        .with_prompt("Date (YYYY-MM-DD)")
        .default(date_default.to_string())
        .validate_with(|input: &String| {
            parse_date(input).map(|_| ()).map_err(|err| err.to_string())
        })
        .interact_text()?;
    let date = parse_date(&date_text)?;

    let note = Input::<String>::with_theme(theme)
        .with_prompt("Note")
        .allow_empty(true)
        .default(current.map(|c| c.note.clone()).unwrap_or_default())
        .show_default(false)
        .interact_text()?;

    Ok(ExpenseFormData {
        amount,
        category,
        date,
        note,
    })
}

/// Parses a positive decimal amount.
pub fn parse_amount(input: &str) -> Result<f64, ExpenseError> {
    let value: f64 = input
        .trim()
        .parse()
        .map_err(|_| ExpenseError::InvalidAmount)?;
    if !value.is_finite() || value <= 0.0 {
        return Err(ExpenseError::InvalidAmount);
    }
    Ok(value)
}

/// Parses a `YYYY-MM-DD` calendar date.
pub fn parse_date(input: &str) -> Result<NaiveDate, ExpenseError> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| ExpenseError::InvalidDate(input.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_amount_accepts_decimals() {
        assert_eq!(parse_amount(" 12.50 ").unwrap(), 12.5);
    }

    #[test]
    fn parse_amount_rejects_zero_negative_and_text() {
        for input in ["0", "-3", "abc", ""] {
            assert!(matches!(parse_amount(input), Err(ExpenseError::InvalidAmount)));
        }
    }

    #[test]
    fn parse_date_round_trips_iso_dates() {
        let date = parse_date("2025-03-01").unwrap();
        assert_eq!(date.to_string(), "2025-03-01");
    }

    #[test]
    fn parse_date_rejects_other_layouts() {
        assert!(matches!(
            parse_date("03/01/2025"),
            Err(ExpenseError::InvalidDate(_))
        ));
    }
}
