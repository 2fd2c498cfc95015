//! Fixed-layout renderers for the expense listing and the summary chart.

use colored::Colorize;

use crate::expense::{CategoryTotals, Expense};

const LIST_HEADERS: [&str; 5] = ["#", "Date", "Category", "Amount", "Note"];
const BAR_WIDTH: usize = 30;

/// Renders the row-numbered table used by `list`. Row numbers are 1-based
/// and refer to the rendered view, not the backing file.
pub fn render_expenses(expenses: &[&Expense]) -> String {
    let rows: Vec<[String; 5]> = expenses
        .iter()
        .enumerate()
        .map(|(index, expense)| {
            [
                (index + 1).to_string(),
                expense.date.to_string(),
                expense.category.to_string(),
                format!("{:.2}", expense.amount),
                expense.note.clone(),
            ]
        })
        .collect();

    let mut widths = LIST_HEADERS.map(str::len);
    for row in &rows {
        for (column, cell) in row.iter().enumerate() {
            widths[column] = widths[column].max(cell.len());
        }
    }

    let mut out = String::new();
    out.push_str(&format_row(&LIST_HEADERS.map(String::from), &widths));
    out.push_str(&format!(
        "{}\n",
        "-".repeat(widths.iter().sum::<usize>() + 2 * (widths.len() - 1))
    ));
    for row in &rows {
        out.push_str(&format_row(row, &widths));
    }
    out
}

/// Renders per-category totals with a proportional bar chart and a grand
/// total line.
pub fn render_summary(totals: &CategoryTotals) -> String {
    let name_width = totals
        .keys()
        .map(|category| category.as_str().len())
        .chain(std::iter::once("Total".len()))
        .max()
        .unwrap_or(0);
    let max_total = totals.values().cloned().fold(0.0_f64, f64::max);

    let mut out = String::new();
    for (category, total) in totals {
        let bar = bar_for(*total, max_total);
        out.push_str(&format!(
            "{:<name_width$}  {:>10.2}  {}\n",
            category.as_str(),
            total,
            bar.blue()
        ));
    }
    let grand_total: f64 = totals.values().sum();
    out.push_str(&format!("{:<name_width$}  {:>10.2}\n", "Total", grand_total));
    out
}

fn format_row(cells: &[String; 5], widths: &[usize; 5]) -> String {
    // Columns 0 and 3 (# and Amount) are right-aligned.
    let mut line = String::new();
    for (column, cell) in cells.iter().enumerate() {
        if column > 0 {
            line.push_str("  ");
        }
        if column == 0 || column == 3 {
            line.push_str(&format!("{:>width$}", cell, width = widths[column]));
        } else {
            line.push_str(&format!("{:<width$}", cell, width = widths[column]));
        }
    }
    format!("{}\n", line.trim_end())
}

fn bar_for(total: f64, max_total: f64) -> String {
    if max_total <= 0.0 {
        return String::new();
    }
    let scaled = ((total / max_total) * BAR_WIDTH as f64).round() as usize;
    "#".repeat(scaled.max(1))
}
