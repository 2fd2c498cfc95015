//! Command handlers operating on the shell context.

use std::path::PathBuf;

use dialoguer::{theme::ColorfulTheme, Confirm};
use strsim::levenshtein;
use uuid::Uuid;

use crate::config::{self, Config, ConfigManager};
use crate::errors::ExpenseError;
use crate::expense::{summarize, Expense, ExpenseFilter};
use crate::store::{csv_file, ExpenseStore};

use super::forms::{self, ExpenseFormData};
use super::{output, table, CliError, CliMode, LoopControl};

const COMMANDS: [&str; 10] = [
    "add", "list", "edit", "remove", "summary", "export", "path", "use", "help", "exit",
];
const SUGGESTION_DISTANCE: usize = 3;

pub type CommandResult = Result<LoopControl, CliError>;

/// Shared state for one shell session.
pub struct ShellContext {
    store: ExpenseStore,
    config_manager: ConfigManager,
    config: Config,
    mode: CliMode,
    theme: ColorfulTheme,
    /// Row-number to id mapping and filter of the most recent `list`.
    view: Vec<Uuid>,
    view_filter: ExpenseFilter,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let config_manager = ConfigManager::new()?;
        let config = config_manager.load()?;
        let store = ExpenseStore::open(config::resolve_data_file(&config))?;
        Ok(Self {
            store,
            config_manager,
            config,
            mode,
            theme: ColorfulTheme::default(),
            view: Vec::new(),
            view_filter: ExpenseFilter::default(),
        })
    }

    /// Maps a 1-based row number from the last listing to a store id.
    fn resolve_row(&self, raw: &str) -> Result<Uuid, CliError> {
        let row: usize = raw
            .parse()
            .map_err(|_| CliError::Input(format!("`{}` is not a row number", raw)))?;
        if self.view.is_empty() {
            return Err(CliError::Input("run `list` first to number the rows".into()));
        }
        row.checked_sub(1)
            .and_then(|index| self.view.get(index))
            .copied()
            .ok_or_else(|| CliError::Input(format!("row {} is not in the last listing", row)))
    }

    fn current_view(&self) -> Vec<&Expense> {
        self.store.filter(&self.view_filter)
    }
}

pub fn dispatch(context: &mut ShellContext, command: &str, args: &[String]) -> CommandResult {
    match command {
        "add" => add(context, args),
        "list" => list(context, args),
        "edit" => edit(context, args),
        "remove" | "rm" => remove(context, args),
        "summary" => summary(context),
        "export" => export(context, args),
        "path" => path(context),
        "use" => use_file(context, args),
        "help" => help(),
        "exit" | "quit" => Ok(LoopControl::Exit),
        other => unknown(other),
    }
}

fn add(context: &mut ShellContext, args: &[String]) -> CommandResult {
    let data = if args.is_empty() {
        require_interactive(context, "add <amount> <category> <date> [note…]")?;
        forms::add_form(&context.theme)?
    } else {
        parse_expense_args(args)?
    };
    let expense = Expense::new(data.amount, data.category, data.date, data.note)?;
    context.store.add(expense)?;
    output::success("Expense added.");
    Ok(LoopControl::Continue)
}

fn list(context: &mut ShellContext, args: &[String]) -> CommandResult {
    let filter = parse_filter_args(args)?;
    let matches = context.store.filter(&filter);
    context.view = matches.iter().map(|expense| expense.id).collect();
    context.view_filter = filter;
    if matches.is_empty() {
        output::info("No expenses found for the selected filters.");
    } else {
        print!("{}", table::render_expenses(&matches));
    }
    Ok(LoopControl::Continue)
}

fn edit(context: &mut ShellContext, args: &[String]) -> CommandResult {
    let Some(raw_row) = args.first() else {
        return Err(CliError::Input(
            "expected a row number from the last `list`".into(),
        ));
    };
    let id = context.resolve_row(raw_row)?;
    let current = context.store.get(id).ok_or(ExpenseError::NotFound(id))?;
    let current_data = ExpenseFormData {
        amount: current.amount,
        category: current.category,
        date: current.date,
        note: current.note.clone(),
    };
    let data = if args.len() > 1 {
        parse_expense_args(&args[1..])?
    } else {
        require_interactive(context, "edit <row> <amount> <category> <date> [note…]")?;
        forms::edit_form(&context.theme, &current_data)?
    };
    context
        .store
        .edit(id, data.amount, data.category, data.date, data.note)?;
    output::success("Expense updated.");
    Ok(LoopControl::Continue)
}

fn remove(context: &mut ShellContext, args: &[String]) -> CommandResult {
    let Some(raw_row) = args.first() else {
        return Err(CliError::Input(
            "expected a row number from the last `list`".into(),
        ));
    };
    let id = context.resolve_row(raw_row)?;
    if context.mode == CliMode::Interactive {
        let confirmed = Confirm::with_theme(&context.theme)
            .with_prompt("Delete this expense?")
            .default(false)
            .interact()?;
        if !confirmed {
            output::info("Kept.");
            return Ok(LoopControl::Continue);
        }
    }
    let removed = context.store.remove(id)?;
    output::success(format!(
        "Removed {:.2} {} on {}.",
        removed.amount, removed.category, removed.date
    ));
    Ok(LoopControl::Continue)
}

fn summary(context: &ShellContext) -> CommandResult {
    let totals = if context.view_filter.is_empty() {
        context.store.summary()
    } else {
        summarize(context.current_view())
    };
    if totals.is_empty() {
        output::info("No expenses recorded.");
    } else {
        print!("{}", table::render_summary(&totals));
    }
    Ok(LoopControl::Continue)
}

fn export(context: &ShellContext, args: &[String]) -> CommandResult {
    let Some(raw_path) = args.first() else {
        return Err(CliError::Input("expected a destination path".into()));
    };
    let matches = context.current_view();
    csv_file::write_to(PathBuf::from(raw_path).as_path(), matches.iter().copied())?;
    output::success(format!(
        "Exported {} expenses to {}.",
        matches.len(),
        raw_path
    ));
    Ok(LoopControl::Continue)
}

fn path(context: &ShellContext) -> CommandResult {
    output::info(format!(
        "Tracking {} ({} expenses).",
        context.store.path().display(),
        context.store.len()
    ));
    Ok(LoopControl::Continue)
}

fn use_file(context: &mut ShellContext, args: &[String]) -> CommandResult {
    let Some(raw) = args.first() else {
        return Err(CliError::Input("expected a file path".into()));
    };
    let path = PathBuf::from(raw);
    let store = ExpenseStore::open(path.clone())?;
    context.config.data_file = Some(path);
    context.config_manager.save(&context.config)?;
    context.store = store;
    context.view.clear();
    context.view_filter = ExpenseFilter::default();
    output::success(format!(
        "Now tracking {} ({} expenses).",
        raw,
        context.store.len()
    ));
    Ok(LoopControl::Continue)
}

fn help() -> CommandResult {
    println!("Commands:");
    println!("  add [amount category date [note…]]   record an expense");
    println!("  list [category|-] [start|-] [end|-]  show (filtered) expenses");
    println!("  edit <row> [amount category date [note…]]");
    println!("  remove <row>                         delete an expense");
    println!("  summary                              totals per category");
    println!("  export <path>                        write the current view as CSV");
    println!("  path                                 show the backing file");
    println!("  use <path>                           switch the backing file");
    println!("  help, exit");
    Ok(LoopControl::Continue)
}

fn unknown(command: &str) -> CommandResult {
    let suggestion = COMMANDS
        .iter()
        .copied()
        .min_by_key(|candidate| levenshtein(command, candidate))
        .filter(|candidate| levenshtein(command, candidate) <= SUGGESTION_DISTANCE);
    match suggestion {
        Some(candidate) => output::error(format!(
            "Unknown command `{}`. Did you mean `{}`?",
            command, candidate
        )),
        None => output::error(format!(
            "Unknown command `{}`. Type `help` for the command list.",
            command
        )),
    }
    Ok(LoopControl::Continue)
}

fn require_interactive(context: &ShellContext, usage: &str) -> Result<(), CliError> {
    if context.mode == CliMode::Script {
        return Err(CliError::Input(format!("usage: {}", usage)));
    }
    Ok(())
}

fn parse_expense_args(args: &[String]) -> Result<ExpenseFormData, CliError> {
    if args.len() < 3 {
        return Err(CliError::Input(
            "expected <amount> <category> <date> [note…]".into(),
        ));
    }
    let amount = forms::parse_amount(&args[0])?;
    let category = args[1].parse()?;
    let date = forms::parse_date(&args[2])?;
    let note = args[3..].join(" ");
    Ok(ExpenseFormData {
        amount,
        category,
        date,
        note,
    })
}

/// `-` skips a position, leaving that predicate unset.
fn parse_filter_args(args: &[String]) -> Result<ExpenseFilter, CliError> {
    if args.len() > 3 {
        return Err(CliError::Input(
            "expected at most [category|-] [start|-] [end|-]".into(),
        ));
    }
    let mut filter = ExpenseFilter::default();
    if let Some(raw) = args.first().filter(|value| value.as_str() != "-") {
        filter.category = Some(raw.parse()?);
    }
    if let Some(raw) = args.get(1).filter(|value| value.as_str() != "-") {
        filter.start_date = Some(forms::parse_date(raw)?);
    }
    if let Some(raw) = args.get(2).filter(|value| value.as_str() != "-") {
        filter.end_date = Some(forms::parse_date(raw)?);
    }
    Ok(filter)
}
