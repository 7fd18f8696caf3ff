// Thin CLI shell around the ledger core. All invariants live in the
// library; this binary only parses arguments and prints results.

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use expense_ledger::{
    by_category, by_recent_window, filter_expenses, CategoryStore, Database, ExpenseFilter,
    ExpenseStore, DEFAULT_WINDOW_DAYS,
};
use std::env;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let Some(command) = args.first() else {
        print_usage();
        return Ok(());
    };

    let db_path = env::var("EXPENSE_DB").unwrap_or_else(|_| "expenses.db".to_string());
    let db = Database::open(&db_path).with_context(|| format!("opening {db_path}"))?;

    match command.as_str() {
        "categories" => list_categories(&db),
        "add-category" => add_category(&db, &args[1..]),
        "delete-category" => delete_category(&db, &args[1..]),
        "add" => add_expense(&db, &args[1..]),
        "delete" => delete_expenses(&db, &args[1..]),
        "list" => list_expenses(&db, &args[1..]),
        "summary" => summary(&db, &args[1..]),
        "export" => export(&db),
        other => {
            print_usage();
            bail!("unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("expense-ledger {}", expense_ledger::VERSION);
    println!();
    println!("Usage (database path taken from EXPENSE_DB, default ./expenses.db):");
    println!("  expense-ledger categories");
    println!("  expense-ledger add-category <name>");
    println!("  expense-ledger delete-category <id>");
    println!("  expense-ledger add <amount> <category> <YYYY-MM-DD> [note]");
    println!("  expense-ledger delete <id>...");
    println!("  expense-ledger list [--category NAME] [--from DATE] [--to DATE] [--note TEXT]");
    println!("  expense-ledger summary [window-days]");
    println!("  expense-ledger export");
}

fn list_categories(db: &Database) -> Result<()> {
    for category in CategoryStore::new(db).list_categories()? {
        println!("{:>4}  {}", category.id, category.name);
    }
    Ok(())
}

fn add_category(db: &Database, args: &[String]) -> Result<()> {
    let [name] = args else {
        bail!("usage: add-category <name>");
    };
    let category = CategoryStore::new(db).add_category(name)?;
    println!("{:>4}  {}", category.id, category.name);
    Ok(())
}

fn delete_category(db: &Database, args: &[String]) -> Result<()> {
    let [id] = args else {
        bail!("usage: delete-category <id>");
    };
    let id: i64 = id.parse().context("category id must be an integer")?;
    CategoryStore::new(db).delete_category(id)?;
    Ok(())
}

fn add_expense(db: &Database, args: &[String]) -> Result<()> {
    let (amount, category, date, note) = match args {
        [amount, category, date] => (amount, category, date, ""),
        [amount, category, date, note] => (amount, category, date, note.as_str()),
        _ => bail!("usage: add <amount> <category> <YYYY-MM-DD> [note]"),
    };
    let date: NaiveDate = date.parse().context("date must be YYYY-MM-DD")?;

    let expense = ExpenseStore::new(db).add_expense(amount, category, date, note)?;
    println!("added expense {}", expense.id);
    Ok(())
}

fn delete_expenses(db: &Database, args: &[String]) -> Result<()> {
    if args.is_empty() {
        bail!("usage: delete <id>...");
    }
    let ids = args
        .iter()
        .map(|arg| arg.parse::<i64>().context("expense id must be an integer"))
        .collect::<Result<Vec<_>>>()?;

    ExpenseStore::new(db).delete_expenses(&ids)?;
    println!("deleted {} expense(s)", ids.len());
    Ok(())
}

fn list_expenses(db: &Database, args: &[String]) -> Result<()> {
    let mut filter = ExpenseFilter::all(NaiveDate::MIN, NaiveDate::MAX);
    let mut args = args.iter();
    while let Some(flag) = args.next() {
        let value = args
            .next()
            .with_context(|| format!("missing value for {flag}"))?;
        match flag.as_str() {
            "--category" => filter.category = Some(value.clone()),
            "--from" => filter.date_from = value.parse().context("--from must be YYYY-MM-DD")?,
            "--to" => filter.date_to = value.parse().context("--to must be YYYY-MM-DD")?,
            "--note" => filter.note = value.clone(),
            other => bail!("unknown flag: {other}"),
        }
    }

    // Load a fresh snapshot, then narrow it in memory.
    let rows = ExpenseStore::new(db).list_expenses()?;
    for row in filter_expenses(&rows, &filter) {
        println!(
            "{:>4}  {:>10.2}  {:<16}  {}  {}",
            row.id, row.amount, row.category, row.date, row.note
        );
    }
    Ok(())
}

fn summary(db: &Database, args: &[String]) -> Result<()> {
    let window_days = match args {
        [] => DEFAULT_WINDOW_DAYS,
        [days] => days.parse().context("window-days must be an integer")?,
        _ => bail!("usage: summary [window-days]"),
    };

    let rows = ExpenseStore::new(db).list_expenses()?;

    println!("By category:");
    let mut totals: Vec<(String, f64)> = by_category(&rows).into_iter().collect();
    totals.sort_by(|a, b| a.0.cmp(&b.0));
    for (name, total) in totals {
        println!("  {:<16}  {:>10.2}", name, total);
    }

    let today = Local::now().date_naive();
    println!("Last {window_days} days:");
    for (date, total) in by_recent_window(&rows, today, window_days) {
        println!("  {date}  {:>10.2}", total);
    }
    Ok(())
}

fn export(db: &Database) -> Result<()> {
    let rows = ExpenseStore::new(db).list_expenses()?;
    println!("{}", serde_json::to_string_pretty(&rows)?);
    Ok(())
}
