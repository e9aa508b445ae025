//! The command-line shell for expenseur_rs.
//!
//! All of the actual logic lives in the library; this binary parses
//! arguments, calls the core, and prints results.

use std::{fs::File, path::PathBuf, process::ExitCode};

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use expenseur_rs::{
    Config, Error,
    models::{CategoryName, DatabaseID, ExpenseUpdate, UserID, parse_amount, parse_date},
    stores::{
        CategoryMatch, ExpenseQuery, SortOrder,
        flat_file::{FlatFileAppState, create_app_state},
    },
};

/// Track expenses for one or more users in flat CSV files.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory where the user and expense files are kept.
    #[arg(long, default_value = ".")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Register a new user.
    AddUser {
        /// The display name of the new user.
        name: String,
    },
    /// Record a new expense.
    AddExpense {
        /// The ID of the user the expense belongs to.
        user_id: i64,
        /// The amount spent, e.g. "12.50" (negative for refunds).
        amount: String,
        /// The category label, e.g. "Food".
        category: String,
        /// The date of the expense, YYYY-MM-DD.
        date: String,
        /// What the expense was for.
        #[arg(default_value = "")]
        description: String,
    },
    /// List expenses, optionally filtered.
    List {
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Change fields of an existing expense.
    UpdateExpense {
        /// The ID of the expense to change.
        id: DatabaseID,
        /// The new amount.
        #[arg(long)]
        amount: Option<String>,
        /// The new date, YYYY-MM-DD.
        #[arg(long)]
        date: Option<String>,
        /// The new category label.
        #[arg(long)]
        category: Option<String>,
        /// The new description.
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete an expense by ID.
    DeleteExpense {
        /// The ID of the expense to delete.
        id: DatabaseID,
    },
    /// Print the total plus category and month breakdowns.
    Summary {
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Write the matching expenses to a CSV file.
    Export {
        #[command(flatten)]
        filter: FilterArgs,

        /// The file to write.
        #[arg(long)]
        output: PathBuf,
    },
}

/// Filters shared by the read-only commands.
#[derive(clap::Args, Debug)]
struct FilterArgs {
    /// Only expenses belonging to this user ID.
    #[arg(long)]
    user: Option<i64>,

    /// Only expenses on or after this date (YYYY-MM-DD).
    #[arg(long)]
    from: Option<String>,

    /// Only expenses on or before this date (YYYY-MM-DD).
    #[arg(long)]
    to: Option<String>,

    /// Only expenses whose category equals this label exactly.
    #[arg(long, conflicts_with = "category_like")]
    category: Option<String>,

    /// Only expenses whose category contains this text (case-insensitive).
    #[arg(long)]
    category_like: Option<String>,

    /// Sort by date, oldest first, instead of insertion order.
    #[arg(long)]
    by_date: bool,
}

impl FilterArgs {
    fn into_query(self) -> Result<ExpenseQuery, Error> {
        Ok(ExpenseQuery {
            user_id: self.user.map(UserID::new),
            date_from: self.from.as_deref().map(parse_date).transpose()?,
            date_to: self.to.as_deref().map(parse_date).transpose()?,
            category: match (self.category, self.category_like) {
                (Some(name), _) => Some(CategoryMatch::Exact(CategoryName::new(&name)?)),
                (None, Some(pattern)) => Some(CategoryMatch::Contains(pattern)),
                (None, None) => None,
            },
            sort_date: self.by_date.then_some(SortOrder::Ascending),
        })
    }
}

fn main() -> ExitCode {
    setup_logging();

    let args = Args::parse();
    let mut state = create_app_state(&Config::new(args.data_dir));

    match run(args.command, &mut state) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}

fn setup_logging() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().pretty())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

fn run(command: Command, state: &mut FlatFileAppState) -> Result<(), Error> {
    match command {
        Command::AddUser { name } => {
            let user = state.add_user(&name)?;
            println!("created user \"{}\" with ID {}", user.name(), user.id());
        }
        Command::AddExpense {
            user_id,
            amount,
            category,
            date,
            description,
        } => {
            let expense =
                state.add_expense(UserID::new(user_id), &amount, &category, &date, &description)?;
            println!("recorded expense {}", expense.id());
        }
        Command::List { filter } => {
            let expenses = state.list_expenses(&filter.into_query()?)?;

            for expense in &expenses {
                println!(
                    "{:>6}  {}  {:>12}  {}  {}",
                    expense.id(),
                    expense.date(),
                    expense.amount(),
                    expense.category(),
                    expense.description()
                );
            }
            println!("{} expense(s)", expenses.len());
        }
        Command::UpdateExpense {
            id,
            amount,
            date,
            category,
            description,
        } => {
            let update = ExpenseUpdate {
                amount: amount.as_deref().map(parse_amount).transpose()?,
                date: date.as_deref().map(parse_date).transpose()?,
                category: category.as_deref().map(CategoryName::new).transpose()?,
                description,
            };

            let expense = state.update_expense(id, update)?;
            println!("updated expense {}", expense.id());
        }
        Command::DeleteExpense { id } => {
            if state.delete_expense(id)? {
                println!("deleted expense {id}");
            } else {
                println!("no expense with ID {id}");
            }
        }
        Command::Summary { filter } => {
            let summary = state.summary(&filter.into_query()?)?;

            println!("total: {}", summary.total);

            let mut by_category: Vec<_> = summary.by_category.into_iter().collect();
            by_category.sort();
            println!("by category:");
            for (category, total) in by_category {
                println!("  {category}: {total}");
            }

            let mut by_month: Vec<_> = summary.by_month.into_iter().collect();
            by_month.sort();
            println!("by month:");
            for (month, total) in by_month {
                println!("  {month}: {total}");
            }
        }
        Command::Export { filter, output } => {
            let file = File::create(&output)?;
            let exported = state.export_expenses(&filter.into_query()?, file)?;
            println!("wrote {exported} expense(s) to {}", output.display());
        }
    }

    Ok(())
}
