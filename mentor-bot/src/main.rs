use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use mentor_core::Engine;
use mentor_store::JsonStore;
use tracing_subscriber::EnvFilter;

mod chat;
mod config;
mod export;
mod serve;
mod state;
mod summary_job;
mod telegram;

#[derive(Parser, Debug)]
#[command(name = "mentor", version, about = "Conversational finance mentor bot")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the default config to ~/.mentor/config.toml
    Init,

    /// Run the Telegram bot (long polling) with the weekly summary job
    Serve,

    /// Talk to the engine locally without Telegram
    Chat {
        /// User id for the local ledger
        #[arg(long, default_value_t = 0)]
        user: i64,
    },

    /// Print the weekly summary for a user
    Summary {
        #[arg(long)]
        user: i64,
    },

    /// Print the current balance for a user
    Balance {
        #[arg(long)]
        user: i64,
    },

    /// Budget administration
    Budget {
        #[command(subcommand)]
        command: BudgetCommand,
    },

    /// Goal administration
    Goal {
        #[command(subcommand)]
        command: GoalCommand,
    },

    /// Export a user's transactions to CSV
    Export {
        #[arg(long)]
        user: i64,

        /// Output file path
        #[arg(long)]
        out: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
enum BudgetCommand {
    /// Create or update a category budget
    Set {
        #[arg(long)]
        user: i64,
        category: String,
        amount: f64,
    },

    /// Delete a category budget
    Unset {
        #[arg(long)]
        user: i64,
        category: String,
    },

    /// List budgets
    List {
        #[arg(long)]
        user: i64,
    },
}

#[derive(Subcommand, Debug)]
enum GoalCommand {
    /// Create a goal with a target amount (resets existing progress)
    Set {
        #[arg(long)]
        user: i64,
        name: String,
        target: f64,
    },

    /// Delete a goal
    Unset {
        #[arg(long)]
        user: i64,
        name: String,
    },

    /// List goals with progress
    List {
        #[arg(long)]
        user: i64,
    },
}

fn open_store() -> Result<JsonStore> {
    JsonStore::open(state::default_store_path()?)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Init => {
            config::init_config()?;
        }

        Command::Serve => {
            let cfg = config::load_config()?;
            serve::serve(cfg).await?;
        }

        Command::Chat { user } => {
            let store = open_store()?;
            let engine = Engine::with_defaults()?;
            chat::run(&engine, &store, user)?;
        }

        Command::Summary { user } => {
            let store = open_store()?;
            let engine = Engine::with_defaults()?;
            println!("{}", engine.weekly_summary_text(&store, user)?);
        }

        Command::Balance { user } => {
            let store = open_store()?;
            let engine = Engine::with_defaults()?;
            println!("{}", engine.balance_text(&store, user)?);
        }

        Command::Budget { command } => {
            let store = open_store()?;
            let engine = Engine::with_defaults()?;
            run_budget_command(&engine, &store, command)?;
        }

        Command::Goal { command } => {
            let store = open_store()?;
            let engine = Engine::with_defaults()?;
            run_goal_command(&engine, &store, command)?;
        }

        Command::Export { user, out } => {
            let store = open_store()?;
            let rows = export::export_csv(&store, user, &out)?;
            println!("Exported {} transactions to {}", rows, out.display());
        }
    }

    Ok(())
}

fn run_budget_command(
    engine: &Engine,
    store: &dyn mentor_core::Store,
    command: BudgetCommand,
) -> Result<()> {
    match command {
        BudgetCommand::Set {
            user,
            category,
            amount,
        } => {
            let budget = store.set_budget(user, &category, amount)?;
            println!(
                "Budget set: {} = {}",
                budget.category,
                engine.replies().money(budget.amount)
            );
        }
        BudgetCommand::Unset { user, category } => {
            if store.remove_budget(user, &category)? {
                println!("Budget removed: {category}");
            } else {
                println!("No budget for: {category}");
            }
        }
        BudgetCommand::List { user } => {
            let budgets = store.budgets(user)?;
            if budgets.is_empty() {
                println!("No budgets set.");
            }
            for b in budgets {
                println!("{}: {}", b.category, engine.replies().money(b.amount));
            }
        }
    }
    Ok(())
}

fn run_goal_command(
    engine: &Engine,
    store: &dyn mentor_core::Store,
    command: GoalCommand,
) -> Result<()> {
    match command {
        GoalCommand::Set { user, name, target } => {
            let goal = store.set_goal(user, &name, target)?;
            println!(
                "Goal set: {} with target {}",
                goal.name,
                engine.replies().money(goal.target_amount)
            );
        }
        GoalCommand::Unset { user, name } => {
            if store.remove_goal(user, &name)? {
                println!("Goal removed: {name}");
            } else {
                println!("No goal named: {name}");
            }
        }
        GoalCommand::List { user } => {
            let goals = store.goals(user)?;
            if goals.is_empty() {
                println!("No goals set.");
            }
            for g in goals {
                println!(
                    "{}: {} of {}",
                    g.name,
                    engine.replies().money(g.current_amount),
                    engine.replies().money(g.target_amount)
                );
            }
        }
    }
    Ok(())
}
