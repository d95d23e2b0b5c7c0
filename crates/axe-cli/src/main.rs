//! Axe CLI - Personal budgeting with behavioral insights
//!
//! Usage:
//!   axe init                          Initialize database
//!   axe budget set 1500               Set this month's budget
//!   axe tx add 12.50 -c Food          Log a purchase
//!   axe dashboard                     This month at a glance

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let config = commands::load_config(&cli)?;
    let db_path = cli.db.clone().unwrap_or_else(|| config.db_path.clone());

    if let Commands::Init = cli.command {
        return commands::cmd_init(&db_path, cli.no_encrypt);
    }

    let db = commands::open_db(&db_path, cli.no_encrypt)?;
    let mut store = commands::open_store(db, &cli, &config)?;

    match cli.command {
        Commands::Init => Ok(()),
        Commands::Budget { action } => match action {
            BudgetAction::Set { amount } => commands::cmd_budget_set(&mut store, &config, amount),
            BudgetAction::Category { category, amount } => {
                commands::cmd_budget_category(&mut store, &config, &category, amount)
            }
            BudgetAction::Show => commands::cmd_budget_show(&store, &config),
        },
        Commands::Categories { action } => match action {
            None | Some(CategoriesAction::List) => commands::cmd_categories_list(&store),
            Some(CategoriesAction::Add { name, icon, color }) => {
                commands::cmd_categories_add(&mut store, &name, &icon, color.as_deref())
            }
            Some(CategoriesAction::Delete { category }) => {
                commands::cmd_categories_delete(&mut store, &category)
            }
        },
        Commands::Tx { action } => match action {
            None => commands::cmd_tx_list(&store, &config, 20),
            Some(TxAction::List { limit }) => commands::cmd_tx_list(&store, &config, limit),
            Some(TxAction::Add {
                amount,
                category,
                description,
                date,
            }) => commands::cmd_tx_add(
                &mut store,
                &config,
                amount,
                category.as_deref(),
                description,
                date,
            ),
            Some(TxAction::Edit {
                id,
                amount,
                description,
            }) => commands::cmd_tx_edit(&mut store, &config, id, amount, description),
            Some(TxAction::Delete { id }) => commands::cmd_tx_delete(&mut store, id),
        },
        Commands::Dashboard { json } => commands::cmd_dashboard(&store, &config, json),
        Commands::Analytics { month, year, json } => {
            commands::cmd_analytics(&store, &config, month, year, json)
        }
        Commands::Coach { json } => commands::cmd_coach(&store, json),
    }
}
