//! Transaction command implementations

use anyhow::Result;
use axe_core::models::find_category;
use axe_core::{Action, Change, Config, LedgerStore};
use chrono::NaiveDate;

use super::{resolve_category, truncate};

pub fn cmd_tx_list(store: &LedgerStore, config: &Config, limit: usize) -> Result<()> {
    let state = store.state();

    if state.transactions.is_empty() {
        println!("No transactions yet. Log one with:");
        println!("  axe tx add 12.50 -c \"Food & Dining\"");
        return Ok(());
    }

    println!();
    println!("📝 Transactions");
    println!("   ─────────────────────────────────────────────────────────────");

    for tx in state.transactions.iter().take(limit) {
        let category = find_category(&state.categories, tx.category_id)
            .map(|c| c.name.as_str())
            .unwrap_or("Uncategorized");
        println!(
            "   [{:>4}] {} │ {:>10} │ {:<18} │ {}",
            tx.id,
            tx.date,
            config.format_money(tx.amount),
            truncate(category, 18),
            truncate(&tx.display_title(&state.categories), 30)
        );
    }

    if state.transactions.len() > limit {
        println!();
        println!(
            "   ... and {} more (use --limit)",
            state.transactions.len() - limit
        );
    }

    Ok(())
}

pub fn cmd_tx_add(
    store: &mut LedgerStore,
    config: &Config,
    amount: f64,
    category: Option<&str>,
    description: Option<String>,
    date: Option<NaiveDate>,
) -> Result<()> {
    let category_id = match category {
        Some(name_or_id) => Some(resolve_category(store.state(), name_or_id)?.id),
        None => None,
    };

    let change = store.dispatch(Action::AddTransaction {
        category_id,
        amount,
        description,
        date,
    })?;

    if let Change::TransactionAdded(tx) = change {
        println!(
            "✅ Logged {} on {} (id {})",
            config.format_money(tx.amount),
            tx.date,
            tx.id
        );
    }

    let dashboard = store.snapshot();
    if dashboard.summary.has_budget() {
        println!(
            "   {} left this month, {} safe to spend today",
            config.format_money(dashboard.summary.remaining),
            config.format_money(dashboard.safe_to_spend_today)
        );
    }
    Ok(())
}

pub fn cmd_tx_edit(
    store: &mut LedgerStore,
    config: &Config,
    id: i64,
    amount: Option<f64>,
    description: Option<String>,
) -> Result<()> {
    if amount.is_none() && description.is_none() {
        anyhow::bail!("Nothing to change. Pass --amount and/or --description.");
    }

    let change = store.dispatch(Action::UpdateTransaction {
        id,
        amount,
        description,
    })?;

    if let Change::TransactionUpdated(tx) = change {
        println!(
            "✅ Updated transaction {}: {} │ {}",
            tx.id,
            config.format_money(tx.amount),
            tx.display_title(&store.state().categories)
        );
    }
    Ok(())
}

pub fn cmd_tx_delete(store: &mut LedgerStore, id: i64) -> Result<()> {
    store.dispatch(Action::DeleteTransaction(id))?;
    println!("🗑️  Deleted transaction {}", id);
    Ok(())
}
