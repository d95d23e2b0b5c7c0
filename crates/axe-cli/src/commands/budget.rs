//! Budget command implementations

use anyhow::Result;
use axe_core::{Action, Config, LedgerStore, Period};

use super::{progress_bar, resolve_category};

pub fn cmd_budget_set(store: &mut LedgerStore, config: &Config, amount: f64) -> Result<()> {
    store.dispatch(Action::SetBudget { amount })?;

    let period = Period::current(store.today());
    println!(
        "✅ Budget for {} set to {}",
        period,
        config.format_money(amount)
    );
    Ok(())
}

pub fn cmd_budget_category(
    store: &mut LedgerStore,
    config: &Config,
    category: &str,
    amount: f64,
) -> Result<()> {
    let category = resolve_category(store.state(), category)?.clone();
    store.dispatch(Action::SetCategoryBudget {
        category_id: category.id,
        amount,
    })?;

    println!(
        "✅ {} budget set to {}",
        category.name,
        config.format_money(amount)
    );

    let dashboard = store.snapshot();
    if dashboard.allocation.is_over_allocated {
        println!(
            "   ⚠️  Categories now total {}, more than the {} budget",
            config.format_money(dashboard.allocation.allocated),
            config.format_money(dashboard.allocation.total_budget)
        );
    }
    Ok(())
}

pub fn cmd_budget_show(store: &LedgerStore, config: &Config) -> Result<()> {
    let dashboard = store.snapshot();
    let summary = &dashboard.summary;

    println!();
    println!("💰 Budget for {}", dashboard.period);
    println!("   ─────────────────────────────────────────────");

    if !summary.has_budget() {
        println!("   No budget set. Set one with:");
        println!("     axe budget set 1500");
        return Ok(());
    }

    println!(
        "   Total:       {}",
        config.format_money(summary.total_budget)
    );
    println!(
        "   Spent:       {} {}",
        config.format_money(summary.total_spent),
        progress_bar(summary.progress, 20)
    );
    println!("   Remaining:   {}", config.format_money(summary.remaining));

    let allocation = &dashboard.allocation;
    println!();
    println!(
        "   Allocated:   {} ({:.0}%)",
        config.format_money(allocation.allocated),
        allocation.allocation_progress * 100.0
    );
    println!(
        "   Unallocated: {}",
        config.format_money(allocation.unallocated)
    );
    if allocation.is_over_allocated {
        println!("   ⚠️  Category budgets exceed the overall budget");
    }

    let budgeted: Vec<_> = summary
        .per_category
        .iter()
        .filter(|c| c.budget > 0.0)
        .collect();
    if !budgeted.is_empty() {
        println!();
        for c in budgeted {
            println!(
                "   {:<20} {:>10} / {:<10} {}",
                c.name,
                config.format_money(c.spent),
                config.format_money(c.budget),
                progress_bar(c.progress, 10)
            );
        }
    }

    Ok(())
}
