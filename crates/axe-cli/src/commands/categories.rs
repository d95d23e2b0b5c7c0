//! Category command implementations

use anyhow::Result;
use axe_core::{Action, Change, LedgerStore};

use super::resolve_category;

pub fn cmd_categories_list(store: &LedgerStore) -> Result<()> {
    let categories = &store.state().categories;

    println!();
    println!("🏷️  Categories");
    println!("   ─────────────────────────────────────────────");

    for c in categories {
        let marker = if c.is_default { "" } else { " (custom)" };
        println!("   [{:>3}] {:<22} {}{}", c.id, c.name, c.color, marker);
    }

    Ok(())
}

pub fn cmd_categories_add(
    store: &mut LedgerStore,
    name: &str,
    icon: &str,
    color: Option<&str>,
) -> Result<()> {
    let change = store.dispatch(Action::AddCategory {
        name: name.to_string(),
        icon: icon.to_string(),
        color: color.map(str::to_string),
    })?;

    if let Change::CategoryAdded(category) = change {
        println!("✅ Added category '{}' (id {})", category.name, category.id);
    }
    Ok(())
}

pub fn cmd_categories_delete(store: &mut LedgerStore, name_or_id: &str) -> Result<()> {
    let category = resolve_category(store.state(), name_or_id)?.clone();
    let orphaned = store
        .state()
        .transactions
        .iter()
        .filter(|t| t.category_id == Some(category.id))
        .count();

    store.dispatch(Action::DeleteCategory(category.id))?;

    println!("🗑️  Deleted category '{}'", category.name);
    if orphaned > 0 {
        println!("   {} transactions are now uncategorized", orphaned);
    }
    Ok(())
}
