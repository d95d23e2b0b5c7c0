//! Ledger state container
//!
//! [`LedgerStore`] owns the in-memory ledger for one user. Every change goes
//! through [`LedgerStore::dispatch`]: the action is persisted first, then
//! applied to the state, then a freshly computed [`Dashboard`] is published
//! to subscribers. Views never mutate the ledger directly.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::analytics::AnalyticsReport;
use crate::clock::Clock;
use crate::dashboard::Dashboard;
use crate::db::Database;
use crate::error::{Error, Result};
use crate::models::{BudgetAllocation, Category, NewCategory, NewTransaction, Transaction};
use crate::period::Period;

/// Everything the aggregation engine needs for one user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerState {
    pub user_id: i64,
    pub categories: Vec<Category>,
    pub allocations: Vec<BudgetAllocation>,
    /// Newest first
    pub transactions: Vec<Transaction>,
}

impl LedgerState {
    pub fn transaction(&self, id: i64) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    pub fn category(&self, id: i64) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Budgets saved for a period
    pub fn allocations_for(&self, period: Period) -> Vec<&BudgetAllocation> {
        self.allocations
            .iter()
            .filter(|a| a.period == period)
            .collect()
    }

    fn apply(&mut self, change: &Change) {
        match change {
            Change::TransactionAdded(tx) | Change::TransactionUpdated(tx) => {
                self.transactions.retain(|t| t.id != tx.id);
                self.transactions.push(tx.clone());
                self.transactions
                    .sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id)));
            }
            Change::TransactionDeleted(id) => {
                self.transactions.retain(|t| t.id != *id);
            }
            Change::BudgetSaved(budget) => {
                self.allocations.retain(|a| {
                    !(a.category_id == budget.category_id && a.period == budget.period)
                });
                self.allocations.push(budget.clone());
            }
            Change::CategoryAdded(category) => {
                self.categories.push(category.clone());
            }
            Change::CategoryDeleted(id) => {
                self.categories.retain(|c| c.id != *id);
                self.allocations.retain(|a| a.category_id != Some(*id));
            }
        }
    }
}

/// A requested change to the ledger
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Log a purchase; `date` defaults to today
    AddTransaction {
        category_id: Option<i64>,
        amount: f64,
        description: Option<String>,
        date: Option<NaiveDate>,
    },
    /// `None` fields are left unchanged
    UpdateTransaction {
        id: i64,
        amount: Option<f64>,
        description: Option<String>,
    },
    DeleteTransaction(i64),
    /// Overall budget for the current month
    SetBudget { amount: f64 },
    /// Category budget for the current month
    SetCategoryBudget { category_id: i64, amount: f64 },
    AddCategory {
        name: String,
        icon: String,
        color: Option<String>,
    },
    DeleteCategory(i64),
}

/// What a dispatched action changed
#[derive(Debug, Clone, PartialEq)]
pub enum Change {
    TransactionAdded(Transaction),
    TransactionUpdated(Transaction),
    TransactionDeleted(i64),
    BudgetSaved(BudgetAllocation),
    CategoryAdded(Category),
    CategoryDeleted(i64),
}

/// Owns one user's ledger and publishes dashboards after every change
pub struct LedgerStore {
    db: Database,
    clock: Arc<dyn Clock>,
    state: LedgerState,
    dashboard: watch::Sender<Arc<Dashboard>>,
}

impl LedgerStore {
    /// Load a user's ledger, seeding the default categories on first use
    pub fn load(db: Database, clock: Arc<dyn Clock>, user_id: i64) -> Result<Self> {
        db.seed_default_categories()?;
        let state = db.load_state(user_id)?;
        let dashboard = Arc::new(Dashboard::build(&state, clock.today()));
        let (sender, _) = watch::channel(dashboard);

        tracing::debug!(
            user_id,
            transactions = state.transactions.len(),
            "Loaded ledger"
        );

        Ok(Self {
            db,
            clock,
            state,
            dashboard: sender,
        })
    }

    pub fn state(&self) -> &LedgerState {
        &self.state
    }

    pub fn db(&self) -> &Database {
        &self.db
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Receive a new dashboard after every change
    pub fn subscribe(&self) -> watch::Receiver<Arc<Dashboard>> {
        self.dashboard.subscribe()
    }

    /// The most recently published dashboard
    pub fn snapshot(&self) -> Arc<Dashboard> {
        self.dashboard.borrow().clone()
    }

    /// Analytics for any month, computed from the current state
    pub fn analytics(&self, period: Period, window_days: u32) -> AnalyticsReport {
        AnalyticsReport::build(&self.state, period, self.today(), window_days)
    }

    /// Reload the ledger from the database and republish
    pub fn refresh(&mut self) -> Result<()> {
        self.state = self.db.load_state(self.state.user_id)?;
        self.publish();
        Ok(())
    }

    /// Persist an action, apply it and publish the new dashboard
    ///
    /// When persisting fails the error is returned and neither the state
    /// nor the published dashboard change.
    pub fn dispatch(&mut self, action: Action) -> Result<Change> {
        let change = self.persist(action)?;
        self.state.apply(&change);
        self.publish();
        Ok(change)
    }

    fn persist(&self, action: Action) -> Result<Change> {
        let user_id = self.state.user_id;
        let period = Period::current(self.today());

        let change = match action {
            Action::AddTransaction {
                category_id,
                amount,
                description,
                date,
            } => {
                let tx = self.db.insert_transaction(&NewTransaction {
                    user_id,
                    category_id,
                    amount,
                    description,
                    date: date.unwrap_or_else(|| self.today()),
                })?;
                Change::TransactionAdded(tx)
            }
            Action::UpdateTransaction {
                id,
                amount,
                description,
            } => {
                self.owned_transaction(id)?;
                let tx = self
                    .db
                    .update_transaction(id, amount, description.as_deref())?;
                Change::TransactionUpdated(tx)
            }
            Action::DeleteTransaction(id) => {
                self.owned_transaction(id)?;
                self.db.delete_transaction(id)?;
                Change::TransactionDeleted(id)
            }
            Action::SetBudget { amount } => {
                Change::BudgetSaved(self.db.save_budget(user_id, None, period, amount)?)
            }
            Action::SetCategoryBudget {
                category_id,
                amount,
            } => Change::BudgetSaved(self.db.save_budget(
                user_id,
                Some(category_id),
                period,
                amount,
            )?),
            Action::AddCategory { name, icon, color } => {
                Change::CategoryAdded(self.db.add_category(&NewCategory { name, icon, color })?)
            }
            Action::DeleteCategory(id) => {
                self.db.delete_category(id)?;
                Change::CategoryDeleted(id)
            }
        };

        Ok(change)
    }

    /// Transactions of other users are invisible to this store
    fn owned_transaction(&self, id: i64) -> Result<&Transaction> {
        self.state
            .transaction(id)
            .ok_or_else(|| Error::NotFound(format!("Transaction {}", id)))
    }

    fn publish(&self) {
        let dashboard = Dashboard::build(&self.state, self.today());
        tracing::debug!(
            total_spent = dashboard.summary.total_spent,
            remaining = dashboard.summary.remaining,
            "Publishing dashboard"
        );
        self.dashboard.send_replace(Arc::new(dashboard));
    }
}
