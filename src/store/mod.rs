//! Application state: the transaction list and the savings goal, each persisted
//! under its own key after every change.

mod goal;
mod transactions;

use anyhow::Result;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::db::Storage;
use crate::models::{FinancialSummary, Transaction, TransactionType};

use goal::SavingsGoalStore;
use transactions::TransactionStore;

/// Owns the storage adapter and both stores. Every mutation is applied to a
/// copy, saved, and only then swapped in, so a failed write leaves memory
/// matching what is on disk.
pub(crate) struct Ledger {
    storage: Box<dyn Storage>,
    transactions: TransactionStore,
    goal: SavingsGoalStore,
}

impl Ledger {
    pub(crate) fn open(storage: Box<dyn Storage>) -> Self {
        let transactions = TransactionStore::load(storage.as_ref());
        let goal = SavingsGoalStore::load(storage.as_ref());
        tracing::info!(
            "Loaded {} transactions, savings goal {}",
            transactions.len(),
            goal.get()
        );
        Self {
            storage,
            transactions,
            goal,
        }
    }

    pub(crate) fn transactions(&self) -> &[Transaction] {
        self.transactions.list()
    }

    pub(crate) fn transactions_of(&self, kind: TransactionType) -> Vec<Transaction> {
        self.transactions.by_type(kind)
    }

    pub(crate) fn find(&self, id: &str) -> Option<&Transaction> {
        self.transactions.get(id)
    }

    pub(crate) fn savings_goal(&self) -> Decimal {
        self.goal.get()
    }

    /// Recomputed on every call; never cached.
    pub(crate) fn summary(&self) -> FinancialSummary {
        FinancialSummary::compute(self.transactions.list(), self.goal.get())
    }

    pub(crate) fn add_transaction(
        &mut self,
        name: String,
        amount: Decimal,
        kind: TransactionType,
        date: DateTime<Utc>,
    ) -> Result<String> {
        let mut next = self.transactions.clone();
        let id = next.add(name, amount, kind, date);
        next.save(self.storage.as_mut())?;
        self.transactions = next;
        tracing::info!("Added {kind} transaction {id} for {amount}");
        Ok(id)
    }

    /// Idempotent: removing an unknown id changes nothing and saves nothing.
    pub(crate) fn remove_transaction(&mut self, id: &str) -> Result<bool> {
        let mut next = self.transactions.clone();
        if !next.remove(id) {
            tracing::debug!("Remove ignored, no transaction {id}");
            return Ok(false);
        }
        next.save(self.storage.as_mut())?;
        self.transactions = next;
        tracing::info!("Removed transaction {id}");
        Ok(true)
    }

    pub(crate) fn set_savings_goal(&mut self, goal: Decimal) -> Result<()> {
        let mut next = self.goal;
        next.set(goal);
        next.save(self.storage.as_mut())?;
        self.goal = next;
        tracing::info!("Savings goal set to {goal}");
        Ok(())
    }
}
