use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::db::Storage;
use crate::models::{Transaction, TransactionType};

pub(crate) const TRANSACTIONS_KEY: &str = "saldoFixo_transactions";

/// Ordered transaction list, newest first.
#[derive(Debug, Clone, Default)]
pub(crate) struct TransactionStore {
    items: Vec<Transaction>,
}

impl TransactionStore {
    /// Load the persisted list. A missing or unreadable value yields an empty
    /// store; individual records that fail to decode are skipped.
    pub(crate) fn load(storage: &dyn Storage) -> Self {
        let raw = match storage.get_item(TRANSACTIONS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Self::default(),
            Err(e) => {
                tracing::warn!("Could not read transactions, starting empty: {e:#}");
                return Self::default();
            }
        };
        Self {
            items: decode_list(&raw),
        }
    }

    pub(crate) fn save(&self, storage: &mut dyn Storage) -> Result<()> {
        let raw = serde_json::to_string(&self.items).context("Failed to serialize transactions")?;
        storage.set_item(TRANSACTIONS_KEY, &raw)
    }

    /// Insert a new record at the front and return its id. Name and amount are
    /// validated by the caller.
    pub(crate) fn add(
        &mut self,
        name: String,
        amount: Decimal,
        kind: TransactionType,
        date: DateTime<Utc>,
    ) -> String {
        let txn = Transaction::new(name, amount, kind, date);
        let id = txn.id.clone();
        self.items.insert(0, txn);
        id
    }

    /// Remove by id. Returns `false` when no record had that id.
    pub(crate) fn remove(&mut self, id: &str) -> bool {
        match self.items.iter().position(|t| t.id == id) {
            Some(idx) => {
                self.items.remove(idx);
                true
            }
            None => false,
        }
    }

    pub(crate) fn list(&self) -> &[Transaction] {
        &self.items
    }

    pub(crate) fn by_type(&self, kind: TransactionType) -> Vec<Transaction> {
        self.items.iter().filter(|t| t.kind == kind).cloned().collect()
    }

    pub(crate) fn get(&self, id: &str) -> Option<&Transaction> {
        self.items.iter().find(|t| t.id == id)
    }

    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }
}

fn decode_list(raw: &str) -> Vec<Transaction> {
    let values: Vec<serde_json::Value> = match serde_json::from_str(raw) {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!("Stored transactions are not a JSON array, starting empty: {e}");
            return Vec::new();
        }
    };

    let total = values.len();
    let items: Vec<Transaction> = values
        .into_iter()
        .filter_map(|value| match serde_json::from_value::<Transaction>(value) {
            Ok(txn) if txn.amount > Decimal::ZERO && !txn.name.trim().is_empty() => Some(txn),
            Ok(txn) => {
                tracing::warn!("Skipping invalid stored transaction {}", txn.id);
                None
            }
            Err(e) => {
                tracing::warn!("Skipping unreadable stored transaction: {e}");
                None
            }
        })
        .collect();

    if items.len() < total {
        tracing::warn!("Loaded {} of {total} stored transactions", items.len());
    }
    items
}
