use anyhow::Result;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::db::Storage;

pub(crate) const SAVINGS_KEY: &str = "saldoFixo_savings";

/// The monthly savings target. Stored as a plain numeric string.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct SavingsGoalStore {
    goal: Decimal,
}

impl SavingsGoalStore {
    pub(crate) fn load(storage: &dyn Storage) -> Self {
        let goal = match storage.get_item(SAVINGS_KEY) {
            Ok(Some(raw)) => match Decimal::from_str(raw.trim()) {
                Ok(g) if g >= Decimal::ZERO => g,
                _ => {
                    tracing::warn!("Ignoring stored savings goal '{raw}'");
                    Decimal::ZERO
                }
            },
            Ok(None) => Decimal::ZERO,
            Err(e) => {
                tracing::warn!("Could not read savings goal, using zero: {e:#}");
                Decimal::ZERO
            }
        };
        Self { goal }
    }

    pub(crate) fn save(&self, storage: &mut dyn Storage) -> Result<()> {
        storage.set_item(SAVINGS_KEY, &self.goal.normalize().to_string())
    }

    pub(crate) fn get(&self) -> Decimal {
        self.goal
    }

    /// Replace the goal. Negative values are rejected at the input boundary.
    pub(crate) fn set(&mut self, goal: Decimal) {
        self.goal = goal;
    }
}
