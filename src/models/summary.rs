use rust_decimal::Decimal;

use super::transaction::{Transaction, TransactionType};

/// Where the month stands once the savings goal is taken into account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Spending exceeds income.
    Deficit,
    /// Solvent, but the balance does not cover the savings goal.
    Danger,
    /// Balance covers the goal exactly.
    Balanced,
    /// Money left over after the goal.
    Surplus,
}

impl Status {
    /// Classify from balance and remaining-after-savings. First match wins:
    /// a negative balance is always a deficit, whatever the goal says.
    pub fn classify(balance: Decimal, remaining_after_savings: Decimal) -> Self {
        if balance < Decimal::ZERO {
            Self::Deficit
        } else if remaining_after_savings < Decimal::ZERO {
            Self::Danger
        } else if remaining_after_savings > Decimal::ZERO {
            Self::Surplus
        } else {
            Self::Balanced
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Deficit => "deficit",
            Self::Danger => "danger",
            Self::Balanced => "balanced",
            Self::Surplus => "surplus",
        }
    }

    pub fn headline(&self) -> &'static str {
        match self {
            Self::Deficit => "Budget Deficit",
            Self::Danger => "Savings Alert",
            Self::Balanced => "Balanced Budget",
            Self::Surplus => "Finances OK",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FinancialSummary {
    pub total_income: Decimal,
    pub total_fixed_expense: Decimal,
    pub total_variable_expense: Decimal,
    pub total_expense: Decimal,
    pub balance: Decimal,
    pub savings_goal: Decimal,
    pub remaining_after_savings: Decimal,
    pub status: Status,
}

impl FinancialSummary {
    /// Single pass over the transactions. Order does not matter. Totals
    /// saturate instead of overflowing, so stored data can never make this panic.
    pub fn compute(transactions: &[Transaction], savings_goal: Decimal) -> Self {
        let mut total_income = Decimal::ZERO;
        let mut total_fixed_expense = Decimal::ZERO;
        let mut total_variable_expense = Decimal::ZERO;

        for txn in transactions {
            match txn.kind {
                TransactionType::Income => {
                    total_income = total_income.saturating_add(txn.amount)
                }
                TransactionType::FixedExpense => {
                    total_fixed_expense = total_fixed_expense.saturating_add(txn.amount)
                }
                TransactionType::VariableExpense => {
                    total_variable_expense = total_variable_expense.saturating_add(txn.amount)
                }
            }
        }

        let total_expense = total_fixed_expense.saturating_add(total_variable_expense);
        let balance = total_income.saturating_sub(total_expense);
        let remaining_after_savings = balance.saturating_sub(savings_goal);

        Self {
            total_income,
            total_fixed_expense,
            total_variable_expense,
            total_expense,
            balance,
            savings_goal,
            remaining_after_savings,
            status: Status::classify(balance, remaining_after_savings),
        }
    }

    pub fn total_for(&self, kind: TransactionType) -> Decimal {
        match kind {
            TransactionType::Income => self.total_income,
            TransactionType::FixedExpense => self.total_fixed_expense,
            TransactionType::VariableExpense => self.total_variable_expense,
        }
    }

    /// Slices for the composition chart, zero-valued ones left out.
    pub fn composition(&self) -> Vec<(TransactionType, Decimal)> {
        TransactionType::all()
            .iter()
            .map(|k| (*k, self.total_for(*k)))
            .filter(|(_, v)| *v > Decimal::ZERO)
            .collect()
    }

    /// How much of the goal the balance covers, as a percentage in `0..=100`.
    /// A zero goal is measured against 1 so any positive balance fills the bar.
    /// A ratio too large to represent counts as full.
    pub fn goal_progress(&self) -> Decimal {
        if self.balance <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        let goal = if self.savings_goal.is_zero() {
            Decimal::ONE
        } else {
            self.savings_goal
        };
        self.balance
            .checked_div(goal)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .map_or(Decimal::ONE_HUNDRED, |pct| pct.min(Decimal::ONE_HUNDRED))
    }
}
