use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Income,
    /// Older data files only knew `income` and `expense`; those expenses were the
    /// recurring monthly outflows, so they load as fixed.
    #[serde(alias = "expense")]
    FixedExpense,
    VariableExpense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::FixedExpense => "Fixed",
            Self::VariableExpense => "Variable",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "income" | "in" | "i" => Some(Self::Income),
            "fixed" | "fixed_expense" | "fixed-expense" | "f" => Some(Self::FixedExpense),
            "variable" | "variable_expense" | "variable-expense" | "v" => {
                Some(Self::VariableExpense)
            }
            _ => None,
        }
    }

    pub fn all() -> &'static [TransactionType] {
        &[Self::Income, Self::FixedExpense, Self::VariableExpense]
    }

    pub fn is_expense(&self) -> bool {
        !matches!(self, Self::Income)
    }

    /// Cycle to the next type, used by the add form.
    pub fn next(&self) -> Self {
        match self {
            Self::Income => Self::FixedExpense,
            Self::FixedExpense => Self::VariableExpense,
            Self::VariableExpense => Self::Income,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Self::Income => Self::VariableExpense,
            Self::FixedExpense => Self::Income,
            Self::VariableExpense => Self::FixedExpense,
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub name: String,
    /// Always positive; the direction comes from `kind`. Written as an exact
    /// JSON number, never through `f64`.
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
}

impl Transaction {
    pub fn new(name: String, amount: Decimal, kind: TransactionType, date: DateTime<Utc>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            amount,
            kind,
            date: Some(date),
        }
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind.is_expense()
    }

    /// Amount with the sign implied by the type applied.
    pub fn signed_amount(&self) -> Decimal {
        if self.is_income() {
            self.amount
        } else {
            -self.amount
        }
    }

    pub fn date_label(&self) -> String {
        self.date
            .map(|d| d.with_timezone(&chrono::Local).format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "—".to_string())
    }
}
