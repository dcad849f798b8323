mod amount;
mod summary;
mod transaction;

pub use amount::{parse_amount, parse_goal, parse_transaction_amount};
pub use summary::{FinancialSummary, Status};
pub use transaction::{Transaction, TransactionType};

#[cfg(test)]
mod tests;
