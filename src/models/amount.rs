use rust_decimal::Decimal;
use std::str::FromStr;

/// Amounts are cents at most.
const MAX_SCALE: u32 = 2;

/// Upper bound (exclusive) on any single amount or goal. Keeps every summary
/// total far inside `Decimal`'s range.
const MAX_WHOLE_UNITS: i64 = 1_000_000_000_000;

/// Parse a user-typed amount. Accepts a comma as the decimal separator
/// (`"1234,50"`) and an optional leading `$`. Returns `None` for anything
/// that is not a plain number, has more than two decimal places, or is a
/// trillion or more in magnitude.
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let cleaned = s.trim().trim_start_matches('$').trim().replace(',', ".");
    if cleaned.is_empty() {
        return None;
    }
    let amount = Decimal::from_str(&cleaned).ok()?;
    if amount.normalize().scale() > MAX_SCALE || amount.abs() >= Decimal::from(MAX_WHOLE_UNITS) {
        return None;
    }
    Some(amount)
}

/// A transaction amount must be strictly positive.
pub fn parse_transaction_amount(s: &str) -> Option<Decimal> {
    parse_amount(s).filter(|a| *a > Decimal::ZERO)
}

/// A savings goal may be zero but never negative.
pub fn parse_goal(s: &str) -> Option<Decimal> {
    parse_amount(s).filter(|a| *a >= Decimal::ZERO)
}
