#![allow(clippy::unwrap_used)]

use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;

fn make_txn(name: &str, amount: Decimal, kind: TransactionType) -> Transaction {
    Transaction::new(
        name.into(),
        amount,
        kind,
        Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap(),
    )
}

// ── Transaction ───────────────────────────────────────────────

#[test]
fn test_income() {
    let txn = make_txn("Salary", dec!(100.00), TransactionType::Income);
    assert!(txn.is_income());
    assert!(!txn.is_expense());
    assert_eq!(txn.signed_amount(), dec!(100.00));
}

#[test]
fn test_expenses() {
    let fixed = make_txn("Rent", dec!(50.00), TransactionType::FixedExpense);
    let variable = make_txn("Coffee", dec!(4.50), TransactionType::VariableExpense);
    assert!(fixed.is_expense());
    assert!(variable.is_expense());
    assert_eq!(fixed.signed_amount(), dec!(-50.00));
    assert_eq!(variable.signed_amount(), dec!(-4.50));
}

#[test]
fn test_new_assigns_unique_ids() {
    let a = make_txn("A", dec!(1), TransactionType::Income);
    let b = make_txn("A", dec!(1), TransactionType::Income);
    assert!(!a.id.is_empty());
    assert_ne!(a.id, b.id);
    assert!(a.date.is_some());
}

#[test]
fn test_transaction_type_parse() {
    assert_eq!(TransactionType::parse("income"), Some(TransactionType::Income));
    assert_eq!(TransactionType::parse("INCOME"), Some(TransactionType::Income));
    assert_eq!(TransactionType::parse("fixed"), Some(TransactionType::FixedExpense));
    assert_eq!(
        TransactionType::parse("fixed_expense"),
        Some(TransactionType::FixedExpense)
    );
    assert_eq!(
        TransactionType::parse("variable"),
        Some(TransactionType::VariableExpense)
    );
    assert_eq!(TransactionType::parse("v"), Some(TransactionType::VariableExpense));
    assert_eq!(TransactionType::parse("expense"), None);
    assert_eq!(TransactionType::parse(""), None);
}

#[test]
fn test_transaction_type_cycle() {
    for t in TransactionType::all() {
        assert_eq!(t.next().prev(), *t);
    }
    assert_eq!(
        TransactionType::Income.next().next().next(),
        TransactionType::Income
    );
}

#[test]
fn test_transaction_json_shape() {
    let txn = make_txn("Rent", dec!(1200), TransactionType::FixedExpense);
    let value = serde_json::to_value(&txn).unwrap();
    assert_eq!(value["type"], "fixed_expense");
    assert_eq!(value["name"], "Rent");
    assert!(value["amount"].is_number());
    assert!(value["date"].is_string());
}

#[test]
fn test_legacy_expense_type_loads_as_fixed() {
    let json = r#"{"id":"abc","name":"Internet","amount":99.9,"type":"expense"}"#;
    let txn: Transaction = serde_json::from_str(json).unwrap();
    assert_eq!(txn.kind, TransactionType::FixedExpense);
    assert_eq!(txn.amount, dec!(99.9));
    assert!(txn.date.is_none());
    assert_eq!(txn.date_label(), "—");
}

#[test]
fn test_unknown_type_rejected() {
    let json = r#"{"id":"abc","name":"X","amount":1,"type":"transfer"}"#;
    assert!(serde_json::from_str::<Transaction>(json).is_err());
}

// ── Amount parsing ────────────────────────────────────────────

#[test]
fn test_parse_amount_basic() {
    assert_eq!(parse_amount("100.50"), Some(dec!(100.50)));
    assert_eq!(parse_amount("  42 "), Some(dec!(42)));
    assert_eq!(parse_amount("$7.25"), Some(dec!(7.25)));
}

#[test]
fn test_parse_amount_comma_decimal() {
    assert_eq!(parse_amount("1234,50"), Some(dec!(1234.50)));
}

#[test]
fn test_parse_amount_rejects_junk() {
    assert_eq!(parse_amount(""), None);
    assert_eq!(parse_amount("abc"), None);
    assert_eq!(parse_amount("12abc"), None);
}

#[test]
fn test_parse_amount_caps_scale_and_magnitude() {
    assert_eq!(parse_amount("12.3400"), Some(dec!(12.34)));
    assert_eq!(parse_amount("12.345"), None);
    assert_eq!(parse_goal("0.0000000000000000000000001"), None);
    assert_eq!(parse_amount("999999999999.99"), Some(dec!(999999999999.99)));
    assert_eq!(parse_amount("1000000000000"), None);
    assert_eq!(parse_transaction_amount("50000000000000000000000000000"), None);
}

#[test]
fn test_parse_transaction_amount_positive_only() {
    assert_eq!(parse_transaction_amount("0"), None);
    assert_eq!(parse_transaction_amount("-5"), None);
    assert_eq!(parse_transaction_amount("0.01"), Some(dec!(0.01)));
}

#[test]
fn test_parse_goal_allows_zero() {
    assert_eq!(parse_goal("0"), Some(Decimal::ZERO));
    assert_eq!(parse_goal("500"), Some(dec!(500)));
    assert_eq!(parse_goal("-1"), None);
}

// ── Status ────────────────────────────────────────────────────

#[test]
fn test_status_deficit_takes_priority() {
    assert_eq!(Status::classify(dec!(-1), dec!(-1)), Status::Deficit);
    assert_eq!(Status::classify(dec!(-1), dec!(0)), Status::Deficit);
    assert_eq!(Status::classify(dec!(-1), dec!(5)), Status::Deficit);
}

#[test]
fn test_status_danger() {
    assert_eq!(Status::classify(dec!(0), dec!(-0.01)), Status::Danger);
    assert_eq!(Status::classify(dec!(200), dec!(-100)), Status::Danger);
}

#[test]
fn test_status_surplus() {
    assert_eq!(Status::classify(dec!(0), dec!(0.01)), Status::Surplus);
    assert_eq!(Status::classify(dec!(1000), dec!(500)), Status::Surplus);
}

#[test]
fn test_status_exact_zero_boundaries() {
    assert_eq!(Status::classify(Decimal::ZERO, Decimal::ZERO), Status::Balanced);
    assert_eq!(Status::classify(dec!(300), Decimal::ZERO), Status::Balanced);
    // A balance of exactly zero is not a deficit
    assert_ne!(Status::classify(Decimal::ZERO, dec!(1)), Status::Deficit);
}

#[test]
fn test_status_display() {
    assert_eq!(Status::Deficit.to_string(), "deficit");
    assert_eq!(Status::Danger.to_string(), "danger");
    assert_eq!(Status::Balanced.to_string(), "balanced");
    assert_eq!(Status::Surplus.to_string(), "surplus");
}

// ── FinancialSummary ──────────────────────────────────────────

#[test]
fn test_summary_empty() {
    let s = FinancialSummary::compute(&[], Decimal::ZERO);
    assert_eq!(s.total_income, Decimal::ZERO);
    assert_eq!(s.total_fixed_expense, Decimal::ZERO);
    assert_eq!(s.total_variable_expense, Decimal::ZERO);
    assert_eq!(s.total_expense, Decimal::ZERO);
    assert_eq!(s.balance, Decimal::ZERO);
    assert_eq!(s.savings_goal, Decimal::ZERO);
    assert_eq!(s.remaining_after_savings, Decimal::ZERO);
    assert_eq!(s.status, Status::Balanced);
}

#[test]
fn test_summary_surplus_scenario() {
    let txns = vec![
        make_txn("Salary", dec!(3000), TransactionType::Income),
        make_txn("Rent", dec!(1200), TransactionType::FixedExpense),
        make_txn("Groceries", dec!(800), TransactionType::VariableExpense),
    ];
    let s = FinancialSummary::compute(&txns, dec!(500));
    assert_eq!(s.total_income, dec!(3000));
    assert_eq!(s.total_fixed_expense, dec!(1200));
    assert_eq!(s.total_variable_expense, dec!(800));
    assert_eq!(s.total_expense, dec!(2000));
    assert_eq!(s.balance, dec!(1000));
    assert_eq!(s.savings_goal, dec!(500));
    assert_eq!(s.remaining_after_savings, dec!(500));
    assert_eq!(s.status, Status::Surplus);
}

#[test]
fn test_summary_deficit_scenario() {
    let txns = vec![
        make_txn("Salary", dec!(1000), TransactionType::Income),
        make_txn("Rent", dec!(1500), TransactionType::FixedExpense),
    ];
    let s = FinancialSummary::compute(&txns, Decimal::ZERO);
    assert_eq!(s.balance, dec!(-500));
    assert_eq!(s.remaining_after_savings, dec!(-500));
    assert_eq!(s.status, Status::Deficit);
}

#[test]
fn test_summary_danger_scenario() {
    let txns = vec![
        make_txn("Salary", dec!(1000), TransactionType::Income),
        make_txn("Bills", dec!(800), TransactionType::FixedExpense),
    ];
    let s = FinancialSummary::compute(&txns, dec!(300));
    assert_eq!(s.balance, dec!(200));
    assert_eq!(s.remaining_after_savings, dec!(-100));
    assert_eq!(s.status, Status::Danger);
}

#[test]
fn test_summary_exact_cents_are_balanced() {
    // 0.1 + 0.2 would drift with floats; decimals land exactly on the goal
    let txns = vec![
        make_txn("A", dec!(0.1), TransactionType::Income),
        make_txn("B", dec!(0.2), TransactionType::Income),
    ];
    let s = FinancialSummary::compute(&txns, dec!(0.3));
    assert_eq!(s.remaining_after_savings, Decimal::ZERO);
    assert_eq!(s.status, Status::Balanced);
}

#[test]
fn test_summary_invariants_hold() {
    let txns = vec![
        make_txn("Salary", dec!(2500.75), TransactionType::Income),
        make_txn("Side gig", dec!(310.10), TransactionType::Income),
        make_txn("Rent", dec!(990), TransactionType::FixedExpense),
        make_txn("Phone", dec!(45.99), TransactionType::FixedExpense),
        make_txn("Dinner", dec!(62.40), TransactionType::VariableExpense),
        make_txn("Fuel", dec!(120.05), TransactionType::VariableExpense),
    ];
    for goal in [Decimal::ZERO, dec!(100), dec!(1592.41), dec!(5000)] {
        let s = FinancialSummary::compute(&txns, goal);
        assert_eq!(
            s.total_expense,
            s.total_fixed_expense + s.total_variable_expense
        );
        assert_eq!(s.balance, s.total_income - s.total_expense);
        assert_eq!(s.remaining_after_savings, s.balance - goal);
        assert_eq!(s.status, Status::classify(s.balance, s.remaining_after_savings));
    }
}

#[test]
fn test_summary_order_independent() {
    let mut txns = vec![
        make_txn("Salary", dec!(3000), TransactionType::Income),
        make_txn("Rent", dec!(1200), TransactionType::FixedExpense),
        make_txn("Groceries", dec!(800), TransactionType::VariableExpense),
    ];
    let forward = FinancialSummary::compute(&txns, dec!(500));
    txns.reverse();
    let backward = FinancialSummary::compute(&txns, dec!(500));
    assert_eq!(forward, backward);
}

#[test]
fn test_composition_skips_empty_slices() {
    let txns = vec![
        make_txn("Salary", dec!(3000), TransactionType::Income),
        make_txn("Groceries", dec!(800), TransactionType::VariableExpense),
    ];
    let s = FinancialSummary::compute(&txns, Decimal::ZERO);
    assert_eq!(
        s.composition(),
        vec![
            (TransactionType::Income, dec!(3000)),
            (TransactionType::VariableExpense, dec!(800)),
        ]
    );
    assert!(FinancialSummary::compute(&[], Decimal::ZERO)
        .composition()
        .is_empty());
}

#[test]
fn test_goal_progress() {
    let txns = vec![make_txn("Salary", dec!(250), TransactionType::Income)];
    assert_eq!(
        FinancialSummary::compute(&txns, dec!(500)).goal_progress(),
        dec!(50)
    );
    assert_eq!(
        FinancialSummary::compute(&txns, dec!(100)).goal_progress(),
        dec!(100)
    );
    // Zero goal: any positive balance is full progress
    assert_eq!(
        FinancialSummary::compute(&txns, Decimal::ZERO).goal_progress(),
        dec!(100)
    );
    let debt = vec![make_txn("Rent", dec!(250), TransactionType::FixedExpense)];
    assert_eq!(
        FinancialSummary::compute(&debt, dec!(500)).goal_progress(),
        Decimal::ZERO
    );
}

#[test]
fn test_goal_progress_tiny_goal_is_full() {
    // Only reachable through stored data; typed goals are capped at cents
    let txns = vec![make_txn("Salary", dec!(1000), TransactionType::Income)];
    let goal = Decimal::new(1, 25);
    assert_eq!(
        FinancialSummary::compute(&txns, goal).goal_progress(),
        dec!(100)
    );
}

#[test]
fn test_summary_saturates_huge_totals() {
    let txns = vec![
        make_txn("Jackpot", Decimal::MAX, TransactionType::Income),
        make_txn("Jackpot", Decimal::MAX, TransactionType::Income),
        make_txn("Yacht", Decimal::MAX, TransactionType::FixedExpense),
        make_txn("Fuel", Decimal::MAX, TransactionType::VariableExpense),
    ];
    let s = FinancialSummary::compute(&txns, Decimal::MAX);
    assert_eq!(s.total_income, Decimal::MAX);
    assert_eq!(s.total_expense, Decimal::MAX);
    assert_eq!(s.balance, Decimal::ZERO);
    assert_eq!(s.remaining_after_savings, Decimal::MIN);
    assert_eq!(s.status, Status::Danger);
    assert_eq!(s.goal_progress(), Decimal::ZERO);
}
