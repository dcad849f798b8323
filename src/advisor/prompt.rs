use std::fmt::Write;

use crate::models::{FinancialSummary, Transaction, TransactionType};

/// Render the advisor prompt: the month's figures followed by every
/// transaction, grouped by category.
pub(crate) fn build_prompt(summary: &FinancialSummary, transactions: &[Transaction]) -> String {
    let mut out = String::new();
    out.push_str("Act as a friendly, straightforward personal finance advisor.\n");
    out.push_str("Analyze the following monthly financial data for a user:\n\n");

    out.push_str("SUMMARY:\n");
    let _ = writeln!(out, "- Total income: {}", money(summary.total_income));
    let _ = writeln!(out, "- Fixed expenses: {}", money(summary.total_fixed_expense));
    let _ = writeln!(
        out,
        "- Variable expenses: {}",
        money(summary.total_variable_expense)
    );
    let _ = writeln!(out, "- Total expenses: {}", money(summary.total_expense));
    let _ = writeln!(out, "- Available balance: {}", money(summary.balance));
    let _ = writeln!(out, "- Savings goal: {}", money(summary.savings_goal));
    let _ = writeln!(
        out,
        "- Remaining after savings: {}",
        money(summary.remaining_after_savings)
    );
    let _ = writeln!(out, "- Current status: {}", summary.status);

    for kind in TransactionType::all() {
        let heading = match kind {
            TransactionType::Income => "INCOME DETAIL",
            TransactionType::FixedExpense => "FIXED EXPENSE DETAIL",
            TransactionType::VariableExpense => "VARIABLE EXPENSE DETAIL",
        };
        let _ = writeln!(out, "\n{heading}:");
        let mut any = false;
        for txn in transactions.iter().filter(|t| t.kind == *kind) {
            let _ = writeln!(out, "- {}: {}", txn.name, money(txn.amount));
            any = true;
        }
        if !any {
            out.push_str("- (none)\n");
        }
    }

    out.push_str(
        "\nPlease give a short piece of advice (at most 3 paragraphs) and 3 practical tips \
         as a bullet list to improve financial health or reach the savings goal.\n",
    );
    out.push_str("Use simple, encouraging language without technical jargon.\n");
    out.push_str("If the user is in the red (deficit), focus on damage control.\n");
    out.push_str("If the user is in the black, focus on optimization or congratulate them.\n");
    out.push_str("Format the answer as simple Markdown.\n");
    out
}

fn money(amount: rust_decimal::Decimal) -> String {
    format!("${:.2}", amount)
}
