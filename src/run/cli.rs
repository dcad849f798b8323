use anyhow::Result;
use std::path::Path;

use crate::advisor::Advisor;
use crate::export::CsvExporter;
use crate::models::{parse_goal, parse_transaction_amount, Transaction, TransactionType};
use crate::store::Ledger;
use crate::ui::util::{format_amount, shellexpand, status_detail, truncate};

pub(crate) fn as_cli(args: &[String], ledger: &mut Ledger, advisor: &dyn Advisor) -> Result<()> {
    match args[1].as_str() {
        "summary" | "s" => cli_summary(ledger),
        "list" | "ls" => cli_list(&args[2..], ledger),
        "add" => cli_add(&args[2..], ledger),
        "remove" | "rm" => cli_remove(&args[2..], ledger),
        "goal" => cli_goal(&args[2..], ledger),
        "advise" => cli_advise(ledger, advisor),
        "export" => cli_export(&args[2..], ledger),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("saldofixo {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("SaldoFixo: local-only monthly budget with a savings goal");
    println!();
    println!("Usage: saldofixo [command]");
    println!();
    println!("Commands:");
    println!("  (none)                          Launch interactive TUI");
    println!("  summary                         Print totals and budget status");
    println!("  list [income|fixed|variable]    List entries, newest first");
    println!("  add <category> <amount> <desc>  Record an entry");
    println!("  remove <id>                     Remove an entry by id");
    println!("  goal [amount]                   Show or set the monthly savings goal");
    println!("  advise                          Ask the advisor for a tip");
    println!("  export [path]                   Export entries to CSV");
    println!("  --help, -h                      Show this help");
    println!("  --version, -V                   Show version");
}

fn cli_summary(ledger: &Ledger) -> Result<()> {
    let s = ledger.summary();

    println!("SaldoFixo: {}", s.status.headline());
    let detail = status_detail(&s);
    if !detail.is_empty() {
        println!("{detail}");
    }
    println!("{}", "─".repeat(40));
    println!("  Income:            {:>14}", format_amount(s.total_income));
    println!("  Fixed expenses:    {:>14}", format_amount(s.total_fixed_expense));
    println!("  Variable expenses: {:>14}", format_amount(s.total_variable_expense));
    println!("  Total expenses:    {:>14}", format_amount(s.total_expense));
    println!("  Balance:           {:>14}", format_amount(s.balance));
    println!("  Savings goal:      {:>14}", format_amount(s.savings_goal));
    println!(
        "  After savings:     {:>14}",
        format_amount(s.remaining_after_savings)
    );
    println!("  Goal progress:     {:>13.0}%", s.goal_progress());
    println!("  Entries:           {:>14}", ledger.transactions().len());
    Ok(())
}

fn cli_list(args: &[String], ledger: &Ledger) -> Result<()> {
    let txns: Vec<Transaction> = match args.first() {
        Some(kind) => {
            let kind = TransactionType::parse(kind)
                .ok_or_else(|| anyhow::anyhow!("Unknown category: {kind}"))?;
            ledger.transactions_of(kind)
        }
        None => ledger.transactions().to_vec(),
    };

    if txns.is_empty() {
        println!("No entries");
        return Ok(());
    }

    println!(
        "{:<36} {:<10} {:<9} {:<28} {:>14}",
        "ID", "Date", "Category", "Description", "Amount"
    );
    println!("{}", "─".repeat(101));
    for txn in &txns {
        println!(
            "{:<36} {:<10} {:<9} {:<28} {:>14}",
            txn.id,
            txn.date_label(),
            txn.kind.as_str(),
            truncate(&txn.name, 28),
            format_amount(txn.signed_amount()),
        );
    }
    Ok(())
}

fn cli_add(args: &[String], ledger: &mut Ledger) -> Result<()> {
    if args.len() < 3 {
        anyhow::bail!("Usage: saldofixo add <income|fixed|variable> <amount> <description>");
    }

    let kind = TransactionType::parse(&args[0])
        .ok_or_else(|| anyhow::anyhow!("Unknown category: {}", args[0]))?;
    let amount = parse_transaction_amount(&args[1])
        .ok_or_else(|| anyhow::anyhow!("Invalid amount: {} (must be a positive number)", args[1]))?;
    let name = args[2..].join(" ");
    let name = name.trim();
    if name.is_empty() {
        anyhow::bail!("Description cannot be empty");
    }

    let id = ledger.add_transaction(name.to_string(), amount, kind, chrono::Utc::now())?;
    println!("Added {kind} '{name}' {} ({id})", format_amount(amount));
    Ok(())
}

fn cli_remove(args: &[String], ledger: &mut Ledger) -> Result<()> {
    let Some(id) = args.first() else {
        anyhow::bail!("Usage: saldofixo remove <id>");
    };

    let name = ledger.find(id).map(|t| t.name.clone());
    if ledger.remove_transaction(id)? {
        println!("Removed '{}'", name.unwrap_or_default());
    } else {
        println!("No entry with id {id}");
    }
    Ok(())
}

fn cli_goal(args: &[String], ledger: &mut Ledger) -> Result<()> {
    let Some(input) = args.first() else {
        println!("Savings goal: {}", format_amount(ledger.savings_goal()));
        return Ok(());
    };

    let goal = parse_goal(input)
        .ok_or_else(|| anyhow::anyhow!("Invalid goal: {input} (must be zero or more)"))?;
    ledger.set_savings_goal(goal)?;
    println!("Savings goal set to {}", format_amount(goal));
    Ok(())
}

fn cli_advise(ledger: &Ledger, advisor: &dyn Advisor) -> Result<()> {
    println!("Analyzing your finances…");
    let text = advisor.advise(&ledger.summary(), ledger.transactions());
    println!();
    println!("{text}");
    Ok(())
}

fn cli_export(args: &[String], ledger: &Ledger) -> Result<()> {
    let output_path = args
        .first()
        .filter(|a| !a.starts_with('-'))
        .map(|a| shellexpand(a))
        .unwrap_or_else(|| shellexpand("~/saldofixo-export.csv"));

    let count = CsvExporter::export(Path::new(&output_path), ledger.transactions())?;
    if count == 0 {
        println!("No entries to export");
    } else {
        println!("Exported {count} entries to {output_path}");
    }
    Ok(())
}
