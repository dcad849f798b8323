use std::collections::HashMap;
use std::sync::LazyLock;

use super::app::{App, Screen};
use super::util::{format_amount, shellexpand};
use crate::export::CsvExporter;
use crate::models::{parse_goal, parse_transaction_amount, TransactionType};
use crate::store::Ledger;

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &mut Ledger) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit SaldoFixo", cmd_quit, r);
    register_command!("quit", "Quit SaldoFixo", cmd_quit, r);
    register_command!("o", "Go to Overview", cmd_overview, r);
    register_command!("overview", "Go to Overview", cmd_overview, r);
    register_command!("s", "Go to Statement", cmd_statement, r);
    register_command!("statement", "Go to Statement", cmd_statement, r);
    register_command!("incomes", "Go to Incomes", cmd_incomes, r);
    register_command!("fixed", "Go to Fixed expenses", cmd_fixed, r);
    register_command!("variable", "Go to Variable expenses", cmd_variable, r);
    register_command!("goals", "Go to Goals", cmd_goals, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!(
        "add",
        "Add entry (e.g. :add fixed 1200 Rent)",
        cmd_add,
        r
    );
    register_command!("a", "Add entry (e.g. :a income 3000 Salary)", cmd_add, r);
    register_command!(
        "goal",
        "Set savings goal (e.g. :goal 500)",
        cmd_goal,
        r
    );
    register_command!("delete", "Delete selected entry", cmd_delete, r);
    register_command!("advise", "Ask the advisor for a tip", cmd_advise, r);
    register_command!(
        "export",
        "Export entries to CSV (e.g. :export ~/budget.csv)",
        cmd_export,
        r
    );

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app, ledger)?;
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| levenshtein(input, k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _ledger: &mut Ledger) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_overview(_args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    app.switch_screen(ledger, Screen::Overview);
    Ok(())
}

fn cmd_statement(_args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    app.switch_screen(ledger, Screen::Statement);
    Ok(())
}

fn cmd_incomes(_args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    app.switch_screen(ledger, Screen::Incomes);
    Ok(())
}

fn cmd_fixed(_args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    app.switch_screen(ledger, Screen::Fixed);
    Ok(())
}

fn cmd_variable(_args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    app.switch_screen(ledger, Screen::Variable);
    Ok(())
}

fn cmd_goals(_args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    app.switch_screen(ledger, Screen::Goals);
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _ledger: &mut Ledger) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_add(args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    if args.is_empty() {
        app.open_form();
        return Ok(());
    }

    let mut parts = args.splitn(3, ' ');
    let (Some(kind), Some(amount), Some(name)) = (parts.next(), parts.next(), parts.next())
    else {
        app.set_status("Usage: :add <income|fixed|variable> <amount> <description>");
        return Ok(());
    };

    let Some(kind) = TransactionType::parse(kind) else {
        app.set_status(format!("Unknown category: {kind} (income, fixed, variable)"));
        return Ok(());
    };
    let Some(amount) = parse_transaction_amount(amount) else {
        app.set_status(format!("Invalid amount: {amount}"));
        return Ok(());
    };
    let name = name.trim();
    if name.is_empty() {
        app.set_status("Description cannot be empty");
        return Ok(());
    }

    ledger.add_transaction(name.to_string(), amount, kind, chrono::Utc::now())?;
    app.refresh(ledger);
    app.set_status(format!("Added {kind}: {name} {}", format_amount(amount)));
    Ok(())
}

fn cmd_goal(args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status(format!(
            "Savings goal: {}",
            format_amount(ledger.savings_goal())
        ));
        return Ok(());
    }

    let Some(goal) = parse_goal(args) else {
        app.set_status(format!("Invalid goal: {args}"));
        return Ok(());
    };
    ledger.set_savings_goal(goal)?;
    app.refresh(ledger);
    app.set_status(format!("Savings goal set to {}", format_amount(goal)));
    Ok(())
}

fn cmd_delete(_args: &str, app: &mut App, _ledger: &mut Ledger) -> anyhow::Result<()> {
    if !app.screen.is_list() || app.transactions.is_empty() {
        app.set_status("Navigate to a list and select an entry first");
        return Ok(());
    }
    app.confirm_delete_selected();
    Ok(())
}

fn cmd_advise(_args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    app.switch_screen(ledger, Screen::Goals);
    app.request_advice(ledger);
    Ok(())
}

fn cmd_export(args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    let path = if args.is_empty() {
        shellexpand("~/saldofixo-export.csv")
    } else {
        shellexpand(args)
    };

    match CsvExporter::export(std::path::Path::new(&path), ledger.transactions()) {
        Ok(0) => app.set_status("No entries to export"),
        Ok(count) => app.set_status(format!("Exported {count} entries to {path}")),
        Err(e) => {
            tracing::error!("Export to {path} failed: {e:#}");
            app.set_status(format!("Export failed: {e}"));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::levenshtein;

    #[test]
    fn test_levenshtein() {
        assert_eq!(levenshtein("goal", "goal"), 0);
        assert_eq!(levenshtein("gaol", "goal"), 2);
        assert_eq!(levenshtein("", "add"), 3);
        assert_eq!(levenshtein("exprt", "export"), 1);
    }
}
