use anyhow::Result;
use rust_decimal::Decimal;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;

use crate::advisor::{Advisor, FALLBACK_MESSAGE};
use crate::models::*;
use crate::store::Ledger;
use crate::ui::util::wrapped_height;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Overview,
    Statement,
    Incomes,
    Fixed,
    Variable,
    Goals,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[
            Self::Overview,
            Self::Statement,
            Self::Incomes,
            Self::Fixed,
            Self::Variable,
            Self::Goals,
        ]
    }

    /// Transaction type shown by a per-category tab; `None` for the others.
    pub(crate) fn filter(&self) -> Option<TransactionType> {
        match self {
            Self::Incomes => Some(TransactionType::Income),
            Self::Fixed => Some(TransactionType::FixedExpense),
            Self::Variable => Some(TransactionType::VariableExpense),
            _ => None,
        }
    }

    /// Screens that show a transaction table.
    pub(crate) fn is_list(&self) -> bool {
        matches!(
            self,
            Self::Statement | Self::Incomes | Self::Fixed | Self::Variable
        )
    }

    pub(crate) fn title(&self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::Statement => "Full Statement",
            Self::Incomes => "My Income",
            Self::Fixed => "Fixed Expenses",
            Self::Variable => "Variable Expenses",
            Self::Goals => "My Goals",
        }
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Overview => write!(f, "Overview"),
            Self::Statement => write!(f, "Statement"),
            Self::Incomes => write!(f, "Incomes"),
            Self::Fixed => write!(f, "Fixed"),
            Self::Variable => write!(f, "Variable"),
            Self::Goals => write!(f, "Goals"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Form,
    Editing,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Form => write!(f, "ADD"),
            Self::Editing => write!(f, "GOAL"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone)]
pub(crate) enum PendingAction {
    DeleteTransaction { id: String, name: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FormField {
    Name,
    Amount,
    Kind,
}

/// State of the add-transaction modal.
#[derive(Debug, Clone)]
pub(crate) struct AddForm {
    pub(crate) name: String,
    pub(crate) amount: String,
    pub(crate) kind: TransactionType,
    pub(crate) field: FormField,
}

impl AddForm {
    pub(crate) fn new(kind: TransactionType) -> Self {
        Self {
            name: String::new(),
            amount: String::new(),
            kind,
            field: FormField::Name,
        }
    }

    pub(crate) fn next_field(&mut self) {
        self.field = match self.field {
            FormField::Name => FormField::Amount,
            FormField::Amount => FormField::Kind,
            FormField::Kind => FormField::Name,
        };
    }

    pub(crate) fn prev_field(&mut self) {
        self.field = match self.field {
            FormField::Name => FormField::Kind,
            FormField::Amount => FormField::Name,
            FormField::Kind => FormField::Amount,
        };
    }

    pub(crate) fn push(&mut self, c: char) {
        match self.field {
            FormField::Name => self.name.push(c),
            FormField::Amount => self.amount.push(c),
            FormField::Kind if c == ' ' => self.kind = self.kind.next(),
            FormField::Kind => {}
        }
    }

    pub(crate) fn pop(&mut self) {
        match self.field {
            FormField::Name => {
                self.name.pop();
            }
            FormField::Amount => {
                self.amount.pop();
            }
            FormField::Kind => {}
        }
    }

    /// The entry to record, or `None` if the name is blank or the amount is
    /// not a positive number.
    pub(crate) fn validate(&self) -> Option<(String, Decimal, TransactionType)> {
        let name = self.name.trim();
        if name.is_empty() {
            return None;
        }
        let amount = parse_transaction_amount(&self.amount)?;
        Some((name.to_string(), amount, self.kind))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum AdviceState {
    Idle,
    Loading,
    Ready(String),
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,

    // Derived from the ledger on every refresh
    pub(crate) summary: FinancialSummary,
    pub(crate) transactions: Vec<Transaction>,
    pub(crate) transaction_count: usize,
    pub(crate) transaction_index: usize,
    pub(crate) transaction_scroll: usize,

    pub(crate) form: AddForm,

    // Advisor
    advisor: Arc<dyn Advisor>,
    pub(crate) advice: AdviceState,
    advice_rx: Option<Receiver<String>>,
    pub(crate) advice_scroll: usize,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
    /// Inner (width, height) of the advisor panel.
    pub(crate) advice_viewport: (usize, usize),
}

impl App {
    pub(crate) fn new(ledger: &Ledger, advisor: Arc<dyn Advisor>) -> Self {
        let mut app = Self {
            running: true,
            screen: Screen::Overview,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,

            summary: ledger.summary(),
            transactions: Vec::new(),
            transaction_count: 0,
            transaction_index: 0,
            transaction_scroll: 0,

            form: AddForm::new(TransactionType::FixedExpense),

            advisor,
            advice: AdviceState::Idle,
            advice_rx: None,
            advice_scroll: 0,

            pending_action: None,
            confirm_message: String::new(),

            visible_rows: 20,
            advice_viewport: (60, 10),
        };
        app.refresh(ledger);
        app
    }

    /// Re-derive everything shown on screen from the ledger. Called after
    /// every mutation and every tab switch.
    pub(crate) fn refresh(&mut self, ledger: &Ledger) {
        self.summary = ledger.summary();
        self.transaction_count = ledger.transactions().len();
        self.transactions = match self.screen.filter() {
            Some(kind) => ledger.transactions_of(kind),
            None => ledger.transactions().to_vec(),
        };
        if self.transaction_index >= self.transactions.len() {
            self.transaction_index = self.transactions.len().saturating_sub(1);
        }
        if self.transaction_scroll > self.transaction_index {
            self.transaction_scroll = self.transaction_index;
        }
    }

    pub(crate) fn switch_screen(&mut self, ledger: &Ledger, screen: Screen) {
        if self.screen != screen {
            self.transaction_index = 0;
            self.transaction_scroll = 0;
        }
        self.screen = screen;
        self.refresh(ledger);
    }

    pub(crate) fn selected_transaction(&self) -> Option<&Transaction> {
        if !self.screen.is_list() {
            return None;
        }
        self.transactions.get(self.transaction_index)
    }

    pub(crate) fn open_form(&mut self) {
        let kind = self.screen.filter().unwrap_or(TransactionType::FixedExpense);
        self.form = AddForm::new(kind);
        self.input_mode = InputMode::Form;
    }

    /// Record the form's entry. Returns `false`, leaving the form open, when
    /// the input does not validate.
    pub(crate) fn submit_form(&mut self, ledger: &mut Ledger) -> Result<bool> {
        let Some((name, amount, kind)) = self.form.validate() else {
            self.set_status("Enter a description and a positive amount");
            return Ok(false);
        };
        ledger.add_transaction(name.clone(), amount, kind, chrono::Utc::now())?;
        self.input_mode = InputMode::Normal;
        self.refresh(ledger);
        self.set_status(format!("Added {kind}: {name}"));
        Ok(true)
    }

    pub(crate) fn begin_goal_edit(&mut self) {
        self.command_input = self.summary.savings_goal.normalize().to_string();
        self.input_mode = InputMode::Editing;
    }

    /// Save a typed goal. Unparseable or negative input leaves the goal as is.
    pub(crate) fn save_goal(&mut self, ledger: &mut Ledger, input: &str) -> Result<bool> {
        match parse_goal(input) {
            Some(goal) => {
                ledger.set_savings_goal(goal)?;
                self.refresh(ledger);
                self.set_status(format!(
                    "Savings goal set to {}",
                    crate::ui::util::format_amount(goal)
                ));
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Ask for confirmation before deleting the row under the cursor.
    pub(crate) fn confirm_delete_selected(&mut self) {
        let Some((id, name)) = self
            .selected_transaction()
            .map(|t| (t.id.clone(), t.name.clone()))
        else {
            self.set_status("No transaction selected");
            return;
        };
        self.confirm_message = format!("Delete '{name}'?");
        self.pending_action = Some(PendingAction::DeleteTransaction { id, name });
        self.input_mode = InputMode::Confirm;
    }

    pub(crate) fn run_pending(&mut self, ledger: &mut Ledger) -> Result<()> {
        if let Some(action) = self.pending_action.take() {
            match action {
                PendingAction::DeleteTransaction { id, name } => {
                    if ledger.remove_transaction(&id)? {
                        self.set_status(format!("Deleted: {name}"));
                    }
                    self.refresh(ledger);
                }
            }
        }
        self.input_mode = InputMode::Normal;
        self.confirm_message.clear();
        Ok(())
    }

    pub(crate) fn cancel_pending(&mut self) {
        self.pending_action = None;
        self.input_mode = InputMode::Normal;
        self.confirm_message.clear();
        self.set_status("Cancelled");
    }

    /// Start an advice request on a background thread. Ignored while one is
    /// already running; there is no way to cancel it.
    pub(crate) fn request_advice(&mut self, ledger: &Ledger) {
        if self.advice == AdviceState::Loading {
            return;
        }
        let summary = ledger.summary();
        let transactions = ledger.transactions().to_vec();
        let advisor = Arc::clone(&self.advisor);
        let (tx, rx) = mpsc::channel();
        std::thread::spawn(move || {
            let text = advisor.advise(&summary, &transactions);
            let _ = tx.send(text);
        });
        self.advice = AdviceState::Loading;
        self.advice_rx = Some(rx);
        self.advice_scroll = 0;
        self.set_status("Analyzing your finances…");
    }

    /// Pick up a finished advice request. Returns `true` when the state changed.
    pub(crate) fn poll_advice(&mut self) -> bool {
        let Some(rx) = &self.advice_rx else {
            return false;
        };
        let text = match rx.try_recv() {
            Ok(text) => text,
            Err(TryRecvError::Empty) => return false,
            Err(TryRecvError::Disconnected) => {
                tracing::error!("Advice worker exited without a result");
                FALLBACK_MESSAGE.to_string()
            }
        };
        self.advice = AdviceState::Ready(text);
        self.advice_rx = None;
        self.advice_scroll = 0;
        self.set_status("Analysis ready");
        true
    }

    pub(crate) fn clear_advice(&mut self) {
        if self.advice != AdviceState::Loading {
            self.advice = AdviceState::Idle;
            self.advice_scroll = 0;
        }
    }

    /// Rows the advice text overflows the panel by, counting the footer line.
    pub(crate) fn advice_max_scroll(&self) -> usize {
        let AdviceState::Ready(text) = &self.advice else {
            return 0;
        };
        let (width, height) = self.advice_viewport;
        (wrapped_height(text, width) + 2).saturating_sub(height)
    }

    pub(crate) fn scroll_advice_down(&mut self, rows: usize) {
        self.advice_scroll = (self.advice_scroll + rows).min(self.advice_max_scroll());
    }

    pub(crate) fn scroll_advice_up(&mut self, rows: usize) {
        self.advice_scroll = self.advice_scroll.saturating_sub(rows);
    }

    pub(crate) fn scroll_advice_to_bottom(&mut self) {
        self.advice_scroll = self.advice_max_scroll();
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;
