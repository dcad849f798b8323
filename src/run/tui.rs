use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use std::time::Duration;

use crate::advisor::Advisor;
use crate::store::Ledger;
use crate::ui::app::{AdviceState, App, FormField, InputMode, Screen};
use crate::ui::commands;
use crate::ui::screens::goals::GOAL_CARD_HEIGHT;
use crate::ui::util::{scroll_down, scroll_to_bottom, scroll_to_top, scroll_up};

const TICK: Duration = Duration::from_millis(200);

pub(crate) fn as_tui(ledger: &mut Ledger, advisor: Arc<dyn Advisor>) -> Result<()> {
    let mut app = App::new(ledger, advisor);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, ledger);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        tracing::error!("TUI exited with error: {e:#}");
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    ledger: &mut Ledger,
) -> Result<()> {
    while app.running {
        terminal.draw(|f| {
            // 1 tab + 1 status + 1 cmd + 2 borders + 1 header
            let content_height = f.area().height.saturating_sub(6) as usize;
            app.visible_rows = content_height.max(1);
            // Advisor panel: content area minus the goal card and its own borders
            let area = f.area();
            app.advice_viewport = (
                area.width.saturating_sub(2) as usize,
                area.height.saturating_sub(3 + GOAL_CARD_HEIGHT + 2) as usize,
            );
            crate::ui::render::render(f, app);
        })?;

        // Poll so a finished advice request is picked up without a key press
        if !event::poll(TICK)? {
            app.poll_advice();
            continue;
        }
        app.poll_advice();

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if app.show_help {
                app.show_help = false;
                continue;
            }
            match app.input_mode {
                InputMode::Normal => handle_normal_input(key, app, ledger)?,
                InputMode::Command => handle_command_input(key, app, ledger)?,
                InputMode::Form => handle_form_input(key, app, ledger)?,
                InputMode::Editing => handle_editing_input(key, app, ledger)?,
                InputMode::Confirm => handle_confirm_input(key, app, ledger)?,
            }
        }
    }
    Ok(())
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: event::KeyEvent, app: &mut App, ledger: &mut Ledger) -> Result<()> {
    match key.code {
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('q') | KeyCode::Char('c')
            if key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            app.running = false;
        }
        KeyCode::Char('j') | KeyCode::Down => handle_move_down(app),
        KeyCode::Char('k') | KeyCode::Up => handle_move_up(app),
        KeyCode::Char(c @ '1'..='6') => {
            let idx = c as usize - '1' as usize;
            if let Some(screen) = Screen::all().get(idx) {
                app.switch_screen(ledger, *screen);
            }
        }
        KeyCode::Tab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            let next = (idx + 1) % screens.len();
            app.switch_screen(ledger, screens[next]);
        }
        KeyCode::BackTab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            let prev = if idx == 0 { screens.len() - 1 } else { idx - 1 };
            app.switch_screen(ledger, screens[prev]);
        }
        KeyCode::Esc => app.status_message.clear(),
        KeyCode::Char('g') => handle_goto_top(app),
        KeyCode::Char('G') => handle_goto_bottom(app),
        KeyCode::Char('?') => {
            app.show_help = true;
        }
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let half_page = app.visible_rows / 2;
            for _ in 0..half_page {
                handle_move_down(app);
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let half_page = app.visible_rows / 2;
            for _ in 0..half_page {
                handle_move_up(app);
            }
        }
        KeyCode::Char('a') => app.open_form(),
        KeyCode::Char('e') => app.begin_goal_edit(),
        KeyCode::Char('D') if app.screen.is_list() => {
            commands::handle_command("delete", app, ledger)?;
        }
        KeyCode::Char('A') => {
            commands::handle_command("advise", app, ledger)?;
        }
        KeyCode::Char('c') if app.screen == Screen::Goals => {
            if app.advice == AdviceState::Loading {
                app.set_status("Analysis still running");
            } else {
                app.clear_advice();
            }
        }
        _ => {}
    }
    Ok(())
}

fn handle_command_input(key: event::KeyEvent, app: &mut App, ledger: &mut Ledger) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
            commands::handle_command(&input, app, ledger)?;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Backspace => {
            app.command_input.pop();
            if app.command_input.is_empty() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
    Ok(())
}

fn handle_form_input(key: event::KeyEvent, app: &mut App, ledger: &mut Ledger) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            app.submit_form(ledger)?;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.set_status("Add cancelled");
        }
        KeyCode::Tab | KeyCode::Down => app.form.next_field(),
        KeyCode::BackTab | KeyCode::Up => app.form.prev_field(),
        KeyCode::Left if app.form.field == FormField::Kind => {
            app.form.kind = app.form.kind.prev();
        }
        KeyCode::Right if app.form.field == FormField::Kind => {
            app.form.kind = app.form.kind.next();
        }
        KeyCode::Backspace => app.form.pop(),
        KeyCode::Char(c) => app.form.push(c),
        _ => {}
    }
    Ok(())
}

fn handle_editing_input(key: event::KeyEvent, app: &mut App, ledger: &mut Ledger) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            if !app.save_goal(ledger, &input)? {
                app.set_status(format!("Invalid goal: {input}"));
            }
            app.command_input.clear();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Esc => {
            app.command_input.clear();
            app.input_mode = InputMode::Normal;
            app.set_status("Edit cancelled");
        }
        KeyCode::Backspace => {
            app.command_input.pop();
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
    Ok(())
}

fn handle_confirm_input(key: event::KeyEvent, app: &mut App, ledger: &mut Ledger) -> Result<()> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => app.run_pending(ledger)?,
        // Any other key = cancel
        _ => app.cancel_pending(),
    }
    Ok(())
}

// ── Navigation helpers ───────────────────────────────────────

fn handle_move_down(app: &mut App) {
    if app.screen.is_list() {
        scroll_down(
            &mut app.transaction_index,
            &mut app.transaction_scroll,
            app.transactions.len(),
            app.visible_rows.max(1),
        );
    } else if app.screen == Screen::Goals {
        app.scroll_advice_down(1);
    }
}

fn handle_move_up(app: &mut App) {
    if app.screen.is_list() {
        scroll_up(&mut app.transaction_index, &mut app.transaction_scroll);
    } else if app.screen == Screen::Goals {
        app.scroll_advice_up(1);
    }
}

fn handle_goto_top(app: &mut App) {
    if app.screen == Screen::Goals {
        app.advice_scroll = 0;
    } else {
        scroll_to_top(&mut app.transaction_index, &mut app.transaction_scroll);
    }
}

fn handle_goto_bottom(app: &mut App) {
    if app.screen.is_list() {
        scroll_to_bottom(
            &mut app.transaction_index,
            &mut app.transaction_scroll,
            app.transactions.len(),
            app.visible_rows.max(1),
        );
    } else if app.screen == Screen::Goals {
        app.scroll_advice_to_bottom();
    }
}
