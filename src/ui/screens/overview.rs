use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Gauge, Paragraph},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::models::{Status, TransactionType};
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, status_detail};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Status banner
            Constraint::Length(6), // Summary cards
            Constraint::Length(3), // Savings goal gauge
            Constraint::Min(8),    // Composition chart
        ])
        .split(area);

    render_status_banner(f, chunks[0], app);
    render_summary_cards(f, chunks[1], app);
    render_goal_gauge(f, chunks[2], app);
    render_composition_chart(f, chunks[3], app);
}

fn render_status_banner(f: &mut Frame, area: Rect, app: &App) {
    let status = app.summary.status;
    let color = theme::status_color(status);
    let mut lines = vec![Line::from(Span::styled(
        status.headline(),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ))];
    let detail = status_detail(&app.summary);
    if !detail.is_empty() {
        lines.push(Line::from(Span::styled(detail, theme::normal_style())));
    }

    let banner = Paragraph::new(lines)
        .centered()
        .block(theme::panel("Status").border_style(Style::default().fg(color)));
    f.render_widget(banner, area);
}

fn render_summary_cards(f: &mut Frame, area: Rect, app: &App) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    let s = &app.summary;
    render_card(
        f,
        cards[0],
        "Income",
        s.total_income,
        theme::kind_color(TransactionType::Income),
    );
    render_card(
        f,
        cards[1],
        "Fixed",
        s.total_fixed_expense,
        theme::kind_color(TransactionType::FixedExpense),
    );
    render_card(
        f,
        cards[2],
        "Variable",
        s.total_variable_expense,
        theme::kind_color(TransactionType::VariableExpense),
    );
    render_card(
        f,
        cards[3],
        "Balance",
        s.balance,
        if s.status == Status::Deficit {
            theme::RED
        } else {
            theme::ACCENT
        },
    );
}

fn render_card(f: &mut Frame, area: Rect, title: &str, amount: Decimal, color: ratatui::style::Color) {
    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            format_amount(amount),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
    ])
    .centered()
    .block(theme::panel(title));

    f.render_widget(text, area);
}

fn render_goal_gauge(f: &mut Frame, area: Rect, app: &App) {
    let progress = app.summary.goal_progress();
    let ratio = (progress / Decimal::ONE_HUNDRED).to_f64().unwrap_or(0.0);
    let label = format!(
        "{:.0}% of {} goal",
        progress,
        format_amount(app.summary.savings_goal)
    );

    let gauge = Gauge::default()
        .block(theme::panel("Savings Goal"))
        .gauge_style(Style::default().fg(theme::status_color(app.summary.status)).bg(theme::SURFACE))
        .ratio(ratio.clamp(0.0, 1.0))
        .label(Span::styled(label, Style::default().fg(theme::TEXT)));
    f.render_widget(gauge, area);
}

fn render_composition_chart(f: &mut Frame, area: Rect, app: &App) {
    let slices = app.summary.composition();
    if slices.is_empty() {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("No entries yet", theme::dim_style())),
            Line::from(Span::styled(
                "Press a to add income or an expense",
                theme::dim_style(),
            )),
        ])
        .centered()
        .block(theme::panel("Composition"));
        f.render_widget(msg, area);
        return;
    }

    let bars: Vec<Bar> = slices
        .iter()
        .map(|(kind, amount)| {
            let color = theme::kind_color(*kind);
            Bar::default()
                .value(amount.round().to_u64().unwrap_or(0))
                .text_value(format_amount(*amount))
                .label(Line::from(kind.as_str()))
                .style(Style::default().fg(color))
                .value_style(
                    Style::default()
                        .fg(theme::HEADER_BG)
                        .bg(color)
                        .add_modifier(Modifier::BOLD),
                )
        })
        .collect();

    let chart = BarChart::default()
        .block(theme::panel("Composition"))
        .data(BarGroup::default().bars(&bars))
        .bar_width(14)
        .bar_gap(3)
        .value_style(Style::default().fg(theme::TEXT));

    f.render_widget(chart, area);
}
