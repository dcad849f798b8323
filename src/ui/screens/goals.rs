use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::models::Status;
use crate::ui::app::{AdviceState, App};
use crate::ui::theme;
use crate::ui::util::format_amount;

pub(crate) const GOAL_CARD_HEIGHT: u16 = 7;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(GOAL_CARD_HEIGHT), Constraint::Min(6)])
        .split(area);

    render_goal_card(f, chunks[0], app);
    render_advisor(f, chunks[1], app);
}

fn render_goal_card(f: &mut Frame, area: Rect, app: &App) {
    let s = &app.summary;
    let remaining_color = if s.remaining_after_savings.is_sign_negative() {
        theme::RED
    } else {
        theme::GREEN
    };
    let lines = vec![
        Line::from(vec![
            Span::styled("  Monthly savings goal     ", theme::dim_style()),
            Span::styled(
                format_amount(s.savings_goal),
                Style::default()
                    .fg(theme::ACCENT)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("  Available balance        ", theme::dim_style()),
            Span::styled(format_amount(s.balance), theme::normal_style()),
        ]),
        Line::from(vec![
            Span::styled("  Remaining after savings  ", theme::dim_style()),
            Span::styled(
                format_amount(s.remaining_after_savings),
                Style::default().fg(remaining_color),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "  Press e to edit the goal (:goal <amount>)",
            theme::dim_style(),
        )),
    ];

    f.render_widget(
        Paragraph::new(lines).block(theme::panel("Savings Goal")),
        area,
    );
}

fn render_advisor(f: &mut Frame, area: Rect, app: &App) {
    let lines: Vec<Line> = match &app.advice {
        AdviceState::Idle => {
            let pitch = match app.summary.status {
                Status::Deficit => "Get tips to get back on track.",
                Status::Surplus => "Get ideas for what to do with your surplus.",
                Status::Danger | Status::Balanced => "Get a short review of your budget.",
            };
            vec![
                Line::from(""),
                Line::from(Span::styled(pitch, theme::normal_style())),
                Line::from(""),
                Line::from(Span::styled("Press A to analyze", theme::dim_style())),
            ]
        }
        AdviceState::Loading => vec![
            Line::from(""),
            Line::from(Span::styled(
                "Analyzing your finances…",
                Style::default().fg(theme::YELLOW),
            )),
        ],
        AdviceState::Ready(text) => {
            let mut lines: Vec<Line> = text
                .lines()
                .map(|l| Line::from(Span::styled(l.to_string(), theme::normal_style())))
                .collect();
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "Press c for a new analysis",
                theme::dim_style(),
            )));
            lines
        }
    };

    let centered = !matches!(app.advice, AdviceState::Ready(_));
    let max_scroll = app.advice_max_scroll();
    let title = if max_scroll > 0 {
        format!(
            "Financial Advisor ({}/{}, j/k to scroll)",
            app.advice_scroll.min(max_scroll),
            max_scroll
        )
    } else {
        "Financial Advisor".to_string()
    };
    let scroll = u16::try_from(app.advice_scroll.min(max_scroll)).unwrap_or(u16::MAX);
    let mut paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0))
        .block(theme::panel(title));
    if centered {
        paragraph = paragraph.centered();
    }
    f.render_widget(paragraph, area);
}
