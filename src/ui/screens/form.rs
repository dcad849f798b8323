use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::models::TransactionType;
use crate::ui::app::{App, FormField};
use crate::ui::theme;

/// Modal for a new entry, drawn over the current tab.
pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let form = &app.form;

    let field_line = |label: &str, value: &str, field: FormField| {
        let focused = form.field == field;
        let marker = if focused { "> " } else { "  " };
        let value_style = if focused {
            Style::default()
                .fg(theme::TEXT)
                .bg(theme::SURFACE)
                .add_modifier(Modifier::BOLD)
        } else {
            theme::normal_style()
        };
        Line::from(vec![
            Span::styled(format!("{marker}{label:<13}"), theme::dim_style()),
            Span::styled(format!("{value} "), value_style),
        ])
    };

    let kinds: Vec<Span> = TransactionType::all()
        .iter()
        .flat_map(|k| {
            let style = if *k == form.kind {
                Style::default()
                    .fg(theme::HEADER_BG)
                    .bg(theme::kind_color(*k))
                    .add_modifier(Modifier::BOLD)
            } else {
                theme::dim_style()
            };
            [Span::styled(format!(" {} ", k.as_str()), style), Span::raw(" ")]
        })
        .collect();
    let kind_marker = if form.field == FormField::Kind { "> " } else { "  " };
    let mut kind_line = vec![Span::styled(
        format!("{kind_marker}{:<13}", "Category"),
        theme::dim_style(),
    )];
    kind_line.extend(kinds);

    let lines = vec![
        Line::from(""),
        field_line("Description", &form.name, FormField::Name),
        field_line("Amount", &form.amount, FormField::Amount),
        Line::from(kind_line),
        Line::from(""),
        Line::from(Span::styled(
            "  Tab next field | Space/←/→ category | Enter save | Esc cancel",
            theme::dim_style(),
        )),
    ];

    let popup_height = (lines.len() as u16 + 2).min(area.height);
    let popup_width = 68.min(area.width.saturating_sub(4));
    let x = area.x + (area.width.saturating_sub(popup_width)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(x, y, popup_width, popup_height);

    f.render_widget(Clear, popup_area);
    let popup = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT))
            .title(Span::styled(
                " New Entry ",
                Style::default()
                    .fg(theme::ACCENT)
                    .add_modifier(Modifier::BOLD),
            ))
            .style(Style::default().bg(theme::HEADER_BG)),
    );
    f.render_widget(popup, popup_area);
}
