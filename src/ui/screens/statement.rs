use ratatui::{
    layout::{Constraint, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table},
    Frame,
};

use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, truncate};

/// Transaction table shared by the Statement tab and the per-category tabs.
pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let title = format!("{} ({})", app.screen.title(), app.transactions.len());

    if app.transactions.is_empty() {
        let hint = match app.screen.filter() {
            Some(kind) => format!("No {} entries yet", kind.as_str().to_lowercase()),
            None => "No entries yet".to_string(),
        };
        let msg = vec![
            Line::from(""),
            Line::from(Span::styled(hint, theme::dim_style())),
            Line::from(""),
            Line::from(Span::styled(
                "Press a to add one, or :add <category> <amount> <description>",
                theme::dim_style(),
            )),
        ];
        f.render_widget(
            Paragraph::new(msg).centered().block(theme::panel(title)),
            area,
        );
        return;
    }

    let header_cells = ["Date", "Description", "Category", "Amount"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = app
        .transactions
        .iter()
        .enumerate()
        .skip(app.transaction_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, txn)| {
            let style = if i == app.transaction_index {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            let color = theme::kind_color(txn.kind);
            let sign = if txn.is_expense() { "-" } else { "+" };
            let amount_str = format!("{sign}{}", format_amount(txn.amount));

            Row::new(vec![
                Cell::from(format!("  {}", txn.date_label())),
                Cell::from(truncate(&txn.name, 40)),
                Cell::from(Span::styled(txn.kind.as_str(), Style::default().fg(color))),
                Cell::from(Span::styled(amount_str, Style::default().fg(color))),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(14),
        Constraint::Min(20),
        Constraint::Length(10),
        Constraint::Length(16),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(theme::panel(title));

    f.render_widget(table, area);
}
