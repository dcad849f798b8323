use rust_decimal::Decimal;

use crate::models::{FinancialSummary, Status};

/// Format a decimal amount with thousand separators and 2 decimal places.
/// e.g. `1234567.89` → `"1,234,567.89"`
pub(crate) fn format_amount(val: Decimal) -> String {
    let abs = val.abs();
    let formatted = format!("{abs:.2}");
    let mut parts = formatted.split('.');
    let int_part = parts.next().unwrap_or("0");
    let dec_part = parts.next().unwrap_or("00");

    let with_commas: String = int_part
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(",");

    if val < Decimal::ZERO {
        format!("-${with_commas}.{dec_part}")
    } else {
        format!("${with_commas}.{dec_part}")
    }
}

/// One-line explanation of the status, shown under the headline.
/// Empty when the budget is exactly balanced.
pub(crate) fn status_detail(summary: &FinancialSummary) -> String {
    match summary.status {
        Status::Deficit => format!(
            "You are {} below plan.",
            format_amount(summary.balance.abs())
        ),
        Status::Danger => format!(
            "Positive balance, but {} short of your savings goal.",
            format_amount(summary.remaining_after_savings.abs())
        ),
        Status::Surplus => format!(
            "{} available after your savings goal.",
            format_amount(summary.remaining_after_savings)
        ),
        Status::Balanced => String::new(),
    }
}

/// Truncate a string to `max` visible characters, appending "…" if truncated.
/// The result is guaranteed to be at most `max` characters (counting "…" as one).
/// Safe for multi-byte UTF-8 characters.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let char_count = s.chars().count();
    if char_count <= max {
        return s.to_string();
    }
    let truncated: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{truncated}…")
}

/// Move a list cursor down by one, adjusting scroll to keep cursor visible.
pub(crate) fn scroll_down(index: &mut usize, scroll: &mut usize, len: usize, page: usize) {
    if *index + 1 < len {
        *index += 1;
        if *index >= *scroll + page {
            *scroll = index.saturating_sub(page - 1);
        }
    }
}

/// Move a list cursor up by one, adjusting scroll to keep cursor visible.
pub(crate) fn scroll_up(index: &mut usize, scroll: &mut usize) {
    *index = index.saturating_sub(1);
    if *index < *scroll {
        *scroll = *index;
    }
}

/// Jump cursor to the top of a list.
pub(crate) fn scroll_to_top(index: &mut usize, scroll: &mut usize) {
    *index = 0;
    *scroll = 0;
}

/// Jump cursor to the bottom of a list.
pub(crate) fn scroll_to_bottom(index: &mut usize, scroll: &mut usize, len: usize, page: usize) {
    if len > 0 {
        *index = len - 1;
        *scroll = index.saturating_sub(page.saturating_sub(1));
    }
}

/// Expand a leading `~/` to the home directory.
pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = directories::UserDirs::new()
            .map(|d| d.home_dir().display().to_string())
            .unwrap_or_else(|| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}

/// Rows `text` takes when word-wrapped to `width` columns. Words longer than
/// a row are broken across rows.
pub(crate) fn wrapped_height(text: &str, width: usize) -> usize {
    if width == 0 {
        return 0;
    }
    text.lines()
        .map(|line| {
            let mut rows = 1;
            let mut col = 0;
            for word in line.split_whitespace() {
                let len = word.chars().count();
                let needed = if col == 0 { len } else { col + 1 + len };
                if needed <= width {
                    col = needed;
                } else if len <= width {
                    rows += 1;
                    col = len;
                } else {
                    if col > 0 {
                        rows += 1;
                    }
                    rows += (len - 1) / width;
                    col = (len - 1) % width + 1;
                }
            }
            rows
        })
        .sum()
}
