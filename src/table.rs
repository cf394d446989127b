//! Plain-text table rendering for terminal output.

use std::{borrow::Cow, fmt::Write as _};

use crate::format::ellipsize;

const COLUMN_GAP: &str = "  ";

/// Renders an aligned table. Cells wider than `max_cell_width` characters
/// are cut with an ellipsis; line breaks and tabs inside cells become spaces.
pub fn render_table(headers: &[String], rows: &[Vec<String>], max_cell_width: usize) -> String {
    let fit = |value: &str| -> String { ellipsize(&sanitize_cell(value), max_cell_width) };
    let headers = headers.iter().map(|h| fit(h)).collect::<Vec<_>>();
    let rows = rows
        .iter()
        .map(|row| row.iter().map(|cell| fit(cell)).collect::<Vec<_>>())
        .collect::<Vec<_>>();

    let mut widths = headers.iter().map(|h| display_width(h)).collect::<Vec<_>>();
    for row in &rows {
        for (idx, cell) in row.iter().enumerate().take(widths.len()) {
            widths[idx] = widths[idx].max(display_width(cell));
        }
    }

    let mut output = String::new();
    let _ = writeln!(output, "{}", format_row(&headers, &widths));
    let separator = widths
        .iter()
        .map(|w| "-".repeat((*w).max(1)))
        .collect::<Vec<_>>();
    let _ = writeln!(output, "{}", format_row(&separator, &widths));
    for row in &rows {
        let _ = writeln!(output, "{}", format_row(row, &widths));
    }
    output
}

pub fn print_table(headers: &[String], rows: &[Vec<String>], max_cell_width: usize) {
    print!("{}", render_table(headers, rows, max_cell_width));
}

fn format_row(values: &[String], widths: &[usize]) -> String {
    let line = widths
        .iter()
        .enumerate()
        .map(|(idx, width)| {
            let value = values.get(idx).map(String::as_str).unwrap_or_default();
            let padding = width.saturating_sub(display_width(value));
            format!("{value}{}", " ".repeat(padding))
        })
        .collect::<Vec<_>>()
        .join(COLUMN_GAP);
    line.trim_end().to_string()
}

fn display_width(value: &str) -> usize {
    value.chars().count()
}

fn sanitize_cell(value: &str) -> Cow<'_, str> {
    if value.contains(['\n', '\r', '\t']) {
        Cow::Owned(value.replace(['\n', '\r', '\t'], " "))
    } else {
        Cow::Borrowed(value)
    }
}
