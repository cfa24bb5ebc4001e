//! Plain-text tables for result data.
//!
//! Columns whose body cells are all numeric are right-aligned so counts and
//! totals line up on their last digit; everything else is left-aligned.

use std::borrow::Cow;
use std::fmt::Write as _;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

pub fn render_table(headers: &[String], rows: &[Vec<String>]) -> String {
    let alignments = infer_alignments(headers.len(), rows);
    render_aligned(headers, rows, &alignments)
}

pub fn render_aligned(headers: &[String], rows: &[Vec<String>], alignments: &[Align]) -> String {
    let column_count = headers.len();
    let mut widths = headers.iter().map(|h| display_width(h)).collect::<Vec<_>>();
    for row in rows {
        for (idx, cell) in row.iter().enumerate().take(column_count) {
            widths[idx] = widths[idx].max(display_width(&sanitize_cell(cell)));
        }
    }
    for width in &mut widths {
        *width = (*width).max(3);
    }

    let mut output = String::new();
    let _ = writeln!(output, "{}", format_row(headers, &widths, &[]));
    let rule = widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>();
    let _ = writeln!(output, "{}", format_row(&rule, &widths, &[]));
    for row in rows {
        let _ = writeln!(output, "{}", format_row(row, &widths, alignments));
    }
    output
}

pub fn print_table(headers: &[String], rows: &[Vec<String>]) {
    print!("{}", render_table(headers, rows));
}

fn infer_alignments(column_count: usize, rows: &[Vec<String>]) -> Vec<Align> {
    (0..column_count)
        .map(|idx| {
            let mut cells = rows
                .iter()
                .filter_map(|row| row.get(idx))
                .map(|cell| cell.trim())
                .filter(|cell| !cell.is_empty())
                .peekable();
            if cells.peek().is_some() && cells.all(|cell| cell.parse::<f64>().is_ok()) {
                Align::Right
            } else {
                Align::Left
            }
        })
        .collect()
}

fn format_row(values: &[String], widths: &[usize], alignments: &[Align]) -> String {
    let mut cells = Vec::with_capacity(values.len());
    for (idx, value) in values.iter().enumerate().take(widths.len()) {
        let sanitized = sanitize_cell(value);
        let padding = " ".repeat(widths[idx].saturating_sub(display_width(&sanitized)));
        let cell = match alignments.get(idx).copied().unwrap_or(Align::Left) {
            Align::Left => format!("{sanitized}{padding}"),
            Align::Right => format!("{padding}{sanitized}"),
        };
        cells.push(cell);
    }
    cells.join("  ").trim_end().to_string()
}

/// Character count, ignoring ANSI colour sequences.
pub fn display_width(value: &str) -> usize {
    let mut width = 0usize;
    let mut chars = value.chars();
    while let Some(ch) = chars.next() {
        if ch == '\u{1b}' {
            for next in chars.by_ref() {
                if next == 'm' {
                    break;
                }
            }
        } else {
            width += 1;
        }
    }
    width
}

fn sanitize_cell(value: &str) -> Cow<'_, str> {
    if value.contains(['\n', '\r', '\t']) {
        Cow::Owned(value.replace(['\n', '\r', '\t'], " "))
    } else {
        Cow::Borrowed(value)
    }
}
