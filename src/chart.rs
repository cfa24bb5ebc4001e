//! Text renderings of analysis results: bars, histograms, box plots and a
//! shaded heatmap grid.

use std::fmt::Write as _;

use crate::{
    analysis::ChartLabels,
    result::{AnalysisResult, CrossTab, GroupSummary},
    stats::HistogramBin,
    table::display_width,
};

pub const DEFAULT_BAR_WIDTH: usize = 40;

const BAR: char = '#';
const SHADES: [char; 5] = [' ', '.', ':', '+', '#'];

pub fn render(result: &AnalysisResult, labels: &ChartLabels, width: usize) -> String {
    let width = width.max(10);
    let mut out = String::new();
    let _ = writeln!(out, "{}", labels.title);
    let _ = writeln!(out, "x: {}  y: {}", labels.x_label, labels.y_label);
    let body = match result {
        AnalysisResult::Frequency { counts } => bars(
            counts
                .iter()
                .map(|c| (c.category.clone(), c.count as f64, c.count.to_string())),
            width,
        ),
        AnalysisResult::GroupedSum { sums } => bars(
            sums.iter()
                .map(|s| (s.category.clone(), s.total as f64, s.total.to_string())),
            width,
        ),
        AnalysisResult::MaxLookup { max_votes, names } => {
            let mut text = format!("Maximum votes: {max_votes}\n");
            for name in names {
                let _ = writeln!(text, "  {name}");
            }
            text
        }
        AnalysisResult::Histogram { bins } => histogram(bins, width),
        AnalysisResult::BoxPlot { groups } => box_plots(groups, width),
        AnalysisResult::Matrix { table } => heatmap(table),
    };
    out.push_str(&body);
    out
}

fn bars<I>(entries: I, width: usize) -> String
where
    I: IntoIterator<Item = (String, f64, String)>,
{
    let entries = entries.into_iter().collect::<Vec<_>>();
    let label_width = entries
        .iter()
        .map(|(label, _, _)| display_width(label))
        .max()
        .unwrap_or(0);
    let peak = entries
        .iter()
        .map(|(_, value, _)| *value)
        .fold(0.0_f64, f64::max);
    let mut out = String::new();
    for (label, value, text) in &entries {
        let length = scaled(*value, peak, width);
        let padding = " ".repeat(label_width.saturating_sub(display_width(label)));
        let _ = writeln!(
            out,
            "{label}{padding} | {} {text}",
            BAR.to_string().repeat(length)
        );
    }
    out
}

fn histogram(bins: &[HistogramBin], width: usize) -> String {
    let last = bins.len().saturating_sub(1);
    bars(
        bins.iter().enumerate().map(|(idx, bin)| {
            let close = if idx == last { ']' } else { ')' };
            (
                format!("[{:.2}, {:.2}{close}", bin.lower, bin.upper),
                bin.count as f64,
                bin.count.to_string(),
            )
        }),
        width,
    )
}

fn box_plots(groups: &[GroupSummary], width: usize) -> String {
    let low = groups
        .iter()
        .map(|g| g.summary.min)
        .fold(f64::INFINITY, f64::min);
    let high = groups
        .iter()
        .map(|g| g.summary.max)
        .fold(f64::NEG_INFINITY, f64::max);
    let span = if high > low { high - low } else { 1.0 };
    let column = |value: f64| -> usize {
        let position = ((value - low) / span * (width - 1) as f64).round();
        (position.max(0.0) as usize).min(width - 1)
    };
    let label_width = groups
        .iter()
        .map(|g| display_width(&g.group))
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for group in groups {
        let s = &group.summary;
        let mut line = vec![' '; width];
        for cell in &mut line[column(s.whisker_low)..=column(s.whisker_high)] {
            *cell = '-';
        }
        for cell in &mut line[column(s.q1)..=column(s.q3)] {
            *cell = '=';
        }
        line[column(s.whisker_low)] = '|';
        line[column(s.whisker_high)] = '|';
        line[column(s.median)] = 'M';
        for outlier in &s.outliers {
            line[column(*outlier)] = 'o';
        }
        let padding = " ".repeat(label_width.saturating_sub(display_width(&group.group)));
        let plot = line.into_iter().collect::<String>();
        let _ = writeln!(out, "{}{padding} {}", group.group, plot.trim_end());
    }
    if low.is_finite() && high.is_finite() {
        let _ = writeln!(
            out,
            "{} {low:.2}{}{high:.2}",
            " ".repeat(label_width),
            " ".repeat(width.saturating_sub(8))
        );
    }
    out
}

fn heatmap(table: &CrossTab) -> String {
    let peak = table.max_cell();
    let label_width = table
        .rows
        .iter()
        .map(|r| display_width(r))
        .max()
        .unwrap_or(0);
    let cell_width = table
        .columns
        .iter()
        .map(|c| display_width(c))
        .chain(table.counts.iter().flatten().map(|n| n.to_string().len() + 2))
        .max()
        .unwrap_or(3);

    let mut out = String::new();
    let _ = write!(out, "{}", " ".repeat(label_width));
    for column in &table.columns {
        let _ = write!(out, " {column:>cell_width$}");
    }
    out.push('\n');
    for (label, counts) in table.rows.iter().zip(&table.counts) {
        let padding = " ".repeat(label_width.saturating_sub(display_width(label)));
        let _ = write!(out, "{label}{padding}");
        for count in counts {
            let cell = format!("{} {count}", shade(*count, peak));
            let _ = write!(out, " {cell:>cell_width$}");
        }
        out.push('\n');
    }
    out
}

fn shade(count: usize, peak: usize) -> char {
    if peak == 0 || count == 0 {
        return SHADES[0];
    }
    let level = (count * (SHADES.len() - 1)).div_ceil(peak);
    SHADES[level.min(SHADES.len() - 1)]
}

fn scaled(value: f64, peak: f64, width: usize) -> usize {
    if peak <= 0.0 || value <= 0.0 {
        return 0;
    }
    ((value / peak) * width as f64).round().max(1.0) as usize
}
