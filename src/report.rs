//! Writes analysis reports as text sections or as a JSON document.

use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::{
    analysis::{Analysis, ChartLabels, Report},
    chart,
    cli::OutputFormat,
    error::AnalysisError,
    result::AnalysisResult,
    table,
};

pub const UPLOAD_PROMPT: &str = "Please upload a CSV file to get started.";

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    analysis: Analysis,
    name: &'static str,
    #[serde(flatten)]
    labels: ChartLabels,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<&'a AnalysisResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a AnalysisError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    info: Option<String>,
}

impl<'a> From<&'a Report> for JsonReport<'a> {
    fn from(report: &'a Report) -> Self {
        let (result, error, info) = match &report.outcome {
            Ok(result) => (Some(result), None, None),
            Err(err) if err.is_informational() => (None, None, Some(err.to_string())),
            Err(err) => (None, Some(err), None),
        };
        Self {
            analysis: report.analysis,
            name: report.analysis.display_name(),
            labels: report.analysis.labels(),
            result,
            error,
            info,
        }
    }
}

pub fn write_reports<W: Write>(
    out: &mut W,
    reports: &[Report],
    format: OutputFormat,
    bar_width: usize,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let documents = reports.iter().map(JsonReport::from).collect::<Vec<_>>();
            serde_json::to_writer_pretty(&mut *out, &documents)
                .context("Serializing reports as JSON")?;
            writeln!(out)?;
        }
        OutputFormat::Text => {
            for (idx, report) in reports.iter().enumerate() {
                if idx > 0 {
                    writeln!(out)?;
                }
                write!(out, "{}", render_text(report, bar_width))?;
            }
        }
    }
    out.flush().context("Flushing report output")
}

pub fn render_text(report: &Report, bar_width: usize) -> String {
    let heading = report.analysis.subheading();
    let mut text = format!("== {heading} ==\n");
    match &report.outcome {
        Ok(result) => {
            text.push_str(&chart::render(result, &report.analysis.labels(), bar_width));
            text.push('\n');
            let (headers, rows) = result_rows(result);
            text.push_str(&table::render_table(&headers, &rows));
        }
        Err(err) if err.is_informational() => {
            text.push_str(&format!("info: {err}\n"));
        }
        Err(err) => {
            text.push_str(&format!("error: {err}\n"));
        }
    }
    text
}

/// Tabular form of a result, for display beneath its chart.
pub fn result_rows(result: &AnalysisResult) -> (Vec<String>, Vec<Vec<String>>) {
    match result {
        AnalysisResult::Frequency { counts } => (
            headers(&["value", "count"]),
            counts
                .iter()
                .map(|c| vec![c.category.clone(), c.count.to_string()])
                .collect(),
        ),
        AnalysisResult::GroupedSum { sums } => (
            headers(&["value", "total"]),
            sums.iter()
                .map(|s| vec![s.category.clone(), s.total.to_string()])
                .collect(),
        ),
        AnalysisResult::MaxLookup { max_votes, names } => (
            headers(&["name", "votes"]),
            names
                .iter()
                .map(|name| vec![name.clone(), max_votes.to_string()])
                .collect(),
        ),
        AnalysisResult::Histogram { bins } => (
            headers(&["lower", "upper", "count"]),
            bins.iter()
                .map(|b| {
                    vec![
                        format_number(b.lower),
                        format_number(b.upper),
                        b.count.to_string(),
                    ]
                })
                .collect(),
        ),
        AnalysisResult::BoxPlot { groups } => (
            headers(&[
                "group", "count", "min", "q1", "median", "q3", "max", "outliers",
            ]),
            groups
                .iter()
                .map(|g| {
                    let s = &g.summary;
                    vec![
                        g.group.clone(),
                        s.count.to_string(),
                        format_number(s.min),
                        format_number(s.q1),
                        format_number(s.median),
                        format_number(s.q3),
                        format_number(s.max),
                        s.outliers.len().to_string(),
                    ]
                })
                .collect(),
        ),
        AnalysisResult::Matrix { table } => {
            let mut header = vec!["listed_in(type)".to_string()];
            header.extend(table.columns.iter().cloned());
            let rows = table
                .rows
                .iter()
                .zip(&table.counts)
                .map(|(label, counts)| {
                    let mut row = vec![label.clone()];
                    row.extend(counts.iter().map(usize::to_string));
                    row
                })
                .collect();
            (header, rows)
        }
    }
}

fn headers(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.4}")
    }
}
