use serde::Serialize;

use crate::stats::{BoxSummary, HistogramBin};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySum {
    pub category: String,
    pub total: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSummary {
    pub group: String,
    pub summary: BoxSummary,
}

/// Two-way count table. `counts[r][c]` pairs `rows[r]` with `columns[c]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrossTab {
    pub rows: Vec<String>,
    pub columns: Vec<String>,
    pub counts: Vec<Vec<usize>>,
}

impl CrossTab {
    pub fn get(&self, row: &str, column: &str) -> Option<usize> {
        let r = self.rows.iter().position(|value| value == row)?;
        let c = self.columns.iter().position(|value| value == column)?;
        Some(self.counts[r][c])
    }

    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }

    pub fn max_cell(&self) -> usize {
        self.counts.iter().flatten().copied().max().unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnalysisResult {
    Frequency { counts: Vec<CategoryCount> },
    GroupedSum { sums: Vec<CategorySum> },
    MaxLookup { max_votes: i64, names: Vec<String> },
    Histogram { bins: Vec<HistogramBin> },
    BoxPlot { groups: Vec<GroupSummary> },
    Matrix { table: CrossTab },
}

impl AnalysisResult {
    pub fn kind(&self) -> &'static str {
        match self {
            AnalysisResult::Frequency { .. } => "frequency",
            AnalysisResult::GroupedSum { .. } => "grouped_sum",
            AnalysisResult::MaxLookup { .. } => "max_lookup",
            AnalysisResult::Histogram { .. } => "histogram",
            AnalysisResult::BoxPlot { .. } => "box_plot",
            AnalysisResult::Matrix { .. } => "matrix",
        }
    }
}
