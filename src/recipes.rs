//! The seven read-only recipes behind the analysis catalog.
//!
//! Each recipe checks the columns it needs before looking at the rows, so a
//! missing column is reported even when no rows survived cleaning. Blank
//! category cells are left out of every grouping and blank `votes` cells are
//! skipped by the vote recipes.

use std::collections::{BTreeMap, HashMap};

use itertools::Itertools;

use crate::{
    dataset::{CleanedDataset, is_blank},
    error::AnalysisError,
    result::{AnalysisResult, CategoryCount, CategorySum, CrossTab, GroupSummary},
    stats,
};

pub const TYPE_COLUMN: &str = "listed_in(type)";
pub const VOTES_COLUMN: &str = "votes";
pub const ONLINE_ORDER_COLUMN: &str = "online_order";
pub const NAME_COLUMN: &str = "name";

pub const RATING_BINS: usize = 5;

pub fn type_counts(dataset: &CleanedDataset) -> Result<AnalysisResult, AnalysisError> {
    let types = dataset.text_column(TYPE_COLUMN)?;
    ensure_rows(dataset)?;
    let counts = value_counts(&types);
    if counts.is_empty() {
        return Err(AnalysisError::EmptyResult);
    }
    Ok(AnalysisResult::Frequency { counts })
}

pub fn votes_by_type(dataset: &CleanedDataset) -> Result<AnalysisResult, AnalysisError> {
    let types = dataset.text_column(TYPE_COLUMN)?;
    let votes = dataset.integer_column(VOTES_COLUMN)?;
    ensure_rows(dataset)?;
    let mut totals: BTreeMap<&str, i64> = BTreeMap::new();
    for ((category, count), record) in types.iter().zip(&votes).zip(dataset.records()) {
        if is_blank(category) {
            continue;
        }
        let total = totals.entry(*category).or_insert(0);
        if let Some(count) = count {
            *total = total
                .checked_add(*count)
                .ok_or_else(|| AnalysisError::SumOverflow {
                    column: VOTES_COLUMN.to_string(),
                    row: record.row,
                })?;
        }
    }
    if totals.is_empty() {
        return Err(AnalysisError::EmptyResult);
    }
    Ok(AnalysisResult::GroupedSum {
        sums: totals
            .into_iter()
            .map(|(category, total)| CategorySum {
                category: category.to_string(),
                total,
            })
            .collect(),
    })
}

pub fn max_votes(dataset: &CleanedDataset) -> Result<AnalysisResult, AnalysisError> {
    let names = dataset.text_column(NAME_COLUMN)?;
    let votes = dataset.integer_column(VOTES_COLUMN)?;
    let Some(max_votes) = votes.iter().flatten().copied().max() else {
        return Err(AnalysisError::EmptyResult);
    };
    let names = names
        .iter()
        .zip(&votes)
        .filter(|(_, count)| **count == Some(max_votes))
        .map(|(name, _)| name.to_string())
        .collect();
    Ok(AnalysisResult::MaxLookup { max_votes, names })
}

pub fn online_order_counts(dataset: &CleanedDataset) -> Result<AnalysisResult, AnalysisError> {
    let orders = dataset.text_column(ONLINE_ORDER_COLUMN)?;
    ensure_rows(dataset)?;
    let counts = value_counts(&orders);
    if counts.is_empty() {
        return Err(AnalysisError::EmptyResult);
    }
    Ok(AnalysisResult::Frequency { counts })
}

pub fn rating_distribution(dataset: &CleanedDataset) -> Result<AnalysisResult, AnalysisError> {
    ensure_rows(dataset)?;
    Ok(AnalysisResult::Histogram {
        bins: stats::histogram(&dataset.rates(), RATING_BINS),
    })
}

pub fn rating_by_online_order(
    dataset: &CleanedDataset,
) -> Result<AnalysisResult, AnalysisError> {
    let orders = dataset.text_column(ONLINE_ORDER_COLUMN)?;
    ensure_rows(dataset)?;
    let groups = orders
        .into_iter()
        .zip(dataset.rates())
        .filter(|(group, _)| !is_blank(group))
        .into_group_map()
        .into_iter()
        .sorted_by(|a, b| a.0.cmp(&b.0))
        .filter_map(|(group, rates)| {
            stats::box_summary(&rates).map(|summary| GroupSummary {
                group: group.to_string(),
                summary,
            })
        })
        .collect::<Vec<_>>();
    if groups.is_empty() {
        return Err(AnalysisError::EmptyResult);
    }
    Ok(AnalysisResult::BoxPlot { groups })
}

pub fn type_by_online_order(dataset: &CleanedDataset) -> Result<AnalysisResult, AnalysisError> {
    let types = dataset.text_column(TYPE_COLUMN)?;
    let orders = dataset.text_column(ONLINE_ORDER_COLUMN)?;
    ensure_rows(dataset)?;
    let table = cross_tabulate(&types, &orders);
    if table.rows.is_empty() {
        return Err(AnalysisError::EmptyResult);
    }
    Ok(AnalysisResult::Matrix { table })
}

/// Counts per distinct non-blank value, most frequent first. Equal counts
/// keep the order in which the values first appear.
pub fn value_counts(values: &[&str]) -> Vec<CategoryCount> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<CategoryCount> = Vec::new();
    for value in values.iter().filter(|value| !is_blank(value)) {
        match positions.get(value).copied() {
            Some(idx) => counts[idx].count += 1,
            None => {
                positions.insert(*value, counts.len());
                counts.push(CategoryCount {
                    category: value.to_string(),
                    count: 1,
                });
            }
        }
    }
    // Stable sort preserves first-appearance order among ties.
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// Counts each (row, column) pair. Pairs with a blank side are not counted
/// and contribute no labels.
pub fn cross_tabulate(rows: &[&str], columns: &[&str]) -> CrossTab {
    let pairs = rows
        .iter()
        .copied()
        .zip(columns.iter().copied())
        .filter(|(row, column)| !is_blank(row) && !is_blank(column))
        .collect::<Vec<_>>();
    let row_labels = pairs.iter().map(|(row, _)| *row).unique().sorted().collect::<Vec<_>>();
    let column_labels = pairs
        .iter()
        .map(|(_, column)| *column)
        .unique()
        .sorted()
        .collect::<Vec<_>>();
    let mut counts = vec![vec![0usize; column_labels.len()]; row_labels.len()];
    for (row, column) in &pairs {
        if let (Ok(r), Ok(c)) = (
            row_labels.binary_search(row),
            column_labels.binary_search(column),
        ) {
            counts[r][c] += 1;
        }
    }
    CrossTab {
        rows: row_labels.into_iter().map(str::to_string).collect(),
        columns: column_labels.into_iter().map(str::to_string).collect(),
        counts,
    }
}

fn ensure_rows(dataset: &CleanedDataset) -> Result<(), AnalysisError> {
    if dataset.is_empty() {
        Err(AnalysisError::EmptyResult)
    } else {
        Ok(())
    }
}
