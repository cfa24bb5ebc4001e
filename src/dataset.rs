//! Rating normalisation over a whole table.
//!
//! [`clean`] turns a [`RawTable`] into a [`CleanedDataset`] in which every
//! record carries a finite rating. Records whose rating cannot be parsed are
//! dropped silently; they are not errors.

use log::{debug, info};
use serde::Serialize;

use crate::{
    error::AnalysisError,
    loader::RawTable,
    rating::{RATE_COLUMN, parse_rating},
};

#[derive(Debug, Clone, PartialEq)]
pub struct CleanedRecord {
    /// 1-based data row number in the source file.
    pub row: usize,
    pub cells: Vec<String>,
    pub rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CleaningSummary {
    pub rows_read: usize,
    pub rows_kept: usize,
    pub rows_dropped: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CleanedDataset {
    headers: Vec<String>,
    rate_index: usize,
    records: Vec<CleanedRecord>,
}

pub fn clean(table: &RawTable) -> Result<CleanedDataset, AnalysisError> {
    let rate_index = table.require_column(RATE_COLUMN)?;
    let mut records = Vec::with_capacity(table.row_count());
    for (idx, row) in table.rows.iter().enumerate() {
        let raw = row.get(rate_index).map(String::as_str).unwrap_or_default();
        match parse_rating(raw) {
            Some(rate) => {
                let mut cells = row.clone();
                cells[rate_index] = rate.to_string();
                records.push(CleanedRecord {
                    row: idx + 1,
                    cells,
                    rate,
                });
            }
            None => debug!("Dropping row {} with unparseable rating {:?}", idx + 1, raw),
        }
    }
    let dataset = CleanedDataset {
        headers: table.headers.clone(),
        rate_index,
        records,
    };
    let summary = dataset.summary_against(table.row_count());
    info!(
        "Kept {} of {} row(s); dropped {} with unparseable ratings",
        summary.rows_kept, summary.rows_read, summary.rows_dropped
    );
    Ok(dataset)
}

/// Empty or whitespace-only cells count as missing values.
pub fn is_blank(cell: &str) -> bool {
    cell.trim().is_empty()
}

impl CleanedDataset {
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rate_index(&self) -> usize {
        self.rate_index
    }

    pub fn records(&self) -> &[CleanedRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Result<usize, AnalysisError> {
        self.headers
            .iter()
            .position(|header| header.trim() == name)
            .ok_or_else(|| AnalysisError::missing_column(name))
    }

    /// Borrowed cell values of `name`, one per record.
    pub fn text_column(&self, name: &str) -> Result<Vec<&str>, AnalysisError> {
        let idx = self.column_index(name)?;
        Ok(self
            .records
            .iter()
            .map(|record| record.cells.get(idx).map(String::as_str).unwrap_or_default())
            .collect())
    }

    /// Values of `name` parsed as integers. Blank cells are `None`; any other
    /// non-integer text fails with the offending row.
    pub fn integer_column(&self, name: &str) -> Result<Vec<Option<i64>>, AnalysisError> {
        let idx = self.column_index(name)?;
        self.records
            .iter()
            .map(|record| {
                let raw = record.cells.get(idx).map(String::as_str).unwrap_or_default();
                if is_blank(raw) {
                    return Ok(None);
                }
                raw.trim()
                    .parse::<i64>()
                    .map(Some)
                    .map_err(|_| AnalysisError::InvalidValue {
                        column: name.to_string(),
                        row: record.row,
                        value: raw.to_string(),
                    })
            })
            .collect()
    }

    pub fn rates(&self) -> Vec<f64> {
        self.records.iter().map(|record| record.rate).collect()
    }

    pub fn summary_against(&self, rows_read: usize) -> CleaningSummary {
        CleaningSummary {
            rows_read,
            rows_kept: self.records.len(),
            rows_dropped: rows_read.saturating_sub(self.records.len()),
        }
    }

    /// The cleaned rows as a raw table; the rating cell holds the parsed score.
    pub fn to_raw(&self) -> RawTable {
        let rows = self
            .records
            .iter()
            .map(|record| record.cells.clone())
            .collect();
        RawTable::new(self.headers.clone(), rows)
    }

    /// Runs the cleaner over this dataset again, keeping the source row numbers.
    pub fn reclean(&self) -> Result<CleanedDataset, AnalysisError> {
        let mut again = clean(&self.to_raw())?;
        for (record, original) in again.records.iter_mut().zip(&self.records) {
            record.row = original.row;
        }
        Ok(again)
    }
}
