//! Loads an uploaded CSV into an in-memory [`RawTable`].

use std::{io::Read, path::Path};

use anyhow::{Context, Result};
use encoding_rs::Encoding;
use log::{debug, info};

use crate::{error::AnalysisError, io_utils};

/// Headers plus decoded string rows, exactly as they appear in the file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header.trim() == name)
    }

    pub fn require_column(&self, name: &str) -> Result<usize, AnalysisError> {
        self.column_index(name)
            .ok_or_else(|| AnalysisError::missing_column(name))
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

pub fn load_path(path: &Path, delimiter: u8, encoding: &'static Encoding) -> Result<RawTable> {
    let reader = io_utils::open_csv_reader_from_path(path, delimiter)?;
    let table = read_table(reader, encoding).with_context(|| format!("Reading {path:?}"))?;
    info!(
        "Loaded {} row(s) across {} column(s) from {:?}",
        table.row_count(),
        table.headers.len(),
        path
    );
    Ok(table)
}

pub fn read_table<R>(mut reader: csv::Reader<R>, encoding: &'static Encoding) -> Result<RawTable>
where
    R: Read,
{
    let headers = io_utils::reader_headers(&mut reader, encoding)?;
    debug!("Headers: {:?}", headers);
    let mut rows = Vec::new();
    for (row_idx, record) in reader.byte_records().enumerate() {
        let record = record.with_context(|| format!("Reading row {}", row_idx + 2))?;
        let decoded = io_utils::decode_record(&record, encoding)
            .with_context(|| format!("Decoding row {}", row_idx + 2))?;
        rows.push(decoded);
    }
    Ok(RawTable::new(headers, rows))
}
