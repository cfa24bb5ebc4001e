use anyhow::Result;
use log::info;

use crate::{cli::PreviewArgs, dataset, io_utils, loader, table};

pub fn execute(args: &PreviewArgs) -> Result<()> {
    let delimiter = io_utils::resolve_input_delimiter(&args.input, args.delimiter);
    let encoding = io_utils::resolve_encoding(args.input_encoding.as_deref())?;
    let raw = loader::load_path(&args.input, delimiter, encoding)?;
    let cleaned = match dataset::clean(&raw) {
        Ok(cleaned) => cleaned,
        Err(err) => {
            println!("error: {err}");
            return Ok(());
        }
    };

    let mut headers = vec!["row".to_string()];
    headers.extend(cleaned.headers().iter().cloned());
    let rows = cleaned
        .records()
        .iter()
        .take(args.rows)
        .map(|record| {
            let mut row = vec![record.row.to_string()];
            row.extend(record.cells.iter().cloned());
            row
        })
        .collect::<Vec<_>>();
    table::print_table(&headers, &rows);

    let summary = cleaned.summary_against(raw.row_count());
    println!(
        "{} of {} row(s) kept; {} dropped with unparseable '{}' values",
        summary.rows_kept,
        summary.rows_read,
        summary.rows_dropped,
        cleaned.headers()[cleaned.rate_index()]
    );
    info!("Displayed {} cleaned row(s) from {:?}", rows.len(), args.input);
    Ok(())
}
