use std::io;

use anyhow::Result;
use log::info;

use crate::{analysis, cli::AnalyzeArgs, io_utils, loader, report};

pub fn execute(args: &AnalyzeArgs) -> Result<()> {
    let Some(input) = &args.input else {
        println!("{}", report::UPLOAD_PROMPT);
        return Ok(());
    };
    let selection = args.selection();
    if selection.is_empty() {
        info!("No analyses selected; nothing to render");
        return Ok(());
    }

    let delimiter = io_utils::resolve_input_delimiter(input, args.delimiter);
    let encoding = io_utils::resolve_encoding(args.input_encoding.as_deref())?;
    let table = loader::load_path(input, delimiter, encoding)?;

    let reports = analysis::run_selection(&table, &selection);
    let mut stdout = io::stdout().lock();
    report::write_reports(&mut stdout, &reports, args.format, args.bar_width)?;
    info!(
        "Rendered {} analysis report(s) for {:?}",
        reports.len(),
        input
    );
    Ok(())
}
