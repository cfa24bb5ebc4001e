pub mod analysis;
pub mod analyze;
pub mod chart;
pub mod cli;
pub mod dataset;
pub mod error;
pub mod io_utils;
pub mod loader;
pub mod preview;
pub mod rating;
pub mod recipes;
pub mod report;
pub mod result;
pub mod stats;
pub mod table;

use std::{env, sync::OnceLock};

use anyhow::Result;
use clap::Parser;
use log::{LevelFilter, debug};

use crate::{
    analysis::Analysis,
    cli::{Cli, Commands},
};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("restaurant_insights", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    debug!("Parsed command: {:?}", cli.command);
    match cli.command {
        Commands::Analyze(args) => analyze::execute(&args),
        Commands::Analyses => handle_analyses(),
        Commands::Preview(args) => preview::execute(&args),
    }
}

fn handle_analyses() -> Result<()> {
    let headers = vec!["id".to_string(), "name".to_string(), "chart".to_string()];
    let rows = Analysis::ALL
        .iter()
        .map(|analysis| {
            vec![
                analysis.id().to_string(),
                analysis.display_name().to_string(),
                analysis.labels().title.to_string(),
            ]
        })
        .collect::<Vec<_>>();
    table::print_table(&headers, &rows);
    Ok(())
}
