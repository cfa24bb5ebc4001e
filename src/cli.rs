use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::{analysis::Analysis, chart::DEFAULT_BAR_WIDTH};

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Clean restaurant listings and chart a fixed catalog of analyses",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Clean a restaurant CSV and render the selected analyses
    Analyze(AnalyzeArgs),
    /// List the analyses that can be selected
    Analyses,
    /// Preview the first few cleaned rows of a CSV file
    Preview(PreviewArgs),
}

#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
#[value(rename_all = "kebab-case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    /// Restaurant CSV to analyze ('-' reads stdin)
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,
    /// Analysis to render, by id or menu name; repeat to select several
    #[arg(short = 'a', long = "analysis", value_parser = parse_analysis, action = clap::ArgAction::Append)]
    pub analyses: Vec<Analysis>,
    /// Render every analysis in catalog order
    #[arg(long, conflicts_with = "analyses")]
    pub all: bool,
    /// Output format for the rendered reports
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    /// Width in characters of the longest chart bar
    #[arg(long = "bar-width", default_value_t = DEFAULT_BAR_WIDTH)]
    pub bar_width: usize,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
}

impl AnalyzeArgs {
    pub fn selection(&self) -> Vec<Analysis> {
        if self.all {
            Analysis::ALL.to_vec()
        } else {
            self.analyses.clone()
        }
    }
}

#[derive(Debug, Args)]
pub struct PreviewArgs {
    /// Restaurant CSV to preview
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Number of cleaned rows to display
    #[arg(long, default_value_t = 10)]
    pub rows: usize,
    /// CSV delimiter character
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding for input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
}

pub fn parse_analysis(value: &str) -> Result<Analysis, String> {
    value.parse()
}

pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\t" => Ok(b'\t'),
        "comma" | "," => Ok(b','),
        "|" | "pipe" => Ok(b'|'),
        ";" | "semicolon" => Ok(b';'),
        other => {
            let mut chars = other.chars();
            let first = chars
                .next()
                .ok_or_else(|| "Delimiter cannot be empty".to_string())?;
            if chars.next().is_some() {
                return Err("Delimiter must be a single character".to_string());
            }
            if !first.is_ascii() {
                return Err("Delimiter must be ASCII".to_string());
            }
            Ok(first as u8)
        }
    }
}
