use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use strum_macros::Display;

/// hubscan: article records from blog search-result pages
#[derive(Parser, Debug)]
#[command(name = "hubscan")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Extract every article card from a saved page
    hubscan -i search.html > articles.csv

    # Walk live search results, at most 50 articles
    hubscan -q "rust async" --max 50 -o articles.csv

    # Russian results as JSON lines
    hubscan -q "токенизатор" --lang ru -f jsonl

    # Inspect the token stream of a saved page
    hubscan -i search.html --tokens > /dev/null
"#)]
pub struct Cli {
    /// Saved search-result page to extract from (offline mode)
    #[arg(short, long, value_name = "FILE", required_unless_present = "query")]
    pub input: Option<PathBuf>,

    /// Search query to fetch live result pages for
    #[arg(short, long, value_name = "TEXT", conflicts_with = "input")]
    pub query: Option<String>,

    /// Stop after this many articles (live mode)
    #[arg(long, value_name = "N", default_value = "100", value_parser = clap::value_parser!(u32).range(1..))]
    pub max: u32,

    /// Delay between page requests, in milliseconds
    #[arg(long, value_name = "MS", default_value = "300")]
    pub delay_ms: u64,

    /// Request timeout, in seconds
    #[arg(long, value_name = "SECONDS", default_value = "15", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: u64,

    /// Retries per page after a transient failure
    #[arg(long, value_name = "N", default_value = "3")]
    pub retries: u32,

    /// Search language
    #[arg(long, value_enum, default_value_t = Lang::En)]
    pub lang: Lang,

    /// Record format
    #[arg(short, long, value_enum, default_value_t = Format::Csv)]
    pub format: Format,

    /// Write records to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Print the token stream of the input file to stderr
    #[arg(long, requires = "input")]
    pub tokens: bool,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Language segment of the search URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Lang {
    /// English interface
    En,
    /// Russian interface
    Ru,
}

/// Output record format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Format {
    /// `title,url,date,author,tags` with every field quoted
    Csv,
    /// One JSON object per line
    Jsonl,
}
