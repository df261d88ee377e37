//! hubscan CLI
//!
//! Extracts article records (title, url, date, author, tags) from blog
//! search-result pages, either from a saved page or by walking live search
//! results, and writes them as CSV or JSON lines.

mod cli;
mod logging;
mod search;

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::process::ExitCode;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use hubscan_common::url::PLATFORM_ORIGIN;
use hubscan_common::warning::clear_warnings;
use hubscan_common::{FetchConfig, HttpFetcher, RetryPolicy};
use hubscan_html::{CsvSink, Extractor, ExtractorConfig, JsonLinesSink, Sink, Token, Tokenizer};
use owo_colors::OwoColorize;

use cli::{Cli, Format};
use search::{SearchConfig, StopReason, run_search};

/// What a run produced, for the closing summary.
struct Summary {
    articles: usize,
    pages: Option<u32>,
    stop: Option<StopReason>,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);
    clear_warnings();

    let out: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("cannot create {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    let summary = match cli.format {
        Format::Csv => {
            let mut sink = CsvSink::new(out);
            sink.write_header().context("failed to write CSV header")?;
            let summary = run(&cli, &mut sink)?;
            sink.flush().context("failed to flush output")?;
            summary
        }
        Format::Jsonl => {
            let mut sink = JsonLinesSink::new(out);
            let summary = run(&cli, &mut sink)?;
            sink.flush().context("failed to flush output")?;
            summary
        }
    };

    print_summary(&summary);
    if summary.stop == Some(StopReason::FetchFailed) {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

/// Dispatch to offline or live mode.
fn run<S: Sink<Error = io::Error>>(cli: &Cli, sink: &mut S) -> Result<Summary> {
    if let Some(query) = &cli.query {
        return run_live(cli, query, sink);
    }
    let Some(path) = &cli.input else {
        anyhow::bail!("either --input or --query is required");
    };
    run_offline(cli, path, sink)
}

/// Extract every article card from one saved page.
fn run_offline<S: Sink<Error = io::Error>>(cli: &Cli, path: &Path, sink: &mut S) -> Result<Summary> {
    let html = fs::read(path).with_context(|| format!("cannot read {}", path.display()))?;
    tracing::info!(path = %path.display(), bytes = html.len(), "extracting from file");

    if cli.tokens {
        dump_tokens(&html);
    }

    let mut extractor = Extractor::new(ExtractorConfig::default());
    let articles = extractor
        .consume_html(&html, sink)
        .context("failed to write records")?;
    Ok(Summary {
        articles,
        pages: None,
        stop: None,
    })
}

/// Walk live search results for `query`.
fn run_live<S: Sink<Error = io::Error>>(cli: &Cli, query: &str, sink: &mut S) -> Result<Summary> {
    let fetch_config = FetchConfig {
        timeout: Duration::from_secs(cli.timeout),
        retry: RetryPolicy {
            retries: cli.retries,
            ..RetryPolicy::default()
        },
        ..FetchConfig::default()
    };
    let mut fetcher = HttpFetcher::new(fetch_config).context("cannot build HTTP client")?;

    let config = SearchConfig {
        origin: PLATFORM_ORIGIN.to_string(),
        lang: cli.lang.to_string(),
        query: query.to_string(),
        delay: Duration::from_millis(cli.delay_ms),
    };
    let limit = usize::try_from(cli.max).unwrap_or(usize::MAX);
    let mut extractor = Extractor::new(ExtractorConfig::with_limit(limit));

    let outcome = run_search(&config, &mut extractor, &mut fetcher, sink, thread::sleep)
        .context("failed to write records")?;
    if let Some(err) = &outcome.error {
        eprintln!("{} page {}: {err}", "error:".red().bold(), outcome.pages);
    }
    Ok(Summary {
        articles: extractor.emitted(),
        pages: Some(outcome.pages),
        stop: Some(outcome.reason),
    })
}

/// Print the token stream of `html` to stderr.
fn dump_tokens(html: &[u8]) {
    let mut tokenizer = Tokenizer::new();
    let tokens: Vec<Token> = tokenizer.feed(html, true).collect();
    eprintln!("{}", format!("=== HTML Tokens ({}) ===", tokens.len()).bold());
    for (i, token) in tokens.iter().enumerate() {
        let line = match token {
            Token::StartTag { .. } => token.to_string().green().to_string(),
            Token::EndTag { .. } => token.to_string().yellow().to_string(),
            Token::Text { .. } => token.to_string().dimmed().to_string(),
        };
        eprintln!("  {i:4}: {line}");
    }
    eprintln!();
}

fn print_summary(summary: &Summary) {
    let count = format!("{} articles", summary.articles);
    match (summary.pages, summary.stop) {
        (Some(pages), Some(stop)) => {
            let stop = match stop {
                StopReason::FetchFailed => stop.to_string().red().to_string(),
                StopReason::LimitReached | StopReason::Exhausted => stop.to_string(),
            };
            eprintln!("{} from {pages} pages ({stop})", count.green().bold());
        }
        _ => eprintln!("{}", count.green().bold()),
    }
}
